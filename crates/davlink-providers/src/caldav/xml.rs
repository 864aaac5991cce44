//! XML for the `current-user-principal` discovery request.
//!
//! The request body asks for a single property in the `DAV:` namespace,
//! bound to the `d` prefix. The response must be a WebDAV `multistatus`
//! document; anything else counts as a malformed response.

use std::io::Cursor;

use quick_xml::Writer;
use quick_xml::events::{BytesEnd, BytesStart, Event};

use crate::error::{ProviderError, ProviderResult};

/// DAV namespace
pub const DAV_NS: &str = "DAV:";

/// Generates the PROPFIND body requesting `d:current-user-principal`.
///
/// ```text
/// <d:propfind xmlns:d="DAV:"><d:prop><d:current-user-principal/></d:prop></d:propfind>
/// ```
pub fn current_user_principal_body() -> ProviderResult<String> {
    let mut writer = Writer::new(Cursor::new(Vec::new()));

    let mut propfind = BytesStart::new("d:propfind");
    propfind.push_attribute(("xmlns:d", DAV_NS));

    let events = [
        Event::Start(propfind),
        Event::Start(BytesStart::new("d:prop")),
        Event::Empty(BytesStart::new("d:current-user-principal")),
        Event::End(BytesEnd::new("d:prop")),
        Event::End(BytesEnd::new("d:propfind")),
    ];
    for event in events {
        writer
            .write_event(event)
            .map_err(|e| ProviderError::internal(format!("failed to write PROPFIND body: {}", e)))?;
    }

    String::from_utf8(writer.into_inner().into_inner())
        .map_err(|e| ProviderError::internal(format!("PROPFIND body is not UTF-8: {}", e)))
}

/// Parses a PROPFIND response and returns the principal href, if any.
///
/// # Errors
///
/// Returns an invalid-response error when the body is not well-formed XML
/// or has no `multistatus` element.
pub fn parse_current_user_principal(xml: &str) -> ProviderResult<Option<String>> {
    let mut reader = quick_xml::Reader::from_str(xml);
    reader.config_mut().trim_text(true);

    let mut saw_multistatus = false;
    let mut in_principal = false;
    let mut in_href = false;
    let mut principal: Option<String> = None;
    let mut buf = Vec::new();

    loop {
        match reader.read_event_into(&mut buf) {
            Ok(Event::Start(e)) => match e.local_name().as_ref() {
                b"multistatus" => saw_multistatus = true,
                b"current-user-principal" => in_principal = true,
                b"href" if in_principal => in_href = true,
                _ => {}
            },
            Ok(Event::Empty(e)) => {
                if e.local_name().as_ref() == b"multistatus" {
                    saw_multistatus = true;
                }
            }
            Ok(Event::End(e)) => match e.local_name().as_ref() {
                b"current-user-principal" => in_principal = false,
                b"href" => in_href = false,
                _ => {}
            },
            Ok(Event::Text(e)) => {
                if in_href && principal.is_none() {
                    let text = e.unescape().map_err(|err| {
                        ProviderError::invalid_response(format!("bad principal href: {}", err))
                    })?;
                    principal = Some(text.into_owned());
                }
            }
            Ok(Event::CData(e)) => {
                if in_href && principal.is_none() {
                    principal = Some(String::from_utf8_lossy(&e).trim().to_string());
                }
            }
            Ok(Event::Eof) => break,
            Err(e) => {
                return Err(ProviderError::invalid_response(format!(
                    "malformed XML at position {}: {}",
                    reader.buffer_position(),
                    e
                )));
            }
            _ => {}
        }
        buf.clear();
    }

    if !saw_multistatus {
        return Err(ProviderError::invalid_response(
            "response is not a DAV multistatus document",
        ));
    }

    Ok(principal)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn propfind_body_generation() {
        let body = current_user_principal_body().unwrap();
        insta::assert_snapshot!(
            body,
            @r#"<d:propfind xmlns:d="DAV:"><d:prop><d:current-user-principal/></d:prop></d:propfind>"#
        );
    }

    #[test]
    fn parse_principal_with_prefix() {
        let xml = r#"<?xml version="1.0" encoding="utf-8"?>
<d:multistatus xmlns:d="DAV:">
  <d:response>
    <d:href>/dav/</d:href>
    <d:propstat>
      <d:prop>
        <d:current-user-principal>
          <d:href>/principals/users/alice/</d:href>
        </d:current-user-principal>
      </d:prop>
      <d:status>HTTP/1.1 200 OK</d:status>
    </d:propstat>
  </d:response>
</d:multistatus>"#;

        assert_eq!(
            parse_current_user_principal(xml).unwrap(),
            Some("/principals/users/alice/".to_string())
        );
    }

    #[test]
    fn parse_principal_default_namespace() {
        let xml = r#"<multistatus xmlns="DAV:">
  <response>
    <href>/</href>
    <propstat>
      <prop><current-user-principal><href>/p/bob%40example.com/</href></current-user-principal></prop>
      <status>HTTP/1.1 200 OK</status>
    </propstat>
  </response>
</multistatus>"#;

        assert_eq!(
            parse_current_user_principal(xml).unwrap(),
            Some("/p/bob%40example.com/".to_string())
        );
    }

    #[test]
    fn parse_multistatus_without_principal() {
        let xml = r#"<d:multistatus xmlns:d="DAV:">
  <d:response>
    <d:href>/dav/</d:href>
    <d:propstat>
      <d:prop><d:current-user-principal/></d:prop>
      <d:status>HTTP/1.1 404 Not Found</d:status>
    </d:propstat>
  </d:response>
</d:multistatus>"#;

        assert_eq!(parse_current_user_principal(xml).unwrap(), None);
    }

    #[test]
    fn parse_principal_in_cdata() {
        let xml = r#"<d:multistatus xmlns:d="DAV:">
  <d:response>
    <d:href>/dav/</d:href>
    <d:propstat>
      <d:prop>
        <d:current-user-principal><d:href><![CDATA[/principals/alice/]]></d:href></d:current-user-principal>
      </d:prop>
    </d:propstat>
  </d:response>
</d:multistatus>"#;

        assert_eq!(
            parse_current_user_principal(xml).unwrap(),
            Some("/principals/alice/".to_string())
        );
    }

    #[test]
    fn response_href_is_not_the_principal() {
        let xml = r#"<d:multistatus xmlns:d="DAV:"><d:response><d:href>/dav/</d:href></d:response></d:multistatus>"#;
        assert_eq!(parse_current_user_principal(xml).unwrap(), None);
    }

    #[test]
    fn mismatched_tags_are_malformed() {
        let xml = r#"<d:multistatus xmlns:d="DAV:"><d:response></d:multistatus>"#;
        let err = parse_current_user_principal(xml).unwrap_err();
        assert_eq!(err.code(), crate::ProviderErrorCode::InvalidResponse);
        assert!(err.message().contains("malformed XML"));
    }

    #[test]
    fn non_dav_document_is_rejected() {
        let err = parse_current_user_principal("<html><body>Welcome</body></html>").unwrap_err();
        assert!(err.message().contains("multistatus"));

        let err = parse_current_user_principal("plain text").unwrap_err();
        assert!(err.message().contains("multistatus"));
    }
}
