//! Form-data decoding for response bodies.
//!
//! Handles `application/x-www-form-urlencoded` and `multipart/form-data`.

use super::encoding::decode_form_component;
use crate::error::{ClientError, Result};
use crate::types::body::{Blob, FormData, FormValue};
use bytes::Bytes;

/// Decode `body` according to its declared content type.
pub fn parse_form_data(content_type: Option<&str>, body: &[u8]) -> Result<FormData> {
    let content_type = content_type.unwrap_or_default();
    let media_type = content_type
        .split(';')
        .next()
        .unwrap_or_default()
        .trim()
        .to_ascii_lowercase();

    match media_type.as_str() {
        "application/x-www-form-urlencoded" => parse_urlencoded(body),
        "multipart/form-data" => {
            let boundary = boundary(content_type).ok_or_else(|| {
                ClientError::Decode("multipart body without boundary".to_string())
            })?;
            parse_multipart(&boundary, body)
        }
        other => Err(ClientError::Decode(format!(
            "cannot decode form data from content type '{other}'"
        ))),
    }
}

fn parse_urlencoded(body: &[u8]) -> Result<FormData> {
    let text = String::from_utf8_lossy(body);
    let mut form = FormData::new();
    for pair in text.split('&').filter(|p| !p.is_empty()) {
        let (key, value) = pair.split_once('=').unwrap_or((pair, ""));
        form.append_text(decode_form_component(key)?, decode_form_component(value)?);
    }
    Ok(form)
}

fn boundary(content_type: &str) -> Option<String> {
    content_type.split(';').skip(1).find_map(|param| {
        let (name, value) = param.split_once('=')?;
        name.trim()
            .eq_ignore_ascii_case("boundary")
            .then(|| value.trim().trim_matches('"').to_string())
    })
}

fn find(haystack: &[u8], needle: &[u8], from: usize) -> Option<usize> {
    haystack
        .get(from..)?
        .windows(needle.len())
        .position(|w| w == needle)
        .map(|i| i + from)
}

fn parse_multipart(boundary: &str, body: &[u8]) -> Result<FormData> {
    let delimiter = format!("--{boundary}");
    let delimiter = delimiter.as_bytes();
    let malformed = || ClientError::Decode("malformed multipart body".to_string());

    let mut form = FormData::new();
    let mut pos = find(body, delimiter, 0).ok_or_else(malformed)? + delimiter.len();

    loop {
        if body[pos..].starts_with(b"--") {
            break;
        }
        let start = if body[pos..].starts_with(b"\r\n") {
            pos + 2
        } else {
            pos
        };
        let next = find(body, delimiter, start).ok_or_else(malformed)?;
        let mut part = &body[start..next];
        if part.ends_with(b"\r\n") {
            part = &part[..part.len() - 2];
        }
        parse_part(part, &mut form)?;
        pos = next + delimiter.len();
    }

    Ok(form)
}

fn parse_part(part: &[u8], form: &mut FormData) -> Result<()> {
    let split = find(part, b"\r\n\r\n", 0)
        .ok_or_else(|| ClientError::Decode("multipart part without headers".to_string()))?;
    let head = String::from_utf8_lossy(&part[..split]);
    let content = &part[split + 4..];

    let mut name = None;
    let mut filename = None;
    let mut content_type = None;
    for line in head.lines() {
        let Some((header, value)) = line.split_once(':') else {
            continue;
        };
        let header = header.trim().to_ascii_lowercase();
        if header == "content-disposition" {
            for param in value.split(';').skip(1) {
                if let Some((k, v)) = param.split_once('=') {
                    let v = v.trim().trim_matches('"').to_string();
                    match k.trim() {
                        "name" => name = Some(v),
                        "filename" => filename = Some(v),
                        _ => {}
                    }
                }
            }
        } else if header == "content-type" {
            content_type = Some(value.trim().to_string());
        }
    }

    let name =
        name.ok_or_else(|| ClientError::Decode("multipart part without a name".to_string()))?;
    let value = if filename.is_some() || content_type.is_some() {
        FormValue::File {
            blob: Blob::new(Bytes::copy_from_slice(content), content_type),
            filename,
        }
    } else {
        FormValue::Text(String::from_utf8_lossy(content).into_owned())
    };
    form.append(name, value);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn urlencoded_body_decodes_pairs() {
        let form = parse_form_data(
            Some("application/x-www-form-urlencoded; charset=utf-8"),
            b"name=a+b&tag=x%21&tag=y&flag",
        )
        .unwrap();
        assert_eq!(form.get("name").and_then(|v| v.as_text()), Some("a b"));
        let tags: Vec<_> = form.get_all("tag").filter_map(|v| v.as_text()).collect();
        assert_eq!(tags, vec!["x!", "y"]);
        assert_eq!(form.get("flag").and_then(|v| v.as_text()), Some(""));
    }

    #[test]
    fn multipart_body_decodes_text_and_file_parts() {
        let body = b"--XyZ\r\n\
Content-Disposition: form-data; name=\"title\"\r\n\
\r\n\
hello\r\n\
--XyZ\r\n\
Content-Disposition: form-data; name=\"file\"; filename=\"a.txt\"\r\n\
Content-Type: text/plain\r\n\
\r\n\
abc\r\n\
--XyZ--\r\n";
        let form = parse_form_data(Some("multipart/form-data; boundary=\"XyZ\""), body).unwrap();

        assert_eq!(form.len(), 2);
        assert_eq!(form.get("title").and_then(|v| v.as_text()), Some("hello"));
        match form.get("file") {
            Some(FormValue::File { blob, filename }) => {
                assert_eq!(filename.as_deref(), Some("a.txt"));
                assert_eq!(blob.content_type.as_deref(), Some("text/plain"));
                assert_eq!(&blob.bytes[..], b"abc");
            }
            other => panic!("unexpected part: {other:?}"),
        }
    }

    #[test]
    fn multipart_without_boundary_is_rejected() {
        let err = parse_form_data(Some("multipart/form-data"), b"").unwrap_err();
        assert!(matches!(err, ClientError::Decode(_)));
    }

    #[test]
    fn unsupported_content_type_is_rejected() {
        assert!(parse_form_data(Some("application/json"), b"{}").is_err());
        assert!(parse_form_data(None, b"a=b").is_err());
    }
}
