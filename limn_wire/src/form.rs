// Copyright 2026 the Limn Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Decoding of plain page submissions.
//!
//! A non-asynchronous POST carries the whole form state, so both decoders
//! here mark their event exhaustive. Uploaded files only travel in
//! multipart bodies, where each file field becomes a
//! [`ResourceImport`](crate::ResourceImport) value.

use tracing::debug;

use crate::error::WireError;
use crate::event::{FormEvent, ParamValue, ParameterMap, ResourceImport};

/// Decodes a `application/x-www-form-urlencoded` body.
#[must_use]
pub fn decode_form_urlencoded(body: &str) -> FormEvent {
    let mut parameters = ParameterMap::new();
    for pair in body.split('&').filter(|pair| !pair.is_empty()) {
        let (name, value) = pair.split_once('=').unwrap_or((pair, ""));
        parameters.append(
            &percent_decode(name),
            ParamValue::Text(percent_decode(value)),
        );
    }
    FormEvent {
        exhaustive: true,
        parameters,
    }
}

/// Extracts the boundary parameter from a multipart content type.
#[must_use]
pub fn multipart_boundary(content_type: &str) -> Option<String> {
    let (_, params) = content_type.split_once(';')?;
    for param in params.split(';') {
        let (key, value) = param.split_once('=')?;
        if key.trim().eq_ignore_ascii_case("boundary") {
            return Some(value.trim().trim_matches('"').to_owned());
        }
    }
    None
}

/// Decodes a `multipart/form-data` body.
///
/// Scalar fields decode as text; file fields keep their bytes, file name,
/// and declared media type. Parts without a usable content disposition are
/// skipped.
pub fn decode_multipart(body: &[u8], boundary: &str) -> Result<FormEvent, WireError> {
    if boundary.is_empty() {
        return Err(WireError::MissingBoundary);
    }
    let delimiter = format!("--{boundary}");
    let mut parameters = ParameterMap::new();

    let mut parts = split_on(body, delimiter.as_bytes());
    // Everything before the first delimiter is preamble.
    parts.next();
    for part in parts {
        if part.starts_with(b"--") {
            break;
        }
        let part = trim_crlf(part);
        let Some(split) = find(part, b"\r\n\r\n") else {
            continue;
        };
        let headers = String::from_utf8_lossy(&part[..split]);
        let content = &part[split + 4..];

        let Some(disposition) = headers
            .lines()
            .find(|line| starts_with_ignore_case(line, "content-disposition:"))
        else {
            debug!("skipping multipart part without a content disposition");
            continue;
        };
        let Some(name) = header_param(disposition, "name") else {
            debug!("skipping multipart part without a field name");
            continue;
        };

        if let Some(filename) = header_param(disposition, "filename") {
            let content_type = headers
                .lines()
                .find(|line| starts_with_ignore_case(line, "content-type:"))
                .map(|line| line["content-type:".len()..].trim().to_owned());
            parameters.append(
                &name,
                ParamValue::Resource(ResourceImport {
                    filename,
                    content_type,
                    bytes: content.to_vec(),
                }),
            );
        } else {
            parameters.append(
                &name,
                ParamValue::Text(String::from_utf8_lossy(content).into_owned()),
            );
        }
    }
    Ok(FormEvent {
        exhaustive: true,
        parameters,
    })
}

fn percent_decode(input: &str) -> String {
    let bytes = input.as_bytes();
    let mut out = Vec::with_capacity(bytes.len());
    let mut i = 0;
    while i < bytes.len() {
        match bytes[i] {
            b'+' => out.push(b' '),
            b'%' if i + 2 < bytes.len() => {
                match hex_pair(bytes[i + 1], bytes[i + 2]) {
                    Some(byte) => {
                        out.push(byte);
                        i += 2;
                    }
                    // Not an escape; keep the literal percent.
                    None => out.push(b'%'),
                }
            }
            byte => out.push(byte),
        }
        i += 1;
    }
    String::from_utf8_lossy(&out).into_owned()
}

fn hex_pair(high: u8, low: u8) -> Option<u8> {
    let high = (high as char).to_digit(16)?;
    let low = (low as char).to_digit(16)?;
    Some((high * 16 + low) as u8)
}

fn split_on<'a>(haystack: &'a [u8], needle: &'a [u8]) -> impl Iterator<Item = &'a [u8]> {
    let mut rest = Some(haystack);
    core::iter::from_fn(move || {
        let slice = rest?;
        match find(slice, needle) {
            Some(at) => {
                rest = Some(&slice[at + needle.len()..]);
                Some(&slice[..at])
            }
            None => {
                rest = None;
                Some(slice)
            }
        }
    })
}

fn find(haystack: &[u8], needle: &[u8]) -> Option<usize> {
    haystack
        .windows(needle.len())
        .position(|window| window == needle)
}

fn trim_crlf(part: &[u8]) -> &[u8] {
    let part = part.strip_prefix(b"\r\n").unwrap_or(part);
    part.strip_suffix(b"\r\n").unwrap_or(part)
}

fn starts_with_ignore_case(line: &str, prefix: &str) -> bool {
    line.len() >= prefix.len() && line[..prefix.len()].eq_ignore_ascii_case(prefix)
}

fn header_param(header: &str, param: &str) -> Option<String> {
    for piece in header.split(';').skip(1) {
        let (key, value) = piece.split_once('=')?;
        if key.trim().eq_ignore_ascii_case(param) {
            return Some(value.trim().trim_matches('"').to_owned());
        }
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn urlencoded_body_is_exhaustive_text() {
        let event = decode_form_urlencoded("amount=4%32&note=a+b&flag");
        assert!(event.exhaustive);
        assert_eq!(
            event.parameters.first("amount"),
            Some(&ParamValue::Text("42".into()))
        );
        assert_eq!(
            event.parameters.first("note"),
            Some(&ParamValue::Text("a b".into()))
        );
        assert_eq!(
            event.parameters.first("flag"),
            Some(&ParamValue::Text(String::new()))
        );
    }

    #[test]
    fn stray_percent_stays_literal() {
        let event = decode_form_urlencoded("note=100%25&odd=50%");
        assert_eq!(
            event.parameters.first("note"),
            Some(&ParamValue::Text("100%".into()))
        );
        assert_eq!(
            event.parameters.first("odd"),
            Some(&ParamValue::Text("50%".into()))
        );
    }

    #[test]
    fn boundary_comes_out_of_content_type() {
        assert_eq!(
            multipart_boundary("multipart/form-data; boundary=\"xyz\"").as_deref(),
            Some("xyz")
        );
        assert_eq!(multipart_boundary("multipart/form-data"), None);
    }

    #[test]
    fn multipart_separates_text_and_files() {
        let body = b"--xyz\r\n\
            Content-Disposition: form-data; name=\"note\"\r\n\r\n\
            hello\r\n\
            --xyz\r\n\
            Content-Disposition: form-data; name=\"doc\"; filename=\"a.txt\"\r\n\
            Content-Type: text/plain\r\n\r\n\
            file bytes\r\n\
            --xyz--\r\n";
        let event = decode_multipart(body, "xyz").unwrap();
        assert!(event.exhaustive);
        assert_eq!(
            event.parameters.first("note"),
            Some(&ParamValue::Text("hello".into()))
        );
        let Some(ParamValue::Resource(upload)) = event.parameters.first("doc") else {
            panic!("expected a resource import");
        };
        assert_eq!(upload.filename, "a.txt");
        assert_eq!(upload.content_type.as_deref(), Some("text/plain"));
        assert_eq!(upload.bytes, b"file bytes");
    }

    #[test]
    fn empty_boundary_is_an_error() {
        assert!(matches!(
            decode_multipart(b"", ""),
            Err(WireError::MissingBoundary)
        ));
    }
}
