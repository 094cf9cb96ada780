// Copyright 2026 the Limn Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Wire protocol errors.

use thiserror::Error;

/// The reasons decoding a request or encoding a response can fail.
///
/// Decode errors cover the document as a whole; a single malformed event
/// inside a well-formed document is dropped rather than reported here.
#[derive(Debug, Error)]
pub enum WireError {
    /// The request document is not well-formed XML.
    #[error("malformed request document: {0}")]
    Xml(#[from] quick_xml::Error),

    /// An attribute could not be read or unescaped.
    #[error("malformed attribute in request document")]
    BadAttribute,

    /// A multipart body arrived without a boundary parameter.
    #[error("multipart body without a boundary")]
    MissingBoundary,

    /// Writing a response event failed.
    #[error("response serialization failed: {0}")]
    Write(String),

    /// The serialized response is not UTF-8.
    #[error("response envelope was not valid UTF-8")]
    Utf8(#[from] std::string::FromUtf8Error),
}
