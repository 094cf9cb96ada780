// Copyright 2026 the Limn Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Session-level errors.

use thiserror::Error;

/// The reasons handling one request can fail.
///
/// These are configuration or protocol failures; malformed-but-tolerable
/// input and per-component conversion failures never surface here.
#[derive(Debug, Error)]
pub enum SessionError {
    /// A render pass failed.
    #[error("depiction failed: {0}")]
    Depict(#[from] limn_depict::DepictError),

    /// Decoding the request or encoding the response failed.
    #[error("wire protocol failure: {0}")]
    Wire(#[from] limn_wire::WireError),

    /// A component tree operation failed.
    #[error("component tree failure: {0}")]
    Tree(#[from] limn_model::TreeError),

    /// A POST body arrived with a content type this tier cannot decode.
    #[error("unsupported request content type {0:?}")]
    UnsupportedContentType(String),
}
