// Copyright 2026 the Limn Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Render-pass errors.

use core::fmt;

use limn_model::DepictId;

/// Errors raised during depictor resolution or markup production.
///
/// Configuration errors ([`Unregistered`](Self::Unregistered)) surface at
/// install time; the remaining variants indicate a depictor violating the
/// element-balance contract or referencing state outside the pass.
#[derive(Clone, PartialEq, Eq)]
pub enum DepictError {
    /// No depictor is registered for any name in the kind's lineage.
    Unregistered(&'static str),
    /// The component has no installed depictor.
    NotInstalled(DepictId),
    /// The component is not in the tree being depicted.
    MissingComponent(DepictId),
    /// An attribute was written outside an open start tag.
    AttributeOutsideTag,
    /// An element close did not match any open element.
    Unbalanced,
    /// The pass finished with elements still open.
    UnclosedElements(usize),
    /// No prefix is registered for a namespace URI.
    UnknownNamespace(String),
    /// An embedded markup fragment did not parse.
    Markup(String),
}

impl fmt::Debug for DepictError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Unregistered(kind) => write!(f, "DepictError::Unregistered({kind:?})"),
            Self::NotInstalled(id) => write!(f, "DepictError::NotInstalled({id})"),
            Self::MissingComponent(id) => write!(f, "DepictError::MissingComponent({id})"),
            Self::AttributeOutsideTag => write!(f, "DepictError::AttributeOutsideTag"),
            Self::Unbalanced => write!(f, "DepictError::Unbalanced"),
            Self::UnclosedElements(n) => write!(f, "DepictError::UnclosedElements({n})"),
            Self::UnknownNamespace(uri) => write!(f, "DepictError::UnknownNamespace({uri:?})"),
            Self::Markup(reason) => write!(f, "DepictError::Markup({reason:?})"),
        }
    }
}

impl fmt::Display for DepictError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Unregistered(kind) => {
                write!(f, "no depictor registered for kind {kind:?} or its lineage")
            }
            Self::NotInstalled(id) => write!(f, "component {id} has no installed depictor"),
            Self::MissingComponent(id) => write!(f, "component {id} is not in the depicted tree"),
            Self::AttributeOutsideTag => write!(f, "attribute written outside an open start tag"),
            Self::Unbalanced => write!(f, "element close without a matching open element"),
            Self::UnclosedElements(n) => write!(f, "pass finished with {n} unclosed element(s)"),
            Self::UnknownNamespace(uri) => write!(f, "no prefix registered for namespace {uri}"),
            Self::Markup(reason) => write!(f, "embedded markup fragment did not parse: {reason}"),
        }
    }
}

impl core::error::Error for DepictError {}
