// Copyright 2026 the Limn Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Limn Depict: the render pass of the Limn depiction tier.
//!
//! A render pass translates part of the live component tree into XHTML
//! markup. The pieces:
//!
//! - [`DepictContext`]: the per-pass accumulator — output sink, indent
//!   scope, namespace-prefix table, escaping, and element balance tracking.
//!   One instance per full-page pass or per AJAX patch fragment; it never
//!   leaks across passes.
//! - [`ElementState`]: a handle for one currently-open markup element, so a
//!   depictor can defer closing until a later phase. The
//!   [`is_open`](ElementState::is_open) guard makes premature or duplicate
//!   closes impossible.
//! - [`Depictor`]: the per-kind strategy trait with the ordered three-phase
//!   contract `depict_begin` → `depict_body` → `depict_end`. The driver
//!   always runs `depict_end` once `depict_begin` succeeded, so every opened
//!   element is closed on all exit paths.
//! - [`SimpleElement`] and [`DecoratedElement`]: the two element-oriented
//!   base strategies (merged single element vs. outer + label + body +
//!   error decoration).
//! - [`DepictorRegistry`] and [`DepictorSet`]: most-specific-kind resolution
//!   with a race-tolerant memo cache, and the installed per-component
//!   depictor instances with their install/uninstall lifecycle.
//! - [`depict_embedded`]: the rewrite pass for embedded markup fragments,
//!   serializing the fragment verbatim while substituting live child
//!   depictions by element id, with a content-keyed parse cache.
//! - [`builtin`]: depictors for the built-in component kinds.

mod context;
mod depictor;
mod element;
mod embed;
mod error;
mod registry;

pub mod builtin;

pub use context::{DepictContext, XHTML_NS};
pub use depictor::{DecoratedElement, Depictor, SimpleElement};
pub use element::ElementState;
pub use embed::{EmbeddedFragment, depict_embedded, parsed_fragment};
pub use error::DepictError;
pub use registry::{DepictorFactory, DepictorRegistry, DepictorSet};
