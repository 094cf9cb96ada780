// Copyright 2026 the Limn Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Limn Style: style-identity tokens and CSS derivation.
//!
//! Depictors decorate their markup with two kinds of style output, both
//! computed from component state on every render pass:
//!
//! - **Identity tokens** ([`identity_tokens`], [`interaction_tokens`]):
//!   CSS-class-like tokens naming the component's kind lineage, explicit
//!   style identifier, validity, status, selection, and interaction
//!   capabilities. Token sets have set semantics ([`TokenSet`]); the
//!   per-kind lineage walk is memoized in a process-wide, race-tolerant
//!   cache ([`lineage_tokens`]).
//! - **Style strings** ([`outer_style`], [`body_style`]): inline CSS for the
//!   outer presentation element (display, color, opacity) and the body
//!   content element (background, box model, cursor, font, extent). Box
//!   model sides are logical and resolved through the component's flow
//!   orientation; zero widths are omitted, relying on a stylesheet default
//!   of zero.

mod css;
mod tokens;

pub use css::{body_style, outer_style};
pub use tokens::{Decoration, TokenSet, identity_tokens, interaction_tokens, lineage_tokens};
