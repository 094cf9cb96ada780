// Copyright 2026 the Limn Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Wire protocol for Limn sessions.
//!
//! Decodes control events from the client and encodes the directives the
//! server sends back:
//!
//! - [`decode_events`] parses the XML document that an asynchronous request
//!   posts, yielding [`ControlEvent`]s in document order. Malformed events
//!   are dropped individually; the rest of the document still decodes.
//! - [`decode_form_urlencoded`] and [`decode_multipart`] parse plain
//!   submission bodies into a single exhaustive [`FormEvent`].
//! - [`ResponseEnvelope`] assembles navigation, patch, reload, and remove
//!   [`Directive`]s and serializes them as the XML response document.
//!
//! ```
//! use limn_wire::{ControlEvent, decode_events};
//!
//! let doc = r#"<events><action componentID="4" actionID="save"/></events>"#;
//! let events = decode_events(doc).unwrap();
//! assert!(matches!(events[0], ControlEvent::Action(_)));
//! ```

#![forbid(unsafe_code)]

mod decode;
mod envelope;
mod error;
mod event;
mod form;

pub use decode::decode_events;
pub use envelope::{Directive, ResponseEnvelope};
pub use error::WireError;
pub use event::{
    ActionEvent, ControlEvent, DropEvent, FormEvent, IdRect, InitEvent, MouseEvent, MouseKind,
    ParamValue, ParameterMap, Point, Rect, ResourceImport,
};
pub use form::{decode_form_urlencoded, decode_multipart, multipart_boundary};
