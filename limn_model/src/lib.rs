// Copyright 2026 the Limn Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Limn Model: the depicted-object boundary of the Limn depiction tier.
//!
//! The depiction core renders *depicted objects*: server-side entities with a
//! stable identity and observable state. This crate provides the concrete
//! model the rest of the workspace works against:
//!
//! - [`DepictId`]: process-unique, lifetime-stable identifiers.
//! - [`ComponentKind`]: static type descriptors carrying a most-specific-first
//!   lineage of kind and capability names. Depictor resolution and style
//!   identity both key off the lineage.
//! - [`Component`]: the observable state a depictor reads (flags, label,
//!   values, notifications, box model) with setters that report whether the
//!   observable value actually changed, so callers can feed a change log.
//! - [`ComponentTree`]: the live arena of components, including the root
//!   application frame and auxiliary frames.
//! - [`Flow`], [`LogicalSide`], [`PhysicalSide`]: directional orientation and
//!   logical-to-physical side mapping.
//!
//! The broader property/event bus of the host framework is out of scope; this
//! crate models only what the depiction and synchronization core observes.
//!
//! ## `no_std` Support
//!
//! This crate is `no_std` and uses `alloc`. It does not depend on `std`.

#![no_std]

extern crate alloc;

mod component;
mod id;
mod kind;
mod orient;
mod tree;

pub use component::{
    Capabilities, Component, ControlStatus, Extent, FontStyling, LogicalSides,
    UnknownStatusError,
};
pub use id::DepictId;
pub use kind::{
    BUTTON, CHECKBOX, ComponentKind, FRAME, FLYOVER_FRAME, IMAGE, KindKey, LABEL, MARKUP,
    PANEL, TEXT_CONTROL,
};
pub use orient::{Flow, LogicalSide, PhysicalSide};
pub use tree::{ComponentTree, TreeError};
