// Copyright 2026 the Limn Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Depictors for the built-in component kinds.

mod containers;
mod controls;
mod markup;
mod text;

pub use containers::{FrameDepictor, PanelDepictor};
pub use controls::{ButtonDepictor, CheckboxDepictor, TextControlDepictor};
pub use markup::MarkupDepictor;
pub use text::{ImageDepictor, LabelDepictor};

use crate::registry::DepictorRegistry;

/// Registers the built-in depictors.
///
/// Flyover frames resolve to the frame depictor through their lineage; kinds
/// outside the built-in set must be registered by the embedder or
/// installation fails.
pub fn register_standard(registry: &mut DepictorRegistry) {
    registry.register("frame", || Box::new(FrameDepictor::new()));
    registry.register("panel", || Box::new(PanelDepictor::new()));
    registry.register("label", || Box::new(LabelDepictor::new()));
    registry.register("image", || Box::new(ImageDepictor::new()));
    registry.register("text-control", || Box::new(TextControlDepictor::new()));
    registry.register("button", || Box::new(ButtonDepictor::new()));
    registry.register("checkbox", || Box::new(CheckboxDepictor::new()));
    registry.register("markup", || Box::new(MarkupDepictor::new()));
}
