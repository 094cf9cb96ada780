// Copyright 2026 the Limn Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Observable component state.
//!
//! [`Component`] holds the state a depictor reads during a render pass and
//! the state event dispatch mutates. Setters for observable values return
//! `true` when the value actually changed, so the caller can mark the
//! session's change log; silently equal writes never cause spurious patches.

use alloc::string::String;
use alloc::vec::Vec;
use core::fmt;

use bitflags::bitflags;

use crate::id::DepictId;
use crate::kind::ComponentKind;
use crate::orient::{Flow, LogicalSide};

bitflags! {
    /// Interaction capabilities of a component.
    ///
    /// These drive the extended style-identity token set and the wire-level
    /// behaviors a component participates in.
    #[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
    pub struct Capabilities: u8 {
        /// The component can originate a drag.
        const DRAG_SOURCE = 1 << 0;
        /// The component is the grab handle of a drag source.
        const DRAG_HANDLE = 1 << 1;
        /// The component accepts drops.
        const DROP_TARGET = 1 << 2;
        /// The component listens for mouse enter/exit events.
        const MOUSE_LISTENER = 1 << 3;
        /// The component is a selectable variant.
        const SELECTABLE = 1 << 4;
        /// The control can import a file resource on submission.
        const VALUE_IMPORT = 1 << 5;
    }
}

/// A control's user-visible status decoration.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum ControlStatus {
    /// The control carries a warning decoration.
    Warning,
    /// The control carries an error decoration.
    Error,
}

impl ControlStatus {
    /// Parses a configuration token into a status.
    ///
    /// Unrecognized tokens are a configuration error, surfaced here rather
    /// than at render time.
    pub fn from_token(token: &str) -> Result<Self, UnknownStatusError> {
        match token {
            "warning" => Ok(Self::Warning),
            "error" => Ok(Self::Error),
            _ => Err(UnknownStatusError {
                token: String::from(token),
            }),
        }
    }

    /// The style token written for this status.
    #[must_use]
    pub fn style_token(self) -> &'static str {
        match self {
            Self::Warning => "status-warning",
            Self::Error => "status-error",
        }
    }
}

/// Error returned for an unrecognized control-status token.
#[derive(Clone, PartialEq, Eq)]
pub struct UnknownStatusError {
    /// The offending token.
    pub token: String,
}

impl fmt::Debug for UnknownStatusError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "UnknownStatusError {{ token: {:?} }}", self.token)
    }
}

impl fmt::Display for UnknownStatusError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unrecognized control status token {:?}", self.token)
    }
}

impl core::error::Error for UnknownStatusError {}

/// Requested extent in pixels along each logical axis, if constrained.
///
/// The line extent maps to CSS width in horizontal flows and to height in
/// vertical flows; the page extent maps to the other physical axis.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub struct Extent {
    /// Requested extent along the line axis, in pixels.
    pub line: Option<u32>,
    /// Requested extent along the page axis, in pixels.
    pub page: Option<u32>,
}

/// Per-logical-side pixel widths for one box-model property.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub struct LogicalSides {
    /// Width on the line-near side.
    pub line_near: u16,
    /// Width on the line-far side.
    pub line_far: u16,
    /// Width on the page-near side.
    pub page_near: u16,
    /// Width on the page-far side.
    pub page_far: u16,
}

impl LogicalSides {
    /// A uniform width on all four logical sides.
    #[must_use]
    pub fn uniform(width: u16) -> Self {
        Self {
            line_near: width,
            line_far: width,
            page_near: width,
            page_far: width,
        }
    }

    /// Returns the width for one logical side.
    #[must_use]
    pub fn get(&self, side: LogicalSide) -> u16 {
        match side {
            LogicalSide::LineNear => self.line_near,
            LogicalSide::LineFar => self.line_far,
            LogicalSide::PageNear => self.page_near,
            LogicalSide::PageFar => self.page_far,
        }
    }
}

/// Font styling knobs observed by style derivation.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct FontStyling {
    /// Font family name, if set.
    pub family: Option<String>,
    /// Font size in pixels, if set.
    pub size: Option<u16>,
    /// Italic style.
    pub italic: bool,
    /// Bold weight.
    pub bold: bool,
}

/// The observable state of one depicted object.
///
/// A component is created by [`ComponentTree`](crate::ComponentTree) when it
/// enters the live tree and destroyed when removed. Its [`DepictId`] is
/// stable for that whole lifetime.
#[derive(Clone, Debug)]
pub struct Component {
    id: DepictId,
    kind: &'static ComponentKind,
    /// Form-field binding name, for controls.
    pub name: Option<String>,
    /// Display label.
    pub label: Option<String>,
    /// Whether the label is configured hidden.
    pub label_hidden: bool,
    /// Explicit advisory (tooltip) text.
    pub advisory: Option<String>,
    /// Explicit style identifier.
    pub style_id: Option<String>,
    /// Whether the component accepts interaction.
    pub enabled: bool,
    /// Whether the component's value can be edited.
    pub editable: bool,
    /// Whether the component currently passes validation.
    pub valid: bool,
    /// Status decoration, if any.
    pub status: Option<ControlStatus>,
    /// Whether a selectable component is currently selected.
    pub selected: bool,
    /// Interaction capabilities.
    pub capabilities: Capabilities,
    /// Flow orientation for logical side resolution.
    pub flow: Flow,
    /// Action identifier emitted by action controls.
    pub action: Option<String>,
    /// Whether the component is shown.
    pub visible: bool,
    /// Foreground color, as a CSS color value.
    pub color: Option<String>,
    /// Background color, as a CSS color value.
    pub background: Option<String>,
    /// Opacity in `[0, 1]`, if not fully opaque.
    pub opacity: Option<f32>,
    /// Cursor name, if overridden.
    pub cursor: Option<String>,
    /// Font styling.
    pub font: FontStyling,
    /// Requested extent.
    pub extent: Extent,
    /// Border widths per logical side.
    pub border: LogicalSides,
    /// Margin widths per logical side.
    pub margin: LogicalSides,
    /// Padding widths per logical side.
    pub padding: LogicalSides,
    /// Whether a frame component is currently open. Ignored for non-frames.
    pub frame_open: bool,
    value: Option<String>,
    provisional: Option<String>,
    value_patch_suppressed: bool,
    notifications: Vec<String>,
}

impl Component {
    /// Creates a component with default state.
    ///
    /// Normally called by [`ComponentTree`](crate::ComponentTree); the id
    /// must be unique within the owning tree.
    #[must_use]
    pub fn new(id: DepictId, kind: &'static ComponentKind) -> Self {
        Self {
            id,
            kind,
            name: None,
            label: None,
            label_hidden: false,
            advisory: None,
            style_id: None,
            enabled: true,
            editable: true,
            valid: true,
            status: None,
            selected: false,
            capabilities: Capabilities::empty(),
            flow: Flow::default(),
            action: None,
            visible: true,
            color: None,
            background: None,
            opacity: None,
            cursor: None,
            font: FontStyling::default(),
            extent: Extent::default(),
            border: LogicalSides::default(),
            margin: LogicalSides::default(),
            padding: LogicalSides::default(),
            frame_open: kind.is_frame(),
            value: None,
            provisional: None,
            value_patch_suppressed: false,
            notifications: Vec::new(),
        }
    }

    /// The component's depict id.
    #[inline]
    #[must_use]
    pub fn id(&self) -> DepictId {
        self.id
    }

    /// The component's kind descriptor.
    #[inline]
    #[must_use]
    pub fn kind(&self) -> &'static ComponentKind {
        self.kind
    }

    /// The committed value, if any.
    #[must_use]
    pub fn value(&self) -> Option<&str> {
        self.value.as_deref()
    }

    /// The provisional (in-progress) value, if any.
    #[must_use]
    pub fn provisional(&self) -> Option<&str> {
        self.provisional.as_deref()
    }

    /// Commits a value, superseding any provisional text.
    ///
    /// Returns `true` if observable state changed.
    pub fn commit_value(&mut self, value: Option<String>) -> bool {
        let changed = self.value != value || self.provisional.is_some();
        self.value = value;
        self.provisional = None;
        self.value_patch_suppressed = false;
        changed
    }

    /// Records a provisional value without touching the committed value.
    ///
    /// The next patch for this component is marked "no value patch" so the
    /// client does not overwrite the input text the user is still typing.
    /// Returns `true` if observable state changed.
    pub fn set_provisional(&mut self, value: Option<String>) -> bool {
        let changed = self.provisional != value;
        self.provisional = value;
        self.value_patch_suppressed = true;
        changed
    }

    /// Whether the next patch must leave the client-side input value alone.
    #[must_use]
    pub fn value_patch_suppressed(&self) -> bool {
        self.value_patch_suppressed
    }

    /// Clears the no-value-patch marker after a patch is emitted.
    pub fn clear_value_patch_suppressed(&mut self) {
        self.value_patch_suppressed = false;
    }

    /// Attaches a user-visible notification (validation or conversion
    /// failure). Rendered as an inline error message on the next depiction.
    pub fn push_notification(&mut self, message: String) {
        self.valid = false;
        self.notifications.push(message);
    }

    /// The pending user-visible notifications.
    #[must_use]
    pub fn notifications(&self) -> &[String] {
        &self.notifications
    }

    /// Clears notifications and restores validity.
    pub fn clear_notifications(&mut self) {
        self.notifications.clear();
        self.valid = true;
    }

    /// Advisory text with the hidden-label fallback applied.
    ///
    /// When no explicit advisory text exists but the label is configured
    /// hidden, the label text is borrowed. One-directional: a visible label
    /// is never merged into the advisory.
    #[must_use]
    pub fn effective_advisory(&self) -> Option<&str> {
        match (&self.advisory, self.label_hidden) {
            (Some(text), _) => Some(text),
            (None, true) => self.label.as_deref(),
            (None, false) => None,
        }
    }
}

#[cfg(test)]
mod tests {
    extern crate std;

    use super::*;
    use crate::kind::TEXT_CONTROL;
    use alloc::string::ToString;

    fn text_control() -> Component {
        Component::new(DepictId::from_raw(1), &TEXT_CONTROL)
    }

    #[test]
    fn status_tokens_parse() {
        assert_eq!(
            ControlStatus::from_token("warning"),
            Ok(ControlStatus::Warning)
        );
        assert_eq!(ControlStatus::from_token("error"), Ok(ControlStatus::Error));
        let err = ControlStatus::from_token("fatal").unwrap_err();
        assert_eq!(err.token, "fatal");
    }

    #[test]
    fn provisional_leaves_committed_value() {
        let mut c = text_control();
        assert!(c.commit_value(Some("ab".to_string())));

        assert!(c.set_provisional(Some("abc".to_string())));
        assert_eq!(c.value(), Some("ab"));
        assert_eq!(c.provisional(), Some("abc"));
        assert!(c.value_patch_suppressed());
    }

    #[test]
    fn commit_supersedes_provisional() {
        let mut c = text_control();
        c.set_provisional(Some("abc".to_string()));

        assert!(c.commit_value(Some("42".to_string())));
        assert_eq!(c.value(), Some("42"));
        assert_eq!(c.provisional(), None);
        assert!(!c.value_patch_suppressed());
    }

    #[test]
    fn equal_commit_is_not_a_change() {
        let mut c = text_control();
        c.commit_value(Some("x".to_string()));
        assert!(!c.commit_value(Some("x".to_string())));
    }

    #[test]
    fn notifications_invalidate() {
        let mut c = text_control();
        assert!(c.valid);
        c.push_notification("not a number".to_string());
        assert!(!c.valid);
        assert_eq!(c.notifications(), ["not a number"]);

        c.clear_notifications();
        assert!(c.valid);
        assert!(c.notifications().is_empty());
    }

    #[test]
    fn advisory_borrows_hidden_label_only() {
        let mut c = text_control();
        c.label = Some("Amount".to_string());
        assert_eq!(c.effective_advisory(), None);

        c.label_hidden = true;
        assert_eq!(c.effective_advisory(), Some("Amount"));

        c.advisory = Some("Enter the amount".to_string());
        assert_eq!(c.effective_advisory(), Some("Enter the amount"));
    }

    #[test]
    fn logical_sides_lookup() {
        let sides = LogicalSides {
            line_near: 1,
            line_far: 2,
            page_near: 3,
            page_far: 4,
        };
        assert_eq!(sides.get(LogicalSide::LineNear), 1);
        assert_eq!(sides.get(LogicalSide::PageFar), 4);
        assert_eq!(LogicalSides::uniform(5).get(LogicalSide::LineFar), 5);
    }
}
