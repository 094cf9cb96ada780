// Copyright 2026 the Limn Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Component kind descriptors.
//!
//! A [`ComponentKind`] is a static descriptor of one kind of depicted object.
//! Its `lineage` lists the kind's own name followed by every ancestor kind
//! and capability name, most specific first, always ending in `"component"`.
//! Depictor resolution walks the lineage for the most specific registered
//! mapping, and style identity derives one token per lineage entry.

use core::fmt;

/// A static descriptor for one kind of depicted object.
///
/// Kinds are compared by descriptor identity (address), never by value, so a
/// kind used as a cache key is computed at most once per process.
///
/// # Example
///
/// ```
/// use limn_model::{ComponentKind, TEXT_CONTROL};
///
/// static BADGE: ComponentKind = ComponentKind {
///     name: "badge",
///     lineage: &["badge", "label", "component"],
/// };
///
/// assert!(BADGE.has_ancestor("label"));
/// assert!(!BADGE.has_ancestor("control"));
/// assert_ne!(BADGE.key(), TEXT_CONTROL.key());
/// ```
pub struct ComponentKind {
    /// The kind's own name; equal to the first lineage entry.
    pub name: &'static str,
    /// Kind and capability names, most specific first, ending in
    /// `"component"`.
    pub lineage: &'static [&'static str],
}

impl ComponentKind {
    /// Returns a stable identity key for this descriptor.
    #[inline]
    #[must_use]
    pub fn key(&'static self) -> KindKey {
        KindKey(core::ptr::from_ref(self) as usize)
    }

    /// Returns `true` if `name` appears anywhere in the lineage.
    #[must_use]
    pub fn has_ancestor(&self, name: &str) -> bool {
        self.lineage.contains(&name)
    }

    /// Returns `true` if this kind is a top-level frame kind.
    #[must_use]
    pub fn is_frame(&self) -> bool {
        self.has_ancestor("frame")
    }
}

impl fmt::Debug for ComponentKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ComponentKind")
            .field("name", &self.name)
            .field("lineage", &self.lineage)
            .finish()
    }
}

/// The identity key of a [`ComponentKind`] descriptor.
///
/// Suitable for process-wide memo caches: equal keys always denote the same
/// `'static` descriptor.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash, Ord, PartialOrd)]
#[repr(transparent)]
pub struct KindKey(usize);

/// The root application frame and auxiliary window frames.
pub static FRAME: ComponentKind = ComponentKind {
    name: "frame",
    lineage: &["frame", "container", "component"],
};

/// A transient hover frame closed on page re-initialization.
pub static FLYOVER_FRAME: ComponentKind = ComponentKind {
    name: "flyover-frame",
    lineage: &["flyover-frame", "frame", "container", "component"],
};

/// A plain grouping container.
pub static PANEL: ComponentKind = ComponentKind {
    name: "panel",
    lineage: &["panel", "container", "component"],
};

/// Static display text.
pub static LABEL: ComponentKind = ComponentKind {
    name: "label",
    lineage: &["label", "component"],
};

/// A single-line text input control.
pub static TEXT_CONTROL: ComponentKind = ComponentKind {
    name: "text-control",
    lineage: &["text-control", "value-control", "control", "component"],
};

/// A push button emitting action events.
pub static BUTTON: ComponentKind = ComponentKind {
    name: "button",
    lineage: &["button", "action-control", "control", "component"],
};

/// A boolean toggle control.
pub static CHECKBOX: ComponentKind = ComponentKind {
    name: "checkbox",
    lineage: &["checkbox", "value-control", "control", "component"],
};

/// An image component.
pub static IMAGE: ComponentKind = ComponentKind {
    name: "image",
    lineage: &["image", "component"],
};

/// A component whose committed value is an embedded XHTML fragment.
///
/// The fragment is reproduced verbatim, except that elements whose `id`
/// attribute names a live child of this component are replaced by that
/// child's own depiction.
pub static MARKUP: ComponentKind = ComponentKind {
    name: "markup",
    lineage: &["markup", "component"],
};

#[cfg(test)]
mod tests {
    extern crate std;

    use super::*;

    #[test]
    fn key_is_identity() {
        assert_eq!(FRAME.key(), FRAME.key());
        assert_ne!(FRAME.key(), PANEL.key());
    }

    #[test]
    fn lineage_starts_with_name_and_ends_with_component() {
        for kind in [
            &FRAME,
            &FLYOVER_FRAME,
            &PANEL,
            &LABEL,
            &TEXT_CONTROL,
            &BUTTON,
            &CHECKBOX,
            &IMAGE,
            &MARKUP,
        ] {
            assert_eq!(kind.lineage[0], kind.name, "lineage head for {}", kind.name);
            assert_eq!(
                *kind.lineage.last().unwrap(),
                "component",
                "lineage tail for {}",
                kind.name
            );
        }
    }

    #[test]
    fn frame_kinds() {
        assert!(FRAME.is_frame());
        assert!(FLYOVER_FRAME.is_frame());
        assert!(!PANEL.is_frame());
    }
}
