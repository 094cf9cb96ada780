// Copyright 2026 the Limn Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Depict identifiers.

use core::fmt;

/// A process-unique identifier for a depicted object.
///
/// Ids are allocated by [`ComponentTree`](crate::ComponentTree) and are
/// stable for the object's lifetime in a session. Once the object is removed
/// the id is retired; ids are never reissued by the same tree.
///
/// The platform-facing form (the `id` attribute written into markup and the
/// component references in wire events) is the decimal rendering of the raw
/// value, produced by the `Display` impl.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Ord, PartialOrd)]
#[repr(transparent)]
pub struct DepictId(u64);

impl DepictId {
    /// Reconstructs an id from its raw value.
    ///
    /// Used by wire decoding to refer to existing objects; an id that was
    /// never allocated simply resolves to no component.
    #[inline]
    #[must_use]
    pub fn from_raw(raw: u64) -> Self {
        Self(raw)
    }

    /// Returns the raw numeric id.
    #[inline]
    #[must_use]
    pub fn as_u64(self) -> u64 {
        self.0
    }
}

impl fmt::Debug for DepictId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "DepictId({})", self.0)
    }
}

impl fmt::Display for DepictId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
