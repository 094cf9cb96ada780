// Copyright 2026 the Limn Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Open-element handles.

/// A handle for one currently-open markup element.
///
/// An `ElementState` is owned exclusively by the depictor that opened the
/// element. It is constructed when the element is opened (normally in
/// `depict_begin`) and discarded when the element is closed (normally in
/// `depict_end`); it is never read across render passes.
///
/// The [`is_open`](Self::is_open) guard gates the closing write, so a close
/// can be attempted idempotently: callers check the flag, close the element,
/// and [`mark_closed`](Self::mark_closed). A second attempt is a no-op
/// rather than a duplicate close.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ElementState {
    namespace: &'static str,
    local: &'static str,
    open: bool,
}

impl ElementState {
    /// Creates a handle for a just-opened element.
    #[must_use]
    pub fn new(namespace: &'static str, local: &'static str) -> Self {
        Self {
            namespace,
            local,
            open: true,
        }
    }

    /// The element's namespace URI.
    #[must_use]
    pub fn namespace(&self) -> &'static str {
        self.namespace
    }

    /// The element's local name.
    #[must_use]
    pub fn local(&self) -> &'static str {
        self.local
    }

    /// Returns `true` while the element has not been closed.
    #[must_use]
    pub fn is_open(&self) -> bool {
        self.open
    }

    /// Records that the element's closing write has been performed.
    pub fn mark_closed(&mut self) {
        self.open = false;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn open_until_marked_closed() {
        let mut state = ElementState::new("http://www.w3.org/1999/xhtml", "div");
        assert!(state.is_open());
        assert_eq!(state.local(), "div");

        state.mark_closed();
        assert!(!state.is_open());

        // Idempotent.
        state.mark_closed();
        assert!(!state.is_open());
    }
}
