// Copyright 2026 the Limn Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Style-identity token derivation.
//!
//! The base token set for a component names its kind lineage (one token per
//! lineage entry), its explicit style identifier, a validity token, a
//! control-status token, and a selection token. The extended set adds
//! interaction-capability tokens. All sets are deduplicated and unordered in
//! meaning; [`TokenSet`] stores them sorted for cheap membership tests.

use std::sync::Arc;

use hashbrown::HashMap;
use parking_lot::RwLock;

use limn_model::{Capabilities, Component, ComponentKind, KindKey};

/// An owned, sorted, deduplicated set of style tokens.
///
/// Insertion order is irrelevant; two sets with the same members are equal.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct TokenSet(Vec<String>);

impl TokenSet {
    /// Constructs a set from an iterator, sorting and deduplicating.
    #[must_use]
    pub fn from_tokens<I, S>(iter: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut tokens: Vec<String> = iter.into_iter().map(Into::into).collect();
        tokens.sort();
        tokens.dedup();
        Self(tokens)
    }

    /// Returns `true` if the set is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Returns the number of tokens in the set.
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Returns `true` if `token` is a member.
    #[must_use]
    pub fn contains(&self, token: &str) -> bool {
        self.0.binary_search_by(|t| t.as_str().cmp(token)).is_ok()
    }

    /// Returns the tokens as a sorted slice.
    #[must_use]
    pub fn as_slice(&self) -> &[String] {
        &self.0
    }

    /// Renders the set as a space-separated `class` attribute value.
    #[must_use]
    pub fn to_class_attr(&self) -> String {
        self.0.join(" ")
    }
}

/// Optional prefix/suffix decoration applied to lineage tokens.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct Decoration<'a> {
    /// Prefix prepended to every lineage token.
    pub prefix: Option<&'a str>,
    /// Suffix appended to every lineage token.
    pub suffix: Option<&'a str>,
}

impl Decoration<'_> {
    fn apply(&self, token: &str) -> String {
        let mut out = String::with_capacity(
            token.len()
                + self.prefix.map_or(0, str::len)
                + self.suffix.map_or(0, str::len),
        );
        if let Some(prefix) = self.prefix {
            out.push_str(prefix);
        }
        out.push_str(token);
        if let Some(suffix) = self.suffix {
            out.push_str(suffix);
        }
        out
    }

    fn is_plain(&self) -> bool {
        self.prefix.is_none() && self.suffix.is_none()
    }
}

/// Process-wide lineage token cache.
///
/// Values are pure functions of the `'static` kind descriptor, so duplicate
/// computation on a race is convergent: both threads compute the same value
/// and the cache overwrite is harmless. Readers never block other readers.
static LINEAGE_CACHE: RwLock<Option<HashMap<KindKey, Arc<[String]>>>> = RwLock::new(None);

fn compute_lineage_tokens(kind: &'static ComponentKind) -> Arc<[String]> {
    kind.lineage
        .iter()
        .map(|name| String::from(*name))
        .collect()
}

/// Returns the undecorated lineage tokens for a kind, one per lineage entry.
///
/// Computed at most once per kind under normal operation and memoized
/// process-wide; the cache is transparent (the memoized value always equals
/// a fresh computation).
#[must_use]
pub fn lineage_tokens(kind: &'static ComponentKind) -> Arc<[String]> {
    let key = kind.key();
    if let Some(cache) = LINEAGE_CACHE.read().as_ref() {
        if let Some(tokens) = cache.get(&key) {
            return Arc::clone(tokens);
        }
    }
    let tokens = compute_lineage_tokens(kind);
    LINEAGE_CACHE
        .write()
        .get_or_insert_with(HashMap::new)
        .insert(key, Arc::clone(&tokens));
    tokens
}

/// Derives the base style-identity token set for a component.
///
/// The set contains, deduplicated:
///
/// - one token per lineage entry, decorated by `decoration`;
/// - the explicit style identifier, if set;
/// - `invalid`, if the component currently fails validation;
/// - the control-status token (`status-warning` / `status-error`), if set;
/// - `selected`, if the component is a selectable, currently selected
///   variant.
#[must_use]
pub fn identity_tokens(component: &Component, decoration: Decoration<'_>) -> TokenSet {
    let lineage = lineage_tokens(component.kind());
    let mut tokens: Vec<String> = if decoration.is_plain() {
        lineage.iter().cloned().collect()
    } else {
        lineage.iter().map(|t| decoration.apply(t)).collect()
    };
    if let Some(style_id) = &component.style_id {
        tokens.push(style_id.clone());
    }
    if !component.valid {
        tokens.push(String::from("invalid"));
    }
    if let Some(status) = component.status {
        tokens.push(String::from(status.style_token()));
    }
    if component.capabilities.contains(Capabilities::SELECTABLE) && component.selected {
        tokens.push(String::from("selected"));
    }
    TokenSet::from_tokens(tokens)
}

/// Derives the extended token set: identity tokens plus interaction tokens.
///
/// Adds `drag-source`, `drag-handle`, `drop-target`, and `mouse-listener`
/// according to the component's capability flags.
#[must_use]
pub fn interaction_tokens(component: &Component, decoration: Decoration<'_>) -> TokenSet {
    let base = identity_tokens(component, decoration);
    let caps = component.capabilities;
    let extra = [
        (Capabilities::DRAG_SOURCE, "drag-source"),
        (Capabilities::DRAG_HANDLE, "drag-handle"),
        (Capabilities::DROP_TARGET, "drop-target"),
        (Capabilities::MOUSE_LISTENER, "mouse-listener"),
    ]
    .into_iter()
    .filter(|(flag, _)| caps.contains(*flag))
    .map(|(_, token)| String::from(token));
    TokenSet::from_tokens(base.0.into_iter().chain(extra))
}

#[cfg(test)]
mod tests {
    use super::*;
    use limn_model::{ComponentTree, ControlStatus, FRAME, TEXT_CONTROL};

    fn text_control() -> Component {
        let mut tree = ComponentTree::new(&FRAME);
        let id = tree.insert(tree.root(), &TEXT_CONTROL).unwrap();
        tree.get(id).unwrap().clone()
    }

    #[test]
    fn token_set_semantics() {
        let set = TokenSet::from_tokens(["b", "a", "b"]);
        assert_eq!(set.len(), 2);
        assert!(set.contains("a"));
        assert!(!set.contains("c"));
        assert_eq!(set, TokenSet::from_tokens(["a", "b"]));
        assert_eq!(set.to_class_attr(), "a b");
    }

    #[test]
    fn lineage_cache_is_idempotent_and_transparent() {
        let cached = lineage_tokens(&TEXT_CONTROL);
        let again = lineage_tokens(&TEXT_CONTROL);
        assert_eq!(cached, again);
        assert_eq!(cached, compute_lineage_tokens(&TEXT_CONTROL));
    }

    #[test]
    fn identity_covers_lineage() {
        let c = text_control();
        let set = identity_tokens(&c, Decoration::default());
        for name in TEXT_CONTROL.lineage {
            assert!(set.contains(name), "missing lineage token {name}");
        }
        assert!(!set.contains("invalid"));
    }

    #[test]
    fn decoration_wraps_lineage_tokens_only() {
        let mut c = text_control();
        c.style_id = Some("accent".into());
        let set = identity_tokens(
            &c,
            Decoration {
                prefix: Some("x-"),
                suffix: None,
            },
        );
        assert!(set.contains("x-text-control"));
        assert!(set.contains("x-component"));
        // The explicit style id is not decorated.
        assert!(set.contains("accent"));
    }

    #[test]
    fn validity_status_and_selection_tokens() {
        let mut c = text_control();
        c.valid = false;
        c.status = Some(ControlStatus::Error);
        c.capabilities |= Capabilities::SELECTABLE;
        c.selected = true;

        let set = identity_tokens(&c, Decoration::default());
        assert!(set.contains("invalid"));
        assert!(set.contains("status-error"));
        assert!(set.contains("selected"));
    }

    #[test]
    fn selection_requires_selectable() {
        let mut c = text_control();
        c.selected = true;
        let set = identity_tokens(&c, Decoration::default());
        assert!(!set.contains("selected"));
    }

    #[test]
    fn interaction_tokens_follow_capabilities() {
        let mut c = text_control();
        c.capabilities = Capabilities::DRAG_SOURCE | Capabilities::MOUSE_LISTENER;

        let set = interaction_tokens(&c, Decoration::default());
        assert!(set.contains("drag-source"));
        assert!(set.contains("mouse-listener"));
        assert!(!set.contains("drop-target"));
        assert!(!set.contains("drag-handle"));
    }
}
