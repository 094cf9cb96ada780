// Copyright 2026 the Limn Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The embedded-markup depictor.

use limn_model::{ComponentTree, DepictId};

use crate::context::DepictContext;
use crate::depictor::{Depictor, SimpleElement, depict_children};
use crate::embed::depict_embedded;
use crate::error::DepictError;
use crate::registry::DepictorSet;

/// Depicts a markup component: the committed value is an XHTML fragment
/// reproduced verbatim, with live children substituted by element id.
///
/// With no value, the component falls back to plain child recursion.
#[derive(Debug, Default)]
pub struct MarkupDepictor {
    simple: SimpleElement,
}

impl MarkupDepictor {
    /// Creates an idle markup depictor.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

impl Depictor for MarkupDepictor {
    fn depict_begin(
        &mut self,
        cx: &mut DepictContext,
        tree: &ComponentTree,
        id: DepictId,
    ) -> Result<(), DepictError> {
        let component = tree.get(id).ok_or(DepictError::MissingComponent(id))?;
        self.simple.begin(cx, component, "div")
    }

    fn depict_body(
        &mut self,
        cx: &mut DepictContext,
        tree: &ComponentTree,
        set: &mut DepictorSet,
        id: DepictId,
    ) -> Result<(), DepictError> {
        let component = tree.get(id).ok_or(DepictError::MissingComponent(id))?;
        match component.value() {
            Some(markup) => cx.indented(|cx| depict_embedded(cx, tree, set, id, markup)),
            None => depict_children(cx, tree, set, id),
        }
    }

    fn depict_end(
        &mut self,
        cx: &mut DepictContext,
        _tree: &ComponentTree,
        _id: DepictId,
    ) -> Result<(), DepictError> {
        self.simple.end(cx)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::registry::DepictorRegistry;
    use limn_model::{ComponentTree, FRAME, LABEL, MARKUP};

    #[test]
    fn markup_value_renders_with_substitution() {
        let registry = DepictorRegistry::standard();
        let mut tree = ComponentTree::new(&FRAME);
        let markup = tree.insert(tree.root(), &MARKUP).unwrap();
        let child = tree.insert(markup, &LABEL).unwrap();
        tree.get_mut(child).unwrap().label = Some("Total".into());
        tree.get_mut(markup).unwrap().commit_value(Some(format!(
            "<table><tr><td id=\"{child}\"/></tr></table>"
        )));

        let mut set = DepictorSet::new();
        set.install(&registry, tree.get(markup).unwrap()).unwrap();
        set.install(&registry, tree.get(child).unwrap()).unwrap();

        let mut cx = DepictContext::new();
        set.depict(&mut cx, &tree, markup).unwrap();
        let out = cx.finish().unwrap();
        assert!(out.contains("<table>"), "got {out}");
        assert!(!out.contains("<td"), "got {out}");
        assert!(out.contains(">Total</span>"), "got {out}");
    }

    #[test]
    fn markup_without_value_recurses_children() {
        let registry = DepictorRegistry::standard();
        let mut tree = ComponentTree::new(&FRAME);
        let markup = tree.insert(tree.root(), &MARKUP).unwrap();
        let child = tree.insert(markup, &LABEL).unwrap();
        tree.get_mut(child).unwrap().label = Some("Plain".into());

        let mut set = DepictorSet::new();
        set.install(&registry, tree.get(markup).unwrap()).unwrap();
        set.install(&registry, tree.get(child).unwrap()).unwrap();

        let mut cx = DepictContext::new();
        set.depict(&mut cx, &tree, markup).unwrap();
        assert!(cx.finish().unwrap().contains(">Plain</span>"));
    }
}
