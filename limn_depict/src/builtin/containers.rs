// Copyright 2026 the Limn Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Container depictors: frames and panels.

use limn_model::{ComponentTree, DepictId};

use crate::context::DepictContext;
use crate::depictor::{DecoratedElement, Depictor, SimpleElement};
use crate::error::DepictError;

/// Depicts a top-level frame: outer element, title decoration, content body.
///
/// Uses the decorated strategy so the frame label renders as a title bar
/// before the content and notifications render after it.
#[derive(Debug, Default)]
pub struct FrameDepictor {
    decorated: DecoratedElement,
}

impl FrameDepictor {
    /// Creates an idle frame depictor.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

impl Depictor for FrameDepictor {
    fn depict_begin(
        &mut self,
        cx: &mut DepictContext,
        tree: &ComponentTree,
        id: DepictId,
    ) -> Result<(), DepictError> {
        let component = tree.get(id).ok_or(DepictError::MissingComponent(id))?;
        self.decorated.begin(cx, component, "div")?;
        self.decorated.open_body(cx, component, "div")
    }

    fn depict_end(
        &mut self,
        cx: &mut DepictContext,
        tree: &ComponentTree,
        id: DepictId,
    ) -> Result<(), DepictError> {
        let component = tree.get(id).ok_or(DepictError::MissingComponent(id))?;
        self.decorated.end(cx, component)
    }
}

/// Depicts a plain grouping panel as a single merged element.
#[derive(Debug, Default)]
pub struct PanelDepictor {
    simple: SimpleElement,
}

impl PanelDepictor {
    /// Creates an idle panel depictor.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

impl Depictor for PanelDepictor {
    fn depict_begin(
        &mut self,
        cx: &mut DepictContext,
        tree: &ComponentTree,
        id: DepictId,
    ) -> Result<(), DepictError> {
        let component = tree.get(id).ok_or(DepictError::MissingComponent(id))?;
        self.simple.begin(cx, component, "div")
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
    use crate::registry::{DepictorRegistry, DepictorSet};
    use limn_model::{ComponentTree, FRAME, PANEL};

    fn render_root(tree: &ComponentTree, set: &mut DepictorSet) -> String {
        let mut cx = DepictContext::new();
        set.depict(&mut cx, tree, tree.root()).unwrap();
        cx.finish().unwrap()
    }

    #[test]
    fn frame_wraps_children_in_body() {
        let registry = DepictorRegistry::standard();
        let mut tree = ComponentTree::new(&FRAME);
        tree.get_mut(tree.root()).unwrap().label = Some("App".into());
        let panel = tree.insert(tree.root(), &PANEL).unwrap();

        let mut set = DepictorSet::new();
        set.install(&registry, tree.get(tree.root()).unwrap()).unwrap();
        set.install(&registry, tree.get(panel).unwrap()).unwrap();

        let markup = render_root(&tree, &mut set);
        let title = markup.find("class=\"label\"").expect("title decoration");
        let body = markup.find("frame-body").expect("frame body element");
        let child = markup.find("panel").expect("panel child");
        assert!(title < body && body < child, "ordering in {markup}");
    }

    #[test]
    fn frame_markup_is_balanced() {
        let registry = DepictorRegistry::standard();
        let tree = ComponentTree::new(&FRAME);
        let mut set = DepictorSet::new();
        set.install(&registry, tree.get(tree.root()).unwrap()).unwrap();

        // finish() fails on unbalanced output, so success is the assertion.
        let markup = render_root(&tree, &mut set);
        assert!(markup.starts_with("<div"));
    }
}
