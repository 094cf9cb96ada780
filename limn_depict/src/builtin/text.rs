// Copyright 2026 the Limn Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Display depictors: labels and images.

use limn_model::{ComponentTree, DepictId};

use crate::context::DepictContext;
use crate::depictor::{Depictor, SimpleElement};
use crate::error::DepictError;
use crate::registry::DepictorSet;

/// Depicts static display text as a single span.
#[derive(Debug, Default)]
pub struct LabelDepictor {
    simple: SimpleElement,
}

impl LabelDepictor {
    /// Creates an idle label depictor.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

impl Depictor for LabelDepictor {
    fn depict_begin(
        &mut self,
        cx: &mut DepictContext,
        tree: &ComponentTree,
        id: DepictId,
    ) -> Result<(), DepictError> {
        let component = tree.get(id).ok_or(DepictError::MissingComponent(id))?;
        self.simple.begin(cx, component, "span")
    }

    fn depict_body(
        &mut self,
        cx: &mut DepictContext,
        tree: &ComponentTree,
        _set: &mut DepictorSet,
        id: DepictId,
    ) -> Result<(), DepictError> {
        let component = tree.get(id).ok_or(DepictError::MissingComponent(id))?;
        if let Some(text) = component.label.as_deref().or(component.value()) {
            cx.text(text);
        }
        Ok(())
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

/// Depicts an image; the committed value is the source URI.
#[derive(Debug, Default)]
pub struct ImageDepictor {
    simple: SimpleElement,
}

impl ImageDepictor {
    /// Creates an idle image depictor.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

impl Depictor for ImageDepictor {
    fn depict_begin(
        &mut self,
        cx: &mut DepictContext,
        tree: &ComponentTree,
        id: DepictId,
    ) -> Result<(), DepictError> {
        let component = tree.get(id).ok_or(DepictError::MissingComponent(id))?;
        self.simple.begin(cx, component, "img")?;
        if let Some(src) = component.value() {
            cx.attribute("src", src)?;
        }
        if let Some(label) = &component.label {
            cx.attribute("alt", label)?;
        }
        Ok(())
    }

    fn depict_body(
        &mut self,
        _cx: &mut DepictContext,
        _tree: &ComponentTree,
        _set: &mut DepictorSet,
        _id: DepictId,
    ) -> Result<(), DepictError> {
        Ok(())
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
    use limn_model::{ComponentTree, FRAME, IMAGE, LABEL};

    #[test]
    fn label_renders_text() {
        let registry = DepictorRegistry::standard();
        let mut tree = ComponentTree::new(&FRAME);
        let label = tree.insert(tree.root(), &LABEL).unwrap();
        tree.get_mut(label).unwrap().label = Some("Hello & welcome".into());

        let mut set = DepictorSet::new();
        set.install(&registry, tree.get(label).unwrap()).unwrap();
        let mut cx = DepictContext::new();
        set.depict(&mut cx, &tree, label).unwrap();
        let markup = cx.finish().unwrap();
        assert!(markup.contains(">Hello &amp; welcome</span>"), "got {markup}");
    }

    #[test]
    fn image_self_closes_with_src() {
        let registry = DepictorRegistry::standard();
        let mut tree = ComponentTree::new(&FRAME);
        let image = tree.insert(tree.root(), &IMAGE).unwrap();
        tree.get_mut(image)
            .unwrap()
            .commit_value(Some("/res/logo.png".into()));

        let mut set = DepictorSet::new();
        set.install(&registry, tree.get(image).unwrap()).unwrap();
        let mut cx = DepictContext::new();
        set.depict(&mut cx, &tree, image).unwrap();
        let markup = cx.finish().unwrap();
        assert!(markup.contains("src=\"/res/logo.png\""), "got {markup}");
        assert!(markup.ends_with("/>"), "got {markup}");
    }
}
