// Copyright 2026 the Limn Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Control depictors: text controls, buttons, checkboxes.

use limn_model::{Component, ComponentTree, DepictId};

use crate::context::DepictContext;
use crate::depictor::{DecoratedElement, Depictor, SimpleElement};
use crate::error::DepictError;
use crate::registry::DepictorSet;

fn write_enablement(cx: &mut DepictContext, component: &Component) -> Result<(), DepictError> {
    if !component.enabled {
        cx.attribute("disabled", "disabled")?;
    }
    if !component.editable {
        cx.attribute("readonly", "readonly")?;
    }
    Ok(())
}

/// Depicts a single-line text input with label and error decoration.
///
/// The input shows the provisional value while one is pending, otherwise
/// the committed value.
#[derive(Debug, Default)]
pub struct TextControlDepictor {
    decorated: DecoratedElement,
}

impl TextControlDepictor {
    /// Creates an idle text-control depictor.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

impl Depictor for TextControlDepictor {
    fn depict_begin(
        &mut self,
        cx: &mut DepictContext,
        tree: &ComponentTree,
        id: DepictId,
    ) -> Result<(), DepictError> {
        let component = tree.get(id).ok_or(DepictError::MissingComponent(id))?;
        self.decorated.begin(cx, component, "span")?;
        self.decorated.open_body(cx, component, "input")?;
        cx.attribute("type", "text")?;
        if let Some(name) = &component.name {
            cx.attribute("name", name)?;
        }
        if let Some(text) = component.provisional().or(component.value()) {
            cx.attribute("value", text)?;
        }
        write_enablement(cx, component)
    }

    fn depict_body(
        &mut self,
        _cx: &mut DepictContext,
        _tree: &ComponentTree,
        _set: &mut DepictorSet,
        _id: DepictId,
    ) -> Result<(), DepictError> {
        // Inputs carry no child content.
        Ok(())
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

/// Depicts a push button; the action identifier rides along as a data
/// attribute for the client-side bootstrap script.
#[derive(Debug, Default)]
pub struct ButtonDepictor {
    simple: SimpleElement,
}

impl ButtonDepictor {
    /// Creates an idle button depictor.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

impl Depictor for ButtonDepictor {
    fn depict_begin(
        &mut self,
        cx: &mut DepictContext,
        tree: &ComponentTree,
        id: DepictId,
    ) -> Result<(), DepictError> {
        let component = tree.get(id).ok_or(DepictError::MissingComponent(id))?;
        self.simple.begin(cx, component, "button")?;
        cx.attribute("type", "button")?;
        if let Some(action) = &component.action {
            cx.attribute("data-action", action)?;
        }
        write_enablement(cx, component)
    }

    fn depict_body(
        &mut self,
        cx: &mut DepictContext,
        tree: &ComponentTree,
        _set: &mut DepictorSet,
        id: DepictId,
    ) -> Result<(), DepictError> {
        let component = tree.get(id).ok_or(DepictError::MissingComponent(id))?;
        if let Some(label) = &component.label {
            cx.text(label);
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

/// Depicts a boolean toggle as a checkbox input.
#[derive(Debug, Default)]
pub struct CheckboxDepictor {
    decorated: DecoratedElement,
}

impl CheckboxDepictor {
    /// Creates an idle checkbox depictor.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

impl Depictor for CheckboxDepictor {
    fn depict_begin(
        &mut self,
        cx: &mut DepictContext,
        tree: &ComponentTree,
        id: DepictId,
    ) -> Result<(), DepictError> {
        let component = tree.get(id).ok_or(DepictError::MissingComponent(id))?;
        self.decorated.begin(cx, component, "span")?;
        self.decorated.open_body(cx, component, "input")?;
        cx.attribute("type", "checkbox")?;
        if let Some(name) = &component.name {
            cx.attribute("name", name)?;
        }
        if component.value() == Some("true") {
            cx.attribute("checked", "checked")?;
        }
        write_enablement(cx, component)
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
        tree: &ComponentTree,
        id: DepictId,
    ) -> Result<(), DepictError> {
        let component = tree.get(id).ok_or(DepictError::MissingComponent(id))?;
        self.decorated.end(cx, component)
    }
}
