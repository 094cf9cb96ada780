// Copyright 2026 the Limn Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The three-phase depictor contract and the element-oriented base
//! strategies.
//!
//! A depictor renders one kind of depicted object. The driver
//! ([`DepictorSet::depict`](crate::DepictorSet::depict)) runs the ordered
//! phases `depict_begin` → `depict_body` → `depict_end`, and always runs
//! `depict_end` once `depict_begin` succeeded — including when the body
//! phase fails — so every element opened in the begin phase is closed on
//! all exit paths.

use core::fmt;

use limn_model::{Component, ComponentTree, DepictId};
use limn_style::{Decoration, body_style, identity_tokens, interaction_tokens, outer_style};

use crate::context::{DepictContext, XHTML_NS};
use crate::element::ElementState;
use crate::error::DepictError;
use crate::registry::DepictorSet;

/// A per-component-kind rendering strategy.
///
/// A depictor is bound 1:1 to a component while installed; the
/// [`installed`](Self::installed)/[`uninstalled`](Self::uninstalled) hooks
/// fire on binding change. Per-render element handles live only between
/// `depict_begin` and `depict_end` of one pass.
pub trait Depictor: fmt::Debug + Send {
    /// Called when the depictor is bound to a component.
    fn installed(&mut self, component: &Component) {
        let _ = component;
    }

    /// Called when the depictor is unbound.
    fn uninstalled(&mut self) {}

    /// Opens the component's markup.
    fn depict_begin(
        &mut self,
        cx: &mut DepictContext,
        tree: &ComponentTree,
        id: DepictId,
    ) -> Result<(), DepictError>;

    /// Writes the component's content.
    ///
    /// The default recursively depicts the children inside an explicit
    /// indent scope, so output nesting mirrors the component tree.
    fn depict_body(
        &mut self,
        cx: &mut DepictContext,
        tree: &ComponentTree,
        set: &mut DepictorSet,
        id: DepictId,
    ) -> Result<(), DepictError> {
        depict_children(cx, tree, set, id)
    }

    /// Closes the markup opened by [`depict_begin`](Self::depict_begin).
    fn depict_end(
        &mut self,
        cx: &mut DepictContext,
        tree: &ComponentTree,
        id: DepictId,
    ) -> Result<(), DepictError>;
}

/// Depicts all children of `id` inside an indent scope.
///
/// This is the default body phase; custom depictors can call it around
/// their own content.
pub fn depict_children(
    cx: &mut DepictContext,
    tree: &ComponentTree,
    set: &mut DepictorSet,
    id: DepictId,
) -> Result<(), DepictError> {
    cx.indented(|cx| {
        for child in tree.children(id) {
            set.depict(cx, tree, *child)?;
        }
        Ok(())
    })
}

fn merged_style(component: &Component) -> String {
    let mut style = outer_style(component);
    let body = body_style(component);
    if !body.is_empty() {
        if !style.is_empty() {
            style.push(' ');
        }
        style.push_str(&body);
    }
    style
}

fn write_advisory(cx: &mut DepictContext, component: &Component) -> Result<(), DepictError> {
    if cx.tooltips_enabled() {
        if let Some(advisory) = component.effective_advisory() {
            cx.attribute("title", advisory)?;
        }
    }
    Ok(())
}

/// The simple element strategy.
///
/// The single top-level element doubles as both the outer presentation
/// element and the body content element; outer and body styles are merged
/// onto it.
#[derive(Debug, Default)]
pub struct SimpleElement {
    state: Option<ElementState>,
}

impl SimpleElement {
    /// Creates an idle strategy.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Opens the element with identity, style, and advisory attributes.
    ///
    /// The start tag stays open, so the caller can add element-specific
    /// attributes before writing content.
    pub fn begin(
        &mut self,
        cx: &mut DepictContext,
        component: &Component,
        local: &'static str,
    ) -> Result<(), DepictError> {
        cx.start_element(XHTML_NS, local)?;
        cx.attribute("id", &component.id().to_string())?;
        let tokens = interaction_tokens(component, Decoration::default());
        if !tokens.is_empty() {
            cx.attribute("class", &tokens.to_class_attr())?;
        }
        let style = merged_style(component);
        if !style.is_empty() {
            cx.attribute("style", &style)?;
        }
        write_advisory(cx, component)?;
        self.state = Some(ElementState::new(XHTML_NS, local));
        Ok(())
    }

    /// Closes the element, if it is still open.
    pub fn end(&mut self, cx: &mut DepictContext) -> Result<(), DepictError> {
        if let Some(mut state) = self.state.take() {
            if state.is_open() {
                cx.end_element()?;
                state.mark_closed();
            }
        }
        Ok(())
    }
}

/// The decorated element strategy.
///
/// Wraps the component in an outer element carrying label decoration before
/// the body and error-message decoration after it, with an optionally
/// distinct body content element. The body's [`ElementState`] tracks its
/// open state explicitly, so a premature or duplicate close is impossible.
#[derive(Debug, Default)]
pub struct DecoratedElement {
    outer: Option<ElementState>,
    body: Option<ElementState>,
}

impl DecoratedElement {
    /// Creates an idle strategy.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Opens the outer element and writes the label decoration.
    pub fn begin(
        &mut self,
        cx: &mut DepictContext,
        component: &Component,
        outer_local: &'static str,
    ) -> Result<(), DepictError> {
        cx.start_element(XHTML_NS, outer_local)?;
        cx.attribute("id", &component.id().to_string())?;
        let tokens = interaction_tokens(component, Decoration::default());
        if !tokens.is_empty() {
            cx.attribute("class", &tokens.to_class_attr())?;
        }
        let style = outer_style(component);
        if !style.is_empty() {
            cx.attribute("style", &style)?;
        }
        write_advisory(cx, component)?;
        self.outer = Some(ElementState::new(XHTML_NS, outer_local));

        if let (Some(label), false) = (&component.label, component.label_hidden) {
            cx.indented(|cx| -> Result<(), DepictError> {
                cx.start_element(XHTML_NS, "span")?;
                cx.attribute("class", "label")?;
                cx.text(label);
                cx.end_element()
            })?;
        }
        Ok(())
    }

    /// Opens the distinct body content element.
    ///
    /// The start tag stays open for element-specific attributes. The body
    /// identity tokens carry a `-body` suffix to distinguish them from the
    /// outer element's tokens. The indent raised here is held until
    /// [`close_body`](Self::close_body), so the body's open and close tags
    /// land at the same level.
    pub fn open_body(
        &mut self,
        cx: &mut DepictContext,
        component: &Component,
        local: &'static str,
    ) -> Result<(), DepictError> {
        cx.indent();
        cx.start_element(XHTML_NS, local)?;
        let tokens = identity_tokens(
            component,
            Decoration {
                prefix: None,
                suffix: Some("-body"),
            },
        );
        if !tokens.is_empty() {
            cx.attribute("class", &tokens.to_class_attr())?;
        }
        let style = body_style(component);
        if !style.is_empty() {
            cx.attribute("style", &style)?;
        }
        self.body = Some(ElementState::new(XHTML_NS, local));
        Ok(())
    }

    /// Closes the body element if it is open. Safe to call repeatedly.
    pub fn close_body(&mut self, cx: &mut DepictContext) -> Result<(), DepictError> {
        if let Some(body) = &mut self.body {
            if body.is_open() {
                cx.end_element()?;
                body.mark_closed();
                cx.dedent();
            }
        }
        Ok(())
    }

    /// Whether the body element is currently open.
    #[must_use]
    pub fn body_is_open(&self) -> bool {
        self.body.as_ref().is_some_and(ElementState::is_open)
    }

    /// Writes the error decoration and closes the outer element.
    pub fn end(
        &mut self,
        cx: &mut DepictContext,
        component: &Component,
    ) -> Result<(), DepictError> {
        self.close_body(cx)?;
        self.body = None;
        for message in component.notifications() {
            cx.indented(|cx| -> Result<(), DepictError> {
                cx.start_element(XHTML_NS, "span")?;
                cx.attribute("class", "error")?;
                cx.text(message);
                cx.end_element()
            })?;
        }
        if let Some(mut outer) = self.outer.take() {
            if outer.is_open() {
                cx.end_element()?;
                outer.mark_closed();
            }
        }
        Ok(())
    }
}
