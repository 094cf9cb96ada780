// Copyright 2026 the Limn Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The per-pass depiction context.
//!
//! A [`DepictContext`] is created for one depiction pass (a full page or a
//! single AJAX patch fragment) and destroyed at the end of it. It owns the
//! markup output, the indent state, and the namespace-prefix table shared by
//! every depictor in the pass. Element writes are balance-checked: a close
//! without a matching open fails, and a pass that finishes with open
//! elements fails, so an unparseable document can never be flushed.

use smallvec::SmallVec;

use crate::error::DepictError;

/// The XHTML namespace URI, bound to the default (empty) prefix.
pub const XHTML_NS: &str = "http://www.w3.org/1999/xhtml";

#[derive(Debug)]
struct OpenTag {
    qname: String,
    had_children: bool,
}

/// The per-pass accumulator of markup output.
///
/// # Example
///
/// ```
/// use limn_depict::{DepictContext, XHTML_NS};
///
/// let mut cx = DepictContext::new();
/// cx.start_element(XHTML_NS, "div").unwrap();
/// cx.attribute("class", "panel").unwrap();
/// cx.indented(|cx| {
///     cx.start_element(XHTML_NS, "span").unwrap();
///     cx.text("a < b");
///     cx.end_element().unwrap();
/// });
/// cx.end_element().unwrap();
///
/// let markup = cx.finish().unwrap();
/// assert_eq!(
///     markup,
///     "<div class=\"panel\">\n\t<span>a &lt; b</span>\n</div>"
/// );
/// ```
#[derive(Debug)]
pub struct DepictContext {
    out: String,
    indent: usize,
    namespaces: Vec<(String, String)>,
    open: SmallVec<[OpenTag; 8]>,
    tag_open: bool,
    self_describing: bool,
    declared: bool,
    tooltips: bool,
}

impl Default for DepictContext {
    fn default() -> Self {
        Self::new()
    }
}

impl DepictContext {
    /// Creates a context for a full-document pass.
    #[must_use]
    pub fn new() -> Self {
        Self {
            out: String::new(),
            indent: 0,
            namespaces: vec![(String::new(), String::from(XHTML_NS))],
            open: SmallVec::new(),
            tag_open: false,
            self_describing: false,
            declared: false,
            tooltips: true,
        }
    }

    /// Creates a context for a patch fragment.
    ///
    /// Fragments are parsed independently on the client, so the first
    /// element re-declares every registered namespace binding.
    #[must_use]
    pub fn fragment() -> Self {
        Self {
            self_describing: true,
            ..Self::new()
        }
    }

    /// Disables advisory-text (tooltip) output for this pass.
    #[must_use]
    pub fn without_tooltips(mut self) -> Self {
        self.tooltips = false;
        self
    }

    /// Whether advisory text should be written in this pass.
    #[must_use]
    pub fn tooltips_enabled(&self) -> bool {
        self.tooltips
    }

    /// Registers a namespace binding for the rest of the pass.
    ///
    /// The default (empty) prefix is bound to [`XHTML_NS`] at construction.
    pub fn register_namespace(&mut self, prefix: &str, uri: &str) {
        if self.namespaces.iter().any(|(p, _)| p == prefix) {
            return;
        }
        self.namespaces
            .push((String::from(prefix), String::from(uri)));
    }

    /// Current element nesting depth.
    #[must_use]
    pub fn depth(&self) -> usize {
        self.open.len()
    }

    /// Runs `f` with the indent level raised by one.
    ///
    /// This is the explicit indent scope depictors wrap around child
    /// recursion so output nesting mirrors the component tree.
    pub fn indented<R>(&mut self, f: impl FnOnce(&mut Self) -> R) -> R {
        self.indent();
        let result = f(self);
        self.dedent();
        result
    }

    /// Raises the indent level by one until a matching [`dedent`](Self::dedent).
    ///
    /// For indent spans that outlive a closure scope, e.g. a strategy that
    /// opens its body element in one phase and closes it in another. Prefer
    /// [`indented`](Self::indented) where the span is lexical.
    pub fn indent(&mut self) {
        self.indent += 1;
    }

    /// Lowers the indent level by one.
    pub fn dedent(&mut self) {
        self.indent = self.indent.saturating_sub(1);
    }

    fn qname_for(&self, uri: &str, local: &str) -> Result<String, DepictError> {
        let prefix = self
            .namespaces
            .iter()
            .find(|(_, u)| u == uri)
            .map(|(p, _)| p.as_str())
            .ok_or_else(|| DepictError::UnknownNamespace(String::from(uri)))?;
        Ok(if prefix.is_empty() {
            String::from(local)
        } else {
            format!("{prefix}:{local}")
        })
    }

    fn close_start_tag(&mut self) {
        if self.tag_open {
            self.out.push('>');
            self.tag_open = false;
        }
    }

    fn push_line_break(&mut self) {
        if !self.out.is_empty() {
            self.out.push('\n');
            for _ in 0..self.indent {
                self.out.push('\t');
            }
        }
    }

    /// Opens an element in the given namespace.
    ///
    /// The start tag stays open for [`attribute`](Self::attribute) writes
    /// until content is written or the element is closed.
    pub fn start_element(&mut self, uri: &str, local: &str) -> Result<(), DepictError> {
        let qname = self.qname_for(uri, local)?;
        if let Some(parent) = self.open.last_mut() {
            parent.had_children = true;
        }
        self.close_start_tag();
        self.push_line_break();
        self.out.push('<');
        self.out.push_str(&qname);
        if self.self_describing && !self.declared {
            self.declared = true;
            for (prefix, uri) in self.namespaces.clone() {
                let name = if prefix.is_empty() {
                    String::from("xmlns")
                } else {
                    format!("xmlns:{prefix}")
                };
                self.write_attribute(&name, &uri);
            }
        }
        self.open.push(OpenTag {
            qname,
            had_children: false,
        });
        self.tag_open = true;
        Ok(())
    }

    fn write_attribute(&mut self, name: &str, value: &str) {
        self.out.push(' ');
        self.out.push_str(name);
        self.out.push_str("=\"");
        escape_into(&mut self.out, value, true);
        self.out.push('"');
    }

    /// Writes an attribute on the currently-open start tag.
    pub fn attribute(&mut self, name: &str, value: &str) -> Result<(), DepictError> {
        if !self.tag_open {
            return Err(DepictError::AttributeOutsideTag);
        }
        self.write_attribute(name, value);
        Ok(())
    }

    /// Writes escaped character content into the current element.
    pub fn text(&mut self, text: &str) {
        self.close_start_tag();
        escape_into(&mut self.out, text, false);
    }

    /// Writes pre-serialized markup into the current element verbatim.
    ///
    /// The caller is responsible for the fragment being well formed; balance
    /// tracking treats it as opaque child content.
    pub fn raw(&mut self, markup: &str) {
        self.close_start_tag();
        if let Some(top) = self.open.last_mut() {
            top.had_children = true;
        }
        self.push_line_break();
        self.out.push_str(markup);
    }

    /// Closes the most recently opened element.
    pub fn end_element(&mut self) -> Result<(), DepictError> {
        let tag = self.open.pop().ok_or(DepictError::Unbalanced)?;
        if self.tag_open {
            self.out.push_str("/>");
            self.tag_open = false;
            return Ok(());
        }
        if tag.had_children {
            self.push_line_break();
        }
        self.out.push_str("</");
        self.out.push_str(&tag.qname);
        self.out.push('>');
        Ok(())
    }

    /// Finishes the pass, returning the markup.
    ///
    /// Fails if any element is still open: an unbalanced pass must never be
    /// flushed to the client.
    pub fn finish(self) -> Result<String, DepictError> {
        if !self.open.is_empty() {
            return Err(DepictError::UnclosedElements(self.open.len()));
        }
        Ok(self.out)
    }
}

fn escape_into(out: &mut String, text: &str, attribute: bool) {
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' if attribute => out.push_str("&quot;"),
            _ => out.push(c),
        }
    }
}
