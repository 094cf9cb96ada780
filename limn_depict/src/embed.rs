// Copyright 2026 the Limn Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Embedded markup fragments.
//!
//! A markup component carries an XHTML fragment as its committed value. The
//! fragment is reproduced verbatim, except that an element whose `id`
//! attribute names a live child of the embedding component is replaced by
//! that child's own depiction; everything else is serialized and recursed
//! into.
//!
//! Parsing is memoized in a process-wide cache keyed by fragment content.
//! Parsed fragments are pure functions of their text, so duplicate
//! computation on a cache race is convergent and the overwrite is harmless,
//! the same policy the style-token cache follows.

use std::sync::Arc;

use hashbrown::HashMap;
use parking_lot::RwLock;
use quick_xml::Reader;
use quick_xml::events::{BytesStart, Event};

use limn_model::{ComponentTree, DepictId};

use crate::context::{DepictContext, XHTML_NS};
use crate::error::DepictError;
use crate::registry::DepictorSet;

#[derive(Debug, PartialEq, Eq)]
enum Node {
    Element {
        local: String,
        attributes: Vec<(String, String)>,
        /// The `id` attribute parsed as a component id, when it is one.
        substitution: Option<DepictId>,
        children: Vec<Node>,
    },
    Text(String),
}

/// A parsed embedded markup fragment.
///
/// Obtained from [`parsed_fragment`]; holds the node tree the rewrite pass
/// walks. A fragment may have several top-level nodes.
#[derive(Debug, PartialEq, Eq)]
pub struct EmbeddedFragment {
    nodes: Vec<Node>,
}

static FRAGMENT_CACHE: RwLock<Option<HashMap<String, Arc<EmbeddedFragment>>>> =
    RwLock::new(None);

/// Returns the parsed form of `markup`, memoized process-wide by content.
///
/// The cache is transparent: a cached fragment always equals a fresh parse
/// of the same text. Unparseable markup is not cached.
pub fn parsed_fragment(markup: &str) -> Result<Arc<EmbeddedFragment>, DepictError> {
    if let Some(cache) = FRAGMENT_CACHE.read().as_ref() {
        if let Some(parsed) = cache.get(markup) {
            return Ok(Arc::clone(parsed));
        }
    }
    let parsed = Arc::new(parse(markup)?);
    FRAGMENT_CACHE
        .write()
        .get_or_insert_with(HashMap::new)
        .insert(String::from(markup), Arc::clone(&parsed));
    Ok(parsed)
}

fn element_node(e: &BytesStart<'_>) -> Result<Node, DepictError> {
    let local = String::from_utf8_lossy(e.local_name().as_ref()).into_owned();
    let mut attributes = Vec::new();
    let mut substitution = None;
    for attr in e.attributes() {
        let attr = attr.map_err(|err| DepictError::Markup(err.to_string()))?;
        let key = String::from_utf8_lossy(attr.key.local_name().as_ref()).into_owned();
        let value = attr
            .unescape_value()
            .map_err(|err| DepictError::Markup(err.to_string()))?
            .into_owned();
        if key == "id" {
            substitution = value.parse::<u64>().ok().map(DepictId::from_raw);
        }
        attributes.push((key, value));
    }
    Ok(Node::Element {
        local,
        attributes,
        substitution,
        children: Vec::new(),
    })
}

fn attach(node: Node, open: &mut Vec<Node>, roots: &mut Vec<Node>) {
    match open.last_mut() {
        Some(Node::Element { children, .. }) => children.push(node),
        _ => roots.push(node),
    }
}

fn parse(markup: &str) -> Result<EmbeddedFragment, DepictError> {
    let mut reader = Reader::from_str(markup);
    reader.config_mut().trim_text(true);
    let mut roots = Vec::new();
    let mut open: Vec<Node> = Vec::new();
    loop {
        match reader
            .read_event()
            .map_err(|err| DepictError::Markup(err.to_string()))?
        {
            Event::Start(e) => open.push(element_node(&e)?),
            Event::Empty(e) => {
                let node = element_node(&e)?;
                attach(node, &mut open, &mut roots);
            }
            Event::End(_) => {
                let node = open
                    .pop()
                    .ok_or_else(|| DepictError::Markup(String::from("unmatched close tag")))?;
                attach(node, &mut open, &mut roots);
            }
            Event::Text(t) => {
                let text = t
                    .unescape()
                    .map_err(|err| DepictError::Markup(err.to_string()))?;
                if !text.is_empty() {
                    attach(Node::Text(text.into_owned()), &mut open, &mut roots);
                }
            }
            Event::Eof => break,
            _ => {}
        }
    }
    if !open.is_empty() {
        return Err(DepictError::Markup(String::from("unclosed element")));
    }
    Ok(EmbeddedFragment { nodes: roots })
}

/// Depicts an embedded markup fragment with live-child substitution.
///
/// Elements whose parsed `id` names a live child of `owner` are replaced by
/// that child's own depiction through `set`; all other nodes are serialized
/// verbatim, recursing into element children.
pub fn depict_embedded(
    cx: &mut DepictContext,
    tree: &ComponentTree,
    set: &mut DepictorSet,
    owner: DepictId,
    markup: &str,
) -> Result<(), DepictError> {
    let fragment = parsed_fragment(markup)?;
    for node in &fragment.nodes {
        depict_node(cx, tree, set, owner, node)?;
    }
    Ok(())
}

fn depict_node(
    cx: &mut DepictContext,
    tree: &ComponentTree,
    set: &mut DepictorSet,
    owner: DepictId,
    node: &Node,
) -> Result<(), DepictError> {
    match node {
        Node::Text(text) => {
            cx.text(text);
            Ok(())
        }
        Node::Element {
            local,
            attributes,
            substitution,
            children,
        } => {
            if let Some(id) = substitution {
                if tree.children(owner).contains(id) {
                    return set.depict(cx, tree, *id);
                }
            }
            cx.start_element(XHTML_NS, local)?;
            for (name, value) in attributes {
                cx.attribute(name, value)?;
            }
            if !children.is_empty() {
                cx.indented(|cx| {
                    children
                        .iter()
                        .try_for_each(|child| depict_node(cx, tree, set, owner, child))
                })?;
            }
            cx.end_element()
        }
    }
}
