// Copyright 2026 the Limn Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The live component tree.
//!
//! [`ComponentTree`] is an arena of [`Component`]s keyed by [`DepictId`],
//! rooted at the single root application frame. Auxiliary frames (including
//! flyover frames) are children of the root; everything else hangs off a
//! frame. Child order is insertion order, and all traversal here is
//! depth-first preorder so discovery order is tree order.

use alloc::vec::Vec;
use core::fmt;

use hashbrown::HashMap;

use crate::component::Component;
use crate::id::DepictId;
use crate::kind::ComponentKind;

/// Errors from component tree operations.
#[derive(Clone, PartialEq, Eq)]
pub enum TreeError {
    /// The referenced component is not in the tree.
    MissingComponent(DepictId),
    /// The root application frame cannot be detached.
    DetachRoot,
}

impl fmt::Debug for TreeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MissingComponent(id) => write!(f, "TreeError::MissingComponent({id})"),
            Self::DetachRoot => write!(f, "TreeError::DetachRoot"),
        }
    }
}

impl fmt::Display for TreeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MissingComponent(id) => write!(f, "component {id} is not in the tree"),
            Self::DetachRoot => write!(f, "the root application frame cannot be detached"),
        }
    }
}

impl core::error::Error for TreeError {}

#[derive(Clone, Debug)]
struct Node {
    component: Component,
    parent: Option<DepictId>,
    children: Vec<DepictId>,
}

/// The live arena of depicted objects for one session.
///
/// # Example
///
/// ```
/// use limn_model::{ComponentTree, FRAME, PANEL, TEXT_CONTROL};
///
/// let mut tree = ComponentTree::new(&FRAME);
/// let panel = tree.insert(tree.root(), &PANEL).unwrap();
/// let field = tree.insert(panel, &TEXT_CONTROL).unwrap();
/// tree.get_mut(field).unwrap().name = Some("amount".into());
///
/// assert_eq!(tree.find_controls("amount"), vec![field]);
/// assert_eq!(tree.parent(field), Some(panel));
/// ```
#[derive(Clone, Debug)]
pub struct ComponentTree {
    nodes: HashMap<DepictId, Node>,
    root: DepictId,
    next_id: u64,
}

impl ComponentTree {
    /// Creates a tree containing only the root application frame.
    #[must_use]
    pub fn new(root_kind: &'static ComponentKind) -> Self {
        let root = DepictId::from_raw(1);
        let mut nodes = HashMap::new();
        nodes.insert(
            root,
            Node {
                component: Component::new(root, root_kind),
                parent: None,
                children: Vec::new(),
            },
        );
        Self {
            nodes,
            root,
            next_id: 2,
        }
    }

    /// The root application frame's id.
    #[inline]
    #[must_use]
    pub fn root(&self) -> DepictId {
        self.root
    }

    /// Returns `true` if the id refers to a live component.
    #[must_use]
    pub fn contains(&self, id: DepictId) -> bool {
        self.nodes.contains_key(&id)
    }

    /// Creates a new component of `kind` as the last child of `parent`.
    pub fn insert(
        &mut self,
        parent: DepictId,
        kind: &'static ComponentKind,
    ) -> Result<DepictId, TreeError> {
        if !self.nodes.contains_key(&parent) {
            return Err(TreeError::MissingComponent(parent));
        }
        let id = DepictId::from_raw(self.next_id);
        self.next_id += 1;
        self.nodes.insert(
            id,
            Node {
                component: Component::new(id, kind),
                parent: Some(parent),
                children: Vec::new(),
            },
        );
        self.nodes
            .get_mut(&parent)
            .expect("parent checked above")
            .children
            .push(id);
        Ok(id)
    }

    /// Creates a new frame of `kind` as a child of the root.
    pub fn insert_frame(&mut self, kind: &'static ComponentKind) -> DepictId {
        let root = self.root;
        self.insert(root, kind)
            .expect("root is always in the tree")
    }

    /// Looks up a component by id.
    #[must_use]
    pub fn get(&self, id: DepictId) -> Option<&Component> {
        self.nodes.get(&id).map(|n| &n.component)
    }

    /// Looks up a component by id, mutably.
    #[must_use]
    pub fn get_mut(&mut self, id: DepictId) -> Option<&mut Component> {
        self.nodes.get_mut(&id).map(|n| &mut n.component)
    }

    /// Returns the parent of `id`, if any.
    #[must_use]
    pub fn parent(&self, id: DepictId) -> Option<DepictId> {
        self.nodes.get(&id).and_then(|n| n.parent)
    }

    /// Returns the children of `id` in insertion order.
    #[must_use]
    pub fn children(&self, id: DepictId) -> &[DepictId] {
        self.nodes.get(&id).map_or(&[], |n| n.children.as_slice())
    }

    /// Detaches `id` and its whole subtree, destroying the components.
    ///
    /// Returns the retired ids in preorder, so the caller can scrub them from
    /// its change log. Detaching the root is an error.
    pub fn detach(&mut self, id: DepictId) -> Result<Vec<DepictId>, TreeError> {
        if id == self.root {
            return Err(TreeError::DetachRoot);
        }
        let parent = self
            .nodes
            .get(&id)
            .ok_or(TreeError::MissingComponent(id))?
            .parent;
        if let Some(parent) = parent {
            if let Some(node) = self.nodes.get_mut(&parent) {
                node.children.retain(|c| *c != id);
            }
        }
        let retired = self.descendants(id);
        for gone in &retired {
            self.nodes.remove(gone);
        }
        Ok(retired)
    }

    /// Returns `id` and all its descendants in depth-first preorder.
    #[must_use]
    pub fn descendants(&self, id: DepictId) -> Vec<DepictId> {
        let mut out = Vec::new();
        let mut stack = Vec::new();
        if self.contains(id) {
            stack.push(id);
        }
        while let Some(current) = stack.pop() {
            out.push(current);
            // Push in reverse so the first child is visited first.
            for child in self.children(current).iter().rev() {
                stack.push(*child);
            }
        }
        out
    }

    /// Finds every control bound to form-field `name`, in tree order.
    #[must_use]
    pub fn find_controls(&self, name: &str) -> Vec<DepictId> {
        self.descendants(self.root)
            .into_iter()
            .filter(|id| {
                self.get(*id)
                    .and_then(|c| c.name.as_deref())
                    .is_some_and(|n| n == name)
            })
            .collect()
    }

    /// The top-level frames (root children of a frame kind), in order.
    #[must_use]
    pub fn frames(&self) -> Vec<DepictId> {
        self.children(self.root)
            .iter()
            .copied()
            .filter(|id| self.get(*id).is_some_and(|c| c.kind().is_frame()))
            .collect()
    }

    /// The currently open top-level frames, in order.
    #[must_use]
    pub fn open_frames(&self) -> Vec<DepictId> {
        self.frames()
            .into_iter()
            .filter(|id| self.get(*id).is_some_and(|c| c.frame_open))
            .collect()
    }

    /// The currently open flyover frames, in order.
    #[must_use]
    pub fn open_flyover_frames(&self) -> Vec<DepictId> {
        self.open_frames()
            .into_iter()
            .filter(|id| {
                self.get(*id)
                    .is_some_and(|c| c.kind().has_ancestor("flyover-frame"))
            })
            .collect()
    }
}
