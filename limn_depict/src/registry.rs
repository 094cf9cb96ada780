// Copyright 2026 the Limn Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Depictor resolution and installed instances.
//!
//! [`DepictorRegistry`] maps kind (and capability) names to depictor
//! factories. Resolution walks a kind's lineage most-specific-first and is
//! memoized per kind identity in a race-tolerant cache: the winning entry is
//! a pure function of the `'static` descriptor, so two threads racing to
//! compute it converge on the same value and the overwrite is harmless.
//!
//! [`DepictorSet`] holds the installed depictor instance per live component
//! and drives the three-phase render of a subtree.

use core::fmt;

use hashbrown::HashMap;
use parking_lot::RwLock;

use limn_model::{Component, ComponentTree, DepictId, KindKey};

use crate::context::DepictContext;
use crate::depictor::Depictor;
use crate::error::DepictError;

/// A factory producing fresh depictor instances.
pub type DepictorFactory = Box<dyn Fn() -> Box<dyn Depictor> + Send + Sync>;

/// Maps kind names to depictor factories, with memoized lineage resolution.
pub struct DepictorRegistry {
    factories: HashMap<&'static str, DepictorFactory>,
    memo: RwLock<HashMap<KindKey, &'static str>>,
}

impl fmt::Debug for DepictorRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut names: Vec<_> = self.factories.keys().collect();
        names.sort();
        f.debug_struct("DepictorRegistry")
            .field("kinds", &names)
            .finish_non_exhaustive()
    }
}

impl Default for DepictorRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl DepictorRegistry {
    /// Creates an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self {
            factories: HashMap::new(),
            memo: RwLock::new(HashMap::new()),
        }
    }

    /// Creates a registry with the built-in depictors registered.
    #[must_use]
    pub fn standard() -> Self {
        let mut registry = Self::new();
        crate::builtin::register_standard(&mut registry);
        registry
    }

    /// Registers a factory for a kind or capability name.
    ///
    /// A later registration for the same name replaces the earlier one. The
    /// resolution memo is cleared, since a cached lineage decision may no
    /// longer be the most specific.
    pub fn register(
        &mut self,
        name: &'static str,
        factory: impl Fn() -> Box<dyn Depictor> + Send + Sync + 'static,
    ) {
        self.factories.insert(name, Box::new(factory));
        self.memo.get_mut().clear();
    }

    /// Resolves the most specific registered name for a kind's lineage.
    ///
    /// Memoized per kind identity; computed at most once per kind under
    /// normal operation.
    pub fn resolve(
        &self,
        kind: &'static limn_model::ComponentKind,
    ) -> Result<&'static str, DepictError> {
        let key = kind.key();
        if let Some(name) = self.memo.read().get(&key) {
            return Ok(name);
        }
        let name = kind
            .lineage
            .iter()
            .copied()
            .find(|name| self.factories.contains_key(name))
            .ok_or(DepictError::Unregistered(kind.name))?;
        self.memo.write().insert(key, name);
        Ok(name)
    }

    /// Creates a fresh depictor for a kind.
    pub fn create(
        &self,
        kind: &'static limn_model::ComponentKind,
    ) -> Result<Box<dyn Depictor>, DepictError> {
        let name = self.resolve(kind)?;
        let factory = self
            .factories
            .get(name)
            .expect("resolve only returns registered names");
        Ok(factory())
    }
}

/// The installed depictor instance for each live component.
///
/// A depictor is bound to exactly one component at a time; install and
/// uninstall fire the lifecycle hooks. `DepictorSet` is also the render
/// driver: [`depict`](Self::depict) renders a component subtree with the
/// installed instances.
#[derive(Debug, Default)]
pub struct DepictorSet {
    installed: HashMap<DepictId, Box<dyn Depictor>>,
}

impl DepictorSet {
    /// Creates an empty set.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Resolves and installs a depictor for `component`.
    ///
    /// A missing registration is a configuration error surfaced here, at
    /// installation time, never at render time. Any previously installed
    /// depictor is uninstalled first.
    pub fn install(
        &mut self,
        registry: &DepictorRegistry,
        component: &Component,
    ) -> Result<(), DepictError> {
        let mut depictor = registry.create(component.kind())?;
        self.uninstall(component.id());
        depictor.installed(component);
        self.installed.insert(component.id(), depictor);
        Ok(())
    }

    /// Uninstalls the depictor for `id`, if one is installed.
    pub fn uninstall(&mut self, id: DepictId) {
        if let Some(mut depictor) = self.installed.remove(&id) {
            depictor.uninstalled();
        }
    }

    /// Returns `true` if `id` has an installed depictor.
    #[must_use]
    pub fn is_installed(&self, id: DepictId) -> bool {
        self.installed.contains_key(&id)
    }

    /// Renders the subtree rooted at `id` through the three-phase contract.
    ///
    /// `depict_end` always runs once `depict_begin` succeeded, so elements
    /// opened in the begin phase are closed even when the body phase fails.
    pub fn depict(
        &mut self,
        cx: &mut DepictContext,
        tree: &ComponentTree,
        id: DepictId,
    ) -> Result<(), DepictError> {
        if !tree.contains(id) {
            return Err(DepictError::MissingComponent(id));
        }
        let mut depictor = self
            .installed
            .remove(&id)
            .ok_or(DepictError::NotInstalled(id))?;
        let result = match depictor.depict_begin(cx, tree, id) {
            Ok(()) => {
                let body = depictor.depict_body(cx, tree, self, id);
                let end = depictor.depict_end(cx, tree, id);
                body.and(end)
            }
            Err(err) => Err(err),
        };
        self.installed.insert(id, depictor);
        result
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::context::XHTML_NS;
    use limn_model::{ComponentKind, ComponentTree, FRAME, PANEL, TEXT_CONTROL};

    #[derive(Debug, Default)]
    struct Probe {
        installs: usize,
    }

    impl Depictor for Probe {
        fn installed(&mut self, _component: &Component) {
            self.installs += 1;
        }

        fn depict_begin(
            &mut self,
            cx: &mut DepictContext,
            _tree: &ComponentTree,
            _id: DepictId,
        ) -> Result<(), DepictError> {
            cx.start_element(XHTML_NS, "div")
        }

        fn depict_end(
            &mut self,
            cx: &mut DepictContext,
            _tree: &ComponentTree,
            _id: DepictId,
        ) -> Result<(), DepictError> {
            cx.end_element()
        }
    }

    fn probe_registry() -> DepictorRegistry {
        let mut registry = DepictorRegistry::new();
        registry.register("component", || Box::new(Probe::default()));
        registry
    }

    #[test]
    fn resolution_walks_lineage_to_most_specific() {
        let mut registry = probe_registry();
        registry.register("control", || Box::new(Probe::default()));

        // text-control has no direct registration; "control" beats
        // "component" because it is more specific.
        assert_eq!(registry.resolve(&TEXT_CONTROL).unwrap(), "control");
        assert_eq!(registry.resolve(&PANEL).unwrap(), "component");
    }

    #[test]
    fn resolution_is_memoized_and_stable() {
        let registry = probe_registry();
        let first = registry.resolve(&TEXT_CONTROL).unwrap();
        let second = registry.resolve(&TEXT_CONTROL).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn registration_invalidates_memo() {
        let mut registry = probe_registry();
        assert_eq!(registry.resolve(&TEXT_CONTROL).unwrap(), "component");
        registry.register("text-control", || Box::new(Probe::default()));
        assert_eq!(registry.resolve(&TEXT_CONTROL).unwrap(), "text-control");
    }

    #[test]
    fn unregistered_kind_fails_at_install_time() {
        static ALIEN: ComponentKind = ComponentKind {
            name: "alien",
            lineage: &["alien"],
        };
        let registry = probe_registry();
        let mut tree = ComponentTree::new(&FRAME);
        let id = tree.insert(tree.root(), &ALIEN).unwrap();
        let mut set = DepictorSet::new();
        let err = set
            .install(&registry, tree.get(id).unwrap())
            .unwrap_err();
        assert_eq!(err, DepictError::Unregistered("alien"));
        assert!(!set.is_installed(id));
    }

    #[test]
    fn depict_requires_installation() {
        let tree = ComponentTree::new(&FRAME);
        let mut set = DepictorSet::new();
        let mut cx = DepictContext::new();
        let err = set.depict(&mut cx, &tree, tree.root()).unwrap_err();
        assert_eq!(err, DepictError::NotInstalled(tree.root()));
    }

    #[test]
    fn depict_recurses_children() {
        let registry = probe_registry();
        let mut tree = ComponentTree::new(&FRAME);
        let child = tree.insert(tree.root(), &PANEL).unwrap();
        let mut set = DepictorSet::new();
        set.install(&registry, tree.get(tree.root()).unwrap()).unwrap();
        set.install(&registry, tree.get(child).unwrap()).unwrap();

        let mut cx = DepictContext::new();
        set.depict(&mut cx, &tree, tree.root()).unwrap();
        assert_eq!(cx.finish().unwrap(), "<div>\n\t<div/>\n</div>");
    }
}
