// Copyright 2026 the Limn Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The per-session orchestration state and the AJAX cycle.

use core::fmt;

use parking_lot::{Mutex, MutexGuard};
use tracing::{debug, trace};

use limn_depict::{DepictContext, DepictorRegistry, DepictorSet};
use limn_dirty::ChangeLog;
use limn_model::{Component, ComponentKind, ComponentTree, DepictId, FRAME};
use limn_wire::{ActionEvent, ControlEvent, DropEvent, InitEvent, MouseEvent, ResponseEnvelope};

use crate::cookies::{Environment, SetCookie, reconcile_cookies};
use crate::error::SessionError;

/// A navigation requested during event processing.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Navigation {
    /// The destination URI.
    pub uri: String,
    /// The viewport to load into, when not the whole window.
    pub viewport: Option<String>,
    /// Whether this navigation is modal: until a request arrives at the
    /// destination, other requests are redirected there.
    pub modal: bool,
}

/// One AJAX request.
#[derive(Clone, Copy, Debug)]
pub struct AjaxRequest<'a> {
    /// The request path.
    pub path: &'a str,
    /// The cookies the request carried.
    pub cookies: &'a [(String, String)],
    /// The posted event document.
    pub document: &'a str,
}

/// The response to an AJAX request.
#[derive(Clone, Debug)]
pub struct AjaxResponse {
    /// Cookie headers, computed strictly before the envelope.
    pub cookies: Vec<SetCookie>,
    /// The encoded response envelope.
    pub body: String,
}

/// Application behavior attached to a session.
///
/// The session resolves event targets and delivers each event exactly once;
/// what an action or gesture *means* belongs to the application. All hooks
/// default to no-ops.
pub trait Delegate: Send {
    /// An action fired on a live component. Returning a [`Navigation`]
    /// requests a redirect instead of patches for this request.
    fn on_action(
        &mut self,
        _tree: &mut ComponentTree,
        _log: &mut ChangeLog<DepictId>,
        _event: &ActionEvent,
    ) -> Option<Navigation> {
        None
    }

    /// A completed drag and drop between live, capable components.
    fn on_drop(
        &mut self,
        _tree: &mut ComponentTree,
        _log: &mut ChangeLog<DepictId>,
        _event: &DropEvent,
    ) {
    }

    /// A pointer crossing on a live mouse listener.
    fn on_mouse(
        &mut self,
        _tree: &mut ComponentTree,
        _log: &mut ChangeLog<DepictId>,
        _event: &MouseEvent,
    ) {
    }
}

/// One user session: the live component tree and everything that
/// synchronizes it with the client.
///
/// All mutation runs under the owning [`SessionHandle`]'s lock; the session
/// itself carries no internal synchronization.
pub struct Session {
    pub(crate) tree: ComponentTree,
    pub(crate) log: ChangeLog<DepictId>,
    pub(crate) environment: Environment,
    pub(crate) registry: DepictorRegistry,
    pub(crate) depictors: DepictorSet,
    pub(crate) pending: Option<Navigation>,
    pub(crate) modal: Option<Navigation>,
    pub(crate) delegate: Option<Box<dyn Delegate>>,
    pub(crate) client: Option<InitEvent>,
    pub(crate) stylesheets: Vec<String>,
}

impl fmt::Debug for Session {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Session")
            .field("tree", &self.tree)
            .field("log", &self.log)
            .field("environment", &self.environment)
            .field("pending", &self.pending)
            .field("modal", &self.modal)
            .field("client", &self.client)
            .finish_non_exhaustive()
    }
}

impl Default for Session {
    fn default() -> Self {
        Self::new()
    }
}

impl Session {
    /// Creates a session with the built-in depictors and a root application
    /// frame.
    #[must_use]
    pub fn new() -> Self {
        Self::with_registry(DepictorRegistry::standard())
    }

    /// Creates a session with a custom depictor registry.
    ///
    /// # Panics
    ///
    /// Panics if the registry has no depictor for the root frame kind; a
    /// registry that cannot render the root is a configuration error.
    #[must_use]
    pub fn with_registry(registry: DepictorRegistry) -> Self {
        let tree = ComponentTree::new(&FRAME);
        let mut depictors = DepictorSet::new();
        depictors
            .install(&registry, tree.get(tree.root()).expect("root exists"))
            .expect("registry must cover the root frame kind");
        Self {
            tree,
            log: ChangeLog::new(),
            environment: Environment::new(),
            registry,
            depictors,
            pending: None,
            modal: None,
            delegate: None,
            client: None,
            stylesheets: Vec::new(),
        }
    }

    /// The root application frame's id.
    #[must_use]
    pub fn root(&self) -> DepictId {
        self.tree.root()
    }

    /// Read access to the live tree.
    #[must_use]
    pub fn tree(&self) -> &ComponentTree {
        &self.tree
    }

    /// The session environment, mirrored to cookies on full-page responses.
    #[must_use]
    pub fn environment(&self) -> &Environment {
        &self.environment
    }

    /// Mutable access to the session environment.
    pub fn environment_mut(&mut self) -> &mut Environment {
        &mut self.environment
    }

    /// The client capabilities announced by the last init event, if any.
    #[must_use]
    pub fn client(&self) -> Option<&InitEvent> {
        self.client.as_ref()
    }

    /// Attaches the application delegate.
    pub fn set_delegate(&mut self, delegate: Box<dyn Delegate>) {
        self.delegate = Some(delegate);
    }

    /// Adds a stylesheet link to full-page responses.
    pub fn add_stylesheet(&mut self, href: impl Into<String>) {
        self.stylesheets.push(href.into());
    }

    /// Creates a component of `kind` under `parent` and installs its
    /// depictor.
    ///
    /// The parent is marked dirty: its rendered body changed.
    pub fn insert(
        &mut self,
        parent: DepictId,
        kind: &'static ComponentKind,
    ) -> Result<DepictId, SessionError> {
        let id = self.tree.insert(parent, kind)?;
        self.depictors
            .install(&self.registry, self.tree.get(id).ok_or_else(|| {
                limn_model::TreeError::MissingComponent(id)
            })?)?;
        self.log.mark(parent);
        Ok(id)
    }

    /// Creates a top-level frame of `kind` and installs its depictor.
    ///
    /// The frame itself is marked dirty so it reaches the client as one
    /// patch; the root is left alone.
    pub fn insert_frame(
        &mut self,
        kind: &'static ComponentKind,
    ) -> Result<DepictId, SessionError> {
        let id = self.tree.insert_frame(kind);
        self.depictors
            .install(&self.registry, self.tree.get(id).ok_or_else(|| {
                limn_model::TreeError::MissingComponent(id)
            })?)?;
        self.log.mark(id);
        Ok(id)
    }

    /// Detaches a subtree, uninstalling depictors and scrubbing the change
    /// log. The parent is marked dirty.
    pub fn detach(&mut self, id: DepictId) -> Result<(), SessionError> {
        let parent = self.tree.parent(id);
        let retired = self.tree.detach(id)?;
        for gone in retired {
            self.depictors.uninstall(gone);
            self.log.remove_key(gone);
        }
        if let Some(parent) = parent {
            self.log.mark(parent);
        }
        Ok(())
    }

    /// Mutates a component through `f`; `f` reports whether observable state
    /// changed, and a change marks the component dirty.
    pub fn modify(
        &mut self,
        id: DepictId,
        f: impl FnOnce(&mut Component) -> bool,
    ) -> Result<bool, SessionError> {
        let component = self
            .tree
            .get_mut(id)
            .ok_or(limn_model::TreeError::MissingComponent(id))?;
        let changed = f(component);
        if changed {
            self.log.mark(id);
        }
        Ok(changed)
    }

    /// Marks a component dirty unconditionally.
    pub fn mark(&mut self, id: DepictId) {
        self.log.mark(id);
    }

    /// Opens a frame; it is marked dirty so the client receives it in full.
    pub fn open_frame(&mut self, id: DepictId) -> Result<(), SessionError> {
        self.modify(id, |c| {
            let changed = !c.frame_open;
            c.frame_open = true;
            c.visible = true;
            changed
        })?;
        Ok(())
    }

    /// Closes a frame; the next AJAX cycle emits a remove directive for it.
    pub fn close_frame(&mut self, id: DepictId) -> Result<(), SessionError> {
        let component = self
            .tree
            .get_mut(id)
            .ok_or(limn_model::TreeError::MissingComponent(id))?;
        component.frame_open = false;
        component.visible = false;
        Ok(())
    }

    /// Requests a navigation; the current request answers with a navigate
    /// directive instead of patches.
    pub fn request_navigation(&mut self, uri: impl Into<String>, viewport: Option<String>, modal: bool) {
        self.pending = Some(Navigation {
            uri: uri.into(),
            viewport,
            modal,
        });
    }

    /// Handles one AJAX request under the session lock.
    ///
    /// The request path is compared against an active modal navigation;
    /// cookie reconciliation runs before the envelope is built, since cookie
    /// headers cannot follow content. The change log drains only if the
    /// envelope serializes; any failure leaves every dirty component dirty
    /// for the next cycle.
    pub fn handle_ajax(&mut self, request: &AjaxRequest<'_>) -> Result<AjaxResponse, SessionError> {
        if let Some(modal) = &self.modal {
            if request.path != modal.uri {
                debug!(requested = %request.path, canonical = %modal.uri, "redirecting stale request during modal navigation");
                let mut envelope = ResponseEnvelope::new();
                envelope.navigate(modal.uri.clone(), modal.viewport.clone());
                return Ok(AjaxResponse {
                    cookies: Vec::new(),
                    body: envelope.encode()?,
                });
            }
            // The client reached the modal destination.
            self.modal = None;
        }

        let cookies = reconcile_cookies(&self.environment, request.cookies);

        let snapshot = self.tree.open_frames();
        let events = limn_wire::decode_events(request.document)?;
        trace!(events = events.len(), "dispatching event batch");
        let mut saw_init = false;
        for event in &events {
            if matches!(event, ControlEvent::Init(_)) {
                saw_init = true;
            }
            self.dispatch(event);
        }

        if let Some(nav) = self.pending.take() {
            let mut envelope = ResponseEnvelope::new();
            envelope.navigate(nav.uri.clone(), nav.viewport.clone());
            if nav.modal {
                self.modal = Some(nav);
            }
            return Ok(AjaxResponse {
                cookies,
                body: envelope.encode()?,
            });
        }

        if saw_init {
            // After a reload the client has no knowledge of open frames or
            // of transient flyovers left over from the previous page.
            for flyover in self.tree.open_flyover_frames() {
                self.close_frame(flyover)?;
            }
            for frame in self.tree.open_frames() {
                self.log.mark(frame);
            }
        }

        let open_now = self.tree.open_frames();
        let removed: Vec<DepictId> = snapshot
            .into_iter()
            .filter(|frame| !open_now.contains(frame))
            .collect();

        let mut envelope = ResponseEnvelope::new();
        let mut patched = Vec::new();
        if self.log.is_dirty(self.tree.root()) {
            // A structural change at the root cannot be expressed as
            // fragment patches.
            trace!("root frame dirty, emitting whole-page reload");
            envelope.reload();
        } else {
            let dirty = self.collect_dirty();
            for id in dirty {
                let markup = self.depict_fragment(id)?;
                let no_value = self.subtree_value_patch_suppressed(id);
                trace!(component = %id, no_value, "emitting patch fragment");
                envelope.patch(markup, no_value);
                patched.push(id);
            }
            for frame in removed {
                trace!(frame = %frame, "emitting remove directive");
                envelope.remove(frame);
            }
        }

        let drain = self.log.begin_drain();
        let body = envelope.encode()?;
        drain.commit();

        for id in patched {
            for member in self.tree.descendants(id) {
                if let Some(component) = self.tree.get_mut(member) {
                    component.clear_value_patch_suppressed();
                }
            }
        }
        Ok(AjaxResponse { cookies, body })
    }

    /// Collects dirty components in tree-walk discovery order.
    ///
    /// The walk does not descend into a dirty component: a dirty ancestor's
    /// freshly rendered body already contains up-to-date descendants.
    /// Closed frames are skipped entirely.
    fn collect_dirty(&self) -> Vec<DepictId> {
        let mut out = Vec::new();
        self.walk_dirty(self.tree.root(), &mut out);
        out
    }

    fn walk_dirty(&self, id: DepictId, out: &mut Vec<DepictId>) {
        let Some(component) = self.tree.get(id) else {
            return;
        };
        if component.kind().is_frame() && !component.frame_open {
            return;
        }
        if self.log.is_dirty(id) {
            out.push(id);
            return;
        }
        for child in self.tree.children(id) {
            self.walk_dirty(*child, out);
        }
    }

    /// Renders one component subtree as a self-describing patch fragment.
    pub(crate) fn depict_fragment(&mut self, id: DepictId) -> Result<String, SessionError> {
        self.ensure_installed(id)?;
        let mut cx = DepictContext::fragment();
        self.depictors.depict(&mut cx, &self.tree, id)?;
        Ok(cx.finish()?)
    }

    /// Installs depictors for any subtree members that lack one, e.g.
    /// components a delegate inserted through raw tree access.
    pub(crate) fn ensure_installed(&mut self, id: DepictId) -> Result<(), SessionError> {
        for member in self.tree.descendants(id) {
            if self.depictors.is_installed(member) {
                continue;
            }
            if let Some(component) = self.tree.get(member) {
                self.depictors.install(&self.registry, component)?;
            }
        }
        Ok(())
    }

    fn subtree_value_patch_suppressed(&self, id: DepictId) -> bool {
        self.tree
            .descendants(id)
            .iter()
            .any(|member| {
                self.tree
                    .get(*member)
                    .is_some_and(Component::value_patch_suppressed)
            })
    }
}

/// A session behind its coarse per-session lock.
///
/// One request-handling thread at a time processes a session; the guard is
/// held for the whole request and released unconditionally when it drops,
/// on completion or error alike.
#[derive(Debug)]
pub struct SessionHandle {
    inner: Mutex<Session>,
}

impl SessionHandle {
    /// Wraps a session in its lock.
    #[must_use]
    pub fn new(session: Session) -> Self {
        Self {
            inner: Mutex::new(session),
        }
    }

    /// Acquires the session for one whole request.
    pub fn lock(&self) -> MutexGuard<'_, Session> {
        self.inner.lock()
    }
}
