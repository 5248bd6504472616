//! Modal context: registry, pending-waiter tables, and the store slot
//!
//! The context is the imperative surface callers talk to. It owns the
//! component registry and the two waiter tables (show outcomes and hide
//! acknowledgements), and it holds the store slot a [`crate::ModalHost`]
//! attaches to. All methods take `&self`; the context is cheap to clone and
//! safe to share across tasks.
//!
//! Protocol, in dispatch order:
//! - `show`: dispatch the show action, then hand out the pending show future
//!   for that id, creating it when absent. Repeat shows return the same
//!   future until it settles or the modal is hidden.
//! - `hide`: dispatch the hide action, drop any unsettled show waiter (its
//!   futures stay pending forever), then hand out the pending hide future.
//! - `remove`: dispatch the remove action and drop both waiters.

use crate::component::ModalComponent;
use crate::deferred::{Deferred, HideFuture, ShowFuture};
use crate::error::{ModalError, ModalOutcome};
use crate::handle::ModalHandle;
use crate::id::{ComponentRef, ModalId, ModalRef};
use crate::registry::ComponentRegistry;
use crate::store::{ModalAction, ModalMap, ModalState, Store};
use serde_json::Value;
use std::collections::HashMap;
use std::sync::{Arc, Mutex, RwLock};
use tokio::sync::watch;
use tracing::debug;

/// Behaviour switches for a context
#[derive(Debug, Clone, Default)]
pub struct ContextOptions {
    /// Make `hide_with_reject` settle the show future as an error.
    ///
    /// Off by default: historically it settled through the resolve path,
    /// and callers may rely on that.
    pub reject_on_hide_with_reject: bool,
}

struct ContextInner {
    registry: RwLock<ComponentRegistry>,
    show_waiters: Mutex<HashMap<ModalId, Deferred<ModalOutcome>>>,
    hide_waiters: Mutex<HashMap<ModalId, Deferred<()>>>,
    store: RwLock<Option<Store>>,
    options: ContextOptions,
}

/// Shared orchestration state behind every handle and host
#[derive(Clone)]
pub struct ModalContext {
    inner: Arc<ContextInner>,
}

impl Default for ModalContext {
    fn default() -> Self {
        Self::new()
    }
}

impl ModalContext {
    pub fn new() -> Self {
        Self::with_options(ContextOptions::default())
    }

    pub fn with_options(options: ContextOptions) -> Self {
        Self {
            inner: Arc::new(ContextInner {
                registry: RwLock::new(ComponentRegistry::new()),
                show_waiters: Mutex::new(HashMap::new()),
                hide_waiters: Mutex::new(HashMap::new()),
                store: RwLock::new(None),
                options,
            }),
        }
    }

    /// Registers a component under an explicit id
    ///
    /// Re-registering an id only replaces its default args; the original
    /// definition stays in place.
    pub fn register(
        &self,
        id: impl Into<ModalId>,
        component: impl ModalComponent + 'static,
        default_args: Value,
    ) {
        let id = id.into();
        debug!("registering modal {}", id);
        self.inner
            .registry
            .write()
            .unwrap()
            .register(id, Arc::new(component), default_args);
    }

    /// Removes a registration; unknown ids are ignored
    pub fn unregister(&self, id: impl Into<ModalId>) {
        let id = id.into();
        self.inner.registry.write().unwrap().unregister(&id);
    }

    pub fn is_registered(&self, id: &ModalId) -> bool {
        self.inner.registry.read().unwrap().contains(id)
    }

    /// A handle bound to the resolved id of `modal`
    pub fn handle(&self, modal: impl Into<ModalRef>) -> ModalHandle {
        ModalHandle::new(self.clone(), modal.into().resolve_id())
    }

    /// Shows a modal and returns the awaitable for its outcome
    ///
    /// Component refs that were never registered are registered here under
    /// their generated id. The returned future settles when the modal calls
    /// resolve or reject; hiding the modal first abandons it instead.
    pub fn show(
        &self,
        modal: impl Into<ModalRef>,
        args: Value,
    ) -> Result<ShowFuture, ModalError> {
        let modal = modal.into();
        let id = modal.resolve_id();
        if let ModalRef::Component(component) = &modal {
            self.ensure_registered(&id, component);
        }
        self.dispatch(ModalAction::Show {
            id: id.clone(),
            args,
        })?;

        let mut waiters = self.inner.show_waiters.lock().unwrap();
        let deferred = waiters.entry(id).or_insert_with(Deferred::new);
        Ok(deferred.future())
    }

    /// Hides a modal and returns the awaitable for hide acknowledgement
    ///
    /// Any unsettled show future for this id is abandoned: its clones stay
    /// pending forever rather than resolving or erroring.
    pub fn hide(&self, modal: impl Into<ModalRef>) -> Result<HideFuture, ModalError> {
        let id = modal.into().resolve_id();
        self.dispatch(ModalAction::Hide { id: id.clone() })?;
        self.inner.show_waiters.lock().unwrap().remove(&id);

        let mut waiters = self.inner.hide_waiters.lock().unwrap();
        let deferred = waiters.entry(id).or_insert_with(Deferred::new);
        Ok(deferred.future())
    }

    /// Unmounts a modal entirely, dropping its state and both waiters
    pub fn remove(&self, modal: impl Into<ModalRef>) -> Result<(), ModalError> {
        let id = modal.into().resolve_id();
        self.dispatch(ModalAction::Remove { id: id.clone() })?;
        self.inner.show_waiters.lock().unwrap().remove(&id);
        self.inner.hide_waiters.lock().unwrap().remove(&id);
        Ok(())
    }

    /// Current state of one modal, `None` when untracked or no host is up
    pub fn state_of(&self, id: &ModalId) -> Option<ModalState> {
        let store = self.inner.store.read().unwrap();
        store.as_ref().and_then(|store| store.state_of(id))
    }

    /// Snapshot of every tracked modal; empty when no host is mounted
    pub fn modals(&self) -> ModalMap {
        let store = self.inner.store.read().unwrap();
        store
            .as_ref()
            .map(|store| store.snapshot())
            .unwrap_or_default()
    }

    /// Watches store updates; fails when no host is mounted
    pub fn subscribe(&self) -> Result<watch::Receiver<ModalMap>, ModalError> {
        let store = self.inner.store.read().unwrap();
        store
            .as_ref()
            .map(|store| store.subscribe())
            .ok_or(ModalError::HostNotMounted)
    }

    fn ensure_registered(&self, id: &ModalId, component: &ComponentRef) {
        let mut registry = self.inner.registry.write().unwrap();
        if !registry.contains(id) {
            debug!("registering modal {} from component ref", id);
            registry.register(id.clone(), component.definition(), Value::Null);
        }
    }

    fn dispatch(&self, action: ModalAction) -> Result<(), ModalError> {
        let store = self.inner.store.read().unwrap();
        match store.as_ref() {
            Some(store) => {
                store.dispatch(action);
                Ok(())
            }
            None => Err(ModalError::HostNotMounted),
        }
    }

    /// Settles the pending show future and retires its waiter
    ///
    /// Later rejects or resolves for the same id are no-ops until a new
    /// show creates a fresh waiter.
    pub(crate) fn settle_show(&self, id: &ModalId, outcome: ModalOutcome) {
        let waiter = self.inner.show_waiters.lock().unwrap().remove(id);
        match waiter {
            Some(waiter) => {
                waiter.settle(outcome);
            }
            None => debug!("no pending show waiter for {}", id),
        }
    }

    /// Settles the pending hide future and retires its waiter
    pub(crate) fn settle_hide(&self, id: &ModalId) {
        let waiter = self.inner.hide_waiters.lock().unwrap().remove(id);
        if let Some(waiter) = waiter {
            waiter.settle(());
        }
    }

    pub(crate) fn definition_of(&self, id: &ModalId) -> Option<Arc<dyn ModalComponent>> {
        self.inner.registry.read().unwrap().definition(id)
    }

    pub(crate) fn default_args_of(&self, id: &ModalId) -> Value {
        self.inner.registry.read().unwrap().default_args(id)
    }

    pub(crate) fn options(&self) -> &ContextOptions {
        &self.inner.options
    }

    /// Attaches a fresh store for a host, handing back its update channel
    pub(crate) fn attach_store(&self) -> Result<watch::Receiver<ModalMap>, ModalError> {
        let mut slot = self.inner.store.write().unwrap();
        if slot.is_some() {
            return Err(ModalError::HostAlreadyMounted);
        }
        let store = Store::new();
        let updates = store.subscribe();
        *slot = Some(store);
        Ok(updates)
    }

    pub(crate) fn detach_store(&self) {
        *self.inner.store.write().unwrap() = None;
    }
}

impl std::fmt::Debug for ModalContext {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ModalContext")
            .field("modals", &self.modals().len())
            .finish()
    }
}
