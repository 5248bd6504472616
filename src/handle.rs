//! Per-modal controller bound to one id
//!
//! A [`ModalHandle`] is what a modal implementation (and anything else that
//! wants to drive a specific modal) uses: state getters backed by the store,
//! lifecycle methods re-dispatching through the context, and the settle
//! methods that complete the awaitable returned by show.

use crate::context::ModalContext;
use crate::deferred::{HideFuture, ShowFuture};
use crate::error::{ModalError, Rejected};
use crate::id::ModalId;
use crate::store::ModalState;
use serde_json::Value;

/// Controller for a single modal id
#[derive(Clone)]
pub struct ModalHandle {
    context: ModalContext,
    id: ModalId,
}

impl ModalHandle {
    pub(crate) fn new(context: ModalContext, id: ModalId) -> Self {
        Self { context, id }
    }

    pub fn id(&self) -> &ModalId {
        &self.id
    }

    pub fn context(&self) -> &ModalContext {
        &self.context
    }

    fn state(&self) -> Option<ModalState> {
        self.context.state_of(&self.id)
    }

    pub fn visible(&self) -> bool {
        self.state().map(|state| state.visible).unwrap_or(false)
    }

    pub fn should_mount(&self) -> bool {
        self.state().map(|state| state.should_mount).unwrap_or(false)
    }

    /// Args from the most recent show, `Null` when untracked
    pub fn args(&self) -> Value {
        self.state().map(|state| state.args).unwrap_or(Value::Null)
    }

    /// Registered default args overlaid with the current show args
    ///
    /// Objects merge shallowly and show args win per key. Show args that
    /// carry no keys (`Null` or scalars) leave object defaults untouched;
    /// [`ModalHandle::args`] still returns them raw.
    pub fn params(&self) -> Value {
        merge_args(&self.context.default_args_of(&self.id), &self.args())
    }

    /// Re-shows this modal with its current args
    ///
    /// The host uses this to flip freshly mounted modals visible; callers
    /// can use it to bring a hidden modal back without changing args.
    pub fn show(&self) -> Result<ShowFuture, ModalError> {
        self.context.show(self.id.clone(), self.args())
    }

    /// Shows this modal with new args
    pub fn show_with(&self, args: Value) -> Result<ShowFuture, ModalError> {
        self.context.show(self.id.clone(), args)
    }

    pub fn hide(&self) -> Result<HideFuture, ModalError> {
        self.context.hide(self.id.clone())
    }

    pub fn remove(&self) -> Result<(), ModalError> {
        self.context.remove(self.id.clone())
    }

    /// Settles the pending show future with a value
    pub fn resolve(&self, value: Value) {
        self.context.settle_show(&self.id, Ok(value));
    }

    /// Settles the pending show future with a rejection
    pub fn reject(&self, error: Value) {
        self.context.settle_show(&self.id, Err(Rejected(error)));
    }

    /// Acknowledges that hiding finished, settling the pending hide future
    pub fn resolve_hide(&self) {
        self.context.settle_hide(&self.id);
    }

    /// Resolves the show future, then hides
    pub fn hide_with_resolve(&self, value: Value) -> Result<HideFuture, ModalError> {
        self.resolve(value);
        self.hide()
    }

    /// Settles the show future, then hides
    ///
    /// With default options this settles through the resolve path exactly
    /// like [`ModalHandle::hide_with_resolve`]. Enable
    /// [`crate::ContextOptions::reject_on_hide_with_reject`] to get a real
    /// rejection instead.
    pub fn hide_with_reject(&self, error: Value) -> Result<HideFuture, ModalError> {
        if self.context.options().reject_on_hide_with_reject {
            self.reject(error);
        } else {
            self.resolve(error);
        }
        self.hide()
    }
}

impl std::fmt::Debug for ModalHandle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ModalHandle").field("id", &self.id).finish()
    }
}

fn merge_args(defaults: &Value, args: &Value) -> Value {
    match (defaults, args) {
        (_, Value::Null) => defaults.clone(),
        (Value::Object(defaults), Value::Object(args)) => {
            let mut merged = defaults.clone();
            for (key, value) in args {
                merged.insert(key.clone(), value.clone());
            }
            Value::Object(merged)
        }
        // Keyless args have nothing to overlay onto keyed defaults.
        (Value::Object(_), _) => defaults.clone(),
        _ => args.clone(),
    }
}
