//! Imperative, awaitable modal dialogs for ratatui applications
//!
//! Modals register once under an id (or carry their own identity via
//! [`ComponentRef`]) and are then driven imperatively from anywhere in the
//! app: `show` returns a future that settles when the modal resolves or
//! rejects itself, so opening a dialog and reading its answer is a single
//! `.await`. Hiding a modal without an answer abandons the future instead
//! of failing it.
//!
//! The moving parts:
//! - [`ModalContext`] owns the registry, the pending futures, and the store
//! - [`ModalHost`] attaches to a context, draws visible modals, routes keys
//! - [`ModalHandle`] is the per-modal controller given to implementations
//!
//! ```no_run
//! use ratatui::{backend::CrosstermBackend, Terminal};
//! use serde_json::json;
//! use summon::{ModalContext, ModalHost};
//!
//! # async fn run() -> anyhow::Result<()> {
//! let context = ModalContext::new();
//! let mut host = ModalHost::new(context.clone())?;
//!
//! // Anywhere in the app: open a dialog and await its answer.
//! let answer = context.show("confirm", json!({"msg": "Quit?"}))?;
//!
//! // In the render loop: draw the app, then the modal layer on top.
//! let mut terminal = Terminal::new(CrosstermBackend::new(std::io::stdout()))?;
//! terminal.draw(|frame| {
//!     let area = frame.size();
//!     host.render(frame, area);
//! })?;
//!
//! if let Ok(_value) = answer.await {
//!     // user confirmed
//! }
//! # Ok(())
//! # }
//! ```

mod component;
mod context;
mod deferred;
mod error;
mod handle;
mod host;
mod id;
mod registry;
mod store;

pub mod adapters;

pub use component::ModalComponent;
pub use context::{ContextOptions, ModalContext};
pub use deferred::{HideFuture, ModalFuture, ShowFuture};
pub use error::{ModalError, ModalOutcome, Rejected};
pub use handle::ModalHandle;
pub use host::ModalHost;
pub use id::{ComponentRef, ModalId, ModalRef};
pub use store::{ModalMap, ModalState};

use serde_json::Value;
use std::sync::OnceLock;

static GLOBAL_CONTEXT: OnceLock<ModalContext> = OnceLock::new();

/// The process-wide context behind the module-level functions
///
/// Apps that want isolation (or several contexts) can skip this and pass
/// their own [`ModalContext`] around instead.
pub fn global() -> &'static ModalContext {
    GLOBAL_CONTEXT.get_or_init(ModalContext::new)
}

/// Shows a modal on the global context
pub fn show(modal: impl Into<ModalRef>, args: Value) -> Result<ShowFuture, ModalError> {
    global().show(modal, args)
}

/// Hides a modal on the global context
pub fn hide(modal: impl Into<ModalRef>) -> Result<HideFuture, ModalError> {
    global().hide(modal)
}

/// Removes a modal from the global context
pub fn remove(modal: impl Into<ModalRef>) -> Result<(), ModalError> {
    global().remove(modal)
}

/// Registers a component on the global context
pub fn register(
    id: impl Into<ModalId>,
    component: impl ModalComponent + 'static,
    default_args: Value,
) {
    global().register(id, component, default_args)
}

/// Unregisters an id from the global context
pub fn unregister(id: impl Into<ModalId>) {
    global().unregister(id)
}

/// A handle bound to `modal` on the global context
pub fn handle(modal: impl Into<ModalRef>) -> ModalHandle {
    global().handle(modal)
}

#[cfg(test)]
mod tests {
    use super::*;
    use ratatui::{layout::Rect, Frame};
    use serde_json::json;

    struct Blank;

    impl ModalComponent for Blank {
        fn render(&self, _handle: &ModalHandle, _frame: &mut Frame, _area: Rect) {}
    }

    #[test]
    fn the_global_context_is_a_singleton() {
        assert!(std::ptr::eq(global(), global()));
    }

    // The only test that mounts a host on the global context; everything
    // else uses its own context so tests stay independent.
    #[tokio::test]
    async fn module_level_functions_drive_the_global_context() {
        let host = ModalHost::global().unwrap();
        register("global-confirm", Blank, json!({"title": "Confirm"}));

        let outcome = show("global-confirm", json!({"q": "ok?"})).unwrap();
        handle("global-confirm")
            .hide_with_resolve(json!(true))
            .unwrap();
        assert_eq!(outcome.await, Ok(json!(true)));

        remove("global-confirm").unwrap();
        unregister("global-confirm");
        assert!(!global().is_registered(&ModalId::from("global-confirm")));
        drop(host);
    }
}
