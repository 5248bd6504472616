//! Modal visibility state and the store that owns it
//!
//! State changes go through a pure reducer applied inside the store's watch
//! channel, so every mutation is atomic and observers are notified exactly
//! once per dispatch. Map entries keep insertion order; the last inserted
//! visible modal is the topmost one.

use crate::id::ModalId;
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tokio::sync::watch;
use tracing::debug;

/// Per-modal slice of the store
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ModalState {
    /// Identifier this state belongs to
    pub id: ModalId,
    /// Args from the most recent show dispatch
    pub args: Value,
    /// Whether the modal is currently shown
    pub visible: bool,
    /// Set when a show had to mount the modal first; tells the host to
    /// re-show it once the mount is observed. Cleared by the next show.
    pub delay_visible: bool,
    /// Whether the modal is mounted at all; stays `true` after a hide
    pub should_mount: bool,
}

/// Snapshot of every tracked modal, in insertion order
pub type ModalMap = IndexMap<ModalId, ModalState>;

#[derive(Debug, Clone)]
pub(crate) enum ModalAction {
    Show { id: ModalId, args: Value },
    Hide { id: ModalId },
    Remove { id: ModalId },
}

/// Applies one action to a snapshot, returning the next snapshot
pub(crate) fn reduce(map: &ModalMap, action: &ModalAction) -> ModalMap {
    let mut next = map.clone();
    match action {
        ModalAction::Show { id, args } => {
            // A first show lands mounted but hidden; the host flips it
            // visible on the next render pass once the mount is observed.
            // A repeat show on a mounted modal is visible immediately.
            let was_mounted = map.get(id).map(|state| state.should_mount).unwrap_or(false);
            next.insert(
                id.clone(),
                ModalState {
                    id: id.clone(),
                    args: args.clone(),
                    visible: was_mounted,
                    delay_visible: !was_mounted,
                    should_mount: true,
                },
            );
        }
        ModalAction::Hide { id } => {
            if let Some(state) = next.get_mut(id) {
                state.visible = false;
            }
        }
        ModalAction::Remove { id } => {
            next.shift_remove(id);
        }
    }
    next
}

/// Owner of the modal map, attached by exactly one host at a time
pub(crate) struct Store {
    tx: watch::Sender<ModalMap>,
}

impl Store {
    pub fn new() -> Self {
        let (tx, _rx) = watch::channel(ModalMap::new());
        Self { tx }
    }

    pub fn dispatch(&self, action: ModalAction) {
        debug!("modal action: {:?}", action);
        self.tx.send_modify(|map| {
            let next = reduce(map, &action);
            *map = next;
        });
    }

    pub fn snapshot(&self) -> ModalMap {
        self.tx.borrow().clone()
    }

    pub fn state_of(&self, id: &ModalId) -> Option<ModalState> {
        self.tx.borrow().get(id).cloned()
    }

    pub fn subscribe(&self) -> watch::Receiver<ModalMap> {
        self.tx.subscribe()
    }
}
