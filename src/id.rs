//! Modal identity: string ids, component-derived ids, and the union of both
//!
//! Callers may address a modal by a string id they registered themselves, or
//! by a [`ComponentRef`] whose id is generated once and cached, so the same
//! reference always resolves to the same modal.

use crate::component::{FnComponent, ModalComponent};
use crate::handle::ModalHandle;
use ratatui::{layout::Rect, Frame};
use serde::{Deserialize, Serialize};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, OnceLock};

/// Unique identifier for modal instances
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ModalId(pub String);

impl ModalId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for ModalId {
    fn from(id: &str) -> Self {
        Self(id.to_string())
    }
}

impl From<String> for ModalId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

impl std::fmt::Display for ModalId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

static NEXT_GENERATED_ID: AtomicU64 = AtomicU64::new(0);

const GENERATED_ID_PREFIX: &str = "summon_modal_";

fn next_generated_id() -> ModalId {
    let seed = NEXT_GENERATED_ID.fetch_add(1, Ordering::Relaxed);
    ModalId::new(format!("{}{}", GENERATED_ID_PREFIX, seed))
}

struct ComponentRefInner {
    definition: Arc<dyn ModalComponent>,
    id_cell: OnceLock<ModalId>,
}

/// A modal component carrying its own identity
///
/// The id is generated lazily on first use and cached, so showing the same
/// `ComponentRef` (or a clone of it) twice addresses the same modal instance.
#[derive(Clone)]
pub struct ComponentRef {
    inner: Arc<ComponentRefInner>,
}

impl ComponentRef {
    pub fn new(component: impl ModalComponent + 'static) -> Self {
        Self::from_arc(Arc::new(component))
    }

    pub fn from_arc(definition: Arc<dyn ModalComponent>) -> Self {
        Self {
            inner: Arc::new(ComponentRefInner {
                definition,
                id_cell: OnceLock::new(),
            }),
        }
    }

    /// Wraps a plain render closure as a component with default key handling
    pub fn from_fn<F>(render: F) -> Self
    where
        F: Fn(&ModalHandle, &mut Frame<'_>, Rect) + Send + Sync + 'static,
    {
        Self::new(FnComponent::new(render))
    }

    /// The id this reference resolves to, generated once and then stable
    pub fn modal_id(&self) -> ModalId {
        self.inner.id_cell.get_or_init(next_generated_id).clone()
    }

    pub(crate) fn definition(&self) -> Arc<dyn ModalComponent> {
        self.inner.definition.clone()
    }
}

impl std::fmt::Debug for ComponentRef {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ComponentRef")
            .field("id", &self.inner.id_cell.get())
            .finish()
    }
}

/// Anything a modal can be addressed by: a registered id or a component
#[derive(Debug, Clone)]
pub enum ModalRef {
    Id(ModalId),
    Component(ComponentRef),
}

impl ModalRef {
    pub fn resolve_id(&self) -> ModalId {
        match self {
            ModalRef::Id(id) => id.clone(),
            ModalRef::Component(component) => component.modal_id(),
        }
    }
}

impl From<&str> for ModalRef {
    fn from(id: &str) -> Self {
        Self::Id(ModalId::from(id))
    }
}

impl From<String> for ModalRef {
    fn from(id: String) -> Self {
        Self::Id(ModalId::from(id))
    }
}

impl From<ModalId> for ModalRef {
    fn from(id: ModalId) -> Self {
        Self::Id(id)
    }
}

impl From<&ModalId> for ModalRef {
    fn from(id: &ModalId) -> Self {
        Self::Id(id.clone())
    }
}

impl From<ComponentRef> for ModalRef {
    fn from(component: ComponentRef) -> Self {
        Self::Component(component)
    }
}

impl From<&ComponentRef> for ModalRef {
    fn from(component: &ComponentRef) -> Self {
        Self::Component(component.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Blank;

    impl ModalComponent for Blank {
        fn render(&self, _handle: &ModalHandle, _frame: &mut Frame, _area: Rect) {}
    }

    #[test]
    fn string_ids_pass_through() {
        let id = ModalId::from("user-settings");
        assert_eq!(id.as_str(), "user-settings");
        assert_eq!(id.to_string(), "user-settings");
        assert_eq!(ModalRef::from("user-settings").resolve_id(), id);
    }

    #[test]
    fn component_ref_id_is_generated_once() {
        let reference = ComponentRef::new(Blank);
        let first = reference.modal_id();
        let second = reference.modal_id();
        assert_eq!(first, second);
        assert!(first.as_str().starts_with(GENERATED_ID_PREFIX));
    }

    #[test]
    fn clones_share_the_generated_id() {
        let reference = ComponentRef::new(Blank);
        let clone = reference.clone();
        assert_eq!(reference.modal_id(), clone.modal_id());
    }

    #[test]
    fn distinct_refs_get_distinct_ids() {
        let a = ComponentRef::new(Blank);
        let b = ComponentRef::new(Blank);
        assert_ne!(a.modal_id(), b.modal_id());
    }

    #[test]
    fn closures_wrap_into_components() {
        let reference = ComponentRef::from_fn(|_: &ModalHandle, _: &mut Frame, _: Rect| {});
        assert!(reference.modal_id().as_str().starts_with(GENERATED_ID_PREFIX));
    }
}
