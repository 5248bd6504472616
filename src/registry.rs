//! Registry mapping modal ids to component definitions and default args

use crate::component::ModalComponent;
use crate::id::ModalId;
use serde_json::Value;
use std::collections::hash_map::Entry;
use std::collections::HashMap;
use std::sync::Arc;

pub(crate) struct RegistryEntry {
    pub definition: Arc<dyn ModalComponent>,
    pub default_args: Value,
}

#[derive(Default)]
pub(crate) struct ComponentRegistry {
    entries: HashMap<ModalId, RegistryEntry>,
}

impl ComponentRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a definition under an id
    ///
    /// Re-registering an existing id keeps the original definition and only
    /// replaces its default args, so live mounts never swap implementations.
    pub fn register(
        &mut self,
        id: ModalId,
        definition: Arc<dyn ModalComponent>,
        default_args: Value,
    ) {
        match self.entries.entry(id) {
            Entry::Occupied(mut occupied) => {
                occupied.get_mut().default_args = default_args;
            }
            Entry::Vacant(vacant) => {
                vacant.insert(RegistryEntry {
                    definition,
                    default_args,
                });
            }
        }
    }

    /// Removes an id; unknown ids are ignored
    pub fn unregister(&mut self, id: &ModalId) {
        self.entries.remove(id);
    }

    pub fn contains(&self, id: &ModalId) -> bool {
        self.entries.contains_key(id)
    }

    pub fn definition(&self, id: &ModalId) -> Option<Arc<dyn ModalComponent>> {
        self.entries.get(id).map(|entry| entry.definition.clone())
    }

    /// Default args for an id, `Null` when absent or unregistered
    pub fn default_args(&self, id: &ModalId) -> Value {
        self.entries
            .get(id)
            .map(|entry| entry.default_args.clone())
            .unwrap_or(Value::Null)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::handle::ModalHandle;
    use ratatui::{layout::Rect, Frame};
    use serde_json::json;

    struct Blank;

    impl ModalComponent for Blank {
        fn render(&self, _handle: &ModalHandle, _frame: &mut Frame, _area: Rect) {}
    }

    #[test]
    fn register_then_lookup() {
        let mut registry = ComponentRegistry::new();
        let id = ModalId::from("confirm");
        registry.register(id.clone(), Arc::new(Blank), json!({"title": "Confirm"}));

        assert!(registry.contains(&id));
        assert!(registry.definition(&id).is_some());
        assert_eq!(registry.default_args(&id), json!({"title": "Confirm"}));
    }

    #[test]
    fn reregister_keeps_definition_and_replaces_defaults() {
        let mut registry = ComponentRegistry::new();
        let id = ModalId::from("confirm");
        registry.register(id.clone(), Arc::new(Blank), json!({"title": "old"}));
        let original = registry.definition(&id).unwrap();

        registry.register(id.clone(), Arc::new(Blank), json!({"title": "new"}));
        let kept = registry.definition(&id).unwrap();

        assert!(Arc::ptr_eq(&original, &kept));
        assert_eq!(registry.default_args(&id), json!({"title": "new"}));
    }

    #[test]
    fn unregister_is_idempotent() {
        let mut registry = ComponentRegistry::new();
        let id = ModalId::from("confirm");
        registry.register(id.clone(), Arc::new(Blank), Value::Null);

        registry.unregister(&id);
        registry.unregister(&id);

        assert!(!registry.contains(&id));
        assert!(registry.definition(&id).is_none());
    }

    #[test]
    fn unknown_ids_have_null_defaults() {
        let registry = ComponentRegistry::new();
        assert_eq!(registry.default_args(&ModalId::from("missing")), Value::Null);
    }
}
