//! Bindings that translate a handle into common dialog close protocols
//!
//! Reusable dialog widgets tend to expose an `open` flag plus close
//! callbacks. These shims map that shape onto the handle protocol, each with
//! the teardown timing its widget style expects. The close callbacks resolve
//! with `Null` as a dismissal fallback; a modal that already settled itself
//! (for example through `hide_with_resolve`) is unaffected since only the
//! first settlement counts.

use crate::handle::ModalHandle;
use serde_json::Value;

/// Popup style: closing settles, hides, and unmounts in one step
pub struct PopupBinding {
    handle: ModalHandle,
}

pub fn popup_binding(handle: &ModalHandle) -> PopupBinding {
    PopupBinding {
        handle: handle.clone(),
    }
}

impl PopupBinding {
    pub fn open(&self) -> bool {
        self.handle.visible()
    }

    pub fn close(&self) {
        self.handle.resolve(Value::Null);
        let _ = self.handle.hide();
        let _ = self.handle.remove();
    }
}

/// Dialog style: closing hides, unmounting waits for the closed signal
///
/// Call [`DialogBinding::closed`] when the exit transition finishes; it
/// acknowledges the hide and then unmounts.
pub struct DialogBinding {
    handle: ModalHandle,
}

pub fn dialog_binding(handle: &ModalHandle) -> DialogBinding {
    DialogBinding {
        handle: handle.clone(),
    }
}

impl DialogBinding {
    pub fn open(&self) -> bool {
        self.handle.visible()
    }

    pub fn close(&self) {
        self.handle.resolve(Value::Null);
        let _ = self.handle.hide();
    }

    pub fn closed(&self) {
        self.handle.resolve_hide();
        let _ = self.handle.remove();
    }
}

/// Drawer style: hides on close but stays mounted for quick reopening
pub struct DrawerBinding {
    handle: ModalHandle,
}

pub fn drawer_binding(handle: &ModalHandle) -> DrawerBinding {
    DrawerBinding {
        handle: handle.clone(),
    }
}

impl DrawerBinding {
    pub fn open(&self) -> bool {
        self.handle.visible()
    }

    pub fn close(&self) {
        self.handle.resolve(Value::Null);
        let _ = self.handle.hide();
    }

    pub fn closed(&self) {
        self.handle.resolve_hide();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::context::ModalContext;
    use crate::id::ModalId;
    use serde_json::json;

    fn mounted_context() -> ModalContext {
        let context = ModalContext::new();
        let _updates = context.attach_store().unwrap();
        context
    }

    #[test]
    fn open_tracks_store_visibility() {
        let context = mounted_context();
        context.show("panel", Value::Null).unwrap();
        let binding = popup_binding(&context.handle("panel"));
        assert!(!binding.open());

        // A repeat show on a mounted modal is visible immediately.
        context.show("panel", Value::Null).unwrap();
        assert!(binding.open());
    }

    #[tokio::test]
    async fn popup_close_settles_and_unmounts_at_once() {
        let context = mounted_context();
        let outcome = context.show("panel", Value::Null).unwrap();

        popup_binding(&context.handle("panel")).close();

        assert_eq!(outcome.await, Ok(Value::Null));
        assert_eq!(context.state_of(&ModalId::from("panel")), None);
    }

    #[tokio::test]
    async fn dialog_unmounts_only_after_closed() {
        let context = mounted_context();
        let outcome = context.show("settings", json!({"tab": "general"})).unwrap();
        let handle = context.handle("settings");
        let binding = dialog_binding(&handle);

        binding.close();
        assert_eq!(outcome.await, Ok(Value::Null));
        assert!(!handle.visible());
        assert!(handle.should_mount());

        let acked = handle.hide().unwrap();
        binding.closed();
        acked.await;
        assert_eq!(context.state_of(&ModalId::from("settings")), None);
    }

    #[tokio::test]
    async fn drawer_stays_mounted_after_closed() {
        let context = mounted_context();
        context.show("sidebar", Value::Null).unwrap();
        let handle = context.handle("sidebar");
        let binding = drawer_binding(&handle);

        binding.close();
        let acked = handle.hide().unwrap();
        binding.closed();
        acked.await;

        let state = context.state_of(&ModalId::from("sidebar")).unwrap();
        assert!(!state.visible);
        assert!(state.should_mount);
    }

    #[tokio::test]
    async fn dismissal_fallback_never_overrides_a_real_outcome() {
        let context = mounted_context();
        let outcome = context.show("confirm", Value::Null).unwrap();
        let handle = context.handle("confirm");

        handle.resolve(json!({"accepted": true}));
        popup_binding(&handle).close();

        assert_eq!(outcome.await, Ok(json!({"accepted": true})));
    }
}
