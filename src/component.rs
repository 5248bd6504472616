//! Component trait implemented by modal definitions
//!
//! A modal definition is registered once and shared by every mount of that
//! modal, so methods take `&self`; components that need mutable state keep it
//! behind interior mutability. The [`ModalHandle`] passed to each method is
//! how a component drives its own lifecycle (resolve, hide, remove).

use crate::handle::ModalHandle;
use anyhow::Result;
use async_trait::async_trait;
use crossterm::event::KeyEvent;
use ratatui::{layout::Rect, Frame};

/// A modal dialog definition
#[async_trait]
pub trait ModalComponent: Send + Sync {
    /// Draws the modal inside the area the host chose for it
    fn render(&self, handle: &ModalHandle, frame: &mut Frame, area: Rect);

    /// Handles a key event while this modal is the topmost visible one
    ///
    /// The default implementation ignores every key. Components close
    /// themselves here, typically via [`ModalHandle::hide_with_resolve`].
    async fn on_key(&self, _handle: &ModalHandle, _key: KeyEvent) -> Result<()> {
        Ok(())
    }

    /// Preferred (width, height) in cells; the host clamps it to the screen
    fn desired_size(&self, _screen: Rect) -> (u16, u16) {
        (48, 12)
    }
}

/// Adapter turning a plain render closure into a [`ModalComponent`]
pub(crate) struct FnComponent<F> {
    render_fn: F,
}

impl<F> FnComponent<F> {
    pub(crate) fn new(render_fn: F) -> Self {
        Self { render_fn }
    }
}

impl<F> ModalComponent for FnComponent<F>
where
    F: Fn(&ModalHandle, &mut Frame<'_>, Rect) + Send + Sync,
{
    fn render(&self, handle: &ModalHandle, frame: &mut Frame, area: Rect) {
        (self.render_fn)(handle, frame, area);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::context::ModalContext;
    use ratatui::{backend::TestBackend, Terminal};
    use std::sync::atomic::{AtomicBool, Ordering};
    use std::sync::Arc;

    struct Blank;

    impl ModalComponent for Blank {
        fn render(&self, _handle: &ModalHandle, _frame: &mut Frame, _area: Rect) {}
    }

    #[test]
    fn default_desired_size_is_reasonable() {
        let screen = Rect::new(0, 0, 120, 40);
        assert_eq!(Blank.desired_size(screen), (48, 12));
    }

    #[tokio::test]
    async fn default_key_handler_ignores_keys() {
        use crossterm::event::{KeyCode, KeyModifiers};
        let context = ModalContext::new();
        let handle = context.handle("blank");
        let key = KeyEvent::new(KeyCode::Enter, KeyModifiers::NONE);
        assert!(Blank.on_key(&handle, key).await.is_ok());
    }

    #[test]
    fn fn_component_invokes_the_closure() {
        let drew = Arc::new(AtomicBool::new(false));
        let seen = drew.clone();
        let component = FnComponent::new(move |_: &ModalHandle, _: &mut Frame, _: Rect| {
            seen.store(true, Ordering::SeqCst);
        });

        let context = ModalContext::new();
        let handle = context.handle("blank");
        let backend = TestBackend::new(40, 10);
        let mut terminal = Terminal::new(backend).unwrap();
        terminal
            .draw(|frame| {
                let area = frame.size();
                component.render(&handle, frame, area);
            })
            .unwrap();

        assert!(drew.load(Ordering::SeqCst));
    }
}
