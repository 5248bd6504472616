//! Mount point: draws tracked modals and routes keys to the topmost one
//!
//! Exactly one host attaches to a context at a time and owns its store for
//! as long as it lives; dropping the host detaches the store. Each render
//! pass draws visible modals in insertion order (last on top), dims the
//! screen behind them, and flips freshly mounted modals visible so a first
//! show becomes visible one pass after it mounts.

use crate::context::ModalContext;
use crate::error::ModalError;
use crate::handle::ModalHandle;
use crate::id::ModalId;
use crate::store::ModalMap;
use anyhow::Result;
use crossterm::event::KeyEvent;
use ratatui::{
    layout::Rect,
    style::{Color, Modifier, Style},
    widgets::{Block, Clear},
    Frame,
};
use std::collections::HashSet;
use tokio::sync::watch;
use tracing::warn;

/// Renders modals for one [`ModalContext`]
pub struct ModalHost {
    context: ModalContext,
    updates: watch::Receiver<ModalMap>,

    /// Ids already warned about missing registrations
    missing_warned: HashSet<ModalId>,

    /// Dim the rest of the screen while any modal is visible
    backdrop: bool,
}

impl ModalHost {
    /// Attaches to a context; fails when it already has a host
    pub fn new(context: ModalContext) -> Result<Self, ModalError> {
        let updates = context.attach_store()?;
        Ok(Self {
            context,
            updates,
            missing_warned: HashSet::new(),
            backdrop: true,
        })
    }

    /// Attaches to the process-wide context
    pub fn global() -> Result<Self, ModalError> {
        Self::new(crate::global().clone())
    }

    pub fn context(&self) -> &ModalContext {
        &self.context
    }

    pub fn set_backdrop(&mut self, backdrop: bool) {
        self.backdrop = backdrop;
    }

    /// Update channel, useful for scheduling redraws
    pub fn subscribe(&self) -> watch::Receiver<ModalMap> {
        self.updates.clone()
    }

    pub fn has_visible_modals(&self) -> bool {
        self.updates.borrow().values().any(|state| state.visible)
    }

    /// Draws every visible modal over `area`, topmost last
    pub fn render(&mut self, frame: &mut Frame, area: Rect) {
        let map = self.updates.borrow_and_update().clone();
        self.missing_warned.retain(|id| map.contains_key(id));

        if self.backdrop && map.values().any(|state| state.visible) {
            self.render_backdrop(frame, area);
        }

        let mut pending_flips = Vec::new();
        for (id, state) in &map {
            if !state.should_mount {
                continue;
            }
            let definition = match self.context.definition_of(id) {
                Some(definition) => definition,
                None => {
                    if self.missing_warned.insert(id.clone()) {
                        warn!(
                            "no modal registered for id {}; check the id or register a component",
                            id
                        );
                    }
                    continue;
                }
            };

            let handle = ModalHandle::new(self.context.clone(), id.clone());
            if state.delay_visible && !state.visible {
                pending_flips.push(handle.clone());
            }

            if state.visible {
                let (width, height) = definition.desired_size(area);
                let modal_area = centered(area, width, height);
                frame.render_widget(Clear, modal_area);
                definition.render(&handle, frame, modal_area);
            }
        }

        // Mount observed: re-show to flip these visible on the next pass.
        for handle in pending_flips {
            if let Err(err) = handle.show() {
                warn!("auto-show failed for {}: {}", handle.id(), err);
            }
        }
    }

    fn render_backdrop(&self, frame: &mut Frame, area: Rect) {
        frame.render_widget(Clear, area);
        let dim = Block::default().style(
            Style::default()
                .bg(Color::Black)
                .add_modifier(Modifier::DIM),
        );
        frame.render_widget(dim, area);
    }

    /// Routes a key to the topmost visible modal
    ///
    /// Returns `true` when a modal consumed the event; callers should skip
    /// their own key handling in that case.
    pub async fn handle_key_event(&mut self, key: KeyEvent) -> Result<bool> {
        let target = {
            let map = self.updates.borrow();
            map.iter()
                .rev()
                .find(|(_, state)| state.visible && state.should_mount)
                .map(|(id, _)| id.clone())
        };
        let id = match target {
            Some(id) => id,
            None => return Ok(false),
        };
        let definition = match self.context.definition_of(&id) {
            Some(definition) => definition,
            None => return Ok(false),
        };

        let handle = ModalHandle::new(self.context.clone(), id);
        definition.on_key(&handle, key).await?;
        Ok(true)
    }
}

impl Drop for ModalHost {
    fn drop(&mut self) {
        self.context.detach_store();
    }
}

fn centered(area: Rect, width: u16, height: u16) -> Rect {
    let width = width.min(area.width);
    let height = height.min(area.height);
    let x = area.x + (area.width - width) / 2;
    let y = area.y + (area.height - height) / 2;
    Rect::new(x, y, width, height)
}
