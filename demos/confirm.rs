//! Confirm dialog demo
//!
//! Runs a tiny ratatui app that opens a confirm modal, waits for the
//! answer, and prints it after restoring the terminal:
//!
//! ```bash
//! cargo run --example confirm
//! ```

use anyhow::Result;
use async_trait::async_trait;
use crossterm::{
    event::{self, Event, KeyCode, KeyEvent, KeyEventKind},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{
    backend::CrosstermBackend,
    layout::{Alignment, Rect},
    style::{Color, Modifier, Style},
    widgets::{Block, Borders, Paragraph, Wrap},
    Frame, Terminal,
};
use serde_json::{json, Value};
use std::io;
use std::time::Duration;
use summon::{ModalComponent, ModalContext, ModalHandle, ModalHost};
use tokio::sync::mpsc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

struct ConfirmDialog;

#[async_trait]
impl ModalComponent for ConfirmDialog {
    fn render(&self, handle: &ModalHandle, frame: &mut Frame, area: Rect) {
        let params = handle.params();
        let message = params
            .get("message")
            .and_then(Value::as_str)
            .unwrap_or("Are you sure?")
            .to_string();

        let block = Block::default()
            .title(" Confirm ")
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::Cyan));
        let body = format!("{}\n\n[y] yes   [n] no", message);
        let paragraph = Paragraph::new(body)
            .block(block)
            .alignment(Alignment::Center)
            .wrap(Wrap { trim: true });
        frame.render_widget(paragraph, area);
    }

    async fn on_key(&self, handle: &ModalHandle, key: KeyEvent) -> Result<()> {
        match key.code {
            KeyCode::Char('y') | KeyCode::Enter => {
                handle.hide_with_resolve(json!(true))?;
            }
            KeyCode::Char('n') | KeyCode::Esc => {
                handle.hide_with_resolve(json!(false))?;
            }
            _ => {}
        }
        Ok(())
    }

    fn desired_size(&self, _screen: Rect) -> (u16, u16) {
        (44, 7)
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "summon=info".into());
    tracing_subscriber::registry()
        .with(env_filter)
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let result = run(&mut terminal).await;

    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    match result? {
        Some(true) => println!("confirmed"),
        Some(false) => println!("declined"),
        None => println!("closed without answering"),
    }
    Ok(())
}

async fn run(terminal: &mut Terminal<CrosstermBackend<io::Stdout>>) -> Result<Option<bool>> {
    let context = ModalContext::new();
    let mut host = ModalHost::new(context.clone())?;
    context.register("confirm", ConfirmDialog, json!({"message": "Are you sure?"}));

    let mut answer = context.show("confirm", json!({"message": "Ship it?"}))?;
    let mut updates = host.subscribe();

    // Crossterm reads block, so they live on their own thread.
    let (key_tx, mut key_rx) = mpsc::channel::<KeyEvent>(16);
    std::thread::spawn(move || loop {
        if event::poll(Duration::from_millis(100)).unwrap_or(false) {
            if let Ok(Event::Key(key)) = event::read() {
                if key.kind == KeyEventKind::Press && key_tx.blocking_send(key).is_err() {
                    break;
                }
            }
        } else if key_tx.is_closed() {
            break;
        }
    });

    loop {
        terminal.draw(|frame| {
            let area = frame.size();
            let background = Paragraph::new("The modal on top is awaitable; answer it.")
                .style(Style::default().add_modifier(Modifier::DIM))
                .alignment(Alignment::Center);
            frame.render_widget(background, area);
            host.render(frame, area);
        })?;

        tokio::select! {
            outcome = &mut answer => {
                let value = outcome.ok().and_then(|v| v.as_bool());
                context.remove("confirm")?;
                return Ok(value);
            }
            key = key_rx.recv() => {
                match key {
                    Some(key) => {
                        host.handle_key_event(key).await?;
                    }
                    None => return Ok(None),
                }
            }
            changed = updates.changed() => {
                if changed.is_err() {
                    return Ok(None);
                }
            }
        }
    }
}
