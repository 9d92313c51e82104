//! Terminal host - Presents the document with crossterm.
//!
//! Draws the attached tree as a text outline and turns key presses into
//! document events, the way a browser turns typing and clicks into `input`
//! and `click` events.
//!
//! | Key               | Action                                   |
//! |-------------------|------------------------------------------|
//! | printable, ⌫      | edit the new-task input (`input` event)  |
//! | Enter             | click the submit button                  |
//! | ↑ / ↓             | move the row selection                   |
//! | Ctrl+T            | click the selected row's checkbox        |
//! | Delete, Ctrl+D    | click the selected row's delete button   |
//! | Esc, Ctrl+C       | quit                                     |
//!
//! Alerts are shown on the status line until the next key press. The screen
//! is redrawn after every handled key and on resize.

use std::cell::RefCell;
use std::io::{self, Write};
use std::rc::Rc;
use std::time::Duration;

use crossterm::cursor::{Hide, MoveTo, Show};
use crossterm::event::{
    self, Event as CrosstermEvent, KeyCode, KeyEvent, KeyEventKind, KeyModifiers,
};
use crossterm::style::{Attribute, Print, SetAttribute};
use crossterm::terminal::{
    disable_raw_mode, enable_raw_mode, Clear, ClearType, EnterAlternateScreen, LeaveAlternateScreen,
};
use crossterm::{execute, queue};
use tracing::{debug, error};

use crate::engine::{document, listeners};
use crate::error::Result;
use crate::host::alert;
use crate::renderer::outline;
use crate::types::NodeId;

const HELP: &str = "Enter: add  ↑/↓: select  Ctrl+T: toggle  Del: delete (twice)  Esc: quit";

// =============================================================================
// Options
// =============================================================================

/// Which nodes the host drives, by `id` attribute.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TerminalOptions {
    /// Text input receiving typed characters.
    pub input_id: String,
    /// Button clicked on Enter.
    pub submit_id: String,
    /// Element whose children are the selectable rows.
    pub list_id: String,
    /// How long to block waiting for terminal input per loop turn.
    pub poll_interval: Duration,
}

impl Default for TerminalOptions {
    fn default() -> Self {
        Self {
            input_id: "new-todo".to_string(),
            submit_id: "add-btn".to_string(),
            list_id: "todos".to_string(),
            poll_interval: Duration::from_millis(100),
        }
    }
}

// =============================================================================
// Key Mapping
// =============================================================================

/// What a key press asks the host to do.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HostAction {
    Type(char),
    Backspace,
    Submit,
    SelectPrevious,
    SelectNext,
    Toggle,
    Delete,
    Quit,
}

/// Map a crossterm key event to a host action. Releases and repeats of
/// non-editing keys are ignored.
pub fn map_key(event: &KeyEvent) -> Option<HostAction> {
    if event.kind == KeyEventKind::Release {
        return None;
    }
    let ctrl = event.modifiers.contains(KeyModifiers::CONTROL);
    match event.code {
        KeyCode::Char('c') if ctrl => Some(HostAction::Quit),
        KeyCode::Char('t') if ctrl => Some(HostAction::Toggle),
        KeyCode::Char('d') if ctrl => Some(HostAction::Delete),
        KeyCode::Char(_) if ctrl => None,
        KeyCode::Char(c) => Some(HostAction::Type(c)),
        KeyCode::Backspace => Some(HostAction::Backspace),
        KeyCode::Enter => Some(HostAction::Submit),
        KeyCode::Up => Some(HostAction::SelectPrevious),
        KeyCode::Down => Some(HostAction::SelectNext),
        KeyCode::Delete => Some(HostAction::Delete),
        KeyCode::Esc => Some(HostAction::Quit),
        _ => None,
    }
}

// =============================================================================
// Tree helpers
// =============================================================================

fn find_descendant(root: NodeId, matches: &impl Fn(NodeId) -> bool) -> Option<NodeId> {
    for child in document::children(root) {
        if matches(child) {
            return Some(child);
        }
        if let Some(found) = find_descendant(child, matches) {
            return Some(found);
        }
    }
    None
}

fn is_inside(node: NodeId, ancestor: NodeId) -> bool {
    let mut current = Some(node);
    while let Some(id) = current {
        if id == ancestor {
            return true;
        }
        current = document::parent(id);
    }
    false
}

fn is_checkbox(node: NodeId) -> bool {
    document::tag_name(node).as_deref() == Some("input")
        && document::get_attribute(node, "type").as_deref() == Some("checkbox")
}

fn is_button(node: NodeId) -> bool {
    document::tag_name(node).as_deref() == Some("button")
}

// =============================================================================
// Host
// =============================================================================

/// Key-to-event router and drawer for one document.
pub struct TerminalHost {
    options: TerminalOptions,
    selected: usize,
    status: Rc<RefCell<Option<String>>>,
}

impl TerminalHost {
    pub fn new(options: TerminalOptions) -> Self {
        Self {
            options,
            selected: 0,
            status: Rc::new(RefCell::new(None)),
        }
    }

    /// Index of the selected row.
    pub fn selected(&self) -> usize {
        self.selected
    }

    /// Message currently on the status line.
    pub fn status(&self) -> Option<String> {
        self.status.borrow().clone()
    }

    fn rows(&self) -> Vec<NodeId> {
        document::get_element_by_id(&self.options.list_id)
            .map(document::children)
            .unwrap_or_default()
    }

    fn selected_row(&self) -> Option<NodeId> {
        self.rows().get(self.selected).copied()
    }

    fn clamp_selection(&mut self) {
        let count = self.rows().len();
        self.selected = self.selected.min(count.saturating_sub(1));
    }

    /// Show alerts on the status line. Returns cleanup function.
    pub fn capture_alerts(&self) -> impl FnOnce() + use<> {
        let status = self.status.clone();
        alert::on_alert(move |message| *status.borrow_mut() = Some(message.to_string()))
    }

    /// Perform an action against the document. Returns false on quit.
    pub fn apply(&mut self, action: HostAction) -> Result<bool> {
        debug!(?action, "host action");
        match action {
            HostAction::Quit => return Ok(false),
            HostAction::Type(c) => {
                if let Some(field) = document::get_element_by_id(&self.options.input_id) {
                    let mut text = document::value(field);
                    text.push(c);
                    listeners::input(field, &text)?;
                }
            }
            HostAction::Backspace => {
                if let Some(field) = document::get_element_by_id(&self.options.input_id) {
                    let mut text = document::value(field);
                    if text.pop().is_some() {
                        listeners::input(field, &text)?;
                    }
                }
            }
            HostAction::Submit => {
                if let Some(button) = document::get_element_by_id(&self.options.submit_id) {
                    listeners::click(button);
                }
            }
            HostAction::SelectPrevious => {
                self.selected = self.selected.saturating_sub(1);
            }
            HostAction::SelectNext => {
                self.selected += 1;
            }
            HostAction::Toggle => {
                let checkbox = self
                    .selected_row()
                    .and_then(|row| find_descendant(row, &is_checkbox));
                if let Some(checkbox) = checkbox {
                    listeners::click(checkbox);
                }
            }
            HostAction::Delete => {
                let button = self
                    .selected_row()
                    .and_then(|row| find_descendant(row, &is_button));
                if let Some(button) = button {
                    listeners::click(button);
                }
            }
        }
        self.clamp_selection();
        Ok(true)
    }

    /// Draw the attached tree and the status line.
    ///
    /// Reads the body on every call: components replace their nodes on
    /// re-render, so a node held from an earlier frame may be released.
    pub fn draw(&self, out: &mut impl Write) -> io::Result<()> {
        let drawn = outline(document::body());
        let selected_line = self.selected_row().and_then(|row| {
            drawn
                .controls
                .iter()
                .find(|control| is_inside(control.node, row))
                .map(|control| control.line)
        });

        queue!(out, MoveTo(0, 0), Clear(ClearType::All))?;
        for (y, line) in drawn.lines.iter().enumerate() {
            queue!(out, MoveTo(0, y as u16))?;
            if Some(y) == selected_line {
                queue!(
                    out,
                    SetAttribute(Attribute::Reverse),
                    Print(line),
                    SetAttribute(Attribute::Reset)
                )?;
            } else {
                queue!(out, Print(line))?;
            }
        }

        let status_y = drawn.lines.len() as u16 + 1;
        let status = self.status().unwrap_or_else(|| HELP.to_string());
        queue!(out, MoveTo(0, status_y), Print(status))?;
        out.flush()
    }
}

// =============================================================================
// Run loop
// =============================================================================

/// Restores the terminal when dropped, even on error paths.
struct TerminalGuard;

impl TerminalGuard {
    fn enter() -> io::Result<Self> {
        enable_raw_mode()?;
        execute!(io::stdout(), EnterAlternateScreen, Hide)?;
        Ok(Self)
    }
}

impl Drop for TerminalGuard {
    fn drop(&mut self) {
        // Best effort
        let _ = execute!(io::stdout(), Show, LeaveAlternateScreen);
        let _ = disable_raw_mode();
    }
}

/// Run the host until the user quits.
///
/// Draws whatever is attached under the body, so mount the root first (see
/// [`mount_to_body`](super::mount_to_body)). Blocks the calling thread.
pub fn run(options: TerminalOptions) -> io::Result<()> {
    let poll_interval = options.poll_interval;
    let mut host = TerminalHost::new(options);
    let remove_alert_handler = host.capture_alerts();

    let result = TerminalGuard::enter().and_then(|_guard| event_loop(&mut host, poll_interval));

    remove_alert_handler();
    result
}

/// What the loop does after one terminal event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Step {
    Idle,
    Redraw,
    Quit,
}

fn handle_event(host: &mut TerminalHost, event: CrosstermEvent) -> Step {
    let key = match event {
        CrosstermEvent::Key(key) => key,
        CrosstermEvent::Resize(..) => return Step::Redraw,
        _ => return Step::Idle,
    };
    let Some(action) = map_key(&key) else {
        return Step::Idle;
    };
    host.status.borrow_mut().take();
    match host.apply(action) {
        Ok(true) => Step::Redraw,
        Ok(false) => Step::Quit,
        Err(err) => {
            error!(%err, "host action failed");
            Step::Redraw
        }
    }
}

fn event_loop(host: &mut TerminalHost, poll_interval: Duration) -> io::Result<()> {
    let mut stdout = io::stdout();
    let mut dirty = true;
    loop {
        if dirty {
            host.draw(&mut stdout)?;
            dirty = false;
        }
        if !event::poll(poll_interval)? {
            continue;
        }
        match handle_event(host, event::read()?) {
            Step::Idle => {}
            Step::Redraw => dirty = true,
            Step::Quit => return Ok(()),
        }
    }
}
