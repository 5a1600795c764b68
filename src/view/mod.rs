//! TUI shell: terminal lifecycle, event loop, and rendering.
//!
//! The impure half of the application. All state lives in [`AppState`] and
//! is only changed through the pure transitions in [`crate::state`]; this
//! module translates terminal events into those transitions, executes fetch
//! requests on the [`FetchPool`], drains settled outcomes on the timer tick,
//! and draws.

use crate::config::{KeyBindings, ResolvedConfig};
use crate::model::{FsItem, KeyAction, NodeId, TreeItem};
use crate::source::{ChildSource, FetchPool};
use crate::state::{commit_outcome, handle_retry, handle_toggle, AppState, FetchOutcome, RootLoad};
use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyModifiers};
use crossterm::terminal::{
    disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen,
};
use crossterm::ExecutableCommand;
use ratatui::backend::{Backend, CrosstermBackend};
use ratatui::layout::{Alignment, Constraint, Layout, Rect};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;
use ratatui::{Frame, Terminal};
use std::io::{self, Stdout};
use std::sync::mpsc::{self, Receiver};
use std::sync::Arc;
use std::time::Duration;
use thiserror::Error;
use tracing::{debug, info};
use unicode_width::UnicodeWidthStr;

pub mod help;
pub mod rows;
pub mod styles;

pub use rows::{visible_rows, Row, RowKind, LOADING_PLACEHOLDER_ROWS};
pub use styles::{ColorConfig, ExplorerStyles};

/// Errors from the TUI layer.
#[derive(Debug, Error)]
pub enum TuiError {
    /// Terminal IO error.
    #[error("IO error: {0}")]
    Io(#[from] io::Error),
}

/// What the cursor row resolves a key action to.
#[derive(Debug, Clone, PartialEq)]
pub enum Intent {
    /// Toggle this branch open/closed (fetching if warranted).
    Toggle(FsItem),
    /// Retry the failed fetch for this branch.
    Retry(FsItem),
}

/// Resolve a key action against the row under the cursor.
///
/// `Activate` toggles folders and doubles as retry on error rows. `Retry`
/// works on error rows and on folder rows whose last fetch failed. Leaf
/// rows and skeleton rows resolve to nothing.
pub fn intent_for(
    rows: &[Row<'_>],
    tree: &crate::state::TreeState<FsItem>,
    cursor: usize,
    action: KeyAction,
) -> Option<Intent> {
    let row = rows.get(cursor)?;
    match (&row.kind, action) {
        (RowKind::Item { item, .. }, KeyAction::Activate) if item.is_branch() => {
            Some(Intent::Toggle((*item).clone()))
        }
        (RowKind::Item { item, .. }, KeyAction::Retry)
            if item.is_branch() && tree.error(item.id()).is_some() =>
        {
            Some(Intent::Retry((*item).clone()))
        }
        (RowKind::Error { parent, .. }, KeyAction::Activate | KeyAction::Retry) => {
            find_item(rows, parent).map(Intent::Retry)
        }
        _ => None,
    }
}

/// Find the visible item row for `id`. The parent of a visible error row is
/// always itself visible (the error row sits directly beneath it).
fn find_item(rows: &[Row<'_>], id: &NodeId) -> Option<FsItem> {
    rows.iter().find_map(|row| match &row.kind {
        RowKind::Item { item, .. } if item.id() == id => Some((*item).clone()),
        _ => None,
    })
}

/// Main TUI application.
///
/// Generic over backend to support testing with `TestBackend`.
pub struct TuiApp<B>
where
    B: Backend,
{
    terminal: Terminal<B>,
    state: AppState,
    pool: FetchPool<FsItem>,
    outcomes: Receiver<FetchOutcome<FsItem>>,
    key_bindings: KeyBindings,
    styles: ExplorerStyles,
    tick: Duration,
    header: String,
}

impl TuiApp<CrosstermBackend<Stdout>> {
    /// Create and initialize the TUI: raw mode, alternate screen, and the
    /// initial root fetch.
    pub fn new(
        source: Arc<dyn ChildSource<FsItem>>,
        config: &ResolvedConfig,
        header: String,
    ) -> Result<Self, TuiError> {
        enable_raw_mode()?;
        let mut stdout = io::stdout();
        stdout.execute(EnterAlternateScreen)?;
        let backend = CrosstermBackend::new(stdout);
        let terminal = Terminal::new(backend)?;
        Ok(Self::from_parts(terminal, source, config.tick(), header))
    }
}

impl<B> TuiApp<B>
where
    B: Backend,
{
    /// Build an app over an arbitrary backend (tests use `TestBackend`).
    /// Spawns the initial root fetch immediately.
    pub fn from_parts(
        terminal: Terminal<B>,
        source: Arc<dyn ChildSource<FsItem>>,
        tick: Duration,
        header: String,
    ) -> Self {
        let (tx, outcomes) = mpsc::channel();
        let pool = FetchPool::new(source, tx);
        let state = AppState::new();
        pool.spawn(NodeId::root(), state.generation);
        Self {
            terminal,
            state,
            pool,
            outcomes,
            key_bindings: KeyBindings::default(),
            styles: ExplorerStyles::default(),
            tick,
            header,
        }
    }

    /// Current application state (read-only; tests and assertions).
    pub fn state(&self) -> &AppState {
        &self.state
    }

    /// Run the main event loop until the user quits.
    ///
    /// Event-driven: redraws on user input and whenever the timer tick
    /// drains at least one settled fetch outcome; idle otherwise.
    pub fn run(&mut self) -> Result<(), TuiError> {
        self.draw()?;

        loop {
            if event::poll(self.tick)? {
                match event::read()? {
                    Event::Key(key) => {
                        if self.handle_key(key) {
                            return Ok(());
                        }
                        // Pick up anything that settled while the user was
                        // typing, then render.
                        self.drain_outcomes();
                        self.draw()?;
                    }
                    Event::Resize(_, _) => {
                        self.draw()?;
                    }
                    _ => {}
                }
            } else if self.drain_outcomes() {
                self.draw()?;
            }
        }
    }

    /// Drain settled fetch outcomes into state. Returns true when at least
    /// one outcome was committed.
    ///
    /// Outcomes stamped with an older generation belong to a tree discarded
    /// by a root reload and are dropped. Everything else commits in
    /// completion order, root outcomes into [`RootLoad`], node outcomes
    /// through the pure transition vocabulary.
    pub fn drain_outcomes(&mut self) -> bool {
        let mut changed = false;
        while let Ok(outcome) = self.outcomes.try_recv() {
            if outcome.generation != self.state.generation {
                debug!(id = %outcome.id, generation = outcome.generation, "dropping stale outcome");
                continue;
            }
            changed = true;
            if outcome.id.is_root() {
                match outcome.result {
                    Ok(items) => {
                        info!(count = items.len(), "root listing loaded");
                        self.state.settle_root_ok(items);
                    }
                    Err(err) => {
                        let message = if err.message.is_empty() {
                            "Failed to load root".to_string()
                        } else {
                            err.message
                        };
                        info!(error = %message, "root listing failed");
                        self.state.settle_root_err(message);
                    }
                }
            } else {
                self.state.tree = commit_outcome(&self.state.tree, outcome);
            }
        }
        if changed {
            let count = self.row_count();
            self.state.clamp_cursor(count);
        }
        changed
    }

    /// Handle a single keyboard event. Returns true if the app should quit.
    pub fn handle_key(&mut self, key: KeyEvent) -> bool {
        // Ctrl+C always quits, bindings or not.
        if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
            return true;
        }

        // The help overlay captures keys: close on Esc or '?', quit on 'q'.
        if self.state.help_visible {
            match self.key_bindings.get(key) {
                Some(KeyAction::Quit) => return true,
                Some(KeyAction::Help) => self.state.help_visible = false,
                _ if key.code == KeyCode::Esc => self.state.help_visible = false,
                _ => {}
            }
            return false;
        }

        let Some(action) = self.key_bindings.get(key) else {
            return false;
        };

        match action {
            KeyAction::Quit => return true,
            KeyAction::Help => self.state.help_visible = true,
            KeyAction::CursorUp => self.state.cursor_up(),
            KeyAction::CursorDown => {
                let count = self.row_count();
                self.state.cursor_down(count);
            }
            KeyAction::CursorTop => self.state.cursor_top(),
            KeyAction::CursorBottom => {
                let count = self.row_count();
                self.state.cursor_bottom(count);
            }
            KeyAction::Activate | KeyAction::Retry => self.act_on_cursor(action),
            KeyAction::ReloadRoot => {
                info!("root reload requested; discarding tree state");
                self.state.reload_root();
                self.pool.spawn(NodeId::root(), self.state.generation);
            }
        }
        false
    }

    /// Resolve and apply an Activate/Retry action at the cursor.
    fn act_on_cursor(&mut self, action: KeyAction) {
        let intent = {
            let Some(items) = self.state.root_items() else {
                return;
            };
            let rows = visible_rows(items, &self.state.tree);
            intent_for(&rows, &self.state.tree, self.state.cursor, action)
        };

        let (next_tree, request) = match &intent {
            Some(Intent::Toggle(item)) => handle_toggle(&self.state.tree, item),
            Some(Intent::Retry(item)) => handle_retry(&self.state.tree, item),
            None => return,
        };
        self.state.tree = next_tree;
        if let Some(request) = request {
            self.pool.spawn(request.id, self.state.generation);
        }
        let count = self.row_count();
        self.state.clamp_cursor(count);
    }

    fn row_count(&self) -> usize {
        self.state
            .root_items()
            .map(|items| visible_rows(items, &self.state.tree).len())
            .unwrap_or(0)
    }

    /// Render the current state.
    pub fn draw(&mut self) -> Result<(), TuiError> {
        let size = self.terminal.size()?;
        let body_height = size.height.saturating_sub(2) as usize;
        let count = self.row_count();
        self.state.clamp_cursor(count);
        self.state.ensure_cursor_visible(body_height);

        let state = &self.state;
        let styles = &self.styles;
        let header = self.header.as_str();
        self.terminal.draw(|frame| draw_ui(frame, state, styles, header))?;
        Ok(())
    }
}

/// Render the full UI into `frame`. Pure with respect to `state`.
pub fn draw_ui(frame: &mut Frame, state: &AppState, styles: &ExplorerStyles, header: &str) {
    let area = frame.area();
    let chunks = Layout::vertical([
        Constraint::Length(1),
        Constraint::Min(0),
        Constraint::Length(1),
    ])
    .split(area);

    frame.render_widget(
        Paragraph::new(Line::from(Span::styled(header.to_string(), styles.header))),
        chunks[0],
    );

    match &state.root {
        RootLoad::Loading => render_centered(frame, chunks[1], vec![Line::from("Loading folders...")]),
        RootLoad::Failed(message) => render_centered(
            frame,
            chunks[1],
            vec![
                Line::from(Span::styled(format!("Failed to load: {message}"), styles.error)),
                Line::from(""),
                Line::from(Span::styled("press R to reload", styles.secondary)),
            ],
        ),
        RootLoad::Ready(items) => render_rows(frame, chunks[1], items, state, styles),
    }

    frame.render_widget(
        Paragraph::new(Line::from(Span::styled(
            " j/k move  enter toggle  r retry  R reload  ? help  q quit",
            styles.footer,
        ))),
        chunks[2],
    );

    if state.help_visible {
        help::render_help(frame, area);
    }
}

fn render_centered(frame: &mut Frame, area: Rect, message: Vec<Line>) {
    let pad = (area.height as usize).saturating_sub(message.len()) / 2;
    let mut lines = vec![Line::from(""); pad];
    lines.extend(message);
    frame.render_widget(Paragraph::new(lines).alignment(Alignment::Center), area);
}

fn render_rows(
    frame: &mut Frame,
    area: Rect,
    items: &[FsItem],
    state: &AppState,
    styles: &ExplorerStyles,
) {
    let rows = visible_rows(items, &state.tree);
    let height = area.height as usize;
    let width = area.width as usize;
    let end = (state.scroll + height).min(rows.len());

    let mut lines: Vec<Line> = Vec::with_capacity(end.saturating_sub(state.scroll));
    for (index, row) in rows.iter().enumerate().take(end).skip(state.scroll) {
        let selected = index == state.cursor;
        lines.push(render_row(row, selected, width, styles));
    }
    frame.render_widget(Paragraph::new(lines), area);
}

fn render_row(row: &Row<'_>, selected: bool, width: usize, styles: &ExplorerStyles) -> Line<'static> {
    let indent = "  ".repeat(row.depth);
    let mut line = match &row.kind {
        RowKind::Item {
            item,
            expanded,
            loading,
        } => {
            let disclosure = if item.is_branch() {
                if *expanded {
                    "▾ "
                } else {
                    "▸ "
                }
            } else {
                "  "
            };
            let name_style = if item.is_branch() { styles.folder } else { styles.file };
            let mut spans = vec![
                Span::raw(format!("{indent}{disclosure}{} ", item.glyph())),
                Span::styled(item.label().to_string(), name_style),
            ];
            if *loading && !expanded {
                // A collapsed node can still have a fetch in flight.
                spans.push(Span::styled(" (loading)".to_string(), styles.secondary));
            }
            if let Some(secondary) = item.secondary() {
                let used: usize = spans.iter().map(|s| s.content.width()).sum();
                let pad = width.saturating_sub(used + secondary.width() + 1);
                if pad >= 2 {
                    spans.push(Span::raw(" ".repeat(pad)));
                    spans.push(Span::styled(secondary, styles.secondary));
                }
            }
            Line::from(spans)
        }
        RowKind::Placeholder => Line::from(Span::styled(
            format!("{indent}░░░░░░░░░░░░"),
            styles.placeholder,
        )),
        RowKind::Error { message, .. } => Line::from(vec![
            Span::styled(format!("{indent}✗ Failed to load: {message}"), styles.error),
            Span::styled("  [r to retry]".to_string(), styles.secondary),
        ]),
    };
    if selected {
        line = line.style(styles.cursor);
    }
    line
}

/// Run the TUI against a child source, restoring the terminal on exit.
pub fn run_with_source(
    source: Arc<dyn ChildSource<FsItem>>,
    config: &ResolvedConfig,
    header: String,
) -> Result<(), TuiError> {
    let mut app = TuiApp::new(source, config, header)?;
    let result = app.run();

    disable_raw_mode()?;
    io::stdout().execute(LeaveAlternateScreen)?;
    result
}
