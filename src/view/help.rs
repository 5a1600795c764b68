//! Help overlay.

use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Clear, Paragraph};
use ratatui::Frame;

const BINDINGS: [(&str, &str); 8] = [
    ("j / ↓", "move cursor down"),
    ("k / ↑", "move cursor up"),
    ("g / Home", "jump to first row"),
    ("G / End", "jump to last row"),
    ("Enter / Space", "toggle folder, retry on error row"),
    ("r", "retry failed fetch at cursor"),
    ("R", "reload root (discards all state)"),
    ("q / Ctrl-C", "quit"),
];

/// Render the help overlay centered in `area`.
pub fn render_help(frame: &mut Frame, area: Rect) {
    let width = 46.min(area.width);
    let height = (BINDINGS.len() as u16 + 5).min(area.height);
    let popup = Rect {
        x: area.x + (area.width.saturating_sub(width)) / 2,
        y: area.y + (area.height.saturating_sub(height)) / 2,
        width,
        height,
    };

    let mut lines: Vec<Line> = vec![Line::from("")];
    for (keys, what) in BINDINGS {
        lines.push(Line::from(vec![
            Span::styled(format!("  {keys:<14}"), Style::default().add_modifier(Modifier::BOLD)),
            Span::raw(what),
        ]));
    }
    lines.push(Line::from(""));
    lines.push(Line::from(Span::raw("  press ? or Esc to close")));

    let block = Block::default().title(" Help ").borders(Borders::ALL);
    frame.render_widget(Clear, popup);
    frame.render_widget(Paragraph::new(lines).block(block), popup);
}
