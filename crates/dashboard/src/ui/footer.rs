//! Footer bar with keyboard shortcuts and status.

use ratatui::{
    prelude::*,
    widgets::{Block, Borders, Paragraph},
};

use crate::app::{App, Tab};

/// Draw the footer bar with context-sensitive help.
pub fn draw_footer(frame: &mut Frame, area: Rect, app: &App) {
    let tab_help = match app.current_tab {
        Tab::Intervention | Tab::Field => "[↑↓] Select  [←→] Adjust  [m] Model  [r] Reseed",
        Tab::Summary => "[m] Model  [r] Reseed",
    };
    let help_text = format!("{tab_help}  |  [1-3] Tab  [Tab] Next  [q] Quit");

    let (display_text, style) = match &app.status {
        Some(status) if status.error => (
            format!("{} | {}", status.text, help_text),
            Style::default().fg(Color::Red),
        ),
        Some(status) => (
            format!("{} | {}", status.text, help_text),
            Style::default().fg(Color::DarkGray),
        ),
        None => (help_text, Style::default().fg(Color::DarkGray)),
    };

    let footer = Paragraph::new(display_text)
        .style(style)
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::TOP));

    frame.render_widget(footer, area);
}
