//! Main layout for the dashboard.

use ratatui::{
    prelude::*,
    widgets::{Block, Borders, Tabs},
};

use super::footer::draw_footer;
use super::header::draw_header;
use super::tabs::{draw_scenario_tab, draw_summary_tab};
use crate::app::{App, Tab};

/// Draw the main UI layout.
pub fn draw_ui(frame: &mut Frame, app: &App) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(2),  // Header
            Constraint::Length(3),  // Tab bar
            Constraint::Min(10),    // Content
            Constraint::Length(2),  // Footer
        ])
        .split(frame.area());

    draw_header(frame, chunks[0], app);
    draw_tab_bar(frame, chunks[1], app);

    match app.current_tab {
        Tab::Intervention | Tab::Field => draw_scenario_tab(frame, chunks[2], app),
        Tab::Summary => draw_summary_tab(frame, chunks[2], app),
    }

    draw_footer(frame, chunks[3], app);
}

fn draw_tab_bar(frame: &mut Frame, area: Rect, app: &App) {
    let titles: Vec<Line> = Tab::all()
        .iter()
        .enumerate()
        .map(|(i, tab)| Line::from(format!(" {} {} ", i + 1, tab.name())))
        .collect();

    let tabs = Tabs::new(titles)
        .block(Block::default().borders(Borders::ALL).title(" Scenarios "))
        .select(app.current_tab.index())
        .style(Style::default().fg(Color::White))
        .highlight_style(
            Style::default()
                .fg(Color::Yellow)
                .add_modifier(Modifier::BOLD),
        )
        .divider("|");

    frame.render_widget(tabs, area);
}
