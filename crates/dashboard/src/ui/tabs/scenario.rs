//! Intervention and Field tabs: slider panel plus one chart per domain.

use ratatui::{
    prelude::*,
    widgets::{Block, Borders, Paragraph},
};

use crate::app::{App, Slider, Tab};
use crate::widgets::ForecastChart;

const BAR_WIDTH: usize = 20;

/// Draw the slider panel and the three domain charts.
pub fn draw_scenario_tab(frame: &mut Frame, area: Rect, app: &App) {
    let chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Length(40), Constraint::Min(40)])
        .split(area);

    draw_sliders(frame, chunks[0], app);
    draw_charts(frame, chunks[1], app);
}

fn slider_bar(slider: Slider, value: f64) -> String {
    let (min, max) = slider.bounds();
    let filled = (((value - min) / (max - min)) * BAR_WIDTH as f64).round() as usize;
    let filled = filled.min(BAR_WIDTH);
    format!("{}{}", "█".repeat(filled), "░".repeat(BAR_WIDTH - filled))
}

fn draw_sliders(frame: &mut Frame, area: Rect, app: &App) {
    let mut lines = Vec::new();
    for (i, slider) in app.sliders().iter().enumerate() {
        let value = app.slider_value(*slider);
        let selected = i == app.selected_slider;
        let style = if selected {
            Style::default()
                .fg(Color::Yellow)
                .add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(Color::White)
        };
        let marker = if selected { "▶ " } else { "  " };
        let (min, max) = slider.bounds();

        lines.push(Line::styled(
            format!("{}{:<22}{:>8.2}", marker, slider.label(), value),
            style,
        ));
        lines.push(Line::from(vec![
            Span::raw("  "),
            Span::styled(slider_bar(*slider, value), style),
            Span::styled(format!(" {}-{}", min, max), Style::default().fg(Color::DarkGray)),
        ]));
    }

    lines.push(Line::raw(""));
    if app.current_tab == Tab::Intervention {
        lines.push(Line::raw(format!(
            "Decay rate: {:.4}",
            app.intervention.decay_rate()
        )));
    }
    lines.push(Line::raw(format!("Model: {}", app.smoother.kind.label())));

    let title = format!(" {} Settings ", app.current_tab.name());
    let panel =
        Paragraph::new(lines).block(Block::default().borders(Borders::ALL).title(title));
    frame.render_widget(panel, area);
}

fn draw_charts(frame: &mut Frame, area: Rect, app: &App) {
    let forecasts = app.forecasts();
    if forecasts.is_empty() {
        let placeholder = Paragraph::new("No forecast available")
            .alignment(Alignment::Center)
            .style(Style::default().fg(Color::DarkGray))
            .block(Block::default().borders(Borders::ALL).title(" Forecast "));
        frame.render_widget(placeholder, area);
        return;
    }

    let constraints: Vec<Constraint> = forecasts
        .iter()
        .map(|_| Constraint::Ratio(1, forecasts.len() as u32))
        .collect();
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints(constraints)
        .split(area);

    for (forecast, chunk) in forecasts.iter().zip(chunks.iter()) {
        let chart = ForecastChart::new(forecast, app.smoother.kind.label());
        frame.render_widget(chart.widget(), *chunk);
    }
}
