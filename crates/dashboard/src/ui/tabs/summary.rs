//! Summary tab: published estimates next to the computed impacts.

use ratatui::{
    prelude::*,
    widgets::{Block, Borders, Paragraph, Row, Table},
};

use twin_facade::{default_summary, DomainForecast};

use crate::app::App;

fn computed_impact(forecasts: &[DomainForecast], index: usize) -> String {
    forecasts
        .get(index)
        .map(|f| f.summary_row().predicted_impact)
        .unwrap_or_else(|| "--".to_string())
}

/// Draw the impact summary table.
pub fn draw_summary_tab(frame: &mut Frame, area: Rect, app: &App) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(8), Constraint::Min(3)])
        .split(area);

    let rows: Vec<Row> = default_summary()
        .into_iter()
        .enumerate()
        .map(|(i, row)| {
            Row::new(vec![
                row.metric,
                row.predicted_impact,
                computed_impact(&app.intervention_forecasts, i),
                computed_impact(&app.field_forecasts, i),
                row.modeled_by,
            ])
        })
        .collect();

    let table = Table::new(
        rows,
        [
            Constraint::Length(26),
            Constraint::Length(20),
            Constraint::Length(20),
            Constraint::Length(20),
            Constraint::Min(26),
        ],
    )
    .header(
        Row::new(vec!["Metric", "Published", "Intervention", "Field", "Modeled By"])
            .style(Style::default().add_modifier(Modifier::BOLD)),
    )
    .block(
        Block::default()
            .borders(Borders::ALL)
            .title(" Impact Summary "),
    );
    frame.render_widget(table, chunks[0]);

    let settings = &app.intervention;
    let notes = Paragraph::new(vec![
        Line::raw(format!(
            "Intervention: {} years, strength {:.0}%, impact x{:.2}, variability {:.2}, resistance {:.2}",
            settings.years,
            settings.strength_pct,
            settings.impact_scale,
            settings.noise_level,
            settings.resistance
        )),
        Line::raw(format!("Model: {}    Seed: {}", app.smoother.kind.label(), app.seed)),
    ])
    .style(Style::default().fg(Color::Gray))
    .block(Block::default().borders(Borders::ALL).title(" Run "));
    frame.render_widget(notes, chunks[1]);
}
