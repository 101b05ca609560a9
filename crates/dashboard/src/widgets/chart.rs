//! Chart widgets for forecast curves.

use ratatui::{
    prelude::*,
    symbols::Marker,
    widgets::{Axis, Block, Borders, Chart, Dataset, GraphType},
};

use twin_facade::{DomainForecast, TimeSeries};

/// Owned plot data for one domain; [`ForecastChart::widget`] borrows from it.
pub struct ForecastChart {
    title: String,
    x_label: String,
    y_label: &'static str,
    observed: Vec<(f64, f64)>,
    predicted: Vec<(f64, f64)>,
    reference: Option<(f64, Vec<(f64, f64)>)>,
    x_max: f64,
    y_bounds: [f64; 2],
}

fn to_points(series: &TimeSeries) -> Vec<(f64, f64)> {
    series.iter().map(|p| (p.t as f64, p.value)).collect()
}

impl ForecastChart {
    pub fn new(forecast: &DomainForecast, smoother_label: &str) -> Self {
        let domain = forecast.domain;
        let result = &forecast.result;
        let observed = to_points(&result.observed);
        let predicted = to_points(&result.predicted);
        let x_max = (result.horizon().saturating_sub(1) as f64).max(1.0);

        let reference = domain
            .reference_level()
            .map(|level| (level, vec![(0.0, level), (x_max, level)]));

        let mut y_min = f64::INFINITY;
        let mut y_max = f64::NEG_INFINITY;
        for &(_, v) in observed.iter().chain(predicted.iter()) {
            y_min = y_min.min(v);
            y_max = y_max.max(v);
        }
        if let Some((level, _)) = reference {
            y_min = y_min.min(level);
            y_max = y_max.max(level);
        }
        if !y_min.is_finite() || !y_max.is_finite() {
            y_min = 0.0;
            y_max = 1.0;
        }
        let pad = ((y_max - y_min) * 0.05).max(1.0);

        let fit = result.fit_quality();
        Self {
            title: format!(
                " {} ({}) | {} | RMSE {:.2} R² {:.3} ",
                domain.title(),
                domain.intervention(),
                smoother_label,
                fit.rmse,
                fit.r_squared
            ),
            x_label: format!("Time ({})", forecast.time_unit),
            y_label: domain.y_label(),
            observed,
            predicted,
            reference,
            x_max,
            y_bounds: [y_min - pad, y_max + pad],
        }
    }

    pub fn widget(&self) -> Chart<'_> {
        let mut datasets = vec![
            Dataset::default()
                .name("Observed")
                .marker(Marker::Dot)
                .graph_type(GraphType::Scatter)
                .style(Style::default().fg(Color::Cyan))
                .data(&self.observed),
            Dataset::default()
                .name("Predicted")
                .marker(Marker::Braille)
                .graph_type(GraphType::Line)
                .style(Style::default().fg(Color::Yellow))
                .data(&self.predicted),
        ];

        if let Some((_, line)) = &self.reference {
            datasets.push(
                Dataset::default()
                    .name("WHO limit")
                    .marker(Marker::Braille)
                    .graph_type(GraphType::Line)
                    .style(Style::default().fg(Color::Red))
                    .data(line),
            );
        }

        let [y_min, y_max] = self.y_bounds;
        Chart::new(datasets)
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .title(self.title.as_str()),
            )
            .x_axis(
                Axis::default()
                    .title(self.x_label.as_str())
                    .style(Style::default().fg(Color::Gray))
                    .bounds([0.0, self.x_max])
                    .labels(vec![
                        Span::raw("0"),
                        Span::raw(format!("{:.0}", self.x_max / 2.0)),
                        Span::raw(format!("{:.0}", self.x_max)),
                    ]),
            )
            .y_axis(
                Axis::default()
                    .title(self.y_label)
                    .style(Style::default().fg(Color::Gray))
                    .bounds([y_min, y_max])
                    .labels(vec![
                        Span::raw(format!("{:.1}", y_min)),
                        Span::raw(format!("{:.1}", (y_min + y_max) / 2.0)),
                        Span::raw(format!("{:.1}", y_max)),
                    ]),
            )
    }
}
