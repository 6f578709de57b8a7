use chrono::{DateTime, Local};
use ratatui::{
    layout::{Constraint, Rect},
    style::{Color, Modifier, Style},
    symbols,
    text::Span,
    widgets::{Axis, Block, Borders, Chart, Dataset, GraphType, Row, Table, TableState},
    Frame,
};

use super::format_value;
use crate::prom::HistoryPoint;

/// History view for the selected series: value table on the left, line
/// chart on the right.
pub fn draw(f: &mut Frame, chunk_right: Rect, chunk_left: Rect, points: &[HistoryPoint]) {
    match GraphData::parse(points) {
        Some(graph_data) => draw_graph(f, chunk_right, &graph_data),
        None => draw_empty_graph(f, chunk_right),
    }
    draw_table(f, chunk_left, points);
}

pub fn draw_empty(f: &mut Frame, chunk_right: Rect, chunk_left: Rect) {
    draw_empty_graph(f, chunk_right);
    draw_table(f, chunk_left, &[]);
}

struct GraphData {
    data: Vec<(f64, f64)>,
    x_min: f64,
    x_max: f64,
    y_min: f64,
    y_max: f64,
    first_time: DateTime<Local>,
    last_time: DateTime<Local>,
}

impl GraphData {
    #[allow(clippy::cast_precision_loss)]
    fn parse(points: &[HistoryPoint]) -> Option<GraphData> {
        let first = points.first()?;
        let last = points.last()?;
        let data: Vec<(f64, f64)> = points
            .iter()
            .map(|point| (point.time.timestamp() as f64, point.value))
            .collect();
        let y_min = data.iter().map(|p| p.1).fold(f64::INFINITY, f64::min);
        let y_max = data.iter().map(|p| p.1).fold(f64::NEG_INFINITY, f64::max);
        Some(GraphData {
            x_min: data[0].0,
            x_max: data[data.len() - 1].0,
            y_min,
            y_max,
            first_time: first.time,
            last_time: last.time,
            data,
        })
    }
}

fn draw_table(f: &mut Frame, area: Rect, points: &[HistoryPoint]) {
    let title = format!("History ({})", points.len());

    let rows = points
        .iter()
        .map(|point| Row::new(vec![point.time.to_rfc2822(), format_value(point.value)]));

    let t = Table::new(
        rows,
        &[
            Constraint::Length(50),
            Constraint::Length(15),
            Constraint::Percentage(100),
        ],
    )
    .block(Block::default().borders(Borders::ALL).title(title))
    .header(Row::new(vec!["Time", "Value"]).style(Style::default().add_modifier(Modifier::BOLD)))
    .highlight_style(Style::default().add_modifier(Modifier::BOLD));

    let mut state = TableState::default();
    state.select(Some(points.len().saturating_sub(1)));

    f.render_stateful_widget(t, area, &mut state);
}

fn draw_graph(f: &mut Frame, area: Rect, points: &GraphData) {
    let datasets = vec![Dataset::default()
        .marker(symbols::Marker::Braille)
        .style(Style::default().fg(Color::LightGreen))
        .graph_type(GraphType::Line)
        .data(&points.data)];

    let mut five_percent_span = (points.y_max - points.y_min) * 0.05;
    if five_percent_span == 0.0 {
        five_percent_span = 1.0;
    }
    let y_min_axis = points.y_min - five_percent_span;
    let y_max_axis = points.y_max + five_percent_span;

    let chart = Chart::new(datasets)
        .block(Block::default().title("Graph").borders(Borders::ALL))
        .x_axis(
            Axis::default()
                .labels(vec![
                    Span::raw(points.first_time.format("%H:%M:%S").to_string()),
                    Span::raw(points.last_time.format("%H:%M:%S").to_string()),
                ])
                .bounds([points.x_min, points.x_max]),
        )
        .y_axis(
            Axis::default()
                .labels(vec![
                    Span::raw(format_value(y_min_axis)),
                    Span::raw(format_value(y_max_axis)),
                ])
                .bounds([y_min_axis, y_max_axis]),
        );
    f.render_widget(chart, area);
}

fn draw_empty_graph(f: &mut Frame, area: Rect) {
    let chart = Chart::new(vec![])
        .block(Block::default().title("Graph").borders(Borders::ALL))
        .x_axis(Axis::default())
        .y_axis(Axis::default());
    f.render_widget(chart, area);
}
