mod history;

use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, Paragraph},
    Frame,
};

use super::app::{App, ElementInFocus};

pub fn draw(f: &mut Frame, app: &mut App) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(4), Constraint::Min(8)].as_ref())
        .split(f.size());

    draw_header(f, chunks[0], app);
    draw_body(f, chunks[1], app);
}

fn draw_header(f: &mut Frame, area: Rect, app: &App) {
    let text = vec![
        Line::from(vec![
            Span::styled("endpoint: ", Style::default().add_modifier(Modifier::BOLD)),
            Span::raw(app.endpoint),
            Span::raw(format!(", scraped every {}s", app.scrape_interval)),
        ]),
        Line::from(vec![
            Span::styled("controls: ", Style::default().add_modifier(Modifier::BOLD)),
            Span::raw("up/down = scroll, tab = switch pane, q = quit"),
        ]),
    ];
    let header = Paragraph::new(text).block(
        Block::default()
            .title(Span::styled(
                "prompush",
                Style::default().add_modifier(Modifier::BOLD),
            ))
            .borders(Borders::ALL),
    );
    f.render_widget(header, area);
}

fn draw_body(f: &mut Frame, area: Rect, app: &mut App) {
    let chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(30), Constraint::Percentage(70)].as_ref())
        .split(area);

    draw_metric_list(f, chunks[0], app);

    let right = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Percentage(30), Constraint::Percentage(70)].as_ref())
        .split(chunks[1]);
    draw_series_list(f, right[0], app);
    draw_history(f, right[1], app);
}

fn draw_metric_list(f: &mut Frame, area: Rect, app: &mut App) {
    let metric_names = app.metric_scraper.history().metric_names();
    let items: Vec<ListItem> = metric_names
        .iter()
        .map(|name| ListItem::new(name.clone()))
        .collect();
    let focused = matches!(app.focus, ElementInFocus::MetricNames);
    let list = List::new(items)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(format!("Metrics ({})", metric_names.len()))
                .border_style(border_style(focused)),
        )
        .highlight_style(
            Style::default()
                .add_modifier(Modifier::BOLD)
                .bg(Color::DarkGray),
        )
        .highlight_symbol(">> ");
    f.render_stateful_widget(list, area, &mut app.metric_list_state);
}

fn draw_series_list(f: &mut Frame, area: Rect, app: &mut App) {
    let series = match &app.selected_metric {
        Some(metric) => app.metric_scraper.history().series_labels(metric),
        None => Vec::new(),
    };
    let items: Vec<ListItem> = series
        .iter()
        .map(|labels| ListItem::new(labels.clone()))
        .collect();
    let focused = matches!(app.focus, ElementInFocus::SeriesView);
    let list = List::new(items)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(format!("Series ({})", series.len()))
                .border_style(border_style(focused)),
        )
        .highlight_style(
            Style::default()
                .add_modifier(Modifier::BOLD)
                .bg(Color::DarkGray),
        )
        .highlight_symbol(">> ");
    f.render_stateful_widget(list, area, &mut app.series_list_state);
}

fn draw_history(f: &mut Frame, area: Rect, app: &App) {
    let chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(40), Constraint::Percentage(60)].as_ref())
        .split(area);

    if let (Some(metric), Some(series)) = (&app.selected_metric, &app.selected_series) {
        let history = app.metric_scraper.history();
        if let Some(points) = history.points(metric, series) {
            if !points.is_empty() {
                history::draw(f, chunks[1], chunks[0], points);
                return;
            }
        }
    }
    history::draw_empty(f, chunks[1], chunks[0]);
}

fn border_style(focused: bool) -> Style {
    if focused {
        Style::default().fg(Color::LightGreen)
    } else {
        Style::default()
    }
}

pub(crate) fn format_value(value: f64) -> String {
    if value == value.trunc() {
        format!("{value:.0}")
    } else {
        format!("{value:.3}")
    }
}
