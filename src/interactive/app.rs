use crate::prom::MetricScraper;
use ratatui::widgets::ListState;

#[derive(Debug)]
pub enum ElementInFocus {
    MetricNames,
    SeriesView,
}

#[derive(Debug)]
enum Direction {
    Up,
    Down,
}

pub struct App<'a> {
    pub endpoint: &'a str,
    pub scrape_interval: u64,
    pub metric_scraper: MetricScraper,

    pub focus: ElementInFocus,
    pub metric_list_state: ListState,
    pub series_list_state: ListState,
    pub selected_metric: Option<String>,
    pub selected_series: Option<String>,
    pub should_quit: bool,
}

impl<'a> App<'a> {
    pub fn new(endpoint: &'a str, scrape_interval: u64, metric_scraper: MetricScraper) -> App<'a> {
        App {
            endpoint,
            scrape_interval,
            metric_scraper,
            focus: ElementInFocus::MetricNames,
            metric_list_state: ListState::default().with_selected(Some(0)),
            series_list_state: ListState::default().with_selected(Some(0)),
            selected_metric: None,
            selected_series: None,
            should_quit: false,
        }
    }

    /// Re-resolves the selections against the current scrape history; the
    /// lists shift as new metrics show up between redraws.
    pub fn refresh_selection(&mut self) {
        let history = self.metric_scraper.history();

        let metric_names = history.metric_names();
        clamp_list_state(&mut self.metric_list_state, metric_names.len());
        self.selected_metric = self
            .metric_list_state
            .selected()
            .and_then(|index| metric_names.get(index).cloned());

        let series = match &self.selected_metric {
            Some(metric) => history.series_labels(metric),
            None => Vec::new(),
        };
        clamp_list_state(&mut self.series_list_state, series.len());
        self.selected_series = self
            .series_list_state
            .selected()
            .and_then(|index| series.get(index).cloned());
    }

    fn change_selected_metric(&mut self, direction: Direction) {
        let metric_count = self.metric_scraper.history().metric_names().len();
        update_list_state_with_direction(direction, &mut self.metric_list_state, metric_count);

        // a different metric invalidates the series selection
        self.series_list_state.select(Some(0));
        self.selected_series = None;
        self.refresh_selection();
    }

    fn change_selected_series(&mut self, direction: Direction) {
        let series_count = match &self.selected_metric {
            Some(metric) => self.metric_scraper.history().series_labels(metric).len(),
            None => 0,
        };
        update_list_state_with_direction(direction, &mut self.series_list_state, series_count);
        self.refresh_selection();
    }

    pub fn on_down(&mut self) {
        match self.focus {
            ElementInFocus::MetricNames => self.change_selected_metric(Direction::Down),
            ElementInFocus::SeriesView => self.change_selected_series(Direction::Down),
        }
    }

    pub fn on_up(&mut self) {
        match self.focus {
            ElementInFocus::MetricNames => self.change_selected_metric(Direction::Up),
            ElementInFocus::SeriesView => self.change_selected_series(Direction::Up),
        }
    }

    pub fn on_tab(&mut self) {
        self.focus = match self.focus {
            ElementInFocus::MetricNames => ElementInFocus::SeriesView,
            ElementInFocus::SeriesView => ElementInFocus::MetricNames,
        };
    }
}

fn clamp_list_state(state: &mut ListState, list_len: usize) {
    if list_len == 0 {
        state.select(Some(0));
        return;
    }
    match state.selected() {
        Some(selected) if selected < list_len => {}
        _ => state.select(Some(list_len - 1)),
    }
}

fn update_list_state_with_direction(direction: Direction, state: &mut ListState, list_len: usize) {
    if list_len == 0 {
        return;
    }
    let selected = state.selected().unwrap_or(0);
    match direction {
        Direction::Down => {
            if selected >= list_len - 1 {
                state.select(Some(0));
            } else {
                state.select(Some(selected + 1));
            }
        }
        Direction::Up => {
            if selected > 0 {
                state.select(Some(selected - 1));
            } else {
                state.select(Some(list_len - 1));
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn moving_down_wraps_to_the_top() {
        let mut state = ListState::default().with_selected(Some(2));
        update_list_state_with_direction(Direction::Down, &mut state, 3);
        assert_eq!(state.selected(), Some(0));
    }

    #[test]
    fn moving_up_wraps_to_the_bottom() {
        let mut state = ListState::default().with_selected(Some(0));
        update_list_state_with_direction(Direction::Up, &mut state, 3);
        assert_eq!(state.selected(), Some(2));
    }

    #[test]
    fn empty_lists_are_left_alone() {
        let mut state = ListState::default().with_selected(Some(0));
        update_list_state_with_direction(Direction::Down, &mut state, 0);
        assert_eq!(state.selected(), Some(0));
    }

    #[test]
    fn selection_is_clamped_to_a_shrunken_list() {
        let mut state = ListState::default().with_selected(Some(5));
        clamp_list_state(&mut state, 2);
        assert_eq!(state.selected(), Some(1));
    }
}
