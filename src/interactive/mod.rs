mod app;
mod ui;

use std::io::{stdout, Stdout};
use std::time::Duration;

use anyhow::Result;
use crossterm::event::{self, Event, KeyCode, KeyEventKind};
use crossterm::execute;
use crossterm::terminal::{
    disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen,
};
use ratatui::backend::CrosstermBackend;
use ratatui::Terminal;

use self::app::App;
use crate::prom::MetricScraper;

const TICK_RATE: Duration = Duration::from_millis(250);

/// Runs the dashboard until the user quits. The scraper keeps collecting in
/// the background; the UI only ever reads its history.
pub async fn show(endpoint: String, scrape_interval: u64) -> Result<()> {
    let metric_scraper = MetricScraper::new(endpoint.clone(), scrape_interval);
    let mut app = App::new(&endpoint, scrape_interval, metric_scraper);

    let mut terminal = init_terminal()?;
    let result = run(&mut terminal, &mut app);
    restore_terminal()?;
    result
}

fn run(terminal: &mut Terminal<CrosstermBackend<Stdout>>, app: &mut App) -> Result<()> {
    loop {
        app.refresh_selection();
        terminal.draw(|f| ui::draw(f, app))?;

        if event::poll(TICK_RATE)? {
            if let Event::Key(key) = event::read()? {
                if key.kind != KeyEventKind::Press {
                    continue;
                }
                match key.code {
                    KeyCode::Char('q') | KeyCode::Esc => app.should_quit = true,
                    KeyCode::Down | KeyCode::Char('j') => app.on_down(),
                    KeyCode::Up | KeyCode::Char('k') => app.on_up(),
                    KeyCode::Tab => app.on_tab(),
                    _ => {}
                }
            }
        }
        if app.should_quit {
            log::info!("Closing the dashboard");
            return Ok(());
        }
    }
}

fn init_terminal() -> Result<Terminal<CrosstermBackend<Stdout>>> {
    enable_raw_mode()?;
    let mut out = stdout();
    execute!(out, EnterAlternateScreen)?;
    Ok(Terminal::new(CrosstermBackend::new(out))?)
}

fn restore_terminal() -> Result<()> {
    disable_raw_mode()?;
    execute!(stdout(), LeaveAlternateScreen)?;
    Ok(())
}
