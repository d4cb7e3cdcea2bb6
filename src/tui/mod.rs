//! TUI module - Terminal dashboard with ratatui

use anyhow::Result;
use chrono::{Local, Utc};
use crossterm::{
    event::{self, Event, KeyCode, KeyEventKind},
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
    ExecutableCommand,
};
use ratatui::{
    prelude::*,
    widgets::{BarChart, Block, Borders, Cell, Gauge, Paragraph, Row, Table},
};
use std::io::{stdout, Stdout};

use crate::db::KeyValueStore;
use crate::models::Workout;
use crate::store::WorkoutStore;

type Tui = Terminal<CrosstermBackend<Stdout>>;

/// Dashboard state
pub struct App<S: KeyValueStore> {
    store: WorkoutStore<S>,
    should_quit: bool,
}

impl<S: KeyValueStore> App<S> {
    pub fn new(store: WorkoutStore<S>) -> Self {
        Self { store, should_quit: false }
    }

    /// Run the TUI application
    pub fn run(&mut self) -> Result<()> {
        let mut terminal = init_terminal()?;

        while !self.should_quit {
            terminal.draw(|frame| self.render(frame))?;
            self.handle_events()?;
        }

        restore_terminal()?;
        Ok(())
    }

    fn render(&self, frame: &mut Frame) {
        let area = frame.area();
        let now = Utc::now();

        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(3),
                Constraint::Min(10),
                Constraint::Length(12),
                Constraint::Length(3),
            ])
            .split(area);

        // Header
        let summary = self.store.dashboard_summary(now);
        let header = Paragraph::new(format!(
            "gymstack | {} workouts | {} this week ({:.0}% of weekly goal)",
            summary.total_workouts, summary.this_week, summary.goal_progress
        ))
        .style(Style::default().fg(Color::Cyan).bold())
        .block(Block::default().borders(Borders::ALL));
        frame.render_widget(header, chunks[0]);

        // History table
        let rows: Vec<Row> = self.store.workouts().iter().map(|w| {
            let prs = w.pr_count();
            Row::new(vec![
                Cell::from(history_date(w)),
                Cell::from(w.name.clone()),
                Cell::from(w.exercises.len().to_string()),
                Cell::from(format!("{:.0}", w.volume)),
                Cell::from(if prs > 0 { format!("{} PR", prs) } else { String::new() }),
            ])
        }).collect();

        let table = Table::new(
            rows,
            [
                Constraint::Length(12),
                Constraint::Min(20),
                Constraint::Length(10),
                Constraint::Length(10),
                Constraint::Length(6),
            ],
        )
        .header(Row::new(vec!["Date", "Workout", "Exercises", "Volume", "PRs"])
            .style(Style::default().bold()))
        .block(Block::default().borders(Borders::ALL).title("History"));
        frame.render_widget(table, chunks[1]);

        let bottom = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Percentage(45), Constraint::Percentage(55)])
            .split(chunks[2]);

        self.render_heatmap(frame, bottom[0], now);
        self.render_volume(frame, bottom[1]);

        // Footer
        let footer = Paragraph::new("q: quit | r: reload")
            .style(Style::default().fg(Color::DarkGray))
            .block(Block::default().borders(Borders::ALL));
        frame.render_widget(footer, chunks[3]);
    }

    fn render_heatmap(&self, frame: &mut Frame, area: Rect, now: chrono::DateTime<Utc>) {
        let block = Block::default().borders(Borders::ALL).title("Muscle load (7 days)");
        let inner = block.inner(area);
        frame.render_widget(block, area);

        let heatmap = self.store.muscle_heatmap(now);
        if heatmap.is_empty() {
            frame.render_widget(
                Paragraph::new("No training this week").style(Style::default().fg(Color::DarkGray)),
                inner,
            );
            return;
        }

        let rows = Layout::default()
            .direction(Direction::Vertical)
            .constraints(vec![Constraint::Length(1); heatmap.len()])
            .split(inner);

        for (entry, row) in heatmap.iter().zip(rows.iter()) {
            let gauge = Gauge::default()
                .gauge_style(Style::default().fg(Color::Magenta))
                .ratio((entry.intensity / 100.0).clamp(0.0, 1.0))
                .label(format!("{} {:.0}%", entry.muscle, entry.intensity));
            frame.render_widget(gauge, *row);
        }
    }

    fn render_volume(&self, frame: &mut Frame, area: Rect) {
        let points = self.store.recent_volume_data();
        let data: Vec<(&str, u64)> = points
            .iter()
            .map(|p| (p.label.as_str(), p.volume.max(0.0).round() as u64))
            .collect();

        let chart = BarChart::default()
            .block(Block::default().borders(Borders::ALL).title("Recent volume"))
            .data(data.as_slice())
            .bar_width(5)
            .bar_gap(1)
            .bar_style(Style::default().fg(Color::Green));
        frame.render_widget(chart, area);
    }

    fn handle_events(&mut self) -> Result<()> {
        if event::poll(std::time::Duration::from_millis(100))?
            && let Event::Key(key) = event::read()?
                && key.kind == KeyEventKind::Press {
                    match key.code {
                        KeyCode::Char('q') => self.should_quit = true,
                        KeyCode::Char('r') => self.store.reload(),
                        _ => {}
                    }
                }
        Ok(())
    }
}

fn init_terminal() -> Result<Tui> {
    enable_raw_mode()?;
    stdout().execute(EnterAlternateScreen)?;
    let terminal = Terminal::new(CrosstermBackend::new(stdout()))?;
    Ok(terminal)
}

fn restore_terminal() -> Result<()> {
    disable_raw_mode()?;
    stdout().execute(LeaveAlternateScreen)?;
    Ok(())
}

/// Calendar date of a workout in local time, matching the CLI listing
fn history_date(workout: &Workout) -> String {
    workout.date.with_timezone(&Local).format("%Y-%m-%d").to_string()
}
