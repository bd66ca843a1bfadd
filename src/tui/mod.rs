//! Ratatui-based terminal UI.
//!
//! The TUI is a read-only viewer: it runs the pipeline once, then renders the
//! fixed and orbiting profiles (alone or overlaid) next to a results panel.
//! Profiles can be written to DXF from inside the viewer.

use std::io;
use std::path::PathBuf;
use std::time::Duration;

use crossterm::{
    event::{self, Event, KeyCode, KeyEventKind},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use nalgebra::Point2;
use plotters::style::RGBColor;
use ratatui::{
    Terminal,
    backend::CrosstermBackend,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Style},
    text::{Line, Span, Text},
    widgets::{Block, Borders, Clear, Paragraph, Wrap},
};

use crate::app::pipeline::{RunOutput, run_pipeline};
use crate::domain::{RunConfig, ScrollProfile};
use crate::error::AppError;

mod plotters_chart;

use plotters_chart::{ChartSeries, ScrollChart};

const FIXED_COLOR: RGBColor = RGBColor(100, 149, 237);
const ORBITING_COLOR: RGBColor = RGBColor(220, 20, 60);

/// Start the TUI.
///
/// The pipeline runs before the terminal is taken over, so geometry errors are
/// reported like any other CLI failure.
pub fn run(config: RunConfig) -> Result<(), AppError> {
    let output = run_pipeline(&config.params, &config.settings)?;
    let dxf_dir = config.dxf_dir.unwrap_or_else(|| PathBuf::from("."));

    let _guard = TerminalGuard::new()?;

    let backend = CrosstermBackend::new(io::stdout());
    let mut terminal = Terminal::new(backend)
        .map_err(|e| AppError::new(2, format!("Failed to initialize terminal: {e}")))?;

    let mut app = App::new(output, dxf_dir);
    app.event_loop(&mut terminal)
}

/// Ensures the terminal is restored (raw mode, alternate screen) on exit.
struct TerminalGuard;

impl TerminalGuard {
    fn new() -> Result<Self, AppError> {
        enable_raw_mode().map_err(|e| AppError::new(2, format!("Failed to enable raw mode: {e}")))?;
        if let Err(e) = execute!(io::stdout(), EnterAlternateScreen) {
            let _ = disable_raw_mode();
            return Err(AppError::new(2, format!("Failed to enter alternate screen: {e}")));
        }
        Ok(Self)
    }
}

impl Drop for TerminalGuard {
    fn drop(&mut self) {
        let _ = disable_raw_mode();
        let _ = execute!(io::stdout(), LeaveAlternateScreen);
    }
}

/// Which profiles the chart shows.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum View {
    Fixed,
    Orbiting,
    Both,
}

impl View {
    fn next(self) -> Self {
        match self {
            View::Fixed => View::Orbiting,
            View::Orbiting => View::Both,
            View::Both => View::Fixed,
        }
    }

    fn title(self) -> &'static str {
        match self {
            View::Fixed => "Fixed scroll",
            View::Orbiting => "Orbiting scroll",
            View::Both => "Fixed + orbiting",
        }
    }
}

struct App {
    run: RunOutput,
    view: View,
    dxf_dir: PathBuf,
    summary: String,
    status: String,
}

impl App {
    fn new(run: RunOutput, dxf_dir: PathBuf) -> Self {
        let summary = crate::report::format_run_summary(&run);
        Self {
            run,
            view: View::Both,
            dxf_dir,
            summary,
            status: "Ready.".to_string(),
        }
    }

    fn event_loop<B: ratatui::backend::Backend>(&mut self, terminal: &mut Terminal<B>) -> Result<(), AppError> {
        let mut needs_redraw = true;

        loop {
            if needs_redraw {
                terminal
                    .draw(|f| self.draw(f))
                    .map_err(|e| AppError::new(2, format!("Terminal draw error: {e}")))?;
                needs_redraw = false;
            }

            if !event::poll(Duration::from_millis(100))
                .map_err(|e| AppError::new(2, format!("Event poll error: {e}")))?
            {
                continue;
            }

            match event::read().map_err(|e| AppError::new(2, format!("Event read error: {e}")))? {
                Event::Key(key) => {
                    if key.kind != KeyEventKind::Press {
                        continue;
                    }
                    if self.handle_key(key.code) {
                        break;
                    }
                    needs_redraw = true;
                }
                Event::Resize(_, _) => {
                    needs_redraw = true;
                }
                _ => {}
            }
        }

        Ok(())
    }

    /// Returns `true` when the viewer should exit.
    fn handle_key(&mut self, code: KeyCode) -> bool {
        match code {
            KeyCode::Char('q') | KeyCode::Esc => return true,
            KeyCode::Tab | KeyCode::Char('v') => self.view = self.view.next(),
            KeyCode::Char('f') => self.view = View::Fixed,
            KeyCode::Char('o') => self.view = View::Orbiting,
            KeyCode::Char('b') => self.view = View::Both,
            KeyCode::Char('e') => self.export_dxf(),
            _ => {}
        }
        false
    }

    fn export_dxf(&mut self) {
        let mut written = Vec::new();
        for profile in [&self.run.fixed, &self.run.orbiting] {
            match crate::io::write_profile_dxf(&self.dxf_dir, profile) {
                Ok(path) => written.push(path.display().to_string()),
                Err(err) => {
                    self.status = format!("DXF export failed: {err}");
                    return;
                }
            }
        }
        self.status = format!("Wrote {}", written.join(", "));
    }

    fn visible_profiles(&self) -> Vec<(&ScrollProfile, RGBColor)> {
        match self.view {
            View::Fixed => vec![(&self.run.fixed, FIXED_COLOR)],
            View::Orbiting => vec![(&self.run.orbiting, ORBITING_COLOR)],
            View::Both => vec![(&self.run.fixed, FIXED_COLOR), (&self.run.orbiting, ORBITING_COLOR)],
        }
    }

    fn draw(&mut self, frame: &mut ratatui::Frame<'_>) {
        let size = frame.area();
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Length(3), Constraint::Min(0), Constraint::Length(3)])
            .split(size);

        self.draw_header(frame, chunks[0]);
        self.draw_body(frame, chunks[1]);
        self.draw_footer(frame, chunks[2]);
    }

    fn draw_header(&self, frame: &mut ratatui::Frame<'_>, area: Rect) {
        let d = &self.run.dimensions;
        let safety = if self.run.safety.is_safe() { "SAFE" } else { "FAIL" };
        let line = Line::from(vec![
            Span::styled("scroll", Style::default().fg(Color::Cyan)),
            Span::styled(
                format!(
                    " | V={:.2} cc | rb={:.4} mm | ro={:.4} mm | {safety}",
                    self.run.params.target_volume_cc,
                    d.base_radius.get(),
                    d.orbiting_radius.get(),
                ),
                Style::default().fg(Color::Gray),
            ),
        ]);
        let p = Paragraph::new(line).block(Block::default().borders(Borders::ALL));
        frame.render_widget(p, area);
    }

    fn draw_body(&self, frame: &mut ratatui::Frame<'_>, area: Rect) {
        let chunks = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Min(0), Constraint::Length(50)])
            .split(area);

        self.draw_chart(frame, chunks[0]);
        self.draw_results(frame, chunks[1]);
    }

    fn draw_chart(&self, frame: &mut ratatui::Frame<'_>, area: Rect) {
        let block = Block::default().title(self.view.title()).borders(Borders::ALL);
        let inner = block.inner(area);
        frame.render_widget(block, area);
        frame.render_widget(Clear, inner);

        let profiles = self.visible_profiles();
        let Some((min, max)) = union_bounds(profiles.iter().map(|(p, _)| *p)) else {
            let msg = Paragraph::new("No finite points to draw.").style(Style::default().fg(Color::Yellow));
            frame.render_widget(msg, inner);
            return;
        };

        let series = chart_series(&profiles);
        let (x_bounds, y_bounds) = chart_bounds(min, max, inner.width, inner.height);
        frame.render_widget(
            ScrollChart {
                series: &series,
                x_bounds,
                y_bounds,
            },
            inner,
        );
    }

    fn draw_results(&self, frame: &mut ratatui::Frame<'_>, area: Rect) {
        let p = Paragraph::new(Text::from(self.summary.as_str()))
            .wrap(Wrap { trim: false })
            .block(Block::default().title("Results").borders(Borders::ALL));
        frame.render_widget(p, area);
    }

    fn draw_footer(&self, frame: &mut ratatui::Frame<'_>, area: Rect) {
        let help = "Tab view  f fixed  o orbiting  b both  e export DXF  q quit";
        let line = Line::from(vec![
            Span::styled(help, Style::default().fg(Color::Gray)),
            Span::raw(" | "),
            Span::styled(&self.status, Style::default().fg(Color::Yellow)),
        ]);
        let p = Paragraph::new(line).block(Block::default().borders(Borders::ALL));
        frame.render_widget(p, area);
    }
}

/// One series per curve, so curves are not joined to each other.
fn chart_series(profiles: &[(&ScrollProfile, RGBColor)]) -> Vec<ChartSeries> {
    profiles
        .iter()
        .flat_map(|(profile, color)| {
            profile.curves().into_iter().map(move |(_, curve)| ChartSeries {
                points: curve.points.iter().map(|p| (p.x, p.y)).collect(),
                color: *color,
            })
        })
        .collect()
}

fn union_bounds<'a>(
    profiles: impl Iterator<Item = &'a ScrollProfile>,
) -> Option<(Point2<f64>, Point2<f64>)> {
    profiles.filter_map(|p| p.bounds()).reduce(|(amin, amax), (bmin, bmax)| {
        (
            Point2::new(amin.x.min(bmin.x), amin.y.min(bmin.y)),
            Point2::new(amax.x.max(bmax.x), amax.y.max(bmax.y)),
        )
    })
}

/// Padded chart bounds with equal mm-per-cell scaling on both axes.
///
/// A terminal cell is about twice as tall as it is wide.
fn chart_bounds(min: Point2<f64>, max: Point2<f64>, cols: u16, rows: u16) -> ([f64; 2], [f64; 2]) {
    let span = (max.x - min.x).max(max.y - min.y);
    let pad = if span > 0.0 { span * 0.05 } else { 1.0 };

    let cols = f64::from(cols.max(1));
    let rows = f64::from(rows.max(1)) * 2.0;
    let per_unit = ((max.x - min.x + 2.0 * pad) / cols).max((max.y - min.y + 2.0 * pad) / rows);

    let cx = 0.5 * (min.x + max.x);
    let cy = 0.5 * (min.y + max.y);
    let half_w = 0.5 * per_unit * cols;
    let half_h = 0.5 * per_unit * rows;
    ([cx - half_w, cx + half_w], [cy - half_h, cy + half_h])
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{DesignParameters, SolverSettings};

    fn app() -> App {
        let run = run_pipeline(&DesignParameters::default(), &SolverSettings::default()).unwrap();
        App::new(run, std::env::temp_dir())
    }

    #[test]
    fn view_cycles_through_all_modes() {
        assert_eq!(View::Fixed.next(), View::Orbiting);
        assert_eq!(View::Orbiting.next(), View::Both);
        assert_eq!(View::Both.next(), View::Fixed);
    }

    #[test]
    fn keys_switch_views_and_quit() {
        let mut app = app();
        assert_eq!(app.view, View::Both);
        assert!(!app.handle_key(KeyCode::Char('f')));
        assert_eq!(app.view, View::Fixed);
        assert!(!app.handle_key(KeyCode::Tab));
        assert_eq!(app.view, View::Orbiting);
        assert_eq!(app.visible_profiles().len(), 1);
        assert!(!app.handle_key(KeyCode::Char('b')));
        assert_eq!(app.visible_profiles().len(), 2);
        assert!(app.handle_key(KeyCode::Char('q')));
        assert!(app.handle_key(KeyCode::Esc));
    }

    #[test]
    fn series_are_per_curve() {
        let app = app();
        let series = chart_series(&app.visible_profiles());
        assert_eq!(series.len(), 10);
        assert_eq!(series[0].points.len(), 600);
        assert_eq!(series[0].color, FIXED_COLOR);
        assert_eq!(series[9].color, ORBITING_COLOR);
    }

    #[test]
    fn chart_bounds_contain_data_with_equal_scale() {
        let min = Point2::new(-4.0, -1.0);
        let max = Point2::new(6.0, 3.0);
        let (xb, yb) = chart_bounds(min, max, 100, 25);
        assert!(xb[0] < min.x && xb[1] > max.x);
        assert!(yb[0] < min.y && yb[1] > max.y);

        let mm_per_col = (xb[1] - xb[0]) / 100.0;
        let mm_per_half_row = (yb[1] - yb[0]) / 50.0;
        assert!((mm_per_col - mm_per_half_row).abs() < 1e-12);
    }

    #[test]
    fn chart_bounds_handle_a_single_point() {
        let p = Point2::new(1.0, 1.0);
        let (xb, yb) = chart_bounds(p, p, 40, 20);
        assert!(xb[1] > xb[0] && yb[1] > yb[0]);
    }

    #[test]
    fn export_writes_both_profiles() {
        let mut app = app();
        app.dxf_dir = std::env::temp_dir().join(format!("scroll-tui-{}", std::process::id()));
        app.handle_key(KeyCode::Char('e'));
        assert!(app.status.starts_with("Wrote"));
        assert!(app.dxf_dir.join("fixed_scroll.dxf").exists());
        assert!(app.dxf_dir.join("orbiting_scroll.dxf").exists());
        let _ = std::fs::remove_dir_all(&app.dxf_dir);
    }
}
