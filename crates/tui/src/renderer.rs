use std::io::stdout;

use anyhow::Result;
use crossterm::{
    event::{
        self, DisableMouseCapture, EnableMouseCapture, Event, KeyCode, KeyEventKind, MouseEventKind,
    },
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use ratatui::{
    Frame, Terminal,
    backend::{Backend, CrosstermBackend},
    layout::{Constraint, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Gauge, List, ListItem, Paragraph, Sparkline},
};
use scrollvis_core::data::EnergyKind;
use scrollvis_core::{SECTION_NAMES, Scene, ScrollDriver, StoryConfig, StoryData};
use scrollvis_protocol::Tone;

fn tone_to_color(tone: Tone) -> Color {
    match tone {
        Tone::DryLand => Color::Rgb(196, 160, 100),
        Tone::DryOcean => Color::Rgb(120, 100, 80),
        Tone::RichLand => Color::Green,
        Tone::RichOcean => Color::Blue,
        Tone::Graticule => Color::DarkGray,
        Tone::TemperatureLine => Color::Gray,
        Tone::TemperatureHighlight => Color::Red,
        Tone::Co2Line => Color::Rgb(120, 120, 120),
        Tone::Co2RateLine => Color::LightRed,
        Tone::SolarCircle => Color::Yellow,
        Tone::WindCircle => Color::Cyan,
        Tone::HydroCircle => Color::LightBlue,
        Tone::CarbonCircle => Color::DarkGray,
        Tone::MapLand => Color::Rgb(60, 60, 60),
        Tone::RankDot => Color::LightGreen,
        Tone::StepText => Color::White,
    }
}

/// What the main pane shows, picked from the settled scene.
enum View {
    Globe { rich: bool },
    Line { label: &'static str, series: Vec<f64>, tone: Tone },
    Map(EnergyKind),
    Ranking,
    Blank,
}

struct App<'a> {
    data: &'a StoryData,
    driver: ScrollDriver,
    scene: Scene,
    map_year: u16,
    scroll_top: f64,
    step_height: f64,
    last_error: Option<String>,
}

impl App<'_> {
    fn max_scroll(&self) -> f64 {
        self.step_height * SECTION_NAMES.len() as f64
    }

    fn scroll_by(&mut self, delta: f64) {
        self.jump(self.scroll_top + delta);
    }

    fn jump(&mut self, scroll_top: f64) {
        self.scroll_top = scroll_top.clamp(0.0, self.max_scroll());
        match self.driver.scroll_to(self.scroll_top) {
            Ok(commands) => {
                self.scene.apply(&commands);
                self.last_error = None;
            }
            Err(e) => {
                tracing::warn!(error = %e, scroll_top = self.scroll_top, "scroll rejected");
                self.last_error = Some(e.to_string());
            }
        }
    }

    fn view(&self) -> View {
        let visible = |selector: &str| self.scene.is_visible(selector);
        let series = |f: fn(&scrollvis_core::data::TempEmissionRow) -> f64| {
            self.data.temp_emissions.iter().map(f).collect::<Vec<_>>()
        };
        if visible(".co2_ratio_plot") {
            View::Line {
                label: "Annual CO2 emission rate",
                series: series(|r| r.annual_emission_rate),
                tone: Tone::Co2RateLine,
            }
        } else if visible(".co2_plot") {
            View::Line {
                label: "CO2 emissions",
                series: series(|r| r.co2),
                tone: Tone::Co2Line,
            }
        } else if visible(".temp_plot") {
            let tone = self
                .scene
                .get("#temp_path")
                .and_then(|m| m.stroke)
                .unwrap_or(Tone::TemperatureLine);
            View::Line {
                label: "Global temperature anomaly",
                series: series(|r| r.temperature),
                tone,
            }
        } else if let Some(kind) = [EnergyKind::Hydro, EnergyKind::Wind, EnergyKind::Solar]
            .into_iter()
            .find(|k| visible(&format!(".map-2d-{} circle", k.to_string().to_lowercase())))
        {
            View::Map(kind)
        } else if visible("#top_countries_ratio") {
            View::Ranking
        } else if visible(".rich_earth") {
            View::Globe { rich: true }
        } else if visible(".dry_earth") {
            View::Globe { rich: false }
        } else {
            View::Blank
        }
    }
}

pub fn render_tui(
    data: &StoryData,
    driver: ScrollDriver,
    config: &StoryConfig,
    step_height: f64,
) -> Result<()> {
    enable_raw_mode()?;
    let mut stdout = stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let mut app = App {
        data,
        driver,
        scene: Scene::new(),
        map_year: config.map_year,
        scroll_top: 0.0,
        step_height,
        last_error: None,
    };
    app.jump(0.0);

    let result = run(&mut terminal, &mut app);

    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )?;
    result
}

fn run<B: Backend>(terminal: &mut Terminal<B>, app: &mut App<'_>) -> Result<()> {
    let line_step = app.step_height / 10.0;
    loop {
        terminal.draw(|frame| draw(frame, app))?;

        if event::poll(std::time::Duration::from_millis(100))? {
            match event::read()? {
                Event::Key(key) if key.kind == KeyEventKind::Press => match key.code {
                    KeyCode::Char('q') | KeyCode::Esc => break,
                    KeyCode::Down | KeyCode::Char('j') => app.scroll_by(line_step),
                    KeyCode::Up | KeyCode::Char('k') => app.scroll_by(-line_step),
                    KeyCode::PageDown | KeyCode::Char(' ') => app.scroll_by(app.step_height),
                    KeyCode::PageUp => app.scroll_by(-app.step_height),
                    KeyCode::Home => app.jump(0.0),
                    KeyCode::End => app.jump(app.max_scroll()),
                    _ => {}
                },
                Event::Mouse(mouse) => match mouse.kind {
                    MouseEventKind::ScrollDown => app.scroll_by(line_step),
                    MouseEventKind::ScrollUp => app.scroll_by(-line_step),
                    _ => {}
                },
                _ => {}
            }
        }
    }
    Ok(())
}

fn draw(frame: &mut Frame, app: &App<'_>) {
    let [header, body, footer] = Layout::vertical([
        Constraint::Length(1),
        Constraint::Min(0),
        Constraint::Length(1),
    ])
    .areas(frame.area());

    let active = app.driver.active_index();
    let title = active
        .and_then(|i| SECTION_NAMES.get(i))
        .copied()
        .unwrap_or("-");
    frame.render_widget(
        Block::default()
            .title(format!(
                " scrollvis | {title} | ↑↓ scroll | PgUp/PgDn step | q quit "
            ))
            .style(Style::default().fg(Color::White).bg(Color::DarkGray)),
        header,
    );

    let [steps_area, main_area] =
        Layout::horizontal([Constraint::Length(24), Constraint::Min(0)]).areas(body);
    draw_steps(frame, app, steps_area);
    draw_view(frame, app, main_area);

    match &app.last_error {
        Some(err) => frame.render_widget(
            Paragraph::new(err.as_str()).style(Style::default().fg(Color::Red)),
            footer,
        ),
        None => {
            let progress = app.driver.progress().map_or(0.0, |(_, p)| p);
            frame.render_widget(
                Gauge::default()
                    .gauge_style(Style::default().fg(tone_to_color(Tone::StepText)))
                    .ratio(progress)
                    .label(format!("{:.0}%", progress * 100.0)),
                footer,
            );
        }
    }
}

fn draw_steps(frame: &mut Frame, app: &App<'_>, area: Rect) {
    let active = app.driver.active_index();
    let items: Vec<ListItem> = SECTION_NAMES
        .iter()
        .enumerate()
        .map(|(i, name)| {
            let style = if Some(i) == active {
                Style::default()
                    .fg(tone_to_color(Tone::StepText))
                    .add_modifier(Modifier::BOLD)
            } else {
                Style::default().fg(Color::DarkGray)
            };
            ListItem::new(Line::from(Span::styled(format!("{i} {name}"), style)))
        })
        .collect();
    frame.render_widget(
        List::new(items).block(Block::default().borders(Borders::RIGHT).title("steps")),
        area,
    );
}

fn draw_view(frame: &mut Frame, app: &App<'_>, area: Rect) {
    match app.view() {
        View::Globe { rich } => {
            let (land, ocean, label) = if rich {
                (Tone::RichLand, Tone::RichOcean, "A greener planet")
            } else {
                (Tone::DryLand, Tone::DryOcean, "A drying planet")
            };
            let text = vec![
                Line::from(Span::styled(label, Style::default().fg(tone_to_color(land)))),
                Line::from(Span::styled(
                    "~".repeat(usize::from(area.width.saturating_sub(2))),
                    Style::default().fg(tone_to_color(ocean)),
                )),
            ];
            frame.render_widget(
                Paragraph::new(text).block(Block::default().borders(Borders::ALL)),
                area,
            );
        }
        View::Line {
            label,
            series,
            tone,
        } => {
            let min = series.iter().copied().fold(f64::INFINITY, f64::min);
            // Shift so the lowest point sits on the baseline.
            let bars: Vec<u64> = series
                .iter()
                .map(|v| ((v - min) * 100.0).round() as u64)
                .collect();
            frame.render_widget(
                Sparkline::default()
                    .block(Block::default().borders(Borders::ALL).title(label))
                    .style(Style::default().fg(tone_to_color(tone)))
                    .data(&bars),
                area,
            );
        }
        View::Map(kind) => {
            let mut rows = app.data.located_generation(kind, app.map_year);
            rows.sort_by(|a, b| b.generation.total_cmp(&a.generation));
            let max = app.data.generation(kind).max_generation().max(f64::EPSILON);
            let width = usize::from(area.width.saturating_sub(30));
            let color = tone_to_color(match kind {
                EnergyKind::Solar => Tone::SolarCircle,
                EnergyKind::Wind => Tone::WindCircle,
                EnergyKind::Hydro => Tone::HydroCircle,
                EnergyKind::Carbon | EnergyKind::Renewables => Tone::CarbonCircle,
            });
            let lines: Vec<Line> = rows
                .iter()
                .map(|row| {
                    let filled = ((row.generation / max) * width as f64).round() as usize;
                    Line::from(vec![
                        Span::raw(format!("{:<16} ", row.country)),
                        Span::styled("●".repeat(filled.max(1)), Style::default().fg(color)),
                        Span::raw(format!(" {:.1}", row.generation)),
                    ])
                })
                .collect();
            let title = format!("{kind} generation {} (TWh)", app.map_year);
            frame.render_widget(
                Paragraph::new(lines).block(Block::default().borders(Borders::ALL).title(title)),
                area,
            );
        }
        View::Ranking => {
            let lines: Vec<Line> = app
                .data
                .top_countries
                .iter()
                .enumerate()
                .map(|(i, ranked)| {
                    let dot = app
                        .scene
                        .get(&format!(".dot:nth-of-type({})", i + 1))
                        .and_then(|m| m.y_fraction)
                        .unwrap_or(1.0);
                    Line::from(vec![
                        Span::raw(format!("{:<16} ", ranked.country)),
                        Span::styled(
                            format!("{:>5.1}%", ranked.ratio * 100.0),
                            Style::default().fg(tone_to_color(Tone::RankDot)),
                        ),
                        Span::raw(format!("  height {dot:.2}")),
                    ])
                })
                .collect();
            frame.render_widget(
                Paragraph::new(lines).block(
                    Block::default()
                        .borders(Borders::ALL)
                        .title("Renewable share of consumption"),
                ),
                area,
            );
        }
        View::Blank => {
            frame.render_widget(Block::default().borders(Borders::ALL), area);
        }
    }
}
