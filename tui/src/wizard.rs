//! The five-step wizard. `WizardState` is a plain value with pure transition
//! methods so the state machine can be tested without a terminal; `WizardApp`
//! owns the event loop that multiplexes key input, the progress ticker, and
//! pipeline events.

use std::io;
use std::path::Path;
use std::time::{Duration, Instant};

use anyhow::Result;
use crossterm::{
    event::{self, Event, KeyCode, KeyEvent, KeyModifiers},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::layout::{Alignment, Constraint, Direction, Layout, Rect};
use ratatui::prelude::{CrosstermBackend, Frame, Terminal};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Gauge, Paragraph, Wrap};
use tokio::sync::mpsc;
use tokio::time::interval;

use repodeck_common::{Deck, GenerationSettings, Slide, Theme, Tone};
use repodeck_core::config::Config;
use repodeck_core::demo::demo_deck;
use repodeck_core::pipeline::{self, GenerationRequest, PipelineEvent};

use crate::deck::render_slide;
use crate::pitch;
use crate::theme;

const GITHUB_URL_PREFIX: &str = "https://github.com/";

/// Progress ceiling while the pipeline is still in flight; the bar only
/// reaches 100 once the pipeline actually settles.
const PROGRESS_CEILING: f64 = 90.0;

/// How long the finished processing screen lingers before showing the deck.
const FINISH_DELAY: Duration = Duration::from_secs(1);

const EXAMPLE_CSV: &str = "Month,Revenue\nJan,12000\nFeb,18000\nMar,25000\nApr,32000\nMay,41000\nJun,55000";

pub const STEP_LABELS: [&str; 5] = ["Repo", "Theme", "Settings", "Processing", "Result"];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Step {
    Repo,
    Theme,
    Settings,
    Processing,
    Result,
}

impl Step {
    fn index(self) -> usize {
        match self {
            Step::Repo => 0,
            Step::Theme => 1,
            Step::Settings => 2,
            Step::Processing => 3,
            Step::Result => 4,
        }
    }
}

/// Which settings row has input focus.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SettingsField {
    Tone,
    Charts,
    MediaUrl,
    ChartCsv,
}

const SETTINGS_FIELDS: [SettingsField; 4] = [
    SettingsField::Tone,
    SettingsField::Charts,
    SettingsField::MediaUrl,
    SettingsField::ChartCsv,
];

pub struct WizardState {
    pub step: Step,
    pub repo_url: String,
    pub theme: Theme,
    pub tone: Tone,
    pub include_charts: bool,
    pub chart_csv: String,
    pub media_url: String,
    pub focus: SettingsField,
    pub progress: f64,
    pub status: String,
    pub error: Option<String>,
    pub alert: Option<String>,
    pub deck: Option<Deck>,
    pub demo: bool,
    pub current_slide: usize,
    pub pitch_open: bool,
    pub pitch_index: usize,
    demo_fallback: Deck,
}

impl Default for WizardState {
    fn default() -> Self {
        Self::new()
    }
}

impl WizardState {
    pub fn new() -> Self {
        Self {
            step: Step::Repo,
            repo_url: String::new(),
            theme: Theme::default(),
            tone: Tone::default(),
            include_charts: true,
            chart_csv: String::new(),
            media_url: String::new(),
            focus: SettingsField::Tone,
            progress: 0.0,
            status: String::new(),
            error: None,
            alert: None,
            deck: None,
            demo: false,
            current_slide: 0,
            pitch_open: false,
            pitch_index: 0,
            demo_fallback: demo_deck(),
        }
    }

    pub fn settings(&self) -> GenerationSettings {
        GenerationSettings {
            tone: self.tone,
            include_charts: self.include_charts,
            custom_chart_csv: Some(self.chart_csv.clone()).filter(|csv| !csv.trim().is_empty()),
            media_embed_url: Some(self.media_url.clone()).filter(|url| !url.trim().is_empty()),
        }
    }

    pub fn repo_url_valid(&self) -> bool {
        is_valid_repo_url(&self.repo_url)
    }

    /// Repo -> Theme, guarded by URL shape. Invalid input just blocks the
    /// transition; no error is surfaced.
    pub fn submit_repo(&mut self) -> bool {
        if self.repo_url_valid() {
            self.step = Step::Theme;
            true
        } else {
            false
        }
    }

    pub fn continue_to_settings(&mut self) {
        self.step = Step::Settings;
    }

    /// State-preserving back transitions; Processing and Result have none.
    pub fn back(&mut self) {
        self.step = match self.step {
            Step::Theme => Step::Repo,
            Step::Settings => Step::Theme,
            other => other,
        };
    }

    pub fn begin_processing(&mut self) {
        self.step = Step::Processing;
        self.progress = 0.0;
        self.status = "Analyzing your GitHub repository...".to_string();
        self.error = None;
        self.alert = None;
        self.deck = None;
        self.demo = false;
    }

    /// Cosmetic progress: monotonically non-decreasing, capped until the
    /// pipeline settles.
    pub fn bump_progress(&mut self, amount: f64) {
        if self.step == Step::Processing && self.deck.is_none() {
            self.progress = (self.progress + amount.max(0.0)).min(PROGRESS_CEILING);
        }
    }

    pub fn settle(&mut self, deck: Deck, error: Option<String>) {
        self.demo = error.is_some();
        if error.is_none() {
            self.status = "Your deck is ready!".to_string();
        }
        self.error = error;
        self.deck = Some(deck);
        self.progress = 100.0;
        self.current_slide = 0;
    }

    pub fn finish(&mut self) {
        self.step = Step::Result;
        self.current_slide = 0;
    }

    /// "Start over": clears the deck, error, progress, URL, and custom
    /// chart/media input. Theme and tone choices survive.
    pub fn restart(&mut self) {
        self.step = Step::Repo;
        self.repo_url.clear();
        self.chart_csv.clear();
        self.media_url.clear();
        self.progress = 0.0;
        self.status.clear();
        self.error = None;
        self.alert = None;
        self.deck = None;
        self.demo = false;
        self.current_slide = 0;
        self.pitch_open = false;
        self.pitch_index = 0;
    }

    pub fn deck_for_display(&self) -> &[Slide] {
        match &self.deck {
            Some(deck) if !deck.is_empty() => deck,
            _ => &self.demo_fallback,
        }
    }

    pub fn cycle_theme(&mut self, forward: bool) {
        self.theme = cycle(&Theme::ALL, self.theme, forward);
    }

    pub fn cycle_tone(&mut self, forward: bool) {
        self.tone = cycle(&Tone::ALL, self.tone, forward);
    }

    pub fn cycle_focus(&mut self, forward: bool) {
        self.focus = cycle(&SETTINGS_FIELDS, self.focus, forward);
    }

    pub fn next_slide(&mut self) {
        let last = self.deck_for_display().len().saturating_sub(1);
        if self.current_slide < last {
            self.current_slide += 1;
        }
    }

    pub fn prev_slide(&mut self) {
        self.current_slide = self.current_slide.saturating_sub(1);
    }

    pub fn open_pitch(&mut self) {
        self.pitch_open = true;
        self.pitch_index = 0;
    }

    pub fn pitch_next(&mut self) {
        let last = self.deck_for_display().len().saturating_sub(1);
        if self.pitch_index < last {
            self.pitch_index += 1;
        }
    }

    pub fn pitch_prev(&mut self) {
        self.pitch_index = self.pitch_index.saturating_sub(1);
    }

    pub fn pitch_end(&mut self) {
        self.pitch_index = self.deck_for_display().len().saturating_sub(1);
    }
}

pub fn is_valid_repo_url(url: &str) -> bool {
    url.starts_with(GITHUB_URL_PREFIX) && url.split('/').count() >= 5
}

fn cycle<T: Copy + PartialEq>(items: &[T], current: T, forward: bool) -> T {
    let len = items.len();
    let position = items.iter().position(|item| *item == current).unwrap_or(0);
    let next = if forward {
        (position + 1) % len
    } else {
        (position + len - 1) % len
    };
    items[next]
}

#[derive(Debug, Clone, Default)]
pub struct WizardOptions {
    /// Raw CSV text for the custom chart slide, usually read from a file.
    pub chart_csv: Option<String>,
    /// Tweet or video URL for the media slide.
    pub media_url: Option<String>,
}

pub async fn run_wizard(config: Config, options: WizardOptions) -> Result<()> {
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let mut app = WizardApp::new(config, options);
    let result = app.run(&mut terminal).await;

    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    result
}

struct WizardApp {
    state: WizardState,
    config: Config,
    running: bool,
    events: Option<mpsc::Receiver<PipelineEvent>>,
    finish_at: Option<Instant>,
}

impl WizardApp {
    fn new(config: Config, options: WizardOptions) -> Self {
        let mut state = WizardState::new();
        if let Some(csv) = options.chart_csv {
            state.chart_csv = csv;
        }
        if let Some(url) = options.media_url {
            state.media_url = url;
        }
        Self {
            state,
            config,
            running: true,
            events: None,
            finish_at: None,
        }
    }

    async fn run(&mut self, terminal: &mut Terminal<CrosstermBackend<io::Stdout>>) -> Result<()> {
        let mut ticker = interval(Duration::from_millis(500));

        while self.running {
            terminal.draw(|frame| self.draw(frame))?;

            tokio::select! {
                _ = ticker.tick() => {
                    self.on_tick();
                }
                maybe_event = next_pipeline_event(&mut self.events) => {
                    match maybe_event {
                        Some(event) => self.on_pipeline_event(event),
                        None => self.events = None,
                    }
                }
                poll = tokio::task::spawn_blocking(|| event::poll(Duration::from_millis(50))) => {
                    if let Ok(Ok(true)) = poll {
                        if let Ok(Event::Key(key)) = event::read() {
                            self.on_key(key);
                        }
                    }
                }
            }
        }

        Ok(())
    }

    fn on_tick(&mut self) {
        if self.state.step != Step::Processing {
            return;
        }
        if let Some(at) = self.finish_at {
            if Instant::now() >= at {
                self.finish_at = None;
                self.state.finish();
            }
        } else {
            self.state.bump_progress(rand::random::<f64>() * 15.0);
        }
    }

    fn on_pipeline_event(&mut self, event: PipelineEvent) {
        match event {
            PipelineEvent::Status(status) => self.state.status = status,
            PipelineEvent::Completed { deck } => {
                self.state.settle(deck, None);
                self.finish_at = Some(Instant::now() + FINISH_DELAY);
            }
            PipelineEvent::Failed { message, deck } => {
                self.state.settle(deck, Some(message));
                self.finish_at = Some(Instant::now() + FINISH_DELAY);
            }
        }
    }

    fn start_generation(&mut self) {
        self.state.begin_processing();
        let request = GenerationRequest {
            repo_url: self.state.repo_url.clone(),
            settings: self.state.settings(),
            theme: self.state.theme,
        };
        self.events = Some(pipeline::spawn(self.config.clone(), request));
        self.finish_at = None;
    }

    fn export(&mut self) {
        let deck = self.state.deck_for_display().to_vec();
        match repodeck_pptx::write_file(
            Path::new(repodeck_pptx::DEFAULT_FILENAME),
            &deck,
            self.state.theme,
        ) {
            Ok(()) => {
                self.state.alert = None;
                self.state.status =
                    format!("Exported to {}", repodeck_pptx::DEFAULT_FILENAME);
            }
            Err(err) => {
                tracing::warn!("export failed: {err}");
                self.state.alert = Some(format!("Export failed: {err}"));
            }
        }
    }

    fn on_key(&mut self, key: KeyEvent) {
        if key.modifiers.contains(KeyModifiers::CONTROL)
            && matches!(key.code, KeyCode::Char('q') | KeyCode::Char('c'))
        {
            self.running = false;
            return;
        }

        if self.state.pitch_open {
            self.on_pitch_key(key);
            return;
        }

        match self.state.step {
            Step::Repo => self.on_repo_key(key),
            Step::Theme => self.on_theme_key(key),
            Step::Settings => self.on_settings_key(key),
            Step::Processing => {} // no cancellation once in flight
            Step::Result => self.on_result_key(key),
        }
    }

    fn on_repo_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Enter => {
                self.state.submit_repo();
            }
            KeyCode::Backspace => {
                self.state.repo_url.pop();
            }
            KeyCode::Char(c) => self.state.repo_url.push(c),
            _ => {}
        }
    }

    fn on_theme_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Left => self.state.cycle_theme(false),
            KeyCode::Right => self.state.cycle_theme(true),
            KeyCode::Enter => self.state.continue_to_settings(),
            KeyCode::Esc => self.state.back(),
            _ => {}
        }
    }

    fn on_settings_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Enter => self.start_generation(),
            KeyCode::Esc => self.state.back(),
            KeyCode::Tab | KeyCode::Down => self.state.cycle_focus(true),
            KeyCode::BackTab | KeyCode::Up => self.state.cycle_focus(false),
            KeyCode::Char('e') if key.modifiers.contains(KeyModifiers::CONTROL) => {
                self.state.chart_csv = EXAMPLE_CSV.to_string();
            }
            code => match self.state.focus {
                SettingsField::Tone => match code {
                    KeyCode::Left => self.state.cycle_tone(false),
                    KeyCode::Right => self.state.cycle_tone(true),
                    _ => {}
                },
                SettingsField::Charts => {
                    if code == KeyCode::Char(' ') {
                        self.state.include_charts = !self.state.include_charts;
                    }
                }
                SettingsField::MediaUrl => match code {
                    KeyCode::Char(c) => self.state.media_url.push(c),
                    KeyCode::Backspace => {
                        self.state.media_url.pop();
                    }
                    _ => {}
                },
                SettingsField::ChartCsv => {
                    if code == KeyCode::Backspace {
                        self.state.chart_csv.clear();
                    }
                }
            },
        }
    }

    fn on_result_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Left | KeyCode::Char('h') => self.state.prev_slide(),
            KeyCode::Right | KeyCode::Char('l') => self.state.next_slide(),
            KeyCode::Char('p') => self.state.open_pitch(),
            KeyCode::Char('x') => self.export(),
            KeyCode::Char('n') => self.state.restart(),
            KeyCode::Char('q') | KeyCode::Esc => self.running = false,
            _ => {}
        }
    }

    fn on_pitch_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Right | KeyCode::Char(' ') | KeyCode::Char('l') => self.state.pitch_next(),
            KeyCode::Left | KeyCode::Char('h') => self.state.pitch_prev(),
            KeyCode::Home => self.state.pitch_index = 0,
            KeyCode::End => self.state.pitch_end(),
            KeyCode::Esc | KeyCode::Char('q') => self.state.pitch_open = false,
            _ => {}
        }
    }

    // ---------------------------------------------------------------- draw

    fn draw(&self, frame: &mut Frame) {
        if self.state.pitch_open {
            pitch::draw(frame, &self.state);
            return;
        }

        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(2),
                Constraint::Min(0),
                Constraint::Length(1),
            ])
            .split(frame.area());

        draw_stepper(frame, chunks[0], &self.state);

        match self.state.step {
            Step::Repo => self.draw_repo(frame, chunks[1]),
            Step::Theme => self.draw_theme(frame, chunks[1]),
            Step::Settings => self.draw_settings(frame, chunks[1]),
            Step::Processing => self.draw_processing(frame, chunks[1]),
            Step::Result => self.draw_result(frame, chunks[1]),
        }

        let hint = match self.state.step {
            Step::Repo => "Type a repository URL · Enter continue · Ctrl+Q quit",
            Step::Theme => "←/→ choose a theme · Enter continue · Esc back",
            Step::Settings => {
                "Tab next field · ←/→ adjust · Space toggle · Ctrl+E example CSV · Enter generate · Esc back"
            }
            Step::Processing => "Hang tight, this only takes a moment",
            Step::Result => "←/→ slides · p pitch mode · x export · n new deck · q quit",
        };
        let footer = Paragraph::new(hint)
            .alignment(Alignment::Center)
            .style(Style::default().fg(Color::DarkGray));
        frame.render_widget(footer, chunks[2]);
    }

    fn draw_repo(&self, frame: &mut Frame, area: Rect) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Percentage(25),
                Constraint::Length(4),
                Constraint::Length(3),
                Constraint::Min(0),
            ])
            .split(area);

        let hero = Paragraph::new(vec![
            Line::from(Span::styled(
                "Turn Any GitHub Repo Into a Stunning Pitch Deck",
                Style::default().add_modifier(Modifier::BOLD),
            )),
            Line::default(),
            Line::from(Span::styled(
                "Instantly generate a beautiful, investor-ready pitch deck from any public GitHub repository.",
                Style::default().fg(Color::DarkGray),
            )),
        ])
        .alignment(Alignment::Center)
        .wrap(Wrap { trim: true });
        frame.render_widget(hero, chunks[1]);

        let valid = self.state.repo_url_valid();
        let border = if valid {
            Style::default().fg(Color::Green)
        } else {
            Style::default().fg(Color::DarkGray)
        };
        let input = Paragraph::new(self.state.repo_url.as_str()).block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(border)
                .title("GitHub repository URL"),
        );
        frame.render_widget(input, centered(chunks[2], 70));

        let note = if self.state.repo_url.is_empty() {
            "Paste something like https://github.com/owner/repo".to_string()
        } else if valid {
            "Looks good - press Enter to continue".to_string()
        } else {
            "Keep typing - the URL must point at github.com/owner/repo".to_string()
        };
        let note = Paragraph::new(note)
            .alignment(Alignment::Center)
            .style(Style::default().fg(Color::DarkGray));
        frame.render_widget(note, chunks[3]);
    }

    fn draw_theme(&self, frame: &mut Frame, area: Rect) {
        let body = centered(area, 90);
        let columns = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([
                Constraint::Percentage(33),
                Constraint::Percentage(34),
                Constraint::Percentage(33),
            ])
            .split(body);

        for (column, option) in columns.iter().zip(Theme::ALL) {
            let selected = self.state.theme == option;
            let palette = theme::palette(option);
            let border = if selected {
                Style::default()
                    .fg(palette.accent)
                    .add_modifier(Modifier::BOLD)
            } else {
                Style::default().fg(Color::DarkGray)
            };
            let title = if selected {
                format!("✓ {}", theme::label(option))
            } else {
                theme::label(option).to_string()
            };
            let card = Paragraph::new(vec![
                Line::default(),
                Line::from(Span::styled(
                    "Revenue Growth",
                    Style::default()
                        .fg(palette.accent)
                        .add_modifier(Modifier::BOLD),
                )),
                Line::from(
                    "Q4 revenue increased 127% year-over-year, driven by enterprise adoption.",
                ),
                Line::default(),
                Line::from(Span::styled(
                    theme::description(option),
                    Style::default().fg(Color::DarkGray),
                )),
            ])
            .alignment(Alignment::Center)
            .wrap(Wrap { trim: true })
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .border_style(border)
                    .title(title),
            );
            frame.render_widget(card, *column);
        }
    }

    fn draw_settings(&self, frame: &mut Frame, area: Rect) {
        let body = centered(area, 80);

        let marker = |field: SettingsField| {
            if self.state.focus == field {
                Span::styled("▶ ", Style::default().fg(Color::Blue))
            } else {
                Span::raw("  ")
            }
        };

        let tone_desc = match self.state.tone {
            Tone::Balanced => "Perfect mix of technical and business",
            Tone::Business => "Emphasize market opportunity and growth",
            Tone::Technical => "Highlight architecture and innovation",
        };

        let csv_note = if self.state.chart_csv.trim().is_empty() {
            "empty - Ctrl+E inserts example data".to_string()
        } else {
            let rows = self.state.chart_csv.trim().lines().count().saturating_sub(1);
            format!("{rows} data points detected")
        };

        let media_value = if self.state.media_url.is_empty() {
            Span::styled(
                "type a tweet or YouTube URL (optional)",
                Style::default().fg(Color::DarkGray),
            )
        } else {
            Span::raw(self.state.media_url.clone())
        };

        let lines = vec![
            Line::from(Span::styled(
                "Customize Your Deck",
                Style::default().add_modifier(Modifier::BOLD),
            )),
            Line::default(),
            Line::from(vec![
                marker(SettingsField::Tone),
                Span::raw("Presentation tone:  "),
                Span::styled(
                    format!("◀ {} ▶", self.state.tone),
                    Style::default().fg(Color::Blue),
                ),
                Span::styled(format!("  {tone_desc}"), Style::default().fg(Color::DarkGray)),
            ]),
            Line::default(),
            Line::from(vec![
                marker(SettingsField::Charts),
                Span::raw("Include charts:     "),
                Span::raw(if self.state.include_charts { "[x]" } else { "[ ]" }),
            ]),
            Line::default(),
            Line::from(vec![
                marker(SettingsField::MediaUrl),
                Span::raw("Media embed URL:    "),
                media_value,
            ]),
            Line::default(),
            Line::from(vec![
                marker(SettingsField::ChartCsv),
                Span::raw("Custom chart CSV:   "),
                Span::styled(csv_note, Style::default().fg(Color::DarkGray)),
            ]),
            Line::default(),
            Line::from(Span::styled(
                "Press Enter to generate your deck",
                Style::default().fg(Color::Green),
            )),
        ];

        let panel = Paragraph::new(lines)
            .wrap(Wrap { trim: false })
            .block(Block::default().borders(Borders::ALL));
        frame.render_widget(panel, body);
    }

    fn draw_processing(&self, frame: &mut Frame, area: Rect) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Percentage(30),
                Constraint::Length(1),
                Constraint::Length(3),
                Constraint::Length(2),
                Constraint::Min(0),
            ])
            .split(area);

        let title = Paragraph::new(Span::styled(
            "Creating Your Pitch Deck",
            Style::default().add_modifier(Modifier::BOLD),
        ))
        .alignment(Alignment::Center);
        frame.render_widget(title, chunks[1]);

        let gauge = Gauge::default()
            .block(Block::default().borders(Borders::ALL))
            .gauge_style(Style::default().fg(Color::Blue))
            .ratio((self.state.progress / 100.0).clamp(0.0, 1.0))
            .label(format!("{:.0}%", self.state.progress));
        frame.render_widget(gauge, centered(chunks[2], 60));

        let status = Paragraph::new(self.state.status.as_str())
            .alignment(Alignment::Center)
            .style(Style::default().fg(Color::DarkGray));
        frame.render_widget(status, chunks[3]);

        if let Some(error) = &self.state.error {
            let warning = Paragraph::new(error.as_str())
                .alignment(Alignment::Center)
                .wrap(Wrap { trim: true })
                .style(Style::default().fg(Color::Red));
            frame.render_widget(warning, chunks[4]);
        }
    }

    fn draw_result(&self, frame: &mut Frame, area: Rect) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(2),
                Constraint::Min(0),
                Constraint::Length(1),
            ])
            .split(area);

        let banner = if let Some(alert) = &self.state.alert {
            Line::from(Span::styled(alert.clone(), Style::default().fg(Color::Red)))
        } else if self.state.demo {
            let message = self
                .state
                .error
                .clone()
                .unwrap_or_else(|| "Demo mode - showing a sample deck.".to_string());
            Line::from(Span::styled(message, Style::default().fg(Color::Yellow)))
        } else if !self.state.status.is_empty() {
            Line::from(Span::styled(
                self.state.status.clone(),
                Style::default().fg(Color::Green),
            ))
        } else {
            Line::from("Your personalized pitch deck is ready!")
        };
        let banner = Paragraph::new(banner)
            .alignment(Alignment::Center)
            .wrap(Wrap { trim: true });
        frame.render_widget(banner, chunks[0]);

        let deck = self.state.deck_for_display();
        let palette = theme::palette(self.state.theme);
        if let Some(slide) = deck.get(self.state.current_slide) {
            render_slide(frame, chunks[1], slide, palette);
        }

        let mut spans: Vec<Span> = Vec::new();
        for (i, slide) in deck.iter().enumerate() {
            let style = if i == self.state.current_slide {
                Style::default()
                    .fg(Color::Blue)
                    .add_modifier(Modifier::BOLD)
            } else {
                Style::default().fg(Color::DarkGray)
            };
            spans.push(Span::styled(format!(" {} {} ", i + 1, slide.title), style));
            if i + 1 < deck.len() {
                spans.push(Span::styled("│", Style::default().fg(Color::DarkGray)));
            }
        }
        let thumbnails = Paragraph::new(Line::from(spans)).alignment(Alignment::Center);
        frame.render_widget(thumbnails, chunks[2]);
    }
}

fn draw_stepper(frame: &mut Frame, area: Rect, state: &WizardState) {
    let current = state.step.index();
    let mut spans: Vec<Span> = Vec::new();
    for (i, label) in STEP_LABELS.iter().enumerate() {
        let (marker, style) = if i < current {
            ("✓".to_string(), Style::default().fg(Color::Green))
        } else if i == current {
            (
                format!("{}", i + 1),
                Style::default()
                    .fg(Color::Blue)
                    .add_modifier(Modifier::BOLD),
            )
        } else {
            (format!("{}", i + 1), Style::default().fg(Color::DarkGray))
        };
        spans.push(Span::styled(format!(" {marker} {label} "), style));
        if i + 1 < STEP_LABELS.len() {
            spans.push(Span::styled("──", Style::default().fg(Color::DarkGray)));
        }
    }
    let stepper = Paragraph::new(Line::from(spans)).alignment(Alignment::Center);
    frame.render_widget(stepper, area);
}

fn centered(area: Rect, percent: u16) -> Rect {
    let width = area.width * percent.min(100) / 100;
    let x = area.x + (area.width.saturating_sub(width)) / 2;
    Rect {
        x,
        y: area.y,
        width,
        height: area.height,
    }
}

async fn next_pipeline_event(
    events: &mut Option<mpsc::Receiver<PipelineEvent>>,
) -> Option<PipelineEvent> {
    match events {
        Some(rx) => rx.recv().await,
        None => std::future::pending().await,
    }
}
