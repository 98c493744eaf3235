//! Full-screen pitch mode: the whole terminal becomes the slide, with
//! keyboard-only navigation.

use ratatui::layout::{Alignment, Constraint, Direction, Layout};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Gauge, Paragraph};
use ratatui::Frame;

use crate::deck::render_slide;
use crate::theme::palette;
use crate::wizard::WizardState;

pub fn draw(frame: &mut Frame, state: &WizardState) {
    let deck = state.deck_for_display();
    let palette = palette(state.theme);
    let base = Style::default()
        .bg(palette.background)
        .fg(palette.foreground);
    frame.render_widget(Block::default().style(base), frame.area());

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1),
            Constraint::Min(0),
            Constraint::Length(1),
            Constraint::Length(1),
        ])
        .split(frame.area());

    let position = Paragraph::new(Line::from(vec![
        Span::styled(
            format!(" {} / {} ", state.pitch_index + 1, deck.len()),
            Style::default()
                .fg(palette.accent)
                .add_modifier(Modifier::BOLD),
        ),
        Span::styled(
            "Use arrows or Space to navigate, Esc to exit",
            Style::default().fg(palette.muted),
        ),
    ]))
    .style(base);
    frame.render_widget(position, chunks[0]);

    if let Some(slide) = deck.get(state.pitch_index) {
        render_slide(frame, chunks[1], slide, palette);
    }

    let hints = Paragraph::new("← previous · → next · Home/End jump")
        .alignment(Alignment::Center)
        .style(Style::default().bg(palette.background).fg(palette.muted));
    frame.render_widget(hints, chunks[2]);

    let ratio = if deck.is_empty() {
        0.0
    } else {
        ((state.pitch_index + 1) as f64 / deck.len() as f64).clamp(0.0, 1.0)
    };
    let progress = Gauge::default()
        .gauge_style(Style::default().fg(palette.accent).bg(palette.background))
        .ratio(ratio)
        .label("");
    frame.render_widget(progress, chunks[3]);
}
