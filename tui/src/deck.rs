//! Slide rendering: the deck viewer shared by the result step and pitch
//! mode, including terminal chart widgets.

use ratatui::layout::{Alignment, Constraint, Direction, Layout, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::symbols;
use ratatui::text::{Line, Span};
use ratatui::widgets::{Axis, BarChart, Block, Borders, Chart, Dataset, GraphType, Paragraph, Wrap};
use ratatui::Frame;

use repodeck_common::{ChartKind, ChartSpec, MediaKind, Slide};

use crate::theme::Palette;

/// Draw one slide into `area`, painted with the deck palette.
pub fn render_slide(frame: &mut Frame, area: Rect, slide: &Slide, palette: Palette) {
    let base = Style::default()
        .bg(palette.background)
        .fg(palette.foreground);
    frame.render_widget(Block::default().style(base), area);

    let inner = inset(area, 2, 1);
    let has_chart = slide.chart.is_some();
    let chunks = if has_chart {
        Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(2),
                Constraint::Min(0),
                Constraint::Length(12),
            ])
            .split(inner)
    } else {
        Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(2),
                Constraint::Min(0),
                Constraint::Length(0),
            ])
            .split(inner)
    };

    let title = Paragraph::new(Line::from(Span::styled(
        slide.title.clone(),
        Style::default()
            .fg(palette.foreground)
            .add_modifier(Modifier::BOLD),
    )))
    .alignment(Alignment::Center)
    .style(base);
    frame.render_widget(title, chunks[0]);

    let mut lines: Vec<Line> = Vec::new();
    if let Some(text) = slide.text.as_deref().filter(|t| !t.is_empty()) {
        lines.push(Line::from(text.to_string()));
        lines.push(Line::default());
    }
    for bullet in &slide.bullets {
        lines.push(Line::from(vec![
            Span::styled("  • ", Style::default().fg(palette.accent)),
            Span::raw(bullet.clone()),
        ]));
    }
    if let Some(media) = &slide.media {
        let kind = match media.kind {
            MediaKind::Video => "Video",
            MediaKind::SocialPost => "Social post",
        };
        lines.push(Line::default());
        lines.push(Line::from(vec![
            Span::styled(format!("{kind}: "), Style::default().fg(palette.muted)),
            Span::styled(
                media.url.clone(),
                Style::default()
                    .fg(palette.accent)
                    .add_modifier(Modifier::UNDERLINED),
            ),
        ]));
    }
    let body = Paragraph::new(lines).wrap(Wrap { trim: false }).style(base);
    frame.render_widget(body, chunks[1]);

    if let Some(chart) = &slide.chart {
        render_chart(frame, chunks[2], chart, palette);
    }
}

fn render_chart(frame: &mut Frame, area: Rect, chart: &ChartSpec, palette: Palette) {
    let Some(dataset) = chart.data.datasets.first() else {
        return;
    };

    let block = Block::default()
        .borders(Borders::TOP)
        .border_style(Style::default().fg(palette.muted))
        .title(chart.title.clone().unwrap_or_else(|| dataset.label.clone()))
        .title_style(Style::default().fg(palette.foreground))
        .style(Style::default().bg(palette.background));

    match chart.kind {
        ChartKind::Bar => {
            let bars: Vec<(&str, u64)> = chart
                .data
                .labels
                .iter()
                .zip(&dataset.values)
                .map(|(label, value)| (label.as_str(), value.max(0.0) as u64))
                .collect();
            let bar_width = bar_width(area, bars.len());
            let widget = BarChart::default()
                .block(block)
                .data(&bars)
                .bar_width(bar_width)
                .bar_gap(1)
                .bar_style(Style::default().fg(palette.accent))
                .value_style(
                    Style::default()
                        .fg(palette.background)
                        .bg(palette.accent),
                )
                .label_style(Style::default().fg(palette.muted));
            frame.render_widget(widget, area);
        }
        ChartKind::Line => {
            let points: Vec<(f64, f64)> = dataset
                .values
                .iter()
                .enumerate()
                .map(|(i, v)| (i as f64, *v))
                .collect();
            let max = dataset.values.iter().cloned().fold(1.0_f64, f64::max);
            let last = points.len().saturating_sub(1) as f64;
            let series = Dataset::default()
                .name(dataset.label.clone())
                .marker(symbols::Marker::Braille)
                .graph_type(GraphType::Line)
                .style(Style::default().fg(palette.accent))
                .data(&points);
            let first_label = chart.data.labels.first().cloned().unwrap_or_default();
            let last_label = chart.data.labels.last().cloned().unwrap_or_default();
            let widget = Chart::new(vec![series])
                .block(block)
                .x_axis(
                    Axis::default()
                        .style(Style::default().fg(palette.muted))
                        .bounds([0.0, last.max(1.0)])
                        .labels([first_label, last_label]),
                )
                .y_axis(
                    Axis::default()
                        .style(Style::default().fg(palette.muted))
                        .bounds([0.0, max * 1.1])
                        .labels(["0".to_string(), format!("{max:.0}")]),
                );
            frame.render_widget(widget, area);
        }
    }
}

fn bar_width(area: Rect, bars: usize) -> u16 {
    if bars == 0 {
        return 1;
    }
    let available = area.width.saturating_sub(bars as u16) / bars as u16;
    available.clamp(3, 9)
}

fn inset(area: Rect, horizontal: u16, vertical: u16) -> Rect {
    Rect {
        x: area.x + horizontal.min(area.width / 2),
        y: area.y + vertical.min(area.height / 2),
        width: area.width.saturating_sub(horizontal * 2),
        height: area.height.saturating_sub(vertical * 2),
    }
}
