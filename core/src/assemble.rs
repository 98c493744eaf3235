use repodeck_common::{
    ChartData, ChartKind, ChartSpec, Dataset, Deck, GenerationSettings, MediaKind, MediaRef,
    Slide, Theme,
};

/// Fixed insertion points in the standard 5-6 slide layout: the media slide
/// lands after the solution slide, the chart slide after the problem slide.
/// Both clamp to the end of a shorter deck. The two inserts run in this
/// order against the running deck, so requesting both can shift the pair
/// adjacent to each other; that layout is intentional.
const MEDIA_SLIDE_INDEX: usize = 4;
const CHART_SLIDE_INDEX: usize = 3;

/// Insert the user's supplementary slides into a deck. Pure and total: the
/// input deck is left untouched and malformed inputs are skipped, never an
/// error.
pub fn assemble(deck: &[Slide], settings: &GenerationSettings, theme: Theme) -> Deck {
    let mut assembled = deck.to_vec();

    if let Some(url) = settings
        .media_embed_url
        .as_deref()
        .filter(|url| !url.trim().is_empty())
    {
        let at = MEDIA_SLIDE_INDEX.min(assembled.len());
        assembled.insert(at, media_slide(url));
    }

    if settings.include_charts {
        if let Some(slide) = settings
            .custom_chart_csv
            .as_deref()
            .and_then(|csv| chart_slide(csv, theme))
        {
            let at = CHART_SLIDE_INDEX.min(assembled.len());
            assembled.insert(at, slide);
        }
    }

    assembled
}

/// Build the media-embed slide. Known video hosts get `video`; anything else
/// is treated as a social post.
pub fn media_slide(url: &str) -> Slide {
    let kind = if url.contains("youtube.com") || url.contains("youtu.be") {
        MediaKind::Video
    } else {
        MediaKind::SocialPost
    };

    Slide {
        title: "Demo in Action".to_string(),
        text: Some("A look at our project in action.".to_string()),
        bullets: Vec::new(),
        chart: None,
        media: Some(MediaRef {
            kind,
            url: url.to_string(),
        }),
    }
}

/// Tabs become commas so spreadsheet paste works unchanged.
pub fn normalize_csv(raw: &str) -> String {
    raw.replace('\t', ",")
}

/// Build a bar-chart slide from CSV text: column 0 becomes the labels,
/// column 1 the values (non-numeric cells become 0), column 1's header the
/// dataset label. Needs a header row plus at least one data row and at
/// least two columns; anything less returns `None`.
pub fn chart_slide(csv: &str, theme: Theme) -> Option<Slide> {
    let csv = normalize_csv(csv);
    let mut lines = csv.trim().lines();

    let headers: Vec<&str> = lines.next()?.split(',').collect();
    let rows: Vec<Vec<&str>> = lines.map(|line| line.split(',').collect()).collect();
    if headers.len() < 2 || rows.is_empty() {
        return None;
    }

    let labels = rows
        .iter()
        .map(|row| row.first().copied().unwrap_or_default().to_string())
        .collect();
    let values = rows
        .iter()
        .map(|row| {
            row.get(1)
                .and_then(|cell| cell.trim().parse::<f64>().ok())
                .unwrap_or(0.0)
        })
        .collect();

    let value_header = headers.get(1).copied().unwrap_or_default();
    let (border_color, background_color) = chart_accent(theme);

    Some(Slide {
        title: "Custom Chart".to_string(),
        text: Some("User-provided data visualization.".to_string()),
        bullets: Vec::new(),
        chart: Some(ChartSpec {
            kind: ChartKind::Bar,
            data: ChartData {
                labels,
                datasets: vec![Dataset {
                    label: value_header.to_string(),
                    values,
                    border_color: Some(border_color.to_string()),
                    background_color: Some(background_color.to_string()),
                }],
            },
            title: Some(if value_header.is_empty() {
                "Custom Data Chart".to_string()
            } else {
                value_header.to_string()
            }),
            description: None,
        }),
        media: None,
    })
}

fn chart_accent(theme: Theme) -> (&'static str, &'static str) {
    match theme {
        Theme::Bold => ("#38bdf8", "rgba(56, 189, 248, 0.2)"),
        _ => ("#3b82f6", "rgba(59, 130, 246, 0.1)"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::demo::demo_deck;
    use pretty_assertions::assert_eq;

    fn settings() -> GenerationSettings {
        GenerationSettings::default()
    }

    #[test]
    fn no_media_and_no_csv_is_a_no_op() {
        let deck = demo_deck();
        let assembled = assemble(&deck, &settings(), Theme::Modern);
        assert_eq!(assembled, deck);
    }

    #[test]
    fn malformed_csv_is_silently_skipped() {
        let deck = demo_deck();
        for csv in ["", "OnlyHeader", "Month,Revenue", "single-column\nJan"] {
            let mut s = settings();
            s.custom_chart_csv = Some(csv.to_string());
            assert_eq!(assemble(&deck, &s, Theme::Modern), deck, "csv: {csv:?}");
        }
    }

    #[test]
    fn charts_toggle_gates_the_chart_slide() {
        let deck = demo_deck();
        let mut s = settings();
        s.include_charts = false;
        s.custom_chart_csv = Some("Month,Revenue\nJan,100\nFeb,200".to_string());
        assert_eq!(assemble(&deck, &s, Theme::Modern), deck);
    }

    #[test]
    fn csv_columns_become_labels_and_values() {
        let slide = chart_slide("Month,Revenue\nJan,100\nFeb,200", Theme::Modern)
            .unwrap_or_else(|| panic!("expected a chart slide"));
        let chart = slide.chart.unwrap_or_else(|| panic!("expected chart data"));
        assert_eq!(chart.data.labels, vec!["Jan".to_string(), "Feb".to_string()]);
        assert_eq!(chart.data.datasets[0].values, vec![100.0, 200.0]);
        assert_eq!(chart.data.datasets[0].label, "Revenue");
        assert_eq!(chart.kind, ChartKind::Bar);
        assert_eq!(chart.title.as_deref(), Some("Revenue"));
    }

    #[test]
    fn non_numeric_values_become_zero() {
        let slide = chart_slide("Month,Revenue\nJan,oops\nFeb,200", Theme::Modern)
            .unwrap_or_else(|| panic!("expected a chart slide"));
        let chart = slide.chart.unwrap_or_else(|| panic!("expected chart data"));
        assert_eq!(chart.data.datasets[0].values, vec![0.0, 200.0]);
    }

    #[test]
    fn tabs_are_normalized_to_commas() {
        let slide = chart_slide("Month\tRevenue\nJan\t100", Theme::Modern);
        assert!(slide.is_some());
    }

    #[test]
    fn bold_theme_picks_the_bold_accent() {
        let slide = chart_slide("Month,Revenue\nJan,100", Theme::Bold)
            .unwrap_or_else(|| panic!("expected a chart slide"));
        let chart = slide.chart.unwrap_or_else(|| panic!("expected chart data"));
        assert_eq!(chart.data.datasets[0].border_color.as_deref(), Some("#38bdf8"));
    }

    #[test]
    fn media_kind_depends_on_the_host() {
        let video = media_slide("https://www.youtube.com/watch?v=abc123");
        assert_eq!(
            video.media.map(|m| m.kind),
            Some(MediaKind::Video)
        );
        let short = media_slide("https://youtu.be/abc123");
        assert_eq!(short.media.map(|m| m.kind), Some(MediaKind::Video));
        let post = media_slide("https://twitter.com/x/status/1");
        assert_eq!(post.media.map(|m| m.kind), Some(MediaKind::SocialPost));
    }

    #[test]
    fn media_slide_lands_after_the_solution_slide() {
        let deck = demo_deck();
        let mut s = settings();
        s.media_embed_url = Some("https://youtu.be/abc".to_string());
        let assembled = assemble(&deck, &s, Theme::Modern);
        assert_eq!(assembled.len(), 6);
        assert_eq!(assembled[4].title, "Demo in Action");
    }

    #[test]
    fn chart_slide_lands_after_the_problem_slide() {
        let deck = demo_deck();
        let mut s = settings();
        s.custom_chart_csv = Some("Month,Revenue\nJan,100".to_string());
        let assembled = assemble(&deck, &s, Theme::Modern);
        assert_eq!(assembled.len(), 6);
        assert_eq!(assembled[3].title, "Custom Chart");
    }

    #[test]
    fn combined_inserts_keep_the_documented_order() {
        // Media goes in first at 4, then the chart at 3 against the updated
        // deck, leaving the pair adjacent.
        let deck = demo_deck();
        let mut s = settings();
        s.media_embed_url = Some("https://youtu.be/abc".to_string());
        s.custom_chart_csv = Some("Month,Revenue\nJan,100".to_string());
        let assembled = assemble(&deck, &s, Theme::Modern);
        assert_eq!(assembled.len(), 7);
        assert_eq!(assembled[3].title, "Custom Chart");
        assert_eq!(assembled[5].title, "Demo in Action");
    }

    #[test]
    fn insertion_clamps_on_short_decks() {
        let deck = vec![Slide {
            title: "Only".to_string(),
            text: None,
            bullets: Vec::new(),
            chart: None,
            media: None,
        }];
        let mut s = settings();
        s.media_embed_url = Some("https://youtu.be/abc".to_string());
        s.custom_chart_csv = Some("Month,Revenue\nJan,100".to_string());
        let assembled = assemble(&deck, &s, Theme::Modern);
        assert_eq!(assembled.len(), 3);
        assert_eq!(assembled[0].title, "Only");
        assert_eq!(assembled[1].title, "Demo in Action");
        assert_eq!(assembled[2].title, "Custom Chart");
    }
}
