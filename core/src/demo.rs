use repodeck_common::{ChartData, ChartKind, ChartSpec, Dataset, Deck, Slide};

/// Built-in sample deck shown whenever live generation is unavailable. The
/// wizard assembles custom media/chart slides onto it exactly as it would
/// onto a generated deck.
pub fn demo_deck() -> Deck {
    vec![
        Slide {
            title: "Vibe Draw".to_string(),
            text: Some(
                "Turn your roughest sketches into stunning 3D worlds with Vibe Draw, the AI-powered cursor for 3D modeling.".to_string(),
            ),
            bullets: vec![
                "Revolutionary AI-powered 3D modeling".to_string(),
                "Transform sketches into professional models".to_string(),
                "Perfect for designers, architects, and creators".to_string(),
            ],
            chart: None,
            media: None,
        },
        Slide {
            title: "The Problem".to_string(),
            text: Some(
                "3D modeling is complex, time-consuming, and requires years of training. Most creative ideas never make it to 3D because the tools are too difficult.".to_string(),
            ),
            bullets: vec![
                "Traditional 3D software has steep learning curves".to_string(),
                "Hours of work for simple models".to_string(),
                "Creative bottleneck for non-technical users".to_string(),
            ],
            chart: None,
            media: None,
        },
        Slide {
            title: "Market Opportunity".to_string(),
            text: Some("The 3D modeling market is exploding with AR/VR growth".to_string()),
            bullets: Vec::new(),
            chart: Some(ChartSpec {
                kind: ChartKind::Line,
                data: ChartData {
                    labels: vec![
                        "Jan 2024".to_string(),
                        "Feb 2024".to_string(),
                        "Mar 2024".to_string(),
                        "Apr 2024".to_string(),
                        "May 2024".to_string(),
                    ],
                    datasets: vec![Dataset {
                        label: "Monthly Revenue".to_string(),
                        values: vec![500.0, 1200.0, 2100.0, 4200.0, 8000.0],
                        border_color: Some("#3b82f6".to_string()),
                        background_color: Some("rgba(59, 130, 246, 0.1)".to_string()),
                    }],
                },
                title: Some("50% Monthly Revenue Growth".to_string()),
                description: None,
            }),
            media: None,
        },
        Slide {
            title: "Our Solution".to_string(),
            text: Some(
                "AI-powered cursor that understands your intent and creates 3D models from simple sketches".to_string(),
            ),
            bullets: vec![
                "Draw anywhere, get 3D models instantly".to_string(),
                "No technical knowledge required".to_string(),
                "Professional results in minutes, not hours".to_string(),
                "Built-in collaboration and sharing".to_string(),
            ],
            chart: None,
            media: None,
        },
        Slide {
            title: "What's Next".to_string(),
            text: Some("Scale to become the Figma of 3D modeling".to_string()),
            bullets: vec![
                "Launch enterprise features".to_string(),
                "Expand AI model capabilities".to_string(),
                "Build marketplace for 3D assets".to_string(),
                "Series A funding to accelerate growth".to_string(),
            ],
            chart: None,
            media: None,
        },
    ]
}
