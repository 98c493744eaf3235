use ratatui::style::Color;
use repodeck_common::Theme;

/// Terminal rendition of a deck theme.
#[derive(Debug, Clone, Copy)]
pub struct Palette {
    pub background: Color,
    pub foreground: Color,
    pub accent: Color,
    pub muted: Color,
}

pub fn palette(theme: Theme) -> Palette {
    match theme {
        Theme::Modern => Palette {
            background: Color::Rgb(253, 253, 253),
            foreground: Color::Rgb(23, 23, 23),
            accent: Color::Rgb(59, 130, 246),
            muted: Color::Rgb(115, 115, 115),
        },
        Theme::Classic => Palette {
            background: Color::Rgb(255, 251, 235),
            foreground: Color::Rgb(120, 53, 15),
            accent: Color::Rgb(217, 119, 6),
            muted: Color::Rgb(180, 83, 9),
        },
        Theme::Bold => Palette {
            background: Color::Rgb(0, 0, 0),
            foreground: Color::Rgb(248, 250, 252),
            accent: Color::Rgb(56, 189, 248),
            muted: Color::Rgb(148, 163, 184),
        },
    }
}

pub fn label(theme: Theme) -> &'static str {
    match theme {
        Theme::Modern => "Modern",
        Theme::Classic => "Classic",
        Theme::Bold => "Bold",
    }
}

pub fn description(theme: Theme) -> &'static str {
    match theme {
        Theme::Modern => "Clean, minimal, professional",
        Theme::Classic => "Warm, elegant, timeless",
        Theme::Bold => "High contrast, striking, memorable",
    }
}
