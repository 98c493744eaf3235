use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// One deck page. Only the title is required; the content fields are
/// independently optional and combinable (a slide may carry both bullets
/// and a chart).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Slide {
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub bullets: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub chart: Option<ChartSpec>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub media: Option<MediaRef>,
}

/// Ordered sequence of slides, shown to the user and exported.
pub type Deck = Vec<Slide>;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChartSpec {
    #[serde(rename = "type")]
    pub kind: ChartKind,
    pub data: ChartData,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChartKind {
    Line,
    Bar,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChartData {
    pub labels: Vec<String>,
    pub datasets: Vec<Dataset>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Dataset {
    pub label: String,
    #[serde(rename = "data")]
    pub values: Vec<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub border_color: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub background_color: Option<String>,
}

/// Embedded media reference: a video link or a social post link.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MediaRef {
    pub kind: MediaKind,
    pub url: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum MediaKind {
    Video,
    SocialPost,
}

/// Visual palette applied uniformly across rendering and export.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    #[default]
    Modern,
    Classic,
    Bold,
}

impl Theme {
    pub const ALL: [Theme; 3] = [Theme::Modern, Theme::Classic, Theme::Bold];

    pub fn as_str(self) -> &'static str {
        match self {
            Theme::Modern => "modern",
            Theme::Classic => "classic",
            Theme::Bold => "bold",
        }
    }

    /// Export background color, RRGGBB without the leading `#`.
    pub fn background_hex(self) -> &'static str {
        match self {
            Theme::Bold => "000000",
            _ => "FDFDFD",
        }
    }

    /// Export text color, RRGGBB without the leading `#`.
    pub fn text_hex(self) -> &'static str {
        match self {
            Theme::Bold => "FFFFFF",
            _ => "000000",
        }
    }
}

impl fmt::Display for Theme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Theme {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "modern" => Ok(Theme::Modern),
            "classic" => Ok(Theme::Classic),
            "bold" => Ok(Theme::Bold),
            other => Err(format!(
                "unknown theme '{other}' (expected modern, classic, or bold)"
            )),
        }
    }
}

/// How the generated deck balances business and technical content.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Tone {
    #[default]
    Balanced,
    Business,
    Technical,
}

impl Tone {
    pub const ALL: [Tone; 3] = [Tone::Balanced, Tone::Business, Tone::Technical];

    pub fn as_str(self) -> &'static str {
        match self {
            Tone::Balanced => "balanced",
            Tone::Business => "business",
            Tone::Technical => "technical",
        }
    }
}

impl fmt::Display for Tone {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Tone {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "balanced" => Ok(Tone::Balanced),
            "business" | "business-focused" => Ok(Tone::Business),
            "technical" => Ok(Tone::Technical),
            other => Err(format!(
                "unknown tone '{other}' (expected balanced, business, or technical)"
            )),
        }
    }
}

/// User configuration collected by the wizard's settings step.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerationSettings {
    pub tone: Tone,
    pub include_charts: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub custom_chart_csv: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub media_embed_url: Option<String>,
}

impl Default for GenerationSettings {
    fn default() -> Self {
        Self {
            tone: Tone::Balanced,
            include_charts: true,
            custom_chart_csv: None,
            media_embed_url: None,
        }
    }
}
