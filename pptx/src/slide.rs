//! Per-slide XML: title, body text, bullet block, textual chart block, and
//! a hyperlinked media line, colored by the deck theme.

use quick_xml::escape::escape;
use repodeck_common::{Slide, Theme};

use crate::parts::{XML_DECL, NS_A, NS_P, NS_R};

const EMU_PER_INCH: i64 = 914_400;

/// 90% of the slide width, left-aligned at the 0.5in margin.
const BODY_WIDTH: i64 = 10_972_800;
const MARGIN: i64 = EMU_PER_INCH / 2;

const HYPERLINK_COLOR: &str = "0000FF";

struct ShapeWriter {
    xml: String,
    next_id: u32,
}

impl ShapeWriter {
    fn new() -> Self {
        Self {
            xml: String::new(),
            next_id: 2,
        }
    }

    fn text_box(&mut self, name: &str, x: i64, y: i64, cx: i64, cy: i64, paragraphs: &str) {
        let id = self.next_id;
        self.next_id += 1;
        self.xml.push_str(&format!(
            "<p:sp><p:nvSpPr><p:cNvPr id=\"{id}\" name=\"{name}\"/><p:cNvSpPr txBox=\"1\"/><p:nvPr/></p:nvSpPr>\
<p:spPr><a:xfrm><a:off x=\"{x}\" y=\"{y}\"/><a:ext cx=\"{cx}\" cy=\"{cy}\"/></a:xfrm>\
<a:prstGeom prst=\"rect\"><a:avLst/></a:prstGeom><a:noFill/></p:spPr>\
<p:txBody><a:bodyPr wrap=\"square\"><a:normAutofit/></a:bodyPr><a:lstStyle/>{paragraphs}</p:txBody></p:sp>"
        ));
    }
}

fn run(text: &str, size: u32, bold: bool, color: &str) -> String {
    let bold = if bold { " b=\"1\"" } else { "" };
    format!(
        "<a:r><a:rPr lang=\"en-US\" sz=\"{size}\"{bold}><a:solidFill><a:srgbClr val=\"{color}\"/></a:solidFill></a:rPr><a:t>{}</a:t></a:r>",
        escape(text)
    )
}

fn paragraph(runs: &str) -> String {
    format!("<a:p>{runs}</a:p>")
}

fn bullet_paragraph(text: &str, size: u32, color: &str) -> String {
    format!(
        "<a:p><a:pPr><a:buChar char=\"\u{2022}\"/></a:pPr>{}</a:p>",
        run(text, size, false, color)
    )
}

fn hyperlink_run(url: &str, size: u32) -> String {
    format!(
        "<a:r><a:rPr lang=\"en-US\" sz=\"{size}\"><a:solidFill><a:srgbClr val=\"{HYPERLINK_COLOR}\"/></a:solidFill><a:hlinkClick r:id=\"rId2\"/></a:rPr><a:t>{}</a:t></a:r>",
        escape(url)
    )
}

/// Render one slide part. The layout mirrors the in-browser deck: bold
/// title at the top, optional body text, bullet block, then the chart or
/// media blocks lower on the page.
pub fn slide_xml(slide: &Slide, theme: Theme) -> String {
    let text_color = theme.text_hex();
    let mut shapes = ShapeWriter::new();

    shapes.text_box(
        "Title",
        MARGIN,
        MARGIN,
        BODY_WIDTH,
        EMU_PER_INCH,
        &paragraph(&run(&slide.title, 3200, true, text_color)),
    );

    if let Some(text) = slide.text.as_deref().filter(|t| !t.is_empty()) {
        shapes.text_box(
            "Body",
            MARGIN,
            EMU_PER_INCH * 3 / 2,
            BODY_WIDTH,
            EMU_PER_INCH,
            &paragraph(&run(text, 1800, false, text_color)),
        );
    }

    if !slide.bullets.is_empty() {
        let paragraphs: String = slide
            .bullets
            .iter()
            .map(|b| bullet_paragraph(b, 1800, text_color))
            .collect();
        shapes.text_box(
            "Bullets",
            MARGIN,
            EMU_PER_INCH * 5 / 2,
            BODY_WIDTH,
            EMU_PER_INCH * 2,
            &paragraphs,
        );
    }

    if let Some(chart) = &slide.chart {
        // No chart rendering engine here; the data goes in as text.
        let mut paragraphs = paragraph(&run("Chart:", 1800, true, text_color));
        if let Some(title) = chart.title.as_deref().filter(|t| !t.is_empty()) {
            paragraphs.push_str(&paragraph(&run(title, 1400, false, text_color)));
        }
        if let Some(dataset) = chart.data.datasets.first() {
            for (label, value) in chart.data.labels.iter().zip(&dataset.values) {
                paragraphs.push_str(&paragraph(&run(
                    &format!("{label}: {value}"),
                    1400,
                    false,
                    text_color,
                )));
            }
        }
        shapes.text_box(
            "Chart",
            EMU_PER_INCH,
            EMU_PER_INCH * 5 / 2,
            EMU_PER_INCH * 8,
            EMU_PER_INCH * 4,
            &paragraphs,
        );
    }

    if let Some(media) = &slide.media {
        shapes.text_box(
            "MediaLabel",
            MARGIN,
            EMU_PER_INCH * 5 / 2,
            BODY_WIDTH,
            EMU_PER_INCH,
            &paragraph(&run("Demo Link:", 1800, true, text_color)),
        );
        shapes.text_box(
            "MediaLink",
            MARGIN,
            EMU_PER_INCH * 3,
            BODY_WIDTH,
            EMU_PER_INCH,
            &paragraph(&hyperlink_run(&media.url, 1600)),
        );
    }

    format!(
        "{XML_DECL}<p:sld xmlns:a=\"{NS_A}\" xmlns:r=\"{NS_R}\" xmlns:p=\"{NS_P}\">\
<p:cSld>\
<p:bg><p:bgPr><a:solidFill><a:srgbClr val=\"{bg}\"/></a:solidFill><a:effectLst/></p:bgPr></p:bg>\
<p:spTree>\
<p:nvGrpSpPr><p:cNvPr id=\"1\" name=\"\"/><p:cNvGrpSpPr/><p:nvPr/></p:nvGrpSpPr>\
<p:grpSpPr/>\
{shapes}\
</p:spTree></p:cSld>\
<p:clrMapOvr><a:masterClrMapping/></p:clrMapOvr>\
</p:sld>",
        bg = theme.background_hex(),
        shapes = shapes.xml,
    )
}

/// Relationships for one slide: the layout, plus the external hyperlink
/// target when the slide embeds media.
pub fn slide_rels(slide: &Slide) -> String {
    let mut xml = format!(
        "{XML_DECL}<Relationships xmlns=\"http://schemas.openxmlformats.org/package/2006/relationships\">\
<Relationship Id=\"rId1\" Type=\"http://schemas.openxmlformats.org/officeDocument/2006/relationships/slideLayout\" Target=\"../slideLayouts/slideLayout1.xml\"/>"
    );
    if let Some(media) = &slide.media {
        xml.push_str(&format!(
            "<Relationship Id=\"rId2\" Type=\"http://schemas.openxmlformats.org/officeDocument/2006/relationships/hyperlink\" Target=\"{}\" TargetMode=\"External\"/>",
            escape(&media.url)
        ));
    }
    xml.push_str("</Relationships>");
    xml
}
