//! Presentation file writer: serializes a deck into a 16:9 OOXML package.

use std::io::{Cursor, Write as _};
use std::path::Path;

use thiserror::Error;
use zip::write::SimpleFileOptions;
use zip::{CompressionMethod, ZipWriter};

use repodeck_common::{Slide, Theme};

mod parts;
mod slide;

pub const PPTX_CONTENT_TYPE: &str =
    "application/vnd.openxmlformats-officedocument.presentationml.presentation";
pub const DEFAULT_FILENAME: &str = "presentation.pptx";

#[derive(Error, Debug)]
pub enum ExportError {
    #[error("failed to write presentation: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to build presentation package: {0}")]
    Zip(#[from] zip::result::ZipError),
}

/// Serialize the deck into an in-memory `.pptx` package, one slide part per
/// deck entry. The in-memory deck is never modified; a failure here leaves
/// nothing behind.
pub fn render_pptx(slides: &[Slide], theme: Theme) -> Result<Vec<u8>, ExportError> {
    let mut writer = ZipWriter::new(Cursor::new(Vec::new()));

    add(
        &mut writer,
        "[Content_Types].xml",
        parts::content_types(slides.len()),
    )?;
    add(&mut writer, "_rels/.rels", parts::root_rels())?;
    add(
        &mut writer,
        "ppt/presentation.xml",
        parts::presentation(slides.len()),
    )?;
    add(
        &mut writer,
        "ppt/_rels/presentation.xml.rels",
        parts::presentation_rels(slides.len()),
    )?;
    add(
        &mut writer,
        "ppt/slideMasters/slideMaster1.xml",
        parts::slide_master(),
    )?;
    add(
        &mut writer,
        "ppt/slideMasters/_rels/slideMaster1.xml.rels",
        parts::slide_master_rels(),
    )?;
    add(
        &mut writer,
        "ppt/slideLayouts/slideLayout1.xml",
        parts::slide_layout(),
    )?;
    add(
        &mut writer,
        "ppt/slideLayouts/_rels/slideLayout1.xml.rels",
        parts::slide_layout_rels(),
    )?;
    add(&mut writer, "ppt/theme/theme1.xml", parts::theme_part())?;

    for (index, entry) in slides.iter().enumerate() {
        let n = index + 1;
        add(
            &mut writer,
            &format!("ppt/slides/slide{n}.xml"),
            slide::slide_xml(entry, theme),
        )?;
        add(
            &mut writer,
            &format!("ppt/slides/_rels/slide{n}.xml.rels"),
            slide::slide_rels(entry),
        )?;
    }

    Ok(writer.finish()?.into_inner())
}

fn add(
    writer: &mut ZipWriter<Cursor<Vec<u8>>>,
    name: &str,
    content: String,
) -> Result<(), ExportError> {
    let options = SimpleFileOptions::default().compression_method(CompressionMethod::Deflated);
    writer.start_file(name, options)?;
    writer.write_all(content.as_bytes())?;
    Ok(())
}

/// Render and write the package to disk.
pub fn write_file(path: &Path, slides: &[Slide], theme: Theme) -> Result<(), ExportError> {
    let bytes = render_pptx(slides, theme)?;
    std::fs::write(path, bytes)?;
    Ok(())
}
