/*!
# Export System

Turns a captured document into PNG, PDF or SVG bytes and writes them next to
each other in an output directory. Files are written through a temporary file
in the same directory and persisted atomically.
*/

use std::fmt;
use std::io::{Cursor, Write};
use std::path::{Path, PathBuf};
use std::str::FromStr;
use std::sync::Arc;

use planilla_core::MatchMetadata;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::document::DocumentModel;
use crate::raster::{Bitmap, Capture, CaptureError, Rasterizer};
use crate::style::{parse_hex_rgb, RenderSettings};

/// A4 portrait in millimetres.
pub const A4_WIDTH_MM: f32 = 210.0;
pub const A4_HEIGHT_MM: f32 = 297.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExportFormat {
    Png,
    Pdf,
    Svg,
}

impl ExportFormat {
    pub const ALL: [ExportFormat; 3] = [ExportFormat::Png, ExportFormat::Pdf, ExportFormat::Svg];

    pub fn extension(&self) -> &'static str {
        match self {
            ExportFormat::Png => "png",
            ExportFormat::Pdf => "pdf",
            ExportFormat::Svg => "svg",
        }
    }
}

impl fmt::Display for ExportFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.extension())
    }
}

impl FromStr for ExportFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "png" => Ok(ExportFormat::Png),
            "pdf" => Ok(ExportFormat::Pdf),
            "svg" => Ok(ExportFormat::Svg),
            other => Err(format!("unknown export format '{}' (expected png, pdf or svg)", other)),
        }
    }
}

#[derive(Error, Debug)]
pub enum EncodeError {
    #[error("PNG encoding failed: {0}")]
    Png(#[from] image::ImageError),

    #[error("PDF encoding failed: {0}")]
    Pdf(String),

    #[error("PDF export not enabled (compile with 'printpdf' feature)")]
    PdfUnavailable,

    #[error("{0} is a vector format and is not encoded from a bitmap")]
    NotRaster(ExportFormat),

    #[error("bitmap buffer does not match {width}x{height}")]
    InvalidBitmap { width: u32, height: u32 },
}

#[derive(Error, Debug)]
pub enum ExportError {
    #[error("capture failed: {0}")]
    Capture(#[from] CaptureError),

    #[error(transparent)]
    Encode(#[from] EncodeError),

    #[error("failed to write {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("export task failed: {0}")]
    Task(String),
}

/// Encoded file contents and the name they should be saved under.
#[derive(Debug, Clone, PartialEq)]
pub struct ExportArtifact {
    pub bytes: Vec<u8>,
    pub filename: String,
}

/// Result of one export action, after errors have been caught and logged.
#[derive(Debug)]
pub enum ExportOutcome {
    Saved(PathBuf),
    Failed(ExportError),
}

impl ExportOutcome {
    pub fn is_saved(&self) -> bool {
        matches!(self, ExportOutcome::Saved(_))
    }

    pub fn path(&self) -> Option<&Path> {
        match self {
            ExportOutcome::Saved(p) => Some(p),
            ExportOutcome::Failed(_) => None,
        }
    }
}

/// `planilla-{opponent}-{date}.{ext}`, with the values interpolated as typed.
pub fn artifact_filename(metadata: &MatchMetadata, extension: &str) -> String {
    if metadata.opponent.contains(['/', '\\']) || metadata.date.contains(['/', '\\']) {
        log::warn!(
            "Opponent '{}' or date '{}' contains a path separator; the file may land outside the output directory",
            metadata.opponent,
            metadata.date
        );
    }
    format!("planilla-{}-{}.{}", metadata.opponent, metadata.date, extension)
}

pub fn encode_png(bitmap: Bitmap) -> Result<Vec<u8>, EncodeError> {
    let (width, height) = (bitmap.width, bitmap.height);
    let img = bitmap.into_rgba_image().ok_or(EncodeError::InvalidBitmap { width, height })?;
    let mut out = Cursor::new(Vec::new());
    img.write_to(&mut out, image::ImageFormat::Png)?;
    Ok(out.into_inner())
}

/// One A4 portrait page with the bitmap stretched over the whole page.
#[cfg(feature = "printpdf")]
pub fn encode_pdf(bitmap: &Bitmap, title: &str, background: (u8, u8, u8)) -> Result<Vec<u8>, EncodeError> {
    use printpdf::{ColorBits, ColorSpace, Image, ImageTransform, ImageXObject, Mm, PdfDocument, Px};

    if bitmap.width == 0 || bitmap.height == 0 || bitmap.expected_len() != Some(bitmap.pixels.len()) {
        return Err(EncodeError::InvalidBitmap { width: bitmap.width, height: bitmap.height });
    }

    let (doc, page, layer) = PdfDocument::new(title, Mm(A4_WIDTH_MM), Mm(A4_HEIGHT_MM), "Planilla");
    let layer = doc.get_page(page).get_layer(layer);

    let image = Image::from(ImageXObject {
        width: Px(bitmap.width as usize),
        height: Px(bitmap.height as usize),
        color_space: ColorSpace::Rgb,
        bits_per_component: ColorBits::Bit8,
        interpolate: true,
        image_data: bitmap.to_rgb_over(background),
        image_filter: None,
        clipping_bbox: None,
        smask: None,
    });

    // DPI fixes the width; the height is stretched to the page regardless of aspect
    let dpi = bitmap.width as f32 / (A4_WIDTH_MM / 25.4);
    let natural_height_mm = bitmap.height as f32 / dpi * 25.4;
    image.add_to_layer(
        layer,
        ImageTransform {
            translate_x: Some(Mm(0.0)),
            translate_y: Some(Mm(0.0)),
            scale_x: Some(1.0),
            scale_y: Some(A4_HEIGHT_MM / natural_height_mm),
            dpi: Some(dpi),
            ..Default::default()
        },
    );

    doc.save_to_bytes().map_err(|e| EncodeError::Pdf(e.to_string()))
}

#[cfg(not(feature = "printpdf"))]
pub fn encode_pdf(_bitmap: &Bitmap, _title: &str, _background: (u8, u8, u8)) -> Result<Vec<u8>, EncodeError> {
    Err(EncodeError::PdfUnavailable)
}

/// Write bytes to `dir/filename` via a temporary file in `dir`.
pub fn write_artifact(dir: &Path, artifact: &ExportArtifact) -> Result<PathBuf, ExportError> {
    let path = dir.join(&artifact.filename);
    let io_err = |source| ExportError::Io { path: path.clone(), source };

    std::fs::create_dir_all(dir).map_err(io_err)?;
    let mut tmp = tempfile::NamedTempFile::new_in(dir).map_err(io_err)?;
    tmp.write_all(&artifact.bytes).map_err(io_err)?;
    tmp.flush().map_err(io_err)?;
    tmp.persist(&path).map_err(|e| io_err(e.error))?;
    Ok(path)
}

/// Capture-and-encode front end shared by the CLI and the async pipeline.
#[derive(Clone)]
pub struct Exporter {
    capture: Arc<dyn Capture>,
    settings: RenderSettings,
    pdf_title: String,
}

impl Exporter {
    pub fn new(settings: RenderSettings) -> Self {
        let rasterizer = Rasterizer::new(&settings);
        Self::with_capture(Arc::new(rasterizer), settings)
    }

    /// Use a custom capture backend, e.g. a failing one in tests.
    pub fn with_capture(capture: Arc<dyn Capture>, settings: RenderSettings) -> Self {
        Self { capture, settings, pdf_title: "Planilla de Citación".to_string() }
    }

    pub fn with_pdf_title(mut self, title: impl Into<String>) -> Self {
        self.pdf_title = title.into();
        self
    }

    pub fn settings(&self) -> &RenderSettings {
        &self.settings
    }

    pub(crate) fn capture_backend(&self) -> Arc<dyn Capture> {
        self.capture.clone()
    }

    /// Pixel scale used when capturing for a format; SVG is never captured.
    pub fn scale_for(&self, format: ExportFormat) -> Option<f32> {
        match format {
            ExportFormat::Png => Some(self.settings.png_scale),
            ExportFormat::Pdf => Some(self.settings.pdf_scale),
            ExportFormat::Svg => None,
        }
    }

    fn background(&self) -> (u8, u8, u8) {
        parse_hex_rgb(&self.settings.background_color).unwrap_or((255, 255, 255))
    }

    /// Encode an already captured bitmap for `format`.
    pub fn encode(&self, bitmap: Bitmap, format: ExportFormat) -> Result<Vec<u8>, EncodeError> {
        match format {
            ExportFormat::Png => encode_png(bitmap),
            ExportFormat::Pdf => encode_pdf(&bitmap, &self.pdf_title, self.background()),
            ExportFormat::Svg => Err(EncodeError::NotRaster(format)),
        }
    }

    pub fn render(
        &self,
        document: &DocumentModel,
        metadata: &MatchMetadata,
        format: ExportFormat,
    ) -> Result<ExportArtifact, ExportError> {
        let filename = artifact_filename(metadata, format.extension());
        let bytes = match self.scale_for(format) {
            None => document.to_svg(&self.settings.font_family).into_bytes(),
            Some(scale) => {
                let bitmap = self.capture.capture(document, scale)?;
                self.encode(bitmap, format)?
            }
        };
        Ok(ExportArtifact { bytes, filename })
    }

    /// Render and save one format, catching and logging any failure.
    pub fn export(
        &self,
        document: &DocumentModel,
        metadata: &MatchMetadata,
        format: ExportFormat,
        dir: &Path,
    ) -> ExportOutcome {
        let result = self
            .render(document, metadata, format)
            .and_then(|artifact| write_artifact(dir, &artifact));
        match result {
            Ok(path) => {
                log::info!("Saved {} to {}", format, path.display());
                ExportOutcome::Saved(path)
            }
            Err(e) => {
                log::error!("Error exporting {}: {}", format, e);
                ExportOutcome::Failed(e)
            }
        }
    }
}

impl fmt::Debug for Exporter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Exporter").field("settings", &self.settings).field("pdf_title", &self.pdf_title).finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn meta(opponent: &str, date: &str) -> MatchMetadata {
        MatchMetadata { opponent: opponent.to_string(), date: date.to_string(), ..MatchMetadata::default() }
    }

    #[test]
    fn test_artifact_filename() {
        assert_eq!(artifact_filename(&meta("Sunchales FC", "2024-05-01"), "png"), "planilla-Sunchales FC-2024-05-01.png");
        assert_eq!(artifact_filename(&meta("", ""), "pdf"), "planilla--.pdf");
    }

    #[test]
    fn test_export_format_parse() {
        assert_eq!("PNG".parse::<ExportFormat>(), Ok(ExportFormat::Png));
        assert_eq!(" svg ".parse::<ExportFormat>(), Ok(ExportFormat::Svg));
        assert!("gif".parse::<ExportFormat>().is_err());
        assert_eq!(ExportFormat::Pdf.to_string(), "pdf");
    }

    #[test]
    fn test_encode_png_rejects_short_buffer() {
        let bitmap = Bitmap { width: 2, height: 2, pixels: vec![0; 4] };
        assert!(matches!(encode_png(bitmap), Err(EncodeError::InvalidBitmap { .. })));
    }

    #[cfg(feature = "printpdf")]
    #[test]
    fn test_encode_pdf_rejects_oversized_bitmap() {
        let bitmap = Bitmap { width: u32::MAX, height: u32::MAX, pixels: vec![0; 16] };
        assert!(matches!(
            encode_pdf(&bitmap, "Planilla", (255, 255, 255)),
            Err(EncodeError::InvalidBitmap { .. })
        ));
    }

    #[test]
    fn test_scale_for_formats() {
        let settings = RenderSettings::default();
        let rasterizer = Rasterizer::with_fontdb(Arc::new(resvg::usvg::fontdb::Database::new()), &settings);
        let exporter = Exporter::with_capture(Arc::new(rasterizer), settings);
        assert_eq!(exporter.scale_for(ExportFormat::Png), Some(2.0));
        assert_eq!(exporter.scale_for(ExportFormat::Pdf), Some(3.0));
        assert_eq!(exporter.scale_for(ExportFormat::Svg), None);
    }

    #[test]
    fn test_write_artifact_leaves_no_temp_files() {
        let dir = tempfile::tempdir().unwrap();
        let artifact = ExportArtifact { bytes: b"hola".to_vec(), filename: "planilla-x-y.svg".to_string() };
        let path = write_artifact(dir.path(), &artifact).unwrap();
        assert_eq!(std::fs::read(&path).unwrap(), b"hola");
        assert_eq!(std::fs::read_dir(dir.path()).unwrap().count(), 1);
    }

    #[cfg(feature = "printpdf")]
    #[test]
    fn test_encode_pdf_single_a4_page() {
        let bitmap = Bitmap { width: 8, height: 12, pixels: vec![255; 8 * 12 * 4] };
        let bytes = encode_pdf(&bitmap, "Planilla", (255, 255, 255)).unwrap();
        let text = String::from_utf8_lossy(&bytes);
        assert!(bytes.starts_with(b"%PDF"));
        assert!(text.contains("/MediaBox"));
        assert!(text.contains("595."));
        assert!(text.contains("841."));
    }
}
