/*!
# Rasterizer

Captures a [`DocumentModel`] as an RGBA bitmap with resvg. Image resources
are read and validated before the SVG is parsed, so a broken emblem fails
the capture instead of silently rendering an empty box.
*/

use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use base64::Engine as _;
use resvg::tiny_skia;
use resvg::usvg;
use thiserror::Error;

use crate::document::DocumentModel;
use crate::style::{parse_hex_rgb, RenderSettings};

/// Largest scale accepted by [`Rasterizer`]; scale 8 is already a 6352 × 8984 pixmap.
pub const MAX_SCALE: f32 = 8.0;

#[derive(Error, Debug)]
pub enum CaptureError {
    #[error("failed to read resource {path}: {source}")]
    Resource {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("unsupported or corrupt image {path}: {reason}")]
    UnsupportedImage { path: PathBuf, reason: String },

    #[error("document could not be parsed: {0}")]
    Svg(String),

    #[error("invalid pixel scale {0}")]
    InvalidScale(f32),

    #[error("cannot allocate a {width}x{height} pixmap")]
    Allocation { width: u32, height: u32 },
}

/// Straight-alpha RGBA8 pixels, row-major from the top-left corner.
#[derive(Debug, Clone, PartialEq)]
pub struct Bitmap {
    pub width: u32,
    pub height: u32,
    pub pixels: Vec<u8>,
}

impl Bitmap {
    /// Length `pixels` must have for the stated size, or `None` if that overflows.
    pub fn expected_len(&self) -> Option<usize> {
        (self.width as usize).checked_mul(self.height as usize)?.checked_mul(4)
    }

    pub fn pixel(&self, x: u32, y: u32) -> Option<[u8; 4]> {
        if x >= self.width || y >= self.height {
            return None;
        }
        let i = (y as usize).checked_mul(self.width as usize)?.checked_add(x as usize)?.checked_mul(4)?;
        match self.pixels.get(i..i.checked_add(4)?)? {
            &[r, g, b, a] => Some([r, g, b, a]),
            _ => None,
        }
    }

    pub fn into_rgba_image(self) -> Option<image::RgbaImage> {
        image::RgbaImage::from_raw(self.width, self.height, self.pixels)
    }

    /// RGB8 pixels composited over an opaque background.
    pub fn to_rgb_over(&self, background: (u8, u8, u8)) -> Vec<u8> {
        let (br, bg, bb) = background;
        let mut out = Vec::with_capacity(self.pixels.len() / 4 * 3);
        for px in self.pixels.chunks_exact(4) {
            let alpha = px[3] as f32 / 255.0;
            let blend = |c: u8, b: u8| (c as f32 * alpha + b as f32 * (1.0 - alpha)).round() as u8;
            out.push(blend(px[0], br));
            out.push(blend(px[1], bg));
            out.push(blend(px[2], bb));
        }
        out
    }
}

/// Anything that can turn a document into pixels.
pub trait Capture: Send + Sync {
    fn capture(&self, document: &DocumentModel, scale: f32) -> Result<Bitmap, CaptureError>;
}

pub struct Rasterizer {
    fontdb: Arc<usvg::fontdb::Database>,
    font_family: String,
    background: (u8, u8, u8),
}

impl Rasterizer {
    pub fn new(settings: &RenderSettings) -> Self {
        let mut db = usvg::fontdb::Database::new();
        db.load_system_fonts();
        for dir in &settings.font_dirs {
            db.load_fonts_dir(dir);
        }
        log::debug!("Font database holds {} faces", db.len());
        Self::with_fontdb(Arc::new(db), settings)
    }

    /// Share one font database between rasterizers; loading system fonts is slow.
    pub fn with_fontdb(fontdb: Arc<usvg::fontdb::Database>, settings: &RenderSettings) -> Self {
        let background = parse_hex_rgb(&settings.background_color).unwrap_or_else(|| {
            log::warn!("Invalid background color '{}', using white", settings.background_color);
            (255, 255, 255)
        });
        Self { fontdb, font_family: settings.font_family.clone(), background }
    }

    pub fn font_family(&self) -> &str {
        &self.font_family
    }

    fn options(&self) -> usvg::Options<'static> {
        let mut opt = usvg::Options::default();
        opt.fontdb = self.fontdb.clone();
        opt.font_family = primary_font(&self.font_family);
        opt
    }
}

impl Capture for Rasterizer {
    fn capture(&self, document: &DocumentModel, scale: f32) -> Result<Bitmap, CaptureError> {
        if !scale.is_finite() || scale <= 0.0 || scale > MAX_SCALE {
            return Err(CaptureError::InvalidScale(scale));
        }

        let mut hrefs = HashMap::new();
        for source in document.image_sources() {
            if !hrefs.contains_key(source) {
                hrefs.insert(source.to_path_buf(), image_data_uri(source)?);
            }
        }
        let svg = document.render_svg(&self.font_family, |p| hrefs.get(p).cloned());

        let tree = usvg::Tree::from_str(&svg, &self.options()).map_err(|e| CaptureError::Svg(e.to_string()))?;

        let width = (document.width * scale).round() as u32;
        let height = (document.height * scale).round() as u32;
        let mut pixmap =
            tiny_skia::Pixmap::new(width, height).ok_or(CaptureError::Allocation { width, height })?;
        let (r, g, b) = self.background;
        pixmap.fill(tiny_skia::Color::from_rgba8(r, g, b, 255));
        resvg::render(&tree, tiny_skia::Transform::from_scale(scale, scale), &mut pixmap.as_mut());

        let pixels = pixmap
            .pixels()
            .iter()
            .flat_map(|p| {
                let c = p.demultiply();
                [c.red(), c.green(), c.blue(), c.alpha()]
            })
            .collect();

        log::debug!("Captured document at scale {} ({}x{})", scale, width, height);
        Ok(Bitmap { width, height, pixels })
    }
}

/// Read an image file and encode it as a data URI, rejecting anything that does not decode.
pub fn image_data_uri(path: &Path) -> Result<String, CaptureError> {
    let bytes = std::fs::read(path).map_err(|source| CaptureError::Resource { path: path.to_path_buf(), source })?;

    let is_svg = path
        .extension()
        .and_then(|e| e.to_str())
        .is_some_and(|e| e.eq_ignore_ascii_case("svg"));
    let mime = if is_svg {
        usvg::Tree::from_data(&bytes, &usvg::Options::default())
            .map_err(|e| CaptureError::UnsupportedImage { path: path.to_path_buf(), reason: e.to_string() })?;
        "image/svg+xml"
    } else {
        let format = image::guess_format(&bytes)
            .map_err(|e| CaptureError::UnsupportedImage { path: path.to_path_buf(), reason: e.to_string() })?;
        image::load_from_memory_with_format(&bytes, format)
            .map_err(|e| CaptureError::UnsupportedImage { path: path.to_path_buf(), reason: e.to_string() })?;
        match format {
            image::ImageFormat::Png => "image/png",
            image::ImageFormat::Jpeg => "image/jpeg",
            other => {
                return Err(CaptureError::UnsupportedImage {
                    path: path.to_path_buf(),
                    reason: format!("{:?} images cannot be embedded", other),
                })
            }
        }
    };

    let encoded = base64::engine::general_purpose::STANDARD.encode(&bytes);
    Ok(format!("data:{};base64,{}", mime, encoded))
}

// First family in a CSS font list, unquoted
fn primary_font(list: &str) -> String {
    list.split(',')
        .map(|f| f.trim().trim_matches(|c| c == '"' || c == '\''))
        .find(|f| !f.is_empty())
        .unwrap_or("sans-serif")
        .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::style::Branding;
    use planilla_core::Lineup;

    fn rasterizer() -> Rasterizer {
        // No system fonts: text is skipped, everything else renders
        Rasterizer::with_fontdb(Arc::new(usvg::fontdb::Database::new()), &RenderSettings::default())
    }

    #[test]
    fn test_primary_font() {
        assert_eq!(primary_font("Inter, Arial, sans-serif"), "Inter");
        assert_eq!(primary_font("'Open Sans', serif"), "Open Sans");
        assert_eq!(primary_font(""), "sans-serif");
    }

    #[test]
    fn test_capture_size_and_background() {
        let doc = DocumentModel::from_lineup(&Lineup::default(), &Branding::default());
        let bitmap = rasterizer().capture(&doc, 1.0).unwrap();
        assert_eq!((bitmap.width, bitmap.height), (794, 1123));
        assert_eq!(bitmap.pixel(0, 1122), Some([255, 255, 255, 255]));
        // Top border uses the primary colour
        assert_eq!(bitmap.pixel(400, 5), Some([0x00, 0x4A, 0x2F, 255]));
    }

    #[test]
    fn test_capture_rejects_bad_scale() {
        let doc = DocumentModel::from_lineup(&Lineup::default(), &Branding::default());
        assert!(matches!(rasterizer().capture(&doc, 0.0), Err(CaptureError::InvalidScale(_))));
        assert!(matches!(rasterizer().capture(&doc, f32::NAN), Err(CaptureError::InvalidScale(_))));
    }

    #[test]
    fn test_missing_emblem_fails_capture() {
        let branding = Branding { emblem: Some(PathBuf::from("/nonexistent/escudo.png")), ..Branding::default() };
        let doc = DocumentModel::from_lineup(&Lineup::default(), &branding);
        assert!(matches!(rasterizer().capture(&doc, 1.0), Err(CaptureError::Resource { .. })));
    }

    #[test]
    fn test_corrupt_emblem_fails_capture() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("escudo.png");
        std::fs::write(&path, b"not an image").unwrap();
        assert!(matches!(image_data_uri(&path), Err(CaptureError::UnsupportedImage { .. })));
    }

    #[test]
    fn test_png_emblem_becomes_data_uri() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("escudo.png");
        image::RgbaImage::from_pixel(4, 4, image::Rgba([0, 74, 47, 255])).save(&path).unwrap();
        let uri = image_data_uri(&path).unwrap();
        assert!(uri.starts_with("data:image/png;base64,"));
    }

    #[test]
    fn test_rgb_over_white() {
        let bitmap = Bitmap { width: 2, height: 1, pixels: vec![0, 0, 0, 0, 10, 20, 30, 255] };
        assert_eq!(bitmap.to_rgb_over((255, 255, 255)), vec![255, 255, 255, 10, 20, 30]);
    }

    #[test]
    fn test_pixel_on_short_buffer() {
        let bitmap = Bitmap { width: 2, height: 2, pixels: vec![7; 8] };
        assert_eq!(bitmap.pixel(1, 0), Some([7, 7, 7, 7]));
        assert_eq!(bitmap.pixel(1, 1), None);
    }

    #[test]
    fn test_expected_len_does_not_overflow() {
        let bitmap = Bitmap { width: u32::MAX, height: u32::MAX, pixels: Vec::new() };
        assert_eq!(bitmap.pixel(70_000, 70_000), None);
        let small = Bitmap { width: 3, height: 2, pixels: Vec::new() };
        assert_eq!(small.expected_len(), Some(24));
    }
}
