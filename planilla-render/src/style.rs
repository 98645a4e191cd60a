//! Render settings and club branding shared by the CLI config and the exporter.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RenderSettings {
    /// Pixel scale for image export
    #[serde(default = "default_png_scale")]
    pub png_scale: f32,

    /// Pixel scale for the capture embedded in PDF export
    #[serde(default = "default_pdf_scale")]
    pub pdf_scale: f32,

    /// Opaque background painted under every capture
    #[serde(default = "default_background")]
    pub background_color: String,

    /// Font family list used for all text
    #[serde(default = "default_font_family")]
    pub font_family: String,

    /// Extra directories scanned for fonts in addition to system fonts
    #[serde(default)]
    pub font_dirs: Vec<PathBuf>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Branding {
    #[serde(default = "default_club_name")]
    pub club_name: String,

    #[serde(default = "default_club_location")]
    pub club_location: String,

    /// Badge text at the right of the header
    #[serde(default = "default_document_title")]
    pub document_title: String,

    #[serde(default = "default_primary_color")]
    pub primary_color: String,

    /// Club emblem image (PNG/JPEG/SVG); the header box stays empty when unset
    #[serde(default)]
    pub emblem: Option<PathBuf>,
}

fn default_png_scale() -> f32 { 2.0 }
fn default_pdf_scale() -> f32 { 3.0 }
fn default_background() -> String { "#ffffff".to_string() }
fn default_font_family() -> String { "Inter, Arial, Helvetica, sans-serif".to_string() }
fn default_club_name() -> String { "Club Atlético Unión".to_string() }
fn default_club_location() -> String { "Sunchales - Santa Fe".to_string() }
fn default_document_title() -> String { "Planilla de Citación".to_string() }
fn default_primary_color() -> String { "#004A2F".to_string() }

impl Default for RenderSettings {
    fn default() -> Self {
        Self {
            png_scale: default_png_scale(),
            pdf_scale: default_pdf_scale(),
            background_color: default_background(),
            font_family: default_font_family(),
            font_dirs: Vec::new(),
        }
    }
}

impl Default for Branding {
    fn default() -> Self {
        Self {
            club_name: default_club_name(),
            club_location: default_club_location(),
            document_title: default_document_title(),
            primary_color: default_primary_color(),
            emblem: None,
        }
    }
}

// Parse a hex color like "#RRGGBB" into 8-bit RGB
pub(crate) fn parse_hex_rgb(s: &str) -> Option<(u8, u8, u8)> {
    let hex = s.trim();
    let hex = hex.strip_prefix('#').unwrap_or(hex);
    if hex.len() != 6 || !hex.is_ascii() { return None; }
    let r = u8::from_str_radix(&hex[0..2], 16).ok()?;
    let g = u8::from_str_radix(&hex[2..4], 16).ok()?;
    let b = u8::from_str_radix(&hex[4..6], 16).ok()?;
    Some((r, g, b))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_scales() {
        let s = RenderSettings::default();
        assert_eq!(s.png_scale, 2.0);
        assert_eq!(s.pdf_scale, 3.0);
        assert_eq!(Branding::default().primary_color, "#004A2F");
    }

    #[test]
    fn test_parse_hex_rgb() {
        assert_eq!(parse_hex_rgb("#ffffff"), Some((255, 255, 255)));
        assert_eq!(parse_hex_rgb("004A2F"), Some((0, 74, 47)));
        assert_eq!(parse_hex_rgb("#fff"), None);
        assert_eq!(parse_hex_rgb("#zzzzzz"), None);
    }
}
