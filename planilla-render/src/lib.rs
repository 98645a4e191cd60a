/*!
# Planilla Render

Turns a lineup into a printable match-day sheet.

## Pipeline

1. **Document Model**: lays out header, match strip, lists, pitch and notes
   as a tree of visual nodes on a fixed 794 × 1123 page
2. **Rasterizer**: captures the tree as an RGBA bitmap at a pixel scale
3. **Exporter**: encodes the bitmap as PNG or as a single A4 PDF page, or
   writes the tree as SVG, and saves the file atomically
*/

pub mod document;
pub mod export;
pub mod pipeline;
pub mod raster;
pub mod style;
pub mod svg;
pub mod text;

pub use document::{DocumentInput, DocumentModel, Node, NOTES_PLACEHOLDER, PAGE_HEIGHT, PAGE_WIDTH};
pub use export::{
    artifact_filename, encode_pdf, encode_png, write_artifact, EncodeError, ExportArtifact, ExportError, ExportFormat,
    ExportOutcome, Exporter,
};
pub use pipeline::ExportPipeline;
pub use raster::{Bitmap, Capture, CaptureError, Rasterizer};
pub use style::{Branding, RenderSettings};
