#![cfg(feature = "printpdf")]

use std::sync::Arc;

use parking_lot::Mutex;
use planilla_core::Lineup;
use planilla_render::{
    Bitmap, Branding, Capture, CaptureError, DocumentModel, ExportFormat, ExportPipeline, Exporter, Rasterizer,
    RenderSettings,
};
use resvg::usvg::fontdb;

/// Records every scale it is asked for and returns a blank page of the matching size.
#[derive(Default)]
struct RecordingCapture {
    scales: Mutex<Vec<f32>>,
}

impl Capture for RecordingCapture {
    fn capture(&self, document: &DocumentModel, scale: f32) -> Result<Bitmap, CaptureError> {
        self.scales.lock().push(scale);
        let width = (document.width * scale).round() as u32;
        let height = (document.height * scale).round() as u32;
        Ok(Bitmap { width, height, pixels: vec![255; width as usize * height as usize * 4] })
    }
}

#[tokio::test]
async fn pdf_export_is_one_a4_page() {
    let dir = tempfile::tempdir().unwrap();
    let settings = RenderSettings::default();
    let rasterizer = Rasterizer::with_fontdb(Arc::new(fontdb::Database::new()), &settings);
    let exporter = Exporter::with_capture(Arc::new(rasterizer), settings);
    let pipeline = ExportPipeline::new(exporter, Branding::default());

    let outcome = pipeline.export(Lineup::default(), ExportFormat::Pdf, dir.path()).await;
    let path = outcome.path().expect("pdf saved");
    assert_eq!(path.file_name().unwrap(), "planilla-Libertad de Sunchales-2023-10-12.pdf");

    let bytes = std::fs::read(path).unwrap();
    assert!(bytes.starts_with(b"%PDF"));
    let text = String::from_utf8_lossy(&bytes);
    assert!(text.contains("/MediaBox"));
    assert!(text.contains("595."));
    assert!(text.contains("841."));
}

#[tokio::test]
async fn pdf_captures_at_scale_three_and_fills_the_page() {
    let dir = tempfile::tempdir().unwrap();
    let capture = Arc::new(RecordingCapture::default());
    let exporter = Exporter::with_capture(capture.clone(), RenderSettings::default());
    let pipeline = ExportPipeline::new(exporter, Branding::default());

    let outcome = pipeline.export(Lineup::default(), ExportFormat::Pdf, dir.path()).await;
    assert_eq!(*capture.scales.lock(), vec![3.0]);

    let bytes = std::fs::read(outcome.path().expect("pdf saved")).unwrap();
    let text = String::from_utf8_lossy(&bytes);
    // Image placed at the origin and stretched to 595.28 x 841.89 pt
    assert!(text.contains("595.27563 0 0 841.8899 0 0 cm"));
}

#[tokio::test]
async fn png_captures_at_scale_two() {
    let dir = tempfile::tempdir().unwrap();
    let capture = Arc::new(RecordingCapture::default());
    let exporter = Exporter::with_capture(capture.clone(), RenderSettings::default());
    let pipeline = ExportPipeline::new(exporter, Branding::default());

    let outcome = pipeline.export(Lineup::default(), ExportFormat::Png, dir.path()).await;
    assert!(outcome.is_saved());
    assert_eq!(*capture.scales.lock(), vec![2.0]);
}
