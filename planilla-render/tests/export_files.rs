use std::sync::Arc;

use planilla_core::{Lineup, LineupStore, MatchMetadata};
use planilla_render::raster::{Bitmap, Capture, CaptureError};
use planilla_render::{Branding, DocumentModel, ExportFormat, ExportOutcome, ExportPipeline, Exporter, Rasterizer, RenderSettings};
use resvg::usvg::fontdb;

struct FailingCapture;

impl Capture for FailingCapture {
    fn capture(&self, _document: &DocumentModel, _scale: f32) -> Result<Bitmap, CaptureError> {
        Err(CaptureError::Svg("simulated capture failure".into()))
    }
}

fn fontless_exporter() -> Exporter {
    let settings = RenderSettings::default();
    let rasterizer = Rasterizer::with_fontdb(Arc::new(fontdb::Database::new()), &settings);
    Exporter::with_capture(Arc::new(rasterizer), settings)
}

fn sunchales_lineup() -> Lineup {
    Lineup {
        metadata: MatchMetadata {
            opponent: "Sunchales FC".to_string(),
            date: "2024-05-01".to_string(),
            ..Lineup::default().metadata
        },
        ..Lineup::default()
    }
}

#[tokio::test]
async fn png_export_has_expected_name_size_and_background() {
    let _ = env_logger::builder().is_test(true).try_init();
    let dir = tempfile::tempdir().unwrap();
    let pipeline = ExportPipeline::new(fontless_exporter(), Branding::default());

    let outcome = pipeline.export(sunchales_lineup(), ExportFormat::Png, dir.path()).await;
    let path = outcome.path().expect("png saved").to_path_buf();
    assert_eq!(path.file_name().unwrap(), "planilla-Sunchales FC-2024-05-01.png");

    let img = image::open(&path).unwrap().to_rgba8();
    assert_eq!(img.dimensions(), (1588, 2246));
    assert_eq!(img.get_pixel(0, 2245).0, [255, 255, 255, 255]);
}

#[tokio::test]
async fn failing_capture_writes_nothing() {
    let _ = env_logger::builder().is_test(true).try_init();
    let dir = tempfile::tempdir().unwrap();
    let exporter = Exporter::with_capture(Arc::new(FailingCapture), RenderSettings::default());
    let pipeline = ExportPipeline::new(exporter, Branding::default());

    for format in [ExportFormat::Png, ExportFormat::Pdf] {
        let outcome = pipeline.export(sunchales_lineup(), format, dir.path()).await;
        assert!(matches!(outcome, ExportOutcome::Failed(_)), "{} should fail", format);
    }
    assert_eq!(std::fs::read_dir(dir.path()).unwrap().count(), 0);
}

#[tokio::test]
async fn missing_emblem_fails_without_output() {
    let dir = tempfile::tempdir().unwrap();
    let branding = Branding { emblem: Some(dir.path().join("no-such-emblem.png")), ..Branding::default() };
    let pipeline = ExportPipeline::new(fontless_exporter(), branding);

    let outcome = pipeline.export(Lineup::default(), ExportFormat::Png, dir.path()).await;
    assert!(!outcome.is_saved());
    assert_eq!(std::fs::read_dir(dir.path()).unwrap().count(), 0);
}

#[tokio::test]
async fn export_uses_snapshot_taken_at_invocation() {
    let dir = tempfile::tempdir().unwrap();
    let store = LineupStore::new(sunchales_lineup());
    let pipeline = ExportPipeline::new(fontless_exporter(), Branding::default());

    let outcome = pipeline.export_from_store(&store, ExportFormat::Svg, dir.path()).await;
    store.update(|l| l.metadata.opponent = "Otro".to_string());

    let path = outcome.path().unwrap();
    assert_eq!(path.file_name().unwrap(), "planilla-Sunchales FC-2024-05-01.svg");
    let svg = std::fs::read_to_string(path).unwrap();
    assert!(svg.contains("Sunchales FC"));
    assert!(!svg.contains("Otro"));
}

#[test]
fn svg_export_is_deterministic() {
    let dir = tempfile::tempdir().unwrap();
    let exporter = fontless_exporter();
    let lineup = sunchales_lineup();
    let doc = DocumentModel::from_lineup(&lineup, &Branding::default());

    let a = exporter.render(&doc, &lineup.metadata, ExportFormat::Svg).unwrap();
    let b = exporter.render(&doc, &lineup.metadata, ExportFormat::Svg).unwrap();
    assert_eq!(a, b, "SVG bytes differ between identical renders");

    let outcome = exporter.export(&doc, &lineup.metadata, ExportFormat::Svg, dir.path());
    assert!(outcome.is_saved());
}
