//! Export command implementation - write the lineup sheet as PNG/PDF/SVG

use anyhow::{Context, Result};
use std::path::PathBuf;

use planilla_core::Formation;
use planilla_render::{ExportFormat, ExportOutcome, ExportPipeline, Exporter};

use crate::config::Config;
use crate::error::CliError;
use crate::lineup_file::load_lineup;
use crate::FormatArg;

pub async fn execute(
    config: &Config,
    lineup_path: PathBuf,
    format: Option<FormatArg>,
    formation: Option<Formation>,
    out_dir: Option<PathBuf>,
) -> Result<()> {
    log::info!("Starting export");
    log::info!("Lineup file: {}", lineup_path.display());

    let mut lineup = load_lineup(&lineup_path)?;
    if let Some(formation) = formation {
        lineup.set_formation(formation);
    }

    let formats = resolve_formats(format, &config.output.formats);
    let dir = out_dir.unwrap_or_else(|| config.output.dir.clone());
    log::info!("Formats: {:?}, output directory: {}", formats, dir.display());

    let exporter = Exporter::new(config.render.clone()).with_pdf_title(config.branding.document_title.clone());
    let pipeline = ExportPipeline::new(exporter, config.branding.clone());

    let outcomes = pipeline.export_all(lineup, &formats, &dir).await;
    let mut failed = 0;
    for (format, outcome) in &outcomes {
        match outcome {
            ExportOutcome::Saved(path) => println!("{}", path.display()),
            ExportOutcome::Failed(e) => {
                failed += 1;
                eprintln!("{} export failed: {}", format, e);
            }
        }
    }

    if failed > 0 {
        return Err(CliError::export(failed, outcomes.len())).context("Export finished with errors");
    }
    log::info!("Export completed successfully");
    Ok(())
}

fn resolve_formats(arg: Option<FormatArg>, configured: &[ExportFormat]) -> Vec<ExportFormat> {
    match arg {
        Some(FormatArg::Png) => vec![ExportFormat::Png],
        Some(FormatArg::Pdf) => vec![ExportFormat::Pdf],
        Some(FormatArg::Svg) => vec![ExportFormat::Svg],
        Some(FormatArg::All) => ExportFormat::ALL.to_vec(),
        None if configured.is_empty() => vec![ExportFormat::Png],
        None => configured.to_vec(),
    }
}
