//! Async export actions: capture, then encode and save, off the async executor.

use std::path::{Path, PathBuf};

use planilla_core::{Lineup, LineupStore};

use crate::document::DocumentModel;
use crate::export::{artifact_filename, write_artifact, ExportArtifact, ExportError, ExportFormat, ExportOutcome, Exporter};
use crate::style::Branding;

/// Runs export actions against lineup snapshots.
///
/// Every call works on its own snapshot; concurrent calls share nothing but
/// the exporter.
#[derive(Debug, Clone)]
pub struct ExportPipeline {
    exporter: Exporter,
    branding: Branding,
}

impl ExportPipeline {
    pub fn new(exporter: Exporter, branding: Branding) -> Self {
        Self { exporter, branding }
    }

    pub fn exporter(&self) -> &Exporter {
        &self.exporter
    }

    /// Snapshot the store now and export that state.
    pub async fn export_from_store(&self, store: &LineupStore, format: ExportFormat, dir: &Path) -> ExportOutcome {
        self.export(store.snapshot(), format, dir).await
    }

    /// Export one format. Errors are logged and returned as [`ExportOutcome::Failed`].
    pub async fn export(&self, lineup: Lineup, format: ExportFormat, dir: &Path) -> ExportOutcome {
        match self.run(lineup, format, dir.to_path_buf()).await {
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

    /// Export several formats one after another from the same snapshot.
    pub async fn export_all(&self, lineup: Lineup, formats: &[ExportFormat], dir: &Path) -> Vec<(ExportFormat, ExportOutcome)> {
        let mut outcomes = Vec::with_capacity(formats.len());
        for &format in formats {
            outcomes.push((format, self.export(lineup.clone(), format, dir).await));
        }
        outcomes
    }

    async fn run(&self, lineup: Lineup, format: ExportFormat, dir: PathBuf) -> Result<PathBuf, ExportError> {
        let document = DocumentModel::from_lineup(&lineup, &self.branding);
        let filename = artifact_filename(&lineup.metadata, format.extension());

        let bytes = match self.exporter.scale_for(format) {
            None => document.to_svg(&self.exporter.settings().font_family).into_bytes(),
            Some(scale) => {
                // Stage 1: capture completes before anything is encoded
                let capture = self.exporter.capture_backend();
                let bitmap = tokio::task::spawn_blocking(move || capture.capture(&document, scale))
                    .await
                    .map_err(|e| ExportError::Task(e.to_string()))??;

                // Stage 2: encode the owned bitmap
                let exporter = self.exporter.clone();
                tokio::task::spawn_blocking(move || exporter.encode(bitmap, format))
                    .await
                    .map_err(|e| ExportError::Task(e.to_string()))??
            }
        };

        let artifact = ExportArtifact { bytes, filename };
        tokio::task::spawn_blocking(move || write_artifact(&dir, &artifact))
            .await
            .map_err(|e| ExportError::Task(e.to_string()))?
    }
}
