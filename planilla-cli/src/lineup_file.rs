//! Reading and writing lineup files (TOML or JSON, chosen by extension).

use std::path::Path;

use planilla_core::Lineup;

use crate::error::{CliError, CliResult};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineupFormat {
    Toml,
    Json,
}

impl LineupFormat {
    pub fn from_path(path: &Path) -> CliResult<Self> {
        match path.extension().and_then(|e| e.to_str()).map(|e| e.to_ascii_lowercase()).as_deref() {
            Some("toml") => Ok(LineupFormat::Toml),
            Some("json") => Ok(LineupFormat::Json),
            _ => Err(CliError::invalid_format(format!(
                "cannot tell lineup format of {} (expected .toml or .json)",
                path.display()
            ))),
        }
    }
}

pub fn load_lineup(path: &Path) -> CliResult<Lineup> {
    let format = LineupFormat::from_path(path)?;
    if !path.exists() {
        return Err(CliError::file_not_found(path.to_path_buf()));
    }
    let content = std::fs::read_to_string(path)?;
    let file = path.display().to_string();
    let lineup: Lineup = match format {
        LineupFormat::Toml => toml::from_str(&content).map_err(|e| CliError::parse(file, e.to_string()))?,
        LineupFormat::Json => serde_json::from_str(&content).map_err(|e| CliError::parse(file, e.to_string()))?,
    };
    log::debug!(
        "Loaded lineup with {} starters, {} substitutes, formation {}",
        lineup.starters.len(),
        lineup.substitutes.len(),
        lineup.formation
    );
    Ok(lineup)
}

pub fn serialize_lineup(lineup: &Lineup, format: LineupFormat) -> CliResult<String> {
    match format {
        LineupFormat::Toml => Ok(toml::to_string_pretty(lineup)?),
        LineupFormat::Json => serde_json::to_string_pretty(lineup).map_err(|e| CliError::io(e.to_string())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use planilla_core::Formation;

    #[test]
    fn test_format_from_extension() {
        assert_eq!(LineupFormat::from_path(Path::new("a.toml")).unwrap(), LineupFormat::Toml);
        assert_eq!(LineupFormat::from_path(Path::new("a.JSON")).unwrap(), LineupFormat::Json);
        assert!(LineupFormat::from_path(Path::new("a.yaml")).is_err());
        assert!(LineupFormat::from_path(Path::new("lineup")).is_err());
    }

    #[test]
    fn test_toml_roundtrip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("lineup.toml");
        let mut lineup = Lineup::default();
        lineup.set_formation(Formation::F352);
        lineup.notes = "Presión alta\nSalida corta".to_string();
        std::fs::write(&path, serialize_lineup(&lineup, LineupFormat::Toml).unwrap()).unwrap();
        assert_eq!(load_lineup(&path).unwrap(), lineup);
    }

    #[test]
    fn test_missing_file() {
        let err = load_lineup(Path::new("/nonexistent/lineup.json")).unwrap_err();
        assert!(matches!(err, CliError::FileNotFound { .. }));
    }

    #[test]
    fn test_parse_error_names_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("broken.json");
        std::fs::write(&path, r#"{"formation": "5-5-0"}"#).unwrap();
        match load_lineup(&path).unwrap_err() {
            CliError::Parse { file, .. } => assert!(file.ends_with("broken.json")),
            other => panic!("unexpected error {:?}", other),
        }
    }

    #[test]
    fn test_toml_parse_error_is_parse_not_config() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("broken.toml");
        std::fs::write(&path, "formation = \"4-4-2\"\nstarters = [").unwrap();
        match load_lineup(&path).unwrap_err() {
            CliError::Parse { file, .. } => assert!(file.ends_with("broken.toml")),
            other => panic!("unexpected error {:?}", other),
        }
    }
}
