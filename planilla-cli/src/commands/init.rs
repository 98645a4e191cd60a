//! Init command - write the default lineup to a file

use anyhow::{Context, Result};
use std::path::Path;

use planilla_core::Lineup;

use crate::error::CliError;
use crate::lineup_file::{serialize_lineup, LineupFormat};

pub fn execute(out: &Path, force: bool) -> Result<()> {
    if out.exists() && !force {
        return Err(CliError::AlreadyExists { path: out.to_path_buf() }.into());
    }
    let format = LineupFormat::from_path(out)?;
    let content = serialize_lineup(&Lineup::default(), format)?;
    std::fs::write(out, content).with_context(|| format!("Failed to write lineup file: {}", out.display()))?;
    log::info!("Wrote default lineup to {}", out.display());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lineup_file::load_lineup;

    #[test]
    fn test_init_writes_loadable_lineup() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("lineup.json");
        execute(&path, false).unwrap();
        assert_eq!(load_lineup(&path).unwrap(), Lineup::default());
    }

    #[test]
    fn test_init_refuses_overwrite() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("lineup.toml");
        std::fs::write(&path, "notes = \"mine\"\n").unwrap();
        assert!(execute(&path, false).is_err());
        assert_eq!(std::fs::read_to_string(&path).unwrap(), "notes = \"mine\"\n");
        execute(&path, true).unwrap();
        assert_eq!(load_lineup(&path).unwrap(), Lineup::default());
    }
}
