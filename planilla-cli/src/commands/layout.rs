//! Layout command - print the positioned starters as JSON

use anyhow::{Context, Result};
use std::path::PathBuf;

use planilla_core::Formation;

use crate::lineup_file::load_lineup;

pub fn execute(lineup_path: PathBuf, formation: Option<Formation>) -> Result<()> {
    let mut lineup = load_lineup(&lineup_path)?;
    if let Some(formation) = formation {
        lineup.set_formation(formation);
    }
    let players = lineup.positioned_players();
    let json = serde_json::to_string_pretty(&players).context("Failed to serialize layout")?;
    println!("{}", json);
    Ok(())
}
