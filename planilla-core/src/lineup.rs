//! Lineup state and the update operations the editing surface is allowed to use.
//!
//! A [`Lineup`] is a plain value: derivations take it by reference and edits go
//! through replace-at-index, append and remove-at-index helpers below.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::formation::Formation;
use crate::layout;
use crate::types::{MatchMetadata, NormalizedPosition, Player, PositionedPlayer, Role, StaffMember, Substitute};

/// Number given to the first substitute of an empty bench.
pub const FIRST_SUBSTITUTE_NUMBER: u32 = 12;

pub const NEW_SUBSTITUTE_NAME: &str = "Nuevo Jugador";

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum LineupError {
    #[error("{list} index {index} out of range (len {len})")]
    IndexOutOfRange { list: &'static str, index: usize, len: usize },
}

/// Editable text field of a starter or substitute.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlayerField {
    Number,
    Name,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Lineup {
    #[serde(default)]
    pub formation: Formation,
    #[serde(default)]
    pub starters: Vec<Player>,
    #[serde(default)]
    pub substitutes: Vec<Substitute>,
    #[serde(default)]
    pub staff: Vec<StaffMember>,
    #[serde(default)]
    pub metadata: MatchMetadata,
    #[serde(default)]
    pub notes: String,
}

impl Default for Lineup {
    fn default() -> Self {
        let starters = vec![
            Player::new("1", "01", "Gonzalo González", Role::Goalkeeper, NormalizedPosition::new(50.0, 10.0)),
            Player::new("2", "04", "Manuel Vargas", Role::Defender, NormalizedPosition::new(85.0, 30.0)),
            Player::new("3", "02", "Santiago Barraza", Role::Defender, NormalizedPosition::new(65.0, 25.0)),
            Player::new("4", "06", "Nicolás Canavessio", Role::Defender, NormalizedPosition::new(35.0, 25.0)),
            Player::new("5", "03", "Raúl Chamorro", Role::Defender, NormalizedPosition::new(15.0, 30.0)),
            Player::new("6", "08", "Alexandro Ponce", Role::Midfielder, NormalizedPosition::new(85.0, 55.0)),
            Player::new("7", "05", "Manuel Vargas", Role::Midfielder, NormalizedPosition::new(65.0, 55.0)),
            Player::new("8", "10", "Joaquín Castellano", Role::Midfielder, NormalizedPosition::new(35.0, 55.0)),
            Player::new("9", "11", "Gonzalo Schonfeld", Role::Midfielder, NormalizedPosition::new(15.0, 55.0)),
            Player::new("10", "07", "Adrián Rodríguez", Role::Forward, NormalizedPosition::new(35.0, 85.0)),
            Player::new("11", "09", "Pedro Muné", Role::Forward, NormalizedPosition::new(65.0, 85.0)),
        ];
        let substitutes = vec![
            Substitute::new("12", "A. Ruffinetti"),
            Substitute::new("13", "I. Baudin"),
            Substitute::new("14", "F. Hansen"),
            Substitute::new("15", "G. Pardo"),
            Substitute::new("16", "F. Cima"),
            Substitute::new("17", "C. Sánchez"),
            Substitute::new("18", "A. Maza"),
        ];
        let staff = vec![
            StaffMember::new("DT", "Marcelo Milanese"),
            StaffMember::new("AC", "Ezequiel Centurion"),
            StaffMember::new("PF", "Emanuel Moyano"),
        ];
        let metadata = MatchMetadata {
            category: "Primera Div.".to_string(),
            opponent: "Libertad de Sunchales".to_string(),
            date: "2023-10-12".to_string(),
            venue: "Estadio Principal".to_string(),
            ..MatchMetadata::default()
        };

        Self {
            formation: Formation::F442,
            starters,
            substitutes,
            staff,
            metadata,
            notes: String::new(),
        }
    }
}

impl Lineup {
    /// Starters with coordinates for the current formation.
    pub fn positioned_players(&self) -> Vec<PositionedPlayer> {
        layout::resolve(&self.starters, self.formation.slots())
    }

    pub fn set_formation(&mut self, formation: Formation) {
        log::debug!("Formation changed: {} -> {}", self.formation, formation);
        self.formation = formation;
    }

    pub fn update_starter(&mut self, index: usize, field: PlayerField, value: &str) -> Result<(), LineupError> {
        let len = self.starters.len();
        let player = self
            .starters
            .get_mut(index)
            .ok_or(LineupError::IndexOutOfRange { list: "starters", index, len })?;
        match field {
            PlayerField::Number => player.number = value.to_string(),
            PlayerField::Name => player.name = value.to_string(),
        }
        Ok(())
    }

    /// Number for the next substitute: one past the highest numeric number on the bench.
    ///
    /// Non-numeric numbers are ignored; a bench without any numeric entry starts at 12.
    pub fn next_substitute_number(&self) -> u32 {
        self.substitutes
            .iter()
            .filter_map(|s| s.number.trim().parse::<u32>().ok())
            .max()
            .map(|n| n.saturating_add(1))
            .unwrap_or(FIRST_SUBSTITUTE_NUMBER)
    }

    /// Append a substitute and return its index.
    pub fn add_substitute(&mut self) -> usize {
        let number = self.next_substitute_number().to_string();
        self.substitutes.push(Substitute::new(&number, NEW_SUBSTITUTE_NAME));
        self.substitutes.len() - 1
    }

    pub fn remove_substitute(&mut self, index: usize) -> Result<Substitute, LineupError> {
        if index >= self.substitutes.len() {
            return Err(LineupError::IndexOutOfRange { list: "substitutes", index, len: self.substitutes.len() });
        }
        Ok(self.substitutes.remove(index))
    }

    pub fn update_substitute(&mut self, index: usize, field: PlayerField, value: &str) -> Result<(), LineupError> {
        let len = self.substitutes.len();
        let sub = self
            .substitutes
            .get_mut(index)
            .ok_or(LineupError::IndexOutOfRange { list: "substitutes", index, len })?;
        match field {
            PlayerField::Number => sub.number = value.to_string(),
            PlayerField::Name => sub.name = value.to_string(),
        }
        Ok(())
    }

    /// Staff roles and count are fixed; only names change.
    pub fn update_staff(&mut self, index: usize, name: &str) -> Result<(), LineupError> {
        let len = self.staff.len();
        let member = self
            .staff
            .get_mut(index)
            .ok_or(LineupError::IndexOutOfRange { list: "staff", index, len })?;
        member.name = name.to_string();
        Ok(())
    }
}
