use serde::{Deserialize, Serialize};
use std::fmt;

/// Field role shown next to each starter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Role {
    #[serde(rename = "ARQ")]
    Goalkeeper,
    #[serde(rename = "DEF")]
    Defender,
    #[serde(rename = "MED")]
    Midfielder,
    #[serde(rename = "DEL")]
    Forward,
}

impl Role {
    pub fn code(&self) -> &'static str {
        match self {
            Role::Goalkeeper => "ARQ",
            Role::Defender => "DEF",
            Role::Midfielder => "MED",
            Role::Forward => "DEL",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

/// A point on the field in percent of field width/height.
///
/// `y_pct_from_baseline` grows from the own goal line (0) towards the
/// opponent's goal line (100); renderers must flip it for top-left origins.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct NormalizedPosition {
    pub x_pct: f32,
    pub y_pct_from_baseline: f32,
}

impl NormalizedPosition {
    pub const fn new(x_pct: f32, y_pct_from_baseline: f32) -> Self {
        Self { x_pct, y_pct_from_baseline }
    }

    pub fn is_within_field(&self) -> bool {
        (0.0..=100.0).contains(&self.x_pct) && (0.0..=100.0).contains(&self.y_pct_from_baseline)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Player {
    pub id: String,
    /// Jersey number as typed; "01" and "1" are different values.
    pub number: String,
    pub name: String,
    pub role: Role,
    /// Default position, used only when the formation has no slot for this player.
    pub position: NormalizedPosition,
}

impl Player {
    pub fn new(id: &str, number: &str, name: &str, role: Role, position: NormalizedPosition) -> Self {
        Self {
            id: id.to_string(),
            number: number.to_string(),
            name: name.to_string(),
            role,
            position,
        }
    }
}

/// A starter with the coordinate resolved for the selected formation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PositionedPlayer {
    pub id: String,
    pub number: String,
    pub name: String,
    pub role: Role,
    pub position: NormalizedPosition,
}

impl PositionedPlayer {
    pub fn from_player(player: &Player, position: NormalizedPosition) -> Self {
        Self {
            id: player.id.clone(),
            number: player.number.clone(),
            name: player.name.clone(),
            role: player.role,
            position,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Substitute {
    pub number: String,
    pub name: String,
}

impl Substitute {
    pub fn new(number: &str, name: &str) -> Self {
        Self { number: number.to_string(), name: name.to_string() }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StaffMember {
    pub role: String,
    pub name: String,
}

impl StaffMember {
    pub fn new(role: &str, name: &str) -> Self {
        Self { role: role.to_string(), name: name.to_string() }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MatchMetadata {
    #[serde(default)]
    pub category: String,
    #[serde(default)]
    pub opponent: String,
    /// ISO `YYYY-MM-DD`, kept as typed
    #[serde(default)]
    pub date: String,
    #[serde(default)]
    pub venue: String,
    #[serde(default = "default_kickoff")]
    pub kickoff: String,
}

fn default_kickoff() -> String { "15:30 HS".to_string() }

impl Default for MatchMetadata {
    fn default() -> Self {
        Self {
            category: String::new(),
            opponent: String::new(),
            date: String::new(),
            venue: String::new(),
            kickoff: default_kickoff(),
        }
    }
}

/// Last word of a display name, used for name tags on the field and bench.
pub fn short_name(name: &str) -> &str {
    name.split_whitespace().last().unwrap_or("")
}
