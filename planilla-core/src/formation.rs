//! Formation catalog
//!
//! Each formation is authored once as eleven field positions in roster order:
//! goalkeeper first, then defence, midfield and attack.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

use crate::types::NormalizedPosition;

/// Number of slots every formation provides.
pub const FORMATION_SIZE: usize = 11;

pub type FormationSlots = [NormalizedPosition; FORMATION_SIZE];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Formation {
    #[default]
    #[serde(rename = "4-4-2")]
    F442,
    #[serde(rename = "4-3-3")]
    F433,
    #[serde(rename = "3-5-2")]
    F352,
    #[serde(rename = "4-1-4-1")]
    F4141,
}

const fn p(x: f32, y: f32) -> NormalizedPosition {
    NormalizedPosition::new(x, y)
}

const SLOTS_442: FormationSlots = [
    p(50.0, 10.0),
    p(15.0, 30.0), p(35.0, 25.0), p(65.0, 25.0), p(85.0, 30.0),
    p(15.0, 55.0), p(35.0, 55.0), p(65.0, 55.0), p(85.0, 55.0),
    p(35.0, 85.0), p(65.0, 85.0),
];

const SLOTS_433: FormationSlots = [
    p(50.0, 10.0),
    p(15.0, 30.0), p(35.0, 25.0), p(65.0, 25.0), p(85.0, 30.0),
    p(25.0, 50.0), p(50.0, 55.0), p(75.0, 50.0),
    p(20.0, 80.0), p(50.0, 85.0), p(80.0, 80.0),
];

const SLOTS_352: FormationSlots = [
    p(50.0, 10.0),
    p(25.0, 25.0), p(50.0, 25.0), p(75.0, 25.0),
    p(10.0, 55.0), p(30.0, 50.0), p(50.0, 60.0), p(70.0, 50.0), p(90.0, 55.0),
    p(35.0, 85.0), p(65.0, 85.0),
];

const SLOTS_4141: FormationSlots = [
    p(50.0, 10.0),
    p(15.0, 30.0), p(35.0, 25.0), p(65.0, 25.0), p(85.0, 30.0),
    p(50.0, 45.0),
    p(15.0, 65.0), p(35.0, 65.0), p(65.0, 65.0), p(85.0, 65.0),
    p(50.0, 85.0),
];

impl Formation {
    pub const ALL: [Formation; 4] = [Formation::F442, Formation::F433, Formation::F352, Formation::F4141];

    pub fn name(&self) -> &'static str {
        match self {
            Formation::F442 => "4-4-2",
            Formation::F433 => "4-3-3",
            Formation::F352 => "3-5-2",
            Formation::F4141 => "4-1-4-1",
        }
    }

    /// Authored slots for this formation, in roster order.
    pub fn slots(&self) -> &'static FormationSlots {
        match self {
            Formation::F442 => &SLOTS_442,
            Formation::F433 => &SLOTS_433,
            Formation::F352 => &SLOTS_352,
            Formation::F4141 => &SLOTS_4141,
        }
    }
}

impl fmt::Display for Formation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("Unknown formation: {0}. Available formations: 4-4-2, 4-3-3, 3-5-2, 4-1-4-1")]
pub struct UnknownFormation(pub String);

impl FromStr for Formation {
    type Err = UnknownFormation;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim();
        Formation::ALL
            .iter()
            .copied()
            .find(|f| f.name() == wanted)
            .ok_or_else(|| UnknownFormation(wanted.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_every_formation_has_eleven_slots_on_the_field() {
        for formation in Formation::ALL {
            let slots = formation.slots();
            assert_eq!(slots.len(), FORMATION_SIZE);
            for slot in slots.iter() {
                assert!(slot.is_within_field(), "{} has slot off the field: {:?}", formation, slot);
            }
        }
    }

    #[test]
    fn test_goalkeeper_is_first_and_near_own_baseline() {
        for formation in Formation::ALL {
            let gk = formation.slots()[0];
            assert_eq!(gk, NormalizedPosition::new(50.0, 10.0));
        }
    }

    #[test]
    fn test_parse_and_display() {
        for formation in Formation::ALL {
            let parsed: Formation = formation.to_string().parse().unwrap();
            assert_eq!(parsed, formation);
        }
        assert_eq!(" 4-3-3 ".parse::<Formation>().unwrap(), Formation::F433);
        let err = "5-4-1".parse::<Formation>().unwrap_err();
        assert!(err.to_string().contains("5-4-1"));
    }

    #[test]
    fn test_default_is_442() {
        assert_eq!(Formation::default(), Formation::F442);
    }
}
