//! Planilla Core Library
//!
//! Formation catalog, layout resolver, lineup state and update operations.

pub mod types;
pub mod formation;
pub mod layout;
pub mod lineup;
pub mod store;

// Re-export commonly used types and functions
pub use types::{MatchMetadata, NormalizedPosition, Player, PositionedPlayer, Role, StaffMember, Substitute};
pub use formation::{Formation, FormationSlots, UnknownFormation, FORMATION_SIZE};
pub use layout::resolve;
pub use lineup::{Lineup, LineupError, PlayerField};
pub use store::LineupStore;

/// Version information for the planilla core library
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version_is_set() {
        assert!(!VERSION.is_empty());
    }
}
