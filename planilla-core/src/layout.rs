//! Layout resolver: binds roster order to formation slots.

use crate::types::{NormalizedPosition, Player, PositionedPlayer};

/// Resolve on-field positions for `roster` using `slots` in order.
///
/// Roster entry `i` takes `slots[i]`. Entries past the end of `slots` keep
/// their own stored position; unused trailing slots are ignored.
pub fn resolve(roster: &[Player], slots: &[NormalizedPosition]) -> Vec<PositionedPlayer> {
    if roster.len() > slots.len() {
        log::warn!(
            "Roster has {} players but formation provides {} slots; {} player(s) keep their previous position",
            roster.len(),
            slots.len(),
            roster.len() - slots.len()
        );
    }

    roster
        .iter()
        .enumerate()
        .map(|(i, player)| {
            let position = slots.get(i).copied().unwrap_or(player.position);
            PositionedPlayer::from_player(player, position)
        })
        .collect()
}
