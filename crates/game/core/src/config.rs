/// Rule constants and tunable parameters for a match.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct GameConfig {
    /// AP paid for an extra draw during the Start phase.
    pub extra_draw_cost: u32,
}

impl GameConfig {
    // ===== compile-time constants used as type parameters =====
    /// Slots on the front line and on the energy line.
    pub const LINE_SLOTS: usize = 4;

    // ===== fixed rules =====
    pub const DECK_SIZE: usize = 50;
    pub const OPENING_HAND: usize = 7;
    pub const LIFE_AREA_SIZE: usize = 7;
    pub const HAND_LIMIT: usize = 8;

    /// Max AP by own-turn index for the player who goes first.
    pub const FIRST_PLAYER_AP: [u32; 3] = [1, 2, 3];
    /// Max AP by own-turn index for the player who goes second.
    pub const SECOND_PLAYER_AP: [u32; 3] = [2, 2, 3];

    // ===== runtime-tunable defaults =====
    pub const DEFAULT_EXTRA_DRAW_COST: u32 = 1;

    pub fn new() -> Self {
        Self {
            extra_draw_cost: Self::DEFAULT_EXTRA_DRAW_COST,
        }
    }

    /// Max AP for a player's `own_turn`-th turn (1-based).
    ///
    /// The schedule saturates at its last entry.
    pub fn max_ap(is_first_player: bool, own_turn: u32) -> u32 {
        let schedule = if is_first_player {
            &Self::FIRST_PLAYER_AP
        } else {
            &Self::SECOND_PLAYER_AP
        };
        let index = (own_turn.max(1) as usize - 1).min(schedule.len() - 1);
        schedule[index]
    }
}

impl Default for GameConfig {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn first_player_ramps_one_two_three() {
        let seq: Vec<u32> = (1..=4).map(|t| GameConfig::max_ap(true, t)).collect();
        assert_eq!(seq, vec![1, 2, 3, 3]);
    }

    #[test]
    fn second_player_starts_at_two() {
        let seq: Vec<u32> = (1..=4).map(|t| GameConfig::max_ap(false, t)).collect();
        assert_eq!(seq, vec![2, 2, 3, 3]);
    }
}
