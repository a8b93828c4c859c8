//! Authoritative session state.
//!
//! [`GameState`] is the single source of truth for one match. It is mutated
//! only through [`crate::engine::GameEngine`] and the setup functions, and it
//! serializes whole so a session can be resumed from a store.
pub mod types;

pub use types::*;

use crate::event::GameEvent;

/// One match between two players.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct GameState {
    pub id: SessionId,
    /// Root of every shuffle performed in this session.
    pub seed: u64,
    pub turn: TurnState,
    first_player: PlayerId,
    /// Seat order: index 0 is player 1, index 1 is player 2.
    pub players: [PlayerState; 2],
    /// Set once, when both mulligans are in and life areas are dealt.
    pub life_areas_ready: bool,
    pub outcome: Option<GameOutcome>,
    log: ActionLog,
    next_card_id: u32,
}

impl GameState {
    pub fn new(
        id: SessionId,
        seed: u64,
        player_one: PlayerState,
        player_two: PlayerState,
        next_card_id: u32,
    ) -> Self {
        let first_player = player_one.id;
        Self {
            id,
            seed,
            turn: TurnState::new(first_player),
            first_player,
            players: [player_one, player_two],
            life_areas_ready: false,
            outcome: None,
            log: ActionLog::default(),
            next_card_id,
        }
    }

    /// Player who took the first turn. Fixed at creation.
    #[inline]
    pub fn first_player(&self) -> PlayerId {
        self.first_player
    }

    #[inline]
    pub fn is_over(&self) -> bool {
        self.outcome.is_some()
    }

    pub fn log(&self) -> &ActionLog {
        &self.log
    }

    pub(crate) fn log_mut(&mut self) -> &mut ActionLog {
        &mut self.log
    }

    pub fn player_index(&self, id: PlayerId) -> Option<usize> {
        self.players.iter().position(|player| player.id == id)
    }

    pub fn player(&self, id: PlayerId) -> Option<&PlayerState> {
        self.players.iter().find(|player| player.id == id)
    }

    pub fn player_mut(&mut self, id: PlayerId) -> Option<&mut PlayerState> {
        self.players.iter_mut().find(|player| player.id == id)
    }

    pub fn opponent_of(&self, id: PlayerId) -> Option<PlayerId> {
        match self.player_index(id)? {
            0 => Some(self.players[1].id),
            _ => Some(self.players[0].id),
        }
    }

    pub fn active_player(&self) -> &PlayerState {
        let index = self.player_index(self.turn.active_player).unwrap_or(0);
        &self.players[index]
    }

    pub fn active_player_mut(&mut self) -> &mut PlayerState {
        let index = self.player_index(self.turn.active_player).unwrap_or(0);
        &mut self.players[index]
    }

    /// Active player first, then the opponent.
    pub fn players_in_turn_order(&self) -> [&PlayerState; 2] {
        let active = self.player_index(self.turn.active_player).unwrap_or(0);
        [&self.players[active], &self.players[1 - active]]
    }

    /// Mutable access to `id` and its opponent at once.
    pub fn player_and_opponent_mut(
        &mut self,
        id: PlayerId,
    ) -> Option<(&mut PlayerState, &mut PlayerState)> {
        let index = self.player_index(id)?;
        let (left, right) = self.players.split_at_mut(1);
        Some(if index == 0 {
            (&mut left[0], &mut right[0])
        } else {
            (&mut right[0], &mut left[0])
        })
    }

    /// Owner of the card in play with `id`, searching both boards.
    pub fn owner_of(&self, id: CardInstanceId) -> Option<PlayerId> {
        self.players
            .iter()
            .find(|player| player.board.find(id).is_some())
            .map(|player| player.id)
    }

    pub fn card_in_play(&self, id: CardInstanceId) -> Option<&CardInPlay> {
        self.players.iter().find_map(|player| player.board.find(id))
    }

    pub fn card_in_play_mut(&mut self, id: CardInstanceId) -> Option<&mut CardInPlay> {
        self.players
            .iter_mut()
            .find_map(|player| player.board.find_mut(id))
    }

    pub fn allocate_card_id(&mut self) -> CardInstanceId {
        let id = CardInstanceId(self.next_card_id);
        self.next_card_id += 1;
        id
    }

    /// Records the winner once. Later calls are ignored.
    pub fn declare_winner(
        &mut self,
        winner: PlayerId,
        reason: WinReason,
        events: &mut Vec<GameEvent>,
    ) -> bool {
        if self.outcome.is_some() {
            return false;
        }
        let Some(loser) = self.opponent_of(winner) else {
            return false;
        };
        self.outcome = Some(GameOutcome {
            winner,
            loser,
            reason,
        });
        events.push(GameEvent::GameEnded {
            winner,
            loser,
            reason,
        });
        true
    }
}
