//! Session creation and the mulligan protocol.
//!
//! A session starts with both decks shuffled and seven cards in each hand.
//! Each player then keeps or redraws once, in any order. The second decision
//! deals the life areas and kicks off the first player's turn.

use crate::config::GameConfig;
use crate::env::{GameEnv, OracleError, compute_seed, shuffle};
use crate::error::{ErrorSeverity, GameError};
use crate::event::GameEvent;
use crate::state::{
    Card, CardCode, CardInstanceId, CardType, GameState, PlayerId, PlayerState, SessionId,
};

use super::turns;

/// Shuffle contexts, so the opening shuffle and a mulligan never share a seed.
const OPENING_SHUFFLE: u32 = 0;
const MULLIGAN_SHUFFLE: u32 = 1;

/// A player's 50 catalog codes, in any order.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct DeckList {
    pub player: PlayerId,
    pub cards: Vec<CardCode>,
}

impl DeckList {
    pub fn new(player: PlayerId, cards: impl IntoIterator<Item = impl Into<CardCode>>) -> Self {
        Self {
            player,
            cards: cards.into_iter().map(Into::into).collect(),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum SetupError {
    #[error("both deck lists belong to {0}")]
    DuplicatePlayer(PlayerId),

    #[error("{player} submitted {actual} cards, a deck needs exactly {expected}")]
    DeckSize {
        player: PlayerId,
        expected: usize,
        actual: usize,
    },

    #[error("{player} listed unknown card {code}")]
    UnknownCard { player: PlayerId, code: CardCode },

    #[error("{player} listed AP card {code}, which is not legal in a deck")]
    ApCardInDeck { player: PlayerId, code: CardCode },

    #[error(transparent)]
    Oracle(#[from] OracleError),
}

impl GameError for SetupError {
    fn severity(&self) -> ErrorSeverity {
        match self {
            Self::DuplicatePlayer(_) | Self::DeckSize { .. } | Self::ApCardInDeck { .. } => {
                ErrorSeverity::Validation
            }
            Self::UnknownCard { .. } => ErrorSeverity::Resource,
            Self::Oracle(error) => error.severity(),
        }
    }

    fn error_code(&self) -> &'static str {
        match self {
            Self::DuplicatePlayer(_) => "SETUP_DUPLICATE_PLAYER",
            Self::DeckSize { .. } => "SETUP_DECK_SIZE",
            Self::UnknownCard { .. } => "SETUP_UNKNOWN_CARD",
            Self::ApCardInDeck { .. } => "SETUP_AP_CARD_IN_DECK",
            Self::Oracle(error) => error.error_code(),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum MulliganError {
    #[error("the game is already over")]
    GameOver,

    #[error("setup is already complete")]
    SetupComplete,

    #[error("unknown player {0}")]
    UnknownPlayer(PlayerId),

    #[error("{0} has already decided")]
    AlreadyDecided(PlayerId),

    #[error(transparent)]
    Oracle(#[from] OracleError),
}

impl GameError for MulliganError {
    fn severity(&self) -> ErrorSeverity {
        match self {
            Self::GameOver | Self::SetupComplete | Self::AlreadyDecided(_) => {
                ErrorSeverity::Validation
            }
            Self::UnknownPlayer(_) => ErrorSeverity::Resource,
            Self::Oracle(error) => error.severity(),
        }
    }

    fn error_code(&self) -> &'static str {
        match self {
            Self::GameOver => "MULLIGAN_GAME_OVER",
            Self::SetupComplete => "MULLIGAN_SETUP_COMPLETE",
            Self::UnknownPlayer(_) => "MULLIGAN_UNKNOWN_PLAYER",
            Self::AlreadyDecided(_) => "MULLIGAN_ALREADY_DECIDED",
            Self::Oracle(error) => error.error_code(),
        }
    }
}

/// Resolves both deck lists, shuffles and deals opening hands.
///
/// `first` takes the first turn. Card instance ids are allocated from 1 in
/// list order, first deck then second, before shuffling.
pub fn initialize_session(
    id: SessionId,
    seed: u64,
    first: DeckList,
    second: DeckList,
    env: &GameEnv<'_>,
) -> Result<GameState, SetupError> {
    if first.player == second.player {
        return Err(SetupError::DuplicatePlayer(first.player));
    }
    for list in [&first, &second] {
        if list.cards.len() != GameConfig::DECK_SIZE {
            return Err(SetupError::DeckSize {
                player: list.player,
                expected: GameConfig::DECK_SIZE,
                actual: list.cards.len(),
            });
        }
    }

    let mut next_id = 1;
    let first = build_player(first, seed, env, &mut next_id)?;
    let second = build_player(second, seed, env, &mut next_id)?;
    Ok(GameState::new(id, seed, first, second, next_id))
}

fn build_player(
    list: DeckList,
    seed: u64,
    env: &GameEnv<'_>,
    next_id: &mut u32,
) -> Result<PlayerState, SetupError> {
    let catalog = env.catalog()?;
    let mut deck = Vec::with_capacity(list.cards.len());
    for code in list.cards {
        let Some(definition) = catalog.definition(&code) else {
            return Err(SetupError::UnknownCard {
                player: list.player,
                code,
            });
        };
        if definition.card_type == CardType::Ap {
            return Err(SetupError::ApCardInDeck {
                player: list.player,
                code,
            });
        }
        deck.push(Card::new(CardInstanceId(*next_id), definition));
        *next_id += 1;
    }

    shuffle(
        env.rng()?,
        compute_seed(seed, 0, list.player.0, OPENING_SHUFFLE),
        &mut deck,
    );
    let mut player = PlayerState::new(list.player, deck);
    player.draw_many(GameConfig::OPENING_HAND);
    Ok(player)
}

/// Records one player's keep/redraw decision.
///
/// The second decision deals seven life cards to each player (first player
/// first) and runs Start for the first player.
pub fn submit_mulligan(
    state: &mut GameState,
    env: &GameEnv<'_>,
    player: PlayerId,
    redraw: bool,
) -> Result<Vec<GameEvent>, MulliganError> {
    if state.is_over() {
        return Err(MulliganError::GameOver);
    }
    if state.life_areas_ready {
        return Err(MulliganError::SetupComplete);
    }
    let seed = compute_seed(state.seed, state.turn.nonce, player.0, MULLIGAN_SHUFFLE);
    let target = state
        .player_mut(player)
        .ok_or(MulliganError::UnknownPlayer(player))?;
    if target.mulligan.is_some() {
        return Err(MulliganError::AlreadyDecided(player));
    }

    if redraw {
        let rng = env.rng()?;
        let hand = std::mem::take(&mut target.hand);
        target.deck.extend(hand);
        shuffle(rng, seed, &mut target.deck);
        target.draw_many(GameConfig::OPENING_HAND);
    }
    target.mulligan = Some(redraw);

    let mut events = vec![GameEvent::MulliganResolved {
        player,
        redrawn: redraw,
    }];

    if state.players.iter().all(|p| p.mulligan.is_some()) {
        deal_life_areas(state);
        state.life_areas_ready = true;
        events.push(GameEvent::LifeAreasDealt);
        turns::begin_turn(state, &mut events);
    }
    Ok(events)
}

fn deal_life_areas(state: &mut GameState) {
    let first = state.player_index(state.first_player()).unwrap_or(0);
    for index in [first, 1 - first] {
        let player = &mut state.players[index];
        let count = GameConfig::LIFE_AREA_SIZE.min(player.deck.len());
        let life: Vec<Card> = player.deck.drain(..count).collect();
        player.life_area = life;
    }
}
