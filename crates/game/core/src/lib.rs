//! Deterministic rules engine for two-player card battles.
//!
//! `battle-core` defines the canonical rules (cards, board, effects, combat,
//! turn structure, setup) and exposes pure APIs that the runtime drives. All
//! in-match state mutation flows through [`engine::GameEngine`]; sessions are
//! created with [`engine::initialize_session`]. The crate performs no I/O and
//! reads no clock, so a session replays identically from its seed and log.
pub mod action;
pub mod combat;
pub mod config;
pub mod engine;
pub mod env;
pub mod error;
pub mod event;
pub mod state;

pub use action::{
    Action, ActionError, ActionKind, ActionParams, ActionTransition, AttackAction, AttackTarget,
    Condition, DrawCardAction, Effect, EffectError, EffectKind, EffectTarget, EndPhaseAction,
    EndTurnAction, ExtraDrawAction, MoveCharacterAction, PlayCardAction, PlayerRef,
    SurrenderAction, TriggerEvent, TriggeredEffect,
};
pub use config::GameConfig;
pub use engine::{
    ActionOutcome, DeckList, ExecuteError, GameEngine, MulliganError, SetupError,
    TransitionPhase, TransitionPhaseError, initialize_session,
};
pub use env::{CardOracle, Env, GameEnv, OracleError, PcgRng, RngOracle};
pub use error::{ErrorSeverity, GameError};
pub use event::GameEvent;
pub use state::{
    ActionLog, ActionLogEntry, Board, Card, CardCode, CardDefinition, CardInPlay,
    CardInstanceId, CardStatus, CardType, Color, EnergyMap, GameOutcome, GameState, Keyword,
    LifeTrigger, LoggedPayload, Phase, PlayerId, PlayerState, SessionId, WinReason, Zone,
};
