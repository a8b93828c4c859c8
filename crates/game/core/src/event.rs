//! Structured events emitted while a session is mutated.
//!
//! The engine returns the events produced by each operation; the runtime
//! forwards them to subscribers. Rejected actions produce no events.

use crate::action::AttackTarget;
use crate::state::{
    CardCode, CardInstanceId, EnergyMap, Phase, PlayerId, WinReason, Zone,
};

#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum GameEvent {
    CardDrawn {
        player: PlayerId,
        card: CardInstanceId,
    },
    CardPlayed {
        player: PlayerId,
        card: CardInstanceId,
        code: CardCode,
        zone: Option<Zone>,
    },
    CharacterMoved {
        player: PlayerId,
        card: CardInstanceId,
        from: Zone,
        to: Zone,
    },
    AttackDeclared {
        player: PlayerId,
        attacker: CardInstanceId,
        target: AttackTarget,
    },
    PlayerAttacked {
        attacker: CardInstanceId,
        defender: PlayerId,
        damage: u32,
        revealed: u32,
    },
    LifeCardRevealed {
        player: PlayerId,
        card: CardInstanceId,
    },
    BattleWon {
        attacker: CardInstanceId,
        defender: CardInstanceId,
        attacker_bp: u32,
        defender_bp: u32,
    },
    BattleLost {
        attacker: CardInstanceId,
        defender: CardInstanceId,
        attacker_bp: u32,
        defender_bp: u32,
    },
    CharacterDestroyed {
        owner: PlayerId,
        card: CardInstanceId,
    },
    /// A character left play for its owner's hand.
    CharacterReturned {
        owner: PlayerId,
        card: CardInstanceId,
    },
    /// A triggered or played effect resolved.
    TriggerFired {
        source: Option<CardInstanceId>,
        effect: String,
    },
    /// A triggered effect could not resolve and was skipped.
    TriggerSkipped {
        source: Option<CardInstanceId>,
        reason: String,
    },
    ModifierApplied {
        card: CardInstanceId,
        value: i32,
    },
    EnergyChanged {
        player: PlayerId,
        energy: EnergyMap,
    },
    EnergyProduced {
        player: PlayerId,
        produced: EnergyMap,
    },
    PhaseChanged {
        from: Phase,
        to: Phase,
    },
    TurnStarted {
        player: PlayerId,
        turn: u32,
        max_ap: u32,
    },
    HandTrimmed {
        player: PlayerId,
        removed: Vec<CardInstanceId>,
    },
    MulliganResolved {
        player: PlayerId,
        redrawn: bool,
    },
    LifeAreasDealt,
    GameEnded {
        winner: PlayerId,
        loser: PlayerId,
        reason: WinReason,
    },
}

impl GameEvent {
    /// Short SCREAMING_SNAKE name for logs and external consumers.
    pub fn name(&self) -> &'static str {
        match self {
            Self::CardDrawn { .. } => "CARD_DRAWN",
            Self::CardPlayed { .. } => "CARD_PLAYED",
            Self::CharacterMoved { .. } => "CHARACTER_MOVED",
            Self::AttackDeclared { .. } => "ATTACK_DECLARED",
            Self::PlayerAttacked { .. } => "PLAYER_ATTACKED",
            Self::LifeCardRevealed { .. } => "LIFE_CARD_REVEALED",
            Self::BattleWon { .. } => "BATTLE_WON",
            Self::BattleLost { .. } => "BATTLE_LOST",
            Self::CharacterDestroyed { .. } => "CHARACTER_DESTROYED",
            Self::CharacterReturned { .. } => "CHARACTER_RETURNED",
            Self::TriggerFired { .. } => "TRIGGER_FIRED",
            Self::TriggerSkipped { .. } => "TRIGGER_SKIPPED",
            Self::ModifierApplied { .. } => "MODIFIER_APPLIED",
            Self::EnergyChanged { .. } => "ENERGY_CHANGED",
            Self::EnergyProduced { .. } => "ENERGY_PRODUCED",
            Self::PhaseChanged { .. } => "PHASE_CHANGED",
            Self::TurnStarted { .. } => "TURN_STARTED",
            Self::HandTrimmed { .. } => "HAND_TRIMMED",
            Self::MulliganResolved { .. } => "MULLIGAN_RESOLVED",
            Self::LifeAreasDealt => "LIFE_AREAS_DEALT",
            Self::GameEnded { .. } => "GAME_ENDED",
        }
    }
}
