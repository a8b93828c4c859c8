//! Triggered effects on permanents and life-area reveal triggers.
//!
//! [`process_triggers`] walks both boards in a fixed order: the active player's
//! board first, then the opponent's; front line by slot, then energy line by
//! slot; and within a card, triggers in declaration order. The order is
//! snapshotted before anything fires. Each trigger resolves against a staged
//! copy of the state that is committed only on success, so a trigger whose
//! effect fails partway leaves nothing behind; it is skipped with a
//! [`GameEvent::TriggerSkipped`] and the scan continues.

use crate::event::GameEvent;
use crate::state::{Card, CardInstanceId, Color, GameState, LifeTrigger, ModifierDuration, PlayerId};

use super::damage::DamageEffect;
use super::displacement::ReturnToHandEffect;
use super::error::EffectError;
use super::kinds::EffectKind;
use super::resource::DrawEffect;
use super::status::BoostEffect;
use super::{Effect, EffectContext, EffectTarget, PlayerRef, apply_effect};

/// Game moments that permanents can react to.
#[derive(
    Clone,
    Copy,
    Debug,
    PartialEq,
    Eq,
    Hash,
    strum::Display,
    strum::EnumString,
    strum::AsRefStr,
)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(rename_all = "SCREAMING_SNAKE_CASE")
)]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE", ascii_case_insensitive)]
pub enum TriggerEvent {
    CardPlayed,
    AttackDeclared,
    CharacterDestroyed,
    TurnStart,
    TurnEnd,
}

/// Whose occurrences a trigger listens to, relative to [`TriggerData::player`].
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(rename_all = "snake_case")
)]
pub enum TriggerScope {
    #[default]
    Any,
    /// Only occurrences belonging to the permanent's controller.
    Controller,
    /// Only occurrences belonging to the opponent.
    Opponent,
}

impl TriggerScope {
    fn admits(self, owner: PlayerId, actor: PlayerId) -> bool {
        match self {
            Self::Any => true,
            Self::Controller => owner == actor,
            Self::Opponent => owner != actor,
        }
    }
}

/// An effect a permanent resolves when `on` happens.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TriggeredEffect {
    pub on: TriggerEvent,
    #[cfg_attr(feature = "serde", serde(default))]
    pub scope: TriggerScope,
    pub effect: Effect,
}

impl TriggeredEffect {
    pub fn new(on: TriggerEvent, effect: Effect) -> Self {
        Self {
            on,
            scope: TriggerScope::Any,
            effect,
        }
    }

    pub fn scoped(mut self, scope: TriggerScope) -> Self {
        self.scope = scope;
        self
    }
}

/// Player an occurrence belongs to and the card it concerns.
///
/// For plays and attacks that is the acting player, for a destroyed character
/// its owner, and for turn boundaries the active player.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct TriggerData {
    pub player: PlayerId,
    pub card: Option<CardInstanceId>,
}

impl TriggerData {
    pub fn new(player: PlayerId, card: Option<CardInstanceId>) -> Self {
        Self { player, card }
    }
}

/// Resolves every matching trigger on both boards.
pub fn process_triggers(
    state: &mut GameState,
    event: TriggerEvent,
    data: &TriggerData,
    events: &mut Vec<GameEvent>,
) {
    let pending: Vec<(PlayerId, CardInstanceId, Effect)> = state
        .players_in_turn_order()
        .into_iter()
        .flat_map(|player| player.board.permanents().map(move |card| (player.id, card)))
        .flat_map(|(owner, card)| {
            card.card
                .definition
                .triggers
                .iter()
                .filter(move |trigger| trigger.on == event && trigger.scope.admits(owner, data.player))
                .map(move |trigger| (owner, card.id(), trigger.effect.clone()))
        })
        .collect();

    for (owner, source, effect) in pending {
        if state.card_in_play(source).is_none() {
            events.push(GameEvent::TriggerSkipped {
                source: Some(source),
                reason: EffectError::SourceLeftPlay(source).to_string(),
            });
            continue;
        }

        resolve_staged(state, owner, source, &effect, events);
    }
}

/// Applies `effect` to a copy of `state` and commits it only if it succeeds.
fn resolve_staged(
    state: &mut GameState,
    controller: PlayerId,
    source: CardInstanceId,
    effect: &Effect,
    events: &mut Vec<GameEvent>,
) {
    let mut staged = state.clone();
    let mut staged_events = Vec::new();
    let mut ctx = EffectContext::new(&mut staged, controller, Some(source), &mut staged_events);

    match apply_effect(&mut ctx, effect) {
        Ok(_) => {
            *state = staged;
            events.append(&mut staged_events);
        }
        Err(err) => events.push(GameEvent::TriggerSkipped {
            source: Some(source),
            reason: err.to_string(),
        }),
    }
}

/// Effect a revealed life card resolves, or `None` for cards without one.
pub fn life_trigger_effect(card: &Card) -> Result<Option<Effect>, EffectError> {
    let trigger = card.definition.life_trigger;
    let effect = match trigger {
        LifeTrigger::Nil => return Ok(None),
        LifeTrigger::DrawCard => Effect::new(
            EffectKind::Draw(DrawEffect { count: 1 }),
            EffectTarget::Player(PlayerRef::Controller),
        ),
        LifeTrigger::ActiveBp3000 => Effect::new(
            EffectKind::Boost(BoostEffect::new(3000, ModifierDuration::Turns(1))),
            EffectTarget::FirstFrontLine(PlayerRef::Controller),
        ),
        LifeTrigger::Color => match card.definition.color {
            Color::Red => Effect::new(
                EffectKind::Damage(DamageEffect::new(2500)),
                EffectTarget::AllCharacters(PlayerRef::Opponent),
            ),
            Color::Blue => Effect::new(
                EffectKind::ReturnToHand(ReturnToHandEffect::up_to(3500)),
                EffectTarget::AllCharacters(PlayerRef::Opponent),
            ),
            other => return Err(EffectError::NotSupported(color_trigger_name(other))),
        },
        LifeTrigger::AddToHand
        | LifeTrigger::RushOrAddToHand
        | LifeTrigger::Special
        | LifeTrigger::Final => return Err(EffectError::NotSupported(trigger.into())),
    };
    Ok(Some(effect.described(trigger.as_ref())))
}

fn color_trigger_name(color: Color) -> &'static str {
    match color {
        Color::Red => "COLOR_RED",
        Color::Blue => "COLOR_BLUE",
        Color::Green => "COLOR_GREEN",
        Color::Purple => "COLOR_PURPLE",
        Color::Yellow => "COLOR_YELLOW",
    }
}

/// Resolves the printed life trigger of a card `owner` just revealed.
///
/// Failures are soft: they emit `TriggerSkipped` and leave the state as is.
pub fn resolve_life_trigger(
    state: &mut GameState,
    owner: PlayerId,
    card: &Card,
    events: &mut Vec<GameEvent>,
) {
    match life_trigger_effect(card) {
        Ok(Some(effect)) => resolve_staged(state, owner, card.id, &effect, events),
        Ok(None) => {}
        Err(err) => events.push(GameEvent::TriggerSkipped {
            source: Some(card.id),
            reason: err.to_string(),
        }),
    }
}
