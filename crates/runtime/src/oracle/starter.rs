//! Built-in starter set used by the simulator and tests.
//!
//! Two mono-colour decks of exactly 50 cards each. The definitions exercise
//! keywords, life triggers, energy costs, play effects and permanent triggers.

use battle_core::action::effect::{
    BoostEffect, DamageEffect, DebuffEffect, DrawEffect, TriggerScope,
};
use battle_core::state::ModifierDuration;
use battle_core::{
    CardDefinition, CardType, Color, Condition, DeckList, Effect, EffectKind, EffectTarget,
    Keyword, LifeTrigger, PlayerId, PlayerRef, TriggerEvent, TriggeredEffect,
};

use super::CardCatalog;

/// Every starter definition.
pub fn starter_cards() -> Vec<CardDefinition> {
    vec![
        // Red
        CardDefinition::new("ST01-001", "Ember Vanguard", CardType::Character, Color::Red)
            .with_bp(3000)
            .with_ap_cost(1)
            .with_life_trigger(LifeTrigger::DrawCard),
        CardDefinition::new("ST01-002", "Blaze Lancer", CardType::Character, Color::Red)
            .with_bp(4500)
            .with_ap_cost(1)
            .with_energy_cost(Color::Red, 1)
            .with_keyword(Keyword::Rush),
        CardDefinition::new("ST01-003", "Crimson Titan", CardType::Character, Color::Red)
            .with_bp(6000)
            .with_ap_cost(2)
            .with_energy_cost(Color::Red, 2)
            .with_keyword(Keyword::DoubleDamage)
            .with_life_trigger(LifeTrigger::ActiveBp3000),
        CardDefinition::new("ST01-004", "Forge of Embers", CardType::Field, Color::Red)
            .with_energy_produce(Color::Red, 1),
        CardDefinition::new("ST01-005", "War Drums", CardType::Field, Color::Red)
            .with_energy_produce(Color::Red, 1)
            .with_trigger(
                TriggeredEffect::new(
                    TriggerEvent::TurnStart,
                    Effect::new(
                        EffectKind::Boost(BoostEffect::new(1000, ModifierDuration::Turns(1))),
                        EffectTarget::AllCharacters(PlayerRef::Controller),
                    )
                    .described("front line +1000 BP this turn"),
                )
                .scoped(TriggerScope::Controller),
            ),
        CardDefinition::new("ST01-006", "Flame Burst", CardType::Event, Color::Red)
            .with_ap_cost(1)
            .with_energy_cost(Color::Red, 1)
            .with_on_play(
                Effect::new(
                    EffectKind::Damage(DamageEffect::new(3000)),
                    EffectTarget::FirstFrontLine(PlayerRef::Opponent),
                )
                .described("3000 damage to the first opposing character"),
            ),
        CardDefinition::new("ST01-007", "Rally Cry", CardType::Event, Color::Red)
            .with_ap_cost(1)
            .with_on_play(
                Effect::new(
                    EffectKind::Draw(DrawEffect { count: 2 }),
                    EffectTarget::Player(PlayerRef::Controller),
                )
                .when(Condition::CharacterCount {
                    player: PlayerRef::Controller,
                    min: Some(1),
                    max: None,
                })
                .described("draw 2 if you control a character"),
            ),
        // Blue
        CardDefinition::new("ST02-001", "Tide Scout", CardType::Character, Color::Blue)
            .with_bp(2500)
            .with_ap_cost(1)
            .with_life_trigger(LifeTrigger::Color),
        CardDefinition::new("ST02-002", "Reef Guardian", CardType::Character, Color::Blue)
            .with_bp(5500)
            .with_ap_cost(1)
            .with_energy_cost(Color::Blue, 1),
        CardDefinition::new("ST02-003", "Abyss Leviathan", CardType::Character, Color::Blue)
            .with_bp(7000)
            .with_ap_cost(2)
            .with_energy_cost(Color::Blue, 2)
            .with_trigger(
                TriggeredEffect::new(
                    TriggerEvent::CharacterDestroyed,
                    Effect::new(
                        EffectKind::Draw(DrawEffect { count: 1 }),
                        EffectTarget::Player(PlayerRef::Controller),
                    )
                    .described("draw 1 when an opposing character is destroyed"),
                )
                .scoped(TriggerScope::Opponent),
            ),
        CardDefinition::new("ST02-004", "Tidal Spring", CardType::Field, Color::Blue)
            .with_energy_produce(Color::Blue, 1),
        CardDefinition::new("ST02-005", "Undertow", CardType::Event, Color::Blue)
            .with_ap_cost(1)
            .with_energy_cost(Color::Blue, 1)
            .with_on_play(
                Effect::new(
                    EffectKind::Debuff(DebuffEffect {
                        amount: 2000,
                        duration: ModifierDuration::Turns(1),
                    }),
                    EffectTarget::FirstFrontLine(PlayerRef::Opponent),
                )
                .described("first opposing character -2000 BP this turn"),
            ),
        CardDefinition::new("ST02-006", "Deep Insight", CardType::Event, Color::Blue)
            .with_ap_cost(1)
            .with_on_play(Effect::new(
                EffectKind::Draw(DrawEffect { count: 1 }),
                EffectTarget::Player(PlayerRef::Controller),
            )),
    ]
}

/// Catalog holding [`starter_cards`].
pub fn starter_catalog() -> CardCatalog {
    CardCatalog::with_definitions(starter_cards())
}

const RED_DECK: &[(&str, usize)] = &[
    ("ST01-001", 10),
    ("ST01-002", 8),
    ("ST01-003", 6),
    ("ST01-004", 8),
    ("ST01-005", 4),
    ("ST01-006", 8),
    ("ST01-007", 6),
];

const BLUE_DECK: &[(&str, usize)] = &[
    ("ST02-001", 10),
    ("ST02-002", 10),
    ("ST02-003", 6),
    ("ST02-004", 10),
    ("ST02-005", 8),
    ("ST02-006", 6),
];

fn expand(player: PlayerId, recipe: &[(&str, usize)]) -> DeckList {
    DeckList::new(
        player,
        recipe
            .iter()
            .flat_map(|&(code, copies)| std::iter::repeat_n(code, copies)),
    )
}

/// 50-card red aggro list.
pub fn red_deck(player: PlayerId) -> DeckList {
    expand(player, RED_DECK)
}

/// 50-card blue control list.
pub fn blue_deck(player: PlayerId) -> DeckList {
    expand(player, BLUE_DECK)
}

#[cfg(test)]
mod tests {
    use super::*;
    use battle_core::{CardOracle, GameConfig};

    #[test]
    fn starter_decks_are_legal() {
        let catalog = starter_catalog();
        for deck in [red_deck(PlayerId(1)), blue_deck(PlayerId(2))] {
            assert_eq!(deck.cards.len(), GameConfig::DECK_SIZE);
            for code in &deck.cards {
                let definition = catalog.definition(code).unwrap();
                assert_ne!(definition.card_type, CardType::Ap);
            }
        }
    }
}
