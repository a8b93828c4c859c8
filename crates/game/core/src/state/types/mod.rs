pub mod board;
pub mod card;
pub mod common;
pub mod log;
pub mod modifier;
pub mod outcome;
pub mod player;
pub mod turn;

pub use board::{Board, BoardError, BoardPosition, CardInPlay, CardStatus, Line, Zone};
pub use card::{Card, CardDefinition, CardType, Color, EnergyMap, Keyword, LifeTrigger};
pub use common::{CardCode, CardInstanceId, PlayerId, SessionId};
pub use log::{ActionLog, ActionLogEntry, LoggedPayload};
pub use modifier::{Modifier, ModifierDuration, ModifierKind};
pub use outcome::{GameOutcome, WinReason};
pub use player::PlayerState;
pub use turn::{Phase, TurnState};
