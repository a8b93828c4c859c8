//! Runtime orchestration for card battle sessions.
//!
//! This crate wires together the card catalog oracle, session stores, the
//! event bus and per-session worker tasks into a cohesive runtime API.
//! Consumers embed [`Runtime`] to create and resume sessions, subscribe to
//! events, and submit actions through [`SessionHandle`].
//!
//! Modules are organized by responsibility:
//! - [`runtime`] hosts the orchestrator, builder and configuration
//! - [`api`] exposes the types downstream clients interact with
//! - [`events`] provides topic-based event bus for flexible event routing
//! - [`workers`] keeps background tasks internal to the crate
//! - [`oracle`] and [`repository`] provide data adapters reused by other crates
pub mod api;
pub mod events;
pub mod oracle;
pub mod repository;
pub mod runtime;

mod workers;

pub use api::{
    ActionProvider, ActionResponse, ActionSubmission, AggressiveActionProvider, MulliganResponse,
    PassActionProvider, Result, RuntimeError, SessionHandle, SessionRegistry,
};
pub use events::{ActionEvent, Event, EventBus, SessionEvent, SessionGameEvent, Topic};
pub use oracle::{CardCatalog, OracleManager, blue_deck, red_deck, starter_catalog};
pub use repository::{FileSessionStore, InMemorySessionStore, RepositoryError, SessionStore};
pub use runtime::{Runtime, RuntimeBuilder, RuntimeConfig};
