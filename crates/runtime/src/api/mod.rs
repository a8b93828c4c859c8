//! Public runtime API surface.
//!
//! This module gathers the types exposed to consumers of the runtime crate so
//! other layers can stay focused on orchestration, workers, or infrastructure.

pub mod errors;
pub mod handle;
pub mod providers;
pub mod registry;
pub mod submission;

pub use errors::{Result, RuntimeError};
pub use handle::SessionHandle;
pub use providers::{ActionProvider, AggressiveActionProvider, PassActionProvider};
pub use registry::SessionRegistry;
pub use submission::{ActionResponse, ActionSubmission, MulliganResponse};
