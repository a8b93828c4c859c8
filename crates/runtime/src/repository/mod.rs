//! Repository layer for session persistence.
//!
//! Sessions change on every accepted action and are saved whole. Static card
//! data is served by the oracle layer, not by repositories.

mod error;
mod file;
mod memory;
mod traits;

pub use error::{RepositoryError, Result};
pub use file::FileSessionStore;
pub use memory::InMemorySessionStore;
pub use traits::SessionStore;
