//! Worker tasks that back the runtime orchestration.
//!
//! Each session runs in its own worker task; sessions never share state, so
//! independent matches proceed concurrently.

mod session;

pub(crate) use session::{SessionCommand, SessionWorker};
