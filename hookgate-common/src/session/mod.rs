//! Session State: the per-directory record shared across events.

mod state;

pub use state::{SessionState, SessionStore};
