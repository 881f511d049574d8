//! Dispatcher: runs the gate chain for one event.

mod dispatcher;
mod filter;
mod result;
mod session;

pub use dispatcher::GateDispatcher;
pub use filter::should_process_hook;
pub use result::DispatchResult;
pub use session::{file_extension, update_session_state};
