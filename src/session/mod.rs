mod edit_session;
mod errors;

pub use edit_session::{EditSession, SessionState};
pub use errors::SessionError;
