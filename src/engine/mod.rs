//! Session state, batching, and the ranked filtering engine.

pub mod batcher;
pub mod coordinator;
pub mod error;
pub mod pass;
pub mod session;
pub mod types;


pub use batcher::Batcher;
pub use coordinator::{FeedCoordinator, FeedHandle};
pub use error::EngineError;
pub use pass::run_pass;
pub use session::SessionState;
pub use types::{Candidate, CommandOutcome, Decision, PassReport, PostRecord};
