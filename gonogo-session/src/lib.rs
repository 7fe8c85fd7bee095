pub mod config;
pub mod error;
pub mod export;
pub mod scoring;
pub mod state;

pub use config::SessionConfig;
pub use error::SessionError;
pub use scoring::{SummaryStats, summarize};
pub use state::{SessionPhase, SessionStateMachine};
