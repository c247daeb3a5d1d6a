pub mod core;
pub mod messages;
pub mod state;
pub mod worker;

// Re-export key components
pub use self::core::PatternEngine;
pub use state::PairState;
