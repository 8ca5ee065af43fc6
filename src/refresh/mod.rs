mod error;
mod scheduler;

pub use error::RefreshError;
pub use scheduler::RefreshScheduler;
