mod error;
mod fanout;

pub use error::StreamError;
pub use fanout::{run_subscriber, Subscriber};
