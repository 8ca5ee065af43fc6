pub mod error;
pub mod health;
pub mod orbits;
pub mod satellites;
pub mod stream;
