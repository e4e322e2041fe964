pub mod config;
pub mod difficulty;
pub mod error;
pub mod geometry;
pub mod letters;
pub mod pool;
pub mod round;
pub mod scene;
pub mod session;
pub mod store;
pub mod validation;
// cmd and reports belong to the binary (main.rs).

pub use error::{GameError, GameResult, SubmitError};
