#![warn(clippy::all, missing_docs)]

//! Core of the draw-number guessing game.
//!
//! This crate hosts the game configuration and its settings-file loader,
//! the model, the view/observer traits with their console and stream
//! implementations, and the controller wiring them together.

pub mod config;
pub mod configuration;
pub mod controller;
pub mod error;
pub mod loader;
pub mod model;
pub mod view;

pub use config::AppConfig;
pub use configuration::{ConfigKey, Configuration, ConfigurationBuilder};
pub use controller::DrawNumberApp;
pub use error::{ConfigError, GuessError};
pub use model::{DrawResult, FixedSecret, GameModel, GameState, Outcome, RandomSecret, SecretSource};
pub use view::{ConsoleView, DrawNumberObserver, DrawNumberView, StreamView};
