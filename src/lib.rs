//! Spacer Game Engine
//!
//! A text-driven, turn-based space exploration game.
//!
//! # Overview
//!
//! A captain travels between star systems ("dimensions") over a fixed warp
//! graph, docks at stations, lands in cities, scans for celestial bodies and
//! keeps a personal discovery log. Every line the player types is resolved by
//! a command registry that enforces per-command context requirements.
//!
//! # Modules
//!
//! - [`game_engine`] - Per-turn processing and session state
//! - [`commands`] - Command registry, dispatcher and built-in commands
//! - [`models`] - Domain models (Player, Dimension, Station, WarpGraph, etc.)
//! - [`services`] - Travel, docking, scanning and the interactive game
//! - [`persistence`] - Save store and world data source
//! - [`config`] - Game configuration
//! - [`io`] - Input/output abstractions for testing
//! - [`ui`] - User interface and presentation logic
//!
//! # Example
//!
//! ```rust,no_run
//! use spacer::{GameConfig, GameEngine, JsonWorldSource, MemorySaveStore};
//!
//! let engine = GameEngine::new(
//!     GameConfig::default(),
//!     Box::new(JsonWorldSource::builtin()),
//!     Box::new(MemorySaveStore::new()),
//! );
//! // Game logic here
//! ```

pub mod commands;
pub mod config;
pub mod game_engine;
pub mod models;
pub mod persistence;
pub mod services;
pub mod io;
pub mod ui;

// Re-export commonly used types
pub use commands::{CommandRegistry, DispatchOutcome};
pub use config::GameConfig;
pub use game_engine::{GameEngine, SessionState};
pub use models::errors::{GameError, GameResult};
pub use models::player::{Location, Player};
pub use persistence::{JsonSaveStore, JsonWorldSource, MemorySaveStore, SaveStore};
