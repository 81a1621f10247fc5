//! # Pump it Pure Core Library
//!
//! This library provides the core game logic for Pump it Pure, a timed
//! arcade game in which the player pumps a water meter to 100% before the
//! round countdown expires while fending off randomly scheduled
//! contamination. The CLI binary is a thin presentation adapter over the
//! same core library.
//!
//! ## Architecture
//!
//! - **Game Engine**: a wall-clock-based state machine that requires the
//!   caller to periodically invoke `tick()` for countdown and contamination
//!   progress
//! - **Deadlines, not threads**: the round clock and the contamination
//!   scheduler are armed deadlines polled by `tick()`, so cancellation is a
//!   field overwrite and a stale deadline can never mutate a later round
//! - **Events**: every state change is reported as an [`Event`] value;
//!   adapters render events and never reach into engine internals
//!
//! ## Key Components
//!
//! - [`GameEngine`]: the pump/purify state machine
//! - [`Difficulty`]: round profile selection with a safe default
//! - [`Config`]: TOML-based tuning configuration
//! - [`GameRng`]: seedable bounded integer sampling

pub mod config;
pub mod difficulty;
pub mod error;
pub mod events;
pub mod game;
pub mod rng;

pub use config::{Config, Tuning};
pub use difficulty::{Difficulty, DifficultyProfile};
pub use error::{ConfigError, CoreError, ValidationError};
pub use events::Event;
pub use game::{GameEngine, GamePhase, Milestone, MilestoneTracker};
pub use rng::GameRng;
