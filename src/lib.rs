//! # Gomoku RL
//!
//! Gomoku (five in a row) on an N x N board with pluggable players and a
//! tabular Q-learner that trains against a random opponent.
//!
//! ## Modules
//!
//! - [`game`]: Core game logic: board, stones, match orchestration
//! - [`ai`]: Player trait, random/human/policy players, estimators, Q-learning
//! - [`training`]: Step environment, trainer, match simulation, metrics
//! - [`config`]: TOML configuration loading and validation
//! - [`error`]: Structured error types

pub mod ai;
pub mod config;
pub mod error;
pub mod game;
pub mod training;
