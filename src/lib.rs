//! # Tic-Tac-Toe
//!
//! Tic-Tac-Toe on a 3x3 grid against an automated opponent. The opponent
//! plays at one of three tiers: uniformly random, exhaustive minimax, or a
//! per-turn coin flip between the two. A ratatui terminal front end drives a
//! game from the keyboard.
//!
//! ## Modules
//!
//! - [`game`]: Core game logic: board, player, state machine
//! - [`ai`]: Agent trait, random and minimax players, difficulty selector
//! - [`session`]: The boundary a front end talks to
//! - [`ui`]: Terminal UI
//! - [`config`]: TOML configuration loading and validation
//! - [`error`]: Structured error types

pub mod ai;
pub mod config;
pub mod error;
pub mod game;
pub mod session;
pub mod ui;
