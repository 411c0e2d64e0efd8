//! Game loop runtime.
//!
//! The core crate only knows how to take one step. This crate decides when
//! steps happen: a cancellable gravity schedule, a controller that keeps the
//! schedule in line with the session, and an async loop that multiplexes the
//! schedule with player input and hands frames to a [`Renderer`].
//!
//! # Environment Variables
//!
//! - `BLOCKFALL_WIDTH`, `BLOCKFALL_HEIGHT`: board size (default 10x20)
//! - `BLOCKFALL_SEED`: fixed piece sequence seed
//! - `BLOCKFALL_LOG_PATH`: append a JSON-lines event log to this file

pub mod config;
pub mod controller;
pub mod event_log;
pub mod runtime;
pub mod scheduler;

pub use tui_blockfall_core as core;
pub use tui_blockfall_types as types;

pub use config::LoopConfig;
pub use controller::GameLoop;
pub use event_log::{EventLog, LogEvent, LogRecord};
pub use runtime::{run, LoopEvent, Renderer};
pub use scheduler::{Fired, TickTimer};
