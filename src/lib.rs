//! # schelling
//!
//! A simulation of the Schelling segregation model on a 2D grid.
//!
//! Two types of occupants share a board with empty cells. Each round, every
//! occupant unhappy with its neighborhood composition relocates to the
//! nearest open cell, until everyone is satisfied or the iteration budget
//! runs out.

pub mod board;
pub mod cell;
pub mod config;
pub mod observer;
pub mod sim;

pub use board::Board;
pub use cell::Cell;
pub use config::Config;
pub use config::ConfigError;
pub use observer::create_observer;
pub use observer::ConsoleRenderer;
pub use observer::Fanout;
pub use observer::JsonTraceLogger;
pub use observer::NoOpObserver;
pub use observer::Observer;
pub use observer::Verbosity;
pub use sim::Outcome;
pub use sim::Simulation;
