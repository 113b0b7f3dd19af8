//! Staff daily task board.
//!
//! Records and browses daily task assignments (staff, team, description,
//! date, optional photo or video) kept in a hosted database. The crate holds
//! the client-side state: the loaded task list with filtering and
//! pagination, the add-task workflow with its duplicate check and inline
//! image encoding, and a declarative view of the list for any renderer.

pub mod app;
pub mod config;
pub mod constants;
pub mod core;
pub mod errors;
pub mod remote;
pub mod utils;
pub mod view;

pub use errors::{Error, Result};
