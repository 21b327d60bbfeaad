//! Heartkeep Engine library.
//!
//! Persistence and orchestration around the calendar domain.
//!
//! ## Structure
//!
//! - `infrastructure/` - Storage port and its adapters
//! - `use_cases/` - Calendar operations over stored campaign state
//! - `config`, `logging`, `cli`, `commands` - The `heartkeep` binary's plumbing

pub mod cli;
pub mod commands;
pub mod config;
pub mod infrastructure;
pub mod logging;
pub mod use_cases;

pub use config::EngineConfig;
pub use use_cases::CalendarService;
