//! # gtaopt
//!
//! Command-line editor for GTA V `settings.xml` files.
//!
//! `gtaopt` loads a settings document through [`gtacfg`], prints it grouped
//! the way the game's menus group it, applies edits and writes the result
//! back with every untouched byte preserved.
//!
//! ## Modules
//!
//! - [`commands`] - Subcommand handlers
//! - [`config`] - `.gtaopt.toml` configuration
//! - [`ctx`] - Application context and file handling
//! - [`utils`] - Argument parsing and output formatting helpers
//!
//! ## Example
//!
//! ```rust,no_run
//! # async fn demo() -> anyhow::Result<()> {
//! use gtaopt::{commands::CommandHandler, ctx::AppContext};
//!
//! let ctx = AppContext::new(None).await?;
//! CommandHandler::handle_show(&ctx, "settings.xml".as_ref()).await?;
//! # Ok(())
//! # }
//! ```

/// Subcommand handlers.
pub mod commands;

/// Tool configuration loaded from TOML.
pub mod config;

/// Application context and state management.
pub mod ctx;

/// Common utilities and helper functions.
pub mod utils;

#[macro_use]
extern crate log;
#[macro_use]
extern crate anyhow;
