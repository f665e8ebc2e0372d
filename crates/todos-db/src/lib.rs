//! Persistence gateway for the todos application.
//!
//! Translates list and todo operations into single parameterized SQLite
//! statements, logs every statement through a [`StatementLogger`], and maps
//! result rows back into [`todos_types::List`] and [`todos_types::Todo`]
//! records.
//!
//! # Design decisions
//!
//! - **One connection, injected**: [`TodoGateway`] owns exactly one
//!   `rusqlite::Connection` handed to it at construction. There is no pool
//!   and no global handle; each test opens its own in-memory database.
//! - **One statement per operation**: every domain operation is a single
//!   statement, so atomicity is per statement and no transactions are
//!   opened here.
//! - **Schema is external**: the `lists` and `todos` tables must already
//!   exist. This crate never runs DDL.
//!
//! # Usage
//!
//! ```rust,ignore
//! use todos_db::{DbRuntimeSettings, TodoGateway, TracingLogger};
//!
//! let gateway = TodoGateway::connect("todos.db", DbRuntimeSettings::default(), TracingLogger)?;
//! gateway.create_list("Groceries")?;
//! for list in gateway.all_lists()? {
//!     println!("{} ({} remaining)", list.name, list.todos_remaining_count());
//! }
//! ```

mod config;
mod connection;
mod error;
mod gateway;
mod logger;
mod telemetry;

pub use config::{load_config, Config, ConfigError, DatabaseConfig, LoggingConfig};
pub use connection::{open_connection, ConnectionError, DbRuntimeSettings};
pub use error::GatewayError;
pub use gateway::{decode_completed, TodoGateway, COMPLETED_TRUE_LITERAL};
pub use logger::{format_statement, StatementLogger, TracingLogger};
pub use telemetry::init_tracing;

pub use todos_types::{List, Todo};
