//! Hotspot API - command and query interface for the zone editor.
//!
//! This crate defines the typed command language for scripting the editor.
//! Commands are serializable, so a session can be recorded as JSON lines and
//! replayed against a fresh editor.
//!
//! # Example
//! ```ignore
//! use api::{execute_command, Command};
//!
//! let mut editor = Editor::default();
//! let result = execute_command(&mut editor, Command::Append);
//! ```

mod command;
mod executor;
mod query;
mod request;
mod target;

pub use command::*;
pub use executor::{execute_command, execute_query};
pub use query::*;
pub use request::{execute_request, Request, Response};
pub use target::*;
