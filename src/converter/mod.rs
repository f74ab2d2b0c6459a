//!
//! Log format conversion and rendering.
//!
//! `log_format` rewrites `${name}` placeholders into `{{.name}}` tags; `template`
//! renders structured log records through the converted format.
//!
//! Authors:
//!   Jaro <yarenty@gmail.com>
//!
//! Copyright (c) 2026 SkyCorp

/* --- modules --------------------------------------------------------------------------------- */

pub mod log_format;
pub mod template;

/* --- start of code -------------------------------------------------------------------------- */

pub use log_format::convert_log_format;
pub use template::{DEFAULT_LOG_FORMAT, LogTemplate};
