//!
//! Log format conversion from `${name}` placeholders to `{{.name}}` template tags.
//!
//! Display formats are stored by users with shell-style placeholders, while the
//! renderer understands template tags only. Conversion is a single left-to-right
//! pass; anything that is not a well-formed placeholder is copied as-is, so the
//! operation never fails and is a no-op on already converted input.
//!
//! Authors:
//!   Jaro <yarenty@gmail.com>
//!
//! Copyright (c) 2026 SkyCorp

/* --- uses ------------------------------------------------------------------------------------ */

use once_cell::sync::Lazy;
use regex::Regex;

/* --- constants ------------------------------------------------------------------------------ */

/** matches `${identifier}` where identifier is one or more ASCII word characters */
static LEGACY_PLACEHOLDER: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"\$\{([0-9A-Za-z_]+)\}").expect("legacy placeholder pattern is valid")
});

/** replacement emitting `{{.identifier}}` */
const TEMPLATE_REPLACEMENT: &str = "{{.${1}}}";

/* --- start of code -------------------------------------------------------------------------- */

///
/// Convert a log format string to template syntax.
///
/// Every `${name}` becomes `{{.name}}`. Template tags, plain text and malformed
/// sequences such as `${`, `${}` or `${a-b}` are preserved byte-for-byte.
///
/// # Arguments
///  * `format` - user supplied display format
///
/// # Returns
///  * The format with all legacy placeholders rewritten
///
/// # Examples
/// ```rust
/// use kiicli::converter::convert_log_format;
///
/// assert_eq!(convert_log_format("${time} [${level}]"), "{{.time}} [{{.level}}]");
/// ```
pub fn convert_log_format(format: &str) -> String {
    LEGACY_PLACEHOLDER.replace_all(format, TEMPLATE_REPLACEMENT).into_owned()
}

/* --- tests ------------------------------------------------------------------------------- */
