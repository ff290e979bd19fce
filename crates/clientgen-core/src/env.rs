//! Environment variable interpolation for client input locations.
//!
//! An input may reference one environment variable as `${NAME}`. Only the
//! first placeholder counts, and when one is present the resolved value is the
//! variable's value alone: text around the placeholder is dropped.
//!
//! ```
//! use clientgen_core::env::resolve_input_url_with;
//!
//! let lookup = |name: &str| (name == "API_URL").then(|| "https://api.example.com".to_string());
//! assert_eq!(resolve_input_url_with("${API_URL}", lookup).unwrap(), "https://api.example.com");
//! assert_eq!(resolve_input_url_with("openapi.json", lookup).unwrap(), "openapi.json");
//! ```

use crate::{Error, Result};

/// A `${NAME}` occurrence located inside an input string.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Placeholder<'a> {
    /// Variable name between the braces
    pub name: &'a str,
    /// Text before `${`
    pub prefix: &'a str,
    /// Text after the closing `}`
    pub suffix: &'a str,
}

/// Find the first `${NAME}` placeholder with a non-empty name.
///
/// An unterminated `${` ends the scan; `${}` is skipped.
pub fn find_placeholder(input: &str) -> Option<Placeholder<'_>> {
    let mut offset = 0;
    while let Some(start) = input[offset..].find("${") {
        let open = offset + start;
        let name_start = open + 2;
        let close = name_start + input[name_start..].find('}')?;
        let name = &input[name_start..close];
        if !name.is_empty() {
            return Some(Placeholder {
                name,
                prefix: &input[..open],
                suffix: &input[close + 1..],
            });
        }
        offset = close + 1;
    }
    None
}

/// Resolve an input location against the process environment.
pub fn resolve_input_url(input: &str) -> Result<String> {
    resolve_input_url_with(input, |name| std::env::var(name).ok())
}

/// Resolve an input location using `lookup` to read variables.
///
/// Unset and empty variables are both reported as [`Error::EnvVarMissing`].
pub fn resolve_input_url_with<F>(input: &str, lookup: F) -> Result<String>
where
    F: Fn(&str) -> Option<String>,
{
    let Some(placeholder) = find_placeholder(input) else {
        return Ok(input.to_string());
    };

    let value = lookup(placeholder.name)
        .filter(|value| !value.is_empty())
        .ok_or_else(|| Error::EnvVarMissing {
            name: placeholder.name.to_string(),
        })?;

    if !placeholder.prefix.is_empty() || !placeholder.suffix.is_empty() {
        log::warn!(
            "Input '{}' resolves to the value of {} only; surrounding text is ignored",
            input,
            placeholder.name
        );
    }

    Ok(value)
}
