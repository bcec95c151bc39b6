use std::fmt::Write;

use chrono::{Local, NaiveDateTime, format::StrftimeItems};
use rand::{Rng, distr::Alphanumeric};

use crate::error::ConfigError;

pub const STATE_LENGTH: usize = 24;

/// Generates the anti-forgery `state` value for one login.
pub fn generate_state() -> String {
    rand::rng()
        .sample_iter(&Alphanumeric)
        .take(STATE_LENGTH)
        .map(char::from)
        .collect()
}

/// Splits `items` into consecutive pieces of at most `size` elements.
///
/// Order is preserved and only the last piece may be shorter. An empty input
/// yields no pieces.
///
/// # Panics
///
/// Panics if `size` is zero.
pub fn chunk<T: Clone>(items: &[T], size: usize) -> Vec<Vec<T>> {
    assert!(size > 0, "chunk size must be positive");
    items.chunks(size).map(|c| c.to_vec()).collect()
}

/// Values a playlist title template can refer to.
#[derive(Debug, Clone)]
pub struct TitleVars {
    pub now: String,
    pub clean_only: bool,
}

impl TitleVars {
    /// Variables for a run started at `time`.
    ///
    /// `date_format` is a strftime string. Specifiers that need a time zone,
    /// such as `%z`, cannot be rendered and are rejected.
    pub fn at(
        time: NaiveDateTime,
        date_format: &str,
        clean_only: bool,
    ) -> Result<Self, ConfigError> {
        Ok(Self {
            now: format_time(time, date_format)?,
            clean_only,
        })
    }

    /// Variables for a run started now, in local time.
    pub fn today(date_format: &str, clean_only: bool) -> Result<Self, ConfigError> {
        Self::at(Local::now().naive_local(), date_format, clean_only)
    }
}

fn format_time(time: NaiveDateTime, date_format: &str) -> Result<String, ConfigError> {
    let invalid = || ConfigError::InvalidDateFormat(date_format.to_string());

    let items: Vec<_> = StrftimeItems::new(date_format).collect();
    if items
        .iter()
        .any(|item| matches!(item, chrono::format::Item::Error))
    {
        return Err(invalid());
    }

    let mut out = String::new();
    write!(out, "{}", time.format_with_items(items.into_iter())).map_err(|_| invalid())?;
    Ok(out)
}

/// Expands `{{ .Now }}` and `{{ .CleanOnly }}` in a playlist title template.
///
/// Whitespace inside the braces is optional. Unknown variables and unclosed
/// braces are configuration errors.
pub fn render_title(template: &str, vars: &TitleVars) -> Result<String, ConfigError> {
    let mut out = String::with_capacity(template.len());
    let mut rest = template;

    while let Some(start) = rest.find("{{") {
        out.push_str(&rest[..start]);
        let after = &rest[start + 2..];
        let Some(end) = after.find("}}") else {
            return Err(ConfigError::InvalidTitleTemplate(format!(
                "unclosed action in '{}'",
                template
            )));
        };

        match after[..end].trim() {
            ".Now" => out.push_str(&vars.now),
            ".CleanOnly" => out.push_str(if vars.clean_only { "true" } else { "false" }),
            other => {
                return Err(ConfigError::InvalidTitleTemplate(format!(
                    "unknown variable '{}'",
                    other
                )));
            }
        }
        rest = &after[end + 2..];
    }

    out.push_str(rest);
    Ok(out)
}
