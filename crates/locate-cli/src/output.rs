//! Shared output layer for pretty/text/JSON parity across all CLI commands.
//!
//! Every command handler receives an [`OutputMode`] and formats its output
//! accordingly: pretty output for humans, compact text for agents, or stable JSON.
//!
//! # Output mode resolution
//!
//! Precedence (highest wins):
//! 1. `--format` / `--json` flag
//! 2. `FORMAT` env var → `"pretty"` | `"text"` | `"json"`
//! 3. `output` in the user config
//! 4. Default: [`OutputMode::Pretty`] if stdout is a TTY; [`OutputMode::Text`] if piped.

use crate::project::NotInitialized;
use clap::ValueEnum;
use locate_core::persist::PersistError;
use locate_core::{ErrorCode, StoreError};
use serde::Serialize;
use std::io::{self, IsTerminal, Write};

/// Shared width for human pretty separators.
pub const PRETTY_RULE_WIDTH: usize = 72;

/// Write a horizontal separator used by pretty human output.
pub fn pretty_rule(w: &mut dyn Write) -> io::Result<()> {
    writeln!(w, "{:-<width$}", "", width = PRETTY_RULE_WIDTH)
}

/// Write a section heading followed by a separator.
pub fn pretty_section(w: &mut dyn Write, heading: &str) -> io::Result<()> {
    writeln!(w, "{heading}")?;
    pretty_rule(w)
}

/// Render a left-aligned key/value line in human output.
pub fn pretty_kv(w: &mut dyn Write, key: &str, value: impl AsRef<str>) -> io::Result<()> {
    writeln!(w, "{:<14} {}", format!("{key}:"), value.as_ref())
}

/// The three output modes supported by the CLI.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputMode {
    /// Human-optimized output (cards, sections, visual framing).
    Pretty,
    /// Token-efficient plain text for agents and pipes.
    Text,
    /// Machine-readable JSON.
    Json,
}

impl OutputMode {
    pub const fn is_json(self) -> bool {
        matches!(self, Self::Json)
    }

    fn parse_loose(raw: &str) -> Option<Self> {
        match raw.trim().to_ascii_lowercase().as_str() {
            "json" => Some(Self::Json),
            "text" | "table" => Some(Self::Text),
            "pretty" | "human" => Some(Self::Pretty),
            _ => None,
        }
    }
}

/// Core resolution logic, separated from I/O for testability.
fn resolve_output_mode_inner(
    format_flag: Option<OutputMode>,
    json_flag: bool,
    format_env: Option<&str>,
    user_output: Option<&str>,
    is_tty: bool,
) -> OutputMode {
    if let Some(mode) = format_flag {
        return mode;
    }

    if json_flag {
        return OutputMode::Json;
    }

    // Unknown values fall through to the next source.
    if let Some(mode) = format_env.and_then(OutputMode::parse_loose) {
        return mode;
    }

    if let Some(mode) = user_output.and_then(OutputMode::parse_loose) {
        return mode;
    }

    if is_tty {
        OutputMode::Pretty
    } else {
        OutputMode::Text
    }
}

/// Resolve the output mode from CLI flags, environment, user config and TTY defaults.
pub fn resolve_output_mode(
    format_flag: Option<OutputMode>,
    json_flag: bool,
    user_output: Option<&str>,
) -> OutputMode {
    let env_val = std::env::var("FORMAT").ok();
    let is_tty = io::stdout().is_terminal();
    resolve_output_mode_inner(
        format_flag,
        json_flag,
        env_val.as_deref(),
        user_output,
        is_tty,
    )
}

/// Trait implemented by any CLI result type that can be rendered in all modes.
pub trait Renderable {
    /// Render for human consumption.
    fn render_human(&self, w: &mut dyn Write) -> io::Result<()>;

    /// Render as a self-contained JSON value.
    fn render_json(&self, w: &mut dyn Write) -> io::Result<()>;

    /// Render as a single text row in the column order of [`table_headers`].
    ///
    /// [`table_headers`]: Renderable::table_headers
    fn render_table(&self, w: &mut dyn Write) -> io::Result<()>;

    fn table_headers() -> &'static [&'static str]
    where
        Self: Sized,
    {
        &[]
    }
}

/// Render a single [`Renderable`] item.
pub fn render_item<R: Renderable>(w: &mut dyn Write, item: &R, mode: OutputMode) -> io::Result<()> {
    match mode {
        OutputMode::Pretty => item.render_human(w),
        OutputMode::Text => item.render_table(w),
        OutputMode::Json => {
            item.render_json(w)?;
            writeln!(w)
        }
    }
}

/// Render a list of [`Renderable`] items.
///
/// - In JSON mode, wraps items in a JSON array.
/// - In text mode, prints a header row first.
pub fn render_list<R: Renderable>(w: &mut dyn Write, items: &[R], mode: OutputMode) -> io::Result<()> {
    match mode {
        OutputMode::Pretty => {
            for item in items {
                item.render_human(w)?;
            }
        }
        OutputMode::Text => {
            let headers = if items.is_empty() {
                &[] as &[&str]
            } else {
                R::table_headers()
            };
            if !headers.is_empty() {
                writeln!(w, "{}", headers.join("  "))?;
            }
            for item in items {
                item.render_table(w)?;
            }
        }
        OutputMode::Json => {
            write!(w, "[")?;
            for (i, item) in items.iter().enumerate() {
                if i > 0 {
                    write!(w, ",")?;
                }
                writeln!(w)?;
                let mut buf = Vec::new();
                item.render_json(&mut buf)?;
                if buf.last() == Some(&b'\n') {
                    buf.pop();
                }
                w.write_all(&buf)?;
            }
            writeln!(w, "\n]")?;
        }
    }
    Ok(())
}

/// A structured error with optional suggestion and error code.
#[derive(Debug, Serialize)]
pub struct CliError {
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub suggestion: Option<String>,
    /// Machine-readable error code (e.g. "E2001").
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error_code: Option<String>,
}

impl CliError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            suggestion: None,
            error_code: None,
        }
    }

    fn coded(message: impl Into<String>, code: ErrorCode) -> Self {
        Self {
            message: message.into(),
            suggestion: code.hint().map(str::to_string),
            error_code: Some(code.code().to_string()),
        }
    }

    /// Pick the most specific typed error out of an `anyhow` chain.
    pub fn from_anyhow(err: &anyhow::Error) -> Self {
        if let Some(store) = err.downcast_ref::<StoreError>() {
            return Self::from(store);
        }
        if let Some(persist) = err.downcast_ref::<PersistError>() {
            return Self::coded(format!("{err:#}"), persist.code());
        }
        if err.downcast_ref::<NotInitialized>().is_some() {
            return Self::coded(format!("{err:#}"), ErrorCode::NotInitialized);
        }
        if err.downcast_ref::<toml::de::Error>().is_some() {
            return Self::coded(format!("{err:#}"), ErrorCode::ConfigParseError);
        }
        Self::new(format!("{err:#}"))
    }
}

impl From<&StoreError> for CliError {
    fn from(err: &StoreError) -> Self {
        Self::coded(err.to_string(), err.code())
    }
}

/// Render a serializable value in the requested format.
///
/// In JSON mode, the value is serialized with `serde_json`. In pretty/text mode,
/// the provided `human_fn` closure is called to produce text output.
pub fn render<T: Serialize>(
    w: &mut dyn Write,
    mode: OutputMode,
    value: &T,
    human_fn: impl FnOnce(&T, &mut dyn Write) -> io::Result<()>,
) -> anyhow::Result<()> {
    match mode {
        OutputMode::Json => {
            serde_json::to_writer_pretty(&mut *w, value)?;
            writeln!(w)?;
        }
        OutputMode::Pretty | OutputMode::Text => {
            human_fn(value, w)?;
        }
    }
    Ok(())
}

/// Render an error to stderr in the requested format.
pub fn render_error(mode: OutputMode, error: &CliError) -> anyhow::Result<()> {
    let stderr = io::stderr();
    let mut out = stderr.lock();
    match mode {
        OutputMode::Json => {
            let wrapper = serde_json::json!({
                "error": error,
            });
            serde_json::to_writer_pretty(&mut out, &wrapper)?;
            writeln!(out)?;
        }
        OutputMode::Pretty | OutputMode::Text => {
            match error.error_code.as_deref() {
                Some(code) => writeln!(out, "error[{code}]: {}", error.message)?,
                None => writeln!(out, "error: {}", error.message)?,
            }
            if let Some(ref suggestion) = error.suggestion {
                writeln!(out, "  suggestion: {suggestion}")?;
            }
        }
    }
    Ok(())
}

/// Render a one-line success message.
pub fn render_success(w: &mut dyn Write, mode: OutputMode, message: &str) -> anyhow::Result<()> {
    match mode {
        OutputMode::Json => {
            let wrapper = serde_json::json!({
                "ok": true,
                "message": message,
            });
            serde_json::to_writer_pretty(&mut *w, &wrapper)?;
            writeln!(w)?;
        }
        OutputMode::Pretty | OutputMode::Text => {
            writeln!(w, "✓ {message}")?;
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    // ── resolve_output_mode_inner ───────────────────────────────────────────

    #[test]
    fn resolve_format_flag_wins_over_everything() {
        let mode = resolve_output_mode_inner(
            Some(OutputMode::Text),
            true,
            Some("pretty"),
            Some("json"),
            true,
        );
        assert_eq!(mode, OutputMode::Text);
    }

    #[test]
    fn resolve_json_flag_wins_over_env() {
        let mode = resolve_output_mode_inner(None, true, Some("pretty"), None, true);
        assert_eq!(mode, OutputMode::Json);
    }

    #[test]
    fn resolve_env_wins_over_user_config() {
        let mode = resolve_output_mode_inner(None, false, Some("TEXT"), Some("json"), true);
        assert_eq!(mode, OutputMode::Text);
    }

    #[test]
    fn resolve_user_config_with_legacy_alias() {
        let mode = resolve_output_mode_inner(None, false, None, Some("human"), false);
        assert_eq!(mode, OutputMode::Pretty);
    }

    #[test]
    fn resolve_unknown_values_fall_through_to_tty() {
        let tty = resolve_output_mode_inner(None, false, Some("fancy"), Some("loud"), true);
        assert_eq!(tty, OutputMode::Pretty);
        let pipe = resolve_output_mode_inner(None, false, Some("fancy"), None, false);
        assert_eq!(pipe, OutputMode::Text);
    }

    // ── Renderable ──────────────────────────────────────────────────────────

    struct SimpleItem {
        name: &'static str,
        count: u32,
    }

    impl Renderable for SimpleItem {
        fn render_human(&self, w: &mut dyn Write) -> io::Result<()> {
            writeln!(w, "{}: {}", self.name, self.count)
        }

        fn render_json(&self, w: &mut dyn Write) -> io::Result<()> {
            write!(w, "{{\"name\":\"{}\",\"count\":{}}}", self.name, self.count)
        }

        fn render_table(&self, w: &mut dyn Write) -> io::Result<()> {
            writeln!(w, "{}  {}", self.name, self.count)
        }

        fn table_headers() -> &'static [&'static str] {
            &["NAME", "COUNT"]
        }
    }

    fn items() -> Vec<SimpleItem> {
        vec![
            SimpleItem { name: "a", count: 1 },
            SimpleItem { name: "b", count: 2 },
        ]
    }

    #[test]
    fn render_list_json_is_valid_array() {
        let mut buf = Vec::new();
        render_list(&mut buf, &items(), OutputMode::Json).expect("render");
        let value: serde_json::Value = serde_json::from_slice(&buf).expect("json");
        assert_eq!(value.as_array().map(Vec::len), Some(2));
        assert_eq!(value[1]["name"], "b");
    }

    #[test]
    fn render_list_json_empty_is_empty_array() {
        let mut buf = Vec::new();
        render_list::<SimpleItem>(&mut buf, &[], OutputMode::Json).expect("render");
        let value: serde_json::Value = serde_json::from_slice(&buf).expect("json");
        assert_eq!(value, serde_json::json!([]));
    }

    #[test]
    fn render_list_text_has_header() {
        let mut buf = Vec::new();
        render_list(&mut buf, &items(), OutputMode::Text).expect("render");
        let text = String::from_utf8(buf).expect("utf8");
        assert_eq!(text, "NAME  COUNT\na  1\nb  2\n");
    }

    #[test]
    fn render_item_pretty_uses_human() {
        let mut buf = Vec::new();
        render_item(&mut buf, &items()[0], OutputMode::Pretty).expect("render");
        assert_eq!(String::from_utf8(buf).expect("utf8"), "a: 1\n");
    }

    // ── Errors ──────────────────────────────────────────────────────────────

    #[test]
    fn cli_error_from_store_error() {
        let err = StoreError::NotFound { id: "FM-1".into() };
        let cli = CliError::from(&err);
        assert!(cli.message.contains("FM-1"));
        assert_eq!(cli.error_code.as_deref(), Some("E2001"));
        assert!(cli.suggestion.is_some());
    }

    #[test]
    fn cli_error_downcasts_through_context() {
        use anyhow::Context;
        let result: anyhow::Result<()> = Err(StoreError::DuplicateIdentity { id: "FM-2".into() })
            .context("create failed");
        let err = result.expect_err("error");
        let cli = CliError::from_anyhow(&err);
        assert_eq!(cli.error_code.as_deref(), Some("E2003"));
    }

    #[test]
    fn cli_error_plain_anyhow_has_no_code() {
        let cli = CliError::from_anyhow(&anyhow::anyhow!("boom"));
        assert_eq!(cli.message, "boom");
        assert!(cli.error_code.is_none());
    }

    #[test]
    fn render_success_json() {
        let mut buf = Vec::new();
        render_success(&mut buf, OutputMode::Json, "it worked").expect("render");
        let value: serde_json::Value = serde_json::from_slice(&buf).expect("json");
        assert_eq!(value["ok"], true);
    }

    #[test]
    fn render_error_does_not_fail() {
        let err = CliError::new("table error");
        assert!(render_error(OutputMode::Text, &err).is_ok());
        assert!(render_error(OutputMode::Json, &err).is_ok());
    }
}
