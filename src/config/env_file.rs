//! .env file parsing.
//!
//! Reads `KEY=value` files the way dotenv tooling writes them, without
//! touching the process environment.

use std::collections::BTreeMap;
use std::path::Path;

use anyhow::Context;
use tracing::debug;

use crate::error::Result;

/// Parses .env files into a map of variables.
///
/// # Supported Formats
///
/// - Simple: `KEY=value`
/// - Exported: `export KEY=value`
/// - Quoted: `KEY="value with spaces"` or `KEY='single quoted'`
/// - Escapes inside double quotes: `\n`, `\t`, `\"`, `\\`
/// - Trailing comments on unquoted values: `KEY=value # note`
/// - Empty: `KEY=`
/// - Comments: `# This is a comment`
///
/// # Example
///
/// ```
/// use construct::config::EnvFileParser;
///
/// let content = r#"
/// # Matrix settings
/// export MATRIX_MODE=development
/// API_KEY="red pill"
/// LOG_LEVEL=DEBUG # verbose while testing
/// "#;
///
/// let vars = EnvFileParser::parse(content);
/// assert_eq!(vars.get("MATRIX_MODE").map(String::as_str), Some("development"));
/// assert_eq!(vars.get("API_KEY").map(String::as_str), Some("red pill"));
/// assert_eq!(vars.get("LOG_LEVEL").map(String::as_str), Some("DEBUG"));
/// ```
pub struct EnvFileParser;

impl EnvFileParser {
    /// Parse env file content. Lines that are not assignments are skipped.
    pub fn parse(content: &str) -> BTreeMap<String, String> {
        content
            .lines()
            .map(str::trim)
            .filter(|line| !line.is_empty() && !line.starts_with('#'))
            .filter_map(Self::parse_line)
            .collect()
    }

    fn parse_line(line: &str) -> Option<(String, String)> {
        let line = line.strip_prefix("export ").map_or(line, str::trim_start);
        let (key, value) = line.split_once('=')?;
        let key = key.trim();
        if key.is_empty() || key.contains(char::is_whitespace) {
            return None;
        }

        Some((key.to_string(), Self::parse_value(value.trim())))
    }

    fn parse_value(raw: &str) -> String {
        if let Some(inner) = Self::quoted(raw, '"') {
            return Self::unescape(inner);
        }
        if let Some(inner) = Self::quoted(raw, '\'') {
            return inner.to_string();
        }

        // Unquoted: a ` #` starts a comment.
        match raw.find(" #") {
            Some(pos) => raw[..pos].trim_end().to_string(),
            None => raw.to_string(),
        }
    }

    /// Content between a leading quote and its closing match, ignoring
    /// anything after the closing quote.
    fn quoted(raw: &str, quote: char) -> Option<&str> {
        let rest = raw.strip_prefix(quote)?;
        let mut escaped = false;
        for (idx, ch) in rest.char_indices() {
            match ch {
                '\\' if quote == '"' && !escaped => escaped = true,
                c if c == quote && !escaped => return Some(&rest[..idx]),
                _ => escaped = false,
            }
        }
        None
    }

    fn unescape(inner: &str) -> String {
        let mut out = String::with_capacity(inner.len());
        let mut chars = inner.chars();
        while let Some(ch) = chars.next() {
            if ch != '\\' {
                out.push(ch);
                continue;
            }
            match chars.next() {
                Some('n') => out.push('\n'),
                Some('t') => out.push('\t'),
                Some('r') => out.push('\r'),
                Some(other) => out.push(other),
                None => out.push('\\'),
            }
        }
        out
    }

    /// Load and parse an env file from a path.
    pub fn load(path: &Path) -> Result<BTreeMap<String, String>> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read env file {}", path.display()))?;
        let vars = Self::parse(&content);
        debug!("Read {} variables from {}", vars.len(), path.display());
        Ok(vars)
    }

    /// Load and parse an env file, returning an empty map if it doesn't exist.
    pub fn load_optional(path: &Path) -> Result<BTreeMap<String, String>> {
        if path.is_file() {
            Self::load(path)
        } else {
            debug!("No env file at {}", path.display());
            Ok(BTreeMap::new())
        }
    }
}
