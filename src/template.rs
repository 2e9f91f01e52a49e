//! Line-prefix templating.
//!
//! Every log line starts with a rendered prefix. The template text contains
//! placeholder tokens (the built-in `@DateNow` and `@ServiceName`, plus any
//! caller-registered ones) that are substituted with their current values at
//! render time. Unknown substrings pass through untouched.

use std::collections::HashMap;

use chrono::Local;

use crate::error::LogError;

/// Built-in token substituted with the current time of day.
pub const DATE_PARAM: &str = "@DateNow";

/// Built-in token substituted with the configured service name.
pub const SERVICE_PARAM: &str = "@ServiceName";

/// Template text a writer starts with when none is configured.
pub const DEFAULT_LINE_START: &str = "[@ServiceName]->[@DateNow]---->";

/// Service name used until one is configured.
pub const DEFAULT_SERVICE_NAME: &str = "Module";

/// Time-of-day format rendered into the `@DateNow` token (12-hour clock).
pub(crate) const DATE_FORMAT: &str = "%I:%M:%S";

/// A line-start template: the template text, the ordered list of recognized
/// tokens, and each token's current value.
///
/// Tokens are only ever added; removing one is not supported. A token that
/// somehow lacks a value renders as its literal text rather than failing.
#[derive(Debug, Clone)]
pub struct LineTemplate {
    text: String,
    params: Vec<String>,
    values: HashMap<String, String>,
}

impl Default for LineTemplate {
    fn default() -> Self {
        Self::new()
    }
}

impl LineTemplate {
    /// Create a template with the default text and the two built-in tokens.
    pub fn new() -> Self {
        let mut values = HashMap::new();
        values.insert(
            DATE_PARAM.to_string(),
            Local::now().format(DATE_FORMAT).to_string(),
        );
        values.insert(SERVICE_PARAM.to_string(), DEFAULT_SERVICE_NAME.to_string());
        Self {
            text: DEFAULT_LINE_START.to_string(),
            params: vec![DATE_PARAM.to_string(), SERVICE_PARAM.to_string()],
            values,
        }
    }

    /// The current template text.
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Replace the template text, keeping the registered tokens.
    pub fn set_text(&mut self, text: impl Into<String>) {
        self.text = text.into();
    }

    /// Whether `name` is a registered token.
    pub fn has_param(&self, name: &str) -> bool {
        self.values.contains_key(name)
    }

    /// Register a token and its initial value.
    ///
    /// Registering a name twice overwrites the value without duplicating the
    /// token. Empty names are ignored (an empty token would match at every
    /// position of the template).
    pub fn add_param(&mut self, name: impl Into<String>, initial: impl Into<String>) {
        let name = name.into();
        if name.is_empty() {
            return;
        }
        if !self.values.contains_key(&name) {
            self.params.push(name.clone());
        }
        self.values.insert(name, initial.into());
    }

    /// Update the value of a registered token.
    ///
    /// Fails with [`LogError::ParamNotFound`] if `name` was never registered;
    /// nothing is mutated in that case.
    pub fn set_param(&mut self, name: &str, value: impl Into<String>) -> Result<(), LogError> {
        match self.values.get_mut(name) {
            Some(current) => {
                *current = value.into();
                Ok(())
            }
            None => Err(LogError::ParamNotFound(name.to_string())),
        }
    }

    /// Update the built-in date token.
    pub fn set_date_now(&mut self, value: impl Into<String>) {
        self.values.insert(DATE_PARAM.to_string(), value.into());
    }

    /// Update the built-in service-name token.
    pub fn set_service_name(&mut self, value: impl Into<String>) {
        self.values.insert(SERVICE_PARAM.to_string(), value.into());
    }

    /// Render the template text with all current token values.
    ///
    /// One left-to-right scan: at each position the longest registered token
    /// is substituted, otherwise a single character is copied. Substituted
    /// values are never re-scanned, so a value containing another token's
    /// text stays literal.
    pub fn render(&self) -> String {
        let mut out = String::with_capacity(self.text.len());
        let mut rest = self.text.as_str();
        while let Some(ch) = rest.chars().next() {
            let matched = self
                .params
                .iter()
                .filter(|name| !name.is_empty() && rest.starts_with(name.as_str()))
                .filter(|name| self.values.contains_key(name.as_str()))
                .max_by_key(|name| name.len());
            match matched {
                Some(name) => {
                    out.push_str(&self.values[name.as_str()]);
                    rest = &rest[name.len()..];
                }
                None => {
                    out.push(ch);
                    rest = &rest[ch.len_utf8()..];
                }
            }
        }
        out
    }
}
