//! Reason messages and the injected renderer.
//!
//! Requirements never produce display text themselves. They return a
//! [`Message`] (template key plus named arguments) and the caller renders it
//! through whatever [`MessageRenderer`] its UI uses. [`StringTable`] is a
//! minimal renderer for tools and tests.
//!
//! ```
//! use rolegate_logic::message::{Message, MessageRenderer, StringTable};
//!
//! let mut table = StringTable::new();
//! table.insert("role-timer-below-weight", "You must weigh at least { $weight } kg.");
//! let msg = Message::new("role-timer-below-weight").with_number("weight", 70.0);
//! assert_eq!(table.render_message(&msg), "You must weigh at least 70 kg.");
//! ```

use std::collections::HashMap;
use std::fmt;

use serde::{Deserialize, Serialize};

/// A single named message argument.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum MessageArg {
    Number(f32),
    Text(String),
}

impl fmt::Display for MessageArg {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            // Integral values print without a trailing ".0"
            MessageArg::Number(n) if n.fract() == 0.0 && n.is_finite() => write!(f, "{n:.0}"),
            MessageArg::Number(n) => write!(f, "{n}"),
            MessageArg::Text(s) => f.write_str(s),
        }
    }
}

/// Unrendered reason: a template key and its arguments.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Message {
    pub key: String,
    #[serde(default)]
    pub args: Vec<(String, MessageArg)>,
}

impl Message {
    pub fn new(key: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            args: Vec::new(),
        }
    }

    /// A message with no content (nothing to explain).
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        self.key.is_empty()
    }

    pub fn with_number(mut self, name: impl Into<String>, value: f32) -> Self {
        self.args.push((name.into(), MessageArg::Number(value)));
        self
    }

    pub fn with_text(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.args.push((name.into(), MessageArg::Text(value.into())));
        self
    }

    pub fn arg(&self, name: &str) -> Option<&MessageArg> {
        self.args.iter().find(|(n, _)| n == name).map(|(_, v)| v)
    }
}

/// Turns a template key plus arguments into display text.
pub trait MessageRenderer {
    fn render(&self, key: &str, args: &[(String, MessageArg)]) -> String;

    /// Render a [`Message`]; the empty message renders as `""`.
    fn render_message(&self, message: &Message) -> String {
        if message.is_empty() {
            return String::new();
        }
        self.render(&message.key, &message.args)
    }
}

/// Key → template map with `{ $name }` placeholders.
///
/// Deserializes from a flat JSON object. Unknown keys render as the key
/// itself so missing translations stay visible.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct StringTable {
    templates: HashMap<String, String>,
}

impl StringTable {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, key: impl Into<String>, template: impl Into<String>) {
        self.templates.insert(key.into(), template.into());
    }

    pub fn contains(&self, key: &str) -> bool {
        self.templates.contains_key(key)
    }

    pub fn len(&self) -> usize {
        self.templates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.templates.is_empty()
    }
}

impl MessageRenderer for StringTable {
    fn render(&self, key: &str, args: &[(String, MessageArg)]) -> String {
        let Some(template) = self.templates.get(key) else {
            log::debug!("no template for message key {key}");
            return key.to_string();
        };
        substitute(template, args)
    }
}

/// Replace `{ $name }` / `{$name}` placeholders. Unknown names are left as-is.
///
/// A placeholder opens at the last `{` before its `}`, so stray braces in
/// the surrounding text are copied through.
fn substitute(template: &str, args: &[(String, MessageArg)]) -> String {
    let mut out = String::with_capacity(template.len());
    let mut rest = template;

    while let Some(close) = rest.find('}') {
        let Some(open) = rest[..close].rfind('{') else {
            out.push_str(&rest[..=close]);
            rest = &rest[close + 1..];
            continue;
        };
        out.push_str(&rest[..open]);
        let inner = rest[open + 1..close].trim();
        let value = inner
            .strip_prefix('$')
            .and_then(|name| args.iter().find(|(n, _)| n == name.trim()))
            .map(|(_, v)| v.to_string());
        match value {
            Some(v) => out.push_str(&v),
            None => out.push_str(&rest[open..=close]),
        }
        rest = &rest[close + 1..];
    }
    out.push_str(rest);
    out
}
