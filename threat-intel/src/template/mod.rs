//! Minimal conditional templating for report prompts
//!
//! Supported markers:
//! - `{{key}}` is replaced by the bound value. A key bound to an empty or missing value
//!   renders as nothing; a key absent from the context is left as written.
//! - `{{#key}}...{{/key}}` keeps its content only when `key` has a non-empty value.
//! - `{{^key}}...{{/key}}` keeps its content only when `key` is absent or empty.

pub mod prompts;
pub(crate) mod renderer;
pub mod tokenizer;

pub use prompts::{PromptArgument, PromptRegistry, PromptTemplate, PROMPTS};

use std::collections::HashMap;

/// Argument bindings for one render
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TemplateContext {
    values: HashMap<String, Option<String>>,
}

impl TemplateContext {
    pub fn new() -> Self {
        Self::default()
    }

    /// Bind `key`, replacing any previous binding
    pub fn set<K, V>(&mut self, key: K, value: Option<V>)
    where
        K: Into<String>,
        V: Into<String>,
    {
        self.values.insert(key.into(), value.map(Into::into));
    }

    #[must_use]
    pub fn with<K: Into<String>, V: Into<String>>(mut self, key: K, value: V) -> Self {
        self.set(key, Some(value));
        self
    }

    /// `None` when the key is unbound; `Some(None)` when bound without a value
    pub fn get(&self, key: &str) -> Option<Option<&str>> {
        self.values.get(key).map(Option::as_deref)
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.values.contains_key(key)
    }

    /// Bound to a non-empty value
    pub fn is_truthy(&self, key: &str) -> bool {
        matches!(self.get(key), Some(Some(value)) if !value.is_empty())
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for TemplateContext {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut context = Self::new();
        for (key, value) in iter {
            context.set(key, Some(value));
        }
        context
    }
}

/// Render `body` against `context`. Never fails: unresolved markers pass through.
pub fn render(body: &str, context: &TemplateContext) -> String {
    let tokens = tokenizer::tokenize(body);
    let nodes = renderer::parse(&tokens);

    let mut out = String::with_capacity(body.len());
    renderer::render_nodes(&nodes, context, &mut out);
    out
}
