//! XML config: `<Property name="...">value</Property>` lookup
//!
//! Matches the layout of a log4j2 `<Properties>` block. Values may refer to
//! other properties with `${name}`, to environment variables with
//! `${env:NAME}`, and carry a fallback with `${name:-default}`.

use once_cell::sync::Lazy;
use regex::{Captures, Regex};

const PROPERTY_TAG: &str = "Property";
const MAX_SUBSTITUTION_DEPTH: usize = 8;
/// Reference expansions allowed per lookup; later references stay verbatim.
const MAX_EXPANSIONS: usize = 256;

static REFERENCE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\$\{([^{}]+)\}").expect("valid regex"));

/// All `Property` elements of a document, in document order.
#[derive(Debug, Clone, Default)]
pub struct PropertyTable {
    entries: Vec<(String, String)>,
}

impl PropertyTable {
    pub fn parse(content: &str) -> Result<Self, roxmltree::Error> {
        // log4j2 configs commonly start with `<!DOCTYPE Configuration>`.
        let options = roxmltree::ParsingOptions { allow_dtd: true, ..Default::default() };
        let doc = roxmltree::Document::parse_with_options(content, options)?;
        let entries = doc
            .descendants()
            .filter(|node| node.has_tag_name(PROPERTY_TAG))
            .map(|node| {
                let name = node.attribute("name").unwrap_or_default().to_string();
                let text: String = node
                    .descendants()
                    .filter(|child| child.is_text())
                    .filter_map(|child| child.text())
                    .collect();
                (name, text.trim().to_string())
            })
            .collect();
        Ok(Self { entries })
    }

    /// Raw text of the first property named `name`.
    pub fn raw(&self, name: &str) -> Option<&str> {
        self.entries.iter().find(|(key, _)| key == name).map(|(_, value)| value.as_str())
    }

    /// Text of the first property named `name`, with references resolved.
    pub fn get(&self, name: &str) -> Option<String> {
        let mut budget = MAX_EXPANSIONS;
        self.raw(name).map(|value| self.substitute(value, 0, &mut budget))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    fn substitute(&self, value: &str, depth: usize, budget: &mut usize) -> String {
        if depth >= MAX_SUBSTITUTION_DEPTH || !value.contains("${") {
            return value.to_string();
        }
        REFERENCE
            .replace_all(value, |caps: &Captures<'_>| {
                if *budget == 0 {
                    return caps[0].to_string();
                }
                *budget -= 1;
                self.resolve(&caps[1], depth, &mut *budget)
                    .unwrap_or_else(|| caps[0].to_string())
            })
            .into_owned()
    }

    fn resolve(&self, expression: &str, depth: usize, budget: &mut usize) -> Option<String> {
        let (reference, default) = match expression.split_once(":-") {
            Some((reference, default)) => (reference, Some(default)),
            None => (expression, None),
        };

        let resolved = match reference.strip_prefix("env:") {
            Some(var) => std::env::var(var).ok(),
            None => self.raw(reference).map(|value| self.substitute(value, depth + 1, &mut *budget)),
        };

        match (resolved, default) {
            (Some(value), _) => Some(value),
            (None, Some(fallback)) => Some(self.substitute(fallback, depth + 1, budget)),
            (None, None) => None,
        }
    }
}
