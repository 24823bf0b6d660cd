//! Human-readable summary of the final count.

use serde::{Deserialize, Serialize};

/// Placeholder replaced by the count when rendering a [`CountMessage`].
pub const COUNT_PLACEHOLDER: &str = "{count}";

/// Default file name for the persisted result.
pub const DEFAULT_RESULT_FILE: &str = "count_result.txt";

const DEFAULT_TEMPLATE: &str = "Toplam sayılan yumurta: {count}";

/// Message template for the exported count line.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CountMessage {
    template: String,
}

impl Default for CountMessage {
    fn default() -> Self {
        Self::new(DEFAULT_TEMPLATE)
    }
}

impl CountMessage {
    /// Create a template. Every `{count}` occurrence is substituted; a
    /// template without the placeholder gets the count appended after a space.
    pub fn new(template: impl Into<String>) -> Self {
        Self {
            template: template.into(),
        }
    }

    pub fn template(&self) -> &str {
        &self.template
    }

    pub fn render(&self, count: u64) -> String {
        if self.template.contains(COUNT_PLACEHOLDER) {
            self.template.replace(COUNT_PLACEHOLDER, &count.to_string())
        } else {
            format!("{} {}", self.template, count)
        }
    }
}
