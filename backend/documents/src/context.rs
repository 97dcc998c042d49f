//! System context assembly.
//!
//! One header line followed by one bullet per document, bounded to a fixed
//! number of characters.

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::reader::Document;

pub const CONTEXT_HEADER: &str = "Documents used and their summaries:";

/// Default character budget for the assembled context.
pub const DEFAULT_CONTEXT_CHAR_BUDGET: usize = 3000;

/// How an over-budget context is shortened.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ContextTruncation {
    /// Keep the first `budget` characters, even mid-word.
    #[default]
    HardCut,
    /// Drop whole bullets that would cross the budget.
    DocumentBoundary,
}

#[derive(Debug, Clone, Copy)]
pub struct ContextBuilder {
    char_budget: usize,
    truncation: ContextTruncation,
}

impl ContextBuilder {
    pub fn new(char_budget: usize) -> Self {
        Self {
            char_budget,
            truncation: ContextTruncation::default(),
        }
    }

    pub fn with_truncation(mut self, truncation: ContextTruncation) -> Self {
        self.truncation = truncation;
        self
    }

    pub fn char_budget(&self) -> usize {
        self.char_budget
    }

    /// Build the context string from documents in discovery order.
    ///
    /// The result never exceeds the character budget.
    pub fn build(&self, documents: &[Document]) -> String {
        let header = format!("{CONTEXT_HEADER}\n");
        let bullets: Vec<String> = documents
            .iter()
            .map(|doc| format!("- **{}**: {}\n", doc.name, doc.summary))
            .collect();

        let context = match self.truncation {
            ContextTruncation::HardCut => {
                let full: String = std::iter::once(header).chain(bullets).collect();
                hard_cut(full, self.char_budget)
            }
            ContextTruncation::DocumentBoundary => self.fit_bullets(header, &bullets),
        };

        debug!(
            documents = documents.len(),
            chars = context.chars().count(),
            budget = self.char_budget,
            "Built document context"
        );
        context
    }

    fn fit_bullets(&self, header: String, bullets: &[String]) -> String {
        let mut used = header.chars().count();
        if used > self.char_budget {
            return hard_cut(header, self.char_budget);
        }

        let mut context = header;
        for bullet in bullets {
            let len = bullet.chars().count();
            if used + len > self.char_budget {
                break;
            }
            context.push_str(bullet);
            used += len;
        }
        context
    }
}

impl Default for ContextBuilder {
    fn default() -> Self {
        Self::new(DEFAULT_CONTEXT_CHAR_BUDGET)
    }
}

fn hard_cut(text: String, budget: usize) -> String {
    match text.char_indices().nth(budget) {
        Some((byte_index, _)) => text[..byte_index].to_string(),
        None => text,
    }
}
