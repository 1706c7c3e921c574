//! # Prompt
//!
//! Composes the single prompt string sent to the completion endpoint.
//!
//! ## Modes
//!
//! - **Query**: `query template ++ knowledge ++ QUERY_PREAMBLE ++ user message`.
//!   The order is the prompt contract the remote model depends on; it must not change.
//! - **Ingestion**: `encapsulation template ++ "\n" ++ document text`; the expected
//!   response is a compact summary.
//!
//! Both modes are pure string composition over already-loaded inputs; the knowledge
//! content is re-read by the caller per request, the two templates are loaded once
//! at startup via [`PromptTemplates::load`].

use std::io;
use std::path::Path;

use thiserror::Error;

/// Fixed sentence between the accumulated knowledge and the raw user question.
pub const QUERY_PREAMBLE: &str =
    "\nBased on the instructions and accumulated knowledge above, answer the question below.\nQuestion: ";

/// Upper bound on a composed prompt. The endpoint enforces its own limit; failing
/// here keeps the boundary explicit and testable instead of an opaque upstream error.
pub const MAX_PROMPT_CHARS: usize = 32_768;

#[derive(Error, Debug)]
pub enum PromptError {
    #[error("composed prompt is {len} characters, limit is {max}")]
    TooLarge { len: usize, max: usize },
}

/// The two static template assets, loaded once from stable paths.
#[derive(Debug, Clone)]
pub struct PromptTemplates {
    /// Query-mode instructions prepended to every question prompt.
    pub query: String,
    /// Ingestion-mode instruction asking the model for a compact summary.
    pub encapsulate: String,
}

impl PromptTemplates {
    pub fn new(query: impl Into<String>, encapsulate: impl Into<String>) -> Self {
        Self {
            query: query.into(),
            encapsulate: encapsulate.into(),
        }
    }

    /// Loads both templates from disk. I/O errors propagate; missing templates are
    /// a startup failure, not a per-request one.
    pub fn load(query_path: &Path, encapsulate_path: &Path) -> io::Result<Self> {
        let query = std::fs::read_to_string(query_path)?;
        let encapsulate = std::fs::read_to_string(encapsulate_path)?;
        Ok(Self { query, encapsulate })
    }
}

fn guard_len(prompt: String) -> Result<String, PromptError> {
    let len = prompt.chars().count();
    if len > MAX_PROMPT_CHARS {
        return Err(PromptError::TooLarge {
            len,
            max: MAX_PROMPT_CHARS,
        });
    }
    Ok(prompt)
}

/// Query mode: instructions, then knowledge, then the preamble, then the raw question.
/// Deterministic byte-for-byte concatenation.
pub fn build_query(
    templates: &PromptTemplates,
    knowledge: &str,
    user_message: &str,
) -> Result<String, PromptError> {
    let mut prompt = String::with_capacity(
        templates.query.len() + knowledge.len() + QUERY_PREAMBLE.len() + user_message.len(),
    );
    prompt.push_str(&templates.query);
    prompt.push_str(knowledge);
    prompt.push_str(QUERY_PREAMBLE);
    prompt.push_str(user_message);
    guard_len(prompt)
}

/// Ingestion mode: encapsulation instruction, a newline, then the extracted document text.
pub fn build_ingestion(
    templates: &PromptTemplates,
    document_text: &str,
) -> Result<String, PromptError> {
    let mut prompt =
        String::with_capacity(templates.encapsulate.len() + 1 + document_text.len());
    prompt.push_str(&templates.encapsulate);
    prompt.push('\n');
    prompt.push_str(document_text);
    guard_len(prompt)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn templates() -> PromptTemplates {
        PromptTemplates::new("QUERY-INSTRUCTIONS\n", "ENCAPSULATE-INSTRUCTIONS")
    }

    #[test]
    fn test_build_query_exact_concatenation() {
        let prompt = build_query(&templates(), "KNOWLEDGE\n", "Hello").unwrap();
        assert_eq!(
            prompt,
            format!("QUERY-INSTRUCTIONS\nKNOWLEDGE\n{}Hello", QUERY_PREAMBLE)
        );
    }

    #[test]
    fn test_build_query_is_deterministic() {
        let a = build_query(&templates(), "k", "q").unwrap();
        let b = build_query(&templates(), "k", "q").unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn test_build_query_empty_knowledge() {
        let prompt = build_query(&templates(), "", "Hello").unwrap();
        assert_eq!(
            prompt,
            format!("QUERY-INSTRUCTIONS\n{}Hello", QUERY_PREAMBLE)
        );
    }

    #[test]
    fn test_build_ingestion_shape() {
        let prompt = build_ingestion(&templates(), "document body").unwrap();
        assert_eq!(prompt, "ENCAPSULATE-INSTRUCTIONS\ndocument body");
    }

    #[test]
    fn test_oversized_prompt_rejected() {
        let big = "x".repeat(MAX_PROMPT_CHARS + 1);
        let err = build_query(&templates(), &big, "q").unwrap_err();
        match err {
            PromptError::TooLarge { len, max } => {
                assert!(len > max);
                assert_eq!(max, MAX_PROMPT_CHARS);
            }
        }
    }

    #[test]
    fn test_prompt_at_limit_accepted() {
        let t = PromptTemplates::new("", "");
        let body = "x".repeat(MAX_PROMPT_CHARS - QUERY_PREAMBLE.chars().count());
        assert!(build_query(&t, &body, "").is_ok());
    }
}
