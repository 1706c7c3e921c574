//! Integration tests for [`prompt::PromptTemplates::load`] and composition from files.

use std::io::Write;

use prompt::{build_query, PromptTemplates, QUERY_PREAMBLE};
use tempfile::NamedTempFile;

fn write_temp(content: &str) -> NamedTempFile {
    let mut file = NamedTempFile::new().expect("temp file");
    file.write_all(content.as_bytes()).expect("write");
    file
}

/// **Test: load reads both template files verbatim.**
#[test]
fn test_load_reads_both_templates() {
    let query = write_temp("You are a relay assistant.\n");
    let encapsulate = write_temp("Summarize the document.\n");

    let templates = PromptTemplates::load(query.path(), encapsulate.path()).expect("load");

    assert_eq!(templates.query, "You are a relay assistant.\n");
    assert_eq!(templates.encapsulate, "Summarize the document.\n");
}

/// **Test: missing template file is an error, not a silent default.**
#[test]
fn test_load_missing_file_is_error() {
    let query = write_temp("q");
    let missing = std::path::Path::new("/nonexistent/encapsulate.txt");

    assert!(PromptTemplates::load(query.path(), missing).is_err());
}

/// **Test: composition over loaded templates matches the fixed order.**
#[test]
fn test_query_composition_from_loaded_templates() {
    let query = write_temp("INSTRUCTIONS\n");
    let encapsulate = write_temp("ENCAPSULATE\n");
    let templates = PromptTemplates::load(query.path(), encapsulate.path()).expect("load");

    let prompt = build_query(&templates, "knowledge line\n", "Hello").expect("build");

    assert_eq!(
        prompt,
        format!("INSTRUCTIONS\nknowledge line\n{}Hello", QUERY_PREAMBLE)
    );
    assert!(prompt.ends_with("Hello"));
}
