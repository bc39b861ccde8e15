// Input loading for the command line: token files and cluster labels.
//
// A token file is either a JSON array of token arrays, or plain text with one
// already-tokenized document per line (tokens separated by whitespace).

use std::path::Path;

use anyhow::{Context, Result};
use tracing::debug;

/// Load a corpus of token sequences.
pub fn load_token_lists(path: &Path) -> Result<Vec<Vec<String>>> {
    let contents = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read token file {}", path.display()))?;
    let token_lists = parse_token_lists(&contents)
        .with_context(|| format!("Invalid token file {}", path.display()))?;

    debug!(
        documents = token_lists.len(),
        "Loaded token file {}",
        path.display()
    );
    Ok(token_lists)
}

/// Parse JSON (`[["a", "b"], ["c"]]`) or one whitespace-tokenized document
/// per line.
pub fn parse_token_lists(contents: &str) -> Result<Vec<Vec<String>>> {
    let token_lists: Vec<Vec<String>> = if contents.trim_start().starts_with('[') {
        serde_json::from_str(contents).context("Expected a JSON array of token arrays")?
    } else {
        contents
            .lines()
            .map(|line| line.split_whitespace().map(String::from).collect())
            .collect()
    };

    if token_lists.is_empty() {
        anyhow::bail!("No documents found");
    }
    Ok(token_lists)
}

/// Load cluster labels: a JSON array of integers, or one integer per line.
pub fn load_labels(path: &Path) -> Result<Vec<i64>> {
    let contents = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read label file {}", path.display()))?;
    parse_labels(&contents).with_context(|| format!("Invalid label file {}", path.display()))
}

pub fn parse_labels(contents: &str) -> Result<Vec<i64>> {
    if contents.trim_start().starts_with('[') {
        return serde_json::from_str(contents).context("Expected a JSON array of integers");
    }
    contents
        .lines()
        .map(str::trim)
        .filter(|l| !l.is_empty())
        .enumerate()
        .map(|(i, l)| {
            l.parse::<i64>()
                .with_context(|| format!("Label {} is not an integer: {l:?}", i + 1))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_json_tokens() {
        let docs = parse_token_lists(r#"[["cat", "dog"], ["bird"]]"#).unwrap();
        assert_eq!(docs, vec![vec!["cat", "dog"], vec!["bird"]]);
    }

    #[test]
    fn test_parse_line_tokens_keeps_empty_documents() {
        let docs = parse_token_lists("cat dog\n\nbird\n").unwrap();
        assert_eq!(docs.len(), 3);
        assert!(docs[1].is_empty());
    }

    #[test]
    fn test_parse_empty_fails() {
        assert!(parse_token_lists("").is_err());
        assert!(parse_token_lists("[]").is_err());
    }

    #[test]
    fn test_parse_labels() {
        assert_eq!(parse_labels("[0, -1, 0, 1]").unwrap(), vec![0, -1, 0, 1]);
        assert_eq!(parse_labels("0\n-1\n\n2\n").unwrap(), vec![0, -1, 2]);
        assert!(parse_labels("0\nx\n").is_err());
    }
}
