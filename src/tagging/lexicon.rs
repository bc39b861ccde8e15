// Lexicon tagger: looks each token up in a token -> tag table.
//
// The lexicon is a tab-separated file with one `token<TAB>tag` entry per
// line; blank lines and lines starting with '#' are skipped. Lookup tries the
// token as written, then lowercased. Unknown tokens get the fallback tag.

use std::collections::HashMap;
use std::path::Path;

use anyhow::{Context, Result};
use tracing::info;

use super::traits::PosTagger;

/// Tag given to tokens missing from the lexicon unless configured otherwise.
pub const DEFAULT_FALLBACK_TAG: &str = "X";

pub struct LexiconTagger {
    lexicon: HashMap<String, String>,
    fallback: String,
}

impl LexiconTagger {
    /// Build a tagger from explicit (token, tag) pairs. Duplicate tokens are
    /// rejected.
    pub fn from_pairs<I>(pairs: I, fallback: &str) -> Result<Self>
    where
        I: IntoIterator<Item = (String, String)>,
    {
        let mut lexicon = HashMap::new();
        for (token, tag) in pairs {
            if tag.is_empty() {
                anyhow::bail!("Empty tag for token {token:?}");
            }
            if lexicon.insert(token.clone(), tag).is_some() {
                anyhow::bail!("Duplicate lexicon entry for token {token:?}");
            }
        }
        Ok(Self {
            lexicon,
            fallback: fallback.to_string(),
        })
    }

    /// Load a tab-separated lexicon file.
    pub fn load(path: &Path, fallback: &str) -> Result<Self> {
        let contents = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read tagger lexicon {}", path.display()))?;

        let mut pairs = Vec::new();
        for (line_no, line) in contents.lines().enumerate() {
            let line = line.trim();
            if line.is_empty() || line.starts_with('#') {
                continue;
            }
            let Some((token, tag)) = line.split_once('\t') else {
                anyhow::bail!(
                    "Line {} of {} is not `token<TAB>tag`",
                    line_no + 1,
                    path.display()
                );
            };
            pairs.push((token.trim().to_string(), tag.trim().to_string()));
        }

        let tagger = Self::from_pairs(pairs, fallback)
            .with_context(|| format!("Invalid tagger lexicon {}", path.display()))?;

        info!(
            entries = tagger.lexicon.len(),
            "Loaded tagger lexicon from {}",
            path.display()
        );

        Ok(tagger)
    }

    fn lookup(&self, token: &str) -> &str {
        self.lexicon
            .get(token)
            .or_else(|| self.lexicon.get(&token.to_lowercase()))
            .map(String::as_str)
            .unwrap_or(&self.fallback)
    }
}

impl PosTagger for LexiconTagger {
    fn tag(&self, tokens: &[String]) -> Result<Vec<(String, String)>> {
        Ok(tokens
            .iter()
            .map(|t| (t.clone(), self.lookup(t).to_string()))
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_load_and_tag() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("lexicon.tsv");
        std::fs::write(&path, "# comment\nmačka\tSozei\nlepa\tPspzei\n\nje\tVcip3s\n").unwrap();

        let tagger = LexiconTagger::load(&path, DEFAULT_FALLBACK_TAG).unwrap();
        let tokens: Vec<String> = ["Mačka", "je", "lepa", "zelo"]
            .iter()
            .map(|s| s.to_string())
            .collect();
        let tags = tagger.tag(&tokens).unwrap();

        assert_eq!(tags[0], ("Mačka".to_string(), "Sozei".to_string()));
        assert_eq!(tags[1].1, "Vcip3s");
        assert_eq!(tags[2].1, "Pspzei");
        assert_eq!(tags[3].1, "X");
    }

    #[test]
    fn test_duplicate_entries_rejected() {
        let pairs = vec![
            ("cat".to_string(), "S".to_string()),
            ("cat".to_string(), "P".to_string()),
        ];
        assert!(LexiconTagger::from_pairs(pairs, "X").is_err());
    }

    #[test]
    fn test_malformed_line_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("lexicon.tsv");
        std::fs::write(&path, "cat S\n").unwrap();
        assert!(LexiconTagger::load(&path, "X").is_err());
    }
}
