// Output formatting: terminal display and JSON reports.

pub mod terminal;

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::specificity::contrast::Ranking;

/// Ranked words for one labelled group (a document or a cluster).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GroupRanking {
    pub label: String,
    pub words: Ranking,
}

/// A complete analysis result, ready for display or serialization.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Report {
    /// Which strategy produced the rankings
    pub analysis: String,
    pub groups: Vec<GroupRanking>,
}

impl Report {
    /// One group per document, labelled "doc <index>".
    pub fn from_documents(analysis: &str, rankings: Vec<Ranking>) -> Self {
        let groups = rankings
            .into_iter()
            .enumerate()
            .map(|(i, words)| GroupRanking {
                label: format!("doc {i}"),
                words,
            })
            .collect();
        Self {
            analysis: analysis.to_string(),
            groups,
        }
    }

    /// One group per cluster, labelled "cluster <label>", in label order.
    pub fn from_clusters(analysis: &str, rankings: BTreeMap<i64, Ranking>) -> Self {
        let groups = rankings
            .into_iter()
            .map(|(label, words)| GroupRanking {
                label: format!("cluster {label}"),
                words,
            })
            .collect();
        Self {
            analysis: analysis.to_string(),
            groups,
        }
    }

    /// Keep only the first `n` words of every group.
    pub fn truncate(mut self, n: usize) -> Self {
        for group in &mut self.groups {
            group.words.truncate(n);
        }
        self
    }
}

/// Truncate a string to at most `max_chars` characters, appending "..." if truncated.
///
/// Respects UTF-8 character boundaries, so multi-byte words never panic.
pub fn truncate_chars(text: &str, max_chars: usize) -> String {
    let char_count = text.chars().count();
    if char_count <= max_chars {
        text.to_string()
    } else {
        let truncated: String = text.chars().take(max_chars).collect();
        format!("{truncated}...")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::specificity::contrast::WordScore;

    #[test]
    fn test_truncate_keeps_top_words() {
        let report = Report::from_documents(
            "corpus",
            vec![vec![
                WordScore::new("a", -1.0),
                WordScore::new("b", 0.0),
                WordScore::new("c", 1.0),
            ]],
        )
        .truncate(2);
        assert_eq!(report.groups[0].label, "doc 0");
        assert_eq!(report.groups[0].words.len(), 2);
        assert_eq!(report.groups[0].words[1].word, "b");
    }

    #[test]
    fn test_cluster_labels() {
        let mut map = BTreeMap::new();
        map.insert(3, vec![]);
        map.insert(0, vec![]);
        let report = Report::from_clusters("cluster", map);
        let labels: Vec<&str> = report.groups.iter().map(|g| g.label.as_str()).collect();
        assert_eq!(labels, vec!["cluster 0", "cluster 3"]);
    }

    #[test]
    fn test_truncate_chars_multibyte() {
        assert_eq!(truncate_chars("čebelica", 4), "čebe...");
        assert_eq!(truncate_chars("mačka", 10), "mačka");
    }
}
