// Colored terminal output for ranked words.

use colored::Colorize;

use super::{truncate_chars, Report};

/// Widest word shown before truncation.
const MAX_WORD_CHARS: usize = 28;

/// Display every group of a report as a ranked table.
pub fn display_report(report: &Report) {
    if report.groups.is_empty() {
        println!("No groups to display.");
        return;
    }

    println!(
        "\n{}",
        format!(
            "=== {} ({} groups) ===",
            describe(&report.analysis),
            report.groups.len()
        )
        .bold()
    );

    for group in &report.groups {
        println!("\n  {}", group.label.bold());

        if group.words.is_empty() {
            println!("    {}", "(no words)".dimmed());
            continue;
        }

        for (i, ws) in group.words.iter().enumerate() {
            println!(
                "    {:>3}. {:<30} {}",
                i + 1,
                truncate_chars(&ws.word, MAX_WORD_CHARS),
                format!("{:>10.4}", ws.score).dimmed()
            );
        }
    }

    println!();
    println!("  {}", score_legend(&report.analysis).dimmed());
}

fn describe(analysis: &str) -> &str {
    match analysis {
        "corpus" => "Corpus-specific words",
        "document" => "Document-specific words",
        "cluster" => "Cluster-specific words",
        "pos" => "POS-filtered words",
        "tfidf" => "TF-IDF words",
        "enrichment" => "Enriched words",
        other => other,
    }
}

fn score_legend(analysis: &str) -> &'static str {
    match analysis {
        "pos" => "Score: cosine similarity to the document (higher first)",
        "tfidf" => "Score: TF-IDF weight (higher first)",
        "enrichment" => "Score: hypergeometric p-value (lower first)",
        _ => "Score: contrastive distance (lower = more distinctive)",
    }
}
