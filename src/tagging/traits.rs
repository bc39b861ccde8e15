// Part-of-speech tagger trait.
//
// The tagger is a caller-owned collaborator: it is loaded once at startup and
// passed into each POS-filtered analysis. Only the first character of a tag
// is ever inspected, so any tag set whose codes start with a word-class
// letter works (MULTEXT-East style: 'S' noun, 'P' adjective, ...).

use anyhow::Result;

/// Trait for assigning a tag code to every token of a sequence.
pub trait PosTagger: Send + Sync {
    /// Tag a token sequence, returning `(token, tag)` pairs in input order.
    fn tag(&self, tokens: &[String]) -> Result<Vec<(String, String)>>;
}
