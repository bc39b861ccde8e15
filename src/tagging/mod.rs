// Part-of-speech tagging: the tagger seam and a lexicon-backed tagger.

pub mod traits;
pub mod lexicon;
