pub mod load_corpus;
pub mod search;
pub mod similarity;
pub mod stats;
