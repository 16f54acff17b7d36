// Matching core: text normalization, TF-IDF similarity, blended scoring, explanations.
// Everything below `handlers` is synchronous and free of I/O; handlers are the only
// part that touches request state.

pub mod engine;
pub mod explain;
pub mod handlers;
pub mod lexicon;
pub mod normalizer;
pub mod vector_space;
