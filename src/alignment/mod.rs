pub mod alternatives;
pub mod annotation;
pub mod lcs;
pub mod normalize;
pub mod sentences;
pub mod syllables;
pub mod tokenization;
