pub mod fallback;
pub mod normalized_model;
pub mod normalizer;
pub mod result_model;
