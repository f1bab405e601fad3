pub mod together;

// Re-export main types
pub use together::{TogetherOcrClient, DEFAULT_MODEL};
