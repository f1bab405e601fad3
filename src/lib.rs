pub mod models;
pub mod services;

// Re-export main types
pub use models::config::OcrConfig;
pub use services::ocr::TogetherOcrClient;
