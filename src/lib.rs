pub mod extraction;
pub mod models;
pub mod processing;
pub mod utils;
pub mod document_scanner;

pub use document_scanner::DocumentScanner;
pub use extraction::DocumentExtractor;
