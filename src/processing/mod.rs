pub mod image;
pub mod ocr;
pub mod sink;

pub use image::ImageProcessor;
pub use ocr::{OcrConfig, TextSource};
pub use sink::CsvSink;
