use std::error::Error;
use std::fmt;

#[derive(Debug)]
pub enum ExtractError {
    ImageLoadError(String),
    OcrError(String),
    SinkError(String),
    IoError(String),
}

impl fmt::Display for ExtractError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            ExtractError::ImageLoadError(msg) => {
                write!(f, "Image load error: {}", msg)
            }
            ExtractError::OcrError(msg) => write!(f, "OCR error: {}", msg),
            ExtractError::SinkError(msg) => write!(f, "Record sink error: {}", msg),
            ExtractError::IoError(msg) => write!(f, "IO error: {}", msg),
        }
    }
}

impl Error for ExtractError {}
