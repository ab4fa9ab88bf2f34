pub mod dates;
pub mod identity;
pub mod licence;
pub mod tax;

pub use identity::IdentityCardExtractor;
pub use licence::LicenceExtractor;
pub use tax::TaxCardExtractor;

/// Common capability of the three extractors: raw OCR text in, record out.
///
/// Extraction never fails; a field whose patterns all miss is simply absent
/// from the record.
pub trait DocumentExtractor {
    type Record;

    fn extract(&self, text: &str) -> Self::Record;
}
