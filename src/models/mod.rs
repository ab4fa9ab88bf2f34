pub mod records;

pub use records::{
    DocumentKind, ExtractedRecord, IdentityCardRecord, LicenceRecord, TaxCardRecord,
};
