use serde::{Deserialize, Serialize};

/// The three document layouts the extractors understand.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DocumentKind {
    IdentityCard,
    TaxCard,
    Licence,
}

impl DocumentKind {
    /// Default output file for the one-row CSV, named after the document type.
    pub fn default_output_path(&self) -> &'static str {
        match self {
            DocumentKind::IdentityCard => "identity_card_data.csv",
            DocumentKind::TaxCard => "tax_card_data.csv",
            DocumentKind::Licence => "licence_data.csv",
        }
    }
}

/// One extracted record of any document kind.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum ExtractedRecord {
    IdentityCard(IdentityCardRecord),
    TaxCard(TaxCardRecord),
    Licence(LicenceRecord),
}

/// Fields recognized on a national identity card.
/// Every field is optional; a pattern that never matched leaves `None`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IdentityCardRecord {
    #[serde(rename = "Name")]
    pub name: Option<String>,
    #[serde(rename = "ID Number")]
    pub id_number: Option<String>,
    #[serde(rename = "Date of Birth")]
    pub date_of_birth: Option<String>,
    #[serde(rename = "Age")]
    pub age: Option<u32>,
    #[serde(rename = "Gender")]
    pub gender: Option<String>,
}

/// Fields recognized on a tax identity card.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TaxCardRecord {
    #[serde(rename = "Name")]
    pub name: Option<String>,
    #[serde(rename = "Tax ID Number")]
    pub tax_id_number: Option<String>,
    #[serde(rename = "Date of Birth")]
    pub date_of_birth: Option<String>,
    #[serde(rename = "Age")]
    pub age: Option<u32>,
    #[serde(rename = "Father's Name")]
    pub father_name: Option<String>,
}

/// Fields recognized on a driving licence.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LicenceRecord {
    #[serde(rename = "Licence Number")]
    pub licence_number: Option<String>,
    #[serde(rename = "Name")]
    pub name: Option<String>,
    #[serde(rename = "Father/Husband Name")]
    pub father_husband_name: Option<String>,
    #[serde(rename = "Date of Birth")]
    pub date_of_birth: Option<String>,
    #[serde(rename = "Age")]
    pub age: Option<u32>,
    #[serde(rename = "Blood Group")]
    pub blood_group: Option<String>,
    #[serde(rename = "Date of Issue")]
    pub date_of_issue: Option<String>,
    #[serde(rename = "Valid Till")]
    pub valid_till: Option<String>,
}
