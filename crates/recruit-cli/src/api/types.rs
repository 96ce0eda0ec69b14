//! API request and response types
//!
//! Matches the tracking service's JSON. Unknown response fields are ignored.

use serde::{Deserialize, Serialize};

/// `{ "items": [...] }` list wrapper
#[derive(Debug, Clone, Deserialize)]
pub struct ItemList<T> {
    pub items: Vec<T>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Account {
    pub id: i64,
    #[serde(default)]
    pub name: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Vacancy {
    pub id: i64,
    pub position: String,
}

/// One page of the vacancy list
#[derive(Debug, Clone, Deserialize)]
pub struct VacancyPage {
    pub items: Vec<Vacancy>,

    /// Total number of pages; absent means everything fit on one page
    #[serde(default = "one", alias = "total")]
    pub pages: u32,
}

fn one() -> u32 {
    1
}

/// Recruitment stage as known to the service
#[derive(Debug, Clone, Deserialize)]
pub struct VacancyStatus {
    pub id: i64,
    pub name: String,
}

/// Reference to an uploaded file
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileRef {
    pub id: i64,
}

/// Response of the upload endpoint, including fields recognized in the file
#[derive(Debug, Clone, Deserialize)]
pub struct UploadedFile {
    pub id: i64,
    #[serde(default)]
    pub name: Option<String>,
    /// Plain-text rendering of the document
    #[serde(default)]
    pub text: Option<String>,
    #[serde(default)]
    pub photo: Option<FileRef>,
    #[serde(default)]
    pub fields: Option<ParsedFields>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ParsedFields {
    #[serde(default)]
    pub name: Option<ParsedName>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub phones: Vec<String>,
    #[serde(default)]
    pub birthdate: Option<ParsedDate>,
    #[serde(default)]
    pub position: Option<String>,
    #[serde(default)]
    pub experience: Vec<Experience>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ParsedName {
    pub first: Option<String>,
    pub last: Option<String>,
    pub middle: Option<String>,
}

#[derive(Debug, Clone, Copy, Default, Deserialize)]
pub struct ParsedDate {
    pub day: Option<u32>,
    pub month: Option<u32>,
    pub year: Option<u32>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct Experience {
    pub position: Option<String>,
    pub company: Option<String>,
}

/// Résumé text attached to an applicant
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct External {
    pub data: ExternalData,
    pub auth_type: String,
    pub files: Vec<FileRef>,
    pub account_source: Option<i64>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ExternalData {
    pub body: String,
}

impl External {
    pub fn native(body: impl Into<String>, file: FileRef) -> Self {
        Self {
            data: ExternalData { body: body.into() },
            auth_type: "NATIVE".to_string(),
            files: vec![file],
            account_source: None,
        }
    }
}

/// Body of the create-applicant request
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ApplicantRequest {
    pub last_name: String,
    pub first_name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub middle_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub money: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub position: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub company: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub birthday_day: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub birthday_month: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub birthday_year: Option<u32>,
    /// Photo file id
    #[serde(skip_serializing_if = "Option::is_none")]
    pub photo: Option<i64>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub externals: Vec<External>,
}

impl ApplicantRequest {
    pub fn new(last_name: impl Into<String>, first_name: impl Into<String>) -> Self {
        Self {
            last_name: last_name.into(),
            first_name: first_name.into(),
            ..Self::default()
        }
    }
}

/// Body of the attach-to-vacancy request
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct VacancyLinkRequest {
    pub vacancy: i64,
    pub status: i64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub comment: Option<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub files: Vec<FileRef>,
}

/// `{ "id": ... }` returned by create endpoints
#[derive(Debug, Clone, Copy, Deserialize)]
pub struct Created {
    pub id: i64,
}
