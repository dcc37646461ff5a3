//! Supplier Model

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::document::{self, DocumentError, DocumentKind};

/// Supplier record
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Supplier {
    pub id: Uuid,
    pub company_id: Uuid,
    pub name: String,
    /// CPF or CNPJ, digits only
    pub document: String,
    pub address: Option<String>,
    pub phone: Option<String>,
    pub email: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: Option<DateTime<Utc>>,
}

impl Supplier {
    pub fn document_kind(&self) -> Option<DocumentKind> {
        document::document_kind(&self.document)
    }

    pub fn formatted_document(&self) -> String {
        document::format_document(&self.document)
    }

    pub fn matches(&self, term: &str) -> bool {
        super::matches_search(&self.name, &self.document, self.email.as_deref(), term)
    }
}

/// Create supplier payload
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SupplierCreate {
    pub company_id: Uuid,
    pub name: String,
    pub document: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
}

impl SupplierCreate {
    /// Run the same field checks the backend applies.
    pub fn validate(&self) -> Result<(), DocumentError> {
        if !document::validate_document(&self.document) {
            return Err(DocumentError::InvalidDocument);
        }
        document::validate_contact(self.email.as_deref(), self.phone.as_deref())
    }
}

/// Update supplier payload
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SupplierUpdate {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub document: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
}

impl SupplierUpdate {
    pub fn validate(&self) -> Result<(), DocumentError> {
        if let Some(doc) = self.document.as_deref() {
            if !document::validate_document(doc) {
                return Err(DocumentError::InvalidDocument);
            }
        }
        document::validate_contact(self.email.as_deref(), self.phone.as_deref())
    }
}
