//! Claim and company records, and the key-based store they come from.

use std::path::Path;

use serde::Deserialize;

use crate::error::DocError;

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct CompanyRecord {
    pub id: String,
    pub name: String,
    pub address: String,
    pub phone: String,
    pub email: String,
    pub license: String,
    /// File path or URL of the uploaded logo.
    pub logo_url: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct ClaimRecord {
    pub id: String,
    pub company_id: String,
    pub claim_number: String,
    pub stage: String,
    pub homeowner_first_name: String,
    pub homeowner_last_name: String,
    pub homeowner_phone: String,
    pub homeowner_email: String,
    pub property_address: String,
    pub insurance_company: String,
    pub policy_number: String,
    pub adjuster_name: String,
    pub date_of_loss: Option<String>,
}

impl ClaimRecord {
    pub fn homeowner_name(&self) -> String {
        format!("{} {}", self.homeowner_first_name, self.homeowner_last_name)
            .trim()
            .to_string()
    }
}

/// Read access to the hosted records.
pub trait ClaimStore {
    fn claim(&self, id: &str) -> Result<Option<ClaimRecord>, DocError>;
    fn company(&self, id: &str) -> Result<Option<CompanyRecord>, DocError>;

    /// A claim together with the company that owns it.
    fn claim_with_company(&self, id: &str) -> Result<(ClaimRecord, Option<CompanyRecord>), DocError> {
        let claim = self
            .claim(id)?
            .ok_or_else(|| DocError::Store(format!("no claim with id {}", id)))?;
        let company = if claim.company_id.is_empty() {
            None
        } else {
            self.company(&claim.company_id)?
        };
        Ok((claim, company))
    }
}

/// Records exported to a JSON file: `{"companies": [...], "claims": [...]}`.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct JsonStore {
    companies: Vec<CompanyRecord>,
    claims: Vec<ClaimRecord>,
}

impl JsonStore {
    pub fn open(path: &Path) -> Result<Self, DocError> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| DocError::Store(format!("{}: {}", path.display(), e)))?;
        Self::from_json(&content)
    }

    pub fn from_json(content: &str) -> Result<Self, DocError> {
        Ok(serde_json::from_str(content)?)
    }
}

impl ClaimStore for JsonStore {
    fn claim(&self, id: &str) -> Result<Option<ClaimRecord>, DocError> {
        Ok(self.claims.iter().find(|c| c.id == id).cloned())
    }

    fn company(&self, id: &str) -> Result<Option<CompanyRecord>, DocError> {
        Ok(self.companies.iter().find(|c| c.id == id).cloned())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const DATA: &str = r#"{
        "companies": [{"id": "co-1", "name": "Summit Roofing", "license": "RC-2291"}],
        "claims": [
            {"id": "cl-1", "company_id": "co-1", "claim_number": "CLM-1001",
             "homeowner_first_name": "Jordan", "homeowner_last_name": "Price",
             "property_address": "12 Elm St"},
            {"id": "cl-2", "claim_number": "CLM-1002"}
        ]
    }"#;

    #[test]
    fn finds_claim_and_company() {
        let store = JsonStore::from_json(DATA).unwrap();
        let (claim, company) = store.claim_with_company("cl-1").unwrap();
        assert_eq!(claim.claim_number, "CLM-1001");
        assert_eq!(claim.homeowner_name(), "Jordan Price");
        assert_eq!(company.unwrap().license, "RC-2291");
    }

    #[test]
    fn claim_without_company() {
        let store = JsonStore::from_json(DATA).unwrap();
        let (claim, company) = store.claim_with_company("cl-2").unwrap();
        assert_eq!(claim.homeowner_name(), "");
        assert!(company.is_none());
    }

    #[test]
    fn unknown_claim_is_an_error() {
        let store = JsonStore::from_json(DATA).unwrap();
        assert!(matches!(store.claim_with_company("nope"), Err(DocError::Store(_))));
        assert!(matches!(JsonStore::from_json("{"), Err(DocError::Json(_))));
    }
}
