use chrono::NaiveDate;
use serde::Deserialize;

use super::{require, Assets, DocumentForm, DocumentKind};
use crate::compose::Style;
use crate::error::DocError;
use crate::model::Block;
use crate::records::{ClaimRecord, CompanyRecord};

const DEFAULT_TERMS: &str = "\
1. The Contractor agrees to perform the work described above in a workmanlike manner.
2. Payment is due upon completion of the work unless otherwise agreed in writing.
3. Any changes to the scope of work must be agreed to in writing by both parties.
4. The Contractor will carry general liability insurance for the duration of the project.";

/// Construction Labor Agreement. `job_reference` names the file.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct AgreementForm {
    pub contractor_company: String,
    pub contractor_address: String,
    pub contractor_phone: String,
    pub contractor_email: String,
    pub contractor_license: String,
    pub client_name: String,
    pub property_address: String,
    pub client_phone: String,
    pub client_email: String,
    pub job_reference: String,
    pub scope_of_work: String,
    pub contract_amount: String,
    pub terms: String,
    pub contractor_signer_name: String,
    pub contractor_date: String,
    pub client_signer_name: String,
    pub client_date: String,
}

impl AgreementForm {
    pub fn prefill(claim: &ClaimRecord, company: Option<&CompanyRecord>, today: NaiveDate) -> Self {
        let today = today.format("%m/%d/%Y").to_string();
        let mut form = Self {
            client_name: claim.homeowner_name(),
            property_address: claim.property_address.clone(),
            client_phone: claim.homeowner_phone.clone(),
            client_email: claim.homeowner_email.clone(),
            job_reference: claim.claim_number.clone(),
            terms: DEFAULT_TERMS.to_string(),
            contractor_date: today.clone(),
            client_signer_name: claim.homeowner_name(),
            client_date: today,
            ..Self::default()
        };
        if let Some(company) = company {
            form.contractor_company = company.name.clone();
            form.contractor_address = company.address.clone();
            form.contractor_phone = company.phone.clone();
            form.contractor_email = company.email.clone();
            form.contractor_license = company.license.clone();
        }
        form
    }

    fn section<'a>(title: &str, rows: Vec<(&str, &str)>) -> [Block<'a>; 5] {
        [
            Block::KeepRoom(60.0),
            Block::heading(title, 12.0),
            Block::Spacer(6.0),
            Block::label_values(rows, 10.0),
            Block::Spacer(14.0),
        ]
    }
}

impl DocumentForm for AgreementForm {
    const KIND: DocumentKind = DocumentKind::Agreement;

    fn identifier(&self) -> Result<&str, DocError> {
        require(&self.job_reference, "job reference")
    }

    fn blocks<'a>(&'a self, assets: &'a Assets) -> Vec<Block<'a>> {
        let mut blocks = assets.letterhead();
        blocks.extend([
            Block::centered_heading("CONSTRUCTION LABOR AGREEMENT", 18.0),
            Block::Spacer(20.0),
        ]);
        blocks.extend(Self::section(
            "Contractor Information",
            vec![
                ("Company:", self.contractor_company.as_str()),
                ("Address:", self.contractor_address.as_str()),
                ("Phone:", self.contractor_phone.as_str()),
                ("Email:", self.contractor_email.as_str()),
                ("License:", self.contractor_license.as_str()),
            ],
        ));
        blocks.extend(Self::section(
            "Client Information",
            vec![
                ("Name:", self.client_name.as_str()),
                ("Property:", self.property_address.as_str()),
                ("Phone:", self.client_phone.as_str()),
                ("Email:", self.client_email.as_str()),
            ],
        ));
        blocks.extend(Self::section(
            "Project Details",
            vec![
                ("Job Reference:", self.job_reference.as_str()),
                ("Scope of Work:", self.scope_of_work.as_str()),
                ("Contract Amount:", self.contract_amount.as_str()),
            ],
        ));

        if !self.terms.trim().is_empty() {
            blocks.extend([
                Block::KeepRoom(60.0),
                Block::heading("Terms and Conditions", 12.0),
                Block::Spacer(6.0),
                Block::paragraph(self.terms.clone(), 10.0),
            ]);
        }

        blocks.extend([
            Block::PageBreak,
            Block::heading("Signatures", 14.0),
            Block::Spacer(14.0),
            Block::SignatureBlock {
                label: "Contractor Signature:".to_string(),
                image: assets.contractor_signature.as_ref(),
                signer_name: self.contractor_signer_name.clone(),
                title: None,
                date: self.contractor_date.clone(),
            },
            Block::Spacer(30.0),
            Block::SignatureBlock {
                label: "Client Signature:".to_string(),
                image: assets.client_signature.as_ref(),
                signer_name: self.client_signer_name.clone(),
                title: None,
                date: self.client_date.clone(),
            },
        ]);
        blocks
    }

    fn style(&self) -> Style {
        Style {
            signature_height: 80.0,
            ..Style::default()
        }
    }
}
