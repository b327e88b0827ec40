use chrono::NaiveDate;
use serde::Deserialize;

use super::{require, Assets, DocumentForm, DocumentKind};
use crate::error::DocError;
use crate::model::{Align, Block, Weight};
use crate::records::{ClaimRecord, CompanyRecord};

const PHOTO_COLUMNS: usize = 3;
const PHOTO_WIDTH: f32 = 150.0;
const PHOTO_HEIGHT: f32 = 112.0;
const PHOTO_SPACING: f32 = 20.0;

/// Certificate of Completion. `project_ref` names the file.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct CertificateForm {
    pub company_name: String,
    pub client_name: String,
    pub property_address: String,
    pub project_ref: String,
    pub completion_date: String,
    pub work_description: String,
    pub materials_used: String,
    pub contractor_name: String,
    pub contractor_title: String,
    pub contractor_date: String,
    pub client_signer_name: String,
    pub client_date: String,
}

impl CertificateForm {
    /// Fill in what the claim and company already know.
    pub fn prefill(claim: &ClaimRecord, company: Option<&CompanyRecord>, today: NaiveDate) -> Self {
        let today = today.format("%m/%d/%Y").to_string();
        let homeowner = claim.homeowner_name();
        Self {
            company_name: company.map(|c| c.name.clone()).unwrap_or_default(),
            client_name: homeowner.clone(),
            property_address: claim.property_address.clone(),
            project_ref: claim.claim_number.clone(),
            completion_date: today.clone(),
            contractor_title: "Project Manager".to_string(),
            contractor_date: today.clone(),
            client_signer_name: homeowner,
            client_date: today,
            ..Self::default()
        }
    }

    fn certification_text(&self) -> String {
        format!(
            "This is to certify that {} has successfully completed all work for {} at the property located at {}.",
            or_placeholder(&self.company_name, "[Company Name]"),
            or_placeholder(&self.client_name, "[Client Name]"),
            or_placeholder(&self.property_address, "[Property Address]"),
        )
    }
}

fn or_placeholder<'a>(value: &'a str, placeholder: &'a str) -> &'a str {
    if value.trim().is_empty() {
        placeholder
    } else {
        value
    }
}

impl DocumentForm for CertificateForm {
    const KIND: DocumentKind = DocumentKind::Certificate;

    fn identifier(&self) -> Result<&str, DocError> {
        require(&self.project_ref, "project reference")
    }

    fn blocks<'a>(&'a self, assets: &'a Assets) -> Vec<Block<'a>> {
        let mut blocks = assets.letterhead();
        blocks.extend([
            Block::centered_heading("CERTIFICATE OF COMPLETION", 26.0),
            Block::Spacer(4.0),
            Block::styled(
                "This certifies that the following work has been completed",
                11.0,
                Weight::Italic,
                Align::Center,
            ),
            Block::Spacer(30.0),
            Block::styled(self.certification_text(), 12.0, Weight::Regular, Align::Center),
            Block::Spacer(30.0),
            Block::KeepRoom(80.0),
            Block::heading("Project Details", 14.0),
            Block::Spacer(6.0),
            Block::label_values(
                [
                    ("Project Reference:", self.project_ref.as_str()),
                    ("Completion Date:", self.completion_date.as_str()),
                    ("Work Description:", self.work_description.as_str()),
                    ("Materials Used:", self.materials_used.as_str()),
                ],
                10.0,
            ),
        ]);

        if !assets.photos.is_empty() {
            blocks.extend([
                Block::Spacer(20.0),
                Block::KeepRoom(30.0 + PHOTO_HEIGHT + PHOTO_SPACING),
                Block::heading("Project Photos", 12.0),
                Block::Spacer(8.0),
                Block::ImageGrid {
                    items: assets.photo_refs(),
                    columns: PHOTO_COLUMNS,
                    cell_width: PHOTO_WIDTH,
                    cell_height: PHOTO_HEIGHT,
                    spacing: PHOTO_SPACING,
                },
            ]);
        }

        blocks.extend([
            Block::Spacer(20.0),
            Block::KeepRoom(170.0),
            Block::heading("Signatures", 12.0),
            Block::Spacer(10.0),
            Block::SignatureBlock {
                label: "Contractor".to_string(),
                image: assets.contractor_signature.as_ref(),
                signer_name: self.contractor_name.clone(),
                title: Some(self.contractor_title.clone()),
                date: self.contractor_date.clone(),
            },
            Block::Spacer(20.0),
            Block::SignatureBlock {
                label: "Client".to_string(),
                image: assets.client_signature.as_ref(),
                signer_name: self.client_signer_name.clone(),
                title: None,
                date: self.client_date.clone(),
            },
        ]);
        blocks
    }
}
