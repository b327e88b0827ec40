use serde::Deserialize;

use super::{require, Assets, DocumentForm, DocumentKind};
use crate::error::DocError;
use crate::model::{Align, Block, Weight};
use crate::records::ClaimRecord;

/// Most photos one report may carry.
pub const MAX_PHOTOS: usize = 250;

const PHOTO_COLUMNS: usize = 2;
const PHOTO_SPACING: f32 = 20.0;
/// Two photos across a 532pt content area, 4:3.
const PHOTO_WIDTH: f32 = 256.0;
const PHOTO_HEIGHT: f32 = PHOTO_WIDTH * 0.75;

const SECTION_SIZE: f32 = 18.0;
const BODY_SIZE: f32 = 11.0;

/// Loss Assessment Report. `claim_number` names the file.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct LossAssessmentForm {
    pub claim_number: String,
    pub homeowner_name: String,
    pub property_address: String,
    pub cover_letter: String,
    pub video_links: Vec<String>,
    pub measurements: String,
    pub material_tests: String,
    pub engineer_reports: String,
    pub estimate: String,
    pub builder_codes: String,
}

impl LossAssessmentForm {
    pub fn prefill(claim: &ClaimRecord) -> Self {
        Self {
            claim_number: claim.claim_number.clone(),
            homeowner_name: claim.homeowner_name(),
            property_address: claim.property_address.clone(),
            ..Self::default()
        }
    }

    fn section<'a>(blocks: &mut Vec<Block<'a>>, title: &str, body: &str) {
        if body.trim().is_empty() {
            return;
        }
        blocks.extend([
            Block::KeepRoom(SECTION_SIZE + 40.0),
            Block::heading(title, SECTION_SIZE),
            Block::Spacer(6.0),
            Block::paragraph(body, BODY_SIZE),
            Block::Spacer(24.0),
        ]);
    }
}

impl DocumentForm for LossAssessmentForm {
    const KIND: DocumentKind = DocumentKind::LossAssessment;

    fn identifier(&self) -> Result<&str, DocError> {
        require(&self.claim_number, "claim number")
    }

    fn validate(&self, assets: &Assets) -> Result<(), DocError> {
        if assets.photos.len() > MAX_PHOTOS {
            return Err(DocError::TooManyPhotos {
                count: assets.photos.len(),
                max: MAX_PHOTOS,
            });
        }
        Ok(())
    }

    fn blocks<'a>(&'a self, assets: &'a Assets) -> Vec<Block<'a>> {
        let mut blocks = assets.letterhead();
        blocks.extend([
            Block::heading("LOSS ASSESSMENT REPORT", 24.0),
            Block::Spacer(10.0),
            Block::styled(format!("Claim Number: {}", self.claim_number), 12.0, Weight::Bold, Align::Left),
            Block::styled(format!("Homeowner: {}", self.homeowner_name), 12.0, Weight::Bold, Align::Left),
            Block::styled(format!("Property: {}", self.property_address), 12.0, Weight::Bold, Align::Left),
            Block::Spacer(24.0),
        ]);

        Self::section(&mut blocks, "1. Cover Letter", &self.cover_letter);

        let links: Vec<String> = self
            .video_links
            .iter()
            .map(|l| l.trim())
            .filter(|l| !l.is_empty())
            .enumerate()
            .map(|(i, l)| format!("{}. {}", i + 1, l))
            .collect();
        Self::section(&mut blocks, "2. Video Links", &links.join("\n"));

        Self::section(&mut blocks, "3. Measurements", &self.measurements);
        Self::section(&mut blocks, "4. Material Tests", &self.material_tests);
        Self::section(&mut blocks, "5. Engineer Reports", &self.engineer_reports);
        Self::section(&mut blocks, "6. Estimate", &self.estimate);

        if !assets.photos.is_empty() {
            blocks.extend([
                Block::PageBreak,
                Block::heading("7. Photos", SECTION_SIZE),
                Block::Spacer(10.0),
                Block::ImageGrid {
                    items: assets.photo_refs(),
                    columns: PHOTO_COLUMNS,
                    cell_width: PHOTO_WIDTH,
                    cell_height: PHOTO_HEIGHT,
                    spacing: PHOTO_SPACING,
                },
                Block::PageBreak,
            ]);
        }

        Self::section(&mut blocks, "8. Builder Codes", &self.builder_codes);
        blocks
    }
}
