use chrono::NaiveDate;
use serde::Deserialize;
use uuid::Uuid;

use super::{require, Assets, DocumentForm, DocumentKind};
use crate::error::DocError;
use crate::model::{Align, Block, TableColumn, Weight};
use crate::records::{ClaimRecord, CompanyRecord};

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct ReceiptItem {
    pub description: String,
    pub quantity: f64,
    pub unit_price: f64,
}

impl ReceiptItem {
    pub fn amount(&self) -> f64 {
        self.quantity * self.unit_price
    }
}

/// Payment receipt. `receipt_number` names the file.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct ReceiptForm {
    pub receipt_number: String,
    pub date: String,
    pub company_name: String,
    pub company_address: String,
    pub company_phone: String,
    pub company_email: String,
    pub client_name: String,
    pub client_address: String,
    pub client_phone: String,
    pub client_email: String,
    pub items: Vec<ReceiptItem>,
}

/// `RCT-` followed by eight uppercase hex digits.
pub fn new_receipt_number() -> String {
    let id = Uuid::new_v4().simple().to_string();
    format!("RCT-{}", id[..8].to_uppercase())
}

fn money(value: f64) -> String {
    format!("${:.2}", value)
}

fn quantity(value: f64) -> String {
    if value.fract() == 0.0 {
        format!("{}", value as i64)
    } else {
        format!("{}", value)
    }
}

impl ReceiptForm {
    pub fn prefill(claim: &ClaimRecord, company: Option<&CompanyRecord>, today: NaiveDate) -> Self {
        let mut form = Self {
            receipt_number: new_receipt_number(),
            date: today.format("%m/%d/%Y").to_string(),
            client_name: claim.homeowner_name(),
            client_address: claim.property_address.clone(),
            client_phone: claim.homeowner_phone.clone(),
            client_email: claim.homeowner_email.clone(),
            ..Self::default()
        };
        if let Some(company) = company {
            form.company_name = company.name.clone();
            form.company_address = company.address.clone();
            form.company_phone = company.phone.clone();
            form.company_email = company.email.clone();
        }
        form
    }

    pub fn total(&self) -> f64 {
        self.items.iter().map(ReceiptItem::amount).sum()
    }
}

impl DocumentForm for ReceiptForm {
    const KIND: DocumentKind = DocumentKind::Receipt;

    fn identifier(&self) -> Result<&str, DocError> {
        require(&self.receipt_number, "receipt number")
    }

    fn blocks<'a>(&'a self, assets: &'a Assets) -> Vec<Block<'a>> {
        let parties = vec![
            vec![self.company_name.clone(), self.client_name.clone()],
            vec![self.company_address.clone(), self.client_address.clone()],
            vec![self.company_phone.clone(), self.client_phone.clone()],
            vec![self.company_email.clone(), self.client_email.clone()],
        ];
        let items = self
            .items
            .iter()
            .map(|item| {
                vec![
                    item.description.clone(),
                    quantity(item.quantity),
                    money(item.unit_price),
                    money(item.amount()),
                ]
            })
            .collect();

        let mut blocks = assets.letterhead();
        blocks.extend([
            Block::centered_heading("RECEIPT", 24.0),
            Block::Spacer(6.0),
            Block::styled(
                format!("Receipt #: {}", self.receipt_number),
                10.0,
                Weight::Regular,
                Align::Center,
            ),
            Block::styled(format!("Date: {}", self.date), 10.0, Weight::Regular, Align::Center),
            Block::Spacer(24.0),
            Block::Table {
                columns: vec![TableColumn::new("From:", 266.0), TableColumn::new("To:", 266.0)],
                rows: parties,
                size: 10.0,
            },
            Block::Spacer(24.0),
            Block::KeepRoom(60.0),
            Block::heading("Items / Services", 12.0),
            Block::Spacer(6.0),
            Block::Table {
                columns: vec![
                    TableColumn::new("Description", 250.0),
                    TableColumn::new("Qty", 80.0).align(Align::Right),
                    TableColumn::new("Price", 80.0).align(Align::Right),
                    TableColumn::new("Amount", 122.0).align(Align::Right),
                ],
                rows: items,
                size: 10.0,
            },
            Block::Spacer(6.0),
            Block::KeepRoom(40.0),
            Block::Rule {
                thickness: 2.0,
                width: Some(200.0),
            },
            Block::styled(
                format!("TOTAL: {}", money(self.total())),
                14.0,
                Weight::Bold,
                Align::Right,
            ),
        ]);
        blocks
    }
}
