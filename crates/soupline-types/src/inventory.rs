use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::error::ValidationResult;
use crate::id::RecordId;
use crate::validate::{require_text, Validate};

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ItemCondition {
    #[default]
    New,
    Used,
}

/// A stocked good, optionally traceable to the donation that produced it.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct InventoryItem {
    pub id: RecordId,
    pub name: String,
    pub category: String,
    pub quantity: u64,
    pub intake_date: NaiveDate,
    #[serde(default)]
    pub condition: ItemCondition,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Set only for items created from an in-kind donation.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub donation_id: Option<RecordId>,
}

/// Payload for adding a new inventory item.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct NewInventoryItem {
    pub name: String,
    pub category: String,
    pub quantity: u64,
    pub intake_date: NaiveDate,
    #[serde(default)]
    pub condition: ItemCondition,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub donation_id: Option<RecordId>,
}

impl NewInventoryItem {
    pub fn into_item(self, id: RecordId) -> InventoryItem {
        InventoryItem {
            id,
            name: self.name,
            category: self.category,
            quantity: self.quantity,
            intake_date: self.intake_date,
            condition: self.condition,
            description: self.description,
            donation_id: self.donation_id,
        }
    }
}

fn check(name: &str, category: &str) -> ValidationResult<()> {
    require_text("name", name)?;
    require_text("category", category)
}

impl Validate for NewInventoryItem {
    fn validate(&self) -> ValidationResult<()> {
        check(&self.name, &self.category)
    }
}

impl Validate for InventoryItem {
    fn validate(&self) -> ValidationResult<()> {
        check(&self.name, &self.category)
    }
}
