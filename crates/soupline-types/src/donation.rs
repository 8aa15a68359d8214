use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::error::{ValidationError, ValidationResult};
use crate::id::RecordId;
use crate::validate::{non_blank, require_non_negative, Validate};

/// Whether a donation is money or goods.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum DonationKind {
    Monetary,
    /// Goods rather than money; produces an inventory entry.
    InKind,
}

/// How a monetary donation was paid.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PaymentMethod {
    #[default]
    Cash,
    Transfer,
    Check,
    Other,
}

/// User-editable status. The synchronizer does not react to it.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DonationStatus {
    #[default]
    Pending,
    Completed,
    Cancelled,
}

/// A single monetary or in-kind contribution, linked to a donor by id.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Donation {
    pub id: RecordId,
    pub donor_id: RecordId,
    pub date: NaiveDate,
    pub kind: DonationKind,
    /// Currency value for monetary donations, unit count for in-kind ones.
    pub amount: f64,
    /// Required when `kind` is in-kind.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub product_category: Option<String>,
    #[serde(default)]
    pub method: PaymentMethod,
    #[serde(default)]
    pub status: DonationStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

impl Donation {
    pub fn is_in_kind(&self) -> bool {
        self.kind == DonationKind::InKind
    }

    /// The product category, ignoring blank values.
    pub fn category(&self) -> Option<&str> {
        non_blank(self.product_category.as_deref())
    }

    /// The description, ignoring blank values.
    pub fn description_text(&self) -> Option<&str> {
        non_blank(self.description.as_deref())
    }

    /// Number of units for in-kind donations.
    ///
    /// Validation guarantees in-kind amounts are whole and non-negative.
    pub fn unit_count(&self) -> u64 {
        if self.amount.is_finite() && self.amount > 0.0 {
            self.amount.round() as u64
        } else {
            0
        }
    }
}

/// Payload for recording a new donation.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct NewDonation {
    pub donor_id: RecordId,
    pub date: NaiveDate,
    pub kind: DonationKind,
    pub amount: f64,
    #[serde(default)]
    pub product_category: Option<String>,
    #[serde(default)]
    pub method: PaymentMethod,
    #[serde(default)]
    pub status: DonationStatus,
    #[serde(default)]
    pub description: Option<String>,
}

impl NewDonation {
    pub fn into_donation(self, id: RecordId) -> Donation {
        Donation {
            id,
            donor_id: self.donor_id,
            date: self.date,
            kind: self.kind,
            amount: self.amount,
            product_category: self.product_category,
            method: self.method,
            status: self.status,
            description: self.description,
        }
    }
}

/// Largest in-kind unit count. Every whole `f64` up to here is exact.
pub const MAX_UNIT_COUNT: f64 = 9_007_199_254_740_992.0;

fn check(kind: DonationKind, amount: f64, category: Option<&str>) -> ValidationResult<()> {
    require_non_negative("amount", amount)?;
    if kind == DonationKind::InKind {
        if non_blank(category).is_none() {
            return Err(ValidationError::MissingField("product_category"));
        }
        if amount.fract() != 0.0 {
            return Err(ValidationError::InvalidValue {
                field: "amount",
                reason: format!("in-kind amount must be a whole unit count (got {amount})"),
            });
        }
        if amount > MAX_UNIT_COUNT {
            return Err(ValidationError::InvalidValue {
                field: "amount",
                reason: format!("in-kind amount must not exceed {MAX_UNIT_COUNT} units"),
            });
        }
    }
    Ok(())
}

impl Validate for NewDonation {
    fn validate(&self) -> ValidationResult<()> {
        check(self.kind, self.amount, self.product_category.as_deref())
    }
}

impl Validate for Donation {
    fn validate(&self) -> ValidationResult<()> {
        check(self.kind, self.amount, self.product_category.as_deref())
    }
}
