use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::ValidationResult;
use crate::id::RecordId;
use crate::validate::{require_text, Validate};

/// An individual or organization contributing to the kitchen.
///
/// A donor's donation history is not stored on the record. It is derived
/// from the donation collection by `donor_id`.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Donor {
    pub id: RecordId,
    pub full_name: String,
    #[serde(default)]
    pub address: String,
    #[serde(default)]
    pub phone: String,
    pub email: String,
    /// Set at creation; never changed by an update.
    #[serde(default = "Utc::now")]
    pub registered_at: DateTime<Utc>,
}

/// Payload for registering a new donor.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct NewDonor {
    pub full_name: String,
    #[serde(default)]
    pub address: String,
    #[serde(default)]
    pub phone: String,
    pub email: String,
}

impl NewDonor {
    /// Build the stored record with a freshly assigned id.
    pub fn into_donor(self, id: RecordId, registered_at: DateTime<Utc>) -> Donor {
        Donor {
            id,
            full_name: self.full_name,
            address: self.address,
            phone: self.phone,
            email: self.email,
            registered_at,
        }
    }
}

fn check(full_name: &str, email: &str) -> ValidationResult<()> {
    require_text("full_name", full_name)?;
    require_text("email", email)
}

impl Validate for NewDonor {
    fn validate(&self) -> ValidationResult<()> {
        check(&self.full_name, &self.email)
    }
}

impl Validate for Donor {
    fn validate(&self) -> ValidationResult<()> {
        check(&self.full_name, &self.email)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ValidationError;

    fn ana() -> NewDonor {
        NewDonor {
            full_name: "Ana Torres".into(),
            address: "Calle 5".into(),
            phone: "555-0100".into(),
            email: "ana@example.org".into(),
        }
    }

    #[test]
    fn valid_donor_passes() {
        assert!(ana().validate().is_ok());
    }

    #[test]
    fn name_is_required() {
        let donor = NewDonor { full_name: "  ".into(), ..ana() };
        assert_eq!(donor.validate(), Err(ValidationError::MissingField("full_name")));
    }

    #[test]
    fn email_is_required() {
        let donor = NewDonor { email: String::new(), ..ana() };
        assert_eq!(donor.validate(), Err(ValidationError::MissingField("email")));
    }

    #[test]
    fn address_and_phone_are_optional() {
        let donor = NewDonor { address: String::new(), phone: String::new(), ..ana() };
        assert!(donor.validate().is_ok());
    }

    #[test]
    fn into_donor_keeps_fields() {
        let id = RecordId::new();
        let now = Utc::now();
        let donor = ana().into_donor(id, now);
        assert_eq!(donor.id, id);
        assert_eq!(donor.full_name, "Ana Torres");
        assert_eq!(donor.registered_at, now);
    }

    #[test]
    fn missing_optional_fields_deserialize() {
        let json = r#"{"full_name":"Ana","email":"a@b.c"}"#;
        let donor: NewDonor = serde_json::from_str(json).unwrap();
        assert!(donor.address.is_empty());
        assert!(donor.phone.is_empty());
    }
}
