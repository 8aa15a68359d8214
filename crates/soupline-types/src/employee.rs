use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::error::ValidationResult;
use crate::id::RecordId;
use crate::validate::{require_non_negative, require_text, Validate};

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum EmploymentStatus {
    #[default]
    Active,
    Inactive,
    OnLeave,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Employee {
    pub id: RecordId,
    pub full_name: String,
    pub position: String,
    #[serde(default)]
    pub shift: String,
    #[serde(default)]
    pub emergency_contact: String,
    pub salary: f64,
    #[serde(default)]
    pub status: EmploymentStatus,
    pub hire_date: NaiveDate,
}

impl Employee {
    pub fn is_active(&self) -> bool {
        self.status == EmploymentStatus::Active
    }
}

/// Payload for hiring a new employee.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct NewEmployee {
    pub full_name: String,
    pub position: String,
    #[serde(default)]
    pub shift: String,
    #[serde(default)]
    pub emergency_contact: String,
    pub salary: f64,
    #[serde(default)]
    pub status: EmploymentStatus,
    pub hire_date: NaiveDate,
}

impl NewEmployee {
    pub fn into_employee(self, id: RecordId) -> Employee {
        Employee {
            id,
            full_name: self.full_name,
            position: self.position,
            shift: self.shift,
            emergency_contact: self.emergency_contact,
            salary: self.salary,
            status: self.status,
            hire_date: self.hire_date,
        }
    }
}

fn check(full_name: &str, position: &str, salary: f64) -> ValidationResult<()> {
    require_text("full_name", full_name)?;
    require_text("position", position)?;
    require_non_negative("salary", salary)
}

impl Validate for NewEmployee {
    fn validate(&self) -> ValidationResult<()> {
        check(&self.full_name, &self.position, self.salary)
    }
}

impl Validate for Employee {
    fn validate(&self) -> ValidationResult<()> {
        check(&self.full_name, &self.position, self.salary)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ValidationError;

    fn cook() -> NewEmployee {
        NewEmployee {
            full_name: "Luis Gómez".into(),
            position: "Cook".into(),
            shift: "morning".into(),
            emergency_contact: "555-0199".into(),
            salary: 1200.0,
            status: EmploymentStatus::Active,
            hire_date: NaiveDate::from_ymd_opt(2023, 9, 1).unwrap(),
        }
    }

    #[test]
    fn valid_employee_passes() {
        assert!(cook().validate().is_ok());
    }

    #[test]
    fn position_required() {
        let e = NewEmployee { position: "".into(), ..cook() };
        assert_eq!(e.validate(), Err(ValidationError::MissingField("position")));
    }

    #[test]
    fn salary_must_be_non_negative() {
        let e = NewEmployee { salary: -1.0, ..cook() };
        assert!(matches!(e.validate(), Err(ValidationError::InvalidValue { field: "salary", .. })));
        let e = NewEmployee { salary: f64::NAN, ..cook() };
        assert!(e.validate().is_err());
    }

    #[test]
    fn on_leave_wire_name() {
        assert_eq!(serde_json::to_string(&EmploymentStatus::OnLeave).unwrap(), "\"on-leave\"");
    }

    #[test]
    fn only_active_counts_as_active() {
        let mut e = cook().into_employee(RecordId::new());
        assert!(e.is_active());
        e.status = EmploymentStatus::OnLeave;
        assert!(!e.is_active());
    }
}
