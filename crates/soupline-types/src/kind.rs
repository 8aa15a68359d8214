use std::fmt;

use serde::{Deserialize, Serialize};

/// The four record collections, each persisted under its own key.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EntityKind {
    Donors,
    Donations,
    Inventory,
    Employees,
}

impl EntityKind {
    pub const ALL: [EntityKind; 4] = [
        EntityKind::Donors,
        EntityKind::Donations,
        EntityKind::Inventory,
        EntityKind::Employees,
    ];

    /// Storage key for the collection.
    pub fn key(&self) -> &'static str {
        match self {
            Self::Donors => "donors",
            Self::Donations => "donations",
            Self::Inventory => "inventory",
            Self::Employees => "employees",
        }
    }

    /// Singular noun for messages.
    pub fn noun(&self) -> &'static str {
        match self {
            Self::Donors => "donor",
            Self::Donations => "donation",
            Self::Inventory => "inventory item",
            Self::Employees => "employee",
        }
    }
}

impl fmt::Display for EntityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}
