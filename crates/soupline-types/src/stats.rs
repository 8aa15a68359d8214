use serde::{Deserialize, Serialize};

/// Aggregate figures shown on the landing dashboard.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DashboardStats {
    pub total_donors: usize,
    pub total_donations: usize,
    pub total_monetary: usize,
    pub total_in_kind: usize,
    /// Sum of item quantities, not the number of items.
    pub total_inventory: u64,
    pub total_employees: usize,
    pub active_employees: usize,
}
