use soupline_store::Collections;
use soupline_types::DashboardStats;

/// Compute dashboard figures from the current collections.
///
/// Pure and uncached: callers recompute on every read, so the result always
/// matches the collections it was given. The inventory total saturates at
/// `u64::MAX`.
pub fn compute(collections: &Collections) -> DashboardStats {
    let total_in_kind = collections.donations.iter().filter(|d| d.is_in_kind()).count();
    DashboardStats {
        total_donors: collections.donors.len(),
        total_donations: collections.donations.len(),
        total_monetary: collections.donations.len() - total_in_kind,
        total_in_kind,
        total_inventory: collections
            .inventory
            .iter()
            .fold(0u64, |total, i| total.saturating_add(i.quantity)),
        total_employees: collections.employees.len(),
        active_employees: collections.employees.iter().filter(|e| e.is_active()).count(),
    }
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;
    use soupline_types::{
        Donation, DonationKind, Employee, EmploymentStatus, InventoryItem, ItemCondition,
        RecordId,
    };

    use super::*;

    fn donation(kind: DonationKind) -> Donation {
        Donation {
            id: RecordId::new(),
            donor_id: RecordId::new(),
            date: NaiveDate::from_ymd_opt(2024, 4, 4).unwrap(),
            kind,
            amount: 3.0,
            product_category: Some("food".into()),
            method: Default::default(),
            status: Default::default(),
            description: None,
        }
    }

    fn item(quantity: u64) -> InventoryItem {
        InventoryItem {
            id: RecordId::new(),
            name: "Oil".into(),
            category: "food".into(),
            quantity,
            intake_date: NaiveDate::from_ymd_opt(2024, 4, 4).unwrap(),
            condition: ItemCondition::New,
            description: None,
            donation_id: None,
        }
    }

    fn employee(status: EmploymentStatus) -> Employee {
        Employee {
            id: RecordId::new(),
            full_name: "E".into(),
            position: "Cook".into(),
            shift: String::new(),
            emergency_contact: String::new(),
            salary: 100.0,
            status,
            hire_date: NaiveDate::from_ymd_opt(2020, 1, 1).unwrap(),
        }
    }

    #[test]
    fn empty_collections_give_zeroes() {
        assert_eq!(compute(&Collections::default()), DashboardStats::default());
    }

    #[test]
    fn counts_and_sums() {
        let collections = Collections {
            donors: vec![],
            donations: vec![
                donation(DonationKind::Monetary),
                donation(DonationKind::InKind),
                donation(DonationKind::InKind),
            ],
            inventory: vec![item(10), item(5), item(0)],
            employees: vec![
                employee(EmploymentStatus::Active),
                employee(EmploymentStatus::OnLeave),
                employee(EmploymentStatus::Inactive),
                employee(EmploymentStatus::Active),
            ],
        };
        let stats = compute(&collections);
        assert_eq!(stats.total_donations, 3);
        assert_eq!(stats.total_monetary, 1);
        assert_eq!(stats.total_in_kind, 2);
        assert_eq!(stats.total_inventory, 15);
        assert_eq!(stats.total_employees, 4);
        assert_eq!(stats.active_employees, 2);
    }

    #[test]
    fn inventory_total_is_quantity_not_item_count() {
        let collections = Collections {
            inventory: vec![item(7)],
            ..Default::default()
        };
        assert_eq!(compute(&collections).total_inventory, 7);
    }

    #[test]
    fn inventory_total_saturates() {
        let collections = Collections {
            inventory: vec![item(u64::MAX), item(u64::MAX), item(3)],
            ..Default::default()
        };
        assert_eq!(compute(&collections).total_inventory, u64::MAX);
    }
}
