//! Order pricing and service-attachment reconciliation.
//!
//! Pure functions over the selection and the live service catalog. The total
//! is recomputed whenever either input changes; it is never cached or stored
//! denormalized, so a catalog price change is reflected immediately.

use std::collections::BTreeSet;

use models::id::EntityId;
use models::service::Service;
use rust_decimal::Decimal;

/// Sum of catalog prices over the selected ids. Ids missing from the catalog
/// contribute zero.
pub fn order_total(selection: &BTreeSet<EntityId>, catalog: &[Service]) -> Decimal {
    catalog.iter().filter(|s| selection.contains(&s.id)).map(|s| s.price).sum()
}

/// Minimal attach/detach calls needed to converge the server-side attached
/// set to the selection.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ReconcilePlan {
    pub to_add: BTreeSet<EntityId>,
    pub to_remove: BTreeSet<EntityId>,
}

impl ReconcilePlan {
    pub fn is_empty(&self) -> bool {
        self.to_add.is_empty() && self.to_remove.is_empty()
    }

    pub fn call_count(&self) -> usize {
        self.to_add.len() + self.to_remove.len()
    }
}

/// Diff the currently attached set against the edited selection.
pub fn plan_reconciliation(
    attached: &BTreeSet<EntityId>,
    selection: &BTreeSet<EntityId>,
) -> ReconcilePlan {
    ReconcilePlan {
        to_add: selection.difference(attached).copied().collect(),
        to_remove: attached.difference(selection).copied().collect(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn service(price: i64) -> Service {
        Service {
            id: EntityId::new(),
            name: "svc".into(),
            price: Decimal::from(price),
            description: None,
            duration_minutes: None,
        }
    }

    fn ids(services: &[&Service]) -> BTreeSet<EntityId> {
        services.iter().map(|s| s.id).collect()
    }

    #[test]
    fn total_sums_selected_prices() {
        let a = service(100);
        let b = service(250);
        let catalog = vec![a.clone(), b.clone()];
        assert_eq!(order_total(&ids(&[&a, &b]), &catalog), Decimal::from(350));
        assert_eq!(order_total(&ids(&[&b]), &catalog), Decimal::from(250));
    }

    #[test]
    fn empty_selection_totals_zero() {
        let catalog = vec![service(100), service(250)];
        assert_eq!(order_total(&BTreeSet::new(), &catalog), Decimal::ZERO);
    }

    #[test]
    fn missing_catalog_entries_contribute_zero() {
        let a = service(100);
        let ghost = service(9999);
        let catalog = vec![a.clone()];
        assert_eq!(order_total(&ids(&[&a, &ghost]), &catalog), Decimal::from(100));
    }

    #[test]
    fn total_tracks_live_catalog_prices() {
        let mut a = service(100);
        let selection = ids(&[&a]);
        assert_eq!(order_total(&selection, &[a.clone()]), Decimal::from(100));
        a.price = Decimal::from(175);
        assert_eq!(order_total(&selection, &[a]), Decimal::from(175));
    }

    #[test]
    fn shrinking_the_selection_plans_one_detach() {
        let a = service(100);
        let b = service(250);
        let attached = ids(&[&a, &b]);
        let selection = ids(&[&b]);
        let plan = plan_reconciliation(&attached, &selection);
        assert!(plan.to_add.is_empty());
        assert_eq!(plan.to_remove, ids(&[&a]));
        assert_eq!(plan.call_count(), 1);
    }

    #[test]
    fn identical_sets_plan_nothing() {
        let a = service(100);
        let b = service(250);
        let attached = ids(&[&a, &b]);
        let plan = plan_reconciliation(&attached, &attached);
        assert!(plan.is_empty());
        assert_eq!(plan.call_count(), 0);
    }

    #[test]
    fn disjoint_sets_replace_everything() {
        let a = service(100);
        let b = service(250);
        let c = service(75);
        let attached = ids(&[&a]);
        let selection = ids(&[&b, &c]);
        let plan = plan_reconciliation(&attached, &selection);
        assert_eq!(plan.to_add, ids(&[&b, &c]));
        assert_eq!(plan.to_remove, ids(&[&a]));
        assert_eq!(plan.call_count(), 3);
    }
}
