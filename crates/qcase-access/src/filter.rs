//! Visibility filter
//!
//! Pure functions from `(actor, records, reference)` to the subset the actor
//! may observe. Input order is preserved.

use crate::scope::Scope;
use qcase_model::{Actor, EntryPointReference, ScopedRecord, Sector, TransactionRecord};

/// Records `actor` may observe
pub fn visible<'a, R: ScopedRecord>(
    actor: &Actor,
    records: &'a [R],
    reference: &EntryPointReference,
) -> Vec<&'a R> {
    let scope = Scope::for_actor(actor, reference);
    if scope.is_empty() {
        return Vec::new();
    }
    records.iter().filter(|r| scope.admits(*r)).collect()
}

/// Visible records in a single sector
pub fn sector_view<'a, R: ScopedRecord>(
    actor: &Actor,
    records: &'a [R],
    reference: &EntryPointReference,
    sector: Sector,
) -> Vec<&'a R> {
    let mut view = visible(actor, records, reference);
    view.retain(|r| r.sector() == sector);
    view
}

/// Records whose display value no longer resolves to any entry point
///
/// These records are hidden from every restricted actor.
pub fn orphaned<'a, R: ScopedRecord>(
    records: &'a [R],
    reference: &EntryPointReference,
) -> Vec<&'a R> {
    let orphans: Vec<_> = records
        .iter()
        .filter(|r| reference.key_for(r.entry_point_display_value()).is_none())
        .collect();
    if !orphans.is_empty() {
        tracing::warn!(
            count = orphans.len(),
            "records reference entry-point display values missing from the reference table"
        );
    }
    orphans
}

/// Records with a sample assigned to `actor`'s laboratory
pub fn laboratory_queue<'a>(
    actor: &Actor,
    records: &'a [TransactionRecord],
) -> Vec<&'a TransactionRecord> {
    let Some(lab) = actor.laboratory_name.as_deref() else {
        return Vec::new();
    };
    records
        .iter()
        .filter(|r| r.laboratory_name() == Some(lab))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use qcase_model::{EntryPointKey, Role};

    #[derive(Debug, PartialEq)]
    struct Rec(u32, Sector, &'static str);

    impl ScopedRecord for Rec {
        fn sector(&self) -> Sector {
            self.1
        }

        fn entry_point_display_value(&self) -> &str {
            self.2
        }
    }

    const SOHAR: &str = "ميناء صحار";
    const SALALAH: &str = "ميناء صلالة";

    fn records() -> Vec<Rec> {
        vec![
            Rec(1, Sector::Agricultural, SOHAR),
            Rec(2, Sector::Veterinary, SOHAR),
            Rec(3, Sector::Agricultural, SALALAH),
            Rec(4, Sector::Agricultural, SOHAR),
            Rec(5, Sector::FoodSafety, "legacy port"),
        ]
    }

    fn ids(view: &[&Rec]) -> Vec<u32> {
        view.iter().map(|r| r.0).collect()
    }

    #[test]
    fn admin_sees_all_in_order() {
        let admin = Actor::new("a", "Admin").with_role(Role::Admin);
        let recs = records();
        let view = visible(&admin, &recs, &EntryPointReference::with_defaults());
        assert_eq!(ids(&view), vec![1, 2, 3, 4, 5]);
    }

    #[test]
    fn restricted_actor_sees_intersection() {
        let actor = Actor::new("i", "Inspector")
            .with_entry_point(EntryPointKey::new("sohar_port").unwrap())
            .with_sector(Sector::Agricultural);
        let recs = records();
        let view = visible(&actor, &recs, &EntryPointReference::with_defaults());
        assert_eq!(ids(&view), vec![1, 4]);
    }

    #[test]
    fn sector_view_narrows_visible() {
        let actor = Actor::new("i", "Inspector")
            .with_entry_point(EntryPointKey::new("sohar_port").unwrap())
            .with_sector(Sector::Agricultural)
            .with_sector(Sector::Veterinary);
        let recs = records();
        let reference = EntryPointReference::with_defaults();

        assert_eq!(ids(&visible(&actor, &recs, &reference)), vec![1, 2, 4]);
        assert_eq!(
            ids(&sector_view(&actor, &recs, &reference, Sector::Veterinary)),
            vec![2]
        );
        assert!(sector_view(&actor, &recs, &reference, Sector::FoodSafety).is_empty());
    }

    #[test]
    fn orphans_are_detected() {
        let recs = records();
        let orphans = orphaned(&recs, &EntryPointReference::with_defaults());
        assert_eq!(ids(&orphans), vec![5]);
    }
}
