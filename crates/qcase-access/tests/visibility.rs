//! Visibility over a realistic ledger, including the rename hazard

use pretty_assertions::assert_eq;
use proptest::prelude::*;
use qcase_access::{laboratory_queue, orphaned, visible, Scope};
use qcase_model::{Actor, EntryPointReference, Role, Sector, TransactionRecord};
use qcase_test_utils::{admin, inspector, key, record, reference, with_sample};

const SOHAR: &str = "ميناء صحار";
const SALALAH: &str = "ميناء صلالة";

fn ledger() -> Vec<TransactionRecord> {
    vec![
        record("1", Sector::Agricultural, SOHAR),
        record("2", Sector::Veterinary, SOHAR),
        record("3", Sector::Agricultural, SALALAH),
        record("4", Sector::FoodSafety, SALALAH),
        record("5", Sector::Agricultural, SOHAR),
    ]
}

fn ids(view: &[&TransactionRecord]) -> Vec<String> {
    view.iter().map(|r| r.id.to_string()).collect()
}

#[test]
fn admin_sees_every_record_in_order() {
    let records = ledger();
    let view = visible(&admin(), &records, &reference());
    assert_eq!(ids(&view), vec!["1", "2", "3", "4", "5"]);
}

#[test]
fn restricted_actor_needs_both_entry_point_and_sector() {
    let records = ledger();
    let actor = inspector(&["sohar_port"], &[Sector::Agricultural]);

    assert_eq!(ids(&visible(&actor, &records, &reference())), vec!["1", "5"]);
}

#[test]
fn multiple_permissions_union_within_each_dimension() {
    let records = ledger();
    let actor = inspector(
        &["sohar_port", "salalah_port"],
        &[Sector::Agricultural, Sector::FoodSafety],
    );

    assert_eq!(
        ids(&visible(&actor, &records, &reference())),
        vec!["1", "3", "4", "5"]
    );
}

#[test]
fn renaming_a_display_value_hides_existing_records() {
    let records = ledger();
    let actor = inspector(&["sohar_port"], &[Sector::Agricultural]);
    let mut reference = reference();
    assert_eq!(visible(&actor, &records, &reference).len(), 2);

    let old = reference
        .rename(&key("sohar_port"), "ميناء صحار الصناعي")
        .unwrap();
    assert_eq!(old, SOHAR);

    // Stored records keep the old value and no longer match any permission
    assert!(visible(&actor, &records, &reference).is_empty());
    assert_eq!(visible(&admin(), &records, &reference).len(), 5);
    assert_eq!(ids(&orphaned(&records, &reference)), vec!["1", "2", "5"]);

    // New records written under the new value are visible again
    let mut records = records;
    records.push(record("6", Sector::Agricultural, "ميناء صحار الصناعي"));
    assert_eq!(ids(&visible(&actor, &records, &reference)), vec!["6"]);
}

#[test]
fn removing_an_entry_point_hides_its_records() {
    let records = ledger();
    let actor = inspector(&["salalah_port"], &[Sector::Agricultural]);
    let mut reference = reference();

    reference.remove(&key("salalah_port"));
    assert!(visible(&actor, &records, &reference).is_empty());
}

#[test]
fn laboratory_queue_follows_sample_assignment() {
    let records = vec![
        with_sample(record("1", Sector::Agricultural, SOHAR), "Central Lab"),
        record("2", Sector::Agricultural, SOHAR),
        with_sample(record("3", Sector::Veterinary, SALALAH), "Vet Lab"),
        with_sample(record("4", Sector::FoodSafety, SALALAH), "Central Lab"),
    ];
    let lab = Actor::new("lab-1", "Analyst")
        .with_role(Role::Laboratory)
        .with_laboratory("Central Lab");

    assert_eq!(ids(&laboratory_queue(&lab, &records)), vec!["1", "4"]);
    assert!(laboratory_queue(&inspector(&[], &[]), &records).is_empty());
}

fn arb_sector() -> impl Strategy<Value = Sector> {
    prop::sample::select(Sector::ALL.to_vec())
}

fn arb_key() -> impl Strategy<Value = &'static str> {
    prop::sample::select(vec![
        "sohar_port",
        "salalah_port",
        "muscat_airport",
        "al_wajajah_border",
    ])
}

proptest! {
    #[test]
    fn visible_is_exactly_the_conjunction(
        allowed_keys in prop::collection::vec(arb_key(), 0..4),
        allowed_sectors in prop::collection::vec(arb_sector(), 0..3),
        rows in prop::collection::vec((arb_key(), arb_sector()), 0..40),
    ) {
        let reference = EntryPointReference::with_defaults();
        let actor = inspector(&allowed_keys, &allowed_sectors);
        let records: Vec<_> = rows
            .iter()
            .enumerate()
            .map(|(i, (k, s))| {
                let value = reference.display_value(&key(k)).unwrap();
                record(&i.to_string(), *s, value)
            })
            .collect();

        let view = visible(&actor, &records, &reference);
        let expected: Vec<_> = records
            .iter()
            .zip(&rows)
            .filter(|(_, (k, s))| allowed_keys.contains(k) && allowed_sectors.contains(s))
            .map(|(r, _)| r)
            .collect();

        prop_assert_eq!(ids(&view), ids(&expected));

        let scope = Scope::for_actor(&actor, &reference);
        for r in &view {
            prop_assert!(scope.admits(*r));
        }
    }
}
