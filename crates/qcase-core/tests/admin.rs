//! Confirmation-gated administration

use qcase_core::{CaseConfig, CaseError, CaseSystem, Importer};
use qcase_model::{Actor, ActorId, EntryPointOption, Role, Sector};
use qcase_test_utils::{admin, inspector, key, record};

async fn system() -> CaseSystem {
    let system = CaseSystem::from_config(CaseConfig::default()).await.unwrap();
    system.roster().insert(admin());
    system
        .roster()
        .insert(Actor::new("u-2", "Salim").with_role(Role::DataEntry));
    system
}

#[tokio::test]
async fn deletion_waits_for_confirmation() {
    let system = system().await;
    let console = system.admin();
    let target = ActorId::new("u-2");

    console.delete_user(&admin(), &target).unwrap();
    assert!(system.roster().contains(&target));
    let pending = system.gate().pending().unwrap();
    assert!(pending.message.contains("Salim"));

    assert!(system.gate().confirm());
    assert!(!system.roster().contains(&target));
}

#[tokio::test]
async fn cancelled_deletion_keeps_the_user() {
    let system = system().await;
    let target = ActorId::new("u-2");

    system.admin().delete_user(&admin(), &target).unwrap();
    assert!(system.gate().cancel());
    assert!(!system.gate().confirm());
    assert!(system.roster().contains(&target));
}

#[tokio::test]
async fn only_the_latest_request_fires() {
    let system = system().await;
    let console = system.admin();
    let importer = system
        .importers()
        .insert(Importer::new("CR-1", "Acme"))
        .unwrap();

    console.delete_user(&admin(), &ActorId::new("u-2")).unwrap();
    console.delete_importer(&admin(), &importer).unwrap();
    assert!(system.gate().confirm());

    assert!(system.roster().contains(&ActorId::new("u-2")));
    assert!(system.importers().get(&importer).is_none());
}

#[tokio::test]
async fn non_admins_and_self_deletion_are_refused() {
    let system = system().await;
    let console = system.admin();
    let clerk = Actor::new("u-2", "Salim").with_role(Role::DataEntry);

    let err = console
        .delete_user(&clerk, &admin().identity)
        .unwrap_err();
    assert!(matches!(err, CaseError::PermissionDenied(_)));

    let err = console
        .delete_user(&admin(), &admin().identity)
        .unwrap_err();
    assert!(matches!(err, CaseError::SelfDeletion));

    let err = console
        .delete_user(&admin(), &ActorId::new("ghost"))
        .unwrap_err();
    assert!(matches!(err, CaseError::NotFound { kind: "user", .. }));

    assert!(!system.gate().is_open());
}

#[tokio::test]
async fn entry_point_removal_is_gated() {
    let system = system().await;
    let console = system.admin();

    console
        .add_entry_point(&admin(), EntryPointOption::new("duqm_port", "ميناء الدقم").unwrap())
        .unwrap();
    console.remove_entry_point(&admin(), &key("duqm_port")).unwrap();
    assert!(system.directory().display_value(&key("duqm_port")).is_some());

    system.gate().confirm();
    assert!(system.directory().display_value(&key("duqm_port")).is_none());

    let err = console
        .remove_entry_point(&admin(), &key("duqm_port"))
        .unwrap_err();
    assert!(matches!(err, CaseError::NotFound { .. }));
}

#[tokio::test]
async fn renaming_an_entry_point_hides_existing_records() {
    let system = system().await;
    system
        .ledger()
        .insert(record("r-1", Sector::Agricultural, "ميناء صحار"))
        .unwrap();
    let actor = inspector(&["sohar_port"], &[Sector::Agricultural]);
    assert_eq!(system.visible_transactions(&actor).len(), 1);

    let old = system
        .admin()
        .rename_entry_point(&admin(), &key("sohar_port"), "ميناء صحار الصناعي")
        .unwrap();

    assert_eq!(old, "ميناء صحار");
    assert!(system.visible_transactions(&actor).is_empty());
    assert_eq!(system.visible_transactions(&admin()).len(), 1);

    let err = system
        .admin()
        .rename_entry_point(&actor, &key("sohar_port"), "x")
        .unwrap_err();
    assert!(matches!(err, CaseError::PermissionDenied(_)));
}

#[tokio::test]
async fn commodity_group_deletion_is_gated() {
    let system = system().await;
    let console = system.admin();
    console.add_commodity_group(&admin(), "Fruits").unwrap();
    console.add_commodity(&admin(), "Fruits", "Dates").unwrap();
    console.add_commodity(&admin(), "Fruits", "Mango").unwrap();

    console.delete_commodity_group(&admin(), "Fruits").unwrap();
    assert!(system.catalog().get("Fruits").is_some());
    assert!(system.gate().pending().unwrap().message.contains("2 commodities"));

    assert!(system.gate().confirm());
    assert!(system.catalog().get("Fruits").is_none());
}

#[tokio::test]
async fn commodity_deletion_waits_and_can_be_cancelled() {
    let system = system().await;
    let console = system.admin();
    console.add_commodity_group(&admin(), "Grains").unwrap();
    console.add_commodity(&admin(), "Grains", "Rice").unwrap();

    console.delete_commodity(&admin(), "Grains", "Rice").unwrap();
    assert!(system.gate().cancel());
    assert!(system.catalog().contains("Grains", "Rice"));

    console.delete_commodity(&admin(), "Grains", "Rice").unwrap();
    assert!(system.gate().confirm());
    assert!(!system.catalog().contains("Grains", "Rice"));
    assert!(system.catalog().get("Grains").is_some());
}

#[tokio::test]
async fn commodity_deletions_check_role_and_existence() {
    let system = system().await;
    let console = system.admin();
    console.add_commodity_group(&admin(), "Fruits").unwrap();
    let clerk = inspector(&["sohar_port"], &[Sector::Agricultural]);

    assert!(matches!(
        console.delete_commodity_group(&clerk, "Fruits"),
        Err(CaseError::PermissionDenied(_))
    ));
    assert!(matches!(
        console.add_commodity(&clerk, "Fruits", "Dates"),
        Err(CaseError::PermissionDenied(_))
    ));
    assert!(matches!(
        console.delete_commodity_group(&admin(), "Spices"),
        Err(CaseError::NotFound { .. })
    ));
    assert!(matches!(
        console.delete_commodity(&admin(), "Fruits", "Dates"),
        Err(CaseError::NotFound { .. })
    ));
    assert!(!system.gate().is_open());
}
