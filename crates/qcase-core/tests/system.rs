//! End-to-end behaviour of an assembled system

use chrono::NaiveDate;
use pretty_assertions::assert_eq;
use qcase_core::{CaseConfig, CaseSystem, Importer, TransactionDraft};
use qcase_model::{Actor, Role, SampleStatus, Sector};
use qcase_test_utils::{admin, inspector, key};

fn draft(port: &str, sector: Sector, declaration: &str) -> TransactionDraft {
    TransactionDraft::new(
        key(port),
        sector,
        NaiveDate::from_ymd_opt(2025, 5, 20).unwrap(),
        declaration,
        "CR-100",
    )
}

async fn seeded(config: CaseConfig) -> CaseSystem {
    let system = CaseSystem::from_config(config).await.unwrap();
    system
        .importers()
        .insert(Importer::new("CR-100", "Gulf Foods"))
        .unwrap();
    system
}

#[tokio::test]
async fn file_backed_counters_survive_restart() -> anyhow::Result<()> {
    let tmp = tempfile::tempdir()?;
    let config = CaseConfig::default().with_file_storage(tmp.path().join("counters"));

    {
        let system = seeded(config.clone()).await;
        for n in 1..=3 {
            system
                .intake()
                .submit(&admin(), draft("sohar_port", Sector::Agricultural, &format!("CD-{n}")))
                .await?;
        }
    }

    let system = seeded(config).await;
    let receipt = system
        .intake()
        .submit(&admin(), draft("sohar_port", Sector::Agricultural, "CD-4"))
        .await?;
    assert_eq!(receipt.transaction_number.as_str(), "SOH-AGRI-00004");
    Ok(())
}

#[tokio::test]
async fn dashboards_follow_permissions() -> anyhow::Result<()> {
    let system = seeded(CaseConfig::default()).await;
    let intake = system.intake();
    let mut rejected = draft("sohar_port", Sector::Agricultural, "CD-1");
    rejected.final_action = "reject".to_string();
    rejected.fees = 12.5;
    intake.submit(&admin(), rejected).await?;
    intake
        .submit(&admin(), draft("sohar_port", Sector::Veterinary, "CD-2"))
        .await?;
    intake
        .submit(&admin(), draft("salalah_port", Sector::Agricultural, "CD-3"))
        .await?;

    let board = system.dashboard(&admin());
    assert_eq!(board.stats.total, 3);
    let breakdown = board.breakdown.unwrap();
    assert_eq!(breakdown.by_sector[&Sector::Agricultural].total, 2);
    assert_eq!(breakdown.by_entry_point["ميناء صحار"].rejected, 1);

    let actor = inspector(&["sohar_port"], &[Sector::Agricultural]);
    let board = system.dashboard(&actor);
    assert_eq!(board.stats.total, 1);
    assert_eq!(board.stats.rejected, 1);
    assert!((board.stats.total_fees - 12.5).abs() < f64::EPSILON);
    assert!(board.breakdown.is_none());
    Ok(())
}

#[tokio::test]
async fn live_view_tracks_submissions_and_renames() -> anyhow::Result<()> {
    let system = seeded(CaseConfig::default()).await;
    let actor = inspector(&["sohar_port"], &[Sector::Agricultural]);
    let mut view = system.live_view(actor);
    assert!(view.current()?.is_empty());

    system
        .intake()
        .submit(&admin(), draft("sohar_port", Sector::Agricultural, "CD-1"))
        .await?;
    view.changed().await?;
    assert_eq!(view.current()?.len(), 1);

    system
        .admin()
        .rename_entry_point(&admin(), &key("sohar_port"), "Sohar Industrial Port")?;
    view.changed().await?;
    assert!(view.current()?.is_empty());
    Ok(())
}

#[tokio::test]
async fn laboratory_flow_and_public_tracking() -> anyhow::Result<()> {
    let system = seeded(CaseConfig::default()).await;
    let receipt = system
        .intake()
        .submit(
            &admin(),
            draft("muscat_airport", Sector::FoodSafety, "CD-77").with_sample("Central Lab"),
        )
        .await?;

    let lab = Actor::new("lab-1", "Analyst")
        .with_role(Role::Laboratory)
        .with_laboratory("Central Lab");
    let queue = system.laboratory_queue(&lab);
    assert_eq!(queue.len(), 1);
    assert_eq!(queue[0].id, receipt.record_id);

    system.ledger().update_lab_result(&receipt.record_id, "negative")?;

    let tracked = system.track(" CD-77 ").unwrap();
    let sample = tracked.sample.unwrap();
    assert_eq!(sample.sample_number, "MCT-FOOD-SAMPLE-00001");
    assert_eq!(sample.status, SampleStatus::Complete);
    assert_eq!(sample.lab_result.as_deref(), Some("negative"));
    assert!(system.track("CD-78").is_none());
    Ok(())
}
