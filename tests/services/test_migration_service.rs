use anyhow::Result;
use rung::{
    errors::ResolveError,
    types::{
        StepAction::{Apply, Revert, Skip},
        StepOutcome,
    },
};

use crate::common::{Behavior, Harness, executed, summary};

const M1: &str = "2024-01-01-00-00-00-m1";
const M2: &str = "2024-01-02-00-00-00-m2";
const M3: &str = "2024-01-03-00-00-00-m3";

async fn harness() -> Result<Harness> {
    Harness::new(&[(M1, Behavior::Ok), (M2, Behavior::Ok), (M3, Behavior::Ok)]).await
}

fn is_nothing_to_run(outcomes: &[StepOutcome]) -> bool {
    outcomes == StepOutcome::nothing_to_run().as_slice()
}

#[tokio::test]
async fn test_install_from_empty_history() -> Result<()> {
    let h = harness().await?;

    let outcomes = h.service.install().await?;

    assert_eq!(summary(&outcomes), vec![(Apply, M1), (Apply, M2), (Apply, M3)]);
    assert_eq!(h.latest().await?, M3);
    assert_eq!(h.applied().await?, vec![M1, M2, M3]);
    Ok(())
}

#[tokio::test]
async fn test_install_when_up_to_date() -> Result<()> {
    let h = harness().await?;
    h.service.install().await?;

    let outcomes = h.service.install().await?;

    assert!(is_nothing_to_run(&outcomes));
    assert_eq!(h.log.calls().len(), 3);
    Ok(())
}

#[tokio::test]
async fn test_install_with_empty_registry_fails() -> Result<()> {
    let h = Harness::new(&[]).await?;

    let err = h.service.install().await.unwrap_err();

    assert_eq!(
        err.downcast_ref::<ResolveError>(),
        Some(&ResolveError::EmptyRegistry)
    );
    Ok(())
}

#[tokio::test]
async fn test_install_resumes_from_latest() -> Result<()> {
    let h = harness().await?;
    h.service.up_one().await?;

    let outcomes = h.service.install().await?;

    assert_eq!(
        summary(&outcomes),
        vec![(Skip, M1), (Apply, M2), (Apply, M3)]
    );
    Ok(())
}

#[tokio::test]
async fn test_up_one_steps_through_registry() -> Result<()> {
    let h = harness().await?;

    for expected in [M1, M2, M3] {
        let outcomes = h.service.up_one().await?;
        assert_eq!(executed(&outcomes), vec![(Apply, expected)]);
        assert_eq!(h.latest().await?, expected);
    }
    Ok(())
}

#[tokio::test]
async fn test_up_one_at_last_migration_is_idempotent() -> Result<()> {
    let h = harness().await?;
    h.service.install().await?;

    for _ in 0..3 {
        assert!(is_nothing_to_run(&h.service.up_one().await?));
    }
    assert_eq!(h.log.calls(), vec![
        format!("up:{}", M1),
        format!("up:{}", M2),
        format!("up:{}", M3),
    ]);
    assert_eq!(h.latest().await?, M3);
    Ok(())
}

#[tokio::test]
async fn test_up_one_with_empty_registry() -> Result<()> {
    let h = Harness::new(&[]).await?;
    assert!(is_nothing_to_run(&h.service.up_one().await?));
    Ok(())
}

#[tokio::test]
async fn test_down_one_from_m2() -> Result<()> {
    let h = harness().await?;
    h.service.up_one().await?;
    h.service.up_one().await?;

    let outcomes = h.service.down_one().await?;

    assert_eq!(executed(&outcomes), vec![(Revert, M2)]);
    assert_eq!(h.latest().await?, M1);
    Ok(())
}

#[tokio::test]
async fn test_down_one_from_first_reverts_to_empty() -> Result<()> {
    let h = harness().await?;
    h.service.up_one().await?;

    let outcomes = h.service.down_one().await?;

    assert_eq!(executed(&outcomes), vec![(Revert, M1)]);
    assert_eq!(h.latest().await?, "");
    Ok(())
}

const GHOST: &str = "2099-01-01-00-00-00-ghost";

async fn installed_with_unregistered_latest() -> Result<Harness> {
    let h = harness().await?;
    h.service.install().await?;
    h.migrator().history().insert(GHOST).await?;
    Ok(h)
}

#[tokio::test]
async fn test_down_one_with_unregistered_latest_reverts_everything() -> Result<()> {
    let h = installed_with_unregistered_latest().await?;
    assert_eq!(h.latest().await?, GHOST);

    let outcomes = h.service.down_one().await?;

    assert_eq!(
        executed(&outcomes),
        vec![(Revert, M3), (Revert, M2), (Revert, M1)]
    );
    assert_eq!(h.applied().await?, vec![GHOST]);
    assert_eq!(h.latest().await?, GHOST);
    Ok(())
}

#[tokio::test]
async fn test_uninstall_with_unregistered_latest_keeps_its_row() -> Result<()> {
    let h = installed_with_unregistered_latest().await?;

    let outcomes = h.service.uninstall().await?;

    assert_eq!(
        executed(&outcomes),
        vec![(Revert, M3), (Revert, M2), (Revert, M1)]
    );
    assert_eq!(h.applied().await?, vec![GHOST]);
    Ok(())
}

#[tokio::test]
async fn test_down_one_without_history() -> Result<()> {
    let h = harness().await?;
    assert!(is_nothing_to_run(&h.service.down_one().await?));
    assert!(h.log.calls().is_empty());
    Ok(())
}

#[tokio::test]
async fn test_uninstall_without_history() -> Result<()> {
    let h = harness().await?;
    assert!(is_nothing_to_run(&h.service.uninstall().await?));
    Ok(())
}

#[tokio::test]
async fn test_install_uninstall_round_trip() -> Result<()> {
    let h = harness().await?;

    let installed = h.service.install().await?;
    let uninstalled = h.service.uninstall().await?;

    let applied: Vec<&str> = executed(&installed).into_iter().map(|(_, n)| n).collect();
    let mut reverted: Vec<&str> = executed(&uninstalled).into_iter().map(|(_, n)| n).collect();
    reverted.reverse();
    assert_eq!(applied, reverted);
    assert!(uninstalled.iter().all(|o| o.action != Apply));
    assert!(h.applied().await?.is_empty());
    assert_eq!(h.latest().await?, "");
    Ok(())
}

#[tokio::test]
async fn test_reinstall() -> Result<()> {
    let h = harness().await?;
    h.service.install().await?;

    let outcomes = h.service.reinstall().await?;

    assert_eq!(
        executed(&outcomes),
        vec![
            (Revert, M3),
            (Revert, M2),
            (Revert, M1),
            (Apply, M1),
            (Apply, M2),
            (Apply, M3),
        ]
    );
    assert_eq!(h.applied().await?, vec![M1, M2, M3]);
    Ok(())
}

#[tokio::test]
async fn test_reinstall_from_empty_history_installs() -> Result<()> {
    let h = harness().await?;

    let outcomes = h.service.reinstall().await?;

    assert!(outcomes[0].is_nothing_to_run());
    assert_eq!(
        executed(&outcomes[1..]),
        vec![(Apply, M1), (Apply, M2), (Apply, M3)]
    );
    Ok(())
}

#[tokio::test]
async fn test_reinstall_stops_when_uninstall_fails() -> Result<()> {
    let h = Harness::new(&[(M1, Behavior::Ok), (M2, Behavior::Ok), (M3, Behavior::FailDown)]).await?;
    h.service.install().await?;
    let calls_before = h.log.calls().len();

    let outcomes = h.service.reinstall().await?;

    assert_eq!(summary(&outcomes), vec![(Revert, M3)]);
    assert!(outcomes[0].is_error());
    let calls: Vec<String> = h.log.calls().into_iter().skip(calls_before).collect();
    assert_eq!(calls, vec![format!("down:{}", M3)]);
    assert_eq!(h.applied().await?, vec![M1, M2, M3]);
    Ok(())
}

#[tokio::test]
async fn test_rerun_retries_failed_step() -> Result<()> {
    let h = Harness::new(&[(M1, Behavior::Ok), (M2, Behavior::FailUpOnce), (M3, Behavior::Ok)]).await?;

    let first = h.service.install().await?;
    assert_eq!(summary(&first), vec![(Apply, M1), (Apply, M2)]);
    assert!(first[1].is_error());
    assert_eq!(h.latest().await?, M1);

    let second = h.service.install().await?;
    assert_eq!(summary(&second), vec![(Skip, M1), (Apply, M2), (Apply, M3)]);
    assert!(second.iter().all(|o| !o.is_error()));
    assert_eq!(h.latest().await?, M3);
    Ok(())
}

#[tokio::test]
async fn test_latest_is_by_name_not_apply_time() -> Result<()> {
    let h = harness().await?;
    h.service.insert_history(M3).await?;
    std::thread::sleep(std::time::Duration::from_millis(5));
    h.service.insert_history(M1).await?;

    assert_eq!(h.latest().await?, M3);
    assert_eq!(h.applied().await?, vec![M3, M1]);
    // M2 sorts before the current version, so up-one never reaches it.
    assert!(is_nothing_to_run(&h.service.up_one().await?));
    assert!(h.log.calls().is_empty());
    Ok(())
}

#[tokio::test]
async fn test_insert_history_requires_registered_name() -> Result<()> {
    let h = harness().await?;

    let err = h.service.insert_history("2030-01-01-00-00-00-ghost").await.unwrap_err();

    assert_eq!(
        err.downcast_ref::<ResolveError>(),
        Some(&ResolveError::UnknownMigration(
            "2030-01-01-00-00-00-ghost".to_string()
        ))
    );
    assert!(h.applied().await?.is_empty());
    Ok(())
}

#[tokio::test]
async fn test_insert_history_skips_migration_on_next_run() -> Result<()> {
    let h = harness().await?;
    h.service.insert_history(M1).await?;

    let outcomes = h.service.up_one().await?;

    assert_eq!(executed(&outcomes), vec![(Apply, M2)]);
    assert_eq!(h.log.calls(), vec![format!("up:{}", M2)]);
    Ok(())
}

#[tokio::test]
async fn test_delete_and_clear_history() -> Result<()> {
    let h = harness().await?;
    h.service.install().await?;

    assert_eq!(h.service.delete_history(M3).await?, 1);
    assert_eq!(h.service.delete_history(M3).await?, 0);
    assert_eq!(h.latest().await?, M2);

    assert_eq!(h.service.clear_history().await?, 2);
    assert!(h.applied().await?.is_empty());
    // History edits never run migrations.
    assert_eq!(h.log.calls().len(), 3);
    Ok(())
}

#[tokio::test]
async fn test_status() -> Result<()> {
    let h = harness().await?;

    let status = h.service.status().await?;
    assert_eq!(status.to_string(), "No migrations have been run");
    assert_eq!(status.pending(), vec![M1, M2, M3]);

    h.service.up_one().await?;
    let status = h.service.status().await?;
    assert_eq!(status.current, M1);
    assert_eq!(status.pending(), vec![M2, M3]);
    assert!(status.applied_at(M1).is_some());
    assert!(status.to_string().starts_with(&format!("Statuses: {} @ ", M1)));
    Ok(())
}
