//! Integration tests for phase-history reconciliation.
//!
//! Exercises the reconciler against a real database:
//! - Insert / amend / no-op decisions
//! - Idempotent resubmission
//! - Uniqueness preservation and the collision fallback
//! - Latest-record precedence (date, then creation time)
//! - Cascade delete with the owning project

use chrono::NaiveDate;
use sqlx::PgPool;

use protrack_core::phase::Phase;
use protrack_db::models::project::CreateProject;
use protrack_db::reconcile::{reconcile_phase, ReconcileOutcome};
use protrack_db::repositories::{PhaseRepo, ProjectRepo};

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

fn new_project(project_id: i64) -> CreateProject {
    serde_json::from_value(serde_json::json!({ "Project Id": project_id })).unwrap()
}

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

async fn create_project(pool: &PgPool, project_id: i64) -> i64 {
    ProjectRepo::create(pool, &new_project(project_id))
        .await
        .unwrap()
        .id
}

// ---------------------------------------------------------------------------
// Reconciliation decisions
// ---------------------------------------------------------------------------

#[sqlx::test]
async fn first_submission_inserts_a_record(pool: PgPool) {
    let pk = create_project(&pool, 42).await;

    let outcome = reconcile_phase(&pool, pk, Phase::Delivered, date(2026, 5, 1))
        .await
        .unwrap();

    assert_eq!(outcome, ReconcileOutcome::Inserted);
    let rows = PhaseRepo::list_for_project(&pool, pk).await.unwrap();
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0].phase, "DELIVERED");
    assert_eq!(rows[0].date, date(2026, 5, 1));
}

#[sqlx::test]
async fn resubmission_of_same_pair_is_idempotent(pool: PgPool) {
    let pk = create_project(&pool, 42).await;

    let first = reconcile_phase(&pool, pk, Phase::Deployment, date(2026, 5, 1))
        .await
        .unwrap();
    let second = reconcile_phase(&pool, pk, Phase::Deployment, date(2026, 5, 1))
        .await
        .unwrap();

    assert_eq!(first, ReconcileOutcome::Inserted);
    assert_eq!(second, ReconcileOutcome::Unchanged);
    assert_eq!(
        PhaseRepo::list_for_project(&pool, pk).await.unwrap().len(),
        1
    );
}

#[sqlx::test]
async fn different_date_amends_the_existing_record(pool: PgPool) {
    let pk = create_project(&pool, 42).await;

    reconcile_phase(&pool, pk, Phase::Operations, date(2026, 5, 1))
        .await
        .unwrap();
    let outcome = reconcile_phase(&pool, pk, Phase::Operations, date(2026, 5, 9))
        .await
        .unwrap();

    assert_eq!(outcome, ReconcileOutcome::Amended);
    let rows = PhaseRepo::list_for_project(&pool, pk).await.unwrap();
    assert_eq!(rows.len(), 1, "amendment must not add a row");
    assert_eq!(rows[0].date, date(2026, 5, 9));
}

#[sqlx::test]
async fn collision_on_amendment_recovers_without_error(pool: PgPool) {
    let pk = create_project(&pool, 42).await;

    // Two history rows for the same phase on different dates.
    assert!(PhaseRepo::insert(&pool, pk, Phase::Delivered, date(2026, 5, 1))
        .await
        .unwrap());
    assert!(PhaseRepo::insert(&pool, pk, Phase::Delivered, date(2026, 5, 9))
        .await
        .unwrap());

    // The latest record is the May 9 one; moving it back to May 1 would
    // collide with the first row.
    let outcome = reconcile_phase(&pool, pk, Phase::Delivered, date(2026, 5, 1))
        .await
        .unwrap();

    assert_eq!(outcome, ReconcileOutcome::Recovered);
    let rows = PhaseRepo::list_for_project(&pool, pk).await.unwrap();
    assert_eq!(rows.len(), 2);
    let dates: Vec<_> = rows.iter().map(|r| r.date).collect();
    assert!(dates.contains(&date(2026, 5, 1)));
    assert!(dates.contains(&date(2026, 5, 9)));
}

#[sqlx::test]
async fn duplicate_insert_is_ignored_by_constraint(pool: PgPool) {
    let pk = create_project(&pool, 42).await;

    assert!(PhaseRepo::insert(&pool, pk, Phase::Deployment, date(2026, 1, 1))
        .await
        .unwrap());
    assert!(!PhaseRepo::insert(&pool, pk, Phase::Deployment, date(2026, 1, 1))
        .await
        .unwrap());

    assert_eq!(
        PhaseRepo::list_for_project(&pool, pk).await.unwrap().len(),
        1
    );
}

// ---------------------------------------------------------------------------
// Latest-record precedence
// ---------------------------------------------------------------------------

#[sqlx::test]
async fn latest_record_prefers_date_then_creation_time(pool: PgPool) {
    let pk = create_project(&pool, 42).await;

    // Same date, different phases: the later-created row wins the tie.
    PhaseRepo::insert(&pool, pk, Phase::Deployment, date(2026, 3, 1))
        .await
        .unwrap();
    PhaseRepo::insert(&pool, pk, Phase::Delivered, date(2026, 3, 1))
        .await
        .unwrap();

    let latest = PhaseRepo::latest_for_project(&pool, pk)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(latest.phase, "DELIVERED");

    // An earlier-dated row created afterwards does not displace it.
    PhaseRepo::insert(&pool, pk, Phase::Operations, date(2026, 2, 1))
        .await
        .unwrap();
    let latest = PhaseRepo::latest_for_project(&pool, pk)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(latest.phase, "DELIVERED");
}

#[sqlx::test]
async fn latest_per_project_returns_one_row_per_project(pool: PgPool) {
    let pk_a = create_project(&pool, 1).await;
    let pk_b = create_project(&pool, 2).await;

    PhaseRepo::insert(&pool, pk_a, Phase::Deployment, date(2026, 1, 1))
        .await
        .unwrap();
    PhaseRepo::insert(&pool, pk_a, Phase::Delivered, date(2026, 2, 1))
        .await
        .unwrap();
    PhaseRepo::insert(&pool, pk_b, Phase::Deployment, date(2026, 1, 15))
        .await
        .unwrap();

    let mut latest = PhaseRepo::latest_per_project(&pool).await.unwrap();
    latest.sort_by_key(|r| r.project_id);
    assert_eq!(latest.len(), 2);
    assert_eq!(latest[0].project_id, pk_a);
    assert_eq!(latest[0].phase, "DELIVERED");
    assert_eq!(latest[1].project_id, pk_b);
    assert_eq!(latest[1].phase, "DEPLOYMENT");
}

// ---------------------------------------------------------------------------
// Cascade delete
// ---------------------------------------------------------------------------

#[sqlx::test]
async fn deleting_a_project_cascades_its_history(pool: PgPool) {
    let pk = create_project(&pool, 42).await;
    PhaseRepo::insert(&pool, pk, Phase::Deployment, date(2026, 1, 1))
        .await
        .unwrap();

    assert!(ProjectRepo::delete_by_project_id(&pool, 42).await.unwrap());

    let rows = PhaseRepo::list_for_project(&pool, pk).await.unwrap();
    assert!(rows.is_empty());
}
