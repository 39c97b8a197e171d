//! Sweeper against a real database.
//!
//! `#[sqlx::test]` creates a scratch database per test from `DATABASE_URL`.

use std::time::Duration;

use sqlx::PgPool;
use tokio_util::sync::CancellationToken;
use vendorpo_db::models::session::CreateSession;
use vendorpo_db::models::user::CreateUser;
use vendorpo_db::repositories::{SessionRepo, UserRepo};
use vendorpo_worker::sweeper::SessionSweeper;

async fn seed_session(pool: &PgPool, token: &str) -> i64 {
    let user = UserRepo::create(
        pool,
        &CreateUser {
            organization_id: None,
            email: format!("{token}@acme.test"),
            name: "Sweep Target".into(),
        },
    )
    .await
    .unwrap();
    SessionRepo::create(
        pool,
        &CreateSession {
            user_id: user.id,
            token: token.into(),
            ip_address: None,
            user_agent: None,
        },
    )
    .await
    .unwrap()
    .id
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn sweep_removes_only_expired_sessions(pool: PgPool) {
    let old = seed_session(&pool, "old").await;
    let fresh = seed_session(&pool, "fresh").await;

    // Backdate one session past the 30-day TTL while bumping its activity.
    sqlx::query(
        "UPDATE user_sessions
         SET created_at = NOW() - INTERVAL '30 days 1 minute', last_activity = NOW()
         WHERE id = $1",
    )
    .bind(old)
    .execute(&pool)
    .await
    .unwrap();

    let sweeper = SessionSweeper::new(pool.clone(), Duration::from_secs(3600));
    assert_eq!(sweeper.sweep_once().await.unwrap(), 1);
    assert_eq!(sweeper.sweep_once().await.unwrap(), 0);

    let remaining: Vec<(i64,)> = sqlx::query_as("SELECT id FROM user_sessions")
        .fetch_all(&pool)
        .await
        .unwrap();
    assert_eq!(remaining, vec![(fresh,)]);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn run_sweeps_then_stops_on_cancel(pool: PgPool) {
    let id = seed_session(&pool, "stale").await;
    sqlx::query("UPDATE user_sessions SET created_at = NOW() - INTERVAL '31 days' WHERE id = $1")
        .bind(id)
        .execute(&pool)
        .await
        .unwrap();

    let sweeper = SessionSweeper::new(pool.clone(), Duration::from_millis(50));
    let cancel = CancellationToken::new();
    let stopper = cancel.clone();
    tokio::spawn(async move {
        tokio::time::sleep(Duration::from_millis(200)).await;
        stopper.cancel();
    });
    sweeper.run(cancel).await;

    let (count,): (i64,) = sqlx::query_as("SELECT COUNT(*) FROM user_sessions")
        .fetch_one(&pool)
        .await
        .unwrap();
    assert_eq!(count, 0);
}
