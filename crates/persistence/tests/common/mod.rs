//! Common helpers for store integration tests.
//!
//! Tests run against the database named by `TEST_DATABASE_URL` and are
//! skipped when it is unset. Every fixture uses fresh IDs, so tests can share
//! one database without cleanup.

#![allow(dead_code)]

use std::time::Duration;

use domain::models::{Group, User};
use persistence::db::{create_pool, DatabaseConfig};
use sqlx::PgPool;
use uuid::Uuid;

/// Connects to the test database and applies migrations, or returns `None`
/// when no test database is configured.
pub async fn test_pool() -> Option<PgPool> {
    let url = match std::env::var("TEST_DATABASE_URL") {
        Ok(url) => url,
        Err(_) => {
            eprintln!("TEST_DATABASE_URL not set, skipping");
            return None;
        }
    };

    let config = DatabaseConfig {
        url,
        max_connections: 20,
        min_connections: 1,
        connect_timeout_secs: 30,
        idle_timeout_secs: 60,
    };
    let pool = create_pool(&config)
        .await
        .expect("Failed to connect to test database");

    sqlx::migrate!("src/migrations")
        .run(&pool)
        .await
        .expect("Failed to run migrations");

    Some(pool)
}

/// Inserts a user, with an email derived from its ID unless `with_email` is false.
pub async fn create_user(pool: &PgPool, with_email: bool) -> User {
    let id = Uuid::new_v4();
    let username = format!("user_{}", id.simple());
    let email = with_email.then(|| format!("{}@example.com", username));

    let created_at = sqlx::query_scalar::<_, chrono::DateTime<chrono::Utc>>(
        "INSERT INTO users (user_id, username, email) VALUES ($1, $2, $3) RETURNING created_at",
    )
    .bind(id)
    .bind(&username)
    .bind(&email)
    .fetch_one(pool)
    .await
    .expect("Failed to insert user");

    User {
        id,
        username,
        email,
        created_at,
    }
}

/// Inserts a group owned by `owner` along with the owner's participant row.
pub async fn create_group(pool: &PgPool, owner: &User) -> Group {
    let id = Uuid::new_v4();
    let (created_at, updated_at) =
        sqlx::query_as::<_, (chrono::DateTime<chrono::Utc>, chrono::DateTime<chrono::Utc>)>(
            r#"
            INSERT INTO groups (group_id, name, user_id, users_count)
            VALUES ($1, 'Test group', $2, 1)
            RETURNING created_at, updated_at
            "#,
        )
        .bind(id)
        .bind(owner.id)
        .fetch_one(pool)
        .await
        .expect("Failed to insert group");

    add_participant(pool, id, owner.id, "OWNER").await;

    Group {
        id,
        name: "Test group".to_string(),
        owner_id: owner.id,
        users_count: 1,
        created_at,
        updated_at,
        owner: None,
        role: None,
    }
}

/// Adds a participant row directly, bypassing the invitation flow.
pub async fn add_participant(pool: &PgPool, group_id: Uuid, user_id: Uuid, role: &str) {
    sqlx::query(
        r#"
        INSERT INTO participants (group_id, user_id, role, source)
        VALUES ($1, $2, $3::participant_role, 'direct')
        "#,
    )
    .bind(group_id)
    .bind(user_id)
    .bind(role)
    .execute(pool)
    .await
    .expect("Failed to insert participant");
}

pub async fn invitation_count(pool: &PgPool, group_id: Uuid) -> i64 {
    sqlx::query_scalar("SELECT COUNT(*) FROM group_invitations WHERE group_id = $1")
        .bind(group_id)
        .fetch_one(pool)
        .await
        .expect("Failed to count invitations")
}

pub async fn participant_count(pool: &PgPool, group_id: Uuid) -> i64 {
    sqlx::query_scalar("SELECT COUNT(*) FROM participants WHERE group_id = $1")
        .bind(group_id)
        .fetch_one(pool)
        .await
        .expect("Failed to count participants")
}

pub async fn users_count(pool: &PgPool, group_id: Uuid) -> i64 {
    sqlx::query_scalar("SELECT users_count FROM groups WHERE group_id = $1")
        .bind(group_id)
        .fetch_one(pool)
        .await
        .expect("Failed to read users_count")
}

pub fn short_timeout() -> Duration {
    Duration::from_secs(10)
}
