//! PostgreSQL implementation of the room store.

use std::time::Duration;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;
use sqlx::postgres::PgPoolOptions;

use super::RoomStore;
use crate::config::GatewayConfig;
use crate::domain::{Room, RoomId};
use crate::error::GatewayError;

/// Row shape of the `rooms` table.
type RoomRow = (String, String, DateTime<Utc>, DateTime<Utc>);

/// PostgreSQL-backed room store using `sqlx::PgPool`.
///
/// Row-level atomicity of `INSERT ... ON CONFLICT` serializes concurrent
/// writes to the same room.
#[derive(Debug, Clone)]
pub struct PostgresRoomStore {
    pool: PgPool,
}

impl PostgresRoomStore {
    /// Creates a store over an existing connection pool.
    #[must_use]
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Connects using the gateway configuration and applies migrations.
    ///
    /// # Errors
    ///
    /// Returns a [`GatewayError::PersistenceError`] if the database is
    /// unreachable or a migration fails.
    pub async fn connect(config: &GatewayConfig) -> Result<Self, GatewayError> {
        let pool = PgPoolOptions::new()
            .max_connections(config.database_max_connections)
            .min_connections(config.database_min_connections)
            .acquire_timeout(Duration::from_secs(config.database_connect_timeout_secs))
            .connect(&config.database_url)
            .await?;

        sqlx::migrate!("./migrations")
            .run(&pool)
            .await
            .map_err(|e| GatewayError::PersistenceError(e.to_string()))?;

        Ok(Self::new(pool))
    }
}

fn into_room((room_id, code_content, created_at, updated_at): RoomRow) -> Result<Room, GatewayError> {
    Ok(Room {
        room_id: RoomId::parse(&room_id)?,
        code_content,
        created_at,
        updated_at,
    })
}

#[async_trait]
impl RoomStore for PostgresRoomStore {
    async fn load(&self, room_id: &RoomId) -> Result<Option<Room>, GatewayError> {
        let row = sqlx::query_as::<_, RoomRow>(
            "SELECT room_id, code_content, created_at, updated_at FROM rooms WHERE room_id = $1",
        )
        .bind(room_id.as_str())
        .fetch_optional(&self.pool)
        .await?;

        row.map(into_room).transpose()
    }

    async fn save(&self, room_id: &RoomId, text: &str) -> Result<(), GatewayError> {
        sqlx::query(
            "INSERT INTO rooms (room_id, code_content) VALUES ($1, $2) \
             ON CONFLICT (room_id) DO UPDATE \
             SET code_content = EXCLUDED.code_content, updated_at = now()",
        )
        .bind(room_id.as_str())
        .bind(text)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    async fn create(&self, room_id: &RoomId) -> Result<Room, GatewayError> {
        let row = sqlx::query_as::<_, RoomRow>(
            "INSERT INTO rooms (room_id) VALUES ($1) \
             ON CONFLICT (room_id) DO UPDATE SET room_id = EXCLUDED.room_id \
             RETURNING room_id, code_content, created_at, updated_at",
        )
        .bind(room_id.as_str())
        .fetch_one(&self.pool)
        .await?;

        into_room(row)
    }

    async fn ping(&self) -> Result<(), GatewayError> {
        sqlx::query("SELECT 1").execute(&self.pool).await?;
        Ok(())
    }
}
