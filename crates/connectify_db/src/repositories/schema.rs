//! Table definitions shared by the SQL repositories.
//!
//! Ids are stored as text and instants as microseconds since the Unix epoch
//! in `BIGINT` columns, which both SQLite and PostgreSQL read back through
//! `sqlx::Any`.

use crate::error::DbError;
use crate::DbClient;
use tracing::{debug, info};

const STATEMENTS: &[&str] = &[
    r#"
    CREATE TABLE IF NOT EXISTS professionals (
        id TEXT PRIMARY KEY,
        created_at BIGINT NOT NULL
    )
    "#,
    r#"
    CREATE TABLE IF NOT EXISTS bookings (
        id TEXT PRIMARY KEY,
        professional_id TEXT NOT NULL REFERENCES professionals(id),
        client_id TEXT NOT NULL,
        service_id TEXT,
        start_time BIGINT NOT NULL,
        end_time BIGINT NOT NULL,
        status TEXT NOT NULL,
        created_at BIGINT NOT NULL,
        updated_at BIGINT NOT NULL,
        CHECK (start_time < end_time),
        CHECK (status IN ('pending', 'confirmed', 'cancelled', 'completed'))
    )
    "#,
    r#"
    CREATE INDEX IF NOT EXISTS idx_bookings_professional_time
        ON bookings (professional_id, start_time, end_time)
    "#,
    r#"
    CREATE INDEX IF NOT EXISTS idx_bookings_client_time
        ON bookings (client_id, start_time)
    "#,
];

/// Creates the booking tables and indices if they don't exist.
///
/// Statements run one by one; PostgreSQL rejects several in a single prepared query.
pub async fn ensure_schema(db_client: &DbClient) -> Result<(), DbError> {
    debug!("Initializing booking schema");
    for statement in STATEMENTS {
        db_client.execute(statement).await?;
    }
    info!("Booking schema initialized successfully");
    Ok(())
}
