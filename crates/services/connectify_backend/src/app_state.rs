// --- File: crates/services/connectify_backend/src/app_state.rs ---
use axum::{extract::State, routing::get, Json, Router};
use connectify_booking::{
    BookingService, BookingState, ProfessionalDirectory, StaticProfessionalDirectory,
};
use connectify_common::error::{config_error, ConnectifyError};
use connectify_common::logging::log_result;
use connectify_config::AppConfig;
use connectify_db::{
    BookingRepository, BookingStore, DbClient, DbError, MemoryBookingRepository,
    ProfessionalRepository, SqlBookingRepository, SqlProfessionalRepository,
};
use serde_json::{json, Value};
use std::sync::Arc;
use tracing::{info, warn};

/// State for the routes outside the booking API.
#[derive(Clone)]
pub struct AppState {
    /// Present when bookings are kept in a database.
    pub db_client: Option<DbClient>,
}

impl AppState {
    pub fn new(db_client: Option<DbClient>) -> Self {
        Self { db_client }
    }
}

/// Wires the booking service onto the configured store.
///
/// With a `database` section the SQL store is used and the configured
/// professionals are registered in it; otherwise bookings live in memory and
/// the professionals come straight from the config.
pub async fn build_booking_state(
    config: Arc<AppConfig>,
) -> Result<(AppState, Arc<BookingState<BookingStore>>), ConnectifyError> {
    let booking_config = config.booking.clone().unwrap_or_default();

    let (store, directory, db_client): (BookingStore, Arc<dyn ProfessionalDirectory>, _) =
        match config.database.as_ref() {
            Some(database) => {
                let db_client = DbClient::from_config(database)
                    .await
                    .map_err(|e| config_error(format!("Database unavailable: {}", e)))?;
                info!("Using {} booking store", db_client.backend().as_str());

                let store = SqlBookingRepository::new(db_client.clone());
                let professionals = SqlProfessionalRepository::new(db_client.clone());
                log_result(
                    store.init_schema().await,
                    "Booking schema ready",
                    "Failed to create booking schema",
                )
                .map_err(database_error)?;
                for id in &booking_config.professionals {
                    log_result(
                        professionals.register_professional(id).await,
                        &format!("Registered professional {}", id),
                        &format!("Failed to register professional {}", id),
                    )
                    .map_err(database_error)?;
                }

                let directory: Arc<dyn ProfessionalDirectory> = Arc::new(professionals);
                (store.into(), directory, Some(db_client))
            }
            None => {
                info!("No database configured; bookings are kept in memory");
                if booking_config.professionals.is_empty() {
                    warn!("No professionals configured; every booking request will be rejected");
                }
                let directory: Arc<dyn ProfessionalDirectory> =
                    Arc::new(StaticProfessionalDirectory::from_config(&booking_config));
                (MemoryBookingRepository::new().into(), directory, None)
            }
        };

    let service = BookingService::new(store, directory)
        .with_max_booking_minutes(booking_config.max_booking_minutes);
    info!(
        "Booking service ready on the {} store",
        service.repository().kind()
    );

    Ok((
        AppState::new(db_client),
        Arc::new(BookingState::new(config, service)),
    ))
}

fn database_error(err: DbError) -> ConnectifyError {
    ConnectifyError::DatabaseError(err.to_string())
}

/// `GET /health`
async fn health_handler(
    State(state): State<Arc<AppState>>,
) -> Result<Json<Value>, ConnectifyError> {
    if let Some(db_client) = &state.db_client {
        if !db_client.is_healthy().await {
            return Err(ConnectifyError::ServiceUnavailable(format!(
                "Database {} is not reachable",
                db_client
            )));
        }
    }
    Ok(Json(json!({ "status": "ok" })))
}

pub fn health_routes(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/health", get(health_handler))
        .with_state(state)
}
