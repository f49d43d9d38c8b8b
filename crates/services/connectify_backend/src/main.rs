// File: services/connectify_backend/src/main.rs
use axum::{routing::get, Router};
use connectify_common::error::{config_error, ConnectifyError, Context};
use connectify_common::{is_booking_enabled, logging};
use connectify_config::load_config;
use std::sync::Arc;
use tokio::net::TcpListener;
use tower_http::trace::TraceLayer;
use tracing::{info, warn};

mod app_state;

use app_state::{build_booking_state, health_routes};

#[tokio::main]
async fn main() -> Result<(), ConnectifyError> {
    logging::init_from_env();

    let config = Arc::new(
        load_config().map_err(|e| config_error(format!("Failed to load config: {}", e)))?,
    );

    let (app_state, booking_state) = build_booking_state(config.clone()).await?;

    let mut api_router = Router::new()
        .route("/", get(|| async { "Welcome to the Connectify booking API!" }))
        .merge(health_routes(Arc::new(app_state)));

    if is_booking_enabled(&config) {
        api_router = api_router.merge(connectify_booking::routes(booking_state));
    } else {
        warn!("Booking API is disabled (use_booking = false or no [booking] section)");
    }

    #[allow(unused_mut)] // only mutated with the openapi feature
    let mut app = Router::new().nest("/api", api_router);

    // Conditionally add Swagger UI and JSON endpoint if openapi feature enabled
    #[cfg(feature = "openapi")]
    {
        use connectify_booking::doc::BookingApiDoc;
        use utoipa::OpenApi;
        use utoipa_swagger_ui::SwaggerUi;

        #[derive(OpenApi)]
        #[openapi(
            info(
                title = "Connectify Booking API",
                version = "0.1.0",
                description = "Scheduling of bookings between clients and professionals",
                license(name = "MIT", url = "https://opensource.org/licenses/MIT")
            ),
            components(),
            servers( (url = "/api", description = "Main API Prefix")),
        )]
        struct ApiDoc;

        let mut openapi_doc = ApiDoc::openapi();
        openapi_doc.merge(BookingApiDoc::openapi());
        info!("Adding Swagger UI at /api/docs");

        let swagger_ui = SwaggerUi::new("/api/docs").url("/api/docs/openapi.json", openapi_doc);
        app = app.merge(swagger_ui);
    }

    let app = app.layer(TraceLayer::new_for_http());

    let addr = format!("{}:{}", config.server.host, config.server.port);
    let listener = TcpListener::bind(&addr)
        .await
        .with_context(|| format!("Failed to bind {}", addr))?;
    info!("Starting server at http://{}", addr);
    info!("API endpoints available at http://{}/api", addr);

    axum::serve(listener, app.into_make_service())
        .await
        .context("Server error")?;
    Ok(())
}
