use actix_cors::Cors;
use actix_web::{web, App, HttpServer, HttpResponse, middleware, error, http::StatusCode};
use homematch::config::Settings;
use homematch::core::GestureThresholds;
use homematch::routes::{self, sessions::{AppState, SessionDefaults}};
use homematch::services::{mock_listings, RealtorClient, SessionStore};
use std::sync::Arc;
use tracing::{info, error, warn};
use tracing_subscriber::EnvFilter;

/// JSON error response for JSON payload errors
#[derive(Debug, serde::Serialize)]
pub struct JsonError {
    pub error: String,
    pub message: String,
    pub status_code: u16,
}

impl std::fmt::Display for JsonError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.error, self.message)
    }
}

impl std::error::Error for JsonError {}

impl error::ResponseError for JsonError {
    fn status_code(&self) -> StatusCode {
        StatusCode::from_u16(self.status_code).unwrap_or(StatusCode::BAD_REQUEST)
    }

    fn error_response(&self) -> HttpResponse {
        HttpResponse::build(self.status_code()).json(self)
    }
}

/// Handle JSON payload errors
pub fn handle_json_payload_error(err: error::JsonPayloadError, req: &actix_web::HttpRequest) -> actix_web::Error {
    tracing::info!("JSON payload error on {}: {}", req.path(), err);
    JsonError {
        error: "invalid_json".to_string(),
        message: format!("Invalid JSON: {}", err),
        status_code: 400,
    }
    .into()
}

/// Handle path extraction errors
pub fn handle_path_error(err: error::PathError, _req: &actix_web::HttpRequest) -> actix_web::Error {
    JsonError {
        error: "invalid_path".to_string(),
        message: format!("Invalid path: {}", err),
        status_code: 400,
    }
    .into()
}

fn init_logging(level: &str, format: &str) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    let subscriber = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_level(true);

    if format == "pretty" {
        subscriber.pretty().init();
    } else {
        subscriber.json().init();
    }
}

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    // Load .env file if present
    dotenv::dotenv().ok();

    let settings = Settings::load();

    // LOG_LEVEL / LOG_FORMAT win over the config file
    let (log_level, log_format) = match &settings {
        Ok(s) => (s.logging.level.clone(), s.logging.format.clone()),
        Err(_) => ("info".to_string(), "json".to_string()),
    };
    let log_level = std::env::var("LOG_LEVEL").unwrap_or(log_level);
    let log_format = std::env::var("LOG_FORMAT").unwrap_or(log_format);
    init_logging(&log_level, &log_format);

    info!("Starting HomeMatch service...");

    let settings = settings.map_err(|e| {
        error!("Failed to load configuration: {}", e);
        std::io::Error::new(std::io::ErrorKind::InvalidInput, e.to_string())
    })?;

    info!("Configuration loaded successfully");

    let realtor = Arc::new(RealtorClient::new(
        settings.realtor.base_url(),
        settings.realtor.api_key.clone(),
        settings.realtor.host.clone(),
        settings.realtor.timeout_secs,
    ));

    if settings.realtor.use_real_data && !realtor.has_api_key() {
        warn!("Real listings requested but no RapidAPI key is configured; serving mock data");
    }

    let catalog = Arc::new(mock_listings());
    info!("Loaded {} built-in listings", catalog.len());

    let sessions = SessionStore::new(settings.sessions.max_sessions, settings.sessions.ttl_secs);
    info!(
        "Session store initialized (max: {}, idle TTL: {}s)",
        settings.sessions.max_sessions,
        settings.sessions.ttl_secs
    );

    let defaults = SessionDefaults {
        city: settings.realtor.default_city.clone(),
        state: settings.realtor.default_state.clone(),
        limit: settings.realtor.default_limit,
        use_real_data: settings.realtor.use_real_data,
        lookahead: settings.deck.lookahead,
        thresholds: GestureThresholds::from(&settings.gesture),
    };

    info!("Session defaults: {:?}", defaults);

    let app_state = AppState {
        realtor,
        sessions,
        catalog,
        defaults,
    };

    let host = settings.server.host.clone();
    let port = settings.server.port;
    let workers = settings.server.workers.unwrap_or(4);

    info!("Starting HTTP server on {}:{}", host, port);

    HttpServer::new(move || {
        let cors = Cors::permissive();

        App::new()
            .app_data(web::Data::new(app_state.clone()))
            .app_data(web::JsonConfig::default().error_handler(handle_json_payload_error))
            .app_data(web::PathConfig::default().error_handler(handle_path_error))
            .wrap(cors)
            .wrap(middleware::Logger::default())
            .wrap(middleware::Compress::default())
            .configure(routes::configure_routes)
    })
    .workers(workers)
    .bind((host, port))?
    .run()
    .await
}
