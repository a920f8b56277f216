use actix_web::{web, HttpResponse, Responder};
use uuid::Uuid;
use validator::Validate;
use crate::core::{classify_drag, classify_key, GestureThresholds, SessionError, SwipeSession};
use crate::models::{
    CompareRequest, CompareResponse, CreateSessionRequest, CreateSessionResponse, ErrorResponse,
    GestureRequest, HealthResponse, LikedResponse, Listing, Preferences, SwipeAction, SwipeResponse,
};
use crate::services::{catalog, RealtorClient, SessionHandle, SessionStore};
use std::sync::Arc;

/// Application state shared across all handlers
#[derive(Clone)]
pub struct AppState {
    pub realtor: Arc<RealtorClient>,
    pub sessions: SessionStore,
    /// Built-in listings, also the fallback when the remote source fails
    pub catalog: Arc<Vec<Listing>>,
    pub defaults: SessionDefaults,
}

/// Per-deployment knobs the handlers need
#[derive(Debug, Clone)]
pub struct SessionDefaults {
    pub city: String,
    pub state: String,
    pub limit: u16,
    pub use_real_data: bool,
    pub lookahead: usize,
    pub thresholds: GestureThresholds,
}

impl Default for SessionDefaults {
    fn default() -> Self {
        Self {
            city: "Charlottesville".to_string(),
            state: "VA".to_string(),
            limit: 30,
            use_real_data: false,
            lookahead: 3,
            thresholds: GestureThresholds::default(),
        }
    }
}

/// Configure all session routes
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg
        .route("/health", web::get().to(health_check))
        .route("/options", web::get().to(get_options))
        .route("/sessions", web::post().to(create_session))
        .route("/sessions/{id}", web::get().to(get_session))
        .route("/sessions/{id}", web::delete().to(delete_session))
        .route("/sessions/{id}/preferences", web::put().to(update_preferences))
        .route("/sessions/{id}/love", web::post().to(love))
        .route("/sessions/{id}/pass", web::post().to(pass))
        .route("/sessions/{id}/gesture", web::post().to(gesture))
        .route("/sessions/{id}/undo", web::post().to(undo))
        .route("/sessions/{id}/restart", web::post().to(restart))
        .route("/sessions/{id}/liked", web::get().to(get_liked))
        .route("/sessions/{id}/compare", web::post().to(compare_liked));
}

fn error_response(status: actix_web::http::StatusCode, error: &str, message: String) -> HttpResponse {
    HttpResponse::build(status).json(ErrorResponse {
        error: error.to_string(),
        message,
        status_code: status.as_u16(),
    })
}

fn session_error_response(err: &SessionError) -> HttpResponse {
    use actix_web::http::StatusCode;

    match err {
        SessionError::Exhausted | SessionError::NothingToUndo | SessionError::StillBrowsing => {
            error_response(StatusCode::CONFLICT, "Invalid transition", err.to_string())
        }
        SessionError::UnknownListing(_) | SessionError::InvalidComparison(_) => {
            error_response(StatusCode::BAD_REQUEST, "Invalid comparison", err.to_string())
        }
    }
}

async fn find_session(state: &AppState, id: &str) -> Result<SessionHandle, HttpResponse> {
    let not_found = || {
        error_response(
            actix_web::http::StatusCode::NOT_FOUND,
            "Session not found",
            format!("No session with id {}", id),
        )
    };

    let uuid = Uuid::parse_str(id).map_err(|_| not_found())?;
    state.sessions.get(&uuid).await.ok_or_else(not_found)
}

/// Health check endpoint
async fn health_check(state: web::Data<AppState>) -> impl Responder {
    HttpResponse::Ok().json(HealthResponse {
        status: "healthy".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        timestamp: chrono::Utc::now(),
        active_sessions: state.sessions.len(),
    })
}

/// Options for the preferences editor
///
/// GET /api/v1/options
async fn get_options() -> impl Responder {
    HttpResponse::Ok().json(catalog::preference_options())
}

/// Start a session
///
/// POST /api/v1/sessions
///
/// Request body:
/// ```json
/// {
///   "useRealData": true,
///   "city": "Charlottesville",
///   "state": "VA",
///   "limit": 30
/// }
/// ```
async fn create_session(
    state: web::Data<AppState>,
    body: web::Bytes,
) -> impl Responder {
    // An empty body starts a session with the deployment defaults
    let req = if body.iter().all(u8::is_ascii_whitespace) {
        CreateSessionRequest::default()
    } else {
        match serde_json::from_slice::<CreateSessionRequest>(&body) {
            Ok(req) => req,
            Err(e) => {
                tracing::info!("Invalid JSON for create_session request: {}", e);
                return error_response(
                    actix_web::http::StatusCode::BAD_REQUEST,
                    "invalid_json",
                    format!("Invalid JSON: {}", e),
                );
            }
        }
    };

    if let Err(errors) = req.validate() {
        tracing::info!("Validation failed for create_session request: {:?}", errors);
        return error_response(
            actix_web::http::StatusCode::BAD_REQUEST,
            "Validation failed",
            errors.to_string(),
        );
    }

    let defaults = &state.defaults;
    let use_real_data = req.use_real_data.unwrap_or(defaults.use_real_data);

    let (listings, warning) = if use_real_data && state.realtor.has_api_key() {
        let city = req.city.as_deref().unwrap_or(&defaults.city);
        let state_code = req.state.as_deref().unwrap_or(&defaults.state);
        let limit = req.limit.unwrap_or(defaults.limit);

        let outcome = catalog::load_listings(&state.realtor, city, state_code, limit, &state.catalog).await;
        (outcome.listings, outcome.warning)
    } else {
        (state.catalog.as_ref().clone(), None)
    };

    let session = SwipeSession::new(listings);
    let deck = session.deck_view(defaults.lookahead);
    let session_id = state.sessions.insert(session).await;

    tracing::info!(
        "Created session {} with {} listings (real data: {})",
        session_id,
        deck.total,
        use_real_data
    );

    HttpResponse::Created().json(CreateSessionResponse {
        session_id: session_id.to_string(),
        warning,
        deck,
    })
}

/// Current deck view
///
/// GET /api/v1/sessions/{id}
async fn get_session(state: web::Data<AppState>, path: web::Path<String>) -> impl Responder {
    let handle = match find_session(&state, &path).await {
        Ok(handle) => handle,
        Err(response) => return response,
    };

    let session = handle.lock().await;
    HttpResponse::Ok().json(session.deck_view(state.defaults.lookahead))
}

/// End a session
///
/// DELETE /api/v1/sessions/{id}
async fn delete_session(state: web::Data<AppState>, path: web::Path<String>) -> impl Responder {
    let removed = match Uuid::parse_str(&path) {
        Ok(id) => state.sessions.remove(&id).await,
        Err(_) => false,
    };

    if removed {
        HttpResponse::NoContent().finish()
    } else {
        error_response(
            actix_web::http::StatusCode::NOT_FOUND,
            "Session not found",
            format!("No session with id {}", path),
        )
    }
}

/// Replace preferences wholesale and rebuild the deck
///
/// PUT /api/v1/sessions/{id}/preferences
async fn update_preferences(
    state: web::Data<AppState>,
    path: web::Path<String>,
    req: web::Json<Preferences>,
) -> impl Responder {
    if let Err(errors) = req.validate() {
        return error_response(
            actix_web::http::StatusCode::BAD_REQUEST,
            "Validation failed",
            errors.to_string(),
        );
    }

    let handle = match find_session(&state, &path).await {
        Ok(handle) => handle,
        Err(response) => return response,
    };

    let mut session = handle.lock().await;
    session.change_preferences(req.into_inner());

    HttpResponse::Ok().json(session.deck_view(state.defaults.lookahead))
}

async fn apply_swipe(state: &AppState, id: &str, action: Option<SwipeAction>) -> HttpResponse {
    let handle = match find_session(state, id).await {
        Ok(handle) => handle,
        Err(response) => return response,
    };

    let mut session = handle.lock().await;

    let Some(action) = action else {
        // Snapped back: nothing changes
        return HttpResponse::Ok().json(SwipeResponse {
            action: None,
            celebrate: false,
            deck: session.deck_view(state.defaults.lookahead),
        });
    };

    match session.swipe(action) {
        Ok(outcome) => HttpResponse::Ok().json(SwipeResponse {
            action: Some(outcome.action),
            celebrate: outcome.celebrate,
            deck: session.deck_view(state.defaults.lookahead),
        }),
        Err(e) => session_error_response(&e),
    }
}

/// POST /api/v1/sessions/{id}/love
async fn love(state: web::Data<AppState>, path: web::Path<String>) -> impl Responder {
    apply_swipe(&state, &path, Some(SwipeAction::Love)).await
}

/// POST /api/v1/sessions/{id}/pass
async fn pass(state: web::Data<AppState>, path: web::Path<String>) -> impl Responder {
    apply_swipe(&state, &path, Some(SwipeAction::Pass)).await
}

/// Classify a drag release or key press and apply it
///
/// POST /api/v1/sessions/{id}/gesture
///
/// Request body, either form:
/// ```json
/// { "offsetX": 140.0, "velocityX": 0.0 }
/// { "key": "ArrowRight" }
/// ```
async fn gesture(
    state: web::Data<AppState>,
    path: web::Path<String>,
    req: web::Json<GestureRequest>,
) -> impl Responder {
    let action = match (&req.key, req.offset_x, req.velocity_x) {
        (Some(key), _, _) => classify_key(key),
        (None, None, None) => {
            return error_response(
                actix_web::http::StatusCode::BAD_REQUEST,
                "Validation failed",
                "Provide either a key or offsetX/velocityX".to_string(),
            );
        }
        (None, offset, velocity) => classify_drag(
            offset.unwrap_or(0.0),
            velocity.unwrap_or(0.0),
            &state.defaults.thresholds,
        ),
    };

    apply_swipe(&state, &path, action).await
}

/// POST /api/v1/sessions/{id}/undo
async fn undo(state: web::Data<AppState>, path: web::Path<String>) -> impl Responder {
    let handle = match find_session(&state, &path).await {
        Ok(handle) => handle,
        Err(response) => return response,
    };

    let mut session = handle.lock().await;
    match session.undo() {
        Ok(_) => HttpResponse::Ok().json(session.deck_view(state.defaults.lookahead)),
        Err(e) => session_error_response(&e),
    }
}

/// POST /api/v1/sessions/{id}/restart
async fn restart(state: web::Data<AppState>, path: web::Path<String>) -> impl Responder {
    let handle = match find_session(&state, &path).await {
        Ok(handle) => handle,
        Err(response) => return response,
    };

    let mut session = handle.lock().await;
    match session.restart() {
        Ok(()) => HttpResponse::Ok().json(session.deck_view(state.defaults.lookahead)),
        Err(e) => session_error_response(&e),
    }
}

/// GET /api/v1/sessions/{id}/liked
async fn get_liked(state: web::Data<AppState>, path: web::Path<String>) -> impl Responder {
    let handle = match find_session(&state, &path).await {
        Ok(handle) => handle,
        Err(response) => return response,
    };

    let session = handle.lock().await;
    let liked = session.liked().to_vec();

    HttpResponse::Ok().json(LikedResponse {
        count: liked.len(),
        liked,
    })
}

/// Compare 2-3 liked listings
///
/// POST /api/v1/sessions/{id}/compare
///
/// Request body:
/// ```json
/// { "listingIds": ["1", "4"] }
/// ```
async fn compare_liked(
    state: web::Data<AppState>,
    path: web::Path<String>,
    req: web::Json<CompareRequest>,
) -> impl Responder {
    if let Err(errors) = req.validate() {
        return error_response(
            actix_web::http::StatusCode::BAD_REQUEST,
            "Validation failed",
            errors.to_string(),
        );
    }

    let handle = match find_session(&state, &path).await {
        Ok(handle) => handle,
        Err(response) => return response,
    };

    let session = handle.lock().await;
    match session.compare_liked(&req.listing_ids) {
        Ok(entries) => HttpResponse::Ok().json(CompareResponse { entries }),
        Err(e) => session_error_response(&e),
    }
}
