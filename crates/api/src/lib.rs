pub mod error;
pub mod extractors;
pub mod routes;
pub mod state;

use axum::{
    Router,
    http::HeaderValue,
    routing::{delete, get, post, put},
};
use state::AppState;
use tower_http::{
    cors::{AllowOrigin, Any, CorsLayer},
    trace::TraceLayer,
};

/// Restrict CORS to the configured origins; an empty list means a permissive
/// layer (local development).
fn cors_layer(origins: &[String]) -> CorsLayer {
    let layer = CorsLayer::new().allow_methods(Any).allow_headers(Any);
    if origins.is_empty() {
        layer.allow_origin(Any)
    } else {
        let origins: Vec<HeaderValue> = origins.iter().filter_map(|o| o.parse().ok()).collect();
        layer.allow_origin(AllowOrigin::list(origins))
    }
}

pub fn build_router(state: AppState) -> Router {
    let cors = cors_layer(&state.settings.app.cors_origins);

    // Auth routes
    let auth_routes = Router::new()
        .route("/register", post(routes::auth::register))
        .route("/login", post(routes::auth::login))
        .route("/me", get(routes::auth::me));

    // Registration intake and review
    let registration_routes = Router::new()
        .route("/", post(routes::registration::intake))
        .route("/", get(routes::registration::list))
        .route("/{registration_id}/approve", post(routes::registration::approve));

    // Member routes
    let member_routes = Router::new()
        .route("/", get(routes::member::list))
        .route("/{member_id}", get(routes::member::get))
        .route("/{member_id}", put(routes::member::update))
        .route("/{member_id}", delete(routes::member::delete))
        .route("/{member_id}/revoke", post(routes::member::revoke))
        .route("/{member_id}/reinstate", post(routes::member::reinstate))
        .route("/{member_id}/payment", post(routes::member::add_payment))
        .route("/{member_id}/note", post(routes::member::add_note));

    // Collector routes
    let collector_routes = Router::new()
        .route("/", get(routes::collector::roster))
        .route("/", post(routes::collector::create))
        .route("/{collector_id}", put(routes::collector::rename))
        .route("/{collector_id}", delete(routes::collector::delete));

    // Finance routes
    let finance_routes = Router::new()
        .route("/", get(routes::finance::overview))
        .route("/expense", post(routes::finance::add_expense));

    // User administration routes
    let user_routes = Router::new()
        .route("/", get(routes::user::list))
        .route("/{user_id}/role", put(routes::user::set_role));

    // Compose API
    let api = Router::new()
        .nest("/auth", auth_routes)
        .nest("/registration", registration_routes)
        .nest("/member", member_routes)
        .nest("/collector", collector_routes)
        .nest("/finance", finance_routes)
        .nest("/user", user_routes)
        .route("/dashboard", get(routes::dashboard::overview));

    // Health check
    let health = Router::new().route("/health", get(health_check));

    Router::new()
        .nest("/api", api)
        .merge(health)
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}

async fn health_check() -> axum::Json<serde_json::Value> {
    axum::Json(serde_json::json!({
        "status": "ok",
        "version": env!("CARGO_PKG_VERSION"),
    }))
}
