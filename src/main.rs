use axum::{
    routing::{get, post},
    Router,
};
use std::net::SocketAddr;
use std::sync::Arc;
use talentlink_backend::{
    config::{get_config, init_config},
    routes,
    services::store::Store,
    AppState,
};
use tokio::net::TcpListener;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::info;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt::init();
    init_config()?;
    let config = get_config();

    let store = Arc::new(Store::open(
        config.data_file.clone(),
        config.seed_demo_data,
    )?);
    match &config.data_file {
        Some(path) => info!("Store snapshot file: {}", path.display()),
        None => info!("Store running in-memory only (set DATA_FILE to persist)"),
    }

    let app_state = AppState::new(store);

    let admin_api = Router::new()
        .route(
            "/api/candidates",
            get(routes::candidate_routes::list_candidates)
                .post(routes::candidate_routes::create_candidate),
        )
        .route(
            "/api/candidate/:id",
            get(routes::candidate_routes::get_candidate),
        )
        .route(
            "/api/candidate/:id/delete",
            post(routes::candidate_routes::delete_candidate),
        )
        .route(
            "/api/templates",
            get(routes::template_routes::list_templates)
                .post(routes::template_routes::upsert_template),
        )
        .route("/api/schedule", post(routes::messaging::schedule_interview))
        .route("/api/send", post(routes::messaging::send_messages))
        .route("/api/logs", get(routes::admin::get_logs))
        .route("/api/admin/login", post(routes::admin::login));

    let portal_api = Router::new()
        .route("/api/candidate/auth", post(routes::portal::candidate_auth))
        .route(
            "/api/candidate/profile",
            get(routes::portal::get_profile).patch(routes::portal::update_profile),
        )
        .route("/api/candidate/:id/reply", post(routes::portal::reply))
        .route(
            "/api/candidate/privacy",
            post(routes::portal::privacy_action),
        );

    let app = Router::new()
        .route("/health", get(routes::health::health))
        .merge(admin_api)
        .merge(portal_api)
        .with_state(app_state)
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http());

    let addr: SocketAddr = config.server_address.parse()?;
    info!("Server listening on {}", addr);
    let listener = TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
