/// Application state and router builder
///
/// This module defines the shared application state and provides
/// a function to build the Axum router with all routes and middleware.
///
/// # Example
///
/// ```no_run
/// use folio_api::{app::AppState, config::Config};
/// use sqlx::PgPool;
///
/// # async fn example() -> anyhow::Result<()> {
/// let config = Config::from_env()?;
/// let pool = PgPool::connect(&config.database.url).await?;
/// let state = AppState::from_config(pool, config)?;
/// let app = folio_api::app::build_router(state);
/// # Ok(())
/// # }
/// ```

use crate::{
    config::Config,
    middleware::{
        security::SecurityHeadersLayer,
        session::{require_api_session, require_session},
    },
};
use axum::{
    extract::DefaultBodyLimit,
    http::{header, HeaderValue, Method},
    middleware::from_fn_with_state,
    routing::{get, post},
    Router,
};
use folio_shared::{
    auth::identity::{IdentityProvider, SupabaseAuth},
    storage::client::{ObjectStorage, SupabaseStorage},
};
use sqlx::PgPool;
use std::{sync::Arc, time::Duration};
use tower_http::{
    cors::CorsLayer,
    limit::RequestBodyLimitLayer,
    trace::{DefaultMakeSpan, DefaultOnResponse, TraceLayer},
};
use tracing::Level;

/// Identity and storage calls give up after this long
const UPSTREAM_TIMEOUT_SECS: u64 = 30;

/// Shared application state
///
/// This is cloned for each request handler via Axum's `State` extractor.
/// Uses Arc internally for cheap cloning.
#[derive(Clone)]
pub struct AppState {
    /// Database connection pool
    pub db: PgPool,

    /// Application configuration
    pub config: Arc<Config>,

    /// Credential verification
    pub identity: Arc<dyn IdentityProvider>,

    /// Asset uploads
    pub storage: Arc<dyn ObjectStorage>,
}

impl AppState {
    /// Creates new application state from explicit service implementations
    pub fn new(
        db: PgPool,
        config: Config,
        identity: Arc<dyn IdentityProvider>,
        storage: Arc<dyn ObjectStorage>,
    ) -> Self {
        Self {
            db,
            config: Arc::new(config),
            identity,
            storage,
        }
    }

    /// Creates application state talking to the configured Supabase project
    pub fn from_config(db: PgPool, config: Config) -> Result<Self, reqwest::Error> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(UPSTREAM_TIMEOUT_SECS))
            .user_agent(concat!("folio/", env!("CARGO_PKG_VERSION")))
            .build()?;

        let identity = Arc::new(SupabaseAuth::new(
            http.clone(),
            config.supabase.url.clone(),
            config.supabase.key.clone(),
        ));
        let storage = Arc::new(SupabaseStorage::new(
            http,
            config.supabase.url.clone(),
            config.supabase.key.clone(),
            config.supabase.bucket.clone(),
        ));

        Ok(Self::new(db, config, identity, storage))
    }

    /// Gets the secret used to sign session tokens
    pub fn session_secret(&self) -> &str {
        &self.config.session.secret
    }

    /// Whether cookies should carry the `Secure` attribute
    pub fn secure_cookies(&self) -> bool {
        self.config.api.production
    }
}

/// Builds the complete Axum router with all routes and middleware
///
/// # Architecture
///
/// ```text
/// /
/// ├── GET  /health                       # Health check (public)
/// ├── GET  /api/{about,skills,...,blogs} # Public content (JSON)
/// ├── POST /api/contact                  # Public contact form
/// ├── GET|POST /login                    # Sign-in
/// ├── [session, redirects to /login]
/// │   ├── GET  /, /dashboard?tab=        # Dashboard data (JSON)
/// │   ├── GET  /logout
/// │   ├── POST /update/about
/// │   ├── POST /add/<entity>
/// │   ├── POST /edit/<entity>/:id
/// │   └── GET|POST /delete/<entity>/:id
/// └── [session, 401]
///     └── POST /api/message/read/:id
/// ```
///
/// # Middleware Stack
///
/// Applied in order (bottom to top):
/// 1. Body size limit
/// 2. Logging (tower-http TraceLayer)
/// 3. CORS (tower-http CorsLayer)
/// 4. Security headers
/// 5. Session guards (per route group)
pub fn build_router(state: AppState) -> Router {
    use crate::routes::{self, admin};

    // Public, no session
    let public_routes = Router::new()
        .route("/health", get(routes::health::health_check))
        .route("/api/about", get(routes::public::about))
        .route("/api/skills", get(routes::public::skills))
        .route("/api/education", get(routes::public::education))
        .route("/api/experience", get(routes::public::experience))
        .route("/api/projects", get(routes::public::projects))
        .route("/api/research", get(routes::public::research))
        .route("/api/achievements", get(routes::public::achievements))
        .route("/api/blogs", get(routes::public::blogs))
        .route("/api/contact", post(routes::public::contact))
        .route(
            "/login",
            get(routes::auth::login_page).post(routes::auth::login),
        );

    // Browser admin routes
    let admin_routes = Router::new()
        .route("/", get(admin::dashboard::dashboard))
        .route("/dashboard", get(admin::dashboard::dashboard))
        .route("/logout", get(routes::auth::logout))
        .route("/update/about", post(admin::about::update_about))
        .route("/add/skill", post(admin::skills::add_skill))
        .route("/edit/skill/:id", post(admin::skills::edit_skill))
        .route(
            "/delete/skill/:id",
            get(admin::skills::delete_skill).post(admin::skills::delete_skill),
        )
        .route("/add/education", post(admin::education::add_education))
        .route("/edit/education/:id", post(admin::education::edit_education))
        .route(
            "/delete/education/:id",
            get(admin::education::delete_education).post(admin::education::delete_education),
        )
        .route("/add/experience", post(admin::experience::add_experience))
        .route("/edit/experience/:id", post(admin::experience::edit_experience))
        .route(
            "/delete/experience/:id",
            get(admin::experience::delete_experience)
                .post(admin::experience::delete_experience),
        )
        .route("/add/project", post(admin::projects::add_project))
        .route("/edit/project/:id", post(admin::projects::edit_project))
        .route(
            "/delete/project/:id",
            get(admin::projects::delete_project).post(admin::projects::delete_project),
        )
        .route("/add/research", post(admin::research::add_research))
        .route("/edit/research/:id", post(admin::research::edit_research))
        .route(
            "/delete/research/:id",
            get(admin::research::delete_research).post(admin::research::delete_research),
        )
        .route("/add/achievement", post(admin::achievements::add_achievement))
        .route(
            "/edit/achievement/:id",
            post(admin::achievements::edit_achievement),
        )
        .route(
            "/delete/achievement/:id",
            get(admin::achievements::delete_achievement)
                .post(admin::achievements::delete_achievement),
        )
        .route("/add/blog", post(admin::blogs::add_blog))
        .route("/edit/blog/:id", post(admin::blogs::edit_blog))
        .route(
            "/delete/blog/:id",
            get(admin::blogs::delete_blog).post(admin::blogs::delete_blog),
        )
        .route_layer(from_fn_with_state(state.clone(), require_session));

    // JSON admin routes
    let admin_api_routes = Router::new()
        .route(
            "/api/message/read/:id",
            post(admin::messages::mark_message_read),
        )
        .route_layer(from_fn_with_state(state.clone(), require_api_session));

    // Configure CORS based on environment
    let cors = if state.config.api.cors_origins.iter().any(|o| o == "*") {
        // Development mode: permissive CORS
        CorsLayer::permissive()
    } else {
        let origins: Vec<HeaderValue> = state
            .config
            .api
            .cors_origins
            .iter()
            .filter_map(|origin| origin.parse().ok())
            .collect();

        CorsLayer::new()
            .allow_origin(origins)
            .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
            .allow_headers([header::AUTHORIZATION, header::CONTENT_TYPE])
            .allow_credentials(true)
            .max_age(std::time::Duration::from_secs(3600))
    };

    let max_upload_bytes = state.config.api.max_upload_bytes;
    let production = state.config.api.production;

    Router::new()
        .merge(public_routes)
        .merge(admin_routes)
        .merge(admin_api_routes)
        .layer(DefaultBodyLimit::disable())
        .layer(RequestBodyLimitLayer::new(max_upload_bytes))
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(DefaultMakeSpan::new().level(Level::INFO))
                .on_response(DefaultOnResponse::new().level(Level::INFO)),
        )
        .layer(cors)
        .layer(SecurityHeadersLayer::new(production))
        .with_state(state)
}
