/// Application state and router builder
///
/// This module defines the shared application state and provides
/// a function to build the Axum router with all routes and middleware.
///
/// # Example
///
/// ```ignore
/// use teamflow_api::{app::AppState, config::Config};
/// use teamflow_shared::store::MemStore;
/// use std::sync::Arc;
///
/// # async fn example() -> anyhow::Result<()> {
/// let config = Config::from_env()?;
/// let state = AppState::new(Arc::new(MemStore::new()), config);
/// let app = teamflow_api::app::build_router(state);
/// # Ok(())
/// # }
/// ```

use crate::config::Config;
use axum::{
    extract::Request,
    middleware::Next,
    response::Response,
    routing::{delete, get, patch, post, put},
    Router,
};
use std::sync::Arc;
use teamflow_shared::auth::{jwt, middleware::AuthContext};
use teamflow_shared::store::Store;
use tower_http::{
    cors::CorsLayer,
    trace::{DefaultMakeSpan, DefaultOnResponse, TraceLayer},
};
use tracing::Level;

/// Shared application state
///
/// This is cloned for each request handler via Axum's `State` extractor.
/// Uses Arc internally for cheap cloning.
#[derive(Clone)]
pub struct AppState {
    /// Storage backend (PostgreSQL or in-memory)
    pub store: Arc<dyn Store>,

    /// Application configuration
    pub config: Arc<Config>,
}

impl AppState {
    /// Creates new application state
    pub fn new(store: Arc<dyn Store>, config: Config) -> Self {
        Self {
            store,
            config: Arc::new(config),
        }
    }

    /// Gets JWT secret for token operations
    pub fn jwt_secret(&self) -> &str {
        &self.config.jwt.secret
    }
}

/// Builds the complete Axum router with all routes and middleware
///
/// # Architecture
///
/// The router is organized as follows:
/// ```text
/// /
/// ├── /health                           # Health check (public)
/// └── /api/
///     ├── /auth/
///     │   ├── POST /register            # Public
///     │   ├── POST /login               # Public
///     │   ├── POST /refresh             # Public
///     │   └── GET  /profile             # Authenticated
///     ├── /projects/                    # Authenticated
///     │   ├── GET    /                  # Projects the requester belongs to
///     │   ├── POST   /                  # Create (requester becomes admin)
///     │   ├── GET    /:id               # Project with its tasks
///     │   ├── PUT    /:id               # Update (admins only)
///     │   ├── DELETE /:id               # Delete + cascade (admins only)
///     │   ├── GET    /:id/members       # Member listing
///     │   ├── POST   /:id/members       # Add member (admins only)
///     │   └── DELETE /:id/members/:uid  # Remove member (admins only)
///     ├── /tasks/                       # Authenticated
///     │   ├── POST   /                  # Create under a project
///     │   ├── GET    /my-tasks          # Requester's assignments
///     │   ├── GET    /project/:id       # Per-project listing
///     │   ├── PUT    /:id               # Field updates
///     │   ├── PATCH  /:id/status        # Status change
///     │   └── DELETE /:id               # Delete
///     └── /users/                       # Authenticated
///         ├── GET /                     # Directory (minus requester)
///         └── GET /project/:id          # Project members as profiles
/// ```
///
/// # Middleware Stack
///
/// Applied in order (bottom to top):
/// 1. Logging (tower-http TraceLayer)
/// 2. CORS (tower-http CorsLayer)
/// 3. Authentication (per-route basis)
pub fn build_router(state: AppState) -> Router {
    use crate::routes;

    // Health check (public, no auth)
    let health_routes = Router::new().route("/health", get(routes::health::health_check));

    // Auth routes: register/login/refresh are public, profile is not
    let auth_routes = Router::new()
        .route("/register", post(routes::auth::register))
        .route("/login", post(routes::auth::login))
        .route("/refresh", post(routes::auth::refresh))
        .merge(
            Router::new()
                .route("/profile", get(routes::auth::profile))
                .layer(axum::middleware::from_fn_with_state(
                    state.clone(),
                    jwt_auth_layer,
                )),
        );

    // Project routes (require JWT authentication)
    let project_routes = Router::new()
        .route(
            "/",
            get(routes::projects::list_projects).post(routes::projects::create_project),
        )
        .route(
            "/:id",
            get(routes::projects::get_project)
                .put(routes::projects::update_project)
                .delete(routes::projects::delete_project),
        )
        .route(
            "/:id/members",
            get(routes::projects::list_members).post(routes::projects::add_member),
        )
        .route(
            "/:id/members/:user_id",
            delete(routes::projects::remove_member),
        )
        .layer(axum::middleware::from_fn_with_state(
            state.clone(),
            jwt_auth_layer,
        ));

    // Task routes (require JWT authentication)
    let task_routes = Router::new()
        .route("/", post(routes::tasks::create_task))
        .route("/my-tasks", get(routes::tasks::my_tasks))
        .route("/project/:project_id", get(routes::tasks::project_tasks))
        .route(
            "/:id",
            put(routes::tasks::update_task).delete(routes::tasks::delete_task),
        )
        .route("/:id/status", patch(routes::tasks::set_task_status))
        .layer(axum::middleware::from_fn_with_state(
            state.clone(),
            jwt_auth_layer,
        ));

    // User directory routes (require JWT authentication)
    let user_routes = Router::new()
        .route("/", get(routes::users::list_users))
        .route("/project/:project_id", get(routes::users::project_users))
        .layer(axum::middleware::from_fn_with_state(
            state.clone(),
            jwt_auth_layer,
        ));

    let api_routes = Router::new()
        .nest("/auth", auth_routes)
        .nest("/projects", project_routes)
        .nest("/tasks", task_routes)
        .nest("/users", user_routes);

    Router::new()
        .merge(health_routes)
        .nest("/api", api_routes)
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(DefaultMakeSpan::new().level(Level::INFO))
                .on_response(DefaultOnResponse::new().level(Level::INFO)),
        )
        .layer(CorsLayer::permissive())
        .with_state(state)
}

/// JWT authentication middleware layer
///
/// Extracts and validates the access token from the Authorization header,
/// confirms the account still exists, then injects AuthContext into
/// request extensions.
async fn jwt_auth_layer(
    state: axum::extract::State<AppState>,
    mut req: Request,
    next: Next,
) -> Result<Response, crate::error::ApiError> {
    let auth_header = req
        .headers()
        .get(axum::http::header::AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .ok_or_else(|| {
            crate::error::ApiError::Unauthorized("Missing authorization header".to_string())
        })?;

    // A malformed header is still an authentication failure, not a bad
    // request: the client gets 401 and can retry with a proper token
    let token = auth_header.strip_prefix("Bearer ").ok_or_else(|| {
        crate::error::ApiError::Unauthorized("Expected Bearer token".to_string())
    })?;

    let claims = jwt::validate_access_token(token, state.jwt_secret())?;

    // A token can outlive its account; treat that as an auth failure
    let user = state
        .store
        .find_user(claims.sub)
        .await
        .map_err(teamflow_shared::error::DomainError::from)?
        .ok_or_else(|| crate::error::ApiError::Unauthorized("User not found".to_string()))?;

    req.extensions_mut().insert(AuthContext::from_jwt(user.id));

    Ok(next.run(req).await)
}
