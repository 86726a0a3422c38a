//! services/api/src/bin/api.rs

use api_lib::{
    adapters::{load_seed, InMemorySessionStore, JsonFileSource},
    config::{Config, ConfigError},
    error::ApiError,
    web::{
        checkout_handler,
        creator::{
            course_editor_handler, create_landing_page_handler, delete_course_handler,
            delete_landing_page_handler, get_landing_page_handler, get_student_handler,
            list_landing_pages_handler, list_managed_courses_handler, list_students_handler,
            save_course_handler, toggle_student_status_handler, update_landing_page_handler,
            update_student_handler,
        },
        get_course_handler, get_lesson_handler, list_courses_handler, login_handler,
        logout_handler, me_handler, purchased_courses_handler, register_handler,
        require_auth, require_creator,
        rest::openapi_document,
        state::AppState,
    },
};
use axum::{
    http::{
        header::{ACCEPT, AUTHORIZATION, CONTENT_TYPE},
        HeaderValue, Method,
    },
    middleware as axum_middleware,
    routing::{get, post},
    Router,
};
use chrono::Duration;
use learnhub_core::{Catalog, CourseAdmin, LandingPages, Roster};
use std::sync::Arc;
use tokio::sync::RwLock;
use tower_http::cors::CorsLayer;
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use utoipa_swagger_ui::SwaggerUi;

#[tokio::main]
async fn main() -> Result<(), ApiError> {
    // --- 1. Load Configuration & Set Up Logging ---
    let config = Arc::new(Config::from_env()?);
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(config.log_level.to_string()))
        .with(tracing_subscriber::fmt::layer())
        .init();
    info!("Configuration loaded. Starting server...");

    // --- 2. Load the Catalog Snapshot (once) ---
    let source = JsonFileSource::new(config.courses_path());
    let catalog = Arc::new(Catalog::load(&source).await);
    if catalog.is_empty() {
        warn!("Course catalog is empty; learners will see a 'no data' state.");
    }

    // --- 3. Load Creator Seed Data ---
    let roster = Roster::new(load_seed(&config.students_path()).await);
    let landing_pages = LandingPages::new(load_seed(&config.landing_pages_path()).await);
    let courses = CourseAdmin::new(load_seed(&config.creator_courses_path()).await);

    // --- 4. Build the Shared AppState ---
    let app_state = Arc::new(AppState {
        config: config.clone(),
        catalog,
        sessions: Arc::new(InMemorySessionStore::with_ttl(Duration::days(
            config.session_ttl_days,
        ))),
        roster: RwLock::new(roster),
        landing_pages: RwLock::new(landing_pages),
        courses: RwLock::new(courses),
    });

    let origin = config.cors_origin.parse::<HeaderValue>().map_err(|e| {
        ConfigError::InvalidValue("CORS_ORIGIN".to_string(), e.to_string())
    })?;
    let cors = CorsLayer::new()
        .allow_origin(origin)
        .allow_credentials(true)
        .allow_methods([Method::GET, Method::POST, Method::PUT, Method::DELETE, Method::OPTIONS])
        .allow_headers([AUTHORIZATION, CONTENT_TYPE, ACCEPT]);

    // --- 5. Create the Web Router ---
    // Public routes (no session required)
    let public_routes = Router::new()
        .route("/auth/login", post(login_handler))
        .route("/auth/register", post(register_handler))
        .route("/auth/logout", post(logout_handler))
        .route("/courses", get(list_courses_handler))
        .route("/courses/purchased", get(purchased_courses_handler))
        .route("/courses/{course_id}", get(get_course_handler))
        .route(
            "/courses/{course_id}/lessons/{lesson_id}",
            get(get_lesson_handler),
        );

    // Routes for any signed-in user
    let session_routes = Router::new()
        .route("/auth/me", get(me_handler))
        .route("/courses/{course_id}/checkout", post(checkout_handler))
        .layer(axum_middleware::from_fn_with_state(
            app_state.clone(),
            require_auth,
        ));

    // Creator area
    let creator_routes = Router::new()
        .route("/creator/courses", get(list_managed_courses_handler))
        .route(
            "/creator/courses/{course_id}",
            get(course_editor_handler)
                .put(save_course_handler)
                .delete(delete_course_handler),
        )
        .route("/creator/students", get(list_students_handler))
        .route(
            "/creator/students/{student_id}",
            get(get_student_handler).put(update_student_handler),
        )
        .route(
            "/creator/students/{student_id}/toggle-status",
            post(toggle_student_status_handler),
        )
        .route(
            "/creator/landing-pages",
            get(list_landing_pages_handler).post(create_landing_page_handler),
        )
        .route(
            "/creator/landing-pages/{page_id}",
            get(get_landing_page_handler)
                .put(update_landing_page_handler)
                .delete(delete_landing_page_handler),
        )
        .layer(axum_middleware::from_fn_with_state(
            app_state.clone(),
            require_creator,
        ));

    let api_router = Router::new()
        .merge(public_routes)
        .merge(session_routes)
        .merge(creator_routes)
        .layer(cors)
        .with_state(app_state);

    // Merge the API router with the Swagger UI router for a complete application.
    let doc = openapi_document(&format!("http://{}", config.bind_address));
    let app = Router::new()
        .merge(api_router)
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", doc));

    // --- 6. Start the Server ---
    info!("Starting server on {}", config.bind_address);
    info!(
        "Swagger UI available at http://{}/swagger-ui",
        config.bind_address
    );
    let listener = tokio::net::TcpListener::bind(&config.bind_address).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
