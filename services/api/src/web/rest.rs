//! services/api/src/web/rest.rs
//!
//! Contains the Axum handlers for the learner-facing catalog endpoints and the
//! master definition for the OpenAPI specification.

use crate::adapters::RecordingNavigator;
use crate::error::into_http;
use crate::web::{auth, creator, state::AppState};
use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::Json,
    Extension,
};
use learnhub_core::checkout::{self, CheckoutForm};
use learnhub_core::domain::{Course, CourseSummary, Document, Lesson, LessonView, User};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::info;
use utoipa::openapi::server::Server;
use utoipa::{OpenApi, ToSchema};

//=========================================================================================
// OpenAPI Master Definition
//=========================================================================================

#[derive(OpenApi)]
#[openapi(
    paths(
        list_courses_handler,
        purchased_courses_handler,
        get_course_handler,
        get_lesson_handler,
        checkout_handler,
        auth::login_handler,
        auth::register_handler,
        auth::logout_handler,
        auth::me_handler,
        creator::list_managed_courses_handler,
        creator::course_editor_handler,
        creator::save_course_handler,
        creator::delete_course_handler,
        creator::list_students_handler,
        creator::get_student_handler,
        creator::update_student_handler,
        creator::toggle_student_status_handler,
        creator::list_landing_pages_handler,
        creator::create_landing_page_handler,
        creator::get_landing_page_handler,
        creator::update_landing_page_handler,
        creator::delete_landing_page_handler,
    ),
    components(
        schemas(
            CourseSummaryResponse, CourseResponse, LessonResponse, DocumentResponse,
            LessonViewResponse, CheckoutRequest, CheckoutResponse,
            auth::LoginRequest, auth::RegisterRequest, auth::UserResponse,
            auth::AuthResponse, auth::LogoutResponse,
            creator::ManagedLessonPayload, creator::CourseEditorPayload,
            creator::CourseEditorResponse, creator::ManagedCourseResponse,
            creator::SaveCourseResponse,
            creator::StudentPayload, creator::StatusResponse,
            creator::LandingPageRequest, creator::LandingPageResponse,
        )
    ),
    tags(
        (name = "LearnHub API", description = "Course catalog, lesson navigation and creator tools.")
    )
)]
pub struct ApiDoc;

/// The OpenAPI document with `server_url` advertised as the base URL.
pub fn openapi_document(server_url: &str) -> utoipa::openapi::OpenApi {
    let mut doc = ApiDoc::openapi();
    doc.servers = Some(vec![Server::new(server_url)]);
    doc
}

//=========================================================================================
// API Response and Payload Structs
//=========================================================================================

#[derive(Serialize, Deserialize, ToSchema)]
pub struct CourseSummaryResponse {
    pub id: String,
    pub title: String,
    pub description: String,
    pub price: f64,
    pub thumbnail: String,
    pub thumbnail_image: Option<String>,
}

impl From<CourseSummary> for CourseSummaryResponse {
    fn from(summary: CourseSummary) -> Self {
        Self {
            id: summary.id,
            title: summary.title,
            description: summary.description,
            price: summary.price,
            thumbnail: summary.thumbnail,
            thumbnail_image: summary.thumbnail_image,
        }
    }
}

#[derive(Serialize, Deserialize, ToSchema)]
pub struct LessonResponse {
    pub id: String,
    pub title: String,
    pub description: String,
    pub url: String,
}

impl From<&Lesson> for LessonResponse {
    fn from(lesson: &Lesson) -> Self {
        Self {
            id: lesson.id.clone(),
            title: lesson.title.clone(),
            description: lesson.description.clone(),
            url: lesson.url.clone(),
        }
    }
}

#[derive(Serialize, Deserialize, ToSchema)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum DocumentResponse {
    Pdf { url: String },
    Inline { content: String },
}

impl From<&Document> for DocumentResponse {
    fn from(document: &Document) -> Self {
        match document {
            Document::Pdf { url } => Self::Pdf { url: url.clone() },
            Document::Inline { content } => Self::Inline {
                content: content.clone(),
            },
        }
    }
}

#[derive(Serialize, Deserialize, ToSchema)]
pub struct CourseResponse {
    pub id: String,
    pub title: String,
    pub description: String,
    pub price: f64,
    pub video_intro_url: String,
    pub lessons: Vec<LessonResponse>,
    pub document: Option<DocumentResponse>,
}

impl From<&Course> for CourseResponse {
    fn from(course: &Course) -> Self {
        Self {
            id: course.id.clone(),
            title: course.title.clone(),
            description: course.description.clone(),
            price: course.price,
            video_intro_url: course.video_intro_url.clone(),
            lessons: course.lessons.iter().map(LessonResponse::from).collect(),
            document: course.document.as_ref().map(DocumentResponse::from),
        }
    }
}

/// A lesson in the context of its course, ready for the player page.
#[derive(Serialize, Deserialize, ToSchema)]
pub struct LessonViewResponse {
    pub course: CourseResponse,
    pub lesson: LessonResponse,
    pub position: usize,
    pub lesson_number: usize,
    pub lesson_count: usize,
    pub progress: f64,
    pub previous: Option<LessonResponse>,
    pub next: Option<LessonResponse>,
    pub course_complete: bool,
}

impl From<LessonView<'_>> for LessonViewResponse {
    fn from(view: LessonView<'_>) -> Self {
        Self {
            lesson_number: view.lesson_number(),
            lesson_count: view.lesson_count(),
            progress: view.progress(),
            course_complete: view.is_course_complete(),
            course: view.course.into(),
            lesson: view.lesson.into(),
            position: view.position,
            previous: view.previous.map(LessonResponse::from),
            next: view.next.map(LessonResponse::from),
        }
    }
}

#[derive(Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CheckoutRequest {
    pub name: String,
    pub phone: String,
    pub address: String,
    pub payment_method: String,
}

#[derive(Serialize, Deserialize, ToSchema)]
pub struct CheckoutResponse {
    pub course_id: String,
    pub course_title: String,
    pub price: f64,
    pub buyer_name: String,
    pub redirect_to: Option<String>,
}

//=========================================================================================
// REST API Handlers
//=========================================================================================

/// List every course in catalog order.
#[utoipa::path(
    get,
    path = "/courses",
    responses(
        (status = 200, description = "All courses; empty when the catalog failed to load", body = [CourseSummaryResponse])
    )
)]
pub async fn list_courses_handler(
    State(app_state): State<Arc<AppState>>,
) -> Json<Vec<CourseSummaryResponse>> {
    Json(
        app_state
            .catalog
            .list_courses()
            .into_iter()
            .map(CourseSummaryResponse::from)
            .collect(),
    )
}

/// The learner's courses. Ownership is not tracked, so this is the full catalog.
#[utoipa::path(
    get,
    path = "/courses/purchased",
    responses(
        (status = 200, description = "Courses with their lessons", body = [CourseResponse])
    )
)]
pub async fn purchased_courses_handler(
    State(app_state): State<Arc<AppState>>,
) -> Json<Vec<CourseResponse>> {
    Json(
        app_state
            .catalog
            .purchased_courses()
            .iter()
            .map(CourseResponse::from)
            .collect(),
    )
}

/// Fetch one course and its lessons.
#[utoipa::path(
    get,
    path = "/courses/{course_id}",
    responses(
        (status = 200, description = "The course", body = CourseResponse),
        (status = 404, description = "Course not found")
    ),
    params(
        ("course_id" = String, Path, description = "The course identifier.")
    )
)]
pub async fn get_course_handler(
    State(app_state): State<Arc<AppState>>,
    Path(course_id): Path<String>,
) -> Result<Json<CourseResponse>, (StatusCode, String)> {
    let course = app_state.catalog.get_course(&course_id).map_err(into_http)?;
    Ok(Json(course.into()))
}

/// Resolve a lesson with its previous/next neighbours and course progress.
#[utoipa::path(
    get,
    path = "/courses/{course_id}/lessons/{lesson_id}",
    responses(
        (status = 200, description = "The lesson and its neighbours", body = LessonViewResponse),
        (status = 404, description = "Course or lesson not found")
    ),
    params(
        ("course_id" = String, Path, description = "The course identifier."),
        ("lesson_id" = String, Path, description = "The lesson identifier within the course.")
    )
)]
pub async fn get_lesson_handler(
    State(app_state): State<Arc<AppState>>,
    Path((course_id, lesson_id)): Path<(String, String)>,
) -> Result<Json<LessonViewResponse>, (StatusCode, String)> {
    let view = app_state
        .catalog
        .get_lesson(&course_id, &lesson_id)
        .map_err(into_http)?;
    Ok(Json(view.into()))
}

/// Submit the checkout form for a course. No payment is taken.
#[utoipa::path(
    post,
    path = "/courses/{course_id}/checkout",
    request_body = CheckoutRequest,
    responses(
        (status = 200, description = "Checkout accepted", body = CheckoutResponse),
        (status = 401, description = "Not signed in"),
        (status = 404, description = "Course not found"),
        (status = 422, description = "Missing checkout fields")
    ),
    params(
        ("course_id" = String, Path, description = "The course being purchased.")
    )
)]
pub async fn checkout_handler(
    State(app_state): State<Arc<AppState>>,
    Extension(user): Extension<User>,
    Path(course_id): Path<String>,
    Json(req): Json<CheckoutRequest>,
) -> Result<Json<CheckoutResponse>, (StatusCode, String)> {
    let form = CheckoutForm {
        name: req.name,
        phone: req.phone,
        address: req.address,
        payment_method: req.payment_method,
    };

    let navigator = RecordingNavigator::new();
    let receipt =
        checkout::submit(&app_state.catalog, &course_id, &form, &navigator).map_err(into_http)?;
    info!("{} checked out course '{}'", user.email, receipt.course_id);

    Ok(Json(CheckoutResponse {
        course_id: receipt.course_id,
        course_title: receipt.course_title,
        price: receipt.price,
        buyer_name: receipt.buyer_name,
        redirect_to: navigator.take(),
    }))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn document_lists_creator_routes_and_server() {
        let doc = openapi_document("http://localhost:3000");
        for path in [
            "/courses/{course_id}/lessons/{lesson_id}",
            "/creator/courses",
            "/creator/courses/{course_id}",
            "/creator/landing-pages/{page_id}",
        ] {
            assert!(doc.paths.paths.contains_key(path), "missing {}", path);
        }
        let servers = doc.servers.unwrap();
        assert_eq!(servers[0].url, "http://localhost:3000");
    }
}
