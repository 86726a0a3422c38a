//! services/api/src/web/creator.rs
//!
//! Handlers for the creator area: course management, the student roster and
//! landing pages.
//! Every route here sits behind the `require_creator` middleware.

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::Json,
};
use chrono::{NaiveDate, Utc};
use learnhub_core::course_admin::NEW_COURSE_ID;
use learnhub_core::domain::{
    LandingPage, ManagedCourse, ManagedLesson, PublicationStatus, Student, StudentStatus,
};
use learnhub_core::{CourseDraft, LandingPageDraft, LessonDraft};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use utoipa::{IntoParams, ToSchema};

use crate::adapters::RecordingNavigator;
use crate::error::into_http;
use crate::web::state::AppState;

//=========================================================================================
// Request/Response Types
//=========================================================================================

#[derive(Serialize, Deserialize, ToSchema, Clone, Copy, PartialEq, Eq, Debug)]
#[serde(rename_all = "lowercase")]
pub enum StatusPayload {
    Active,
    Blocked,
}

impl From<StudentStatus> for StatusPayload {
    fn from(status: StudentStatus) -> Self {
        match status {
            StudentStatus::Active => Self::Active,
            StudentStatus::Blocked => Self::Blocked,
        }
    }
}

impl From<StatusPayload> for StudentStatus {
    fn from(status: StatusPayload) -> Self {
        match status {
            StatusPayload::Active => Self::Active,
            StatusPayload::Blocked => Self::Blocked,
        }
    }
}

/// A student as listed in the roster, also accepted as the body of an edit.
#[derive(Serialize, Deserialize, ToSchema)]
pub struct StudentPayload {
    pub id: String,
    pub name: String,
    pub email: String,
    pub phone: String,
    pub address: String,
    pub status: StatusPayload,
    pub join_date: NaiveDate,
    pub purchased_courses: Vec<String>,
    pub total_spent: f64,
}

impl From<&Student> for StudentPayload {
    fn from(student: &Student) -> Self {
        Self {
            id: student.id.clone(),
            name: student.name.clone(),
            email: student.email.clone(),
            phone: student.phone.clone(),
            address: student.address.clone(),
            status: student.status.into(),
            join_date: student.join_date,
            purchased_courses: student.purchased_courses.clone(),
            total_spent: student.total_spent,
        }
    }
}

impl From<StudentPayload> for Student {
    fn from(payload: StudentPayload) -> Self {
        Self {
            id: payload.id,
            name: payload.name,
            email: payload.email,
            phone: payload.phone,
            address: payload.address,
            status: payload.status.into(),
            join_date: payload.join_date,
            purchased_courses: payload.purchased_courses,
            total_spent: payload.total_spent,
        }
    }
}

#[derive(Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct StudentSearch {
    /// Case-insensitive match on name or email.
    pub search: Option<String>,
}

#[derive(Serialize, Deserialize, ToSchema)]
pub struct StatusResponse {
    pub id: String,
    pub status: StatusPayload,
}

#[derive(Serialize, Deserialize, ToSchema, Clone, Copy, PartialEq, Eq, Debug)]
#[serde(rename_all = "lowercase")]
pub enum PublicationPayload {
    Published,
    Draft,
}

impl From<PublicationStatus> for PublicationPayload {
    fn from(status: PublicationStatus) -> Self {
        match status {
            PublicationStatus::Published => Self::Published,
            PublicationStatus::Draft => Self::Draft,
        }
    }
}

impl From<PublicationPayload> for PublicationStatus {
    fn from(status: PublicationPayload) -> Self {
        match status {
            PublicationPayload::Published => Self::Published,
            PublicationPayload::Draft => Self::Draft,
        }
    }
}

#[derive(Deserialize, ToSchema)]
pub struct LandingPageRequest {
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub key_points: Vec<String>,
    #[serde(default)]
    pub video_url: String,
    pub course_id: String,
    pub status: PublicationPayload,
}

impl From<LandingPageRequest> for LandingPageDraft {
    fn from(req: LandingPageRequest) -> Self {
        Self {
            title: req.title,
            description: req.description,
            key_points: req.key_points,
            video_url: req.video_url,
            course_id: req.course_id,
            status: req.status.into(),
        }
    }
}

#[derive(Serialize, Deserialize, ToSchema)]
pub struct LandingPageResponse {
    pub id: String,
    pub title: String,
    pub description: String,
    pub key_points: Vec<String>,
    pub video_url: String,
    pub course_id: String,
    pub course_name: String,
    pub status: PublicationPayload,
    pub created_at: NaiveDate,
}

impl From<&LandingPage> for LandingPageResponse {
    fn from(page: &LandingPage) -> Self {
        Self {
            id: page.id.clone(),
            title: page.title.clone(),
            description: page.description.clone(),
            key_points: page.key_points.clone(),
            video_url: page.video_url.clone(),
            course_id: page.course_id.clone(),
            course_name: page.course_name.clone(),
            status: page.status.into(),
            created_at: page.created_at,
        }
    }
}

#[derive(Serialize, Deserialize, ToSchema)]
pub struct ManagedLessonPayload {
    /// Omitted for a lesson added in the editor.
    pub id: Option<String>,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub video_url: String,
}

impl From<ManagedLessonPayload> for LessonDraft {
    fn from(payload: ManagedLessonPayload) -> Self {
        Self {
            id: payload.id,
            title: payload.title,
            description: payload.description,
            video_url: payload.video_url,
        }
    }
}

impl From<LessonDraft> for ManagedLessonPayload {
    fn from(draft: LessonDraft) -> Self {
        Self {
            id: draft.id,
            title: draft.title,
            description: draft.description,
            video_url: draft.video_url,
        }
    }
}

impl From<&ManagedLesson> for ManagedLessonPayload {
    fn from(lesson: &ManagedLesson) -> Self {
        Self {
            id: Some(lesson.id.clone()),
            title: lesson.title.clone(),
            description: lesson.description.clone(),
            video_url: lesson.video_url.clone(),
        }
    }
}

/// The course editor form. Also the body of a save.
#[derive(Serialize, Deserialize, ToSchema)]
pub struct CourseEditorPayload {
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub price: f64,
    pub status: PublicationPayload,
    #[serde(default)]
    pub lessons: Vec<ManagedLessonPayload>,
}

impl From<CourseEditorPayload> for CourseDraft {
    fn from(payload: CourseEditorPayload) -> Self {
        Self {
            title: payload.title,
            description: payload.description,
            price: payload.price,
            status: payload.status.into(),
            lessons: payload.lessons.into_iter().map(LessonDraft::from).collect(),
        }
    }
}

impl From<CourseDraft> for CourseEditorPayload {
    fn from(draft: CourseDraft) -> Self {
        Self {
            title: draft.title,
            description: draft.description,
            price: draft.price,
            status: draft.status.into(),
            lessons: draft.lessons.into_iter().map(ManagedLessonPayload::from).collect(),
        }
    }
}

#[derive(Serialize, Deserialize, ToSchema)]
pub struct CourseEditorResponse {
    /// True when the editor was opened with the `new` id.
    pub is_new: bool,
    pub course: CourseEditorPayload,
}

/// A row of the course management table, with its lessons.
#[derive(Serialize, Deserialize, ToSchema)]
pub struct ManagedCourseResponse {
    pub id: String,
    pub title: String,
    pub description: String,
    pub price: f64,
    pub status: PublicationPayload,
    pub students: u32,
    pub revenue: f64,
    pub created_at: NaiveDate,
    pub lessons: Vec<ManagedLessonPayload>,
}

impl From<&ManagedCourse> for ManagedCourseResponse {
    fn from(course: &ManagedCourse) -> Self {
        Self {
            id: course.id.clone(),
            title: course.title.clone(),
            description: course.description.clone(),
            price: course.price,
            status: course.status.into(),
            students: course.students,
            revenue: course.revenue,
            created_at: course.created_at,
            lessons: course.lessons.iter().map(ManagedLessonPayload::from).collect(),
        }
    }
}

#[derive(Serialize, Deserialize, ToSchema)]
pub struct SaveCourseResponse {
    pub course: ManagedCourseResponse,
    pub redirect_to: Option<String>,
}

//=========================================================================================
// Course Management Handlers
//=========================================================================================

#[utoipa::path(
    get,
    path = "/creator/courses",
    responses(
        (status = 200, description = "The course management table", body = [ManagedCourseResponse]),
        (status = 401, description = "Not signed in"),
        (status = 403, description = "Not a creator")
    )
)]
pub async fn list_managed_courses_handler(
    State(app_state): State<Arc<AppState>>,
) -> Json<Vec<ManagedCourseResponse>> {
    let courses = app_state.courses.read().await;
    let rows = courses.list().iter().map(ManagedCourseResponse::from).collect();
    Json(rows)
}

/// Open the editor. `new` yields a blank draft.
#[utoipa::path(
    get,
    path = "/creator/courses/{course_id}",
    responses(
        (status = 200, description = "The editor form", body = CourseEditorResponse),
        (status = 404, description = "Course not found")
    ),
    params(("course_id" = String, Path, description = "The course identifier, or `new`."))
)]
pub async fn course_editor_handler(
    State(app_state): State<Arc<AppState>>,
    Path(course_id): Path<String>,
) -> Result<Json<CourseEditorResponse>, (StatusCode, String)> {
    let draft = app_state
        .courses
        .read()
        .await
        .editor(&course_id)
        .map_err(into_http)?;
    Ok(Json(CourseEditorResponse {
        is_new: course_id == NEW_COURSE_ID,
        course: draft.into(),
    }))
}

/// Save the editor. Saving to `new` creates the course.
#[utoipa::path(
    put,
    path = "/creator/courses/{course_id}",
    request_body = CourseEditorPayload,
    responses(
        (status = 200, description = "Course saved", body = SaveCourseResponse),
        (status = 201, description = "Course created", body = SaveCourseResponse),
        (status = 404, description = "Course not found"),
        (status = 422, description = "Missing title, negative price or duplicate lesson ids")
    ),
    params(("course_id" = String, Path, description = "The course identifier, or `new`."))
)]
pub async fn save_course_handler(
    State(app_state): State<Arc<AppState>>,
    Path(course_id): Path<String>,
    Json(payload): Json<CourseEditorPayload>,
) -> Result<(StatusCode, Json<SaveCourseResponse>), (StatusCode, String)> {
    let navigator = RecordingNavigator::new();
    let today = Utc::now().date_naive();
    let course = app_state
        .courses
        .write()
        .await
        .save(&course_id, payload.into(), today, &navigator)
        .map_err(into_http)?;

    let status = if course_id == NEW_COURSE_ID {
        StatusCode::CREATED
    } else {
        StatusCode::OK
    };
    Ok((
        status,
        Json(SaveCourseResponse {
            course: (&course).into(),
            redirect_to: navigator.take(),
        }),
    ))
}

#[utoipa::path(
    delete,
    path = "/creator/courses/{course_id}",
    responses(
        (status = 204, description = "Course and its lessons deleted"),
        (status = 404, description = "Course not found")
    ),
    params(("course_id" = String, Path, description = "The course identifier."))
)]
pub async fn delete_course_handler(
    State(app_state): State<Arc<AppState>>,
    Path(course_id): Path<String>,
) -> Result<StatusCode, (StatusCode, String)> {
    app_state
        .courses
        .write()
        .await
        .delete(&course_id)
        .map_err(into_http)?;
    Ok(StatusCode::NO_CONTENT)
}

//=========================================================================================
// Student Roster Handlers
//=========================================================================================

#[utoipa::path(
    get,
    path = "/creator/students",
    params(StudentSearch),
    responses(
        (status = 200, description = "Matching students", body = [StudentPayload]),
        (status = 401, description = "Not signed in"),
        (status = 403, description = "Not a creator")
    )
)]
pub async fn list_students_handler(
    State(app_state): State<Arc<AppState>>,
    Query(query): Query<StudentSearch>,
) -> Json<Vec<StudentPayload>> {
    let roster = app_state.roster.read().await;
    let term = query.search.unwrap_or_default();
    let students = roster.search(&term).into_iter().map(StudentPayload::from).collect();
    Json(students)
}

#[utoipa::path(
    get,
    path = "/creator/students/{student_id}",
    responses(
        (status = 200, description = "The student", body = StudentPayload),
        (status = 404, description = "Student not found")
    ),
    params(("student_id" = String, Path, description = "The student identifier."))
)]
pub async fn get_student_handler(
    State(app_state): State<Arc<AppState>>,
    Path(student_id): Path<String>,
) -> Result<Json<StudentPayload>, (StatusCode, String)> {
    let roster = app_state.roster.read().await;
    let student = roster.get(&student_id).map_err(into_http)?;
    Ok(Json(student.into()))
}

#[utoipa::path(
    put,
    path = "/creator/students/{student_id}",
    request_body = StudentPayload,
    responses(
        (status = 200, description = "Student updated", body = StudentPayload),
        (status = 400, description = "Body id does not match the path"),
        (status = 404, description = "Student not found")
    ),
    params(("student_id" = String, Path, description = "The student identifier."))
)]
pub async fn update_student_handler(
    State(app_state): State<Arc<AppState>>,
    Path(student_id): Path<String>,
    Json(payload): Json<StudentPayload>,
) -> Result<Json<StudentPayload>, (StatusCode, String)> {
    if payload.id != student_id {
        return Err((
            StatusCode::BAD_REQUEST,
            "Student id in the body does not match the path".to_string(),
        ));
    }
    let mut roster = app_state.roster.write().await;
    let student = roster.update(payload.into()).map_err(into_http)?;
    Ok(Json(student.into()))
}

#[utoipa::path(
    post,
    path = "/creator/students/{student_id}/toggle-status",
    responses(
        (status = 200, description = "New status", body = StatusResponse),
        (status = 404, description = "Student not found")
    ),
    params(("student_id" = String, Path, description = "The student identifier."))
)]
pub async fn toggle_student_status_handler(
    State(app_state): State<Arc<AppState>>,
    Path(student_id): Path<String>,
) -> Result<Json<StatusResponse>, (StatusCode, String)> {
    let status = app_state
        .roster
        .write()
        .await
        .toggle_status(&student_id)
        .map_err(into_http)?;
    Ok(Json(StatusResponse {
        id: student_id,
        status: status.into(),
    }))
}

//=========================================================================================
// Landing Page Handlers
//=========================================================================================

#[utoipa::path(
    get,
    path = "/creator/landing-pages",
    responses(
        (status = 200, description = "All landing pages", body = [LandingPageResponse])
    )
)]
pub async fn list_landing_pages_handler(
    State(app_state): State<Arc<AppState>>,
) -> Json<Vec<LandingPageResponse>> {
    let pages = app_state.landing_pages.read().await;
    let listed = pages.list().iter().map(LandingPageResponse::from).collect();
    Json(listed)
}

#[utoipa::path(
    post,
    path = "/creator/landing-pages",
    request_body = LandingPageRequest,
    responses(
        (status = 201, description = "Landing page created", body = LandingPageResponse),
        (status = 404, description = "Course not found"),
        (status = 422, description = "Missing title or course")
    )
)]
pub async fn create_landing_page_handler(
    State(app_state): State<Arc<AppState>>,
    Json(req): Json<LandingPageRequest>,
) -> Result<(StatusCode, Json<LandingPageResponse>), (StatusCode, String)> {
    let today = Utc::now().date_naive();
    let page = app_state
        .landing_pages
        .write()
        .await
        .create(req.into(), &app_state.catalog, today)
        .map_err(into_http)?;
    Ok((StatusCode::CREATED, Json((&page).into())))
}

#[utoipa::path(
    get,
    path = "/creator/landing-pages/{page_id}",
    responses(
        (status = 200, description = "The landing page", body = LandingPageResponse),
        (status = 404, description = "Landing page not found")
    ),
    params(("page_id" = String, Path, description = "The landing page identifier."))
)]
pub async fn get_landing_page_handler(
    State(app_state): State<Arc<AppState>>,
    Path(page_id): Path<String>,
) -> Result<Json<LandingPageResponse>, (StatusCode, String)> {
    let pages = app_state.landing_pages.read().await;
    let page = pages.get(&page_id).map_err(into_http)?;
    Ok(Json(page.into()))
}

#[utoipa::path(
    put,
    path = "/creator/landing-pages/{page_id}",
    request_body = LandingPageRequest,
    responses(
        (status = 200, description = "Landing page updated", body = LandingPageResponse),
        (status = 404, description = "Landing page or course not found"),
        (status = 422, description = "Missing title or course")
    ),
    params(("page_id" = String, Path, description = "The landing page identifier."))
)]
pub async fn update_landing_page_handler(
    State(app_state): State<Arc<AppState>>,
    Path(page_id): Path<String>,
    Json(req): Json<LandingPageRequest>,
) -> Result<Json<LandingPageResponse>, (StatusCode, String)> {
    let page = app_state
        .landing_pages
        .write()
        .await
        .update(&page_id, req.into(), &app_state.catalog)
        .map_err(into_http)?;
    Ok(Json((&page).into()))
}

#[utoipa::path(
    delete,
    path = "/creator/landing-pages/{page_id}",
    responses(
        (status = 204, description = "Landing page deleted"),
        (status = 404, description = "Landing page not found")
    ),
    params(("page_id" = String, Path, description = "The landing page identifier."))
)]
pub async fn delete_landing_page_handler(
    State(app_state): State<Arc<AppState>>,
    Path(page_id): Path<String>,
) -> Result<StatusCode, (StatusCode, String)> {
    app_state
        .landing_pages
        .write()
        .await
        .delete(&page_id)
        .map_err(into_http)?;
    Ok(StatusCode::NO_CONTENT)
}
