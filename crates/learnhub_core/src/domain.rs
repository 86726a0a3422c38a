//! crates/learnhub_core/src/domain.rs
//!
//! Defines the pure, core data structures for the application.
//! The wire shape of the course source lives in `catalog.rs`; these types are
//! what the rest of the system works with once a record has been validated.

use chrono::NaiveDate;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use std::sync::LazyLock;

use crate::ports::{FieldError, PortError};

//=========================================================================================
// Catalog
//=========================================================================================

/// A purchasable unit containing an ordered list of lessons.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Course {
    pub id: String,
    pub title: String,
    pub description: String,
    pub price: f64,
    pub video_intro_url: String,
    /// Order is significant: it defines lesson numbering and next/previous.
    pub lessons: Vec<Lesson>,
    pub document: Option<Document>,
}

impl Course {
    /// Reduces the course to the fields shown on listing views.
    pub fn summary(&self) -> CourseSummary {
        CourseSummary {
            id: self.id.clone(),
            title: self.title.clone(),
            description: self.description.clone(),
            price: self.price,
            thumbnail: self.video_intro_url.clone(),
            thumbnail_image: youtube_thumbnail(&self.video_intro_url),
        }
    }
}

/// One playable unit within a course.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Lesson {
    pub id: String,
    pub title: String,
    pub description: String,
    pub url: String,
}

/// Supplementary course material.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Document {
    Pdf { url: String },
    Inline { content: String },
}

/// The listing-view projection of a course.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CourseSummary {
    pub id: String,
    pub title: String,
    pub description: String,
    pub price: f64,
    /// The intro video reference, played inline on course cards.
    pub thumbnail: String,
    /// A still image for the card, when the intro video is a YouTube link.
    pub thumbnail_image: Option<String>,
}

/// A lesson resolved in the context of its course, with its neighbours.
#[derive(Debug, Clone, PartialEq)]
pub struct LessonView<'a> {
    pub course: &'a Course,
    pub lesson: &'a Lesson,
    /// Zero-based position of `lesson` in `course.lessons`.
    pub position: usize,
    pub previous: Option<&'a Lesson>,
    pub next: Option<&'a Lesson>,
}

impl LessonView<'_> {
    /// One-based lesson number, as shown in "Lesson 2 of 5".
    pub fn lesson_number(&self) -> usize {
        self.position + 1
    }

    pub fn lesson_count(&self) -> usize {
        self.course.lessons.len()
    }

    /// Fraction of the course reached once this lesson is watched, in `(0, 1]`.
    pub fn progress(&self) -> f64 {
        self.lesson_number() as f64 / self.lesson_count() as f64
    }

    /// True on the last lesson, where there is nothing left to navigate to.
    pub fn is_course_complete(&self) -> bool {
        self.next.is_none()
    }
}

static YOUTUBE_ID: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?:youtube\.com/embed/|youtu\.be/)([a-zA-Z0-9_-]+)")
        .expect("static YouTube pattern is valid")
});

/// Derives the YouTube still-image URL for an embed or short link.
pub fn youtube_thumbnail(video_url: &str) -> Option<String> {
    YOUTUBE_ID
        .captures(video_url)
        .and_then(|caps| caps.get(1))
        .map(|id| format!("https://img.youtube.com/vi/{}/hqdefault.jpg", id.as_str()))
}

//=========================================================================================
// Users and Roles
//=========================================================================================

/// The two kinds of account. Policy decisions match on this exhaustively.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Creator,
    Learner,
}

impl Role {
    /// Placeholder rule carried over from the mock login: any email that
    /// mentions "creator" gets the creator role. Not an authorization check.
    pub fn infer_from_email(email: &str) -> Self {
        if email.contains("creator") {
            Role::Creator
        } else {
            Role::Learner
        }
    }

    /// Where a freshly signed-in user of this role lands.
    pub fn home_path(self) -> &'static str {
        match self {
            Role::Creator => "/creator/courses",
            Role::Learner => "/learner/courses",
        }
    }

    /// Whether the management sidebar (courses, students, landing pages) is shown.
    pub fn shows_creator_sidebar(self) -> bool {
        match self {
            Role::Creator => true,
            Role::Learner => false,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Role::Creator => "creator",
            Role::Learner => "learner",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Role {
    type Err = PortError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "creator" => Ok(Role::Creator),
            "learner" => Ok(Role::Learner),
            other => Err(PortError::Validation(vec![FieldError::new(
                "role",
                format!("'{}' is not a valid role", other),
            )])),
        }
    }
}

/// The locally stored mock-authenticated identity.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub id: String,
    pub email: String,
    pub role: Role,
    pub name: String,
}

//=========================================================================================
// Creator Area
//=========================================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StudentStatus {
    Active,
    Blocked,
}

impl StudentStatus {
    pub fn toggled(self) -> Self {
        match self {
            StudentStatus::Active => StudentStatus::Blocked,
            StudentStatus::Blocked => StudentStatus::Active,
        }
    }
}

/// A course purchaser as shown in the creator's student roster.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Student {
    pub id: String,
    pub name: String,
    pub email: String,
    pub phone: String,
    pub address: String,
    pub status: StudentStatus,
    pub join_date: NaiveDate,
    pub purchased_courses: Vec<String>,
    pub total_spent: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PublicationStatus {
    Published,
    Draft,
}

/// A marketing page bound to one catalog course.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LandingPage {
    pub id: String,
    pub title: String,
    pub description: String,
    pub key_points: Vec<String>,
    pub video_url: String,
    pub course_id: String,
    pub course_name: String,
    pub status: PublicationStatus,
    pub created_at: NaiveDate,
}

//=========================================================================================
// Creator Course Management
//=========================================================================================

/// A lesson as the creator edits it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ManagedLesson {
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub video_url: String,
}

/// A course in the creator's management table, with its sales figures.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ManagedCourse {
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub description: String,
    pub price: f64,
    pub status: PublicationStatus,
    #[serde(default)]
    pub students: u32,
    #[serde(default)]
    pub revenue: f64,
    pub created_at: NaiveDate,
    #[serde(default)]
    pub lessons: Vec<ManagedLesson>,
}
