//! crates/learnhub_core/src/catalog.rs
//!
//! The catalog/progress resolver. A `Catalog` is an immutable snapshot built
//! from one read of the course source: records are validated into domain
//! types, indexed by course id, and then served without further I/O.

use serde::Deserialize;
use std::collections::{HashMap, HashSet};
use tracing::{info, warn};

use crate::domain::{Course, CourseSummary, Document, Lesson, LessonView};
use crate::ports::{CatalogSource, PortError, PortResult};

//=========================================================================================
// Source Record Structs
//=========================================================================================

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct CourseRecord {
    id: String,
    #[serde(default)]
    title: String,
    #[serde(default)]
    description: String,
    #[serde(default)]
    price: f64,
    #[serde(default)]
    video_intro_url: String,
    #[serde(default)]
    document: Option<DocumentRecord>,
    videos: Vec<VideoRecord>,
}

#[derive(Deserialize)]
struct DocumentRecord {
    #[serde(rename = "type")]
    kind: String,
    content: Option<String>,
    url: Option<String>,
}

#[derive(Deserialize)]
struct VideoRecord {
    id: String,
    #[serde(default)]
    title: String,
    #[serde(default)]
    description: String,
    #[serde(default)]
    url: String,
}

impl DocumentRecord {
    fn to_domain(self) -> Option<Document> {
        match (self.kind.as_str(), self.url, self.content) {
            ("pdf", Some(url), _) => Some(Document::Pdf { url }),
            (_, _, Some(content)) => Some(Document::Inline { content }),
            _ => None,
        }
    }
}

impl VideoRecord {
    fn to_domain(self) -> Lesson {
        Lesson {
            id: self.id,
            title: self.title,
            description: self.description,
            url: self.url,
        }
    }
}

impl CourseRecord {
    fn try_into_domain(self) -> PortResult<Course> {
        if self.id.trim().is_empty() {
            return Err(malformed("course with a blank id"));
        }
        if !self.price.is_finite() || self.price < 0.0 {
            return Err(malformed(format!(
                "course '{}' has an invalid price {}",
                self.id, self.price
            )));
        }

        let mut seen = HashSet::with_capacity(self.videos.len());
        for video in &self.videos {
            if video.id.trim().is_empty() {
                return Err(malformed(format!(
                    "course '{}' has a lesson with a blank id",
                    self.id
                )));
            }
            if !seen.insert(video.id.as_str()) {
                return Err(malformed(format!(
                    "course '{}' repeats lesson id '{}'",
                    self.id, video.id
                )));
            }
        }

        Ok(Course {
            id: self.id,
            title: self.title,
            description: self.description,
            price: self.price,
            video_intro_url: self.video_intro_url,
            lessons: self.videos.into_iter().map(VideoRecord::to_domain).collect(),
            document: self.document.and_then(DocumentRecord::to_domain),
        })
    }
}

fn malformed(reason: impl Into<String>) -> PortError {
    PortError::MalformedSource(reason.into())
}

//=========================================================================================
// The Catalog Snapshot
//=========================================================================================

/// An in-memory, read-only snapshot of the course catalog.
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    courses: Vec<Course>,
    index: HashMap<String, usize>,
}

impl Catalog {
    /// An empty snapshot, what callers see after a failed load.
    pub fn empty() -> Self {
        Self::default()
    }

    /// Builds a snapshot from already-validated courses.
    ///
    /// Fails if two courses share an identifier.
    pub fn from_courses(courses: Vec<Course>) -> PortResult<Self> {
        let mut index = HashMap::with_capacity(courses.len());
        for (position, course) in courses.iter().enumerate() {
            if index.insert(course.id.clone(), position).is_some() {
                return Err(malformed(format!("duplicate course id '{}'", course.id)));
            }
        }
        Ok(Self { courses, index })
    }

    /// Parses and validates the JSON source format.
    pub fn from_json(bytes: &[u8]) -> PortResult<Self> {
        let records: Vec<CourseRecord> =
            serde_json::from_slice(bytes).map_err(|e| malformed(e.to_string()))?;
        let courses = records
            .into_iter()
            .map(CourseRecord::try_into_domain)
            .collect::<PortResult<Vec<_>>>()?;
        Self::from_courses(courses)
    }

    /// Reads the source once and builds the snapshot.
    ///
    /// Never fails: an unreadable or malformed source is logged and yields an
    /// empty catalog so callers can present a "no data" state.
    pub async fn load(source: &dyn CatalogSource) -> Self {
        match Self::try_load(source).await {
            Ok(catalog) => {
                info!(
                    "Loaded {} course(s) from {}",
                    catalog.len(),
                    source.describe()
                );
                catalog
            }
            Err(e) => {
                warn!(
                    "Failed to load course catalog from {}: {}. Serving an empty catalog.",
                    source.describe(),
                    e
                );
                Self::empty()
            }
        }
    }

    /// Like [`Catalog::load`], but surfaces the failure to the caller.
    pub async fn try_load(source: &dyn CatalogSource) -> PortResult<Self> {
        let bytes = source.read_source().await?;
        Self::from_json(&bytes)
    }

    pub fn len(&self) -> usize {
        self.courses.len()
    }

    pub fn is_empty(&self) -> bool {
        self.courses.is_empty()
    }

    /// All courses in source order, reduced for listing views.
    pub fn list_courses(&self) -> Vec<CourseSummary> {
        self.courses.iter().map(Course::summary).collect()
    }

    /// The courses shown as "purchased". Ownership is not modelled, so this is
    /// the whole catalog.
    pub fn purchased_courses(&self) -> &[Course] {
        &self.courses
    }

    pub fn get_course(&self, course_id: &str) -> PortResult<&Course> {
        self.index
            .get(course_id)
            .map(|&position| &self.courses[position])
            .ok_or_else(|| PortError::NotFound(format!("course '{}'", course_id)))
    }

    /// Resolves a lesson and its neighbours for sequential navigation.
    pub fn get_lesson(&self, course_id: &str, lesson_id: &str) -> PortResult<LessonView<'_>> {
        let course = self.get_course(course_id)?;
        let position = course
            .lessons
            .iter()
            .position(|lesson| lesson.id == lesson_id)
            .ok_or_else(|| {
                PortError::NotFound(format!(
                    "lesson '{}' in course '{}'",
                    lesson_id, course_id
                ))
            })?;

        Ok(LessonView {
            course,
            lesson: &course.lessons[position],
            position,
            previous: position
                .checked_sub(1)
                .and_then(|prev| course.lessons.get(prev)),
            next: course.lessons.get(position + 1),
        })
    }
}
