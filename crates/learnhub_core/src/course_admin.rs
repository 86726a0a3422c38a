//! crates/learnhub_core/src/course_admin.rs
//!
//! The creator's course management table and editor. Edits live in memory only
//! and are independent of the learner catalog snapshot.

use chrono::NaiveDate;
use serde::Deserialize;
use std::collections::HashSet;
use tracing::info;
use uuid::Uuid;

use crate::domain::{ManagedCourse, ManagedLesson, PublicationStatus};
use crate::ports::{FieldError, Navigator, PortError, PortResult};

/// The id the editor is opened with to create a course instead of editing one.
pub const NEW_COURSE_ID: &str = "new";
/// Where the editor returns to after a save.
pub const COURSES_PATH: &str = "/creator/courses";

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LessonDraft {
    /// Absent for a lesson added in the editor.
    #[serde(default)]
    pub id: Option<String>,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub video_url: String,
}

/// The editable part of a course, as submitted from the editor.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CourseDraft {
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub price: f64,
    pub status: PublicationStatus,
    #[serde(default)]
    pub lessons: Vec<LessonDraft>,
}

impl Default for CourseDraft {
    fn default() -> Self {
        Self {
            title: String::new(),
            description: String::new(),
            price: 0.0,
            status: PublicationStatus::Draft,
            lessons: Vec::new(),
        }
    }
}

impl From<&ManagedCourse> for CourseDraft {
    fn from(course: &ManagedCourse) -> Self {
        Self {
            title: course.title.clone(),
            description: course.description.clone(),
            price: course.price,
            status: course.status,
            lessons: course
                .lessons
                .iter()
                .map(|lesson| LessonDraft {
                    id: Some(lesson.id.clone()),
                    title: lesson.title.clone(),
                    description: lesson.description.clone(),
                    video_url: lesson.video_url.clone(),
                })
                .collect(),
        }
    }
}

impl CourseDraft {
    fn validate(&self) -> PortResult<()> {
        let mut errors = Vec::new();
        if self.title.trim().is_empty() {
            errors.push(FieldError::new("title", "Course title is required"));
        }
        if !self.price.is_finite() || self.price < 0.0 {
            errors.push(FieldError::new("price", "Price must be zero or more"));
        }

        let mut seen = HashSet::new();
        for (index, lesson) in self.lessons.iter().enumerate() {
            let Some(id) = lesson.id.as_deref().map(str::trim).filter(|id| !id.is_empty())
            else {
                continue;
            };
            if !seen.insert(id) {
                errors.push(FieldError::new(
                    format!("lessons[{}].id", index),
                    format!("Duplicate lesson id '{}'", id),
                ));
            }
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(PortError::Validation(errors))
        }
    }

    /// Lessons in editor order; new lessons get a fresh id.
    fn into_lessons(self) -> Vec<ManagedLesson> {
        self.lessons
            .into_iter()
            .map(|lesson| ManagedLesson {
                id: lesson
                    .id
                    .map(|id| id.trim().to_string())
                    .filter(|id| !id.is_empty())
                    .unwrap_or_else(|| Uuid::new_v4().to_string()),
                title: lesson.title.trim().to_string(),
                description: lesson.description,
                video_url: lesson.video_url.trim().to_string(),
            })
            .collect()
    }
}

#[derive(Debug, Clone, Default)]
pub struct CourseAdmin {
    courses: Vec<ManagedCourse>,
}

impl CourseAdmin {
    pub fn new(courses: Vec<ManagedCourse>) -> Self {
        Self { courses }
    }

    pub fn list(&self) -> &[ManagedCourse] {
        &self.courses
    }

    pub fn get(&self, course_id: &str) -> PortResult<&ManagedCourse> {
        self.courses
            .iter()
            .find(|course| course.id == course_id)
            .ok_or_else(|| not_found(course_id))
    }

    /// What the editor opens with: a blank draft for `new`, else the stored course.
    pub fn editor(&self, course_id: &str) -> PortResult<CourseDraft> {
        if course_id == NEW_COURSE_ID {
            return Ok(CourseDraft::default());
        }
        self.get(course_id).map(CourseDraft::from)
    }

    /// Creates the course when `course_id` is `new`, otherwise replaces the
    /// editable fields of the stored one. Sales figures and creation date are kept.
    pub fn save(
        &mut self,
        course_id: &str,
        draft: CourseDraft,
        today: NaiveDate,
        navigator: &dyn Navigator,
    ) -> PortResult<ManagedCourse> {
        draft.validate()?;

        let saved = if course_id == NEW_COURSE_ID {
            let course = ManagedCourse {
                id: Uuid::new_v4().to_string(),
                title: draft.title.trim().to_string(),
                description: draft.description.clone(),
                price: draft.price,
                status: draft.status,
                students: 0,
                revenue: 0.0,
                created_at: today,
                lessons: draft.into_lessons(),
            };
            info!("Created course '{}' ({})", course.title, course.id);
            self.courses.push(course.clone());
            course
        } else {
            let course = self
                .courses
                .iter_mut()
                .find(|course| course.id == course_id)
                .ok_or_else(|| not_found(course_id))?;
            course.title = draft.title.trim().to_string();
            course.description = draft.description.clone();
            course.price = draft.price;
            course.status = draft.status;
            course.lessons = draft.into_lessons();
            info!("Saved course '{}' with {} lessons", course.id, course.lessons.len());
            course.clone()
        };

        navigator.redirect(COURSES_PATH);
        Ok(saved)
    }

    pub fn delete(&mut self, course_id: &str) -> PortResult<ManagedCourse> {
        let position = self
            .courses
            .iter()
            .position(|course| course.id == course_id)
            .ok_or_else(|| not_found(course_id))?;
        info!("Deleted course '{}' and its lessons", course_id);
        Ok(self.courses.remove(position))
    }
}

fn not_found(course_id: &str) -> PortError {
    PortError::NotFound(format!("course '{}'", course_id))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;

    #[derive(Default)]
    struct Trail(Mutex<Vec<String>>);

    impl Navigator for Trail {
        fn redirect(&self, path: &str) {
            self.0.lock().unwrap().push(path.to_string());
        }
    }

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn lesson(id: &str, title: &str) -> ManagedLesson {
        ManagedLesson {
            id: id.to_string(),
            title: title.to_string(),
            description: String::new(),
            video_url: format!("https://www.youtube.com/embed/{}", id),
        }
    }

    fn admin() -> CourseAdmin {
        CourseAdmin::new(vec![ManagedCourse {
            id: "1".to_string(),
            title: "Introduction to Next.js".to_string(),
            description: "Learn the fundamentals of Next.js".to_string(),
            price: 49.99,
            status: PublicationStatus::Published,
            students: 120,
            revenue: 2400.0,
            created_at: date(2023, 1, 15),
            lessons: vec![lesson("1", "Introduction"), lesson("2", "Pages and Routing")],
        }])
    }

    #[test]
    fn editor_opens_blank_draft_for_new_course() {
        let draft = admin().editor(NEW_COURSE_ID).unwrap();
        assert!(draft.title.is_empty());
        assert_eq!(draft.price, 0.0);
        assert_eq!(draft.status, PublicationStatus::Draft);
        assert!(draft.lessons.is_empty());

        let existing = admin().editor("1").unwrap();
        assert_eq!(existing.lessons.len(), 2);
        assert_eq!(existing.lessons[1].id.as_deref(), Some("2"));
        assert!(matches!(admin().editor("9"), Err(PortError::NotFound(_))));
    }

    #[test]
    fn creating_assigns_ids_and_redirects_to_the_table() {
        let mut admin = admin();
        let trail = Trail::default();
        let draft = CourseDraft {
            title: " Advanced Tailwind CSS ".to_string(),
            price: 79.99,
            lessons: vec![
                LessonDraft {
                    title: "Customization".to_string(),
                    ..LessonDraft::default()
                },
                LessonDraft {
                    title: "Plugins".to_string(),
                    ..LessonDraft::default()
                },
            ],
            ..CourseDraft::default()
        };

        let course = admin.save(NEW_COURSE_ID, draft, date(2024, 5, 1), &trail).unwrap();
        assert_ne!(course.id, NEW_COURSE_ID);
        assert_eq!(course.title, "Advanced Tailwind CSS");
        assert_eq!(course.students, 0);
        assert_eq!(course.created_at, date(2024, 5, 1));
        assert_ne!(course.lessons[0].id, course.lessons[1].id);
        assert_eq!(admin.list().len(), 2);
        assert_eq!(admin.get(&course.id).unwrap(), &course);
        assert_eq!(*trail.0.lock().unwrap(), vec![COURSES_PATH.to_string()]);
    }

    #[test]
    fn saving_edits_lessons_and_keeps_sales_figures() {
        let mut admin = admin();
        let mut draft = admin.editor("1").unwrap();
        draft.status = PublicationStatus::Draft;
        draft.lessons.remove(0);
        draft.lessons[0].title = "App Router".to_string();
        draft.lessons.push(LessonDraft {
            title: "Data Fetching".to_string(),
            ..LessonDraft::default()
        });

        let saved = admin.save("1", draft, date(2024, 5, 1), &Trail::default()).unwrap();
        assert_eq!(saved.status, PublicationStatus::Draft);
        assert_eq!(saved.students, 120);
        assert_eq!(saved.revenue, 2400.0);
        assert_eq!(saved.created_at, date(2023, 1, 15));
        let titles: Vec<&str> = saved.lessons.iter().map(|l| l.title.as_str()).collect();
        assert_eq!(titles, vec!["App Router", "Data Fetching"]);
        assert_eq!(saved.lessons[0].id, "2");
    }

    #[test]
    fn save_rejects_bad_drafts_without_redirecting() {
        let mut admin = admin();
        let trail = Trail::default();

        let mut duplicated = admin.editor("1").unwrap();
        duplicated.lessons[1].id = Some("1".to_string());
        duplicated.title = "  ".to_string();
        duplicated.price = -1.0;
        match admin.save("1", duplicated, date(2024, 5, 1), &trail) {
            Err(PortError::Validation(errors)) => {
                let fields: Vec<&str> = errors.iter().map(|e| e.field.as_str()).collect();
                assert_eq!(fields, vec!["title", "price", "lessons[1].id"]);
            }
            other => panic!("expected validation error, got {:?}", other),
        }

        let draft = admin.editor("1").unwrap();
        let missing = admin.save("9", draft, date(2024, 5, 1), &trail);
        assert!(matches!(missing, Err(PortError::NotFound(_))));
        assert!(trail.0.lock().unwrap().is_empty());
        assert_eq!(admin.get("1").unwrap().title, "Introduction to Next.js");
    }

    #[test]
    fn delete_removes_the_course() {
        let mut admin = admin();
        let removed = admin.delete("1").unwrap();
        assert_eq!(removed.lessons.len(), 2);
        assert!(admin.list().is_empty());
        assert!(matches!(admin.delete("1"), Err(PortError::NotFound(_))));
    }
}
