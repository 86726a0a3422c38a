//! crates/learnhub_core/src/landing.rs
//!
//! Creator-managed landing pages. Each page points at one catalog course and
//! carries the course title alongside it for display.

use chrono::NaiveDate;
use serde::Deserialize;
use tracing::info;
use uuid::Uuid;

use crate::catalog::Catalog;
use crate::domain::{LandingPage, PublicationStatus};
use crate::ports::{FieldError, PortError, PortResult};

/// The editable part of a landing page, as submitted from the create/edit form.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LandingPageDraft {
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub key_points: Vec<String>,
    #[serde(default)]
    pub video_url: String,
    pub course_id: String,
    pub status: PublicationStatus,
}

impl LandingPageDraft {
    fn validate(&self) -> PortResult<()> {
        let mut errors = Vec::new();
        if self.title.trim().is_empty() {
            errors.push(FieldError::new("title", "Title is required"));
        }
        if self.course_id.trim().is_empty() {
            errors.push(FieldError::new("courseId", "A course must be selected"));
        }
        if errors.is_empty() {
            Ok(())
        } else {
            Err(PortError::Validation(errors))
        }
    }

    /// Trimmed key points, with the empty rows left over from the form removed.
    fn cleaned_key_points(&self) -> Vec<String> {
        self.key_points
            .iter()
            .map(|point| point.trim())
            .filter(|point| !point.is_empty())
            .map(str::to_string)
            .collect()
    }
}

#[derive(Debug, Clone, Default)]
pub struct LandingPages {
    pages: Vec<LandingPage>,
}

impl LandingPages {
    pub fn new(pages: Vec<LandingPage>) -> Self {
        Self { pages }
    }

    pub fn list(&self) -> &[LandingPage] {
        &self.pages
    }

    pub fn get(&self, page_id: &str) -> PortResult<&LandingPage> {
        self.pages
            .iter()
            .find(|page| page.id == page_id)
            .ok_or_else(|| not_found(page_id))
    }

    pub fn create(
        &mut self,
        draft: LandingPageDraft,
        catalog: &Catalog,
        today: NaiveDate,
    ) -> PortResult<LandingPage> {
        draft.validate()?;
        let course_name = catalog.get_course(&draft.course_id)?.title.clone();
        let page = LandingPage {
            id: Uuid::new_v4().to_string(),
            key_points: draft.cleaned_key_points(),
            title: draft.title.trim().to_string(),
            description: draft.description,
            video_url: draft.video_url,
            course_id: draft.course_id,
            course_name,
            status: draft.status,
            created_at: today,
        };
        info!("Created landing page '{}' for course '{}'", page.id, page.course_id);
        self.pages.push(page.clone());
        Ok(page)
    }

    /// Replaces the editable fields of an existing page. Id and creation date are kept.
    pub fn update(
        &mut self,
        page_id: &str,
        draft: LandingPageDraft,
        catalog: &Catalog,
    ) -> PortResult<LandingPage> {
        draft.validate()?;
        let course_name = catalog.get_course(&draft.course_id)?.title.clone();
        let page = self
            .pages
            .iter_mut()
            .find(|page| page.id == page_id)
            .ok_or_else(|| not_found(page_id))?;

        page.key_points = draft.cleaned_key_points();
        page.title = draft.title.trim().to_string();
        page.description = draft.description;
        page.video_url = draft.video_url;
        page.course_id = draft.course_id;
        page.course_name = course_name;
        page.status = draft.status;
        Ok(page.clone())
    }

    pub fn delete(&mut self, page_id: &str) -> PortResult<LandingPage> {
        let position = self
            .pages
            .iter()
            .position(|page| page.id == page_id)
            .ok_or_else(|| not_found(page_id))?;
        info!("Deleted landing page '{}'", page_id);
        Ok(self.pages.remove(position))
    }
}

fn not_found(page_id: &str) -> PortError {
    PortError::NotFound(format!("landing page '{}'", page_id))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn catalog() -> Catalog {
        Catalog::from_json(
            br#"[
                { "id": "1", "title": "Introduction to Next.js", "price": 49.99, "videos": [] },
                { "id": "2", "title": "Advanced Tailwind CSS", "price": 79.99, "videos": [] }
            ]"#,
        )
        .unwrap()
    }

    fn draft(course_id: &str) -> LandingPageDraft {
        LandingPageDraft {
            title: "Master Next.js in 30 Days".to_string(),
            description: "Learn Next.js from scratch".to_string(),
            key_points: vec![
                "Learn modern React patterns".to_string(),
                "  ".to_string(),
                " Deploy to production ".to_string(),
            ],
            video_url: "https://www.youtube.com/embed/fmj9yG2I0L8".to_string(),
            course_id: course_id.to_string(),
            status: PublicationStatus::Draft,
        }
    }

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 5, 1).unwrap()
    }

    #[test]
    fn create_resolves_course_name_and_drops_blank_points() {
        let mut pages = LandingPages::default();
        let page = pages.create(draft("1"), &catalog(), today()).unwrap();
        assert_eq!(page.course_name, "Introduction to Next.js");
        assert_eq!(
            page.key_points,
            vec!["Learn modern React patterns", "Deploy to production"]
        );
        assert_eq!(page.created_at, today());
        assert_eq!(pages.get(&page.id).unwrap(), &page);
    }

    #[test]
    fn create_rejects_unknown_course_and_blank_title() {
        let mut pages = LandingPages::default();
        assert!(matches!(
            pages.create(draft("9"), &catalog(), today()),
            Err(PortError::NotFound(_))
        ));

        let mut untitled = draft("1");
        untitled.title = String::new();
        assert!(matches!(
            pages.create(untitled, &catalog(), today()),
            Err(PortError::Validation(_))
        ));
        assert!(pages.list().is_empty());
    }

    #[test]
    fn update_moves_page_to_another_course() {
        let mut pages = LandingPages::default();
        let page = pages.create(draft("1"), &catalog(), today()).unwrap();

        let mut edit = draft("2");
        edit.status = PublicationStatus::Published;
        let updated = pages.update(&page.id, edit, &catalog()).unwrap();
        assert_eq!(updated.id, page.id);
        assert_eq!(updated.course_name, "Advanced Tailwind CSS");
        assert_eq!(updated.status, PublicationStatus::Published);
        assert_eq!(updated.created_at, page.created_at);
    }

    #[test]
    fn delete_removes_only_that_page() {
        let mut pages = LandingPages::default();
        let first = pages.create(draft("1"), &catalog(), today()).unwrap();
        let second = pages.create(draft("2"), &catalog(), today()).unwrap();

        pages.delete(&first.id).unwrap();
        assert_eq!(pages.list(), &[second]);
        assert!(matches!(pages.delete(&first.id), Err(PortError::NotFound(_))));
    }
}
