//! crates/learnhub_core/src/roster.rs
//!
//! The creator's student roster. Edits live in memory only.

use tracing::info;

use crate::domain::{Student, StudentStatus};
use crate::ports::{PortError, PortResult};

#[derive(Debug, Clone, Default)]
pub struct Roster {
    students: Vec<Student>,
}

impl Roster {
    pub fn new(students: Vec<Student>) -> Self {
        Self { students }
    }

    pub fn list(&self) -> &[Student] {
        &self.students
    }

    /// Case-insensitive substring match on name or email. A blank term matches everyone.
    pub fn search(&self, term: &str) -> Vec<&Student> {
        let needle = term.trim().to_lowercase();
        self.students
            .iter()
            .filter(|student| {
                needle.is_empty()
                    || student.name.to_lowercase().contains(&needle)
                    || student.email.to_lowercase().contains(&needle)
            })
            .collect()
    }

    pub fn get(&self, student_id: &str) -> PortResult<&Student> {
        self.students
            .iter()
            .find(|student| student.id == student_id)
            .ok_or_else(|| not_found(student_id))
    }

    /// Flips a student between active and blocked, returning the new status.
    pub fn toggle_status(&mut self, student_id: &str) -> PortResult<StudentStatus> {
        let student = self
            .students
            .iter_mut()
            .find(|student| student.id == student_id)
            .ok_or_else(|| not_found(student_id))?;
        student.status = student.status.toggled();
        info!("Student '{}' is now {:?}", student_id, student.status);
        Ok(student.status)
    }

    /// Replaces the student with the same id.
    pub fn update(&mut self, updated: Student) -> PortResult<&Student> {
        let position = self
            .students
            .iter()
            .position(|student| student.id == updated.id)
            .ok_or_else(|| not_found(&updated.id))?;
        self.students[position] = updated;
        Ok(&self.students[position])
    }
}

fn not_found(student_id: &str) -> PortError {
    PortError::NotFound(format!("student '{}'", student_id))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn student(id: &str, name: &str, email: &str) -> Student {
        Student {
            id: id.to_string(),
            name: name.to_string(),
            email: email.to_string(),
            phone: "+1-555-0000".to_string(),
            address: "1 Road".to_string(),
            status: StudentStatus::Active,
            join_date: NaiveDate::from_ymd_opt(2023, 1, 15).unwrap(),
            purchased_courses: vec!["Introduction to Next.js".to_string()],
            total_spent: 49.99,
        }
    }

    fn roster() -> Roster {
        Roster::new(vec![
            student("1", "John Doe", "john@example.com"),
            student("2", "Jane Smith", "jane@example.com"),
            student("3", "Bob Johnson", "bob@example.com"),
        ])
    }

    #[test]
    fn search_matches_name_or_email_ignoring_case() {
        let roster = roster();
        let ids = |term: &str| -> Vec<String> {
            roster.search(term).into_iter().map(|s| s.id.clone()).collect()
        };
        assert_eq!(ids("JOHN"), vec!["1", "3"]);
        assert_eq!(ids("jane@"), vec!["2"]);
        assert_eq!(ids(""), vec!["1", "2", "3"]);
        assert!(ids("nobody").is_empty());
    }

    #[test]
    fn toggle_flips_status_back_and_forth() {
        let mut roster = roster();
        assert_eq!(roster.toggle_status("2").unwrap(), StudentStatus::Blocked);
        assert_eq!(roster.toggle_status("2").unwrap(), StudentStatus::Active);
        assert!(matches!(
            roster.toggle_status("9"),
            Err(PortError::NotFound(_))
        ));
    }

    #[test]
    fn update_replaces_by_id() {
        let mut roster = roster();
        let mut edited = roster.get("3").unwrap().clone();
        edited.phone = "+1-555-9999".to_string();
        roster.update(edited).unwrap();
        assert_eq!(roster.get("3").unwrap().phone, "+1-555-9999");

        let stranger = student("7", "Eve", "eve@example.com");
        assert!(matches!(roster.update(stranger), Err(PortError::NotFound(_))));
        assert_eq!(roster.list().len(), 3);
    }
}
