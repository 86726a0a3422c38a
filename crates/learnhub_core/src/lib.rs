pub mod auth;
pub mod catalog;
pub mod checkout;
pub mod course_admin;
pub mod domain;
pub mod landing;
pub mod ports;
pub mod roster;

pub use auth::{LoginForm, RegistrationForm, SessionContext};
pub use catalog::Catalog;
pub use checkout::{CheckoutForm, Receipt};
pub use course_admin::{CourseAdmin, CourseDraft, LessonDraft};
pub use domain::{
    Course, CourseSummary, Document, LandingPage, Lesson, LessonView, ManagedCourse, ManagedLesson,
    PublicationStatus, Role, Student, StudentStatus, User,
};
pub use landing::{LandingPageDraft, LandingPages};
pub use ports::{CatalogSource, FieldError, Navigator, PortError, PortResult, SessionStore};
pub use roster::Roster;
