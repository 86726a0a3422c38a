pub mod auth;
pub mod creator;
pub mod middleware;
pub mod rest;
pub mod state;

// Re-export the handlers the binary wires into the router.
pub use auth::{login_handler, logout_handler, me_handler, register_handler};
pub use middleware::{require_auth, require_creator};
pub use rest::{
    checkout_handler, get_course_handler, get_lesson_handler, list_courses_handler,
    purchased_courses_handler,
};
