pub mod json_source;
pub mod navigation;
pub mod session_store;

pub use json_source::{load_seed, JsonFileSource};
pub use navigation::RecordingNavigator;
pub use session_store::InMemorySessionStore;
