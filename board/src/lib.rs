//! Job board
//!
//! Lists openings from the recruiting API, filters them through the query
//! string of the current location, and shows a single job's details.

pub mod app;
pub mod config;
pub mod history;
pub mod loader;
pub mod router;
pub mod session;
pub mod store;
pub mod view;

pub use app::JobBoard;
pub use config::Config;
pub use history::Location;
pub use loader::LoadState;
pub use router::Route;
