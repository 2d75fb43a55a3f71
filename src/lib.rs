pub mod achievements;
pub mod app;
pub mod errors;
pub mod handlers;
pub mod models;
pub mod motivation;
pub mod repository;
pub mod state;
pub mod stats;
pub mod storage;
pub mod tracker;
pub mod ui;

pub use app::router;
pub use repository::{JsonStore, Repository};
pub use state::AppState;
pub use storage::{load_store, resolve_data_path};
