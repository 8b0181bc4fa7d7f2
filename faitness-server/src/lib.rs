pub mod config;
pub mod extract;
pub mod fallback;
pub mod routes;
pub mod state;

pub use routes::router;
pub use state::AppState;
