pub mod app;
pub mod errors;
pub mod handlers;
pub mod ledger;
pub mod models;
pub mod partner;
pub mod state;
pub mod ui;

pub use app::router;
pub use ledger::{Ledger, StreakState};
pub use state::AppState;
