//! HTTP API handlers for ctriage-web

pub mod categories;
pub mod classify;
pub mod health;
pub mod panes;
pub mod ui;

pub use categories::category_routes;
pub use classify::classify_routes;
pub use health::health_routes;
pub use panes::pane_routes;
pub use ui::ui_routes;
