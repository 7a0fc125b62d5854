pub mod api;
pub mod cache;
pub mod lookup;
pub mod ui;
