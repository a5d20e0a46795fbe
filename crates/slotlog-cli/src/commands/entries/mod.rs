//! Commands that read or write individual slots.

mod bulk;
mod day;
mod delete;
mod edit;
mod log;

pub use bulk::handle_bulk;
pub use day::handle_day;
pub use delete::handle_delete;
pub use edit::handle_edit;
pub use log::handle_log;
