//! Command handlers, one module per command or command group.

pub mod calendar;
pub mod entries;
pub mod init;
pub mod maintenance;
pub mod misc;
pub mod note;
pub mod settings;
pub mod stats;
pub mod suggest;
pub mod transfer;
