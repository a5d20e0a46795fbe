//! Terminal presentation for slotlog.
//!
//! - **context**: picks pretty, plain or JSON output and the description width
//! - **theme**: status badges and category color swatches
//! - **render**: headers, receipts, slot and stats tables, share bars
//! - **format**: slot times, durations, deltas and short entry IDs
//!
//! ```ignore
//! let ctx = UiContext::from_env(args.json, cli.no_color, cli.ascii);
//! println!("{}", header(&ctx, "day", Some("2024-03-15")));
//! println!("{}", table(&ctx, Frame::Bare, &columns, &rows));
//! println!("{}", hint(&ctx, "slotlog log 09:15 standup"));
//! ```

pub mod context;
pub mod format;
pub mod render;
pub mod theme;

pub use context::UiContext;
pub use theme::Badge;

pub use render::{
    badge, blank_line, header, hint, kv, print_error, receipt, share_bar, table, Column,
};

pub use format::{format_minutes, format_percent, format_slot_time, short_id, truncate};
