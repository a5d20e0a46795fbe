//! Building blocks for slot, stats and settings output.
//!
//! Each helper renders for the context's mode. Pretty output is for people at
//! a terminal. Plain output is `key=value` lines and tab-separated rows with
//! no headers, so `slotlog day | cut -f3` pulls out the descriptions.

use comfy_table::modifiers::UTF8_ROUND_CORNERS;
use comfy_table::presets::{ASCII_MARKDOWN, NOTHING, UTF8_FULL};
use comfy_table::{Attribute, Cell, CellAlignment, ContentArrangement, Table};

use super::context::{OutputMode, UiContext};
use super::theme::{styled, styles, Badge};

/// `Slotlog · day (2024-03-15)` on a terminal, `slotlog day` in plain mode,
/// nothing for JSON.
pub fn header(ctx: &UiContext, command: &str, context: Option<&str>) -> String {
    match ctx.mode {
        OutputMode::Pretty => {
            let title = styled("Slotlog", styles::bold(), ctx.color);
            match context {
                Some(c) => format!("{} \u{00B7} {} ({})", title, command, c),
                None => format!("{} \u{00B7} {}", title, command),
            }
        }
        OutputMode::Plain => format!("slotlog {}", command),
        OutputMode::Json => String::new(),
    }
}

pub fn divider(ctx: &UiContext) -> String {
    if ctx.mode.is_pretty() {
        "\u{2500}".repeat(ctx.width.min(60))
    } else {
        "---".to_string()
    }
}

/// Marker for a slot or cell with nothing logged.
pub fn empty_cell(ctx: &UiContext) -> &'static str {
    if ctx.mode.is_pretty() && ctx.unicode {
        "\u{00B7}"
    } else {
        "-"
    }
}

pub fn badge(ctx: &UiContext, kind: Badge, message: &str) -> String {
    let mark = styled(kind.display(ctx.unicode), kind.style(), ctx.color);
    if message.is_empty() {
        mark
    } else {
        format!("{} {}", mark, message)
    }
}

/// `Total: 1h 15m` with a dim key, or `total=1h 15m` in plain mode.
pub fn kv(ctx: &UiContext, key: &str, value: &str) -> String {
    if ctx.mode.is_pretty() {
        let key = styled(&format!("{}:", key), styles::dim(), ctx.color);
        format!("{} {}", key, value)
    } else {
        format!("{}={}", key.to_lowercase().replace(' ', "_"), value)
    }
}

pub fn hint(ctx: &UiContext, text: &str) -> String {
    if ctx.mode.is_pretty() {
        format!("{} {}", styled("Hint:", styles::dim(), ctx.color), text)
    } else {
        format!("hint={}", text)
    }
}

/// Confirmation printed after a write (`Logged`, `Deleted`, `Restored`).
pub fn receipt(ctx: &UiContext, title: &str, items: &[(&str, &str)]) -> String {
    let (first, indent) = if ctx.mode.is_pretty() {
        (badge(ctx, Badge::Ok, title), "  ")
    } else {
        ("status=ok".to_string(), "")
    };
    std::iter::once(first)
        .chain(
            items
                .iter()
                .map(|(key, value)| format!("{}{}", indent, kv(ctx, key, value))),
        )
        .collect::<Vec<_>>()
        .join("\n")
}

#[derive(Debug, Clone)]
pub struct Column {
    pub header: &'static str,
    pub align_right: bool,
}

impl Column {
    pub const fn new(header: &'static str) -> Self {
        Self {
            header,
            align_right: false,
        }
    }

    /// Right-aligned, for minutes and shares.
    pub const fn numeric(header: &'static str) -> Self {
        Self {
            header,
            align_right: true,
        }
    }
}

/// Border style of a pretty table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Frame {
    /// Borders and a header row (stats, comparisons)
    Boxed,
    /// Dim headers, no borders (day grid, category list)
    Bare,
}

/// Pretty: a comfy-table in `frame`. Plain: tab-separated rows, no header.
pub fn table(ctx: &UiContext, frame: Frame, columns: &[Column], rows: &[Vec<String>]) -> String {
    if !ctx.mode.is_pretty() {
        return rows
            .iter()
            .map(|row| row.join("\t"))
            .collect::<Vec<_>>()
            .join("\n");
    }

    let mut table = Table::new();
    table.set_content_arrangement(ContentArrangement::Dynamic);
    match frame {
        Frame::Boxed if ctx.unicode => {
            table.load_preset(UTF8_FULL).apply_modifier(UTF8_ROUND_CORNERS);
            table.set_header(columns.iter().map(|c| c.header));
        }
        Frame::Boxed => {
            table.load_preset(ASCII_MARKDOWN);
            table.set_header(columns.iter().map(|c| c.header));
        }
        Frame::Bare => {
            table.load_preset(NOTHING);
            // Attributes instead of ANSI text so widths stay right
            table.set_header(columns.iter().map(|c| {
                let cell = Cell::new(c.header);
                if ctx.color {
                    cell.add_attribute(Attribute::Dim)
                } else {
                    cell
                }
            }));
        }
    }
    for row in rows {
        table.add_row(row);
    }
    for (i, spec) in columns.iter().enumerate() {
        if let Some(column) = table.column_mut(i) {
            if frame == Frame::Bare {
                column.set_padding((0, 2));
            }
            if spec.align_right {
                column.set_cell_alignment(CellAlignment::Right);
            }
        }
    }
    table.to_string()
}

/// Bar of `width` cells filled to `percentage`.
pub fn share_bar(ctx: &UiContext, percentage: f64, width: usize) -> String {
    let filled = ((percentage.clamp(0.0, 100.0) / 100.0) * width as f64).round() as usize;
    let filled = filled.min(width);
    let (on, off) = if ctx.unicode {
        ("\u{2588}", "\u{2591}")
    } else {
        ("#", ".")
    };
    format!("{}{}", on.repeat(filled), off.repeat(width - filled))
}

/// Spacing between pretty blocks; plain output stays dense.
pub fn blank_line(ctx: &UiContext) {
    if ctx.mode.is_pretty() {
        println!();
    }
}

fn error_lines(ctx: &UiContext, message: &str, error_hint: Option<&str>) -> String {
    let (first, second) = if ctx.mode.is_pretty() {
        (badge(ctx, Badge::Err, message), error_hint.map(|h| hint(ctx, h)))
    } else {
        (
            format!("error={}", message),
            error_hint.map(|h| format!("hint={}", h)),
        )
    };
    match second {
        Some(second) => format!("{}\n{}", first, second),
        None => first,
    }
}

/// Error and optional hint on stderr.
pub fn print_error(ctx: &UiContext, message: &str, error_hint: Option<&str>) {
    eprintln!("{}", error_lines(ctx, message, error_hint));
}
