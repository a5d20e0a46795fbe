//! Text and table output for slots, summaries and settings.

use chrono::{Datelike, NaiveDate, TimeZone};

use slotlog_core::stats::{Comparison, Summary};
use slotlog_core::{AppSettings, DailyNote, DaySlot, LogEntry};

use crate::constants::STATS_BAR_WIDTH;
use crate::ui::format::{format_delta, single_line};
use crate::ui::render::{divider, empty_cell, Frame};
use crate::ui::theme::{category_label, styled, styles};
use crate::ui::{
    blank_line, format_minutes, format_percent, format_slot_time, header, kv, receipt, share_bar,
    short_id, table, truncate, Column, UiContext,
};

const TASKS_PER_CATEGORY: usize = 3;

/// One-line description, cut to the table column in pretty mode.
fn fit_description(ctx: &UiContext, text: &str) -> String {
    let text = single_line(text);
    match ctx.description_width() {
        Some(width) => truncate(&text, width),
        None => text,
    }
}

/// Print every slot of a day. Empty cells are `·` in pretty mode and `-` in
/// plain mode.
pub fn print_day<Tz: TimeZone>(
    ctx: &UiContext,
    date: NaiveDate,
    slots: &[DaySlot<'_>],
    note: Option<&DailyNote>,
    tz: &Tz,
    quiet: bool,
) {
    let pretty = ctx.mode.is_pretty();
    if pretty && !quiet {
        println!(
            "{}",
            header(ctx, "day", Some(&date.to_string()))
        );
        blank_line(ctx);
    }

    let empty = empty_cell(ctx).to_string();
    let rows: Vec<Vec<String>> = slots
        .iter()
        .map(|slot| {
            let time = format_slot_time(slot.timestamp, tz);
            match slot.entry {
                Some(entry) => {
                    let category = entry
                        .category_name()
                        .map(str::to_string)
                        .unwrap_or_else(|| empty.clone());
                    let description = if entry.has_description() {
                        fit_description(ctx, entry.trimmed_description())
                    } else {
                        empty.clone()
                    };
                    vec![time, category, description, short_id(&entry.id)]
                }
                None => vec![time, empty.clone(), empty.clone(), empty.clone()],
            }
        })
        .collect();

    let columns = [
        Column::new("Time"),
        Column::new("Category"),
        Column::new("Description"),
        Column::new("ID"),
    ];
    println!("{}", table(ctx, Frame::Bare, &columns, &rows));

    if let Some(note) = note {
        if pretty {
            blank_line(ctx);
            println!("{}", kv(ctx, "Note", &note.text));
        } else {
            println!("{}", kv(ctx, "note", &single_line(&note.text)));
        }
    }
}

/// Receipt printed after an entry is saved or edited.
pub fn entry_receipt<Tz: TimeZone>(
    ctx: &UiContext,
    title: &str,
    entry: &LogEntry,
    tz: &Tz,
) -> String {
    let time = format_slot_time(entry.timestamp, tz);
    let id = short_id(&entry.id);
    let category = entry.category_name().unwrap_or("-");
    receipt(
        ctx,
        title,
        &[
            ("ID", id.as_str()),
            ("Time", time.as_str()),
            ("Category", category),
            ("Description", entry.trimmed_description()),
        ],
    )
}

/// Print a per-category summary with shares and top tasks.
pub fn print_summary(ctx: &UiContext, context: &str, summary: &Summary, quiet: bool) {
    let pretty = ctx.mode.is_pretty();
    if pretty && !quiet {
        println!("{}", header(ctx, "stats", Some(context)));
        blank_line(ctx);
    }

    if summary.buckets.is_empty() {
        if pretty {
            println!("{}", styled("No entries in this range.", styles::dim(), ctx.color));
        } else {
            println!("{}", kv(ctx, "total_minutes", "0"));
        }
        return;
    }

    if !pretty {
        for bucket in &summary.buckets {
            println!(
                "{}\t{}\t{:.1}",
                bucket.name, bucket.minutes, bucket.percentage
            );
        }
        println!("{}", kv(ctx, "total_minutes", &summary.total_minutes.to_string()));
        return;
    }

    let columns = [
        Column::new("Category"),
        Column::numeric("Time"),
        Column::numeric("Share"),
        Column::new(""),
    ];
    let rows: Vec<Vec<String>> = summary
        .buckets
        .iter()
        .map(|bucket| {
            vec![
                category_label(&bucket.name, &bucket.color, ctx.color),
                format_minutes(bucket.minutes),
                format_percent(bucket.percentage),
                share_bar(ctx, bucket.percentage, STATS_BAR_WIDTH),
            ]
        })
        .collect();
    println!("{}", table(ctx, Frame::Boxed, &columns, &rows));
    println!("{}", kv(ctx, "Total", &format_minutes(summary.total_minutes)));

    if quiet {
        return;
    }
    blank_line(ctx);
    for bucket in &summary.buckets {
        println!("{}", category_label(&bucket.name, &bucket.color, ctx.color));
        for task in bucket.tasks.iter().take(TASKS_PER_CATEGORY) {
            println!(
                "  {}  {}",
                fit_description(ctx, &task.description),
                styled(&format_minutes(task.minutes), styles::dim(), ctx.color)
            );
        }
        let hidden = bucket.tasks.len().saturating_sub(TASKS_PER_CATEGORY);
        if hidden > 0 {
            println!(
                "  {}",
                styled(&format!("and {} more", hidden), styles::dim(), ctx.color)
            );
        }
    }
}

/// Category names across both summaries, first summary's order first,
/// with minutes on each side.
pub(crate) fn comparison_rows(comparison: &Comparison) -> Vec<(String, u32, u32)> {
    let mut rows: Vec<(String, u32, u32)> = comparison
        .first
        .buckets
        .iter()
        .map(|bucket| {
            let second = comparison
                .second
                .bucket(&bucket.name)
                .map(|b| b.minutes)
                .unwrap_or(0);
            (bucket.name.clone(), bucket.minutes, second)
        })
        .collect();
    for bucket in &comparison.second.buckets {
        if comparison.first.bucket(&bucket.name).is_none() {
            rows.push((bucket.name.clone(), 0, bucket.minutes));
        }
    }
    rows
}

/// Print two days side by side.
pub fn print_comparison(
    ctx: &UiContext,
    first: NaiveDate,
    second: NaiveDate,
    comparison: &Comparison,
    quiet: bool,
) {
    let rows = comparison_rows(comparison);
    if !ctx.mode.is_pretty() {
        for (name, a, b) in &rows {
            println!("{}\t{}\t{}\t{}", name, a, b, i64::from(*b) - i64::from(*a));
        }
        println!(
            "{}",
            kv(
                ctx,
                "total_minutes",
                &format!(
                    "{}\t{}",
                    comparison.first.total_minutes, comparison.second.total_minutes
                )
            )
        );
        return;
    }

    if !quiet {
        let context = format!("{} vs {}", first, second);
        println!("{}", header(ctx, "compare", Some(&context)));
        blank_line(ctx);
    }
    if rows.is_empty() {
        println!("{}", styled("No entries on either day.", styles::dim(), ctx.color));
        return;
    }

    println!("{}", kv(ctx, "First", &first.to_string()));
    println!("{}", kv(ctx, "Second", &second.to_string()));
    let mut table_rows: Vec<Vec<String>> = rows
        .iter()
        .map(|(name, a, b)| {
            vec![
                name.clone(),
                format_minutes(*a),
                format_minutes(*b),
                format_delta(i64::from(*b) - i64::from(*a)),
            ]
        })
        .collect();
    let (a, b) = (
        comparison.first.total_minutes,
        comparison.second.total_minutes,
    );
    table_rows.push(vec![
        "Total".to_string(),
        format_minutes(a),
        format_minutes(b),
        format_delta(i64::from(b) - i64::from(a)),
    ]);

    let columns = [
        Column::new("Category"),
        Column::numeric("First"),
        Column::numeric("Second"),
        Column::numeric("Change"),
    ];
    println!("{}", table(ctx, Frame::Boxed, &columns, &table_rows));
}

/// Print days with entries, grouped by month.
///
/// Pretty mode draws a Monday-first month grid with logged days marked.
/// Plain mode prints one date per line.
pub fn print_calendar(ctx: &UiContext, dates: &[NaiveDate], quiet: bool) {
    if !ctx.mode.is_pretty() {
        for date in dates {
            println!("{}", date);
        }
        return;
    }
    if !quiet {
        println!("{}", header(ctx, "calendar", None));
        blank_line(ctx);
    }
    if dates.is_empty() {
        println!("{}", styled("No entries yet.", styles::dim(), ctx.color));
        return;
    }

    let mut months: Vec<(i32, u32)> = dates.iter().map(|d| (d.year(), d.month())).collect();
    months.dedup();
    for (i, (year, month)) in months.iter().enumerate() {
        if i > 0 {
            blank_line(ctx);
        }
        let logged: Vec<u32> = dates
            .iter()
            .filter(|d| d.year() == *year && d.month() == *month)
            .map(|d| d.day())
            .collect();
        for line in month_grid(ctx, *year, *month, &logged) {
            println!("{}", line);
        }
    }
}

fn month_grid(ctx: &UiContext, year: i32, month: u32, logged: &[u32]) -> Vec<String> {
    let Some(first) = NaiveDate::from_ymd_opt(year, month, 1) else {
        return Vec::new();
    };
    let days_in_month = first
        .checked_add_months(chrono::Months::new(1))
        .map(|next| next.pred_opt().map(|d| d.day()).unwrap_or(28))
        .unwrap_or(31);

    let mut lines = vec![
        styled(&first.format("%B %Y").to_string(), styles::bold(), ctx.color),
        styled("Mo Tu We Th Fr Sa Su", styles::dim(), ctx.color),
    ];
    let offset = first.weekday().num_days_from_monday() as usize;
    let mut cells: Vec<String> = vec!["  ".to_string(); offset];
    for day in 1..=days_in_month {
        let label = format!("{:>2}", day);
        cells.push(if logged.contains(&day) {
            if ctx.color {
                styled(&label, styles::ok().bold(), true)
            } else {
                format!("{:>2}", if ctx.unicode { "\u{25CF}" } else { "*" })
            }
        } else {
            styled(&label, styles::dim(), ctx.color)
        });
    }
    for week in cells.chunks(7) {
        lines.push(week.join(" ").trim_end().to_string());
    }
    lines
}

/// Print hours, categories and recent tags.
pub fn print_settings(ctx: &UiContext, settings: &AppSettings, tags: &[String], quiet: bool) {
    let categories = settings.resolved_categories();
    if !ctx.mode.is_pretty() {
        println!("{}", kv(ctx, "start_hour", &settings.start_hour.to_string()));
        println!("{}", kv(ctx, "end_hour", &settings.end_hour.to_string()));
        for category in &categories {
            println!("category={}\t{}", category.name, category.color);
        }
        for tag in tags {
            println!("tag={}", tag);
        }
        return;
    }

    if !quiet {
        println!("{}", header(ctx, "settings", None));
        blank_line(ctx);
    }
    let hours = format!("{:02}:00 - {:02}:00", settings.start_hour, settings.end_hour);
    println!("{}", kv(ctx, "Hours", &hours));
    println!("{}", divider(ctx));
    let rows: Vec<Vec<String>> = categories
        .iter()
        .map(|c| vec![c.name.clone(), c.color.clone()])
        .collect();
    println!(
        "{}",
        table(
            ctx,
            Frame::Bare,
            &[Column::new("Category"), Column::new("Color")],
            &rows
        )
    );
    if !tags.is_empty() {
        println!("{}", kv(ctx, "Recent tags", &tags.join(", ")));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use slotlog_core::stats::CategoryStat;
    use slotlog_core::time::TimeRange;

    fn summary(buckets: &[(&str, u32)]) -> Summary {
        Summary {
            range: TimeRange::new(0, 0),
            total_minutes: buckets.iter().map(|(_, m)| m).sum(),
            buckets: buckets
                .iter()
                .map(|(name, minutes)| CategoryStat {
                    name: name.to_string(),
                    minutes: *minutes,
                    percentage: 0.0,
                    color: String::new(),
                    tasks: Vec::new(),
                })
                .collect(),
        }
    }

    #[test]
    fn test_comparison_rows_union_names() {
        let comparison = Comparison {
            first: summary(&[("Work", 45), ("Meeting", 15)]),
            second: summary(&[("Exercise", 30), ("Work", 15)]),
        };
        let rows = comparison_rows(&comparison);
        assert_eq!(
            rows,
            vec![
                ("Work".to_string(), 45, 15),
                ("Meeting".to_string(), 15, 0),
                ("Exercise".to_string(), 0, 30),
            ]
        );
    }

    #[test]
    fn test_month_grid_starts_on_monday() {
        let ctx = UiContext {
            color: false,
            unicode: false,
            width: 80,
            mode: crate::ui::context::OutputMode::Pretty,
        };
        // March 2024 starts on a Friday.
        let lines = month_grid(&ctx, 2024, 3, &[1, 15]);
        assert_eq!(lines[0], "March 2024");
        assert_eq!(lines[2], "             *  2  3");
        assert_eq!(lines.len(), 2 + 5);
        assert!(lines.iter().any(|l| l.contains("31")));
    }
}
