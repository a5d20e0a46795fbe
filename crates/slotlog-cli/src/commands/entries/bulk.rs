use chrono::Local;

use crate::app::AppContext;
use crate::cli::BulkArgs;
use crate::errors::CliError;
use crate::helpers::{parse_date, parse_slot_time, read_text_input, slot_timestamp};
use crate::output::entry_json;
use crate::ui::{format_slot_time, receipt};

pub fn handle_bulk(ctx: &AppContext, args: &BulkArgs) -> anyhow::Result<()> {
    let mut ledger = ctx.open_ledger()?;
    let date = parse_date(args.date.as_deref(), ctx.now().date_naive())?;
    let time = parse_slot_time(&args.time)?;
    let start = slot_timestamp(date, time, &Local);

    let text = read_text_input(args.file.as_deref())?;
    if text.trim().is_empty() {
        return Err(CliError::invalid_input_with_hint(
            "No lines to log",
            "Hint: Pipe one description per line, e.g. `printf 'a\\nb\\n' | slotlog bulk 09:00`.",
        )
        .into());
    }

    let category = args
        .category
        .as_deref()
        .map(str::trim)
        .filter(|c| !c.is_empty());
    let saved = ledger.submit_bulk(start, &text, category)?;

    if args.json {
        let output: Vec<_> = saved.iter().map(|e| entry_json(e, &Local)).collect();
        println!("{}", serde_json::to_string_pretty(&output)?);
        return Ok(());
    }
    if ctx.quiet() {
        return Ok(());
    }

    let ui_ctx = ctx.ui_context(false);
    let count = saved.len().to_string();
    let from = saved
        .first()
        .map(|e| format_slot_time(e.timestamp, &Local))
        .unwrap_or_default();
    let to = saved
        .last()
        .map(|e| format_slot_time(e.timestamp, &Local))
        .unwrap_or_default();
    println!(
        "{}",
        receipt(
            &ui_ctx,
            "Logged slots",
            &[
                ("Slots", count.as_str()),
                ("From", from.as_str()),
                ("To", to.as_str()),
                ("Category", category.unwrap_or("-")),
            ],
        )
    );
    Ok(())
}
