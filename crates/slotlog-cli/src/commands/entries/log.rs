use chrono::Local;

use slotlog_core::NewEntry;

use crate::app::AppContext;
use crate::cli::LogArgs;
use crate::helpers::{parse_date, parse_slot_time, slot_timestamp};
use crate::output::{entry_json, entry_receipt};
use crate::ui::{hint, short_id};

pub fn handle_log(ctx: &AppContext, args: &LogArgs) -> anyhow::Result<()> {
    let mut ledger = ctx.open_ledger()?;
    let now = ctx.now();
    let date = parse_date(args.date.as_deref(), now.date_naive())?;
    let time = parse_slot_time(&args.time)?;
    let timestamp = slot_timestamp(date, time, &Local);

    let category = args
        .category
        .as_deref()
        .map(str::trim)
        .filter(|c| !c.is_empty())
        .map(str::to_string);
    let entry = NewEntry::new(timestamp, args.text.join(" ")).with_category(category);
    let upserted = ledger.submit(entry, now.timestamp_millis())?;

    if args.json {
        let mut output = entry_json(&upserted.entry, &Local);
        output["replaced"] = serde_json::json!(upserted.replaced.as_ref().map(|e| &e.id));
        println!("{}", serde_json::to_string_pretty(&output)?);
        return Ok(());
    }
    if ctx.quiet() {
        println!("{}", upserted.entry.id);
        return Ok(());
    }

    let ui_ctx = ctx.ui_context(false);
    let title = if upserted.replaced.is_some() {
        "Slot replaced"
    } else {
        "Logged"
    };
    println!("{}", entry_receipt(&ui_ctx, title, &upserted.entry, &Local));
    if let Some(previous) = &upserted.replaced {
        if ui_ctx.mode.is_pretty() && previous.id != upserted.entry.id {
            let text = format!(
                "Replaced {} ({})",
                short_id(&previous.id),
                previous.trimmed_description()
            );
            println!("{}", hint(&ui_ctx, &text));
        }
    }
    Ok(())
}
