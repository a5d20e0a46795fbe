use crate::app::AppContext;
use crate::cli::NoteArgs;
use crate::errors::CliError;
use crate::helpers::parse_date;
use crate::ui::theme::{styled, styles};
use crate::ui::{header, receipt};

pub fn handle_note(ctx: &AppContext, args: &NoteArgs) -> anyhow::Result<()> {
    let mut ledger = ctx.open_ledger()?;
    let now = ctx.now();
    let date = parse_date(args.date.as_deref(), now.date_naive())?;
    let ui_ctx = ctx.ui_context(args.json);
    let day = date.to_string();

    if let Some(text) = &args.set {
        let note = ledger.set_note(date, text, now.timestamp_millis())?;
        if ui_ctx.mode.is_json() {
            let output = serde_json::json!({
                "date": day,
                "text": note.text,
                "updated_at": note.updated_at,
            });
            println!("{}", serde_json::to_string_pretty(&output)?);
        } else if !ctx.quiet() {
            let chars = note.text.chars().count().to_string();
            println!(
                "{}",
                receipt(
                    &ui_ctx,
                    "Note saved",
                    &[("Date", day.as_str()), ("Characters", chars.as_str())],
                )
            );
        }
        return Ok(());
    }

    if args.clear {
        if !ledger.remove_note(date) {
            return Err(CliError::not_found(
                format!("No note for {}", date),
                "Hint: Add one with `slotlog note --set \"...\"`.",
            )
            .into());
        }
        if !ctx.quiet() && !ui_ctx.mode.is_json() {
            println!("{}", receipt(&ui_ctx, "Note removed", &[("Date", day.as_str())]));
        }
        return Ok(());
    }

    let note = ledger.note(date);
    if ui_ctx.mode.is_json() {
        let output = serde_json::json!({
            "date": day,
            "text": note.map(|n| n.text.as_str()),
            "updated_at": note.map(|n| n.updated_at),
        });
        println!("{}", serde_json::to_string_pretty(&output)?);
        return Ok(());
    }

    if ui_ctx.mode.is_pretty() && !ctx.quiet() {
        println!("{}", header(&ui_ctx, "note", Some(&day)));
    }
    match note {
        Some(note) => println!("{}", note.text),
        None if ui_ctx.mode.is_pretty() => {
            println!("{}", styled("No note for this day.", styles::dim(), ui_ctx.color));
        }
        None => {}
    }
    Ok(())
}
