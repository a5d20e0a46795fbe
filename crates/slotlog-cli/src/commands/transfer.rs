//! Moving data in and out: text import, clipboard text, backups.

use std::path::Path;

use chrono::Local;
use tracing::info;

use slotlog_core::fs::write_atomic;
use slotlog_core::BackupDocument;

use crate::app::AppContext;
use crate::cli::{CopyArgs, ExportArgs, ImportArgs, RestoreArgs};
use crate::helpers::{confirm_destructive, parse_date, read_text_input};
use crate::output::entry_json;
use crate::ui::{badge, receipt, Badge};

pub fn handle_import(ctx: &AppContext, args: &ImportArgs) -> anyhow::Result<()> {
    let mut ledger = ctx.open_ledger()?;
    let date = parse_date(args.date.as_deref(), ctx.now().date_naive())?;
    let text = read_text_input(args.file.as_deref())?;
    let report = ledger.import_text(date, &text, &Local)?;

    if args.json {
        let imported: Vec<_> = report
            .imported
            .iter()
            .map(|e| entry_json(e, &Local))
            .collect();
        let output = serde_json::json!({
            "date": date.to_string(),
            "imported": imported,
            "skipped": report.skipped,
        });
        println!("{}", serde_json::to_string_pretty(&output)?);
        return Ok(());
    }
    if ctx.quiet() {
        return Ok(());
    }

    let ui_ctx = ctx.ui_context(false);
    let imported = report.imported.len().to_string();
    let skipped = report.skipped.to_string();
    let day = date.to_string();
    println!(
        "{}",
        receipt(
            &ui_ctx,
            "Imported",
            &[
                ("Date", day.as_str()),
                ("Imported", imported.as_str()),
                ("Skipped", skipped.as_str()),
            ],
        )
    );
    if report.skipped > 0 && ui_ctx.mode.is_pretty() {
        let message = format!(
            "{} line(s) were not `HH:MM description` and were skipped",
            report.skipped
        );
        println!("{}", badge(&ui_ctx, Badge::Warn, &message));
    }
    Ok(())
}

/// Print a day as `HH:MM description` lines, ready to paste.
pub fn handle_copy(ctx: &AppContext, args: &CopyArgs) -> anyhow::Result<()> {
    let ledger = ctx.open_ledger()?;
    let date = parse_date(args.date.as_deref(), ctx.now().date_naive())?;
    println!("{}", ledger.clipboard_text(date, &Local));
    Ok(())
}

pub fn handle_export(ctx: &AppContext, args: &ExportArgs) -> anyhow::Result<()> {
    let ledger = ctx.open_ledger()?;
    let document = ledger.export();
    let json = document.to_json_pretty()?;

    let Some(output) = args.output.as_deref() else {
        println!("{}", json);
        return Ok(());
    };

    write_atomic(Path::new(output), json.as_bytes())
        .map_err(|e| anyhow::anyhow!("Failed to write backup {}: {}", output, e))?;
    info!(path = output, entries = document.logs.len(), "backup written");

    if !ctx.quiet() {
        let ui_ctx = ctx.ui_context(false);
        let entries = document.logs.len().to_string();
        println!(
            "{}",
            receipt(
                &ui_ctx,
                "Backup written",
                &[("Path", output), ("Entries", entries.as_str())],
            )
        );
    }
    Ok(())
}

/// Replace the ledger with a backup. The document is parsed and validated
/// before the prompt, so a bad file never reaches the confirmation.
pub fn handle_restore(ctx: &AppContext, args: &RestoreArgs) -> anyhow::Result<()> {
    let mut ledger = ctx.open_ledger()?;
    let text = std::fs::read_to_string(&args.file)
        .map_err(|e| anyhow::anyhow!("Failed to read backup {}: {}", args.file, e))?;
    let document = BackupDocument::parse(&text)?;

    let prompt = format!(
        "Replace {} existing entries with {} from {}?",
        ledger.store().len(),
        document.logs.len(),
        args.file
    );
    if !confirm_destructive(&prompt, args.yes, ctx.quiet())? {
        if !ctx.quiet() {
            let ui_ctx = ctx.ui_context(false);
            println!("{}", badge(&ui_ctx, Badge::Warn, "Restore cancelled"));
        }
        return Ok(());
    }

    let restored = document.logs.len().to_string();
    ledger.restore(document)?;

    if !ctx.quiet() {
        let ui_ctx = ctx.ui_context(false);
        println!(
            "{}",
            receipt(
                &ui_ctx,
                "Backup restored",
                &[("Path", args.file.as_str()), ("Entries", restored.as_str())],
            )
        );
    }
    Ok(())
}
