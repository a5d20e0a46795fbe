//! Slotlog CLI - A 15-minute slot activity ledger for the terminal
//!
//! This is the command-line interface for Slotlog. It provides a
//! user-friendly interface to the core library functionality.

mod app;
mod cli;
mod commands;
mod config;
mod constants;
mod errors;
mod helpers;
mod logging;
mod output;
mod ui;

use clap::Parser;

use crate::app::AppContext;
use crate::cli::{Cli, Commands};
use crate::commands::{
    calendar, entries, init, maintenance, misc, note, settings, stats, suggest, transfer,
};
use crate::errors::exit_code_for;
use crate::ui::print_error;

fn main() {
    let cli = Cli::parse();
    if let Err(e) = logging::enable_logging(cli.log) {
        eprintln!("{}", e);
    }
    let ctx = AppContext::new(&cli);

    if let Err(e) = run(&ctx, &cli) {
        let ui_ctx = ctx.ui_context(false);

        let error_msg = format!("{}", e);
        let (message, hint) = split_error_hint(&error_msg);

        print_error(&ui_ctx, message, hint.as_deref());
        std::process::exit(exit_code_for(&e));
    }
}

/// Split an explicit "Hint:" line off an error message, or provide a
/// contextual hint for common error types.
fn split_error_hint(error: &str) -> (&str, Option<String>) {
    for marker in ["\nHint:", "\nhint:"] {
        if let Some(idx) = error.find(marker) {
            let hint = error[idx + marker.len()..].trim().to_string();
            return (error[..idx].trim_end(), Some(hint));
        }
    }

    let error_lower = error.to_lowercase();

    if error_lower.contains("not the start of a 15-minute slot") {
        return (
            error,
            Some("Slots start at :00, :15, :30 and :45.".to_string()),
        );
    }

    if error_lower.contains("failed to parse config") {
        return (
            error,
            Some("Fix or delete the config file, then run `slotlog init`.".to_string()),
        );
    }

    if error_lower.contains("validation error: backup") {
        return (
            error,
            Some("Backups are JSON files produced by `slotlog export`.".to_string()),
        );
    }

    (error, None)
}

fn run(ctx: &AppContext, cli: &Cli) -> anyhow::Result<()> {
    match &cli.command {
        Some(Commands::Init(args)) => init::handle_init(ctx, args),
        Some(Commands::Day(args)) => entries::handle_day(ctx, args),
        Some(Commands::Log(args)) => entries::handle_log(ctx, args),
        Some(Commands::Bulk(args)) => entries::handle_bulk(ctx, args),
        Some(Commands::Edit(args)) => entries::handle_edit(ctx, args),
        Some(Commands::Delete(args)) => entries::handle_delete(ctx, args),
        Some(Commands::Suggest(args)) => suggest::handle_suggest(ctx, args),
        Some(Commands::Stats(args)) => stats::handle_stats(ctx, args),
        Some(Commands::Calendar(args)) => calendar::handle_calendar(ctx, args),
        Some(Commands::Import(args)) => transfer::handle_import(ctx, args),
        Some(Commands::Copy(args)) => transfer::handle_copy(ctx, args),
        Some(Commands::Export(args)) => transfer::handle_export(ctx, args),
        Some(Commands::Restore(args)) => transfer::handle_restore(ctx, args),
        Some(Commands::Note(args)) => note::handle_note(ctx, args),
        Some(Commands::Settings(args)) => settings::handle_settings(ctx, args),
        Some(Commands::Reset(args)) => maintenance::handle_reset(ctx, args),
        Some(Commands::Completions(args)) => misc::handle_completions(args.shell),
        None => {
            print_quickstart(ctx);
            Ok(())
        }
    }
}

fn print_quickstart(ctx: &AppContext) {
    let ui_ctx = ctx.ui_context(false);
    let lines = [
        ("slotlog init", "create the data directory"),
        ("slotlog log 09:00 standup -c Meetings", "fill one slot"),
        ("slotlog day", "see today's slots"),
        ("slotlog stats week", "time per category this week"),
        ("slotlog --help", "every command"),
    ];
    println!(
        "{}",
        ui::header(&ui_ctx, "quickstart", Some(slotlog_core::VERSION))
    );
    for (command, what) in lines {
        println!("  {:<38} {}", command, what);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_split_explicit_hint() {
        let (message, hint) = split_error_hint("No data\nHint: Run `slotlog init`.");
        assert_eq!(message, "No data");
        assert_eq!(hint.as_deref(), Some("Run `slotlog init`."));
    }

    #[test]
    fn test_contextual_hint() {
        let (message, hint) =
            split_error_hint("Validation error: timestamp 5 is not the start of a 15-minute slot");
        assert!(message.starts_with("Validation error"));
        assert!(hint.is_some());
        assert_eq!(split_error_hint("boom"), ("boom", None));
    }
}
