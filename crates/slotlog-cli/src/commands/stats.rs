use chrono::Local;

use slotlog_core::time::week_start;
use slotlog_core::StatsRange;

use crate::app::AppContext;
use crate::cli::{StatsArgs, StatsSubcommand};
use crate::helpers::parse_date;
use crate::output::{comparison_json, print_comparison, print_summary};

pub fn handle_stats(ctx: &AppContext, args: &StatsArgs) -> anyhow::Result<()> {
    let ledger = ctx.open_ledger()?;
    let today = ctx.now().date_naive();

    let (range, context) = match &args.command {
        StatsSubcommand::Day { date } => {
            let date = parse_date(date.as_deref(), today)?;
            (StatsRange::Day(date), format!("day {}", date))
        }
        StatsSubcommand::Week { date } => {
            let date = parse_date(date.as_deref(), today)?;
            (
                StatsRange::Week(date),
                format!("week of {}", week_start(date)),
            )
        }
        StatsSubcommand::Compare { first, second } => {
            let first = parse_date(Some(first), today)?;
            let second = parse_date(Some(second), today)?;
            let comparison = ledger.compare(first, second, &Local);
            if args.json {
                println!(
                    "{}",
                    serde_json::to_string_pretty(&comparison_json(&comparison))?
                );
            } else {
                let ui_ctx = ctx.ui_context(false);
                print_comparison(&ui_ctx, first, second, &comparison, ctx.quiet());
            }
            return Ok(());
        }
    };

    let summary = ledger.stats(range, &Local);
    if args.json {
        println!("{}", serde_json::to_string_pretty(&summary)?);
    } else {
        let ui_ctx = ctx.ui_context(false);
        print_summary(&ui_ctx, &context, &summary, ctx.quiet());
    }
    Ok(())
}
