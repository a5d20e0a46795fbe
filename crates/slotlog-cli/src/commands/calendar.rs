use chrono::{Local, NaiveDate};

use slotlog_core::time::date_of;

use crate::app::AppContext;
use crate::cli::CalendarArgs;
use crate::helpers::parse_month;
use crate::output::{calendar_json, print_calendar};

pub fn handle_calendar(ctx: &AppContext, args: &CalendarArgs) -> anyhow::Result<()> {
    let ledger = ctx.open_ledger()?;
    let month = args.month.as_deref().map(parse_month).transpose()?;

    let dates: Vec<NaiveDate> = ledger
        .store()
        .activity_dates(&Local)
        .into_iter()
        .filter_map(|day| date_of(day, &Local))
        .filter(|date| month.map_or(true, |m| m.contains(*date)))
        .collect();

    if args.json {
        println!("{}", serde_json::to_string_pretty(&calendar_json(&dates))?);
    } else {
        let ui_ctx = ctx.ui_context(false);
        print_calendar(&ui_ctx, &dates, ctx.quiet());
    }
    Ok(())
}
