use chrono::Local;

use crate::app::AppContext;
use crate::cli::DayArgs;
use crate::helpers::parse_date;
use crate::output::{day_json, print_day};
use crate::ui::{blank_line, hint};

pub fn handle_day(ctx: &AppContext, args: &DayArgs) -> anyhow::Result<()> {
    let ledger = ctx.open_ledger()?;
    let date = parse_date(args.date.as_deref(), ctx.now().date_naive())?;
    let slots = ledger.day_view(date, &Local);
    let note = ledger.note(date);

    if args.json {
        let output = serde_json::to_string_pretty(&day_json(date, &slots, note, &Local))?;
        println!("{}", output);
        return Ok(());
    }

    let ui_ctx = ctx.ui_context(false);
    print_day(&ui_ctx, date, &slots, note, &Local, ctx.quiet());

    let logged = slots.iter().any(|slot| slot.entry.is_some());
    if !logged && ui_ctx.mode.is_pretty() && !ctx.quiet() {
        blank_line(&ui_ctx);
        println!(
            "{}",
            hint(&ui_ctx, "slotlog log 09:00 \"what you did\" to fill a slot")
        );
    }
    Ok(())
}
