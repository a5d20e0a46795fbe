use crate::app::AppContext;
use crate::cli::SuggestArgs;
use crate::ui::theme::{styled, styles};

pub fn handle_suggest(ctx: &AppContext, args: &SuggestArgs) -> anyhow::Result<()> {
    let ledger = ctx.open_ledger()?;
    let limit = args.limit.unwrap_or_else(|| ctx.suggest_limit());
    let query = args.query.as_deref().map(str::trim).filter(|q| !q.is_empty());
    let suggestions = ledger.suggestions(query, ctx.now().timestamp_millis(), limit);

    if args.json {
        println!("{}", serde_json::to_string_pretty(&suggestions)?);
        return Ok(());
    }

    let ui_ctx = ctx.ui_context(false);
    if suggestions.is_empty() && ui_ctx.mode.is_pretty() && !ctx.quiet() {
        println!(
            "{}",
            styled("No suggestions yet.", styles::dim(), ui_ctx.color)
        );
    }
    for suggestion in suggestions {
        println!("{}", suggestion);
    }
    Ok(())
}
