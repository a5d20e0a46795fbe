use crate::app::AppContext;
use crate::cli::ResetArgs;
use crate::helpers::confirm_destructive;
use crate::ui::{badge, receipt, Badge};

/// Delete every entry, note, tag and setting.
pub fn handle_reset(ctx: &AppContext, args: &ResetArgs) -> anyhow::Result<()> {
    let mut ledger = ctx.open_ledger()?;
    let entries = ledger.store().len();

    let prompt = format!(
        "Delete all {} entries, notes and settings? This cannot be undone.",
        entries
    );
    if !confirm_destructive(&prompt, args.yes, ctx.quiet())? {
        if !ctx.quiet() {
            let ui_ctx = ctx.ui_context(false);
            println!("{}", badge(&ui_ctx, Badge::Warn, "Reset cancelled"));
        }
        return Ok(());
    }

    ledger.factory_reset();

    if !ctx.quiet() {
        let ui_ctx = ctx.ui_context(false);
        let removed = entries.to_string();
        println!(
            "{}",
            receipt(&ui_ctx, "Reset complete", &[("Entries Removed", removed.as_str())])
        );
    }
    Ok(())
}
