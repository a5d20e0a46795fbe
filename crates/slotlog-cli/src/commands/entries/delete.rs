use crate::app::AppContext;
use crate::cli::DeleteArgs;
use crate::errors::CliError;
use crate::helpers::resolve_entry_id;
use crate::ui::{receipt, short_id};

pub fn handle_delete(ctx: &AppContext, args: &DeleteArgs) -> anyhow::Result<()> {
    let mut ledger = ctx.open_ledger()?;
    let id = resolve_entry_id(ledger.store(), &args.id)?;

    if !ledger.delete(&id) {
        return Err(CliError::not_found(
            format!("Entry not found: {}", args.id),
            "Hint: Run `slotlog day --json` to see entry IDs.",
        )
        .into());
    }

    if !ctx.quiet() {
        let ui_ctx = ctx.ui_context(false);
        let short = short_id(&id);
        println!("{}", receipt(&ui_ctx, "Deleted", &[("ID", short.as_str())]));
    }
    Ok(())
}
