use chrono::Local;

use slotlog_core::EntryPatch;

use crate::app::AppContext;
use crate::cli::EditArgs;
use crate::helpers::resolve_entry_id;
use crate::output::{entry_json, entry_receipt};

pub fn handle_edit(ctx: &AppContext, args: &EditArgs) -> anyhow::Result<()> {
    let mut ledger = ctx.open_ledger()?;
    let id = resolve_entry_id(ledger.store(), &args.id)?;

    let mut patch = EntryPatch::new();
    if let Some(description) = &args.description {
        patch = patch.description(description.as_str());
    }
    if args.clear_category {
        patch = patch.clear_category();
    } else if let Some(category) = &args.category {
        patch = patch.category(category.trim());
    }
    let edited = ledger.edit(&id, patch)?;

    if args.json {
        println!("{}", serde_json::to_string_pretty(&entry_json(&edited, &Local))?);
    } else if !ctx.quiet() {
        let ui_ctx = ctx.ui_context(false);
        println!("{}", entry_receipt(&ui_ctx, "Updated", &edited, &Local));
    }
    Ok(())
}
