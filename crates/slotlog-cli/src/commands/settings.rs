use crate::app::AppContext;
use crate::cli::{SettingsArgs, SettingsSubcommand};
use crate::output::{print_settings, settings_json};
use crate::ui::receipt;

pub fn handle_settings(ctx: &AppContext, args: &SettingsArgs) -> anyhow::Result<()> {
    let mut ledger = ctx.open_ledger()?;

    let (title, detail) = match &args.command {
        SettingsSubcommand::Show { json } => {
            if *json {
                let output = settings_json(ledger.settings(), ledger.tags());
                println!("{}", serde_json::to_string_pretty(&output)?);
            } else {
                let ui_ctx = ctx.ui_context(false);
                print_settings(&ui_ctx, ledger.settings(), ledger.tags(), ctx.quiet());
            }
            return Ok(());
        }
        SettingsSubcommand::Hours { start, end } => {
            ledger.update_settings(|settings| settings.set_hours(*start, *end))?;
            ("Hours updated", format!("{:02}:00-{:02}:00", start, end))
        }
        SettingsSubcommand::AddCategory { name, color } => {
            let mut added = None;
            ledger.update_settings(|settings| {
                added = Some(settings.add_category(name, color.as_deref())?);
                Ok(())
            })?;
            let detail = added
                .map(|c| format!("{} {}", c.name, c.color))
                .unwrap_or_default();
            ("Category added", detail)
        }
        SettingsSubcommand::RemoveCategory { name } => {
            ledger.update_settings(|settings| settings.remove_category(name).map(|_| ()))?;
            ("Category removed", name.clone())
        }
        SettingsSubcommand::Color { name, color } => {
            ledger.update_settings(|settings| settings.set_color(name, color))?;
            ("Color updated", format!("{} {}", name, color))
        }
    };

    if !ctx.quiet() {
        let ui_ctx = ctx.ui_context(false);
        println!("{}", receipt(&ui_ctx, title, &[("Settings", detail.as_str())]));
    }
    Ok(())
}
