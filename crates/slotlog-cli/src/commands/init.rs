use slotlog_core::{FileStore, Ledger};

use crate::app::{resolve_config_path, AppContext};
use crate::cli::InitArgs;
use crate::config::{write_config, SlotlogConfig};
use crate::ui::{hint, receipt};

/// Create the data directory and, if none exists yet, the config file.
/// Running it again is harmless; `--start-hour/--end-hour` update the grid.
pub fn handle_init(ctx: &AppContext, args: &InitArgs) -> anyhow::Result<()> {
    let data_dir = ctx.data_dir()?;
    let store = FileStore::open(&data_dir)?;
    let mut ledger = Ledger::open(store);

    let config_path = resolve_config_path()?;
    let config_created = if config_path.exists() {
        false
    } else {
        write_config(&config_path, &SlotlogConfig::new(&data_dir))?;
        true
    };

    if let (Some(start), Some(end)) = (args.start_hour, args.end_hour) {
        ledger.update_settings(|settings| settings.set_hours(start, end))?;
    }

    if ctx.quiet() {
        return Ok(());
    }
    let ui_ctx = ctx.ui_context(false);
    let data = data_dir.display().to_string();
    let config = config_path.display().to_string();
    let hours = format!(
        "{:02}:00-{:02}:00",
        ledger.settings().start_hour,
        ledger.settings().end_hour
    );
    let config_state = if config_created { "created" } else { "kept" };
    println!(
        "{}",
        receipt(
            &ui_ctx,
            "Slotlog ready",
            &[
                ("Data", data.as_str()),
                ("Config", config.as_str()),
                ("Config File", config_state),
                ("Hours", hours.as_str()),
            ],
        )
    );
    if ui_ctx.mode.is_pretty() {
        println!("{}", hint(&ui_ctx, "slotlog log 09:00 \"what you did\""));
    }
    Ok(())
}
