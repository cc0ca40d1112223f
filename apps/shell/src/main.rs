mod args;

use crate::args::Cli;
use clap::Parser;
use stk::domain::StackCategory;
use stk::domain::config::StackerConfig;
use stk::kernel::config::load_config_or_default;
use stk::settings::StackSettingManager;
use stk_logger::Logger;
use strum::IntoEnumIterator;
use tracing::info;

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let mut config: StackerConfig = load_config_or_default(&cli.config)?;
    if let Some(data_dir) = cli.data_dir {
        config.server.data_dir = data_dir;
    }
    if let Some(game_version) = cli.game_version {
        config.server.game_version = game_version;
    }
    if let Some(level) = cli.log_level {
        config.logging.level = level;
    }

    let _logger = Logger::from_config(env!("CARGO_PKG_NAME"), &config.logging)?;
    info!(config = %cli.config.display(), "Configuration loaded");

    match cli.category {
        Some(category) => {
            let manager = StackSettingManager::new(config);
            manager.reload(category);
            summarize(&manager, category);
        },
        None => {
            let manager = stk::init(config);
            for category in StackCategory::iter() {
                summarize(&manager, category);
            }
        },
    }

    Ok(())
}

fn summarize(manager: &StackSettingManager, category: StackCategory) {
    info!(
        %category,
        file = %manager.settings_file(category).display(),
        entries = manager.entry_count(category),
        stackable = manager.stackable_count(category),
        "Category summary"
    );
}
