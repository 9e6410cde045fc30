//! Launchpad — keep project folders in named groups and open them together.

use std::path::PathBuf;

use tracing::debug;
use tracing_subscriber::EnvFilter;

mod commands;

use commands::Command;
use launchpad_groups::GroupManager;

fn resolve_data_dir() -> PathBuf {
    std::env::var("LAUNCHPAD_DATA_DIR")
        .map(PathBuf::from)
        .unwrap_or_else(|_| {
            let exe_dir = std::env::current_exe()
                .ok()
                .and_then(|p| p.parent().map(|p| p.to_path_buf()));
            if let Some(dir) = exe_dir {
                let parent_data = dir.join("../data");
                if parent_data.exists() {
                    return parent_data;
                }
            }
            PathBuf::from("data")
        })
}

fn main() -> anyhow::Result<()> {
    // Logs go to stderr so command output stays pipeable
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let args: Vec<String> = std::env::args().skip(1).collect();
    let command = match Command::parse(&args) {
        Ok(command) => command,
        Err(e) => {
            eprintln!("{}. Use 'launchpad help' for usage.", e);
            std::process::exit(1);
        }
    };

    if matches!(command, Command::Help) {
        commands::print_help(&mut std::io::stdout())?;
        return Ok(());
    }

    let data_dir = resolve_data_dir();
    debug!("Data directory: {}", data_dir.display());

    let config = launchpad_core::LaunchpadConfig::from_env(&data_dir)?;
    let store = launchpad_store::open_store(&config)
        .map_err(|e| anyhow::anyhow!("Failed to open store: {}", e))?;
    let manager = GroupManager::with_key(store, config.storage_key.clone())?;

    let mut stdout = std::io::stdout().lock();
    if let Err(e) = commands::run(&manager, command, &mut stdout) {
        eprintln!("Error: {:#}", e);
        std::process::exit(1);
    }
    Ok(())
}
