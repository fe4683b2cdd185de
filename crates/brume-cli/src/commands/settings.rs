//! Persistent settings inspection and reset.

use std::path::{Path, PathBuf};

use clap::{Args, Subcommand};

use brume_settings::{FileStore, PersistentSettings, SETTINGS_VERSION};

#[derive(Args)]
pub struct SettingsArgs {
    #[command(subcommand)]
    action: SettingsAction,
}

#[derive(Subcommand)]
enum SettingsAction {
    /// Show what a session would load from a settings file
    Show {
        /// Settings file (TOML)
        #[arg(value_name = "FILE")]
        file: PathBuf,
    },

    /// Write a fresh current-version record
    Reset {
        /// Settings file (TOML)
        #[arg(value_name = "FILE")]
        file: PathBuf,

        /// Engage overdrive in the new record
        #[arg(long)]
        overdrive: bool,
    },
}

pub fn run(args: SettingsArgs) -> anyhow::Result<()> {
    match args.action {
        SettingsAction::Show { file } => show(&file),
        SettingsAction::Reset { file, overdrive } => reset(&file, overdrive),
    }
}

fn show(file: &Path) -> anyhow::Result<()> {
    let store = FileStore::new(file);
    if !store.exists() {
        println!("No settings file at {}.", file.display());
        println!(
            "A session would start from defaults: overdrive {}.",
            on_off(PersistentSettings::default().overdrive_enabled)
        );
        return Ok(());
    }

    match store.read() {
        Ok(record) if record.is_current() => {
            println!("Settings at {}:", file.display());
            println!("  version:   {}", record.version);
            println!("  overdrive: {}", on_off(record.overdrive_enabled));
        }
        Ok(record) => {
            println!(
                "Settings at {} carry version {} (current is {}).",
                file.display(),
                record.version,
                SETTINGS_VERSION
            );
            println!("A session would ignore the record whole and start from defaults.");
        }
        Err(err) => {
            println!("Settings at {} are unreadable: {err}", file.display());
            println!("A session would start from defaults.");
        }
    }
    Ok(())
}

fn reset(file: &Path, overdrive: bool) -> anyhow::Result<()> {
    let store = FileStore::new(file);
    let record = PersistentSettings {
        version: SETTINGS_VERSION,
        overdrive_enabled: overdrive,
    };
    store.write(&record)?;
    println!(
        "Wrote {}: version {}, overdrive {}.",
        file.display(),
        record.version,
        on_off(record.overdrive_enabled)
    );
    Ok(())
}

fn on_off(flag: bool) -> &'static str {
    if flag {
        "on"
    } else {
        "off"
    }
}
