use clap::Subcommand;
use loophero_core::{FileSettingsStore, Settings, SettingsStore};

#[derive(Subcommand)]
pub enum ConfigAction {
    /// Get a settings value
    Get {
        /// Stored key (e.g. "numericInput", "firstSetup")
        key: String,
    },
    /// Set a settings value
    Set {
        /// Stored key
        key: String,
        /// New value
        value: String,
    },
    /// List all settings values
    List,
    /// Reset settings to defaults
    Reset,
    /// Print the settings file location
    Path,
}

pub fn run(action: ConfigAction) -> Result<(), Box<dyn std::error::Error>> {
    let store = FileSettingsStore::open()?;
    match action {
        ConfigAction::Get { key } => match store.snapshot().get(&key) {
            Some(value) => println!("{value}"),
            None => {
                eprintln!("unknown key: {key} (known: {})", Settings::keys().join(", "));
                std::process::exit(1);
            }
        },
        ConfigAction::Set { key, value } => {
            store.update(&mut |s: &mut Settings| s.set(&key, &value))?;
            println!("ok");
        }
        ConfigAction::List => {
            let json = serde_json::to_string_pretty(&store.snapshot())?;
            println!("{json}");
        }
        ConfigAction::Reset => {
            store.reset()?;
            println!("settings reset to defaults");
        }
        ConfigAction::Path => println!("{}", store.path().display()),
    }
    Ok(())
}
