use clap::Subcommand;
use loophero_core::{FileSettingsStore, SettingsStore};

#[derive(Subcommand)]
pub enum SetupAction {
    /// Print whether onboarding has been completed
    Status,
    /// Mark onboarding as completed
    Complete,
    /// Mark onboarding as pending again
    Reset,
}

pub fn run(action: SetupAction) -> Result<(), Box<dyn std::error::Error>> {
    let store = FileSettingsStore::open()?;
    match action {
        SetupAction::Status => {
            let status = if store.first_setup_done() { "done" } else { "pending" };
            println!("{status}");
        }
        SetupAction::Complete => {
            store.set_first_setup_done(true)?;
            println!("setup complete; start the observer with `loophero-cli watch`");
        }
        SetupAction::Reset => {
            store.set_first_setup_done(false)?;
            println!("setup pending");
        }
    }
    Ok(())
}
