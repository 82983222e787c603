use clap::Args;
use std::path::PathBuf;
use timeblock_core::FormatterSettings;

#[derive(Args)]
pub struct SettingsArgs {
    /// Settings JSON file
    #[arg(long)]
    pub settings: Option<PathBuf>,
    /// Write defaults to the settings file when it does not exist yet
    #[arg(long, requires = "settings")]
    pub init: bool,
}

pub fn run(args: SettingsArgs) -> Result<(), Box<dyn std::error::Error>> {
    if args.init {
        if let Some(path) = args.settings.as_deref() {
            if path.exists() {
                eprintln!("settings already exist: {}", path.display());
            } else {
                FormatterSettings::default().save(path)?;
                eprintln!("wrote default settings to {}", path.display());
            }
        }
    }

    let settings = super::load_settings(args.settings.as_deref())?;
    println!("{}", serde_json::to_string_pretty(&settings)?);
    Ok(())
}
