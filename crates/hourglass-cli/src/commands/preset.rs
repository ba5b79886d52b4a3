use clap::Subcommand;
use hourglass_core::Config;

#[derive(Subcommand)]
pub enum PresetAction {
    /// List built-in and user presets
    List {
        /// Print as JSON
        #[arg(long)]
        json: bool,
    },
}

pub fn run(action: PresetAction) -> Result<(), Box<dyn std::error::Error>> {
    match action {
        PresetAction::List { json } => {
            let config = Config::load_or_default();
            let presets = config.all_presets();
            if json {
                println!("{}", serde_json::to_string_pretty(&presets)?);
            } else {
                for preset in presets {
                    println!("{:<12} {}", preset.name, preset.duration);
                }
            }
        }
    }
    Ok(())
}
