use crate::error::Result;
use crate::settings::{load_settings, log_dir, settings_path};

pub fn run() -> Result<()> {
    let path = settings_path();
    let settings = load_settings();

    println!(
        "Settings:   {}{}",
        path.display(),
        if path.exists() { "" } else { " (not found, using defaults)" }
    );
    println!("Logs:       {}", log_dir().display());
    println!();
    println!("Background: {}", settings.background);
    println!("Accent:     {}", settings.accent);
    println!("Log level:  {}", settings.log_level);

    Ok(())
}
