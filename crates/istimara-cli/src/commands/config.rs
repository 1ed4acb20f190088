//! Config commands

use crate::config::Config;
use crate::output::success;
use crate::ConfigCommands;

pub fn handle(
    action: &ConfigCommands,
    profile: Option<&str>,
    mut config: Config,
) -> anyhow::Result<()> {
    match action {
        ConfigCommands::Show => {
            println!("api_url = {}", config.api_url.as_deref().unwrap_or("(default)"));
            println!(
                "token   = {}",
                if config.token.is_some() { "(set)" } else { "(unset)" }
            );
        }
        ConfigCommands::Set { api_url, token } => {
            if let Some(api_url) = api_url {
                config.api_url = Some(api_url.clone());
            }
            if let Some(token) = token {
                config.token = Some(token.clone());
            }
            config.save(profile)?;
            success("configuration saved");
        }
    }
    Ok(())
}
