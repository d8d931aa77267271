use std::fs;
use std::path::{Path, PathBuf};

use anyhow::Context;
use phonica_config::Config;
use serde::{Deserialize, Serialize};

/// Represents a user profile
#[derive(Serialize, Deserialize)]
pub struct Profile {
    pub name: String,
    pub value: Config,
}

fn profile_path(profiles_dir: &Path, name: &str) -> PathBuf {
    profiles_dir.join(format!("{name}.json"))
}

/// Resolve the effective config: env defaults, then the named profile,
/// then the command-line data dir override.
pub fn load_config(name: &str, data_dir: Option<PathBuf>) -> anyhow::Result<Config> {
    let mut base = Config::new();
    if let Some(dir) = &data_dir {
        base.data_dir = dir.clone();
    }

    if let Err(e) = init_user_config(&base) {
        tracing::warn!("Could not initialize profiles in {}: {e}", base.data_dir.display());
    }

    let mut config = load_user_profile(&base, name)?;
    if let Some(dir) = data_dir {
        config.data_dir = dir;
    }

    tracing::info!("Using data dir {}", config.data_dir.display());
    Ok(config)
}

/// Write the main profile from `defaults` if it does not exist yet
pub fn init_user_config(defaults: &Config) -> anyhow::Result<()> {
    let profiles_dir = defaults.profiles_dir();
    fs::create_dir_all(&profiles_dir)?;

    let main_profile = profile_path(&profiles_dir, "main");

    if !main_profile.exists() {
        let profile = Profile {
            name: "main".into(),
            value: defaults.clone(),
        };
        fs::write(&main_profile, serde_json::to_string_pretty(&profile)?)?;
        tracing::info!("Created main profile at {}", main_profile.display());
    }

    Ok(())
}

/// Load a profile by name, falling back to main, then to `defaults`
pub fn load_user_profile(defaults: &Config, name: &str) -> anyhow::Result<Config> {
    let profiles_dir = defaults.profiles_dir();

    for candidate in [name, "main"] {
        let file = profile_path(&profiles_dir, candidate);
        if file.exists() {
            let data = fs::read_to_string(&file)?;
            let profile: Profile = serde_json::from_str(&data)
                .with_context(|| format!("Invalid profile {}", file.display()))?;
            return Ok(profile.value);
        }
        tracing::warn!("Profile {candidate} not found");
    }

    Ok(defaults.clone())
}
