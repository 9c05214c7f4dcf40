use std::env;
use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use slang_config::Config;

/// Root of user settings, `$SLANG_HOME` or `./.slang`
pub fn config_root() -> PathBuf {
    env::var("SLANG_HOME")
        .map(PathBuf::from)
        .unwrap_or_else(|_| PathBuf::from(".slang"))
}

fn profiles_dir(root: &Path) -> PathBuf {
    root.join("profiles")
}

fn profile_path(root: &Path, name: &str) -> PathBuf {
    profiles_dir(root).join(format!("{name}.json"))
}

/// Represents a user profile
#[derive(Serialize, Deserialize)]
pub struct Profile {
    pub name: String,
    pub value: Config,
}

fn read_profile(path: &Path) -> anyhow::Result<Config> {
    let data = fs::read_to_string(path)?;
    let profile: Profile = serde_json::from_str(&data)?;
    Ok(profile.value)
}

/// Initialize user config folders and main profile if missing
pub fn init_user_config(root: &Path) -> anyhow::Result<()> {
    fs::create_dir_all(profiles_dir(root))?;

    let main_profile = profile_path(root, "main");

    if !main_profile.exists() {
        let profile = Profile {
            name: "main".into(),
            value: Config::new(),
        };
        fs::write(&main_profile, serde_json::to_string_pretty(&profile)?)?;
        tracing::info!("Created main profile at {}", main_profile.display());
    }

    Ok(())
}

/// Load a user profile by name, defaulting to main if name not found
pub fn load_user_profile(root: &Path, name: &str) -> anyhow::Result<Config> {
    let profile_file = profile_path(root, name);

    if profile_file.exists() {
        return read_profile(&profile_file);
    }

    tracing::warn!("Profile {name} not found, falling back to main profile or defaults");
    let main_file = profile_path(root, "main");
    if main_file.exists() {
        read_profile(&main_file)
    } else {
        Ok(Config::new())
    }
}
