// ptdash platform paths for Linux
// Config: ~/.config/ptdash
// Data:   ~/.local/share/ptdash

use std::env;
use std::path::PathBuf;

/// Returns the configuration directory for ptdash on Linux.
/// Uses `$XDG_CONFIG_HOME/ptdash` if set, otherwise `~/.config/ptdash`.
pub fn get_config_dir() -> PathBuf {
    if let Ok(xdg) = env::var("XDG_CONFIG_HOME") {
        PathBuf::from(xdg).join("ptdash")
    } else {
        let home = env::var("HOME").unwrap_or_else(|_| String::from("/tmp"));
        PathBuf::from(home).join(".config").join("ptdash")
    }
}

/// Returns the data directory for ptdash on Linux.
/// Uses `$XDG_DATA_HOME/ptdash` if set, otherwise `~/.local/share/ptdash`.
pub fn get_data_dir() -> PathBuf {
    if let Ok(xdg) = env::var("XDG_DATA_HOME") {
        PathBuf::from(xdg).join("ptdash")
    } else {
        let home = env::var("HOME").unwrap_or_else(|_| String::from("/tmp"));
        PathBuf::from(home)
            .join(".local")
            .join("share")
            .join("ptdash")
    }
}
