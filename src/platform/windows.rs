// ptdash platform paths for Windows
// Config: %APPDATA%/ptdash
// Data:   %APPDATA%/ptdash

use std::env;
use std::path::PathBuf;

/// Returns the roaming application data directory on Windows.
fn appdata_dir() -> PathBuf {
    PathBuf::from(env::var("APPDATA").unwrap_or_else(|_| String::from("C:\\Temp")))
}

/// Returns the configuration directory for ptdash on Windows.
/// `%APPDATA%/ptdash`
pub fn get_config_dir() -> PathBuf {
    appdata_dir().join("ptdash")
}

/// Returns the data directory for ptdash on Windows.
/// `%APPDATA%/ptdash`
pub fn get_data_dir() -> PathBuf {
    appdata_dir().join("ptdash")
}
