use std::path::PathBuf;

const APP_DIR: &str = "com.skillspark.app";

/// Platform-specific app data directory
pub fn app_data_dir() -> PathBuf {
    #[cfg(target_os = "macos")]
    {
        if let Some(home) = std::env::var_os("HOME") {
            let mut dir = PathBuf::from(home);
            dir.push("Library/Application Support");
            dir.push(APP_DIR);
            return dir;
        }
    }

    #[cfg(target_os = "windows")]
    {
        if let Some(appdata) = std::env::var_os("APPDATA") {
            let mut dir = PathBuf::from(appdata);
            dir.push(APP_DIR);
            return dir;
        }
    }

    #[cfg(target_os = "linux")]
    {
        if let Some(home) = std::env::var_os("HOME") {
            let mut dir = PathBuf::from(home);
            dir.push(".local/share");
            dir.push(APP_DIR);
            return dir;
        }
    }

    // Fallback
    PathBuf::from(".")
}

pub fn settings_path() -> PathBuf {
    app_data_dir().join("settings.toml")
}

/// Where the pre-account, on-device data lived before accounts existed
pub fn legacy_dir() -> PathBuf {
    app_data_dir().join("legacy")
}
