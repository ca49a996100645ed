use std::path::PathBuf;

/// Platform-specific path handling that follows XDG Base Directory spec on
/// Unix-like systems and Windows conventions on Windows.
///
/// On macOS and Linux:
/// - Config: $XDG_CONFIG_HOME/{name} (default: ~/.config/{name})
/// - Data: $XDG_DATA_HOME/{name} (default: ~/.local/share/{name})
///
/// On Windows:
/// - Config: %APPDATA%\{name}
/// - Data: %APPDATA%\{name}
pub struct ProjectPaths {
    name: String,
}

impl ProjectPaths {
    /// Create a new ProjectPaths instance for the given application name.
    pub fn new(name: &str) -> Option<Self> {
        // Verify we can get home directory before creating
        get_home_dir()?;
        Some(ProjectPaths {
            name: name.to_string(),
        })
    }

    /// Get the configuration directory path.
    pub fn config_dir(&self) -> PathBuf {
        #[cfg(target_os = "windows")]
        {
            get_windows_appdata()
                .map(|p| p.join(&self.name))
                .unwrap_or_else(|| PathBuf::from(format!(".{}", self.name)))
        }

        #[cfg(not(target_os = "windows"))]
        {
            get_xdg_config_dir(&self.name)
        }
    }

    /// Get the data directory path (farm/waypoint stores, log files).
    pub fn data_dir(&self) -> PathBuf {
        #[cfg(target_os = "windows")]
        {
            get_windows_appdata()
                .map(|p| p.join(&self.name))
                .unwrap_or_else(|| PathBuf::from(format!(".{}", self.name)))
        }

        #[cfg(not(target_os = "windows"))]
        {
            get_xdg_data_dir(&self.name)
        }
    }
}

/// Get the home directory, respecting HOME and USERPROFILE environment variables.
fn get_home_dir() -> Option<PathBuf> {
    std::env::var("HOME")
        .ok()
        .map(PathBuf::from)
        .or_else(|| std::env::var("USERPROFILE").ok().map(PathBuf::from))
}

/// Get XDG config directory (respects $XDG_CONFIG_HOME, defaults to ~/.config).
fn get_xdg_config_dir(name: &str) -> PathBuf {
    std::env::var("XDG_CONFIG_HOME")
        .ok()
        .map(PathBuf::from)
        .or_else(|| get_home_dir().map(|h| h.join(".config")))
        .unwrap_or_else(|| PathBuf::from(".config"))
        .join(name)
}

/// Get XDG data directory (respects $XDG_DATA_HOME, defaults to ~/.local/share).
fn get_xdg_data_dir(name: &str) -> PathBuf {
    std::env::var("XDG_DATA_HOME")
        .ok()
        .map(PathBuf::from)
        .or_else(|| get_home_dir().map(|h| h.join(".local").join("share")))
        .unwrap_or_else(|| PathBuf::from(".local/share"))
        .join(name)
}

/// Get Windows APPDATA directory.
#[cfg(target_os = "windows")]
fn get_windows_appdata() -> Option<PathBuf> {
    std::env::var("APPDATA").ok().map(PathBuf::from)
}
