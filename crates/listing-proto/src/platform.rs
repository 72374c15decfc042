use std::path::PathBuf;

const APP_DIR: &str = "listings";

/// `~/<segments>/listings`, or relative to the working directory without a home.
#[cfg(unix)]
fn under_home(segments: &[&str]) -> PathBuf {
    let mut path = dirs::home_dir().unwrap_or_else(|| PathBuf::from("."));
    path.extend(segments);
    path.join(APP_DIR)
}

/// Log file and other runtime data. XDG layout on macOS too.
pub fn data_dir() -> PathBuf {
    #[cfg(unix)]
    {
        under_home(&[".local", "share"])
    }
    #[cfg(windows)]
    {
        dirs::data_local_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join(APP_DIR)
    }
}

pub fn config_dir() -> PathBuf {
    #[cfg(unix)]
    {
        under_home(&[".config"])
    }
    #[cfg(windows)]
    {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join(APP_DIR)
    }
}

pub fn log_path() -> PathBuf {
    data_dir().join("listings.log")
}
