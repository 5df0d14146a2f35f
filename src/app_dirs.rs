use directories::ProjectDirs;
use std::path::PathBuf;

/// Centralized application directory resolution
pub struct AppDirs;

impl AppDirs {
    pub fn log_path() -> Option<PathBuf> {
        if let Ok(home) = std::env::var("HOME") {
            let state_dir = PathBuf::from(home)
                .join(".local")
                .join("state")
                .join("ticktype");
            Some(state_dir.join("ticktype.log"))
        } else {
            ProjectDirs::from("", "", "ticktype")
                .map(|proj_dirs| proj_dirs.data_local_dir().join("ticktype.log"))
        }
    }
}
