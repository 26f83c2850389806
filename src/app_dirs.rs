use directories::ProjectDirs;
use std::env;
use std::path::{Path, PathBuf};

const APP_NAME: &str = "gapfill";
const LOG_FILE: &str = "gapfill.log";

/// Where gapfill keeps files that are not configuration
pub struct AppDirs;

impl AppDirs {
    /// `$XDG_STATE_HOME/gapfill`, else `~/.local/state/gapfill`, else the
    /// platform's local data dir
    pub fn state_dir() -> Option<PathBuf> {
        state_dir_from(
            env::var_os("XDG_STATE_HOME").map(PathBuf::from).as_deref(),
            env::var_os("HOME").map(PathBuf::from).as_deref(),
        )
        .or_else(|| {
            ProjectDirs::from("", "", APP_NAME).map(|dirs| dirs.data_local_dir().to_path_buf())
        })
    }

    pub fn log_path() -> Option<PathBuf> {
        Self::state_dir().map(|dir| dir.join(LOG_FILE))
    }
}

fn state_dir_from(xdg_state: Option<&Path>, home: Option<&Path>) -> Option<PathBuf> {
    // relative XDG paths are invalid and ignored
    if let Some(state) = xdg_state.filter(|p| p.is_absolute()) {
        return Some(state.join(APP_NAME));
    }
    home.map(|home| home.join(".local").join("state").join(APP_NAME))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn xdg_state_home_wins() {
        let dir = state_dir_from(Some(Path::new("/xdg/state")), Some(Path::new("/home/me")));
        assert_eq!(dir, Some(PathBuf::from("/xdg/state/gapfill")));
    }

    #[test]
    fn relative_xdg_state_home_is_ignored() {
        let dir = state_dir_from(Some(Path::new("state")), Some(Path::new("/home/me")));
        assert_eq!(dir, Some(PathBuf::from("/home/me/.local/state/gapfill")));
    }

    #[test]
    fn no_home_defers_to_platform_dirs() {
        assert_eq!(state_dir_from(None, None), None);
    }
}
