use std::path::PathBuf;

/// Resolved application directories.
///
/// Pure data: nothing here checks or creates the directories.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppDirs {
    /// Root for the history file, the ignore marker and daemon state.
    pub app_data_root: PathBuf,
    /// Root for `config.toml`.
    pub app_config_root: PathBuf,
}

impl AppDirs {
    pub fn history_path(&self) -> PathBuf {
        self.app_data_root.join("store.json")
    }

    pub fn config_path(&self) -> PathBuf {
        self.app_config_root.join("config.toml")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn derives_concrete_locations_from_roots() {
        let dirs = AppDirs {
            app_data_root: PathBuf::from("/tmp/stashclip"),
            app_config_root: PathBuf::from("/tmp/config/stashclip"),
        };

        assert_eq!(dirs.history_path(), PathBuf::from("/tmp/stashclip/store.json"));
        assert_eq!(
            dirs.config_path(),
            PathBuf::from("/tmp/config/stashclip/config.toml")
        );
    }
}
