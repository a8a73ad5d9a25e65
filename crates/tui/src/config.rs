use directories::BaseDirs;
use serde::Deserialize;
use std::{
    env, fs,
    path::{Path, PathBuf},
};

#[derive(Clone, Debug, Default, Deserialize)]
pub struct FileConfig {
    pub data_dir: Option<PathBuf>,
    pub log_level: Option<String>,
    pub mouse: Option<bool>,
}

#[derive(Clone, Debug)]
pub struct Config {
    /// Holds the store files and the log. `None` when no home directory exists.
    pub data_dir: Option<PathBuf>,
    pub log_level: String,
    pub mouse: bool,
    /// Problems met while loading. Logging starts after the config is known,
    /// so these are reported by the caller once it is up.
    pub warnings: Vec<String>,
}

impl Config {
    /// Defaults, then `config.toml`, then `SPINTRACK_*` environment variables.
    pub fn load() -> Self {
        let (file_cfg, warning) = match Self::config_path() {
            Some(p) => Self::read_file(&p),
            None => (FileConfig::default(), None),
        };
        let mut cfg = Self::resolve(
            file_cfg,
            env::var("SPINTRACK_DATA_DIR").ok(),
            env::var("SPINTRACK_LOG").ok(),
        );
        cfg.warnings.extend(warning);
        cfg
    }

    /// A missing file is not an error; unreadable or malformed ones fall back
    /// to defaults with a message.
    fn read_file(path: &Path) -> (FileConfig, Option<String>) {
        if !path.exists() {
            return (FileConfig::default(), None);
        }
        let text = match fs::read_to_string(path) {
            Ok(s) => s,
            Err(e) => {
                let msg = format!("read config {}: {}", path.display(), e);
                return (FileConfig::default(), Some(msg));
            }
        };
        match toml::from_str::<FileConfig>(&text) {
            Ok(c) => (c, None),
            Err(e) => {
                let msg = format!("parse config {}: {}", path.display(), e);
                (FileConfig::default(), Some(msg))
            }
        }
    }

    fn resolve(file_cfg: FileConfig, env_dir: Option<String>, env_log: Option<String>) -> Self {
        let mut data_dir = Self::default_data_dir();
        let mut log_level = "info".to_string();
        let mut mouse = true;

        if let Some(d) = file_cfg.data_dir {
            data_dir = Some(d);
        }
        if let Some(l) = file_cfg.log_level {
            log_level = l;
        }
        if let Some(m) = file_cfg.mouse {
            mouse = m;
        }
        if let Some(d) = env_dir.filter(|s| !s.trim().is_empty()) {
            data_dir = Some(PathBuf::from(d));
        }
        if let Some(l) = env_log.filter(|s| !s.trim().is_empty()) {
            log_level = l;
        }

        Config {
            data_dir,
            log_level,
            mouse,
            warnings: Vec::new(),
        }
    }

    fn default_data_dir() -> Option<PathBuf> {
        let base = BaseDirs::new()?;
        Some(base.data_dir().join("spintrack"))
    }

    fn config_path() -> Option<PathBuf> {
        let base = BaseDirs::new()?;
        let p = if cfg!(target_os = "windows") {
            base.home_dir().join(".spintrack").join("config.toml")
        } else {
            base.config_dir().join("spintrack").join("config.toml")
        };
        Some(p)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn env_overrides_file() {
        let file_cfg: FileConfig =
            toml::from_str("data_dir = \"/tmp/a\"\nlog_level = \"debug\"\nmouse = false\n")
                .unwrap();
        let c = Config::resolve(file_cfg.clone(), None, None);
        assert_eq!(c.data_dir, Some(PathBuf::from("/tmp/a")));
        assert_eq!(c.log_level, "debug");
        assert!(!c.mouse);

        let c = Config::resolve(file_cfg, Some("/tmp/b".into()), Some("trace".into()));
        assert_eq!(c.data_dir, Some(PathBuf::from("/tmp/b")));
        assert_eq!(c.log_level, "trace");
    }

    #[test]
    fn blank_env_is_ignored() {
        let c = Config::resolve(FileConfig::default(), Some("  ".into()), Some(String::new()));
        assert_eq!(c.log_level, "info");
        assert!(c.mouse);
        assert_eq!(c.data_dir, Config::default_data_dir());
    }

    #[test]
    fn malformed_file_falls_back_with_a_warning() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");

        let (c, warning) = Config::read_file(&path);
        assert!(c.log_level.is_none());
        assert!(warning.is_none());

        fs::write(&path, "mouse = \"sometimes\"\n").unwrap();
        let (c, warning) = Config::read_file(&path);
        assert!(c.mouse.is_none());
        let warning = warning.unwrap();
        assert!(warning.starts_with("parse config"));
        assert!(warning.contains("config.toml"));

        fs::write(&path, "log_level = \"warn\"\n").unwrap();
        let (c, warning) = Config::read_file(&path);
        assert_eq!(c.log_level.as_deref(), Some("warn"));
        assert!(warning.is_none());
    }
}
