use anyhow::{Context, Result, bail};
use derivative::Derivative;
use log::{debug, warn};
use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};
use std::{
    fs,
    path::{Path, PathBuf},
    sync::{Mutex, MutexGuard},
};

pub const DEFAULT_CONFIG_FILE: &str = "volshot.toml";

static CONFIG: Lazy<Mutex<Config>> = Lazy::new(|| Mutex::new(Config::default()));

#[derive(Serialize, Deserialize, Default, Debug, Clone, PartialEq)]
pub struct Config {
    #[serde(skip)]
    pub config_path: PathBuf,

    /// Why the file on disk was replaced with defaults, if it was.
    #[serde(skip)]
    pub parse_error: Option<String>,

    #[serde(default)]
    pub viewer: Viewer,

    #[serde(default)]
    pub output: Output,

    #[serde(default)]
    pub log: Log,
}

#[derive(Serialize, Deserialize, Debug, Clone, Derivative, PartialEq)]
#[derivative(Default)]
#[serde(default)]
pub struct Viewer {
    #[derivative(Default(value = "0.5"))]
    pub default_opacity: f32,

    /// External volume viewer. Empty means scenes are only written to disk.
    pub command: String,

    pub args: Vec<String>,
}

#[derive(Serialize, Deserialize, Debug, Clone, Derivative, PartialEq)]
#[derivative(Default)]
#[serde(default)]
pub struct Output {
    #[derivative(Default(value = "PathBuf::from(\"output\")"))]
    pub dir: PathBuf,

    #[derivative(Default(value = "\"processed_image.png\".to_string()"))]
    pub download_file_name: String,
}

#[derive(Serialize, Deserialize, Debug, Clone, Derivative, PartialEq)]
#[derivative(Default)]
#[serde(default)]
pub struct Log {
    #[derivative(Default(value = "\"info\".to_string()"))]
    pub level: String,
}

impl Config {
    /// Loads configuration from file or creates default if not exists
    ///
    /// A file that fails to parse is kept as `<file>.bak` and replaced with defaults.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let config_path = path.as_ref().to_path_buf();

        match fs::read_to_string(&config_path) {
            Ok(text) => match toml::from_str::<Config>(&text) {
                Ok(mut c) => {
                    c.config_path = config_path;
                    c.validate()?;
                    debug!("{:?}", c);
                    Ok(c)
                }
                Err(e) => {
                    let bak_file = format!("{}.bak", config_path.display());
                    _ = fs::copy(&config_path, &bak_file);

                    let reason = format!(
                        "parse {} failed, kept as {bak_file}: {e}",
                        config_path.display()
                    );
                    warn!("{reason}");

                    let mut config = Self::create_default(config_path)?;
                    config.parse_error = Some(reason);
                    Ok(config)
                }
            },
            Err(_) => Self::create_default(config_path),
        }
    }

    fn create_default(config_path: PathBuf) -> Result<Self> {
        let config = Self {
            config_path,
            ..Default::default()
        };

        if let Some(dir) = config
            .config_path
            .parent()
            .filter(|d| !d.as_os_str().is_empty())
        {
            fs::create_dir_all(dir)?;
        }

        config.save()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        let opacity = self.viewer.default_opacity;
        if !(0.0..=1.0).contains(&opacity) {
            bail!("viewer.default_opacity must lie in [0, 1], got {opacity}");
        }

        if self.output.download_file_name.trim().is_empty() {
            bail!("output.download_file_name must not be empty");
        }

        Ok(())
    }

    /// Saves the current configuration to file
    pub fn save(&self) -> Result<()> {
        match toml::to_string_pretty(self) {
            Ok(text) => Ok(fs::write(&self.config_path, text)
                .with_context(|| format!("save config {} failed", self.config_path.display()))?),
            Err(e) => bail!(format!("convert config to toml format failed. {e:?}")),
        }
    }
}

fn lock() -> MutexGuard<'static, Config> {
    CONFIG.lock().unwrap_or_else(|e| e.into_inner())
}

/// Initializes the global configuration
///
/// This should be called once at application startup.
pub fn init(path: impl AsRef<Path>) -> Result<()> {
    let config = Config::load(path).with_context(|| "load config file failed")?;
    *lock() = config;
    Ok(())
}

/// Returns a clone of the current configuration
pub fn all() -> Config {
    lock().clone()
}

/// Saves a new configuration and updates the global instance
pub fn save(conf: Config) -> Result<()> {
    let mut config = lock();
    *config = conf;
    config.save()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = Config::default();
        assert_eq!(config.viewer.default_opacity, 0.5);
        assert!(config.viewer.command.is_empty());
        assert_eq!(config.output.dir, PathBuf::from("output"));
        assert_eq!(config.output.download_file_name, "processed_image.png");
        assert_eq!(config.log.level, "info");
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_missing_file_is_created() -> Result<()> {
        let dir = tempfile::tempdir()?;
        let path = dir.path().join("nested").join(DEFAULT_CONFIG_FILE);

        let config = Config::load(&path)?;
        assert!(config.parse_error.is_none());
        assert!(path.exists());

        let reloaded = Config::load(&path)?;
        assert!(reloaded.parse_error.is_none());
        assert_eq!(reloaded.viewer, config.viewer);
        assert_eq!(reloaded.output, config.output);
        Ok(())
    }

    #[test]
    fn test_partial_file_uses_defaults() -> Result<()> {
        let dir = tempfile::tempdir()?;
        let path = dir.path().join(DEFAULT_CONFIG_FILE);
        fs::write(&path, "[viewer]\ncommand = \"f3d\"\n")?;

        let config = Config::load(&path)?;
        assert_eq!(config.viewer.command, "f3d");
        assert_eq!(config.viewer.default_opacity, 0.5);
        assert_eq!(config.log.level, "info");
        Ok(())
    }

    #[test]
    fn test_corrupt_file_is_backed_up() -> Result<()> {
        let dir = tempfile::tempdir()?;
        let path = dir.path().join(DEFAULT_CONFIG_FILE);
        fs::write(&path, "viewer = [[[")?;

        let config = Config::load(&path)?;
        let reason = config.parse_error.unwrap();
        assert!(reason.contains("volshot.toml.bak"));
        assert_eq!(config.viewer, Viewer::default());
        assert_eq!(
            fs::read_to_string(dir.path().join("volshot.toml.bak"))?,
            "viewer = [[["
        );
        assert!(toml::from_str::<Config>(&fs::read_to_string(&path)?).is_ok());
        Ok(())
    }

    #[test]
    fn test_out_of_range_opacity_rejected() -> Result<()> {
        let dir = tempfile::tempdir()?;
        let path = dir.path().join(DEFAULT_CONFIG_FILE);
        fs::write(&path, "[viewer]\ndefault_opacity = 1.5\n")?;

        assert!(Config::load(&path).is_err());
        Ok(())
    }

    #[test]
    fn test_global_round_trip() -> Result<()> {
        let dir = tempfile::tempdir()?;
        let path = dir.path().join(DEFAULT_CONFIG_FILE);
        init(&path)?;

        let mut conf = all();
        conf.viewer.default_opacity = 0.25;
        save(conf)?;

        init(&path)?;
        assert_eq!(all().viewer.default_opacity, 0.25);
        Ok(())
    }
}
