//! Configuration file loader with multi-source merging

use super::file_config::{ConfigError, FileConfig};
use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use std::path::{Path, PathBuf};

/// Directory name under the platform config dir
const APP_DIR: &str = "advisor-council";
/// Project-level file names, checked in order
const PROJECT_FILES: [&str; 2] = ["council.toml", ".council.toml"];
/// Prefix of environment overrides, e.g. `COUNCIL_CACHE__ENABLED=false`
pub const ENV_PREFIX: &str = "COUNCIL_";

/// Configuration loader that handles file discovery and merging
pub struct ConfigLoader;

impl ConfigLoader {
    /// Load configuration from all sources with proper priority
    ///
    /// Priority (highest to lowest):
    /// 1. `COUNCIL_*` environment variables (`__` separates sections)
    /// 2. Explicit config path (if provided)
    /// 3. Project root: `./council.toml` or `./.council.toml`
    /// 4. Global: `$XDG_CONFIG_HOME/advisor-council/config.toml`
    /// 5. Default values
    pub fn load(config_path: Option<&PathBuf>) -> Result<FileConfig, ConfigError> {
        let figment = Self::figment(
            Self::global_config_path(),
            Path::new("."),
            config_path.map(PathBuf::as_path),
            ENV_PREFIX,
        );
        figment.extract().map_err(|e| ConfigError::Load(Box::new(e)))
    }

    /// Load only default configuration (for --no-config)
    pub fn load_defaults() -> FileConfig {
        FileConfig::default()
    }

    fn figment(
        global: Option<PathBuf>,
        project_dir: &Path,
        explicit: Option<&Path>,
        env_prefix: &str,
    ) -> Figment {
        let mut figment = Figment::new().merge(Serialized::defaults(FileConfig::default()));

        if let Some(global_path) = global.filter(|path| path.exists()) {
            figment = figment.merge(Toml::file(global_path));
        }

        if let Some(project_path) = Self::project_config_path_in(project_dir) {
            figment = figment.merge(Toml::file(project_path));
        }

        if let Some(path) = explicit {
            figment = figment.merge(Toml::file(path));
        }

        figment.merge(Env::prefixed(env_prefix).split("__"))
    }

    /// Get the global config file path
    ///
    /// Returns XDG_CONFIG_HOME/advisor-council/config.toml if set,
    /// otherwise the platform default config directory.
    pub fn global_config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|d| d.join(APP_DIR).join("config.toml"))
    }

    /// Get the project-level config file path (if it exists)
    pub fn project_config_path() -> Option<PathBuf> {
        Self::project_config_path_in(Path::new("."))
    }

    fn project_config_path_in(dir: &Path) -> Option<PathBuf> {
        PROJECT_FILES
            .iter()
            .map(|name| dir.join(name))
            .find(|path| path.exists())
    }

    /// Print the config file locations being used (for debugging)
    pub fn print_config_sources(explicit: Option<&PathBuf>) {
        println!("Configuration sources (in priority order):");
        println!("  [     ] Environment: {}*", ENV_PREFIX);

        if let Some(path) = explicit {
            let mark = if path.exists() { "FOUND" } else { "MISSING" };
            println!("  [{:<5}] Explicit: {}", mark, path.display());
        }

        if let Some(path) = Self::project_config_path() {
            println!("  [FOUND] Project: {}", path.display());
        } else {
            println!("  [     ] Project: ./council.toml or ./.council.toml");
        }

        if let Some(path) = Self::global_config_path() {
            if path.exists() {
                println!("  [FOUND] Global:  {}", path.display());
            } else {
                println!("  [     ] Global:  {}", path.display());
            }
        }

        println!("  [     ] Default: built-in defaults");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    fn extract(figment: Figment) -> FileConfig {
        figment.extract().unwrap()
    }

    #[test]
    fn test_load_defaults() {
        let config = ConfigLoader::load_defaults();
        assert!(config.cache.enabled);
        assert_eq!(config.coordination.deadline_secs, 25);
    }

    #[test]
    fn test_global_config_path_returns_some() {
        // Should return a path (even if file doesn't exist)
        let path = ConfigLoader::global_config_path();
        assert!(path.is_some());
        let path = path.unwrap();
        assert!(path.to_string_lossy().contains("advisor-council"));
    }

    #[test]
    fn test_no_files_gives_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let config = extract(ConfigLoader::figment(
            None,
            dir.path(),
            None,
            "COUNCIL_TEST_NONE_",
        ));
        assert_eq!(config, FileConfig::default());
    }

    #[test]
    fn test_project_file_overrides_global() {
        let dir = tempfile::tempdir().unwrap();
        let global = dir.path().join("global.toml");
        fs::write(
            &global,
            "[coordination]\ndeadline_secs = 40\n\n[cache]\ncapacity = 10\n",
        )
        .unwrap();
        fs::write(
            dir.path().join(".council.toml"),
            "[coordination]\ndeadline_secs = 12\n",
        )
        .unwrap();

        let config = extract(ConfigLoader::figment(
            Some(global),
            dir.path(),
            None,
            "COUNCIL_TEST_PROJECT_",
        ));
        assert_eq!(config.coordination.deadline_secs, 12);
        assert_eq!(config.cache.capacity, 10);
    }

    #[test]
    fn test_explicit_file_has_highest_file_priority() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(
            dir.path().join("council.toml"),
            "[provider]\nmodel = \"project-model\"\n",
        )
        .unwrap();
        let explicit = dir.path().join("custom.toml");
        fs::write(&explicit, "[provider]\nmodel = \"explicit-model\"\n").unwrap();

        let config = extract(ConfigLoader::figment(
            None,
            dir.path(),
            Some(&explicit),
            "COUNCIL_TEST_EXPLICIT_",
        ));
        assert_eq!(config.provider.model, "explicit-model");
    }

    #[test]
    fn test_environment_overrides_files() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("council.toml"), "[cache]\nenabled = true\n").unwrap();

        // SAFETY: the variable name is unique to this test
        unsafe {
            std::env::set_var("COUNCIL_TEST_ENV_CACHE__ENABLED", "false");
        }
        let config = extract(ConfigLoader::figment(
            None,
            dir.path(),
            None,
            "COUNCIL_TEST_ENV_",
        ));
        unsafe {
            std::env::remove_var("COUNCIL_TEST_ENV_CACHE__ENABLED");
        }

        assert!(!config.cache.enabled);
    }

    #[test]
    fn test_malformed_file_is_load_error() {
        let dir = tempfile::tempdir().unwrap();
        let explicit = dir.path().join("broken.toml");
        fs::write(&explicit, "[coordination\ndeadline_secs = ").unwrap();

        let result: Result<FileConfig, _> = ConfigLoader::figment(
            None,
            dir.path(),
            Some(&explicit),
            "COUNCIL_TEST_BROKEN_",
        )
        .extract();
        assert!(result.is_err());
    }
}
