//! Layered run configuration.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::info;

use twin_core::summary::SUMMARY_FILE_NAME;
use twin_core::{
    FieldSettings, InterventionSettings, ScriptScenario, SmootherKind, SmootherSettings,
};
use twin_spi::TwinError;

use crate::error::ConfigError;

/// Environment variable holding the noise seed.
pub const ENV_SEED: &str = "ECOTWIN_SEED";

/// Environment variable selecting the smoother.
pub const ENV_MODEL: &str = "ECOTWIN_MODEL";

/// Where exports are written.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    pub dir: PathBuf,
    pub summary_file: String,
    /// Also write one `t,observed,predicted` file per domain
    pub write_series: bool,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            dir: PathBuf::from("."),
            summary_file: SUMMARY_FILE_NAME.to_string(),
            write_series: true,
        }
    }
}

impl OutputConfig {
    pub fn summary_path(&self) -> PathBuf {
        self.dir.join(&self.summary_file)
    }
}

/// Complete configuration for one run.
///
/// Resolution order (highest priority first):
/// 1. CLI flags (applied via [`TwinConfig::apply_cli_overrides`])
/// 2. Environment variables (`ECOTWIN_SEED`, `ECOTWIN_MODEL`)
/// 3. TOML file passed with `--config`
/// 4. Compiled defaults
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct TwinConfig {
    /// Noise seed; drawn at random when absent
    #[serde(skip_serializing_if = "Option::is_none")]
    pub seed: Option<u64>,
    pub smoother: SmootherSettings,
    pub intervention: InterventionSettings,
    pub field: FieldSettings,
    pub script: ScriptScenario,
    pub output: OutputConfig,
}

/// CLI values that override every other layer.
#[derive(Debug, Clone, Default)]
pub struct CliOverrides {
    pub seed: Option<u64>,
    pub model: Option<SmootherKind>,
    pub output_dir: Option<PathBuf>,
}

impl TwinConfig {
    /// Resolve all layers and validate the result.
    pub fn load(path: Option<&Path>, cli: Option<&CliOverrides>) -> Result<Self, ConfigError> {
        let mut config = match path {
            Some(path) => Self::from_file(path)?,
            None => Self::default(),
        };

        config.apply_env_overrides(|name| std::env::var(name).ok())?;

        if let Some(cli) = cli {
            config.apply_cli_overrides(cli);
        }

        config.validate()?;
        Ok(config)
    }

    /// Parse a TOML file. Missing keys take their defaults.
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::Read {
            path: path.display().to_string(),
            message: e.to_string(),
        })?;
        toml::from_str(&content).map_err(|e| ConfigError::Parse {
            path: path.display().to_string(),
            message: e.to_string(),
        })
    }

    /// Parse a TOML string.
    pub fn from_toml(toml_str: &str) -> Result<Self, ConfigError> {
        toml::from_str(toml_str).map_err(|e| ConfigError::Parse {
            path: "<string>".to_string(),
            message: e.to_string(),
        })
    }

    /// Apply `ECOTWIN_*` variables looked up through `lookup`.
    pub fn apply_env_overrides<F>(&mut self, lookup: F) -> Result<(), ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(raw) = lookup(ENV_SEED) {
            let seed = raw.trim().parse::<u64>().map_err(|_| {
                TwinError::invalid_parameter(ENV_SEED, format!("'{}' is not a u64", raw))
            })?;
            self.seed = Some(seed);
        }
        if let Some(raw) = lookup(ENV_MODEL) {
            self.smoother.kind = raw.parse()?;
        }
        Ok(())
    }

    pub fn apply_cli_overrides(&mut self, cli: &CliOverrides) {
        if cli.seed.is_some() {
            self.seed = cli.seed;
        }
        if let Some(model) = cli.model {
            self.smoother.kind = model;
        }
        if let Some(dir) = &cli.output_dir {
            self.output.dir = dir.clone();
        }
    }

    /// Check every section.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.smoother.validate()?;
        self.intervention.validate()?;
        self.field.validate()?;
        self.script.validate()?;
        if self.output.summary_file.trim().is_empty() {
            return Err(TwinError::invalid_parameter("output.summary_file", "must not be empty").into());
        }
        Ok(())
    }

    /// The configured seed, or a fresh random one.
    ///
    /// A drawn seed is logged so the run can be replayed with `--seed`.
    pub fn resolve_seed(&self) -> u64 {
        match self.seed {
            Some(seed) => seed,
            None => {
                let seed = rand::random::<u64>();
                info!(seed, "no seed configured, drew a random one");
                seed
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn env(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |name| map.get(name).cloned()
    }

    #[test]
    fn test_defaults_are_valid() {
        let config = TwinConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.seed, None);
        assert_eq!(config.smoother.kind, SmootherKind::Polynomial);
        assert_eq!(config.intervention.years, 15);
        assert_eq!(config.output.summary_file, "model_summary_results.csv");
    }

    #[test]
    fn test_partial_toml() {
        let config = TwinConfig::from_toml(
            r#"
            seed = 7

            [smoother]
            kind = "kernel"
            regularization = 0.5

            [intervention]
            years = 20
            "#,
        )
        .unwrap();
        assert_eq!(config.seed, Some(7));
        assert_eq!(config.smoother.kind, SmootherKind::Kernel);
        assert!((config.smoother.regularization - 0.5).abs() < 1e-12);
        assert_eq!(config.smoother.degree, 3);
        assert_eq!(config.intervention.years, 20);
        assert!((config.intervention.strength_pct - 60.0).abs() < 1e-12);
    }

    #[test]
    fn test_bad_toml_is_parse_error() {
        assert!(matches!(
            TwinConfig::from_toml("seed = \"abc\""),
            Err(ConfigError::Parse { .. })
        ));
    }

    #[test]
    fn test_missing_file_is_read_error() {
        assert!(matches!(
            TwinConfig::from_file(Path::new("/nonexistent/ecotwin.toml")),
            Err(ConfigError::Read { .. })
        ));
    }

    #[test]
    fn test_env_overrides_file() {
        let mut config = TwinConfig::from_toml("seed = 1").unwrap();
        config
            .apply_env_overrides(env(&[(ENV_SEED, "99"), (ENV_MODEL, "random-forest")]))
            .unwrap();
        assert_eq!(config.seed, Some(99));
        assert_eq!(config.smoother.kind, SmootherKind::RandomForest);
    }

    #[test]
    fn test_bad_env_values_rejected() {
        let mut config = TwinConfig::default();
        assert!(matches!(
            config.apply_env_overrides(env(&[(ENV_SEED, "-3")])),
            Err(ConfigError::Invalid(TwinError::InvalidParameter { .. }))
        ));
        assert!(config
            .apply_env_overrides(env(&[(ENV_MODEL, "lstm")]))
            .is_err());
    }

    #[test]
    fn test_cli_overrides_env() {
        let mut config = TwinConfig::default();
        config
            .apply_env_overrides(env(&[(ENV_SEED, "5"), (ENV_MODEL, "kernel")]))
            .unwrap();
        config.apply_cli_overrides(&CliOverrides {
            seed: Some(6),
            model: None,
            output_dir: Some(PathBuf::from("/tmp/out")),
        });
        assert_eq!(config.seed, Some(6));
        assert_eq!(config.smoother.kind, SmootherKind::Kernel);
        assert_eq!(
            config.output.summary_path(),
            PathBuf::from("/tmp/out/model_summary_results.csv")
        );
    }

    #[test]
    fn test_load_from_file_validates() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "[intervention]\nyears = 99").unwrap();
        assert!(matches!(
            TwinConfig::load(Some(file.path()), None),
            Err(ConfigError::Invalid(_))
        ));
    }

    #[test]
    fn test_bad_script_values_rejected() {
        for body in [
            "pm_months = 1",
            "plastic_years = 0",
            "malaria_years = 10000",
            "plastic_rate = -0.5",
        ] {
            let config = TwinConfig::from_toml(&format!("[script]\n{}", body)).unwrap();
            match config.validate() {
                Err(ConfigError::Invalid(TwinError::InvalidParameter { .. })) => {}
                other => panic!("{}: unexpected {:?}", body, other),
            }
        }
    }

    #[test]
    fn test_load_rejects_bad_script() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "[script]\nplastic_years = 0").unwrap();
        assert!(matches!(
            TwinConfig::load(Some(file.path()), None),
            Err(ConfigError::Invalid(_))
        ));
    }

    #[test]
    fn test_resolve_seed() {
        let config = TwinConfig {
            seed: Some(42),
            ..TwinConfig::default()
        };
        assert_eq!(config.resolve_seed(), 42);
    }
}
