use figment::{
    providers::{Env, Format, Serialized, Toml},
    Figment,
};
use serde::{Deserialize, Serialize};
use std::env;
use std::path::{Path, PathBuf};

use crate::catalog::{Catalog, Package};
use crate::error::{Error, Result};

/// Typed view of the merged configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Settings {
    /// Root holding one sub-directory of CSV tables per package.
    pub data_dir: String,
    pub package: Package,
    pub max_results: usize,
    pub max_per_domain: usize,
    /// Keep built indexes between searches, invalidated on file change.
    pub cache: bool,
    /// TOML catalog replacing the built-in one for `package`.
    pub catalog_file: Option<String>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            data_dir: "data".to_string(),
            package: Package::Invoice,
            max_results: 5,
            max_per_domain: 3,
            cache: false,
            catalog_file: None,
        }
    }
}

pub struct Config {
    figment: Figment,
    base_dir: PathBuf,
}

impl Config {
    pub fn load() -> Result<Self> {
        let env_name = env::var("RUST_ENV").unwrap_or_else(|_| "dev".to_string());
        Self::load_from(Path::new("."), &env_name)
    }

    pub fn load_from(base_dir: &Path, env_name: &str) -> Result<Self> {
        let mut figment = Figment::from(Serialized::defaults(Settings::default()))
            .merge(Toml::file(base_dir.join("config.toml")));
        match env_name {
            "dev" | "development" => figment = figment.merge(Toml::file(base_dir.join("config.dev.toml"))),
            "prod" | "production" => figment = figment.merge(Toml::file(base_dir.join("config.prod.toml"))),
            "test" | "testing" => figment = figment.merge(Toml::file(base_dir.join("config.test.toml"))),
            _ => {}
        }
        figment = figment.merge(Env::prefixed("TWSKILL_"));

        let config = Self { figment, base_dir: base_dir.to_path_buf() };
        config.validate()?;
        Ok(config)
    }

    pub fn settings(&self) -> Result<Settings> {
        Ok(self.figment.extract()?)
    }

    pub fn data_dir(&self) -> Result<PathBuf> {
        Ok(resolve_with_base(&self.base_dir, self.settings()?.data_dir))
    }

    /// Directory holding the tables of `catalog`'s package.
    pub fn tables_dir(&self, catalog: &Catalog) -> Result<PathBuf> {
        Ok(self.data_dir()?.join(&catalog.package))
    }

    /// The configured catalog: `catalog_file` when set, else the built-in one.
    pub fn catalog(&self) -> Result<Catalog> {
        let settings = self.settings()?;
        match settings.catalog_file {
            Some(file) => Catalog::from_toml_file(&resolve_with_base(&self.base_dir, file)),
            None => Ok(Catalog::builtin(settings.package)),
        }
    }

    fn validate(&self) -> Result<()> {
        let settings = self.settings()?;
        if settings.max_results == 0 {
            return Err(Error::InvalidConfig("max_results must be at least 1".to_string()));
        }
        if settings.max_per_domain == 0 {
            return Err(Error::InvalidConfig("max_per_domain must be at least 1".to_string()));
        }
        Ok(())
    }
}

/// Expand a user-provided path string:
/// - Expands leading '~' to the user's home directory
/// - Expands ${VAR} and $VAR environment variables
/// - Returns a PathBuf without attempting to canonicalize
pub fn expand_path<S: AsRef<str>>(input: S) -> PathBuf {
    let s = input.as_ref();
    let expanded_env = shellexpand::env(s).unwrap_or(std::borrow::Cow::Borrowed(s));
    let expanded = shellexpand::tilde(&expanded_env);
    PathBuf::from(expanded.as_ref())
}

/// Resolve a possibly relative path against a given base directory after expansion.
/// If `p` is absolute, it's returned as-is; otherwise `base.join(p)` is returned.
pub fn resolve_with_base<S: AsRef<str>>(base: &Path, p: S) -> PathBuf {
    let p = expand_path(p);
    if p.is_absolute() { p } else { base.join(p) }
}
