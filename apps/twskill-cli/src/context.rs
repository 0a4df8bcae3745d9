use std::path::PathBuf;

use anyhow::{Context, Result};
use tracing::debug;
use twskill_core::config::{Config, Settings};
use twskill_core::{Catalog, CsvDirectory, Package};
use twskill_text::SearchEngine;

/// Configuration resolved once per invocation, with command-line overrides applied.
pub struct AppContext {
    pub settings: Settings,
    pub package: Package,
    pub catalog: Catalog,
    pub tables_dir: PathBuf,
}

impl AppContext {
    /// `package` replaces the configured package and its catalog; `data_dir`
    /// replaces the configured data root.
    pub fn resolve(package: Option<Package>, data_dir: Option<PathBuf>) -> Result<Self> {
        let config = Config::load().context("loading configuration")?;
        Self::from_config(&config, package, data_dir)
    }

    pub fn from_config(config: &Config, package: Option<Package>, data_dir: Option<PathBuf>) -> Result<Self> {
        let settings = config.settings()?;
        let catalog = match package {
            Some(p) => Catalog::builtin(p),
            None => config.catalog().context("loading catalog")?,
        };
        let tables_dir = match data_dir {
            Some(dir) => dir.join(&catalog.package),
            None => config.tables_dir(&catalog)?,
        };
        debug!(package = %catalog.package, tables = %tables_dir.display(), "resolved context");
        Ok(Self { package: package.unwrap_or(settings.package), settings, catalog, tables_dir })
    }

    pub fn tables(&self) -> CsvDirectory {
        CsvDirectory::new(&self.tables_dir)
    }

    pub fn search_engine(&self) -> SearchEngine<CsvDirectory> {
        let engine = SearchEngine::new(self.catalog.clone(), self.tables());
        if self.settings.cache { engine.with_cache() } else { engine }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn package_override_selects_builtin_catalog() {
        let tmp = TempDir::new().unwrap();
        fs::write(tmp.path().join("config.toml"), "package = \"invoice\"\ndata_dir = \"kb\"\n").unwrap();
        let config = Config::load_from(tmp.path(), "test").unwrap();

        let ctx = AppContext::from_config(&config, Some(Package::Payment), None).unwrap();
        assert_eq!(ctx.package, Package::Payment);
        assert_eq!(ctx.catalog.package, "payment");
        assert_eq!(ctx.tables_dir, tmp.path().join("kb").join("payment"));
    }

    #[test]
    fn data_dir_override_wins() {
        let tmp = TempDir::new().unwrap();
        let config = Config::load_from(tmp.path(), "test").unwrap();
        let ctx = AppContext::from_config(&config, None, Some(PathBuf::from("/srv/tables"))).unwrap();
        assert_eq!(ctx.package, Package::Invoice);
        assert_eq!(ctx.tables_dir, PathBuf::from("/srv/tables/invoice"));
    }
}
