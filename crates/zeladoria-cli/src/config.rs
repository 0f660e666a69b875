//! CLI configuration

use crate::error::{CliError, CliResult};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use zeladoria_store::{
    CsvFileStore, PhotoStore, RecordStore, SheetsHttpStore, SheetsSettings, DEFAULT_PHOTO_DIR,
};
use zeladoria_workflow::{ComplaintWorkflow, WorkflowConfig};

/// Environment variable overriding the Sheets access token
pub const SHEETS_TOKEN_ENV: &str = "ZELADORIA_SHEETS_TOKEN";

/// CLI configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CliConfig {
    /// Base directory for relative paths
    #[serde(default = "default_data_dir")]
    pub data_dir: PathBuf,

    #[serde(default)]
    pub store: StoreConfig,

    #[serde(default)]
    pub photos: PhotosConfig,

    #[serde(default)]
    pub workflow: WorkflowConfig,

    #[serde(default)]
    pub report: ReportConfig,
}

impl Default for CliConfig {
    fn default() -> Self {
        Self {
            data_dir: default_data_dir(),
            store: StoreConfig::default(),
            photos: PhotosConfig::default(),
            workflow: WorkflowConfig::default(),
            report: ReportConfig::default(),
        }
    }
}

/// Where complaint records live
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum StoreConfig {
    /// Local CSV file with the sheet layout
    File {
        #[serde(default = "default_csv_path")]
        path: PathBuf,
    },
    /// Google Sheets values API
    Sheets(SheetsSettings),
}

impl Default for StoreConfig {
    fn default() -> Self {
        StoreConfig::File {
            path: default_csv_path(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PhotosConfig {
    #[serde(default = "default_photo_dir")]
    pub dir: String,
}

impl Default for PhotosConfig {
    fn default() -> Self {
        Self {
            dir: default_photo_dir(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReportConfig {
    /// Directory reports are written to
    #[serde(default = "default_data_dir")]
    pub out_dir: PathBuf,
}

impl Default for ReportConfig {
    fn default() -> Self {
        Self {
            out_dir: default_data_dir(),
        }
    }
}

fn default_data_dir() -> PathBuf {
    PathBuf::from(".")
}

fn default_csv_path() -> PathBuf {
    PathBuf::from("complaints.csv")
}

fn default_photo_dir() -> String {
    DEFAULT_PHOTO_DIR.to_string()
}

impl CliConfig {
    /// Load configuration from file, then apply environment overrides
    pub fn load(path: Option<&str>) -> CliResult<Self> {
        let config_path = match path {
            Some(p) => PathBuf::from(p),
            None => Self::default_config_path()?,
        };

        let mut config = if config_path.exists() {
            let contents = std::fs::read_to_string(&config_path)?;
            Self::parse(&contents)?
        } else {
            tracing::debug!(path = %config_path.display(), "No config file, using defaults");
            CliConfig::default()
        };
        config.apply_token(std::env::var(SHEETS_TOKEN_ENV).ok());
        Ok(config)
    }

    pub fn parse(contents: &str) -> CliResult<Self> {
        toml::from_str(contents).map_err(|e| CliError::Config(e.to_string()))
    }

    /// Get the default configuration file path
    fn default_config_path() -> CliResult<PathBuf> {
        let config_dir = dirs::config_dir()
            .ok_or_else(|| CliError::Config("Cannot find config directory".into()))?;
        Ok(config_dir.join("zeladoria").join("config.toml"))
    }

    fn apply_token(&mut self, token: Option<String>) {
        if let (StoreConfig::Sheets(settings), Some(token)) = (&mut self.store, token) {
            if !token.trim().is_empty() {
                settings.access_token = Some(token);
            }
        }
    }

    /// `path` as seen from the data directory
    pub fn resolve(&self, path: &Path) -> PathBuf {
        if path.is_absolute() {
            path.to_path_buf()
        } else {
            self.data_dir.join(path)
        }
    }

    pub fn build_store(&self) -> CliResult<Arc<dyn RecordStore>> {
        match &self.store {
            StoreConfig::File { path } => Ok(Arc::new(CsvFileStore::new(self.resolve(path)))),
            StoreConfig::Sheets(settings) => {
                if settings.spreadsheet_id.trim().is_empty() {
                    return Err(CliError::Config("store.spreadsheet_id is empty".into()));
                }
                Ok(Arc::new(SheetsHttpStore::new(settings.clone())?))
            }
        }
    }

    pub fn build_workflow(&self) -> CliResult<ComplaintWorkflow> {
        let photos = PhotoStore::new(self.data_dir.clone(), self.photos.dir.clone());
        Ok(ComplaintWorkflow::new(
            self.build_store()?,
            photos,
            self.workflow.clone(),
        ))
    }

    pub fn report_dir(&self) -> PathBuf {
        self.resolve(&self.report.out_dir)
    }

    /// Copy safe to print: the access token is masked
    pub fn redacted(&self) -> Self {
        let mut config = self.clone();
        if let StoreConfig::Sheets(settings) = &mut config.store {
            if settings.access_token.is_some() {
                settings.access_token = Some("********".into());
            }
        }
        config
    }
}
