use config::{Config, ConfigError, File as ConfigFile};
use cpf_scan::extractor::DEFAULT_ENCODINGS;
use cpf_scan::scanner::MAX_FILE_SIZE;
use cpf_scan::{ScanOptions, TextEncoding};
use serde::Deserialize;
use std::path::Path;

#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub root_paths: Vec<String>,
    /// 0 = one worker per core.
    #[serde(default)]
    pub threads: usize,
    #[serde(default = "default_encodings")]
    pub encodings: Vec<TextEncoding>,
    #[serde(default = "default_max_file_size")]
    pub max_file_size: u64,
}

fn default_encodings() -> Vec<TextEncoding> {
    DEFAULT_ENCODINGS.to_vec()
}

fn default_max_file_size() -> u64 {
    MAX_FILE_SIZE
}

impl AppConfig {
    pub fn scan_options(&self) -> ScanOptions {
        ScanOptions {
            max_file_size: self.max_file_size,
            encodings: self.encodings.clone(),
            threads: self.threads,
        }
    }
}

/// Read `Config.toml` from the working directory, if there is one.
pub fn load_configuration() -> Result<AppConfig, ConfigError> {
    let builder = Config::builder()
        .add_source(ConfigFile::with_name("Config").required(false))
        .build()?;
    builder.try_deserialize::<AppConfig>()
}

/// Remove directories that are subdirectories of other directories in the list.
pub fn non_overlapping_directories(dirs: Vec<String>) -> Vec<String> {
    let mut result: Vec<String> = Vec::new();

    for dir in dirs {
        let dir_path = Path::new(&dir);

        if result.iter().any(|kept| dir_path.starts_with(kept)) {
            continue;
        }

        result.retain(|kept| !Path::new(kept).starts_with(dir_path));
        result.push(dir);
    }

    result
}
