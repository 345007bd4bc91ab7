use crate::config::RunConfig;
use crate::utils::error::{Result, RowcallError};
use serde::Deserialize;
use std::path::Path;

/// TOML config file:
///
/// ```toml
/// [request]
/// url = "https://api.example.com/items"
/// method = "POST"
/// body = '{"source":"batch"}'
/// headers = ["Authorization:Bearer abc"]
/// query_params = ["page:1"]
/// body_params = ["owner:ops"]
///
/// [io]
/// file = "rows.csv"
/// output = "result.csv"
/// ```
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct FileConfig {
    pub request: RequestSection,
    pub io: IoSection,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct RequestSection {
    pub url: Option<String>,
    pub method: Option<String>,
    pub body: Option<String>,
    pub headers: Vec<String>,
    pub query_params: Vec<String>,
    pub body_params: Vec<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct IoSection {
    pub file: Option<String>,
    pub output: Option<String>,
}

impl FileConfig {
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content =
            std::fs::read_to_string(path).map_err(|e| RowcallError::FileAccessError {
                path: path.display().to_string(),
                message: e.to_string(),
            })?;
        Self::from_toml_str(&content)
    }

    pub fn from_toml_str(content: &str) -> Result<Self> {
        Ok(toml::from_str(content)?)
    }

    pub fn into_run_config(self) -> RunConfig {
        let defaults = RunConfig::default();
        RunConfig {
            url: self.request.url.unwrap_or_default(),
            method: self.request.method,
            body: self.request.body,
            headers: self.request.headers,
            query_params: self.request.query_params,
            body_params: self.request.body_params,
            file: self.io.file,
            output: self.io.output.unwrap_or(defaults.output),
        }
    }
}
