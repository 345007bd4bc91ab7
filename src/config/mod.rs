#[cfg(feature = "cli")]
pub mod cli;
pub mod file;

use crate::utils::error::Result;
use crate::utils::validation::{validate_method, validate_path, validate_url, Validate};
use std::fmt;

pub const DEFAULT_OUTPUT: &str = "result.csv";

/// Fully resolved run configuration, whatever surface it came from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunConfig {
    pub url: String,
    pub method: Option<String>,
    /// Raw JSON object text.
    pub body: Option<String>,
    /// `name:value` entries, applied in order.
    pub headers: Vec<String>,
    pub query_params: Vec<String>,
    pub body_params: Vec<String>,
    /// Input table; without one no requests are made.
    pub file: Option<String>,
    pub output: String,
}

impl Default for RunConfig {
    fn default() -> Self {
        Self {
            url: String::new(),
            method: None,
            body: None,
            headers: Vec::new(),
            query_params: Vec::new(),
            body_params: Vec::new(),
            file: None,
            output: DEFAULT_OUTPUT.to_string(),
        }
    }
}

impl Validate for RunConfig {
    fn validate(&self) -> Result<()> {
        validate_url("url", &self.url)?;
        if let Some(method) = &self.method {
            validate_method("method", method)?;
        }
        if let Some(file) = &self.file {
            validate_path("file", file)?;
        }
        validate_path("output", &self.output)?;
        Ok(())
    }
}

impl fmt::Display for RunConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "-----INPUTS---------------")?;
        writeln!(f, "url: {}", self.url)?;
        writeln!(f, "HTTP method: {}", self.method.as_deref().unwrap_or("(inferred)"))?;
        writeln!(f, "body: {}", self.body.as_deref().unwrap_or(""))?;
        writeln!(f, "headers: {:?}", self.headers)?;
        writeln!(f, "query params: {:?}", self.query_params)?;
        writeln!(f, "body params: {:?}", self.body_params)?;
        writeln!(f, "input file: {}", self.file.as_deref().unwrap_or("(none)"))?;
        writeln!(f, "output file: {}", self.output)?;
        write!(f, "--------------------------")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_output_is_result_csv() {
        assert_eq!(RunConfig::default().output, "result.csv");
    }

    #[test]
    fn test_validate() {
        let mut config = RunConfig {
            url: "http://x/svc".to_string(),
            ..RunConfig::default()
        };
        assert!(config.validate().is_ok());

        config.method = Some("PO ST".to_string());
        assert!(config.validate().is_err());

        config.method = None;
        config.url = String::new();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_display_lists_inputs() {
        let config = RunConfig {
            url: "http://x/svc".to_string(),
            file: Some("rows.csv".to_string()),
            ..RunConfig::default()
        };
        let text = config.to_string();
        assert!(text.contains("url: http://x/svc"));
        assert!(text.contains("input file: rows.csv"));
    }
}
