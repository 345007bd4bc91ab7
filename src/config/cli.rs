use crate::config::file::FileConfig;
use crate::config::RunConfig;
use crate::utils::error::Result;
use clap::Parser;

#[derive(Debug, Clone, Parser)]
#[command(name = "rowcall")]
#[command(about = "Send one templated HTTP request per CSV row and record the responses")]
pub struct CliConfig {
    /// URL of the target service
    #[arg(long)]
    pub url: Option<String>,

    /// HTTP method; defaults to POST when a body is present, GET otherwise
    #[arg(long)]
    pub method: Option<String>,

    /// Request body as a JSON object
    #[arg(long)]
    pub body: Option<String>,

    /// Request header as name:value (repeatable)
    #[arg(long = "header")]
    pub headers: Vec<String>,

    /// Query parameter as name:value (repeatable)
    #[arg(long = "qp")]
    pub query_params: Vec<String>,

    /// Body parameter as name:value (repeatable)
    #[arg(long = "bp")]
    pub body_params: Vec<String>,

    /// Input CSV file
    #[arg(long)]
    pub file: Option<String>,

    /// Output CSV file
    #[arg(long)]
    pub output: Option<String>,

    /// TOML file with [request] and [io] sections; flags take precedence
    #[arg(long)]
    pub config: Option<String>,

    /// Print the requests that would be sent, without sending them
    #[arg(long)]
    pub dry_run: bool,

    #[arg(long, help = "Enable verbose output")]
    pub verbose: bool,

    #[arg(long, help = "Emit logs as JSON lines")]
    pub log_json: bool,
}

impl CliConfig {
    /// Resolves flags over the optional config file. Scalar flags replace file
    /// values; repeated entries are appended after the file's, so flags win
    /// per key.
    pub fn into_run_config(self) -> Result<RunConfig> {
        let mut config = match &self.config {
            Some(path) => FileConfig::from_file(path)?.into_run_config(),
            None => RunConfig::default(),
        };

        if let Some(url) = self.url {
            config.url = url;
        }
        if self.method.is_some() {
            config.method = self.method;
        }
        if self.body.is_some() {
            config.body = self.body;
        }
        config.headers.extend(self.headers);
        config.query_params.extend(self.query_params);
        config.body_params.extend(self.body_params);
        if self.file.is_some() {
            config.file = self.file;
        }
        if let Some(output) = self.output {
            config.output = output;
        }

        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_parse_repeated_flags() {
        let cli = CliConfig::parse_from([
            "rowcall",
            "--url",
            "http://x/svc",
            "--header",
            "A:1",
            "--header",
            "B:2",
            "--qp",
            "page:1",
            "--bp",
            "name:alice",
            "--file",
            "rows.csv",
        ]);
        let config = cli.into_run_config().unwrap();

        assert_eq!(config.url, "http://x/svc");
        assert_eq!(config.headers, vec!["A:1", "B:2"]);
        assert_eq!(config.query_params, vec!["page:1"]);
        assert_eq!(config.body_params, vec!["name:alice"]);
        assert_eq!(config.file.as_deref(), Some("rows.csv"));
        assert_eq!(config.output, "result.csv");
    }

    #[test]
    fn test_flags_override_config_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(
            file,
            "[request]\nurl = \"http://file/svc\"\nmethod = \"PUT\"\nheaders = [\"A:file\"]\n\n[io]\noutput = \"file.csv\"\n"
        )
        .unwrap();

        let cli = CliConfig::parse_from([
            "rowcall",
            "--config",
            file.path().to_str().unwrap(),
            "--url",
            "http://flag/svc",
            "--header",
            "A:flag",
        ]);
        let config = cli.into_run_config().unwrap();

        assert_eq!(config.url, "http://flag/svc");
        assert_eq!(config.method.as_deref(), Some("PUT"));
        assert_eq!(config.headers, vec!["A:file", "A:flag"]);
        assert_eq!(config.output, "file.csv");
    }
}
