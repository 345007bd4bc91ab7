use crate::config::RunConfig;
use crate::domain::model::RequestTemplate;
use crate::utils::error::{Result, RowcallError};
use serde_json::{Map, Value};

/// Splits a `key:value` entry on its first ':'.
pub fn split_pair<'a>(field: &str, entry: &'a str) -> Result<(&'a str, &'a str)> {
    entry
        .split_once(':')
        .ok_or_else(|| RowcallError::ConfigFormatError {
            field: field.to_string(),
            entry: entry.to_string(),
        })
}

/// Parses a body document and requires it to be a JSON object.
pub fn parse_body_object(context: &str, raw: &str) -> Result<Map<String, Value>> {
    let value: Value =
        serde_json::from_str(raw).map_err(|source| RowcallError::BodyParseError {
            context: context.to_string(),
            source,
        })?;

    match value {
        Value::Object(map) => Ok(map),
        _ => Err(RowcallError::BodyShapeError {
            context: context.to_string(),
        }),
    }
}

/// Builds the initial request template from configuration.
///
/// Default headers are overlaid by configured headers, the body document is
/// parsed, then body params overwrite body keys of the same name, then query
/// params are recorded. Nothing touches the network.
pub fn assemble(config: &RunConfig) -> Result<RequestTemplate> {
    let mut template = RequestTemplate::new(config.url.clone(), config.method.clone());

    for entry in &config.headers {
        let (name, value) = split_pair("header", entry)?;
        template.set_header(name, value);
    }

    if let Some(raw) = config.body.as_deref().filter(|raw| !raw.is_empty()) {
        template.body = parse_body_object("--body", raw)?;
    }

    for entry in &config.body_params {
        let (key, value) = split_pair("body param", entry)?;
        template
            .body
            .insert(key.to_string(), Value::String(value.to_string()));
    }

    for entry in &config.query_params {
        let (key, value) = split_pair("query param", entry)?;
        template
            .query_params
            .insert(key.to_string(), value.to_string());
    }

    tracing::debug!(
        "Assembled template: {} headers, {} query params, {} body keys",
        template.headers().count(),
        template.query_params.len(),
        template.body.len()
    );

    Ok(template)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn config() -> RunConfig {
        RunConfig {
            url: "http://x/svc".to_string(),
            ..RunConfig::default()
        }
    }

    #[test]
    fn test_split_pair_uses_first_colon() {
        assert_eq!(
            split_pair("header", "Authorization:Bearer a:b").unwrap(),
            ("Authorization", "Bearer a:b")
        );
        assert_eq!(split_pair("qp", "empty:").unwrap(), ("empty", ""));
        assert!(matches!(
            split_pair("header", "key-no-colon"),
            Err(RowcallError::ConfigFormatError { .. })
        ));
    }

    #[test]
    fn test_assemble_defaults() {
        let template = assemble(&config()).unwrap();
        assert_eq!(template.url, "http://x/svc");
        assert_eq!(template.method, None);
        assert_eq!(template.header("Content-Type"), Some("application/json"));
        assert!(template.body.is_empty());
        assert!(template.query_params.is_empty());
    }

    #[test]
    fn test_configured_headers_override_defaults() {
        let mut cfg = config();
        cfg.headers = vec!["Accept:text/csv".to_string(), "X-Trace:1".to_string()];
        let template = assemble(&cfg).unwrap();
        assert_eq!(template.header("Accept"), Some("text/csv"));
        assert_eq!(template.header("X-Trace"), Some("1"));
        assert_eq!(template.headers().count(), 4);
    }

    #[test]
    fn test_body_params_overwrite_body_document() {
        let mut cfg = config();
        cfg.body = Some(r#"{"name":"bob","age":3}"#.to_string());
        cfg.body_params = vec!["name:alice".to_string()];
        let template = assemble(&cfg).unwrap();
        assert_eq!(template.body.get("name"), Some(&json!("alice")));
        assert_eq!(template.body.get("age"), Some(&json!(3)));
    }

    #[test]
    fn test_body_params_without_body_document() {
        let mut cfg = config();
        cfg.body_params = vec!["name:alice".to_string()];
        let template = assemble(&cfg).unwrap();
        assert_eq!(template.body.len(), 1);
        assert_eq!(template.effective_method(), "POST");
    }

    #[test]
    fn test_query_params_recorded() {
        let mut cfg = config();
        cfg.query_params = vec!["page:2".to_string()];
        let template = assemble(&cfg).unwrap();
        assert_eq!(template.query_params.get("page").map(String::as_str), Some("2"));
    }

    #[test]
    fn test_invalid_body_fails() {
        let mut cfg = config();
        cfg.body = Some("{not json".to_string());
        assert!(matches!(
            assemble(&cfg),
            Err(RowcallError::BodyParseError { .. })
        ));

        cfg.body = Some("[1,2]".to_string());
        assert!(matches!(
            assemble(&cfg),
            Err(RowcallError::BodyShapeError { .. })
        ));
    }

    #[test]
    fn test_malformed_header_fails() {
        let mut cfg = config();
        cfg.headers = vec!["key-no-colon".to_string()];
        assert!(matches!(
            assemble(&cfg),
            Err(RowcallError::ConfigFormatError { .. })
        ));
    }
}
