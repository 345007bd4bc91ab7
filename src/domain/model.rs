use serde::Serialize;
use serde_json::{Map, Value};
use std::collections::BTreeMap;

/// Headers every run starts from before configured overrides are applied.
pub const DEFAULT_HEADERS: [(&str, &str); 3] = [
    ("Content-Type", "application/json"),
    ("Accept", "application/json"),
    ("Cache-Control", "no-cache"),
];

/// Accumulating request state. Rows overwrite the keys they supply and
/// leave every other key as the previous row left it.
#[derive(Debug, Clone, PartialEq)]
pub struct RequestTemplate {
    pub method: Option<String>,
    pub url: String,
    headers: Vec<(String, String)>,
    pub query_params: BTreeMap<String, String>,
    pub body: Map<String, Value>,
}

impl RequestTemplate {
    pub fn new(url: impl Into<String>, method: Option<String>) -> Self {
        let mut template = Self {
            method,
            url: url.into(),
            headers: Vec::new(),
            query_params: BTreeMap::new(),
            body: Map::new(),
        };
        for (name, value) in DEFAULT_HEADERS {
            template.set_header(name, value);
        }
        template
    }

    /// Sets a header, replacing any existing header whose name matches
    /// case-insensitively. The new spelling of the name is kept.
    pub fn set_header(&mut self, name: &str, value: &str) {
        match self
            .headers
            .iter_mut()
            .find(|(existing, _)| existing.eq_ignore_ascii_case(name))
        {
            Some(slot) => *slot = (name.to_string(), value.to_string()),
            None => self.headers.push((name.to_string(), value.to_string())),
        }
    }

    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(existing, _)| existing.eq_ignore_ascii_case(name))
            .map(|(_, value)| value.as_str())
    }

    pub fn headers(&self) -> impl Iterator<Item = (&str, &str)> {
        self.headers.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// Configured method, else POST for a non-empty body, else GET.
    pub fn effective_method(&self) -> &str {
        match self.method.as_deref() {
            Some(method) => method,
            None if !self.body.is_empty() => "POST",
            None => "GET",
        }
    }
}

/// What an input column feeds, decided from its header name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ColumnRole {
    BodyDocument,
    Header(String),
    BodyParam(String),
    MetaParam(String),
    QueryParam(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Column {
    pub index: usize,
    pub role: ColumnRole,
}

/// Classified header row. Immutable once built.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ColumnLayout {
    pub columns: Vec<Column>,
    /// Last column named exactly `body`, if any.
    pub body_index: Option<usize>,
    /// Display keys of query-param columns in header order; drives output column order.
    pub query_keys: Vec<String>,
}

/// A fully assembled request, ready for a dispatcher.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PreparedRequest {
    pub method: String,
    pub url: String,
    pub headers: Vec<(String, String)>,
    pub query: Vec<(String, String)>,
    pub body: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DispatchedResponse {
    pub status: u16,
    pub body: String,
}

/// One output record: `key-value` per query key, then the response body.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RowResult(pub Vec<String>);

impl RowResult {
    pub fn fields(&self) -> &[String] {
        &self.0
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunSummary {
    pub rows_processed: usize,
    pub output_path: String,
}
