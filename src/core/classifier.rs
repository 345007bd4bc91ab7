use crate::domain::model::{Column, ColumnLayout, ColumnRole};

const BOM: char = '\u{FEFF}';

/// Classifies one column name. First match wins; prefixes are case-sensitive.
pub fn classify_column(name: &str) -> ColumnRole {
    if name == "body" {
        ColumnRole::BodyDocument
    } else if let Some(key) = name.strip_prefix("h-") {
        ColumnRole::Header(key.to_string())
    } else if let Some(key) = name.strip_prefix("bp-") {
        ColumnRole::BodyParam(key.to_string())
    } else if let Some(key) = name.strip_prefix("meta-") {
        ColumnRole::MetaParam(key.to_string())
    } else if let Some(key) = name.strip_prefix("qp-") {
        ColumnRole::QueryParam(key.to_string())
    } else {
        ColumnRole::QueryParam(name.to_string())
    }
}

/// Builds the column layout from the header row.
pub fn classify_header(header: &[String]) -> ColumnLayout {
    let mut layout = ColumnLayout::default();

    for (index, raw) in header.iter().enumerate() {
        let name = raw.trim_matches(BOM);
        let role = classify_column(name);
        tracing::debug!("Column {} '{}' -> {:?}", index, name, role);

        match &role {
            ColumnRole::BodyDocument => layout.body_index = Some(index),
            ColumnRole::QueryParam(key) => layout.query_keys.push(key.clone()),
            _ => {}
        }
        layout.columns.push(Column { index, role });
    }

    layout
}
