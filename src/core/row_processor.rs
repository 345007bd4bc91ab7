use crate::core::assembler::parse_body_object;
use crate::domain::model::{ColumnLayout, ColumnRole, PreparedRequest, RequestTemplate};
use crate::utils::error::{Result, RowcallError};
use serde_json::Value;
use std::collections::BTreeMap;

fn cell(row: &[String], index: usize, row_number: usize) -> Result<&str> {
    row.get(index)
        .map(String::as_str)
        .ok_or(RowcallError::RowShapeError {
            row: row_number,
            column: index,
        })
}

/// Merges one data row into the template and returns the row's meta values.
///
/// Order: body document, body params, headers, query params. Keys the row
/// does not supply keep their previous values.
pub fn apply_row(
    template: &mut RequestTemplate,
    layout: &ColumnLayout,
    row: &[String],
    row_number: usize,
) -> Result<BTreeMap<String, String>> {
    if let Some(index) = layout.body_index {
        let raw = cell(row, index, row_number)?;
        if !raw.trim().is_empty() {
            let document = parse_body_object(&format!("row {}", row_number), raw)?;
            template.body.extend(document);
        }
    }

    for column in &layout.columns {
        if let ColumnRole::BodyParam(key) = &column.role {
            let value = cell(row, column.index, row_number)?;
            template
                .body
                .insert(key.clone(), Value::String(value.to_string()));
        }
    }

    for column in &layout.columns {
        if let ColumnRole::Header(name) = &column.role {
            template.set_header(name, cell(row, column.index, row_number)?);
        }
    }

    for column in &layout.columns {
        if let ColumnRole::QueryParam(key) = &column.role {
            let value = cell(row, column.index, row_number)?;
            template.query_params.insert(key.clone(), value.to_string());
        }
    }

    let mut meta = BTreeMap::new();
    for column in &layout.columns {
        if let ColumnRole::MetaParam(key) = &column.role {
            meta.insert(key.clone(), cell(row, column.index, row_number)?.to_string());
        }
    }

    Ok(meta)
}

/// Snapshot of the template as a request. The body is always serialized,
/// so an empty body is sent as `{}` even for GET.
pub fn prepare(template: &RequestTemplate) -> Result<PreparedRequest> {
    let body = serde_json::to_string(&template.body).map_err(|e| {
        RowcallError::RequestBuildError {
            message: format!("cannot serialize body: {}", e),
        }
    })?;

    Ok(PreparedRequest {
        method: template.effective_method().to_string(),
        url: template.url.clone(),
        headers: template
            .headers()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect(),
        query: template
            .query_params
            .iter()
            .map(|(k, v)| (k.clone(), v.clone()))
            .collect(),
        body,
    })
}
