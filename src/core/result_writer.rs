use crate::domain::model::{ColumnLayout, RequestTemplate, RowResult};
use crate::domain::ports::TableWriter;
use crate::utils::error::Result;

/// `key-value` for every query key in header order, then the response body.
pub fn build_result_row(
    layout: &ColumnLayout,
    template: &RequestTemplate,
    response_body: &str,
) -> RowResult {
    let mut fields: Vec<String> = layout
        .query_keys
        .iter()
        .map(|key| {
            let value = template
                .query_params
                .get(key)
                .map(String::as_str)
                .unwrap_or_default();
            format!("{}-{}", key, value)
        })
        .collect();
    fields.push(response_body.to_string());
    RowResult(fields)
}

pub fn write_result<W: TableWriter>(writer: &mut W, result: &RowResult) -> Result<()> {
    writer.write_row(result.fields())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::classifier::classify_header;

    #[test]
    fn test_output_follows_query_key_order() {
        let layout = classify_header(&["zeta".to_string(), "qp-alpha".to_string()]);
        let mut template = RequestTemplate::new("http://x/svc", None);
        template.query_params.insert("alpha".to_string(), "1".to_string());
        template.query_params.insert("zeta".to_string(), "2".to_string());
        template.query_params.insert("extra".to_string(), "3".to_string());

        let row = build_result_row(&layout, &template, "{\"ok\":true}");
        assert_eq!(row.fields(), ["zeta-2", "alpha-1", "{\"ok\":true}"]);
    }

    #[test]
    fn test_no_query_keys_yields_body_only() {
        let layout = classify_header(&["body".to_string()]);
        let template = RequestTemplate::new("http://x/svc", None);

        let row = build_result_row(&layout, &template, "ok");
        assert_eq!(row.fields(), ["ok"]);
    }
}
