use serde_json::{json, Value};
use crate::cli::OutputFormat;

/// Output a success message in the appropriate format
pub fn output_success(
    output_format: &OutputFormat,
    message: &str,
    data: Option<Value>,
) -> anyhow::Result<()> {
    match output_format {
        OutputFormat::Json => {
            let mut response = json!({
                "success": true,
                "message": message
            });

            if let (Some(target), Some(Value::Object(extra))) = (response.as_object_mut(), data) {
                target.extend(extra);
            }

            println!("{}", serde_json::to_string_pretty(&response)?);
        }
        OutputFormat::Text => {
            println!("✓ {}", message);
        }
    }
    Ok(())
}

/// Output an empty collection in the appropriate format
pub fn output_empty_collection(
    output_format: &OutputFormat,
    collection_name: &str,
    message: &str,
) -> anyhow::Result<()> {
    match output_format {
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(&json!({
                collection_name: []
            }))?);
        }
        OutputFormat::Text => {
            println!("{}", message);
        }
    }
    Ok(())
}

/// Output a single record, one `key: value` line per field in text mode
pub fn output_record(output_format: &OutputFormat, record: &Value) -> anyhow::Result<()> {
    match output_format {
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(record)?);
        }
        OutputFormat::Text => {
            if let Some(fields) = record.as_object() {
                for (key, value) in fields {
                    println!("{:<12} {}", format!("{}:", key), display_value(value));
                }
            }
        }
    }
    Ok(())
}

/// Output a list of records as a fixed-width table in text mode
pub fn output_table(
    output_format: &OutputFormat,
    collection_name: &str,
    columns: &[(&str, usize)],
    rows: &[Value],
) -> anyhow::Result<()> {
    if rows.is_empty() {
        return output_empty_collection(output_format, collection_name, &format!("No {} found", collection_name));
    }

    match output_format {
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(&json!({ collection_name: rows }))?);
        }
        OutputFormat::Text => {
            let header: Vec<String> = columns
                .iter()
                .map(|(name, width)| format!("{:<width$}", name.to_uppercase(), width = *width))
                .collect();
            println!("{}", header.join(" "));
            println!("{}", "-".repeat(columns.iter().map(|(_, w)| w + 1).sum()));

            for row in rows {
                let line: Vec<String> = columns
                    .iter()
                    .map(|(name, width)| {
                        let value = row.get(*name).map(display_value).unwrap_or_default();
                        format!("{:<width$}", value, width = *width)
                    })
                    .collect();
                println!("{}", line.join(" "));
            }
        }
    }
    Ok(())
}

fn display_value(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Null => String::new(),
        other => other.to_string(),
    }
}
