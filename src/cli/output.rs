//! Output formatting for CLI commands.

use serde::Serialize;

use crate::cli::args::{EmosiArgs, OutputFormat};
use crate::error::Result;

/// Output a result in the specified format.
pub fn output_result<T: Serialize>(message: &str, result: &T, args: &EmosiArgs) -> Result<()> {
    match args.output_format {
        OutputFormat::Human => output_human(message, result, args),
        OutputFormat::Json => output_json(result, args),
    }
}

/// Output in human-readable format.
fn output_human<T: Serialize>(message: &str, result: &T, args: &EmosiArgs) -> Result<()> {
    if args.verbosity() > 0 {
        println!("{message}");
        println!();
    }

    let value = serde_json::to_value(result)?;
    print!("{}", render_human(&value));
    Ok(())
}

/// Render `key: value` lines for an object, or the bare value otherwise.
pub fn render_human(value: &serde_json::Value) -> String {
    match value {
        serde_json::Value::Object(obj) => {
            let width = obj.keys().map(|k| k.len()).max().unwrap_or(0);
            obj.iter()
                .map(|(key, val)| format!("{key:<width$}  {}\n", format_value(val)))
                .collect()
        }
        _ => format!("{}\n", format_value(value)),
    }
}

/// Output in JSON format.
fn output_json<T: Serialize>(result: &T, args: &EmosiArgs) -> Result<()> {
    let json = if args.pretty {
        serde_json::to_string_pretty(result)?
    } else {
        serde_json::to_string(result)?
    };

    println!("{json}");
    Ok(())
}

/// Format a JSON value for human output. Fractions print with four decimals.
fn format_value(value: &serde_json::Value) -> String {
    match value {
        serde_json::Value::String(s) => s.clone(),
        serde_json::Value::Number(n) if n.is_f64() => match n.as_f64() {
            Some(f) => format!("{f:.4}"),
            None => n.to_string(),
        },
        serde_json::Value::Number(n) => n.to_string(),
        serde_json::Value::Bool(b) => b.to_string(),
        serde_json::Value::Array(arr) => {
            let formatted_values = arr.iter().map(format_value).collect::<Vec<_>>().join(", ");
            format!("[{formatted_values}]")
        }
        serde_json::Value::Object(_) => "[object]".to_string(),
        serde_json::Value::Null => "null".to_string(),
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;
    use crate::analysis::normalizer::NormalizedStages;

    #[test]
    fn test_render_object() {
        let value = json!({
            "prediction": "sadness",
            "confidence": 0.75,
            "is_uncertain": false,
        });
        let rendered = render_human(&value);
        assert!(rendered.contains("prediction    sadness\n"));
        assert!(rendered.contains("confidence    0.7500\n"));
        assert!(rendered.contains("is_uncertain  false\n"));
    }

    #[test]
    fn test_render_keeps_stage_order() {
        let stages = NormalizedStages {
            raw: "Gmn @x".to_string(),
            slang_normalized: "bagaimana @x".to_string(),
            stopword_filtered: "bagaimana @x".to_string(),
            cleaned: "bagaimana".to_string(),
            stemmed: "bagaimana".to_string(),
        };
        let rendered = render_human(&serde_json::to_value(&stages).unwrap());
        let keys: Vec<_> = rendered
            .lines()
            .filter_map(|line| line.split_whitespace().next())
            .collect();
        assert_eq!(
            keys,
            ["raw", "slang_normalized", "stopword_filtered", "cleaned", "stemmed"]
        );
    }

    #[test]
    fn test_render_scalar_and_array() {
        assert_eq!(render_human(&json!("halo")), "halo\n");
        assert_eq!(render_human(&json!([1, "a", null])), "[1, a, null]\n");
    }
}
