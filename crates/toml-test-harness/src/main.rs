//! Decoder for the `toml-test` conformance suite: reads a TOML document on
//! stdin and prints it as tagged JSON, or a diagnostic and exit status 1.

use serde_json::{Map, Value as Json, json};
use std::io::Read;
use toml_strict::Value;

fn tagged(kind: &str, value: String) -> Json {
    json!({ "type": kind, "value": value })
}

fn float_text(value: f64) -> String {
    if value.is_nan() {
        "nan".to_string()
    } else {
        // `inf`, `-inf` and plain decimals already match the suite's format
        value.to_string()
    }
}

fn serialize(value: &Value) -> Json {
    match value {
        Value::String(s) => tagged("string", s.value.clone()),
        Value::Integer(i) => tagged("integer", i.value.to_string()),
        Value::Float(f) => tagged("float", float_text(f.value)),
        Value::Boolean(b) => tagged("bool", b.value.to_string()),
        Value::OffsetDateTime(d) => tagged("datetime", d.value.to_string()),
        Value::LocalDateTime(d) => tagged("datetime-local", d.value.to_string()),
        Value::LocalDate(d) => tagged("date-local", d.value.to_string()),
        Value::LocalTime(t) => tagged("time-local", t.value.to_string()),
        Value::Array(array) => Json::Array(array.iter().map(serialize).collect()),
        Value::Table(table) => {
            let mut obj = Map::new();
            for (key, value) in table {
                obj.insert(key.name.clone(), serialize(value));
            }
            Json::Object(obj)
        }
    }
}

fn main() {
    let mut buffer = Vec::new();
    if std::io::stdin().lock().read_to_end(&mut buffer).is_err() {
        std::process::exit(1)
    }

    match toml_strict::parse_bytes(&buffer) {
        Ok(table) => {
            println!("{}", serialize(&Value::Table(table)));
        }
        Err(err) => {
            use codespan_reporting::files::SimpleFiles;
            use codespan_reporting::term::termcolor::{ColorChoice, StandardStream};

            let content = String::from_utf8_lossy(&buffer);
            let mut files = SimpleFiles::new();
            let file_id = files.add("input.toml", content.to_string());
            let diagnostic = err.to_diagnostic(file_id, &content);
            let writer = StandardStream::stderr(ColorChoice::Auto);
            let config = codespan_reporting::term::Config::default();

            if codespan_reporting::term::emit_to_io_write(
                &mut writer.lock(),
                &config,
                &files,
                &diagnostic,
            )
            .is_err()
            {
                eprintln!("{err}");
            }
            std::process::exit(1)
        }
    }
}
