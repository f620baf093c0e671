//! Flat `key value` files, one pair per line.
//!
//! Values go through a `serde_json::Value` object so any flat struct of
//! unsigned integers can be stored; field names become keys.

use std::{fs::File, io::Write, path::Path};

use serde::{de::DeserializeOwned, ser::Error as _, Serialize};
use serde_json::{Map, Value};

use crate::error::{Error, Result};

const HEADER: &str = "# cursedtimer colors: one `key value` per line, channels range 0-1000";

pub fn read_config<T: DeserializeOwned>(path: &Path) -> Result<T> {
    let content = std::fs::read_to_string(path).map_err(|source| Error::ReadConfig {
        path: path.to_path_buf(),
        source,
    })?;
    let map = parse(path, &content)?;

    serde_json::from_value(Value::Object(map)).map_err(|source| Error::Schema {
        path: path.to_path_buf(),
        source,
    })
}

pub fn write_config<T: Serialize>(path: &Path, data: &T) -> Result<()> {
    let serialized = render(data).map_err(|source| Error::Schema {
        path: path.to_path_buf(),
        source,
    })?;
    let write_error = |source| Error::WriteConfig {
        path: path.to_path_buf(),
        source,
    };

    let mut file = File::create(path).map_err(write_error)?;
    file.write_all(serialized.as_bytes()).map_err(write_error)?;

    Ok(())
}

pub(crate) fn render<T: Serialize>(data: &T) -> serde_json::Result<String> {
    let fields = match serde_json::to_value(data)? {
        Value::Object(fields) => fields,
        other => {
            return Err(serde_json::Error::custom(format!(
                "expected a flat struct, found {}",
                other
            )))
        }
    };

    let mut out = String::from(HEADER);
    out.push('\n');
    for (key, value) in fields {
        out.push_str(&format!("{} {}\n", key, value));
    }
    Ok(out)
}

fn parse(path: &Path, content: &str) -> Result<Map<String, Value>> {
    let mut map = Map::new();

    for (index, line) in content.lines().enumerate() {
        let trimmed = line.trim();
        if trimmed.is_empty() || trimmed.starts_with('#') {
            continue;
        }

        let mut parts = trimmed.split_whitespace();
        let (key, value) = match (parts.next(), parts.next(), parts.next()) {
            (Some(key), Some(value), None) => (key, value),
            _ => {
                return Err(Error::MalformedLine {
                    path: path.to_path_buf(),
                    line: index + 1,
                    content: line.to_string(),
                })
            }
        };

        let number: u64 = value.parse().map_err(|_| Error::InvalidValue {
            path: path.to_path_buf(),
            line: index + 1,
            key: key.to_string(),
            value: value.to_string(),
        })?;
        map.insert(key.to_string(), Value::from(number));
    }

    Ok(map)
}
