//! JSON helpers mapping serde failures onto `IoError`.
//!
//! Writing failures are `IoError::Serialization`, parsing failures keep the
//! typed `serde_json` error as `IoError::Json`, and file helpers add the path
//! as context.

use crate::error::{IoError, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Serializes data to compact JSON.
///
/// # Parameters
/// - `data`: The value to serialize
///
/// # Returns
/// The JSON text, or `IoError::Serialization` if the value cannot be
/// represented (e.g. a map with non-string keys).
pub fn to_json<T: Serialize>(data: &T) -> Result<String> {
    serde_json::to_string(data)
        .map_err(|e| IoError::serialization(format!("JSON serialization failed: {e}")))
}

/// Serializes data to indented JSON, the format used for saved files.
///
/// # Parameters
/// - `data`: The value to serialize
///
/// # Returns
/// The pretty-printed JSON text, or `IoError::Serialization` on failure.
pub fn to_json_pretty<T: Serialize>(data: &T) -> Result<String> {
    serde_json::to_string_pretty(data)
        .map_err(|e| IoError::serialization(format!("JSON serialization failed: {e}")))
}

/// Parses a JSON document.
///
/// # Parameters
/// - `json`: The JSON text
///
/// # Returns
/// The parsed value. Blank input is `IoError::Validation`, which reads better
/// than serde's end-of-input message; anything else that fails to parse is
/// `IoError::Json`.
pub fn from_json<T>(json: &str) -> Result<T>
where
    T: for<'de> Deserialize<'de>,
{
    if json.trim().is_empty() {
        return Err(IoError::validation("empty JSON document"));
    }
    Ok(serde_json::from_str(json)?)
}

/// Writes data as pretty-printed JSON, replacing any existing file.
///
/// # Parameters
/// - `data`: The value to serialize
/// - `path`: The file to write
///
/// # Returns
/// `Ok(())` on success, or the failure wrapped in context naming `path`.
pub fn write_json_file<T, P>(data: &T, path: P) -> Result<()>
where
    T: Serialize,
    P: AsRef<Path>,
{
    let json = to_json_pretty(data)?;
    std::fs::write(&path, json).map_err(|e| {
        IoError::FileSystem(e).with_context(format!("writing JSON to {:?}", path.as_ref()))
    })
}

/// Reads and parses a JSON file.
///
/// # Parameters
/// - `path`: The file to read
///
/// # Returns
/// The parsed value, or the read or parse failure wrapped in context naming
/// `path`.
pub fn read_json_file<T, P>(path: P) -> Result<T>
where
    T: for<'de> Deserialize<'de>,
    P: AsRef<Path>,
{
    let json = std::fs::read_to_string(&path).map_err(|e| {
        IoError::FileSystem(e).with_context(format!("reading JSON from {:?}", path.as_ref()))
    })?;
    from_json(&json).map_err(|e| e.with_context(format!("parsing {:?}", path.as_ref())))
}

#[cfg(test)]
mod tests {
    use super::*;
    use archgen_data::{Architecture, Edge, Locus};

    #[test]
    fn test_architecture_json_shape() {
        let arch = Architecture::new(
            1,
            vec![
                Locus {
                    trait_id: 0,
                    effect: 0.5,
                    dominance: 1.0,
                };
                2
            ],
            vec![Edge {
                from: 0,
                to: 1,
                weight: -0.25,
            }],
        );
        let json = to_json(&arch).expect("serializable");
        assert!(json.contains("\"n_traits\":1"));
        assert!(json.contains("\"weight\":-0.25"));
        let restored: Architecture = from_json(&json).expect("parseable");
        assert_eq!(restored, arch);
    }

    #[test]
    fn test_blank_json_is_validation_error() {
        let result: Result<Architecture> = from_json("  \n");
        assert!(matches!(result, Err(IoError::Validation(_))));
    }

    #[test]
    fn test_malformed_json_keeps_parser_error() {
        let err = from_json::<Architecture>("{ \"n_traits\": ").expect_err("truncated");
        let IoError::Json(inner) = err else {
            panic!("expected a JSON error, got {err}");
        };
        assert!(inner.is_eof());
    }

    #[test]
    fn test_mistyped_json_is_json_error() {
        let result: Result<Architecture> = from_json(r#"{"n_traits": "two", "loci": []}"#);
        assert!(matches!(result, Err(IoError::Json(_))));
    }

    #[test]
    fn test_missing_file_names_path() {
        let err = read_json_file::<Architecture, _>("/nonexistent/arch.json")
            .expect_err("missing file");
        assert!(err.to_string().contains("arch.json"));
    }
}
