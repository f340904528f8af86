//! Validator for untrusted chart documents.
//!
//! The document is first walked against the registered chart IR schema, which
//! collects every structural violation (JSON types, required fields, enum
//! membership) and every bound violation in one pass, each with its JSON path.
//! Only a clean document is decoded into [`ChartIr`], so the compiler only
//! ever sees documents that pass.

use serde_json::{Map, Value};

use crate::error::{Issue, ValidationError};
use crate::ir::ChartIr;
use crate::schema::{SchemaDocument, SchemaRegistry};

/// Parse and validate a JSON document.
pub fn from_str(src: &str) -> Result<ChartIr, ValidationError> {
    let value: Value =
        serde_json::from_str(src).map_err(|e| ValidationError::single(ROOT, e.to_string()))?;
    from_value(value)
}

pub fn from_slice(bytes: &[u8]) -> Result<ChartIr, ValidationError> {
    let value: Value =
        serde_json::from_slice(bytes).map_err(|e| ValidationError::single(ROOT, e.to_string()))?;
    from_value(value)
}

/// Validate an already-parsed JSON value.
pub fn from_value(value: Value) -> Result<ChartIr, ValidationError> {
    let issues = check(
        &SchemaRegistry::chart_ir(),
        SchemaDocument::CHART_IR.root,
        &value,
    );
    if !issues.is_empty() {
        return Err(ValidationError::new(issues));
    }

    let ir: ChartIr = serde_path_to_error::deserialize(value).map_err(structural)?;
    ir.validate()?;
    Ok(ir)
}

/// Check `value` against the registered definition `root`.
///
/// Every violation is returned, in schema declaration order. Keys the schema
/// does not declare are ignored.
pub fn check(registry: &SchemaRegistry, root: &str, value: &Value) -> Vec<Issue> {
    let mut issues = Vec::new();
    match registry.get(root) {
        Some(schema) => check_node(registry, schema, value, ROOT, &mut issues),
        None => issues.push(Issue::new(ROOT, format!("type '{}' is not registered", root))),
    }
    issues
}

const ROOT: &str = "$";

fn check_node(
    registry: &SchemaRegistry,
    schema: &Value,
    value: &Value,
    path: &str,
    issues: &mut Vec<Issue>,
) {
    let Some(schema) = registry.resolve(schema) else {
        issues.push(Issue::new(path, "schema reference is not registered"));
        return;
    };

    match (schema.get("type").and_then(Value::as_str), value) {
        (Some("object"), Value::Object(map)) => check_object(registry, schema, map, path, issues),
        (Some("array"), Value::Array(items)) => {
            if let Some(min) = schema.get("minItems").and_then(Value::as_u64) {
                if (items.len() as u64) < min {
                    issues.push(Issue::new(
                        path,
                        format!("must contain at least {} item(s)", min),
                    ));
                }
            }
            if let Some(item_schema) = schema.get("items") {
                for (i, item) in items.iter().enumerate() {
                    let item_path = format!("{}[{}]", path, i);
                    check_node(registry, item_schema, item, &item_path, issues);
                }
            }
        }
        (Some("string"), Value::String(s)) => {
            if let Some(allowed) = schema.get("enum").and_then(Value::as_array) {
                if !allowed.iter().any(|v| v.as_str() == Some(s.as_str())) {
                    let expected = allowed
                        .iter()
                        .filter_map(Value::as_str)
                        .map(|v| format!("`{}`", v))
                        .collect::<Vec<_>>()
                        .join(", ");
                    issues.push(Issue::new(
                        path,
                        format!("unknown variant `{}`, expected one of {}", s, expected),
                    ));
                }
            }
        }
        (Some("number"), Value::Number(n)) => {
            let Some(n) = n.as_f64() else { return };
            if let Some(min) = schema.get("minimum").and_then(Value::as_f64) {
                if n < min {
                    issues.push(Issue::new(path, format!("must be >= {}, got {}", min, n)));
                }
            }
            if let Some(max) = schema.get("maximum").and_then(Value::as_f64) {
                if n > max {
                    issues.push(Issue::new(path, format!("must be <= {}, got {}", max, n)));
                }
            }
        }
        (Some("boolean"), Value::Bool(_)) => {}
        (Some(expected), other) => issues.push(Issue::new(
            path,
            format!("invalid type: {}, expected {}", kind(other), expected),
        )),
        (None, _) => {}
    }
}

fn check_object(
    registry: &SchemaRegistry,
    schema: &Value,
    map: &Map<String, Value>,
    path: &str,
    issues: &mut Vec<Issue>,
) {
    let required: Vec<&str> = schema
        .get("required")
        .and_then(Value::as_array)
        .map(|names| names.iter().filter_map(Value::as_str).collect())
        .unwrap_or_default();

    let Some(properties) = schema.get("properties").and_then(Value::as_object) else {
        return;
    };

    for (name, property) in properties {
        let field_path = if path == ROOT {
            name.clone()
        } else {
            format!("{}.{}", path, name)
        };
        match map.get(name) {
            Some(child) => check_node(registry, property, child, &field_path, issues),
            None if required.contains(&name.as_str()) => {
                issues.push(Issue::new(field_path, format!("missing field `{}`", name)));
            }
            None => {}
        }
    }
}

fn kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

fn structural(err: serde_path_to_error::Error<serde_json::Error>) -> ValidationError {
    let path = err.path().to_string();
    let path = if path == "." { ROOT.to_string() } else { path };
    ValidationError::single(path, err.into_inner().to_string())
}

impl ChartIr {
    /// Check the value constraints of a decoded document.
    ///
    /// Useful for documents assembled in code, which bypass decoding.
    pub fn validate(&self) -> Result<(), ValidationError> {
        let mut issues = Vec::new();

        if self.datasets.is_empty() {
            issues.push(Issue::new("datasets", "must contain at least one dataset"));
        }
        if self.marks.is_empty() {
            issues.push(Issue::new("marks", "must contain at least one mark"));
        }

        for (i, mark) in self.marks.iter().enumerate() {
            let Some(style) = &mark.style else { continue };

            if let Some(opacity) = style.opacity {
                if !(0.0..=1.0).contains(&opacity) {
                    issues.push(Issue::new(
                        format!("marks[{}].style.opacity", i),
                        format!("must be between 0 and 1, got {}", opacity),
                    ));
                }
            }
            if let Some(width) = style.border_width {
                if width.is_nan() || width < 0.0 {
                    issues.push(Issue::new(
                        format!("marks[{}].style.borderWidth", i),
                        format!("must be >= 0, got {}", width),
                    ));
                }
            }
        }

        if issues.is_empty() {
            Ok(())
        } else {
            Err(ValidationError::new(issues))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn valid_doc() -> Value {
        json!({
            "datasets": [{
                "id": "sales",
                "columns": [
                    { "name": "month", "type": "string" },
                    { "name": "revenue", "type": "number" }
                ],
                "rows": [["Jan", "100"], ["Feb", "200"]]
            }],
            "marks": [{
                "id": "line1",
                "datasetId": "sales",
                "geometry": "line",
                "encode": { "x": "month", "y": "revenue" }
            }]
        })
    }

    #[test]
    fn test_accepts_valid_document() {
        let ir = from_value(valid_doc()).unwrap();
        assert_eq!(ir.datasets[0].id, "sales");
        assert!(from_str(&valid_doc().to_string()).is_ok());
        assert!(from_slice(valid_doc().to_string().as_bytes()).is_ok());
    }

    #[test]
    fn test_unknown_fields_are_ignored() {
        let mut doc = valid_doc();
        doc["extra"] = json!(1);
        assert!(from_value(doc).is_ok());
    }

    #[test]
    fn test_rejects_invalid_geometry_with_path() {
        let mut doc = valid_doc();
        doc["marks"][0]["geometry"] = json!("invalid");
        let err = from_value(doc).unwrap_err();
        assert_eq!(err.paths(), vec!["marks[0].geometry"]);
        assert!(err.issues[0].message.contains("unknown variant"));
    }

    #[test]
    fn test_rejects_invalid_column_type() {
        let mut doc = valid_doc();
        doc["datasets"][0]["columns"][0]["type"] = json!("invalid");
        let err = from_str(&doc.to_string()).unwrap_err();
        assert_eq!(err.paths(), vec!["datasets[0].columns[0].type"]);
    }

    #[test]
    fn test_rejects_missing_required_field() {
        let mut doc = valid_doc();
        doc["datasets"][0].as_object_mut().unwrap().remove("id");
        let err = from_value(doc).unwrap_err();
        assert_eq!(err.paths(), vec!["datasets[0].id"]);
        assert!(err.issues[0].message.contains("missing field `id`"));
    }

    #[test]
    fn test_collects_every_structural_violation() {
        let mut doc = valid_doc();
        doc["datasets"][0]["columns"][0]["type"] = json!("bogus");
        doc["marks"][0]["geometry"] = json!("nope");
        doc["marks"]
            .as_array_mut()
            .unwrap()
            .push(json!({ "id": "bar1", "datasetId": "sales", "geometry": "bar" }));
        doc["legend"] = json!({ "show": "yes" });

        let err = from_value(doc).unwrap_err();
        assert_eq!(
            err.paths(),
            vec![
                "datasets[0].columns[0].type",
                "marks[0].geometry",
                "marks[1].encode",
                "legend.show",
            ]
        );
        assert!(err.issues[2].message.contains("missing field `encode`"));
        assert_eq!(err.issues[3].message, "invalid type: string, expected boolean");
    }

    #[test]
    fn test_structural_and_value_violations_reported_together() {
        let mut doc = valid_doc();
        doc["marks"][0]["geometry"] = json!("nope");
        doc["marks"][0]["style"] = json!({ "opacity": 3 });
        let err = from_str(&doc.to_string()).unwrap_err();
        assert_eq!(err.paths(), vec!["marks[0].geometry", "marks[0].style.opacity"]);
    }

    #[test]
    fn test_check_against_unregistered_root() {
        let issues = check(&SchemaRegistry::new(), "ChartIR", &valid_doc());
        assert_eq!(issues.len(), 1);
        assert_eq!(issues[0].path, "$");
    }

    #[test]
    fn test_rejects_non_string_cell() {
        let mut doc = valid_doc();
        doc["datasets"][0]["rows"][1][1] = json!(200);
        let err = from_value(doc).unwrap_err();
        assert_eq!(err.paths(), vec!["datasets[0].rows[1][1]"]);
    }

    #[test]
    fn test_rejects_malformed_json() {
        let err = from_str("{ \"datasets\": [").unwrap_err();
        assert_eq!(err.issues.len(), 1);
        let err = from_str(&format!("{} trailing", valid_doc())).unwrap_err();
        assert_eq!(err.paths(), vec!["$"]);
    }

    #[test]
    fn test_collects_every_value_violation() {
        let mut doc = valid_doc();
        doc["datasets"] = json!([]);
        doc["marks"][0]["style"] = json!({ "opacity": 1.5, "borderWidth": -1 });
        let err = from_value(doc).unwrap_err();
        assert_eq!(
            err.paths(),
            vec!["datasets", "marks[0].style.opacity", "marks[0].style.borderWidth"]
        );
    }

    #[test]
    fn test_empty_marks() {
        let mut doc = valid_doc();
        doc["marks"] = json!([]);
        assert_eq!(from_value(doc).unwrap_err().paths(), vec!["marks"]);
    }

    #[test]
    fn test_opacity_bounds_are_inclusive() {
        let mut doc = valid_doc();
        doc["marks"][0]["style"] = json!({ "opacity": 0, "borderWidth": 0 });
        assert!(from_value(doc.clone()).is_ok());
        doc["marks"][0]["style"] = json!({ "opacity": 1 });
        assert!(from_value(doc).is_ok());
    }
}
