//! Interchange schema generation.
//!
//! Produces a JSON Schema (2020-12) document describing the chart IR, for
//! third-party validators and editors. Type definitions live in an explicit
//! [`SchemaRegistry`] that callers build and pass in; enum members are taken
//! from the IR enums themselves so the schema cannot drift from the types.

use serde_json::{json, Map, Value};

use crate::ir::{
    AxisPosition, AxisType, ColumnType, CoordinateSystem, Geometry, LegendPosition, TooltipTrigger,
};

pub const SCHEMA_DIALECT: &str = "https://json-schema.org/draft/2020-12/schema";

const DEFS_PREFIX: &str = "#/$defs/";

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SchemaError {
    #[error("root type '{0}' is not registered")]
    UnknownRoot(String),

    #[error("definition '{from}' references unregistered type '{target}'")]
    DanglingRef { from: String, target: String },
}

/// Named type definitions, kept in registration order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SchemaRegistry {
    definitions: Map<String, Value>,
}

impl SchemaRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add or replace a definition, returning the one it replaced.
    pub fn register(&mut self, name: impl Into<String>, definition: Value) -> Option<Value> {
        self.definitions.insert(name.into(), definition)
    }

    pub fn get(&self, name: &str) -> Option<&Value> {
        self.definitions.get(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.definitions.contains_key(name)
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.definitions.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.definitions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.definitions.is_empty()
    }

    /// Follow a `$ref` to its registered definition. Inline schemas resolve to themselves.
    pub fn resolve<'a>(&'a self, schema: &'a Value) -> Option<&'a Value> {
        match schema.get("$ref").and_then(Value::as_str) {
            Some(target) => self.get(target.strip_prefix(DEFS_PREFIX).unwrap_or(target)),
            None => Some(schema),
        }
    }

    /// Registry holding every chart IR type.
    pub fn chart_ir() -> Self {
        let mut registry = Self::new();

        registry.register(
            "ChartIR",
            object(
                "Top-level chart intermediate representation.",
                vec![
                    ("title", string()),
                    ("datasets", non_empty_array(reference("Dataset"))),
                    ("marks", non_empty_array(reference("Mark"))),
                    ("axes", array(reference("Axis"))),
                    ("legend", reference("Legend")),
                    ("tooltip", reference("Tooltip")),
                    ("grid", reference("Grid")),
                ],
                &["datasets", "marks"],
            ),
        );

        registry.register(
            "Dataset",
            object(
                "Tabular data. Values are strings; \"\" is null; column types govern parsing.",
                vec![
                    ("id", string()),
                    ("columns", array(reference("Column"))),
                    ("rows", array(array(string()))),
                ],
                &["id", "columns", "rows"],
            ),
        );
        registry.register(
            "Column",
            object(
                "A named, typed dataset column.",
                vec![("name", string()), ("type", reference("ColumnType"))],
                &["name", "type"],
            ),
        );
        registry.register("ColumnType", string_enum(ColumnType::ALL.map(ColumnType::as_str)));

        registry.register(
            "Mark",
            object(
                "A visual series: one geometry, one dataset reference, one encoding.",
                vec![
                    ("id", string()),
                    ("datasetId", string()),
                    ("geometry", reference("Geometry")),
                    ("coordinateSystem", reference("CoordinateSystem")),
                    ("encode", reference("Encode")),
                    ("style", reference("Style")),
                    ("stack", string()),
                    ("smooth", boolean()),
                    ("name", string()),
                ],
                &["id", "datasetId", "geometry", "encode"],
            ),
        );
        registry.register("Geometry", string_enum(Geometry::ALL.map(Geometry::as_str)));
        registry.register(
            "CoordinateSystem",
            string_enum(CoordinateSystem::ALL.map(CoordinateSystem::as_str)),
        );
        registry.register(
            "Encode",
            object(
                "Maps dataset columns to visual channels.",
                ["x", "y", "value", "name", "size", "color"]
                    .into_iter()
                    .map(|channel| (channel, string()))
                    .collect(),
                &[],
            ),
        );
        registry.register(
            "Style",
            object(
                "Flat visual styling.",
                vec![
                    ("color", string()),
                    ("opacity", json!({ "type": "number", "minimum": 0, "maximum": 1 })),
                    ("borderColor", string()),
                    ("borderWidth", json!({ "type": "number", "minimum": 0 })),
                ],
                &[],
            ),
        );

        registry.register(
            "Axis",
            object(
                "A chart axis. Bottom/top axes are x axes, left/right axes are y axes.",
                vec![
                    ("id", string()),
                    ("type", reference("AxisType")),
                    ("position", reference("AxisPosition")),
                    ("name", string()),
                    ("min", number()),
                    ("max", number()),
                ],
                &["id", "type", "position"],
            ),
        );
        registry.register("AxisType", string_enum(AxisType::ALL.map(AxisType::as_str)));
        registry.register(
            "AxisPosition",
            string_enum(AxisPosition::ALL.map(AxisPosition::as_str)),
        );

        registry.register(
            "Legend",
            object(
                "Legend configuration. Items default to one label per mark.",
                vec![
                    ("show", boolean()),
                    ("position", reference("LegendPosition")),
                    ("items", array(string())),
                ],
                &[],
            ),
        );
        registry.register(
            "LegendPosition",
            string_enum(LegendPosition::ALL.map(LegendPosition::as_str)),
        );

        registry.register(
            "Tooltip",
            object(
                "Tooltip configuration.",
                vec![("show", boolean()), ("trigger", reference("TooltipTrigger"))],
                &[],
            ),
        );
        registry.register(
            "TooltipTrigger",
            string_enum(TooltipTrigger::ALL.map(TooltipTrigger::as_str)),
        );

        registry.register(
            "Grid",
            object(
                "Grid placement. Values are percentage (\"10%\") or pixel (\"50\") literals.",
                vec![
                    ("left", string()),
                    ("right", string()),
                    ("top", string()),
                    ("bottom", string()),
                    ("width", string()),
                    ("height", string()),
                    ("containLabel", boolean()),
                ],
                &[],
            ),
        );

        registry
    }
}

/// Header of a generated schema document.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SchemaDocument<'a> {
    /// Registry entry the document validates.
    pub root: &'a str,
    pub id: &'a str,
    pub title: &'a str,
    pub description: &'a str,
}

impl SchemaDocument<'static> {
    pub const CHART_IR: Self = Self {
        root: "ChartIR",
        id: "urn:chartir:schema:chartir",
        title: "Chart IR",
        description: "A non-polymorphic intermediate representation for ECharts configurations.",
    };
}

/// Assemble a schema document from the registry.
///
/// Fails when the root is missing or any `$ref` points outside the registry.
pub fn generate_schema(
    registry: &SchemaRegistry,
    document: &SchemaDocument<'_>,
) -> Result<Value, SchemaError> {
    if !registry.contains(document.root) {
        return Err(SchemaError::UnknownRoot(document.root.to_string()));
    }

    for (name, definition) in &registry.definitions {
        check_refs(name, definition, registry)?;
    }

    Ok(json!({
        "$schema": SCHEMA_DIALECT,
        "$id": document.id,
        "title": document.title,
        "description": document.description,
        "$ref": format!("{}{}", DEFS_PREFIX, document.root),
        "$defs": registry.definitions.clone(),
    }))
}

/// The chart IR schema document.
pub fn chart_ir_schema() -> Result<Value, SchemaError> {
    generate_schema(&SchemaRegistry::chart_ir(), &SchemaDocument::CHART_IR)
}

fn check_refs(from: &str, value: &Value, registry: &SchemaRegistry) -> Result<(), SchemaError> {
    match value {
        Value::Object(map) => {
            if let Some(Value::String(target)) = map.get("$ref") {
                let name = target.strip_prefix(DEFS_PREFIX).unwrap_or(target);
                if !registry.contains(name) {
                    return Err(SchemaError::DanglingRef {
                        from: from.to_string(),
                        target: name.to_string(),
                    });
                }
            }
            map.values().try_for_each(|v| check_refs(from, v, registry))
        }
        Value::Array(items) => items.iter().try_for_each(|v| check_refs(from, v, registry)),
        _ => Ok(()),
    }
}

// Definition builders

fn string() -> Value {
    json!({ "type": "string" })
}

fn number() -> Value {
    json!({ "type": "number" })
}

fn boolean() -> Value {
    json!({ "type": "boolean" })
}

fn string_enum<const N: usize>(values: [&'static str; N]) -> Value {
    json!({ "type": "string", "enum": values.as_slice() })
}

fn reference(name: &str) -> Value {
    json!({ "$ref": format!("{}{}", DEFS_PREFIX, name) })
}

fn array(items: Value) -> Value {
    json!({ "type": "array", "items": items })
}

fn non_empty_array(items: Value) -> Value {
    json!({ "type": "array", "items": items, "minItems": 1 })
}

fn object(description: &str, properties: Vec<(&str, Value)>, required: &[&str]) -> Value {
    let properties: Map<String, Value> = properties
        .into_iter()
        .map(|(name, schema)| (name.to_string(), schema))
        .collect();

    let mut def = Map::new();
    def.insert("type".to_string(), json!("object"));
    def.insert("description".to_string(), json!(description));
    def.insert("properties".to_string(), Value::Object(properties));
    if !required.is_empty() {
        def.insert("required".to_string(), json!(required));
    }
    def.insert("additionalProperties".to_string(), json!(false));
    Value::Object(def)
}
