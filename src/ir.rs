// Chart IR: the flat, non-polymorphic chart description consumed by the compiler.
//
// Every block has exactly one shape regardless of geometry. Optional fields are
// omitted from the wire form when absent so documents round-trip unchanged.

use serde::{Deserialize, Serialize};

// =============================================================================
// Root
// =============================================================================

/// Top-level chart document.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChartIr {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    /// Data sources, referenced by marks through `Mark::dataset_id`.
    pub datasets: Vec<Dataset>,
    /// Visual series definitions.
    pub marks: Vec<Mark>,
    /// Optional for non-Cartesian charts (e.g. pie).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub axes: Option<Vec<Axis>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub legend: Option<Legend>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tooltip: Option<Tooltip>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub grid: Option<Grid>,
}

// =============================================================================
// Dataset
// =============================================================================

/// Data type of a dataset column. Governs coercion of the string cells.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ColumnType {
    String,
    Number,
}

impl ColumnType {
    pub const ALL: [ColumnType; 2] = [ColumnType::String, ColumnType::Number];

    pub fn as_str(self) -> &'static str {
        match self {
            ColumnType::String => "string",
            ColumnType::Number => "number",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Column {
    /// Column identifier used in encode mappings.
    pub name: String,
    #[serde(rename = "type")]
    pub column_type: ColumnType,
}

impl Column {
    pub fn new(name: impl Into<String>, column_type: ColumnType) -> Self {
        Self {
            name: name.into(),
            column_type,
        }
    }
}

/// Tabular data. Every cell is a string; `""` is the null sentinel.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Dataset {
    pub id: String,
    pub columns: Vec<Column>,
    pub rows: Vec<Vec<String>>,
}

// =============================================================================
// Mark
// =============================================================================

/// Visual shape family of a mark.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Geometry {
    Line,
    Bar,
    Pie,
    Scatter,
    Area,
}

impl Geometry {
    pub const ALL: [Geometry; 5] = [
        Geometry::Line,
        Geometry::Bar,
        Geometry::Pie,
        Geometry::Scatter,
        Geometry::Area,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Geometry::Line => "line",
            Geometry::Bar => "bar",
            Geometry::Pie => "pie",
            Geometry::Scatter => "scatter",
            Geometry::Area => "area",
        }
    }
}

/// Declared on marks but not consulted by the current lowering.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CoordinateSystem {
    Cartesian2d,
    Polar,
    Radial,
}

impl CoordinateSystem {
    pub const ALL: [CoordinateSystem; 3] = [
        CoordinateSystem::Cartesian2d,
        CoordinateSystem::Polar,
        CoordinateSystem::Radial,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            CoordinateSystem::Cartesian2d => "cartesian2d",
            CoordinateSystem::Polar => "polar",
            CoordinateSystem::Radial => "radial",
        }
    }
}

/// Visual channel → column name. Not every channel applies to every geometry.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Encode {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub x: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub y: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub value: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub size: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
}

/// Flat, geometry-agnostic styling.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Style {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
    /// 0.0 ..= 1.0
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub opacity: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub border_color: Option<String>,
    /// Pixels, >= 0
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub border_width: Option<f64>,
}

/// One visual series: a geometry drawn from one dataset through an encoding.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Mark {
    pub id: String,
    pub dataset_id: String,
    pub geometry: Geometry,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub coordinate_system: Option<CoordinateSystem>,
    pub encode: Encode,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub style: Option<Style>,
    /// Marks sharing a stack value are stacked together.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub stack: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub smooth: Option<bool>,
    /// Display name for legends and tooltips.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
}

impl Mark {
    pub fn new(id: impl Into<String>, dataset_id: impl Into<String>, geometry: Geometry) -> Self {
        Self {
            id: id.into(),
            dataset_id: dataset_id.into(),
            geometry,
            coordinate_system: None,
            encode: Encode::default(),
            style: None,
            stack: None,
            smooth: None,
            name: None,
        }
    }

    /// Label shown for this mark: its name, or its id when the name is unset or empty.
    pub fn display_name(&self) -> &str {
        match self.name.as_deref() {
            Some(name) if !name.is_empty() => name,
            _ => &self.id,
        }
    }
}

// =============================================================================
// Axis
// =============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AxisType {
    Category,
    Value,
    Time,
    Log,
}

impl AxisType {
    pub const ALL: [AxisType; 4] = [
        AxisType::Category,
        AxisType::Value,
        AxisType::Time,
        AxisType::Log,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            AxisType::Category => "category",
            AxisType::Value => "value",
            AxisType::Time => "time",
            AxisType::Log => "log",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AxisPosition {
    Bottom,
    Top,
    Left,
    Right,
}

/// Which role an axis plays, derived from where it sits.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Orientation {
    /// Bottom or top: an x axis.
    Horizontal,
    /// Left or right: a y axis.
    Vertical,
}

impl AxisPosition {
    pub const ALL: [AxisPosition; 4] = [
        AxisPosition::Bottom,
        AxisPosition::Top,
        AxisPosition::Left,
        AxisPosition::Right,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            AxisPosition::Bottom => "bottom",
            AxisPosition::Top => "top",
            AxisPosition::Left => "left",
            AxisPosition::Right => "right",
        }
    }

    pub fn orientation(self) -> Orientation {
        match self {
            AxisPosition::Bottom | AxisPosition::Top => Orientation::Horizontal,
            AxisPosition::Left | AxisPosition::Right => Orientation::Vertical,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Axis {
    pub id: String,
    #[serde(rename = "type")]
    pub axis_type: AxisType,
    pub position: AxisPosition,
    /// Axis title.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// Auto-calculated by the renderer when absent.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max: Option<f64>,
}

impl Axis {
    pub fn new(id: impl Into<String>, axis_type: AxisType, position: AxisPosition) -> Self {
        Self {
            id: id.into(),
            axis_type,
            position,
            name: None,
            min: None,
            max: None,
        }
    }

    pub fn is_horizontal(&self) -> bool {
        self.position.orientation() == Orientation::Horizontal
    }

    pub fn is_vertical(&self) -> bool {
        self.position.orientation() == Orientation::Vertical
    }
}

// =============================================================================
// Legend / Tooltip / Grid
// =============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LegendPosition {
    Top,
    Bottom,
    Left,
    Right,
}

impl LegendPosition {
    pub const ALL: [LegendPosition; 4] = [
        LegendPosition::Top,
        LegendPosition::Bottom,
        LegendPosition::Left,
        LegendPosition::Right,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            LegendPosition::Top => "top",
            LegendPosition::Bottom => "bottom",
            LegendPosition::Left => "left",
            LegendPosition::Right => "right",
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Legend {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub show: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub position: Option<LegendPosition>,
    /// Explicit labels. Auto-generated from marks when absent or empty.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub items: Option<Vec<String>>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TooltipTrigger {
    Item,
    Axis,
    None,
}

impl TooltipTrigger {
    pub const ALL: [TooltipTrigger; 3] = [
        TooltipTrigger::Item,
        TooltipTrigger::Axis,
        TooltipTrigger::None,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            TooltipTrigger::Item => "item",
            TooltipTrigger::Axis => "axis",
            TooltipTrigger::None => "none",
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Tooltip {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub show: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub trigger: Option<TooltipTrigger>,
}

/// Container placement. Values are percentage ("10%") or pixel ("50") literals,
/// passed through unvalidated.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Grid {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub left: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub right: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub top: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bottom: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub width: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub height: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub contain_label: Option<bool>,
}
