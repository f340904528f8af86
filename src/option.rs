// Renderer configuration: the ECharts option subset the compiler produces.
//
// Output types only serialize. Absent keys are omitted so that block presence
// in the output mirrors block presence in the IR.

use serde::Serialize;

use crate::ir::{AxisType, TooltipTrigger};
use crate::symbol::SymbolSize;

/// Root option object handed to the renderer.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RendererConfig {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<TitleOption>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub dataset: Option<Vec<DatasetOption>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub series: Option<Vec<SeriesOption>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub x_axis: Option<OneOrMany<AxisOption>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub y_axis: Option<OneOrMany<AxisOption>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub legend: Option<LegendOption>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tooltip: Option<TooltipOption>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub grid: Option<GridOption>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TitleOption {
    pub text: String,
}

// =============================================================================
// Dataset
// =============================================================================

/// A typed dataset cell.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Cell {
    Null,
    Number(f64),
    Text(String),
}

impl Cell {
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Cell::Number(n) => Some(*n),
            _ => None,
        }
    }

    pub fn is_null(&self) -> bool {
        matches!(self, Cell::Null)
    }
}

/// Columnar source: dimension names plus rows of typed cells.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DatasetOption {
    pub id: String,
    pub dimensions: Vec<String>,
    pub source: Vec<Vec<Cell>>,
}

// =============================================================================
// Series
// =============================================================================

/// Renderer series types. Area has no type of its own; it is a line with an area fill.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SeriesType {
    Line,
    Bar,
    Pie,
    Scatter,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SeriesEncode {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub x: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub y: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub value: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub item_name: Option<String>,
}

impl SeriesEncode {
    pub fn is_empty(&self) -> bool {
        self.x.is_none() && self.y.is_none() && self.value.is_none() && self.item_name.is_none()
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct LineStyleOption {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub opacity: Option<f64>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ItemStyleOption {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub opacity: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub border_color: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub border_width: Option<f64>,
}

/// Serializes to `{}` when no opacity is set, which the renderer reads as its default fill.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct AreaStyleOption {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub opacity: Option<f64>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SeriesOption {
    #[serde(rename = "type")]
    pub series_type: SeriesType,
    pub name: String,
    pub dataset_index: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub encode: Option<SeriesEncode>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub smooth: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stack: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub line_style: Option<LineStyleOption>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub item_style: Option<ItemStyleOption>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub area_style: Option<AreaStyleOption>,
    /// Executable sizing; has no JSON form and is attached by the consumer.
    #[serde(skip)]
    pub symbol_size: Option<SymbolSize>,
}

impl SeriesOption {
    pub fn new(series_type: SeriesType, name: impl Into<String>, dataset_index: usize) -> Self {
        Self {
            series_type,
            name: name.into(),
            dataset_index,
            encode: None,
            smooth: None,
            stack: None,
            line_style: None,
            item_style: None,
            area_style: None,
            symbol_size: None,
        }
    }
}

// =============================================================================
// Axes
// =============================================================================

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AxisOption {
    #[serde(rename = "type")]
    pub axis_type: AxisType,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub min: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max: Option<f64>,
}

/// A single value, or a list when there is more than one.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum OneOrMany<T> {
    One(T),
    Many(Vec<T>),
}

impl<T> OneOrMany<T> {
    /// `None` for an empty list, `One` for a single element, `Many` otherwise.
    pub fn from_vec(mut items: Vec<T>) -> Option<Self> {
        match items.len() {
            0 => None,
            1 => items.pop().map(OneOrMany::One),
            _ => Some(OneOrMany::Many(items)),
        }
    }

    pub fn len(&self) -> usize {
        match self {
            OneOrMany::One(_) => 1,
            OneOrMany::Many(items) => items.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn as_slice(&self) -> &[T] {
        match self {
            OneOrMany::One(item) => std::slice::from_ref(item),
            OneOrMany::Many(items) => items,
        }
    }
}

// =============================================================================
// Legend / Tooltip / Grid
// =============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Orient {
    Horizontal,
    Vertical,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct LegendOption {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub show: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub top: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bottom: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub left: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub right: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub orient: Option<Orient>,
    pub data: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct TooltipOption {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub show: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub trigger: Option<TooltipTrigger>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GridOption {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub left: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub right: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub top: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bottom: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub width: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub height: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub contain_label: Option<bool>,
}
