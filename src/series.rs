use crate::ir::{Dataset, Encode, Geometry, Mark, Style};
use crate::option::{
    AreaStyleOption, ItemStyleOption, LineStyleOption, SeriesEncode, SeriesOption, SeriesType,
};
use crate::symbol::SymbolSize;

/// Series-level defaults supplied by the compiler.
#[derive(Debug, Clone)]
pub struct SeriesDefaults {
    /// Fill opacity of an area mark whose style has no opacity.
    pub area_opacity: f64,
    /// Sizing attached to scatter marks with a size channel.
    pub symbol_size: SymbolSize,
}

impl Default for SeriesDefaults {
    fn default() -> Self {
        Self {
            area_opacity: 0.7,
            symbol_size: SymbolSize::default(),
        }
    }
}

/// Position of the dataset with the given id, if any.
pub fn find_dataset_index(dataset_id: &str, datasets: &[Dataset]) -> Option<usize> {
    datasets.iter().position(|d| d.id == dataset_id)
}

/// Renderer series type for a geometry. Area renders as a line.
pub fn map_geometry(geometry: Geometry) -> SeriesType {
    match geometry {
        Geometry::Line => SeriesType::Line,
        Geometry::Bar => SeriesType::Bar,
        Geometry::Pie => SeriesType::Pie,
        Geometry::Scatter => SeriesType::Scatter,
        Geometry::Area => SeriesType::Line,
    }
}

/// Lower one mark into a renderer series.
///
/// An unknown `dataset_id` falls back to dataset 0; the compiler reports it.
pub fn lower_mark(mark: &Mark, datasets: &[Dataset], defaults: &SeriesDefaults) -> SeriesOption {
    let dataset_index = find_dataset_index(&mark.dataset_id, datasets).unwrap_or(0);

    let mut series = SeriesOption::new(
        map_geometry(mark.geometry),
        mark.display_name(),
        dataset_index,
    );

    let encode = lower_encode(&mark.encode);
    if !encode.is_empty() {
        series.encode = Some(encode);
    }

    let smooth = mark.smooth == Some(true);

    match mark.geometry {
        Geometry::Line => {
            if smooth {
                series.smooth = Some(true);
            }
            if let Some(style) = &mark.style {
                series.line_style = Some(line_style(style));
                series.item_style = Some(item_style(style));
            }
        }
        Geometry::Area => {
            series.series_type = SeriesType::Line;
            series.area_style = Some(AreaStyleOption::default());
            if smooth {
                series.smooth = Some(true);
            }
            if let Some(style) = &mark.style {
                series.line_style = Some(line_style(style));
                series.item_style = Some(item_style(style));
                series.area_style = Some(AreaStyleOption {
                    opacity: Some(style.opacity.unwrap_or(defaults.area_opacity)),
                });
            }
        }
        Geometry::Bar => {
            if let Some(stack) = non_empty(&mark.stack) {
                series.stack = Some(stack);
            }
            if let Some(style) = &mark.style {
                series.item_style = Some(item_style(style));
            }
        }
        // Pie marks normally encode value/name; nothing here enforces it.
        Geometry::Pie => {
            if let Some(style) = &mark.style {
                series.item_style = Some(item_style(style));
            }
        }
        Geometry::Scatter => {
            if let Some(style) = &mark.style {
                series.item_style = Some(item_style(style));
            }
            if non_empty(&mark.encode.size).is_some() {
                series.symbol_size = Some(defaults.symbol_size.clone());
            }
        }
    }

    series
}

/// x, y and value copy across; the name channel becomes `itemName`.
/// Size and color channels have no series-level counterpart.
fn lower_encode(encode: &Encode) -> SeriesEncode {
    SeriesEncode {
        x: non_empty(&encode.x),
        y: non_empty(&encode.y),
        value: non_empty(&encode.value),
        item_name: non_empty(&encode.name),
    }
}

fn line_style(style: &Style) -> LineStyleOption {
    LineStyleOption {
        color: non_empty(&style.color),
        opacity: style.opacity,
    }
}

fn item_style(style: &Style) -> ItemStyleOption {
    ItemStyleOption {
        color: non_empty(&style.color),
        opacity: style.opacity,
        border_color: non_empty(&style.border_color),
        border_width: style.border_width,
    }
}

fn non_empty(value: &Option<String>) -> Option<String> {
    value.as_ref().filter(|s| !s.is_empty()).cloned()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ir::{Column, ColumnType};
    use serde_json::json;

    fn datasets() -> Vec<Dataset> {
        vec![
            Dataset {
                id: "d1".to_string(),
                columns: vec![Column::new("x", ColumnType::String)],
                rows: vec![],
            },
            Dataset {
                id: "d2".to_string(),
                columns: vec![Column::new("x", ColumnType::String)],
                rows: vec![],
            },
        ]
    }

    fn mark(geometry: Geometry) -> Mark {
        let mut mark = Mark::new("m1", "d1", geometry);
        mark.encode.x = Some("x".to_string());
        mark.encode.y = Some("y".to_string());
        mark
    }

    fn full_style() -> Style {
        Style {
            color: Some("#5470c6".to_string()),
            opacity: Some(0.5),
            border_color: Some("#000".to_string()),
            border_width: Some(2.0),
        }
    }

    fn lower(mark: &Mark) -> serde_json::Value {
        serde_json::to_value(lower_mark(mark, &datasets(), &SeriesDefaults::default())).unwrap()
    }

    #[test]
    fn test_every_geometry_has_a_series_type() {
        for geometry in Geometry::ALL {
            let expected = match geometry {
                Geometry::Bar => SeriesType::Bar,
                Geometry::Pie => SeriesType::Pie,
                Geometry::Scatter => SeriesType::Scatter,
                Geometry::Line | Geometry::Area => SeriesType::Line,
            };
            assert_eq!(map_geometry(geometry), expected, "{:?}", geometry);
        }
    }

    #[test]
    fn test_dataset_resolution() {
        let mut m = mark(Geometry::Line);
        m.dataset_id = "d2".to_string();
        assert_eq!(lower_mark(&m, &datasets(), &SeriesDefaults::default()).dataset_index, 1);

        m.dataset_id = "missing".to_string();
        assert_eq!(lower_mark(&m, &datasets(), &SeriesDefaults::default()).dataset_index, 0);
        assert_eq!(find_dataset_index("missing", &datasets()), None);
    }

    #[test]
    fn test_plain_line() {
        assert_eq!(
            lower(&mark(Geometry::Line)),
            json!({
                "type": "line",
                "name": "m1",
                "datasetIndex": 0,
                "encode": { "x": "x", "y": "y" }
            })
        );
    }

    #[test]
    fn test_line_with_smooth_and_style() {
        let mut m = mark(Geometry::Line);
        m.smooth = Some(true);
        m.style = Some(full_style());
        m.name = Some("Sales".to_string());

        let s = lower(&m);
        assert_eq!(s["name"], "Sales");
        assert_eq!(s["smooth"], true);
        assert_eq!(s["lineStyle"], json!({ "color": "#5470c6", "opacity": 0.5 }));
        assert_eq!(
            s["itemStyle"],
            json!({ "color": "#5470c6", "opacity": 0.5, "borderColor": "#000", "borderWidth": 2.0 })
        );
        assert!(s.get("areaStyle").is_none());
    }

    #[test]
    fn test_smooth_false_is_not_emitted() {
        let mut m = mark(Geometry::Line);
        m.smooth = Some(false);
        assert!(lower(&m).get("smooth").is_none());
    }

    #[test]
    fn test_area_without_style_has_empty_area_style() {
        let s = lower(&mark(Geometry::Area));
        assert_eq!(s["type"], "line");
        assert_eq!(s["areaStyle"], json!({}));
        assert!(s.get("lineStyle").is_none());
    }

    #[test]
    fn test_area_style_opacity() {
        let mut m = mark(Geometry::Area);
        m.smooth = Some(true);
        m.style = Some(Style {
            color: Some("red".to_string()),
            ..Style::default()
        });
        let s = lower(&m);
        assert_eq!(s["smooth"], true);
        assert_eq!(s["areaStyle"], json!({ "opacity": 0.7 }));
        assert_eq!(s["lineStyle"], json!({ "color": "red" }));

        m.style = Some(full_style());
        assert_eq!(lower(&m)["areaStyle"], json!({ "opacity": 0.5 }));

        let defaults = SeriesDefaults {
            area_opacity: 0.3,
            ..SeriesDefaults::default()
        };
        m.style = Some(Style::default());
        let series = lower_mark(&m, &datasets(), &defaults);
        assert_eq!(series.area_style, Some(AreaStyleOption { opacity: Some(0.3) }));
    }

    #[test]
    fn test_bar_stack_and_item_style_only() {
        let mut m = mark(Geometry::Bar);
        m.stack = Some("total".to_string());
        m.style = Some(full_style());
        let s = lower(&m);
        assert_eq!(s["type"], "bar");
        assert_eq!(s["stack"], "total");
        assert!(s.get("itemStyle").is_some());
        assert!(s.get("lineStyle").is_none());
    }

    #[test]
    fn test_stack_ignored_outside_bar() {
        let mut m = mark(Geometry::Line);
        m.stack = Some("total".to_string());
        assert!(lower(&m).get("stack").is_none());
    }

    #[test]
    fn test_pie_encode_renames_name_channel() {
        let mut m = Mark::new("share", "d1", Geometry::Pie);
        m.encode.value = Some("amount".to_string());
        m.encode.name = Some("category".to_string());
        m.style = Some(Style {
            border_width: Some(1.0),
            ..Style::default()
        });
        let s = lower(&m);
        assert_eq!(s["type"], "pie");
        assert_eq!(s["encode"], json!({ "value": "amount", "itemName": "category" }));
        assert_eq!(s["itemStyle"], json!({ "borderWidth": 1.0 }));
    }

    #[test]
    fn test_encode_omitted_when_no_channel_set() {
        let mut m = Mark::new("m", "d1", Geometry::Scatter);
        m.encode.color = Some("group".to_string());
        let series = lower_mark(&m, &datasets(), &SeriesDefaults::default());
        assert!(series.encode.is_none());
        assert!(series.symbol_size.is_none());
    }

    #[test]
    fn test_scatter_size_channel_attaches_sizer() {
        let mut m = mark(Geometry::Scatter);
        m.encode.size = Some("population".to_string());
        let series = lower_mark(&m, &datasets(), &SeriesDefaults::default());
        let sizer = series.symbol_size.as_ref().unwrap();
        assert_eq!(sizer.name(), "sqrt");

        // Sizing never leaks into the serialized option
        let s = serde_json::to_value(&series).unwrap();
        assert!(s.get("symbolSize").is_none());
        assert_eq!(s["encode"], json!({ "x": "x", "y": "y" }));
    }

    #[test]
    fn test_scatter_style_is_item_style_only() {
        let mut m = mark(Geometry::Scatter);
        m.style = Some(full_style());
        m.smooth = Some(true);
        let s = lower(&m);
        assert_eq!(s["type"], "scatter");
        assert_eq!(
            s["itemStyle"],
            json!({ "color": "#5470c6", "opacity": 0.5, "borderColor": "#000", "borderWidth": 2.0 })
        );
        assert!(s.get("lineStyle").is_none());
        assert!(s.get("areaStyle").is_none());
        assert!(s.get("smooth").is_none());
    }

    #[test]
    fn test_empty_strings_are_treated_as_unset() {
        let mut m = mark(Geometry::Bar);
        m.name = Some(String::new());
        m.encode.y = Some(String::new());
        m.stack = Some(String::new());
        m.style = Some(Style {
            color: Some(String::new()),
            opacity: Some(0.0),
            ..Style::default()
        });
        let s = lower(&m);
        assert_eq!(s["name"], "m1");
        assert_eq!(s["encode"], json!({ "x": "x" }));
        assert!(s.get("stack").is_none());
        assert_eq!(s["itemStyle"], json!({ "opacity": 0.0 }));
    }
}
