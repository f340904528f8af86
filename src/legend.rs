use crate::ir::{Legend, LegendPosition, Mark};
use crate::option::{LegendOption, Orient};

/// Lower the legend block.
///
/// Authored items are used verbatim. Without them, one label per mark is derived
/// in declaration order so every series stays labelled.
pub fn lower_legend(legend: &Legend, marks: &[Mark]) -> LegendOption {
    let mut result = LegendOption {
        show: legend.show,
        ..LegendOption::default()
    };

    if let Some(position) = legend.position {
        let anchor = Some(position.as_str().to_string());
        match position {
            LegendPosition::Top => {
                result.top = anchor;
                result.orient = Some(Orient::Horizontal);
            }
            LegendPosition::Bottom => {
                result.bottom = anchor;
                result.orient = Some(Orient::Horizontal);
            }
            LegendPosition::Left => {
                result.left = anchor;
                result.orient = Some(Orient::Vertical);
            }
            LegendPosition::Right => {
                result.right = anchor;
                result.orient = Some(Orient::Vertical);
            }
        }
    }

    result.data = match &legend.items {
        Some(items) if !items.is_empty() => items.clone(),
        _ => marks.iter().map(|m| m.display_name().to_string()).collect(),
    };

    result
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ir::Geometry;
    use serde_json::json;

    fn marks() -> Vec<Mark> {
        let m1 = Mark::new("m1", "d1", Geometry::Line);
        let mut m2 = Mark::new("m2", "d1", Geometry::Bar);
        m2.name = Some("Profit".to_string());
        vec![m1, m2]
    }

    #[test]
    fn test_items_derived_from_marks() {
        let lowered = lower_legend(&Legend::default(), &marks());
        assert_eq!(lowered.data, vec!["m1", "Profit"]);
        assert_eq!(serde_json::to_value(&lowered).unwrap(), json!({ "data": ["m1", "Profit"] }));
    }

    #[test]
    fn test_empty_items_also_derive() {
        let legend = Legend {
            items: Some(vec![]),
            ..Legend::default()
        };
        assert_eq!(lower_legend(&legend, &marks()).data, vec!["m1", "Profit"]);
    }

    #[test]
    fn test_authored_items_win() {
        let legend = Legend {
            items: Some(vec!["Profit".to_string(), "Other".to_string()]),
            ..Legend::default()
        };
        assert_eq!(lower_legend(&legend, &marks()).data, vec!["Profit", "Other"]);
    }

    #[test]
    fn test_position_table() {
        let cases = [
            (LegendPosition::Top, json!({ "top": "top", "orient": "horizontal", "data": [] })),
            (
                LegendPosition::Bottom,
                json!({ "bottom": "bottom", "orient": "horizontal", "data": [] }),
            ),
            (LegendPosition::Left, json!({ "left": "left", "orient": "vertical", "data": [] })),
            (LegendPosition::Right, json!({ "right": "right", "orient": "vertical", "data": [] })),
        ];
        for (position, expected) in cases {
            let legend = Legend {
                position: Some(position),
                ..Legend::default()
            };
            assert_eq!(serde_json::to_value(lower_legend(&legend, &[])).unwrap(), expected);
        }
    }

    #[test]
    fn test_show_false_is_copied() {
        let legend = Legend {
            show: Some(false),
            ..Legend::default()
        };
        assert_eq!(lower_legend(&legend, &marks()).show, Some(false));
    }
}
