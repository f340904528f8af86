use crate::ir::Grid;
use crate::option::GridOption;

/// Copy every field that is present. Presence is explicit: an empty string is
/// still a value and is passed through.
pub fn lower_grid(grid: &Grid) -> GridOption {
    GridOption {
        left: grid.left.clone(),
        right: grid.right.clone(),
        top: grid.top.clone(),
        bottom: grid.bottom.clone(),
        width: grid.width.clone(),
        height: grid.height.clone(),
        contain_label: grid.contain_label,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_present_fields_only() {
        let grid = Grid {
            left: Some("10%".to_string()),
            bottom: Some("0".to_string()),
            contain_label: Some(false),
            ..Grid::default()
        };
        assert_eq!(
            serde_json::to_value(lower_grid(&grid)).unwrap(),
            json!({ "left": "10%", "bottom": "0", "containLabel": false })
        );
    }

    #[test]
    fn test_empty_string_is_present() {
        let grid = Grid {
            width: Some(String::new()),
            ..Grid::default()
        };
        assert_eq!(
            serde_json::to_value(lower_grid(&grid)).unwrap(),
            json!({ "width": "" })
        );
    }
}
