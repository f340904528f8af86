use anyhow::{anyhow, Result};
use serde_json::Value;

use crate::ir::{Column, ColumnType, Dataset};
use crate::option::{Cell, DatasetOption};

/// Lower a dataset into the renderer's columnar form.
///
/// Cells are coerced by the type of the column at the same position. The row is
/// iterated, not the column list: short rows yield fewer cells, and cells past
/// the last column have no type and pass through as strings.
pub fn lower_dataset(dataset: &Dataset) -> DatasetOption {
    let dimensions = dataset.columns.iter().map(|c| c.name.clone()).collect();

    let source = dataset
        .rows
        .iter()
        .map(|row| {
            row.iter()
                .enumerate()
                .map(|(i, raw)| lower_cell(raw, dataset.columns.get(i).map(|c| c.column_type)))
                .collect()
        })
        .collect();

    DatasetOption {
        id: dataset.id.clone(),
        dimensions,
        source,
    }
}

/// Coerce one raw cell. `""` is null in every column; an unparseable number is null.
pub fn lower_cell(raw: &str, column_type: Option<ColumnType>) -> Cell {
    if raw.is_empty() {
        return Cell::Null;
    }
    match column_type {
        Some(ColumnType::Number) => parse_number(raw).map_or(Cell::Null, Cell::Number),
        Some(ColumnType::String) | None => Cell::Text(raw.to_string()),
    }
}

/// Lenient float parsing: leading whitespace is skipped and the longest decimal
/// literal prefix is read, so `"12px"` is 12. Returns `None` when no digits lead
/// the string or the value is not finite.
pub fn parse_number(raw: &str) -> Option<f64> {
    let s = raw.trim_start();
    let bytes = s.as_bytes();
    let len = bytes.len();
    let scan_digits = |mut i: usize| {
        while i < len && bytes[i].is_ascii_digit() {
            i += 1;
        }
        i
    };

    let mut end = 0;
    if matches!(bytes.first(), Some(b'+' | b'-')) {
        end = 1;
    }

    let int_end = scan_digits(end);
    let mut digits = int_end - end;
    end = int_end;

    if end < len && bytes[end] == b'.' {
        let frac_end = scan_digits(end + 1);
        digits += frac_end - (end + 1);
        end = frac_end;
    }

    if digits == 0 {
        return None;
    }

    // Exponent only counts when it has at least one digit
    if end < len && matches!(bytes[end], b'e' | b'E') {
        let mut exp = end + 1;
        if exp < len && matches!(bytes[exp], b'+' | b'-') {
            exp += 1;
        }
        let exp_end = scan_digits(exp);
        if exp_end > exp {
            end = exp_end;
        }
    }

    s[..end].parse::<f64>().ok().filter(|v| v.is_finite())
}

impl Dataset {
    /// Build a dataset from a JSON array of objects.
    ///
    /// Headers come from the first object's keys. Every value is stored as a
    /// string (`null` or a missing key becomes `""`). A column is typed `number`
    /// when all of its non-null values are JSON numbers.
    pub fn from_records(id: impl Into<String>, value: &Value) -> Result<Self> {
        let array = value
            .as_array()
            .ok_or_else(|| anyhow!("Input data must be a JSON array of objects"))?;

        if array.is_empty() {
            return Err(anyhow!("Input data array is empty"));
        }

        let first_obj = array[0]
            .as_object()
            .ok_or_else(|| anyhow!("Items in array must be objects"))?;

        let headers: Vec<String> = first_obj.keys().cloned().collect();
        let mut numeric = vec![true; headers.len()];
        let mut seen = vec![false; headers.len()];

        let mut rows = Vec::with_capacity(array.len());
        for (index, item) in array.iter().enumerate() {
            let obj = item
                .as_object()
                .ok_or_else(|| anyhow!("Item {} in array is not an object", index))?;

            let mut row = Vec::with_capacity(headers.len());
            for (col, header) in headers.iter().enumerate() {
                let val_str = match obj.get(header) {
                    Some(Value::String(s)) => {
                        numeric[col] = false;
                        seen[col] = true;
                        s.clone()
                    }
                    Some(Value::Number(n)) => {
                        seen[col] = true;
                        n.to_string()
                    }
                    Some(Value::Bool(b)) => {
                        numeric[col] = false;
                        seen[col] = true;
                        b.to_string()
                    }
                    Some(Value::Null) | None => String::new(),
                    _ => {
                        return Err(anyhow!(
                            "Unsupported value type for field '{}' in item {}",
                            header,
                            index
                        ))
                    }
                };
                row.push(val_str);
            }
            rows.push(row);
        }

        let columns = headers
            .into_iter()
            .enumerate()
            .map(|(col, name)| {
                let column_type = if numeric[col] && seen[col] {
                    ColumnType::Number
                } else {
                    ColumnType::String
                };
                Column::new(name, column_type)
            })
            .collect();

        Ok(Self {
            id: id.into(),
            columns,
            rows,
        })
    }
}
