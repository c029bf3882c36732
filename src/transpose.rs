// src/transpose.rs

use serde_json::Value;
use std::collections::BTreeMap;

use crate::sheets::types::Grid;

/// One data row keyed by header name. `None` marks a header column the row
/// had no cell for; it serializes as `null` so the key stays present.
pub type Record = BTreeMap<String, Option<Value>>;

/// Turn a grid into records, using row 0 as field names.
///
/// An absent or empty grid gives no records. Rows shorter than the header
/// yield `None` for the missing columns, extra cells past the header are
/// dropped, and a later duplicate header overwrites an earlier one.
pub fn transpose(grid: Option<&Grid>) -> Vec<Record> {
    let Some((header, rows)) = grid.and_then(|g| g.split_first()) else {
        return Vec::new();
    };

    let keys: Vec<String> = header.iter().map(field_name).collect();

    rows.iter()
        .map(|row| {
            keys.iter()
                .enumerate()
                .map(|(idx, key)| (key.clone(), row.get(idx).cloned()))
                .collect()
        })
        .collect()
}

/// Header cells become keys by their text; non-strings use their JSON form.
fn field_name(cell: &Value) -> String {
    match cell {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn grid(v: Value) -> Grid {
        serde_json::from_value(v).unwrap()
    }

    #[test]
    fn test_absent_and_empty() {
        assert!(transpose(None).is_empty());
        assert!(transpose(Some(&Vec::new())).is_empty());
    }

    #[test]
    fn test_header_only() {
        let g = grid(json!([["name", "age"]]));
        assert!(transpose(Some(&g)).is_empty());
    }

    #[test]
    fn test_short_row_keeps_key() {
        let g = grid(json!([["name", "age"], ["Ann", "30"], ["Bo"]]));
        let records = transpose(Some(&g));

        assert_eq!(records.len(), 2);
        assert_eq!(records[0]["name"], Some(json!("Ann")));
        assert_eq!(records[0]["age"], Some(json!("30")));
        assert_eq!(records[1]["name"], Some(json!("Bo")));
        assert!(records[1].contains_key("age"));
        assert_eq!(records[1]["age"], None);

        assert_eq!(
            serde_json::to_value(&records).unwrap(),
            json!([{"name": "Ann", "age": "30"}, {"name": "Bo", "age": null}])
        );
    }

    #[test]
    fn test_long_row_is_truncated() {
        let g = grid(json!([["a"], [1, 2, 3]]));
        let records = transpose(Some(&g));
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].len(), 1);
        assert_eq!(records[0]["a"], Some(json!(1)));
    }

    #[test]
    fn test_empty_header_drops_data() {
        let g = grid(json!([[], ["x", "y"], ["z"]]));
        let records = transpose(Some(&g));
        assert_eq!(records.len(), 2);
        assert!(records.iter().all(|r| r.is_empty()));
    }

    #[test]
    fn test_duplicate_header_last_wins() {
        let g = grid(json!([["k", "k"], ["first", "second"]]));
        let records = transpose(Some(&g));
        assert_eq!(records[0].len(), 1);
        assert_eq!(records[0]["k"], Some(json!("second")));
    }

    #[test]
    fn test_values_pass_through() {
        let g = grid(json!([
            ["s", "n", "b", "blank"],
            ["  padded ", 4.5, true, ""]
        ]));
        let records = transpose(Some(&g));
        assert_eq!(records[0]["s"], Some(json!("  padded ")));
        assert_eq!(records[0]["n"], Some(json!(4.5)));
        assert_eq!(records[0]["b"], Some(json!(true)));
        assert_eq!(records[0]["blank"], Some(json!("")));
    }

    #[test]
    fn test_non_string_headers() {
        let g = grid(json!([[2024, false], ["a", "b"]]));
        let records = transpose(Some(&g));
        assert_eq!(records[0]["2024"], Some(json!("a")));
        assert_eq!(records[0]["false"], Some(json!("b")));
    }

    #[test]
    fn test_record_count_and_idempotence() {
        let g = grid(json!([["h"], ["1"], ["2"], [], ["4"]]));
        let first = transpose(Some(&g));
        let second = transpose(Some(&g));
        assert_eq!(first.len(), g.len() - 1);
        assert_eq!(first, second);
        assert_eq!(first[2]["h"], None);
    }
}
