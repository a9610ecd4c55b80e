//! cellsheet_engine - Formula language for the Cellsheet spreadsheet.

pub mod engine;

#[cfg(test)]
mod tests {
    use crate::engine::*;
    use std::collections::HashMap;

    #[test]
    fn test_parse_single_letter_columns() {
        let a1 = CellId::parse("A1").unwrap();
        assert_eq!(a1.row, 0);
        assert_eq!(a1.col, 0);

        let z1 = CellId::parse("Z1").unwrap();
        assert_eq!(z1.col, 25);

        let b12 = CellId::parse("B12").unwrap();
        assert_eq!(b12.col, 1);
        assert_eq!(b12.row, 11);
    }

    #[test]
    fn test_parse_invalid_inputs() {
        assert!(CellId::parse("").is_none());
        assert!(CellId::parse("123").is_none());
        assert!(CellId::parse("ABC").is_none());
        assert!(CellId::parse("1A").is_none());
        assert!(CellId::parse("A 1").is_none());
        assert!(CellId::parse("a1").is_none());
    }

    #[test]
    fn test_display_round_trips() {
        for id in ["A1", "B12", "Z100"] {
            assert_eq!(CellId::parse(id).unwrap().to_string(), id);
        }
    }

    #[test]
    fn test_formula_over_stored_values() {
        struct Values(HashMap<CellId, StoredValue>);

        impl CellLookup for Values {
            fn number_at(&self, id: CellId) -> Option<f64> {
                self.0.get(&id).and_then(StoredValue::numeric_value)
            }
        }

        let mut values = HashMap::new();
        values.insert(CellId::parse("A1").unwrap(), StoredValue::text("4"));
        values.insert(CellId::parse("A2").unwrap(), StoredValue::text("word"));
        values.insert(
            CellId::parse("A3").unwrap(),
            StoredValue::Formula {
                source: "1/0".to_string(),
                result: Computed::Error,
            },
        );
        values.insert(
            CellId::parse("B1").unwrap(),
            StoredValue::Formula {
                source: "A1*2".to_string(),
                result: Computed::Number(8.0),
            },
        );
        let values = Values(values);

        assert_eq!(evaluate_formula("A1+A2+A3", &values), Computed::Number(4.0));
        assert_eq!(evaluate_formula("SUM(A1:B3)", &values), Computed::Number(12.0));
        assert_eq!(evaluate_formula("B1/A1", &values).display(), "2");
    }
}
