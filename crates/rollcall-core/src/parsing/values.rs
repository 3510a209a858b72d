use crate::model::CellValue;

/// Read an attendance cell as a percentage.
///
/// Handles formats like:
/// - "95%" -> 95.0
/// - " 95 , " -> 95.0 (`%` and `,` are stripped anywhere in the text)
/// - "1,000" -> 1000.0
/// - 95.0 (numeric cell) -> 95.0
///
/// Anything else (blank, boolean, "absent") is `None`.
pub fn parse_percentage(cell: &CellValue) -> Option<f64> {
    match cell {
        CellValue::Number(n) => Some(*n),
        CellValue::Text(s) => {
            let stripped: String = s.chars().filter(|c| *c != '%' && *c != ',').collect();
            stripped.trim().parse::<f64>().ok()
        }
        CellValue::Empty | CellValue::Bool(_) => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_percent_sign() {
        assert_eq!(parse_percentage(&"95%".into()), Some(95.0));
    }

    #[test]
    fn test_plain_decimal() {
        assert_eq!(parse_percentage(&"95.0".into()), Some(95.0));
    }

    #[test]
    fn test_numeric_cell() {
        assert_eq!(parse_percentage(&CellValue::Number(95.0)), Some(95.0));
    }

    #[test]
    fn test_comma_and_whitespace() {
        assert_eq!(parse_percentage(&" 95 , ".into()), Some(95.0));
        assert_eq!(parse_percentage(&"1,000".into()), Some(1000.0));
    }

    #[test]
    fn test_non_numeric_is_none() {
        assert_eq!(parse_percentage(&"absent".into()), None);
        assert_eq!(parse_percentage(&"".into()), None);
        assert_eq!(parse_percentage(&"%".into()), None);
        assert_eq!(parse_percentage(&CellValue::Empty), None);
        assert_eq!(parse_percentage(&CellValue::Bool(true)), None);
    }

    #[test]
    fn test_inner_space_is_not_stripped() {
        assert_eq!(parse_percentage(&"9 5".into()), None);
    }
}
