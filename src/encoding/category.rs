use std::fmt;

use serde::{Deserialize, Serialize};

use crate::data::model::CellValue;

/// A category value as recorded by a fitted encoder.
///
/// The `Display` form is the exact text used in indicator column names, so it
/// follows the formatting the encoder's vocabulary was written with:
/// `8`, `8.0`, `True`, `nan`, text verbatim.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Category {
    Bool(bool),
    Int(i64),
    Float(f64),
    Text(String),
    Missing,
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Category::Bool(true) => f.write_str("True"),
            Category::Bool(false) => f.write_str("False"),
            Category::Int(i) => write!(f, "{i}"),
            Category::Float(v) if v.is_nan() => f.write_str("nan"),
            Category::Float(v) if v.is_infinite() => {
                f.write_str(if *v > 0.0 { "inf" } else { "-inf" })
            }
            Category::Float(v) if v.fract() == 0.0 && v.abs() < 1e16 => write!(f, "{v:.1}"),
            Category::Float(v) => write!(f, "{v}"),
            Category::Text(s) => f.write_str(s),
            Category::Missing => f.write_str("nan"),
        }
    }
}

impl Category {
    /// Whether a raw cell holds this category.
    ///
    /// Numbers compare by value across integer/float; text compares exactly
    /// (case-sensitive); a null or NaN cell only matches `Missing` or a NaN float.
    pub fn matches(&self, cell: &CellValue) -> bool {
        if let CellValue::Float(v) = cell {
            if v.is_nan() {
                return self.matches(&CellValue::Null);
            }
        }
        match (self, cell) {
            (Category::Text(a), CellValue::String(b) | CellValue::Date(b)) => a == b,
            (Category::Int(a), CellValue::Integer(b)) => a == b,
            (Category::Int(a), CellValue::Float(b)) => (*a as f64) == *b,
            (Category::Float(a), CellValue::Float(b)) => a == b,
            (Category::Float(a), CellValue::Integer(b)) => *a == (*b as f64),
            (Category::Bool(a), CellValue::Bool(b)) => a == b,
            (Category::Missing, CellValue::Null) => true,
            (Category::Float(a), CellValue::Null) => a.is_nan(),
            _ => false,
        }
    }
}

impl From<&Category> for CellValue {
    fn from(c: &Category) -> Self {
        match c {
            Category::Bool(b) => CellValue::Bool(*b),
            Category::Int(i) => CellValue::Integer(*i),
            Category::Float(v) => CellValue::Float(*v),
            Category::Text(s) => CellValue::String(s.clone()),
            Category::Missing => CellValue::Null,
        }
    }
}

/// Position of the first recorded category matching `cell`.
pub fn position_of(categories: &[Category], cell: &CellValue) -> Option<usize> {
    categories.iter().position(|c| c.matches(cell))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_deserialize_untagged() {
        let cats: Vec<Category> = serde_json::from_str(r#"["RED", 8, 8.0, true, null]"#).unwrap();
        assert_eq!(
            cats,
            vec![
                Category::Text("RED".into()),
                Category::Int(8),
                Category::Float(8.0),
                Category::Bool(true),
                Category::Missing,
            ]
        );
    }

    #[test]
    fn test_display_matches_vocabulary_formatting() {
        assert_eq!(Category::Int(8).to_string(), "8");
        assert_eq!(Category::Float(8.0).to_string(), "8.0");
        assert_eq!(Category::Float(0.25).to_string(), "0.25");
        assert_eq!(Category::Bool(false).to_string(), "False");
        assert_eq!(Category::Missing.to_string(), "nan");
        assert_eq!(Category::Text("Sí".into()).to_string(), "Sí");
    }

    #[test]
    fn test_matches_across_numeric_types() {
        assert!(Category::Int(8).matches(&CellValue::Float(8.0)));
        assert!(Category::Float(9.0).matches(&CellValue::Integer(9)));
        assert!(!Category::Text("8".into()).matches(&CellValue::Integer(8)));
        assert!(!Category::Text("m".into()).matches(&CellValue::String("M".into())));
        assert!(Category::Missing.matches(&CellValue::Null));
    }

    #[test]
    fn test_nan_cells_match_missing_categories() {
        let nan = CellValue::Float(f64::NAN);
        assert!(Category::Missing.matches(&nan));
        assert!(Category::Float(f64::NAN).matches(&nan));
        assert!(!Category::Float(1.0).matches(&nan));
        assert!(Category::Missing.matches(&CellValue::guess("NaN")));
    }

    #[test]
    fn test_position_of() {
        let cats = vec![Category::Text("HIGH".into()), Category::Text("LOW".into())];
        assert_eq!(position_of(&cats, &CellValue::String("LOW".into())), Some(1));
        assert_eq!(position_of(&cats, &CellValue::String("MID".into())), None);
    }
}
