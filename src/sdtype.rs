use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::SchemaError;

/// Semantic type inferred for a column.
///
/// This is the meaning of the data, not its storage: a text column holding
/// `"yes"`/`"no"` is [`SemanticType::Boolean`], a numeric column with a
/// handful of distinct codes is [`SemanticType::Categorical`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SemanticType {
    /// Two-valued flags (true/false, yes/no, 0/1).
    Boolean,
    /// Calendar dates or timestamps.
    Datetime,
    /// Continuous or high-cardinality numbers.
    Numerical,
    /// Small bounded set of distinct values.
    Categorical,
    /// Structured JSON documents.
    Dynamic,
    /// Free text (fallback type).
    #[default]
    String,
}

impl SemanticType {
    /// Number of variants in the taxonomy.
    pub const COUNT: usize = 6;

    /// All variants in detection-rule order.
    pub const ALL: [SemanticType; Self::COUNT] = [
        SemanticType::Boolean,
        SemanticType::Datetime,
        SemanticType::Numerical,
        SemanticType::Categorical,
        SemanticType::Dynamic,
        SemanticType::String,
    ];

    /// Returns the serialized tag (`"boolean"`, `"datetime"`, ...).
    pub const fn as_str(&self) -> &'static str {
        match self {
            SemanticType::Boolean => "boolean",
            SemanticType::Datetime => "datetime",
            SemanticType::Numerical => "numerical",
            SemanticType::Categorical => "categorical",
            SemanticType::Dynamic => "dynamic",
            SemanticType::String => "string",
        }
    }

    /// Returns true if columns of this type may carry a `datetime_format`.
    #[inline]
    pub fn is_temporal(&self) -> bool {
        matches!(self, SemanticType::Datetime)
    }
}

impl fmt::Display for SemanticType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SemanticType {
    type Err = SchemaError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        SemanticType::ALL
            .into_iter()
            .find(|t| t.as_str() == s)
            .ok_or_else(|| SchemaError::InvalidInput(format!("unknown semantic type: {s}")))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_matches_serde_tag() {
        for sdtype in SemanticType::ALL {
            let json = serde_json::to_string(&sdtype).unwrap();
            assert_eq!(json, format!("\"{sdtype}\""));
        }
    }

    #[test]
    fn test_from_str() {
        assert_eq!("dynamic".parse::<SemanticType>().unwrap(), SemanticType::Dynamic);
        assert_eq!("string".parse::<SemanticType>().unwrap(), SemanticType::String);
        assert!("Boolean".parse::<SemanticType>().is_err());
    }

    #[test]
    fn test_default_is_string() {
        assert_eq!(SemanticType::default(), SemanticType::String);
        assert!(SemanticType::Datetime.is_temporal());
        assert!(!SemanticType::Numerical.is_temporal());
    }
}
