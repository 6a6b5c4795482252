//! Closed registry of supported parameter value classes.

use serde::{Deserialize, Serialize};
use strum::{AsRefStr, EnumIter, EnumString, IntoStaticStr};

/// Value classes a report parameter may declare.
///
/// Report definitions name classes by their fully qualified name; anything not
/// listed here is rejected when a template is uploaded.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[derive(Serialize, Deserialize, AsRefStr, IntoStaticStr, EnumString, EnumIter)]
#[serde(into = "&'static str", try_from = "String")]
pub enum ParameterValueType {
    #[strum(serialize = "java.lang.String")]
    String,
    #[strum(serialize = "java.lang.Boolean")]
    Boolean,
    #[strum(serialize = "java.lang.Byte")]
    Byte,
    #[strum(serialize = "java.lang.Short")]
    Short,
    #[strum(serialize = "java.lang.Integer")]
    Integer,
    #[strum(serialize = "java.lang.Long")]
    Long,
    #[strum(serialize = "java.lang.Float")]
    Float,
    #[strum(serialize = "java.lang.Double")]
    Double,
    #[strum(serialize = "java.lang.Number")]
    Number,
    #[strum(serialize = "java.math.BigDecimal")]
    BigDecimal,
    #[strum(serialize = "java.math.BigInteger")]
    BigInteger,
    #[strum(serialize = "java.util.Date")]
    Date,
    #[strum(serialize = "java.sql.Date")]
    SqlDate,
    #[strum(serialize = "java.sql.Time")]
    SqlTime,
    #[strum(serialize = "java.sql.Timestamp")]
    SqlTimestamp,
    #[strum(serialize = "java.time.LocalDate")]
    LocalDate,
    #[strum(serialize = "java.time.LocalDateTime")]
    LocalDateTime,
    #[strum(serialize = "java.time.ZonedDateTime")]
    ZonedDateTime,
    #[strum(serialize = "java.util.UUID")]
    Uuid,
    #[strum(serialize = "java.util.List")]
    List,
    #[strum(serialize = "java.util.Collection")]
    Collection,
    #[strum(serialize = "java.util.Map")]
    Map,
    #[strum(serialize = "java.lang.Object")]
    Object,
}

impl ParameterValueType {
    /// Resolves a declared class name, ignoring surrounding whitespace.
    pub fn resolve(class_name: &str) -> Option<Self> {
        class_name.trim().parse().ok()
    }

    /// Returns the fully qualified class name.
    #[inline]
    pub fn class_name(self) -> &'static str {
        self.into()
    }

    /// Returns whether values are numeric.
    pub fn is_numeric(self) -> bool {
        matches!(
            self,
            Self::Byte
                | Self::Short
                | Self::Integer
                | Self::Long
                | Self::Float
                | Self::Double
                | Self::Number
                | Self::BigDecimal
                | Self::BigInteger
        )
    }

    /// Returns whether values are dates or times.
    pub fn is_temporal(self) -> bool {
        matches!(
            self,
            Self::Date
                | Self::SqlDate
                | Self::SqlTime
                | Self::SqlTimestamp
                | Self::LocalDate
                | Self::LocalDateTime
                | Self::ZonedDateTime
        )
    }

    /// Returns whether a parameter of this type accepts several values.
    pub fn is_multi_valued(self) -> bool {
        matches!(self, Self::List | Self::Collection)
    }
}

impl TryFrom<String> for ParameterValueType {
    type Error = strum::ParseError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

#[cfg(test)]
mod tests {
    use strum::IntoEnumIterator;

    use super::*;

    #[test]
    fn resolves_fully_qualified_names() {
        assert_eq!(
            ParameterValueType::resolve("java.lang.String"),
            Some(ParameterValueType::String)
        );
        assert_eq!(
            ParameterValueType::resolve(" java.util.UUID "),
            Some(ParameterValueType::Uuid)
        );
    }

    #[test]
    fn rejects_unknown_names() {
        assert_eq!(ParameterValueType::resolve("java.lang.Strin"), None);
        assert_eq!(ParameterValueType::resolve("String"), None);
        assert_eq!(ParameterValueType::resolve("com.example.Missing"), None);
    }

    #[test]
    fn class_names_round_trip() {
        for value_type in ParameterValueType::iter() {
            assert_eq!(
                ParameterValueType::resolve(value_type.class_name()),
                Some(value_type)
            );
        }
    }

    #[test]
    fn classifies_types() {
        assert!(ParameterValueType::BigDecimal.is_numeric());
        assert!(ParameterValueType::SqlTimestamp.is_temporal());
        assert!(ParameterValueType::List.is_multi_valued());
        assert!(!ParameterValueType::String.is_numeric());
    }
}
