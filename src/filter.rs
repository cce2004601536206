//! Label filter expressions for multi-series queries
//!
//! `TS.MGET`, `TS.MRANGE`, `TS.MREVRANGE` and `TS.QUERYINDEX` select series by
//! label. Each filter renders to one `FILTER` argument:
//!
//! | Filter                    | Wire form       |
//! |---------------------------|-----------------|
//! | `Eq("a", "1")`            | `a=1`           |
//! | `NotEq("a", "1")`         | `a!=1`          |
//! | `Exists("a")`             | `a!=`           |
//! | `Missing("a")`            | `a=`            |
//! | `In("a", ["1", "2"])`     | `a=(1,2)`       |
//! | `NotIn("a", ["1", "2"])`  | `a!=(1,2)`      |

use std::fmt;

/// A single label predicate
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Filter {
    /// Label equals value
    Eq(String, String),
    /// Label differs from value (or is absent)
    NotEq(String, String),
    /// Label is present with any value
    Exists(String),
    /// Label is absent
    Missing(String),
    /// Label equals one of the values
    In(String, Vec<String>),
    /// Label equals none of the values
    NotIn(String, Vec<String>),
    /// Pre-rendered expression, passed through unchanged
    Raw(String),
}

impl Filter {
    /// `label=value`
    pub fn eq(label: impl Into<String>, value: impl Into<String>) -> Self {
        Filter::Eq(label.into(), value.into())
    }

    /// `label!=value`
    pub fn not_eq(label: impl Into<String>, value: impl Into<String>) -> Self {
        Filter::NotEq(label.into(), value.into())
    }

    /// `label!=`
    pub fn exists(label: impl Into<String>) -> Self {
        Filter::Exists(label.into())
    }

    /// `label=`
    pub fn missing(label: impl Into<String>) -> Self {
        Filter::Missing(label.into())
    }

    /// `label=(v1,v2,...)`
    pub fn any_of<I, S>(label: impl Into<String>, values: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Filter::In(label.into(), values.into_iter().map(Into::into).collect())
    }

    /// `label!=(v1,v2,...)`
    pub fn none_of<I, S>(label: impl Into<String>, values: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Filter::NotIn(label.into(), values.into_iter().map(Into::into).collect())
    }

    /// An expression already in wire form
    pub fn raw(expression: impl Into<String>) -> Self {
        Filter::Raw(expression.into())
    }

    /// The rendered `FILTER` argument
    pub fn to_arg(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for Filter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Filter::Eq(label, value) => write!(f, "{}={}", label, value),
            Filter::NotEq(label, value) => write!(f, "{}!={}", label, value),
            Filter::Exists(label) => write!(f, "{}!=", label),
            Filter::Missing(label) => write!(f, "{}=", label),
            Filter::In(label, values) => write!(f, "{}=({})", label, values.join(",")),
            Filter::NotIn(label, values) => write!(f, "{}!=({})", label, values.join(",")),
            Filter::Raw(expression) => f.write_str(expression),
        }
    }
}

impl From<&str> for Filter {
    fn from(expression: &str) -> Self {
        Filter::raw(expression)
    }
}

impl From<String> for Filter {
    fn from(expression: String) -> Self {
        Filter::Raw(expression)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_filter_rendering() {
        assert_eq!(Filter::eq("host", "a").to_arg(), "host=a");
        assert_eq!(Filter::not_eq("host", "a").to_arg(), "host!=a");
        assert_eq!(Filter::exists("region").to_arg(), "region!=");
        assert_eq!(Filter::missing("region").to_arg(), "region=");
        assert_eq!(Filter::any_of("dc", ["eu", "us"]).to_arg(), "dc=(eu,us)");
        assert_eq!(Filter::none_of("dc", vec!["ap"]).to_arg(), "dc!=(ap)");
        assert_eq!(Filter::from("x=y").to_arg(), "x=y");
    }
}
