use serde::{Deserialize, Serialize};

/// A scalar value bound to a placeholder or inlined into a collection literal.
///
/// Deserializes from plain JSON values: `null`, booleans, integers, floats
/// and strings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Scalar {
    /// NULL value
    Null,
    /// Boolean
    Bool(bool),
    /// Integer
    Int(i64),
    /// Float
    Float(f64),
    /// String
    String(String),
}

impl Scalar {
    /// Whether the runtime kind is a string (quoted when rendered).
    pub fn is_string(&self) -> bool {
        matches!(self, Scalar::String(_))
    }

    /// Render as CQL literal text.
    ///
    /// Strings are wrapped in single quotes with no escaping of embedded
    /// quotes, so untrusted input must never reach this path.
    pub fn to_literal(&self) -> String {
        self.to_string()
    }

    /// Interpret a loosely typed textual value, as typed on a command line.
    ///
    /// Integers, floats, `true`/`false` and `null` are recognized; anything
    /// else is a string.
    pub fn parse_loose(raw: &str) -> Self {
        if let Ok(n) = raw.parse::<i64>() {
            Scalar::Int(n)
        } else if let Ok(f) = raw.parse::<f64>() {
            Scalar::Float(f)
        } else if raw == "true" {
            Scalar::Bool(true)
        } else if raw == "false" {
            Scalar::Bool(false)
        } else if raw == "null" {
            Scalar::Null
        } else {
            Scalar::String(raw.to_string())
        }
    }
}

impl std::fmt::Display for Scalar {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Scalar::Null => write!(f, "null"),
            Scalar::Bool(b) => write!(f, "{}", b),
            Scalar::Int(n) => write!(f, "{}", n),
            Scalar::Float(n) => write!(f, "{}", n),
            Scalar::String(s) => write!(f, "'{}'", s),
        }
    }
}

impl From<bool> for Scalar {
    fn from(b: bool) -> Self {
        Scalar::Bool(b)
    }
}

impl From<i32> for Scalar {
    fn from(n: i32) -> Self {
        Scalar::Int(n as i64)
    }
}

impl From<i64> for Scalar {
    fn from(n: i64) -> Self {
        Scalar::Int(n)
    }
}

impl From<u32> for Scalar {
    fn from(n: u32) -> Self {
        Scalar::Int(n as i64)
    }
}

impl From<f64> for Scalar {
    fn from(n: f64) -> Self {
        Scalar::Float(n)
    }
}

impl From<&str> for Scalar {
    fn from(s: &str) -> Self {
        Scalar::String(s.to_string())
    }
}

impl From<String> for Scalar {
    fn from(s: String) -> Self {
        Scalar::String(s)
    }
}

impl<T: Into<Scalar>> From<Option<T>> for Scalar {
    fn from(opt: Option<T>) -> Self {
        match opt {
            Some(v) => v.into(),
            None => Scalar::Null,
        }
    }
}
