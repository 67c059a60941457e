//! Runtime value representation
//!
//! This module defines the [`Value`] enum, the tagged snapshot of a lesson
//! variable that the call stack stores and the viewer renders. Values are
//! plain data: converting a live structure into a `Value` copies it.
//!
//! # Value Types
//!
//! - [`Value::Int`], [`Value::Bool`], [`Value::Str`]: scalars
//! - [`Value::Record`]: a named record with ordered fields
//! - [`Value::Array`]: fixed-size sequence
//! - [`Value::Slice`]: a view with a capacity and the id of its backing storage
//! - [`Value::Map`]: key/value pairs
//! - [`Value::Ref`]: a reference to another value
//! - [`Value::Nil`]: the absent value
//!
//! # Formatting
//!
//! `Display` uses the verbose value notation the lessons print:
//! `{Goku 15000 false}`, `[1 2 3]`, `map[a:1 b:2]`, `&{...}`, `<nil>`.
//! Map entries are printed with keys sorted so output is stable.

use std::fmt;

/// Identifier of a slice's backing storage
pub type Address = u64;

/// Runtime values in a lesson
#[derive(Debug, Clone, PartialEq, Default)]
pub enum Value {
    Int(i64),
    Bool(bool),
    Str(String),
    Record {
        type_name: String,
        fields: Vec<(String, Value)>,
    },
    Array(Vec<Value>),
    Slice {
        items: Vec<Value>,
        capacity: usize,
        storage: Address,
    },
    Map(Vec<(Value, Value)>),
    Ref(Box<Value>),
    #[default]
    Nil,
}

impl Value {
    /// Build a record value from field name/value pairs
    pub fn record<I, S>(type_name: &str, fields: I) -> Self
    where
        I: IntoIterator<Item = (S, Value)>,
        S: Into<String>,
    {
        Value::Record {
            type_name: type_name.to_string(),
            fields: fields.into_iter().map(|(k, v)| (k.into(), v)).collect(),
        }
    }

    /// Wrap this value in a reference
    pub fn by_ref(self) -> Self {
        Value::Ref(Box::new(self))
    }

    /// Look up a record field, following references
    pub fn field(&self, name: &str) -> Option<&Value> {
        match self {
            Value::Record { fields, .. } => fields.iter().find(|(k, _)| k == name).map(|(_, v)| v),
            Value::Ref(inner) => inner.field(name),
            _ => None,
        }
    }

    /// Short type label shown next to bindings in the viewer
    pub fn type_label(&self) -> String {
        match self {
            Value::Int(_) => "int".to_string(),
            Value::Bool(_) => "bool".to_string(),
            Value::Str(_) => "string".to_string(),
            Value::Record { type_name, .. } => type_name.clone(),
            Value::Array(items) => format!("[{}]", items.len()),
            Value::Slice { capacity, .. } => format!("[]cap={}", capacity),
            Value::Map(_) => "map".to_string(),
            Value::Ref(inner) => format!("*{}", inner.type_label()),
            Value::Nil => "nil".to_string(),
        }
    }
}

impl From<i64> for Value {
    fn from(n: i64) -> Self {
        Value::Int(n)
    }
}

impl From<i32> for Value {
    fn from(n: i32) -> Self {
        Value::Int(n as i64)
    }
}

impl From<usize> for Value {
    fn from(n: usize) -> Self {
        Value::Int(n as i64)
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Value::Bool(b)
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::Str(s.to_string())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::Str(s)
    }
}

fn write_spaced<'a, I>(f: &mut fmt::Formatter<'_>, items: I) -> fmt::Result
where
    I: IntoIterator<Item = &'a Value>,
{
    for (i, item) in items.into_iter().enumerate() {
        if i > 0 {
            write!(f, " ")?;
        }
        write!(f, "{}", item)?;
    }
    Ok(())
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Int(n) => write!(f, "{}", n),
            Value::Bool(b) => write!(f, "{}", b),
            Value::Str(s) => write!(f, "{}", s),
            Value::Record { fields, .. } => {
                write!(f, "{{")?;
                write_spaced(f, fields.iter().map(|(_, v)| v))?;
                write!(f, "}}")
            }
            Value::Array(items) | Value::Slice { items, .. } => {
                write!(f, "[")?;
                write_spaced(f, items)?;
                write!(f, "]")
            }
            Value::Map(entries) => {
                let mut sorted: Vec<(String, String)> = entries
                    .iter()
                    .map(|(k, v)| (k.to_string(), v.to_string()))
                    .collect();
                sorted.sort();
                write!(f, "map[")?;
                for (i, (k, v)) in sorted.iter().enumerate() {
                    if i > 0 {
                        write!(f, " ")?;
                    }
                    write!(f, "{}:{}", k, v)?;
                }
                write!(f, "]")
            }
            Value::Ref(inner) => write!(f, "&{}", inner),
            Value::Nil => write!(f, "<nil>"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn record_prints_fields_in_order() {
        let goku = Value::record(
            "SuperSaiyan",
            [
                ("Name", Value::from("Goku")),
                ("PowerLevel", Value::Int(15000)),
                ("Fusion", Value::Bool(false)),
            ],
        );
        assert_eq!(goku.to_string(), "{Goku 15000 false}");
        assert_eq!(goku.clone().by_ref().to_string(), "&{Goku 15000 false}");
        assert_eq!(goku.by_ref().field("PowerLevel"), Some(&Value::Int(15000)));
    }

    #[test]
    fn map_prints_sorted_keys() {
        let map = Value::Map(vec![
            (Value::from("goku"), Value::Int(9001)),
            (Value::from("gohan"), Value::Int(2044)),
        ]);
        assert_eq!(map.to_string(), "map[gohan:2044 goku:9001]");
    }

    #[test]
    fn sequences_and_nil() {
        let empty = Value::Slice {
            items: vec![],
            capacity: 0,
            storage: 0,
        };
        assert_eq!(empty.to_string(), "[]");
        assert_eq!(Value::Array(vec![Value::Int(1), Value::Int(2)]).to_string(), "[1 2]");
        assert_eq!(Value::Nil.to_string(), "<nil>");
    }
}
