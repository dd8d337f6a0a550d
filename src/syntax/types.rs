//! The structural type tree.

use super::parser::parse_type_exact;
use crate::error::TypeError;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

/// A structural type as written in annotations and declarations.
///
/// Every variant except [`Type::Named`] owns a strictly smaller component, so
/// the tree is always finite.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Type {
    /// A bare type name such as `int` or `Store`.
    Named(String),
    /// `[]T`
    Array(Box<Type>),
    /// `chan T`
    Channel(Box<Type>),
    /// `map[K]V`
    Map(Box<Type>, Box<Type>),
    /// `*T`
    Pointer(Box<Type>),
    /// `pkg.T`
    Qualified(String, Box<Type>),
}

impl Type {
    /// A bare named type.
    pub fn named(name: impl Into<String>) -> Self {
        Type::Named(name.into())
    }

    /// An array of `element`.
    pub fn array(element: Type) -> Self {
        Type::Array(Box::new(element))
    }

    /// A channel of `element`.
    pub fn channel(element: Type) -> Self {
        Type::Channel(Box::new(element))
    }

    /// A map from `key` to `value`.
    pub fn map(key: Type, value: Type) -> Self {
        Type::Map(Box::new(key), Box::new(value))
    }

    /// A pointer to `target`.
    pub fn pointer(target: Type) -> Self {
        Type::Pointer(Box::new(target))
    }

    /// `name` qualified by `namespace`.
    pub fn qualified(namespace: impl Into<String>, name: impl Into<String>) -> Self {
        Type::Qualified(namespace.into(), Box::new(Type::Named(name.into())))
    }

    /// Canonical rendering used as the generator/comparator lookup key.
    ///
    /// `[](t)`, `chan (t)`, `map[k](v)`, `*(t)`, `p.t`, or the bare name.
    /// The rendering is also valid host-language type syntax.
    pub fn render(&self) -> String {
        let mut out = String::new();
        self.render_into(&mut out);
        out
    }

    fn render_into(&self, out: &mut String) {
        match self {
            Type::Named(name) => out.push_str(name),
            Type::Array(element) => {
                out.push_str("[](");
                element.render_into(out);
                out.push(')');
            }
            Type::Channel(element) => {
                out.push_str("chan (");
                element.render_into(out);
                out.push(')');
            }
            Type::Map(key, value) => {
                out.push_str("map[");
                key.render_into(out);
                out.push_str("](");
                value.render_into(out);
                out.push(')');
            }
            Type::Pointer(target) => {
                out.push_str("*(");
                target.render_into(out);
                out.push(')');
            }
            Type::Qualified(namespace, inner) => {
                out.push_str(namespace);
                out.push('.');
                inner.render_into(out);
            }
        }
    }
}

impl fmt::Display for Type {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.render())
    }
}

impl FromStr for Type {
    type Err = TypeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse_type_exact(s)
    }
}

impl Serialize for Type {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.render())
    }
}

impl<'de> Deserialize<'de> for Type {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}
