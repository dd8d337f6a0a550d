//! Interface declarations as delivered by the upstream declaration extractor.

use crate::syntax::Type;
use serde::{Deserialize, Serialize};

/// A method (or free function) name with its parameter and return types.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MethodSignature {
    /// Method name.
    pub name: String,
    /// Parameter types in declaration order.
    #[serde(default)]
    pub params: Vec<Type>,
    /// Return types in declaration order.
    #[serde(default)]
    pub returns: Vec<Type>,
}

impl MethodSignature {
    /// Create a signature.
    pub fn new(name: impl Into<String>, params: Vec<Type>, returns: Vec<Type>) -> Self {
        Self {
            name: name.into(),
            params,
            returns,
        }
    }
}

/// A named interface: an ordered set of method signatures.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InterfaceDeclaration {
    /// Interface name.
    pub name: String,
    /// Methods in declaration order.
    #[serde(default)]
    pub methods: Vec<MethodSignature>,
}

impl InterfaceDeclaration {
    /// Create a declaration.
    pub fn new(name: impl Into<String>, methods: Vec<MethodSignature>) -> Self {
        Self {
            name: name.into(),
            methods,
        }
    }
}
