use serde::{Deserialize, Serialize};
use std::fmt;

///
/// Value
///
/// Scalar value carried by literal expressions and resolved comparands.
/// Only order-encodable scalar kinds are represented; composite values never
/// reach an index key.
///

#[derive(Clone, Debug, Deserialize, Eq, Hash, PartialEq, Serialize)]
pub enum Value {
    Null,
    Bool(bool),
    Int(i64),
    Text(String),
    Uint(u64),
}

impl Value {
    #[must_use]
    pub(crate) const fn canonical_tag(&self) -> ValueTag {
        match self {
            Self::Null => ValueTag::Null,
            Self::Bool(_) => ValueTag::Bool,
            Self::Int(_) => ValueTag::Int,
            Self::Text(_) => ValueTag::Text,
            Self::Uint(_) => ValueTag::Uint,
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Null => write!(f, "NULL"),
            Self::Bool(v) => write!(f, "{v}"),
            Self::Int(v) => write!(f, "{v}"),
            Self::Text(v) => write!(f, "'{v}'"),
            Self::Uint(v) => write!(f, "{v}u"),
        }
    }
}

impl From<bool> for Value {
    fn from(value: bool) -> Self {
        Self::Bool(value)
    }
}

impl From<i64> for Value {
    fn from(value: i64) -> Self {
        Self::Int(value)
    }
}

impl From<u64> for Value {
    fn from(value: u64) -> Self {
        Self::Uint(value)
    }
}

impl From<&str> for Value {
    fn from(value: &str) -> Self {
        Self::Text(value.to_string())
    }
}

///
/// ValueTag
///
/// Leading byte of every encoded index component. Tags stay inside
/// `0x01..=0x7F` so neither a tag nor its inversion collides with the
/// before/after key markers.
///

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
#[repr(u8)]
pub(crate) enum ValueTag {
    Null = 1,
    Bool = 3,
    Int = 10,
    Text = 18,
    Uint = 20,
}

impl ValueTag {
    #[must_use]
    pub(crate) const fn to_u8(self) -> u8 {
        self as u8
    }
}

///
/// TESTS
///
