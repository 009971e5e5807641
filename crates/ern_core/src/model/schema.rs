//! Declarative schema for generated value objects.
//!
//! Each generated model publishes its schema so builder signatures can be
//! checked when the model is authored, not when application code runs.

use std::collections::BTreeSet;
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Wire type of one model field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    Int,
    Double,
    String,
}

/// One declared field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldSpec {
    pub name: &'static str,
    pub kind: FieldKind,
    /// Required fields are builder constructor parameters; optional fields
    /// get fluent setters.
    pub required: bool,
}

impl FieldSpec {
    pub const fn required(name: &'static str, kind: FieldKind) -> Self {
        Self {
            name,
            kind,
            required: true,
        }
    }

    pub const fn optional(name: &'static str, kind: FieldKind) -> Self {
        Self {
            name,
            kind,
            required: false,
        }
    }
}

/// Model declaration: name, bundle key and fields in wire order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModelSchema {
    pub name: &'static str,
    pub bundle_key: &'static str,
    pub fields: Vec<FieldSpec>,
}

impl ModelSchema {
    /// Validates declaration-level schema invariants.
    pub fn validate(&self) -> Result<(), SchemaError> {
        if self.name.trim().is_empty() {
            return Err(SchemaError::EmptyModelName);
        }
        if !is_lower_camel_identifier(self.bundle_key) {
            return Err(SchemaError::InvalidBundleKey(self.bundle_key.to_string()));
        }

        let mut seen = BTreeSet::new();
        for (position, field) in self.fields.iter().enumerate() {
            if field.name.trim().is_empty() {
                return Err(SchemaError::BlankFieldName { position });
            }
            if !seen.insert(field.name) {
                return Err(SchemaError::DuplicateField(field.name.to_string()));
            }
        }

        if !self.fields.iter().any(|field| field.required) {
            return Err(SchemaError::NoRequiredField(self.name.to_string()));
        }
        Ok(())
    }

    /// Builder constructor parameters, in wire order.
    pub fn required_fields(&self) -> Vec<&FieldSpec> {
        self.fields.iter().filter(|field| field.required).collect()
    }

    pub fn optional_fields(&self) -> Vec<&FieldSpec> {
        self.fields.iter().filter(|field| !field.required).collect()
    }
}

fn is_lower_camel_identifier(value: &str) -> bool {
    let mut chars = value.chars();
    match chars.next() {
        Some(first) if first.is_ascii_lowercase() => {}
        _ => return false,
    }
    chars.all(|c| c.is_ascii_alphanumeric())
}

/// Schema authoring errors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SchemaError {
    EmptyModelName,
    InvalidBundleKey(String),
    /// A declared parameter slot with no name, e.g. a trailing comma left
    /// behind by template expansion.
    BlankFieldName { position: usize },
    DuplicateField(String),
    NoRequiredField(String),
}

impl Display for SchemaError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::EmptyModelName => write!(f, "model name must not be empty"),
            Self::InvalidBundleKey(value) => {
                write!(f, "bundle key must be a lowerCamel identifier: {value}")
            }
            Self::BlankFieldName { position } => {
                write!(f, "field at position {position} has a blank name")
            }
            Self::DuplicateField(value) => write!(f, "field is declared twice: {value}"),
            Self::NoRequiredField(value) => write!(
                f,
                "model {value} declares no required field; builder constructor would be empty"
            ),
        }
    }
}

impl Error for SchemaError {}
