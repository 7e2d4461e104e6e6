//! EDM properties and their backend mapping.

use crate::edm::EdmSimpleTypeKind;
use crate::value::NativeType;
use serde::{Deserialize, Serialize};

/// Declared EDM type of a property
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EdmType {
    Simple(EdmSimpleTypeKind),
    /// Complex type, by qualified name
    Complex(String),
    /// Entity type reached through a navigation property
    Entity(String),
}

/// How a logical property maps onto the backend schema
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct PropertyMapping {
    /// Attribute path on the persistent entity
    #[serde(default)]
    pub internal_name: Option<String>,
    /// Query expression used instead of the internal name
    #[serde(default)]
    pub internal_expression: Option<String>,
    /// Native type bound values must be coerced to
    #[serde(default)]
    pub native_type: Option<NativeType>,
    /// The internal name addresses a column inside an embedded object, so a
    /// null comparison targets the object itself
    #[serde(default)]
    pub embedded: bool,
    /// Synthetic property with no persistent attribute behind it
    #[serde(default, rename = "virtual")]
    pub is_virtual: bool,
}

/// A property as seen by the expression tree
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EdmProperty {
    pub name: String,
    pub edm_type: EdmType,
    #[serde(default)]
    pub mapping: Option<PropertyMapping>,
    /// Physical sub-properties of a composite property, in key order
    #[serde(default)]
    pub composite: Vec<EdmProperty>,
}

impl EdmProperty {
    /// Create an unmapped property of a simple type
    pub fn new(name: impl Into<String>, kind: EdmSimpleTypeKind) -> Self {
        Self {
            name: name.into(),
            edm_type: EdmType::Simple(kind),
            mapping: None,
            composite: Vec::new(),
        }
    }

    /// Create a navigation property pointing at an entity type
    pub fn navigation(name: impl Into<String>, entity_type: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            edm_type: EdmType::Entity(entity_type.into()),
            mapping: None,
            composite: Vec::new(),
        }
    }

    /// Create a composite property backed by the given sub-properties
    pub fn composite(name: impl Into<String>, parts: Vec<EdmProperty>) -> Self {
        Self {
            name: name.into(),
            edm_type: EdmType::Simple(EdmSimpleTypeKind::String),
            mapping: None,
            composite: parts,
        }
    }

    pub fn with_mapping(mut self, mapping: PropertyMapping) -> Self {
        self.mapping = Some(mapping);
        self
    }

    pub fn with_internal_name(mut self, internal_name: impl Into<String>) -> Self {
        self.mapping_mut().internal_name = Some(internal_name.into());
        self
    }

    pub fn with_internal_expression(mut self, expression: impl Into<String>) -> Self {
        self.mapping_mut().internal_expression = Some(expression.into());
        self
    }

    pub fn with_native_type(mut self, native_type: NativeType) -> Self {
        self.mapping_mut().native_type = Some(native_type);
        self
    }

    pub fn embedded(mut self) -> Self {
        self.mapping_mut().embedded = true;
        self
    }

    pub fn virtual_property(mut self) -> Self {
        self.mapping_mut().is_virtual = true;
        self
    }

    fn mapping_mut(&mut self) -> &mut PropertyMapping {
        self.mapping.get_or_insert_with(PropertyMapping::default)
    }

    pub fn is_composite(&self) -> bool {
        !self.composite.is_empty()
    }

    pub fn is_embedded(&self) -> bool {
        self.mapping.as_ref().is_some_and(|m| m.embedded)
    }

    pub fn is_virtual(&self) -> bool {
        self.mapping.as_ref().is_some_and(|m| m.is_virtual)
    }

    pub fn simple_type(&self) -> Option<EdmSimpleTypeKind> {
        match self.edm_type {
            EdmType::Simple(kind) => Some(kind),
            EdmType::Complex(_) | EdmType::Entity(_) => None,
        }
    }

    pub fn native_type(&self) -> Option<NativeType> {
        self.mapping.as_ref().and_then(|m| m.native_type)
    }

    /// Internal attribute name, falling back to the EDM name
    pub fn internal_name(&self) -> &str {
        self.mapping
            .as_ref()
            .and_then(|m| m.internal_name.as_deref())
            .unwrap_or(&self.name)
    }

    /// Name used in a query: the internal expression when present,
    /// otherwise the internal name
    pub fn query_name(&self) -> &str {
        self.mapping
            .as_ref()
            .and_then(|m| m.internal_expression.as_deref())
            .unwrap_or_else(|| self.internal_name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_name_resolution() {
        let plain = EdmProperty::new("Age", EdmSimpleTypeKind::Int32);
        assert_eq!(plain.internal_name(), "Age");
        assert_eq!(plain.query_name(), "Age");

        let mapped = EdmProperty::new("Age", EdmSimpleTypeKind::Int32).with_internal_name("age");
        assert_eq!(mapped.internal_name(), "age");
        assert_eq!(mapped.query_name(), "age");

        let expr = EdmProperty::new("Owner", EdmSimpleTypeKind::String)
            .with_internal_name("owner")
            .with_internal_expression("owner.login");
        assert_eq!(expr.internal_name(), "owner");
        assert_eq!(expr.query_name(), "owner.login");
    }

    #[test]
    fn test_flags_and_types() {
        let p = EdmProperty::new("Address", EdmSimpleTypeKind::String)
            .with_native_type(NativeType::CharArray)
            .embedded();
        assert!(p.is_embedded());
        assert!(!p.is_virtual());
        assert_eq!(p.native_type(), Some(NativeType::CharArray));
        assert_eq!(p.simple_type(), Some(EdmSimpleTypeKind::String));

        let nav = EdmProperty::navigation("Orders", "Sales.Order");
        assert_eq!(nav.simple_type(), None);
        assert!(!nav.is_composite());

        let key = EdmProperty::composite(
            "Key",
            vec![
                EdmProperty::new("a", EdmSimpleTypeKind::Int32),
                EdmProperty::new("b", EdmSimpleTypeKind::String),
            ],
        );
        assert!(key.is_composite());
    }

    #[test]
    fn test_deserialize_mapping_defaults() {
        let json = r#"{
            "name": "Code",
            "edm_type": {"simple": "String"},
            "mapping": {"internal_name": "code", "virtual": true}
        }"#;
        let p: EdmProperty = serde_json::from_str(json).unwrap();
        assert_eq!(p.internal_name(), "code");
        assert!(p.is_virtual());
        assert!(!p.is_embedded());
        assert!(p.composite.is_empty());
    }
}
