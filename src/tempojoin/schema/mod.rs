//! Relation schema types.
//!
//! Minimal schema support for two jobs: the fatal required-column check on
//! each input relation, and synthesizing the null cells of a right side that
//! found no overlapping match.

/// Field data types carried by the customer-history relations
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DataType {
    Integer,
    Float,
    String,
    Boolean,
    Date,
}

/// A single field specification
#[derive(Debug, Clone, PartialEq)]
pub struct FieldDefinition {
    pub name: String,
    pub data_type: DataType,
}

impl FieldDefinition {
    pub fn new(name: impl Into<String>, data_type: DataType) -> Self {
        Self {
            name: name.into(),
            data_type,
        }
    }
}

/// An ordered set of field definitions describing one relation
#[derive(Debug, Clone, PartialEq)]
pub struct Schema {
    pub fields: Vec<FieldDefinition>,
}

impl Schema {
    pub fn new(fields: Vec<FieldDefinition>) -> Self {
        Self { fields }
    }

    /// Iterate field names in declaration order
    pub fn field_names(&self) -> impl Iterator<Item = &str> {
        self.fields.iter().map(|f| f.name.as_str())
    }

    /// Check whether the schema declares a field with this name
    pub fn has_field(&self, name: &str) -> bool {
        self.fields.iter().any(|f| f.name == name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_field_lookup() {
        let schema = Schema::new(vec![
            FieldDefinition::new("customer", DataType::String),
            FieldDefinition::new("eff_start_date", DataType::Date),
        ]);
        assert!(schema.has_field("customer"));
        assert!(!schema.has_field("address"));
        assert_eq!(
            schema.field_names().collect::<Vec<_>>(),
            vec!["customer", "eff_start_date"]
        );
    }
}
