use serde::{Deserialize, Serialize};

/// Value of a host element property.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "value", rename_all = "snake_case")]
pub enum PropertyValue {
    Text(String),
    Integer(i64),
    Double(f64),
    Boolean(bool),
    Empty,
}

impl PropertyValue {
    /// Human-readable form, as the host would display it.
    pub fn to_display_string(&self) -> String {
        match self {
            Self::Text(s) => s.clone(),
            Self::Integer(i) => i.to_string(),
            Self::Double(d) => d.to_string(),
            Self::Boolean(true) => "Yes".to_string(),
            Self::Boolean(false) => "No".to_string(),
            Self::Empty => String::new(),
        }
    }
}

/// A named property of an element.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Property {
    pub name: String,
    pub value: PropertyValue,
}

impl Property {
    pub fn text(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            value: PropertyValue::Text(value.into()),
        }
    }
}

/// A named set of properties ("Item", "Element", "Layer", ...).
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct PropertyCategory {
    pub name: String,
    pub properties: Vec<Property>,
}

impl PropertyCategory {
    pub fn new(name: impl Into<String>, properties: Vec<Property>) -> Self {
        Self {
            name: name.into(),
            properties,
        }
    }
}
