use crate::model::StructuredData;

pub const NOT_SPECIFIED: &str = "Not specified";

/// One displayable extracted field.
#[derive(Debug, Clone, PartialEq)]
pub struct ProjectedField<'a> {
    pub name: &'a str,
    pub label: String,
    pub value: &'a str,
    pub confidence: f64,
}

/// Extracted fields in payload order. The reserved `confidence` entry never
/// shows up here; null or empty values render as [`NOT_SPECIFIED`].
pub fn project(data: &StructuredData) -> Vec<ProjectedField<'_>> {
    data.fields
        .iter()
        .map(|(name, field)| ProjectedField {
            name,
            label: display_label(name),
            value: field
                .value
                .as_deref()
                .filter(|v| !v.is_empty())
                .unwrap_or(NOT_SPECIFIED),
            confidence: field.confidence,
        })
        .collect()
}

pub fn field_count(data: &StructuredData) -> usize {
    data.fields.len()
}

pub fn display_label(name: &str) -> String {
    name.replace('_', " ")
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn decode(raw: serde_json::Value) -> StructuredData {
        serde_json::from_value(raw).unwrap()
    }

    #[test]
    fn reserved_confidence_key_is_excluded() {
        let data = decode(json!({
            "location": {"value": "NY", "confidence": 0.8},
            "confidence": {"value": null, "confidence": 0.5}
        }));
        let fields = project(&data);
        assert_eq!(fields.len(), 1);
        assert_eq!(fields[0].name, "location");
        assert_eq!(fields[0].value, "NY");
        assert_eq!(field_count(&data), 1);
    }

    #[test]
    fn missing_values_get_placeholder() {
        let data = decode(json!({
            "account_number": {"value": null, "confidence": 0.2},
            "due_date": {"value": "", "confidence": 0.4},
            "contact_name": {"confidence": 0.1}
        }));
        let fields = project(&data);
        assert!(fields.iter().all(|f| f.value == NOT_SPECIFIED));
        assert_eq!(fields[0].label, "account number");
        assert_eq!(fields[1].name, "due_date");
    }
}
