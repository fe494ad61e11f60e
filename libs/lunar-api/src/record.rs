use serde_json::Value;

/// Canonical scalar value bound into an insert statement.
///
/// The relational record is scalar-shaped by contract; non-scalar message
/// sub-fields are carried as their compact JSON text so the arity and the
/// positional layout stay fixed.
#[derive(Debug, Clone, PartialEq)]
pub enum SqlValue {
    Text(String),
    Int(i64),
    Float(f64),
    Bool(bool),
    Null,
}

impl SqlValue {
    /// Map a JSON value to its scalar representation.
    ///
    /// Integral numbers stay integral; numbers outside the i64 range fall
    /// back to float. Arrays and objects become their JSON text.
    pub fn from_json(value: &Value) -> SqlValue {
        match value {
            Value::Null => SqlValue::Null,
            Value::Bool(b) => SqlValue::Bool(*b),
            Value::Number(n) => match n.as_i64() {
                Some(i) => SqlValue::Int(i),
                None => n.as_f64().map(SqlValue::Float).unwrap_or(SqlValue::Null),
            },
            Value::String(s) => SqlValue::Text(s.clone()),
            other => SqlValue::Text(other.to_string()),
        }
    }

    pub fn is_null(&self) -> bool {
        matches!(self, SqlValue::Null)
    }
}

/// One transformed event: the declared message type plus the positional
/// values for its insert statement.
///
/// Arity is always 4 (channel, messageNumber, messageType, messageTime)
/// plus the schema's type-specific field count. Missing sub-fields occupy
/// their position as [`SqlValue::Null`]; they are never omitted.
#[derive(Debug, Clone, PartialEq)]
pub struct EventRow {
    message_type: String,
    values: Vec<SqlValue>,
}

impl EventRow {
    pub fn new(message_type: String, values: Vec<SqlValue>) -> Self {
        Self { message_type, values }
    }

    pub fn message_type(&self) -> &str {
        &self.message_type
    }

    /// Values in statement order, metadata prefix first.
    pub fn values(&self) -> &[SqlValue] {
        &self.values
    }

    pub fn arity(&self) -> usize {
        self.values.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_scalar_mapping() {
        assert_eq!(SqlValue::from_json(&json!("Mars")), SqlValue::Text("Mars".into()));
        assert_eq!(SqlValue::from_json(&json!(500)), SqlValue::Int(500));
        assert_eq!(SqlValue::from_json(&json!(-3)), SqlValue::Int(-3));
        assert_eq!(SqlValue::from_json(&json!(2.5)), SqlValue::Float(2.5));
        assert_eq!(SqlValue::from_json(&json!(true)), SqlValue::Bool(true));
        assert_eq!(SqlValue::from_json(&json!(null)), SqlValue::Null);
    }

    #[test]
    fn test_huge_number_falls_back_to_float() {
        let v = json!(u64::MAX);
        assert!(matches!(SqlValue::from_json(&v), SqlValue::Float(_)));
    }

    #[test]
    fn test_non_scalar_becomes_json_text() {
        let v = SqlValue::from_json(&json!({"stage": 2}));
        assert_eq!(v, SqlValue::Text(r#"{"stage":2}"#.into()));
        let v = SqlValue::from_json(&json!([1, 2]));
        assert_eq!(v, SqlValue::Text("[1,2]".into()));
    }
}
