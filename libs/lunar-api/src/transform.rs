//! Pure envelope-to-row transformation. No I/O, deterministic: the same
//! envelope always yields the same row.

use crate::envelope::EventEnvelope;
use crate::error::TransformError;
use crate::record::{EventRow, SqlValue};
use crate::schema;

/// Build the positional relational record for a classified envelope.
///
/// The metadata prefix is strict (already validated by
/// [`EventEnvelope::parse`]); type-specific extraction is tolerant: a
/// missing `message` body or sub-field yields NULL in that position rather
/// than failing the transform.
pub fn transform(envelope: &EventEnvelope) -> Result<EventRow, TransformError> {
    let meta = envelope.metadata();
    let schema = schema::lookup(&meta.message_type)
        .ok_or_else(|| TransformError::UnknownMessageType(meta.message_type.clone()))?;

    let mut values = Vec::with_capacity(4 + schema.fields.len());
    values.push(SqlValue::Text(meta.channel.clone()));
    values.push(SqlValue::Int(meta.message_number));
    values.push(SqlValue::Text(meta.message_type.clone()));
    values.push(SqlValue::from_json(&meta.message_time));

    let message = envelope.message();
    for field in schema.fields {
        let value = message
            .and_then(|m| m.get(field.source))
            .map(SqlValue::from_json)
            .unwrap_or(SqlValue::Null);
        values.push(value);
    }

    Ok(EventRow::new(meta.message_type.clone(), values))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::{Value, json};

    fn envelope(message_type: &str, message: Value) -> EventEnvelope {
        EventEnvelope::parse(json!({
            "metadata": {
                "channel": "c1",
                "messageNumber": 1,
                "messageType": message_type,
                "messageTime": "2024-03-14T19:13:12.997Z"
            },
            "message": message
        }))
        .unwrap()
    }

    #[test]
    fn test_launched_row() {
        let row = transform(&envelope(
            "RocketLaunched",
            json!({ "type": "Falcon9", "launchSpeed": 0, "mission": "Mars" }),
        ))
        .unwrap();

        assert_eq!(row.message_type(), "RocketLaunched");
        assert_eq!(
            row.values(),
            [
                SqlValue::Text("c1".into()),
                SqlValue::Int(1),
                SqlValue::Text("RocketLaunched".into()),
                SqlValue::Text("2024-03-14T19:13:12.997Z".into()),
                SqlValue::Text("Falcon9".into()),
                SqlValue::Int(0),
                SqlValue::Text("Mars".into()),
            ]
        );
    }

    #[test]
    fn test_arity_fixed_per_type() {
        let cases = [
            ("RocketLaunched", json!({ "type": "F9", "launchSpeed": 1, "mission": "M" }), 7),
            ("RocketSpeedIncreased", json!({ "by": 3000 }), 5),
            ("RocketSpeedDecreased", json!({ "by": 2500 }), 5),
            ("RocketExploded", json!({ "reason": "PRESSURE_VESSEL_FAILURE" }), 5),
            ("RocketMissionChanged", json!({ "newMission": "SHUTTLE_MIR" }), 5),
        ];
        for (message_type, message, arity) in cases {
            let row = transform(&envelope(message_type, message)).unwrap();
            assert_eq!(row.arity(), arity, "{message_type}");
        }
    }

    #[test]
    fn test_missing_sub_field_is_null_not_error() {
        let row = transform(&envelope("RocketLaunched", json!({ "type": "F9" }))).unwrap();
        assert_eq!(row.arity(), 7);
        assert!(row.values()[5].is_null(), "launchSpeed position");
        assert!(row.values()[6].is_null(), "mission position");
    }

    #[test]
    fn test_missing_message_body_is_all_nulls() {
        let env = EventEnvelope::parse(json!({
            "metadata": {
                "channel": "c1",
                "messageNumber": 1,
                "messageType": "RocketExploded",
                "messageTime": 1710443592997_i64
            }
        }))
        .unwrap();
        let row = transform(&env).unwrap();
        assert_eq!(row.arity(), 5);
        assert!(row.values()[4].is_null());
    }

    #[test]
    fn test_speed_change_reads_wire_key_by() {
        let row = transform(&envelope("RocketSpeedDecreased", json!({ "by": 5 }))).unwrap();
        assert_eq!(row.values()[4], SqlValue::Int(5));
    }

    #[test]
    fn test_speed_change_ignores_column_name_as_key() {
        // The wire key is `by`; a payload spelling the column name instead
        // binds NULL rather than silently matching.
        let row = transform(&envelope("RocketSpeedDecreased", json!({ "changeValue": 5 }))).unwrap();
        assert!(row.values()[4].is_null());
    }

    #[test]
    fn test_unknown_type_rejected() {
        let err = transform(&envelope("RocketFlying", json!({}))).unwrap_err();
        assert_eq!(err, TransformError::UnknownMessageType("RocketFlying".into()));
    }

    #[test]
    fn test_numeric_message_time_stays_numeric() {
        let env = EventEnvelope::parse(json!({
            "metadata": {
                "channel": "c1",
                "messageNumber": 9,
                "messageType": "RocketExploded",
                "messageTime": 1710443592997_i64
            },
            "message": { "reason": "RUD" }
        }))
        .unwrap();
        let row = transform(&env).unwrap();
        assert_eq!(row.values()[3], SqlValue::Int(1710443592997));
    }

    #[test]
    fn test_deterministic() {
        let env = envelope("RocketMissionChanged", json!({ "newMission": "SHUTTLE_MIR" }));
        assert_eq!(transform(&env).unwrap(), transform(&env).unwrap());
    }
}
