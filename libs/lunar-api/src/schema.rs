//! Static registry of the five known event shapes.
//!
//! Each entry names the target table, the parameterized insert statement,
//! and the ordered source-key to column links for the type-specific fields.
//! Adding an event type is an edit here, nowhere else.

/// Source-key to target-column link for one type-specific field.
///
/// The wire key and the column name are not always the same: speed changes
/// arrive as `by` but land in `changeValue`.
#[derive(Debug)]
pub struct FieldMap {
    /// Key looked up under the envelope's `message` body.
    pub source: &'static str,
    /// Target column (for observability; the insert binds positionally).
    pub column: &'static str,
}

/// One known event shape.
#[derive(Debug)]
pub struct EventSchema {
    pub message_type: &'static str,
    pub table: &'static str,
    /// Single-row insert, `$1..$n` bound as
    /// (channel, messageNumber, messageType, messageTime, fields...).
    pub insert_sql: &'static str,
    /// Ordered type-specific fields after the four metadata columns.
    pub fields: &'static [FieldMap],
}

pub const SCHEMAS: &[EventSchema] = &[
    EventSchema {
        message_type: "RocketLaunched",
        table: "rocket_launched",
        insert_sql: "INSERT INTO rocket_launched \
            (channel, messageNumber, messageType, messageTime, type, launchSpeed, mission) \
            VALUES ($1, $2, $3, $4, $5, $6, $7)",
        fields: &[
            FieldMap { source: "type", column: "type" },
            FieldMap { source: "launchSpeed", column: "launchSpeed" },
            FieldMap { source: "mission", column: "mission" },
        ],
    },
    EventSchema {
        message_type: "RocketSpeedIncreased",
        table: "speed_change",
        insert_sql: "INSERT INTO speed_change \
            (channel, messageNumber, messageType, messageTime, changeValue) \
            VALUES ($1, $2, $3, $4, $5)",
        fields: &[FieldMap { source: "by", column: "changeValue" }],
    },
    EventSchema {
        message_type: "RocketSpeedDecreased",
        table: "speed_change",
        insert_sql: "INSERT INTO speed_change \
            (channel, messageNumber, messageType, messageTime, changeValue) \
            VALUES ($1, $2, $3, $4, $5)",
        fields: &[FieldMap { source: "by", column: "changeValue" }],
    },
    EventSchema {
        message_type: "RocketExploded",
        table: "rocket_exploded",
        insert_sql: "INSERT INTO rocket_exploded \
            (channel, messageNumber, messageType, messageTime, reason) \
            VALUES ($1, $2, $3, $4, $5)",
        fields: &[FieldMap { source: "reason", column: "reason" }],
    },
    EventSchema {
        message_type: "RocketMissionChanged",
        table: "mission_changed",
        insert_sql: "INSERT INTO mission_changed \
            (channel, messageNumber, messageType, messageTime, newMission) \
            VALUES ($1, $2, $3, $4, $5)",
        fields: &[FieldMap { source: "newMission", column: "newMission" }],
    },
];

/// Find the schema for a declared message type.
pub fn lookup(message_type: &str) -> Option<&'static EventSchema> {
    SCHEMAS.iter().find(|s| s.message_type == message_type)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_all_five_types_registered() {
        for message_type in [
            "RocketLaunched",
            "RocketSpeedIncreased",
            "RocketSpeedDecreased",
            "RocketExploded",
            "RocketMissionChanged",
        ] {
            let schema = lookup(message_type).unwrap();
            assert_eq!(schema.message_type, message_type);
        }
    }

    #[test]
    fn test_unknown_type_not_found() {
        assert!(lookup("RocketFlying").is_none());
        assert!(lookup("").is_none());
        assert!(lookup("rocketlaunched").is_none());
    }

    #[test]
    fn test_placeholder_count_matches_arity() {
        // Every statement binds exactly (4 metadata + type-specific) values.
        for schema in SCHEMAS {
            let placeholders = schema.insert_sql.matches('$').count();
            assert_eq!(
                placeholders,
                4 + schema.fields.len(),
                "{}: statement binds {placeholders} values",
                schema.message_type
            );
        }
    }

    #[test]
    fn test_speed_changes_share_table() {
        let inc = lookup("RocketSpeedIncreased").unwrap();
        let dec = lookup("RocketSpeedDecreased").unwrap();
        assert_eq!(inc.table, "speed_change");
        assert_eq!(dec.table, "speed_change");
        assert_eq!(inc.insert_sql, dec.insert_sql);
    }

    #[test]
    fn test_speed_change_wire_key_is_by() {
        let schema = lookup("RocketSpeedIncreased").unwrap();
        assert_eq!(schema.fields[0].source, "by");
        assert_eq!(schema.fields[0].column, "changeValue");
    }

    #[test]
    fn test_launched_field_order() {
        let schema = lookup("RocketLaunched").unwrap();
        let sources: Vec<&str> = schema.fields.iter().map(|f| f.source).collect();
        assert_eq!(sources, ["type", "launchSpeed", "mission"]);
    }
}
