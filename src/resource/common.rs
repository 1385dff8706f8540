//! Shared wire-value mappings and the common status sub-schema
//!
//! Redfish reports status as `{"State": "Enabled", "Health": "OK"}`; the
//! model exposes the lowercase internal vocabulary instead of the wire
//! spelling.

use crate::schema::{Field, Schema};
use std::sync::{Arc, OnceLock};

/// Wire `Status.State` values to internal state names.
pub const STATE_VALUE_MAP: &[(&str, &str)] = &[
    ("Enabled", "enabled"),
    ("Disabled", "disabled"),
    ("StandbyOffline", "standby offline"),
    ("StandbySpare", "standby spare"),
    ("InTest", "in test"),
    ("Starting", "starting"),
    ("Absent", "absent"),
    ("UnavailableOffline", "unavailable offline"),
    ("Deferring", "deferring"),
    ("Quiesced", "quiesced"),
    ("Updating", "updating"),
];

/// Wire `Status.Health` (and message severity) values to internal names.
pub const HEALTH_VALUE_MAP: &[(&str, &str)] = &[
    ("OK", "ok"),
    ("Warning", "warning"),
    ("Critical", "critical"),
];

/// Schema for the common `Status` sub-object.
pub fn status_schema() -> Arc<Schema> {
    static SCHEMA: OnceLock<Arc<Schema>> = OnceLock::new();
    SCHEMA
        .get_or_init(|| {
            Arc::new(Schema::new(vec![
                Field::new("state", "State").enum_map(STATE_VALUE_MAP),
                Field::new("health", "Health").enum_map(HEALTH_VALUE_MAP),
                Field::new("health_rollup", "HealthRollup").enum_map(HEALTH_VALUE_MAP),
            ]))
        })
        .clone()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_status_maps_wire_values() {
        let attrs = status_schema()
            .parse(&json!({"State": "Enabled", "Health": "OK", "HealthRollup": "Warning"}))
            .unwrap();
        assert_eq!(attrs.str("state"), Some("enabled"));
        assert_eq!(attrs.str("health"), Some("ok"));
        assert_eq!(attrs.str("health_rollup"), Some("warning"));
    }

    #[test]
    fn test_status_fields_are_optional() {
        let attrs = status_schema().parse(&json!({"State": "Absent"})).unwrap();
        assert_eq!(attrs.str("state"), Some("absent"));
        assert_eq!(attrs.str("health"), None);
    }
}
