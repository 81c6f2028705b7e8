use serde_json::{json, Value};
use std::sync::LazyLock;

pub static CONFIG_SCHEMA: LazyLock<Value> = LazyLock::new(|| {
    json!({
        "$schema": "http://json-schema.org/draft-07/schema#",
        "type": "object",
        "additionalProperties": false,
        "properties": {
            "api": {
                "type": "object",
                "additionalProperties": false,
                "properties": {
                    "base_url": { "type": "string", "format": "uri" },
                    "request_timeout_secs": { "type": "integer", "minimum": 1 }
                }
            },
            "polling": {
                "type": "object",
                "additionalProperties": false,
                "properties": {
                    "interval_ms": { "type": "integer", "minimum": 100 },
                    "max_attempts": { "type": "integer", "minimum": 1 }
                }
            }
        }
    })
});
