use serde_json::{json, Value};
use std::sync::LazyLock;

pub static CONFIG_SCHEMA: LazyLock<Value> = LazyLock::new(|| {
    json!({
        "$schema": "http://json-schema.org/draft-07/schema#",
        "type": "object",
        "properties": {
            "server": {
                "type": "object",
                "properties": {
                    "host": { "type": "string" },
                    "port": { "type": "integer", "minimum": 1, "maximum": 65535 }
                },
                "additionalProperties": false
            },
            "database": {
                "type": "object",
                "properties": {
                    "path": { "type": "string", "minLength": 1 }
                },
                "additionalProperties": false
            },
            "cors": {
                "type": "object",
                "properties": {
                    "allowed_origins": { "type": "array", "items": { "type": "string" } },
                    "allowed_schemes": {
                        "type": "array",
                        "items": { "type": "string", "enum": ["http", "https"] }
                    }
                },
                "additionalProperties": false
            },
            "auth": {
                "type": "object",
                "properties": {
                    "admin_group": { "type": "string" },
                    "users": { "type": "array", "items": { "$ref": "#/$defs/user" } }
                },
                "additionalProperties": false
            }
        },
        "additionalProperties": false,
        "$defs": {
            "user": {
                "type": "object",
                "required": ["token", "email", "oid"],
                "properties": {
                    "token": { "type": "string", "minLength": 1 },
                    "email": { "type": "string" },
                    "oid": { "type": "string" },
                    "name": { "type": "string" },
                    "groups": { "type": "array", "items": { "type": "string" } }
                }
            }
        }
    })
});
