use serde_json::{json, Value};
use std::sync::LazyLock;

pub static CONFIG_SCHEMA: LazyLock<Value> = LazyLock::new(|| {
    json!({
        "$schema": "http://json-schema.org/draft-07/schema#",
        "type": "object",
        "additionalProperties": false,
        "properties": {
            "attack": {
                "type": "object",
                "properties": {
                    "max_bruteforce_length": { "type": "integer", "minimum": 1, "maximum": 8 },
                    "charset": { "type": "string", "minLength": 1 },
                    "max_attempts": { "type": "integer", "minimum": 1 },
                    "threads": { "type": "integer", "minimum": 0 },
                    "wordlist": { "type": "array", "items": { "type": "string" } },
                    "secrets": { "type": "array", "items": { "type": "string" } }
                }
            },
            "cipher": {
                "type": "object",
                "properties": {
                    "xor_keys": { "type": "array", "items": { "type": "string", "minLength": 1 } },
                    "analyze_blocks": { "type": "boolean" }
                }
            },
            "lcg": {
                "type": "object",
                "properties": {
                    "catalog": { "type": "array", "items": { "$ref": "#/$defs/generator" } },
                    "predict": { "type": "integer", "minimum": 0 }
                }
            },
            "timing": {
                "type": "object",
                "properties": {
                    "threshold": { "type": "number", "exclusiveMinimum": 0 },
                    "max_length": { "type": "integer", "minimum": 0 },
                    "samples": { "type": "integer", "minimum": 1 },
                    "charset": { "type": "string", "minLength": 1 }
                }
            }
        },
        "$defs": {
            "generator": {
                "type": "object",
                "required": ["name", "a", "c", "m"],
                "properties": {
                    "name": { "type": "string" },
                    "a": { "type": "integer", "minimum": 0 },
                    "c": { "type": "integer", "minimum": 0 },
                    "m": { "type": "integer", "minimum": 1 }
                }
            }
        }
    })
});
