#![no_main]

use jsonschema_guard_core::{convert, convert_with, ConvertOptions};
use libfuzzer_sys::fuzz_target;
use serde_json::Value;

// Input is split on the first NUL byte: schema JSON, then instance JSON.
fuzz_target!(|data: &[u8]| {
    let (schema_bytes, instance_bytes) = match data.iter().position(|b| *b == 0) {
        Some(i) => (&data[..i], &data[i + 1..]),
        None => (data, &[][..]),
    };

    let Ok(schema) = serde_json::from_slice::<Value>(schema_bytes) else {
        return;
    };

    let options = ConvertOptions {
        max_depth: 16,
        ..ConvertOptions::default()
    };
    let result = convert_with(&schema, &options);

    if let Ok(instance) = serde_json::from_slice::<Value>(instance_bytes) {
        let _ = result.validator.validate(&instance);
        let _ = convert(&schema).validate(&instance);
    }
});
