//! Browser-side tests, run with `wasm-pack test --headless --chrome`.
#![cfg(target_arch = "wasm32")]

use forget_me_not::{Mode, Settings, handle_message};
use serde::Serialize;
use wasm_bindgen::JsValue;
use wasm_bindgen_test::*;

wasm_bindgen_test_configure!(run_in_browser);

#[wasm_bindgen_test]
fn unknown_messages_get_no_response() {
    let message = serde_wasm_bindgen::to_value(&serde_json::json!({"action": "PING"})).unwrap();

    assert!(handle_message(message).is_undefined());
    assert!(handle_message(JsValue::NULL).is_undefined());
}

#[wasm_bindgen_test]
fn settings_round_trip_through_js() {
    let settings = Settings::new(Mode::Whitelist, "keep\\.me");

    let js = serde_wasm_bindgen::to_value(&settings).unwrap();
    let back: Settings = serde_wasm_bindgen::from_value(js).unwrap();

    assert_eq!(back, settings);
}

#[wasm_bindgen_test]
fn settings_defaults_apply_to_partial_storage() {
    let js = serde_json::json!({"mode": "whitelist"})
        .serialize(&serde_wasm_bindgen::Serializer::json_compatible())
        .unwrap();

    let settings: Settings = serde_wasm_bindgen::from_value(js).unwrap();

    assert_eq!(settings, Settings::new(Mode::Whitelist, ""));
}
