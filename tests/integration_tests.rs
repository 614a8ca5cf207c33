use admin_text_field::{
    encode, encode_value, encode_with_options, jsopts, placeholder, to_string, to_string_pretty,
    to_value, FunctionDetection, JsCode, JsOptions, JsValue, OptionMap,
};
use chrono::{TimeZone, Utc};
use serde::Serialize;

#[derive(Serialize)]
struct Mask {
    mask: String,
    placeholder: String,
    #[serde(rename = "clearIncomplete")]
    clear_incomplete: bool,
    oncomplete: Option<JsCode>,
    onincomplete: Option<JsCode>,
}

#[derive(Serialize)]
struct Group {
    validator: JsCode,
    cardinality: u8,
}

#[derive(Serialize)]
struct Definitions {
    alias: String,
    definitions: std::collections::BTreeMap<String, Group>,
}

#[test]
fn test_empty_options() {
    assert_eq!(encode(&OptionMap::new()), "{}");
    assert_eq!(encode_with_options(&jsopts!({}), &JsOptions::legacy()), "{}");
    assert!(placeholder::prepare(&jsopts!({})).is_empty());
}

#[test]
fn test_top_level_callback() {
    let options = jsopts!({
        "mask": "9999-9999",
        "onincomplete": (JsCode::new("function(){ clear(this); }"))
    });

    assert_eq!(
        encode_value(&options),
        r#"{"mask":"9999-9999","onincomplete":function(){ clear(this); }}"#
    );
}

#[test]
fn test_nested_callback() {
    let options = jsopts!({
        "group": { "validator": (JsCode::new("function(v){return v.length>0;}")) }
    });

    assert_eq!(
        encode_value(&options),
        r#"{"group":{"validator":function(v){return v.length>0;}}}"#
    );
}

#[test]
fn test_legacy_detection_on_plain_strings() {
    let flat = jsopts!({
        "mask": "9999-9999",
        "onincomplete": "function(){ clear(this); }"
    });
    let nested = jsopts!({
        "group": { "validator": "function(v){return v.length>0;}" }
    });

    let legacy = JsOptions::legacy();
    assert_eq!(
        encode_with_options(&flat, &legacy),
        r#"{"mask":"9999-9999","onincomplete":function(){ clear(this); }}"#
    );
    assert_eq!(
        encode_with_options(&nested, &legacy),
        r#"{"group":{"validator":function(v){return v.length>0;}}}"#
    );

    // Without detection the same strings stay quoted.
    assert_eq!(
        encode_value(&flat),
        r#"{"mask":"9999-9999","onincomplete":"function(){ clear(this); }"}"#
    );
}

#[test]
fn test_legacy_detection_over_approximates() {
    let options = jsopts!({ "help": "This function masks phone numbers" });
    assert_eq!(
        encode_with_options(&options, &JsOptions::legacy()),
        r#"{"help":This function masks phone numbers}"#
    );
}

#[test]
fn test_custom_detection_pattern() {
    let detection = FunctionDetection::pattern(r"^\s*(function\b|\(.*\)\s*=>)").unwrap();
    let options = JsOptions::new().with_function_detection(detection);
    let value = jsopts!({
        "arrow": "(v) => v.trim()",
        "prose": "This function masks phone numbers"
    });

    assert_eq!(
        encode_with_options(&value, &options),
        r#"{"arrow":(v) => v.trim(),"prose":"This function masks phone numbers"}"#
    );
}

#[test]
fn test_invalid_detection_pattern() {
    let err = FunctionDetection::pattern("function(").unwrap_err();
    assert!(err.to_string().contains("function("));
}

#[test]
fn test_code_free_tree_matches_json() {
    let options = jsopts!({
        "mask": "(999) 999-9999",
        "greedy": false,
        "repeat": 4,
        "ratio": 0.5,
        "empty": null,
        "list": [1, "two", [3], { "four": 4 }],
        "quote": "she said \"hi\"\n\ttab",
        "unicode": "héllo ✓"
    });

    let expected = serde_json::to_string(&options).unwrap();
    assert_eq!(encode_value(&options), expected);
}

#[test]
fn test_pretty_code_free_tree_matches_json() {
    let options = jsopts!({
        "mask": "9999",
        "list": [1, [], {}],
        "nested": { "deep": { "deeper": true } }
    });

    assert_eq!(
        to_string_pretty(&options).unwrap(),
        serde_json::to_string_pretty(&options).unwrap()
    );
}

#[test]
fn test_pretty_with_code() {
    let options = jsopts!({
        "mask": "9999",
        "hooks": { "oncomplete": (JsCode::new("function(){ done(); }")) }
    });

    assert_eq!(
        to_string_pretty(&options).unwrap(),
        "{\n  \"mask\": \"9999\",\n  \"hooks\": {\n    \"oncomplete\": function(){ done(); }\n  }\n}"
    );
}

#[test]
fn test_code_inside_arrays() {
    let options = jsopts!({
        "handlers": [
            (JsCode::new("function(a){}")),
            "data",
            (JsCode::new("function(b){}"))
        ]
    });

    assert_eq!(
        encode_value(&options),
        r#"{"handlers":[function(a){},"data",function(b){}]}"#
    );
}

#[test]
fn test_serde_struct_with_optional_callbacks() {
    let mask = Mask {
        mask: "99/99/9999".to_string(),
        placeholder: "dd/mm/yyyy".to_string(),
        clear_incomplete: true,
        oncomplete: None,
        onincomplete: Some(JsCode::new("function(){ this.value = ''; }")),
    };

    assert_eq!(
        to_string(&mask).unwrap(),
        r#"{"mask":"99/99/9999","placeholder":"dd/mm/yyyy","clearIncomplete":true,"oncomplete":null,"onincomplete":function(){ this.value = ''; }}"#
    );
}

#[test]
fn test_escaped_slashes_leave_code_alone() {
    let options = jsopts!({
        "url": "/api/check",
        "validator": (JsCode::new("function(v){ return /\\d+/.test(v); }"))
    });

    assert_eq!(
        encode_with_options(&options, &JsOptions::new().with_escaped_slashes(true)),
        r#"{"url":"\/api\/check","validator":function(v){ return /\d+/.test(v); }}"#
    );
}

#[test]
fn test_escaped_unicode() {
    let options = jsopts!({ "label": "Größe 😀" });
    assert_eq!(
        encode_with_options(&options, &JsOptions::new().with_escaped_unicode(true)),
        r#"{"label":"Gr\u00f6\u00dfe \ud83d\ude00"}"#
    );
}

#[test]
fn test_dates_are_rfc3339_strings() {
    let when = Utc.with_ymd_and_hms(2024, 3, 1, 12, 30, 0).unwrap();
    let options = jsopts!({ "min": (when) });
    assert_eq!(encode_value(&options), r#"{"min":"2024-03-01T12:30:00Z"}"#);
}

#[test]
fn test_repeated_encoding_is_stable() {
    let options = jsopts!({
        "mask": "9999",
        "hooks": { "oncomplete": (JsCode::new("function(){}")) }
    });
    let snapshot = options.clone();

    let first = encode_value(&options);
    let second = encode_value(&options);
    assert_eq!(first, second);
    assert_eq!(options, snapshot);
}

#[test]
fn test_prepare_with_serde_json_matches_direct_encoding() {
    let options = jsopts!({
        "onincomplete": (JsCode::new("function(){ clear(this); }")),
        "group": {
            "onincomplete": (JsCode::new("function(){ other(); }")),
            "mask": "99"
        }
    });

    let prepared = placeholder::prepare(&options);
    assert_eq!(prepared.len(), 2);

    let via_json = prepared.encode_with(serde_json::to_string).unwrap();
    assert_eq!(via_json, encode_value(&options));
    assert!(!via_json.contains('%'));
}

#[test]
fn test_to_value_keeps_code_variant() {
    let defs = Definitions {
        alias: "numeric".to_string(),
        definitions: [(
            "h".to_string(),
            Group {
                validator: JsCode::new("function(chrs){ return /[0-9a-f]/.test(chrs); }"),
                cardinality: 1,
            },
        )]
        .into_iter()
        .collect(),
    };

    let value = to_value(&defs).unwrap();
    let validator = value
        .as_object()
        .and_then(|o| o.get("definitions"))
        .and_then(JsValue::as_object)
        .and_then(|o| o.get("h"))
        .and_then(JsValue::as_object)
        .and_then(|o| o.get("validator"))
        .unwrap();
    assert!(validator.is_code());
    assert_eq!(encode_value(&value), to_string(&defs).unwrap());
}

#[test]
fn test_float_formatting() {
    let value = jsopts!([1.0, 0.25, (f64::NAN), (f64::INFINITY)]);
    assert_eq!(encode_value(&value), "[1.0,0.25,null,null]");
    assert_eq!(to_string(&vec![1.0f64, -2.5]).unwrap(), "[1.0,-2.5]");
}

#[test]
fn test_extreme_floats_match_json() {
    let floats = vec![1e20, 1.5e-7, -2.5e300, f64::MIN_POSITIVE, f64::MAX, 0.1 + 0.2, -0.0];
    let value = JsValue::Array(floats.iter().copied().map(JsValue::from).collect());

    let expected = serde_json::to_string(&floats).unwrap();
    assert_eq!(encode_value(&value), expected);
    assert_eq!(to_string(&floats).unwrap(), expected);
    assert_eq!(
        to_string(&vec![0.1f32, 3.0f32]).unwrap(),
        serde_json::to_string(&vec![0.1f32, 3.0f32]).unwrap()
    );
}

#[test]
fn test_large_unsigned_keeps_precision() {
    let direct = to_string(&u64::MAX).unwrap();
    assert_eq!(direct, "18446744073709551615");

    let value = to_value(&u64::MAX).unwrap();
    assert_eq!(encode_value(&value), direct);
    assert_eq!(value.as_i64(), None);

    let parsed: JsValue = serde_json::from_str("[18446744073709551615]").unwrap();
    assert_eq!(encode_value(&parsed), "[18446744073709551615]");
}

#[test]
fn test_control_characters_are_escaped() {
    let value = jsopts!({ "s": "a\u{1}b\u{8}c\u{c}" });
    assert_eq!(encode_value(&value), r#"{"s":"a\u0001b\bc\f"}"#);
    assert_eq!(encode_value(&value), serde_json::to_string(&value).unwrap());
}
