/// Builds a [`JsValue`](crate::JsValue) tree from a JSON-like literal.
///
/// Keys are string literals and keep their written order. Any expression in
/// parentheses goes through [`to_value`](crate::to_value), so a
/// `(JsCode::new(..))` becomes a code value. An expression that cannot be
/// serialized (a map with non-string keys, for instance) panics.
///
/// ```rust
/// use admin_text_field::{encode_value, jsopts, JsCode};
///
/// let options = jsopts!({
///     "group": { "validator": (JsCode::new("function(v){return v.length>0;}")) }
/// });
/// assert_eq!(
///     encode_value(&options),
///     r#"{"group":{"validator":function(v){return v.length>0;}}}"#
/// );
/// ```
#[macro_export]
macro_rules! jsopts {
    (null) => {
        $crate::JsValue::Null
    };

    (true) => {
        $crate::JsValue::Bool(true)
    };

    (false) => {
        $crate::JsValue::Bool(false)
    };

    ([]) => {
        $crate::JsValue::Array(vec![])
    };

    ([ $($elem:tt),* $(,)? ]) => {
        $crate::JsValue::Array(vec![$($crate::jsopts!($elem)),*])
    };

    ({}) => {
        $crate::JsValue::Object($crate::OptionMap::new())
    };

    ({ $($key:literal : $value:tt),* $(,)? }) => {{
        let mut object = $crate::OptionMap::new();
        $(
            object.insert($key.to_string(), $crate::jsopts!($value));
        )*
        $crate::JsValue::Object(object)
    }};

    // Fallback for literals and parenthesised expressions
    ($s:expr) => {{
        $crate::to_value(&$s).expect("jsopts! value must serialize to an option value")
    }};
}
