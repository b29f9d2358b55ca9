//! Conversions between JavaScript values and metadata records.

use js_sys::{Array, JsString, Object, Reflect};
use sherby_metadata::{MetaValue, MetadataRecord};
use wasm_bindgen::{prelude::*, JsCast};

/// Admit a JavaScript value as a metadata record.
///
/// Only plain objects (`{}` literals, `new Object()`, `JSON.parse` results) are admitted. Primitives, `null`,
/// arrays, dates, regular expressions, class instances and the global object are turned away.
pub fn admit(value: &JsValue) -> Option<MetadataRecord> {
    is_plain_object(value).then(|| record_from_object(value.unchecked_ref()))
}

/// Whether `value` is an object whose constructor is the global `Object`.
pub fn is_plain_object(value: &JsValue) -> bool {
    if !value.is_object() {
        return false;
    }

    match Reflect::get(value, &JsValue::from_str("constructor")) {
        Ok(constructor) => constructor == JsValue::from(Object::new().constructor()),
        Err(_) => false,
    }
}

/// Read the own enumerable string-keyed entries of `object`.
///
/// Entries inherited through the prototype chain are skipped.
pub fn record_from_object(object: &Object) -> MetadataRecord {
    Object::entries(object)
        .iter()
        .filter_map(|entry| {
            let entry: Array = entry.unchecked_into();
            let key = entry.get(0).as_string()?;
            Some((key, meta_value(&entry.get(1))))
        })
        .collect()
}

/// Convert a JavaScript value without coercing primitives.
///
/// Arrays, objects and every other non-primitive are never walked. They are turned into the string a
/// `content` attribute would receive, once, and stay truthy whatever that string is.
pub fn meta_value(value: &JsValue) -> MetaValue {
    if value.is_undefined() {
        MetaValue::Undefined
    } else if value.is_null() {
        MetaValue::Null
    } else if let Some(value) = value.as_bool() {
        MetaValue::Bool(value)
    } else if let Some(value) = value.as_f64() {
        MetaValue::Number(value)
    } else if let Some(value) = value.as_string() {
        MetaValue::String(value)
    } else if value.is_falsy() {
        // 0n
        MetaValue::Number(0.0)
    } else {
        MetaValue::Stringified(content_string(value))
    }
}

#[wasm_bindgen]
extern "C" {
    #[wasm_bindgen(js_name = String, catch)]
    fn js_string(value: &JsValue) -> Result<JsString, JsValue>;
}

fn content_string(value: &JsValue) -> String {
    match js_string(value) {
        Ok(string) => string.into(),
        Err(err) => {
            // objects without a prototype have neither `toString` nor `valueOf`
            tracing::debug!("{value:?} has no string form ({err:?}), storing its object tag");
            "[object Object]".to_string()
        }
    }
}

/// Build a plain object out of a record.
pub fn record_to_object(record: &MetadataRecord) -> Object {
    let object = Object::new();
    for (key, value) in record.iter() {
        _ = Reflect::set(&object, &JsValue::from_str(key), &meta_value_to_js(value));
    }
    object
}

pub fn meta_value_to_js(value: &MetaValue) -> JsValue {
    match value {
        MetaValue::Undefined => JsValue::UNDEFINED,
        MetaValue::Null => JsValue::NULL,
        MetaValue::Bool(value) => JsValue::from_bool(*value),
        MetaValue::Number(value) => JsValue::from_f64(*value),
        MetaValue::String(value) | MetaValue::Stringified(value) => JsValue::from_str(value),
        MetaValue::Array(items) => items.iter().map(meta_value_to_js).collect::<Array>().into(),
        MetaValue::Object(entries) => {
            let object = Object::new();
            for (key, value) in entries {
                _ = Reflect::set(&object, &JsValue::from_str(key), &meta_value_to_js(value));
            }
            object.into()
        }
    }
}
