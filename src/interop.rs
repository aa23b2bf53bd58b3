use js_sys::{Float64Array, Object, Reflect, Uint32Array};
use serde::Serialize;
use wasm_bindgen::JsValue;

pub fn new_obj() -> Object { Object::new() }

pub fn set_kv(obj: &Object, key: &str, val: &JsValue) {
    let _ = Reflect::set(obj, &JsValue::from_str(key), val);
}

pub fn arr_u32(data: &[u32]) -> Uint32Array { Uint32Array::from(data) }
pub fn arr_f64(data: &[f64]) -> Float64Array { Float64Array::from(data) }

/// Plain JS objects and arrays rather than `Map`s, so results read like JSON.
pub fn to_js<T: Serialize + ?Sized>(value: &T) -> JsValue {
    let ser = serde_wasm_bindgen::Serializer::json_compatible();
    value.serialize(&ser).unwrap_or(JsValue::NULL)
}
