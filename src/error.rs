use crate::interop::{new_obj, set_kv};
use cityscape::LoadError;
use wasm_bindgen::JsValue;

pub fn ok(v: JsValue) -> JsValue {
    let o = new_obj();
    set_kv(&o, "ok", &JsValue::from_bool(true));
    set_kv(&o, "value", &v);
    o.into()
}

pub fn err(code: &'static str, message: impl Into<String>, data: Option<JsValue>) -> JsValue {
    let root = new_obj();
    set_kv(&root, "ok", &JsValue::from_bool(false));
    let e = new_obj();
    set_kv(&e, "code", &JsValue::from_str(code));
    set_kv(&e, "message", &JsValue::from_str(&message.into()));
    if let Some(d) = data {
        set_kv(&e, "data", &d);
    }
    set_kv(&root, "error", &e.into());
    root.into()
}

#[inline]
pub fn non_finite(param: &str) -> JsValue {
    let d = new_obj();
    set_kv(&d, "param", &JsValue::from_str(param));
    err("non_finite", format!("parameter '{}' must be finite", param), Some(d.into()))
}

#[inline]
pub fn out_of_range(param: &str, min: f64, max: f64, got: f64) -> JsValue {
    let d = new_obj();
    set_kv(&d, "param", &JsValue::from_str(param));
    set_kv(&d, "min", &JsValue::from_f64(min));
    set_kv(&d, "max", &JsValue::from_f64(max));
    set_kv(&d, "got", &JsValue::from_f64(got));
    err("out_of_range", format!("parameter '{}' out of range", param), Some(d.into()))
}

#[inline]
pub fn not_found(kind: &str, x: f64, y: f64) -> JsValue {
    let d = new_obj();
    set_kv(&d, "kind", &JsValue::from_str(kind));
    set_kv(&d, "x", &JsValue::from_f64(x));
    set_kv(&d, "y", &JsValue::from_f64(y));
    err("not_found", format!("no {} at ({}, {})", kind, x, y), Some(d.into()))
}

#[inline]
pub fn invalid_kind(got: &str) -> JsValue {
    let d = new_obj();
    set_kv(&d, "got", &JsValue::from_str(got));
    err(
        "invalid_kind",
        "kind must be one of stop, yield, crossing, light, target, parking, start",
        Some(d.into()),
    )
}

pub fn load_error(e: &LoadError) -> JsValue {
    let data = match e {
        LoadError::DanglingSegment { index, len } => {
            let d = new_obj();
            set_kv(&d, "index", &JsValue::from_f64(*index as f64));
            set_kv(&d, "len", &JsValue::from_f64(*len as f64));
            Some(d.into())
        }
        LoadError::TooManyPoints { got, max }
        | LoadError::TooManySegments { got, max }
        | LoadError::TooManyMarkings { got, max } => {
            let d = new_obj();
            set_kv(&d, "got", &JsValue::from_f64(*got as f64));
            set_kv(&d, "max", &JsValue::from_f64(*max as f64));
            Some(d.into())
        }
        LoadError::CoordinateOutOfBounds { x, y } => {
            let d = new_obj();
            set_kv(&d, "x", &JsValue::from_f64(*x));
            set_kv(&d, "y", &JsValue::from_f64(*y));
            Some(d.into())
        }
        LoadError::InvalidParams { field, value } => {
            let d = new_obj();
            set_kv(&d, "param", &JsValue::from_str(field));
            set_kv(&d, "got", &JsValue::from_f64(*value));
            Some(d.into())
        }
        LoadError::Json(_) => None,
    };
    err(e.code(), e.to_string(), data)
}
