#![cfg(target_arch = "wasm32")]

use cityscape_wasm::World;
use js_sys::Reflect;
use wasm_bindgen::JsValue;
use wasm_bindgen_test::*;

wasm_bindgen_test_configure!(run_in_browser);

fn is_ok(v: &JsValue) -> bool {
    Reflect::get(v, &JsValue::from_str("ok"))
        .ok()
        .and_then(|x| x.as_bool())
        .unwrap_or(false)
}

fn err_code(v: &JsValue) -> Option<String> {
    let err = Reflect::get(v, &JsValue::from_str("error")).ok()?;
    Reflect::get(&err, &JsValue::from_str("code")).ok()?.as_string()
}

fn road(w: &mut World, len: f64) {
    assert!(w.add_point(0.0, 0.0));
    assert!(w.add_point(len, 0.0));
    assert!(w.add_segment(0.0, 0.0, len, 0.0));
}

#[wasm_bindgen_test]
fn editing_and_sync() {
    let mut w = World::new();
    let empty = w.graph_hash();
    road(&mut w, 400.0);
    assert_ne!(w.graph_hash(), empty);
    assert!(!w.add_segment(400.0, 0.0, 0.0, 0.0));
    assert!(w.sync());
    assert!(!w.sync());
    assert!(w.road_border_data().length() > 0);
    assert_eq!(w.road_border_data().length() % 4, 0);
    assert!(w.tree_data().length() % 3 == 0);

    assert!(w.remove_point(0.0, 0.0));
    assert_eq!(w.segment_count(), 0);
    assert!(w.sync());
    assert_eq!(w.road_border_data().length(), 0);
}

#[wasm_bindgen_test]
fn typed_errors() {
    let mut w = World::new();
    assert_eq!(err_code(&w.add_point_res(f64::NAN, 0.0)).as_deref(), Some("non_finite"));
    assert_eq!(err_code(&w.add_point_res(5e6, 0.0)).as_deref(), Some("out_of_range"));
    assert_eq!(err_code(&w.move_point_res(1.0, 1.0, 2.0, 2.0)).as_deref(), Some("not_found"));
    assert_eq!(err_code(&w.add_marking_res("bus", 0.0, 0.0, 10.0)).as_deref(), Some("invalid_kind"));
    assert_eq!(err_code(&w.add_marking_res("stop", 0.0, 0.0, 10.0)).as_deref(), Some("not_found"));
    assert_eq!(w.point_count(), 0);
}

#[wasm_bindgen_test]
fn markings_and_lights() {
    let mut w = World::new();
    road(&mut w, 400.0);
    w.sync();
    assert!(is_ok(&w.add_marking_res("light", 100.0, 2.0, 20.0)));
    assert_eq!(w.marking_count(), 1);
    assert!(w.cycle_light_at(100.0, 0.0));
    assert!(!w.cycle_light_at(300.0, 0.0));
    assert!(w.remove_marking_at(100.0, 0.0));
    assert_eq!(w.marking_count(), 0);
}

#[wasm_bindgen_test]
fn json_roundtrip_and_svg() {
    let mut w = World::new();
    road(&mut w, 400.0);
    w.sync();
    assert!(is_ok(&w.add_marking_res("stop", 200.0, 0.0, 20.0)));
    let saved = w.to_json();

    let mut back = World::new();
    assert!(is_ok(&back.from_json_res(saved)));
    assert_eq!(back.graph_hash(), w.graph_hash());
    assert_eq!(back.marking_count(), 1);
    assert!(back.render_svg(200.0, 200.0).starts_with("<svg"));

    let bad = js_sys::JSON::parse(r#"{"graph":{"points":[],"segments":[{"p1":0,"p2":1}]}}"#).unwrap();
    assert_eq!(err_code(&back.from_json_res(bad)).as_deref(), Some("invalid_id"));
    assert_eq!(back.marking_count(), 1, "state replaced on error");
}

#[wasm_bindgen_test]
fn non_finite_points_are_refused() {
    let mut w = World::new();
    let empty = w.graph_hash();
    assert!(!w.add_point(f64::NAN, 0.0));
    assert!(!w.add_point(0.0, f64::INFINITY));
    assert_eq!(w.point_count(), 0);
    assert_eq!(w.graph_hash(), empty);

    assert!(w.add_point(1.0, 1.0));
    assert!(!w.move_point(1.0, 1.0, f64::NAN, 2.0));
    assert!(w.remove_point(1.0, 1.0));
    assert_eq!(w.point_count(), 0);
}

#[wasm_bindgen_test]
fn invalid_params_are_out_of_range() {
    let mut w = World::new();
    let bad = js_sys::JSON::parse(r#"{"buildingMinLength":0,"spacing":0}"#).unwrap();
    assert_eq!(err_code(&w.set_params_res(bad)).as_deref(), Some("out_of_range"));
    let ok = js_sys::JSON::parse(r#"{"roadWidth":60}"#).unwrap();
    assert!(is_ok(&w.set_params_res(ok)));
}
