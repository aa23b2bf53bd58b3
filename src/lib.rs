use wasm_bindgen::prelude::*;
mod api;
mod error;
mod interop;
mod logger;

pub use api::{init_logging, set_panic_hook};

#[wasm_bindgen]
pub struct World {
    pub(crate) inner: cityscape::World,
}

impl World {
    pub fn rs_new() -> World {
        World { inner: cityscape::World::default() }
    }
    pub fn rs_graph_hash(&self) -> u64 {
        self.inner.graph().hash()
    }
}
