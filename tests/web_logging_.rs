#![cfg(target_arch = "wasm32")]

use std::sync::Once;

static LOG_INITIALIZED: Once = Once::new();

pub fn init() {
	LOG_INITIALIZED.call_once(tracing_wasm::set_as_global_default);
}
