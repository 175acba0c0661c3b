//! Global Application State
//!
//! Development flags resolved once at startup and provided through context.

use fire_dashboard::config::{parse_flag, DevConfig};
use leptos::*;

use crate::api::Source;

/// Global application state provided to all components
#[derive(Clone)]
pub struct GlobalState {
    /// Where pages fetch their data from
    pub source: Source,
}

impl GlobalState {
    pub fn new(dev: DevConfig) -> Self {
        Self {
            source: Source::for_dev(dev),
        }
    }
}

/// Resolve development flags from the build: debug builds count as
/// development, mocking comes from `FIRE_DASHBOARD_USE_MOCKING` at compile time
pub fn bootstrap() -> DevConfig {
    let use_mocking = option_env!("FIRE_DASHBOARD_USE_MOCKING")
        .and_then(parse_flag)
        .unwrap_or(false);
    let dev = DevConfig::new(cfg!(debug_assertions), use_mocking);

    if dev.mocking_enabled() {
        web_sys::console::info_1(&"Development mocking enabled, serving fixtures".into());
    }
    dev
}

/// Provide global state to the component tree
pub fn provide_global_state(dev: DevConfig) {
    provide_context(GlobalState::new(dev));
}
