//! Canvas animations for the laboratory site: an ambient geometric
//! background and an animated railway-network hero map.
//!
//! The simulation and drawing logic is platform independent and draws
//! through [`paint::Painter`]. The browser glue lives in the `wasm` module,
//! which only compiles for `wasm32`.

pub mod ambient;
pub mod config;
pub mod error;
pub mod geometry;
pub mod network;
pub mod paint;
pub mod scene;
pub mod topology;

pub use ambient::AmbientField;
pub use config::VizConfig;
pub use error::ConfigError;
pub use network::NetworkMap;
pub use scene::Scene;

// Only compile wasm-specific code when targeting wasm32.
#[cfg(target_arch = "wasm32")]
mod wasm {
    use wasm_bindgen::prelude::*;

    mod canvas2d;
    mod events;
    mod render;

    pub use render::{is_running, mount_page, pause_all, resume_all, step_all, CanvasScene};

    const BANNER: &str = "\
┌─────────────────────────────────────┐
│   NAKAYAMA LABORATORY               │
│   Urban Analytics × Human Flow × AI │
└─────────────────────────────────────┘";

    #[wasm_bindgen(start)]
    pub fn main() -> Result<(), JsValue> {
        console_error_panic_hook::set_once();
        console_log::init_with_level(log::Level::Info).ok();
        log::info!("\n{BANNER}");

        let window = web_sys::window().ok_or("no window")?;
        let document = window.document().ok_or("no document")?;

        render::mount_page(&document);
        Ok(())
    }
}

#[cfg(target_arch = "wasm32")]
pub use wasm::{is_running, mount_page, pause_all, resume_all, step_all, CanvasScene};
