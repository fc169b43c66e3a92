//! Full-window refraction effect: an image sampled through a fragment shader
//! that distorts it with a second, wheel-blurred "offsets" image.
//!
//! The cropping, input and frame-loop logic is plain Rust and builds on any
//! target. The browser layer (WebGL2, DOM events, asset fetching) only builds
//! for `wasm32`.

pub mod config;
pub mod crop;
pub mod error;
pub mod frame;
pub mod input;

pub use config::Config;
pub use crop::{cover_region, crop, Bitmap, CropRegion, CroppedFrame, Viewport};
pub use error::{RefractError, Result, ShaderStage};
pub use frame::{blur_radius, CancelToken, Clock, FrameLoop, FrameTarget, FrameUniforms, LoopState, Tick};
pub use input::{InputSnapshot, InputState};

// Only compile wasm-specific code when targeting wasm32.
#[cfg(target_arch = "wasm32")]
pub mod wasm {
    pub mod assets;
    pub mod events;
    pub mod program;
    pub mod render;
    pub mod texture;

    pub use render::{main, stop};
}
