use std::fmt;

pub type Result<T, E = RefractError> = std::result::Result<T, E>;

/// Pipeline stage of a shader, used in compile diagnostics.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShaderStage {
    Vertex,
    Fragment,
}

impl fmt::Display for ShaderStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ShaderStage::Vertex => f.write_str("vertex"),
            ShaderStage::Fragment => f.write_str("fragment"),
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum RefractError {
    #[error("failed to compile {stage} shader: {log}")]
    ShaderCompile { stage: ShaderStage, log: String },
    #[error("failed to link program: {log}")]
    ShaderLink { log: String },
    #[error("failed to load {uri}: {reason}")]
    Load { uri: String, reason: String },
    #[error("failed to decode {uri}: {source}")]
    Decode {
        uri: String,
        #[source]
        source: image::ImageError,
    },
    #[error("{uri} decoded to an empty bitmap")]
    EmptyBitmap { uri: String },
    #[error("viewport {width}x{height} has no area")]
    EmptyViewport { width: u32, height: u32 },
    #[error("frame loop ticked before start")]
    LoopNotStarted,
    #[error("{0}")]
    Platform(String),
}

impl From<&str> for RefractError {
    fn from(message: &str) -> Self {
        RefractError::Platform(message.to_string())
    }
}

#[cfg(target_arch = "wasm32")]
impl From<wasm_bindgen::JsValue> for RefractError {
    fn from(value: wasm_bindgen::JsValue) -> Self {
        match value.as_string() {
            Some(message) => RefractError::Platform(message),
            None => RefractError::Platform(format!("{:?}", value)),
        }
    }
}

#[cfg(target_arch = "wasm32")]
impl From<RefractError> for wasm_bindgen::JsValue {
    fn from(err: RefractError) -> Self {
        js_sys::Error::new(&err.to_string()).into()
    }
}
