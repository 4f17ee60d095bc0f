use thiserror::Error;
use wasm_bindgen::JsValue;

#[derive(Error, Debug)]
pub enum EffectError {
    #[error("No global window available")]
    NoWindow,
    #[error("Window has no document")]
    NoDocument,
    #[error("DOM call failed: {0}")]
    Dom(String),
    #[error("Invalid effects config: {0}")]
    Config(#[from] serde_json::Error),
}

impl From<JsValue> for EffectError {
    fn from(value: JsValue) -> Self {
        let message = value
            .as_string()
            .unwrap_or_else(|| format!("{:?}", value));
        EffectError::Dom(message)
    }
}
