use wasm_bindgen::JsValue;

/// Failures surfaced by the board client
#[derive(Debug, thiserror::Error)]
pub enum BoardError {
    /// Fetch rejected, or the browser handed back something unexpected
    #[error("transport error: {0}")]
    Transport(String),
    #[error("invalid response body: {0}")]
    Decode(#[from] serde_json::Error),
    /// Server answered with a non-2xx status
    #[error("request rejected with HTTP {status}")]
    Rejected { status: u16, detail: Option<String> },
    #[error("element #{0} not found")]
    MissingElement(&'static str),
}

impl BoardError {
    /// Transport and decode failures are logged; rejections are shown verbatim
    pub const fn is_transport(&self) -> bool {
        matches!(self, Self::Transport(_) | Self::Decode(_))
    }
}

impl From<JsValue> for BoardError {
    fn from(value: JsValue) -> Self {
        let text = value
            .as_string()
            .or_else(|| {
                js_sys::Reflect::get(&value, &"message".into())
                    .ok()
                    .and_then(|m| m.as_string())
            })
            .unwrap_or_else(|| format!("{value:?}"));
        Self::Transport(text)
    }
}

impl From<BoardError> for JsValue {
    fn from(err: BoardError) -> Self {
        Self::from_str(&err.to_string())
    }
}
