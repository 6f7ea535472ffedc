use thiserror::Error;
use wasm_bindgen::JsValue;

/// Everything that can go wrong in the page behavior layer. None of these
/// are fatal: callers log them and keep the rest of the page running.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum UiError {
    #[error("required element `{0}` is missing from the page")]
    MissingElement(String),

    #[error("active section tracking needs at least one section")]
    NoSections,

    #[error("{0}")]
    InvalidInput(String),

    #[error("storage unavailable: {0}")]
    Storage(String),

    #[error("content catalog is malformed: {0}")]
    Content(String),

    #[error("dom call failed: {0}")]
    Dom(String),
}

impl From<JsValue> for UiError {
    fn from(value: JsValue) -> Self {
        let message = value
            .as_string()
            .unwrap_or_else(|| format!("{:?}", value));
        UiError::Dom(message)
    }
}

impl From<serde_json::Error> for UiError {
    fn from(err: serde_json::Error) -> Self {
        UiError::Content(err.to_string())
    }
}

/// Runs a feature setup step and logs instead of propagating, so one broken
/// feature never takes the others down with it.
pub fn isolate<T>(feature: &str, result: Result<T, UiError>) -> Option<T> {
    match result {
        Ok(value) => Some(value),
        Err(err) => {
            log::warn!("{} disabled: {}", feature, err);
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn isolate_swallows_errors() {
        let out: Option<u8> = isolate("search", Err(UiError::MissingElement("#searchInput".into())));
        assert_eq!(out, None);
        assert_eq!(isolate("search", Ok(3u8)), Some(3));
    }

    #[test]
    fn messages_name_the_problem() {
        let err = UiError::MissingElement("#header".to_string());
        assert_eq!(err.to_string(), "required element `#header` is missing from the page");
        assert_eq!(UiError::InvalidInput("Please enter your name".into()).to_string(), "Please enter your name");
    }
}
