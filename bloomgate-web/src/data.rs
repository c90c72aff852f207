//! Embedded journey data, parsed once per page.

use bloomgate_core::{Content, ContentError, JourneyConfig, JourneyConfigError};
use once_cell::sync::Lazy;

const JOURNEY_JSON: &str = include_str!("../static/assets/data/journey.json");
const CONTENT_JSON: &str = include_str!("../static/assets/data/content.json");

#[derive(Debug, Clone, thiserror::Error)]
pub enum WebDataError {
    #[error("journey config: {0}")]
    Config(#[from] JourneyConfigError),
    #[error("journey content: {0}")]
    Content(#[from] ContentError),
}

static CONFIG: Lazy<Result<JourneyConfig, JourneyConfigError>> =
    Lazy::new(|| JourneyConfig::from_json(JOURNEY_JSON));

static CONTENT: Lazy<Result<Content, WebDataError>> = Lazy::new(|| {
    let config = journey_config()?;
    Ok(Content::from_json(CONTENT_JSON, config.total_stages)?)
});

/// Shipped journey configuration.
///
/// # Errors
///
/// Returns an error if `journey.json` fails to parse or validate.
pub fn journey_config() -> Result<&'static JourneyConfig, WebDataError> {
    CONFIG.as_ref().map_err(|err| WebDataError::Config(err.clone()))
}

/// Shipped copy for every scene.
///
/// # Errors
///
/// Returns an error if `content.json` is malformed or lacks bloom lines.
pub fn content() -> Result<&'static Content, WebDataError> {
    CONTENT.as_ref().map_err(Clone::clone)
}
