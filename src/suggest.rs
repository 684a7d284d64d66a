//! Boundary to the external placement-suggestion model.
//!
//! The model itself is opaque: callers implement [`PlacementOracle`] over
//! whatever client they use. Images travel as `data:<mime>;base64,<payload>`
//! URIs. Accepted suggestions are placed through the engine's normal
//! collision-checked path, one at a time.

use base64::engine::general_purpose::STANDARD;
use base64::Engine as _;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;

use crate::layout::engine::PlacementEngine;
use crate::layout::error::PlacementError;
use crate::layout::types::Point;
use crate::model::{BookableObject, Floor, ObjectKind};

/// Maximum number of example layouts sent along with a request
pub const MAX_EXAMPLE_LAYOUTS: usize = 3;

/// Errors raised at the suggestion boundary
#[derive(Debug, Error)]
pub enum SuggestError {
    #[error("at most {max} example layouts may be attached, got {count}")]
    TooManyExamples { count: usize, max: usize },

    #[error("invalid data URI: {0}")]
    InvalidDataUri(String),

    #[error("invalid base64 payload: {0}")]
    Base64(#[from] base64::DecodeError),

    #[error("invalid suggestion: {0}")]
    InvalidSuggestion(String),

    /// Failure reported by the oracle implementation
    #[error("suggestion service failed: {0}")]
    Oracle(String),
}

/// Encode raw image bytes as a data URI
pub fn encode_data_uri(mime: &str, bytes: &[u8]) -> String {
    format!("data:{};base64,{}", mime, STANDARD.encode(bytes))
}

/// Split a base64 data URI into its MIME type and decoded bytes
pub fn decode_data_uri(uri: &str) -> Result<(String, Vec<u8>), SuggestError> {
    let rest = uri
        .strip_prefix("data:")
        .ok_or_else(|| SuggestError::InvalidDataUri("missing 'data:' prefix".to_string()))?;
    let (mime, payload) = rest
        .split_once(";base64,")
        .ok_or_else(|| SuggestError::InvalidDataUri("expected ';base64,' marker".to_string()))?;
    if mime.is_empty() {
        return Err(SuggestError::InvalidDataUri("missing MIME type".to_string()));
    }
    Ok((mime.to_string(), STANDARD.decode(payload)?))
}

/// A request for placement suggestions on one floor plan
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SuggestionRequest {
    pub floor_plan_data_uri: String,
    pub object_type: ObjectKind,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub example_layouts: Vec<String>,
}

impl SuggestionRequest {
    pub fn new(floor_plan_data_uri: impl Into<String>, object_type: ObjectKind) -> Self {
        Self {
            floor_plan_data_uri: floor_plan_data_uri.into(),
            object_type,
            example_layouts: vec![],
        }
    }

    /// Build a request straight from image bytes
    pub fn from_image(mime: &str, bytes: &[u8], object_type: ObjectKind) -> Self {
        Self::new(encode_data_uri(mime, bytes), object_type)
    }

    /// Attach an example layout image to guide the model
    pub fn with_example(mut self, data_uri: impl Into<String>) -> Result<Self, SuggestError> {
        if self.example_layouts.len() >= MAX_EXAMPLE_LAYOUTS {
            return Err(SuggestError::TooManyExamples {
                count: self.example_layouts.len() + 1,
                max: MAX_EXAMPLE_LAYOUTS,
            });
        }
        self.example_layouts.push(data_uri.into());
        Ok(self)
    }

    /// Check the request before it leaves the process
    pub fn validate(&self) -> Result<(), SuggestError> {
        if self.example_layouts.len() > MAX_EXAMPLE_LAYOUTS {
            return Err(SuggestError::TooManyExamples {
                count: self.example_layouts.len(),
                max: MAX_EXAMPLE_LAYOUTS,
            });
        }
        decode_data_uri(&self.floor_plan_data_uri)?;
        for example in &self.example_layouts {
            decode_data_uri(example)?;
        }
        Ok(())
    }
}

/// One suggested centre position, in plan percentages
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Suggestion {
    pub x: f64,
    pub y: f64,
    /// Model confidence in [0, 1]
    pub confidence: f64,
}

impl Suggestion {
    pub fn new(x: f64, y: f64, confidence: f64) -> Self {
        Self { x, y, confidence }
    }

    pub fn position(&self) -> Point {
        Point::new(self.x, self.y)
    }

    pub fn validate(&self) -> Result<(), SuggestError> {
        if !(self.x.is_finite() && self.y.is_finite()) {
            return Err(SuggestError::InvalidSuggestion(
                "coordinates must be finite".to_string(),
            ));
        }
        if !(0.0..=1.0).contains(&self.confidence) {
            return Err(SuggestError::InvalidSuggestion(format!(
                "confidence {} outside [0, 1]",
                self.confidence
            )));
        }
        Ok(())
    }
}

/// Response body returned by the model
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SuggestionResponse {
    pub suggestions: Vec<Suggestion>,
}

/// Source of placement suggestions
pub trait PlacementOracle {
    fn suggest(&self, request: &SuggestionRequest) -> Result<Vec<Suggestion>, SuggestError>;
}

/// Ask the oracle for suggestions, drop malformed ones, and return the
/// rest ordered by descending confidence.
pub fn request_suggestions(
    oracle: &dyn PlacementOracle,
    request: &SuggestionRequest,
) -> Result<Vec<Suggestion>, SuggestError> {
    request.validate()?;
    let mut suggestions: Vec<Suggestion> = oracle
        .suggest(request)?
        .into_iter()
        .filter(|s| match s.validate() {
            Ok(()) => true,
            Err(e) => {
                debug!(error = %e, "discarding suggestion");
                false
            }
        })
        .collect();
    suggestions.sort_by(|a, b| b.confidence.total_cmp(&a.confidence));
    Ok(suggestions)
}

/// Accept every suggestion in order. Each one is placed independently, so
/// a colliding suggestion is reported and the rest still get their turn.
pub fn accept_all(
    engine: &PlacementEngine,
    floor: &mut Floor,
    suggestions: &[Suggestion],
) -> Vec<Result<BookableObject, PlacementError>> {
    suggestions
        .iter()
        .map(|s| engine.accept_suggestion(floor, s))
        .collect()
}
