//! JSON API for board evaluation
//!
//! Stateless entry points for a UI host: each call takes a JSON request,
//! builds a board, applies the request's placements and team toggles, and
//! returns an `ApiResponse` envelope as a JSON string.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::sync::Arc;
use tracing::{debug, error, info, warn};

use crate::analysis::{correlate, Significance, DEFAULT_SIGNIFICANCE_LEVEL};
use crate::config::{GridConfig, DEFAULT_CONFIG};
use crate::error::GridError;
use crate::grid::GridLayout;
use crate::models::{CellId, PersonId, PersonRecord};
use crate::session::{Board, BoardSummary};

/// API version for schema compatibility
pub const API_VERSION: &str = "v1";

/// Standard API response wrapper
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiResponse<T> {
    pub success: bool,
    pub data: Option<T>,
    pub error: Option<ApiError>,
    pub schema_version: String,
    pub timestamp: DateTime<Utc>,
}

/// Structured API error with codes and details
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiError {
    pub code: String,
    pub message: String,
    pub details: Option<HashMap<String, serde_json::Value>>,
}

impl ApiError {
    pub fn new(code: &str, message: &str) -> Self {
        Self { code: code.to_string(), message: message.to_string(), details: None }
    }

    pub fn with_details(
        code: &str,
        message: &str,
        details: HashMap<String, serde_json::Value>,
    ) -> Self {
        Self { code: code.to_string(), message: message.to_string(), details: Some(details) }
    }
}

impl From<GridError> for ApiError {
    fn from(error: GridError) -> Self {
        ApiError::new(error.code(), &error.to_string())
    }
}

impl<T> ApiResponse<T> {
    pub fn success(data: T) -> Self {
        Self {
            success: true,
            data: Some(data),
            error: None,
            schema_version: API_VERSION.to_string(),
            timestamp: Utc::now(),
        }
    }

    pub fn error(error: ApiError) -> Self {
        Self {
            success: false,
            data: None,
            error: Some(error),
            schema_version: API_VERSION.to_string(),
            timestamp: Utc::now(),
        }
    }
}

fn to_json<T: Serialize>(response: &ApiResponse<T>) -> String {
    serde_json::to_string(response).unwrap_or_else(|_| "{}".to_string())
}

/// One drag-and-drop result. `cell: null` unplaces the person.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlacementRequest {
    pub person_id: PersonId,
    #[serde(default)]
    pub cell: Option<CellId>,
}

/// Board evaluation request
///
/// Person ids refer to positions in the name-sorted roster. When `config`
/// is given it wins; otherwise `layout` selects a preset, falling back to the
/// process default.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BoardRequest {
    pub schema_version: Option<String>,
    pub layout: Option<GridLayout>,
    pub config: Option<GridConfig>,
    pub roster: Vec<PersonRecord>,
    #[serde(default)]
    pub placements: Vec<PlacementRequest>,
    /// Teams to hide; `null` hides persons with no team
    #[serde(default)]
    pub hidden_teams: Vec<Option<String>>,
}

impl BoardRequest {
    fn resolve_config(&self) -> Result<Arc<GridConfig>, ApiError> {
        match (&self.config, self.layout) {
            (Some(config), Some(layout)) if config.layout != layout => {
                let mut details = HashMap::new();
                details.insert("layout".to_string(), serde_json::json!(layout));
                details.insert("config_layout".to_string(), serde_json::json!(config.layout));
                Err(ApiError::with_details(
                    "LAYOUT_MISMATCH",
                    "Request layout does not match config layout",
                    details,
                ))
            }
            (Some(config), _) => Ok(Arc::new(config.clone())),
            (None, Some(layout)) => Ok(Arc::new(GridConfig::for_layout(layout))),
            (None, None) => Ok(Arc::clone(&*DEFAULT_CONFIG)),
        }
    }
}

/// Correlation request: `samples` is a list of `[x, y]` pairs.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CorrelationRequest {
    pub schema_version: Option<String>,
    pub samples: Vec<(f64, f64)>,
    pub significance_level: Option<f64>,
}

/// Correlation response. Undefined values are `null`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CorrelationResponse {
    pub sample_size: usize,
    pub coefficient: Option<f64>,
    pub p_value: Option<f64>,
    pub significance: Significance,
}

fn evaluate_board(request: &BoardRequest) -> Result<BoardSummary, ApiError> {
    let config = request.resolve_config()?;
    let mut board = Board::new(request.roster.clone(), config)?;

    for placement in &request.placements {
        if !board.assign_cell(placement.person_id, placement.cell)? {
            debug!("Placement for unknown person {} skipped", placement.person_id);
        }
    }

    for team in &request.hidden_teams {
        let team = team.as_deref();
        if board.is_team_visible(team) {
            board.toggle_team(team);
        }
    }

    Ok(board.summary())
}

/// Evaluate a board from JSON request string
///
/// # Arguments
/// * `request_json` - JSON string containing BoardRequest
///
/// # Returns
/// JSON string containing ApiResponse<BoardSummary>
pub fn evaluate_board_json(request_json: &str) -> String {
    info!("Processing board evaluation request");

    let request: BoardRequest = match serde_json::from_str(request_json) {
        Ok(req) => req,
        Err(e) => {
            error!("Failed to parse BoardRequest: {}", e);
            let error = ApiError::new("INVALID_JSON", &format!("Invalid JSON format: {}", e));
            return to_json(&ApiResponse::<BoardSummary>::error(error));
        }
    };

    match evaluate_board(&request) {
        Ok(summary) => {
            info!(
                "Evaluated {} layout: {} of {} persons visible",
                summary.layout, summary.total_visible, summary.total_persons
            );
            to_json(&ApiResponse::success(summary))
        }
        Err(error) => {
            warn!("Board evaluation failed: {} ({})", error.message, error.code);
            to_json(&ApiResponse::<BoardSummary>::error(error))
        }
    }
}

/// Correlate paired samples from JSON request string
///
/// # Returns
/// JSON string containing ApiResponse<CorrelationResponse>
pub fn correlate_json(request_json: &str) -> String {
    let request: CorrelationRequest = match serde_json::from_str(request_json) {
        Ok(req) => req,
        Err(e) => {
            error!("Failed to parse CorrelationRequest: {}", e);
            let error = ApiError::new("INVALID_JSON", &format!("Invalid JSON format: {}", e));
            return to_json(&ApiResponse::<CorrelationResponse>::error(error));
        }
    };

    let level = request.significance_level.unwrap_or(DEFAULT_SIGNIFICANCE_LEVEL);
    if !(level > 0.0 && level < 1.0) {
        let error = ApiError::new(
            "INVALID_CONFIG",
            &format!("Significance level {} must be in (0, 1)", level),
        );
        return to_json(&ApiResponse::<CorrelationResponse>::error(error));
    }

    let result = correlate(&request.samples);
    debug!(
        "Correlated {} samples: r={} p={}",
        request.samples.len(),
        result.coefficient,
        result.p_value
    );

    let finite = |v: f64| if v.is_nan() { None } else { Some(v) };
    to_json(&ApiResponse::success(CorrelationResponse {
        sample_size: request.samples.len(),
        coefficient: finite(result.coefficient),
        p_value: finite(result.p_value),
        significance: Significance::classify(result.p_value, level),
    }))
}
