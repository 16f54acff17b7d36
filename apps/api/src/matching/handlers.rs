//! Axum route handlers for the Matching API.

use axum::{
    extract::{Multipart, State},
    Json,
};
use rand::rngs::StdRng;
use rand::SeedableRng;
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::catalog::CatalogStats;
use crate::errors::AppError;
use crate::extraction::{ensure_pdf_file_name, extract_pdf_text};
use crate::matching::engine::{MatchQuery, RankedResult};
use crate::models::posting::CandidateRecord;
use crate::state::AppState;

// ────────────────────────────────────────────────────────────────────────────
// Request / Response types
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
pub struct TextMatchRequest {
    pub resume_text: String,
    #[serde(default)]
    pub interests: String,
    pub top_n: Option<usize>,
}

/// One shortlist entry as returned over HTTP.
#[derive(Debug, Serialize)]
pub struct MatchResult {
    /// Rounded to 4 decimal places.
    pub score: f64,
    pub internship: CandidateRecord,
    pub explanation: String,
}

impl From<RankedResult<'_>> for MatchResult {
    fn from(result: RankedResult<'_>) -> Self {
        Self {
            score: (result.score * 10_000.0).round() / 10_000.0,
            internship: result.posting.clone(),
            explanation: result.explanation,
        }
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Handlers
// ────────────────────────────────────────────────────────────────────────────

/// POST /api/v1/matches
///
/// Multipart form: `resume` (PDF file, required), `interests` (text, optional),
/// `top_n` (integer, optional). The PDF is rejected before ranking if it is not
/// a PDF or yields no text.
pub async fn handle_match_upload(
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> Result<Json<Vec<MatchResult>>, AppError> {
    let mut resume: Option<Vec<u8>> = None;
    let mut interests = String::new();
    let mut top_n = None;

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::Validation(format!("Malformed multipart body: {e}")))?
    {
        let name = field.name().unwrap_or_default().to_string();
        match name.as_str() {
            "resume" => {
                ensure_pdf_file_name(field.file_name().unwrap_or_default())?;
                let bytes = field
                    .bytes()
                    .await
                    .map_err(|e| AppError::Validation(format!("Failed to read resume: {e}")))?;
                resume = Some(bytes.to_vec());
            }
            "interests" => {
                interests = field
                    .text()
                    .await
                    .map_err(|e| AppError::Validation(format!("Failed to read interests: {e}")))?;
            }
            "top_n" => {
                let raw = field
                    .text()
                    .await
                    .map_err(|e| AppError::Validation(format!("Failed to read top_n: {e}")))?;
                top_n = Some(parse_top_n(&raw)?);
            }
            _ => {}
        }
    }

    let bytes =
        resume.ok_or_else(|| AppError::Validation("No resume file provided".to_string()))?;
    let resume_text = extract_pdf_text(bytes).await?;

    let query = MatchQuery::new(resume_text).with_interests(interests);
    let results = run_match(&state, &query, top_n).await?;
    Ok(Json(results))
}

/// POST /api/v1/matches/text
///
/// Same ranking for callers that already hold the profile text. Empty text is
/// accepted and ranks by posting signals alone.
pub async fn handle_match_text(
    State(state): State<AppState>,
    Json(request): Json<TextMatchRequest>,
) -> Result<Json<Vec<MatchResult>>, AppError> {
    if request.top_n == Some(0) {
        return Err(AppError::Validation("top_n must be at least 1".to_string()));
    }

    let query = MatchQuery::new(request.resume_text).with_interests(request.interests);
    let results = run_match(&state, &query, request.top_n).await?;
    Ok(Json(results))
}

/// GET /api/v1/catalog/stats
pub async fn handle_catalog_stats(
    State(state): State<AppState>,
) -> Result<Json<CatalogStats>, AppError> {
    let postings = state.catalog.list_postings().await?;
    Ok(Json(CatalogStats::from_postings(&postings)))
}

// ────────────────────────────────────────────────────────────────────────────
// Helpers
// ────────────────────────────────────────────────────────────────────────────

async fn run_match(
    state: &AppState,
    query: &MatchQuery,
    top_n: Option<usize>,
) -> Result<Vec<MatchResult>, AppError> {
    let postings = state.catalog.list_postings().await?;
    if postings.is_empty() {
        return Err(AppError::NotFound(
            "No internship opportunities available.".to_string(),
        ));
    }

    let top_n = top_n.unwrap_or(state.config.default_top_n);
    let mut rng = request_rng(state.config.rank_seed);
    let ranked = state.engine.rank(query, &postings, top_n, &mut rng);

    info!(
        candidates = postings.len(),
        returned = ranked.len(),
        "Ranked postings for match request"
    );

    Ok(ranked.into_iter().map(MatchResult::from).collect())
}

fn request_rng(seed: Option<u64>) -> StdRng {
    match seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    }
}

fn parse_top_n(raw: &str) -> Result<usize, AppError> {
    match raw.trim().parse::<usize>() {
        Ok(n) if n >= 1 => Ok(n),
        _ => Err(AppError::Validation(
            "top_n must be a positive integer".to_string(),
        )),
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Tests
// ────────────────────────────────────────────────────────────────────────────
