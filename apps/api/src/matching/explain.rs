//! Human-readable explanations attached to each ranked posting.

use crate::matching::vector_space::{term_products, SparseVector, TfIdfModel};
use crate::models::posting::CandidateRecord;

/// Similarity above which a textual match is mentioned.
pub const MATCH_THRESHOLD: f64 = 0.05;

/// How many contributing terms an explanation lists.
pub const EXPLAIN_TOP_TERMS: usize = 3;

pub const FALLBACK_EXPLANATION: &str = "Recommended based on general popularity and ratings.";

/// Terms with the largest positive share of the query/document dot product.
///
/// Equal contributions list the higher feature index first.
pub fn top_contributing_terms<'m>(
    model: &'m TfIdfModel,
    query_vec: &SparseVector,
    doc_vec: &SparseVector,
    limit: usize,
) -> Vec<&'m str> {
    let mut contributions: Vec<(usize, f64)> = term_products(query_vec, doc_vec)
        .into_iter()
        .filter(|(_, product)| *product > 0.0)
        .collect();
    contributions.sort_by(|a, b| b.1.total_cmp(&a.1).then_with(|| b.0.cmp(&a.0)));

    contributions
        .into_iter()
        .filter_map(|(i, _)| model.feature_name(i))
        .take(limit)
        .collect()
}

/// Four bullet lines: textual match, similarity, popularity, prestige.
pub fn build_explanation(similarity: f64, top_terms: &[&str], posting: &CandidateRecord) -> String {
    let match_line = if similarity > MATCH_THRESHOLD && !top_terms.is_empty() {
        format!("• Keyword Match: {}", top_terms.join(", "))
    } else if similarity > MATCH_THRESHOLD {
        "• General textual match with your resume.".to_string()
    } else {
        "• No strong skill match, ranked by popularity and ratings.".to_string()
    };

    [
        match_line,
        format!("• Similarity Score: {similarity:.3}"),
        format!("• Popularity Score: {}/100", posting.popularity),
        format!("• Prestige Score: {}/10", posting.company_prestige),
    ]
    .join("\n")
}
