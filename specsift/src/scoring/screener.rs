use rayon::prelude::*;
use tracing::debug;

use super::dissimilarity::{
    combined_score,
    score_direction,
};
use super::match_table::MatchRow;
use crate::models::{
    ScreenParams,
    Spectrum,
};

/// Scores query scans against a fixed background set.
///
/// Every background scan passing the precursor gate yields one scored row;
/// queries with no gate-compatible background scan yield a single marker
/// row, so every query shows up in the output.
pub struct Screener {
    pub background: Vec<Spectrum>,
    pub params: ScreenParams,
}

impl Screener {
    pub fn new(background: Vec<Spectrum>, params: ScreenParams) -> Self {
        Self { background, params }
    }

    /// Strictly within the precursor mass tolerance and identical in charge.
    fn gate(&self, query: &Spectrum, reference: &Spectrum) -> bool {
        (query.precursor_mass - reference.precursor_mass).abs()
            < self.params.precursor_mass_tolerance
            && query.charge == reference.charge
    }

    /// Rows for one query, in background enumeration order.
    pub fn screen_one(&self, query: &Spectrum) -> Vec<MatchRow> {
        let mut rows = Vec::new();
        for reference in self.background.iter() {
            if !self.gate(query, reference) {
                continue;
            }
            let forward = score_direction(query, reference, &self.params);
            let reverse = score_direction(reference, query, &self.params);
            rows.push(MatchRow::hit(
                query,
                reference,
                combined_score(forward, reverse),
            ));
        }
        if rows.is_empty() {
            debug!("No background scan gate-compatible with {}", query.scan_id);
            rows.push(MatchRow::no_match(query));
        }
        rows
    }

    /// Scores queries in parallel. Rows keep query enumeration order and,
    /// within a query, background order, so the output is identical to a
    /// sequential pass.
    pub fn screen_iter(&self, queries: &[Spectrum]) -> Vec<MatchRow> {
        queries
            .par_iter()
            .flat_map_iter(|query| self.screen_one(query))
            .collect()
    }
}
