use crate::models::{
    ScreenParams,
    Spectrum,
};

/// Weights of the three mass regions, low to high.
const REGION_WEIGHTS: [f64; 3] = [2.0, 1.0, 4.0];
/// Lower edge of the mid region as a fraction of the pivot.
const MID_REGION_START: f64 = 0.9;

/// Weighted accumulators of one scoring direction.
///
/// `total_weighted` is the weighted sum of all significant subject signal,
/// `unmatched_weighted` the weighted sum of the part with no counterpart in
/// the reference. Both are sums of normalized intensities, so they depend on
/// the subject's own base peak only.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct DirectionalScore {
    pub unmatched_weighted: f64,
    pub total_weighted: f64,
}

impl DirectionalScore {
    /// Fraction of significant subject signal left unmatched, in [0, 1].
    ///
    /// A subject with no significant signal carries no evidence of
    /// similarity, so an empty total scores 1.0.
    pub fn dissimilarity(&self) -> f64 {
        if self.total_weighted == 0.0 {
            1.0
        } else {
            self.unmatched_weighted / self.total_weighted
        }
    }
}

/// Combines the two directions of a pair into one score, pooling the
/// accumulators rather than averaging the two ratios. Same zero-total
/// convention as [`DirectionalScore::dissimilarity`].
pub fn combined_score(forward: DirectionalScore, reverse: DirectionalScore) -> f64 {
    let total = forward.total_weighted + reverse.total_weighted;
    if total == 0.0 {
        1.0
    } else {
        (forward.unmatched_weighted + reverse.unmatched_weighted) / total
    }
}

/// Region of a fragment mass relative to the precursor m/z pivot.
///
/// The partition is exact: [0, 0.9 * pivot), [0.9 * pivot, pivot),
/// [pivot, inf).
fn mass_region(mass: f64, pivot: f64) -> usize {
    if mass < MID_REGION_START * pivot {
        0
    } else if mass < pivot {
        1
    } else {
        2
    }
}

/// Scores `subject` against `reference` in one direction.
///
/// Every significant subject peak (normalized intensity strictly above
/// `significance_height`) contributes its normalized intensity to the total
/// of its mass region; peaks with a significant reference peak within
/// `fragment_mass_tolerance` (inclusive window) also contribute to the
/// matched side. The reference scan runs on a cursor that only ever moves
/// forward and only on a match, so one reference peak may serve several
/// subject peaks but the whole pass stays linear.
///
/// The direction matters: `score_direction(a, b)` normalizes and bins by
/// `a`, `score_direction(b, a)` by `b`.
pub fn score_direction(
    subject: &Spectrum,
    reference: &Spectrum,
    params: &ScreenParams,
) -> DirectionalScore {
    let pivot = subject.precursor_mass / subject.charge as f64;
    let tolerance = params.fragment_mass_tolerance;
    let subject_floor = subject.max_intensity * params.significance_height;
    let reference_floor = reference.max_intensity * params.significance_height;

    let mut totals = [0.0f64; 3];
    let mut matched = [0.0f64; 3];
    let mut cursor = 0usize;

    for peak in subject.peaks.iter() {
        if peak.intensity <= subject_floor {
            continue;
        }
        let region = mass_region(peak.mass, pivot);
        let normalized = peak.intensity / subject.max_intensity;
        totals[region] += normalized;

        let lower = peak.mass - tolerance;
        let upper = peak.mass + tolerance;
        let mut j = cursor;
        while j < reference.peaks.len() && reference.peaks[j].mass <= upper {
            let candidate = reference.peaks[j];
            if candidate.mass >= lower && candidate.intensity > reference_floor {
                matched[region] += normalized;
                cursor = j;
                break;
            }
            j += 1;
        }
    }

    let mut unmatched_weighted = 0.0;
    let mut total_weighted = 0.0;
    for region in 0..3 {
        unmatched_weighted += REGION_WEIGHTS[region] * (totals[region] - matched[region]);
        total_weighted += REGION_WEIGHTS[region] * totals[region];
    }
    DirectionalScore {
        unmatched_weighted,
        total_weighted,
    }
}
