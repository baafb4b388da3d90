use crate::utils::sort::sort_peaks_by_mass;

/// A single fragment peak.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Peak {
    pub mass: f64,
    pub intensity: f64,
}

/// One MS/MS scan: its precursor description plus the fragment peak list.
///
/// The peak list is ascending by mass; `new` establishes that ordering and
/// caches the base peak intensity, so records built through it can be scored
/// without further preparation.
///
/// Example:
/// ```
/// use specsift::models::{Peak, Spectrum};
///
/// let scan = Spectrum::new(
///     "run1.0001.0001.2.dta".to_string(),
///     1234.5,
///     2,
///     vec![
///         Peak { mass: 500.2, intensity: 10.0 },
///         Peak { mass: 300.1, intensity: 40.0 },
///     ],
/// );
/// assert_eq!(scan.peaks[0].mass, 300.1);
/// assert_eq!(scan.max_intensity, 40.0);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct Spectrum {
    /// Singly protonated precursor mass (MH+ scale).
    pub precursor_mass: f64,
    pub charge: u8,
    pub scan_id: String,
    pub peaks: Vec<Peak>,
    /// Intensity of the base peak, 0.0 for an empty peak list.
    pub max_intensity: f64,
}

impl Spectrum {
    pub fn new(scan_id: String, precursor_mass: f64, charge: u8, mut peaks: Vec<Peak>) -> Self {
        sort_peaks_by_mass(&mut peaks);
        let max_intensity = peaks.iter().map(|x| x.intensity).fold(0.0, f64::max);
        Self {
            precursor_mass,
            charge,
            scan_id,
            peaks,
            max_intensity,
        }
    }

    /// Copy of the scan with every peak at or below `fraction` of the base
    /// peak intensity removed. The base peak itself always survives for
    /// fractions below 1, so `max_intensity` is unchanged in that case.
    pub fn strip_below(&self, fraction: f64) -> Self {
        let floor = self.max_intensity * fraction;
        let peaks: Vec<Peak> = self
            .peaks
            .iter()
            .copied()
            .filter(|x| x.intensity > floor)
            .collect();
        Self::new(
            self.scan_id.clone(),
            self.precursor_mass,
            self.charge,
            peaks,
        )
    }
}
