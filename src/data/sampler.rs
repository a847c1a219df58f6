use rand::Rng;

use crate::error::{Result, SampleError};

use super::model::{Dataset, Sample};

/// Check that `fraction` lies in (0, 1].
pub fn validate_fraction(fraction: f64) -> Result<()> {
    if fraction.is_finite() && fraction > 0.0 && fraction <= 1.0 {
        Ok(())
    } else {
        Err(SampleError::Config(format!(
            "sample fraction must be in (0, 1], got {fraction}"
        )))
    }
}

/// Number of rows drawn for `fraction` of `row_count`, rounding half to even.
pub fn sample_size(fraction: f64, row_count: usize) -> usize {
    let size = (fraction * row_count as f64).round_ties_even();
    (size as usize).min(row_count)
}

/// Draw `sample_size(fraction, n)` rows uniformly at random without
/// replacement. Rows come back in draw order; an empty result is not an error.
pub fn sample_rows<R: Rng + ?Sized>(dataset: &Dataset, fraction: f64, rng: &mut R) -> Result<Sample> {
    validate_fraction(fraction)?;

    let amount = sample_size(fraction, dataset.len());
    let picked = rand::seq::index::sample(rng, dataset.len(), amount);
    log::debug!("drew {} of {} row indices", picked.len(), dataset.len());

    Ok(Sample {
        columns: dataset.columns.clone(),
        rows: picked.iter().map(|i| dataset.rows[i].clone()).collect(),
    })
}
