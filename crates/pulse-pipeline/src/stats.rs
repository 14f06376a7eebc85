//! Small descriptive statistics used by imputation and aggregation.

/// Arithmetic mean, `None` for an empty slice.
#[must_use]
pub fn mean(values: &[f64]) -> Option<f64> {
    if values.is_empty() {
        return None;
    }
    #[allow(clippy::cast_precision_loss)]
    let denom = values.len() as f64;
    Some(values.iter().sum::<f64>() / denom)
}

/// Median; even-length slices average the two middle values.
#[must_use]
pub fn median(values: &[f64]) -> Option<f64> {
    if values.is_empty() {
        return None;
    }
    let mut sorted = values.to_vec();
    sorted.sort_by(f64::total_cmp);
    let mid = sorted.len() / 2;
    if sorted.len() % 2 == 0 {
        Some((sorted[mid - 1] + sorted[mid]) / 2.0)
    } else {
        Some(sorted[mid])
    }
}

/// Integer median, truncating the half on even-length slices.
#[must_use]
pub fn median_truncated(values: &[u64]) -> Option<u64> {
    if values.is_empty() {
        return None;
    }
    let mut sorted = values.to_vec();
    sorted.sort_unstable();
    let mid = sorted.len() / 2;
    if sorted.len() % 2 == 0 {
        let (a, b) = (sorted[mid - 1], sorted[mid]);
        Some(a / 2 + b / 2 + (a % 2 + b % 2) / 2)
    } else {
        Some(sorted[mid])
    }
}
