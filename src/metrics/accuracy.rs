//! Precision, recall and F1 of a point matching.

/// Outcome of matching predicted foci against annotated ones.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MatchCounts {
    pub n_actual: usize,
    pub n_preds: usize,
    /// Pairs accepted by the matching; never more than either set size.
    pub matched: usize,
}

impl MatchCounts {
    pub fn new(n_actual: usize, n_preds: usize, matched: usize) -> Self {
        let matched = matched.min(n_actual).min(n_preds);
        Self {
            n_actual,
            n_preds,
            matched,
        }
    }

    /// Predictions left without a partner.
    pub fn unmatched_predictions(&self) -> usize {
        self.n_preds - self.matched
    }

    /// Annotated foci left without a partner.
    pub fn missed(&self) -> usize {
        self.n_actual - self.matched
    }

    /// Share of predictions that were matched; 0 without predictions.
    pub fn precision(&self) -> f64 {
        ratio(self.matched, self.n_preds)
    }

    /// Share of annotated foci that were found; 0 without annotation.
    pub fn recall(&self) -> f64 {
        ratio(self.matched, self.n_actual)
    }

    /// Harmonic mean of precision and recall.
    ///
    /// ```
    /// use cenfind::metrics::accuracy::MatchCounts;
    ///
    /// let counts = MatchCounts::new(2, 1, 1);
    /// assert_eq!((counts.precision(), counts.recall()), (1.0, 0.5));
    /// assert!((counts.f1() - 2.0 / 3.0).abs() < 1e-12);
    /// ```
    pub fn f1(&self) -> f64 {
        // 2PR / (P + R) reduces to 2m / (a + p).
        ratio(2 * self.matched, self.n_actual + self.n_preds)
    }
}

fn ratio(numerator: usize, denominator: usize) -> f64 {
    if denominator == 0 {
        0.0
    } else {
        numerator as f64 / denominator as f64
    }
}
