//! Local rank redistribution.
//!
//! Repeated inserts at the same spot halve the gap each time until the f64
//! grid can no longer split it. Renormalization re-spaces a small window of
//! consecutive items instead of touching the whole order.
//!
//! ## Spacing
//!
//! - Both bounds, gap above epsilon: even spacing, `step = gap / (count + 1)`,
//!   the k-th item (1-based) gets `lower + step * k`.
//! - Otherwise integer spacing anchored at whichever bound exists:
//!   `upper - count, ..., upper - 1` or `lower + 1, ..., lower + count`,
//!   anchored at 0 when neither exists.

use crate::config::EngineConfig;
use crate::store::RankStore;
use crate::types::ItemId;

/// Planned rank per identifier, in window order
pub type RankPlan = Vec<(ItemId, f64)>;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WindowRenormalizer {
    epsilon: f64,
}

impl WindowRenormalizer {
    pub fn new(epsilon: f64) -> Self {
        Self { epsilon }
    }

    pub fn from_config(config: &EngineConfig) -> Self {
        Self::new(config.epsilon)
    }

    /// Compute new ranks for `ids` (already in final order) without writing
    ///
    /// # Example
    ///
    /// ```
    /// use sparse_order::engine::WindowRenormalizer;
    ///
    /// let renormalizer = WindowRenormalizer::new(1e-12);
    ///
    /// let plan = renormalizer.plan(&[7, 8, 9], Some(10.0), Some(14.0));
    /// assert_eq!(plan, vec![(7, 11.0), (8, 12.0), (9, 13.0)]);
    ///
    /// let plan = renormalizer.plan(&[7, 8], None, Some(5.0));
    /// assert_eq!(plan, vec![(7, 3.0), (8, 4.0)]);
    /// ```
    pub fn plan(&self, ids: &[ItemId], lower: Option<f64>, upper: Option<f64>) -> RankPlan {
        let count = ids.len() as f64;

        match (lower, upper) {
            (Some(lower), Some(upper)) if upper - lower > self.epsilon => {
                let step = (upper - lower) / (count + 1.0);
                ids.iter()
                    .enumerate()
                    .map(|(k, &id)| (id, lower + step * (k as f64 + 1.0)))
                    .collect()
            }
            (_, Some(upper)) => ids
                .iter()
                .enumerate()
                .map(|(k, &id)| (id, upper - (count - k as f64)))
                .collect(),
            (Some(lower), None) => ids
                .iter()
                .enumerate()
                .map(|(k, &id)| (id, lower + (k as f64 + 1.0)))
                .collect(),
            (None, None) => ids
                .iter()
                .enumerate()
                .map(|(k, &id)| (id, k as f64 + 1.0))
                .collect(),
        }
    }

    /// True when every adjacent pair, bounds included, is at least epsilon apart
    pub fn is_separated(
        &self,
        plan: &[(ItemId, f64)],
        lower: Option<f64>,
        upper: Option<f64>,
    ) -> bool {
        let ranks: Vec<f64> = lower
            .into_iter()
            .chain(plan.iter().map(|&(_, rank)| rank))
            .chain(upper)
            .collect();

        ranks.windows(2).all(|pair| pair[1] - pair[0] >= self.epsilon)
    }

    /// Write a fresh plan for `ids` into `store`
    pub fn renormalize(
        &self,
        store: &mut RankStore,
        ids: &[ItemId],
        lower: Option<f64>,
        upper: Option<f64>,
    ) -> RankPlan {
        let plan = self.plan(ids, lower, upper);
        self.apply(store, &plan);
        plan
    }

    /// Write an already computed plan
    pub fn apply(&self, store: &mut RankStore, plan: &[(ItemId, f64)]) {
        for &(id, rank) in plan {
            store.set(id, rank);
        }
    }
}

impl Default for WindowRenormalizer {
    fn default() -> Self {
        Self::from_config(&EngineConfig::default())
    }
}

// ============================================================================
// Unit Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_even_spacing_inside_bounds() {
        let renormalizer = WindowRenormalizer::default();
        let plan = renormalizer.plan(&[1, 2, 3], Some(0.0), Some(1.0));

        assert_eq!(plan, vec![(1, 0.25), (2, 0.5), (3, 0.75)]);
        assert!(renormalizer.is_separated(&plan, Some(0.0), Some(1.0)));
    }

    #[test]
    fn test_collapsed_gap_anchors_at_upper() {
        let renormalizer = WindowRenormalizer::default();
        let plan = renormalizer.plan(&[4, 5], Some(30.0), Some(30.0));

        assert_eq!(plan, vec![(4, 28.0), (5, 29.0)]);
        // Anchored below a lower bound it cannot respect
        assert!(!renormalizer.is_separated(&plan, Some(30.0), Some(30.0)));
    }

    #[test]
    fn test_lower_anchor_counts_forward() {
        let renormalizer = WindowRenormalizer::default();
        let plan = renormalizer.plan(&[9, 3], Some(10.5), None);

        assert_eq!(plan, vec![(9, 11.5), (3, 12.5)]);
        assert!(renormalizer.is_separated(&plan, Some(10.5), None));
    }

    #[test]
    fn test_no_bounds_anchors_at_zero() {
        let renormalizer = WindowRenormalizer::default();
        let plan = renormalizer.plan(&[9, 3, 6], None, None);

        assert_eq!(plan, vec![(9, 1.0), (3, 2.0), (6, 3.0)]);
    }

    #[test]
    fn test_renormalize_writes_store() {
        let renormalizer = WindowRenormalizer::default();
        let mut store = RankStore::new();
        store.set(100, 30.0001);

        renormalizer.renormalize(&mut store, &[100, 102, 101], Some(30.0), Some(31.0));

        assert_eq!(store.get(100), 30.25);
        assert_eq!(store.get(102), 30.5);
        assert_eq!(store.get(101), 30.75);
        assert_eq!(store.genuine_count(), 3);
    }

    #[test]
    fn test_too_fine_step_is_not_separated() {
        let renormalizer = WindowRenormalizer::new(1e-12);
        let plan = renormalizer.plan(&[1, 2, 3], Some(5.0), Some(5.0 + 2e-12));

        assert!(!renormalizer.is_separated(&plan, Some(5.0), Some(5.0 + 2e-12)));
    }
}
