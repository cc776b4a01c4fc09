// src/process/sample.rs

/// Every `k`-th row starting with the first one. `k` must be at least 1.
pub fn every_kth<T: Clone>(rows: &[T], k: usize) -> Vec<T> {
    debug_assert!(k >= 1, "stride must be at least 1");
    rows.iter().step_by(k.max(1)).cloned().collect()
}
