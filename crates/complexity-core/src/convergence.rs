// ─────────────────────────────────────────────────────────────────────
// Complexity Kernel — Convergence Index
// ─────────────────────────────────────────────────────────────────────

/// Balance between a convergence measure `c` and a divergence measure
/// `d`: `(c − d) / (c + d)`.
///
/// Tends to 1 when `c` dominates and to −1 when `d` does. `None` when
/// `c + d == 0`.
pub fn convergence_index(c: f64, d: f64) -> Option<f64> {
    let total = c + d;
    if total == 0.0 {
        return None;
    }
    Some((c - d) / total)
}
