use super::saturate;
use super::window::Window;

/// Fixed metric weights combining the two change metrics.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MetricWeights {
    pub balance: f64,
    pub trader_count: f64,
}

impl Default for MetricWeights {
    fn default() -> Self {
        Self {
            balance: 0.7,
            trader_count: 0.3,
        }
    }
}

impl MetricWeights {
    /// `balance * balance_pct_change + trader_count * trader_count_score`
    pub fn effective_change(&self, balance_pct_change: f64, trader_count_score: f64) -> f64 {
        saturate(self.balance * balance_pct_change + self.trader_count * trader_count_score)
    }
}

/// Scale an effective change by the window's decay weight. A zero-weight
/// window contributes nothing, whatever its raw metrics.
pub fn weighted_change(effective_change: f64, window: &Window) -> f64 {
    if window.decay_weight == 0.0 {
        return 0.0;
    }
    saturate(effective_change * window.decay_weight)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    fn approx(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-9
    }

    #[test]
    fn test_effective_change_default_weights() {
        let weights = MetricWeights::default();
        assert!(approx(weights.effective_change(100.0, 28.0), 78.4));
        assert!(approx(weights.effective_change(0.0, 0.0), 0.0));
    }

    #[test]
    fn test_weighted_change_scales_by_decay() {
        let window = Window::new("2h", Duration::hours(2), 0.35);
        assert!(approx(weighted_change(78.4, &window), 27.44));
    }

    #[test]
    fn test_zero_weight_window_is_informational() {
        let window = Window::new("24h", Duration::hours(24), 0.0);
        assert_eq!(weighted_change(1_000.0, &window), 0.0);
        assert_eq!(weighted_change(f64::MAX, &window), 0.0);
    }

    #[test]
    fn test_effective_change_saturates() {
        let weights = MetricWeights {
            balance: 1.0,
            trader_count: 1.0,
        };
        assert_eq!(weights.effective_change(f64::MAX, f64::MAX), f64::MAX);
        assert_eq!(weights.effective_change(f64::MIN, f64::MIN), f64::MIN);
    }
}
