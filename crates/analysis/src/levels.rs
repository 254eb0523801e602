use serde::Serialize;

use common::Bar;

/// Support and resistance prices, each strictly ascending.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Levels {
    pub support: Vec<f64>,
    pub resistance: Vec<f64>,
}

/// Finds local extrema that survive a symmetric window comparison.
///
/// Bar `i` is a support when its low is strictly below the low of every other
/// bar in `[i - window, i + window]`; resistance is the mirror on highs.
#[derive(Debug, Clone)]
pub struct SupportResistanceAnalyzer {
    pub window: usize,
}

impl SupportResistanceAnalyzer {
    pub fn new(window: usize) -> Self {
        assert!(window >= 1, "support/resistance window must be >= 1");
        Self { window }
    }

    /// Scan the series. Fewer than `2 * window` bars yields empty lists.
    pub fn find_levels(&self, bars: &[Bar]) -> Levels {
        let w = self.window;
        if bars.len() < w * 2 {
            return Levels::default();
        }

        let mut support = Vec::new();
        let mut resistance = Vec::new();

        for i in w..bars.len().saturating_sub(w) {
            if neighbours(bars, i, w).all(|b| bars[i].low < b.low) {
                support.push(bars[i].low);
            }
            if neighbours(bars, i, w).all(|b| bars[i].high > b.high) {
                resistance.push(bars[i].high);
            }
        }

        Levels {
            support: sorted_unique(support),
            resistance: sorted_unique(resistance),
        }
    }
}

/// Bars within `window` of `index`, excluding `index` itself.
fn neighbours(bars: &[Bar], index: usize, window: usize) -> impl Iterator<Item = &Bar> {
    (index - window..=index + window)
        .filter(move |&j| j != index)
        .map(move |j| &bars[j])
}

fn sorted_unique(mut levels: Vec<f64>) -> Vec<f64> {
    levels.sort_by(f64::total_cmp);
    levels.dedup();
    levels
}
