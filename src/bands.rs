use crate::models::{CountPercent, Ordered};

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Upper {
    Inclusive(f64),
    Exclusive(f64),
}

/// A labelled range with an inclusive lower bound. Boundaries are literal:
/// 8.995 sits between `0-8.99` and `9-9.99` and lands in neither.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Band {
    pub label: &'static str,
    pub lower: f64,
    pub upper: Upper,
}

impl Band {
    const fn closed(label: &'static str, lower: f64, upper: f64) -> Self {
        Self {
            label,
            lower,
            upper: Upper::Inclusive(upper),
        }
    }

    const fn below(label: &'static str, upper: f64) -> Self {
        Self {
            label,
            lower: f64::NEG_INFINITY,
            upper: Upper::Exclusive(upper),
        }
    }

    pub fn contains(&self, value: f64) -> bool {
        value >= self.lower
            && match self.upper {
                Upper::Inclusive(upper) => value <= upper,
                Upper::Exclusive(upper) => value < upper,
            }
    }
}

pub const PASS_BANDS: [Band; 3] = [
    Band {
        label: "ge10",
        lower: 10.0,
        upper: Upper::Inclusive(f64::INFINITY),
    },
    Band {
        label: "8_9",
        lower: 8.0,
        upper: Upper::Exclusive(10.0),
    },
    Band::below("lt8", 8.0),
];

pub const TRANCHES: [Band; 7] = [
    Band::closed("0-8.99", 0.0, 8.99),
    Band::closed("9-9.99", 9.0, 9.99),
    Band::closed("10-11.99", 10.0, 11.99),
    Band::closed("12-13.99", 12.0, 13.99),
    Band::closed("14-15.99", 14.0, 15.99),
    Band::closed("16-17.99", 16.0, 17.99),
    Band::closed("18-20", 18.0, 20.0),
];

pub const GROUPES: [Band; 5] = [
    Band::closed("G1(0-8.99)", 0.0, 8.99),
    Band::closed("G2(9-9.99)", 9.0, 9.99),
    Band::closed("G3(10-11.99)", 10.0, 11.99),
    Band::closed("G4(12-13.99)", 12.0, 13.99),
    Band::closed("G5(≥14)", 14.0, 20.0),
];

pub const MENTIONS: [Band; 5] = [
    Band::closed("excellence", 18.0, 20.0),
    Band::closed("felicitations", 15.0, 17.99),
    Band::closed("encouragements", 14.0, 14.99),
    Band::closed("tableau_honneur", 12.0, 13.99),
    Band::below("observation", 12.0),
];

/// Rounds half-to-even at `decimals` places; non-finite input yields `None`.
pub fn round_to(value: f64, decimals: i32) -> Option<f64> {
    if !value.is_finite() {
        return None;
    }
    let scale = 10f64.powi(decimals);
    Some((value * scale).round_ties_even() / scale)
}

/// Share of `total`, one decimal. An empty denominator gives 0.0.
pub fn percent(count: usize, total: usize) -> f64 {
    if total == 0 {
        return 0.0;
    }
    round_to(count as f64 / total as f64 * 100.0, 1).unwrap_or(0.0)
}

pub fn count_percent(count: usize, total: usize) -> CountPercent {
    CountPercent {
        count,
        percent: percent(count, total),
    }
}

/// Counts `values` into each band; percentages are against `values.len()`.
pub fn bucket(values: &[f64], bands: &[Band]) -> Ordered<CountPercent> {
    Ordered(
        bands
            .iter()
            .map(|band| {
                let count = values.iter().filter(|v| band.contains(**v)).count();
                (band.label, count_percent(count, values.len()))
            })
            .collect(),
    )
}
