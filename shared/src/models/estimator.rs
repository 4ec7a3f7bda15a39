//! Unit-cost estimator models

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::validation::{
    decimal_to_f64, format_grouped, holds_positive_value, parse_non_negative, parse_price,
    round2,
};

/// What the estimate is for
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, Default)]
#[serde(rename_all = "lowercase")]
pub enum EstimateKind {
    #[default]
    Seed,
    Fertilizer,
    Labor,
    Irrigation,
    Other,
}

/// Field labels shown for an estimate kind
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldLabels {
    pub rate_label: &'static str,
    pub price_label: &'static str,
    pub price_placeholder: &'static str,
    pub unit: &'static str,
}

impl EstimateKind {
    pub const ALL: [EstimateKind; 5] = [
        EstimateKind::Seed,
        EstimateKind::Fertilizer,
        EstimateKind::Labor,
        EstimateKind::Irrigation,
        EstimateKind::Other,
    ];

    /// Value stored in preferences and used by the type selector
    pub fn as_str(&self) -> &'static str {
        match self {
            EstimateKind::Seed => "seed",
            EstimateKind::Fertilizer => "fertilizer",
            EstimateKind::Labor => "labor",
            EstimateKind::Irrigation => "irrigation",
            EstimateKind::Other => "other",
        }
    }

    /// Any unrecognised selector value is treated as the generic kind
    pub fn from_selector(value: &str) -> Self {
        value.parse().unwrap_or(EstimateKind::Other)
    }

    /// Default rate per hectare
    pub fn default_rate(&self) -> u32 {
        match self {
            EstimateKind::Seed => 25,
            EstimateKind::Fertilizer => 150,
            EstimateKind::Labor => 40,
            EstimateKind::Irrigation => 10,
            EstimateKind::Other => 1,
        }
    }

    /// Unit of the amount needed
    pub fn unit(&self) -> &'static str {
        match self {
            EstimateKind::Seed | EstimateKind::Fertilizer => "kg",
            EstimateKind::Labor | EstimateKind::Irrigation => "hrs",
            EstimateKind::Other => "units",
        }
    }

    pub fn labels(&self) -> FieldLabels {
        let (rate_label, price_label, price_placeholder) = match self {
            EstimateKind::Seed => (
                "Seed rate (kg/ha)",
                "Seed price (₹/kg) — optional",
                "₹ / kg",
            ),
            EstimateKind::Fertilizer => (
                "Fertilizer (kg/ha)",
                "Fertilizer price (₹/kg) — optional",
                "₹ / kg",
            ),
            EstimateKind::Labor => (
                "Labor (hours/ha)",
                "Labor cost (₹/hour) — optional",
                "₹ / hour",
            ),
            EstimateKind::Irrigation => (
                "Irrigation (hours/ha)",
                "Irrigation cost (₹/hour) — optional",
                "₹ / hour",
            ),
            EstimateKind::Other => ("Rate (unit/ha)", "Price (₹/unit) — optional", "₹ / unit"),
        };

        FieldLabels {
            rate_label,
            price_label,
            price_placeholder,
            unit: self.unit(),
        }
    }
}

impl fmt::Display for EstimateKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for EstimateKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "seed" => Ok(EstimateKind::Seed),
            "fertilizer" => Ok(EstimateKind::Fertilizer),
            "labor" => Ok(EstimateKind::Labor),
            "irrigation" => Ok(EstimateKind::Irrigation),
            "other" => Ok(EstimateKind::Other),
            other => Err(format!("unknown estimate type: {}", other)),
        }
    }
}

/// Estimator inputs, held as the raw text of each field
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EstimatorForm {
    pub kind: EstimateKind,
    /// Area in hectares
    pub area: String,
    /// Rate per hectare
    pub rate: String,
    /// Optional unit price in ₹
    pub price: String,
}

impl Default for EstimatorForm {
    fn default() -> Self {
        Self {
            kind: EstimateKind::default(),
            area: "1".to_string(),
            rate: String::new(),
            price: String::new(),
        }
    }
}

impl EstimatorForm {
    pub fn new(kind: EstimateKind) -> Self {
        Self {
            kind,
            ..Self::default()
        }
    }

    /// Fill the default rate for the current kind unless the rate field
    /// already holds a positive number. Returns whether the rate changed.
    pub fn apply_defaults(&mut self) -> bool {
        if holds_positive_value(&self.rate) {
            return false;
        }
        self.rate = self.kind.default_rate().to_string();
        true
    }

    /// Switch kind and fill its default rate
    pub fn select_kind(&mut self, kind: EstimateKind) -> bool {
        self.kind = kind;
        self.apply_defaults()
    }

    pub fn labels(&self) -> FieldLabels {
        self.kind.labels()
    }

    /// Compute the amount needed and, when a positive price is set, the cost
    pub fn calculate(&self) -> Estimate {
        let area = parse_non_negative(&self.area);
        let rate = parse_non_negative(&self.rate);
        let amount = round2(area * rate);
        let cost = parse_price(&self.price).map(|price| round2(decimal_to_f64(amount) * price));

        Estimate {
            kind: self.kind,
            amount,
            cost,
        }
    }

    /// Reset the inputs; the kind is kept
    pub fn clear(&mut self) {
        self.area = "1".to_string();
        self.rate.clear();
        self.price.clear();
    }
}

/// Result of an estimate
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Estimate {
    pub kind: EstimateKind,
    /// Amount needed, rounded to 2 places
    pub amount: Decimal,
    /// Estimated cost in ₹, rounded to 2 places
    pub cost: Option<Decimal>,
}

impl Estimate {
    pub fn unit(&self) -> &'static str {
        self.kind.unit()
    }

    /// `"1,250 kg"`
    pub fn amount_display(&self) -> String {
        format!("{} {}", format_grouped(self.amount), self.unit())
    }

    /// `"₹50,000"`
    pub fn cost_display(&self) -> Option<String> {
        self.cost.map(|c| format!("₹{}", format_grouped(c)))
    }
}

impl fmt::Display for Estimate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} required", self.amount_display())?;
        match self.cost_display() {
            Some(cost) => write!(f, "\nEstimated cost: {}", cost),
            None => write!(f, "\nEnter price to see estimated cost"),
        }
    }
}
