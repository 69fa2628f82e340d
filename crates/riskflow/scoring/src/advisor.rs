//! Portfolio advisory templates
//!
//! One fixed template per risk tier: an expected-return interval and a
//! named allocation breakdown summing to 100. Advisory always succeeds;
//! the tier enum is closed, so there is no unmatched input to fall back
//! from.

use riskflow_types::RiskTier;
use serde::Serialize;

/// One slice of an allocation template, weight in percent.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub struct Allocation {
    pub asset_class: &'static str,
    pub weight_pct: u8,
}

impl Allocation {
    const fn new(asset_class: &'static str, weight_pct: u8) -> Self {
        Self {
            asset_class,
            weight_pct,
        }
    }
}

/// Advisory output for one tier.
#[derive(Clone, Debug, Serialize)]
pub struct PortfolioAdvice {
    pub tier: RiskTier,
    /// Expected annual return interval, in percent.
    pub expected_return_min_pct: f64,
    pub expected_return_max_pct: f64,
    pub allocation: Vec<Allocation>,
    pub narrative: &'static str,
}

/// Produce the advisory template for a tier.
///
/// The amount is accepted for template sizing but does not currently alter
/// the selection.
pub fn advise(tier: RiskTier, amount: u64) -> PortfolioAdvice {
    let _ = amount;
    match tier {
        RiskTier::Conservative => PortfolioAdvice {
            tier,
            expected_return_min_pct: 4.0,
            expected_return_max_pct: 6.0,
            allocation: vec![
                Allocation::new("money_fund", 40),
                Allocation::new("government_bonds", 30),
                Allocation::new("bank_products", 20),
                Allocation::new("bond_fund", 10),
            ],
            narrative: "Given your conservative risk preference, allocate to \
                        low-risk products with stable returns, centered on money \
                        funds and government bonds.",
        },
        RiskTier::Moderate => PortfolioAdvice {
            tier,
            expected_return_min_pct: 6.0,
            expected_return_max_pct: 10.0,
            allocation: vec![
                Allocation::new("mixed_fund", 35),
                Allocation::new("bond_fund", 25),
                Allocation::new("quality_stocks", 25),
                Allocation::new("money_fund", 15),
            ],
            narrative: "Given your balanced risk preference, hold a blended \
                        portfolio with measured exposure to equities and funds.",
        },
        RiskTier::Aggressive => PortfolioAdvice {
            tier,
            expected_return_min_pct: 10.0,
            expected_return_max_pct: 15.0,
            allocation: vec![
                Allocation::new("growth_stocks", 50),
                Allocation::new("tech_fund", 25),
                Allocation::new("emerging_markets", 15),
                Allocation::new("bond_fund", 10),
            ],
            narrative: "Given your aggressive risk preference, weight the \
                        portfolio toward growth stocks and technology funds for \
                        higher expected returns.",
        },
    }
}
