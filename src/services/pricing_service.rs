use serde::{Deserialize, Serialize};

/// A length-of-stay discount step: stays of `min_nights` or more get
/// `fraction` off the base cost.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DiscountTier {
    pub min_nights: u32,
    pub fraction: f64,
}

/// Tiered length-of-stay discounts. Deployment data, loaded from
/// configuration; the default policy applies no discount.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DiscountPolicy {
    #[serde(default)]
    pub tiers: Vec<DiscountTier>,
}

impl DiscountPolicy {
    pub fn fraction_for(&self, nights: u32) -> f64 {
        self.tiers
            .iter()
            .filter(|tier| tier.min_nights <= nights)
            .max_by_key(|tier| tier.min_nights)
            .map(|tier| tier.fraction.clamp(0.0, 1.0))
            .unwrap_or(0.0)
    }
}

/// Full cost breakdown for a validated stay.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PriceQuote {
    pub base: f64,
    pub discount_fraction: f64,
    pub discount_amount: f64,
    pub cleaning_fee: f64,
    pub total: f64,
}

pub struct PricingService;

impl PricingService {
    /// Total cost: `round2(price_per_night * nights * (1 - discount) + cleaning_fee)`.
    pub fn compute_total(
        price_per_night: f64,
        cleaning_fee: f64,
        nights: u32,
        policy: &DiscountPolicy,
    ) -> f64 {
        Self::quote(price_per_night, cleaning_fee, nights, policy).total
    }

    pub fn quote(
        price_per_night: f64,
        cleaning_fee: f64,
        nights: u32,
        policy: &DiscountPolicy,
    ) -> PriceQuote {
        let base = price_per_night * nights as f64;
        let discount_fraction = policy.fraction_for(nights);
        let discount_amount = Self::round2(base * discount_fraction);
        let total = Self::round2(base * (1.0 - discount_fraction) + cleaning_fee);

        PriceQuote {
            base,
            discount_fraction,
            discount_amount,
            cleaning_fee,
            total,
        }
    }

    /// Round half-up to 2 decimal places so currency display never leaks
    /// floating-point noise.
    pub fn round2(value: f64) -> f64 {
        (value * 100.0).round() / 100.0
    }
}
