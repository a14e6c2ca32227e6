use chrono::{Local, NaiveDateTime};
use serde::Serialize;
use tracing::debug;

use crate::error::QuoteError;
use crate::models::{Battery, BatteryProperty, BatteryType, Chemistry, Condition, Pickup, PricingConfig};
use crate::pricing::dates::parse_purchase_date;

const CHEMISTRY_SCORES: &[(Chemistry, f64)] = &[
    (Chemistry::LiFePO4, 1.0),
    (Chemistry::LiIon, 1.0),
    (Chemistry::NiCd, 0.85),
    (Chemistry::NiMH, 0.95),
];

const BATTERY_TYPE_SCORES: &[(BatteryType, f64)] = &[
    (BatteryType::Ev, 1.0),
    (BatteryType::Home, 1.0),
    (BatteryType::BatteryBackup, 0.65),
];

const CONDITION_SCORES: &[(Condition, f64)] = &[
    (Condition::New, 1.0),
    (Condition::LikeNew, 0.9),
    (Condition::Used, 0.55),
];

const FAVORABLE_SCORE: f64 = 0.9;
const UNFAVORABLE_SCORE: f64 = 0.5;
const NOT_FUNCTIONING_SCORE: f64 = 0.2;

const HEAVY_BATTERY_LBS: f64 = 50.0;
const HIGH_VOLTAGE: i64 = 110;
const LARGE_CAPACITY_KWH: f64 = 50.0;
const LIGHTLY_USED_DAYS: i64 = 2000;
const RECENT_PURCHASE_DAYS: i64 = 1000;

/// Where a battery's base price came from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum PriceSource {
    /// Brand and model matched the MSRP table
    Msrp,
    /// Chemistry cost per kWh times rated capacity
    ChemistryCost,
}

/// Pricing detail for a single battery
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BatteryQuote {
    pub source: PriceSource,
    pub base_price: f64,
    pub score: f64,
    pub price: f64,
}

/// Calculator for the price offered on a pickup.
///
/// Each battery gets a quality score in `[0.2, 1.0]` from the weighted
/// property table, which scales a base price taken from the MSRP table or
/// from the chemistry's cost per kWh.
#[derive(Debug, Clone)]
pub struct QuoteCalculator<'a> {
    config: &'a PricingConfig,
    weight_sum: f64,
    as_of: NaiveDateTime,
}

impl<'a> QuoteCalculator<'a> {
    /// Create a calculator that measures battery age against the current local time
    pub fn new(config: &'a PricingConfig) -> Result<Self, QuoteError> {
        Self::with_reference_time(config, Local::now().naive_local())
    }

    /// Create a calculator that measures battery age against `as_of`
    pub fn with_reference_time(
        config: &'a PricingConfig,
        as_of: NaiveDateTime,
    ) -> Result<Self, QuoteError> {
        let weight_sum = validate_weights(config)?;
        Ok(Self {
            config,
            weight_sum,
            as_of,
        })
    }

    /// Weighted quality score of a battery
    pub fn calculate_battery_score(&self, battery: &Battery) -> Result<f64, QuoteError> {
        let mut score = 0.0;
        for (property, weight) in &self.config.property_weights {
            let component = self.component_score(*property, battery)?;
            score += component * (weight / self.weight_sum);
        }
        Ok(score)
    }

    /// Base price scaled by the battery's score
    pub fn calculate_battery_price(&self, battery: &Battery) -> Result<f64, QuoteError> {
        Ok(self.quote_battery(battery)?.price)
    }

    /// Price a battery and keep the intermediate values
    pub fn quote_battery(&self, battery: &Battery) -> Result<BatteryQuote, QuoteError> {
        let (source, base_price) = self.base_price(battery)?;
        let score = self.calculate_battery_score(battery)?;
        let price = base_price * score;

        debug!(
            chemistry = %battery.chemistry,
            source = ?source,
            base_price,
            score,
            price,
            "Priced battery"
        );

        Ok(BatteryQuote {
            source,
            base_price,
            score,
            price,
        })
    }

    /// Total price of every battery on the pickup
    pub fn final_quote_price(&self, pickup: &Pickup) -> Result<f64, QuoteError> {
        self.quote_batteries(&pickup.batteries)
    }

    /// Sum of the battery prices. Fails as a whole if any battery fails.
    pub fn quote_batteries(&self, batteries: &[Battery]) -> Result<f64, QuoteError> {
        batteries
            .iter()
            .map(|battery| self.calculate_battery_price(battery))
            .sum()
    }

    fn base_price(&self, battery: &Battery) -> Result<(PriceSource, f64), QuoteError> {
        if let (Some(brand), Some(model)) = (battery.effective_brand(), battery.effective_model()) {
            if let Some(msrp) = self.config.msrp(brand, model) {
                return Ok((PriceSource::Msrp, msrp));
            }
        }

        let cost_per_kwh = self
            .config
            .chemistry_cost_per_kwh
            .get(&battery.chemistry)
            .ok_or_else(|| QuoteError::MissingChemistryCost(battery.chemistry.to_string()))?;

        Ok((PriceSource::ChemistryCost, cost_per_kwh * battery.marked_capacity_kwh))
    }

    fn component_score(&self, property: BatteryProperty, battery: &Battery) -> Result<f64, QuoteError> {
        let score = match property {
            BatteryProperty::Chemistry => lookup(
                CHEMISTRY_SCORES,
                &battery.chemistry,
                property,
                battery.chemistry.as_str(),
            )?,
            BatteryProperty::BatteryType => lookup(
                BATTERY_TYPE_SCORES,
                &battery.battery_type,
                property,
                battery.battery_type.as_str(),
            )?,
            BatteryProperty::WeightLbs => threshold(battery.weight_lbs > HEAVY_BATTERY_LBS),
            BatteryProperty::InputVoltage => threshold(battery.input_voltage > HIGH_VOLTAGE),
            BatteryProperty::OutputVoltage => threshold(battery.output_voltage > HIGH_VOLTAGE),
            BatteryProperty::MarkedCapacityKwh => {
                threshold(battery.marked_capacity_kwh > LARGE_CAPACITY_KWH)
            }
            BatteryProperty::ApproxLengthUsedDays => {
                threshold(battery.approx_length_used_days < LIGHTLY_USED_DAYS)
            }
            BatteryProperty::DateOriginallyPurchased => {
                let purchased = parse_purchase_date(&battery.date_originally_purchased)?;
                let age_days = (self.as_of - purchased).num_days();
                threshold(age_days < RECENT_PURCHASE_DAYS)
            }
            BatteryProperty::IsFunctioning => {
                if battery.is_functioning {
                    FAVORABLE_SCORE
                } else {
                    NOT_FUNCTIONING_SCORE
                }
            }
            BatteryProperty::ConditionOriginallyPurchased => lookup(
                CONDITION_SCORES,
                &battery.condition_originally_purchased,
                property,
                battery.condition_originally_purchased.as_str(),
            )?,
        };
        Ok(score)
    }
}

/// Check that every scored property is weighted and return the weight sum
fn validate_weights(config: &PricingConfig) -> Result<f64, QuoteError> {
    for property in BatteryProperty::ALL {
        let weight = *config
            .property_weights
            .get(&property)
            .ok_or(QuoteError::MissingWeight(property))?;
        if !weight.is_finite() || weight < 0.0 {
            return Err(QuoteError::InvalidWeight { property, weight });
        }
    }

    let weight_sum: f64 = config.property_weights.values().sum();
    if !weight_sum.is_finite() || weight_sum <= 0.0 {
        return Err(QuoteError::NonPositiveWeightSum(weight_sum));
    }
    Ok(weight_sum)
}

fn lookup<K: PartialEq>(
    table: &[(K, f64)],
    key: &K,
    property: BatteryProperty,
    value: &str,
) -> Result<f64, QuoteError> {
    table
        .iter()
        .find(|(candidate, _)| candidate == key)
        .map(|(_, score)| *score)
        .ok_or_else(|| QuoteError::UnscoredValue {
            property,
            value: value.to_string(),
        })
}

fn threshold(favorable: bool) -> f64 {
    if favorable {
        FAVORABLE_SCORE
    } else {
        UNFAVORABLE_SCORE
    }
}
