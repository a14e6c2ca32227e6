use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap};
use std::fmt;

use super::battery::Chemistry;

/// Battery attributes that contribute to the quality score
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum BatteryProperty {
    Chemistry,
    BatteryType,
    WeightLbs,
    InputVoltage,
    OutputVoltage,
    #[serde(rename = "markedCapacitykWh")]
    MarkedCapacityKwh,
    ApproxLengthUsedDays,
    DateOriginallyPurchased,
    IsFunctioning,
    ConditionOriginallyPurchased,
}

impl BatteryProperty {
    pub const ALL: [BatteryProperty; 10] = [
        BatteryProperty::Chemistry,
        BatteryProperty::BatteryType,
        BatteryProperty::WeightLbs,
        BatteryProperty::InputVoltage,
        BatteryProperty::OutputVoltage,
        BatteryProperty::MarkedCapacityKwh,
        BatteryProperty::ApproxLengthUsedDays,
        BatteryProperty::DateOriginallyPurchased,
        BatteryProperty::IsFunctioning,
        BatteryProperty::ConditionOriginallyPurchased,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            BatteryProperty::Chemistry => "chemistry",
            BatteryProperty::BatteryType => "batteryType",
            BatteryProperty::WeightLbs => "weightLbs",
            BatteryProperty::InputVoltage => "inputVoltage",
            BatteryProperty::OutputVoltage => "outputVoltage",
            BatteryProperty::MarkedCapacityKwh => "markedCapacitykWh",
            BatteryProperty::ApproxLengthUsedDays => "approxLengthUsedDays",
            BatteryProperty::DateOriginallyPurchased => "dateOriginallyPurchased",
            BatteryProperty::IsFunctioning => "isFunctioning",
            BatteryProperty::ConditionOriginallyPurchased => "conditionOriginallyPurchased",
        }
    }
}

impl fmt::Display for BatteryProperty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Parameters driving the quote calculator
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PricingConfig {
    /// brand -> model -> MSRP
    #[serde(rename = "batteryModelMSRPs")]
    pub model_msrps: HashMap<String, HashMap<String, f64>>,
    #[serde(rename = "batteryChemistryCostPerkWh")]
    pub chemistry_cost_per_kwh: HashMap<Chemistry, f64>,
    #[serde(rename = "batteryPropsWeights")]
    pub property_weights: BTreeMap<BatteryProperty, f64>,
}

impl PricingConfig {
    pub fn msrp(&self, brand: &str, model: &str) -> Option<f64> {
        self.model_msrps.get(brand)?.get(model).copied()
    }

    /// Configuration the service ships with
    pub fn sample() -> Self {
        let mut tesla = HashMap::new();
        tesla.insert("PowerWall123".to_string(), 10000.0);
        tesla.insert("Mode456".to_string(), 10000.0);

        let mut model_msrps = HashMap::new();
        model_msrps.insert("Tesla".to_string(), tesla);

        let chemistry_cost_per_kwh = HashMap::from([
            (Chemistry::LiFePO4, 170.0),
            (Chemistry::NiMH, 90.7),
            (Chemistry::NiCd, 140.3),
            (Chemistry::LiIon, 57.3),
        ]);

        let property_weights = BatteryProperty::ALL.iter().map(|p| (*p, 1.0)).collect();

        Self {
            model_msrps,
            chemistry_cost_per_kwh,
            property_weights,
        }
    }
}

/// A stored pricing configuration. The record with the highest id is active.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QuoteConfigRecord {
    pub id: i64,
    #[serde(flatten)]
    pub pricing: PricingConfig,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_deserialize_wire_layout() {
        let config: PricingConfig = serde_json::from_value(json!({
            "batteryModelMSRPs": {"Tesla": {"PowerWall123": 10000}},
            "batteryChemistryCostPerkWh": {"Li-ion": 57.3, "NiCd": 140.3},
            "batteryPropsWeights": {"chemistry": 2, "markedCapacitykWh": 1}
        }))
        .unwrap();

        assert_eq!(config.msrp("Tesla", "PowerWall123"), Some(10000.0));
        assert_eq!(config.msrp("Tesla", "Unknown"), None);
        assert_eq!(config.chemistry_cost_per_kwh[&Chemistry::LiIon], 57.3);
        assert_eq!(config.property_weights[&BatteryProperty::Chemistry], 2.0);
        assert_eq!(config.property_weights[&BatteryProperty::MarkedCapacityKwh], 1.0);
    }

    #[test]
    fn test_rejects_unknown_weight_property() {
        let result = serde_json::from_value::<PricingConfig>(json!({
            "batteryModelMSRPs": {},
            "batteryChemistryCostPerkWh": {},
            "batteryPropsWeights": {"color": 1}
        }));
        assert!(result.is_err());
    }

    #[test]
    fn test_sample_weights_cover_every_property() {
        let config = PricingConfig::sample();
        for property in BatteryProperty::ALL {
            assert_eq!(config.property_weights.get(&property), Some(&1.0));
        }
    }

    #[test]
    fn test_property_names_round_trip_through_serde() {
        for property in BatteryProperty::ALL {
            let value = serde_json::to_value(property).unwrap();
            assert_eq!(value, json!(property.as_str()));
        }
    }
}
