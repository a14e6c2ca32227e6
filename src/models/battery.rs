use serde::{Deserialize, Serialize};
use std::fmt;

/// Cell chemistry of a submitted battery
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Chemistry {
    #[serde(rename = "LiFePO4")]
    LiFePO4,
    #[serde(rename = "Li-ion")]
    LiIon,
    #[serde(rename = "NiCd")]
    NiCd,
    #[serde(rename = "NiMH")]
    NiMH,
}

impl Chemistry {
    pub fn as_str(&self) -> &'static str {
        match self {
            Chemistry::LiFePO4 => "LiFePO4",
            Chemistry::LiIon => "Li-ion",
            Chemistry::NiCd => "NiCd",
            Chemistry::NiMH => "NiMH",
        }
    }
}

impl fmt::Display for Chemistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// What the battery was used for
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum BatteryType {
    #[serde(rename = "EV")]
    Ev,
    Home,
    BatteryBackup,
}

impl BatteryType {
    pub fn as_str(&self) -> &'static str {
        match self {
            BatteryType::Ev => "EV",
            BatteryType::Home => "Home",
            BatteryType::BatteryBackup => "BatteryBackup",
        }
    }
}

/// Condition of the battery when the seller originally bought it
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Condition {
    New,
    LikeNew,
    Used,
}

impl Condition {
    pub fn as_str(&self) -> &'static str {
        match self {
            Condition::New => "New",
            Condition::LikeNew => "LikeNew",
            Condition::Used => "Used",
        }
    }
}

/// A single battery listed on a pickup request.
///
/// Stationary batteries are identified by `brand`/`model`, vehicle packs by
/// `vehicle_make`/`vehicle_model`. Pricing prefers the first pair and falls
/// back to the second.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct Battery {
    pub chemistry: Chemistry,
    pub battery_type: BatteryType,
    pub owner_id: i64,
    #[serde(default)]
    pub brand: Option<String>,
    #[serde(default)]
    pub model: Option<String>,
    #[serde(default)]
    pub vehicle_make: Option<String>,
    #[serde(default)]
    pub vehicle_model: Option<String>,
    pub weight_lbs: f64,
    pub input_voltage: i64,
    pub output_voltage: i64,
    #[serde(rename = "markedCapacitykWh")]
    pub marked_capacity_kwh: f64,
    pub approx_length_used_days: i64,
    pub date_originally_purchased: String,
    pub is_functioning: bool,
    pub condition_originally_purchased: Condition,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub comments: Option<String>,
}

impl Battery {
    /// Brand used for MSRP lookup, `brand` first then `vehicleMake`
    pub fn effective_brand(&self) -> Option<&str> {
        first_present(&self.brand, &self.vehicle_make)
    }

    /// Model used for MSRP lookup, `model` first then `vehicleModel`
    pub fn effective_model(&self) -> Option<&str> {
        first_present(&self.model, &self.vehicle_model)
    }
}

// Empty strings count as absent so a blank brand still falls through.
fn first_present<'a>(primary: &'a Option<String>, fallback: &'a Option<String>) -> Option<&'a str> {
    primary
        .as_deref()
        .filter(|s| !s.is_empty())
        .or_else(|| fallback.as_deref().filter(|s| !s.is_empty()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn battery_json() -> serde_json::Value {
        json!({
            "chemistry": "Li-ion",
            "batteryType": "EV",
            "ownerId": 1,
            "brand": null,
            "model": null,
            "vehicleMake": "Nissan",
            "vehicleModel": "Leaf",
            "weightLbs": 660,
            "inputVoltage": 360,
            "outputVoltage": 360,
            "markedCapacitykWh": 40,
            "approxLengthUsedDays": 1500,
            "dateOriginallyPurchased": "2019-05-01",
            "isFunctioning": true,
            "conditionOriginallyPurchased": "Used"
        })
    }

    #[test]
    fn test_deserialize_wire_names() {
        let battery: Battery = serde_json::from_value(battery_json()).unwrap();
        assert_eq!(battery.chemistry, Chemistry::LiIon);
        assert_eq!(battery.battery_type, BatteryType::Ev);
        assert_eq!(battery.marked_capacity_kwh, 40.0);
        assert_eq!(battery.condition_originally_purchased, Condition::Used);
    }

    #[test]
    fn test_vehicle_identity_fallback() {
        let battery: Battery = serde_json::from_value(battery_json()).unwrap();
        assert_eq!(battery.effective_brand(), Some("Nissan"));
        assert_eq!(battery.effective_model(), Some("Leaf"));
    }

    #[test]
    fn test_empty_brand_falls_back() {
        let mut battery: Battery = serde_json::from_value(battery_json()).unwrap();
        battery.brand = Some(String::new());
        battery.model = Some("Leaf e+".to_string());
        assert_eq!(battery.effective_brand(), Some("Nissan"));
        assert_eq!(battery.effective_model(), Some("Leaf e+"));
    }

    #[test]
    fn test_rejects_unknown_chemistry() {
        let mut value = battery_json();
        value["chemistry"] = json!("Lead-acid");
        assert!(serde_json::from_value::<Battery>(value).is_err());
    }

    #[test]
    fn test_rejects_unknown_fields() {
        let mut value = battery_json();
        value["color"] = json!("red");
        assert!(serde_json::from_value::<Battery>(value).is_err());
    }

    #[test]
    fn test_chemistry_display_uses_wire_name() {
        assert_eq!(Chemistry::LiIon.to_string(), "Li-ion");
        assert_eq!(serde_json::to_value(Chemistry::NiMH).unwrap(), json!("NiMH"));
    }
}
