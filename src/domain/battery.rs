// Battery domain model and derived classification
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Snapshot of a single device's battery state, as reported by the remote API.
/// Replaced wholesale on each successful fetch.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BatteryStatus {
    pub log_time: DateTime<Utc>,
    pub battery_energy_lifetime_import_kwh: f64,
    pub battery_energy_lifetime_export_kwh: f64,
    pub battery_power_kw: f64,
    pub battery_power_setpoint_kw: f64,
    pub cycle_count_day: f64,
    pub cycle_count_ytd: f64,
    pub cycle_count_lifetime: f64,
    pub available_charge_power_kw: f64,
    pub available_discharge_power_kw: f64,
    pub charge_capacity_remaining_kwh: f64,
}

/// Availability tier derived from the available discharge power.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum BatteryStatusType {
    #[serde(rename = "OK")]
    Ok,
    #[serde(rename = "Partially Available")]
    PartiallyAvailable,
    #[serde(rename = "Not Available")]
    NotAvailable,
}

impl BatteryStatusType {
    /// Classify a status snapshot. Boundary values fall to the lower tier.
    pub fn classify(status: Option<&BatteryStatus>) -> Self {
        let Some(status) = status else {
            return Self::NotAvailable;
        };

        if status.available_discharge_power_kw > 100.0 {
            Self::Ok
        } else if status.available_discharge_power_kw > 50.0 {
            Self::PartiallyAvailable
        } else {
            Self::NotAvailable
        }
    }

    /// Display color for the status card.
    pub fn color(self) -> &'static str {
        match self {
            Self::Ok => "#00A651",
            Self::PartiallyAvailable => "#009fe3",
            Self::NotAvailable => "#e74c3c",
        }
    }
}

impl std::fmt::Display for BatteryStatusType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let label = match self {
            Self::Ok => "OK",
            Self::PartiallyAvailable => "Partially Available",
            Self::NotAvailable => "Not Available",
        };
        write!(f, "{}", label)
    }
}

/// Remaining charge as a percentage of the combined available charge and
/// discharge power. Zero when no status is known or the denominator is zero.
pub fn battery_percentage(status: Option<&BatteryStatus>) -> i64 {
    let Some(status) = status else {
        return 0;
    };

    let max_capacity = status.available_charge_power_kw + status.available_discharge_power_kw;
    if max_capacity == 0.0 {
        return 0;
    }

    ((status.charge_capacity_remaining_kwh / max_capacity) * 100.0).round() as i64
}

#[cfg(test)]
mod tests {
    use super::*;

    fn status_with_discharge(kw: f64) -> BatteryStatus {
        BatteryStatus {
            log_time: Utc::now(),
            battery_energy_lifetime_import_kwh: 0.0,
            battery_energy_lifetime_export_kwh: 0.0,
            battery_power_kw: 0.0,
            battery_power_setpoint_kw: 0.0,
            cycle_count_day: 0.0,
            cycle_count_ytd: 0.0,
            cycle_count_lifetime: 0.0,
            available_charge_power_kw: 0.0,
            available_discharge_power_kw: kw,
            charge_capacity_remaining_kwh: 0.0,
        }
    }

    #[test]
    fn test_classify_tiers() {
        assert_eq!(
            BatteryStatusType::classify(Some(&status_with_discharge(150.0))),
            BatteryStatusType::Ok
        );
        assert_eq!(
            BatteryStatusType::classify(Some(&status_with_discharge(65.0))),
            BatteryStatusType::PartiallyAvailable
        );
        assert_eq!(
            BatteryStatusType::classify(Some(&status_with_discharge(10.0))),
            BatteryStatusType::NotAvailable
        );
        assert_eq!(
            BatteryStatusType::classify(None),
            BatteryStatusType::NotAvailable
        );
    }

    #[test]
    fn test_classify_boundaries_fall_to_lower_tier() {
        assert_eq!(
            BatteryStatusType::classify(Some(&status_with_discharge(100.0))),
            BatteryStatusType::PartiallyAvailable
        );
        assert_eq!(
            BatteryStatusType::classify(Some(&status_with_discharge(50.0))),
            BatteryStatusType::NotAvailable
        );
    }

    #[test]
    fn test_status_colors() {
        assert_eq!(BatteryStatusType::Ok.color(), "#00A651");
        assert_eq!(BatteryStatusType::PartiallyAvailable.color(), "#009fe3");
        assert_eq!(BatteryStatusType::NotAvailable.color(), "#e74c3c");
    }

    #[test]
    fn test_battery_percentage() {
        let mut status = status_with_discharge(65.0);
        status.available_charge_power_kw = 35.0;
        status.charge_capacity_remaining_kwh = 50.0;
        assert_eq!(battery_percentage(Some(&status)), 50);

        // Rounded, not truncated
        status.charge_capacity_remaining_kwh = 66.6;
        assert_eq!(battery_percentage(Some(&status)), 67);
    }

    #[test]
    fn test_battery_percentage_guards() {
        assert_eq!(battery_percentage(None), 0);
        assert_eq!(battery_percentage(Some(&status_with_discharge(0.0))), 0);
    }

    #[test]
    fn test_status_deserializes_wire_field_names() {
        let status: BatteryStatus = serde_json::from_value(serde_json::json!({
            "logTime": "2024-03-01T12:00:00Z",
            "batteryEnergyLifetimeImportKwh": 1200.5,
            "batteryEnergyLifetimeExportKwh": 1100.25,
            "batteryPowerKw": -12.0,
            "batteryPowerSetpointKw": -15.0,
            "cycleCountDay": 0.4,
            "cycleCountYtd": 87.0,
            "cycleCountLifetime": 412.0,
            "availableChargePowerKw": 35.0,
            "availableDischargePowerKw": 65.0,
            "chargeCapacityRemainingKwh": 50.0,
        }))
        .unwrap();

        assert_eq!(status.available_discharge_power_kw, 65.0);
        assert_eq!(status.cycle_count_lifetime, 412.0);
        assert_eq!(status.log_time.to_rfc3339(), "2024-03-01T12:00:00+00:00");
    }
}
