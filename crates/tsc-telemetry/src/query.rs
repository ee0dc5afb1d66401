//! The closed set of telemetry queries.

use std::fmt;
use std::str::FromStr;

use tsc_engine::{LaneCounts, LaneVehicles, VehicleDistances};

use crate::TelemetryError;

/// A measurement the cache can collect from the simulator.
#[derive(Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum QueryKind {
    LaneCount,
    LaneWaitingCount,
    LaneVehicles,
    VehicleDistance,
    Time,
}

impl QueryKind {
    pub const ALL: [QueryKind; 5] = [
        QueryKind::LaneCount,
        QueryKind::LaneWaitingCount,
        QueryKind::LaneVehicles,
        QueryKind::VehicleDistance,
        QueryKind::Time,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            QueryKind::LaneCount        => "lane_count",
            QueryKind::LaneWaitingCount => "lane_waiting_count",
            QueryKind::LaneVehicles     => "lane_vehicles",
            QueryKind::VehicleDistance  => "vehicle_distance",
            QueryKind::Time             => "time",
        }
    }
}

impl fmt::Display for QueryKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for QueryKind {
    type Err = TelemetryError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        QueryKind::ALL
            .into_iter()
            .find(|k| k.as_str() == s)
            .ok_or_else(|| TelemetryError::UnknownQuery(s.to_owned()))
    }
}

/// A borrowed view of one cached measurement.
#[derive(Copy, Clone, Debug, PartialEq)]
pub enum QueryValue<'a> {
    LaneCounts(&'a LaneCounts),
    LaneVehicles(&'a LaneVehicles),
    VehicleDistances(&'a VehicleDistances),
    Time(f64),
}

impl<'a> QueryValue<'a> {
    pub fn as_lane_counts(self) -> Option<&'a LaneCounts> {
        match self {
            QueryValue::LaneCounts(v) => Some(v),
            _ => None,
        }
    }

    pub fn as_lane_vehicles(self) -> Option<&'a LaneVehicles> {
        match self {
            QueryValue::LaneVehicles(v) => Some(v),
            _ => None,
        }
    }

    pub fn as_vehicle_distances(self) -> Option<&'a VehicleDistances> {
        match self {
            QueryValue::VehicleDistances(v) => Some(v),
            _ => None,
        }
    }

    pub fn as_time(self) -> Option<f64> {
        match self {
            QueryValue::Time(t) => Some(t),
            _ => None,
        }
    }
}
