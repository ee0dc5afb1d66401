//! `tsc-telemetry`: per-tick snapshot of simulator measurements.
//!
//! Consumers subscribe to a fixed set of [`QueryKind`]s.  After every
//! simulator step the owner calls [`TelemetryCache::refresh`], which runs
//! each subscribed query exactly once and replaces the previous snapshot
//! wholesale.  Reads never reach the simulator.
//!
//! | Name                 | Engine call                         | Value                |
//! |----------------------|-------------------------------------|----------------------|
//! | `lane_count`         | `lane_vehicle_count`                | per-lane `usize`     |
//! | `lane_waiting_count` | `lane_waiting_vehicle_count`        | per-lane `usize`     |
//! | `lane_vehicles`      | `lane_vehicles`                     | per-lane vehicle ids |
//! | `vehicle_distance`   | `vehicle_distance`                  | per-vehicle metres   |
//! | `time`               | `current_time`                      | seconds              |

pub mod cache;
pub mod error;
pub mod query;


pub use cache::TelemetryCache;
pub use error::{TelemetryError, TelemetryResult};
pub use query::{QueryKind, QueryValue};
