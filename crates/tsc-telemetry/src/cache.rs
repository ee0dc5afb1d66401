//! `TelemetryCache`: subscription registry plus the latest snapshot.

use tsc_engine::{Engine, LaneCounts, LaneVehicles, VehicleDistances};

use crate::{QueryKind, QueryValue, TelemetryError, TelemetryResult};

/// Values collected by one refresh.  A field is `Some` iff its query was
/// subscribed at refresh time.
#[derive(Debug, Default)]
struct Snapshot {
    lane_count:         Option<LaneCounts>,
    lane_waiting_count: Option<LaneCounts>,
    lane_vehicles:      Option<LaneVehicles>,
    vehicle_distance:   Option<VehicleDistances>,
    time:               Option<f64>,
}

/// Subscribed queries and the snapshot taken at the last refresh.
///
/// Owned by the world; consumers read it through the world's accessor
/// between steps.
#[derive(Debug, Default)]
pub struct TelemetryCache {
    /// Subscription order, no duplicates.
    subscriptions: Vec<QueryKind>,
    snapshot:      Option<Snapshot>,
    refreshes:     u64,
}

impl TelemetryCache {
    pub fn new() -> Self {
        Self::default()
    }

    // ── Subscriptions ─────────────────────────────────────────────────────

    /// Subscribe to `kind`.  Returns `false` if it already was subscribed.
    pub fn subscribe(&mut self, kind: QueryKind) -> bool {
        if self.subscriptions.contains(&kind) {
            return false;
        }
        self.subscriptions.push(kind);
        true
    }

    /// Subscribe by name, failing on names outside the known set.
    pub fn subscribe_name(&mut self, name: &str) -> TelemetryResult<QueryKind> {
        let kind: QueryKind = name.parse()?;
        self.subscribe(kind);
        Ok(kind)
    }

    #[inline]
    pub fn is_subscribed(&self, kind: QueryKind) -> bool {
        self.subscriptions.contains(&kind)
    }

    pub fn subscriptions(&self) -> &[QueryKind] {
        &self.subscriptions
    }

    /// Number of completed refreshes since construction.
    pub fn refreshes(&self) -> u64 {
        self.refreshes
    }

    // ── Refresh ───────────────────────────────────────────────────────────

    /// Run every subscribed query once and replace the snapshot.
    ///
    /// On error the previous snapshot is kept untouched.
    pub fn refresh<E: Engine + ?Sized>(&mut self, engine: &E) -> TelemetryResult<()> {
        let mut next = Snapshot::default();
        for &kind in &self.subscriptions {
            match kind {
                QueryKind::LaneCount        => next.lane_count = Some(engine.lane_vehicle_count()?),
                QueryKind::LaneWaitingCount => next.lane_waiting_count = Some(engine.lane_waiting_vehicle_count()?),
                QueryKind::LaneVehicles     => next.lane_vehicles = Some(engine.lane_vehicles()?),
                QueryKind::VehicleDistance  => next.vehicle_distance = Some(engine.vehicle_distance()?),
                QueryKind::Time             => next.time = Some(engine.current_time()?),
            }
        }
        self.snapshot = Some(next);
        self.refreshes += 1;
        Ok(())
    }

    // ── Reads ─────────────────────────────────────────────────────────────

    /// The cached value of `kind`.
    pub fn get(&self, kind: QueryKind) -> TelemetryResult<QueryValue<'_>> {
        if !self.is_subscribed(kind) {
            return Err(TelemetryError::NotSubscribed(kind));
        }
        let snap = self.snapshot.as_ref().ok_or(TelemetryError::NotInitialized)?;
        let value = match kind {
            QueryKind::LaneCount        => snap.lane_count.as_ref().map(QueryValue::LaneCounts),
            QueryKind::LaneWaitingCount => snap.lane_waiting_count.as_ref().map(QueryValue::LaneCounts),
            QueryKind::LaneVehicles     => snap.lane_vehicles.as_ref().map(QueryValue::LaneVehicles),
            QueryKind::VehicleDistance  => snap.vehicle_distance.as_ref().map(QueryValue::VehicleDistances),
            QueryKind::Time             => snap.time.map(QueryValue::Time),
        };
        value.ok_or(TelemetryError::NotRefreshed(kind))
    }

    /// Like [`get`][Self::get] but by name.
    pub fn get_by_name(&self, name: &str) -> TelemetryResult<QueryValue<'_>> {
        self.get(name.parse()?)
    }

    pub fn lane_count(&self) -> TelemetryResult<&LaneCounts> {
        let snap = self.checked(QueryKind::LaneCount)?;
        snap.lane_count.as_ref().ok_or(TelemetryError::NotRefreshed(QueryKind::LaneCount))
    }

    pub fn lane_waiting_count(&self) -> TelemetryResult<&LaneCounts> {
        let snap = self.checked(QueryKind::LaneWaitingCount)?;
        snap.lane_waiting_count
            .as_ref()
            .ok_or(TelemetryError::NotRefreshed(QueryKind::LaneWaitingCount))
    }

    pub fn lane_vehicles(&self) -> TelemetryResult<&LaneVehicles> {
        let snap = self.checked(QueryKind::LaneVehicles)?;
        snap.lane_vehicles.as_ref().ok_or(TelemetryError::NotRefreshed(QueryKind::LaneVehicles))
    }

    pub fn vehicle_distance(&self) -> TelemetryResult<&VehicleDistances> {
        let snap = self.checked(QueryKind::VehicleDistance)?;
        snap.vehicle_distance
            .as_ref()
            .ok_or(TelemetryError::NotRefreshed(QueryKind::VehicleDistance))
    }

    pub fn time(&self) -> TelemetryResult<f64> {
        let snap = self.checked(QueryKind::Time)?;
        snap.time.ok_or(TelemetryError::NotRefreshed(QueryKind::Time))
    }

    fn checked(&self, kind: QueryKind) -> TelemetryResult<&Snapshot> {
        if !self.is_subscribed(kind) {
            return Err(TelemetryError::NotSubscribed(kind));
        }
        self.snapshot.as_ref().ok_or(TelemetryError::NotInitialized)
    }
}
