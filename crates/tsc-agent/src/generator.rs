//! `LaneVehicleGenerator`: observation and reward vectors from lane
//! statistics.

use std::fmt;
use std::str::FromStr;

use tsc_core::{IntersectionId, LaneId};
use tsc_engine::{Engine, LaneCounts};
use tsc_telemetry::QueryKind;
use tsc_world::World;

use crate::{AgentError, AgentResult};

/// A per-lane statistic the generator can report.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum LaneStat {
    /// Vehicles on the lane.
    Count,
    /// Vehicles on the lane that are waiting.
    WaitingCount,
}

impl LaneStat {
    fn query(self) -> QueryKind {
        match self {
            LaneStat::Count => QueryKind::LaneCount,
            LaneStat::WaitingCount => QueryKind::LaneWaitingCount,
        }
    }
}

impl fmt::Display for LaneStat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            LaneStat::Count => "count",
            LaneStat::WaitingCount => "waiting_count",
        })
    }
}

impl FromStr for LaneStat {
    type Err = AgentError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "count" => Ok(LaneStat::Count),
            "waiting_count" => Ok(LaneStat::WaitingCount),
            other => Err(AgentError::Config(format!("unknown lane statistic {other:?}"))),
        }
    }
}

/// How lane values are folded before they are reported.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub enum Average {
    /// One value per lane.
    #[default]
    None,
    /// One value per road: the mean of its lanes.
    Road,
    /// One value per statistic: the mean of the per-road means.
    All,
}

#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct LaneVehicleOptions {
    /// Only roads entering the intersection.
    pub in_only:  bool,
    pub average:  Average,
    /// Negate every value (useful as a queue-length penalty).
    pub negative: bool,
}

/// Builds one vector per intersection from cached lane statistics.
///
/// Layout of an intersection's vector: for each statistic in the order
/// given, its roads in clockwise order, each road's lanes in the order
/// `Intersection::lanes` lists them for the topology returned by
/// [`World::topology_for`].
/// Lanes missing from the snapshot count as empty.
#[derive(Clone, Debug)]
pub struct LaneVehicleGenerator {
    stats:   Vec<LaneStat>,
    options: LaneVehicleOptions,
    /// Per intersection, in world order: lane ids grouped by road.
    lanes:   Vec<(IntersectionId, Vec<Vec<LaneId>>)>,
}

impl LaneVehicleGenerator {
    /// Snapshot the lane layout of every intersection and subscribe the
    /// queries behind `stats`.
    pub fn new<E: Engine>(
        world:   &mut World<E>,
        stats:   Vec<LaneStat>,
        options: LaneVehicleOptions,
    ) -> AgentResult<Self> {
        if stats.is_empty() {
            return Err(AgentError::Config("lane vehicle generator needs a statistic".into()));
        }
        for stat in &stats {
            world.subscribe(stat.query());
        }
        let lanes = world
            .intersections()
            .iter()
            .map(|ix| {
                let roads = ix.lanes(options.in_only).map(<[LaneId]>::to_vec).collect();
                (ix.id.clone(), roads)
            })
            .collect();
        Ok(Self { stats, options, lanes })
    }

    /// Like [`new`][Self::new] with statistics given by name
    /// (`"count"`, `"waiting_count"`).
    pub fn from_names<E: Engine>(
        world:   &mut World<E>,
        names:   &[&str],
        options: LaneVehicleOptions,
    ) -> AgentResult<Self> {
        let stats = names.iter().map(|n| n.parse()).collect::<AgentResult<Vec<_>>>()?;
        Self::new(world, stats, options)
    }

    pub fn options(&self) -> &LaneVehicleOptions {
        &self.options
    }

    /// Vectors for every intersection, in world order.
    pub fn generate<E: Engine>(&self, world: &World<E>) -> AgentResult<Vec<Vec<f64>>> {
        let tables = self.tables(world)?;
        Ok(self.lanes.iter().map(|(_, roads)| self.fold(&tables, roads)).collect())
    }

    /// The vector of one intersection.
    pub fn generate_for<E: Engine>(&self, world: &World<E>, id: &IntersectionId) -> AgentResult<Vec<f64>> {
        let (_, roads) = self
            .lanes
            .iter()
            .find(|(iid, _)| iid == id)
            .ok_or_else(|| AgentError::Config(format!("generator has no intersection {id}")))?;
        Ok(self.fold(&self.tables(world)?, roads))
    }

    fn tables<'w, E: Engine>(&self, world: &'w World<E>) -> AgentResult<Vec<&'w LaneCounts>> {
        self.stats
            .iter()
            .map(|stat| -> AgentResult<&'w LaneCounts> {
                let table = match stat {
                    LaneStat::Count => world.telemetry().lane_count()?,
                    LaneStat::WaitingCount => world.telemetry().lane_waiting_count()?,
                };
                Ok(table)
            })
            .collect()
    }

    fn fold(&self, tables: &[&LaneCounts], roads: &[Vec<LaneId>]) -> Vec<f64> {
        let mut out = Vec::new();
        for table in tables {
            let value = |lane: &LaneId| table.get(lane).copied().unwrap_or(0) as f64;
            match self.options.average {
                Average::None => out.extend(roads.iter().flatten().map(value)),
                Average::Road => out.extend(roads.iter().map(|r| mean(r.iter().map(value)))),
                Average::All => out.push(mean(roads.iter().map(|r| mean(r.iter().map(value))))),
            }
        }
        if self.options.negative {
            out.iter_mut().for_each(|v| *v = -*v);
        }
        out
    }
}

fn mean(values: impl Iterator<Item = f64>) -> f64 {
    let (sum, n) = values.fold((0.0, 0usize), |(s, n), v| (s + v, n + 1));
    if n == 0 { 0.0 } else { sum / n as f64 }
}
