//! Fluent builder for constructing a [`World`].

use std::path::PathBuf;
use std::sync::Arc;

use log::{info, warn};

use tsc_core::WorldConfig;
use tsc_engine::Engine;
use tsc_roadnet::{EngineFileConfig, RoadNet};
use tsc_signal::PhaseStateMachine;
use tsc_telemetry::{QueryKind, TelemetryCache};

use crate::{World, WorldError, WorldResult};

enum RoadnetSource {
    Built(Arc<RoadNet>),
    File(PathBuf),
    EngineConfig(PathBuf),
}

/// Fluent builder for [`World<E>`].
///
/// # Required inputs
///
/// - [`WorldConfig`]: interval, yellow time and ids, traffic side, seed
/// - `E: Engine`: the simulator behind the world
/// - a road net, from exactly one of the sources below
///
/// # Road-net sources
///
/// | Method                     | Source                                         |
/// |----------------------------|------------------------------------------------|
/// | `.roadnet(n)`              | An already built `RoadNet` (or `Arc<RoadNet>`) |
/// | `.roadnet_file(p)`         | A road-net description JSON file               |
/// | `.engine_config_file(p)`   | The simulator's config file; its `interval` and `seed` override the config |
///
/// The last source set wins.
///
/// # Example
///
/// ```rust,ignore
/// let world = WorldBuilder::new(config, engine)
///     .engine_config_file("data/config.json")
///     .subscribe(QueryKind::LaneCount)
///     .build()?;
/// ```
pub struct WorldBuilder<E: Engine> {
    config:        WorldConfig,
    engine:        E,
    roadnet:       Option<RoadnetSource>,
    subscriptions: Vec<QueryKind>,
}

impl<E: Engine> WorldBuilder<E> {
    pub fn new(config: WorldConfig, engine: E) -> Self {
        Self { config, engine, roadnet: None, subscriptions: Vec::new() }
    }

    /// Use a topology that was built elsewhere.
    ///
    /// It must have been built with the same `right_hand_traffic` and
    /// `yellow_phase_ids` as the world's config.
    pub fn roadnet(mut self, roadnet: impl Into<Arc<RoadNet>>) -> Self {
        self.roadnet = Some(RoadnetSource::Built(roadnet.into()));
        self
    }

    pub fn roadnet_file(mut self, path: impl Into<PathBuf>) -> Self {
        self.roadnet = Some(RoadnetSource::File(path.into()));
        self
    }

    pub fn engine_config_file(mut self, path: impl Into<PathBuf>) -> Self {
        self.roadnet = Some(RoadnetSource::EngineConfig(path.into()));
        self
    }

    /// Subscribe a telemetry query up front.  Repeats are ignored.
    pub fn subscribe(mut self, kind: QueryKind) -> Self {
        self.subscriptions.push(kind);
        self
    }

    /// Validate inputs, build the topology and one phase machine per
    /// controllable intersection.
    ///
    /// The returned world must be [`reset`][World::reset] before stepping.
    pub fn build(self) -> WorldResult<World<E>> {
        let mut config = self.config;

        let roadnet = match self.roadnet {
            None => return Err(WorldError::Config("no road net supplied".into())),
            Some(RoadnetSource::Built(net)) => {
                if net.right_hand_traffic != config.right_hand_traffic {
                    return Err(WorldError::Config(
                        "road net was built for the other traffic side".into(),
                    ));
                }
                if net.yellow_phase_ids != config.yellow_phase_ids {
                    return Err(WorldError::Config(format!(
                        "road net was built with yellow phases {:?}, config has {:?}",
                        net.yellow_phase_ids, config.yellow_phase_ids
                    )));
                }
                config.validate()?;
                check_yellow_phases(&net, &config)?;
                net
            }
            Some(RoadnetSource::File(path)) => {
                Arc::new(RoadNet::from_path(&path, &config)?)
            }
            Some(RoadnetSource::EngineConfig(path)) => {
                let file = EngineFileConfig::from_path(&path)?;
                if !file.rl_traffic_light {
                    warn!(
                        "{}: rlTrafficLight is off; the simulator may override phase commands",
                        path.display()
                    );
                }
                config.interval = file.interval;
                config.seed = file.seed;
                Arc::new(RoadNet::from_path(&file.roadnet_path(), &config)?)
            }
        };

        let machines = roadnet
            .intersections
            .iter()
            .map(|ix| PhaseStateMachine::for_intersection(ix, &config))
            .collect::<Result<Vec<_>, _>>()?;

        let mut telemetry = TelemetryCache::new();
        for kind in self.subscriptions {
            telemetry.subscribe(kind);
        }

        info!(
            "world built: {} intersections, interval {} s, yellow {} s",
            roadnet.intersection_count(),
            config.interval,
            config.yellow_phase_time
        );

        Ok(World {
            clock:     config.make_clock(),
            requested: vec![0; machines.len()],
            config,
            roadnet,
            machines,
            telemetry,
            engine:    self.engine,
            ready:     false,
        })
    }
}

/// A pre-built net may have been built without a yellow time, so the yellow
/// light phase was never checked against each intersection's light phases.
fn check_yellow_phases(net: &RoadNet, config: &WorldConfig) -> WorldResult<()> {
    if config.yellow_phase_time <= 0.0 {
        return Ok(());
    }
    for ix in &net.intersections {
        if let Some(yellow) = ix.yellow_phase.filter(|&y| y >= ix.light_phase_count) {
            return Err(WorldError::Config(format!(
                "intersection {}: yellow phase {yellow} not among its {} light phases",
                ix.id, ix.light_phase_count
            )));
        }
    }
    Ok(())
}
