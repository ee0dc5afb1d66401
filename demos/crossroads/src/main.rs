//! crossroads: one signalized crossroads under three controllers.
//!
//! Runs the same synthetic demand against a fixed-time plan, max-pressure
//! and a random policy, and prints the mean travel time of each.  The
//! simulator is `ScriptedEngine` driven by a small queue model: vehicles
//! arrive on the incoming lanes, the green movements discharge one vehicle
//! per lane per second, and vehicles leave the network one second after
//! crossing.
//!
//! Set `RUST_LOG=debug` to see every phase command.

mod network;

use std::collections::{HashMap, VecDeque};
use std::io::Cursor;
use std::sync::Arc;

use anyhow::Result;
use log::info;

use tsc_agent::{
    Average, Controller, FixedTimeController, LaneStat, LaneVehicleGenerator, LaneVehicleOptions,
    MaxPressureController, PlanFormat, RandomController, TscEnv, load_signal_plan_reader,
};
use tsc_core::{IntersectionId, LaneId, SimRng, VehicleId, WorldConfig};
use tsc_engine::ScriptedEngine;
use tsc_world::{World, WorldBuilder};

use network::{ARMS, CENTER, build_roadnet};

// ── Constants ─────────────────────────────────────────────────────────────────

const SEED:  u64 = 42;
const STEPS: u64 = 300;

/// Arrival probability per incoming lane per second, by arm.
const DEMAND: [f64; 4] = [0.30, 0.08, 0.30, 0.08];

/// Switch points for the fixed-time controller: 30 s per phase.
const PLAN_CSV: &str = "\
30,0\n60,1\n90,0\n120,1\n150,0\n180,1\n210,0\n240,1\n270,0\n300,1\n";

// ── Queue model ───────────────────────────────────────────────────────────────

struct Traffic {
    rng:      SimRng,
    next_id:  u64,
    /// FIFO per incoming lane.
    queues:   HashMap<LaneId, VecDeque<VehicleId>>,
    /// Vehicles that crossed last tick and leave on this one.
    leaving:  Vec<VehicleId>,
}

impl Traffic {
    fn new(seed: u64) -> Self {
        Self { rng: SimRng::new(seed), next_id: 0, queues: HashMap::new(), leaving: Vec::new() }
    }

    /// Move vehicles for the tick about to be stepped.
    fn advance(&mut self, world: &mut World<ScriptedEngine>) -> Result<()> {
        let net = Arc::clone(world.roadnet());
        let ix = net
            .intersection(CENTER)
            .ok_or_else(|| anyhow::anyhow!("no intersection {CENTER}"))?;
        let shown = world.phase_state(CENTER)?.true_phase;

        let engine = world.engine_mut();
        for v in self.leaving.drain(..) {
            engine.remove_vehicle(&v);
        }

        // Discharge the green movements, one vehicle per start lane.
        if let Some(phase) = ix.phases.iter().find(|p| p.light_phase == shown) {
            let mut served: Vec<&LaneId> = Vec::new();
            for link in &phase.lanelinks {
                if served.contains(&&link.start) {
                    continue;
                }
                let Some(v) = self.queues.get_mut(&link.start).and_then(VecDeque::pop_front) else {
                    continue;
                };
                served.push(&link.start);
                engine.place_vehicle(link.end.clone(), v.clone());
                self.leaving.push(v);
            }
        }

        // Arrivals.
        for (arm, &p) in ARMS.iter().zip(&DEMAND) {
            let Some(road) = ix.roads.iter().find(|r| !r.is_out && r.id.as_str() == format!("{}_in", arm.0))
            else {
                continue;
            };
            for lane in &road.lanes {
                if self.rng.random::<f64>() < p {
                    let v = VehicleId::new(format!("veh_{}", self.next_id));
                    self.next_id += 1;
                    engine.place_vehicle(lane.clone(), v.clone());
                    self.queues.entry(lane.clone()).or_default().push_back(v);
                }
            }
        }

        for (lane, queue) in &self.queues {
            engine.set_waiting_count(lane.clone(), queue.len());
        }
        Ok(())
    }
}

// ── Runs ──────────────────────────────────────────────────────────────────────

fn make_world(config: &WorldConfig) -> Result<World<ScriptedEngine>> {
    let net = build_roadnet(config)?;
    Ok(WorldBuilder::new(config.clone(), ScriptedEngine::new(config.interval))
        .roadnet(net)
        .build()?)
}

fn run(name: &str, world: World<ScriptedEngine>, controller: Box<dyn Controller<ScriptedEngine>>) -> Result<(f64, usize)> {
    let mut env = TscEnv::new(world, vec![controller])?.with_travel_time();
    let mut traffic = Traffic::new(SEED);
    env.reset()?;
    for _ in 0..STEPS {
        traffic.advance(env.world_mut())?;
        env.step()?;
    }
    let mean = env.run(0)?.unwrap_or_default();
    let trips = env.metric().map_or(0, |m| m.completed());
    info!("{name}: {trips} trips, mean travel time {mean:.2} s");
    Ok((mean, trips))
}

// ── main ──────────────────────────────────────────────────────────────────────

fn main() -> Result<()> {
    env_logger::init();

    println!("=== crossroads: traffic signal control ===");
    println!("Steps: {STEPS}  |  Seed: {SEED}");
    println!();

    let config = WorldConfig { seed: SEED, ..WorldConfig::default() };
    let center = IntersectionId::new(CENTER);
    let mut results = Vec::new();

    // 1. Fixed time.
    let world = make_world(&config)?;
    let plan = load_signal_plan_reader(Cursor::new(PLAN_CSV), PlanFormat::Multi)?;
    let fixed = FixedTimeController::new(&world, center.clone(), plan)?;
    results.push(("fixed-time", run("fixed-time", world, Box::new(fixed))?));

    // 2. Max pressure.
    let mut world = make_world(&config)?;
    let mp = MaxPressureController::new(&mut world, center.clone())?;
    results.push(("max-pressure", run("max-pressure", world, Box::new(mp))?));

    // 3. Random, with a queue-length observation and reward attached.
    let mut world = make_world(&config)?;
    let opts = LaneVehicleOptions { in_only: true, average: Average::Road, negative: false };
    let observation = LaneVehicleGenerator::new(&mut world, vec![LaneStat::Count], opts)?;
    let reward = LaneVehicleGenerator::new(
        &mut world,
        vec![LaneStat::WaitingCount],
        LaneVehicleOptions { negative: true, ..opts },
    )?;
    let random = RandomController::new(&world, center)?
        .with_observation(observation)
        .with_reward(reward);
    results.push(("random", run("random", world, Box::new(random))?));

    println!("{:<14} {:>14} {:>8}", "Controller", "Travel time", "Trips");
    println!("{}", "-".repeat(38));
    for (name, (mean, trips)) in results {
        println!("{name:<14} {:>12.2} s {trips:>8}", mean);
    }

    Ok(())
}
