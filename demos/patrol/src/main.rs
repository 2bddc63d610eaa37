//! patrol — smallest runnable scenario for the gridworld framework.
//!
//! A 12×8 warehouse split by a wall with one (initially closed) door.
//! Two sentries walk fixed loops on the west side, reporting to their team
//! after every lap.  A courier picks up a crate, opens the door, carries the
//! crate through, and drops it on the east side.  A battery in the corner
//! drains one charge per tick.  The run writes its full action trace and
//! per-tick agent snapshots to `output/patrol/`.

use std::collections::VecDeque;
use std::path::Path;
use std::time::Instant;

use anyhow::Result;

use gw_brain::{AgentBrain, Decision};
use gw_core::{ActionArgs, ActionKind, AgentRng, Coord, GridShape, TypeTag, WorldConfig};
use gw_message::{Address, Message};
use gw_object::{AgentBody, SenseCapability, WorldObject};
use gw_output::{CsvWriter, WorldOutputObserver};
use gw_sim::WorldBuilder;
use gw_world::{LimitedTickGoal, WorldView};

// ── Constants ─────────────────────────────────────────────────────────────────

const SEED: u64 = 42;
const TOTAL_TICKS: u64 = 40;
const WIDTH: u32 = 12;
const HEIGHT: u32 = 8;
const TEAM: &str = "patrol";

// ── Sentry ────────────────────────────────────────────────────────────────────

/// Walks a fixed loop forever, reporting to the team after each lap.
struct SentryBrain {
    route: Vec<ActionKind>,
    next: usize,
    laps: u64,
}

impl SentryBrain {
    fn new(route: Vec<ActionKind>) -> Self {
        Self { route, next: 0, laps: 0 }
    }
}

impl AgentBrain for SentryBrain {
    fn decide_on_action(&mut self, view: &WorldView, _rng: &mut AgentRng) -> Decision {
        let step = self.route[self.next];
        self.next = (self.next + 1) % self.route.len();

        let mut decision = Decision::act(step, ActionArgs::none());
        if self.next == 0 {
            self.laps += 1;
            let report = format!("lap {} clear", self.laps);
            if let Ok(message) = Message::new(view.self_id, Address::To(TEAM.into()), report) {
                decision = decision.with_message(message);
            }
        }
        decision
    }
}

// ── Courier ───────────────────────────────────────────────────────────────────

enum CourierStep {
    Move(ActionKind),
    Grab,
    OpenDoor,
    Drop,
}

/// Runs a fixed delivery plan, retrying a step until it succeeds.
struct CourierBrain {
    plan: VecDeque<CourierStep>,
    waiting: bool,
}

impl CourierBrain {
    fn new(plan: VecDeque<CourierStep>) -> Self {
        Self { plan, waiting: false }
    }
}

impl AgentBrain for CourierBrain {
    fn decide_on_action(&mut self, view: &WorldView, _rng: &mut AgentRng) -> Decision {
        self.waiting = true;
        match self.plan.front() {
            None => Decision::idle(),
            Some(CourierStep::Move(kind)) => Decision::act(*kind, ActionArgs::none()),
            Some(CourierStep::Grab) => {
                Decision::act(ActionKind::GrabObject, ActionArgs::none().with_range(1.5))
            }
            Some(CourierStep::OpenDoor) => {
                // Target the nearest visible door explicitly.
                match view.of_kind(TypeTag::Door).next() {
                    Some(door) => {
                        Decision::act(ActionKind::OpenDoor, ActionArgs::for_object(door.id))
                    }
                    None => Decision::idle(),
                }
            }
            Some(CourierStep::Drop) => Decision::act(ActionKind::DropObject, ActionArgs::none()),
        }
    }

    fn on_action_result(&mut self, result: &gw_action::ActionResult) {
        // A failed step stays at the front of the plan and is retried.
        if self.waiting && result.succeeded() {
            self.plan.pop_front();
        }
        self.waiting = false;
    }
}

// ── main ──────────────────────────────────────────────────────────────────────

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::INFO.into()),
        )
        .init();

    println!("=== patrol — gridworld demo ===");
    println!("Grid: {WIDTH}x{HEIGHT}  |  Ticks: {TOTAL_TICKS}  |  Seed: {SEED}");
    println!();

    let mut builder = WorldBuilder::new(WorldConfig::new(GridShape::new(WIDTH, HEIGHT), SEED));

    // Dividing wall at x = 6 with a closed door at (6, 3).
    for y in 0..HEIGHT as i32 {
        if y == 3 {
            builder.add_object(WorldObject::door("divider_door", Coord::new(6, 3), false))?;
        } else {
            builder.add_object(WorldObject::wall(format!("wall_{y}"), Coord::new(6, y)))?;
        }
    }

    let cargo = builder.add_object(WorldObject::block("crate", Coord::new(4, 4)))?;
    let battery = builder.add_object(WorldObject::battery("backup_cell", Coord::new(0, 7), 50))?;

    // Two sentries on a shared team, square loops west of the wall.
    let loop_route = vec![
        ActionKind::MoveEast,
        ActionKind::MoveEast,
        ActionKind::MoveSouth,
        ActionKind::MoveSouth,
        ActionKind::MoveWest,
        ActionKind::MoveWest,
        ActionKind::MoveNorth,
        ActionKind::MoveNorth,
    ];
    builder.add_agent(
        AgentBody::new("sentry_north", Coord::new(1, 1))
            .with_team(TEAM)
            .with_sense(SenseCapability::uniform(6.0)),
        Box::new(SentryBrain::new(loop_route.clone())),
    )?;
    builder.add_agent(
        AgentBody::new("sentry_south", Coord::new(1, 5))
            .with_team(TEAM)
            .with_sense(SenseCapability::uniform(6.0)),
        Box::new(SentryBrain::new(loop_route)),
    )?;

    // Courier: walk to the crate, grab it, open the door, carry it through,
    // drop it on the east side.
    let plan = VecDeque::from([
        CourierStep::Move(ActionKind::MoveEast),
        CourierStep::Move(ActionKind::MoveEast),
        CourierStep::Move(ActionKind::MoveEast),
        CourierStep::Move(ActionKind::MoveEast),
        CourierStep::Grab,
        CourierStep::OpenDoor,
        CourierStep::Move(ActionKind::MoveEast),
        CourierStep::Move(ActionKind::MoveEast),
        CourierStep::Move(ActionKind::MoveEast),
        CourierStep::Drop,
    ]);
    let courier = builder.add_agent(
        AgentBody::new("courier", Coord::new(1, 3)),
        Box::new(CourierBrain::new(plan)),
    )?;

    builder.add_goal(Box::new(LimitedTickGoal::new(TOTAL_TICKS)));
    let mut world = builder.build()?;

    // CSV traces under output/patrol/.
    std::fs::create_dir_all("output/patrol")?;
    let writer = CsvWriter::new(Path::new("output/patrol"))?;
    let mut obs = WorldOutputObserver::new(writer);

    let t0 = Instant::now();
    let final_tick = world.run(&mut obs)?;
    let elapsed = t0.elapsed();

    if let Some(e) = obs.take_error() {
        eprintln!("output error: {e}");
    }

    println!("Simulation complete at {final_tick} in {:.3} s", elapsed.as_secs_f64());
    println!();

    // Final state table.
    println!("{:<16} {:<10} {:<8}", "Agent", "Location", "Carrying");
    println!("{}", "-".repeat(36));
    for body in world.registry.agents() {
        println!("{:<16} {:<10} {:<8}", body.name, body.location.to_string(), body.carry_count());
    }

    let crate_at = world.registry.object(cargo).map(|obj| obj.location);
    let charge = world
        .registry
        .object(battery)
        .and_then(|obj| obj.properties["charge"].as_int());
    println!();
    println!("crate ended at {:?}", crate_at);
    println!("backup cell charge: {:?}", charge);
    println!(
        "team chatter: {} messages in #{TEAM}",
        world
            .router
            .room_by_name(TEAM)
            .map_or(0, |room| room.len())
    );
    println!("traces written to output/patrol/");

    if world.registry.agent(courier).is_some_and(|body| body.location.x > 6) {
        println!("delivery completed");
    }

    Ok(())
}
