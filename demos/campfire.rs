//! A campfire scenario exercising the full cycle: build beliefs over a
//! shared world, let the planner pick a goal and a plan, then play the
//! execution-consumer role by popping actions and driving their strategies.

use std::collections::HashSet;
use std::error::Error;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use praxis::{
    Action, Actions, Belief, Beliefs, FnStrategy, Goal, Goals, IdleStrategy, Plan, PlanVisualizer,
    Planner, Point3, PraxisError, Result,
};

/// The demo's world model: a set of facts that hold, plus an agent position.
struct World {
    facts: Mutex<HashSet<String>>,
    agent_position: Mutex<Point3<f32>>,
}

impl World {
    fn new() -> Arc<Self> {
        Arc::new(Self {
            facts: Mutex::new(HashSet::new()),
            agent_position: Mutex::new(Point3::new(20.0, 0.0, 0.0)),
        })
    }

    fn set(&self, fact: &str) {
        self.facts.lock().unwrap().insert(fact.to_string());
    }

    fn holds(&self, fact: &str) -> bool {
        self.facts.lock().unwrap().contains(fact)
    }

    fn move_agent_to(&self, position: Point3<f32>) {
        *self.agent_position.lock().unwrap() = position;
    }

    fn agent_position(&self) -> Point3<f32> {
        *self.agent_position.lock().unwrap()
    }
}

fn campsite() -> Point3<f32> {
    Point3::new(0.0, 0.0, 0.0)
}

fn fact_belief(beliefs: &mut Beliefs, world: &Arc<World>, fact: &str) -> Result<Arc<Belief>> {
    let w = world.clone();
    let name = fact.to_string();
    beliefs.add(fact, move || w.holds(&name))
}

/// Pop one action at a time, run its strategy to completion, move on.
fn execute(plan: &mut Plan) {
    while let Some(step) = plan.pop() {
        print!("  executing {} ...", step.name());
        step.start();
        while !step.is_complete() {
            step.update(Duration::from_millis(16));
        }
        step.stop();
        println!(" done");
    }
}

fn main() -> std::result::Result<(), Box<dyn Error>> {
    env_logger::init();

    let world = World::new();
    world.set("has_axe");

    // Beliefs close over the shared world.
    let mut beliefs = Beliefs::new();
    let has_axe = fact_belief(&mut beliefs, &world, "has_axe")?;
    let has_wood = fact_belief(&mut beliefs, &world, "has_wood")?;
    let fire_lit = fact_belief(&mut beliefs, &world, "fire_lit")?;
    let rested = fact_belief(&mut beliefs, &world, "rested")?;
    let at_campsite = {
        let w = world.clone();
        beliefs.add_located("at_campsite", 2.0, move || w.agent_position(), campsite)?
    };

    // The action pool. Strategies are what each action does when executed;
    // the planner only looks at preconditions, effects and costs.
    let mut actions = Actions::new();
    {
        let w = world.clone();
        actions.add(
            Action::builder("walk_to_campsite")
                .cost(2.0)
                .effect(at_campsite.clone())
                .strategy(FnStrategy::new(move || w.move_agent_to(campsite())))
                .build()?,
        )?;
    }
    {
        let w = world.clone();
        actions.add(
            Action::builder("chop_wood")
                .cost(2.0)
                .precondition(has_axe)
                .effect(has_wood.clone())
                .strategy(FnStrategy::new(move || w.set("has_wood")))
                .build()?,
        )?;
    }
    {
        let w = world.clone();
        actions.add(
            Action::builder("light_fire")
                .precondition(has_wood)
                .precondition(at_campsite)
                .effect(fire_lit.clone())
                .strategy(FnStrategy::new(move || w.set("fire_lit")))
                .build()?,
        )?;
    }
    actions.add(
        Action::builder("nap")
            .cost(0.5)
            .precondition(fire_lit.clone())
            .effect(rested.clone())
            .strategy(IdleStrategy::new(Duration::from_millis(300)))
            .build()?,
    )?;

    // Competing goals: warmth first, rest once the fire is going.
    let mut goals = Goals::new();
    goals.add(
        Goal::builder("keep_warm")
            .priority(5.0)
            .desired_effect(fire_lit)
            .build()?,
    )?;
    goals.add(
        Goal::builder("get_rest")
            .priority(2.0)
            .desired_effect(rested)
            .build()?,
    )?;

    let planner = Planner::new();
    let mut previous_goal = None;

    // Keep planning and executing until nothing is left to do.
    loop {
        let mut plan =
            match planner.plan(actions.as_slice(), goals.as_slice(), previous_goal.as_ref()) {
                Ok(plan) => plan,
                Err(PraxisError::NoPlanFound) => {
                    println!("nothing left to do");
                    break;
                }
                Err(e) => return Err(e.into()),
            };

        println!("plan: {}", plan);
        PlanVisualizer::new().visualize_plan(
            actions.as_slice(),
            &plan,
            &format!("{}_plan.dot", plan.goal().name()),
        )?;

        previous_goal = Some(plan.goal().clone());
        execute(&mut plan);
    }

    assert!(world.holds("fire_lit"));
    assert!(world.holds("rested"));
    println!("fire is lit and the agent is rested");
    Ok(())
}
