//! Sample lab example for the MCTS algorithm
//!
//! A small resource game: a robot moves between four modules, takes samples, has them
//! diagnosed, gathers the molecules each diagnosis asks for and turns samples into
//! medicine at the laboratory. One driver is kept for the whole game, so each turn
//! continues the tree from the previous one unless the other robot moved in between.
//!
//! Run with `RUST_LOG=debug` to see the per-action statistics of every decision.

use std::fmt;
use std::time::Duration;

use turnwise_mcts::{Action, GameState, MCTSConfig, MCTS};

const ME: usize = 0;
const OTHER: usize = 1;
const MAX_TURNS: u32 = 200;
const MAX_SAMPLES: usize = 3;
const MAX_MOLECULES: u8 = 10;
const HEALTH_BY_RANK: [u32; 3] = [1, 10, 30];

fn main() {
    // Initialize logging
    env_logger::init();

    println!("MCTS Sample Lab Example");
    println!("=======================");
    println!();

    let config = MCTSConfig::default().with_max_playout_depth(20);
    let mut mcts = MCTS::new(config);
    let mut lab = Lab::new();

    for _ in 0..40 {
        if lab.is_terminal() {
            break;
        }

        let action = match mcts.decide(lab.clone(), Duration::from_millis(30)) {
            Ok(action) => action,
            Err(e) => {
                eprintln!("No move available: {}", e);
                break;
            }
        };

        let stats = mcts.get_statistics();
        println!(
            "turn {:>3}: {:<14} ({} iterations, reused tree: {})",
            lab.turn,
            action.description(),
            stats.iterations,
            stats.reused_tree
        );

        lab = lab.apply_action(&action);
        lab.move_other_robot();
    }

    println!();
    println!("{}", lab);
    println!("{}", mcts.get_statistics().summary());
}

/// Station a robot can stand at
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Module {
    Start,
    Samples,
    Diagnosis,
    Molecules,
    Laboratory,
}

impl Module {
    const ALL: [Module; 4] = [
        Module::Samples,
        Module::Diagnosis,
        Module::Molecules,
        Module::Laboratory,
    ];

    fn name(self) -> &'static str {
        match self {
            Module::Start => "START_POS",
            Module::Samples => "SAMPLES",
            Module::Diagnosis => "DIAGNOSIS",
            Module::Molecules => "MOLECULES",
            Module::Laboratory => "LABORATORY",
        }
    }
}

const MOLECULE_NAMES: [char; 5] = ['A', 'B', 'C', 'D', 'E'];

#[derive(Debug, Clone, PartialEq, Eq)]
struct Sample {
    id: u32,
    rank: u8,
    health: u32,
    /// Molecules needed, known once diagnosed
    cost: Option<[u8; 5]>,
}

impl Sample {
    fn new(id: u32, rank: u8) -> Self {
        Sample {
            id,
            rank,
            health: HEALTH_BY_RANK[(rank - 1) as usize],
            cost: None,
        }
    }

    fn diagnose(&self) -> [u8; 5] {
        let mut cost = [0; 5];
        let total = 2 + 2 * self.rank as usize;
        for k in 0..total {
            cost[(self.id as usize + k * 2) % 5] += 1;
        }
        cost
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
struct Robot {
    target: Module,
    score: u32,
    storage: [u8; 5],
    samples: Vec<Sample>,
    diagnosed: u32,
}

impl Robot {
    fn new() -> Self {
        Robot {
            target: Module::Start,
            score: 0,
            storage: [0; 5],
            samples: Vec::new(),
            diagnosed: 0,
        }
    }

    fn molecule_count(&self) -> u8 {
        self.storage.iter().sum()
    }

    fn can_afford(&self, cost: &[u8; 5]) -> bool {
        self.storage.iter().zip(cost).all(|(have, need)| have >= need)
    }

    fn sample(&self, id: u32) -> Option<&Sample> {
        self.samples.iter().find(|sample| sample.id == id)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum LabAction {
    Goto(Module),
    TakeSample(u8),
    Diagnose(u32),
    Collect(usize),
    Produce(u32),
}

impl Action for LabAction {
    fn description(&self) -> String {
        match self {
            LabAction::Goto(module) => format!("GOTO {}", module.name()),
            LabAction::TakeSample(rank) => format!("CONNECT {}", rank),
            LabAction::Diagnose(id) | LabAction::Produce(id) => format!("CONNECT {}", id),
            LabAction::Collect(molecule) => format!("CONNECT {}", MOLECULE_NAMES[*molecule]),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
struct Lab {
    robots: [Robot; 2],
    turn: u32,
    next_sample_id: u32,
}

impl Lab {
    fn new() -> Self {
        Lab {
            robots: [Robot::new(), Robot::new()],
            turn: 0,
            next_sample_id: 0,
        }
    }

    fn me(&self) -> &Robot {
        &self.robots[ME]
    }

    /// The other robot wanders on a fixed schedule the search does not model
    fn move_other_robot(&mut self) {
        if self.turn % 5 == 0 {
            let other = &mut self.robots[OTHER];
            other.target = match other.target {
                Module::Samples => Module::Laboratory,
                _ => Module::Samples,
            };
        }
    }
}

impl GameState for Lab {
    type Action = LabAction;
    type Player = usize;

    fn get_legal_actions(&self) -> Vec<Self::Action> {
        if self.is_terminal() {
            return vec![];
        }

        let me = self.me();
        let candidates = Module::ALL
            .iter()
            .map(|&module| LabAction::Goto(module))
            .chain((1..=3).map(LabAction::TakeSample))
            .chain(me.samples.iter().map(|sample| LabAction::Diagnose(sample.id)))
            .chain((0..5).map(LabAction::Collect))
            .chain(me.samples.iter().map(|sample| LabAction::Produce(sample.id)));

        candidates.filter(|action| self.is_legal(action)).collect()
    }

    fn is_legal(&self, action: &Self::Action) -> bool {
        let me = self.me();
        match action {
            LabAction::Goto(module) => me.target != *module,
            LabAction::TakeSample(rank) => {
                me.target == Module::Samples
                    && me.samples.len() < MAX_SAMPLES
                    && (1..=3).contains(rank)
            }
            LabAction::Diagnose(id) => {
                me.target == Module::Diagnosis
                    && me.sample(*id).map_or(false, |sample| sample.cost.is_none())
            }
            LabAction::Collect(molecule) => {
                me.target == Module::Molecules
                    && *molecule < 5
                    && me.molecule_count() < MAX_MOLECULES
            }
            LabAction::Produce(id) => {
                me.target == Module::Laboratory
                    && me
                        .sample(*id)
                        .and_then(|sample| sample.cost)
                        .map_or(false, |cost| me.can_afford(&cost))
            }
        }
    }

    fn apply_action(&self, action: &Self::Action) -> Self {
        let mut next = self.clone();
        next.turn += 1;
        let me = &mut next.robots[ME];

        match action {
            LabAction::Goto(module) => me.target = *module,
            LabAction::TakeSample(rank) => {
                me.samples.push(Sample::new(next.next_sample_id, *rank));
                next.next_sample_id += 1;
            }
            LabAction::Diagnose(id) => {
                if let Some(sample) = me.samples.iter_mut().find(|s| s.id == *id) {
                    sample.cost = Some(sample.diagnose());
                    me.diagnosed += 1;
                }
            }
            LabAction::Collect(molecule) => me.storage[*molecule] += 1,
            LabAction::Produce(id) => {
                if let Some(index) = me.samples.iter().position(|s| s.id == *id) {
                    let sample = me.samples.remove(index);
                    if let Some(cost) = sample.cost {
                        for (have, need) in me.storage.iter_mut().zip(cost) {
                            *have -= need;
                        }
                        me.diagnosed -= 1;
                    }
                    me.score += sample.health;
                }
            }
        }

        next
    }

    fn is_terminal(&self) -> bool {
        self.turn >= MAX_TURNS
    }

    fn evaluate(&self, for_player: &usize) -> f64 {
        let robot = &self.robots[*for_player];
        let score = robot.diagnosed * 100
            + robot.samples.len() as u32 * 10
            + robot.molecule_count() as u32 * 10
            + robot.score * 1000;
        score as f64
    }

    fn get_current_player(&self) -> usize {
        ME
    }
}

impl fmt::Display for Lab {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let me = self.me();
        writeln!(f, "Turn {}", self.turn)?;
        writeln!(f, "At {}, score {}", me.target.name(), me.score)?;
        write!(f, "Storage:")?;
        for (name, count) in MOLECULE_NAMES.iter().zip(me.storage) {
            write!(f, " {}={}", name, count)?;
        }
        writeln!(f)?;
        for sample in &me.samples {
            writeln!(
                f,
                "Sample {} (rank {}, health {}, cost {:?})",
                sample.id, sample.rank, sample.health, sample.cost
            )?;
        }
        Ok(())
    }
}
