//! Simulation configuration.

/// Configuration for a simulation run.
#[derive(Debug, Clone)]
pub struct SimConfig {
    /// Number of simulated characters
    pub num_runs: u32,

    /// Random seed for reproducibility (None = random)
    pub seed: Option<u64>,

    /// Encounters per run before giving up
    pub max_encounters: u32,

    /// Realm rank to reach (9 = start, 0 = summit)
    pub target_rank: u8,

    /// Talk to every quest giver up front and turn quests in as they finish
    pub simulate_quests: bool,

    /// Log verbosity (0 = silent, 1 = summary, 2 = per run)
    pub verbosity: u8,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            num_runs: 200,
            seed: None,
            max_encounters: 2_000,
            target_rank: 5,
            simulate_quests: true,
            verbosity: 1,
        }
    }
}

impl SimConfig {
    /// A handful of short runs for smoke testing balance changes.
    pub fn quick() -> Self {
        Self {
            num_runs: 20,
            max_encounters: 300,
            target_rank: 7,
            ..Default::default()
        }
    }

    /// Long runs aimed at the top of the ladder.
    pub fn full_ladder() -> Self {
        Self {
            num_runs: 50,
            max_encounters: 20_000,
            target_rank: 0,
            ..Default::default()
        }
    }
}
