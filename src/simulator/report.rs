//! Simulation report generation.

use super::runner::RunStats;
use crate::core::constants::NUM_REALMS;
use crate::cultivation::realms::realm_name;
use serde::Serialize;
use std::collections::BTreeMap;

/// Aggregated results from multiple simulation runs.
#[derive(Debug, Clone, Serialize)]
pub struct SimReport {
    pub generated_at: String,
    pub num_runs: u32,
    pub target_rank: u8,
    pub runs_reached_target: u32,

    pub avg_final_rank: f64,
    pub avg_encounters: f64,
    pub avg_victories: f64,
    pub avg_deaths: f64,
    pub avg_flees: f64,
    pub avg_items_dropped: f64,
    pub avg_potions_used: f64,
    pub avg_quests_completed: f64,

    /// Final rank -> number of runs that stopped there.
    pub rank_distribution: BTreeMap<u8, u32>,
    /// Indexed by realm rank.
    pub avg_encounters_per_rank: Vec<f64>,
    pub avg_deaths_per_rank: Vec<f64>,

    #[serde(skip)]
    pub run_stats: Vec<RunStats>,
}

fn mean(runs: &[RunStats], f: impl Fn(&RunStats) -> f64) -> f64 {
    if runs.is_empty() {
        return 0.0;
    }
    runs.iter().map(f).sum::<f64>() / runs.len() as f64
}

impl SimReport {
    /// Create a new report from completed run stats.
    pub fn from_runs(runs: Vec<RunStats>, target_rank: u8) -> Self {
        let num_runs = runs.len() as u32;
        let runs_reached_target = runs.iter().filter(|r| r.reached_target).count() as u32;

        let mut rank_distribution = BTreeMap::new();
        for run in &runs {
            *rank_distribution.entry(run.final_rank).or_insert(0) += 1;
        }

        let per_rank = |pick: fn(&RunStats) -> &Vec<u64>| -> Vec<f64> {
            (0..NUM_REALMS)
                .map(|rank| mean(&runs, |r| pick(r).get(rank).copied().unwrap_or(0) as f64))
                .collect()
        };
        let avg_encounters_per_rank = per_rank(|r| &r.encounters_per_rank);
        let avg_deaths_per_rank = per_rank(|r| &r.deaths_per_rank);

        Self {
            generated_at: chrono::Utc::now().to_rfc3339(),
            num_runs,
            target_rank,
            runs_reached_target,
            avg_final_rank: mean(&runs, |r| r.final_rank as f64),
            avg_encounters: mean(&runs, |r| r.encounters as f64),
            avg_victories: mean(&runs, |r| r.victories as f64),
            avg_deaths: mean(&runs, |r| r.deaths as f64),
            avg_flees: mean(&runs, |r| r.flees as f64),
            avg_items_dropped: mean(&runs, |r| r.items_dropped as f64),
            avg_potions_used: mean(&runs, |r| r.potions_used as f64),
            avg_quests_completed: mean(&runs, |r| r.quests_completed as f64),
            rank_distribution,
            avg_encounters_per_rank,
            avg_deaths_per_rank,
            run_stats: runs,
        }
    }

    /// Generate a text report.
    pub fn to_text(&self) -> String {
        let mut report = String::new();

        report.push_str("═══════════════════════════════════════════════════════════════\n");
        report.push_str("                    SIMULATION REPORT\n");
        report.push_str("═══════════════════════════════════════════════════════════════\n\n");

        report.push_str(&format!(
            "Runs: {} total, {} reached {} (rank {})\n\n",
            self.num_runs,
            self.runs_reached_target,
            realm_name(self.target_rank),
            self.target_rank
        ));

        report.push_str("── PROGRESSION ──────────────────────────────────────────────────\n");
        report.push_str(&format!("  Avg Final Rank:      {:.1}\n", self.avg_final_rank));
        report.push_str(&format!("  Avg Encounters:      {:.0}\n", self.avg_encounters));
        report.push_str(&format!("  Avg Victories:       {:.0}\n", self.avg_victories));
        report.push_str(&format!("  Avg Deaths:          {:.1}\n", self.avg_deaths));
        report.push_str(&format!("  Avg Flees:           {:.1}\n", self.avg_flees));
        report.push_str(&format!("  Avg Quests Done:     {:.1}\n\n", self.avg_quests_completed));

        report.push_str("── LOOT ─────────────────────────────────────────────────────────\n");
        report.push_str(&format!("  Avg Items Dropped:   {:.1}\n", self.avg_items_dropped));
        report.push_str(&format!("  Avg Potions Used:    {:.1}\n\n", self.avg_potions_used));

        report.push_str("── PER-REALM BREAKDOWN ──────────────────────────────────────────\n");
        report.push_str("  Rank  Realm       Fights   Deaths   Deaths/Fight\n");
        for rank in (0..NUM_REALMS).rev() {
            let fights = self.avg_encounters_per_rank[rank];
            if fights <= 0.0 {
                continue;
            }
            let deaths = self.avg_deaths_per_rank[rank];
            report.push_str(&format!(
                "  {:4}  {:<8}  {:6.1}   {:6.1}   {:.3}\n",
                rank,
                realm_name(rank as u8),
                fights,
                deaths,
                deaths / fights
            ));
        }
        report.push('\n');

        report.push_str("── FINAL RANKS ──────────────────────────────────────────────────\n");
        for (rank, count) in &self.rank_distribution {
            let pct = (*count as f64 / self.num_runs.max(1) as f64) * 100.0;
            let bar: String = "█".repeat((pct / 5.0) as usize);
            report.push_str(&format!("  Rank {}: {:>5.1}% {}\n", rank, pct, bar));
        }

        if self.avg_deaths > self.avg_victories {
            report.push_str("\n  ⚠️  More deaths than victories - monsters outscale the ladder?\n");
        }

        report.push_str("\n═══════════════════════════════════════════════════════════════\n");
        report
    }

    /// Generate a JSON report for further analysis.
    pub fn to_json(&self) -> String {
        serde_json::to_string_pretty(self).unwrap_or_else(|_| "{}".to_string())
    }
}
