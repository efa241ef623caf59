//! Simulation report generation.

use std::collections::BTreeMap;

use serde::Serialize;

use crate::floors::block_of;

/// How a single run ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum RunEnding {
    ReachedTarget,
    Wiped,
    /// Mandatory boss with nobody able to fight it
    Stuck,
    TimedOut,
}

/// Statistics collected from one bot run.
#[derive(Debug, Clone, Serialize)]
pub struct RunStats {
    pub ending: RunEnding,
    pub final_floor: u32,
    pub actions: u32,
    pub rejected_actions: u32,
    pub battles_won: u32,
    pub bosses_defeated: u32,
    pub catch_attempts: u32,
    pub catches: u32,
    pub merges: u32,
    pub evolutions: u32,
    pub roster_size: usize,
    pub species_obtained: usize,
    pub final_currency: u32,
}

/// Aggregated results from multiple simulation runs.
#[derive(Debug, Clone, Serialize)]
pub struct SimReport {
    pub num_runs: u32,
    pub target_floor: u32,
    pub runs_completed: u32,
    pub runs_wiped: u32,
    pub runs_stuck: u32,
    pub runs_timed_out: u32,

    pub avg_final_floor: f64,
    pub best_floor: u32,
    pub avg_battles_won: f64,
    pub avg_bosses_defeated: f64,
    pub avg_evolutions: f64,

    // Capture analysis
    pub catch_success_rate: f64,
    pub avg_catches: f64,
    pub avg_merges: f64,
    pub avg_roster_size: f64,
    pub avg_species_obtained: f64,
    pub total_species: usize,

    /// Runs ending in each block
    pub block_distribution: BTreeMap<u32, u32>,

    pub run_stats: Vec<RunStats>,
}

fn mean(runs: &[RunStats], value: impl Fn(&RunStats) -> f64) -> f64 {
    if runs.is_empty() {
        return 0.0;
    }
    runs.iter().map(value).sum::<f64>() / runs.len() as f64
}

impl SimReport {
    pub fn from_runs(runs: Vec<RunStats>, target_floor: u32, total_species: usize) -> Self {
        let count = |ending: RunEnding| runs.iter().filter(|r| r.ending == ending).count() as u32;

        let attempts: u32 = runs.iter().map(|r| r.catch_attempts).sum();
        let catches: u32 = runs.iter().map(|r| r.catches).sum();
        let catch_success_rate = if attempts == 0 {
            0.0
        } else {
            catches as f64 / attempts as f64
        };

        let mut block_distribution = BTreeMap::new();
        for run in &runs {
            *block_distribution.entry(block_of(run.final_floor)).or_insert(0) += 1;
        }

        Self {
            num_runs: runs.len() as u32,
            target_floor,
            runs_completed: count(RunEnding::ReachedTarget),
            runs_wiped: count(RunEnding::Wiped),
            runs_stuck: count(RunEnding::Stuck),
            runs_timed_out: count(RunEnding::TimedOut),
            avg_final_floor: mean(&runs, |r| r.final_floor as f64),
            best_floor: runs.iter().map(|r| r.final_floor).max().unwrap_or(0),
            avg_battles_won: mean(&runs, |r| r.battles_won as f64),
            avg_bosses_defeated: mean(&runs, |r| r.bosses_defeated as f64),
            avg_evolutions: mean(&runs, |r| r.evolutions as f64),
            catch_success_rate,
            avg_catches: mean(&runs, |r| r.catches as f64),
            avg_merges: mean(&runs, |r| r.merges as f64),
            avg_roster_size: mean(&runs, |r| r.roster_size as f64),
            avg_species_obtained: mean(&runs, |r| r.species_obtained as f64),
            total_species,
            block_distribution,
            run_stats: runs,
        }
    }

    /// Generate a text report.
    pub fn to_text(&self) -> String {
        let mut report = String::new();

        report.push_str("═══════════════════════════════════════════════════════════════\n");
        report.push_str("                 MONSTER TOWER SIMULATION REPORT\n");
        report.push_str("═══════════════════════════════════════════════════════════════\n\n");

        report.push_str(&format!(
            "Runs: {} total, {} reached floor {}, {} wiped, {} stuck, {} timed out\n\n",
            self.num_runs,
            self.runs_completed,
            self.target_floor,
            self.runs_wiped,
            self.runs_stuck,
            self.runs_timed_out
        ));

        report.push_str("── CLIMB ────────────────────────────────────────────────────────\n");
        report.push_str(&format!("  Avg Final Floor:     {:.1}\n", self.avg_final_floor));
        report.push_str(&format!("  Best Floor:          {}\n", self.best_floor));
        report.push_str(&format!("  Avg Battles Won:     {:.1}\n", self.avg_battles_won));
        report.push_str(&format!(
            "  Avg Bosses Defeated: {:.2}\n",
            self.avg_bosses_defeated
        ));
        report.push_str(&format!("  Avg Evolutions:      {:.2}\n\n", self.avg_evolutions));

        report.push_str("── COLLECTION ───────────────────────────────────────────────────\n");
        report.push_str(&format!(
            "  Catch Success Rate:  {:.1}%\n",
            self.catch_success_rate * 100.0
        ));
        report.push_str(&format!("  Avg Catches:         {:.1}\n", self.avg_catches));
        report.push_str(&format!("  Avg Merges:          {:.1}\n", self.avg_merges));
        report.push_str(&format!("  Avg Roster Size:     {:.1}\n", self.avg_roster_size));
        report.push_str(&format!(
            "  Avg Species:         {:.1} / {}\n\n",
            self.avg_species_obtained, self.total_species
        ));

        report.push_str("── RUN ENDINGS BY BLOCK ─────────────────────────────────────────\n");
        for (block, runs) in &self.block_distribution {
            let pct = if self.num_runs == 0 {
                0.0
            } else {
                *runs as f64 / self.num_runs as f64 * 100.0
            };
            let bar: String = "█".repeat((pct / 5.0) as usize);
            report.push_str(&format!(
                "  Floors {:3}-{:3}: {:>5.1}% {}\n",
                (block - 1) * 10 + 1,
                block * 10,
                pct,
                bar
            ));
        }

        report
    }

    /// Generate JSON report.
    pub fn to_json(&self) -> String {
        serde_json::to_string_pretty(self).unwrap_or_else(|_| "{}".to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn run(ending: RunEnding, floor: u32, attempts: u32, catches: u32) -> RunStats {
        RunStats {
            ending,
            final_floor: floor,
            actions: 10,
            rejected_actions: 0,
            battles_won: 2,
            bosses_defeated: 0,
            catch_attempts: attempts,
            catches,
            merges: 0,
            evolutions: 0,
            roster_size: 1,
            species_obtained: 1,
            final_currency: 100,
        }
    }

    #[test]
    fn test_report_aggregates() {
        let report = SimReport::from_runs(
            vec![
                run(RunEnding::Wiped, 4, 3, 1),
                run(RunEnding::ReachedTarget, 20, 1, 1),
                run(RunEnding::Stuck, 10, 0, 0),
            ],
            20,
            15,
        );
        assert_eq!(report.runs_wiped, 1);
        assert_eq!(report.runs_completed, 1);
        assert_eq!(report.runs_stuck, 1);
        assert_eq!(report.best_floor, 20);
        assert!((report.avg_final_floor - 34.0 / 3.0).abs() < 1e-9);
        assert!((report.catch_success_rate - 0.5).abs() < 1e-9);
        assert_eq!(report.block_distribution.get(&1), Some(&2));
        assert_eq!(report.block_distribution.get(&2), Some(&1));
    }

    #[test]
    fn test_empty_report() {
        let report = SimReport::from_runs(Vec::new(), 10, 15);
        assert_eq!(report.avg_final_floor, 0.0);
        assert!(report.to_text().contains("Runs: 0 total"));
        assert!(report.to_json().contains("\"num_runs\": 0"));
    }
}
