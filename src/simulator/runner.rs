//! Bot runner driving the real `Game` controller.
//!
//! Each run gets its own seeded RNG and a recording presenter. The bot looks
//! at the run state, picks one action, and drains any continuations before
//! the next decision.

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use tracing::{debug, info};

use super::config::SimConfig;
use super::report::{RunEnding, RunStats, SimReport};
use crate::capture::{CatchOutcome, Placement};
use crate::core::game::Game;
use crate::core::pacing::Continuation;
use crate::creatures::total_species;
use crate::floors::Encounter;
use crate::presentation::{Notification, RecordingPresenter};

/// Run the full simulation and return a report.
pub fn run_simulation(config: &SimConfig) -> SimReport {
    let mut all_runs = Vec::with_capacity(config.num_runs as usize);

    for run_idx in 0..config.num_runs {
        let mut rng = match config.seed {
            Some(seed) => ChaCha8Rng::seed_from_u64(seed + run_idx as u64),
            None => ChaCha8Rng::from_entropy(),
        };

        let stats = simulate_single_run(config, &mut rng);
        if config.verbosity >= 2 {
            println!(
                "Run {}/{} - {:?} at floor {}, roster {}, species {}, battles won {}",
                run_idx + 1,
                config.num_runs,
                stats.ending,
                stats.final_floor,
                stats.roster_size,
                stats.species_obtained,
                stats.battles_won
            );
        }
        all_runs.push(stats);
    }

    let report = SimReport::from_runs(all_runs, config.target_floor, total_species());
    info!(
        runs = report.num_runs,
        avg_floor = report.avg_final_floor,
        "simulation finished"
    );
    report
}

/// What the bot wants to do next.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Decision {
    Explore,
    Advance,
    Catch,
    Fight(usize),
    Attack,
    Switch(usize),
    RunAway,
    Heal,
    BuyDevice,
    Stuck,
}

#[derive(Default)]
struct Tally {
    rejected: u32,
    battles_won: u32,
    bosses_defeated: u32,
    catch_attempts: u32,
    catches: u32,
    merges: u32,
}

fn decide(game: &Game<RecordingPresenter>, config: &SimConfig) -> Decision {
    let state = game.state();
    let roster = &state.roster;
    let best_fighter = || {
        let ready = roster.available_indices(game.battle().map(|b| b.roster_index));
        roster
            .selection_order()
            .into_iter()
            .find(|i| ready.contains(i))
    };

    if let Some(battle) = game.battle() {
        if battle.awaiting_switch {
            return best_fighter().map_or(Decision::Stuck, Decision::Switch);
        }
        return Decision::Attack;
    }

    match &state.encounter {
        None if !state.floor_explored => Decision::Explore,
        None => Decision::Advance,
        Some(Encounter::Shop(offer)) => {
            if roster.needs_healing() && state.currency >= offer.heal_price {
                Decision::Heal
            } else if state.currency >= offer.device_price + config.heal_reserve {
                Decision::BuyDevice
            } else {
                Decision::Advance
            }
        }
        Some(Encounter::Event(_)) => Decision::Advance,
        Some(encounter) => {
            let Some(wild) = encounter.wild() else {
                return Decision::Advance;
            };
            if encounter.is_guaranteed() {
                return Decision::Catch;
            }
            if wild.defeated_in_battle {
                return if state.capture_devices > 0 {
                    Decision::Catch
                } else {
                    Decision::Advance
                };
            }
            match best_fighter() {
                Some(index) => Decision::Fight(index),
                None if encounter.is_boss() => Decision::Stuck,
                None if state.capture_devices > 0 => Decision::Catch,
                None => Decision::RunAway,
            }
        }
    }
}

/// Plays one run to the target floor, a wipe, or the action limit.
pub fn simulate_single_run(config: &SimConfig, rng: &mut impl Rng) -> RunStats {
    let mut game = Game::recording(config.game.clone());
    let mut tally = Tally::default();
    let mut actions = 0;

    let ending = loop {
        if game.state().game_over {
            break RunEnding::Wiped;
        }
        if game.state().floor >= config.target_floor {
            break RunEnding::ReachedTarget;
        }
        if actions >= config.max_actions_per_run {
            break RunEnding::TimedOut;
        }

        let decision = decide(&game, config);
        if decision == Decision::Stuck {
            break RunEnding::Stuck;
        }
        actions += 1;

        let accepted = match decision {
            Decision::Explore => game.explore(rng).is_ok(),
            Decision::Advance => game.advance_floor().is_ok(),
            Decision::Catch => {
                tally.catch_attempts += 1;
                match game.attempt_catch(rng) {
                    Ok(CatchOutcome::Caught { placement, .. }) => {
                        tally.catches += 1;
                        if matches!(placement, Placement::Merged { .. }) {
                            tally.merges += 1;
                        }
                        true
                    }
                    Ok(CatchOutcome::Missed { .. }) => true,
                    Err(_) => false,
                }
            }
            Decision::Fight(index) => game.start_battle(index).is_ok(),
            Decision::Attack => game.attack(rng).is_ok(),
            Decision::Switch(index) => game.switch_creature(index).is_ok(),
            Decision::RunAway => game.run_away().is_ok(),
            Decision::Heal => game.heal_at_shop().is_ok(),
            Decision::BuyDevice => game.buy_capture_device().is_ok(),
            Decision::Stuck => false,
        };
        if !accepted {
            tally.rejected += 1;
            debug!(?decision, floor = game.state().floor, "bot action rejected");
            // A rejected shop or catch decision would repeat forever
            if game.advance_floor().is_err() && game.run_away().is_err() {
                break RunEnding::Stuck;
            }
        }

        let boss_fight = game.battle().is_some_and(|b| b.is_boss);
        while let Some(step) = game.resume(rng) {
            if step == Continuation::Victory {
                tally.battles_won += 1;
                if boss_fight {
                    tally.bosses_defeated += 1;
                }
            }
        }
    };

    let state = game.state();
    let evolutions = game
        .presenter()
        .notifications
        .iter()
        .filter(|n| matches!(n, Notification::Evolution { .. }))
        .count() as u32;

    debug!(?ending, floor = state.floor, actions, "run finished");

    RunStats {
        ending,
        final_floor: state.floor,
        actions,
        rejected_actions: tally.rejected,
        battles_won: tally.battles_won,
        bosses_defeated: tally.bosses_defeated,
        catch_attempts: tally.catch_attempts,
        catches: tally.catches,
        merges: tally.merges,
        evolutions,
        roster_size: state.roster.len(),
        species_obtained: state.species_obtained().len(),
        final_currency: state.currency,
    }
}
