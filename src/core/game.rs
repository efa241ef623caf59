//! Progression controller.
//!
//! `Game` owns the run state, the active battle, the continuation queue and
//! the presenter. Every player action goes through it and returns
//! `Result<_, GameError>`. A rejected action leaves the state untouched and
//! produces exactly one log line.

use chrono::Utc;
use rand::Rng;
use tracing::{error, info, warn};

use super::config::GameConfig;
use super::error::GameError;
use super::game_state::{EventEffect, RunState};
use super::pacing::{Continuation, PacingQueue};
use crate::battle::{self, BattleState, EnemyTurnOutcome, Strike};
use crate::capture::{self, catch_chance, CatchOutcome, Placement};
use crate::creatures::ExperienceReport;
use crate::floors::{floor_description, spawn, Encounter, FloorEvent};
use crate::presentation::{
    CreatureView, Notification, Presenter, RecordingPresenter, SelectionEntry, StatsView,
    ViewModel,
};
use crate::shop::{self, HealReceipt};

pub struct Game<P: Presenter> {
    config: GameConfig,
    state: RunState,
    battle: Option<BattleState>,
    pending: PacingQueue,
    presenter: P,
}

impl Game<RecordingPresenter> {
    /// Headless game whose log keeps `config.log_capacity` entries.
    pub fn recording(config: GameConfig) -> Self {
        let presenter = RecordingPresenter::with_log_capacity(config.log_capacity);
        Self::new(config, presenter)
    }
}

impl<P: Presenter> Game<P> {
    /// Starts a fresh run and shows the welcome screen.
    pub fn new(config: GameConfig, presenter: P) -> Self {
        let mut game = Self {
            state: RunState::new(&config),
            config,
            battle: None,
            pending: PacingQueue::new(),
            presenter,
        };
        game.welcome();
        game
    }

    /// Adopts an existing run, repairing malformed creature records.
    pub fn from_state(config: GameConfig, state: RunState, presenter: P) -> Self {
        let mut game = Self {
            config,
            state,
            battle: None,
            pending: PacingQueue::new(),
            presenter,
        };
        let fixed = game.state.repair_creatures();
        if fixed > 0 {
            info!(fixed, "repaired creature records");
            game.log(format!("Repaired {} creature record(s).", fixed));
        }
        game.render_current();
        game.refresh_stats();
        game
    }

    pub fn state(&self) -> &RunState {
        &self.state
    }

    pub fn battle(&self) -> Option<&BattleState> {
        self.battle.as_ref()
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    pub fn presenter(&self) -> &P {
        &self.presenter
    }

    pub fn presenter_mut(&mut self) -> &mut P {
        &mut self.presenter
    }

    pub fn into_presenter(self) -> P {
        self.presenter
    }

    /// True while continuations are queued; player actions are rejected.
    pub fn is_busy(&self) -> bool {
        !self.pending.is_idle()
    }

    /// How long the driver should wait before calling `resume`.
    pub fn next_delay(&self) -> Option<u64> {
        self.pending.next_delay()
    }

    pub fn pending_step(&self) -> Option<Continuation> {
        self.pending.peek()
    }

    pub fn stats_view(&self) -> StatsView {
        let (species_obtained, total_species) = self.state.completion();
        StatsView {
            floor: self.state.floor,
            block: self.state.block(),
            currency: self.state.currency,
            capture_devices: self.state.capture_devices,
            battles_this_block: self.state.battles_this_block,
            roster: self.state.roster.summary(),
            species_obtained,
            total_species,
        }
    }

    // =========================================================================
    // Player actions
    // =========================================================================

    pub fn explore(&mut self, rng: &mut impl Rng) -> Result<(), GameError> {
        let result = self.ready().and_then(|_| self.do_explore(rng));
        self.finish(result)
    }

    pub fn advance_floor(&mut self) -> Result<u32, GameError> {
        let result = self.ready().and_then(|_| self.do_advance());
        self.finish(result)
    }

    pub fn run_away(&mut self) -> Result<(), GameError> {
        let result = self.ready().and_then(|_| self.do_run_away());
        self.finish(result)
    }

    pub fn attempt_catch(&mut self, rng: &mut impl Rng) -> Result<CatchOutcome, GameError> {
        let result = self.ready().and_then(|_| self.do_catch(rng));
        self.finish(result)
    }

    /// Shows the creature picker: to start a battle, or to switch inside one.
    pub fn show_creature_selection(&mut self) -> Result<(), GameError> {
        let result = self.ready().and_then(|_| self.do_show_selection());
        self.finish(result)
    }

    pub fn start_battle(&mut self, roster_index: usize) -> Result<(), GameError> {
        let result = self.ready().and_then(|_| self.do_start_battle(roster_index));
        self.finish(result)
    }

    /// The player's attack. Queues the enemy reply or the victory.
    pub fn attack(&mut self, rng: &mut impl Rng) -> Result<Strike, GameError> {
        let result = self.ready().and_then(|_| self.do_attack(rng));
        self.finish(result)
    }

    pub fn switch_creature(&mut self, roster_index: usize) -> Result<(), GameError> {
        let result = self.ready().and_then(|_| self.do_switch(roster_index));
        self.finish(result)
    }

    pub fn flee_battle(&mut self) -> Result<(), GameError> {
        let result = self.ready().and_then(|_| self.do_flee_battle());
        self.finish(result)
    }

    pub fn buy_capture_device(&mut self) -> Result<u32, GameError> {
        let result = self.ready().and_then(|_| self.do_buy_device());
        self.finish(result)
    }

    pub fn heal_at_shop(&mut self) -> Result<HealReceipt, GameError> {
        let result = self.ready().and_then(|_| self.do_heal());
        self.finish(result)
    }

    /// Throws the run away and starts over. Always allowed.
    pub fn reset_run(&mut self) {
        let cancelled = self.pending.cancel_all();
        self.state = RunState::new(&self.config);
        self.battle = None;
        info!(cancelled, "run reset");
        self.log("Game reset! Welcome back to the tower!");
        self.welcome();
    }

    // =========================================================================
    // Continuations
    // =========================================================================

    /// Runs the next queued continuation, if any.
    pub fn resume(&mut self, rng: &mut impl Rng) -> Option<Continuation> {
        let scheduled = self.pending.pop()?;
        let result = match scheduled.step {
            Continuation::EnemyTurn => {
                self.enemy_turn(rng);
                Ok(())
            }
            Continuation::Victory => self.victory(),
            Continuation::SwitchPrompt => {
                self.render_selection(true);
                Ok(())
            }
            Continuation::GameOver => {
                self.game_over();
                Ok(())
            }
            Continuation::AutoExplore => self.do_explore(rng),
        };
        // Continuations have no caller to hand the error to.
        let _ = self.finish(result);
        Some(scheduled.step)
    }

    /// Drains the queue. Returns how many continuations ran.
    pub fn settle(&mut self, rng: &mut impl Rng) -> usize {
        let mut ran = 0;
        while self.resume(rng).is_some() {
            ran += 1;
        }
        ran
    }

    // =========================================================================
    // Action bodies
    // =========================================================================

    fn ready(&self) -> Result<(), GameError> {
        if self.is_busy() {
            return Err(GameError::ActionPending);
        }
        if self.state.game_over {
            return Err(GameError::GameOver);
        }
        Ok(())
    }

    fn do_explore(&mut self, rng: &mut impl Rng) -> Result<(), GameError> {
        if self.state.game_over {
            return Err(GameError::GameOver);
        }
        if self.state.encounter.is_some() {
            return Err(GameError::EncounterPending);
        }
        if self.state.floor_explored {
            return Err(GameError::FloorAlreadyExplored);
        }

        let encounter = spawn(&mut self.state, &self.config, rng)?;
        let floor = self.state.floor;
        self.state.floor_explored = true;
        self.log(floor_description(floor));

        match encounter {
            Encounter::Event(event) => self.resolve_event(&event),
            Encounter::Shop(offer) => {
                self.state.encounter = Some(Encounter::Shop(offer));
                self.log(format!(
                    "Shop: capture device {} coins, full heal {} coins.",
                    offer.device_price, offer.heal_price
                ));
                self.render_current();
            }
            creature => {
                if let Some(wild) = creature.wild() {
                    let c = &wild.creature;
                    let label = if creature.is_boss() { "BOSS" } else { "Wild" };
                    self.log(format!(
                        "{} {} {} Lv.{} ({}) appeared!",
                        label,
                        c.glyph(),
                        c.name(),
                        c.level,
                        c.rarity().name()
                    ));
                    info!(
                        floor,
                        species = c.name(),
                        level = c.level,
                        boss = creature.is_boss(),
                        "encounter"
                    );
                }
                self.state.encounter = Some(creature);
                self.render_current();
            }
        }
        Ok(())
    }

    fn resolve_event(&mut self, event: &FloorEvent) {
        let description = match self.state.apply_event(event) {
            EventEffect::Healed(count) => {
                format!("A healing spring! {} creature(s) restored to full HP.", count)
            }
            EventEffect::Currency(amount) => format!("You found {} coins on the floor!", amount),
            EventEffect::CaptureDevices(amount) => {
                format!("You found {} capture device(s)!", amount)
            }
            EventEffect::Nothing => match event {
                FloorEvent::Narrative(text) => text.clone(),
                _ => String::new(),
            },
        };
        info!(floor = self.state.floor, ?event, "floor event");
        self.log(description.clone());
        self.presenter.render(&ViewModel::Event {
            floor: self.state.floor,
            description,
        });
    }

    fn do_advance(&mut self) -> Result<u32, GameError> {
        if self.battle.is_some() {
            return Err(GameError::BattleActive);
        }
        if let Some(encounter) = &self.state.encounter {
            if encounter.blocks_advance() {
                return Err(if encounter.is_mandatory_boss() {
                    GameError::BossIsMandatory
                } else {
                    GameError::EncounterUnresolved
                });
            }
        }

        let new_block = self.state.climb();
        let floor = self.state.floor;
        if new_block {
            self.log("A new block of floors! Tougher challenges ahead.");
        }
        self.log(format!("You climbed to floor {}!", floor));
        info!(floor, new_block, "advanced floor");
        self.presenter.render(&ViewModel::Transition { floor });
        self.pending
            .schedule(Continuation::AutoExplore, &self.config.pacing);
        Ok(floor)
    }

    fn do_run_away(&mut self) -> Result<(), GameError> {
        if self.battle.is_some() {
            return Err(GameError::BattleActive);
        }
        let encounter = self.state.encounter.as_ref().ok_or(GameError::NoEncounter)?;
        if encounter.wild().is_none() {
            return Err(GameError::NoCreatureEncounter);
        }
        if encounter.is_boss() {
            return Err(GameError::BossIsMandatory);
        }
        self.state.encounter = None;
        self.log("You ran away from the encounter.");
        self.presenter.render(&ViewModel::Retreat {
            floor: self.state.floor,
        });
        Ok(())
    }

    fn do_catch(&mut self, rng: &mut impl Rng) -> Result<CatchOutcome, GameError> {
        if self.battle.is_some() {
            return Err(GameError::BattleActive);
        }
        let outcome = capture::attempt_catch(&mut self.state, Utc::now().timestamp(), rng)?;

        let view = match &outcome {
            CatchOutcome::Caught {
                species,
                level,
                chance,
                reward,
                placement,
            } => {
                self.log(format!("Caught {} Lv.{}! ({}% chance)", species, level, chance));
                if *reward > 0 {
                    self.log(format!("+{} coins for the catch.", reward));
                }
                let merged_into = match placement {
                    Placement::Merged { index, exp, report } => {
                        let target = self.state.roster.get(*index).map(|c| c.name());
                        if let Some(name) = target {
                            self.log(format!(
                                "{} merged into {}: +{} exp!",
                                species, name, exp
                            ));
                        }
                        self.announce_growth(&[(*index, report.clone())]);
                        target
                    }
                    Placement::Added { index, evolution } => {
                        self.log(format!("{} joined your team!", species));
                        if let Some(evo) = evolution {
                            let growth = ExperienceReport {
                                levels_gained: 0,
                                new_level: evo.level,
                                evolution: Some(evo.clone()),
                            };
                            self.announce_growth(&[(*index, growth)]);
                        }
                        None
                    }
                };
                ViewModel::CatchResult {
                    floor: self.state.floor,
                    species: *species,
                    caught: true,
                    chance: *chance,
                    reward: *reward,
                    merged_into,
                    fled: false,
                }
            }
            CatchOutcome::Missed {
                species,
                chance,
                fled,
            } => {
                self.log(format!("{} broke free! ({}% chance)", species, chance));
                if *fled {
                    self.log(format!("{} fled!", species));
                }
                ViewModel::CatchResult {
                    floor: self.state.floor,
                    species: *species,
                    caught: false,
                    chance: *chance,
                    reward: 0,
                    merged_into: None,
                    fled: *fled,
                }
            }
        };
        self.presenter.render(&view);
        Ok(outcome)
    }

    fn do_show_selection(&mut self) -> Result<(), GameError> {
        let switching = match &self.battle {
            Some(b) if b.awaiting_switch || b.accepts_player_move() => true,
            Some(_) => return Err(GameError::NotPlayerTurn),
            None => false,
        };
        if !switching {
            let wild = self
                .state
                .encounter
                .as_ref()
                .and_then(|e| e.wild())
                .ok_or(GameError::NoCreatureEncounter)?;
            if wild.defeated_in_battle {
                return Err(GameError::AlreadyDefeated);
            }
        }
        if !self.state.roster.has_available() {
            return Err(GameError::NoFighters);
        }
        self.render_selection(switching);
        Ok(())
    }

    fn do_start_battle(&mut self, roster_index: usize) -> Result<(), GameError> {
        if self.battle.is_some() {
            return Err(GameError::BattleActive);
        }
        let battle = battle::start_battle(&self.state, roster_index)?;
        self.log(format!(
            "Go, {}! Battle against {} Lv.{}!",
            battle.player.name, battle.enemy.name, battle.enemy.level
        ));
        self.battle = Some(battle);
        self.render_current();
        Ok(())
    }

    fn do_attack(&mut self, rng: &mut impl Rng) -> Result<Strike, GameError> {
        let battle = self.battle.as_mut().ok_or(GameError::NoBattle)?;
        let strike = battle::player_strike(battle, rng)?;
        let (attacker, defender) = (battle.player.name, battle.enemy.name);

        self.log(format!("{} attacks for {} damage!", attacker, strike.damage));
        if strike.knocked_out {
            self.log(format!("{} was defeated!", defender));
            self.pending.schedule(Continuation::Victory, &self.config.pacing);
        } else {
            self.pending
                .schedule(Continuation::EnemyTurn, &self.config.pacing);
        }
        self.render_current();
        Ok(strike)
    }

    fn do_switch(&mut self, roster_index: usize) -> Result<(), GameError> {
        let battle = self.battle.as_mut().ok_or(GameError::NoBattle)?;
        let outgoing = battle.player.name;
        battle::switch_fighter(battle, &mut self.state.roster, roster_index)?;
        let incoming = battle.player.name;
        self.log(format!("Come back, {}! Go, {}!", outgoing, incoming));
        self.render_current();
        Ok(())
    }

    fn do_flee_battle(&mut self) -> Result<(), GameError> {
        let battle = self.battle.as_ref().ok_or(GameError::NoBattle)?;
        battle::flee_battle(battle, &mut self.state.roster)?;
        self.battle = None;
        self.state.encounter = None;
        self.log("You fled from the battle.");
        self.presenter.render(&ViewModel::Retreat {
            floor: self.state.floor,
        });
        Ok(())
    }

    fn shop_offer(&self) -> Result<shop::ShopOffer, GameError> {
        match &self.state.encounter {
            Some(Encounter::Shop(offer)) => Ok(*offer),
            _ => Err(GameError::NotInShop),
        }
    }

    fn do_buy_device(&mut self) -> Result<u32, GameError> {
        let offer = self.shop_offer()?;
        let price = shop::buy_capture_device(&mut self.state, &offer)?;
        self.log(format!("Bought a capture device for {} coins.", price));
        self.render_current();
        Ok(price)
    }

    fn do_heal(&mut self) -> Result<HealReceipt, GameError> {
        let offer = self.shop_offer()?;
        let receipt = shop::heal_roster(&mut self.state, &offer)?;
        if receipt.cost > 0 {
            self.log(format!(
                "{} creature(s) healed for {} coins.",
                receipt.healed, receipt.cost
            ));
        } else {
            self.log("Everyone is already in perfect health. No charge.");
        }
        self.render_current();
        Ok(receipt)
    }

    // =========================================================================
    // Continuation bodies
    // =========================================================================

    fn enemy_turn(&mut self, rng: &mut impl Rng) {
        let Some(battle) = self.battle.as_mut() else {
            return;
        };
        let (strike, outcome) = battle::enemy_strike(battle, &mut self.state.roster, rng);
        let (attacker, defender) = (battle.enemy.name, battle.player.name);

        self.log(format!("{} attacks for {} damage!", attacker, strike.damage));
        match outcome {
            EnemyTurnOutcome::Continue => {}
            EnemyTurnOutcome::NeedsReplacement => {
                self.log(format!("{} was knocked out...", defender));
                self.log("Send another creature into battle!");
                self.pending
                    .schedule(Continuation::SwitchPrompt, &self.config.pacing);
            }
            EnemyTurnOutcome::AllKnockedOut => {
                self.log(format!("{} was knocked out...", defender));
                self.pending
                    .schedule(Continuation::GameOver, &self.config.pacing);
            }
        }
        self.render_current();
    }

    fn victory(&mut self) -> Result<(), GameError> {
        let battle = self.battle.take().ok_or(GameError::NoBattle)?;
        let report = battle::resolve_victory(&battle, &mut self.state)?;

        if let Some(fighter) = self.state.roster.get(battle.roster_index) {
            let line = format!("{} ends the battle with {} HP.", fighter.name(), fighter.hp);
            self.log(line);
        }
        if report.boss_healed {
            self.log("Boss defeated! Your whole team is fully healed!");
        }
        self.log(format!(
            "Victory! +{} coins, +{} exp to every creature!",
            report.currency, report.exp
        ));
        self.announce_growth(&report.level_ups);

        let catch_chance = self.current_catch_chance().unwrap_or(report.new_catch_rate);
        self.presenter.render(&ViewModel::Victory {
            floor: self.state.floor,
            enemy: report.enemy_name,
            currency: report.currency,
            exp: report.exp,
            boss_healed: report.boss_healed,
            catch_chance,
        });
        Ok(())
    }

    fn game_over(&mut self) {
        self.battle = None;
        self.state.game_over = true;
        let (obtained, total) = self.state.completion();
        let floor = self.state.floor;

        warn!(floor, obtained, total, "game over");
        self.log(format!(
            "GAME OVER! Reached floor {} with {}/{} species discovered.",
            floor, obtained, total
        ));
        self.presenter.notify(&Notification::GameOver {
            floor,
            roster_size: self.state.roster.len(),
            species_obtained: obtained,
            total_species: total,
        });
        self.presenter.render(&ViewModel::GameOver {
            floor,
            roster_size: self.state.roster.len(),
            currency: self.state.currency,
            species_obtained: obtained,
            total_species: total,
            completion_percent: self.state.completion_percent(),
        });
    }

    // =========================================================================
    // Helpers
    // =========================================================================

    fn welcome(&mut self) {
        self.log("Welcome to the Monster Tower! Climb as high as you can.");
        self.log("Floor 1: your first creature is a guaranteed catch.");
        self.log("Floors 5, 15, 25...: shops. Floors 10, 20, 30...: bosses.");
        self.log("Creatures evolve at level 10, 15 or 20 depending on rarity.");
        self.presenter.render(&ViewModel::Welcome {
            floor: self.state.floor,
        });
        self.refresh_stats();
    }

    fn log(&mut self, message: impl AsRef<str>) {
        self.presenter.append_log(message.as_ref());
    }

    fn refresh_stats(&mut self) {
        let stats = self.stats_view();
        self.presenter.refresh_stats(&stats);
    }

    /// Refreshes stats on success; on failure writes the single log line.
    fn finish<T>(&mut self, result: Result<T, GameError>) -> Result<T, GameError> {
        match result {
            Ok(value) => {
                self.refresh_stats();
                Ok(value)
            }
            Err(err) => {
                if err.is_fatal() {
                    error!(%err, "catalog cannot satisfy spawn");
                } else {
                    warn!(%err, "action rejected");
                }
                self.log(err.to_string());
                Err(err)
            }
        }
    }

    fn announce_growth(&mut self, reports: &[(usize, ExperienceReport)]) {
        for (index, report) in reports {
            let Some(creature) = self.state.roster.get(*index) else {
                continue;
            };
            let name = creature.name();
            if report.levels_gained > 0 {
                let previous = report.evolution.as_ref().map_or(name, |e| e.from.name);
                self.log(format!("{} grew to level {}!", previous, report.new_level));
            }
            if let Some(evolution) = &report.evolution {
                self.log(format!(
                    "{} evolved into {}!",
                    evolution.from.name, evolution.to.name
                ));
                self.presenter.notify(&Notification::Evolution {
                    from: evolution.from.name,
                    to: evolution.to.name,
                    level: evolution.level,
                });
            }
        }
    }

    fn current_catch_chance(&self) -> Option<u32> {
        let encounter = self.state.encounter.as_ref()?;
        let wild = encounter.wild()?;
        Some(catch_chance(
            &wild.creature,
            encounter.is_guaranteed(),
            &self.state.roster,
        ))
    }

    fn render_selection(&mut self, switching: bool) {
        let current = self.battle.as_ref().map(|b| b.roster_index);
        let options = self
            .state
            .roster
            .selection_order()
            .into_iter()
            .filter_map(|index| {
                self.state.roster.get(index).map(|c| SelectionEntry {
                    roster_index: index,
                    creature: CreatureView::of(c),
                    selectable: !c.is_knocked_out() && Some(index) != current,
                })
            })
            .collect();
        self.presenter.render(&ViewModel::CreatureSelection {
            floor: self.state.floor,
            switching,
            options,
        });
    }

    /// Renders whatever screen the current state implies.
    fn render_current(&mut self) {
        let floor = self.state.floor;
        let view = if let Some(battle) = &self.battle {
            ViewModel::Battle {
                floor,
                player: battle.player.clone(),
                enemy: battle.enemy.clone(),
                turn: battle.turn,
                awaiting_switch: battle.awaiting_switch,
                boss: battle.is_boss,
            }
        } else if self.state.game_over {
            let (obtained, total) = self.state.completion();
            ViewModel::GameOver {
                floor,
                roster_size: self.state.roster.len(),
                currency: self.state.currency,
                species_obtained: obtained,
                total_species: total,
                completion_percent: self.state.completion_percent(),
            }
        } else {
            match &self.state.encounter {
                Some(Encounter::Shop(offer)) => ViewModel::Shop {
                    floor,
                    offer: *offer,
                    currency: self.state.currency,
                    capture_devices: self.state.capture_devices,
                    roster_needs_healing: self.state.roster.needs_healing(),
                },
                Some(encounter) => match encounter.wild() {
                    Some(wild) => ViewModel::Encounter {
                        floor,
                        creature: CreatureView::of(&wild.creature),
                        catch_chance: self.current_catch_chance().unwrap_or(0),
                        boss: encounter.is_boss(),
                        guaranteed: encounter.is_guaranteed(),
                        defeated: wild.defeated_in_battle,
                        can_fight: !wild.defeated_in_battle && self.state.roster.has_available(),
                        can_run: !encounter.is_boss(),
                    },
                    None => ViewModel::Transition { floor },
                },
                None if self.state.floor_explored => ViewModel::Transition { floor },
                None => ViewModel::Welcome { floor },
            }
        };
        self.presenter.render(&view);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::creatures::{instantiate_owned, instantiate_wild, lookup};
    use crate::floors::WildEncounter;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    fn game() -> Game<RecordingPresenter> {
        Game::new(GameConfig::headless(), RecordingPresenter::new())
    }

    fn log_len(game: &Game<RecordingPresenter>) -> usize {
        game.presenter().log.len()
    }

    #[test]
    fn test_new_game_shows_welcome() {
        let game = game();
        assert_eq!(game.presenter().screen(), Some("welcome"));
        assert_eq!(game.state().floor, 1);
        assert!(game.presenter().stats.is_some());
    }

    #[test]
    fn test_explore_twice_is_rejected_with_one_line() {
        let mut game = game();
        let mut rng = ChaCha8Rng::seed_from_u64(1);
        game.explore(&mut rng).unwrap();
        let before = game.state().clone();
        let lines = log_len(&game);

        assert_eq!(game.explore(&mut rng), Err(GameError::EncounterPending));
        assert_eq!(game.state(), &before);
        assert_eq!(log_len(&game), lines + 1);
        assert_eq!(
            game.presenter().log.latest(),
            Some(GameError::EncounterPending.to_string().as_str())
        );
    }

    #[test]
    fn test_actions_rejected_while_busy() {
        let mut game = game();
        let mut rng = ChaCha8Rng::seed_from_u64(2);
        game.explore(&mut rng).unwrap();
        game.attempt_catch(&mut rng).unwrap();
        game.advance_floor().unwrap();
        assert!(game.is_busy());
        assert_eq!(game.next_delay(), Some(0));
        assert_eq!(game.run_away(), Err(GameError::ActionPending));
        assert_eq!(game.settle(&mut rng), 1);
        assert!(game.state().floor_explored);
    }

    #[test]
    fn test_run_away_rejected_for_boss() {
        let mut state = RunState::new(&GameConfig::headless());
        state.floor = 10;
        state.floor_explored = true;
        state.encounter = Some(Encounter::Boss {
            encounter: WildEncounter::new(instantiate_wild(lookup("Pebblit").unwrap(), 5)),
            mandatory: true,
        });
        let mut game = Game::from_state(GameConfig::headless(), state, RecordingPresenter::new());
        assert_eq!(game.run_away(), Err(GameError::BossIsMandatory));
        assert_eq!(game.advance_floor(), Err(GameError::BossIsMandatory));
    }

    #[test]
    fn test_from_state_reports_repairs() {
        let mut state = RunState::new(&GameConfig::headless());
        let mut broken = instantiate_owned(&instantiate_wild(lookup("Sparkit").unwrap(), 3), 0);
        broken.max_hp = 1;
        state.roster.push(broken);
        let game = Game::from_state(GameConfig::headless(), state, RecordingPresenter::new());
        assert_eq!(
            game.presenter().log.latest(),
            Some("Repaired 1 creature record(s).")
        );
        let fixed = game.state().roster.get(0).unwrap();
        assert!(fixed.hp <= fixed.max_hp);
    }

    #[test]
    fn test_loaded_state_is_repaired() {
        let mut state = RunState::new(&GameConfig::headless());
        state.roster.push(instantiate_owned(
            &instantiate_wild(lookup("Frostling").unwrap(), 6),
            0,
        ));
        let mut value: serde_json::Value =
            serde_json::from_str(&state.to_json().unwrap()).unwrap();
        value["roster"][0]["catch_rate"] = serde_json::json!(0);
        value["roster"][0]["exp_value"] = serde_json::json!(0);

        let loaded = RunState::from_json(&value.to_string()).unwrap();
        assert_eq!(loaded.roster.get(0).unwrap().catch_rate, 0);
        let game = Game::from_state(GameConfig::headless(), loaded, RecordingPresenter::new());
        assert_eq!(
            game.presenter().log.latest(),
            Some("Repaired 1 creature record(s).")
        );
        assert_eq!(game.state().roster, state.roster);
    }

    #[test]
    fn test_reset_cancels_pending() {
        let mut game = game();
        let mut rng = ChaCha8Rng::seed_from_u64(3);
        game.explore(&mut rng).unwrap();
        game.attempt_catch(&mut rng).unwrap();
        game.advance_floor().unwrap();
        assert!(game.is_busy());
        game.reset_run();
        assert!(!game.is_busy());
        assert_eq!(game.state().floor, 1);
        assert!(game.state().roster.is_empty());
        assert!(game.state().capture_history.is_empty());
        assert_eq!(game.presenter().screen(), Some("welcome"));
    }

    #[test]
    fn test_recording_game_sizes_log_from_config() {
        let config = GameConfig {
            log_capacity: 3,
            ..GameConfig::headless()
        };
        let game = Game::recording(config);
        assert_eq!(game.presenter().log.capacity(), 3);
        // The welcome text alone is longer than three lines
        assert_eq!(game.presenter().log.len(), 3);
    }

    #[test]
    fn test_shop_actions_need_shop() {
        let mut game = game();
        assert_eq!(game.buy_capture_device(), Err(GameError::NotInShop));
    }
}
