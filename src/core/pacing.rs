//! Deferred follow-ups of player actions.
//!
//! Some steps happen a moment after the action that caused them: the enemy
//! reply, the victory screen, the switch prompt, game over and the automatic
//! exploration after climbing. Instead of timers the controller queues them
//! with their intended delay and the driver decides when to resume.

use std::collections::VecDeque;

use super::config::PacingConfig;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Continuation {
    EnemyTurn,
    Victory,
    SwitchPrompt,
    GameOver,
    AutoExplore,
}

impl Continuation {
    pub fn delay_ms(&self, pacing: &PacingConfig) -> u64 {
        match self {
            Continuation::EnemyTurn => pacing.enemy_turn_ms,
            Continuation::Victory => pacing.victory_ms,
            Continuation::SwitchPrompt => pacing.switch_prompt_ms,
            Continuation::GameOver => pacing.game_over_ms,
            Continuation::AutoExplore => pacing.auto_explore_ms,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Scheduled {
    pub step: Continuation,
    pub delay_ms: u64,
}

/// FIFO of scheduled continuations.
#[derive(Debug, Clone, Default)]
pub struct PacingQueue {
    steps: VecDeque<Scheduled>,
}

impl PacingQueue {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn schedule(&mut self, step: Continuation, pacing: &PacingConfig) {
        self.steps.push_back(Scheduled {
            step,
            delay_ms: step.delay_ms(pacing),
        });
    }

    /// Delay the driver should wait before resuming the next step.
    pub fn next_delay(&self) -> Option<u64> {
        self.steps.front().map(|s| s.delay_ms)
    }

    pub fn peek(&self) -> Option<Continuation> {
        self.steps.front().map(|s| s.step)
    }

    pub fn pop(&mut self) -> Option<Scheduled> {
        self.steps.pop_front()
    }

    pub fn is_idle(&self) -> bool {
        self.steps.is_empty()
    }

    pub fn len(&self) -> usize {
        self.steps.len()
    }

    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    /// Drops everything queued. Returns how many steps were cancelled.
    pub fn cancel_all(&mut self) -> usize {
        let cancelled = self.steps.len();
        self.steps.clear();
        cancelled
    }
}
