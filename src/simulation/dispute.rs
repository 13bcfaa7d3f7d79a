use thiserror::Error;

use crate::core::clock::Millis;
use crate::data::Dispute;

/// Walks one level's disputes in order.
///
/// Picking a choice freezes input for the current dispute and schedules the
/// advance; the advance from the last dispute finishes the round instead.
/// Which choice was picked has no effect on the outcome.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DisputeRound {
    level_id: String,
    disputes: Vec<Dispute>,
    index: usize,
    seconds_per_dispute: u32,
    seconds_left: u32,
    selected: Option<usize>,
    advance_due: Option<Millis>,
    finished: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RoundStep {
    Advanced { index: usize },
    Finished,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DisputeError {
    #[error("a choice was already made for this dispute")]
    InputFrozen,
    #[error("choice {index} does not exist (dispute has {available})")]
    UnknownChoice { index: usize, available: usize },
    #[error("the round is already finished")]
    RoundFinished,
}

impl DisputeRound {
    /// `None` when the level has nothing to play.
    pub fn new(level_id: &str, disputes: Vec<Dispute>, seconds_per_dispute: u32) -> Option<Self> {
        if disputes.is_empty() {
            return None;
        }
        Some(Self {
            level_id: level_id.to_string(),
            disputes,
            index: 0,
            seconds_per_dispute,
            seconds_left: seconds_per_dispute,
            selected: None,
            advance_due: None,
            finished: false,
        })
    }

    pub fn level_id(&self) -> &str {
        &self.level_id
    }

    pub fn index(&self) -> usize {
        self.index
    }

    pub fn len(&self) -> usize {
        self.disputes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.disputes.is_empty()
    }

    pub fn current(&self) -> Option<&Dispute> {
        self.disputes.get(self.index)
    }

    pub fn seconds_left(&self) -> u32 {
        self.seconds_left
    }

    pub fn selected(&self) -> Option<usize> {
        self.selected
    }

    pub fn advance_due(&self) -> Option<Millis> {
        self.advance_due
    }

    pub fn is_finished(&self) -> bool {
        self.finished
    }

    pub fn select_choice(
        &mut self,
        choice: usize,
        now: Millis,
        advance_delay_ms: Millis,
    ) -> Result<(), DisputeError> {
        if self.finished {
            return Err(DisputeError::RoundFinished);
        }
        if self.selected.is_some() {
            return Err(DisputeError::InputFrozen);
        }
        let available = self.current().map(|d| d.choices.len()).unwrap_or(0);
        if choice >= available {
            return Err(DisputeError::UnknownChoice {
                index: choice,
                available,
            });
        }
        self.selected = Some(choice);
        self.advance_due = Some(now.saturating_add(advance_delay_ms));
        Ok(())
    }

    /// Count the timer down by `ticks` seconds, stopping at zero. Returns
    /// true when this call is the one that reached zero.
    pub fn tick_countdown(&mut self, ticks: u64) -> bool {
        if self.finished || self.seconds_left == 0 || ticks == 0 {
            return false;
        }
        let ticks = u32::try_from(ticks).unwrap_or(u32::MAX);
        self.seconds_left = self.seconds_left.saturating_sub(ticks);
        self.seconds_left == 0
    }

    pub fn poll_advance(&mut self, now: Millis) -> Option<RoundStep> {
        let due = self.advance_due?;
        if self.finished || now < due {
            return None;
        }
        self.advance_due = None;
        if self.index + 1 < self.disputes.len() {
            self.index += 1;
            self.selected = None;
            self.seconds_left = self.seconds_per_dispute;
            Some(RoundStep::Advanced { index: self.index })
        } else {
            self.finished = true;
            Some(RoundStep::Finished)
        }
    }
}
