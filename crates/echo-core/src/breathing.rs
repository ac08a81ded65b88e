//! Guided breathing timer.
//!
//! A finite-state timer advanced by explicit `tick()` calls, one tick per
//! second. The session core never depends on it; callers own the tick source.

use serde::{Deserialize, Serialize};

/// Ticks in one breathing cycle before the position wraps.
pub const CYCLE_TICKS: u32 = 21;
/// Total ticks before the exercise stops on its own.
pub const AUTO_STOP_TICKS: u32 = 300;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BreathingPhase {
    Inhale,
    Hold,
    Exhale,
    Pause,
}

impl BreathingPhase {
    fn at(position: u32) -> Option<Self> {
        match position {
            0..=4 => Some(BreathingPhase::Inhale),
            5..=11 => Some(BreathingPhase::Hold),
            12..=19 => Some(BreathingPhase::Exhale),
            20..=21 => Some(BreathingPhase::Pause),
            _ => None,
        }
    }

    /// Instruction shown during the phase.
    pub fn cue(&self) -> &'static str {
        match self {
            BreathingPhase::Inhale => "Breathe in slowly through your nose...",
            BreathingPhase::Hold => "Hold your breath gently...",
            BreathingPhase::Exhale => "Exhale slowly through your mouth...",
            BreathingPhase::Pause => "Rest and prepare for the next breath...",
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            BreathingPhase::Inhale => "inhale",
            BreathingPhase::Hold => "hold",
            BreathingPhase::Exhale => "exhale",
            BreathingPhase::Pause => "pause",
        }
    }
}

#[derive(Debug, Clone)]
pub struct BreathingTimer {
    position: u32,
    elapsed: u32,
    cycles: u32,
    phase: BreathingPhase,
    running: bool,
}

impl Default for BreathingTimer {
    fn default() -> Self {
        Self::new()
    }
}

impl BreathingTimer {
    /// A running timer at the start of an inhale.
    pub fn new() -> Self {
        Self {
            position: 0,
            elapsed: 0,
            cycles: 0,
            phase: BreathingPhase::Inhale,
            running: true,
        }
    }

    /// Advances one second. Returns the phase after the tick, or `None` once stopped.
    pub fn tick(&mut self) -> Option<BreathingPhase> {
        if !self.running {
            return None;
        }

        self.elapsed += 1;
        let next = self.position + 1;
        match BreathingPhase::at(next) {
            Some(phase) => {
                self.position = next;
                self.phase = phase;
            }
            None => {
                self.position = 0;
                self.phase = BreathingPhase::Inhale;
                self.cycles += 1;
            }
        }

        if self.elapsed >= AUTO_STOP_TICKS {
            self.running = false;
        }
        Some(self.phase)
    }

    pub fn stop(&mut self) {
        self.running = false;
        self.position = 0;
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    pub fn phase(&self) -> BreathingPhase {
        self.phase
    }

    /// Seconds into the current cycle.
    pub fn position(&self) -> u32 {
        self.position
    }

    pub fn elapsed(&self) -> u32 {
        self.elapsed
    }

    pub fn cycles_completed(&self) -> u32 {
        self.cycles
    }

    /// Fraction of the current cycle, in [0, 1).
    pub fn progress(&self) -> f64 {
        (self.position % CYCLE_TICKS) as f64 / CYCLE_TICKS as f64
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_phase_sequence_over_one_cycle() {
        let mut timer = BreathingTimer::new();
        let phases: Vec<BreathingPhase> = (0..22).filter_map(|_| timer.tick()).collect();

        assert_eq!(phases[0], BreathingPhase::Inhale);
        assert_eq!(phases[3], BreathingPhase::Inhale);
        assert_eq!(phases[4], BreathingPhase::Hold);
        assert_eq!(phases[10], BreathingPhase::Hold);
        assert_eq!(phases[11], BreathingPhase::Exhale);
        assert_eq!(phases[18], BreathingPhase::Exhale);
        assert_eq!(phases[19], BreathingPhase::Pause);
        assert_eq!(phases[20], BreathingPhase::Pause);
        // wrap
        assert_eq!(phases[21], BreathingPhase::Inhale);
        assert_eq!(timer.position(), 0);
        assert_eq!(timer.cycles_completed(), 1);
    }

    #[test]
    fn test_auto_stop() {
        let mut timer = BreathingTimer::new();
        let ticks = std::iter::from_fn(|| timer.tick()).count();
        assert_eq!(ticks as u32, AUTO_STOP_TICKS);
        assert!(!timer.is_running());
        assert_eq!(timer.tick(), None);
    }

    #[test]
    fn test_progress_within_cycle() {
        let mut timer = BreathingTimer::new();
        assert_eq!(timer.progress(), 0.0);
        for _ in 0..7 {
            timer.tick();
        }
        assert!((timer.progress() - 7.0 / 21.0).abs() < f64::EPSILON);
    }
}
