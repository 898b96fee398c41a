//! Outbound presentation and audio interfaces.
//!
//! The executor never touches sprites or mixers. It issues explicit commands
//! through [`Presenter`] and [`AudioSink`], and polls
//! [`Presenter::is_animation_in_progress`] to know when it may advance.

use strum::{AsRefStr, Display};

use crate::action::BattleAction;
use crate::state::{AnimationId, CombatantId, SoundId, StatusId};

/// Battler animation state.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Display, AsRefStr)]
#[strum(serialize_all = "snake_case")]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Pose {
    Idle,
    Damage,
    Dead,
}

/// Floating text shown over a target after an effect resolves.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum FloatingResult {
    Damage(u32),
    Recovery(u32),
    Miss,
    Status { status: StatusId, applied: bool },
}

/// Informational messages the presentation layer may display.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Notification {
    ActionStarted {
        source: CombatantId,
        action: BattleAction,
        /// Suggested display time in ticks.
        ticks: u32,
    },
    /// The action lost every target before it could start.
    NoTarget { source: CombatantId },
    EscapeFailed,
}

pub trait Presenter {
    fn request_animation(&mut self, target: CombatantId, animation: AnimationId);

    /// While true the executor does not advance phases.
    fn is_animation_in_progress(&self) -> bool;

    fn show_floating_result(&mut self, target: CombatantId, result: FloatingResult);

    fn set_pose(&mut self, target: CombatantId, pose: Pose);

    fn show_notification(&mut self, _notification: Notification) {}
}

pub trait AudioSink {
    fn play_sound_cue(&mut self, cue: SoundId);
}

/// Mutable sinks handed to every tick.
pub struct Outputs<'a> {
    pub presenter: &'a mut dyn Presenter,
    pub audio: &'a mut dyn AudioSink,
}

impl<'a> Outputs<'a> {
    pub fn new(presenter: &'a mut dyn Presenter, audio: &'a mut dyn AudioSink) -> Self {
        Self { presenter, audio }
    }

    /// Plays a cue if one is configured.
    pub fn play(&mut self, cue: Option<SoundId>) {
        if let Some(cue) = cue {
            self.audio.play_sound_cue(cue);
        }
    }
}

/// Discards everything and never blocks.
#[derive(Clone, Copy, Debug, Default)]
pub struct NullOutputs;

impl Presenter for NullOutputs {
    fn request_animation(&mut self, _target: CombatantId, _animation: AnimationId) {}

    fn is_animation_in_progress(&self) -> bool {
        false
    }

    fn show_floating_result(&mut self, _target: CombatantId, _result: FloatingResult) {}

    fn set_pose(&mut self, _target: CombatantId, _pose: Pose) {}
}

impl AudioSink for NullOutputs {
    fn play_sound_cue(&mut self, _cue: SoundId) {}
}

// ============================================================================
// Recording
// ============================================================================

/// One presentation command received by a [`ScreenLog`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum PresentationEvent {
    Animation {
        target: CombatantId,
        animation: AnimationId,
    },
    Floating {
        target: CombatantId,
        result: FloatingResult,
    },
    Pose {
        target: CombatantId,
        pose: Pose,
    },
    Notification(Notification),
}

/// Presenter that records commands and simulates animation playback with a
/// fixed duration.
#[derive(Clone, Debug, Default)]
pub struct ScreenLog {
    pub events: Vec<PresentationEvent>,
    animation_ticks: u32,
    remaining: u32,
}

impl Presenter for ScreenLog {
    fn request_animation(&mut self, target: CombatantId, animation: AnimationId) {
        self.events
            .push(PresentationEvent::Animation { target, animation });
        self.remaining = self.animation_ticks;
    }

    fn is_animation_in_progress(&self) -> bool {
        self.remaining > 0
    }

    fn show_floating_result(&mut self, target: CombatantId, result: FloatingResult) {
        self.events
            .push(PresentationEvent::Floating { target, result });
    }

    fn set_pose(&mut self, target: CombatantId, pose: Pose) {
        self.events.push(PresentationEvent::Pose { target, pose });
    }

    fn show_notification(&mut self, notification: Notification) {
        self.events
            .push(PresentationEvent::Notification(notification));
    }
}

#[derive(Clone, Debug, Default)]
pub struct AudioLog {
    pub cues: Vec<SoundId>,
}

impl AudioSink for AudioLog {
    fn play_sound_cue(&mut self, cue: SoundId) {
        self.cues.push(cue);
    }
}

/// In-memory collaborator pair for headless runs and tests.
#[derive(Clone, Debug, Default)]
pub struct Recorder {
    pub screen: ScreenLog,
    pub audio: AudioLog,
}

impl Recorder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Each requested animation blocks the executor for `ticks` advances.
    pub fn with_animation_ticks(ticks: u32) -> Self {
        Self {
            screen: ScreenLog {
                animation_ticks: ticks,
                ..ScreenLog::default()
            },
            audio: AudioLog::default(),
        }
    }

    pub fn outputs(&mut self) -> Outputs<'_> {
        Outputs::new(&mut self.screen, &mut self.audio)
    }

    /// Moves simulated playback forward by one tick.
    pub fn advance(&mut self) {
        self.screen.remaining = self.screen.remaining.saturating_sub(1);
    }

    pub fn floating_for(&self, target: CombatantId) -> Vec<FloatingResult> {
        self.screen
            .events
            .iter()
            .filter_map(|event| match event {
                PresentationEvent::Floating { target: t, result } if *t == target => Some(*result),
                _ => None,
            })
            .collect()
    }

    pub fn last_pose(&self, target: CombatantId) -> Option<Pose> {
        self.screen.events.iter().rev().find_map(|event| match event {
            PresentationEvent::Pose { target: t, pose } if *t == target => Some(*pose),
            _ => None,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn animation_blocks_for_configured_ticks() {
        let mut recorder = Recorder::with_animation_ticks(2);
        recorder
            .outputs()
            .presenter
            .request_animation(CombatantId(1), AnimationId(9));
        assert!(recorder.screen.is_animation_in_progress());
        recorder.advance();
        assert!(recorder.screen.is_animation_in_progress());
        recorder.advance();
        assert!(!recorder.screen.is_animation_in_progress());
    }

    #[test]
    fn outputs_play_skips_missing_cues() {
        let mut recorder = Recorder::new();
        let mut outputs = recorder.outputs();
        outputs.play(None);
        outputs.play(Some(SoundId(3)));
        assert_eq!(recorder.audio.cues, vec![SoundId(3)]);
    }
}
