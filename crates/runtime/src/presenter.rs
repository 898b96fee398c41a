//! Presentation and audio sinks that forward to the [`EventBus`].
//!
//! The core polls [`Presenter::is_animation_in_progress`] to pace its
//! executor. Without a renderer the bus presenter simulates playback: every
//! requested animation keeps the executor waiting for `animation_ticks`
//! ticks, counted down by [`BusPresenter::advance`].

use battle_core::{
    AnimationId, AudioSink, CombatantId, FloatingResult, Notification, Pose, PresentationEvent,
    Presenter, SoundId, Tick,
};

use crate::events::{Event, EventBus, SoundEvent};

pub struct BusPresenter {
    bus: EventBus,
    animation_ticks: u32,
    remaining: u32,
}

impl BusPresenter {
    pub fn new(bus: EventBus, animation_ticks: u32) -> Self {
        Self {
            bus,
            animation_ticks,
            remaining: 0,
        }
    }

    /// Counts down the animation currently playing.
    pub fn advance(&mut self) {
        self.remaining = self.remaining.saturating_sub(1);
    }

    fn publish(&self, event: PresentationEvent) {
        self.bus.publish(Event::Presentation(event));
    }
}

impl Presenter for BusPresenter {
    fn request_animation(&mut self, target: CombatantId, animation: AnimationId) {
        self.remaining = self.remaining.max(self.animation_ticks);
        self.publish(PresentationEvent::Animation { target, animation });
    }

    fn is_animation_in_progress(&self) -> bool {
        self.remaining > 0
    }

    fn show_floating_result(&mut self, target: CombatantId, result: FloatingResult) {
        self.publish(PresentationEvent::Floating { target, result });
    }

    fn set_pose(&mut self, target: CombatantId, pose: Pose) {
        self.publish(PresentationEvent::Pose { target, pose });
    }

    fn show_notification(&mut self, notification: Notification) {
        self.publish(PresentationEvent::Notification(notification));
    }
}

/// Audio sink publishing cues stamped with the battle clock.
pub struct BusAudio {
    bus: EventBus,
    clock: Tick,
}

impl BusAudio {
    pub fn new(bus: EventBus) -> Self {
        Self {
            bus,
            clock: Tick::default(),
        }
    }

    pub fn set_clock(&mut self, clock: Tick) {
        self.clock = clock;
    }
}

impl AudioSink for BusAudio {
    fn play_sound_cue(&mut self, cue: SoundId) {
        tracing::trace!("audio: cue {} at {}", cue, self.clock);
        self.bus.publish(Event::Audio(SoundEvent {
            cue,
            clock: self.clock,
        }));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::events::Topic;

    #[test]
    fn test_animation_blocks_for_configured_ticks() {
        let mut presenter = BusPresenter::new(EventBus::new(), 2);
        assert!(!presenter.is_animation_in_progress());

        presenter.request_animation(CombatantId(1), AnimationId(7));
        assert!(presenter.is_animation_in_progress());
        presenter.advance();
        assert!(presenter.is_animation_in_progress());
        presenter.advance();
        assert!(!presenter.is_animation_in_progress());
    }

    #[test]
    fn test_zero_length_animations_never_block() {
        let mut presenter = BusPresenter::new(EventBus::new(), 0);
        presenter.request_animation(CombatantId(1), AnimationId(7));
        assert!(!presenter.is_animation_in_progress());
    }

    #[tokio::test]
    async fn test_commands_are_published() {
        let bus = EventBus::new();
        let mut screen = bus.subscribe(Topic::Presentation);
        let mut sounds = bus.subscribe(Topic::Audio);

        let mut presenter = BusPresenter::new(bus.clone(), 0);
        presenter.set_pose(CombatantId(2), Pose::Dead);
        let mut audio = BusAudio::new(bus);
        audio.set_clock(Tick(40));
        audio.play_sound_cue(SoundId(3));

        assert_eq!(
            screen.recv().await.unwrap(),
            Event::Presentation(PresentationEvent::Pose {
                target: CombatantId(2),
                pose: Pose::Dead,
            })
        );
        assert_eq!(
            sounds.recv().await.unwrap(),
            Event::Audio(SoundEvent {
                cue: SoundId(3),
                clock: Tick(40),
            })
        );
    }
}
