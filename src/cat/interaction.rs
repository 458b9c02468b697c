use crate::cat::animation::FrameAnimator;
use crate::config::TimerRanges;
use crate::input::{MouseButton, PointerEvent, PointerKind};
use crate::spatial::HitRegion;

/// What the cat is doing, as far as autonomous behavior is concerned.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Activity {
    Idle,
    Moving,
    Sleeping,
}

/// Result of feeding a pointer event to the tracker.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PointerReaction {
    Ignored,
    PetStarted,
    PetEnded,
    /// Counted a poke on a sleeping cat; not enough to wake it yet.
    Poked { count: u32, needed: u32 },
    /// Enough pokes: the cat should be woken now.
    WakeRequested,
}

pub(crate) fn uniform(rng: &mut fastrand::Rng, (lo, hi): (f32, f32)) -> f32 {
    lo + rng.f32() * (hi - lo)
}

/// Idle fidgets, blinking, petting, food hover and poke counting.
#[derive(Debug)]
pub struct InteractionTracker {
    rng: fastrand::Rng,
    timers: TimerRanges,

    petted: bool,
    food_hover: bool,

    idle_timer: f32,
    idle_burst: bool,

    blink_timer: f32,
    blinking: bool,
    blink_left: f32,

    pokes: u32,
    pokes_to_wake: u32,
}

impl InteractionTracker {
    pub fn new(mut rng: fastrand::Rng, timers: TimerRanges, pokes_to_wake: u32) -> Self {
        let idle_timer = uniform(&mut rng, timers.idle);
        let blink_timer = uniform(&mut rng, timers.first_blink);
        Self {
            rng,
            timers,
            petted: false,
            food_hover: false,
            idle_timer,
            idle_burst: false,
            blink_timer,
            blinking: false,
            blink_left: 0.0,
            pokes: 0,
            pokes_to_wake: pokes_to_wake.max(1),
        }
    }

    pub fn is_petted(&self) -> bool {
        self.petted
    }

    pub fn is_blinking(&self) -> bool {
        self.blinking
    }

    pub fn is_food_hovered(&self) -> bool {
        self.food_hover
    }

    pub fn is_idle_burst(&self) -> bool {
        self.idle_burst
    }

    pub fn idle_timer(&self) -> f32 {
        self.idle_timer
    }

    pub fn blink_timer(&self) -> f32 {
        self.blink_timer
    }

    pub fn pokes(&self) -> u32 {
        self.pokes
    }

    pub fn pokes_to_wake(&self) -> u32 {
        self.pokes_to_wake
    }

    pub fn set_food_hover(&mut self, hovering: bool) {
        self.food_hover = hovering;
    }

    pub fn reset_pokes(&mut self) {
        self.pokes = 0;
    }

    /// Advance timers. `idle` is the idle clip the fidget bursts play on.
    pub fn update<T>(&mut self, dt: f32, activity: Activity, idle: &mut FrameAnimator<T>) {
        if activity != Activity::Idle {
            self.disarm(idle);
            return;
        }

        self.idle_timer -= dt;
        if self.idle_timer <= 0.0 && !self.idle_burst {
            let natural = idle.round_trip_len();
            let frames = self.rng.u32((natural / 2).max(1)..=natural * 2);
            log::trace!("idle burst of {frames} frames");
            idle.play(frames);
            self.idle_burst = true;
        }
        if self.idle_burst && idle.is_finished() {
            self.idle_burst = false;
            self.idle_timer = uniform(&mut self.rng, self.timers.idle);
        }

        if self.petted {
            return;
        }
        if !self.blinking {
            self.blink_timer -= dt;
            if self.blink_timer <= 0.0 {
                self.blinking = true;
                self.blink_left = self.timers.blink_duration;
            }
        } else {
            self.blink_left -= dt;
            if self.blink_left <= 0.0 {
                self.blinking = false;
                self.blink_timer = uniform(&mut self.rng, self.timers.next_blink);
            }
        }
    }

    /// Stop fidgeting and blinking; used whenever the cat is not idle.
    pub fn disarm<T>(&mut self, idle: &mut FrameAnimator<T>) {
        if self.idle_burst {
            idle.cancel();
            self.idle_burst = false;
            self.idle_timer = uniform(&mut self.rng, self.timers.idle);
        } else {
            idle.pause();
        }
        if self.blinking {
            self.blinking = false;
            self.blink_timer = uniform(&mut self.rng, self.timers.next_blink);
        }
    }

    /// Interpret a pointer event against the cat's current hit region.
    /// Both petting and poking need an opaque pixel under the pointer.
    pub fn handle_pointer(
        &mut self,
        ev: &PointerEvent,
        region: &HitRegion,
        sleeping: bool,
    ) -> PointerReaction {
        match (ev.kind, ev.button) {
            (PointerKind::Down, MouseButton::Left) if !self.petted && region.contains(ev.pos) => {
                self.petted = true;
                PointerReaction::PetStarted
            }
            (PointerKind::Up, MouseButton::Left) if self.petted => {
                self.petted = false;
                PointerReaction::PetEnded
            }
            (PointerKind::Down, MouseButton::Right) if sleeping && region.contains(ev.pos) => {
                self.pokes += 1;
                if self.pokes >= self.pokes_to_wake {
                    self.pokes = 0;
                    PointerReaction::WakeRequested
                } else {
                    PointerReaction::Poked {
                        count: self.pokes,
                        needed: self.pokes_to_wake,
                    }
                }
            }
            _ => PointerReaction::Ignored,
        }
    }
}
