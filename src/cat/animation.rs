/// Slack, as a fraction of the frame duration, for float accumulation so
/// `k * duration` seconds always crosses `k` boundaries.
const BOUNDARY_SLACK: f32 = 1e-4;

/// Frame sequence playback: forward loop, ping-pong, one-shot and bounded
/// bursts. Generic over the frame payload so tests can drive it with plain
/// integers.
#[derive(Debug, Clone)]
pub struct FrameAnimator<T> {
    frames: Vec<T>,
    duration: f32,
    frame: usize,
    elapsed: f32,
    direction: i8,
    looping: bool,
    pingpong: bool,
    paused: bool,
    finished: bool,
    /// Crossings left in a bounded burst.
    remaining: Option<u32>,
}

impl<T> FrameAnimator<T> {
    /// `duration` is seconds per frame and must be positive.
    pub fn new(frames: Vec<T>, duration: f32, looping: bool, pingpong: bool) -> Self {
        debug_assert!(duration > 0.0);
        Self {
            frames,
            duration,
            frame: 0,
            elapsed: 0.0,
            direction: 1,
            looping,
            pingpong,
            paused: false,
            finished: false,
            remaining: None,
        }
    }

    /// Current frame, or `None` for an empty clip (nothing to draw).
    pub fn current(&self) -> Option<&T> {
        self.frames.get(self.frame)
    }

    pub fn frame_index(&self) -> usize {
        self.frame
    }

    pub fn frame_count(&self) -> usize {
        self.frames.len()
    }

    pub fn direction(&self) -> i8 {
        self.direction
    }

    pub fn is_finished(&self) -> bool {
        self.finished
    }

    pub fn is_paused(&self) -> bool {
        self.paused
    }

    pub fn is_playing(&self) -> bool {
        !self.paused && !self.finished
    }

    /// Crossings in one full ping-pong round trip (0 → last → 0).
    pub fn round_trip_len(&self) -> u32 {
        (self.frames.len().saturating_sub(1) * 2).max(1) as u32
    }

    pub fn pause(&mut self) {
        self.paused = true;
    }

    pub fn resume(&mut self) {
        self.paused = false;
    }

    /// Back to frame 0 moving forward, playing, with no burst armed.
    pub fn reset(&mut self) {
        self.frame = 0;
        self.elapsed = 0.0;
        self.direction = 1;
        self.paused = false;
        self.finished = false;
        self.remaining = None;
    }

    /// Bounded burst: advance exactly `count` frame boundaries, then pause.
    pub fn play(&mut self, count: u32) {
        self.looping = false;
        self.paused = false;
        self.finished = false;
        self.elapsed = 0.0;
        self.remaining = Some(count);
        if count == 0 {
            self.stop_finished();
        }
    }

    /// One pass of the clip: to the last frame, or a full round trip when
    /// ping-ponging.
    pub fn play_once(&mut self) {
        self.reset();
        self.looping = false;
    }

    /// Cancel a burst in flight and hold the current frame.
    pub fn cancel(&mut self) {
        self.remaining = None;
        self.elapsed = 0.0;
        self.paused = true;
    }

    pub fn advance(&mut self, dt: f32) {
        if !self.is_playing() || self.frames.is_empty() {
            return;
        }

        self.elapsed += dt.max(0.0);

        // Whole cycles of an endless clip land back on the same frame and
        // direction.
        if self.looping && self.remaining.is_none() {
            let period = self.duration * self.cycle_len() as f32;
            if self.elapsed >= period {
                self.elapsed %= period;
            }
        }

        // One boundary at a time: reversals and completion must be seen
        // even when a single dt spans several frames.
        let slack = self.duration * BOUNDARY_SLACK;
        while self.elapsed + slack >= self.duration {
            self.elapsed = (self.elapsed - self.duration).max(0.0);
            self.step();

            if let Some(left) = self.remaining.as_mut() {
                *left = left.saturating_sub(1);
                if *left == 0 {
                    self.stop_finished();
                    return;
                }
            }
            if self.finished {
                self.elapsed = 0.0;
                return;
            }
        }
    }

    /// Crossings until an endless clip repeats its frame and direction.
    fn cycle_len(&self) -> u32 {
        if self.pingpong {
            self.round_trip_len()
        } else {
            self.frames.len().max(1) as u32
        }
    }

    fn stop_finished(&mut self) {
        self.remaining = None;
        self.paused = true;
        self.finished = true;
        self.elapsed = 0.0;
    }

    fn step(&mut self) {
        let last = self.frames.len() - 1;
        if last == 0 {
            if !self.looping && self.remaining.is_none() {
                self.finished = true;
            }
            return;
        }

        if self.pingpong {
            let next = self.frame as isize + self.direction as isize;
            self.frame = next.clamp(0, last as isize) as usize;
            if self.frame == last {
                self.direction = -1;
            } else if self.frame == 0 {
                self.direction = 1;
                if !self.looping && self.remaining.is_none() {
                    self.finished = true;
                }
            }
            return;
        }

        if self.frame + 1 > last {
            if self.looping || self.remaining.is_some() {
                self.frame = 0;
            } else {
                self.finished = true;
            }
        } else {
            self.frame += 1;
            if self.frame == last && !self.looping && self.remaining.is_none() {
                self.finished = true;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn frames(n: usize) -> Vec<usize> {
        (0..n).collect()
    }

    #[test]
    fn looping_wraps_to_first_frame() {
        let mut anim = FrameAnimator::new(frames(3), 0.25, true, false);
        anim.advance(0.75);
        assert_eq!(anim.frame_index(), 0);
        anim.advance(0.25);
        assert_eq!(anim.frame_index(), 1);
        assert!(anim.is_playing());
    }

    #[test]
    fn large_dt_stays_in_bounds() {
        for &(looping, pingpong) in &[(true, false), (true, true), (false, false), (false, true)] {
            for n in 1..6 {
                for duration in [0.1, 1e-6, 1e-9] {
                    let mut anim = FrameAnimator::new(frames(n), duration, looping, pingpong);
                    for dt in [0.0, 0.05, 0.1, 0.37, 3.3, 100.0] {
                        anim.advance(dt);
                        assert!(anim.frame_index() < n);
                    }
                }
            }
        }
    }

    #[test]
    fn pingpong_round_trip_returns_forward_at_zero() {
        let mut anim = FrameAnimator::new(frames(4), 0.125, true, true);
        let mut seen = Vec::new();
        for _ in 0..6 {
            anim.advance(0.125);
            seen.push(anim.frame_index());
        }
        assert_eq!(seen, vec![1, 2, 3, 2, 1, 0]);
        assert_eq!(anim.direction(), 1);
        assert!(!anim.is_finished());
    }

    #[test]
    fn pingpong_round_trip_in_one_call() {
        let mut anim = FrameAnimator::new(frames(4), 0.125, true, true);
        anim.advance(6.0 * 0.125);
        assert_eq!(anim.frame_index(), 0);
        assert_eq!(anim.direction(), 1);
    }

    #[test]
    fn burst_is_independent_of_dt_chunking() {
        for k in [1u32, 3, 5, 7, 11] {
            let mut one = FrameAnimator::new(frames(4), 0.1, false, true);
            one.play(k);
            one.advance(k as f32 * 0.1);

            let mut many = FrameAnimator::new(frames(4), 0.1, false, true);
            many.play(k);
            for _ in 0..k {
                many.advance(0.1);
            }

            assert!(one.is_finished() && many.is_finished(), "k={k}");
            assert!(!one.is_playing());
            assert_eq!(one.frame_index(), many.frame_index(), "k={k}");
        }
    }

    #[test]
    fn burst_ignores_time_after_finishing() {
        let mut anim = FrameAnimator::new(frames(4), 0.1, false, true);
        anim.play(2);
        anim.advance(5.0);
        assert_eq!(anim.frame_index(), 2);
        assert!(anim.is_finished());
    }

    #[test]
    fn burst_runs_past_round_trip() {
        let mut anim = FrameAnimator::new(frames(3), 0.1, false, true);
        anim.play(6);
        anim.advance(0.35);
        assert!(anim.is_playing());
        anim.advance(0.3);
        assert!(anim.is_finished());
        // 1,2,1,0,1,2
        assert_eq!(anim.frame_index(), 2);
    }

    #[test]
    fn play_zero_finishes_immediately() {
        let mut anim = FrameAnimator::new(frames(3), 0.1, false, true);
        anim.play(0);
        assert!(anim.is_finished());
        anim.advance(1.0);
        assert_eq!(anim.frame_index(), 0);
    }

    #[test]
    fn once_pingpong_finishes_back_at_start() {
        let mut anim = FrameAnimator::new(frames(3), 0.1, false, true);
        anim.play_once();
        anim.advance(10.0);
        assert!(anim.is_finished());
        assert_eq!(anim.frame_index(), 0);
    }

    #[test]
    fn tiny_duration_does_not_spin_on_zero_dt() {
        let mut anim = FrameAnimator::new(frames(3), 1e-6, true, false);
        anim.advance(0.0);
        assert_eq!(anim.frame_index(), 0);
        anim.advance(1e-6);
        assert_eq!(anim.frame_index(), 1);
    }

    #[test]
    fn looping_skips_whole_cycles() {
        let mut anim = FrameAnimator::new(frames(4), 0.125, true, true);
        // 100 round trips of 6 crossings, then two more.
        anim.advance(600.0 * 0.125 + 0.25);
        assert_eq!(anim.frame_index(), 2);
        assert_eq!(anim.direction(), 1);
    }

    #[test]
    fn single_frame_once_clip_finishes() {
        for pingpong in [false, true] {
            let mut anim = FrameAnimator::new(frames(1), 0.1, false, pingpong);
            anim.play_once();
            anim.advance(0.05);
            assert!(anim.is_playing());
            anim.advance(0.05);
            assert!(anim.is_finished(), "pingpong={pingpong}");
            assert_eq!(anim.frame_index(), 0);
        }
    }

    #[test]
    fn single_frame_looping_keeps_playing() {
        let mut anim = FrameAnimator::new(frames(1), 0.1, true, true);
        anim.advance(10.0);
        assert!(anim.is_playing());
    }

    #[test]
    fn once_forward_holds_last_frame() {
        let mut anim = FrameAnimator::new(frames(3), 0.1, false, false);
        anim.advance(10.0);
        assert!(anim.is_finished());
        assert_eq!(anim.frame_index(), 2);
    }

    #[test]
    fn paused_does_not_accumulate() {
        let mut anim = FrameAnimator::new(frames(3), 0.1, true, false);
        anim.pause();
        anim.advance(1.0);
        anim.resume();
        assert_eq!(anim.frame_index(), 0);
        anim.advance(0.1);
        assert_eq!(anim.frame_index(), 1);
    }

    #[test]
    fn reset_restores_playback() {
        let mut anim = FrameAnimator::new(frames(4), 0.1, false, true);
        anim.play(3);
        anim.advance(1.0);
        anim.reset();
        assert_eq!(anim.frame_index(), 0);
        assert_eq!(anim.direction(), 1);
        assert!(anim.is_playing());
    }

    #[test]
    fn empty_clip_has_nothing_to_draw() {
        let mut anim: FrameAnimator<usize> = FrameAnimator::new(Vec::new(), 0.1, true, false);
        anim.advance(1.0);
        assert!(anim.current().is_none());
    }
}
