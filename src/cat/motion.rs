use glam::Vec2;

/// Constant-speed steering toward an optional target.
#[derive(Debug, Clone)]
pub struct MotionController {
    position: Vec2,
    velocity: Vec2,
    target: Option<Vec2>,
    speed: f32,
    epsilon: f32,
}

impl MotionController {
    pub fn new(position: Vec2, speed: f32, epsilon: f32) -> Self {
        Self {
            position,
            velocity: Vec2::ZERO,
            target: None,
            speed,
            epsilon,
        }
    }

    pub fn position(&self) -> Vec2 {
        self.position
    }

    pub fn velocity(&self) -> Vec2 {
        self.velocity
    }

    pub fn target(&self) -> Option<Vec2> {
        self.target
    }

    pub fn is_moving(&self) -> bool {
        self.target.is_some()
    }

    pub fn move_to(&mut self, target: Vec2) {
        self.target = Some(target);
    }

    /// Teleport. Leaves any target in place.
    pub fn set_position(&mut self, pos: Vec2) {
        self.position = pos;
    }

    /// Drop the target and stand still.
    pub fn stop(&mut self) {
        self.target = None;
        self.velocity = Vec2::ZERO;
    }

    /// Pin to `bed` for the duration of a nap.
    pub fn pin(&mut self, bed: Vec2) {
        self.stop();
        self.position = bed;
    }

    pub fn update(&mut self, dt: f32, sleeping: bool) {
        if sleeping {
            self.velocity = Vec2::ZERO;
            return;
        }
        let Some(target) = self.target else {
            return;
        };

        let to_target = target - self.position;
        let distance = to_target.length();
        if distance > self.epsilon && self.speed * dt < distance {
            self.velocity = to_target / distance * self.speed;
            self.position += self.velocity * dt;
        } else {
            // Within epsilon, or this step would reach or pass the target.
            self.position = target;
            self.stop();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn walks_at_constant_speed() {
        let mut m = MotionController::new(Vec2::ZERO, 100.0, 2.0);
        m.move_to(Vec2::new(300.0, 0.0));
        m.update(0.5, false);
        assert_relative_eq!(m.position().x, 50.0, epsilon = 1e-4);
        assert_relative_eq!(m.velocity().length(), 100.0, epsilon = 1e-3);
    }

    #[test]
    fn snaps_once_within_epsilon() {
        let mut m = MotionController::new(Vec2::ZERO, 100.0, 2.0);
        m.move_to(Vec2::new(30.0, 40.0));
        for _ in 0..100 {
            m.update(0.01, false);
        }
        assert_eq!(m.position(), Vec2::new(30.0, 40.0));
        assert!(m.target().is_none());
        assert_eq!(m.velocity(), Vec2::ZERO);
    }

    #[test]
    fn large_step_lands_on_target() {
        let mut m = MotionController::new(Vec2::ZERO, 100.0, 2.0);
        m.move_to(Vec2::new(300.0, 0.0));
        m.update(10.0, false);
        assert_eq!(m.position(), Vec2::new(300.0, 0.0));
        assert!(!m.is_moving());

        m.move_to(Vec2::new(300.0, 150.0));
        m.update(1.0, false);
        assert!(m.is_moving());
        m.update(1.0, false);
        assert_eq!(m.position(), Vec2::new(300.0, 150.0));
        assert!(!m.is_moving());
    }

    #[test]
    fn frozen_while_sleeping() {
        let mut m = MotionController::new(Vec2::ZERO, 100.0, 2.0);
        m.move_to(Vec2::new(100.0, 0.0));
        m.update(1.0, true);
        assert_eq!(m.position(), Vec2::ZERO);
        assert!(m.target().is_some());
    }

    #[test]
    fn pin_clears_target() {
        let mut m = MotionController::new(Vec2::ZERO, 100.0, 2.0);
        m.move_to(Vec2::new(100.0, 0.0));
        m.pin(Vec2::new(5.0, 5.0));
        m.update(1.0, false);
        assert_eq!(m.position(), Vec2::new(5.0, 5.0));
    }
}
