pub mod accessory;
pub mod animation;
pub mod interaction;
pub mod motion;
pub mod record;
pub mod stats;

use std::sync::Arc;

use glam::Vec2;
use image::RgbaImage;

use crate::assets::Assets;
use crate::config::CatConfig;
use crate::error::CatError;
use crate::input::PointerEvent;
use crate::render::customization::CustomizationProfile;
use crate::render::layers::LayerSet;
use crate::render::{Composite, Compositor, PoseFlags};
use crate::spatial::{HitRegion, Mask, Rect};

use accessory::{Accessories, AccessoryPlacement, AccessorySlot};
use animation::FrameAnimator;
use interaction::{Activity, InteractionTracker, PointerReaction};
use motion::MotionController;
use record::{InitialState, SaveRecord};
use stats::{StatBlock, StatRegulator};

type Clip = FrameAnimator<Arc<RgbaImage>>;

/// Which animation is driving the base frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClipKind {
    /// Held still except during idle fidget bursts.
    Idle,
    /// One round trip after being fed.
    Eat,
    /// One round trip when petting starts.
    Pet,
}

/// The three clips built from a template set.
struct Clips {
    idle: Clip,
    eat: Clip,
    pet: Clip,
}

impl Clips {
    fn new(layers: &LayerSet, frame_duration: f32) -> Self {
        let mut idle = FrameAnimator::new(layers.idle.clone(), frame_duration, false, true);
        idle.pause();
        let mut eat = FrameAnimator::new(layers.eat.clone(), frame_duration, false, true);
        eat.pause();
        let mut pet = FrameAnimator::new(layers.pet.clone(), frame_duration, false, true);
        pet.pause();
        Self { idle, eat, pet }
    }

    fn get(&self, kind: ClipKind) -> &Clip {
        match kind {
            ClipKind::Idle => &self.idle,
            ClipKind::Eat => &self.eat,
            ClipKind::Pet => &self.pet,
        }
    }

    fn get_mut(&mut self, kind: ClipKind) -> &mut Clip {
        match kind {
            ClipKind::Idle => &mut self.idle,
            ClipKind::Eat => &mut self.eat,
            ClipKind::Pet => &mut self.pet,
        }
    }
}

/// The pet. Owns its stats, motion, interaction state, clips and sprite, and
/// advances all of them in a fixed order once per `update`.
pub struct Cat {
    id: String,
    config: CatConfig,

    stats: StatRegulator,
    motion: MotionController,
    tracker: InteractionTracker,
    compositor: Compositor,
    clips: Clips,
    clip: ClipKind,
    accessories: Accessories,

    sleeping: bool,
    bed: Option<Vec2>,

    composite: Composite,
    hit: HitRegion,
}

impl Cat {
    /// Build a cat and run its first composite so the hit region is valid
    /// from the start. Fails when the body type has no idle frames.
    pub fn new(
        initial: &InitialState,
        position: Vec2,
        config: CatConfig,
        assets: &mut Assets,
        rng: fastrand::Rng,
    ) -> Result<Self, CatError> {
        let config = config.sanitized();
        let profile = initial.customization();
        profile.validate()?;

        let layers = assets.layer_set(&profile.body_type)?;
        let clips = Clips::new(&layers, config.frame_duration);
        let mut compositor = Compositor::new(layers, profile, config.scale);

        let stats = StatRegulator::new(
            StatBlock {
                hunger: initial.hunger(),
                happiness: initial.happiness(),
                energy: initial.energy(),
            },
            config.stats,
        );

        let sleeping = initial.is_sleeping();
        let accessories = match &initial.accessories {
            Some(ids) => Accessories::from_ids(ids, config.scale, assets),
            None => Accessories::default(),
        };

        let tracker = InteractionTracker::new(rng, config.timers, config.pokes_to_wake);
        let motion = MotionController::new(position, config.movement_speed, config.arrival_epsilon);

        let first = clips.idle.current().cloned().unwrap_or_else(|| Arc::clone(&compositor.layers().idle[0]));
        let composite = compositor.compose(
            &first,
            PoseFlags {
                sleeping,
                ..PoseFlags::default()
            },
        );
        let hit = HitRegion::centered(&composite.scaled, position);

        let cat = Self {
            id: initial.cat_id(),
            config,
            stats,
            motion,
            tracker,
            compositor,
            clips,
            clip: ClipKind::Idle,
            accessories,
            sleeping,
            bed: sleeping.then_some(position),
            composite,
            hit,
        };
        log::info!(
            "cat '{}' ready ({}; hunger {:.1}, happiness {:.1}, energy {:.1}{})",
            cat.id,
            cat.compositor.profile().body_type,
            cat.hunger(),
            cat.happiness(),
            cat.energy(),
            if sleeping { ", asleep" } else { "" }
        );
        Ok(cat)
    }

    // -----------------------------------------------------------------------
    // Tick
    // -----------------------------------------------------------------------

    /// Advance everything by `dt` seconds.
    pub fn update(&mut self, dt: f32) {
        let dt = dt.max(0.0);

        // 1. Stats
        self.stats.update(dt, self.sleeping, self.tracker.is_petted());

        // 2. Sleep/wake transitions driven by energy
        self.apply_energy_transitions();

        // 3. Motion
        self.motion.update(dt, self.sleeping);

        // 4. Idle fidgets and blinking, gated by activity
        let activity = self.activity();
        self.tracker.update(dt, activity, &mut self.clips.idle);

        // 5. Animation (frozen pose while asleep)
        if !self.sleeping {
            self.advance_clip(dt);
        }

        // 6. Sprite + hit region
        self.recompose();
    }

    fn apply_energy_transitions(&mut self) {
        if !self.sleeping && self.stats.is_exhausted() {
            let bed = self.bed.unwrap_or_else(|| self.motion.position());
            log::info!("cat '{}' is exhausted, falling asleep", self.id);
            self.enter_sleep(bed);
        } else if self.sleeping && self.stats.is_fully_rested() {
            log::info!("cat '{}' is fully rested, waking up", self.id);
            self.leave_sleep();
        }
    }

    fn advance_clip(&mut self, dt: f32) {
        let kind = self.clip;
        let anim = self.clips.get_mut(kind);
        anim.advance(dt);
        if kind != ClipKind::Idle && anim.is_finished() {
            log::debug!("{kind:?} clip done, back to idle");
            self.clip = ClipKind::Idle;
        }
    }

    fn current_frame(&self) -> Arc<RgbaImage> {
        self.clips
            .get(self.clip)
            .current()
            .or_else(|| self.clips.idle.current())
            .cloned()
            .unwrap_or_else(|| Arc::clone(&self.compositor.layers().idle[0]))
    }

    fn recompose(&mut self) {
        let frame = self.current_frame();
        let flags = PoseFlags {
            blinking: self.tracker.is_blinking(),
            petted: self.tracker.is_petted(),
            food_hover: self.tracker.is_food_hovered(),
            sleeping: self.sleeping,
        };
        self.composite = self.compositor.compose(&frame, flags);
        self.hit = HitRegion::centered(&self.composite.scaled, self.motion.position());
    }

    // -----------------------------------------------------------------------
    // Sleep
    // -----------------------------------------------------------------------

    fn enter_sleep(&mut self, bed: Vec2) {
        self.sleeping = true;
        self.motion.pin(bed);
        self.tracker.disarm(&mut self.clips.idle);
        self.tracker.reset_pokes();
        self.stop_event_clip();
        self.hit.recenter(bed);
    }

    fn leave_sleep(&mut self) {
        self.sleeping = false;
        self.tracker.reset_pokes();
        self.clips.idle.reset();
        self.clips.idle.pause();
    }

    /// Remember where the cat's bed is. Exhaustion sends it there.
    pub fn set_bed(&mut self, x: f32, y: f32) {
        self.bed = Some(Vec2::new(x, y));
    }

    /// Put the cat to bed at (`x`, `y`). Only a tired cat agrees; the bed
    /// location is remembered either way.
    pub fn start_sleeping(&mut self, x: f32, y: f32) -> bool {
        self.set_bed(x, y);
        if self.sleeping {
            return false;
        }
        if !self.stats.is_tired() {
            log::info!(
                "cat '{}' is not tired (energy {:.1}), refusing to sleep",
                self.id,
                self.energy()
            );
            return false;
        }
        log::info!("cat '{}' goes to sleep at ({x:.0}, {y:.0})", self.id);
        self.enter_sleep(Vec2::new(x, y));
        true
    }

    /// Wake the cat. Without `force` only a fully rested cat wakes; a forced
    /// wake before that costs happiness. Returns whether it woke.
    pub fn wake_up(&mut self, force: bool) -> bool {
        if !self.sleeping {
            return false;
        }
        if self.stats.is_fully_rested() {
            self.leave_sleep();
            return true;
        }
        if !force {
            return false;
        }
        self.stats.apply_wake_up_penalty();
        log::info!(
            "cat '{}' woken early, happiness now {:.1}",
            self.id,
            self.happiness()
        );
        self.leave_sleep();
        true
    }

    // -----------------------------------------------------------------------
    // Commands
    // -----------------------------------------------------------------------

    /// Feed a pointer event. Petting starts the pet clip; enough pokes wake
    /// a sleeping cat.
    pub fn handle_pointer(&mut self, ev: &PointerEvent) -> PointerReaction {
        let reaction = self.tracker.handle_pointer(ev, &self.hit, self.sleeping);
        match reaction {
            PointerReaction::PetStarted if !self.sleeping => {
                self.play_clip(ClipKind::Pet);
            }
            PointerReaction::Poked { count, needed } => {
                log::debug!("poke {count}/{needed}");
            }
            PointerReaction::WakeRequested => {
                self.wake_up(true);
            }
            _ => {}
        }
        reaction
    }

    pub fn feed(&mut self) {
        self.stats.feed();
        if !self.sleeping {
            self.play_clip(ClipKind::Eat);
        }
    }

    pub fn set_food_hover(&mut self, hovering: bool) {
        self.tracker.set_food_hover(hovering);
    }

    /// Walk toward (`x`, `y`). Ignored while asleep.
    pub fn move_to(&mut self, x: f32, y: f32) {
        if self.sleeping {
            log::debug!("cat '{}' is asleep, ignoring move", self.id);
            return;
        }
        self.motion.move_to(Vec2::new(x, y));
    }

    /// Teleport. Ignored while asleep (the cat stays in bed).
    pub fn set_position(&mut self, x: f32, y: f32) {
        if self.sleeping {
            log::debug!("cat '{}' is asleep, ignoring reposition", self.id);
            return;
        }
        let pos = Vec2::new(x, y);
        self.motion.set_position(pos);
        self.hit.recenter(pos);
    }

    /// Switch the base animation. Event clips play one round trip and hand
    /// back to idle; a clip with no frames keeps the idle clip.
    pub fn play_clip(&mut self, kind: ClipKind) -> bool {
        if kind == ClipKind::Idle {
            self.stop_event_clip();
            return true;
        }
        let anim = self.clips.get_mut(kind);
        if anim.frame_count() == 0 {
            log::warn!(
                "no {kind:?} frames for body '{}', staying idle",
                self.compositor.profile().body_type
            );
            return false;
        }
        anim.play_once();
        self.clip = kind;
        true
    }

    fn stop_event_clip(&mut self) {
        if self.clip != ClipKind::Idle {
            self.clips.get_mut(self.clip).pause();
            self.clip = ClipKind::Idle;
        }
    }

    /// Replace the appearance. An invalid profile is rejected; a body type
    /// with no templates keeps the current body and applies the colours.
    pub fn update_customization(
        &mut self,
        mut profile: CustomizationProfile,
        assets: &mut Assets,
    ) -> Result<(), CatError> {
        profile.validate()?;

        let current_body = self.compositor.profile().body_type.clone();
        if profile.body_type != current_body {
            match assets.layer_set(&profile.body_type) {
                Ok(layers) => {
                    self.tracker.disarm(&mut self.clips.idle);
                    self.clips = Clips::new(&layers, self.config.frame_duration);
                    self.clip = ClipKind::Idle;
                    self.compositor.set_layers(layers);
                }
                Err(e) => {
                    log::warn!(
                        "body type '{}' unavailable ({e}), keeping '{current_body}'",
                        profile.body_type
                    );
                    profile.body_type = current_body;
                }
            }
        }

        self.compositor.set_profile(profile);
        self.recompose();
        Ok(())
    }

    /// Change the sprite scale; worn accessories are re-resolved to match.
    pub fn set_scale(&mut self, scale: f32, assets: &mut Assets) {
        if !scale.is_finite() || scale <= 0.0 {
            log::warn!("ignoring non-positive scale {scale}");
            return;
        }
        self.config.scale = scale;
        self.compositor.set_scale(scale);
        self.accessories.rescale(scale, assets);
        self.recompose();
    }

    pub fn equip(&mut self, slot: AccessorySlot, item: &str, assets: &mut Assets) -> bool {
        self.accessories.equip(slot, item, self.config.scale, assets)
    }

    pub fn unequip(&mut self, slot: AccessorySlot) {
        self.accessories.unequip(slot);
    }

    /// Pixel-perfect overlap with another cat, a draggable item, or any
    /// other hit region.
    pub fn collides_with(&self, other: &HitRegion) -> bool {
        self.hit.collides(other)
    }

    /// Snapshot for saving.
    pub fn to_record(&self) -> SaveRecord {
        let s = self.stats.stats();
        SaveRecord {
            cat_id: self.id.clone(),
            hunger: s.hunger,
            happiness: s.happiness,
            energy: s.energy,
            accessories: self.accessories.ids(),
            customization: self.compositor.profile().clone(),
            is_sleeping: self.sleeping,
        }
    }

    // -----------------------------------------------------------------------
    // Queries
    // -----------------------------------------------------------------------

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn config(&self) -> &CatConfig {
        &self.config
    }

    pub fn activity(&self) -> Activity {
        if self.sleeping {
            Activity::Sleeping
        } else if self.motion.is_moving() {
            Activity::Moving
        } else {
            Activity::Idle
        }
    }

    pub fn clip(&self) -> ClipKind {
        self.clip
    }

    pub fn is_sleeping(&self) -> bool {
        self.sleeping
    }

    pub fn is_petted(&self) -> bool {
        self.tracker.is_petted()
    }

    pub fn is_blinking(&self) -> bool {
        self.tracker.is_blinking()
    }

    /// An idle fidget burst is playing on the idle clip.
    pub fn is_fidgeting(&self) -> bool {
        self.tracker.is_idle_burst()
    }

    pub fn pokes(&self) -> u32 {
        self.tracker.pokes()
    }

    pub fn bed(&self) -> Option<Vec2> {
        self.bed
    }

    pub fn position(&self) -> Vec2 {
        self.motion.position()
    }

    pub fn target(&self) -> Option<Vec2> {
        self.motion.target()
    }

    pub fn stats(&self) -> StatBlock {
        self.stats.stats()
    }

    pub fn hunger(&self) -> f32 {
        self.stats.stats().hunger
    }

    pub fn happiness(&self) -> f32 {
        self.stats.stats().happiness
    }

    pub fn energy(&self) -> f32 {
        self.stats.stats().energy
    }

    pub fn max_stat(&self) -> f32 {
        self.stats.max()
    }

    pub fn is_tired(&self) -> bool {
        self.stats.is_tired()
    }

    pub fn customization(&self) -> &CustomizationProfile {
        self.compositor.profile()
    }

    /// The on-screen sprite (scaled).
    pub fn image(&self) -> &Arc<RgbaImage> {
        &self.composite.scaled
    }

    /// The unscaled composite.
    pub fn full_image(&self) -> &Arc<RgbaImage> {
        &self.composite.full
    }

    pub fn hit_region(&self) -> &HitRegion {
        &self.hit
    }

    pub fn rect(&self) -> Rect {
        self.hit.rect
    }

    pub fn mask(&self) -> &Mask {
        &self.hit.mask
    }

    pub fn accessories(&self) -> &Accessories {
        &self.accessories
    }

    /// Where to draw each worn accessory this frame.
    pub fn accessory_placements(&self) -> Vec<AccessoryPlacement<'_>> {
        self.accessories.placements(&self.hit.rect, self.config.scale)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::assets::procedural;
    use crate::input::MouseButton;
    use approx::assert_relative_eq;

    fn assets() -> Assets {
        Assets::new(procedural::cat_assets("shorthair"))
    }

    fn cat_with(initial: InitialState, assets: &mut Assets) -> Cat {
        Cat::new(
            &initial,
            Vec2::new(200.0, 200.0),
            CatConfig::default(),
            assets,
            fastrand::Rng::with_seed(7),
        )
        .unwrap()
    }

    fn cat() -> Cat {
        cat_with(InitialState::default(), &mut assets())
    }

    /// A screen point over an opaque pixel of the cat.
    fn solid_point(cat: &Cat) -> Vec2 {
        let r = cat.rect();
        for y in 0..r.h as i32 {
            for x in 0..r.w as i32 {
                if cat.mask().get(x, y) {
                    return Vec2::new((r.x + x) as f32 + 0.5, (r.y + y) as f32 + 0.5);
                }
            }
        }
        panic!("cat sprite is fully transparent");
    }

    #[test]
    fn hit_region_exists_after_construction() {
        let c = cat();
        assert_eq!(c.rect().center().as_vec2(), Vec2::new(200.0, 200.0));
        assert_eq!(c.rect().w, c.image().width());
        assert!(c.mask().count() > 0);
        assert_eq!(c.image().width(), procedural::SPRITE_SIZE / 2);
    }

    #[test]
    fn unknown_body_fails_construction() {
        let init = InitialState {
            customization: Some(CustomizationProfile {
                body_type: "sphynx".into(),
                ..CustomizationProfile::default()
            }),
            ..InitialState::default()
        };
        let res = Cat::new(
            &init,
            Vec2::ZERO,
            CatConfig::default(),
            &mut assets(),
            fastrand::Rng::with_seed(1),
        );
        assert!(matches!(res, Err(CatError::NoBaseFrames { .. })));
    }

    #[test]
    fn moving_recenters_hit_region() {
        let mut c = cat();
        c.move_to(300.0, 200.0);
        assert_eq!(c.activity(), Activity::Moving);
        c.update(0.5);
        assert_relative_eq!(c.position().x, 250.0, epsilon = 1e-3);
        assert_eq!(c.rect().center().x, 250);
        for _ in 0..100 {
            c.update(0.1);
        }
        assert_eq!(c.position(), Vec2::new(300.0, 200.0));
        assert_eq!(c.activity(), Activity::Idle);
    }

    #[test]
    fn voluntary_sleep_needs_tiredness() {
        let mut c = cat();
        assert!(!c.start_sleeping(50.0, 60.0));
        assert!(!c.is_sleeping());
        assert_eq!(c.bed(), Some(Vec2::new(50.0, 60.0)));

        let mut a = assets();
        let mut tired = cat_with(
            InitialState { energy: Some(30.0), ..InitialState::default() },
            &mut a,
        );
        tired.move_to(400.0, 400.0);
        assert!(tired.start_sleeping(50.0, 60.0));
        assert_eq!(tired.position(), Vec2::new(50.0, 60.0));
        assert!(tired.target().is_none());
        assert_eq!(tired.activity(), Activity::Sleeping);
    }

    #[test]
    fn sleeping_suppresses_motion_and_fidgets() {
        let mut a = assets();
        let mut c = cat_with(
            InitialState { energy: Some(10.0), ..InitialState::default() },
            &mut a,
        );
        assert!(c.start_sleeping(100.0, 100.0));
        c.move_to(500.0, 500.0);
        c.set_position(0.0, 0.0);

        let mut last = c.energy();
        for _ in 0..200 {
            c.update(0.1);
            assert!(c.energy() > last);
            last = c.energy();
            assert_eq!(c.position(), Vec2::new(100.0, 100.0));
            assert!(!c.is_blinking());
        }
        assert!(c.is_sleeping());
    }

    #[test]
    fn sleep_sprite_differs_from_awake() {
        let mut a = assets();
        let mut c = cat_with(
            InitialState { energy: Some(10.0), ..InitialState::default() },
            &mut a,
        );
        let awake = Arc::clone(c.full_image());
        c.start_sleeping(200.0, 200.0);
        c.update(0.016);
        assert_ne!(**c.full_image(), *awake);
    }

    #[test]
    fn forced_wake_costs_happiness() {
        let mut a = assets();
        let mut c = cat_with(
            InitialState { energy: Some(10.0), happiness: Some(50.0), ..InitialState::default() },
            &mut a,
        );
        c.start_sleeping(200.0, 200.0);
        assert!(!c.wake_up(false));
        assert!(c.wake_up(true));
        assert!(!c.is_sleeping());
        assert_relative_eq!(c.happiness(), 40.0);
    }

    #[test]
    fn two_pokes_wake_the_cat() {
        let mut a = assets();
        let mut c = cat_with(
            InitialState { energy: Some(10.0), happiness: Some(50.0), ..InitialState::default() },
            &mut a,
        );
        c.start_sleeping(200.0, 200.0);
        c.update(0.016);
        let p = solid_point(&c);

        let first = c.handle_pointer(&PointerEvent::down(MouseButton::Right, p));
        assert_eq!(first, PointerReaction::Poked { count: 1, needed: 2 });
        assert!(c.is_sleeping());

        let second = c.handle_pointer(&PointerEvent::down(MouseButton::Right, p));
        assert_eq!(second, PointerReaction::WakeRequested);
        assert!(!c.is_sleeping());
        assert!(c.happiness() < 41.0);
    }

    #[test]
    fn petting_raises_happiness_and_plays_pet_clip() {
        let mut c = cat();
        let p = solid_point(&c);
        let before = c.happiness();
        assert_eq!(
            c.handle_pointer(&PointerEvent::down(MouseButton::Left, p)),
            PointerReaction::PetStarted
        );
        assert_eq!(c.clip(), ClipKind::Pet);
        c.update(1.0);
        assert!(c.happiness() > before + 10.0);
        c.handle_pointer(&PointerEvent::up(MouseButton::Left, p));
        assert!(!c.is_petted());
        c.update(1.0);
        assert_eq!(c.clip(), ClipKind::Idle);
    }

    #[test]
    fn clicking_transparent_corner_does_not_pet() {
        let mut c = cat();
        let r = c.rect();
        let corner = Vec2::new(r.x as f32 + 0.5, r.y as f32 + 0.5);
        assert!(r.contains(corner));
        assert!(!c.mask().get(0, 0));
        assert_eq!(
            c.handle_pointer(&PointerEvent::down(MouseButton::Left, corner)),
            PointerReaction::Ignored
        );
    }

    #[test]
    fn feeding_plays_eat_clip() {
        let mut c = cat();
        c.feed();
        assert_eq!(c.clip(), ClipKind::Eat);
        c.update(1.0);
        assert_eq!(c.clip(), ClipKind::Idle);
    }

    #[test]
    fn missing_clip_stays_idle() {
        let mut mem = procedural::cat_assets("shorthair");
        mem.remove("images/cats/custom/shorthair/base/pet/001.png");
        mem.remove("images/cats/custom/shorthair/base/pet/002.png");
        mem.remove("images/cats/custom/shorthair/base/pet/003.png");
        let mut a = Assets::new(mem);
        let mut c = cat_with(InitialState::default(), &mut a);
        assert!(!c.play_clip(ClipKind::Pet));
        assert_eq!(c.clip(), ClipKind::Idle);
        c.update(0.1);
    }

    #[test]
    fn single_frame_pet_clip_hands_back_to_idle() {
        let mut mem = procedural::cat_assets("shorthair");
        mem.remove("images/cats/custom/shorthair/base/pet/002.png");
        mem.remove("images/cats/custom/shorthair/base/pet/003.png");
        let mut a = Assets::new(mem);
        let mut c = cat_with(InitialState::default(), &mut a);
        let p = solid_point(&c);
        c.handle_pointer(&PointerEvent::down(MouseButton::Left, p));
        assert_eq!(c.clip(), ClipKind::Pet);
        for _ in 0..60 {
            c.update(1.0 / 60.0);
        }
        assert_eq!(c.clip(), ClipKind::Idle);
    }

    #[test]
    fn body_switch_mid_fidget_keeps_fidgets_coming() {
        let mut mem = procedural::cat_assets("shorthair");
        procedural::add_body(&mut mem, "longhair");
        let mut a = Assets::new(mem);
        let mut c = cat_with(InitialState::default(), &mut a);

        let mut waited = 0.0;
        while !c.is_fidgeting() && waited < 10.0 {
            c.update(0.05);
            waited += 0.05;
        }
        assert!(c.is_fidgeting(), "no fidget within 10s");

        c.update_customization(
            CustomizationProfile {
                body_type: "longhair".into(),
                ..CustomizationProfile::default()
            },
            &mut a,
        )
        .unwrap();
        assert!(!c.is_fidgeting());

        let mut fidget_ticks = 0;
        for _ in 0..60 * 60 {
            c.update(1.0 / 60.0);
            if c.is_fidgeting() {
                fidget_ticks += 1;
            }
        }
        assert!(fidget_ticks > 0);
    }

    #[test]
    fn customization_falls_back_to_current_body() {
        let mut a = assets();
        let mut c = cat_with(InitialState::default(), &mut a);
        let before = Arc::clone(c.full_image());
        c.update_customization(
            CustomizationProfile {
                body_type: "sphynx".into(),
                base_color: [20, 20, 20],
                ..CustomizationProfile::default()
            },
            &mut a,
        )
        .unwrap();
        assert_eq!(c.customization().body_type, "shorthair");
        assert_eq!(c.customization().base_color, [20, 20, 20]);
        assert_ne!(**c.full_image(), *before);

        let bad = CustomizationProfile {
            body_type: "Not Valid".into(),
            ..CustomizationProfile::default()
        };
        assert!(c.update_customization(bad, &mut a).is_err());
    }

    #[test]
    fn other_body_type_switches_templates() {
        let mut mem = procedural::cat_assets("shorthair");
        procedural::add_body(&mut mem, "longhair");
        let mut a = Assets::new(mem);
        let mut c = cat_with(InitialState::default(), &mut a);
        c.update_customization(
            CustomizationProfile {
                body_type: "longhair".into(),
                ..CustomizationProfile::default()
            },
            &mut a,
        )
        .unwrap();
        assert_eq!(c.customization().body_type, "longhair");
    }

    #[test]
    fn accessories_round_trip_through_record() {
        let mut a = assets();
        let mut c = cat_with(InitialState::default(), &mut a);
        assert!(c.equip(AccessorySlot::Head, "hat1", &mut a));
        assert!(!c.equip(AccessorySlot::Extra, "tiara", &mut a));
        assert_eq!(c.accessory_placements().len(), 1);

        let rec = c.to_record();
        assert_eq!(rec.accessories.len(), 1);
        let restored = cat_with(rec.clone().into(), &mut a);
        assert_eq!(restored.to_record(), rec);
    }

    #[test]
    fn set_scale_resizes_sprite() {
        let mut a = assets();
        let mut c = cat_with(InitialState::default(), &mut a);
        c.set_scale(1.0, &mut a);
        assert_eq!(c.image().width(), procedural::SPRITE_SIZE);
        assert!(Arc::ptr_eq(c.image(), c.full_image()));
    }

    #[test]
    fn collides_with_overlapping_cat() {
        let mut a = assets();
        let c = cat_with(InitialState::default(), &mut a);
        let mut other = cat_with(InitialState::default(), &mut a);
        assert!(c.collides_with(other.hit_region()));
        other.set_position(1_000.0, 1_000.0);
        assert!(!c.collides_with(other.hit_region()));
    }
}
