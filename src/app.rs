use std::fs;
use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Context;
use clap::Parser;
use glam::{IVec2, Vec2};
use instant::Instant;

use catfriends::assets::procedural;
use catfriends::input::ButtonEdges;
use catfriends::{
    AccessorySlot, Assets, Cat, CatConfig, CustomizationProfile, DirAssets, DraggableItem,
    HitRegion, InitialState, MouseButton, PointerKind,
};

/// Target simulation tick rate (seconds per tick).
const TICK_RATE: f64 = 1.0 / 60.0;
/// Max accumulated time before we clamp (prevents spiral of death).
const MAX_ACCUMULATOR: f64 = 0.25;
/// Simulated time between rendered frames.
const FRAME_TIME: f64 = 1.0 / 30.0;
/// Simulated seconds between progress reports.
const REPORT_INTERVAL: f64 = 5.0;

const SCREEN_W: f32 = 800.0;
const SCREEN_H: f32 = 600.0;
const FOOD_PATH: &str = "images/items/food/001.png";

#[derive(Parser, Debug)]
#[command(name = "catfriends")]
#[command(about = "Headless virtual pet session: one cat, a scripted visit, optional snapshot", long_about = None)]
struct Args {
    /// Template directory (expects images/cats/custom/<body>/...). Uses the
    /// built-in procedural set when omitted.
    #[arg(long, value_name = "DIR")]
    assets: Option<PathBuf>,

    /// Tuning file (JSON). Missing fields keep their defaults.
    #[arg(long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Saved cat to restore (JSON). Starts a new, slightly sleepy cat when
    /// omitted.
    #[arg(long, value_name = "FILE")]
    state: Option<PathBuf>,

    /// Simulated session length in seconds.
    #[arg(long, default_value_t = 20.0)]
    seconds: f64,

    /// RNG seed for idle fidgets and blinks.
    #[arg(long)]
    seed: Option<u64>,

    /// Write the final save record here.
    #[arg(long, value_name = "FILE")]
    save: Option<PathBuf>,

    /// Write the final sprite here as PNG.
    #[arg(long, value_name = "FILE")]
    png: Option<PathBuf>,
}

// ---------------------------------------------------------------------------
// Simulation clock
// ---------------------------------------------------------------------------

/// Fixed-timestep bookkeeping: banks frame time, hands out whole ticks and
/// tracks how far simulated time has run ahead of the wall clock.
struct SimClock {
    started: Instant,
    accumulator: f64,
    ticks: u64,
    next_report: f64,
}

impl SimClock {
    fn new() -> Self {
        Self {
            started: Instant::now(),
            accumulator: 0.0,
            ticks: 0,
            next_report: REPORT_INTERVAL,
        }
    }

    /// Bank `dt` seconds of frame time and return how many ticks are due.
    fn due_ticks(&mut self, dt: f64) -> u32 {
        self.accumulator = (self.accumulator + dt).min(MAX_ACCUMULATOR);
        let mut due = 0;
        while self.accumulator >= TICK_RATE {
            self.accumulator -= TICK_RATE;
            due += 1;
        }
        self.ticks += due as u64;
        due
    }

    /// Simulated seconds covered by the ticks run so far.
    fn sim_time(&self) -> f64 {
        self.ticks as f64 * TICK_RATE
    }

    /// Simulated seconds per wall-clock second.
    fn speedup(&self) -> f64 {
        self.sim_time() / self.started.elapsed().as_secs_f64().max(1e-9)
    }

    /// True once per `REPORT_INTERVAL` of simulated time.
    fn report_due(&mut self) -> bool {
        if self.sim_time() < self.next_report {
            return false;
        }
        self.next_report += REPORT_INTERVAL;
        true
    }
}

// ---------------------------------------------------------------------------
// Script
// ---------------------------------------------------------------------------

/// One scripted action of the demo visit.
#[derive(Debug, Clone)]
enum Step {
    Walk(Vec2),
    PressOnCat(MouseButton),
    Release(MouseButton),
    GrabFood,
    CarryToCat,
    Wear(AccessorySlot, &'static str),
    Recolor(CustomizationProfile),
    GoToBed(Vec2),
}

fn script() -> Vec<(f64, Step)> {
    let bed = Vec2::new(120.0, SCREEN_H - 120.0);
    vec![
        (0.5, Step::Walk(Vec2::new(SCREEN_W * 0.65, SCREEN_H * 0.5))),
        (4.0, Step::PressOnCat(MouseButton::Left)),
        (5.5, Step::Release(MouseButton::Left)),
        (6.0, Step::GrabFood),
        (6.5, Step::CarryToCat),
        (7.0, Step::Release(MouseButton::Left)),
        (8.0, Step::Wear(AccessorySlot::Head, "hat1")),
        (8.2, Step::Wear(AccessorySlot::Extra, "bow1")),
        (
            9.0,
            Step::Recolor(CustomizationProfile {
                base_color: [90, 90, 100],
                pattern_color: Some([40, 40, 45]),
                eye_color: [120, 200, 80],
                ..CustomizationProfile::default()
            }),
        ),
        (10.0, Step::GoToBed(bed)),
        (13.0, Step::PressOnCat(MouseButton::Right)),
        (13.1, Step::Release(MouseButton::Right)),
        (13.5, Step::PressOnCat(MouseButton::Right)),
        (13.6, Step::Release(MouseButton::Right)),
    ]
}

/// Pointer state the script drives; turned into events by edge polling.
#[derive(Debug, Default)]
struct Mouse {
    pos: Vec2,
    left: bool,
    right: bool,
}

impl Mouse {
    fn set(&mut self, button: MouseButton, down: bool) {
        match button {
            MouseButton::Left => self.left = down,
            MouseButton::Right => self.right = down,
            MouseButton::Middle => {}
        }
    }
}

/// Center of some opaque pixel of `region`, if it has any.
fn solid_point(region: &HitRegion) -> Option<Vec2> {
    let r = region.rect;
    (0..r.h as i32)
        .flat_map(|y| (0..r.w as i32).map(move |x| IVec2::new(x, y)))
        .find(|p| region.mask.get(p.x, p.y))
        .map(|p| (r.top_left() + p).as_vec2() + Vec2::splat(0.5))
}

// ---------------------------------------------------------------------------
// Session
// ---------------------------------------------------------------------------

struct Session {
    cat: Cat,
    food: DraggableItem,
    assets: Assets,
    mouse: Mouse,
    edges: ButtonEdges,
    steps: Vec<(f64, Step)>,
    next_step: usize,
    clock: SimClock,
}

impl Session {
    fn apply(&mut self, step: Step) {
        log::debug!("t={:.2}s {step:?}", self.clock.sim_time());
        match step {
            Step::Walk(to) => self.cat.move_to(to.x, to.y),
            Step::PressOnCat(button) => match solid_point(self.cat.hit_region()) {
                Some(p) => {
                    self.mouse.pos = p;
                    self.mouse.set(button, true);
                }
                None => log::warn!("cat sprite has no opaque pixel to press"),
            },
            Step::Release(button) => self.mouse.set(button, false),
            Step::GrabFood => {
                if let Some(p) = solid_point(self.food.hit_region()) {
                    self.mouse.pos = p;
                    self.mouse.left = true;
                }
            }
            Step::CarryToCat => self.mouse.pos = self.cat.position(),
            Step::Wear(slot, item) => {
                self.cat.equip(slot, item, &mut self.assets);
            }
            Step::Recolor(profile) => {
                if let Err(e) = self.cat.update_customization(profile, &mut self.assets) {
                    log::warn!("customization rejected: {e}");
                }
            }
            Step::GoToBed(bed) => {
                if !self.cat.start_sleeping(bed.x, bed.y) {
                    log::info!("cat stays up (energy {:.1})", self.cat.energy());
                }
            }
        }
    }

    fn handle_events(&mut self) {
        let events = self
            .edges
            .poll(self.mouse.left, self.mouse.right, false, self.mouse.pos);
        for ev in events {
            let on_food = ev.button == MouseButton::Left
                && (self.food.is_dragging()
                    || (ev.kind == PointerKind::Down && self.food.start_drag(ev.pos)));
            if on_food {
                if ev.kind == PointerKind::Up {
                    self.drop_food();
                }
                continue;
            }
            let reaction = self.cat.handle_pointer(&ev);
            log::debug!("{:?} {:?} -> {reaction:?}", ev.kind, ev.button);
        }

        if self.food.is_dragging() {
            self.food.drag_to(self.mouse.pos);
            let hover = self.food.overlaps(self.cat.hit_region());
            self.cat.set_food_hover(hover);
        }
    }

    fn drop_food(&mut self) {
        if self.food.overlaps(self.cat.hit_region()) {
            self.cat.feed();
        } else {
            log::info!("food dropped away from the cat");
        }
        self.food.stop_drag();
        self.food.reset_position();
        self.cat.set_food_hover(false);
    }

    fn frame(&mut self) {
        while let Some((at, step)) = self.steps.get(self.next_step).cloned() {
            if at > self.clock.sim_time() {
                break;
            }
            self.next_step += 1;
            self.apply(step);
        }
        self.handle_events();

        for _ in 0..self.clock.due_ticks(FRAME_TIME) {
            self.cat.update(TICK_RATE as f32);
        }

        if self.clock.report_due() {
            let cat = &self.cat;
            log::info!(
                "t={:.1}s | {} ticks | {:.0}x realtime | hunger {:.1} happiness {:.1} energy {:.1} | {:?}, {:?} clip",
                self.clock.sim_time(),
                self.clock.ticks,
                self.clock.speedup(),
                cat.hunger(),
                cat.happiness(),
                cat.energy(),
                cat.activity(),
                cat.clip(),
            );
        }
    }
}

// ---------------------------------------------------------------------------
// Entry
// ---------------------------------------------------------------------------

fn default_state() -> InitialState {
    InitialState {
        hunger: Some(40.0),
        energy: Some(45.0),
        ..InitialState::default()
    }
}

pub fn run() -> anyhow::Result<()> {
    let args = Args::parse();

    let config = match &args.config {
        Some(path) => CatConfig::load(path),
        None => CatConfig::default(),
    };

    let initial = match &args.state {
        Some(path) => {
            let text = fs::read_to_string(path)
                .with_context(|| format!("reading state {}", path.display()))?;
            InitialState::from_json(&text)
                .with_context(|| format!("parsing state {}", path.display()))?
        }
        None => default_state(),
    };

    let mut assets = match &args.assets {
        Some(dir) => Assets::new(DirAssets::new(dir)),
        None => {
            let body = initial.customization().body_type;
            log::info!("no asset directory given, painting '{body}' templates");
            Assets::new(procedural::cat_assets(&body))
        }
    };

    let rng = args.seed.map_or_else(fastrand::Rng::new, fastrand::Rng::with_seed);
    let center = Vec2::new(SCREEN_W / 2.0, SCREEN_H / 2.0);
    let cat = Cat::new(&initial, center, config, &mut assets, rng).context("creating cat")?;

    let food_img = match assets.load(FOOD_PATH, None) {
        Ok(img) => img,
        Err(e) => {
            log::warn!("{e}, using the built-in food sprite");
            Arc::new(procedural::food())
        }
    };
    let food = DraggableItem::new(food_img, IVec2::new(40, 40));

    let mut session = Session {
        cat,
        food,
        assets,
        mouse: Mouse::default(),
        edges: ButtonEdges::new(),
        steps: script(),
        next_step: 0,
        clock: SimClock::new(),
    };

    let frames = (args.seconds.max(0.0) / FRAME_TIME).ceil() as u64;
    log::info!("simulating {:.1}s ({frames} frames)", args.seconds);

    for _ in 0..frames {
        session.frame();
    }

    let cat = &session.cat;
    log::info!(
        "done after {} ticks ({:.0}x realtime): hunger {:.1}, happiness {:.1}, energy {:.1}, {:?}, {} cached images",
        session.clock.ticks,
        session.clock.speedup(),
        cat.hunger(),
        cat.happiness(),
        cat.energy(),
        cat.activity(),
        session.assets.cached_images(),
    );

    if let Some(path) = &args.save {
        let json = cat.to_record().to_json()?;
        fs::write(path, json).with_context(|| format!("writing {}", path.display()))?;
        log::info!("saved record to {}", path.display());
    }
    if let Some(path) = &args.png {
        cat.image()
            .save(path)
            .with_context(|| format!("writing {}", path.display()))?;
        log::info!("saved sprite to {}", path.display());
    }

    Ok(())
}


#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn frames_bank_two_ticks_each() {
        let mut clock = SimClock::new();
        let ticks: u32 = (0..300).map(|_| clock.due_ticks(FRAME_TIME)).sum();
        assert!((599..=600).contains(&ticks), "ticks={ticks}");
        assert!((clock.sim_time() - 10.0).abs() < 0.02);
    }

    #[test]
    fn long_stall_is_clamped() {
        let mut clock = SimClock::new();
        let due = clock.due_ticks(10.0);
        assert!((14..=15).contains(&due), "due={due}");
    }

    #[test]
    fn reports_once_per_interval() {
        let mut clock = SimClock::new();
        let mut reports = 0;
        for _ in 0..(12.0 / FRAME_TIME) as usize {
            clock.due_ticks(FRAME_TIME);
            if clock.report_due() {
                reports += 1;
            }
        }
        assert_eq!(reports, 2);
    }

    #[test]
    fn script_runs_in_time_order() {
        let steps = script();
        assert!(steps.windows(2).all(|w| w[0].0 <= w[1].0));
    }
}
