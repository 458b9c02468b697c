use crate::config::StatRates;

/// Hunger, happiness and energy, each kept in `[0, max]`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StatBlock {
    pub hunger: f32,
    pub happiness: f32,
    pub energy: f32,
}

/// Time-based decay/replenish of the three stats plus the discrete events
/// that touch them.
#[derive(Debug, Clone)]
pub struct StatRegulator {
    stats: StatBlock,
    rates: StatRates,
}

impl StatRegulator {
    pub fn new(initial: StatBlock, rates: StatRates) -> Self {
        let mut reg = Self { stats: initial, rates };
        let before = reg.stats;
        reg.clamp();
        if before != reg.stats {
            log::warn!("restored stats out of range, clamped {before:?} -> {:?}", reg.stats);
        }
        reg
    }

    pub fn stats(&self) -> StatBlock {
        self.stats
    }

    pub fn max(&self) -> f32 {
        self.rates.max
    }

    pub fn update(&mut self, dt: f32, sleeping: bool, petted: bool) {
        let r = &self.rates;
        self.stats.hunger -= r.hunger_decay * dt;
        self.stats.happiness -= r.happiness_decay * dt;

        if sleeping {
            self.stats.energy += r.energy_replenish * dt;
        } else {
            self.stats.energy -= r.energy_decay * dt;
        }

        if petted {
            self.stats.happiness += r.happiness_increase * dt;
        }

        self.clamp();
    }

    pub fn feed(&mut self) {
        self.stats.hunger += self.rates.food_replenish;
        self.clamp();
        log::info!("cat fed, hunger now {:.1}", self.stats.hunger);
    }

    /// Only for a forced wake before the cat is fully rested.
    pub fn apply_wake_up_penalty(&mut self) {
        self.stats.happiness -= self.rates.wake_up_penalty;
        self.clamp();
    }

    /// Out of energy: sleep is forced.
    pub fn is_exhausted(&self) -> bool {
        self.stats.energy <= 0.0
    }

    /// Below half energy: the cat may be put to bed.
    pub fn is_tired(&self) -> bool {
        self.stats.energy < self.rates.max / 2.0
    }

    /// Full energy: a sleeping cat wakes by itself.
    pub fn is_fully_rested(&self) -> bool {
        self.stats.energy >= self.rates.max
    }

    fn clamp(&mut self) {
        let max = self.rates.max;
        self.stats.hunger = self.stats.hunger.clamp(0.0, max);
        self.stats.happiness = self.stats.happiness.clamp(0.0, max);
        self.stats.energy = self.stats.energy.clamp(0.0, max);
    }
}
