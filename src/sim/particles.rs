//! Floating "+1" feedback particles
//!
//! Purely cosmetic: nothing in the simulation reads particle state.

use glam::Vec2;
use serde::ser::{Serialize, SerializeStruct, Serializer};

use crate::consts::{PARTICLE_LIFETIME_TICKS, PARTICLE_RISE_SPEED, PARTICLE_TEXT};

/// A single feedback particle
#[derive(Debug, Clone)]
pub struct Particle {
    pub id: u64,
    pub pos: Vec2,
    /// Ticks lived so far. Life is derived from this so it hits zero on an
    /// exact tick instead of drifting with float error.
    pub age_ticks: u32,
    pub text: &'static str,
}

impl Particle {
    /// Remaining life, 1.0 at spawn down to 0.0
    pub fn life(&self) -> f32 {
        let remaining = PARTICLE_LIFETIME_TICKS.saturating_sub(self.age_ticks);
        remaining as f32 / PARTICLE_LIFETIME_TICKS as f32
    }

    pub fn opacity(&self) -> f32 {
        self.life()
    }

    pub fn scale(&self) -> f32 {
        0.5 + self.life()
    }

    fn is_alive(&self) -> bool {
        self.age_ticks < PARTICLE_LIFETIME_TICKS
    }
}

/// Serialized with the derived render values a front end needs
impl Serialize for Particle {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut state = serializer.serialize_struct("Particle", 6)?;
        state.serialize_field("id", &self.id)?;
        state.serialize_field("pos", &self.pos)?;
        state.serialize_field("life", &self.life())?;
        state.serialize_field("opacity", &self.opacity())?;
        state.serialize_field("scale", &self.scale())?;
        state.serialize_field("text", self.text)?;
        state.end()
    }
}

/// The active particle set
#[derive(Debug, Clone, Default)]
pub struct Particles {
    items: Vec<Particle>,
    next_id: u64,
}

impl Particles {
    pub fn new() -> Self {
        Self::default()
    }

    /// Spawn a particle at `pos`, returns its id
    pub fn spawn(&mut self, pos: Vec2) -> u64 {
        let id = self.next_id;
        self.next_id += 1;
        self.items.push(Particle {
            id,
            pos,
            age_ticks: 0,
            text: PARTICLE_TEXT,
        });
        id
    }

    /// Rise, decay, and drop expired particles
    pub fn update(&mut self) {
        for p in &mut self.items {
            p.pos.y -= PARTICLE_RISE_SPEED;
            p.age_ticks += 1;
        }
        self.items.retain(Particle::is_alive);
    }

    pub fn clear(&mut self) {
        self.items.clear();
    }

    pub fn as_slice(&self) -> &[Particle] {
        &self.items
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}
