use rand::seq::SliceRandom;
use rand::Rng;

const CONFETTI: [char; 6] = ['✦', '✧', '•', '★', '✶', '·'];
const DUST: [char; 3] = ['·', '•', '∙'];

/// Fixed animation timestep, seconds.
pub const STEP: f64 = 0.05;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    /// Slow upward drift that never runs out, behind the processing screen.
    Ambient,
    /// One-shot confetti burst for the summary slide.
    Burst,
}

#[derive(Debug, Clone)]
pub struct Particle {
    pub x: f64,
    pub y: f64,
    pub vel_x: f64,
    pub vel_y: f64,
    pub symbol: char,
    pub color_index: usize,
    pub age: f64,
    pub max_age: f64,
}

impl Particle {
    fn drifting<R: Rng>(rng: &mut R, width: f64, height: f64) -> Self {
        Self {
            x: rng.gen_range(0.0..width.max(1.0)),
            y: rng.gen_range(0.0..height.max(1.0)),
            vel_x: rng.gen_range(-0.5..0.5),
            vel_y: rng.gen_range(-2.0..-0.5),
            symbol: *DUST.choose(rng).unwrap_or(&'·'),
            color_index: rng.gen_range(0..4),
            age: 0.0,
            max_age: rng.gen_range(2.0..4.0),
        }
    }

    fn confetti<R: Rng>(rng: &mut R, x: f64, y: f64) -> Self {
        Self {
            x,
            y,
            vel_x: rng.gen_range(-6.0..6.0),
            vel_y: rng.gen_range(-8.0..-2.0),
            symbol: *CONFETTI.choose(rng).unwrap_or(&'✦'),
            color_index: rng.gen_range(0..7),
            age: 0.0,
            max_age: rng.gen_range(2.0..3.5),
        }
    }

    fn update(&mut self, dt: f64, gravity: f64) -> bool {
        self.x += self.vel_x * dt;
        self.y += self.vel_y * dt;
        self.vel_y += gravity * dt;
        self.age += dt;
        self.age < self.max_age
    }

    /// Remaining life as 0..=1, for fading.
    pub fn life(&self) -> f64 {
        (1.0 - self.age / self.max_age).clamp(0.0, 1.0)
    }
}

#[derive(Debug, Clone)]
pub struct ParticleField {
    pub kind: FieldKind,
    pub particles: Vec<Particle>,
    width: f64,
    height: f64,
}

impl ParticleField {
    pub fn ambient(width: u16, height: u16, count: usize) -> Self {
        let mut rng = rand::thread_rng();
        let (w, h) = (width as f64, height as f64);
        Self {
            kind: FieldKind::Ambient,
            particles: (0..count).map(|_| Particle::drifting(&mut rng, w, h)).collect(),
            width: w,
            height: h,
        }
    }

    pub fn burst(width: u16, height: u16) -> Self {
        let mut rng = rand::thread_rng();
        let (w, h) = (width as f64, height as f64);
        let particles = (0..40)
            .map(|_| {
                let x = w / 2.0 + rng.gen_range(-w / 4.0..=w / 4.0);
                let y = h / 3.0 + rng.gen_range(-2.0..2.0);
                Particle::confetti(&mut rng, x, y)
            })
            .collect();
        Self {
            kind: FieldKind::Burst,
            particles,
            width: w,
            height: h,
        }
    }

    pub fn is_active(&self) -> bool {
        !self.particles.is_empty()
    }

    pub fn update(&mut self) {
        let (width, height) = (self.width, self.height);
        match self.kind {
            FieldKind::Ambient => {
                let mut rng = rand::thread_rng();
                for p in &mut self.particles {
                    let alive = p.update(STEP, 0.0);
                    if !alive || p.y < 0.0 || p.x < 0.0 || p.x >= width {
                        *p = Particle::drifting(&mut rng, width, height);
                        p.y = height - 1.0;
                    }
                }
            }
            FieldKind::Burst => {
                let buffer = 2.0;
                self.particles.retain_mut(|p| {
                    let alive = p.update(STEP, 12.0);
                    let off_screen =
                        p.y > height + buffer || p.x < -buffer || p.x > width + buffer;
                    alive && !off_screen
                });
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ambient_field_keeps_its_population() {
        let mut field = ParticleField::ambient(40, 12, 25);
        for _ in 0..200 {
            field.update();
        }
        assert_eq!(field.particles.len(), 25);
        assert!(field
            .particles
            .iter()
            .all(|p| p.x >= 0.0 && p.x < 40.0 && p.y < 12.0));
    }

    #[test]
    fn burst_fades_out() {
        let mut field = ParticleField::burst(80, 24);
        assert!(field.is_active());
        for _ in 0..200 {
            field.update();
        }
        assert!(!field.is_active());
    }

    #[test]
    fn confetti_falls_under_gravity() {
        let mut rng = rand::thread_rng();
        let mut p = Particle::confetti(&mut rng, 10.0, 10.0);
        let vel_y = p.vel_y;
        assert!(p.update(0.1, 12.0));
        assert!(p.vel_y > vel_y);
        assert!(p.life() < 1.0);
    }
}
