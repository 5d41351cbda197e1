use rand::Rng;

use crate::core::{Point, Rgba8Premul};
use crate::ease::Ease;

/// Side-profile outline of the car, normalized to 0..1 with the body centered
/// on (0.5, 0.5). The last point repeats the first to close the hull.
const SILHOUETTE: [(f64, f64); 30] = [
    // Front bumper and splitter
    (0.05, 0.55),
    (0.08, 0.50),
    (0.12, 0.48),
    // Hood, long and low
    (0.15, 0.47),
    (0.25, 0.45),
    (0.35, 0.43),
    (0.45, 0.42),
    // Windshield
    (0.48, 0.41),
    (0.52, 0.38),
    // Roofline
    (0.60, 0.38),
    (0.68, 0.40),
    (0.72, 0.42),
    // Rear quarter panel
    (0.78, 0.43),
    (0.82, 0.44),
    // Wing and diffuser
    (0.88, 0.45),
    (0.92, 0.50),
    (0.95, 0.55),
    // Rear undercarriage
    (0.93, 0.60),
    (0.88, 0.62),
    // Rear wheel arch
    (0.80, 0.62),
    (0.76, 0.63),
    // Lower rear section
    (0.70, 0.62),
    (0.60, 0.62),
    // Front wheel arch
    (0.45, 0.63),
    (0.35, 0.63),
    // Front lower section
    (0.25, 0.62),
    (0.15, 0.60),
    (0.08, 0.58),
    (0.05, 0.55),
    (0.05, 0.55),
];

const ACCENT: Rgba8Premul = Rgba8Premul {
    r: 255,
    g: 106,
    b: 0,
    a: 255,
};
const BODY: Rgba8Premul = Rgba8Premul {
    r: 255,
    g: 255,
    b: 255,
    a: 255,
};

/// Seconds a particle takes from its spawn ring to its silhouette slot,
/// not counting its individual delay.
const FORMATION_SECS: f64 = 1.2;
const MAX_DELAY_SECS: f64 = 0.3;

/// Silhouette points densified with a midpoint between each neighbor pair
/// (wrapping), in normalized coordinates.
pub fn silhouette_points() -> Vec<Point> {
    let mut detailed = Vec::with_capacity(SILHOUETTE.len() * 2);
    for (i, &(x, y)) in SILHOUETTE.iter().enumerate() {
        let current = Point::new(x, y);
        let (nx, ny) = SILHOUETTE[(i + 1) % SILHOUETTE.len()];
        detailed.push(current);
        detailed.push(current.midpoint(Point::new(nx, ny)));
    }
    detailed
}

#[derive(Clone, Debug)]
pub struct Particle {
    pub spawn: Point,
    pub home: Point,
    pub pos: Point,
    pub color: Rgba8Premul,
    pub delay: f64,
}

/// Particles that scatter from a ring around the stage center and ease into
/// the car silhouette. Time-driven; the loading screen ticks it while it is
/// on stage.
pub struct ParticleField {
    particles: Vec<Particle>,
    elapsed: f64,
}

impl ParticleField {
    /// Scatter `count` particles over the silhouette within a stage of
    /// `width` x `height`. Every tenth particle gets the accent color.
    pub fn car(count: usize, width: f64, height: f64, rng: &mut impl Rng) -> Self {
        let path = silhouette_points();
        let center = Point::new(width / 2.0, height / 2.0);

        let mut particles = Vec::with_capacity(count);
        for i in 0..count {
            let slot = (i as f64 / count as f64 * path.len() as f64).floor() as usize;
            let target = path[slot.min(path.len() - 1)];
            let home = Point::new(
                center.x + (target.x - 0.5) * width,
                center.y + (target.y - 0.5) * height,
            );

            let angle = rng.gen_range(0.0..std::f64::consts::TAU);
            let distance = 150.0 + rng.gen_range(0.0..100.0);
            let spawn = Point::new(
                center.x + angle.cos() * distance,
                center.y + angle.sin() * distance,
            );

            particles.push(Particle {
                spawn,
                home,
                pos: spawn,
                color: if i % 10 == 0 { ACCENT } else { BODY },
                delay: rng.gen_range(0.0..MAX_DELAY_SECS),
            });
        }

        Self {
            particles,
            elapsed: 0.0,
        }
    }

    pub fn tick(&mut self, dt: f64) {
        self.elapsed += dt.max(0.0);
        for p in &mut self.particles {
            let t = ((self.elapsed - p.delay) / FORMATION_SECS).clamp(0.0, 1.0);
            p.pos = p.spawn.lerp(p.home, Ease::OutCubic.apply(t));
        }
    }

    /// Every particle has reached its silhouette slot.
    pub fn is_formed(&self) -> bool {
        self.elapsed >= FORMATION_SECS + MAX_DELAY_SECS
    }

    pub fn particles(&self) -> &[Particle] {
        &self.particles
    }

    pub fn len(&self) -> usize {
        self.particles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.particles.is_empty()
    }
}
