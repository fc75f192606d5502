// Simple particle struct to keep track of position, velocity, size and opacity.
// Size and opacity are picked once at creation and never change.

use crate::config::FieldConfig;
use glm::DVec2;
use rand::Rng;

#[derive(Debug, Clone, PartialEq)]
pub struct Particle {
    pub pos: DVec2,
    pub vel: DVec2,
    size: f64,
    opacity: f64,
}

fn uniform<R: Rng + ?Sized>(rng: &mut R, range: [f64; 2]) -> f64 {
    range[0] + rng.gen::<f64>() * (range[1] - range[0])
}

impl Particle {
    pub fn new(pos: DVec2, vel: DVec2, size: f64, opacity: f64) -> Particle {
        Particle {
            pos,
            vel,
            size,
            opacity,
        }
    }

    pub fn random<R: Rng + ?Sized>(
        rng: &mut R,
        width: f64,
        height: f64,
        config: &FieldConfig,
    ) -> Particle {
        let speed = [-config.initial_speed, config.initial_speed];
        let pos = glm::vec2(rng.gen::<f64>() * width, rng.gen::<f64>() * height);
        let size = uniform(rng, config.size_range);
        let vel = glm::vec2(uniform(rng, speed), uniform(rng, speed));
        let opacity = uniform(rng, config.opacity_range);
        Particle::new(pos, vel, size, opacity)
    }

    pub fn size(&self) -> f64 {
        self.size
    }

    pub fn opacity(&self) -> f64 {
        self.opacity
    }

    pub fn speed(&self) -> f64 {
        glm::length(&self.vel)
    }

    // Moves by one frame of velocity, then bounces off the viewport edges.
    // The position is not clamped, so a particle may sit just outside the
    // edge for a frame while it heads back in.
    pub fn advance(&mut self, width: f64, height: f64) {
        self.pos += self.vel;
        if self.pos.x > width || self.pos.x < 0.0 {
            self.vel.x = -self.vel.x;
        }
        if self.pos.y > height || self.pos.y < 0.0 {
            self.vel.y = -self.vel.y;
        }
    }

    // Nudges the particle towards `target` when it is within the attraction
    // radius, then caps the speed.
    pub fn attract_to(&mut self, target: &DVec2, config: &FieldConfig) {
        let to_target = target - self.pos;
        let distance = glm::length(&to_target);
        if distance >= config.attraction_radius {
            return;
        }
        // Sitting exactly on the pointer gives no direction; the angle of a
        // zero vector is 0, so the push goes along +x.
        let dir = if distance > 0.0 {
            to_target / distance
        } else {
            glm::vec2(1.0, 0.0)
        };
        self.vel += dir * config.attraction_force;

        let speed = self.speed();
        if speed > config.max_speed {
            self.vel *= config.max_speed / speed;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    const EPS: f64 = 1e-9;

    #[test]
    fn random_particles_respect_ranges() {
        let config = FieldConfig::default();
        let mut rng = StdRng::seed_from_u64(7);
        for _ in 0..1000 {
            let p = Particle::random(&mut rng, 1200.0, 800.0, &config);
            assert!(p.pos.x >= 0.0 && p.pos.x <= 1200.0);
            assert!(p.pos.y >= 0.0 && p.pos.y <= 800.0);
            assert!(p.size() >= 0.5 && p.size() <= 2.5);
            assert!(p.opacity() >= 0.2 && p.opacity() <= 0.7);
            assert!(p.vel.x.abs() <= 0.25 && p.vel.y.abs() <= 0.25);
        }
    }

    #[test]
    fn overshoots_then_reflects() {
        let width = 800.0;
        let mut p = Particle::new(glm::vec2(width - 0.1, 10.0), glm::vec2(0.3, 0.0), 1.0, 0.5);
        p.advance(width, 600.0);
        assert!((p.vel.x + 0.3).abs() < EPS);
        assert!((p.pos.x - (width + 0.2)).abs() < EPS);

        p.advance(width, 600.0);
        assert!((p.pos.x - (width - 0.1)).abs() < EPS);
        assert!((p.vel.x + 0.3).abs() < EPS);
    }

    #[test]
    fn reflects_off_top_edge() {
        let mut p = Particle::new(glm::vec2(10.0, 0.1), glm::vec2(0.0, -0.2), 1.0, 0.5);
        p.advance(100.0, 100.0);
        assert!(p.pos.y < 0.0);
        assert!((p.vel.y - 0.2).abs() < EPS);
    }

    #[test]
    fn attraction_pulls_towards_target() {
        let config = FieldConfig::default();
        let mut p = Particle::new(glm::vec2(100.0, 100.0), glm::vec2(0.0, 0.0), 1.0, 0.5);
        p.attract_to(&glm::vec2(100.0, 150.0), &config);
        assert!(p.vel.x.abs() < EPS);
        assert!((p.vel.y - 0.03).abs() < EPS);
    }

    #[test]
    fn attraction_ignores_far_targets() {
        let config = FieldConfig::default();
        let mut p = Particle::new(glm::vec2(0.0, 0.0), glm::vec2(0.1, 0.1), 1.0, 0.5);
        p.attract_to(&glm::vec2(200.0, 0.0), &config);
        assert_eq!(p.vel, glm::vec2(0.1, 0.1));
    }

    #[test]
    fn attraction_caps_speed_keeping_direction() {
        let config = FieldConfig::default();
        let mut p = Particle::new(glm::vec2(0.0, 0.0), glm::vec2(0.0, 0.99), 1.0, 0.5);
        p.attract_to(&glm::vec2(0.0, 50.0), &config);
        assert!((p.speed() - 1.0).abs() < EPS);
        assert!(p.vel.x.abs() < EPS);
        assert!(p.vel.y > 0.0);
    }
}
