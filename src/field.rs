// The particle field: owns every particle, the viewport size and the last
// pointer sample, and advances/draws them once per animation frame.

use crate::color::Color;
use crate::config::FieldConfig;
use crate::particle::Particle;
use crate::surface::Surface;
use glm::DVec2;
use rand::Rng;

pub struct ParticleField {
    width: u32,
    height: u32,
    particles: Vec<Particle>,
    pointer: DVec2,
    theme: Option<String>,
    color: Color,
    config: FieldConfig,
}

impl ParticleField {
    pub fn new<R: Rng + ?Sized>(width: u32, height: u32, rng: &mut R) -> Self {
        ParticleField::with_config(width, height, FieldConfig::default(), rng)
    }

    pub fn with_config<R: Rng + ?Sized>(
        width: u32,
        height: u32,
        config: FieldConfig,
        rng: &mut R,
    ) -> Self {
        let mut field = ParticleField {
            width,
            height,
            particles: Vec::new(),
            pointer: glm::vec2(0.0, 0.0),
            theme: None,
            color: Color::WHITE,
            config,
        };
        field.reset(rng);
        field
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn particles(&self) -> &[Particle] {
        &self.particles
    }

    pub fn theme(&self) -> Option<&str> {
        self.theme.as_deref()
    }

    /// Throws away every particle and scatters a fresh set sized for the
    /// current viewport width.
    pub fn reset<R: Rng + ?Sized>(&mut self, rng: &mut R) {
        let count = self.config.density_for_width(self.width);
        let (width, height) = (self.width as f64, self.height as f64);
        let config = self.config;
        self.particles.clear();
        self.particles.reserve(count);
        self.particles
            .extend((0..count).map(|_| Particle::random(rng, width, height, &config)));
    }

    pub fn resize<R: Rng + ?Sized>(&mut self, width: u32, height: u32, rng: &mut R) {
        self.width = width;
        self.height = height;
        self.reset(rng);
    }

    /// Records the theme and rescatters the particles when it changed.
    /// The theme has no effect on how the field is drawn.
    pub fn set_theme<R: Rng + ?Sized>(&mut self, theme: &str, rng: &mut R) -> bool {
        if self.theme.as_deref() == Some(theme) {
            return false;
        }
        self.theme = Some(theme.to_owned());
        self.reset(rng);
        true
    }

    pub fn set_pointer(&mut self, x: f64, y: f64) {
        self.pointer = glm::vec2(x, y);
    }

    pub fn pointer(&self) -> DVec2 {
        self.pointer
    }

    /// Alpha of the line joining two particles `distance` apart, or `None`
    /// when they are too far apart to be linked.
    pub fn link_alpha(&self, distance: f64) -> Option<f64> {
        if distance < self.config.link_distance {
            Some(self.config.link_alpha * (1.0 - distance / self.config.link_distance))
        } else {
            None
        }
    }

    /// Runs one frame: move and bounce, clear, draw particles, draw links,
    /// then pull particles towards the pointer for the next frame.
    pub fn step<S: Surface + ?Sized>(&mut self, surface: &mut S) {
        if self.width == 0 || self.height == 0 {
            return;
        }
        let (width, height) = (self.width as f64, self.height as f64);

        for particle in &mut self.particles {
            particle.advance(width, height);
        }

        surface.clear(width, height);
        for particle in &self.particles {
            surface.fill_circle(&particle.pos, particle.size(), self.color, particle.opacity());
        }
        self.draw_links(surface);

        let pointer = self.pointer;
        let config = self.config;
        for particle in &mut self.particles {
            particle.attract_to(&pointer, &config);
        }
    }

    // Every unordered pair is checked; the field never holds more than a few
    // dozen particles.
    fn draw_links<S: Surface + ?Sized>(&self, surface: &mut S) {
        for (i, a) in self.particles.iter().enumerate() {
            for b in &self.particles[i + 1..] {
                let distance = glm::distance(&a.pos, &b.pos);
                if let Some(alpha) = self.link_alpha(distance) {
                    surface.stroke_line(&a.pos, &b.pos, self.config.link_width, self.color, alpha);
                }
            }
        }
    }
}
