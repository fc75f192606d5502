// Tunables for the particle field. The defaults are the values the portfolio
// background ships with; everything is measured in CSS pixels and frames.

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FieldConfig {
    /// Viewports narrower than this get the sparse density.
    pub narrow_breakpoint: u32,
    pub narrow_density: usize,
    pub wide_density: usize,
    pub size_range: [f64; 2],
    /// Each velocity component starts uniform in [-initial_speed, initial_speed].
    pub initial_speed: f64,
    pub opacity_range: [f64; 2],
    pub link_distance: f64,
    pub link_alpha: f64,
    pub link_width: f64,
    pub attraction_radius: f64,
    pub attraction_force: f64,
    pub max_speed: f64,
}

impl FieldConfig {
    pub const NARROW_BREAKPOINT: u32 = 768;
    pub const NARROW_DENSITY: usize = 30;
    pub const WIDE_DENSITY: usize = 50;

    pub fn density_for_width(&self, width: u32) -> usize {
        if width < self.narrow_breakpoint {
            self.narrow_density
        } else {
            self.wide_density
        }
    }
}

impl Default for FieldConfig {
    fn default() -> Self {
        FieldConfig {
            narrow_breakpoint: FieldConfig::NARROW_BREAKPOINT,
            narrow_density: FieldConfig::NARROW_DENSITY,
            wide_density: FieldConfig::WIDE_DENSITY,
            size_range: [0.5, 2.5],
            initial_speed: 0.25,
            opacity_range: [0.2, 0.7],
            link_distance: 100.0,
            link_alpha: 0.2,
            link_width: 0.5,
            attraction_radius: 200.0,
            attraction_force: 0.03,
            max_speed: 1.0,
        }
    }
}
