//! Custom cursor follower.
//!
//! A dot trails the pointer, smoothed on each axis by a damped spring, and
//! grows while hovering something clickable. The host page feeds pointer
//! events and calls [`CursorFollower::step`] every frame, then applies
//! [`CursorFollower::x`], [`CursorFollower::y`] and
//! [`CursorFollower::diameter`] to the dot element.

use wasm_bindgen::prelude::*;
use web_sys::Element;

/// Largest time step a single spring update will integrate, in seconds.
/// Longer gaps (background tabs) are cut short instead of overshooting.
pub const MAX_STEP: f64 = 1.0 / 15.0;

/// One-dimensional damped spring pulled towards `target`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Spring {
    pub value: f64,
    pub velocity: f64,
    pub target: f64,
    pub stiffness: f64,
    pub damping: f64,
    pub mass: f64,
}

impl Spring {
    pub const STIFFNESS: f64 = 300.0;
    pub const DAMPING: f64 = 25.0;

    pub fn new(value: f64) -> Self {
        Spring {
            value,
            velocity: 0.0,
            target: value,
            stiffness: Spring::STIFFNESS,
            damping: Spring::DAMPING,
            mass: 1.0,
        }
    }

    /// Semi-implicit Euler: velocity first, then position with the new
    /// velocity.
    pub fn step(&mut self, dt: f64) {
        let dt = dt.max(0.0).min(MAX_STEP);
        let force = -self.stiffness * (self.value - self.target) - self.damping * self.velocity;
        self.velocity += force / self.mass * dt;
        self.value += self.velocity * dt;
    }

    pub fn is_settled(&self, tolerance: f64) -> bool {
        (self.value - self.target).abs() <= tolerance && self.velocity.abs() <= tolerance
    }
}

/// Mirrors the page's notion of "clickable": links, buttons, anything
/// inside one, `role="button"`, or a computed `cursor: pointer`.
pub fn is_clickable(tag: &str, role: Option<&str>, cursor: &str, inside_clickable: bool) -> bool {
    let tag = tag.to_ascii_lowercase();
    tag == "a" || tag == "button" || inside_clickable || role == Some("button") || cursor == "pointer"
}

/// Applies [`is_clickable`] to a live element, reading its computed cursor.
pub fn element_is_clickable(element: &Element) -> Result<bool, JsValue> {
    let inside_clickable = element.closest("a")?.is_some() || element.closest("button")?.is_some();
    let role = element.get_attribute("role");
    let cursor = match web_sys::window() {
        Some(window) => match window.get_computed_style(element)? {
            Some(style) => style.get_property_value("cursor")?,
            None => String::new(),
        },
        None => String::new(),
    };
    Ok(is_clickable(
        &element.tag_name(),
        role.as_deref(),
        &cursor,
        inside_clickable,
    ))
}

/// True on devices with touch input, where the follower stays hidden.
#[wasm_bindgen]
pub fn is_touch_device() -> bool {
    let window = match web_sys::window() {
        Some(window) => window,
        None => return false,
    };
    let has_touch_start = js_sys::Reflect::has(&window, &"ontouchstart".into()).unwrap_or(false);
    has_touch_start || window.navigator().max_touch_points() > 0
}

#[wasm_bindgen]
#[derive(Debug, Clone)]
pub struct CursorFollower {
    x: Spring,
    y: Spring,
    visible: bool,
    hovering: bool,
}

impl Default for CursorFollower {
    fn default() -> Self {
        CursorFollower::new()
    }
}

impl CursorFollower {
    pub const DIAMETER: f64 = 32.0;
    pub const HOVER_DIAMETER: f64 = 50.0;
    const OFFSCREEN: f64 = -100.0;
}

#[wasm_bindgen]
impl CursorFollower {
    #[wasm_bindgen(constructor)]
    pub fn new() -> CursorFollower {
        CursorFollower {
            x: Spring::new(CursorFollower::OFFSCREEN),
            y: Spring::new(CursorFollower::OFFSCREEN),
            visible: false,
            hovering: false,
        }
    }

    /// Retargets the springs so the dot ends up centred on the pointer.
    pub fn pointer_moved(&mut self, client_x: f64, client_y: f64) {
        let offset = CursorFollower::DIAMETER / 2.0;
        self.x.target = client_x - offset;
        self.y.target = client_y - offset;
        self.visible = true;
    }

    pub fn pointer_entered(&mut self) {
        self.visible = true;
    }

    pub fn pointer_left(&mut self) {
        self.visible = false;
    }

    pub fn set_hovering_clickable(&mut self, hovering: bool) {
        self.hovering = hovering;
    }

    /// Call from `mouseover` with the event target; grows the dot when the
    /// pointer is over something clickable.
    pub fn hover_element(&mut self, target: &Element) -> Result<(), JsValue> {
        self.hovering = element_is_clickable(target)?;
        Ok(())
    }

    /// Advances both springs by `dt` seconds.
    pub fn step(&mut self, dt: f64) {
        self.x.step(dt);
        self.y.step(dt);
    }

    pub fn x(&self) -> f64 {
        self.x.value
    }

    pub fn y(&self) -> f64 {
        self.y.value
    }

    pub fn diameter(&self) -> f64 {
        if self.hovering {
            CursorFollower::HOVER_DIAMETER
        } else {
            CursorFollower::DIAMETER
        }
    }

    /// Whether the small centre dot is shown; only while hovering.
    pub fn shows_center_dot(&self) -> bool {
        self.hovering
    }

    pub fn visible(&self) -> bool {
        self.visible
    }

    pub fn opacity(&self) -> f64 {
        if self.visible {
            1.0
        } else {
            0.0
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn spring_settles_on_target() {
        let mut spring = Spring::new(0.0);
        spring.target = 200.0;
        for _ in 0..300 {
            spring.step(1.0 / 60.0);
        }
        assert!(spring.is_settled(1e-3), "{:?}", spring);
    }

    #[test]
    fn spring_clamps_long_steps() {
        let mut a = Spring::new(0.0);
        a.target = 100.0;
        let mut b = a;
        a.step(10.0);
        b.step(MAX_STEP);
        assert_eq!(a, b);
    }

    #[test]
    fn spring_ignores_negative_time() {
        let mut spring = Spring::new(5.0);
        spring.target = 50.0;
        spring.step(-1.0);
        assert_eq!(spring.value, 5.0);
        assert_eq!(spring.velocity, 0.0);
    }

    #[test]
    fn follower_starts_hidden_offscreen() {
        let follower = CursorFollower::new();
        assert!(!follower.visible());
        assert_eq!(follower.opacity(), 0.0);
        assert_eq!((follower.x(), follower.y()), (-100.0, -100.0));
        assert_eq!(follower.diameter(), 32.0);
    }

    #[test]
    fn follower_centres_on_pointer() {
        let mut follower = CursorFollower::new();
        follower.pointer_moved(400.0, 300.0);
        assert!(follower.visible());
        for _ in 0..600 {
            follower.step(1.0 / 60.0);
        }
        assert!((follower.x() - 384.0).abs() < 1e-3);
        assert!((follower.y() - 284.0).abs() < 1e-3);

        follower.pointer_left();
        assert!(!follower.visible());
    }

    #[test]
    fn hover_grows_the_dot() {
        let mut follower = CursorFollower::new();
        follower.set_hovering_clickable(true);
        assert_eq!(follower.diameter(), 50.0);
        assert!(follower.shows_center_dot());
    }

    #[test]
    fn clickable_matches_links_and_buttons() {
        assert!(is_clickable("A", None, "auto", false));
        assert!(is_clickable("button", None, "auto", false));
        assert!(is_clickable("span", None, "auto", true));
        assert!(is_clickable("div", Some("button"), "auto", false));
        assert!(is_clickable("div", None, "pointer", false));
        assert!(!is_clickable("p", Some("note"), "text", false));
    }
}
