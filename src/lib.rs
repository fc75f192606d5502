//! Ambient particle backdrop and interactive bits of the portfolio page,
//! compiled to WebAssembly.
//!
//! [`ParticleBackground`] mounts onto a full-viewport canvas and animates a
//! field of drifting, linked points that lean towards the mouse.
//! [`CursorFollower`] smooths the custom cursor with a spring and
//! [`ContactForm`] posts the contact form to its relay.

mod utils;

extern crate nalgebra_glm as glm;

pub mod background;
pub mod color;
pub mod config;
pub mod contact;
pub mod cursor;
pub mod field;
pub mod frame_loop;
pub mod particle;
pub mod surface;

pub use background::ParticleBackground;
pub use contact::{ContactForm, ContactStatus};
pub use cursor::CursorFollower;
pub use field::ParticleField;

use wasm_bindgen::prelude::*;
use web_sys::console;

// Use `wee_alloc` as the global allocator when the feature is on.
#[cfg(feature = "wee_alloc")]
#[global_allocator]
static ALLOC: wee_alloc::WeeAlloc = wee_alloc::WeeAlloc::INIT;

#[wasm_bindgen]
pub fn initialize() {
    utils::set_panic_hook();
}

/// Scoped console timer, reports the elapsed time under `name` when dropped.
pub struct Timer<'a> {
    name: &'a str,
}

impl<'a> Timer<'a> {
    pub fn new(name: &'a str) -> Timer<'a> {
        console::time_with_label(name);
        Timer { name }
    }
}

impl<'a> Drop for Timer<'a> {
    fn drop(&mut self) {
        console::time_end_with_label(self.name);
    }
}
