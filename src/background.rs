// The mounted background component. Sizes its canvas to the window, keeps a
// particle field in sync with resize and theme changes, feeds it pointer
// samples and drives it from a frame loop.

use crate::field::ParticleField;
use crate::frame_loop::FrameLoop;
use crate::Timer;
use std::cell::RefCell;
use std::rc::Rc;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{console, CanvasRenderingContext2d, HtmlCanvasElement, MouseEvent, Window};

struct Mounted {
    canvas: HtmlCanvasElement,
    context: Option<CanvasRenderingContext2d>,
    field: Rc<RefCell<ParticleField>>,
    frame_loop: Option<FrameLoop>,
    profile: bool,
}

impl Mounted {
    fn stop(&mut self) {
        if let Some(frame_loop) = self.frame_loop.take() {
            frame_loop.cancel();
        }
    }

    // A canvas without a 2D context just stays blank.
    fn start(&mut self) -> Result<(), JsValue> {
        self.stop();
        let mut context = match &self.context {
            Some(context) => context.clone(),
            None => return Ok(()),
        };
        let field = self.field.clone();
        let profile = self.profile;
        self.frame_loop = Some(FrameLoop::start(move || {
            let _timer = if profile {
                Some(Timer::new("ParticleField::step"))
            } else {
                None
            };
            field.borrow_mut().step(&mut context);
        })?);
        Ok(())
    }

    fn resize(&mut self, width: u32, height: u32) -> Result<(), JsValue> {
        self.stop();
        self.canvas.set_width(width);
        self.canvas.set_height(height);
        self.field
            .borrow_mut()
            .resize(width, height, &mut rand::thread_rng());
        self.start()
    }
}

fn viewport_size(window: &Window) -> Result<(u32, u32), JsValue> {
    let width = window.inner_width()?.as_f64().unwrap_or(0.0);
    let height = window.inner_height()?.as_f64().unwrap_or(0.0);
    Ok((width.max(0.0) as u32, height.max(0.0) as u32))
}

fn get_context(canvas: &HtmlCanvasElement) -> Result<Option<CanvasRenderingContext2d>, JsValue> {
    match canvas.get_context("2d")? {
        Some(context) => Ok(Some(context.dyn_into::<CanvasRenderingContext2d>()?)),
        None => Ok(None),
    }
}

#[wasm_bindgen]
pub struct ParticleBackground {
    window: Window,
    mounted: Rc<RefCell<Mounted>>,
    on_resize: Option<Closure<dyn FnMut()>>,
    on_mouse_move: Option<Closure<dyn FnMut(MouseEvent)>>,
}

#[wasm_bindgen]
impl ParticleBackground {
    /// Takes over `canvas`, sizing it to the window and starting the
    /// animation straight away.
    pub fn mount(canvas: HtmlCanvasElement) -> Result<ParticleBackground, JsValue> {
        let window = web_sys::window().ok_or_else(|| JsValue::from_str("no global window"))?;
        let (width, height) = viewport_size(&window)?;
        canvas.set_width(width);
        canvas.set_height(height);

        let context = get_context(&canvas)?;
        if context.is_none() {
            console::warn_1(&"particle background: no 2d context, nothing will be drawn".into());
        }

        let field = ParticleField::new(width, height, &mut rand::thread_rng());
        let mounted = Rc::new(RefCell::new(Mounted {
            canvas,
            context,
            field: Rc::new(RefCell::new(field)),
            frame_loop: None,
            profile: false,
        }));

        let on_resize = {
            let mounted = mounted.clone();
            let window = window.clone();
            Closure::wrap(Box::new(move || {
                let result = viewport_size(&window)
                    .and_then(|(width, height)| mounted.borrow_mut().resize(width, height));
                if let Err(err) = result {
                    console::error_1(&err);
                }
            }) as Box<dyn FnMut()>)
        };
        let on_mouse_move = {
            let field = mounted.borrow().field.clone();
            Closure::wrap(Box::new(move |event: MouseEvent| {
                field
                    .borrow_mut()
                    .set_pointer(event.client_x() as f64, event.client_y() as f64);
            }) as Box<dyn FnMut(MouseEvent)>)
        };

        window.add_event_listener_with_callback("resize", on_resize.as_ref().unchecked_ref())?;
        window.add_event_listener_with_callback(
            "mousemove",
            on_mouse_move.as_ref().unchecked_ref(),
        )?;
        mounted.borrow_mut().start()?;

        Ok(ParticleBackground {
            window,
            mounted,
            on_resize: Some(on_resize),
            on_mouse_move: Some(on_mouse_move),
        })
    }

    /// Rescatters the particles when the page theme changes. The theme
    /// itself does not change how anything is drawn.
    pub fn set_theme(&mut self, theme: &str) -> Result<(), JsValue> {
        let mut mounted = self.mounted.borrow_mut();
        if mounted.field.borrow().theme() == Some(theme) {
            return Ok(());
        }
        mounted.stop();
        mounted
            .field
            .borrow_mut()
            .set_theme(theme, &mut rand::thread_rng());
        mounted.start()
    }

    /// Times each frame in the browser console.
    pub fn set_profiling(&mut self, enabled: bool) -> Result<(), JsValue> {
        let mut mounted = self.mounted.borrow_mut();
        mounted.profile = enabled;
        if mounted.frame_loop.is_some() {
            mounted.start()?;
        }
        Ok(())
    }

    /// Last pointer sample fed to the field, as `[x, y]`.
    pub fn pointer(&self) -> Vec<f64> {
        let pointer = self.mounted.borrow().field.borrow().pointer();
        vec![pointer.x, pointer.y]
    }

    /// Flattened `[x0, y0, x1, y1, ...]` particle positions.
    pub fn particle_positions(&self) -> Vec<f64> {
        let mounted = self.mounted.borrow();
        let field = mounted.field.borrow();
        field
            .particles()
            .iter()
            .flat_map(|p| vec![p.pos.x, p.pos.y])
            .collect()
    }

    pub fn particle_count(&self) -> u32 {
        self.mounted.borrow().field.borrow().particles().len() as u32
    }

    pub fn is_running(&self) -> bool {
        match &self.mounted.borrow().frame_loop {
            Some(frame_loop) => !frame_loop.is_cancelled(),
            None => false,
        }
    }

    /// Removes the window listeners and stops the frame loop.
    pub fn unmount(&mut self) {
        if let Some(on_resize) = self.on_resize.take() {
            let _ = self
                .window
                .remove_event_listener_with_callback("resize", on_resize.as_ref().unchecked_ref());
        }
        if let Some(on_mouse_move) = self.on_mouse_move.take() {
            let _ = self.window.remove_event_listener_with_callback(
                "mousemove",
                on_mouse_move.as_ref().unchecked_ref(),
            );
        }
        self.mounted.borrow_mut().stop();
    }
}

impl Drop for ParticleBackground {
    fn drop(&mut self) {
        self.unmount();
    }
}
