// A task that runs once per animation frame and reschedules itself until it
// is cancelled. Everything lives on the browser's single thread, so shared
// state is Rc/Cell rather than anything Send.

use std::cell::{Cell, RefCell};
use std::rc::{Rc, Weak};
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;

type FrameCallback = Rc<RefCell<Option<Closure<dyn FnMut()>>>>;

pub struct FrameLoop {
    handle: Rc<Cell<Option<i32>>>,
    cancelled: Rc<Cell<bool>>,
    // Owns the closure; the scheduled callback only holds a weak reference
    // to itself so dropping the loop frees it.
    _callback: FrameCallback,
}

fn request_frame(callback: &Closure<dyn FnMut()>) -> Result<i32, JsValue> {
    let window = web_sys::window().ok_or_else(|| JsValue::from_str("no global window"))?;
    window.request_animation_frame(callback.as_ref().unchecked_ref())
}

impl FrameLoop {
    /// Runs the first frame right away so nothing blank is ever presented,
    /// then keeps going on every animation frame.
    pub fn start<F>(mut frame: F) -> Result<FrameLoop, JsValue>
    where
        F: FnMut() + 'static,
    {
        frame();

        let handle = Rc::new(Cell::new(None));
        let cancelled = Rc::new(Cell::new(false));
        let callback: FrameCallback = Rc::new(RefCell::new(None));

        let tick = {
            let handle = handle.clone();
            let cancelled = cancelled.clone();
            let weak: Weak<RefCell<Option<Closure<dyn FnMut()>>>> = Rc::downgrade(&callback);
            Closure::wrap(Box::new(move || {
                handle.set(None);
                if cancelled.get() {
                    return;
                }
                frame();
                if cancelled.get() {
                    return;
                }
                if let Some(callback) = weak.upgrade() {
                    if let Some(closure) = callback.borrow().as_ref() {
                        match request_frame(closure) {
                            Ok(id) => handle.set(Some(id)),
                            Err(err) => web_sys::console::error_1(&err),
                        }
                    }
                }
            }) as Box<dyn FnMut()>)
        };

        let first = request_frame(&tick)?;
        handle.set(Some(first));
        *callback.borrow_mut() = Some(tick);

        Ok(FrameLoop {
            handle,
            cancelled,
            _callback: callback,
        })
    }

    pub fn is_cancelled(&self) -> bool {
        self.cancelled.get()
    }

    /// Stops the loop: the pending frame is cancelled and any callback that
    /// still fires returns without doing work.
    pub fn cancel(&self) {
        self.cancelled.set(true);
        if let Some(id) = self.handle.take() {
            if let Some(window) = web_sys::window() {
                let _ = window.cancel_animation_frame(id);
            }
        }
    }
}

impl Drop for FrameLoop {
    fn drop(&mut self) {
        self.cancel();
    }
}
