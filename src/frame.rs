//! Frame scheduling.
//!
//! A [`FrameTask`] is resubmitted to the display's next-frame signal until it
//! asks to stop or its [`LoopHandle`] is stopped. The running flag is checked
//! at the top of every frame.

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use web_sys::window;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LoopControl {
    Continue,
    Stop,
}

pub trait FrameTask {
    fn on_frame(&mut self, now_ms: f64) -> LoopControl;
}

impl<F: FnMut(f64) -> LoopControl> FrameTask for F {
    fn on_frame(&mut self, now_ms: f64) -> LoopControl {
        self(now_ms)
    }
}

/// Shared running flag for a frame loop.
#[derive(Clone, Debug)]
pub struct LoopHandle {
    running: Rc<Cell<bool>>,
}

impl LoopHandle {
    pub fn new() -> Self {
        Self {
            running: Rc::new(Cell::new(true)),
        }
    }

    pub fn is_running(&self) -> bool {
        self.running.get()
    }

    /// The loop exits at its next frame.
    pub fn stop(&self) {
        self.running.set(false);
    }
}

impl Default for LoopHandle {
    fn default() -> Self {
        Self::new()
    }
}

/// Runs `task` on the given timestamps until it stops, the handle is stopped,
/// or the timestamps run out. Returns the number of frames the task saw.
pub fn drive<T, I>(task: &mut T, handle: &LoopHandle, timestamps: I) -> usize
where
    T: FrameTask + ?Sized,
    I: IntoIterator<Item = f64>,
{
    let mut frames = 0;
    for now in timestamps {
        if !handle.is_running() {
            break;
        }
        frames += 1;
        if task.on_frame(now) == LoopControl::Stop {
            handle.stop();
            break;
        }
    }
    frames
}

type FrameCallback = Rc<RefCell<Option<Closure<dyn FnMut(f64)>>>>;

/// Drives `task` from `requestAnimationFrame`. Without a window this is a
/// no-op and the returned handle is already stopped.
pub fn run_on_animation_frames<T: FrameTask + 'static>(mut task: T) -> LoopHandle {
    let handle = LoopHandle::new();
    let Some(win) = window() else {
        handle.stop();
        return handle;
    };

    let f: FrameCallback = Rc::new(RefCell::new(None));
    let g = f.clone();
    let flag = handle.clone();
    *g.borrow_mut() = Some(Closure::wrap(Box::new(move |ts: f64| {
        if !flag.is_running() || task.on_frame(ts) == LoopControl::Stop {
            flag.stop();
            return;
        }
        if let Some(w) = window() {
            if let Some(cb) = f.borrow().as_ref() {
                let _ = w.request_animation_frame(cb.as_ref().unchecked_ref());
            }
        }
    }) as Box<dyn FnMut(f64)>));

    if let Some(cb) = g.borrow().as_ref() {
        if win
            .request_animation_frame(cb.as_ref().unchecked_ref())
            .is_err()
        {
            handle.stop();
        }
    }
    handle
}
