use std::time::Duration;

use log::trace;

use super::GridEngine;
use crate::adapter::{FrameId, FrameworkAdapter};

/// Half-period of the current-cell blink.
pub const BLINK_INTERVAL: Duration = Duration::from_millis(530);

/// Paint frames an animated scroll takes to reach its target.
pub const SCROLL_ANIMATION_FRAMES: u32 = 8;

/// Frame-driven state of a mounted engine.
#[derive(Debug)]
pub(crate) struct FrameState {
    pub(crate) cursor_visible: bool,
    blink: Option<FrameId>,
    last_blink: Option<Duration>,
    scroll: Option<FrameId>,
    animation: Option<ScrollAnimation>,
}

impl FrameState {
    pub(crate) fn new() -> Self {
        Self {
            cursor_visible: true,
            blink: None,
            last_blink: None,
            scroll: None,
            animation: None,
        }
    }

    /// Drop the running animation and hand back every scheduled frame.
    pub(crate) fn take_scheduled(&mut self) -> Vec<FrameId> {
        self.animation = None;
        [self.blink.take(), self.scroll.take()].into_iter().flatten().collect()
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
struct ScrollAnimation {
    from: (u32, u32),
    to: (u32, u32),
    frame: u32,
}

impl ScrollAnimation {
    /// Ease-out cubic position for the current frame.
    fn position(&self) -> (u32, u32) {
        if self.frame >= SCROLL_ANIMATION_FRAMES {
            return self.to;
        }
        let t = self.frame as f64 / SCROLL_ANIMATION_FRAMES as f64;
        let eased = 1.0 - (1.0 - t).powi(3);
        let lerp = |a: u32, b: u32| (a as f64 + (b as f64 - a as f64) * eased).round() as u32;
        (lerp(self.from.0, self.to.0), lerp(self.from.1, self.to.1))
    }
}

impl<A: FrameworkAdapter> GridEngine<A> {
    pub(super) fn schedule_blink(&self) {
        let weak = self.downgrade();
        let id = self.shared.adapter.request_animation_frame(Box::new(move |now: Duration| {
            if let Some(engine) = Self::upgrade(&weak) {
                engine.blink_frame(now);
            }
        }));
        self.shared.inner.borrow_mut().frames.blink = Some(id);
    }

    fn blink_frame(&self, now: Duration) {
        let toggled = {
            let mut inner = self.shared.inner.borrow_mut();
            inner.frames.blink = None;
            if inner.element.is_none() {
                return;
            }
            let last = *inner.frames.last_blink.get_or_insert(now);
            if now.saturating_sub(last) >= BLINK_INTERVAL {
                inner.frames.cursor_visible = !inner.frames.cursor_visible;
                inner.frames.last_blink = Some(now);
                true
            } else {
                false
            }
        };
        if toggled {
            self.render();
        }
        self.schedule_blink();
    }

    pub(super) fn start_scroll_animation(&self, target: (u32, u32)) {
        self.cancel_scroll_animation();
        let from = {
            let inner = self.shared.inner.borrow();
            inner.canvas.as_ref().map(|canvas| {
                let viewport = canvas.viewport();
                (viewport.x, viewport.y)
            })
        };
        let Some(from) = from else {
            return;
        };
        if from == target {
            return;
        }
        trace!("Animating scroll {:?} -> {:?}", from, target);
        self.shared.inner.borrow_mut().frames.animation = Some(ScrollAnimation {
            from,
            to: target,
            frame: 0,
        });
        self.schedule_scroll_frame();
    }

    fn schedule_scroll_frame(&self) {
        let weak = self.downgrade();
        let id = self.shared.adapter.request_animation_frame(Box::new(move |_: Duration| {
            if let Some(engine) = Self::upgrade(&weak) {
                engine.scroll_frame();
            }
        }));
        self.shared.inner.borrow_mut().frames.scroll = Some(id);
    }

    fn scroll_frame(&self) {
        let step = {
            let mut inner = self.shared.inner.borrow_mut();
            inner.frames.scroll = None;
            match inner.frames.animation.as_mut() {
                Some(animation) => {
                    animation.frame += 1;
                    let done = animation.frame >= SCROLL_ANIMATION_FRAMES;
                    let position = animation.position();
                    if done {
                        inner.frames.animation = None;
                    }
                    Some((position, done))
                }
                None => None,
            }
        };
        let Some(((x, y), done)) = step else {
            return;
        };

        self.apply_scroll(x, y);
        if done {
            self.notify_viewport_change();
        } else {
            self.schedule_scroll_frame();
        }
    }

    pub(super) fn cancel_scroll_animation(&self) {
        let scheduled = {
            let mut inner = self.shared.inner.borrow_mut();
            inner.frames.animation = None;
            inner.frames.scroll.take()
        };
        if let Some(id) = scheduled {
            self.shared.adapter.cancel_animation_frame(id);
        }
    }

    /// Move the canvas to a pixel position and redraw. Returns true if the
    /// view moved.
    pub(super) fn apply_scroll(&self, x: u32, y: u32) -> bool {
        let moved = {
            let mut inner = self.shared.inner.borrow_mut();
            match inner.canvas.as_mut() {
                Some(canvas) => canvas.scroll_to(x, y),
                None => false,
            }
        };
        if moved {
            self.render();
        }
        moved
    }
}
