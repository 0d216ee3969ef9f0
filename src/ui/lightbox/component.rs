// SPDX-License-Identifier: MPL-2.0
//! Lightbox state machine.
//!
//! The lightbox never touches the gallery selection itself. It reports
//! [`Effect::Advance`] and [`Effect::Closed`] and the app applies them to the
//! gallery filter. Timers are requested through [`Effect::Schedule`] and come
//! back as [`Message::TimerFired`].

use super::fade::Fade;
use super::timers::{TimerKind, TimerToken, Timers, TokenSource};
use crate::application::Direction;
use crate::media::{aspect_ratio, ImageData};
use crate::ui::state::{
    backdrop_alpha, DragState, PinchState, ScrollLock, ScrollLockGuard, SwipeRelease, SwipeState,
    ViewerTransform, ViewportGeometry,
};
use iced::{touch, Point, Size};
use std::collections::HashMap;
use std::time::{Duration, Instant};

/// Lifecycle of one lightbox session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Opening,
    Open,
    Closing,
    Closed,
}

/// Pointer gesture currently owning the image.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Gesture {
    Idle,
    Swipe,
    TouchPan,
    MousePan,
    Pinch,
    /// Fingers are down but no gesture applies; wait until all are lifted.
    Blocked,
}

#[derive(Debug, Clone)]
pub enum Message {
    Close,
    Next,
    Previous,
    ZoomIn,
    ZoomOut,
    ResetZoom,
    TimerFired { token: TimerToken, kind: TimerKind },
    AnimationFrame(Instant),
    WindowResized(Size),
    CursorMoved(Point),
    CursorLeft,
    /// Left button pressed. `captured` is true when a control handled it.
    LeftPressed { captured: bool },
    LeftReleased,
    /// Wheel delta; positive scrolls up (zooms in).
    WheelScrolled { delta_y: f32 },
    Touch(touch::Event),
    Escape,
    ArrowLeft,
    ArrowRight,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Effect {
    None,
    /// Run a timer and report back with [`Message::TimerFired`].
    Schedule {
        token: TimerToken,
        kind: TimerKind,
        after: Duration,
    },
    /// The cross-fade finished; move the selection.
    Advance(Direction),
    /// The session is over and can be dropped.
    Closed,
}

pub struct State {
    phase: Phase,
    transitioning: bool,
    transform: ViewerTransform,
    drag: DragState,
    swipe: SwipeState,
    pinch: Option<PinchState>,
    touches: HashMap<touch::Finger, Point>,
    gesture: Gesture,
    timers: Timers,
    window: Option<Size>,
    cursor: Option<Point>,
    url: String,
    alt: String,
    image: Option<ImageData>,
    overlay: Fade,
    image_fade: Fade,
    now: Instant,
    scroll: Option<ScrollLockGuard>,
}

impl std::fmt::Debug for State {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Lightbox")
            .field("phase", &self.phase)
            .field("transitioning", &self.transitioning)
            .field("transform", &self.transform)
            .field("url", &self.url)
            .finish_non_exhaustive()
    }
}

impl State {
    /// Opens a session on `url`, locking page scrolling.
    ///
    /// Timer tokens are drawn from `tokens`. The returned effect schedules
    /// the fade-in.
    pub fn open(
        scroll_lock: &ScrollLock,
        tokens: &TokenSource,
        url: impl Into<String>,
        alt: impl Into<String>,
        image: Option<ImageData>,
        window: Option<Size>,
    ) -> (Self, Effect) {
        let now = Instant::now();
        let mut state = Self {
            phase: Phase::Opening,
            transitioning: false,
            transform: ViewerTransform::default(),
            drag: DragState::default(),
            swipe: SwipeState::default(),
            pinch: None,
            touches: HashMap::new(),
            gesture: Gesture::Idle,
            timers: Timers::new(tokens.clone()),
            window,
            cursor: None,
            url: url.into(),
            alt: alt.into(),
            image,
            overlay: Fade::settled(0.0, now),
            image_fade: Fade::settled(1.0, now),
            now,
            scroll: Some(scroll_lock.acquire()),
        };
        let effect = state.schedule(TimerKind::FadeIn);
        (state, effect)
    }

    /// Swaps in the photo the selection moved to.
    pub fn show(&mut self, url: impl Into<String>, alt: impl Into<String>, image: Option<ImageData>) {
        self.url = url.into();
        self.alt = alt.into();
        self.image = image;
        self.transform.reset();
    }

    /// Supplies the decoded image once it arrives. Ignored for other locators.
    pub fn image_loaded(&mut self, url: &str, image: ImageData) {
        if self.url == url {
            self.image = Some(image);
        }
    }

    pub fn handle(&mut self, message: Message) -> Effect {
        if let Message::TimerFired { token, kind } = message {
            return self.on_timer(token, kind);
        }
        if let Message::AnimationFrame(now) = message {
            self.now = now;
            return Effect::None;
        }
        if let Message::WindowResized(size) = message {
            self.window = Some(size);
            let geometry = self.geometry();
            self.transform.set_scale(self.transform.scale(), geometry.as_ref());
            return Effect::None;
        }
        if self.is_closing() {
            return Effect::None;
        }

        match message {
            Message::Close | Message::Escape => self.request_close(),
            Message::Next | Message::ArrowRight => self.navigate(Direction::Next),
            Message::Previous | Message::ArrowLeft => self.navigate(Direction::Previous),
            Message::ZoomIn => {
                let geometry = self.geometry();
                self.transform.zoom_in(geometry.as_ref());
                Effect::None
            }
            Message::ZoomOut => {
                let geometry = self.geometry();
                self.transform.zoom_out(geometry.as_ref());
                self.sync_pan();
                Effect::None
            }
            Message::ResetZoom => {
                self.reset_transform();
                Effect::None
            }
            Message::CursorMoved(position) => self.on_cursor_moved(position),
            Message::CursorLeft => {
                self.cursor = None;
                self.end_mouse_pan();
                Effect::None
            }
            Message::LeftPressed { captured } => self.on_left_pressed(captured),
            Message::LeftReleased => {
                self.end_mouse_pan();
                Effect::None
            }
            Message::WheelScrolled { delta_y } => self.on_wheel(delta_y),
            Message::Touch(event) => self.on_touch(event),
            Message::TimerFired { .. }
            | Message::AnimationFrame(_)
            | Message::WindowResized(_) => Effect::None,
        }
    }

    fn on_timer(&mut self, token: TimerToken, kind: TimerKind) -> Effect {
        if !self.timers.fire(token, kind) {
            return Effect::None;
        }
        match kind {
            TimerKind::FadeIn => {
                if self.phase == Phase::Opening {
                    self.phase = Phase::Open;
                    self.overlay.retarget(1.0, Instant::now());
                }
                Effect::None
            }
            TimerKind::Navigate(direction) => {
                self.transitioning = false;
                self.image_fade.retarget(1.0, Instant::now());
                Effect::Advance(direction)
            }
            TimerKind::Close => {
                self.phase = Phase::Closed;
                self.scroll = None;
                Effect::Closed
            }
            TimerKind::SnapBack => {
                self.swipe.finish_snap();
                Effect::None
            }
        }
    }

    fn request_close(&mut self) -> Effect {
        if self.is_closing() {
            return Effect::None;
        }
        self.phase = Phase::Closing;
        self.reset_transform();
        self.transitioning = false;
        self.timers.cancel(TimerKind::FadeIn);
        self.timers.cancel(TimerKind::Navigate(Direction::Next));
        self.overlay.retarget(0.0, Instant::now());
        self.schedule(TimerKind::Close)
    }

    fn navigate(&mut self, direction: Direction) -> Effect {
        if self.transform.is_zoomed()
            || self.is_closing()
            || self.timers.is_pending(TimerKind::Navigate(direction))
        {
            return Effect::None;
        }
        self.reset_transform();
        self.transitioning = true;
        self.image_fade.retarget(0.0, Instant::now());
        self.schedule(TimerKind::Navigate(direction))
    }

    fn schedule(&mut self, kind: TimerKind) -> Effect {
        match self.timers.schedule(kind) {
            Some(token) => Effect::Schedule {
                token,
                kind,
                after: kind.duration(),
            },
            None => Effect::None,
        }
    }

    fn on_cursor_moved(&mut self, position: Point) -> Effect {
        self.cursor = Some(position);
        if self.gesture != Gesture::MousePan {
            return Effect::None;
        }
        let geometry = self.geometry();
        if !geometry.is_some_and(|geometry| geometry.contains(position)) {
            self.end_mouse_pan();
            return Effect::None;
        }
        if let Some(offset) = self.drag.calculate_offset(position) {
            self.transform.pan_to(offset, geometry.as_ref());
        }
        Effect::None
    }

    fn on_left_pressed(&mut self, captured: bool) -> Effect {
        if captured || self.gesture != Gesture::Idle {
            return Effect::None;
        }
        let (Some(cursor), Some(geometry)) = (self.cursor, self.geometry()) else {
            return Effect::None;
        };

        if geometry.contains(cursor) {
            if self.transform.begin_pan() {
                self.drag.start(cursor, self.transform.offset());
                self.gesture = Gesture::MousePan;
            }
            Effect::None
        } else if self.swipe.vertical_offset() == 0.0 {
            self.request_close()
        } else {
            Effect::None
        }
    }

    fn end_mouse_pan(&mut self) {
        if self.gesture == Gesture::MousePan {
            self.gesture = Gesture::Idle;
            self.drag.stop();
            self.transform.end_pan();
        }
    }

    fn on_wheel(&mut self, delta_y: f32) -> Effect {
        let Some(cursor) = self.cursor else {
            return Effect::None;
        };
        let Some(geometry) = self.geometry() else {
            return Effect::None;
        };
        if !geometry.contains(cursor) || delta_y == 0.0 {
            return Effect::None;
        }
        self.transform
            .wheel(delta_y.signum(), geometry.from_center(cursor), Some(&geometry));
        self.sync_pan();
        Effect::None
    }

    fn on_touch(&mut self, event: touch::Event) -> Effect {
        match event {
            touch::Event::FingerPressed { id, position } => {
                self.touches.insert(id, position);
                self.on_finger_down(position)
            }
            touch::Event::FingerMoved { id, position } => {
                if let Some(point) = self.touches.get_mut(&id) {
                    *point = position;
                    self.on_finger_moved(position);
                }
                Effect::None
            }
            touch::Event::FingerLifted { id, position } => {
                if self.touches.remove(&id).is_none() {
                    return Effect::None;
                }
                let effect = self.on_finger_up(Some(position));
                self.settle_gesture();
                effect
            }
            touch::Event::FingerLost { id, .. } => {
                if self.touches.remove(&id).is_none() {
                    return Effect::None;
                }
                let effect = self.on_finger_up(None);
                self.settle_gesture();
                effect
            }
        }
    }

    fn on_finger_down(&mut self, position: Point) -> Effect {
        match self.touches.len() {
            1 if self.gesture == Gesture::Idle => {
                let inside = self
                    .geometry()
                    .is_some_and(|geometry| geometry.contains(position));
                self.gesture = if !inside || self.transitioning {
                    Gesture::Blocked
                } else if self.transform.begin_pan() {
                    self.drag.start(position, self.transform.offset());
                    Gesture::TouchPan
                } else {
                    self.swipe.begin(position);
                    Gesture::Swipe
                };
                Effect::None
            }
            2 => {
                let effect = self.abandon_single_finger();
                let mut fingers = self.touches.values().copied();
                self.pinch = match (fingers.next(), fingers.next()) {
                    (Some(a), Some(b)) => PinchState::begin(a, b, self.transform.scale()),
                    _ => None,
                };
                self.gesture = if self.pinch.is_some() {
                    Gesture::Pinch
                } else {
                    Gesture::Blocked
                };
                effect
            }
            _ => {
                let effect = self.abandon_single_finger();
                self.pinch = None;
                self.gesture = Gesture::Blocked;
                effect
            }
        }
    }

    fn on_finger_moved(&mut self, position: Point) {
        match self.gesture {
            Gesture::Swipe => self.swipe.update(position),
            Gesture::TouchPan => {
                if let Some(offset) = self.drag.calculate_offset(position) {
                    let geometry = self.geometry();
                    self.transform.pan_to(offset, geometry.as_ref());
                }
            }
            Gesture::Pinch => {
                let mut fingers = self.touches.values().copied();
                if let (Some(pinch), Some(a), Some(b)) =
                    (self.pinch, fingers.next(), fingers.next())
                {
                    let geometry = self.geometry();
                    self.transform
                        .set_scale(pinch.scale_for(a, b), geometry.as_ref());
                }
            }
            Gesture::Idle | Gesture::MousePan | Gesture::Blocked => {}
        }
    }

    /// `lifted_at` is `None` when the platform lost the finger.
    fn on_finger_up(&mut self, lifted_at: Option<Point>) -> Effect {
        match (self.gesture, lifted_at) {
            (Gesture::Swipe, None) => {
                self.gesture = Gesture::Blocked;
                if self.swipe.abandon() {
                    self.schedule(TimerKind::SnapBack)
                } else {
                    Effect::None
                }
            }
            (Gesture::Swipe, Some(position)) => {
                self.gesture = Gesture::Blocked;
                match self.swipe.release(position) {
                    SwipeRelease::Close => self.request_close(),
                    SwipeRelease::SnapBack => self.schedule(TimerKind::SnapBack),
                    SwipeRelease::Navigate(direction) => self.navigate(direction),
                    SwipeRelease::None => Effect::None,
                }
            }
            (Gesture::TouchPan, _) => {
                self.gesture = Gesture::Blocked;
                self.drag.stop();
                self.transform.end_pan();
                Effect::None
            }
            (Gesture::Pinch, _) => {
                self.gesture = Gesture::Blocked;
                self.pinch = None;
                Effect::None
            }
            (Gesture::Idle | Gesture::MousePan | Gesture::Blocked, _) => Effect::None,
        }
    }

    fn settle_gesture(&mut self) {
        if self.touches.is_empty() && self.gesture != Gesture::MousePan {
            self.gesture = Gesture::Idle;
        }
    }

    /// A second finger cancels swiping and panning.
    fn abandon_single_finger(&mut self) -> Effect {
        match self.gesture {
            Gesture::Swipe => {
                if self.swipe.abandon() {
                    return self.schedule(TimerKind::SnapBack);
                }
            }
            Gesture::TouchPan | Gesture::MousePan => {
                self.drag.stop();
                self.transform.end_pan();
            }
            Gesture::Idle | Gesture::Pinch | Gesture::Blocked => {}
        }
        Effect::None
    }

    fn reset_transform(&mut self) {
        self.transform.reset();
        self.drag.stop();
        self.pinch = None;
        if matches!(self.gesture, Gesture::MousePan) {
            self.gesture = Gesture::Idle;
        } else if matches!(self.gesture, Gesture::TouchPan | Gesture::Pinch) {
            self.gesture = Gesture::Blocked;
        }
    }

    /// Drops a drag left behind when a zoom-out reached the unzoomed scale.
    fn sync_pan(&mut self) {
        if !self.transform.is_panning() {
            self.drag.stop();
            if self.gesture == Gesture::MousePan {
                self.gesture = Gesture::Idle;
            }
        }
    }

    fn is_closing(&self) -> bool {
        matches!(self.phase, Phase::Closing | Phase::Closed)
    }

    /// Container and image geometry, `None` until the window size is known.
    #[must_use]
    pub fn geometry(&self) -> Option<ViewportGeometry> {
        ViewportGeometry::new(self.window?, self.image_size())
    }

    /// Intrinsic size of the shown image, or the locator's ratio before it loads.
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn image_size(&self) -> Size {
        match &self.image {
            Some(image) => Size::new(image.width as f32, image.height as f32),
            None => {
                let ratio = aspect_ratio(&self.url);
                Size::new(ratio.width as f32, ratio.height as f32)
            }
        }
    }

    #[must_use]
    pub fn phase(&self) -> Phase {
        self.phase
    }

    #[must_use]
    pub fn is_transitioning(&self) -> bool {
        self.transitioning
    }

    #[must_use]
    pub fn transform(&self) -> &ViewerTransform {
        &self.transform
    }

    #[must_use]
    pub fn swipe(&self) -> &SwipeState {
        &self.swipe
    }

    #[must_use]
    pub fn url(&self) -> &str {
        &self.url
    }

    #[must_use]
    pub fn alt(&self) -> &str {
        &self.alt
    }

    #[must_use]
    pub fn image(&self) -> Option<&ImageData> {
        self.image.as_ref()
    }

    /// Returns whether this session still holds the page scroll lock.
    #[must_use]
    pub fn holds_scroll_lock(&self) -> bool {
        self.scroll.is_some()
    }

    /// Backdrop opacity, combining the open/close fade and the swipe offset.
    #[must_use]
    pub fn backdrop_alpha(&self) -> f32 {
        backdrop_alpha(self.swipe.vertical_offset()) * self.overlay.value(self.now)
    }

    /// Opacity of the controls and hint.
    #[must_use]
    pub fn overlay_opacity(&self) -> f32 {
        self.overlay.value(self.now)
    }

    /// Opacity of the image itself.
    #[must_use]
    pub fn image_opacity(&self) -> f32 {
        self.overlay.value(self.now) * self.image_fade.value(self.now)
    }

    /// Returns whether a fade is running and animation frames are needed.
    #[must_use]
    pub fn is_animating(&self) -> bool {
        let now = Instant::now();
        self.phase == Phase::Opening
            || self.overlay.is_running(now)
            || self.image_fade.is_running(now)
            || self.swipe.is_snapping()
    }
}
