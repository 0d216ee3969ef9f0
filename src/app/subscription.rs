// SPDX-License-Identifier: MPL-2.0
//! Event subscriptions for the application.
//!
//! This module routes native events (keyboard, mouse, touch, window) to the
//! lightbox while it is open, and drives the periodic ticks that animate
//! spinners, fades and toasts.

use super::Message;
use crate::config::SPINNER_TICK;
use crate::ui::lightbox;
use iced::keyboard::{self, key::Named, Key};
use iced::mouse::{self, ScrollDelta};
use iced::{event, time, touch, window, Event, Subscription};
use std::time::Duration;

/// Creates the native event subscription.
///
/// Window resizes and the diagnostics shortcut are handled on every screen.
/// Pointer, touch and navigation keys are only routed while a lightbox is
/// open; the page handles its own input otherwise.
pub fn create_event_subscription(lightbox_open: bool) -> Subscription<Message> {
    if lightbox_open {
        event::listen_with(|event, status, _window| {
            shared_event(&event).or_else(|| lightbox_event(event, status))
        })
    } else {
        event::listen_with(|event, _status, _window| shared_event(&event))
    }
}

fn shared_event(event: &Event) -> Option<Message> {
    match event {
        Event::Window(window::Event::Resized(size)) => Some(Message::WindowResized(*size)),
        Event::Keyboard(keyboard::Event::KeyPressed { key, modifiers, .. })
            if is_diagnostics_shortcut(key, *modifiers) =>
        {
            Some(Message::ExportDiagnostics)
        }
        _ => None,
    }
}

fn is_diagnostics_shortcut(key: &Key, modifiers: keyboard::Modifiers) -> bool {
    modifiers.control()
        && modifiers.shift()
        && matches!(key, Key::Character(c) if c.eq_ignore_ascii_case("d"))
}

fn lightbox_event(event: Event, status: event::Status) -> Option<Message> {
    let captured = status == event::Status::Captured;
    let message = match event {
        Event::Keyboard(keyboard::Event::KeyPressed {
            key: Key::Named(named),
            ..
        }) => match named {
            Named::Escape => lightbox::Message::Escape,
            Named::ArrowLeft => lightbox::Message::ArrowLeft,
            Named::ArrowRight => lightbox::Message::ArrowRight,
            _ => return None,
        },
        Event::Mouse(mouse::Event::CursorMoved { position }) => {
            lightbox::Message::CursorMoved(position)
        }
        Event::Mouse(mouse::Event::CursorLeft) => lightbox::Message::CursorLeft,
        Event::Mouse(mouse::Event::ButtonPressed(mouse::Button::Left)) => {
            lightbox::Message::LeftPressed { captured }
        }
        Event::Mouse(mouse::Event::ButtonReleased(mouse::Button::Left)) => {
            lightbox::Message::LeftReleased
        }
        Event::Mouse(mouse::Event::WheelScrolled { delta }) => {
            lightbox::Message::WheelScrolled {
                delta_y: wheel_delta_y(delta),
            }
        }
        // A finger landing on a control belongs to that control.
        Event::Touch(touch::Event::FingerPressed { .. }) if captured => return None,
        Event::Touch(touch_event) => lightbox::Message::Touch(touch_event),
        _ => return None,
    };
    Some(Message::Lightbox(message))
}

fn wheel_delta_y(delta: ScrollDelta) -> f32 {
    match delta {
        ScrollDelta::Lines { y, .. } | ScrollDelta::Pixels { y, .. } => y,
    }
}

/// Creates the tick subscriptions.
///
/// - spinners turn while anything is still loading
/// - display frames are requested while a fade is running
/// - toasts are checked for expiry while any is shown
pub fn create_tick_subscription(
    is_loading: bool,
    is_animating: bool,
    has_notifications: bool,
) -> Subscription<Message> {
    let spinner = if is_loading {
        time::every(SPINNER_TICK).map(|_| Message::SpinnerTick)
    } else {
        Subscription::none()
    };

    let frames = if is_animating {
        window::frames().map(Message::AnimationFrame)
    } else {
        Subscription::none()
    };

    let notifications = if has_notifications {
        time::every(Duration::from_millis(100)).map(Message::Tick)
    } else {
        Subscription::none()
    };

    Subscription::batch([spinner, frames, notifications])
}

#[cfg(test)]
mod tests {
    use super::*;
    use iced::Point;

    #[test]
    fn ctrl_shift_d_exports_diagnostics() {
        let modifiers = keyboard::Modifiers::CTRL | keyboard::Modifiers::SHIFT;
        assert!(is_diagnostics_shortcut(&Key::Character("D".into()), modifiers));
        assert!(is_diagnostics_shortcut(&Key::Character("d".into()), modifiers));
    }

    #[test]
    fn d_without_both_modifiers_is_ignored() {
        let key = Key::Character("d".into());
        assert!(!is_diagnostics_shortcut(&key, keyboard::Modifiers::default()));
        assert!(!is_diagnostics_shortcut(&key, keyboard::Modifiers::CTRL));
    }

    #[test]
    fn resize_is_handled_on_every_screen() {
        let event = Event::Window(window::Event::Resized(iced::Size::new(640.0, 480.0)));
        assert!(matches!(shared_event(&event), Some(Message::WindowResized(_))));
    }

    #[test]
    fn press_on_a_control_is_reported_as_captured() {
        let event = Event::Mouse(mouse::Event::ButtonPressed(mouse::Button::Left));
        assert!(matches!(
            lightbox_event(event, event::Status::Captured),
            Some(Message::Lightbox(lightbox::Message::LeftPressed { captured: true }))
        ));
    }

    #[test]
    fn finger_on_a_control_does_not_start_a_gesture() {
        let event = Event::Touch(touch::Event::FingerPressed {
            id: touch::Finger(1),
            position: Point::new(5.0, 5.0),
        });
        assert!(lightbox_event(event.clone(), event::Status::Captured).is_none());
        assert!(lightbox_event(event, event::Status::Ignored).is_some());
    }

    #[test]
    fn pixel_and_line_deltas_keep_their_sign() {
        assert!(wheel_delta_y(ScrollDelta::Lines { x: 0.0, y: 1.0 }) > 0.0);
        assert!(wheel_delta_y(ScrollDelta::Pixels { x: 0.0, y: -12.0 }) < 0.0);
    }
}
