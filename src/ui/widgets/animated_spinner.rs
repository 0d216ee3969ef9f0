// SPDX-License-Identifier: MPL-2.0
//! Rotating arc drawn on a canvas, shown while images load.
//!
//! The spinner is stateless: the app advances a shared rotation angle on a
//! timer and every pending tile draws itself at that angle.

use crate::ui::design_tokens::sizing;
use iced::widget::canvas::{self, path, Cache, Canvas, Frame, Geometry, Path, Stroke};
use iced::{mouse, Color, Element, Length, Point, Rectangle, Renderer, Theme};
use std::f32::consts::{PI, TAU};

/// Radians added per animation tick.
pub const ROTATION_STEP: f32 = 0.12;

const ARC_SEGMENTS: u16 = 30;

pub struct AnimatedSpinner {
    cache: Cache,
    rotation: f32,
    color: Color,
    size: f32,
}

impl AnimatedSpinner {
    #[must_use]
    pub fn new(color: Color, rotation: f32) -> Self {
        Self {
            cache: Cache::default(),
            rotation,
            color,
            size: sizing::ICON_XL,
        }
    }

    /// Overrides the default diameter.
    #[must_use]
    pub fn size(mut self, size: f32) -> Self {
        self.size = size;
        self
    }

    pub fn into_element<'a, Message: 'a>(self) -> Element<'a, Message> {
        let size = self.size;
        Canvas::new(self)
            .width(Length::Fixed(size))
            .height(Length::Fixed(size))
            .into()
    }
}

/// Next rotation angle, wrapped into `[0, 2π)`.
#[must_use]
pub fn advance(rotation: f32) -> f32 {
    (rotation + ROTATION_STEP).rem_euclid(TAU)
}

impl<Message> canvas::Program<Message> for AnimatedSpinner {
    type State = ();

    fn draw(
        &self,
        _state: &Self::State,
        renderer: &Renderer,
        _theme: &Theme,
        bounds: Rectangle,
        _cursor: mouse::Cursor,
    ) -> Vec<Geometry> {
        let geometry = self
            .cache
            .draw(renderer, bounds.size(), |frame: &mut Frame| {
                let center = frame.center();
                let stroke_width = (self.size / 12.0).max(2.0);
                let radius = frame.width().min(frame.height()) / 2.0 - stroke_width;

                frame.stroke(
                    &Path::circle(center, radius),
                    Stroke::default()
                        .with_width(stroke_width)
                        .with_color(Color {
                            a: 0.25,
                            ..self.color
                        }),
                );

                // Half circle starting at twelve o'clock
                let start = self.rotation - PI / 2.0;
                let mut arc = path::Builder::new();
                arc.move_to(on_circle(center, radius, start));
                for i in 1..=ARC_SEGMENTS {
                    let t = f32::from(i) / f32::from(ARC_SEGMENTS);
                    arc.line_to(on_circle(center, radius, start + PI * t));
                }

                frame.stroke(
                    &arc.build(),
                    Stroke::default()
                        .with_width(stroke_width)
                        .with_color(self.color)
                        .with_line_cap(canvas::LineCap::Round),
                );
            });

        vec![geometry]
    }
}

fn on_circle(center: Point, radius: f32, angle: f32) -> Point {
    Point::new(center.x + radius * angle.cos(), center.y + radius * angle.sin())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn advance_wraps_around() {
        let rotation = advance(TAU - ROTATION_STEP / 2.0);
        assert!(rotation >= 0.0 && rotation < TAU);
        assert!((rotation - ROTATION_STEP / 2.0).abs() < 1e-4);
    }

    #[test]
    fn on_circle_at_zero_is_right_of_center() {
        let point = on_circle(Point::new(10.0, 10.0), 5.0, 0.0);
        assert!((point.x - 15.0).abs() < 1e-5);
        assert!((point.y - 10.0).abs() < 1e-5);
    }
}
