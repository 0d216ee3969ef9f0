// SPDX-License-Identifier: MPL-2.0
//! Canvas drawing an image contain-fitted into its bounds, then scaled and
//! translated by the lightbox transform.

use crate::ui::state::viewport::fitted_size;
use iced::advanced::image::{FilterMethod, Handle, Image};
use iced::widget::canvas::{self, Canvas, Geometry};
use iced::{mouse, Element, Length, Point, Rectangle, Renderer, Size, Theme, Vector};

pub struct TransformedImage {
    handle: Handle,
    image_size: Size,
    scale: f32,
    offset: Vector,
    opacity: f32,
    panning: bool,
}

impl TransformedImage {
    #[must_use]
    pub fn new(handle: Handle, image_size: Size) -> Self {
        Self {
            handle,
            image_size,
            scale: 1.0,
            offset: Vector::ZERO,
            opacity: 1.0,
            panning: false,
        }
    }

    #[must_use]
    pub fn scale(mut self, scale: f32) -> Self {
        self.scale = scale;
        self
    }

    /// Translation of the image centre from the bounds centre.
    #[must_use]
    pub fn offset(mut self, offset: Vector) -> Self {
        self.offset = offset;
        self
    }

    #[must_use]
    pub fn opacity(mut self, opacity: f32) -> Self {
        self.opacity = opacity;
        self
    }

    /// Shows the grabbing cursor.
    #[must_use]
    pub fn panning(mut self, panning: bool) -> Self {
        self.panning = panning;
        self
    }

    pub fn into_element<'a, Message: 'a>(self) -> Element<'a, Message> {
        Canvas::new(self)
            .width(Length::Fill)
            .height(Length::Fill)
            .into()
    }

    /// Where the image lands inside `bounds` (local coordinates).
    fn placement(&self, bounds: Size) -> Rectangle {
        let fitted = fitted_size(bounds, self.image_size);
        let scaled = Size::new(fitted.width * self.scale, fitted.height * self.scale);
        let center = Point::new(bounds.width / 2.0, bounds.height / 2.0) + self.offset;
        Rectangle::new(
            Point::new(center.x - scaled.width / 2.0, center.y - scaled.height / 2.0),
            scaled,
        )
    }
}

impl<Message> canvas::Program<Message> for TransformedImage {
    type State = ();

    fn draw(
        &self,
        _state: &Self::State,
        renderer: &Renderer,
        _theme: &Theme,
        bounds: Rectangle,
        _cursor: mouse::Cursor,
    ) -> Vec<Geometry> {
        let mut frame = canvas::Frame::new(renderer, bounds.size());
        let target = self.placement(bounds.size());
        if target.width > 0.0 && target.height > 0.0 && self.opacity > 0.0 {
            frame.draw_image(
                target,
                Image::new(self.handle.clone())
                    .filter_method(FilterMethod::Linear)
                    .opacity(self.opacity),
            );
        }
        vec![frame.into_geometry()]
    }

    fn mouse_interaction(
        &self,
        _state: &Self::State,
        bounds: Rectangle,
        cursor: mouse::Cursor,
    ) -> mouse::Interaction {
        if !cursor.is_over(bounds) || self.scale <= 1.0 {
            mouse::Interaction::default()
        } else if self.panning {
            mouse::Interaction::Grabbing
        } else {
            mouse::Interaction::Grab
        }
    }
}
