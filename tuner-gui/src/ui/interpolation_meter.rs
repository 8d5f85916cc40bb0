//! # Interpolation Meter Widget
//!
//! A horizontal indicator for the interpolation value. The center marks the
//! matched note, the left end the lower neighbor and the right end the
//! higher neighbor. Major ticks every `R/2`, minor ticks every `R/8`.

use iced::widget::canvas::{self, Geometry, Path, Stroke};
use iced::widget::container;
use iced::{Color, Element, Point, Rectangle, Renderer, Size, Theme, mouse};

/// Interpolation meter widget.
pub struct InterpolationMeter {
    /// Current interpolation value
    value: i32,
    /// Half-range `R` of the scale
    range: i32,
}

impl InterpolationMeter {
    pub fn new(value: i32, range: i32) -> Self {
        Self { value, range }
    }

    /// Creates the view element for the meter.
    pub fn view(self) -> Element<'static, crate::Message> {
        container(
            canvas::Canvas::new(self)
                .width(iced::Length::Fill)
                .height(iced::Length::Fixed(60.0)),
        )
        .into()
    }
}

/// Horizontal position of `value` on a `[-range, range]` scale, in `[0, 1]`.
fn needle_fraction(value: i32, range: i32) -> f32 {
    if range <= 0 {
        return 0.5;
    }
    let clamped = value.clamp(-range, range);
    (clamped + range) as f32 / (2 * range) as f32
}

impl<Message> canvas::Program<Message> for InterpolationMeter {
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

        let background = Path::rectangle(Point::ORIGIN, bounds.size());
        frame.fill(&background, Color::from_rgb8(0x40, 0x40, 0x40));

        // Ticks: 16 minor steps across the scale, every fourth one major
        for step in 0..=16 {
            let x = bounds.width * step as f32 / 16.0;
            let (height, width) = if step % 4 == 0 {
                (bounds.height * 0.5, 2.0)
            } else {
                (bounds.height * 0.25, 1.0)
            };
            let tick = Path::line(
                Point::new(x, bounds.height - height),
                Point::new(x, bounds.height),
            );
            frame.stroke(
                &tick,
                Stroke::default()
                    .with_width(width)
                    .with_color(Color::from_rgb8(0xA0, 0xA0, 0xA0)),
            );
        }

        let center_x = bounds.width / 2.0;
        let center_line = Path::line(
            Point::new(center_x, 0.0),
            Point::new(center_x, bounds.height),
        );
        frame.stroke(
            &center_line,
            Stroke::default().with_width(2.0).with_color(Color::WHITE),
        );

        let needle_pos = needle_fraction(self.value, self.range) * bounds.width;
        let offset = self.value.unsigned_abs() as f32 / self.range.max(1) as f32;
        let color = if offset < 0.05 {
            Color::from_rgb8(0x34, 0xDB, 0x98) // Green
        } else if offset < 0.25 {
            Color::from_rgb8(0xFF, 0xC3, 0x00) // Yellow
        } else {
            Color::from_rgb8(0xFF, 0x33, 0x33) // Red
        };

        let needle = Path::rectangle(
            Point::new(needle_pos - 2.0, 0.0),
            Size::new(4.0, bounds.height),
        );
        frame.fill(&needle, color);

        vec![frame.into_geometry()]
    }
}
