//! # Main Display Module
//!
//! This module contains the main display layout for the octave tuner:
//! the three note labels, the interpolation meter and the frequency readout.

use iced::widget::{Space, column, container, horizontal_space, row, text};
use iced::{Alignment, Element, Length};

use super::interpolation_meter::InterpolationMeter;

/// Creates the complete main application view
pub fn create_main_view(data: &crate::AppDisplayData) -> Element<'static, crate::Message> {
    // Show why the audio thread stopped instead of a frozen reading
    if let Some(status) = &data.status {
        return container(text(status.clone()).size(28))
            .width(Length::Fill)
            .height(Length::Fill)
            .center_x(Length::Fill)
            .center_y(Length::Fill)
            .into();
    }

    let result = &data.last_result;

    // The lower neighbor sits on the negative side of the meter
    let labels = row![
        text(result.next_label).size(24),
        horizontal_space(),
        text(result.note_label).size(48),
        horizontal_space(),
        text(result.previous_label).size(24),
    ]
    .align_y(Alignment::Center);

    let meter = InterpolationMeter::new(result.interpolation, data.interpolation_range).view();

    let main_content = column![
        labels,
        Space::with_height(10),
        meter,
        Space::with_height(10),
        text(result.frequency_label()).size(14),
    ]
    .align_x(Alignment::Center)
    .width(Length::Fill)
    .padding(20);

    container(main_content)
        .width(Length::Fill)
        .height(Length::Fill)
        .into()
}
