//! Top toolbar: project file actions, geometry import/export, analysis.

use iced::widget::{button, checkbox, container, row, text, Space};
use iced::{Element, Length, Padding};

use crate::{App, Message};

fn toolbar_button(label: &'static str, message: Message) -> Element<'static, Message> {
    button(text(label).size(11))
        .on_press(message)
        .padding(Padding::from([4, 8]))
        .style(button::secondary)
        .into()
}

pub fn view_toolbar(app: &App) -> Element<'_, Message> {
    let run_button = button(text("Run Analysis").size(11))
        .on_press(Message::RunAnalysis)
        .padding(Padding::from([4, 8]))
        .style(button::primary);

    container(
        row![
            toolbar_button("New", Message::NewProject),
            toolbar_button("Open", Message::OpenProject),
            toolbar_button("Save", Message::SaveProject),
            toolbar_button("Save As", Message::SaveProjectAs),
            Space::new().width(12),
            toolbar_button("Import Geometry", Message::ImportGeometry),
            toolbar_button("Export Geometry", Message::ExportGeometry),
            Space::new().width(12),
            run_button,
            Space::new().width(Length::Fill),
            checkbox(app.dark_mode)
                .label("Dark mode")
                .on_toggle(Message::ToggleDarkMode)
                .text_size(11),
        ]
        .spacing(4)
        .align_y(iced::Alignment::Center),
    )
    .padding(6)
    .style(container::bordered_box)
    .width(Length::Fill)
    .into()
}
