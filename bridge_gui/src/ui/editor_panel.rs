//! Left panel: design list plus the member and glue seam tables.
//!
//! Member rectangles are edited as centre-based `x, y, w, h` values in
//! millimetres, matching the geometry engine's representation. Fields
//! hold raw text until parsed, so a half-typed number is never rejected
//! mid-keystroke.

use iced::widget::{button, column, pick_list, row, text, text_input, Column, Space};
use iced::{Element, Length, Padding};

use bridge_core::config::Zone;

use crate::{App, GlueField, MemberField, Message};

fn field<'a>(
    placeholder: &'a str,
    value: &'a str,
    on_input: impl Fn(String) -> Message + 'a,
) -> Element<'a, Message> {
    text_input(placeholder, value)
        .on_input(on_input)
        .width(Length::Fixed(58.0))
        .size(11)
        .into()
}

fn small_button(label: &'static str, message: Message) -> Element<'static, Message> {
    button(text(label).size(11))
        .on_press(message)
        .padding(Padding::from([2, 6]))
        .style(button::secondary)
        .into()
}

fn design_list(app: &App) -> Column<'_, Message> {
    let mut list = column![text("Designs").size(13)].spacing(4);

    for (id, design) in app.project.designs_sorted() {
        let selected = app.selected_design == Some(id);
        let label = format!("{} [{}]", design.label, design.zone);
        let entry = button(text(label).size(11))
            .on_press(Message::DesignSelected(id))
            .padding(Padding::from([2, 6]))
            .width(Length::Fill)
            .style(if selected {
                button::primary
            } else {
                button::text
            });
        list = list.push(entry);
    }

    list.push(
        row![
            small_button("New", Message::NewDesign),
            small_button("Delete", Message::DeleteDesign),
        ]
        .spacing(4),
    )
}

fn member_table(app: &App) -> Column<'_, Message> {
    let header = row![
        Space::new().width(20),
        text("x").size(11).width(Length::Fixed(58.0)),
        text("y").size(11).width(Length::Fixed(58.0)),
        text("w").size(11).width(Length::Fixed(58.0)),
        text("h").size(11).width(Length::Fixed(58.0)),
    ]
    .spacing(4);

    let mut table = column![text("Members (mm, centre-based)").size(13), header].spacing(4);

    for (i, member) in app.member_rows.iter().enumerate() {
        let entry = row![
            text(format!("{}", i + 1)).size(11).width(20),
            field("x", &member.x, move |v| Message::MemberChanged(
                i,
                MemberField::X,
                v
            )),
            field("y", &member.y, move |v| Message::MemberChanged(
                i,
                MemberField::Y,
                v
            )),
            field("w", &member.w, move |v| Message::MemberChanged(
                i,
                MemberField::W,
                v
            )),
            field("h", &member.h, move |v| Message::MemberChanged(
                i,
                MemberField::H,
                v
            )),
            small_button("x", Message::RemoveMember(i)),
        ]
        .spacing(4)
        .align_y(iced::Alignment::Center);
        table = table.push(entry);
    }

    table.push(small_button("Add Member", Message::AddMember))
}

fn glue_table(app: &App) -> Column<'_, Message> {
    let header = row![
        Space::new().width(20),
        text("height").size(11).width(Length::Fixed(58.0)),
        text("width").size(11).width(Length::Fixed(58.0)),
    ]
    .spacing(4);

    let mut table = column![text("Glue Seams (mm)").size(13), header].spacing(4);

    for (i, seam) in app.glue_rows.iter().enumerate() {
        let entry = row![
            text(format!("{}", i + 1)).size(11).width(20),
            field("height", &seam.height, move |v| Message::GlueChanged(
                i,
                GlueField::Height,
                v
            )),
            field("width", &seam.width, move |v| Message::GlueChanged(
                i,
                GlueField::Width,
                v
            )),
            small_button("x", Message::RemoveGlueJoint(i)),
        ]
        .spacing(4)
        .align_y(iced::Alignment::Center);
        table = table.push(entry);
    }

    table.push(small_button("Add Seam", Message::AddGlueJoint))
}

pub fn view(app: &App) -> Element<'_, Message> {
    let identity = column![
        text("Design").size(13),
        row![
            text("Label").size(11).width(Length::Fixed(40.0)),
            text_input("label", &app.label_input)
                .on_input(Message::LabelChanged)
                .size(11)
                .width(Length::Fixed(140.0)),
        ]
        .spacing(4)
        .align_y(iced::Alignment::Center),
        row![
            text("Zone").size(11).width(Length::Fixed(40.0)),
            pick_list(&Zone::ALL[..], Some(app.selected_zone), Message::ZoneSelected)
                .width(Length::Fixed(140.0))
                .text_size(11),
        ]
        .spacing(4)
        .align_y(iced::Alignment::Center),
    ]
    .spacing(4);

    column![
        design_list(app),
        Space::new().height(8),
        identity,
        Space::new().height(8),
        member_table(app),
        Space::new().height(8),
        glue_table(app),
    ]
    .spacing(4)
    .into()
}
