//! Bottom status bar: file path, modified marker, lock state, last status.

use iced::widget::{container, row, text, Space};
use iced::{Element, Length, Padding};

use crate::{App, Message};

pub fn view_status_bar(app: &App) -> Element<'_, Message> {
    let file_label = match &app.current_file {
        Some(path) => format!(
            "{}{}",
            path.display(),
            if app.is_modified { " *" } else { "" }
        ),
        None => format!("untitled{}", if app.is_modified { " *" } else { "" }),
    };

    let lock_label = match &app.read_only_by {
        Some(holder) => format!("READ-ONLY (locked by {})", holder),
        None if app.lock.is_some() => "locked by you".to_string(),
        None => String::new(),
    };

    container(
        row![
            text(file_label).size(10),
            Space::new().width(16),
            text(lock_label).size(10).color([0.6, 0.3, 0.0]),
            Space::new().width(Length::Fill),
            text(&app.status).size(10),
            Space::new().width(16),
            text(format!("{} designs", app.project.designs.len())).size(10),
        ]
        .padding(Padding::from([4, 8])),
    )
    .width(Length::Fill)
    .style(container::bordered_box)
    .into()
}
