//! Right panel: section properties, demand peaks, and the FOS table.

use iced::widget::{column, row, text, Column, Space};
use iced::{Element, Length};

use crate::{App, Message};

fn property_row(label: &'static str, value: String) -> Element<'static, Message> {
    row![
        text(label).size(11).width(Length::Fixed(56.0)),
        text(value).size(11),
    ]
    .spacing(4)
    .into()
}

fn section_properties(app: &App) -> Column<'_, Message> {
    let mut panel = column![text("Section Properties").size(13)].spacing(4);

    let Some(section) = app.parsed_section() else {
        return panel.push(text("No valid members yet").size(11));
    };

    panel = panel.push(property_row("A", format!("{:.2} mm²", section.area())));
    if let Ok(ybar) = section.centroid_y() {
        panel = panel.push(property_row("ybar", format!("{:.3} mm", ybar)));
    }
    if let Ok(inertia) = section.moment_of_inertia() {
        panel = panel.push(property_row("I", format!("{:.1} mm⁴", inertia)));
    }
    if let Ok(q) = section.first_moment_at_centroid() {
        panel = panel.push(property_row("Q", format!("{:.1} mm³", q)));
    }
    if let Ok(b) = section.width_at_centroid() {
        panel = panel.push(property_row("b", format!("{:.2} mm", b)));
    }
    panel
}

fn demand_summary(app: &App) -> Column<'_, Message> {
    let mut panel = column![text("Demand").size(13)].spacing(4);
    match &app.envelope {
        Some(envelope) => {
            panel = panel.push(property_row(
                "V max",
                format!("{:.1} N", envelope.peak_shear_n()),
            ));
            panel = panel.push(property_row(
                "M max",
                format!("{:.0} N·mm", envelope.peak_moment_nmm()),
            ));
        }
        None => {
            panel = panel.push(text("Run analysis to compute demands").size(11));
        }
    }
    panel
}

fn fos_table(app: &App) -> Column<'_, Message> {
    let mut panel = column![text("Factor of Safety").size(13)].spacing(4);

    let Some(table) = &app.results else {
        return panel.push(text("No results yet").size(11));
    };

    for entry in &table.entries {
        let pass = entry.passes();
        let color = if pass {
            [0.2, 0.6, 0.2]
        } else {
            [0.8, 0.2, 0.2]
        };
        panel = panel.push(
            row![
                text(entry.mode.display_name())
                    .size(11)
                    .width(Length::Fixed(160.0)),
                text(format!("{:.3}", entry.fos)).size(11).color(color),
                text(if pass { "[OK]" } else { "[FAIL]" })
                    .size(11)
                    .color(color),
            ]
            .spacing(6),
        );
    }

    if let Some(governing) = table.governing() {
        let verdict = format!(
            "{}: governs {} (FOS {:.3})",
            if table.passes() { "PASS" } else { "FAIL" },
            governing.mode.display_name(),
            governing.fos
        );
        let color = if table.passes() {
            [0.2, 0.6, 0.2]
        } else {
            [0.8, 0.2, 0.2]
        };
        panel = panel.push(Space::new().height(4));
        panel = panel.push(text(verdict).size(12).color(color));
    }

    panel
}

pub fn view(app: &App) -> Element<'_, Message> {
    column![
        section_properties(app),
        Space::new().height(8),
        demand_summary(app),
        Space::new().height(8),
        fos_table(app),
    ]
    .spacing(4)
    .into()
}
