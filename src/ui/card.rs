use iced::widget::{button, column, container, row, text, Column};
use iced::{Color, Element, Length};

use crate::state::data::Material;
use crate::Message;

const CARD_WIDTH: f32 = 280.0;

const NOTE_COLOR: Color = Color::from_rgb(0.35, 0.75, 0.45);
const PQ_COLOR: Color = Color::from_rgb(0.95, 0.6, 0.25);

/// One material card: title, code with type tag, details and download action
pub fn material_card(material: &Material) -> Element<'_, Message> {
    let or_na = |value: &Option<String>| -> String {
        value
            .as_deref()
            .filter(|v| !v.trim().is_empty())
            .unwrap_or("N/A")
            .to_string()
    };

    let tag_color = if material.is_note() { NOTE_COLOR } else { PQ_COLOR };
    let tag = text(
        material
            .kind
            .clone()
            .unwrap_or_else(|| "Resource".to_string()),
    )
    .size(12)
    .color(tag_color);

    let mut details: Column<'_, Message> = column![
        text(
            material
                .title
                .clone()
                .unwrap_or_else(|| "Untitled".to_string())
        )
        .size(20),
        row![text(or_na(&material.code)).size(14), tag].spacing(8),
    ]
    .spacing(6);

    if let Some(topic) = material.topic.as_deref().filter(|t| !t.is_empty()) {
        details = details.push(text(format!("Topic: {topic}")).size(14));
    }

    details = details
        .push(text(format!("Level: {}", or_na(&material.level))).size(14))
        .push(text(format!("Semester: {}", or_na(&material.semester))).size(14))
        .push(text(format!("College: {}", or_na(&material.college))).size(14));

    if let Some(department) = material.department.as_deref().filter(|d| !d.is_empty()) {
        details = details.push(text(format!("Department: {department}")).size(14));
    }

    let download = match material.download_link.as_deref().filter(|l| !l.is_empty()) {
        Some(link) => button(text("Copy download link"))
            .on_press(Message::CopyLink(link.to_string()))
            .padding(8),
        None => button(text("Download link not available")).padding(8),
    };

    container(details.push(download))
        .padding(16)
        .width(Length::Fixed(CARD_WIDTH))
        .style(container::rounded_box)
        .into()
}
