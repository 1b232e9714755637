//! Drop zone, path entry and upload progress

use iced::widget::{button, column, container, progress_bar, row, text, text_input};
use iced::{Alignment, Background, Border, Color, Element, Length};
use keyscope_core::format::format_file_size;
use keyscope_core::upload::ACCEPTED_EXTENSIONS;
use keyscope_widgets::theme;

use super::message::Message;
use crate::controller::UploadController;

/// Hint listing accepted formats and the size limit
pub fn formats_hint(controller: &UploadController) -> String {
    let limits = controller.limits();
    let formats: Vec<String> = ACCEPTED_EXTENSIONS
        .iter()
        .map(|e| e.to_ascii_uppercase())
        .collect();
    format!(
        "Supported: {} (max {})",
        formats.join(", "),
        format_file_size(limits.max_file_size_bytes())
    )
}

pub fn view<'a>(
    controller: &'a UploadController,
    path_input: &'a str,
    hovering: bool,
) -> Element<'a, Message> {
    let body: Element<'a, Message> = match controller.progress() {
        Some(progress) => column![
            text(progress.status).size(14),
            container(progress_bar(0.0..=1.0, progress.fraction)).width(Length::Fill),
        ]
        .spacing(10)
        .into(),
        None => {
            let headline = if hovering {
                "Release to upload"
            } else {
                "Drop an audio file here"
            };
            let entry = row![
                text_input("Path to an audio file...", path_input)
                    .on_input(Message::PathInputChanged)
                    .on_submit(Message::SubmitPath)
                    .width(Length::Fill),
                button(text("Upload"))
                    .on_press_maybe((!path_input.trim().is_empty()).then_some(Message::SubmitPath))
                    .style(button::primary),
            ]
            .spacing(10)
            .align_y(Alignment::Center);

            column![
                text(headline).size(18),
                text(formats_hint(controller)).size(12).color(theme::TEXT_SECONDARY),
                entry,
            ]
            .spacing(10)
            .align_x(Alignment::Center)
            .into()
        }
    };

    let mut content = column![body].spacing(10).width(Length::Fill);
    if let Some(notice) = controller.conversion_notice() {
        content = content.push(text(notice).size(13).color(theme::TOAST_COLORS[2]));
    }

    let border_color = if hovering { theme::PRIMARY } else { theme::BORDER };
    container(content)
        .width(Length::Fill)
        .padding(20)
        .style(move |_theme| container::Style {
            background: Some(Background::Color(theme::SURFACE)),
            border: Border {
                color: border_color,
                width: 2.0,
                radius: 8.0.into(),
            },
            text_color: Some(Color::WHITE),
            ..Default::default()
        })
        .into()
}
