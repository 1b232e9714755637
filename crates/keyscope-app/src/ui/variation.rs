//! Variation request form

use iced::widget::{button, column, container, pick_list, row, scrollable, slider, text};
use iced::{Alignment, Element, Length};
use keyscope_core::config::VariationDefaults;
use keyscope_core::VariationRequest;
use keyscope_widgets::theme;

use super::message::Message;

/// Styles offered in the picker
pub const VARIATION_STYLES: [&str; 5] = ["similar", "jazz", "pop", "rock", "classical"];

pub const MIN_AMOUNT: u8 = 1;
pub const MAX_AMOUNT: u8 = 10;

#[derive(Debug, Clone)]
pub struct VariationState {
    pub amount: u8,
    pub style: String,
    pub styles: Vec<String>,
    /// A request is in flight
    pub pending: bool,
    /// Pretty-printed response of the last successful request
    pub last_result: Option<String>,
}

impl VariationState {
    pub fn from_defaults(defaults: &VariationDefaults) -> Self {
        let mut styles: Vec<String> = VARIATION_STYLES.iter().map(|s| s.to_string()).collect();
        if !styles.contains(&defaults.default_style) {
            styles.push(defaults.default_style.clone());
        }
        let amount = u8::try_from(defaults.default_amount)
            .unwrap_or(MIN_AMOUNT)
            .clamp(MIN_AMOUNT, MAX_AMOUNT);

        Self {
            amount,
            style: defaults.default_style.clone(),
            styles,
            pending: false,
            last_result: None,
        }
    }

    pub fn set_amount(&mut self, amount: u8) {
        self.amount = amount.clamp(MIN_AMOUNT, MAX_AMOUNT);
    }

    pub fn request(&self, file_id: &str) -> VariationRequest {
        VariationRequest {
            file_id: file_id.to_string(),
            amount: u32::from(self.amount),
            style: self.style.clone(),
        }
    }

    pub fn store_result(&mut self, value: &serde_json::Value) {
        self.pending = false;
        self.last_result =
            Some(serde_json::to_string_pretty(value).unwrap_or_else(|_| value.to_string()));
    }
}

/// Render the form; the button is disabled until results are on screen
pub fn view(state: &VariationState, has_file: bool) -> Element<'_, Message> {
    let amount = row![
        text("Amount").size(14).width(Length::Fixed(70.0)),
        slider(MIN_AMOUNT..=MAX_AMOUNT, state.amount, Message::VariationAmountChanged)
            .width(Length::Fixed(200.0)),
        text(state.amount.to_string()).size(14),
    ]
    .spacing(10)
    .align_y(Alignment::Center);

    let style = row![
        text("Style").size(14).width(Length::Fixed(70.0)),
        pick_list(
            state.styles.as_slice(),
            Some(&state.style),
            Message::VariationStyleSelected
        )
        .width(Length::Fixed(200.0)),
    ]
    .spacing(10)
    .align_y(Alignment::Center);

    let label = if state.pending {
        "Generating..."
    } else {
        "Generate Variation"
    };
    let generate = button(text(label))
        .on_press_maybe((has_file && !state.pending).then_some(Message::RequestVariation))
        .style(button::primary);

    let mut content = column![text("Variations").size(18), amount, style, generate].spacing(10);

    if let Some(result) = &state.last_result {
        content = content.push(
            container(scrollable(text(result).size(12).color(theme::TEXT_SECONDARY)))
                .height(Length::Fixed(160.0))
                .width(Length::Fill),
        );
    }

    content.into()
}
