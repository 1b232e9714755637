//! Transient notifications
//!
//! Toasts expire after a fixed lifetime and are pruned on the periodic tick;
//! the close button removes one early. Newest toasts are listed last.

use std::time::{Duration, Instant};

use iced::widget::{button, column, container, row, text, Space};
use iced::{Alignment, Border, Color, Element, Length};
use keyscope_widgets::theme;

use super::message::Message;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToastKind {
    Success,
    Error,
    Warning,
    Info,
}

impl ToastKind {
    pub fn icon(&self) -> &'static str {
        match self {
            ToastKind::Success => "✔",
            ToastKind::Error => "✖",
            ToastKind::Warning => "⚠",
            ToastKind::Info => "ℹ",
        }
    }

    pub fn color(&self) -> Color {
        let index = match self {
            ToastKind::Success => 0,
            ToastKind::Error => 1,
            ToastKind::Warning => 2,
            ToastKind::Info => 3,
        };
        theme::TOAST_COLORS[index]
    }
}

#[derive(Debug, Clone)]
pub struct Toast {
    pub id: u64,
    pub kind: ToastKind,
    pub message: String,
    expires_at: Instant,
}

#[derive(Debug)]
pub struct ToastQueue {
    toasts: Vec<Toast>,
    lifetime: Duration,
    next_id: u64,
}

impl ToastQueue {
    pub fn new(lifetime: Duration) -> Self {
        Self {
            toasts: Vec::new(),
            lifetime,
            next_id: 0,
        }
    }

    pub fn push(&mut self, kind: ToastKind, message: impl Into<String>) -> u64 {
        self.push_at(kind, message, Instant::now())
    }

    pub fn push_at(&mut self, kind: ToastKind, message: impl Into<String>, now: Instant) -> u64 {
        let id = self.next_id;
        self.next_id += 1;
        let message = message.into();
        log::debug!("Toast {:?}: {}", kind, message);
        self.toasts.push(Toast {
            id,
            kind,
            message,
            expires_at: now + self.lifetime,
        });
        id
    }

    pub fn success(&mut self, message: impl Into<String>) -> u64 {
        self.push(ToastKind::Success, message)
    }

    pub fn error(&mut self, message: impl Into<String>) -> u64 {
        self.push(ToastKind::Error, message)
    }

    pub fn warning(&mut self, message: impl Into<String>) -> u64 {
        self.push(ToastKind::Warning, message)
    }

    pub fn info(&mut self, message: impl Into<String>) -> u64 {
        self.push(ToastKind::Info, message)
    }

    pub fn dismiss(&mut self, id: u64) {
        self.toasts.retain(|t| t.id != id);
    }

    /// Drop expired toasts, returning how many were removed
    pub fn prune(&mut self, now: Instant) -> usize {
        let before = self.toasts.len();
        self.toasts.retain(|t| t.expires_at > now);
        before - self.toasts.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Toast> {
        self.toasts.iter()
    }

    pub fn is_empty(&self) -> bool {
        self.toasts.is_empty()
    }

    pub fn len(&self) -> usize {
        self.toasts.len()
    }
}

/// Stack of toasts, oldest on top
pub fn view<'a>(queue: &'a ToastQueue) -> Element<'a, Message> {
    let items = queue.iter().map(|toast| -> Element<'a, Message> {
        let background = toast.kind.color();
        let content = row![
            text(toast.kind.icon()).size(16).color(Color::WHITE),
            text(&toast.message).size(14).color(Color::WHITE),
            Space::new().width(Length::Fill),
            button(text("×").size(14))
                .on_press(Message::DismissToast(toast.id))
                .padding([2, 8])
                .style(button::text),
        ]
        .spacing(10)
        .align_y(Alignment::Center);

        container(content)
            .width(Length::Fixed(360.0))
            .padding(10)
            .style(move |_theme| container::Style {
                background: Some(background.into()),
                border: Border {
                    radius: 6.0.into(),
                    ..Default::default()
                },
                ..Default::default()
            })
            .into()
    });

    column(items).spacing(8).into()
}
