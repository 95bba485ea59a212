use iced::widget::{button, container, row, Space};
use iced::{Background, Border, Color, Element};

use crate::color;
use crate::Message;

/// The strip of clickable wall-color swatches.
///
/// Every entry in the palette is compile-time checked to parse (see the
/// tests in `color.rs`), so a swatch that fails to parse here is silently
/// skipped rather than crashing the view.
pub fn swatch_bar() -> Element<'static, Message> {
    let mut swatches = row![].spacing(8);

    for hex in color::PALETTE {
        if let Some(fill) = color::parse_hex(hex) {
            swatches = swatches.push(swatch(hex, fill));
        }
    }

    container(swatches).padding(8).into()
}

fn swatch(hex: &'static str, fill: Color) -> Element<'static, Message> {
    button(Space::new(40, 40))
        .padding(0)
        .on_press(Message::SwatchPicked(hex))
        .style(move |_theme, status| {
            let border_width = match status {
                button::Status::Hovered | button::Status::Pressed => 3.0,
                _ => 1.0,
            };

            button::Style {
                background: Some(Background::Color(fill)),
                border: Border {
                    color: Color::WHITE,
                    width: border_width,
                    radius: 6.0.into(),
                },
                ..button::Style::default()
            }
        })
        .into()
}
