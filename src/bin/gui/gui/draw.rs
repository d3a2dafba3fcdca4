/*
 * Twinboard, a two-perspective chess board
 * Copyright (C) 2024 Jasper Shovelton
 *
 * Twinboard is free software: you can redistribute it and/or modify it under
 * the terms of the GNU General Public License as published by the Free
 * Software Foundation, either version 3 of the License, or (at your option)
 * any later version.
 *
 * Twinboard is distributed in the hope that it will be useful, but WITHOUT ANY
 * WARRANTY; without even the implied warranty of MERCHANTABILITY or FITNESS
 * FOR A PARTICULAR PURPOSE. See the GNU General Public License for more
 * details.
 *
 * You should have received a copy of the GNU General Public License along with
 * Twinboard. If not, see <https://www.gnu.org/licenses/>.
 */

use eframe::{
    egui::{widgets::Button, Align, Color32, Layout, Rect, Rounding, Shape, Stroke, Ui},
    epaint::RectShape,
};

/// The window background.
pub const BACKGROUND: Color32 = Color32::from_rgb(38, 38, 42);
/// Light squares.
pub const LIGHT_SQUARE: Color32 = Color32::from_rgb(235, 235, 235);
/// Dark squares.
pub const DARK_SQUARE: Color32 = Color32::from_rgb(70, 70, 75);
/// Banner text.
pub const ACCENT: Color32 = Color32::from_rgb(220, 40, 40);
/// Outlines around the selected square and the last move.
pub const HIGHLIGHT: Color32 = Color32::from_rgb(255, 215, 0);
/// The dots on legal destinations.
pub const DESTINATION_DOT: Color32 = Color32::from_rgb(255, 100, 60);

/// Paints the area on `ui` defined by `rect` the color `color`.
pub fn paint_area_with_color(ui: &Ui, rect: Rect, color: Color32) {
    ui.painter().add(Shape::Rect(RectShape::new(
        rect,
        Rounding::ZERO,
        color,
        Stroke::default(),
    )));
}

/// Draws a highlight-coloured outline `width` points wide just inside
/// `rect`.
pub fn paint_outline(ui: &Ui, rect: Rect, width: f32) {
    ui.painter().rect_stroke(
        rect.shrink(width / 2.0),
        Rounding::ZERO,
        Stroke::new(width, HIGHLIGHT),
    );
}

/// Draws a dot in the middle of `rect`, marking it as somewhere the selected
/// piece can go.
pub fn paint_dot(ui: &Ui, rect: Rect) {
    let radius = (rect.width() / 10.0).max(6.0);
    ui.painter()
        .circle_filled(rect.center(), radius, DESTINATION_DOT);
}

/// Adds a button on the given [`Ui`] at the given region with the given text
/// that executes `on_click` when the button is clicked.
pub fn add_button_to_region<T: FnOnce()>(ui: &mut Ui, region: Rect, text: &str, on_click: T) {
    let button = Button::new(text).min_size(region.size());
    if ui
        .child_ui(region, Layout::left_to_right(Align::Center))
        .add(button)
        .clicked()
    {
        on_click();
    }
}
