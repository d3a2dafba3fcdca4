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

//! A window showing one game of chess from both sides at once.

use backend::{config::Config, view::DualLayout};
use env_logger::Env;
use gui::Gui;

use eframe::{
    egui::ViewportBuilder,
    run_native, Error, NativeOptions,
};

/// The window and everything in it.
mod gui;

fn main() -> Result<(), Error> {
    dotenvy::dotenv().ok();
    env_logger::init_from_env(Env::new().default_filter_or("info"));

    let title = "Chess - Dual Boards";
    let config = Config::from_env();
    let layout = DualLayout::default();

    let options = NativeOptions {
        viewport: ViewportBuilder::default()
            .with_title(title)
            .with_resizable(false)
            .with_inner_size(layout.window_size()),
        ..Default::default()
    };

    run_native(
        title,
        options,
        Box::new(move |cc| Box::new(Gui::new(cc, config, layout))),
    )
}
