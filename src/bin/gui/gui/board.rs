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

use std::{collections::HashMap, path::Path};

use backend::{
    defs::{Piece, PieceKind, Side},
    router::ClickOutcome,
};
use eframe::egui::{Align2, Color32, FontId, Image, Pos2, Rect, Ui, Vec2};
use log::{info, warn};

use super::{
    draw::{DARK_SQUARE, LIGHT_SQUARE},
    Gui,
};

/// Where the image of each piece can be found. Pieces without an image are
/// drawn as their letter.
#[derive(Default)]
pub struct PieceImages {
    /// `file://` URIs, keyed by piece.
    uris: HashMap<Piece, String>,
}

impl PieceImages {
    /// Looks for `wp.png`, `bk.png` and so on in `dir`.
    pub fn load(dir: &Path) -> Self {
        let mut uris = HashMap::new();
        for side in Side::ALL {
            for kind in PieceKind::ALL {
                let piece = Piece::new(side, kind);
                let path = dir.join(format!("{}.png", piece.code()));
                if path.is_file() {
                    uris.insert(piece, format!("file://{}", path.display()));
                }
            }
        }

        let total = Side::ALL.len() * PieceKind::ALL.len();
        if uris.len() == total {
            info!("loaded piece images from {}", dir.display());
        } else {
            warn!(
                "found {} of {total} piece images in {}; drawing letters for the rest",
                uris.len(),
                dir.display()
            );
        }
        Self { uris }
    }

    /// Draws `piece` filling `rect`. `on_light` is the colour of the square
    /// underneath, used to pick a readable colour for the letter fallback.
    pub fn paint(&self, ui: &Ui, rect: Rect, piece: Piece, on_light: bool) {
        if let Some(uri) = self.uris.get(&piece) {
            Image::new(uri.as_str()).paint_at(ui, rect);
            return;
        }

        let color = match (piece.side, on_light) {
            (Side::White, true) => Color32::WHITE,
            (Side::White, false) => LIGHT_SQUARE,
            (Side::Black, true) => DARK_SQUARE,
            (Side::Black, false) => Color32::BLACK,
        };
        // white letters on light squares get a dark shadow
        if piece.side == Side::White && on_light {
            ui.painter().text(
                rect.center() + Vec2::splat(1.5),
                Align2::CENTER_CENTER,
                piece.letter(),
                FontId::proportional(rect.height() * 0.7),
                DARK_SQUARE,
            );
        }
        ui.painter().text(
            rect.center(),
            Align2::CENTER_CENTER,
            piece.letter(),
            FontId::proportional(rect.height() * 0.7),
            color,
        );
    }
}

impl Gui {
    /// Passes a click at `pos` to the game if it landed on either board.
    ///
    /// # Panics
    ///
    /// Panics if the rules engine rejected a move it had listed as legal:
    /// both boards would be showing a state the engine doesn't agree with.
    pub fn click_board(&mut self, pos: Pos2) {
        let Some((_, square)) = self.layout.square_at(pos) else {
            return;
        };
        match self.game.click_square(square) {
            Ok(ClickOutcome::GameOver { .. }) => {
                self.state.focus_pending = true;
            }
            Ok(_) => {}
            Err(err) => panic!("{err}"),
        }
    }
}
