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

use backend::{
    config::Config,
    game::Game,
    store::{PlayerTally, ResultRecord, Scoreboard},
    view::DualLayout,
};
use eframe::{
    egui::{Context, ViewportCommand},
    CreationContext,
};
use egui_extras::install_image_loaders;
use log::warn;

use board::PieceImages;
use update::FrameState;

/// Handling clicks on the boards and finding piece images.
mod board;
/// For drawing-related items.
mod draw;
/// Defines what happens each frame.
mod update;

/// The GUI: used to save state between frames.
pub struct Gui {
    /// The game shown on both boards.
    game: Game,
    /// Where the boards are drawn.
    layout: DualLayout,
    /// Where results are stored. [`None`] if it couldn't be opened.
    store: Option<Scoreboard>,
    /// Settings read at start-up.
    config: Config,
    /// Images of the pieces that were found on disk.
    piece_images: PieceImages,
    /// Everything else that has to survive between frames.
    state: FrameState,
}

/// The latest rows read from the scoreboard.
#[derive(Default)]
pub struct Scores {
    /// Players with the most wins.
    top: Vec<PlayerTally>,
    /// The most recently finished games.
    recent: Vec<ResultRecord>,
}

impl Gui {
    /// Creates a new [`Gui`] with a game at the starting position, opening
    /// the scoreboard and loading the piece images named in `config`.
    pub fn new(cc: &CreationContext<'_>, config: Config, layout: DualLayout) -> Self {
        install_image_loaders(&cc.egui_ctx);

        let mut state = FrameState::default();
        let store = match Scoreboard::open(&config.database_path) {
            Ok(store) => Some(store),
            Err(err) => {
                warn!("running without a scoreboard: {err}");
                state.notice = Some(format!(
                    "The scoreboard could not be opened, so results won't be saved.\n{err}"
                ));
                None
            }
        };

        let mut gui = Self {
            game: Game::new(),
            layout,
            store,
            piece_images: PieceImages::load(&config.assets_dir),
            config,
            state,
        };
        gui.refresh_scores();
        gui
    }

    /// Throws the current game away and starts a new one.
    fn restart(&mut self) {
        self.game.reset();
    }

    /// Closes the window.
    #[allow(clippy::unused_self)]
    fn quit(&self, ctx: &Context) {
        ctx.send_viewport_cmd(ViewportCommand::Close);
    }

    /// Shows or hides the scoreboard, re-reading it when it's shown.
    fn toggle_scoreboard(&mut self) {
        self.state.show_scoreboard = !self.state.show_scoreboard;
        if self.state.show_scoreboard {
            self.refresh_scores();
        }
    }

    /// Re-reads both scoreboard tables.
    fn refresh_scores(&mut self) {
        let Some(store) = &self.store else {
            return;
        };
        let scores = store
            .top_players(self.config.top_players)
            .and_then(|top| {
                Ok(Scores {
                    top,
                    recent: store.recent_games(self.config.recent_games)?,
                })
            });
        match scores {
            Ok(scores) => self.state.scores = scores,
            Err(err) => {
                warn!("could not read the scoreboard: {err}");
                self.state.notice = Some(format!("The scoreboard could not be read.\n{err}"));
            }
        }
    }

    /// Stores the names entered in the end-of-game form and starts a new
    /// game. If the result can't be stored, the user is told and the new game
    /// starts anyway.
    fn confirm_names(&mut self) {
        let Some(store) = &self.store else {
            self.game.cancel();
            self.state.notice = Some(String::from(
                "No scoreboard is open, so the result was not saved.",
            ));
            return;
        };
        match self.game.confirm(store) {
            Ok(_) => self.refresh_scores(),
            Err(err) => {
                self.state.notice = Some(format!("The result was not saved.\n{err}"));
            }
        }
    }
}
