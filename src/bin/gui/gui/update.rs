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

use std::mem;

use backend::{
    defs::Square,
    end_of_game::Field,
    game::Phase,
    rules::Position,
    store::{Outcome, ResultRecord},
    view::{title_banner, turn_banner, Highlights, Orientation, Pane},
};
use chrono::Local;
use eframe::{
    egui::{
        containers::{Frame, Window},
        Align2, CentralPanel, Context, FontId, Grid, Key, Pos2, Rect, Sense, TextEdit, Ui, Vec2,
    },
    App,
};
use egui_extras::{Column, TableBuilder};

use super::{
    draw::{
        add_button_to_region, paint_area_with_color, paint_dot, paint_outline, ACCENT,
        BACKGROUND, DARK_SQUARE, LIGHT_SQUARE,
    },
    Gui, Scores,
};

/// Information about the current frame that the next frame needs to know.
#[derive(Default)]
pub struct FrameState {
    /// Whether the scoreboard window is open.
    pub show_scoreboard: bool,
    /// What the scoreboard window shows. Re-read whenever a result is stored
    /// or the window is opened.
    pub scores: Scores,
    /// A message for the user, shown until dismissed.
    pub notice: Option<String>,
    /// Set when the focused field of the end-of-game form should grab the
    /// keyboard on the next frame.
    pub focus_pending: bool,
}

/// What the user did with the end-of-game form this frame.
enum FormAction {
    /// Nothing yet.
    Editing,
    /// Store the names.
    Confirm,
    /// Close the form without storing anything.
    Cancel,
}

impl App for Gui {
    fn update(&mut self, ctx: &Context, _frame: &mut eframe::Frame) {
        self.handle_shortcuts(ctx);

        CentralPanel::default()
            .frame(Frame::none().fill(BACKGROUND))
            .show(ctx, |ui| {
                self.update_boards(ui);
                self.update_banners(ui);
                self.update_buttons(ctx, ui);
            });

        self.update_name_form(ctx);
        self.update_scoreboard(ctx);
        self.update_notice(ctx);
    }
}

impl Gui {
    /// R restarts, S shows or hides the scoreboard and Q or Escape quits.
    /// Ignored while the user is typing.
    fn handle_shortcuts(&mut self, ctx: &Context) {
        if matches!(self.game.phase(), Phase::GameOver(_)) || ctx.wants_keyboard_input() {
            return;
        }
        let (restart, scoreboard, quit) = ctx.input(|input| {
            (
                input.key_pressed(Key::R),
                input.key_pressed(Key::S),
                input.key_pressed(Key::Q) || input.key_pressed(Key::Escape),
            )
        });

        if restart {
            self.restart();
        }
        if scoreboard {
            self.toggle_scoreboard();
        }
        if quit {
            self.quit(ctx);
        }
    }

    /// Handles clicks on either board, then draws both.
    ///
    /// Every click is handled before anything is drawn so that both panes
    /// show the same state in every frame.
    fn update_boards(&mut self, ui: &mut Ui) {
        for pane in self.layout.panes() {
            let response = ui.allocate_rect(pane.board_rect(), Sense::click());
            if response.clicked() {
                if let Some(pos) = response.interact_pointer_pos() {
                    self.click_board(pos);
                }
            }
        }

        let position = self.game.position();
        let highlights = Highlights::from_game(&self.game);
        for pane in self.layout.panes() {
            self.draw_pane(ui, &pane, &position, &highlights);
        }
    }

    /// Draws the squares, highlights and pieces of one board.
    fn draw_pane(&self, ui: &Ui, pane: &Pane, position: &Position, highlights: &Highlights) {
        for square in Square::all() {
            let color = if square.is_light() {
                LIGHT_SQUARE
            } else {
                DARK_SQUARE
            };
            paint_area_with_color(ui, pane.square_rect(square), color);
        }

        if let Some(last_move) = highlights.last_move {
            paint_outline(ui, pane.square_rect(last_move.from), 3.0);
            paint_outline(ui, pane.square_rect(last_move.to), 3.0);
        }
        if let Some(selected) = highlights.selected {
            paint_outline(ui, pane.square_rect(selected), 4.0);
        }

        for (rect, piece) in pane.place_pieces(position) {
            let on_light = pane.square_at(rect.center()).is_some_and(Square::is_light);
            self.piece_images.paint(ui, rect, piece, on_light);
        }
        // drawn over the pieces so captures are marked too
        for square in highlights.destinations {
            paint_dot(ui, pane.square_rect(square));
        }
    }

    /// Draws the banner above and below each board.
    fn update_banners(&self, ui: &Ui) {
        let side_to_move = self.game.position().side_to_move();
        let painter = ui.painter();

        for orientation in Orientation::ALL {
            painter.text(
                self.layout.title_rect(orientation).center(),
                Align2::CENTER_CENTER,
                title_banner(orientation),
                FontId::proportional(22.0),
                ACCENT,
            );
            painter.text(
                self.layout.footer_rect(orientation).left_center() + Vec2::new(4.0, 0.0),
                Align2::LEFT_CENTER,
                turn_banner(orientation, side_to_move),
                FontId::proportional(18.0),
                ACCENT,
            );
        }
    }

    /// Draws the buttons below the right-hand board and handles clicks on
    /// them.
    fn update_buttons(&mut self, ctx: &Context, ui: &mut Ui) {
        // 3 buttons, each 96x28 with 8 points between them, right-aligned
        let footer = self.layout.footer_rect(Orientation::BlackUp);
        let size = Vec2::new(96.0, 28.0);
        let step = Vec2::new(size.x + 8.0, 0.0);
        let first = Rect::from_min_size(
            Pos2::new(
                footer.max.x - size.x * 3.0 - 16.0,
                footer.center().y - size.y / 2.0,
            ),
            size,
        );

        add_button_to_region(ui, first, "Reset", || self.restart());
        add_button_to_region(ui, first.translate(step), "Scoreboard", || {
            self.toggle_scoreboard();
        });
        add_button_to_region(ui, first.translate(step * 2.0), "Quit", || self.quit(ctx));
    }

    /// Shows the end-of-game form if the game has ended. Enter stores the
    /// names, Escape closes the form without storing them and Tab moves
    /// between the two fields.
    fn update_name_form(&mut self, ctx: &Context) {
        if !matches!(self.game.phase(), Phase::GameOver(_)) {
            return;
        }

        let (tab, enter, escape) = ctx.input(|input| {
            (
                input.key_pressed(Key::Tab),
                input.key_pressed(Key::Enter),
                input.key_pressed(Key::Escape),
            )
        });
        if tab {
            self.game.next_field();
        }
        let refocus = mem::take(&mut self.state.focus_pending) || tab;

        let Some(form) = self.game.name_form_mut() else {
            return;
        };
        let mut action = FormAction::Editing;
        Window::new("Game over")
            .collapsible(false)
            .resizable(false)
            .anchor(Align2::CENTER_CENTER, Vec2::ZERO)
            .show(ctx, |ui| {
                ui.heading(form.verdict().headline());
                ui.add_space(6.0);

                Grid::new("names").num_columns(2).show(ui, |ui| {
                    for field in [Field::First, Field::Second] {
                        let hint = form.name(field);
                        ui.label(form.label(field));
                        let response = ui.add(
                            TextEdit::singleline(form.text_mut(field))
                                .hint_text(hint)
                                .lock_focus(true),
                        );
                        if response.gained_focus() {
                            form.set_focus(field);
                        }
                        if refocus && form.focus() == field {
                            response.request_focus();
                        }
                        ui.end_row();
                    }
                });

                ui.add_space(6.0);
                ui.horizontal(|ui| {
                    if ui.button("Save").clicked() {
                        action = FormAction::Confirm;
                    }
                    if ui.button("Skip").clicked() {
                        action = FormAction::Cancel;
                    }
                });
            });

        if enter {
            action = FormAction::Confirm;
        } else if escape {
            action = FormAction::Cancel;
        }
        match action {
            FormAction::Editing => {}
            FormAction::Confirm => self.confirm_names(),
            FormAction::Cancel => self.game.cancel(),
        }
    }

    /// Shows the scoreboard window if it's open.
    fn update_scoreboard(&mut self, ctx: &Context) {
        let mut open = self.state.show_scoreboard;
        Window::new("Scoreboard")
            .open(&mut open)
            .collapsible(false)
            .resizable(false)
            .default_width(420.0)
            .show(ctx, |ui| {
                if self.store.is_none() {
                    ui.label("No scoreboard is open, so there is nothing to show.");
                    return;
                }
                ui.heading("Top players");
                ui.push_id("top players", |ui| update_top_table(ui, &self.state.scores));
                ui.separator();
                ui.heading("Recent games");
                ui.push_id("recent games", |ui| {
                    update_recent_table(ui, &self.state.scores);
                });
            });
        self.state.show_scoreboard = open;
    }

    /// Shows the current notice, if any, until it's dismissed.
    fn update_notice(&mut self, ctx: &Context) {
        let Some(notice) = &self.state.notice else {
            return;
        };
        let mut dismissed = false;
        Window::new("Notice")
            .collapsible(false)
            .resizable(false)
            .anchor(Align2::CENTER_TOP, Vec2::new(0.0, 60.0))
            .show(ctx, |ui| {
                ui.label(notice);
                if ui.button("OK").clicked() {
                    dismissed = true;
                }
            });
        if dismissed {
            self.state.notice = None;
        }
    }
}

/// Displays the players with the most wins.
fn update_top_table(ui: &mut Ui, scores: &Scores) {
    TableBuilder::new(ui)
        .column(Column::auto().at_least(30.0))
        .column(Column::remainder().at_least(200.0))
        .column(Column::auto().at_least(50.0))
        .header(24.0, |mut header| {
            header.col(|ui| {
                ui.strong("#");
            });
            header.col(|ui| {
                ui.strong("Player");
            });
            header.col(|ui| {
                ui.strong("Wins");
            });
        })
        .body(|body| {
            body.rows(20.0, scores.top.len(), |mut row| {
                let index = row.index();
                let Some(tally) = scores.top.get(index) else {
                    return;
                };
                row.col(|ui| {
                    ui.label((index + 1).to_string());
                });
                row.col(|ui| {
                    ui.label(&tally.name);
                });
                row.col(|ui| {
                    ui.label(tally.wins.to_string());
                });
            });
        });
}

/// Displays the most recently finished games, newest first.
fn update_recent_table(ui: &mut Ui, scores: &Scores) {
    TableBuilder::new(ui)
        .column(Column::auto().at_least(130.0))
        .column(Column::remainder().at_least(200.0))
        .header(24.0, |mut header| {
            header.col(|ui| {
                ui.strong("Played");
            });
            header.col(|ui| {
                ui.strong("Result");
            });
        })
        .body(|body| {
            body.rows(20.0, scores.recent.len(), |mut row| {
                let Some(record) = scores.recent.get(row.index()) else {
                    return;
                };
                row.col(|ui| {
                    ui.label(
                        record
                            .played_at
                            .with_timezone(&Local)
                            .format("%Y-%m-%d %H:%M")
                            .to_string(),
                    );
                });
                row.col(|ui| {
                    ui.label(describe(record));
                });
            });
        });
}

/// One line describing how a stored game ended.
fn describe(record: &ResultRecord) -> String {
    match &record.outcome {
        Outcome::Win { winner, loser } => format!("{winner} beat {loser}"),
        Outcome::Draw { white, black } => format!("{white} drew with {black}"),
    }
}
