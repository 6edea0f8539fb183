use eframe::egui;
use serde::{Deserialize, Serialize};

use crate::board::{BoardSize, Position, MAX_SELECTABLE, MIN_SELECTABLE};
use crate::clock::{format_elapsed, Duration, Instant};
use crate::evaluator;
use crate::game::{ClickOutcome, Game, PlacementRule};

#[derive(Clone, PartialEq)]
pub struct Theme {
    pub name: &'static str,
    background: egui::Color32,
    panel_background: egui::Color32,
    text_color: egui::Color32,
    accent_color: egui::Color32,
    board_light: egui::Color32,
    board_dark: egui::Color32,
    queen_color: egui::Color32,
    attacked_color: egui::Color32,
    range_tint: egui::Color32,
}

impl Theme {
    pub fn presets() -> Vec<Self> {
        vec![
            Self {
                name: "Sleek Dark",
                background: egui::Color32::from_rgb(15, 23, 42),
                panel_background: egui::Color32::from_rgb(30, 41, 59),
                text_color: egui::Color32::from_rgb(226, 232, 240),
                accent_color: egui::Color32::from_rgb(99, 102, 241),
                board_light: egui::Color32::from_rgb(241, 245, 249),
                board_dark: egui::Color32::from_rgb(100, 116, 139),
                queen_color: egui::Color32::from_rgb(15, 23, 42),
                attacked_color: egui::Color32::from_rgb(220, 38, 38),
                range_tint: egui::Color32::from_rgba_unmultiplied(99, 102, 241, 60),
            },
            Self {
                name: "Classic Wood",
                background: egui::Color32::from_rgb(45, 25, 10),
                panel_background: egui::Color32::from_rgb(70, 40, 20),
                text_color: egui::Color32::from_rgb(245, 230, 200),
                accent_color: egui::Color32::from_rgb(180, 100, 40),
                board_light: egui::Color32::from_rgb(210, 180, 140),
                board_dark: egui::Color32::from_rgb(139, 69, 19),
                queen_color: egui::Color32::from_rgb(45, 25, 10),
                attacked_color: egui::Color32::from_rgb(200, 30, 30),
                range_tint: egui::Color32::from_rgba_unmultiplied(255, 200, 80, 70),
            },
            Self {
                name: "Neon Night",
                background: egui::Color32::from_rgb(10, 10, 20),
                panel_background: egui::Color32::from_rgb(20, 20, 40),
                text_color: egui::Color32::from_rgb(0, 255, 255),
                accent_color: egui::Color32::from_rgb(255, 0, 255),
                board_light: egui::Color32::from_rgb(30, 30, 60),
                board_dark: egui::Color32::from_rgb(15, 15, 30),
                queen_color: egui::Color32::from_rgb(255, 255, 0),
                attacked_color: egui::Color32::from_rgb(255, 60, 60),
                range_tint: egui::Color32::from_rgba_unmultiplied(0, 255, 255, 40),
            },
            Self {
                name: "Paper",
                background: egui::Color32::from_rgb(240, 240, 230),
                panel_background: egui::Color32::from_rgb(220, 220, 210),
                text_color: egui::Color32::from_rgb(50, 50, 50),
                accent_color: egui::Color32::from_rgb(200, 50, 50),
                board_light: egui::Color32::from_rgb(255, 255, 250),
                board_dark: egui::Color32::from_rgb(200, 200, 190),
                queen_color: egui::Color32::from_rgb(20, 20, 20),
                attacked_color: egui::Color32::from_rgb(200, 50, 50),
                range_tint: egui::Color32::from_rgba_unmultiplied(120, 160, 255, 60),
            },
        ]
    }

    /// Looks a preset up by name, falling back to the default theme.
    pub fn named(name: &str) -> Self {
        Self::presets()
            .into_iter()
            .find(|t| t.name == name)
            .unwrap_or_default()
    }

    fn next(&self) -> Self {
        let presets = Self::presets();
        let idx = presets.iter().position(|t| t.name == self.name).unwrap_or(0);
        presets[(idx + 1) % presets.len()].clone()
    }
}

impl Default for Theme {
    fn default() -> Self {
        Self::presets()[0].clone()
    }
}

/// UI preferences kept between sessions. Game state is never stored.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub theme: String,
    pub show_range: bool,
    pub placement: PlacementRule,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            theme: Theme::default().name.to_owned(),
            show_range: true,
            placement: PlacementRule::Free,
        }
    }
}

struct Particle {
    pos: egui::Pos2,
    vel: egui::Vec2,
    color: egui::Color32,
    life: f32, // 1.0 down to 0.0
    size: f32,
}

pub struct QueensApp {
    game: Game,
    size_input: String,
    theme: Theme,
    show_range: bool,
    particles: Vec<Particle>,
    last_message: Option<String>,
}

impl Default for QueensApp {
    fn default() -> Self {
        Self::with_settings(Settings::default())
    }
}

impl QueensApp {
    pub fn new(cc: &eframe::CreationContext<'_>) -> Self {
        cc.egui_ctx.set_visuals(egui::Visuals::dark());
        let settings = cc
            .storage
            .and_then(|storage| eframe::get_value::<Settings>(storage, eframe::APP_KEY))
            .unwrap_or_default();
        log::debug!("restored settings: {:?}", settings);
        Self::with_settings(settings)
    }

    pub fn with_settings(settings: Settings) -> Self {
        let mut game = Game::default();
        game.set_placement_rule(settings.placement);
        Self {
            size_input: game.board_size().get().to_string(),
            game,
            theme: Theme::named(&settings.theme),
            show_range: settings.show_range,
            particles: Vec::new(),
            last_message: None,
        }
    }

    pub fn settings(&self) -> Settings {
        Settings {
            theme: self.theme.name.to_owned(),
            show_range: self.show_range,
            placement: self.game.placement_rule(),
        }
    }

    fn spawn_particles(&mut self, pos: egui::Pos2, color: egui::Color32) {
        use rand::Rng;
        let mut rng = rand::thread_rng();
        for _ in 0..30 {
            let angle: f32 = rng.gen_range(0.0..std::f32::consts::TAU);
            let speed: f32 = rng.gen_range(100.0..500.0);
            self.particles.push(Particle {
                pos,
                vel: egui::vec2(angle.cos() * speed, angle.sin() * speed - 200.0),
                color,
                life: 1.0,
                size: rng.gen_range(3.0..7.0),
            });
        }
    }

    fn change_size(&mut self, size: BoardSize) {
        self.game.set_board_size(size);
        self.size_input = size.get().to_string();
        self.last_message = None;
    }

    fn new_game(&mut self) {
        self.game.reset();
        self.last_message = None;
    }

    fn handle_click(&mut self, position: Position, now: Instant, burst_at: egui::Pos2) {
        let outcome = self.game.click(position, now);
        self.last_message = match outcome {
            ClickOutcome::Solved => {
                self.spawn_particles(burst_at, self.theme.accent_color);
                None
            }
            ClickOutcome::Rejected(reason) => Some(format!("{}: {}", position.label(), reason)),
            ClickOutcome::Placed | ClickOutcome::Removed | ClickOutcome::Ignored => None,
        };
    }

    fn strict_toggle(&mut self, ui: &mut egui::Ui, label: &str) {
        let mut strict = self.game.placement_rule() == PlacementRule::Strict;
        if ui.checkbox(&mut strict, label).changed() {
            self.game.set_placement_rule(if strict {
                PlacementRule::Strict
            } else {
                PlacementRule::Free
            });
        }
    }

    fn status_text(&self, now: Instant) -> String {
        format!(
            "Time: {}   Queens: {} / {}",
            format_elapsed(self.game.clock().elapsed(now)),
            self.game.queens().len(),
            self.game.board_size().get()
        )
    }
}

/// Cell under `pointer` on an `n`×`n` board drawn into `board_rect`.
pub fn cell_at(board_rect: egui::Rect, n: usize, pointer: egui::Pos2) -> Option<Position> {
    if n == 0 || !board_rect.contains(pointer) {
        return None;
    }
    let cell_size = board_rect.width() / n as f32;
    let last = n as i32 - 1;
    let col = (((pointer.x - board_rect.min.x) / cell_size) as i32).min(last);
    let row = (((pointer.y - board_rect.min.y) / cell_size) as i32).min(last);
    Some(Position::new(row, col))
}

impl eframe::App for QueensApp {
    fn save(&mut self, storage: &mut dyn eframe::Storage) {
        eframe::set_value(storage, eframe::APP_KEY, &self.settings());
    }

    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        let now = Instant::now();

        // --- Animation Update ---
        let dt = ctx.input(|i| i.stable_dt);
        self.particles.retain_mut(|p| {
            p.pos += p.vel * dt;
            p.vel.y += 800.0 * dt; // Gravity
            p.life -= dt * 1.5;
            p.life > 0.0
        });
        if !self.particles.is_empty() {
            ctx.request_repaint();
        } else if self.game.clock().is_running() {
            ctx.request_repaint_after(Duration::from_secs(1));
        }

        let panel_frame = egui::Frame::none()
            .fill(self.theme.panel_background)
            .inner_margin(12.0)
            .rounding(10.0)
            .stroke(egui::Stroke::new(1.0, egui::Color32::from_white_alpha(20)));

        let screen_rect = ctx.screen_rect();
        let is_mobile = screen_rect.width() < 700.0;

        if is_mobile {
            egui::TopBottomPanel::top("mobile_top")
                .frame(panel_frame.inner_margin(egui::Margin::symmetric(10.0, 5.0)))
                .show(ctx, |ui| {
                    ui.horizontal(|ui| {
                        ui.label(
                            egui::RichText::new("♛ N-Queens")
                                .strong()
                                .color(self.theme.accent_color),
                        );
                        ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                            ui.label(egui::RichText::new(self.status_text(now)).strong());
                        });
                    });
                });

            egui::TopBottomPanel::bottom("mobile_bottom")
                .frame(panel_frame.inner_margin(egui::Margin::symmetric(15.0, 10.0)))
                .show(ctx, |ui| {
                    ui.vertical(|ui| {
                        ui.horizontal(|ui| {
                            let n = self.game.board_size().get();
                            ui.label("Size:");
                            if ui.button("-").clicked() && n > MIN_SELECTABLE {
                                if let Ok(size) = BoardSize::selectable(n - 1) {
                                    self.change_size(size);
                                }
                            }
                            ui.label(
                                egui::RichText::new(self.game.board_size().to_string())
                                    .strong()
                                    .color(self.theme.accent_color),
                            );
                            if ui.button("+").clicked() && n < MAX_SELECTABLE {
                                if let Ok(size) = BoardSize::selectable(n + 1) {
                                    self.change_size(size);
                                }
                            }

                            ui.add_space(20.0);
                            if ui.button("New game").clicked() {
                                self.new_game();
                            }
                        });

                        ui.add_space(8.0);

                        ui.horizontal(|ui| {
                            ui.checkbox(&mut self.show_range, "Range");
                            self.strict_toggle(ui, "Strict");
                            ui.with_layout(
                                egui::Layout::right_to_left(egui::Align::Center),
                                |ui| {
                                    if ui.button("🎨 Theme").clicked() {
                                        self.theme = self.theme.next();
                                    }
                                },
                            );
                        });
                    });
                });
        } else {
            egui::SidePanel::right("controls")
                .frame(panel_frame)
                .min_width(300.0)
                .resizable(true)
                .show(ctx, |ui| {
                    ui.vertical_centered(|ui| {
                        ui.add_space(8.0);
                        ui.label(
                            egui::RichText::new("♛ N-Queens Puzzle")
                                .size(24.0)
                                .strong()
                                .color(self.theme.text_color),
                        );
                    });
                    ui.add_space(20.0);
                    ui.label(
                        egui::RichText::new("Configuration")
                            .strong()
                            .color(self.theme.text_color),
                    );
                    ui.separator();
                    ui.horizontal(|ui| {
                        ui.label(format!("Board Size ({MIN_SELECTABLE}-{MAX_SELECTABLE}):"));
                        let resp = ui.add(
                            egui::TextEdit::singleline(&mut self.size_input).desired_width(50.0),
                        );
                        if resp.changed() {
                            match self.size_input.parse::<BoardSize>() {
                                Ok(size) => self.change_size(size),
                                Err(err) => log::debug!("ignoring size input: {err}"),
                            }
                        }
                        let should_update = resp.lost_focus()
                            || (resp.has_focus() && ui.input(|i| i.key_pressed(egui::Key::Enter)));
                        if should_update {
                            self.size_input = self.game.board_size().get().to_string();
                        }
                    });

                    ui.add_space(10.0);
                    ui.checkbox(&mut self.show_range, "Show Queen Range");
                    self.strict_toggle(ui, "Strict Placement");

                    ui.add_space(10.0);
                    ui.label("Theme:");
                    egui::ComboBox::from_id_salt("theme_picker")
                        .selected_text(self.theme.name)
                        .show_ui(ui, |ui| {
                            for preset in Theme::presets() {
                                ui.selectable_value(&mut self.theme, preset.clone(), preset.name);
                            }
                        });

                    ui.add_space(20.0);
                    ui.label(
                        egui::RichText::new("Game")
                            .strong()
                            .color(self.theme.text_color),
                    );
                    ui.separator();
                    ui.label(egui::RichText::new(self.status_text(now)).strong().size(16.0));
                    ui.add_space(10.0);
                    if ui.add_sized(egui::vec2(120.0, 36.0), egui::Button::new("New game")).clicked() {
                        self.new_game();
                    }

                    if let Some(message) = &self.last_message {
                        ui.add_space(10.0);
                        ui.label(egui::RichText::new(message).color(self.theme.attacked_color));
                    }
                });
        }

        egui::CentralPanel::default()
            .frame(egui::Frame::none().fill(self.theme.background))
            .show(ctx, |ui| {
                let available_rect = ui.available_rect_before_wrap();
                let margin = if is_mobile { 10.0 } else { 60.0 };
                let size = (available_rect.height() - margin)
                    .min(available_rect.width() - margin)
                    .max(0.0);
                let center = available_rect.center();
                let board_rect = egui::Rect::from_center_size(center, egui::vec2(size, size));

                let response = ui.allocate_rect(board_rect, egui::Sense::click());
                let n = self.game.board_size().get();
                if response.clicked() {
                    if let Some(position) = response
                        .interact_pointer_pos()
                        .and_then(|pointer| cell_at(board_rect, n, pointer))
                    {
                        self.handle_click(position, now, ctx.screen_rect().center());
                    }
                }

                let painter = ui.painter();
                painter.rect_filled(
                    board_rect.expand(5.0),
                    5.0,
                    self.theme.text_color.linear_multiply(0.2),
                );

                let cell_size = size / n as f32;
                let queens = self.game.queens().as_slice();
                for (position, state) in evaluator::board_cells(queens, n) {
                    let x = board_rect.min.x + position.col as f32 * cell_size;
                    let y = board_rect.min.y + position.row as f32 * cell_size;
                    let cell_rect =
                        egui::Rect::from_min_size(egui::pos2(x, y), egui::vec2(cell_size, cell_size));

                    let color = if (position.row + position.col) % 2 == 0 {
                        self.theme.board_light
                    } else {
                        self.theme.board_dark
                    };
                    painter.rect_filled(cell_rect, 0.0, color);

                    if self.show_range && state.is_in_range {
                        painter.rect_filled(cell_rect.shrink(2.0), 2.0, self.theme.range_tint);
                    }

                    if state.has_queen {
                        let queen_color = if state.is_attacked {
                            self.theme.attacked_color
                        } else {
                            self.theme.queen_color
                        };
                        painter.text(
                            cell_rect.center(),
                            egui::Align2::CENTER_CENTER,
                            "♛",
                            egui::FontId::proportional(cell_size * 0.65),
                            queen_color,
                        );
                    }
                }

                // Coordinates
                for i in 0..n {
                    let font_id = egui::FontId::proportional((cell_size * 0.15).max(8.0));
                    let file = (b'a' + i as u8) as char;

                    let x = board_rect.min.x + i as f32 * cell_size + cell_size / 2.0;
                    let y = board_rect.max.y + 10.0;
                    painter.text(
                        egui::pos2(x, y),
                        egui::Align2::CENTER_TOP,
                        file.to_string(),
                        font_id.clone(),
                        self.theme.text_color,
                    );

                    let x = board_rect.min.x - 10.0;
                    let y = board_rect.min.y + i as f32 * cell_size + cell_size / 2.0;
                    painter.text(
                        egui::pos2(x, y),
                        egui::Align2::RIGHT_CENTER,
                        (i + 1).to_string(),
                        font_id,
                        self.theme.text_color,
                    );
                }

                if let Some(banner) = self.game.banner() {
                    let banner_pos = egui::pos2(center.x, board_rect.min.y - margin / 4.0);
                    painter.text(
                        banner_pos,
                        egui::Align2::CENTER_BOTTOM,
                        banner,
                        egui::FontId::proportional(20.0),
                        self.theme.accent_color,
                    );
                }

                for p in &self.particles {
                    painter.circle_filled(p.pos, p.size, p.color.linear_multiply(p.life));
                }
            });
    }
}
