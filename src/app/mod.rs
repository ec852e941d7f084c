pub mod loader;

use std::path::Path;

use anyhow::Result;
use eframe::{
    egui::{self, Color32, ViewportCommand},
    App, Frame,
};

use crate::{
    file_manager::ImageFileManager,
    search::open_image_search,
    ui::{click_side, letterbox, ClickSide, KeyboardState},
};

use self::loader::load_image;

const DELETE_BUTTON_SIZE: [f32; 2] = [27.0, 100.0];
const METADATA_MIN_WIDTH: f32 = 400.0;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    Next,
    Previous,
    Delete,
    Refresh,
    Search(String),
    Close,
}

pub struct PngViewerApp {
    pub manager: ImageFileManager,
    pub texture: Option<egui::TextureHandle>,
    pub image_size: egui::Vec2,
    pub metadata_lines: Vec<String>,
    pub status: String,
}

impl PngViewerApp {
    pub fn new(cc: &eframe::CreationContext<'_>, manager: ImageFileManager) -> Result<Self> {
        let mut app = Self {
            manager,
            texture: None,
            image_size: egui::Vec2::new(1.0, 1.0),
            metadata_lines: Vec::new(),
            status: String::from("Ready"),
        };
        app.show_current(&cc.egui_ctx);
        Ok(app)
    }

    fn show_current(&mut self, ctx: &egui::Context) {
        let Some(path) = self.manager.current_file().map(Path::to_path_buf) else {
            self.texture = None;
            self.metadata_lines.clear();
            self.status = "No images remaining".into();
            return;
        };

        match load_image(&path) {
            Ok(loaded) => {
                self.image_size = loaded.image_size();
                self.metadata_lines = loaded.metadata_lines();
                let status =
                    loaded.status_line(self.manager.current_index() + 1, self.manager.len());
                if let Some(texture) = self.texture.as_mut() {
                    texture.set(loaded.color_image, egui::TextureOptions::LINEAR);
                } else {
                    self.texture = Some(ctx.load_texture(
                        "pngviewer-current",
                        loaded.color_image,
                        egui::TextureOptions::LINEAR,
                    ));
                }
                self.status = status;
            }
            Err(err) => {
                tracing::warn!("{err:#}");
                self.texture = None;
                self.metadata_lines.clear();
                self.status = format!("{err:#}");
            }
        }
    }

    fn apply(&mut self, action: Action, ctx: &egui::Context) {
        match action {
            Action::Next => {
                if self.manager.next_file().is_some() {
                    self.show_current(ctx);
                }
            }
            Action::Previous => {
                if self.manager.previous_file().is_some() {
                    self.show_current(ctx);
                }
            }
            Action::Delete => {
                if self.manager.delete_current_file().is_some() {
                    self.show_current(ctx);
                } else {
                    ctx.send_viewport_cmd(ViewportCommand::Close);
                }
            }
            Action::Refresh => match self.manager.refresh() {
                Ok(()) => self.show_current(ctx),
                Err(err) => {
                    tracing::warn!("Refresh failed: {err:#}");
                    self.status = format!("Refresh failed: {err:#}");
                }
            },
            Action::Search(line) => match open_image_search(&line) {
                Ok(Some(url)) => self.status = format!("Opened {url}"),
                Ok(None) => {}
                Err(err) => {
                    tracing::warn!("{err:#}");
                    self.status = format!("{err:#}");
                }
            },
            Action::Close => ctx.send_viewport_cmd(ViewportCommand::Close),
        }
    }
}

impl App for PngViewerApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut Frame) {
        let keys = KeyboardState::read(ctx);
        let mut actions = Vec::new();
        if keys.escape {
            actions.push(Action::Close);
        }
        if keys.next_image {
            actions.push(Action::Next);
        }
        if keys.prev_image {
            actions.push(Action::Previous);
        }
        if keys.delete {
            actions.push(Action::Delete);
        }
        if keys.refresh {
            actions.push(Action::Refresh);
        }

        egui::TopBottomPanel::bottom("status").show(ctx, |ui| {
            ui.monospace(&self.status);
        });

        egui::SidePanel::right("metadata")
            .resizable(true)
            .min_width(METADATA_MIN_WIDTH)
            .show(ctx, |ui| {
                egui::ScrollArea::vertical()
                    .auto_shrink([false, false])
                    .show(ui, |ui| {
                        for line in &self.metadata_lines {
                            let label = egui::Label::new(egui::RichText::new(line).monospace())
                                .sense(egui::Sense::click());
                            ui.add(label).context_menu(|ui| {
                                if ui.button("Search images").clicked() {
                                    actions.push(Action::Search(line.clone()));
                                }
                            });
                        }
                    });
            });

        egui::SidePanel::right("actions")
            .resizable(false)
            .exact_width(DELETE_BUTTON_SIZE[0] + 12.0)
            .show(ctx, |ui| {
                ui.add_space(((ui.available_height() - DELETE_BUTTON_SIZE[1]) / 2.0).max(0.0));
                ui.vertical_centered(|ui| {
                    let button = ui
                        .add_sized(DELETE_BUTTON_SIZE, egui::Button::new("D\ne\nl\ne\nt\ne"))
                        .on_hover_text("Delete (Del)");
                    if button.clicked() {
                        actions.push(Action::Delete);
                    }
                });
            });

        egui::CentralPanel::default().show(ctx, |ui| {
            let (response, painter) = ui.allocate_painter(ui.available_size(), egui::Sense::click());
            painter.rect_filled(response.rect, 0.0, Color32::BLACK);

            if let Some(texture) = &self.texture {
                painter.image(
                    texture.id(),
                    letterbox(response.rect, self.image_size),
                    egui::Rect::from_min_max(egui::pos2(0.0, 0.0), egui::pos2(1.0, 1.0)),
                    Color32::WHITE,
                );
            } else {
                painter.text(
                    response.rect.center(),
                    egui::Align2::CENTER_CENTER,
                    "No image",
                    egui::FontId::proportional(24.0),
                    Color32::WHITE,
                );
            }

            if response.clicked() {
                if let Some(pos) = response.interact_pointer_pos() {
                    actions.push(match click_side(response.rect, pos) {
                        ClickSide::Left => Action::Previous,
                        ClickSide::Right => Action::Next,
                    });
                }
            }
        });

        if !actions.is_empty() {
            for action in actions {
                self.apply(action, ctx);
            }
            ctx.request_repaint();
        }
    }
}
