use eframe::egui::{self, Pos2, Rect, Vec2};

/// Largest rect with the image's aspect ratio, centred in `canvas`.
pub fn letterbox(canvas: Rect, image_size: Vec2) -> Rect {
    let (display, _) = fit_within(image_size, canvas.size());
    let offset = (canvas.size() - display) * 0.5;
    Rect::from_min_size(canvas.min + offset, display)
}

pub fn fit_within(image_size: Vec2, available: Vec2) -> (Vec2, f32) {
    let safe_size = egui::vec2(image_size.x.max(1.0), image_size.y.max(1.0));
    let scale = (available.x / safe_size.x)
        .min(available.y / safe_size.y)
        .max(0.01);
    (safe_size * scale, scale)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClickSide {
    Left,
    Right,
}

/// Which half of `area` a click landed in; the exact middle counts as left.
pub fn click_side(area: Rect, pos: Pos2) -> ClickSide {
    if pos.x > area.center().x {
        ClickSide::Right
    } else {
        ClickSide::Left
    }
}

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct KeyboardState {
    pub next_image: bool,
    pub prev_image: bool,
    pub delete: bool,
    pub escape: bool,
    pub refresh: bool,
}

impl KeyboardState {
    pub fn read(ctx: &egui::Context) -> Self {
        ctx.input(|input| Self {
            next_image: input.key_pressed(egui::Key::ArrowRight),
            prev_image: input.key_pressed(egui::Key::ArrowLeft),
            delete: input.key_pressed(egui::Key::Delete),
            escape: input.key_pressed(egui::Key::Escape),
            refresh: input.key_pressed(egui::Key::F5),
        })
    }
}
