//! Main application struct and eframe integration
//!
//! One screen: record/stop toggle, play/stop toggle, share, and a
//! transient banner. Everything rendered here is a projection of the
//! controller's snapshot; taps go back in as intents.

use crate::audio::device::AudioDevice;
use crate::controller::{Intent, Phase, ScreenController, ScreenSnapshot};
use crate::sharing::ShareTarget;
use crate::ui::theme::Theme;
use egui::{self, CentralPanel, Color32, Rect, RichText, Sense, Stroke, TopBottomPanel, Vec2};
use std::time::Instant;

/// Main Soundbite application
pub struct SoundbiteApp<D: AudioDevice, S: ShareTarget> {
    /// Screen controller (the only state owner)
    controller: ScreenController<D, S>,
    /// Visual theme
    theme: Theme,
}

impl<D: AudioDevice, S: ShareTarget> SoundbiteApp<D, S> {
    /// Create a new Soundbite application
    pub fn new(cc: &eframe::CreationContext<'_>, device: D, share_target: S) -> Self {
        let theme = Theme::dark();
        theme.apply(&cc.egui_ctx);

        Self {
            controller: ScreenController::new(device, share_target),
            theme,
        }
    }

    /// Show the top header bar
    fn show_header(&mut self, ctx: &egui::Context) {
        TopBottomPanel::top("header")
            .frame(
                egui::Frame::none()
                    .fill(self.theme.bg_secondary)
                    .inner_margin(12.0),
            )
            .show(ctx, |ui| {
                ui.horizontal(|ui| {
                    ui.label(
                        RichText::new("Soundbite")
                            .size(20.0)
                            .strong()
                            .color(self.theme.text_primary),
                    );
                    ui.label(
                        RichText::new("Record · Replay · Share")
                            .size(14.0)
                            .color(self.theme.text_muted),
                    );
                });
            });
    }

    /// Show the three tap targets and the banner region
    fn show_content(&mut self, ctx: &egui::Context, snapshot: &ScreenSnapshot, now: Instant) {
        CentralPanel::default()
            .frame(egui::Frame::none().fill(self.theme.bg_primary))
            .show(ctx, |ui| {
                let spacing = self.theme.spacing_lg;
                ui.add_space(spacing * 2.0);

                ui.vertical_centered(|ui| {
                    let recording = snapshot.phase == Phase::Recording;
                    let record_label = if recording { "Stop Recording" } else { "Start Recording" };
                    let record_color = if recording { self.theme.recording } else { self.theme.primary };
                    if self
                        .circle_button(ui, record_label, record_color, recording)
                        .clicked()
                    {
                        self.controller.dispatch(Intent::ToggleRecording, now);
                    }
                    ui.add_space(spacing);

                    let playing = snapshot.phase == Phase::Playing;
                    let play_label = if playing { "Stop" } else { "Play" };
                    if self
                        .circle_button(ui, play_label, self.theme.primary, playing)
                        .clicked()
                    {
                        self.controller.dispatch(Intent::TogglePlayback, now);
                    }
                    ui.add_space(spacing);

                    if self
                        .circle_button(ui, "Share Your Record!", self.theme.primary, false)
                        .clicked()
                    {
                        self.controller.dispatch(Intent::Share, now);
                    }
                });

                if snapshot.banner_visible {
                    self.show_banner(ui, &snapshot.banner_text);
                }
            });
    }

    /// A large circular tap target with a label underneath
    fn circle_button(
        &self,
        ui: &mut egui::Ui,
        label: &str,
        color: Color32,
        active: bool,
    ) -> egui::Response {
        let size = Vec2::new(220.0, 90.0);
        let (rect, response) = ui.allocate_exact_size(size, Sense::click());

        if ui.is_rect_visible(rect) {
            let painter = ui.painter();
            let center = egui::pos2(rect.center().x, rect.top() + 30.0);

            let fill = if active {
                color
            } else if response.hovered() {
                color.gamma_multiply(0.5)
            } else {
                color.gamma_multiply(0.15)
            };

            painter.circle_filled(center, 28.0, fill);
            painter.circle_stroke(center, 28.0, Stroke::new(1.5, color));

            if active {
                // Stop square inside the circle
                painter.rect_filled(
                    Rect::from_center_size(center, Vec2::splat(16.0)),
                    2.0,
                    Color32::WHITE,
                );
            }

            painter.text(
                egui::pos2(rect.center().x, rect.bottom() - 12.0),
                egui::Align2::CENTER_CENTER,
                label,
                egui::FontId::proportional(16.0),
                self.theme.text_primary,
            );
        }

        response
    }

    /// The transient banner, centered over the lower half of the screen
    fn show_banner(&self, ui: &mut egui::Ui, text: &str) {
        let screen = ui.ctx().screen_rect();
        let pos = egui::pos2(screen.center().x, screen.bottom() - screen.height() * 0.25);

        egui::Area::new(egui::Id::new("banner"))
            .fixed_pos(pos)
            .pivot(egui::Align2::CENTER_CENTER)
            .show(ui.ctx(), |ui| {
                egui::Frame::none()
                    .fill(self.theme.bg_banner)
                    .rounding(self.theme.card_rounding)
                    .stroke(Stroke::new(1.0, self.theme.primary))
                    .inner_margin(10.0)
                    .show(ui, |ui| {
                        ui.label(
                            RichText::new(text)
                                .size(18.0)
                                .color(self.theme.text_primary),
                        );
                    });
            });
    }
}

impl<D: AudioDevice, S: ShareTarget> eframe::App for SoundbiteApp<D, S> {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        let now = Instant::now();

        // Playback-finished events and banner dismissal
        self.controller.tick(now);

        let snapshot = self.controller.snapshot();

        self.show_header(ctx);
        self.show_content(ctx, &snapshot, now);

        // Keep ticking while something is running or a banner is pending
        if snapshot.phase != Phase::Idle || snapshot.banner_visible {
            ctx.request_repaint_after(std::time::Duration::from_millis(100));
        }
    }
}
