//! Desktop application using eframe's `App` trait.

use std::path::PathBuf;
use std::sync::mpsc::{channel, Receiver, Sender};
use std::thread;
use std::time::SystemTime;

use educhart_core::ChartSession;
use educhart_renderer::{render_session, ChartExporter, Drawing, RenderResult};
use egui::{Color32, RichText};

use crate::form::{ChartForm, FormAction};
use crate::DesktopConfig;

/// Message shown in the blocking notification window.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Notice {
    /// An export finished and was written to the path.
    Exported(PathBuf),
    /// An export failed.
    ExportFailed(String),
}

impl Notice {
    /// Text shown to the user.
    #[must_use]
    pub fn message(&self) -> String {
        match self {
            Self::Exported(path) => format!("Tải biểu đồ thành công!\n{}", path.display()),
            Self::ExportFailed(reason) => format!("Đã xảy ra lỗi khi tải ảnh.\n{reason}"),
        }
    }
}

/// Desktop chart application.
///
/// Owns the editing session, the current drawing and its preview texture.
/// Any session change bumps the revision, which triggers a full redraw on
/// the next frame.
pub struct EduChartApp {
    config: DesktopConfig,
    session: ChartSession,
    form: ChartForm,
    exporter: ChartExporter,
    drawing: Option<Drawing>,
    preview: Option<egui::TextureHandle>,
    drawn_revision: Option<u64>,
    export_tx: Sender<RenderResult<PathBuf>>,
    export_rx: Receiver<RenderResult<PathBuf>>,
    pending_exports: usize,
    notice: Option<Notice>,
}

impl EduChartApp {
    /// Create the application with the sample session.
    #[must_use]
    pub fn new(config: DesktopConfig) -> Self {
        let (export_tx, export_rx) = channel();
        let session = ChartSession::new();
        tracing::debug!("Session created with {} rows", session.row_count());
        let exporter = ChartExporter::with_defaults();
        match exporter.font_family() {
            Some(family) => tracing::info!("Chart text font: {family}"),
            None => tracing::warn!("No chart text font available"),
        }

        Self {
            config,
            session,
            form: ChartForm::new(),
            exporter,
            drawing: None,
            preview: None,
            drawn_revision: None,
            export_tx,
            export_rx,
            pending_exports: 0,
            notice: None,
        }
    }

    /// The editing session.
    #[must_use]
    pub fn session(&self) -> &ChartSession {
        &self.session
    }

    /// The notification currently shown, if any.
    #[must_use]
    pub fn notice(&self) -> Option<&Notice> {
        self.notice.as_ref()
    }

    /// Apply one form action to the session, or start an export.
    pub fn apply(&mut self, action: FormAction) {
        match action {
            FormAction::Settings(patch) => self.session.update_settings(patch),
            FormAction::AddRow => {
                self.session.add_row();
            }
            FormAction::RemoveRow(index) => {
                if let Err(e) = self.session.remove_row(index) {
                    tracing::warn!("Failed to remove row: {e}");
                }
            }
            FormAction::EditRow { index, edit } => {
                if let Err(e) = self.session.update_row(index, edit) {
                    tracing::warn!("Failed to edit row: {e}");
                }
            }
            FormAction::Export => self.start_export(),
        }
    }

    /// Re-render the drawing if the session changed since the last render.
    ///
    /// Returns whether a new drawing was produced.
    pub fn redraw_if_stale(&mut self) -> bool {
        let revision = self.session.revision();
        if self.drawn_revision == Some(revision) {
            return false;
        }
        tracing::debug!("Redrawing chart at revision {revision}");
        self.drawing = Some(render_session(&self.session));
        self.drawn_revision = Some(revision);
        true
    }

    /// Export the current drawing on a background thread.
    ///
    /// Skipped when nothing has been drawn yet.
    pub fn start_export(&mut self) {
        let Some(drawing) = self.drawing.clone() else {
            tracing::debug!("No chart drawn yet, skipping export");
            return;
        };
        let exporter = self.exporter.clone();
        let dir = self.config.export_dir.clone();
        let tx = self.export_tx.clone();
        self.pending_exports += 1;

        tracing::debug!("Starting export into {}", dir.display());
        thread::spawn(move || {
            let result = exporter.export_to_dir(&drawing, &dir, SystemTime::now());
            let _ = tx.send(result);
        });
    }

    /// Collect finished exports. Returns whether any finished.
    pub fn poll_exports(&mut self) -> bool {
        let mut finished = false;
        while let Ok(result) = self.export_rx.try_recv() {
            self.pending_exports = self.pending_exports.saturating_sub(1);
            finished = true;
            self.notice = Some(match result {
                Ok(path) => Notice::Exported(path),
                Err(e) => {
                    tracing::error!("Export failed: {e}");
                    Notice::ExportFailed(e.to_string())
                }
            });
        }
        finished
    }

    /// Whether an export is still running.
    #[must_use]
    pub fn is_exporting(&self) -> bool {
        self.pending_exports > 0
    }

    /// Rasterize the current drawing into the preview texture.
    fn refresh_preview(&mut self, ctx: &egui::Context) {
        let Some(drawing) = &self.drawing else {
            return;
        };
        let pixmap = match self.exporter.rasterize(drawing, self.config.preview_scale) {
            Ok(pixmap) => pixmap,
            Err(e) => {
                tracing::warn!("Failed to rasterize preview: {e}");
                return;
            }
        };

        let size = [pixmap.width() as usize, pixmap.height() as usize];
        let image = egui::ColorImage::from_rgba_premultiplied(size, pixmap.data());
        match &mut self.preview {
            Some(texture) => texture.set(image, egui::TextureOptions::LINEAR),
            None => {
                self.preview =
                    Some(ctx.load_texture("chart-preview", image, egui::TextureOptions::LINEAR));
            }
        }
    }

    fn show_preview(&self, ui: &mut egui::Ui) {
        let Some(texture) = &self.preview else {
            ui.centered_and_justified(|ui| ui.spinner());
            return;
        };
        let available = ui.available_size();
        let texture_size = texture.size_vec2();
        let scale = (available.x / texture_size.x)
            .min(available.y / texture_size.y)
            .max(0.01);
        ui.centered_and_justified(|ui| {
            ui.add(egui::Image::new((texture.id(), texture_size * scale)));
        });
    }

    fn show_notice(&mut self, ctx: &egui::Context) {
        let Some(notice) = &self.notice else {
            return;
        };
        let color = match notice {
            Notice::Exported(_) => Color32::from_rgb(5, 150, 105),
            Notice::ExportFailed(_) => Color32::from_rgb(220, 38, 38),
        };
        let message = notice.message();

        let mut dismissed = false;
        egui::Window::new("EduChart")
            .collapsible(false)
            .resizable(false)
            .anchor(egui::Align2::CENTER_CENTER, egui::Vec2::ZERO)
            .show(ctx, |ui| {
                ui.label(RichText::new(message).color(color));
                ui.add_space(8.0);
                if ui.button("OK").clicked() {
                    dismissed = true;
                }
            });
        if dismissed {
            self.notice = None;
        }
    }
}

impl eframe::App for EduChartApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.poll_exports();
        if self.is_exporting() {
            ctx.request_repaint();
        }

        if self.redraw_if_stale() {
            self.refresh_preview(ctx);
        }

        let blocked = self.notice.is_some();
        let mut actions = Vec::new();
        egui::SidePanel::left("chart_form")
            .resizable(false)
            .exact_width(380.0)
            .show(ctx, |ui| {
                egui::ScrollArea::vertical().show(ui, |ui| {
                    ui.add_enabled_ui(!blocked, |ui| {
                        actions = self.form.show(ui, &self.session);
                    });
                });
            });

        egui::CentralPanel::default()
            .frame(egui::Frame::none().fill(Color32::from_rgb(241, 245, 249)).inner_margin(24.0))
            .show(ctx, |ui| self.show_preview(ui));

        self.show_notice(ctx);

        if !actions.is_empty() {
            for action in actions {
                self.apply(action);
            }
            ctx.request_repaint();
        }
    }
}
