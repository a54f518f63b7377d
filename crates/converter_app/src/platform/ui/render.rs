use converter_core::{AppViewModel, Msg, PreviewView, RequestStatus, ResultRowView};
use egui::{Align, Layout, RichText, Stroke};

use super::constants::*;
use crate::platform::intake;

/// Draws one frame and returns the messages produced by user interaction.
pub fn render(ctx: &egui::Context, view: &AppViewModel, files_hovering: bool) -> Vec<Msg> {
    let mut msgs = Vec::new();

    egui::TopBottomPanel::top("header").show(ctx, |ui| {
        ui.add_space(6.0);
        ui.label(
            RichText::new(format!("📄 {WINDOW_TITLE}"))
                .heading()
                .strong()
                .color(COLOR_PRIMARY),
        );
        ui.add_space(6.0);
    });

    egui::SidePanel::left("converted_files")
        .resizable(true)
        .default_width(SIDEBAR_WIDTH)
        .show(ctx, |ui| sidebar(ui, &view.results, &mut msgs));

    egui::CentralPanel::default().show(ctx, |ui| {
        if view.show_upload {
            upload_panel(ui, view, files_hovering, &mut msgs);
        } else {
            preview_panel(ui, &view.preview, &mut msgs);
        }
    });

    msgs
}

fn sidebar(ui: &mut egui::Ui, results: &[ResultRowView], msgs: &mut Vec<Msg>) {
    ui.add_space(8.0);
    ui.heading("☰ Converted Files");
    ui.separator();

    if results.is_empty() {
        ui.vertical_centered(|ui| {
            ui.add_space(12.0);
            ui.weak(TEXT_NO_RESULTS);
        });
    } else {
        egui::ScrollArea::vertical()
            .max_height(ui.available_height() - 48.0)
            .show(ui, |ui| {
                for row in results {
                    let label = format!("🗋 {}", row.file.name);
                    if ui
                        .selectable_label(row.active, label)
                        .on_hover_text(row.file.url.as_str())
                        .clicked()
                    {
                        msgs.push(Msg::ResultSelected(row.file.clone()));
                    }
                }
            });
    }

    ui.add_space(12.0);
    let button = egui::Button::new("Start New Conversion")
        .min_size([ui.available_width(), 24.0].into());
    if ui.add(button).clicked() {
        msgs.push(Msg::ResetClicked);
    }
}

fn upload_panel(
    ui: &mut egui::Ui,
    view: &AppViewModel,
    files_hovering: bool,
    msgs: &mut Vec<Msg>,
) {
    let border = if files_hovering {
        COLOR_PRIMARY
    } else {
        ui.visuals().widgets.noninteractive.bg_stroke.color
    };

    egui::Frame::group(ui.style())
        .stroke(Stroke::new(2.0, border))
        .inner_margin(24.0)
        .show(ui, |ui| {
            ui.set_width(ui.available_width());
            ui.vertical_centered(|ui| {
                ui.label(RichText::new("☁").size(40.0).color(COLOR_PRIMARY));
                ui.heading(TEXT_DROP_HINT);
                ui.weak("or");
                if ui.button("📂 Browse Files").clicked() {
                    if let Some(paths) = rfd::FileDialog::new()
                        .add_filter("PDF", &["pdf"])
                        .pick_files()
                    {
                        msgs.push(Msg::FilesAdded(intake::from_paths(paths)));
                    }
                }

                if !view.pending_files.is_empty() {
                    ui.add_space(12.0);
                    ui.label(RichText::new("Selected Files:").strong());
                    for name in &view.pending_files {
                        ui.label(format!("📕 {name}"));
                    }
                }
            });
        });

    ui.add_space(16.0);
    ui.vertical_centered(|ui| {
        let label = if view.in_flight {
            "⏳ Processing..."
        } else {
            "⚙ Convert Files"
        };
        ui.horizontal(|ui| {
            let button = egui::Button::new(RichText::new(label).size(16.0))
                .min_size([180.0, 36.0].into());
            if ui.add_enabled(view.can_submit, button).clicked() {
                msgs.push(Msg::SubmitClicked);
            }
            if view.in_flight {
                ui.spinner();
            }
        });
    });

    let (icon, color, message) = match &view.status {
        RequestStatus::Idle => return,
        RequestStatus::Success(message) => ("✔", COLOR_SUCCESS, message),
        RequestStatus::Warning(message) => ("⚠", COLOR_WARNING, message),
        RequestStatus::Error(message) => ("❗", COLOR_ERROR, message),
    };
    ui.add_space(16.0);
    egui::Frame::group(ui.style())
        .stroke(Stroke::new(1.0, color))
        .show(ui, |ui| {
            ui.set_width(ui.available_width());
            ui.colored_label(color, format!("{icon} {message}"));
        });
}

fn preview_panel(ui: &mut egui::Ui, preview: &PreviewView, msgs: &mut Vec<Msg>) {
    match preview {
        PreviewView::NoSelection => {
            ui.centered_and_justified(|ui| {
                ui.weak(TEXT_NO_SELECTION);
            });
        }
        PreviewView::Loading { .. } => {
            ui.centered_and_justified(|ui| {
                ui.add(egui::Spinner::new().size(SPINNER_SIZE));
            });
        }
        PreviewView::Failed { message, .. } => {
            egui::Frame::group(ui.style())
                .stroke(Stroke::new(1.0, COLOR_ERROR))
                .inner_margin(12.0)
                .show(ui, |ui| {
                    ui.set_width(ui.available_width());
                    ui.colored_label(
                        COLOR_ERROR,
                        RichText::new("⚠ Error Loading Content").strong(),
                    );
                    ui.label(message.as_str());
                });
        }
        PreviewView::Content { name, text } => {
            ui.horizontal(|ui| {
                ui.heading(format!("🗋 {name}"));
                ui.with_layout(Layout::right_to_left(Align::Center), |ui| {
                    if ui.button("⬇ Download").clicked() {
                        msgs.push(Msg::DownloadClicked);
                    }
                });
            });
            ui.separator();
            ui.label(RichText::new("✏ Editor").strong());

            let mut buffer = text.clone();
            egui::ScrollArea::vertical().show(ui, |ui| {
                let editor = egui::TextEdit::multiline(&mut buffer)
                    .code_editor()
                    .desired_width(f32::INFINITY)
                    .desired_rows(EDITOR_ROWS);
                if ui.add(editor).changed() {
                    msgs.push(Msg::EditorChanged(buffer.clone()));
                }
            });
        }
    }
}
