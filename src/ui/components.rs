// Reusable UI components
// Grade badges, student cards, analytics cards and the status banner

use crate::api::{Grade, Student};
use crate::state::{Severity, StatusMessage};
use eframe::egui;

/// Button pressed on a student card this frame
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CardAction {
    None,
    Edit,
    Delete,
}

/// Text color for a grade badge
/// Colors: A/B (green), C/D (yellow), E/F (red), unrecognised (gray)
pub fn grade_color(grade: Grade) -> egui::Color32 {
    match grade {
        Grade::A | Grade::B => egui::Color32::from_rgb(0, 180, 0),
        Grade::C | Grade::D => egui::Color32::from_rgb(220, 180, 0),
        Grade::E | Grade::F => egui::Color32::from_rgb(220, 0, 0),
        Grade::Unknown => egui::Color32::GRAY,
    }
}

/// Background color for a status banner
pub fn severity_color(severity: Severity) -> egui::Color32 {
    match severity {
        Severity::Success => egui::Color32::from_rgb(30, 120, 50),
        Severity::Error => egui::Color32::from_rgb(160, 30, 30),
        Severity::Info => egui::Color32::from_rgb(30, 80, 150),
    }
}

/// Render a grade as colored bold text
pub fn grade_badge(ui: &mut egui::Ui, grade: Grade) {
    ui.label(
        egui::RichText::new(grade.as_str())
            .strong()
            .size(16.0)
            .color(grade_color(grade)),
    );
}

/// Render the status message as a full-width colored strip
pub fn status_banner(ui: &mut egui::Ui, status: &StatusMessage) {
    egui::Frame::none()
        .fill(severity_color(status.severity))
        .rounding(egui::Rounding::same(4.0))
        .inner_margin(egui::Margin::symmetric(12.0, 8.0))
        .show(ui, |ui| {
            ui.set_width(ui.available_width());
            ui.label(egui::RichText::new(&status.text).color(egui::Color32::WHITE));
        });
}

/// Render a primary action button
pub fn primary_button(ui: &mut egui::Ui, enabled: bool, text: &str) -> egui::Response {
    ui.add_enabled(enabled, egui::Button::new(egui::RichText::new(text).strong()))
}

/// Render a refresh button
pub fn refresh_button(ui: &mut egui::Ui) -> egui::Response {
    ui.button("⟳ Refresh")
}

/// Render one student as a card
/// Edit/Delete buttons are only drawn when `with_actions` is set
pub fn student_card(ui: &mut egui::Ui, student: &Student, with_actions: bool) -> CardAction {
    let mut action = CardAction::None;

    ui.group(|ui| {
        ui.set_width(220.0);
        ui.vertical(|ui| {
            ui.horizontal(|ui| {
                ui.heading(egui::RichText::new(&student.name).size(16.0));
                ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                    grade_badge(ui, student.grade);
                });
            });
            ui.add_space(6.0);

            detail_row(ui, "ID:", &student.id.to_string());
            detail_row(ui, "Age:", &format!("{} years", student.age));
            detail_row(ui, "Marks:", &format!("{}/100", student.marks));

            if with_actions {
                ui.add_space(6.0);
                ui.horizontal(|ui| {
                    if ui.button("✏ Edit").clicked() {
                        action = CardAction::Edit;
                    }
                    let delete = egui::RichText::new("🗑 Delete")
                        .color(egui::Color32::from_rgb(220, 0, 0));
                    if ui.button(delete).clicked() {
                        action = CardAction::Delete;
                    }
                });
            }
        });
    });

    action
}

fn detail_row(ui: &mut egui::Ui, label: &str, value: &str) {
    ui.horizontal(|ui| {
        ui.label(egui::RichText::new(label).strong());
        ui.label(egui::RichText::new(value).monospace());
    });
}

/// Render a single analytics figure
pub fn analytics_card(ui: &mut egui::Ui, title: &str, figure: &str, subtitle: &str) {
    ui.group(|ui| {
        ui.set_width(180.0);
        ui.vertical_centered(|ui| {
            ui.label(egui::RichText::new(title).strong());
            ui.add_space(6.0);
            ui.label(egui::RichText::new(figure).size(26.0).strong());
            ui.label(egui::RichText::new(subtitle).weak().small());
        });
    });
}

/// Centered placeholder shown when a view has nothing to display
pub fn empty_state(ui: &mut egui::Ui, message: &str) {
    ui.vertical_centered(|ui| {
        ui.add_space(60.0);
        ui.label(egui::RichText::new(message).italics().weak().size(14.0));
    });
}

/// Spinner with a caption
pub fn loading(ui: &mut egui::Ui, caption: &str) {
    ui.vertical_centered(|ui| {
        ui.add_space(40.0);
        ui.spinner();
        ui.label(egui::RichText::new(caption).weak());
    });
}
