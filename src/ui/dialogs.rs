// Modal dialogs
// Edit-field and delete-confirmation windows that feed decisions to the console

use crate::api::{Student, StudentField};
use crate::state::{delete_prompt, Confirmation, Console};
use eframe::egui;

/// All dialogs owned by the app
#[derive(Debug, Default)]
pub struct Dialogs {
    pub edit: EditDialog,
    pub delete: DeleteDialog,
}

impl Dialogs {
    pub fn show(&mut self, ctx: &egui::Context, console: &mut Console) {
        self.edit.show(ctx, console);
        self.delete.show(ctx, console);
    }
}

/// Confirmation window shown before a delete is issued
#[derive(Debug, Default)]
pub struct DeleteDialog {
    target: Option<(i64, String)>,
}

impl DeleteDialog {
    pub fn open(&mut self, student: &Student) {
        self.target = Some((student.id, student.name.clone()));
    }

    pub fn is_open(&self) -> bool {
        self.target.is_some()
    }

    pub fn show(&mut self, ctx: &egui::Context, console: &mut Console) {
        let Some((id, name)) = self.target.clone() else {
            return;
        };

        let mut decision = None;
        egui::Window::new("Confirm delete")
            .collapsible(false)
            .resizable(false)
            .anchor(egui::Align2::CENTER_CENTER, [0.0, 0.0])
            .show(ctx, |ui| {
                ui.label(delete_prompt(&name));
                ui.add_space(12.0);
                ui.horizontal(|ui| {
                    let delete = egui::RichText::new("Delete")
                        .color(egui::Color32::from_rgb(220, 0, 0));
                    if ui.button(delete).clicked() {
                        decision = Some(Confirmation::Granted);
                    }
                    if ui.button("Cancel").clicked() {
                        decision = Some(Confirmation::Declined);
                    }
                });
            });

        if let Some(mut decision) = decision {
            console.delete_student(id, &name, &mut decision);
            self.target = None;
        }
    }
}

/// Single-field edit window, defaulting to marks
#[derive(Debug)]
pub struct EditDialog {
    target: Option<Student>,
    field: StudentField,
    value: String,
}

impl Default for EditDialog {
    fn default() -> Self {
        Self {
            target: None,
            field: StudentField::Marks,
            value: String::new(),
        }
    }
}

impl EditDialog {
    pub fn open(&mut self, student: &Student) {
        self.field = StudentField::Marks;
        self.value = current_value(student, self.field);
        self.target = Some(student.clone());
    }

    pub fn is_open(&self) -> bool {
        self.target.is_some()
    }

    pub fn show(&mut self, ctx: &egui::Context, console: &mut Console) {
        let Some(student) = self.target.clone() else {
            return;
        };

        let mut save = false;
        let mut close = false;
        egui::Window::new("Edit student")
            .collapsible(false)
            .resizable(false)
            .anchor(egui::Align2::CENTER_CENTER, [0.0, 0.0])
            .show(ctx, |ui| {
                let before = self.field;
                ui.horizontal(|ui| {
                    ui.label(format!("Update {}'s", student.name));
                    egui::ComboBox::from_id_source("edit_field")
                        .selected_text(self.field.label())
                        .show_ui(ui, |ui| {
                            for field in StudentField::ALL {
                                ui.selectable_value(&mut self.field, field, field.label());
                            }
                        });
                });
                if self.field != before {
                    self.value = current_value(&student, self.field);
                }

                let response = ui.text_edit_singleline(&mut self.value);
                let submitted =
                    response.lost_focus() && ui.input(|i| i.key_pressed(egui::Key::Enter));

                ui.add_space(12.0);
                ui.horizontal(|ui| {
                    let has_value = !self.value.trim().is_empty();
                    if ui.add_enabled(has_value, egui::Button::new("Save")).clicked()
                        || (submitted && has_value)
                    {
                        save = true;
                    }
                    if ui.button("Cancel").clicked() {
                        close = true;
                    }
                });
            });

        if save {
            console.update_student_field(student.id, self.field, &self.value);
        }
        if save || close {
            self.target = None;
        }
    }
}

/// Current value of `field`, used to prefill the edit box
fn current_value(student: &Student, field: StudentField) -> String {
    match field {
        StudentField::Id => student.id.to_string(),
        StudentField::Name => student.name.clone(),
        StudentField::Age => student.age.to_string(),
        StudentField::Grade => student.grade.to_string(),
        StudentField::Marks => student.marks.to_string(),
    }
}
