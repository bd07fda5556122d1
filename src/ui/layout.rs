// Main application layout
// Header, view tabs, status banner and the four view bodies

use crate::api::{Grade, SearchCriterion};
use crate::state::{ActiveView, AnalyticsState, Console};
use crate::ui::components::*;
use crate::ui::dialogs::Dialogs;
use eframe::egui;

/// Render the whole console for one frame
pub fn render_app_layout(ctx: &egui::Context, console: &mut Console, dialogs: &mut Dialogs) {
    render_header(ctx, console);

    egui::CentralPanel::default().show(ctx, |ui| {
        ui.add_space(8.0);
        egui::ScrollArea::vertical()
            .id_source("view_scroll")
            .auto_shrink([false; 2])
            .show(ui, |ui| match console.view() {
                ActiveView::List => render_list_view(ui, console, dialogs),
                ActiveView::Add => render_add_view(ui, console),
                ActiveView::Search => render_search_view(ui, console),
                ActiveView::Analytics => render_analytics_view(ui, console),
            });
    });

    dialogs.show(ctx, console);
}

/// Title bar, view tabs and the status banner
fn render_header(ctx: &egui::Context, console: &mut Console) {
    egui::TopBottomPanel::top("header").show(ctx, |ui| {
        ui.add_space(8.0);
        ui.horizontal(|ui| {
            ui.heading(egui::RichText::new("🎓 Smart Student Management System").size(22.0));
            ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                ui.add_space(8.0);
                ui.label(format!("{} Students", console.students().len()));
                if console.is_busy() {
                    ui.spinner();
                }
            });
        });
        ui.add_space(8.0);

        ui.horizontal(|ui| {
            for view in ActiveView::ALL {
                let selected = console.view() == view;
                if ui.selectable_label(selected, view.title()).clicked() {
                    console.set_view(view);
                }
            }
        });
        ui.add_space(6.0);

        if let Some(status) = console.status() {
            status_banner(ui, status);
            ui.add_space(6.0);
        }
    });
}

fn section_header(ui: &mut egui::Ui, title: &str) -> bool {
    let mut refresh = false;
    ui.horizontal(|ui| {
        ui.heading(title);
        ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
            refresh = refresh_button(ui).clicked();
        });
    });
    ui.separator();
    ui.add_space(8.0);
    refresh
}

fn render_list_view(ui: &mut egui::Ui, console: &mut Console, dialogs: &mut Dialogs) {
    if section_header(ui, "All Students") {
        console.load_students();
    }

    if console.is_busy() {
        loading(ui, "Loading...");
        return;
    }
    if console.students().is_empty() {
        empty_state(ui, "No students found. Add some students to get started!");
        return;
    }

    // Clone so card actions can mutate the dialogs while iterating
    let students = console.students().to_vec();
    ui.horizontal_wrapped(|ui| {
        for student in &students {
            match student_card(ui, student, true) {
                CardAction::Edit => dialogs.edit.open(student),
                CardAction::Delete => dialogs.delete.open(student),
                CardAction::None => {}
            }
        }
    });
}

fn render_add_view(ui: &mut egui::Ui, console: &mut Console) {
    ui.heading("Add New Student");
    ui.separator();
    ui.add_space(8.0);

    egui::Grid::new("add_student_form")
        .num_columns(2)
        .spacing([16.0, 10.0])
        .show(ui, |ui| {
            ui.label("Student ID *");
            ui.add(
                egui::TextEdit::singleline(&mut console.add_form.id).hint_text("Enter unique ID"),
            );
            ui.end_row();

            ui.label("Full Name *");
            ui.add(
                egui::TextEdit::singleline(&mut console.add_form.name)
                    .hint_text("Enter student name"),
            );
            ui.end_row();

            ui.label("Age *");
            ui.add(egui::TextEdit::singleline(&mut console.add_form.age).hint_text("Age"));
            ui.end_row();

            ui.label("Grade *");
            egui::ComboBox::from_id_source("add_grade")
                .selected_text(console.add_form.grade.as_str())
                .show_ui(ui, |ui| {
                    for grade in Grade::ALL {
                        ui.selectable_value(&mut console.add_form.grade, grade, grade.as_str());
                    }
                });
            ui.end_row();

            ui.label("Marks *");
            ui.add(egui::TextEdit::singleline(&mut console.add_form.marks).hint_text("0-100"));
            ui.end_row();
        });

    ui.add_space(12.0);
    let validation = console.add_form.validate();
    let busy = console.is_busy();
    let caption = if busy { "Adding..." } else { "➕ Add Student" };
    if primary_button(ui, !busy && validation.is_ok(), caption).clicked() {
        console.submit_add_form();
    }
    if let Err(problem) = validation {
        ui.add_space(4.0);
        ui.label(egui::RichText::new(problem.to_string()).weak().small());
    }
}

fn render_search_view(ui: &mut egui::Ui, console: &mut Console) {
    ui.heading("Search Students");
    ui.separator();
    ui.add_space(8.0);

    let mut submit = false;
    ui.horizontal(|ui| {
        egui::ComboBox::from_id_source("search_by")
            .selected_text(console.search_criterion.label())
            .show_ui(ui, |ui| {
                for criterion in [SearchCriterion::Name, SearchCriterion::Id] {
                    let label = criterion.label();
                    ui.selectable_value(&mut console.search_criterion, criterion, label);
                }
            });

        let hint = format!("Enter {}...", console.search_criterion.as_query());
        let response =
            ui.add(egui::TextEdit::singleline(&mut console.search_query).hint_text(hint));
        if response.lost_focus() && ui.input(|i| i.key_pressed(egui::Key::Enter)) {
            submit = true;
        }

        if primary_button(ui, !console.is_busy(), "🔍 Search").clicked() {
            submit = true;
        }
    });

    if submit {
        console.run_search();
    }

    if let Some(student) = console.search_result().cloned() {
        ui.add_space(16.0);
        ui.label(egui::RichText::new("Search Results").strong());
        ui.add_space(6.0);
        student_card(ui, &student, false);
    }
}

fn render_analytics_view(ui: &mut egui::Ui, console: &mut Console) {
    if section_header(ui, "Data Analytics") {
        console.load_analytics();
    }

    if console.is_busy() {
        loading(ui, "Loading analytics...");
        return;
    }

    match console.analytics() {
        AnalyticsState::Summary(summary) => {
            ui.horizontal_wrapped(|ui| {
                analytics_card(
                    ui,
                    "🏆 Top Performer",
                    summary.top_performer_name(),
                    &format!("{} marks", summary.top_performer_marks()),
                );
                analytics_card(ui, "📊 Average Marks", &summary.average_label(), "out of 100");
                analytics_card(
                    ui,
                    "📈 Highest Score",
                    &summary.highest().to_string(),
                    "maximum marks",
                );
                analytics_card(
                    ui,
                    "👥 Below Average",
                    &summary.below_average().to_string(),
                    "students need help",
                );
                analytics_card(
                    ui,
                    "📚 Score Range",
                    &summary.score_range_label(),
                    "min - max scores",
                );
            });
        }
        AnalyticsState::NoData(_) | AnalyticsState::NotLoaded => {
            empty_state(ui, "No data available for analytics. Add some students first!");
        }
    }
}
