// Student Console - Main Entry Point
// Native dashboard for the student records API

use eframe::egui;
use std::sync::Arc;
use std::time::Instant;
use student_console::api::HttpStudentApi;
use student_console::config::Config;
use student_console::state::Console;
use student_console::ui::{render_app_layout, Dialogs};
use tracing::info;

fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    // Load configuration
    let config = Config::from_env();
    info!("Configuration loaded: {:?}", config);

    // Requests run here while the UI thread keeps rendering
    let runtime = tokio::runtime::Runtime::new()?;
    let api = HttpStudentApi::new(&config.api)?;
    info!(base_url = %api.base_url(), "Student API client ready");

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_title("Student Console")
            .with_inner_size([config.window.width, config.window.height])
            .with_min_inner_size([800.0, 600.0]),
        ..Default::default()
    };

    let handle = runtime.handle().clone();
    eframe::run_native(
        "Student Console",
        options,
        Box::new(move |cc| {
            let ctx = cc.egui_ctx.clone();
            let console = Console::new(Arc::new(api), handle)
                .with_repaint(Arc::new(move || ctx.request_repaint()));
            let mut app = StudentConsoleApp::new(console);
            app.console.start();
            Box::new(app)
        }),
    )
    .map_err(|e| anyhow::anyhow!("Console window failed: {}", e))?;

    info!("Console closed");
    Ok(())
}

/// Main application struct
/// Owns the console state and the modal dialogs
struct StudentConsoleApp {
    console: Console,
    dialogs: Dialogs,
}

impl StudentConsoleApp {
    fn new(console: Console) -> Self {
        Self {
            console,
            dialogs: Dialogs::default(),
        }
    }
}

impl eframe::App for StudentConsoleApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        let now = Instant::now();
        self.console.poll(now);

        render_app_layout(ctx, &mut self.console, &mut self.dialogs);

        // Wake up again to clear the status banner on time
        if let Some(status) = self.console.status() {
            ctx.request_repaint_after(status.expires_at().saturating_duration_since(now));
        }
    }
}
