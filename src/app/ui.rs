use egui::{Button, Context};

use super::App;

/// Draw the main application UI
pub fn draw_ui(app: &mut App, ctx: &Context) {
    egui::SidePanel::left("side_panel").show(ctx, |ui| {
        ui.heading("Sources");
        ui.separator();

        if app.sources.is_empty() {
            ui.label("No repositories configured.");
        }
        for source in &app.sources {
            ui.label(source);
        }

        ui.separator();

        let fetching = app.query.is_fetching();
        if ui.add_enabled(!fetching, Button::new("Sync")).clicked() {
            log::info!("Manual sync requested");
            app.query.refetch();
        }
        if fetching {
            ui.horizontal(|ui| {
                ui.spinner();
                ui.label("Syncing...");
            });
        }
    });

    egui::CentralPanel::default().show(ctx, |ui| {
        ui.heading("Dashboard");
        ui.separator();

        egui::ScrollArea::vertical().show(ui, |ui| {
            app.chart.show(ui, &mut app.query);
        });
    });
}
