use crate::errors::{Error, Unknown};
use crate::hardware::Controller;
use crate::ui::status::{title, Report};
use eframe::egui;
use log::{info, warn};

/// Color of the status label on success (tk "green").
const SUCCESS_COLOR: egui::Color32 = egui::Color32::from_rgb(0, 128, 0);
/// Color of the status label on failure.
const FAILURE_COLOR: egui::Color32 = egui::Color32::from_rgb(255, 0, 0);

/// The graphical front end: one status label and two buttons.
pub struct GuiApp {
    controller: Controller,
    report: Report,
}

impl GuiApp {
    /// Creates the application and tries to connect right away.
    pub fn new(controller: Controller) -> Self {
        let mut app = Self {
            controller,
            report: Report::Idle,
        };
        app.connect();
        app
    }

    fn target(&self) -> String {
        self.controller.settings().target().to_string()
    }

    fn connect(&mut self) {
        let target = self.target();
        self.report = Report::from_connect(self.controller.connect(), &target);
        match self.report.is_success() {
            true => info!("{}", self.report.console()),
            false => warn!("{}", self.report.console()),
        }
    }

    fn toggle(&mut self) {
        let target = self.target();
        self.report = Report::from_toggle(self.controller.send_toggle(), &target);
        if !self.report.is_success() {
            warn!("{}", self.report.console());
        }
    }

    fn status_color(&self) -> egui::Color32 {
        match self.report.is_success() {
            true => SUCCESS_COLOR,
            false => FAILURE_COLOR,
        }
    }
}

impl eframe::App for GuiApp {
    fn update(&mut self, ctx: &egui::Context, _: &mut eframe::Frame) {
        egui::CentralPanel::default().show(ctx, |ui| {
            ui.vertical_centered(|ui| {
                ui.add_space(5.0);
                ui.colored_label(self.status_color(), self.report.label());

                ui.add_space(20.0);
                let toggle = egui::Button::new("Toggle LED").min_size(egui::vec2(160.0, 40.0));
                if ui.add(toggle).clicked() {
                    self.toggle();
                }

                ui.add_space(10.0);
                if ui.button(format!("Connect to {}", self.target())).clicked() {
                    self.connect();
                }
            });
        });
    }
}

/// Opens the window and blocks until it is closed.
pub fn run(controller: Controller) -> Result<(), Error> {
    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default().with_inner_size([320.0, 200.0]),
        ..Default::default()
    };
    let name = title(controller.settings().target());
    eframe::run_native(
        &name,
        options,
        Box::new(|_| Ok(Box::new(GuiApp::new(controller)))),
    )
    .map_err(|error| Unknown {
        info: error.to_string(),
    })
}
