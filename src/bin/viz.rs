use std::env;
use std::path::PathBuf;

use clap::Parser;
use eframe::egui;
use egui_plot::{Line, Plot, PlotPoints};

use rocket_trajectory::dynamics::state::SimConfig;
use rocket_trajectory::sim::{self, Sample, SimulationResult};
use rocket_trajectory::vehicle::{Rocket, RocketConfig};

/// Plot a simulated flight: altitude, speed, mass, vertical velocity and profile.
#[derive(Parser, Debug)]
#[command(author, version, about = "Rocket trajectory plots")]
struct Cli {
    /// Rocket configuration file (YAML)
    config: PathBuf,
}

fn main() -> anyhow::Result<()> {
    default_log_level();
    pretty_env_logger::init();
    let cli = Cli::parse();

    let sim_config = SimConfig::default();
    let config = RocketConfig::load(&cli.config)?;
    let checked = Rocket::prepare(&config, &sim_config)?;
    for advisory in &checked.advisories {
        log::warn!("{advisory}");
    }
    let rocket = checked.value;
    let result = sim::simulate(&rocket, &sim_config);

    let app = TrajectoryViz { name: rocket.name, result };
    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default().with_inner_size([1200.0, 800.0]),
        ..Default::default()
    };
    eframe::run_native("Rocket Trajectory", options, Box::new(|_| Ok(Box::new(app))))
        .map_err(|e| anyhow::anyhow!("{e}"))
}

struct TrajectoryViz {
    name: String,
    result: SimulationResult,
}

fn time_plot(
    ui: &mut egui::Ui,
    id: &str,
    label: &str,
    samples: &[&Sample],
    size: (f32, f32),
    value: impl Fn(&Sample) -> f64,
) {
    ui.vertical(|ui| {
        ui.label(label);
        let points: PlotPoints = samples.iter().map(|s| [s.time, value(*s)]).collect();
        Plot::new(id)
            .width(size.0)
            .height(size.1)
            .x_axis_label("Time (s)")
            .show(ui, |plot_ui| {
                plot_ui.line(Line::new(label, points));
            });
    });
}

impl eframe::App for TrajectoryViz {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        let step = (self.result.samples.len() / 2000).max(1);
        let sampled: Vec<&Sample> = self.result.samples.iter().step_by(step).collect();

        egui::TopBottomPanel::top("header").show(ctx, |ui| {
            ui.heading(format!("Rocket: {}", self.name));
            let apogee = self.result.apogee().map_or(0.0, |s| s.altitude);
            let max_v = self.result.samples.iter().map(|s| s.speed).fold(0.0_f64, f64::max);
            ui.label(format!(
                "Max altitude: {:.2} km  |  Max speed: {:.1} m/s  |  Flight: {:.1} s  |  {:?}",
                apogee / 1000.0,
                max_v,
                self.result.flight_time(),
                self.result.termination,
            ));
        });

        egui::CentralPanel::default().show(ctx, |ui| {
            let available = ui.available_size();
            let half_w = available.x / 2.0 - 8.0;
            let third_h = available.y / 3.0 - 8.0;
            let size = (half_w, third_h);

            ui.horizontal(|ui| {
                time_plot(ui, "altitude", "Altitude (km)", &sampled, size, |s| s.altitude / 1000.0);
                time_plot(ui, "speed", "Speed (m/s)", &sampled, size, |s| s.speed);
            });

            ui.horizontal(|ui| {
                time_plot(ui, "mass", "Mass (kg)", &sampled, size, |s| s.mass);
                time_plot(ui, "vz", "Vertical Velocity (m/s)", &sampled, size, |s| s.vel.z);
            });

            // Altitude vs Downrange
            ui.vertical(|ui| {
                ui.label("Trajectory Profile (km)");
                let points: PlotPoints = sampled
                    .iter()
                    .map(|s| {
                        let dr = (s.pos.x.powi(2) + s.pos.y.powi(2)).sqrt();
                        [dr / 1000.0, s.altitude / 1000.0]
                    })
                    .collect();
                Plot::new("profile")
                    .width(available.x - 8.0)
                    .height(third_h)
                    .x_axis_label("Downrange (km)")
                    .show(ui, |plot_ui| {
                        plot_ui.line(Line::new("Trajectory", points));
                    });
            });
        });
    }
}

/// Default log level to "info" unless RUST_LOG is already set.
fn default_log_level() {
    if env::var_os("RUST_LOG").is_none() {
        env::set_var("RUST_LOG", "info");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn log_level_defaults_to_info_but_respects_user_choice() {
        env::remove_var("RUST_LOG");
        default_log_level();
        assert_eq!(env::var("RUST_LOG").unwrap(), "info");

        env::set_var("RUST_LOG", "debug");
        default_log_level();
        assert_eq!(env::var("RUST_LOG").unwrap(), "debug");
    }
}
