//! Interactive Free-Fall Dashboard
//!
//! Drop a preset object (or a custom one) from a chosen height and watch
//! velocity and height evolve live under gravity and quadratic air drag:
//! - Start / Pause / Resume / Reset lifecycle driven by wall-clock ticks
//! - Object and gravity presets with sliders for hand-tuned parameters
//! - Live velocity and height charts with a terminal-velocity reference
//! - Painted drop shaft with the ball at its current height

use dynamics::{ObjectPreset, drag_force, gravity_force, presets::gravity, terminal_velocity};
use runner::SimulationRunner;
use simcore::{RunStatus, SimParams};

use egui_plot::{Legend, Line, LineStyle, Plot, PlotBounds, PlotPoints};
use std::time::{Duration, Instant};

fn main() -> eframe::Result<()> {
    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1280.0, 860.0])
            .with_title("Free Fall Simulator"),
        ..Default::default()
    };
    eframe::run_native(
        "Free Fall Simulator",
        options,
        Box::new(|_cc| Ok(Box::new(App::new()))),
    )
}

struct App {
    sim: SimulationRunner,
    // Slider-bound candidate parameters; installed via set_params on change
    pending: SimParams,
}

impl App {
    fn new() -> Self {
        let params = SimParams::default();
        let sim = SimulationRunner::new(params).expect("default parameters are valid");
        Self { sim, pending: params }
    }

    /// Parameters may only be edited between runs.
    fn editable(&self) -> bool {
        matches!(self.sim.status(), RunStatus::Idle | RunStatus::Finished)
    }

    /// Installs the slider values. The slider ranges only produce valid
    /// parameters; if something slips through anyway, snap back to the
    /// active set instead of running stale.
    fn apply_pending(&mut self) {
        if self.sim.set_params(self.pending).is_err() {
            self.pending = *self.sim.params();
        }
    }

    fn object_label(&self) -> &'static str {
        for (name, preset) in ObjectPreset::all() {
            if preset.matches(self.sim.params()) {
                return name;
            }
        }
        "Custom"
    }

    fn gravity_label(&self) -> &'static str {
        for (name, g) in gravity::all() {
            if self.sim.params().gravity == g {
                return name;
            }
        }
        "Custom"
    }
}

impl eframe::App for App {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        // The runner ignores ticks unless it is running, so this is safe to
        // call every frame regardless of lifecycle state.
        self.sim.tick(Instant::now());

        egui::TopBottomPanel::top("controls").show(ctx, |ui| {
            ui.horizontal_wrapped(|ui| {
                let now = Instant::now();
                match self.sim.status() {
                    RunStatus::Running => {
                        if ui.button("⏸ Pause").clicked() {
                            self.sim.pause();
                        }
                    }
                    RunStatus::Paused => {
                        if ui.button("▶ Resume").clicked() {
                            self.sim.resume(now);
                        }
                    }
                    RunStatus::Idle => {
                        if ui.button("▶ Start").clicked() {
                            self.sim.start(now);
                        }
                    }
                    RunStatus::Finished => {
                        if ui.button("▶ Start New").clicked() {
                            self.sim.start(now);
                        }
                    }
                }
                if ui.button("⟲ Reset").clicked() {
                    self.sim.reset();
                }

                ui.separator();
                ui.label(format!("{:?}", self.sim.status()));

                ui.separator();
                let state = self.sim.state();
                ui.label(format!(
                    "t = {:.2} s | h = {:.2} m | v = {:.2} m/s | a = {:.2} m/s²",
                    state.time, state.height, state.velocity, state.acceleration
                ));
            });

            ui.horizontal_wrapped(|ui| {
                let state = self.sim.state();
                let params = self.sim.params();
                let vt = terminal_velocity(params);
                let vt_text = if vt.is_finite() {
                    format!("{:.2} m/s", vt)
                } else {
                    "N/A".to_owned()
                };
                ui.label(format!(
                    "F_gravity = {:.2} N | F_drag = {:.2} N | Terminal velocity = {}",
                    gravity_force(params.mass, params.gravity),
                    drag_force(state.velocity, params.drag_coefficient, params.cross_sectional_area),
                    vt_text
                ));
            });
        });

        egui::TopBottomPanel::top("parameters").show(ctx, |ui| {
            let editable = self.editable();
            ui.add_enabled_ui(editable, |ui| {
                ui.horizontal_wrapped(|ui| {
                    ui.label("Object:");
                    for (name, preset) in ObjectPreset::all() {
                        if ui.button(name).clicked() {
                            preset.apply_to(&mut self.pending);
                            self.apply_pending();
                        }
                    }
                    ui.label(format!("[{}]", self.object_label()));
                });

                ui.horizontal_wrapped(|ui| {
                    ui.label("Height");
                    if ui
                        .add(
                            egui::Slider::new(&mut self.pending.initial_height, 10.0..=10_000.0)
                                .logarithmic(true)
                                .suffix(" m"),
                        )
                        .changed()
                    {
                        self.apply_pending();
                    }

                    ui.label("Mass");
                    if ui
                        .add(
                            egui::Slider::new(&mut self.pending.mass, 0.001..=100.0)
                                .logarithmic(true)
                                .suffix(" kg"),
                        )
                        .changed()
                    {
                        self.apply_pending();
                    }

                    ui.label("Drag coefficient");
                    if ui
                        .add(egui::Slider::new(&mut self.pending.drag_coefficient, 0.0..=2.0))
                        .changed()
                    {
                        self.apply_pending();
                    }

                    ui.label("Area");
                    if ui
                        .add(
                            egui::Slider::new(&mut self.pending.cross_sectional_area, 0.001..=1.0)
                                .suffix(" m²"),
                        )
                        .changed()
                    {
                        self.apply_pending();
                    }
                });

                ui.horizontal_wrapped(|ui| {
                    ui.label("Gravity:");
                    for (name, g) in gravity::all() {
                        if ui.button(format!("{} ({} m/s²)", name, g)).clicked() {
                            self.pending.gravity = g;
                            self.apply_pending();
                        }
                    }
                    ui.label(format!("[{}]", self.gravity_label()));
                });
            });
        });

        egui::CentralPanel::default().show(ctx, |ui| {
            let samples = self.sim.samples();
            let params = self.sim.params();
            let vt = terminal_velocity(params);

            if samples.is_empty() {
                ui.vertical_centered(|ui| {
                    ui.add_space(24.0);
                    ui.label("Run the simulation to generate chart data.");
                });
            } else {
                let t_end = samples.last().map(|s| s.time).unwrap_or(0.0).max(5.0);

                ui.columns(2, |cols| {
                    cols[0].heading("Velocity vs Time");
                    Plot::new("velocity_plot")
                        .legend(Legend::default())
                        .allow_scroll(false)
                        .y_axis_min_width(48.0)
                        .x_axis_label("Time (s)")
                        .y_axis_label("Velocity (m/s)")
                        .show(&mut cols[0], |plot_ui| {
                            let v_max = samples.iter().map(|s| s.velocity).fold(0.0_f64, f64::max);
                            let mut y_max = (v_max * 1.2).max(1.0);
                            if vt.is_finite() {
                                y_max = y_max.max(vt * 1.15);
                            }
                            plot_ui.set_plot_bounds(PlotBounds::from_min_max(
                                [0.0, 0.0],
                                [t_end, y_max],
                            ));

                            plot_ui.line(Line::new(
                                "Velocity (m/s)",
                                PlotPoints::from_iter(samples.iter().map(|s| [s.time, s.velocity])),
                            ));

                            if vt.is_finite() {
                                plot_ui.line(
                                    Line::new(
                                        "Terminal velocity",
                                        PlotPoints::from_iter([[0.0, vt], [t_end, vt]]),
                                    )
                                    .style(LineStyle::dashed_loose()),
                                );
                            }
                        });

                    cols[1].heading("Height vs Time");
                    Plot::new("height_plot")
                        .legend(Legend::default())
                        .allow_scroll(false)
                        .y_axis_min_width(48.0)
                        .x_axis_label("Time (s)")
                        .y_axis_label("Height (m)")
                        .show(&mut cols[1], |plot_ui| {
                            plot_ui.set_plot_bounds(PlotBounds::from_min_max(
                                [0.0, 0.0],
                                [t_end, params.initial_height * 1.05],
                            ));

                            plot_ui.line(Line::new(
                                "Height (m)",
                                PlotPoints::from_iter(samples.iter().map(|s| [s.time, s.height])),
                            ));
                        });
                });
            }

            // Drop shaft visualization
            ui.separator();
            ui.heading("Drop");

            let desired_size = egui::vec2(220.0, 320.0);
            let (response, painter) = ui.allocate_painter(desired_size, egui::Sense::hover());
            let rect = response.rect;

            painter.rect_filled(rect, 4.0, egui::Color32::from_rgb(40, 40, 50));

            let shaft_rect = egui::Rect::from_min_size(
                rect.min + egui::vec2(90.0, 16.0),
                egui::vec2(60.0, 288.0),
            );
            painter.rect_stroke(
                shaft_rect,
                2.0,
                egui::Stroke::new(2.0, egui::Color32::GRAY),
                egui::StrokeKind::Inside,
            );

            // Ground strip
            let ground_rect = egui::Rect::from_min_max(
                egui::pos2(shaft_rect.min.x, shaft_rect.max.y - 8.0),
                egui::pos2(shaft_rect.max.x, shaft_rect.max.y),
            );
            painter.rect_filled(ground_rect, 0.0, egui::Color32::from_rgb(22, 163, 74));

            // Ball at its current height fraction, resting on the ground when landed
            let state = self.sim.state();
            let fraction = (state.height / params.initial_height).clamp(0.0, 1.0) as f32;
            let ball_radius = 9.0;
            let travel = shaft_rect.height() - 8.0 - 2.0 * ball_radius;
            let ball_y = shaft_rect.min.y + ball_radius + (1.0 - fraction) * travel;
            painter.circle_filled(
                egui::pos2(shaft_rect.center().x, ball_y),
                ball_radius,
                egui::Color32::from_rgb(150, 120, 230),
            );

            // Height scale
            painter.text(
                egui::pos2(rect.min.x + 10.0, shaft_rect.min.y),
                egui::Align2::LEFT_TOP,
                format!("{:.0} m", params.initial_height),
                egui::FontId::default(),
                egui::Color32::WHITE,
            );
            painter.text(
                egui::pos2(rect.min.x + 10.0, shaft_rect.center().y),
                egui::Align2::LEFT_CENTER,
                format!("{:.0} m", params.initial_height / 2.0),
                egui::FontId::default(),
                egui::Color32::WHITE,
            );
            painter.text(
                egui::pos2(rect.min.x + 10.0, shaft_rect.max.y),
                egui::Align2::LEFT_BOTTOM,
                "0 m".to_owned(),
                egui::FontId::default(),
                egui::Color32::WHITE,
            );
        });

        // Keep ticking while anything can still move
        ctx.request_repaint_after(Duration::from_millis(10));
    }
}
