use crate::libtnpsc::form::{FormError, FormState};
use crate::libtnpsc::router::{Route, Router, RESULTS_DELAY, SUCCESS_MESSAGE, SUCCESS_TOAST};
use crate::libtnpsc::session::{ExamResult, Phase, Session};
use crate::libtnpsc::theme::Rgb;
use crate::libtnpsc::timer::Toast;
use crate::libtnpsc::validator::{error_message, input_kind, label, InputKind};
use crate::{AppConfig, Error};
use eframe::egui;
use eframe::egui::Align2;
use eframe::egui::Color32;
use eframe::egui::RichText;
use eframe::egui::ScrollArea;
use eframe::egui::Ui;
use log::{debug, error, info};
use std::time::Instant;

fn color(rgb: Rgb) -> Color32 {
    Color32::from_rgb(rgb.0, rgb.1, rgb.2)
}

struct GuiState {
    config: AppConfig,
    router: Router,
    form: FormState,
    session: Option<Session>,
    orders: Vec<Vec<usize>>,
    toast: Option<Toast>,
}

impl GuiState {
    fn new(config: AppConfig) -> Self {
        let router = Router::new(config.start.clone());
        let orders = config.dataset.option_orders(config.shuffle_options);
        Self {
            config,
            router,
            form: FormState::default(),
            session: None,
            orders,
            toast: None,
        }
    }

    fn go(&mut self, route: Route) {
        match &route {
            Route::Banks => self.session = None,
            Route::Registration { .. } => self.form = FormState::default(),
            Route::Runner { .. } => {
                self.orders = self.config.dataset.option_orders(self.config.shuffle_options);
                self.session = match Session::new(self.config.dataset.clone()) {
                    Ok(session) => Some(session),
                    Err(err) => {
                        error!("[Runner] Cannot start session: {}", err);
                        None
                    }
                };
            }
            Route::Results { .. } => {}
        }
        self.router.navigate(route);
    }

    fn show_banks(&self, ui: &mut Ui) -> Option<Route> {
        let theme = &self.config.theme;
        let mut next = None;
        ScrollArea::vertical().show(ui, |ui| {
            for (idx, bank) in self.config.banks.iter().enumerate() {
                egui::Frame::group(ui.style()).show(ui, |ui| {
                    ui.set_width(ui.available_width());
                    ui.label(
                        RichText::new(bank.title())
                            .size(24.0)
                            .strong()
                            .color(color(theme.heading)),
                    );
                    ui.horizontal(|ui| {
                        ui.label(
                            RichText::new(format!("{} Questions", bank.question_count))
                                .color(color(theme.primary)),
                        );
                        ui.label(RichText::new("Prepare for Success").color(color(theme.secondary)));
                    });
                    ui.label(format!(
                        "Enhance your TNPSC exam preparation with our comprehensive question bank from {}.",
                        bank.year
                    ));
                    ui.label(RichText::new("Key Focus Areas:").strong());
                    ui.horizontal_wrapped(|ui| {
                        for area in &bank.focus_areas {
                            ui.label(area.as_str());
                        }
                    });
                    if ui
                        .button("▶ Start")
                        .on_hover_text("Begin your practice session")
                        .clicked()
                    {
                        debug!("[Banks] Picked {}", bank.year);
                        next = Some(Route::Registration { bank: idx });
                    }
                });
                ui.add_space(12.0);
            }
        });
        next
    }

    fn show_registration(&mut self, ui: &mut Ui, bank: usize) -> Option<Route> {
        let theme = &self.config.theme;
        let mut next = None;
        ui.vertical_centered(|ui| {
            ui.heading(
                RichText::new("Registration Form")
                    .strong()
                    .color(color(theme.primary)),
            );
            ui.label(
                RichText::new("Please fill in your details to register.").color(color(theme.muted)),
            );
        });
        ui.add_space(12.0);

        let names: Vec<String> = self.form.field_names().map(String::from).collect();
        for field in &names {
            ui.label(label(field));
            let mut value = self.form.value(field).unwrap_or_default().to_string();
            let hint = match input_kind(field) {
                InputKind::Tel => "10 digit number",
                InputKind::Email => "name@example.com",
                InputKind::Text => "",
            };
            let response = ui.add(egui::TextEdit::singleline(&mut value).hint_text(hint));
            if response.changed() {
                self.form.change(field, &value);
            }
            if response.lost_focus() {
                self.form.blur(field);
            }
            if self.form.has_error(field) {
                ui.label(RichText::new(error_message(field)).color(color(theme.error)));
            }
            ui.add_space(6.0);
        }

        ui.add_space(12.0);
        ui.horizontal(|ui| {
            if ui.button("Back").clicked() {
                next = Some(Route::Banks);
            }
            if ui.button(RichText::new("Submit").strong()).clicked() {
                match self.form.submit() {
                    Ok(registration) => {
                        info!(
                            "[Form] {} registered for {}",
                            registration.name,
                            self.config.banks[bank].title()
                        );
                        next = Some(Route::Runner { bank });
                    }
                    Err(FormError::Invalid(fields)) => {
                        debug!("[Form] {} fields need attention", fields.len())
                    }
                }
            }
        });
        next
    }

    fn show_runner(&mut self, ctx: &egui::Context, bank: usize) -> Option<Route> {
        let theme = &self.config.theme;
        let Some(session) = self.session.as_mut() else {
            return Some(Route::Banks);
        };
        let mut submitted: Option<ExamResult> = None;

        egui::SidePanel::left("question_grid")
            .resizable(false)
            .show(ctx, |ui| {
                ui.label(RichText::new(self.config.banks[bank].title()).strong());
                ui.add_space(8.0);
                egui::Grid::new("question_numbers").show(ui, |ui| {
                    for number in 1..=session.question_count() {
                        let fill = if number == session.current_index() + 1 {
                            theme.grid_current
                        } else {
                            theme.grid_idle
                        };
                        let button = egui::Button::new(
                            RichText::new(number.to_string())
                                .strong()
                                .color(Color32::WHITE),
                        )
                        .fill(color(fill))
                        .min_size(egui::vec2(40.0, 40.0));
                        if ui.add(button).clicked() {
                            debug!("[Runner] jump to {number}");
                            session.jump_to(number);
                        }
                        if number % 4 == 0 {
                            ui.end_row();
                        }
                    }
                });
            });

        egui::CentralPanel::default().show(ctx, |ui| {
            let active = session.phase() == Phase::Active;
            ui.label(
                RichText::new(format!(
                    "Question: {} of {}",
                    session.current_index() + 1,
                    session.question_count()
                ))
                .size(20.0)
                .strong(),
            );
            let question = session.current_question().clone();
            ui.label(RichText::new(question.question.as_str()).size(20.0));
            ui.add_space(8.0);
            ui.label("Options:");
            for &opt_idx in &self.orders[session.current_index()] {
                let option = &question.options[opt_idx];
                let checked = session.selected() == Some(&option.id);
                if ui
                    .add_enabled(active, egui::RadioButton::new(checked, option.label.as_str()))
                    .clicked()
                {
                    session.select_answer(option.id.clone());
                }
            }

            ui.add_space(24.0);
            ui.horizontal(|ui| {
                if ui
                    .add_enabled(active && !session.is_first(), egui::Button::new("Previous"))
                    .clicked()
                {
                    session.previous();
                }
                let submit = egui::Button::new(RichText::new("Submit").color(Color32::WHITE))
                    .fill(color(theme.error));
                if ui.add_enabled(active, submit).clicked() {
                    session.request_submit();
                }
                if ui.add_enabled(active, egui::Button::new("Next")).clicked() {
                    session.next();
                }
            });
        });

        if session.phase() == Phase::ConfirmingSubmit {
            egui::Window::new("Are you sure you want to submit?")
                .collapsible(false)
                .resizable(false)
                .anchor(Align2::CENTER_CENTER, [0.0, 0.0])
                .show(ctx, |ui| {
                    ui.label("Once you submit, you can't go back to change your answers.");
                    ui.horizontal(|ui| {
                        if ui.button("Cancel").clicked() {
                            session.cancel_submit();
                        }
                        if ui.button("Confirm").clicked() {
                            submitted = session.confirm_submit();
                        }
                    });
                });
        }

        if let Some(result) = submitted {
            let now = Instant::now();
            self.toast = Some(Toast::new(SUCCESS_MESSAGE, SUCCESS_TOAST, now));
            self.router.schedule(
                Route::Results {
                    state: Some(result),
                },
                RESULTS_DELAY,
                now,
            );
            ctx.request_repaint_after(RESULTS_DELAY);
        }
        None
    }

    fn show_results(&self, ui: &mut Ui, result: ExamResult) -> Option<Route> {
        let theme = &self.config.theme;
        let mut next = None;
        ui.vertical_centered(|ui| {
            ui.add_space(24.0);
            ui.label(
                RichText::new("Your Exam Results")
                    .size(28.0)
                    .color(color(theme.heading)),
            );
            ui.label(
                RichText::new("Congratulations on completing the exam!").color(color(theme.muted)),
            );
            ui.add_space(12.0);
            ui.label(
                RichText::new(format!("Score: {}/{}", result.score, result.total_questions))
                    .size(20.0)
                    .strong(),
            );
            ui.add_space(12.0);
            if ui.button("Back to question banks").clicked() {
                next = Some(Route::Banks);
            }
        });
        next
    }
}

impl eframe::App for GuiState {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        let now = Instant::now();
        self.router.tick(now);
        if let Some(task) = self.router.pending() {
            ctx.request_repaint_after(task.remaining(now));
        }
        if self.toast.as_ref().is_some_and(|toast| !toast.is_visible(now)) {
            self.toast = None;
        }
        if let Some(toast) = &self.toast {
            ctx.request_repaint_after(toast.remaining(now));
        }

        let theme = &self.config.theme;
        egui::TopBottomPanel::top("title").show(ctx, |ui| {
            ui.vertical_centered(|ui| {
                ui.label(
                    RichText::new(theme.title)
                        .size(32.0)
                        .strong()
                        .color(color(theme.primary)),
                );
            });
        });
        if let Some(toast) = &self.toast {
            egui::TopBottomPanel::bottom("toast").show(ctx, |ui| {
                ui.label(RichText::new(toast.message.as_str()).color(color(theme.primary)));
            });
        }

        let next = match self.router.current().clone() {
            Route::Banks => egui::CentralPanel::default().show(ctx, |ui| self.show_banks(ui)).inner,
            Route::Registration { bank } => {
                egui::CentralPanel::default()
                    .show(ctx, |ui| self.show_registration(ui, bank))
                    .inner
            }
            Route::Runner { bank } => self.show_runner(ctx, bank),
            route @ Route::Results { .. } => {
                egui::CentralPanel::default()
                    .show(ctx, |ui| self.show_results(ui, route.exam_result()))
                    .inner
            }
        };
        if let Some(route) = next {
            self.go(route);
        }
    }
}

pub fn init_gui(config: AppConfig) -> Result<(), Error> {
    let native_options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([900.0, 640.0])
            .with_min_inner_size([480.0, 360.0]),
        ..Default::default()
    };
    eframe::run_native(
        "TNPSC Question Bank",
        native_options,
        Box::new(|_cc| Ok(Box::new(GuiState::new(config)))),
    )?;

    Ok(())
}
