use crate::libtnpsc::dataset::Identifier;
use crate::libtnpsc::form::{FormError, FormState};
use crate::libtnpsc::router::{Route, Router, RESULTS_DELAY, SUCCESS_MESSAGE};
use crate::libtnpsc::session::{ExamResult, Session};
use crate::libtnpsc::theme::Rgb;
use crate::libtnpsc::validator::{error_message, label};
use crate::{AppConfig, Error};
use colored::{ColoredString, Colorize};
use log::{debug, info};
use std::io::{self, Write};
use std::thread;
use std::time::Instant;
use text_io::try_read;

#[derive(Debug, PartialEq)]
enum Command {
    Select(usize),
    Next,
    Previous,
    Jump(usize),
    Submit,
    Quit,
    Unknown,
}

impl Command {
    fn from_str(options_count: usize, input: &str) -> Command {
        match input {
            "n" => Command::Next,
            "p" => Command::Previous,
            "s" => Command::Submit,
            "q" => Command::Quit,
            input if input.starts_with('j') => match input[1..].trim().parse::<usize>() {
                Ok(num) => Command::Jump(num),
                Err(_) => Command::Unknown,
            },
            input => match input.parse::<usize>() {
                Ok(num) if (1..=options_count).contains(&num) => Command::Select(num - 1),
                Ok(_) => {
                    println!(
                        "{}",
                        format!("There are only {} options available!", options_count)
                            .bright_red()
                    );
                    Command::Unknown
                }
                Err(_) => Command::Unknown,
            },
        }
    }
}

enum RunnerExit {
    Submitted(ExamResult),
    Quit,
}

fn paint(text: &str, rgb: Rgb) -> ColoredString {
    text.truecolor(rgb.0, rgb.1, rgb.2)
}

/// `None` once stdin is closed.
fn prompt(text: &str) -> Option<String> {
    print!("{} ", text.cyan());
    io::stdout().flush().ok()?;
    let line: Result<String, _> = try_read!("{}\n");
    line.ok().map(|l| l.trim().to_string())
}

pub fn cli_loop(config: AppConfig) -> Result<(), Error> {
    let mut router = Router::new(config.start.clone());
    println!(
        "{}",
        paint(&format!("==========> {} <==========", config.theme.title), config.theme.primary)
            .bold()
    );

    loop {
        let next = match router.current().clone() {
            Route::Banks => banks_screen(&config),
            Route::Registration { bank } => registration_screen(&config, bank),
            Route::Runner { bank } => match runner_screen(&config, bank)? {
                RunnerExit::Submitted(result) => {
                    println!("{}", SUCCESS_MESSAGE.bright_green());
                    router.schedule(
                        Route::Results {
                            state: Some(result),
                        },
                        RESULTS_DELAY,
                        Instant::now(),
                    );
                    if let Some(task) = router.pending() {
                        thread::sleep(task.remaining(Instant::now()));
                    }
                    router.tick(Instant::now());
                    continue;
                }
                RunnerExit::Quit => Some(Route::Banks),
            },
            route @ Route::Results { .. } => results_screen(&config, route.exam_result()),
        };

        match next {
            Some(route) => router.navigate(route),
            None => {
                println!("{}", "Bye!".cyan());
                return Ok(());
            }
        }
    }
}

fn banks_screen(config: &AppConfig) -> Option<Route> {
    let theme = &config.theme;
    println!();
    for (idx, bank) in config.banks.iter().enumerate() {
        println!(
            "{} {}",
            format!("{}.", idx + 1).bold(),
            paint(&bank.title(), theme.heading).bold()
        );
        println!(
            "   {} · {}",
            paint(&format!("{} Questions", bank.question_count), theme.primary),
            paint("Prepare for Success", theme.secondary)
        );
        println!(
            "   {} {}",
            "Key Focus Areas:".bold(),
            bank.focus_areas.join(", ")
        );
    }

    loop {
        let input = prompt(&format!(
            "Start a bank (1-{}, q to quit):",
            config.banks.len()
        ))?;
        if input == "q" {
            return None;
        }
        match input.parse::<usize>() {
            Ok(num) if (1..=config.banks.len()).contains(&num) => {
                debug!("[Banks] Picked {}", config.banks[num - 1].year);
                return Some(Route::Registration { bank: num - 1 });
            }
            _ => println!("{}", "Pick one of the listed banks.".bright_red()),
        }
    }
}

fn registration_screen(config: &AppConfig, bank: usize) -> Option<Route> {
    let theme = &config.theme;
    println!();
    println!("{}", paint("Registration Form", theme.primary).bold());
    println!(
        "{}",
        paint("Please fill in your details to register. (q goes back)", theme.muted)
    );

    let mut form = FormState::default();
    let mut pending: Vec<String> = form.field_names().map(String::from).collect();
    loop {
        for field in &pending {
            let input = prompt(&format!("{}:", label(field)))?;
            if input == "q" {
                return Some(Route::Banks);
            }
            form.change(field, &input);
            form.blur(field);
            if form.has_error(field) {
                println!("  {}", paint(&error_message(field), theme.error));
            }
        }

        match form.submit() {
            Ok(registration) => {
                info!(
                    "[Form] {} registered for {}",
                    registration.name,
                    config.banks[bank].title()
                );
                return Some(Route::Runner { bank });
            }
            Err(FormError::Invalid(fields)) => {
                println!(
                    "{}",
                    paint("Please correct the fields above.", theme.error).bold()
                );
                pending = fields;
            }
        }
    }
}

fn draw_question(config: &AppConfig, session: &Session, order: &[usize]) {
    let theme = &config.theme;
    let question = session.current_question();
    println!();
    println!(
        "{} {}",
        paint(
            &format!(
                "Question: {} of {}",
                session.current_index() + 1,
                session.question_count()
            ),
            theme.heading
        )
        .bold(),
        paint(
            &format!("({} answered)", session.answered_count()),
            theme.muted
        )
    );
    println!("{}", question.question.bold());
    println!("{}", "Options:".underline());
    for (num, &opt_idx) in order.iter().enumerate() {
        let option = &question.options[opt_idx];
        let marker = if session.selected() == Some(&option.id) {
            "(•)"
        } else {
            "( )"
        };
        println!("  {} {}. {}", marker, num + 1, option.label);
    }

    let grid: Vec<String> = (1..=session.question_count())
        .map(|number| {
            let cell = format!("[{}]", number);
            if number == session.current_index() + 1 {
                paint(&cell, theme.grid_current).bold().to_string()
            } else if session.answer_for(number - 1).is_some() {
                paint(&cell, theme.grid_idle).to_string()
            } else {
                paint(&cell, theme.muted).to_string()
            }
        })
        .collect();
    println!("{}", grid.join(" "));
}

fn runner_screen(config: &AppConfig, bank: usize) -> Result<RunnerExit, Error> {
    let mut session = Session::new(config.dataset.clone())?;
    let orders = config.dataset.option_orders(config.shuffle_options);
    debug!("[Runner] {} started", config.banks[bank].title());

    loop {
        let order = &orders[session.current_index()];
        draw_question(config, &session, order);
        let Some(input) = prompt(&format!(
            "1-{} select · n next · p previous · j <n> jump · s submit · q quit:",
            order.len()
        )) else {
            return Ok(RunnerExit::Quit);
        };

        let command = Command::from_str(order.len(), input.as_str());
        debug!("[Runner] command: {:?}", command);
        match command {
            Command::Select(num) => {
                let id: Identifier = session.current_question().options[order[num]].id.clone();
                session.select_answer(id);
            }
            Command::Next => {
                if !session.next() {
                    println!("{}", "This is the last question.".yellow());
                }
            }
            Command::Previous => {
                if !session.previous() {
                    println!("{}", "This is the first question.".yellow());
                }
            }
            Command::Jump(number) => {
                if !session.jump_to(number) {
                    println!(
                        "{}",
                        format!("Pick a question between 1 and {}.", session.question_count())
                            .bright_red()
                    );
                }
            }
            Command::Submit => {
                session.request_submit();
                println!("{}", "Are you sure you want to submit?".bold());
                println!("Once you submit, you can't go back to change your answers.");
                let answer = prompt("Confirm (y/N):").unwrap_or_default();
                if answer.eq_ignore_ascii_case("y") {
                    if let Some(result) = session.confirm_submit() {
                        return Ok(RunnerExit::Submitted(result));
                    }
                } else {
                    session.cancel_submit();
                }
            }
            Command::Quit => {
                println!("{}", "Leaving the exam.".cyan());
                return Ok(RunnerExit::Quit);
            }
            Command::Unknown => println!("{}", "Unknown command.".bright_red()),
        }
    }
}

fn results_screen(config: &AppConfig, result: ExamResult) -> Option<Route> {
    let theme = &config.theme;
    println!();
    println!("{}", paint("Your Exam Results", theme.heading).bold());
    println!(
        "{}",
        paint("Congratulations on completing the exam!", theme.muted)
    );
    println!(
        "{}",
        format!("Score: {}/{}", result.score, result.total_questions).bold()
    );

    let input = prompt("Enter to go back to the question banks, q to quit:")?;
    if input == "q" {
        None
    } else {
        Some(Route::Banks)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn parses_navigation_commands() {
        assert_eq!(Command::from_str(4, "n"), Command::Next);
        assert_eq!(Command::from_str(4, "p"), Command::Previous);
        assert_eq!(Command::from_str(4, "s"), Command::Submit);
        assert_eq!(Command::from_str(4, "q"), Command::Quit);
    }

    #[test]
    fn parses_option_numbers() {
        assert_eq!(Command::from_str(4, "1"), Command::Select(0));
        assert_eq!(Command::from_str(4, "4"), Command::Select(3));
        assert_eq!(Command::from_str(4, "5"), Command::Unknown);
        assert_eq!(Command::from_str(4, "0"), Command::Unknown);
    }

    #[test]
    fn parses_jumps() {
        assert_eq!(Command::from_str(4, "j 7"), Command::Jump(7));
        assert_eq!(Command::from_str(4, "j12"), Command::Jump(12));
        assert_eq!(Command::from_str(4, "j"), Command::Unknown);
        assert_eq!(Command::from_str(4, "jump"), Command::Unknown);
        assert_eq!(Command::from_str(4, "what"), Command::Unknown);
    }
}
