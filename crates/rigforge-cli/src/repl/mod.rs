//! Interactive session.
//!
//! Local actions run inline. Gateway actions are spawned so the prompt stays
//! usable while they run; their results arrive on a channel and are printed
//! by a separate task. Editing the build or changing screens in the meantime
//! makes the use case drop the late result.

mod command;
mod helper;

use anyhow::Result;
use colored::Colorize;
use rustyline::Editor;
use rustyline::error::ReadlineError;
use rustyline::history::DefaultHistory;
use std::sync::Arc;
use tokio::sync::mpsc;
use tracing::debug;

use rigforge_application::{ActionOutcome, Confirmation, RigForgeUseCase};
use rigforge_core::build::Build;
use rigforge_core::component::Component;
use rigforge_core::forum::ForumDraft;
use rigforge_core::gateway::{BenchmarkResult, ValidationResult};
use rigforge_core::view::ViewState;
use rigforge_interaction::FileFrameSource;

use crate::render;
use command::{COMMANDS, Command};
use helper::ReplHelper;

type ReplEditor = Editor<ReplHelper, DefaultHistory>;

/// Result of a spawned gateway action.
enum Report {
    Validation(Result<ActionOutcome<ValidationResult>>),
    Benchmark(Result<ActionOutcome<BenchmarkResult>>),
    Scan(Result<ActionOutcome<Component>>),
    Share(Result<ActionOutcome<ForumDraft>>),
}

impl Report {
    fn render(&self) -> String {
        let rendered = match self {
            Self::Validation(r) => r
                .as_ref()
                .map(|o| render::outcome(o, "validate", render::validation)),
            Self::Benchmark(r) => r
                .as_ref()
                .map(|o| render::outcome(o, "benchmark", render::benchmark)),
            Self::Scan(r) => r.as_ref().map(|o| {
                render::outcome(o, "scan", |c: &Component| {
                    format!("Added {} ({}) to the build.", c.name.bold(), c.category)
                })
            }),
            Self::Share(r) => r.as_ref().map(|o| render::outcome(o, "share", render::draft)),
        };
        rendered.unwrap_or_else(|e| format!("Error: {e:#}").red().to_string())
    }
}

pub async fn run(app: Arc<RigForgeUseCase>) -> Result<()> {
    let (report_tx, mut report_rx) = mpsc::channel::<Report>(32);

    let printer = tokio::spawn(async move {
        while let Some(report) = report_rx.recv().await {
            println!("{}", report.render());
        }
    });

    let mut rl: ReplEditor = Editor::new()?;
    rl.set_helper(Some(ReplHelper::new()));

    println!("{}", "=== RigForge ===".bright_magenta().bold());
    println!(
        "{}",
        "Sign in with /login <name> or /guest. Type /help for commands, /quit to exit."
            .bright_black()
    );
    println!();

    loop {
        let prompt = render::prompt(&app.snapshot().await);
        match rl.readline(&prompt) {
            Ok(line) => {
                let trimmed = line.trim();
                if trimmed.is_empty() {
                    continue;
                }
                let _ = rl.add_history_entry(trimmed);

                let command = match Command::parse(trimmed) {
                    Ok(Command::Quit) => {
                        println!("{}", "Goodbye!".bright_green());
                        break;
                    }
                    Ok(command) => command,
                    Err(message) => {
                        println!("{}", message.yellow());
                        continue;
                    }
                };

                debug!(?command, "repl command");
                if let Err(e) = execute(&app, &mut rl, &report_tx, command).await {
                    println!("{}", format!("Error: {e:#}").red());
                }
            }
            Err(ReadlineError::Interrupted) => {
                println!("{}", "CTRL-C detected. Type /quit to exit.".yellow());
            }
            Err(ReadlineError::Eof) => {
                println!("{}", "CTRL-D detected. Exiting...".bright_green());
                break;
            }
            Err(err) => {
                eprintln!("{}", format!("Error: {err:?}").red());
                break;
            }
        }
    }

    // The printer ends once every in-flight action has reported.
    drop(report_tx);
    let _ = printer.await;

    Ok(())
}

async fn execute(
    app: &Arc<RigForgeUseCase>,
    rl: &mut ReplEditor,
    reports: &mpsc::Sender<Report>,
    command: Command,
) -> Result<()> {
    match command {
        Command::Login(name) => {
            let session = app.login(&name).await?;
            welcome(&session.username, session.tier_label());
        }
        Command::Guest => {
            let session = app.login_as_guest().await?;
            welcome(&session.username, session.tier_label());
        }
        Command::Logout => match app.logout().await {
            Some(session) => println!("Signed out {}.", session.username),
            None => println!("{}", "Not signed in.".bright_black()),
        },
        Command::Go(view) => {
            app.navigate(view).await?;
            show_screen(app, view).await?;
        }
        Command::Catalog => println!("{}", render::catalog(&app.visible_catalog().await)),
        Command::Search(term) => {
            app.set_search_term(&term).await;
            println!("{}", render::catalog(&app.visible_catalog().await));
        }
        Command::Category(filter) => {
            app.set_category_filter(filter).await;
            println!("{}", render::catalog(&app.visible_catalog().await));
        }
        Command::Add(id) => {
            let line = app.add_from_catalog(&id).await?;
            let name = app
                .catalog()
                .get(&id)
                .map(|c| c.name.clone())
                .unwrap_or(id);
            println!("Added {} as line {}.", name.bold(), line);
        }
        Command::Remove(id) => match app.remove_component(&id).await? {
            Some(component) => println!("Removed {}.", component.name),
            None => println!("{}", format!("{id} is not in the build.").bright_black()),
        },
        Command::RemoveLine(line) => match app.remove_line(line).await? {
            Some(component) => println!("Removed {}.", component.name),
            None => println!("{}", format!("No line {line} in the build.").bright_black()),
        },
        Command::Clear => {
            app.clear_build().await?;
            println!("Build cleared.");
        }
        Command::Rename(name) => {
            app.rename_build(&name).await?;
            println!("Build renamed to {}.", name.trim().bold());
        }
        Command::Build => println!("{}", render::workbench(&app.snapshot().await)),
        Command::Validate => {
            println!("{}", "Checking compatibility...".bright_black());
            spawn_report(app, reports, |app| async move {
                Report::Validation(app.run_validation().await)
            });
        }
        Command::Benchmark => {
            println!("{}", "Estimating performance...".bright_black());
            spawn_report(app, reports, |app| async move {
                Report::Benchmark(app.run_benchmark().await)
            });
        }
        Command::ResetBenchmark => {
            app.clear_benchmark().await;
            println!("Benchmark cleared.");
        }
        Command::Scan(path) => {
            if app.current_view().await != ViewState::Scanner {
                app.navigate(ViewState::Scanner).await?;
            }
            println!("{}", format!("Analyzing {}...", path.display()).bright_black());
            let source = FileFrameSource::new(path);
            spawn_report(app, reports, |app| async move {
                Report::Scan(app.scan(&source).await)
            });
        }
        Command::Retry => {
            app.retry_camera().await;
            println!("Camera ready. Use /scan <image> to try again.");
        }
        Command::Close => {
            app.close_scanner().await?;
            println!("{}", render::workbench(&app.snapshot().await));
        }
        Command::Save(name) => {
            let name = match name {
                Some(name) => name,
                None => {
                    let current = app.snapshot().await.workbench.build().name.clone();
                    ask_with_default(rl, "Build name: ", &current)
                }
            };
            let outcome = app.save_build(Some(&name)).await?;
            println!(
                "{}",
                render::outcome(&outcome, "save", |b: &Build| format!(
                    "Saved \"{}\" as {}.",
                    b.name, b.id
                ))
            );
        }
        Command::Saved => println!("{}", render::saved_builds(&app.saved_builds().await?)),
        Command::Load(id) => {
            let build = app.load_saved_build(&id).await?;
            println!("Loaded \"{}\".", build.name);
            println!("{}", render::workbench(&app.snapshot().await));
        }
        Command::Delete(id) => {
            let confirmation = confirm(rl, &format!("Delete saved build {id}? [y/N] "));
            let outcome = app.delete_saved_build(&id, confirmation).await?;
            println!(
                "{}",
                render::outcome(&outcome, "delete", |b: &Build| format!(
                    "Deleted \"{}\".",
                    b.name
                ))
            );
        }
        Command::Share => {
            println!("{}", "Asking the AI for a comment...".bright_black());
            spawn_report(app, reports, |app| async move {
                Report::Share(app.share_build().await)
            });
        }
        Command::Publish(description) => {
            let post = app.publish_draft(&description).await?;
            println!("Posted \"{}\" to the forum.", post.title.bold());
        }
        Command::Discard => match app.discard_draft().await {
            Some(_) => println!("Draft discarded."),
            None => println!("{}", "Nothing to discard.".bright_black()),
        },
        Command::Forum => println!("{}", render::forum(app.snapshot().await.forum.posts())),
        Command::Like(id) => {
            let likes = app.like_post(&id).await?;
            println!("Liked. {likes} likes now.");
        }
        Command::Help => print_help(),
        Command::Quit => {}
    }
    Ok(())
}

/// Runs a gateway action in the background and forwards its report.
fn spawn_report<F, Fut>(app: &Arc<RigForgeUseCase>, reports: &mpsc::Sender<Report>, action: F)
where
    F: FnOnce(Arc<RigForgeUseCase>) -> Fut,
    Fut: std::future::Future<Output = Report> + Send + 'static,
{
    let reports = reports.clone();
    let future = action(Arc::clone(app));
    tokio::spawn(async move {
        let report = future.await;
        let _ = reports.send(report).await;
    });
}

async fn show_screen(app: &RigForgeUseCase, view: ViewState) -> Result<()> {
    let state = app.snapshot().await;
    match view {
        ViewState::Auth => println!("Signed out. Use /login <name> or /guest."),
        ViewState::Dashboard => {
            println!("{}", render::workbench(&state));
            println!(
                "{}",
                "Screens: builder, scanner, benchmark, forum, saved".bright_black()
            );
        }
        ViewState::Builder => {
            println!("{}", render::workbench(&state));
            println!("{}", render::catalog(&app.visible_catalog().await));
        }
        ViewState::Scanner => match render::scanner_status(&state.scanner) {
            Some(text) => println!("{text}"),
            None => println!("Point the scanner at a photo with /scan <image>."),
        },
        ViewState::Benchmark => match state.workbench.benchmark() {
            Some(result) => println!("{}", render::benchmark(result)),
            None => println!("No estimate yet. Run /benchmark."),
        },
        ViewState::Forum => println!("{}", render::forum(state.forum.posts())),
        ViewState::SavedBuilds => println!("{}", render::saved_builds(&app.saved_builds().await?)),
    }
    Ok(())
}

fn welcome(username: &str, tier: &str) {
    println!("{} {} ({})", "Welcome,".bright_green(), username.bold(), tier);
}

/// Prompts with `default` pre-filled. Interrupting returns an empty answer.
fn ask_with_default(rl: &mut ReplEditor, prompt: &str, default: &str) -> String {
    rl.readline_with_initial(prompt, (default, ""))
        .unwrap_or_default()
}

fn confirm(rl: &mut ReplEditor, prompt: &str) -> Confirmation {
    match rl.readline(prompt) {
        Ok(answer) if matches!(answer.trim().to_lowercase().as_str(), "y" | "yes") => {
            Confirmation::Confirmed
        }
        _ => Confirmation::Declined,
    }
}

fn print_help() {
    println!("{}", "Commands:".bold());
    for (name, args, description) in COMMANDS {
        let usage = format!("{name} {args}");
        println!("  {:<28} {}", usage.trim_end().bright_cyan(), description);
    }
}
