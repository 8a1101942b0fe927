//! Text rendering of application state for the terminal.

use colored::Colorize;
use std::fmt::Write;

use rigforge_application::{ActionOutcome, AppState};
use rigforge_core::build::Build;
use rigforge_core::component::Component;
use rigforge_core::forum::{ForumDraft, ForumPost};
use rigforge_core::gateway::{BenchmarkResult, ValidationResult};
use rigforge_core::notice::Notice;
use rigforge_core::scanner::ScannerStatus;
use rigforge_core::view::ViewState;

pub fn catalog(components: &[Component]) -> String {
    if components.is_empty() {
        return "No components match.".bright_black().to_string();
    }
    let mut out = String::new();
    for c in components {
        let _ = writeln!(
            out,
            "  {:<6} {:<34} {:<14} {:>8}  {}",
            c.id.bright_cyan(),
            c.name,
            c.category.to_string(),
            c.price.to_string().green(),
            c.spec_text.bright_black()
        );
    }
    out.trim_end().to_string()
}

/// The current build with its line ids and any stored results.
pub fn workbench(state: &AppState) -> String {
    let workbench = &state.workbench;
    let build = workbench.build();
    let mut out = String::new();

    let _ = writeln!(out, "{}", build.name.bold());
    if build.is_empty() {
        let _ = writeln!(out, "  {}", "(no components yet)".bright_black());
    }
    for item in build.items() {
        let c = &item.component;
        let _ = writeln!(
            out,
            "  {:<4} {:<8} {:<34} {:>8}",
            item.line_id.to_string().bright_black(),
            c.category.code(),
            c.name,
            c.price.to_string()
        );
    }
    let _ = writeln!(out, "  Total: {}", build.total_price().to_string().green().bold());

    if let Some(result) = workbench.validation() {
        let _ = writeln!(out, "{}", validation(result));
    }
    if let Some(result) = workbench.benchmark() {
        let _ = writeln!(out, "{}", benchmark(result));
    }
    out.trim_end().to_string()
}

pub fn validation(result: &ValidationResult) -> String {
    let mut out = String::new();
    if result.compatible {
        let _ = writeln!(out, "{}", "Compatible".bright_green().bold());
    } else {
        let _ = writeln!(out, "{}", "Compatibility problems".bright_red().bold());
    }
    for issue in &result.issues {
        let _ = writeln!(out, "  {} {}", "!".red(), issue);
    }
    for recommendation in &result.recommendations {
        let _ = writeln!(out, "  {} {}", "+".cyan(), recommendation);
    }
    out.trim_end().to_string()
}

pub fn benchmark(result: &BenchmarkResult) -> String {
    let mut out = String::new();
    let _ = writeln!(
        out,
        "Gaming {:.0}/100  Workstation {:.0}/100",
        result.gaming_score, result.workstation_score
    );
    let _ = writeln!(out, "  Bottleneck: {}", result.bottleneck);
    for estimate in &result.estimated_fps {
        let _ = writeln!(out, "  {:<20} {:>6.0} fps", estimate.game, estimate.fps);
    }
    out.trim_end().to_string()
}

pub fn saved_builds(builds: &[Build]) -> String {
    if builds.is_empty() {
        return "No saved builds.".bright_black().to_string();
    }
    let mut out = String::new();
    for build in builds {
        let _ = writeln!(
            out,
            "  {:<15} {:<28} {:>3} parts  {:>8}  {}",
            build.id.bright_cyan(),
            build.name,
            build.len(),
            build.total_price().to_string().green(),
            build.saved_date.as_deref().unwrap_or("-").bright_black()
        );
    }
    out.trim_end().to_string()
}

pub fn forum(posts: &[ForumPost]) -> String {
    let mut out = String::new();
    for post in posts {
        let rating = post
            .ai_rating
            .map(|r| format!("  AI {r:.1}"))
            .unwrap_or_default();
        let _ = writeln!(
            out,
            "{} {} by {}  {}{}",
            post.id.bright_cyan(),
            post.title.bold(),
            post.author,
            post.created_at.bright_black(),
            rating
        );
        if !post.description.is_empty() {
            let _ = writeln!(out, "  {}", post.description);
        }
        let _ = writeln!(
            out,
            "  {} parts, {}  {} likes  {} comments",
            post.build.len(),
            post.build.total_price(),
            post.likes,
            post.comments
        );
    }
    out.trim_end().to_string()
}

pub fn draft(draft: &ForumDraft) -> String {
    format!(
        "{}\n  {}\n{}",
        format!("Sharing \"{}\" ({} parts)", draft.build.name, draft.build.len()).bold(),
        draft.feedback.bright_blue(),
        "Use /publish <description> to post it or /discard to drop it.".bright_black()
    )
}

pub fn notice(notice: &Notice) -> String {
    notice.to_string().yellow().to_string()
}

/// Renders what happened to a background action named `action`.
pub fn outcome<T>(
    outcome: &ActionOutcome<T>,
    action: &'static str,
    value: impl Fn(&T) -> String,
) -> String {
    match outcome {
        ActionOutcome::Applied(v) => value(v),
        ActionOutcome::Degraded { value: v, notice: n } => format!("{}\n{}", notice(n), value(v)),
        ActionOutcome::Discarded => format!(
            "Dropped the {action} result: the build or screen changed while it was running."
        )
        .bright_black()
        .to_string(),
        ActionOutcome::AlreadyPending => notice(&Notice::AlreadyRunning { action }),
        ActionOutcome::Blocked(n) | ActionOutcome::Failed(n) => notice(n),
    }
}

/// Extra lines for screens that show more than the prompt.
pub fn scanner_status(status: &ScannerStatus) -> Option<String> {
    match status {
        ScannerStatus::Ready => None,
        ScannerStatus::CameraError(err) => Some(format!(
            "{}\n{}",
            format!("Camera error: {err}").red(),
            "Use /retry to try again or /close to go back.".bright_black()
        )),
    }
}

/// `[BUILDER alice] >> `
pub fn prompt(state: &AppState) -> String {
    let view = state.router.current();
    match state.router.session() {
        Some(session) if view != ViewState::Auth => {
            format!("[{} {}] >> ", view, session.username)
        }
        _ => format!("[{view}] >> "),
    }
}
