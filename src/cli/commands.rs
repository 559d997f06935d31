//! Subcommand handlers.
//!
//! Every handler drives the same headless views the UI uses, so the CLI
//! follows the exact list/detail/action/re-fetch flow.

use crate::api::RegistrationBackend;
use crate::cli::output::{cell, Output};
use crate::cli::Commands;
use crate::review::ReviewCoordinator;
use crate::types::{AppError, Result};
use crate::utils::toml_config::ReviewConfig;
use crate::views::{
    ActionOutcome, DetailState, ListState, NotificationKind, RegistrationDetailView,
    RegistrationListView,
};
use mentor_review_model::{Registration, ReviewAction, StatusFilter};
use serde::Serialize;
use std::path::Path;
use std::process::ExitCode;
use std::sync::Arc;

/// Shared state for one CLI invocation.
pub struct CommandContext {
    pub config: ReviewConfig,
    pub output: Output,
    pub json: bool,
}

impl CommandContext {
    pub fn new(config: ReviewConfig, no_color: bool, json: bool) -> Self {
        let output = if no_color {
            Output::no_color()
        } else {
            Output::new()
        };
        Self {
            config,
            output,
            json,
        }
    }
}

/// Run a subcommand against `backend`.
///
/// Fetch and configuration problems are returned as errors. Failed review
/// actions are reported on the terminal and yield a failing exit code.
pub async fn execute(
    command: Commands,
    ctx: &CommandContext,
    backend: Arc<dyn RegistrationBackend>,
    config_path: &Path,
) -> Result<ExitCode> {
    let coordinator = ReviewCoordinator::new(backend);
    match command {
        Commands::List {
            status,
            search,
            page,
        } => list(ctx, coordinator, status, search.as_deref(), page).await,
        Commands::Show { id } => show(ctx, coordinator, &id).await,
        Commands::Approve { id } => review(ctx, coordinator, &id, None).await,
        Commands::Reject { id, reason } => {
            review(ctx, coordinator, &id, Some(reason.as_str())).await
        }
        Commands::Config { validate } => config(ctx, config_path, validate),
    }
}

#[derive(Serialize)]
struct ListReport<'a> {
    filter: StatusFilter,
    search: Option<&'a str>,
    page: usize,
    total_pages: usize,
    total_items: usize,
    counts: mentor_review_model::StatusCounts,
    items: Vec<crate::views::ListRow>,
}

async fn list(
    ctx: &CommandContext,
    coordinator: ReviewCoordinator,
    status: StatusFilter,
    search: Option<&str>,
    page: usize,
) -> Result<ExitCode> {
    let view = RegistrationListView::new(coordinator, &ctx.config.display);
    if let ListState::Failed(message) = view.load().await {
        ctx.output.error(&format!("Failed to load registrations: {}", message));
        return Ok(ExitCode::FAILURE);
    }

    view.set_filter(status);
    if let Some(term) = search {
        view.set_search(term);
    }
    view.set_page(page);

    let current = view.page();
    let rows = view.rows();
    let counts = view.counts();

    if ctx.json {
        ctx.output
            .json(&ListReport {
                filter: status,
                search,
                page: current.page,
                total_pages: current.total_pages,
                total_items: current.total_items,
                counts,
                items: rows,
            })
            .map_err(|e| AppError::Internal(e.to_string()))?;
        return Ok(ExitCode::SUCCESS);
    }

    ctx.output.header(&format!(
        "Mentor registrations: {} ({})",
        status.label(),
        counts.for_filter(status)
    ));
    ctx.output.info(&format!(
        "All {}  ·  Pending {}  ·  Approved {}  ·  Rejected {}",
        counts.all, counts.pending, counts.approved, counts.rejected
    ));
    ctx.output.newline();

    if rows.is_empty() {
        ctx.output.info("No registrations match the current filter");
        return Ok(ExitCode::SUCCESS);
    }

    ctx.output
        .table_header(&["Registration", "Name", "Status", "Applied", "Actions"]);
    for row in &rows {
        let actions = if row.controls.is_visible() {
            "approve / reject"
        } else {
            ""
        };
        ctx.output.table_row(&[
            cell(&row.registration_id),
            cell(&row.name),
            ctx.output.status_cell(row.status),
            cell(&row.applied_on),
            cell(actions),
        ]);
    }

    ctx.output.info(&format!(
        "Page {} of {} ({} matching)",
        current.page, current.total_pages, current.total_items
    ));
    if current.page < current.total_pages {
        ctx.output
            .hint(&format!("Next page: mentor-review list --page {}", current.page + 1));
    }
    Ok(ExitCode::SUCCESS)
}

async fn show(ctx: &CommandContext, coordinator: ReviewCoordinator, id: &str) -> Result<ExitCode> {
    let view = RegistrationDetailView::new(coordinator, &ctx.config.display, id);
    let registration = match view.load().await {
        DetailState::Ready(registration) => registration,
        DetailState::NotFound => return Err(AppError::NotFound(format!("registration '{}'", id))),
        DetailState::Failed(message) => {
            ctx.output
                .error(&format!("Failed to load registration: {}", message));
            return Ok(ExitCode::FAILURE);
        }
        DetailState::Loading => {
            return Err(AppError::Internal("detail view did not settle".to_string()))
        }
    };

    if ctx.json {
        ctx.output
            .json(&registration)
            .map_err(|e| AppError::Internal(e.to_string()))?;
        return Ok(ExitCode::SUCCESS);
    }

    print_registration(ctx, &view, &registration);
    if registration.is_actionable() {
        ctx.output.hint(&format!(
            "mentor-review approve {0}  |  mentor-review reject {0} --reason \"...\"",
            registration.registration_id
        ));
    }
    Ok(ExitCode::SUCCESS)
}

fn print_registration(ctx: &CommandContext, view: &RegistrationDetailView, r: &Registration) {
    let out = &ctx.output;
    let missing = || "—".to_string();

    out.header(&r.name);
    out.kv("Status", &ctx.output.badge(r.status()));
    out.kv("Registration ID", &r.registration_id);
    out.kv("Internal ID", &r.id);
    out.kv("Email", &r.email.clone().unwrap_or_else(missing));
    out.kv("Phone", &r.phone.clone().unwrap_or_else(missing));
    out.kv("Applied", &view.display_date(r.applied_at.as_ref()));
    out.kv("Created", &view.display_date(r.created_at.as_ref()));
    out.kv("Updated", &view.display_date(r.updated_at.as_ref()));

    out.subheader("Professional");
    out.kv("Experience", &r.experience_label());
    print_list(ctx, "Qualifications", &r.qualifications);
    print_list(ctx, "Specializations", &r.specializations);
    if let Some(bio) = &r.bio {
        out.kv("Bio", bio);
    }

    out.subheader("Supporting material");
    print_list(ctx, "Achievements", &r.achievements);
    print_list(ctx, "Publications", &r.publications);

    out.subheader("KYC");
    out.kv(
        "Proof type",
        r.kyc.proof_type.as_ref().map(|p| p.label()).unwrap_or("—"),
    );
    out.kv(
        "Document",
        r.kyc.document_url.as_deref().unwrap_or("not provided"),
    );
    out.kv("Verified", if r.kyc.verified { "yes" } else { "no" });
}

fn print_list(ctx: &CommandContext, title: &str, items: &[String]) {
    if items.is_empty() {
        ctx.output.kv(title, "—");
        return;
    }
    ctx.output.kv(title, "");
    for item in items {
        ctx.output.list_item(item);
    }
}

async fn review(
    ctx: &CommandContext,
    coordinator: ReviewCoordinator,
    id: &str,
    reason: Option<&str>,
) -> Result<ExitCode> {
    let action = if reason.is_some() {
        ReviewAction::Reject
    } else {
        ReviewAction::Approve
    };
    let view = RegistrationDetailView::new(coordinator, &ctx.config.display, id);

    let registration = match view.load().await {
        DetailState::Ready(registration) => registration,
        DetailState::NotFound => return Err(AppError::NotFound(format!("registration '{}'", id))),
        DetailState::Failed(message) => {
            ctx.output
                .error(&format!("Failed to load registration: {}", message));
            return Ok(ExitCode::FAILURE);
        }
        DetailState::Loading => {
            return Err(AppError::Internal("detail view did not settle".to_string()))
        }
    };

    if !registration.is_actionable() {
        ctx.output.warning(&format!(
            "Registration {} is already {}; nothing to {}",
            registration.registration_id,
            registration.status(),
            action
        ));
        return Ok(ExitCode::SUCCESS);
    }

    let outcome = match reason {
        None => view.approve().await,
        Some(reason) => {
            view.open_reject_modal();
            view.set_reject_reason(reason);
            view.confirm_reject().await
        }
    };

    for notification in view.notifications().drain() {
        match notification.kind {
            NotificationKind::Success => ctx.output.success(&notification.message),
            NotificationKind::Error => ctx.output.error(&notification.message),
            NotificationKind::Info => ctx.output.info(&notification.message),
        }
    }

    match outcome {
        ActionOutcome::Completed => {
            if let Some(fresh) = view.registration() {
                ctx.output.kv("Status", &ctx.output.badge(fresh.status()));
            }
            Ok(ExitCode::SUCCESS)
        }
        ActionOutcome::Invalid(message) => {
            if let Some(error) = view.reject_modal().error {
                ctx.output.error(&error);
            } else {
                ctx.output.error(&message);
            }
            Ok(ExitCode::FAILURE)
        }
        ActionOutcome::Suppressed => {
            ctx.output
                .warning("Another action for this registration is still in progress");
            Ok(ExitCode::FAILURE)
        }
        ActionOutcome::Failed(_) | ActionOutcome::Cancelled => Ok(ExitCode::FAILURE),
    }
}

fn config(ctx: &CommandContext, path: &Path, validate: bool) -> Result<ExitCode> {
    let config = &ctx.config;

    if validate {
        config.validate()?;
        ctx.output
            .success(&format!("Configuration is valid ({})", path.display()));
        return Ok(ExitCode::SUCCESS);
    }

    if ctx.json {
        ctx.output
            .json(config)
            .map_err(|e| AppError::Internal(e.to_string()))?;
        return Ok(ExitCode::SUCCESS);
    }

    let out = &ctx.output;
    out.header("Configuration");
    out.kv("File", &path.display().to_string());

    out.subheader("Backend");
    out.kv("Base URL", &config.backend.base_url);
    out.kv("List", &config.backend.list_path);
    out.kv("Approve", &config.backend.approve_path);
    out.kv("Reject", &config.backend.reject_path);
    out.kv("Timeout", &format!("{}s", config.backend.timeout_secs));
    let token_state = if config.backend.token().is_some() {
        "set"
    } else {
        "not set"
    };
    out.kv(
        "Token",
        &format!("${} ({})", config.backend.token_env, token_state),
    );
    out.kv(
        "Send rejection reason",
        if config.backend.send_rejection_reason {
            "yes"
        } else {
            "no"
        },
    );

    out.subheader("Display");
    out.kv("Date format", &config.display.date_format);
    out.kv("Page size", &config.display.page_size.to_string());
    out.kv("Avatar service", &config.display.avatar_base_url);

    out.subheader("Logging");
    out.kv("Level", &config.logging.level);
    out.kv("Format", &format!("{:?}", config.logging.format).to_lowercase());

    if config.backend.token().is_none() {
        out.hint(&format!(
            "Export {} (or add it to .env) to authenticate against the backend",
            config.backend.token_env
        ));
    }
    Ok(ExitCode::SUCCESS)
}
