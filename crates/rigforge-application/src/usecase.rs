//! RigForge use case.
//!
//! `RigForgeUseCase` is the only way to change the [`AppState`]. Local
//! actions run entirely under the state lock. Gateway-backed actions take a
//! [`ResultTicket`] and a snapshot under the lock, release it for the remote
//! call, and re-acquire it to apply the answer only if the ticket still
//! matches.

use anyhow::{Result, anyhow};
use chrono::Utc;
use std::path::Path;
use std::sync::Arc;
use tokio::sync::RwLock;
use tracing::{debug, error, info, warn};
use uuid::Uuid;

use rigforge_core::RigForgeError;
use rigforge_core::build::{Build, CURRENT_BUILD_ID, LineId, SavedBuildRepository};
use rigforge_core::catalog::{Catalog, CategoryFilter};
use rigforge_core::component::Component;
use rigforge_core::forum::{FALLBACK_COMMENTARY, ForumDraft, ForumPost, UNTITLED_POST};
use rigforge_core::gateway::{
    AiGateway, BenchmarkResult, CompatibilityPart, PerformancePart, ValidationResult,
};
use rigforge_core::notice::Notice;
use rigforge_core::scanner::{CameraError, FrameSource, ScannerStatus, scanned_component};
use rigforge_core::session::Session;
use rigforge_core::view::ViewState;
use rigforge_infrastructure::JsonSavedBuildRepository;
use rigforge_interaction::prepare_frame;

use crate::outcome::{ActionOutcome, ResultTicket};
use crate::saved_builds::{Confirmation, SavedBuildService};
use crate::state::{AppState, PendingKind};

/// Coordinates the application state, the AI gateway and saved builds.
pub struct RigForgeUseCase {
    state: Arc<RwLock<AppState>>,
    catalog: Arc<Catalog>,
    gateway: Arc<dyn AiGateway>,
    saved_builds: SavedBuildService,
}

impl RigForgeUseCase {
    /// Creates a use case over the built-in catalog.
    pub fn new(gateway: Arc<dyn AiGateway>, repository: Arc<dyn SavedBuildRepository>) -> Self {
        Self::with_saved_builds(gateway, SavedBuildService::new(repository))
    }

    /// Creates a use case keeping saved builds in `data_dir`.
    pub fn with_data_dir(gateway: Arc<dyn AiGateway>, data_dir: &Path) -> Self {
        Self::new(gateway, Arc::new(JsonSavedBuildRepository::new(data_dir)))
    }

    pub fn with_saved_builds(gateway: Arc<dyn AiGateway>, saved_builds: SavedBuildService) -> Self {
        Self {
            state: Arc::new(RwLock::new(AppState::new())),
            catalog: Arc::new(Catalog::builtin().clone()),
            gateway,
            saved_builds,
        }
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    /// A copy of the current state for display.
    pub async fn snapshot(&self) -> AppState {
        self.state.read().await.clone()
    }

    pub async fn current_view(&self) -> ViewState {
        self.state.read().await.router.current()
    }

    pub async fn session(&self) -> Option<Session> {
        self.state.read().await.router.session().cloned()
    }

    // ------------------------------------------------------------------
    // Session and navigation
    // ------------------------------------------------------------------

    pub async fn login(&self, username: &str) -> Result<Session> {
        let session = Session::user(username)?;
        self.authenticate(session).await
    }

    pub async fn login_as_guest(&self) -> Result<Session> {
        self.authenticate(Session::guest()).await
    }

    async fn authenticate(&self, session: Session) -> Result<Session> {
        let mut state = self.state.write().await;
        state.router.authenticate(session.clone())?;
        info!(username = %session.username, guest = session.is_guest, "logged in");
        Ok(session)
    }

    /// Ends the session. The current build is kept.
    pub async fn logout(&self) -> Option<Session> {
        let mut state = self.state.write().await;
        let ended = state.router.logout();
        state.forum_draft = None;
        state.scanner = ScannerStatus::Ready;
        if let Some(session) = &ended {
            info!(username = %session.username, "logged out");
        }
        ended
    }

    pub async fn navigate(&self, to: ViewState) -> Result<()> {
        let mut state = self.state.write().await;
        state.router.navigate(to)?;
        if to == ViewState::Scanner {
            state.scanner = ScannerStatus::Ready;
        }
        Ok(())
    }

    // ------------------------------------------------------------------
    // Catalog and build editing
    // ------------------------------------------------------------------

    pub async fn set_search_term(&self, term: &str) {
        self.state.write().await.search_term = term.to_string();
    }

    pub async fn set_category_filter(&self, filter: CategoryFilter) {
        self.state.write().await.category_filter = filter;
    }

    /// Catalog entries matching the current search term and category.
    pub async fn visible_catalog(&self) -> Vec<Component> {
        let state = self.state.read().await;
        state
            .visible_catalog(&self.catalog)
            .into_iter()
            .cloned()
            .collect()
    }

    /// Adds the catalog entry with `component_id` to the build.
    pub async fn add_from_catalog(&self, component_id: &str) -> Result<LineId> {
        let component = self
            .catalog
            .get(component_id)
            .cloned()
            .ok_or_else(|| RigForgeError::not_found("component", component_id))?;
        self.add_component(component).await
    }

    pub async fn add_component(&self, component: Component) -> Result<LineId> {
        let mut state = self.state.write().await;
        state.router.require_session()?;
        debug!(component_id = %component.id, "add component");
        Ok(state.workbench.add_component(component))
    }

    /// Removes one instance of `component_id`; absent ids change nothing.
    pub async fn remove_component(&self, component_id: &str) -> Result<Option<Component>> {
        let mut state = self.state.write().await;
        state.router.require_session()?;
        Ok(state.workbench.remove_component(component_id))
    }

    pub async fn remove_line(&self, line_id: LineId) -> Result<Option<Component>> {
        let mut state = self.state.write().await;
        state.router.require_session()?;
        Ok(state.workbench.remove_line(line_id))
    }

    pub async fn clear_build(&self) -> Result<()> {
        let mut state = self.state.write().await;
        state.router.require_session()?;
        state.workbench.clear();
        Ok(())
    }

    pub async fn rename_build(&self, name: &str) -> Result<()> {
        let name = name.trim();
        if name.is_empty() {
            return Err(RigForgeError::invalid_input("build name must not be empty").into());
        }
        let mut state = self.state.write().await;
        state.router.require_session()?;
        state.workbench.rename(name);
        Ok(())
    }

    // ------------------------------------------------------------------
    // AI gateway actions
    // ------------------------------------------------------------------

    /// Asks the gateway whether the build's parts are compatible.
    ///
    /// Gateway failures store a "connection error" result instead.
    pub async fn run_validation(&self) -> Result<ActionOutcome<ValidationResult>> {
        let (ticket, parts) = {
            let mut state = self.state.write().await;
            if !state.router.is_authenticated() {
                return Ok(ActionOutcome::Blocked(Notice::SignInRequired));
            }
            if state.workbench.build().is_empty() {
                return Ok(ActionOutcome::Blocked(Notice::EmptyBuild {
                    action: "validate",
                }));
            }
            if !state.pending.try_begin(PendingKind::Validating) {
                return Ok(ActionOutcome::AlreadyPending);
            }
            (
                ticket_for(&state),
                CompatibilityPart::from_build(state.workbench.build()),
            )
        };

        let response = self.gateway.check_compatibility(&parts).await;

        let mut state = self.state.write().await;
        state.pending.finish(PendingKind::Validating);
        let (result, notice) = match response {
            Ok(result) => (result, None),
            Err(e) => {
                error!(error = %e, "compatibility check failed");
                (
                    ValidationResult::connection_error(),
                    Some(Notice::GatewayUnavailable),
                )
            }
        };

        let applied = is_current(&state, ticket)
            && state
                .workbench
                .apply_validation(ticket.generation, result.clone());
        if !applied {
            debug!(?ticket, "validation result is stale; discarded");
            return Ok(ActionOutcome::Discarded);
        }

        Ok(match notice {
            None => ActionOutcome::Applied(result),
            Some(notice) => ActionOutcome::Degraded {
                value: result,
                notice,
            },
        })
    }

    /// Asks the gateway for performance scores.
    ///
    /// On failure no benchmark is shown.
    pub async fn run_benchmark(&self) -> Result<ActionOutcome<BenchmarkResult>> {
        let (ticket, parts) = {
            let mut state = self.state.write().await;
            if !state.router.is_authenticated() {
                return Ok(ActionOutcome::Blocked(Notice::SignInRequired));
            }
            if state.workbench.build().is_empty() {
                return Ok(ActionOutcome::Blocked(Notice::EmptyBuild {
                    action: "benchmark",
                }));
            }
            if !state.pending.try_begin(PendingKind::Benchmarking) {
                return Ok(ActionOutcome::AlreadyPending);
            }
            (
                ticket_for(&state),
                PerformancePart::from_build(state.workbench.build()),
            )
        };

        let response = self.gateway.estimate_performance(&parts).await;

        let mut state = self.state.write().await;
        state.pending.finish(PendingKind::Benchmarking);
        if !is_current(&state, ticket) {
            debug!(?ticket, "benchmark result is stale; discarded");
            return Ok(ActionOutcome::Discarded);
        }

        match response {
            Ok(result) => {
                state
                    .workbench
                    .apply_benchmark(ticket.generation, result.clone());
                Ok(ActionOutcome::Applied(result))
            }
            Err(e) => {
                error!(error = %e, "performance estimate failed");
                state.workbench.reset_benchmark();
                Ok(ActionOutcome::Failed(Notice::GatewayUnavailable))
            }
        }
    }

    /// Forgets the benchmark so another one can be requested.
    pub async fn clear_benchmark(&self) {
        self.state.write().await.workbench.reset_benchmark();
    }

    // ------------------------------------------------------------------
    // Scanner
    // ------------------------------------------------------------------

    /// Captures a frame, identifies it and adds the part to the build.
    ///
    /// Only runs on the scanner screen. On success the view moves to the
    /// builder.
    pub async fn scan(&self, source: &dyn FrameSource) -> Result<ActionOutcome<Component>> {
        let ticket = {
            let mut state = self.state.write().await;
            if state.router.current() != ViewState::Scanner {
                return Ok(ActionOutcome::Blocked(Notice::ScannerClosed));
            }
            if !state.pending.try_begin(PendingKind::Analyzing) {
                return Ok(ActionOutcome::AlreadyPending);
            }
            ticket_for(&state)
        };

        let outcome = self.scan_inner(source, ticket).await;
        self.state
            .write()
            .await
            .pending
            .finish(PendingKind::Analyzing);
        outcome
    }

    async fn scan_inner(
        &self,
        source: &dyn FrameSource,
        ticket: ResultTicket,
    ) -> Result<ActionOutcome<Component>> {
        let frame = match source.capture().await {
            Ok(frame) => frame,
            Err(e) => return Ok(self.camera_failed(e).await),
        };

        let image = match prepare_frame(&frame) {
            Ok(image) => image,
            Err(e) => {
                return Ok(self
                    .camera_failed(CameraError::Unavailable(e.to_string()))
                    .await);
            }
        };

        let identification = match self.gateway.identify_component(&image).await {
            Ok(Some(identification)) => identification,
            Ok(None) => return Ok(ActionOutcome::Failed(Notice::CouldNotIdentify)),
            Err(e) => {
                error!(error = %e, "component identification failed");
                return Ok(ActionOutcome::Failed(Notice::CouldNotIdentify));
            }
        };

        let component = scanned_component(&identification, Utc::now().timestamp_millis());

        let mut state = self.state.write().await;
        if !is_current(&state, ticket) {
            debug!(?ticket, "scan result is stale; discarded");
            return Ok(ActionOutcome::Discarded);
        }
        state.router.navigate(ViewState::Builder)?;
        state.workbench.add_component(component.clone());
        state.scanner = ScannerStatus::Ready;
        info!(name = %component.name, category = %component.category, "scanned component added");
        Ok(ActionOutcome::Applied(component))
    }

    async fn camera_failed(&self, err: CameraError) -> ActionOutcome<Component> {
        warn!(error = %err, "camera unavailable");
        self.state.write().await.scanner = ScannerStatus::CameraError(err.clone());
        ActionOutcome::Failed(Notice::Camera(err))
    }

    /// Leaves the camera error screen so the next scan can try again.
    pub async fn retry_camera(&self) {
        self.state.write().await.scanner = ScannerStatus::Ready;
    }

    /// Closes the scanner and returns to the builder.
    pub async fn close_scanner(&self) -> Result<()> {
        let mut state = self.state.write().await;
        state.router.navigate(ViewState::Builder)?;
        state.scanner = ScannerStatus::Ready;
        Ok(())
    }

    // ------------------------------------------------------------------
    // Saved builds
    // ------------------------------------------------------------------

    /// Saves a snapshot of the current build.
    ///
    /// `None` keeps the build's name; a blank name cancels.
    pub async fn save_build(&self, name: Option<&str>) -> Result<ActionOutcome<Build>> {
        let build = {
            let state = self.state.read().await;
            state.router.require_session()?;
            state.workbench.build().clone()
        };
        Ok(self.saved_builds.save(&build, name).await?)
    }

    pub async fn saved_builds(&self) -> Result<Vec<Build>> {
        Ok(self.saved_builds.list().await?)
    }

    pub async fn delete_saved_build(
        &self,
        id: &str,
        confirmation: Confirmation,
    ) -> Result<ActionOutcome<Build>> {
        self.state.read().await.router.require_session()?;
        Ok(self.saved_builds.delete(id, confirmation).await?)
    }

    /// Copies a saved build into the workbench and opens the builder.
    ///
    /// The copy becomes the unsaved current build; the stored entry is
    /// left as it was.
    pub async fn load_saved_build(&self, id: &str) -> Result<Build> {
        let stored = self.saved_builds.load(id).await?;
        let current = stored.snapshot(CURRENT_BUILD_ID, stored.name.clone(), None);

        let mut state = self.state.write().await;
        state.router.navigate(ViewState::Builder)?;
        state.workbench.replace_build(current.clone());
        info!(build_id = %stored.id, "saved build loaded");
        Ok(current)
    }

    // ------------------------------------------------------------------
    // Forum
    // ------------------------------------------------------------------

    /// Prepares a forum post from the current build with an AI comment.
    pub async fn share_build(&self) -> Result<ActionOutcome<ForumDraft>> {
        let (ticket, build) = {
            let mut state = self.state.write().await;
            match state.router.session() {
                Some(session) if !session.is_guest => {}
                _ => return Ok(ActionOutcome::Blocked(Notice::AccountRequired)),
            }
            if state.workbench.build().is_empty() {
                return Ok(ActionOutcome::Blocked(Notice::EmptyBuild { action: "share" }));
            }
            if !state.pending.try_begin(PendingKind::Commenting) {
                return Ok(ActionOutcome::AlreadyPending);
            }
            (ticket_for(&state), state.workbench.build().clone())
        };

        let response = self.gateway.forum_commentary(&build.component_names()).await;

        let mut state = self.state.write().await;
        state.pending.finish(PendingKind::Commenting);
        let (feedback, notice) = match response {
            Ok(feedback) => (feedback, None),
            Err(e) => {
                error!(error = %e, "forum commentary failed");
                (FALLBACK_COMMENTARY.to_string(), Some(Notice::GatewayUnavailable))
            }
        };

        if !is_current(&state, ticket) {
            debug!(?ticket, "forum commentary is stale; discarded");
            return Ok(ActionOutcome::Discarded);
        }

        let draft = ForumDraft { build, feedback };
        state.forum_draft = Some(draft.clone());
        Ok(match notice {
            None => ActionOutcome::Applied(draft),
            Some(notice) => ActionOutcome::Degraded {
                value: draft,
                notice,
            },
        })
    }

    /// Turns the pending draft into a post at the top of the feed.
    pub async fn publish_draft(&self, description: &str) -> Result<ForumPost> {
        let mut state = self.state.write().await;
        let author = state
            .router
            .session()
            .filter(|s| !s.is_guest)
            .map(|s| s.username.clone())
            .ok_or_else(|| anyhow!("{}", Notice::AccountRequired))?;
        let draft = state
            .forum_draft
            .take()
            .ok_or_else(|| RigForgeError::invalid_input("no build is waiting to be shared"))?;

        let title = if draft.build.name.trim().is_empty() {
            UNTITLED_POST.to_string()
        } else {
            draft.build.name.clone()
        };
        let post = ForumPost {
            id: Uuid::new_v4().to_string(),
            author,
            title,
            description: description.trim().to_string(),
            build: draft.build,
            likes: 0,
            comments: 0,
            created_at: "Just now".to_string(),
            ai_rating: Some(0.0),
        };
        state.forum.publish(post.clone());
        info!(post_id = %post.id, title = %post.title, "build shared");
        Ok(post)
    }

    pub async fn discard_draft(&self) -> Option<ForumDraft> {
        self.state.write().await.forum_draft.take()
    }

    /// Likes a post and returns its new like count.
    pub async fn like_post(&self, post_id: &str) -> Result<u32> {
        self.state
            .write()
            .await
            .forum
            .like(post_id)
            .ok_or_else(|| RigForgeError::not_found("forum post", post_id).into())
    }
}

fn ticket_for(state: &AppState) -> ResultTicket {
    ResultTicket {
        generation: state.workbench.generation(),
        view: state.router.current(),
    }
}

fn is_current(state: &AppState, ticket: ResultTicket) -> bool {
    state.workbench.generation() == ticket.generation && state.router.current() == ticket.view
}
