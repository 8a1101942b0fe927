//! Full sessions against the on-disk saved build store.

use async_trait::async_trait;
use std::sync::Arc;
use tempfile::TempDir;

use rigforge_application::{ActionOutcome, Confirmation, RigForgeUseCase};
use rigforge_core::component::Price;
use rigforge_core::gateway::{
    AiGateway, BenchmarkResult, CONNECTION_ERROR_ISSUE, CompatibilityPart, EncodedImage,
    GatewayError, Identification, PerformancePart, ValidationResult,
};
use rigforge_core::notice::Notice;
use rigforge_core::view::ViewState;
use rigforge_infrastructure::RigForgePaths;

/// A gateway that is always unreachable.
struct OfflineGateway;

#[async_trait]
impl AiGateway for OfflineGateway {
    async fn check_compatibility(
        &self,
        _parts: &[CompatibilityPart],
    ) -> Result<ValidationResult, GatewayError> {
        Err(GatewayError::Transport("connection refused".to_string()))
    }

    async fn estimate_performance(
        &self,
        _parts: &[PerformancePart],
    ) -> Result<BenchmarkResult, GatewayError> {
        Err(GatewayError::Http {
            status: 503,
            message: "unavailable".to_string(),
        })
    }

    async fn identify_component(
        &self,
        _image: &EncodedImage,
    ) -> Result<Option<Identification>, GatewayError> {
        Err(GatewayError::EmptyResponse)
    }

    async fn forum_commentary(&self, _component_names: &str) -> Result<String, GatewayError> {
        Err(GatewayError::EmptyResponse)
    }
}

fn data_dir(temp_dir: &TempDir) -> std::path::PathBuf {
    RigForgePaths::new(Some(temp_dir.path())).data_dir().unwrap()
}

fn usecase(temp_dir: &TempDir) -> RigForgeUseCase {
    RigForgeUseCase::with_data_dir(Arc::new(OfflineGateway), &data_dir(temp_dir))
}

#[tokio::test]
async fn build_save_and_reload_across_restarts() {
    let temp_dir = TempDir::new().unwrap();
    let app = usecase(&temp_dir);
    app.login("alice").await.unwrap();
    app.navigate(ViewState::Builder).await.unwrap();

    app.add_from_catalog("cpu1").await.unwrap();
    app.add_from_catalog("gpu1").await.unwrap();
    assert_eq!(
        app.snapshot().await.workbench.total_price(),
        Price::from_dollars(2188)
    );

    app.remove_component("cpu1").await.unwrap().unwrap();
    assert_eq!(
        app.snapshot().await.workbench.total_price(),
        Price::from_dollars(1599)
    );

    let saved = app.save_build(Some("GPU only")).await.unwrap();
    let saved = saved.value().unwrap().clone();

    // A fresh process sees the same list.
    let restarted = usecase(&temp_dir);
    restarted.login_as_guest().await.unwrap();
    let listed = restarted.saved_builds().await.unwrap();
    assert_eq!(listed.len(), 1);
    assert_eq!(listed[0].id, saved.id);
    assert_eq!(listed[0].total_price(), Price::from_dollars(1599));

    restarted.load_saved_build(&saved.id).await.unwrap();
    assert_eq!(restarted.current_view().await, ViewState::Builder);

    let deleted = restarted
        .delete_saved_build(&saved.id, Confirmation::Confirmed)
        .await
        .unwrap();
    assert!(deleted.is_applied());
    assert!(usecase(&temp_dir).saved_builds().await.unwrap().is_empty());
}

#[tokio::test]
async fn corrupt_store_reads_as_empty_and_is_replaced_on_save() {
    let temp_dir = TempDir::new().unwrap();
    let dir = data_dir(&temp_dir);
    std::fs::create_dir_all(&dir).unwrap();
    std::fs::write(RigForgePaths::saved_builds_file(&dir), "{{{ not json").unwrap();

    let app = usecase(&temp_dir);
    app.login("bob").await.unwrap();
    assert!(app.saved_builds().await.unwrap().is_empty());

    app.add_from_catalog("ram1").await.unwrap();
    assert!(app.save_build(None).await.unwrap().is_applied());
    assert_eq!(app.saved_builds().await.unwrap().len(), 1);
}

#[tokio::test]
async fn offline_gateway_never_breaks_the_session() {
    let temp_dir = TempDir::new().unwrap();
    let app = usecase(&temp_dir);
    app.login("carol").await.unwrap();

    assert_eq!(
        app.run_validation().await.unwrap(),
        ActionOutcome::Blocked(Notice::EmptyBuild { action: "validate" })
    );

    app.add_from_catalog("mb1").await.unwrap();
    let validation = app.run_validation().await.unwrap();
    let stored = validation.value().unwrap();
    assert!(!stored.compatible);
    assert_eq!(stored.issues, vec![CONNECTION_ERROR_ISSUE.to_string()]);

    assert_eq!(
        app.run_benchmark().await.unwrap(),
        ActionOutcome::Failed(Notice::GatewayUnavailable)
    );
    assert!(app.snapshot().await.workbench.benchmark().is_none());

    assert!(app.share_build().await.unwrap().is_applied());
    assert_eq!(app.snapshot().await.router.current(), ViewState::Dashboard);
}
