//! The single application state record.

use strum::{Display, EnumIter};

use rigforge_core::catalog::{Catalog, CategoryFilter};
use rigforge_core::component::Component;
use rigforge_core::forum::{ForumDraft, ForumFeed};
use rigforge_core::scanner::ScannerStatus;
use rigforge_core::view::ViewRouter;
use rigforge_core::workbench::Workbench;

/// Kinds of gateway call that may be in flight.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumIter)]
#[strum(serialize_all = "lowercase")]
pub enum PendingKind {
    Validating,
    Benchmarking,
    Analyzing,
    Commenting,
}

/// At most one in-flight call per [`PendingKind`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PendingFlags {
    validating: bool,
    benchmarking: bool,
    analyzing: bool,
    commenting: bool,
}

impl PendingFlags {
    pub fn is_set(&self, kind: PendingKind) -> bool {
        *self.slot(kind)
    }

    /// Marks `kind` as running. Returns `false` if it already was.
    pub fn try_begin(&mut self, kind: PendingKind) -> bool {
        let slot = self.slot_mut(kind);
        if *slot {
            return false;
        }
        *slot = true;
        true
    }

    pub fn finish(&mut self, kind: PendingKind) {
        *self.slot_mut(kind) = false;
    }

    pub fn any(&self) -> bool {
        self.validating || self.benchmarking || self.analyzing || self.commenting
    }

    fn slot(&self, kind: PendingKind) -> &bool {
        match kind {
            PendingKind::Validating => &self.validating,
            PendingKind::Benchmarking => &self.benchmarking,
            PendingKind::Analyzing => &self.analyzing,
            PendingKind::Commenting => &self.commenting,
        }
    }

    fn slot_mut(&mut self, kind: PendingKind) -> &mut bool {
        match kind {
            PendingKind::Validating => &mut self.validating,
            PendingKind::Benchmarking => &mut self.benchmarking,
            PendingKind::Analyzing => &mut self.analyzing,
            PendingKind::Commenting => &mut self.commenting,
        }
    }
}

/// Everything the running application knows, mutated only through
/// [`crate::RigForgeUseCase`].
#[derive(Debug, Clone, Default)]
pub struct AppState {
    pub router: ViewRouter,
    pub workbench: Workbench,
    pub search_term: String,
    pub category_filter: CategoryFilter,
    pub scanner: ScannerStatus,
    pub pending: PendingFlags,
    pub forum: ForumFeed,
    pub forum_draft: Option<ForumDraft>,
}

impl AppState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Catalog entries matching the current search term and category.
    pub fn visible_catalog<'a>(&self, catalog: &'a Catalog) -> Vec<&'a Component> {
        catalog.filter(&self.search_term, self.category_filter)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use strum::IntoEnumIterator;

    #[test]
    fn test_pending_flags_are_independent() {
        let mut flags = PendingFlags::default();
        assert!(flags.try_begin(PendingKind::Validating));
        assert!(!flags.try_begin(PendingKind::Validating));
        assert!(flags.try_begin(PendingKind::Benchmarking));
        assert!(flags.any());

        flags.finish(PendingKind::Validating);
        assert!(!flags.is_set(PendingKind::Validating));
        assert!(flags.is_set(PendingKind::Benchmarking));

        for kind in PendingKind::iter() {
            flags.finish(kind);
        }
        assert!(!flags.any());
    }

    #[test]
    fn test_initial_state() {
        let state = AppState::new();
        assert!(!state.router.is_authenticated());
        assert!(state.workbench.build().is_empty());
        assert_eq!(state.category_filter, CategoryFilter::All);
        assert_eq!(state.forum.posts().len(), 2);
        assert!(state.forum_draft.is_none());
    }
}
