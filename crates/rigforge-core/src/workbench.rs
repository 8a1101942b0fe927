//! The build being edited plus the AI results computed against it.
//!
//! Every mutation of the component list bumps `generation` and drops the
//! validation and benchmark results, which only describe the list they were
//! computed for. Gateway requests remember the generation they started at so
//! late answers can be recognised and ignored.

use crate::build::{Build, LineId};
use crate::component::{Component, Price};
use crate::gateway::{BenchmarkResult, ValidationResult};

#[derive(Debug, Clone, Default)]
pub struct Workbench {
    build: Build,
    generation: u64,
    validation: Option<ValidationResult>,
    benchmark: Option<BenchmarkResult>,
}

impl Workbench {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn build(&self) -> &Build {
        &self.build
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn total_price(&self) -> Price {
        self.build.total_price()
    }

    pub fn validation(&self) -> Option<&ValidationResult> {
        self.validation.as_ref()
    }

    pub fn benchmark(&self) -> Option<&BenchmarkResult> {
        self.benchmark.as_ref()
    }

    pub fn add_component(&mut self, component: Component) -> LineId {
        let line = self.build.add_component(component);
        self.touch();
        line
    }

    /// Removes one instance of `component_id`. Absent ids change nothing.
    pub fn remove_component(&mut self, component_id: &str) -> Option<Component> {
        let removed = self.build.remove_component(component_id)?;
        self.touch();
        Some(removed)
    }

    pub fn remove_line(&mut self, line_id: LineId) -> Option<Component> {
        let removed = self.build.remove_line(line_id)?;
        self.touch();
        Some(removed)
    }

    pub fn clear(&mut self) {
        self.build.clear();
        self.touch();
    }

    /// Swaps in another build, e.g. a copy of a saved one.
    pub fn replace_build(&mut self, build: Build) {
        self.build = build;
        self.touch();
    }

    /// Renames the current build. Results stay valid.
    pub fn rename(&mut self, name: impl Into<String>) {
        self.build.name = name.into();
    }

    /// Stores a validation result computed at `generation`.
    ///
    /// Returns `false` and drops the result when the build has changed since.
    pub fn apply_validation(&mut self, generation: u64, result: ValidationResult) -> bool {
        if generation != self.generation {
            return false;
        }
        self.validation = Some(result);
        true
    }

    /// Stores a benchmark result computed at `generation`.
    pub fn apply_benchmark(&mut self, generation: u64, result: BenchmarkResult) -> bool {
        if generation != self.generation {
            return false;
        }
        self.benchmark = Some(result);
        true
    }

    /// Forgets the benchmark so a new one can be requested.
    pub fn reset_benchmark(&mut self) {
        self.benchmark = None;
    }

    fn touch(&mut self) {
        self.generation += 1;
        self.validation = None;
        self.benchmark = None;
    }
}
