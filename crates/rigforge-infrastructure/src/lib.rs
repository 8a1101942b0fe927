pub mod config_service;
pub mod dto;
pub mod paths;
pub mod saved_build_repository;
pub mod secret_service;
pub mod storage;

pub use crate::config_service::ConfigService;
pub use crate::paths::{RigForgePaths, SAVED_BUILDS_KEY};
pub use crate::saved_build_repository::JsonSavedBuildRepository;
pub use crate::secret_service::SecretServiceImpl;
