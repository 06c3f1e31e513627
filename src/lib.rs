pub mod agents;
pub mod channels;
pub mod cli;
pub mod config;
pub mod gateway;
pub mod generator;
pub mod infra;
pub mod logging;
pub mod providers;
pub mod state;

pub use config::{ConfigIssue, IssueLevel, OpenClawConfig};
pub use generator::{build_config, BuildResult};
pub use providers::{infer_limits, ModelLimits};
pub use state::GeneratorState;
