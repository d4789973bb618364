pub mod settings;

pub use settings::{GitHubSettings, ServerSettings, Settings};
