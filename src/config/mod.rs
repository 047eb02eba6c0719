pub mod env;
pub mod settings;

pub use settings::Config;
