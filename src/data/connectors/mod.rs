mod csv;
mod types;
mod validator;

pub use csv::PanelLoader;
pub use types::PanelMetadata;
pub use validator::PanelValidator;
