pub mod connectors;

pub use connectors::{PanelLoader, PanelMetadata, PanelValidator};
