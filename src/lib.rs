pub mod error;
pub mod flow;
pub mod workers;

pub mod flow_ext;
pub mod result_ext;

// Re-export the pipeline surface at the crate root
pub use error::{FlowError, FlowResult};
pub use flow::*;
pub use flow_ext::FlowStreamExt;
pub use result_ext::FlowResultStreamExt;
pub use workers::{workers, workers_with, PoolConfig, DEFAULT_CAPACITY};
