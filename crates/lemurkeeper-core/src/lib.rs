pub mod criteria;
pub mod lemur;
pub mod pipeline;
pub mod state;
pub mod store;
mod tracked;

pub use criteria::{CATEGORY_ALL, FilterCriteria};
pub use lemur::{Lemur, LemurId, MalformedRecord, Sex};
pub use pipeline::{Pipeline, PipelineStats, filter_lemurs};
pub use state::AppState;
pub use store::RecordStore;
