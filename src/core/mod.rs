pub mod aggregator;
pub mod classifier;
pub mod etl;
pub mod pipeline;

pub use crate::domain::model::{
    ApprovalRecord, Classification, DenialRecord, GradeRecord, SubjectEntry,
};
pub use crate::domain::ports::{ConfigProvider, Pipeline, Storage};
pub use crate::utils::error::Result;
