pub mod etl;
pub mod pipeline;
pub mod sequence;

pub use crate::domain::model::{IntegerSet, TransformResult};
pub use crate::domain::ports::{ConfigProvider, Pipeline, Storage};
pub use crate::utils::error::Result;
