pub mod movie;
pub mod review;

pub use movie::{BoxOffice, MovieMetadata, PipeList, ReleaseDates};
pub use review::{Freshness, ReviewCollection, ReviewRecord};
