mod arr;
mod doc;
mod tuple;

pub use arr::Arr;
pub use doc::{Dict, Doc, Kind};
pub use tuple::Tuple;
