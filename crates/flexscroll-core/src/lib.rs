pub mod binding;
pub mod config;
pub mod error;
pub mod geometry;
pub mod offset;
pub mod pagination;
pub mod scenario;
pub mod scroll;
pub mod signal;
pub mod types;
pub mod view;

#[cfg(test)]
pub(crate) mod testing;

pub use binding::Binding;
pub use config::{AnimationConfig, AppConfig, EasingType, PaginationConfig, ScrollConfig};
pub use error::{Error, Result};
pub use pagination::{LoadCallback, LoadDispatcher, LoadingFlag, TokioDispatcher};
pub use signal::MiddleSignal;
pub use types::{Axis, Direction, LoadPolicy, Size};
pub use view::{FlexScroll, FlexScrollBuilder};
