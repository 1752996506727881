#[macro_use]
mod registry;
mod cache_type;
mod log_type;
mod size;
mod trackable_type;

pub use self::cache_type::CacheType;
pub use self::log_type::LogType;
pub use self::registry::{Entry, Registry};
pub use self::size::Size;
pub use self::trackable_type::TrackableType;
