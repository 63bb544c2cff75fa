pub mod buffer;
pub mod codec;
pub mod config;
pub mod error;
pub mod events;
pub mod processing;
pub mod scan;
pub mod session;

pub use buffer::PixelBuffer;
pub use error::Error;
pub use scan::Direction;
pub use session::{ImageSession, Navigation, SessionState};
