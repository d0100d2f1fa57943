pub mod hashing;
pub mod imaging;
pub mod time;

pub use hashing::Sha256Hasher;
pub use imaging::{ImageCrateDecoder, InfraThumbnailGenerator, ThumbnailCache};
pub use time::SystemClock;
