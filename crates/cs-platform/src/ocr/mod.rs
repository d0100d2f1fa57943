mod disabled;
mod tesseract;

pub use disabled::DisabledOcr;
pub use tesseract::{TesseractError, TesseractOcr};
