pub mod walk;

pub use walk::{walk, MAX_FILE_SIZE};
