// Feed intake and fixture I/O
pub mod slice_feed;
pub mod slice_file;

// Re-export commonly used types
pub use slice_feed::SliceFeedManager;
pub use slice_file::{SliceFeedFile, read_slice_file, write_slice_file};
