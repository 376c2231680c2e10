//! External collaborators module
//!
//! Folder scanning, image fitting and sound playback used by the core.

pub mod audio;
pub mod imaging;
pub mod pictures;

// Re-export main types
pub use audio::{AudioBackend, CommandPlayer};
pub use imaging::load_and_fit;
pub use pictures::{FolderNode, FolderSelection, PictureSource};
