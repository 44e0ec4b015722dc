pub use anstream::eprintln;
pub use color_eyre::eyre::{eyre, Result};
