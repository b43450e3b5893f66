#![no_std]

//! Read-only access to Acorn Level 3 File Server (L3FS) disk images.
//!
//! Open an image with [`image::L3fsImage::open`], then query the catalogue
//! or fetch file contents by dot-separated path.

#[cfg(feature = "std")]
extern crate std;

extern crate alloc;

macro_rules! debugln {
    ($($x:expr),*) => {
        #[cfg(feature = "logging")]
        {
            log::debug!($($x),*);
        }
    };
}

macro_rules! traceln {
    ($($x:expr),*) => {
        #[cfg(feature = "logging")]
        {
            log::trace!($($x),*);
        }
    };
}

macro_rules! warnln {
    ($($x:expr),*) => {
        #[cfg(feature = "logging")]
        {
            log::warn!($($x),*);
        }
    };
}

pub mod blockdev;
pub mod image;
pub mod layout;
pub mod read;

#[cfg(test)]
mod test_image;

pub use image::L3fsImage;
