#![deny(missing_docs)]
#![doc = env!("CARGO_PKG_DESCRIPTION")]

#[doc(inline)]
pub use blurkit_image as image;

#[doc(inline)]
pub use blurkit_imgproc as imgproc;

#[doc(inline)]
pub use blurkit_io as io;
