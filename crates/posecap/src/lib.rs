#![doc = include_str!(concat!("../", env!("CARGO_PKG_README")))]

#[doc(inline)]
pub use posecap_image as image;

#[doc(inline)]
pub use posecap_imgproc as imgproc;

#[doc(inline)]
pub use posecap_io as io;

#[doc(inline)]
pub use posecap_3d as k3d;

#[doc(inline)]
pub use posecap_capture as capture;
