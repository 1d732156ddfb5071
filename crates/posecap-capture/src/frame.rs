use glam::Mat4;
use posecap_3d::camera::CameraIntrinsics;
use posecap_image::Image;

/// One tracked camera frame: the native-resolution image, the camera pose and the camera
/// matrix at native resolution.
#[derive(Debug, Clone)]
pub struct Frame {
    /// The RGB image at native resolution.
    pub image: Image<u8, 3>,
    /// Camera-to-world transform.
    pub pose: Mat4,
    /// Camera matrix of `image`.
    pub intrinsics: CameraIntrinsics,
}

impl Frame {
    /// Creates a new frame.
    pub fn new(image: Image<u8, 3>, pose: Mat4, intrinsics: CameraIntrinsics) -> Self {
        Self {
            image,
            pose,
            intrinsics,
        }
    }
}

/// A producer of tracked frames, such as a sensor session or a recorded sequence.
pub trait FrameSource {
    /// Returns the next frame, or `None` once the source is exhausted.
    fn next_frame(&mut self) -> Option<Frame>;
}

impl<I: Iterator<Item = Frame>> FrameSource for I {
    fn next_frame(&mut self) -> Option<Frame> {
        self.next()
    }
}
