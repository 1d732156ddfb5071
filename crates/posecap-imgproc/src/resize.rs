use crate::interpolation::InterpolationMode;
use fast_image_resize as fr;
use posecap_image::{Image, ImageError, ImageSize};

/// Compute the output size of an image resampled by per-axis scale factors.
///
/// Each side is `round(native * scale)` and never smaller than one pixel.
///
/// # Arguments
///
/// * `size` - The native size of the image.
/// * `width_scale` - The scale factor applied to the width.
/// * `height_scale` - The scale factor applied to the height.
///
/// # Errors
///
/// Returns [`ImageError::CastError`] if a factor is not a positive finite number.
///
/// # Example
///
/// ```
/// use posecap_image::ImageSize;
/// use posecap_imgproc::resize::scaled_size;
///
/// let size = scaled_size(ImageSize { width: 1280, height: 720 }, 0.5, 2.0 / 3.0).unwrap();
///
/// assert_eq!(size, ImageSize { width: 640, height: 480 });
/// ```
pub fn scaled_size(
    size: ImageSize,
    width_scale: f32,
    height_scale: f32,
) -> Result<ImageSize, ImageError> {
    let scale_side = |side: usize, scale: f32| -> Result<usize, ImageError> {
        if !scale.is_finite() || scale <= 0.0 {
            return Err(ImageError::CastError);
        }
        let scaled = (side as f64 * scale as f64).round();
        if scaled > u32::MAX as f64 {
            return Err(ImageError::CastError);
        }
        Ok((scaled as usize).max(1))
    };

    Ok(ImageSize {
        width: scale_side(size.width, width_scale)?,
        height: scale_side(size.height, height_scale)?,
    })
}

/// Resize an image to a new size using the [fast_image_resize](https://crates.io/crates/fast_image_resize) crate.
///
/// The function resizes an image to the size of `dst` using the specified interpolation mode.
/// It supports only 3-channel images and u8 data type.
///
/// # Arguments
///
/// * `src` - The input image container with 3 channels.
/// * `dst` - The output image container, already allocated at the target size.
/// * `interpolation` - The interpolation mode to use.
///
/// # Example
///
/// ```
/// use posecap_image::{Image, ImageSize};
/// use posecap_imgproc::interpolation::InterpolationMode;
/// use posecap_imgproc::resize::resize_fast;
///
/// let image = Image::<_, 3>::new(
///     ImageSize {
///         width: 4,
///         height: 5,
///     },
///     vec![0u8; 4 * 5 * 3],
/// )
/// .unwrap();
///
/// let new_size = ImageSize {
///     width: 2,
///     height: 3,
/// };
///
/// let mut image_resized = Image::<_, 3>::from_size_val(new_size, 0).unwrap();
///
/// resize_fast(&image, &mut image_resized, InterpolationMode::Lanczos3).unwrap();
///
/// assert_eq!(image_resized.num_channels(), 3);
/// assert_eq!(image_resized.size().width, 2);
/// assert_eq!(image_resized.size().height, 3);
/// ```
///
/// # Errors
///
/// The function returns an error if either image is empty or the image cannot be resized.
pub fn resize_fast(
    src: &Image<u8, 3>,
    dst: &mut Image<u8, 3>,
    interpolation: InterpolationMode,
) -> Result<(), ImageError> {
    if src.size().area() == 0 || dst.size().area() == 0 {
        return Err(ImageError::InvalidImageSize(
            src.width(),
            src.height(),
            dst.width(),
            dst.height(),
        ));
    }

    let src_width = u32::try_from(src.width()).map_err(|_| ImageError::CastError)?;
    let src_height = u32::try_from(src.height()).map_err(|_| ImageError::CastError)?;
    let dst_width = u32::try_from(dst.width()).map_err(|_| ImageError::CastError)?;
    let dst_height = u32::try_from(dst.height()).map_err(|_| ImageError::CastError)?;

    let src_data_len = src.as_slice().len();
    let dst_data_len = dst.as_slice().len();

    // prepare the input image for the fast_image_resize crate
    let src_image =
        fr::images::ImageRef::new(src_width, src_height, src.as_slice(), fr::PixelType::U8x3)
            .map_err(|_| ImageError::InvalidChannelShape(src_data_len, src.size().area() * 3))?;

    // prepare the output image, writing straight into the destination buffer
    let mut dst_image = fr::images::Image::from_slice_u8(
        dst_width,
        dst_height,
        dst.as_slice_mut(),
        fr::PixelType::U8x3,
    )
    .map_err(|_| ImageError::InvalidChannelShape(dst_data_len, dst_data_len))?;

    let options = fr::ResizeOptions::new().resize_alg(interpolation.resize_alg());

    fr::Resizer::new()
        .resize(&src_image, &mut dst_image, &options)
        .map_err(|_| ImageError::IncompatiblePixelTypes)?;

    Ok(())
}

/// Resample an image by per-axis scale factors, returning a newly allocated image.
///
/// When the scaled size equals the native size the pixels are copied unchanged.
///
/// # Arguments
///
/// * `src` - The input image container with 3 channels.
/// * `width_scale` - The scale factor applied to the width.
/// * `height_scale` - The scale factor applied to the height.
/// * `interpolation` - The interpolation mode to use.
pub fn resize_scaled(
    src: &Image<u8, 3>,
    width_scale: f32,
    height_scale: f32,
    interpolation: InterpolationMode,
) -> Result<Image<u8, 3>, ImageError> {
    let new_size = scaled_size(src.size(), width_scale, height_scale)?;
    if new_size == src.size() {
        return Ok(src.clone());
    }

    let mut dst = Image::<u8, 3>::from_size_val(new_size, 0)?;
    resize_fast(src, &mut dst, interpolation)?;

    Ok(dst)
}
