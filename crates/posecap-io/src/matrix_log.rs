//! Matrices are written column by column: every column contributes its components in order
//! (`x y z w` for a 4×4, `x y z` for a 3×3), all separated by single spaces.

use std::path::Path;

use glam::{Mat3, Mat4};

use crate::{error::IoError, log_file};

/// Encode a 4×4 transform as one log line, without the trailing newline.
///
/// # Example
///
/// ```
/// use glam::{Mat4, Vec3};
/// use posecap_io::matrix_log::encode_mat4_line;
///
/// let pose = Mat4::from_translation(Vec3::new(1.0, 2.0, 3.0));
///
/// assert_eq!(encode_mat4_line(&pose), "1 0 0 0 0 1 0 0 0 0 1 0 1 2 3 1");
/// ```
pub fn encode_mat4_line(m: &Mat4) -> String {
    join_values(&m.to_cols_array())
}

/// Encode a 3×3 matrix as one log line, without the trailing newline.
pub fn encode_mat3_line(m: &Mat3) -> String {
    join_values(&m.to_cols_array())
}

/// Parse a line written by [`encode_mat4_line`].
pub fn decode_mat4_line(line: &str) -> Result<Mat4, String> {
    let values = parse_values::<16>(line)?;
    Ok(Mat4::from_cols_array(&values))
}

/// Parse a line written by [`encode_mat3_line`].
pub fn decode_mat3_line(line: &str) -> Result<Mat3, String> {
    let values = parse_values::<9>(line)?;
    Ok(Mat3::from_cols_array(&values))
}

/// Read a pose log back into one transform per line.
pub fn read_mat4_log(path: impl AsRef<Path>) -> Result<Vec<Mat4>, IoError> {
    log_file::read_lines(path)?
        .iter()
        .enumerate()
        .map(|(i, line)| decode_mat4_line(line).map_err(|e| IoError::ParseError(i, e)))
        .collect()
}

/// Read an intrinsics log back into one matrix per line.
pub fn read_mat3_log(path: impl AsRef<Path>) -> Result<Vec<Mat3>, IoError> {
    log_file::read_lines(path)?
        .iter()
        .enumerate()
        .map(|(i, line)| decode_mat3_line(line).map_err(|e| IoError::ParseError(i, e)))
        .collect()
}

fn join_values(values: &[f32]) -> String {
    values
        .iter()
        .map(|v| v.to_string())
        .collect::<Vec<_>>()
        .join(" ")
}

fn parse_values<const N: usize>(line: &str) -> Result<[f32; N], String> {
    let mut values = [0.0f32; N];
    let mut parts = line.split_whitespace();
    for (i, value) in values.iter_mut().enumerate() {
        let part = parts
            .next()
            .ok_or_else(|| format!("expected {} values, found {}", N, i))?;
        *value = part
            .parse::<f32>()
            .map_err(|e| format!("{}: {}", part, e))?;
    }
    if parts.next().is_some() {
        return Err(format!("expected {} values, found more", N));
    }
    Ok(values)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::log_file::append_line;
    use approx::assert_relative_eq;
    use glam::{Quat, Vec3};

    #[test]
    fn encode_intrinsics_columns() {
        let k = Mat3::from_cols(
            Vec3::new(500.0, 0.0, 0.0),
            Vec3::new(0.0, 600.0, 0.0),
            Vec3::new(320.0, 240.0, 1.0),
        );
        assert_eq!(encode_mat3_line(&k), "500 0 0 0 600 0 320 240 1");
    }

    #[test]
    fn decode_rejects_wrong_arity() {
        assert!(decode_mat3_line("1 2 3").is_err());
        assert!(decode_mat3_line("1 2 3 4 5 6 7 8 9 10").is_err());
        assert!(decode_mat3_line("1 2 3 4 5 6 7 8 x").is_err());
    }

    #[test]
    fn pose_log_keeps_line_order() -> Result<(), IoError> {
        let tmp_dir = tempfile::tempdir()?;
        let path = tmp_dir.path().join("poses.txt");

        let poses = (0..4)
            .map(|i| {
                Mat4::from_rotation_translation(
                    Quat::from_rotation_y(0.1 * i as f32),
                    Vec3::new(i as f32, 0.5, -0.25 * i as f32),
                )
            })
            .collect::<Vec<_>>();

        for pose in &poses {
            append_line(&path, &encode_mat4_line(pose))?;
        }

        let poses_back = read_mat4_log(&path)?;
        assert_eq!(poses_back.len(), poses.len());
        for (a, b) in poses.iter().zip(poses_back.iter()) {
            for (x, y) in a.to_cols_array().iter().zip(b.to_cols_array().iter()) {
                assert_relative_eq!(*x, *y);
            }
        }
        Ok(())
    }

    #[test]
    fn malformed_line_reports_index() -> Result<(), IoError> {
        let tmp_dir = tempfile::tempdir()?;
        let path = tmp_dir.path().join("intrinsics.txt");
        append_line(&path, "1 0 0 0 1 0 0 0 1")?;
        append_line(&path, "1 0 0")?;

        let res = read_mat3_log(&path);
        assert!(matches!(res, Err(IoError::ParseError(1, _))));
        Ok(())
    }
}
