//! Translation between files on disk and in-memory rasters.
//!
//! Decoding guesses the container from file content, so a PNG named `.jpg`
//! still decodes. Encoding produces JPEG or PNG bytes only. Writing goes
//! through a temporary file in the target directory followed by a rename:
//! the target either receives the full byte sequence or is left untouched.

use super::backend::{Dimensions, OperationError};
use super::params::{Format, Quality};
use image::codecs::jpeg::JpegEncoder;
use image::codecs::png::PngEncoder;
use image::{DynamicImage, ImageReader};
use std::fs::File;
use std::io::{BufReader, Cursor, Write};
use std::path::Path;

fn open_reader(path: &Path) -> Result<ImageReader<BufReader<File>>, OperationError> {
    let reader = ImageReader::open(path).map_err(|e| OperationError::SourceNotFound {
        path: path.to_path_buf(),
        source: e,
    })?;
    reader
        .with_guessed_format()
        .map_err(|e| OperationError::Decode {
            path: path.to_path_buf(),
            message: e.to_string(),
        })
}

/// Read image dimensions from the file header.
pub fn identify(path: &Path) -> Result<Dimensions, OperationError> {
    let (width, height) =
        open_reader(path)?
            .into_dimensions()
            .map_err(|e| OperationError::Decode {
                path: path.to_path_buf(),
                message: e.to_string(),
            })?;
    Ok(Dimensions { width, height })
}

/// Load and fully decode an image from disk.
pub fn decode(path: &Path) -> Result<DynamicImage, OperationError> {
    open_reader(path)?
        .decode()
        .map_err(|e| OperationError::Decode {
            path: path.to_path_buf(),
            message: e.to_string(),
        })
}

/// Serialize a raster to JPEG or PNG bytes.
///
/// JPEG has no alpha channel, so the image is flattened to RGB8 first.
/// `quality` is ignored for PNG.
pub fn encode(img: &DynamicImage, format: Format, quality: Quality) -> Result<Vec<u8>, OperationError> {
    let mut buf = Cursor::new(Vec::new());

    match format {
        Format::Jpeg => {
            let encoder = JpegEncoder::new_with_quality(&mut buf, quality.value() as u8);
            img.to_rgb8()
                .write_with_encoder(encoder)
                .map_err(|e| OperationError::Encode(format!("JPEG encode failed: {e}")))?;
        }
        Format::Png => {
            let encoder = PngEncoder::new(&mut buf);
            img.write_with_encoder(encoder)
                .map_err(|e| OperationError::Encode(format!("PNG encode failed: {e}")))?;
        }
    }

    Ok(buf.into_inner())
}

/// Atomically write `bytes` to `path`.
///
/// The temporary file lives next to the target so the final rename never
/// crosses a filesystem. It is deleted on drop if anything fails.
///
/// The written file gets the permissions of the target it replaces, or the
/// umask-filtered `0666` of a freshly created file when there is none.
pub fn write_file(bytes: &[u8], path: &Path) -> Result<(), OperationError> {
    let write_error = |source: std::io::Error| OperationError::FileWrite {
        path: path.to_path_buf(),
        source,
    };

    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };

    let mut builder = tempfile::Builder::new();
    builder.prefix(".image-utilities-").suffix(".tmp");
    #[cfg(unix)]
    builder.permissions(std::os::unix::fs::PermissionsExt::from_mode(0o666));

    let mut tmp = builder.tempfile_in(dir).map_err(write_error)?;
    if let Ok(existing) = std::fs::metadata(path) {
        tmp.as_file()
            .set_permissions(existing.permissions())
            .map_err(write_error)?;
    }
    tmp.write_all(bytes).map_err(write_error)?;
    tmp.as_file().sync_all().map_err(write_error)?;
    tmp.persist(path).map_err(|e| write_error(e.error))?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_helpers::{create_test_jpeg, create_test_png};
    use tempfile::TempDir;

    #[test]
    fn identify_synthetic_jpeg() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("test.jpg");
        create_test_jpeg(&path, 200, 150);

        let dims = identify(&path).unwrap();
        assert_eq!(dims, Dimensions::new(200, 150));
    }

    #[test]
    fn identify_nonexistent_file_is_source_not_found() {
        let err = identify(Path::new("/nonexistent/image.jpg")).unwrap_err();
        assert!(matches!(err, OperationError::SourceNotFound { .. }));
    }

    #[test]
    fn decode_ignores_misleading_extension() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("actually-png.jpg");
        create_test_png(&path, 32, 16);

        let img = decode(&path).unwrap();
        assert_eq!((img.width(), img.height()), (32, 16));
    }

    #[test]
    fn decode_garbage_is_decode_error() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("notes.jpg");
        std::fs::write(&path, b"definitely not an image").unwrap();

        let err = decode(&path).unwrap_err();
        assert!(matches!(err, OperationError::Decode { .. }));
    }

    #[test]
    fn encode_jpeg_magic() {
        let img = DynamicImage::new_rgba8(10, 10);
        let data = encode(&img, Format::Jpeg, Quality::default()).unwrap();
        assert_eq!(&data[0..2], &[0xFF, 0xD8]);
    }

    #[test]
    fn encode_png_magic() {
        let img = DynamicImage::new_rgb8(10, 10);
        let data = encode(&img, Format::Png, Quality::default()).unwrap();
        assert_eq!(&data[0..8], &[0x89, 0x50, 0x4E, 0x47, 0x0D, 0x0A, 0x1A, 0x0A]);
    }

    #[test]
    fn write_file_replaces_existing_content() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("out.bin");
        std::fs::write(&path, b"old contents that are longer").unwrap();

        write_file(b"new", &path).unwrap();
        assert_eq!(std::fs::read(&path).unwrap(), b"new");
    }

    #[test]
    fn write_file_missing_directory_is_file_write_error() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("missing").join("out.png");

        let err = write_file(b"data", &path).unwrap_err();
        assert!(matches!(err, OperationError::FileWrite { .. }));
        assert!(!path.exists());
    }

    #[test]
    fn write_file_leaves_no_temp_files() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("out.png");
        write_file(b"data", &path).unwrap();

        let names: Vec<_> = std::fs::read_dir(tmp.path())
            .unwrap()
            .map(|e| e.unwrap().file_name())
            .collect();
        assert_eq!(names, vec![std::ffi::OsString::from("out.png")]);
    }

    #[cfg(unix)]
    #[test]
    fn write_file_new_target_follows_umask() {
        use std::os::unix::fs::PermissionsExt;
        let tmp = TempDir::new().unwrap();
        let plain = tmp.path().join("plain.bin");
        std::fs::write(&plain, b"data").unwrap();
        let path = tmp.path().join("out.png");

        write_file(b"data", &path).unwrap();

        let mode = |p: &Path| std::fs::metadata(p).unwrap().permissions().mode() & 0o777;
        assert_eq!(mode(&path), mode(&plain));
    }

    #[cfg(unix)]
    #[test]
    fn write_file_keeps_existing_target_permissions() {
        use std::os::unix::fs::PermissionsExt;
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("out.png");
        std::fs::write(&path, b"old").unwrap();
        std::fs::set_permissions(&path, std::fs::Permissions::from_mode(0o640)).unwrap();

        write_file(b"new", &path).unwrap();

        let mode = std::fs::metadata(&path).unwrap().permissions().mode() & 0o777;
        assert_eq!(mode, 0o640);
        assert_eq!(std::fs::read(&path).unwrap(), b"new");
    }
}
