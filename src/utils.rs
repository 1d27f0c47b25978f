use ico::{IconDir, IconDirEntry, IconImage, ResourceType};
use image::imageops::{self, FilterType};
use image::{DynamicImage, ImageFormat, RgbImage};
use sha2::{Digest, Sha256};
use std::fs::File;
use std::io::{BufReader, BufWriter, Read, Write};
use std::path::Path;

/// Saves the canvas as a PNG file.
pub fn write_png(canvas: &RgbImage, path: &Path) -> Result<(), Box<dyn std::error::Error>> {
    canvas.save_with_format(path, ImageFormat::Png)?;
    log_written(path);
    Ok(())
}

/// Saves the canvas as a Windows icon with one Lanczos-resampled, PNG-encoded entry per size.
/// Entries are written smallest first; duplicate sizes are written once.
pub fn write_ico(
    canvas: &RgbImage,
    path: &Path,
    sizes: &[u32],
) -> Result<(), Box<dyn std::error::Error>> {
    let mut sizes = sizes.to_vec();
    sizes.sort_unstable();
    sizes.dedup();

    let rgba = DynamicImage::ImageRgb8(canvas.clone()).into_rgba8();
    let mut icon_dir = IconDir::new(ResourceType::Icon);
    for size in sizes {
        let frame = if (size, size) == rgba.dimensions() {
            rgba.clone()
        } else {
            imageops::resize(&rgba, size, size, FilterType::Lanczos3)
        };
        let icon_image = IconImage::from_rgba_data(size, size, frame.into_raw());
        icon_dir.add_entry(IconDirEntry::encode_as_png(&icon_image)?);
    }

    let mut file = BufWriter::new(File::create(path)?);
    icon_dir.write(&mut file)?;
    file.flush()?;
    log_written(path);
    Ok(())
}

/// Calculates the SHA256 hash of a file.
pub fn file_digest(path: &Path) -> Result<String, std::io::Error> {
    let mut reader = BufReader::new(File::open(path)?);
    let mut hasher = Sha256::new();
    let mut buffer = vec![0; 8192]; // 8KB buffer
    loop {
        let bytes_read = reader.read(&mut buffer)?;
        if bytes_read == 0 {
            break;
        }
        hasher.update(&buffer[..bytes_read]);
    }
    Ok(format!("{:x}", hasher.finalize()))
}

/// Logs size and digest of a freshly written file. Never fails the write it reports on.
fn log_written(path: &Path) {
    if !log::log_enabled!(log::Level::Info) {
        return;
    }
    let details = std::fs::metadata(path).and_then(|m| Ok((m.len(), file_digest(path)?)));
    match details {
        Ok((size, digest)) => {
            log::info!("Wrote {} ({} bytes, sha256 {})", path.display(), size, digest)
        }
        Err(e) => log::warn!("Wrote {} but could not inspect it: {}", path.display(), e),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::Rgb;

    #[test]
    fn ico_entries_are_ascending_png_frames() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("test.ico");
        let canvas = RgbImage::from_pixel(64, 64, Rgb([10, 20, 30]));
        write_ico(&canvas, &path, &[64, 32, 16, 32]).unwrap();

        let icon_dir = IconDir::read(File::open(&path).unwrap()).unwrap();
        let sizes: Vec<u32> = icon_dir.entries().iter().map(|e| e.width()).collect();
        assert_eq!(sizes, vec![16, 32, 64]);
        assert!(icon_dir.entries().iter().all(|e| e.is_png()));
        let small = icon_dir.entries()[0].decode().unwrap();
        assert_eq!(&small.rgba_data()[..4], &[10, 20, 30, 255]);
    }

    #[test]
    fn png_keeps_pixels() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("test.png");
        let mut canvas = RgbImage::from_pixel(8, 8, Rgb([0, 0, 0]));
        canvas.put_pixel(3, 4, Rgb([1, 2, 3]));
        write_png(&canvas, &path).unwrap();
        let read = image::open(&path).unwrap().into_rgb8();
        assert_eq!(read, canvas);
    }

    #[test]
    fn digest_of_known_content() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("abc.txt");
        std::fs::write(&path, b"abc").unwrap();
        assert_eq!(
            file_digest(&path).unwrap(),
            "ba7816bf8f01cfea414140de5dae2223b00361a396177a9cb410ff61f20015ad"
        );
    }

    #[test]
    fn unreadable_file_does_not_fail_logging() {
        let _ = env_logger::builder()
            .is_test(true)
            .filter_level(log::LevelFilter::Info)
            .try_init();
        assert!(log::log_enabled!(log::Level::Info));
        let dir = tempfile::tempdir().unwrap();
        // Warns instead of returning an error.
        log_written(&dir.path().join("never-written.png"));
    }

    #[test]
    fn writing_into_missing_directory_fails() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("missing").join("icon.ico");
        let canvas = RgbImage::from_pixel(16, 16, Rgb([0, 0, 0]));
        assert!(write_ico(&canvas, &path, &[16]).is_err());
        assert!(write_png(&canvas, &path.with_extension("png")).is_err());
    }
}
