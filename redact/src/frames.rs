//! Still-frame directories standing in for decoded video
//!
//! Input frames are read in file name order. Output frames are written as
//! `frame_000000.png`, `frame_000001.png`, ... so an external encoder can pick
//! them up with a printf-style pattern.

use crate::error::{RedactError, Result};
use image::RgbaImage;
use std::path::{Path, PathBuf};

const FRAME_EXTENSIONS: [&str; 4] = ["png", "jpg", "jpeg", "bmp"];

fn is_frame_file(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| FRAME_EXTENSIONS.contains(&ext.to_ascii_lowercase().as_str()))
        .unwrap_or(false)
}

/// Ordered list of frame files. Every frame must share the first frame's size.
#[derive(Debug, Clone)]
pub struct FrameSource {
    paths: Vec<PathBuf>,
    dimensions: Option<(u32, u32)>,
}

impl FrameSource {
    pub fn open<P: AsRef<Path>>(dir: P) -> Result<Self> {
        let dir = dir.as_ref();
        let mut paths = Vec::new();
        for entry in std::fs::read_dir(dir)? {
            let path = entry?.path();
            if path.is_file() && is_frame_file(&path) {
                paths.push(path);
            }
        }
        if paths.is_empty() {
            return Err(RedactError::NoFrames(dir.to_path_buf()));
        }
        paths.sort();
        log::info!("Found {} frames in {}", paths.len(), dir.display());
        Ok(Self {
            paths,
            dimensions: None,
        })
    }

    pub fn len(&self) -> usize {
        self.paths.len()
    }

    pub fn is_empty(&self) -> bool {
        self.paths.is_empty()
    }

    /// Size of the clip, known once the first frame was decoded
    pub fn dimensions(&self) -> Option<(u32, u32)> {
        self.dimensions
    }

    /// Decode frame `index` to RGBA
    pub fn load(&mut self, index: usize) -> Result<RgbaImage> {
        let path = self.paths.get(index).ok_or_else(|| {
            RedactError::config(format!(
                "frame {} out of range ({} frames)",
                index,
                self.paths.len()
            ))
        })?;
        let frame = image::open(path)?.to_rgba8();
        let actual = frame.dimensions();
        match self.dimensions {
            None => self.dimensions = Some(actual),
            Some(expected) if expected != actual => {
                return Err(RedactError::FrameSize {
                    index,
                    expected,
                    actual,
                })
            }
            Some(_) => {}
        }
        log::trace!("Loaded frame {} from {}", index, path.display());
        Ok(frame)
    }
}

/// Writes composited frames as numbered PNGs
#[derive(Debug, Clone)]
pub struct FrameSink {
    dir: PathBuf,
    written: usize,
}

impl FrameSink {
    pub fn create<P: AsRef<Path>>(dir: P) -> Result<Self> {
        let dir = dir.as_ref().to_path_buf();
        std::fs::create_dir_all(&dir)?;
        Ok(Self { dir, written: 0 })
    }

    pub fn frame_path(&self, index: usize) -> PathBuf {
        self.dir.join(format!("frame_{:06}.png", index))
    }

    pub fn write(&mut self, index: usize, frame: &RgbaImage) -> Result<PathBuf> {
        let path = self.frame_path(index);
        frame.save(&path)?;
        self.written += 1;
        Ok(path)
    }

    pub fn written(&self) -> usize {
        self.written
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::Rgba;

    fn save_frame(dir: &Path, name: &str, width: u32, height: u32, shade: u8) {
        RgbaImage::from_pixel(width, height, Rgba([shade, shade, shade, 255]))
            .save(dir.join(name))
            .unwrap();
    }

    #[test]
    fn test_frames_sorted_by_name() {
        let dir = tempfile::tempdir().unwrap();
        save_frame(dir.path(), "b.png", 8, 6, 20);
        save_frame(dir.path(), "a.png", 8, 6, 10);
        std::fs::write(dir.path().join("notes.txt"), "ignored").unwrap();

        let mut source = FrameSource::open(dir.path()).unwrap();
        assert_eq!(source.len(), 2);
        assert_eq!(source.dimensions(), None);

        let first = source.load(0).unwrap();
        assert_eq!(first.get_pixel(0, 0), &Rgba([10, 10, 10, 255]));
        assert_eq!(source.dimensions(), Some((8, 6)));
    }

    #[test]
    fn test_empty_directory_rejected() {
        let dir = tempfile::tempdir().unwrap();
        assert!(matches!(
            FrameSource::open(dir.path()),
            Err(RedactError::NoFrames(_))
        ));
    }

    #[test]
    fn test_size_change_rejected() {
        let dir = tempfile::tempdir().unwrap();
        save_frame(dir.path(), "0001.png", 8, 6, 0);
        save_frame(dir.path(), "0002.png", 6, 8, 0);

        let mut source = FrameSource::open(dir.path()).unwrap();
        source.load(0).unwrap();
        match source.load(1) {
            Err(RedactError::FrameSize {
                index,
                expected,
                actual,
            }) => {
                assert_eq!(index, 1);
                assert_eq!(expected, (8, 6));
                assert_eq!(actual, (6, 8));
            }
            other => panic!("expected size error, got {:?}", other),
        }
    }

    #[test]
    fn test_sink_numbers_frames() {
        let dir = tempfile::tempdir().unwrap();
        let out = dir.path().join("nested").join("out");
        let mut sink = FrameSink::create(&out).unwrap();

        let path = sink.write(7, &RgbaImage::new(4, 4)).unwrap();
        assert_eq!(path, out.join("frame_000007.png"));
        assert!(path.exists());
        assert_eq!(sink.written(), 1);
    }
}
