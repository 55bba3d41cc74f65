//! Raw `.rgbv` video files.
//!
//! A minimal headered interchange format so the encoder can be exercised
//! without linking a video codec: an external decode step (ffmpeg or similar)
//! dumps raw frames into this container.
//!
//! Layout (all integers little-endian):
//!
//! ```text
//! offset  size  field
//! 0       4     magic "RGBV"
//! 4       4     width  (u32)
//! 8       4     height (u32)
//! 12      4     frame count (u32)
//! 16      ...   frame count frames of width*height*3 interleaved RGB bytes
//! ```

use std::fs::File;
use std::io::{BufReader, BufWriter, Read, Write};
use std::path::Path;

use crate::domain::Frame;
use crate::error::AppError;
use crate::source::FrameSource;

const MAGIC: &[u8; 4] = b"RGBV";

/// Frame source backed by a `.rgbv` file.
#[derive(Debug)]
pub struct RawVideoSource {
    id: String,
    reader: BufReader<File>,
    width: u32,
    height: u32,
    frame_count: usize,
    yielded: usize,
}

impl RawVideoSource {
    /// Open a raw video file and parse its header.
    pub fn open(path: &Path) -> Result<Self, AppError> {
        let id = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| path.display().to_string());

        let file = File::open(path)
            .map_err(|e| AppError::frame_decode(&id, format!("cannot open file: {e}")))?;
        let mut reader = BufReader::new(file);

        let mut header = [0u8; 16];
        reader
            .read_exact(&mut header)
            .map_err(|e| AppError::frame_decode(&id, format!("short header: {e}")))?;

        if &header[0..4] != MAGIC {
            return Err(AppError::frame_decode(&id, "bad magic (not an RGBV file)"));
        }

        let width = u32::from_le_bytes(header[4..8].try_into().unwrap());
        let height = u32::from_le_bytes(header[8..12].try_into().unwrap());
        let frame_count = u32::from_le_bytes(header[12..16].try_into().unwrap()) as usize;

        if width == 0 || height == 0 {
            return Err(AppError::frame_decode(
                &id,
                format!("degenerate dimensions {width}x{height}"),
            ));
        }

        Ok(Self {
            id,
            reader,
            width,
            height,
            frame_count,
            yielded: 0,
        })
    }
}

impl FrameSource for RawVideoSource {
    fn id(&self) -> &str {
        &self.id
    }

    fn declared_frames(&self) -> usize {
        self.frame_count
    }

    fn dimensions(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    fn next_frame(&mut self) -> Result<Option<Frame>, AppError> {
        if self.yielded >= self.frame_count {
            return Ok(None);
        }

        let bytes = self.width as usize * self.height as usize * 3;
        let mut data = vec![0u8; bytes];
        self.reader.read_exact(&mut data).map_err(|e| {
            AppError::frame_decode(
                &self.id,
                format!(
                    "truncated payload at frame {} of {}: {e}",
                    self.yielded + 1,
                    self.frame_count
                ),
            )
        })?;

        self.yielded += 1;
        Ok(Some(Frame::new(self.width, self.height, data)))
    }
}

/// Write a `.rgbv` file from in-memory frames.
///
/// Used by the `synth` subcommand and by tests; every frame must match the
/// declared dimensions.
pub fn write_raw_video(path: &Path, width: u32, height: u32, frames: &[Frame]) -> Result<(), AppError> {
    let file = File::create(path)
        .map_err(|e| AppError::artifact_write(path, format!("cannot create raw video: {e}")))?;
    let mut writer = BufWriter::new(file);

    writer
        .write_all(MAGIC)
        .and_then(|_| writer.write_all(&width.to_le_bytes()))
        .and_then(|_| writer.write_all(&height.to_le_bytes()))
        .and_then(|_| writer.write_all(&(frames.len() as u32).to_le_bytes()))
        .map_err(|e| AppError::artifact_write(path, format!("header write failed: {e}")))?;

    for frame in frames {
        if frame.width() != width || frame.height() != height || !frame.is_valid() {
            return Err(AppError::artifact_write(
                path,
                "frame dimensions do not match the declared header",
            ));
        }
        writer
            .write_all(frame.data())
            .map_err(|e| AppError::artifact_write(path, format!("frame write failed: {e}")))?;
    }

    writer
        .flush()
        .map_err(|e| AppError::artifact_write(path, format!("flush failed: {e}")))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write as _;

    fn gradient_frames(width: u32, height: u32, n: usize) -> Vec<Frame> {
        (0..n)
            .map(|t| {
                let data: Vec<u8> = (0..width as usize * height as usize)
                    .flat_map(|p| {
                        let v = (p + t) as u8;
                        [v, v.wrapping_add(1), v.wrapping_add(2)]
                    })
                    .collect();
                Frame::new(width, height, data)
            })
            .collect()
    }

    #[test]
    fn raw_video_round_trips() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("clip.rgbv");
        let frames = gradient_frames(3, 2, 4);
        write_raw_video(&path, 3, 2, &frames).unwrap();

        let mut source = RawVideoSource::open(&path).unwrap();
        assert_eq!(source.declared_frames(), 4);
        assert_eq!(source.dimensions(), (3, 2));

        let mut count = 0;
        while let Some(frame) = source.next_frame().unwrap() {
            assert_eq!(frame.data(), frames[count].data());
            count += 1;
        }
        assert_eq!(count, 4);
    }

    #[test]
    fn bad_magic_is_a_decode_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("junk.rgbv");
        std::fs::write(&path, b"JPEGnot a video at all").unwrap();

        let err = RawVideoSource::open(&path).unwrap_err();
        assert!(matches!(err, AppError::FrameDecode { .. }));
    }

    #[test]
    fn truncated_payload_fails_mid_stream() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("short.rgbv");
        let frames = gradient_frames(2, 2, 2);
        write_raw_video(&path, 2, 2, &frames).unwrap();

        // Rewrite the header to claim 10 frames while only 2 are present.
        let mut bytes = std::fs::read(&path).unwrap();
        bytes[12..16].copy_from_slice(&10u32.to_le_bytes());
        let mut file = std::fs::File::create(&path).unwrap();
        file.write_all(&bytes).unwrap();

        let mut source = RawVideoSource::open(&path).unwrap();
        assert_eq!(source.declared_frames(), 10);
        assert!(source.next_frame().unwrap().is_some());
        assert!(source.next_frame().unwrap().is_some());
        let err = source.next_frame().unwrap_err();
        assert!(err.to_string().contains("truncated"));
    }
}
