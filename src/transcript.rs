//! Headless renderer that records frames as text

use std::path::Path;

use crate::io::{LineSink, SinkError};
use crate::scene::{Color, Renderer};

/// Collects one text line per frame and writes them out on [`TranscriptRenderer::finish`]
#[derive(Debug)]
pub struct TranscriptRenderer {
    sink: LineSink,
    frame: usize,
    parts: Vec<String>,
}

impl TranscriptRenderer {
    pub fn new<P: AsRef<Path>>(destination: P) -> Self {
        Self {
            sink: LineSink::new(destination),
            frame: 0,
            parts: Vec::new(),
        }
    }

    /// Close the current frame, queueing its line
    pub fn end_frame(&mut self) {
        let line = format!("{:04} {}", self.frame, self.parts.join(" | "));
        log::debug!("{}", line);
        self.sink.append(line);
        self.parts.clear();
        self.frame += 1;
    }

    pub fn frames(&self) -> usize {
        self.frame
    }

    /// Write every recorded frame to the destination
    pub fn finish(&mut self) -> Result<usize, SinkError> {
        self.sink.flush()
    }
}

impl Renderer for TranscriptRenderer {
    fn draw_sprite(&mut self, x: i32, y: i32, tag: &str) {
        self.parts.push(format!("{}@{},{}", tag, x, y));
    }

    fn draw_text(&mut self, x: i32, y: i32, text: &str, _color: Color) {
        self.parts.push(format!("{:?}@{},{}", text, x, y));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_frames_written_on_finish() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("transcript.txt");
        let mut renderer = TranscriptRenderer::new(&path);

        renderer.draw_sprite(0, 500, "r1");
        renderer.draw_text(100, 250, "hi", Color::WHITE);
        renderer.end_frame();
        renderer.draw_sprite(50, 500, "r2");
        renderer.end_frame();

        assert!(!path.exists());
        assert_eq!(renderer.frames(), 2);
        assert_eq!(renderer.finish().unwrap(), 2);
        assert_eq!(
            fs::read_to_string(&path).unwrap(),
            "0000 r1@0,500 | \"hi\"@100,250\n0001 r2@50,500\n"
        );
    }
}
