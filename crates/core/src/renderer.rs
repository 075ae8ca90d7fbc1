//! Writes the i3bar protocol stream.
//!
//! Line 1 is the header, line 2 opens an array that is never closed, and
//! every frame after that is one JSON array followed by a comma.

use crate::status::Frame;
use log::{debug, error};
use sensbar_types::{Block, ProtocolHeader};
use std::io::{self, Write};
use tokio::sync::watch;
use tokio_util::sync::CancellationToken;

/// Serializes frames onto an output stream
pub struct Renderer<W: Write> {
    out: W,
    header_written: bool,
    frames_written: u64,
}

impl<W: Write> Renderer<W> {
    pub fn new(out: W) -> Self {
        Self {
            out,
            header_written: false,
            frames_written: 0,
        }
    }

    /// Write the header and the opening `[`; later calls are no-ops
    pub fn emit_header(&mut self, header: &ProtocolHeader) -> io::Result<()> {
        if self.header_written {
            return Ok(());
        }
        let json = serde_json::to_string(header).map_err(io::Error::other)?;
        writeln!(self.out, "{}", json)?;
        writeln!(self.out, "[")?;
        self.out.flush()?;
        self.header_written = true;
        Ok(())
    }

    /// Write one frame as `[...],`
    ///
    /// A frame that fails to serialize is logged and skipped; only I/O
    /// errors are returned.
    pub fn emit_frame(&mut self, blocks: &[Block]) -> io::Result<()> {
        let json = match serde_json::to_string(blocks) {
            Ok(json) => json,
            Err(e) => {
                error!("Failed to render status: {}", e);
                return Ok(());
            }
        };
        writeln!(self.out, "{},", json)?;
        self.out.flush()?;
        self.frames_written += 1;
        Ok(())
    }

    pub fn frames_written(&self) -> u64 {
        self.frames_written
    }

    pub fn into_inner(self) -> W {
        self.out
    }

    /// Emit the header, then one frame per change until `token` is cancelled
    /// or the frame source goes away.
    ///
    /// Writes are synchronous: if the reader stops draining the output, the
    /// worker thread running this future blocks with it. Only this task and
    /// its frames stall; modules keep their own tasks and threads.
    pub async fn run(
        &mut self,
        header: &ProtocolHeader,
        mut frames: watch::Receiver<Frame>,
        token: CancellationToken,
    ) -> io::Result<()> {
        self.emit_header(header)?;

        loop {
            tokio::select! {
                biased;
                _ = token.cancelled() => break,
                changed = frames.changed() => {
                    if changed.is_err() {
                        debug!("Frame source closed");
                        break;
                    }
                }
            }

            let frame = frames.borrow_and_update().clone();
            self.emit_frame(&frame)?;
        }

        debug!("Renderer stopped after {} frames", self.frames_written);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use sensbar_types::Separator;
    use std::time::Duration;

    fn output(renderer: Renderer<Vec<u8>>) -> String {
        String::from_utf8(renderer.into_inner()).unwrap()
    }

    #[test]
    fn test_header_written_once() {
        let mut renderer = Renderer::new(Vec::new());
        let header = ProtocolHeader::new(0, 0, true);
        renderer.emit_header(&header).unwrap();
        renderer.emit_header(&header).unwrap();

        assert_eq!(output(renderer), "{\"version\":1,\"click_events\":true}\n[\n");
    }

    #[test]
    fn test_frames_are_comma_terminated_lines() {
        let mut renderer = Renderer::new(Vec::new());
        renderer.emit_header(&ProtocolHeader::default()).unwrap();
        renderer
            .emit_frame(&[Block::new("a"), Block::spaced(4).with_text("b")])
            .unwrap();
        renderer.emit_frame(&[]).unwrap();
        assert_eq!(renderer.frames_written(), 2);

        let text = output(renderer);
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines[0], "{\"version\":1}");
        assert_eq!(lines[1], "[");
        assert_eq!(
            lines[2],
            "[{\"full_text\":\"a\"},{\"full_text\":\"b\",\"separator\":false,\"separator_block_width\":4}],"
        );
        assert_eq!(lines[3], "[],");
        assert!(text.trim_end().ends_with("],"));
    }

    #[test]
    fn test_separator_states_on_the_wire() {
        let mut renderer = Renderer::new(Vec::new());
        let drawn = Block::new("d").with_separator(Separator::Drawn { width: 0 });
        renderer.emit_frame(&[drawn]).unwrap();
        assert_eq!(output(renderer), "[{\"full_text\":\"d\"}],\n");
    }

    #[tokio::test(start_paused = true)]
    async fn test_run_writes_latest_frame_and_stops_on_cancel() {
        let (tx, rx) = watch::channel(Vec::new());
        let token = CancellationToken::new();
        let mut renderer = Renderer::new(Vec::new());

        let run_token = token.clone();
        let task = tokio::spawn(async move {
            renderer
                .run(&ProtocolHeader::default(), rx, run_token)
                .await
                .unwrap();
            renderer
        });

        tx.send_replace(vec![Block::new("one")]);
        tokio::time::sleep(Duration::from_millis(10)).await;
        token.cancel();
        tokio::time::sleep(Duration::from_millis(10)).await;
        tx.send_replace(vec![Block::new("late")]);

        let renderer = task.await.unwrap();
        assert_eq!(renderer.frames_written(), 1);
        let text = output(renderer);
        assert!(text.contains("one"));
        assert!(!text.contains("late"));
    }

    struct BrokenPipe;

    impl Write for BrokenPipe {
        fn write(&mut self, _buf: &[u8]) -> io::Result<usize> {
            Err(io::Error::new(io::ErrorKind::BrokenPipe, "bar went away"))
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    #[tokio::test]
    async fn test_run_reports_write_errors() {
        let (_tx, rx) = watch::channel(Vec::new());
        let mut renderer = Renderer::new(BrokenPipe);
        let err = renderer
            .run(&ProtocolHeader::default(), rx, CancellationToken::new())
            .await
            .unwrap_err();
        assert_eq!(err.kind(), io::ErrorKind::BrokenPipe);
    }
}
