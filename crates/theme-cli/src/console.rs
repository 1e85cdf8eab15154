use crate::views::{NoticeView, Palette, RecordPanel};
use anyhow::Result;
use is_terminal::IsTerminal;
use std::io::{self, BufRead, Write};
use std::sync::mpsc::{self, Receiver, Sender};
use std::thread;
use theme_runtime::{Console, InputEvent, Notice, RecordView};

/// `Console` over any writer, fed by a channel of input events.
pub struct TerminalConsole<W: Write> {
    out: W,
    palette: Palette,
    input: Receiver<InputEvent>,
}

impl<W: Write> TerminalConsole<W> {
    pub fn new(out: W, palette: Palette, input: Receiver<InputEvent>) -> Self {
        Self {
            out,
            palette,
            input,
        }
    }

    pub fn into_inner(self) -> W {
        self.out
    }
}

impl TerminalConsole<io::Stdout> {
    /// Console on stdout/stdin with Ctrl-C delivered as `InputEvent::Interrupt`.
    pub fn stdio() -> Result<Self> {
        let stdout = io::stdout();
        let palette = Palette {
            color: stdout.is_terminal(),
        };
        Ok(Self::new(stdout, palette, spawn_input()?))
    }
}

impl<W: Write> Console for TerminalConsole<W> {
    fn present(&mut self, view: &RecordView<'_>) -> io::Result<()> {
        write!(self.out, "{}", RecordPanel::new(view, self.palette))?;
        self.out.flush()
    }

    fn page(&mut self, chunk: &str) -> io::Result<()> {
        writeln!(self.out, "{}", chunk)?;
        self.out.flush()
    }

    fn notice(&mut self, notice: Notice) -> io::Result<()> {
        write!(self.out, "{}", NoticeView::new(&notice, self.palette))?;
        self.out.flush()
    }

    fn read_input(&mut self) -> InputEvent {
        self.input.recv().unwrap_or(InputEvent::Closed)
    }
}

/// Forward stdin lines and Ctrl-C presses over one channel.
///
/// The reader thread blocks on stdin; the ctrlc handler lets the session
/// loop wake up and shut down cleanly while that read is still pending.
pub fn spawn_input() -> Result<Receiver<InputEvent>> {
    let (tx, rx) = mpsc::channel();

    let interrupt_tx = tx.clone();
    ctrlc::set_handler(move || {
        let _ = interrupt_tx.send(InputEvent::Interrupt);
    })?;

    thread::Builder::new()
        .name("theme-stdin".to_string())
        .spawn(move || forward_lines(io::stdin().lock(), &tx))?;

    Ok(rx)
}

/// Send every line of `reader` (newline stripped), then `Closed`.
pub fn forward_lines<R: BufRead>(mut reader: R, tx: &Sender<InputEvent>) {
    let mut line = String::new();
    loop {
        line.clear();
        match reader.read_line(&mut line) {
            Ok(0) => break,
            Ok(_) => {
                let text = line.strip_suffix('\n').unwrap_or(&line);
                let text = text.strip_suffix('\r').unwrap_or(text);
                if tx.send(InputEvent::Line(text.to_string())).is_err() {
                    return;
                }
            }
            Err(err) => {
                tracing::warn!(error = %err, "stdin read failed");
                break;
            }
        }
    }
    let _ = tx.send(InputEvent::Closed);
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;
    use theme_types::SessionCounts;

    #[test]
    fn test_forward_lines_strips_newlines() {
        let (tx, rx) = mpsc::channel();
        forward_lines(Cursor::new("0\n\n \r\nlast"), &tx);

        let events: Vec<InputEvent> = rx.try_iter().collect();
        assert_eq!(
            events,
            vec![
                InputEvent::Line("0".to_string()),
                InputEvent::Line(String::new()),
                InputEvent::Line(" ".to_string()),
                InputEvent::Line("last".to_string()),
                InputEvent::Closed,
            ]
        );
    }

    #[test]
    fn test_read_input_after_sender_dropped() {
        let (tx, rx) = mpsc::channel();
        tx.send(InputEvent::Interrupt).unwrap();
        drop(tx);

        let mut console = TerminalConsole::new(Vec::new(), Palette::plain(), rx);
        assert_eq!(console.read_input(), InputEvent::Interrupt);
        assert_eq!(console.read_input(), InputEvent::Closed);
    }

    #[test]
    fn test_notices_are_written_plain() {
        let (_tx, rx) = mpsc::channel();
        let mut console = TerminalConsole::new(Vec::new(), Palette::plain(), rx);

        console.page("more text").unwrap();
        console.notice(Notice::Completed).unwrap();
        console
            .notice(Notice::Summary(SessionCounts {
                marked: 2,
                unmarked: 0,
                skipped: 1,
            }))
            .unwrap();

        let out = String::from_utf8(console.into_inner()).unwrap();
        assert_eq!(
            out,
            "more text\nAll marked\nMarked:   2\nUnmarked: 0\nSkipped:  1\n"
        );
    }
}
