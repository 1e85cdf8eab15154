use chrono::Duration;
use std::io;
use theme_engine::{PageStep, Termination};
use theme_types::{CommandTokens, LabelMap, Record, RecordId, SessionCounts};

/// One event from the operator side of the terminal.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InputEvent {
    /// A line of input without its trailing newline.
    Line(String),
    Interrupt,
    /// Input reached EOF.
    Closed,
}

/// Everything needed to draw a freshly presented record.
#[derive(Debug, Clone, Copy)]
pub struct RecordView<'a> {
    pub record: &'a Record,
    pub text: &'a PageStep,
    pub counts: SessionCounts,
    pub labels: &'a LabelMap,
    pub tokens: &'a CommandTokens,
}

/// Short status messages printed between records.
#[derive(Debug, Clone, PartialEq)]
pub enum Notice {
    Skipped { id: RecordId },
    Back { id: RecordId },
    HistoryEmpty,
    Rejected {
        input: String,
        legend: Vec<(String, String)>,
    },
    EndOfText,
    NoText,
    Break { remaining: Duration },
    Completed,
    Stopped(Termination),
    Summary(SessionCounts),
}

/// Terminal seam used by the session driver.
///
/// The CLI implements it on top of stdin/stdout; tests script it.
pub trait Console {
    fn present(&mut self, view: &RecordView<'_>) -> io::Result<()>;

    /// Print a further chunk of the current record's text.
    fn page(&mut self, chunk: &str) -> io::Result<()>;

    fn notice(&mut self, notice: Notice) -> io::Result<()>;

    /// Block until the operator enters a line, interrupts, or input closes.
    fn read_input(&mut self) -> InputEvent;
}
