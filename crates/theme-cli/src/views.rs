use owo_colors::OwoColorize;
use std::fmt;
use theme_engine::{PageStep, Termination};
use theme_runtime::{Notice, RecordView};
use theme_types::{CommandTokens, LabelMap, SessionCounts};

/// Colors are only emitted when stdout is a terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Palette {
    pub color: bool,
}

impl Palette {
    pub fn plain() -> Self {
        Self { color: false }
    }

    fn good(&self, s: &str) -> String {
        if self.color {
            s.green().to_string()
        } else {
            s.to_string()
        }
    }

    fn bad(&self, s: &str) -> String {
        if self.color {
            s.red().to_string()
        } else {
            s.to_string()
        }
    }
}

// --------------------------------------------------------
// Record panel
// --------------------------------------------------------

pub struct RecordPanel<'a> {
    view: &'a RecordView<'a>,
    palette: Palette,
}

impl<'a> RecordPanel<'a> {
    pub fn new(view: &'a RecordView<'a>, palette: Palette) -> Self {
        Self { view, palette }
    }
}

impl fmt::Display for RecordPanel<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let p = self.palette;
        writeln!(f)?;
        write!(f, "{}", CountsView::new(self.view.counts, p))?;
        writeln!(
            f,
            "{}",
            p.good(&legend_line(self.view.labels, self.view.tokens))
        )?;
        writeln!(f)?;

        for (column, value) in &self.view.record.show {
            match value {
                Some(value) => writeln!(f, "{}: {}", column, value)?,
                None => writeln!(f, "{}", p.bad(&format!("{}: NaN", column)))?,
            }
        }
        if !self.view.record.show.is_empty() {
            writeln!(f)?;
        }

        match self.view.text {
            PageStep::Chunk(chunk) => writeln!(f, "{}", chunk),
            PageStep::NoText => writeln!(f, "{}", p.bad("EMPTY TEXT")),
            PageStep::End => writeln!(f, "{}", p.bad("END")),
        }
    }
}

// --------------------------------------------------------
// Counters
// --------------------------------------------------------

pub struct CountsView {
    counts: SessionCounts,
    palette: Palette,
}

impl CountsView {
    pub fn new(counts: SessionCounts, palette: Palette) -> Self {
        Self { counts, palette }
    }
}

impl fmt::Display for CountsView {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let p = self.palette;
        writeln!(f, "{}", p.good(&format!("Marked:   {}", self.counts.marked)))?;
        writeln!(f, "{}", p.good(&format!("Unmarked: {}", self.counts.unmarked)))?;
        writeln!(f, "{}", p.good(&format!("Skipped:  {}", self.counts.skipped)))
    }
}

// --------------------------------------------------------
// Notices
// --------------------------------------------------------

pub struct NoticeView<'a> {
    notice: &'a Notice,
    palette: Palette,
}

impl<'a> NoticeView<'a> {
    pub fn new(notice: &'a Notice, palette: Palette) -> Self {
        Self { notice, palette }
    }
}

impl fmt::Display for NoticeView<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let p = self.palette;
        match self.notice {
            Notice::Skipped { .. } => writeln!(f, "{}", p.bad("SKIPPED")),
            Notice::Back { .. } => writeln!(f, "{}", p.bad("BACK")),
            Notice::HistoryEmpty => writeln!(f, "{}", p.bad("HISTORY IS EMPTY")),
            Notice::Rejected { input, legend } => {
                writeln!(f, "{}", p.bad(&format!("UNKNOWN INPUT {:?}", input)))?;
                let options: Vec<String> = legend
                    .iter()
                    .map(|(token, label)| format!("{} -> {}", token, label))
                    .collect();
                writeln!(f, "{}", p.good(&options.join(" | ")))
            }
            Notice::EndOfText => writeln!(f, "{}", p.bad("END")),
            Notice::NoText => writeln!(f, "{}", p.bad("CAN'T SHOW MORE")),
            Notice::Break { remaining } => {
                let secs = remaining.num_seconds().max(0);
                writeln!(
                    f,
                    "{}",
                    p.bad(&format!(
                        "BREAK for {}m {}s (press Enter to check again)",
                        secs / 60,
                        secs % 60
                    ))
                )
            }
            Notice::Completed => writeln!(f, "All marked"),
            Notice::Stopped(Termination::InputClosed) => {
                writeln!(f)?;
                writeln!(f, "Input closed")?;
                writeln!(f, "--------")
            }
            Notice::Stopped(_) => {
                writeln!(f)?;
                writeln!(f, "Stopped")?;
                writeln!(f, "--------")
            }
            Notice::Summary(counts) => write!(f, "{}", CountsView::new(*counts, p)),
        }
    }
}

/// `0 -> ham | 1 -> spam | [space] skip | b back | [enter] more`
pub fn legend_line(labels: &LabelMap, tokens: &CommandTokens) -> String {
    labels
        .iter()
        .map(|(token, label)| format!("{} -> {}", display_token(token), label))
        .chain(
            tokens
                .iter()
                .map(|(token, command)| format!("{} {}", display_token(token), command)),
        )
        .collect::<Vec<_>>()
        .join(" | ")
}

fn display_token(token: &str) -> String {
    match token {
        "" => "[enter]".to_string(),
        " " => "[space]".to_string(),
        other => other.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;
    use theme_types::{Record, RecordId};

    fn record(text: Option<&str>) -> Record {
        Record {
            id: RecordId::from("17"),
            text: text.map(String::from),
            show: vec![
                ("title".to_string(), Some("Breaking news".to_string())),
                ("source".to_string(), None),
            ],
            label: None,
            fields: Vec::new(),
        }
    }

    fn render(record: &Record, text: PageStep) -> String {
        let labels = LabelMap::new([("0", "fake"), ("1", "real")]).unwrap();
        let tokens = CommandTokens::default();
        let view = RecordView {
            record,
            text: &text,
            counts: SessionCounts {
                marked: 3,
                unmarked: 10,
                skipped: 1,
            },
            labels: &labels,
            tokens: &tokens,
        };
        RecordPanel::new(&view, Palette::plain()).to_string()
    }

    #[test]
    fn test_record_panel() {
        let record = record(Some("Aliens landed"));
        let out = render(&record, PageStep::Chunk("Aliens landed".to_string()));
        insta::assert_snapshot!(out.trim(), @r"
        Marked:   3
        Unmarked: 10
        Skipped:  1
        0 -> fake | 1 -> real | [space] skip | b back | [enter] more

        title: Breaking news
        source: NaN

        Aliens landed
        ");
    }

    #[test]
    fn test_record_panel_without_text() {
        let record = record(None);
        let out = render(&record, PageStep::NoText);
        assert!(out.ends_with("\nEMPTY TEXT\n"));
    }

    #[test]
    fn test_notices() {
        let render = |notice: Notice| NoticeView::new(&notice, Palette::plain()).to_string();

        assert_eq!(render(Notice::HistoryEmpty), "HISTORY IS EMPTY\n");
        assert_eq!(
            render(Notice::Break {
                remaining: Duration::seconds(125)
            }),
            "BREAK for 2m 5s (press Enter to check again)\n"
        );
        assert_eq!(
            render(Notice::Rejected {
                input: "x".to_string(),
                legend: vec![("0".to_string(), "fake".to_string())],
            }),
            "UNKNOWN INPUT \"x\"\n0 -> fake\n"
        );
        assert_eq!(
            render(Notice::Stopped(Termination::Interrupted)),
            "\nStopped\n--------\n"
        );
    }

    #[test]
    fn test_colored_output_wraps_in_ansi() {
        let out = NoticeView::new(&Notice::Skipped { id: "1".into() }, Palette { color: true })
            .to_string();
        assert!(out.contains("\u{1b}["));
        assert!(out.contains("SKIPPED"));
    }
}
