use crate::config::Settings;
use crate::console::{Console, InputEvent, Notice, RecordView};
use crate::Result;
use chrono::{DateTime, Utc};
use std::collections::{BTreeSet, HashSet};
use theme_engine::{Action, BreakSchedule, Decision, LabelSession, Mode, Phase, Termination};
use theme_store::{metadata_path, write_metadata, OutputWriter, RecordStore, SessionCache};
use theme_types::{Record, RecordId, SessionCounts, SessionMetadata};
use tracing::{info, warn};

/// How a run ended and what it left on disk.
#[derive(Debug, Clone, PartialEq)]
pub struct Outcome {
    pub termination: Termination,
    pub counts: SessionCounts,
    pub metadata: SessionMetadata,
}

/// Drives a `LabelSession` against the files and a `Console`.
///
/// Every label is flushed to the output table, and every skip to the cache,
/// before the session is allowed to move to the next record.
pub struct Runner {
    settings: Settings,
    writer: OutputWriter,
    cache: SessionCache,
    session: LabelSession,
    breaks: Option<BreakSchedule>,
    started_at: DateTime<Utc>,
}

impl Runner {
    pub fn open(settings: Settings) -> Result<Self> {
        Self::open_at(settings, Utc::now())
    }

    pub fn open_at(settings: Settings, now: DateTime<Utc>) -> Result<Self> {
        let store = RecordStore::load(
            &settings.unmarked,
            &settings.schema,
            settings.select_label.as_deref(),
        )?;
        let writer = OutputWriter::open(
            &settings.marked,
            store.headers(),
            &settings.schema,
            settings.relabel_policy,
        )?;
        let cache = SessionCache::load_or_create(
            &settings.cache.folder,
            &settings.cache.session,
            settings.cache.enabled,
        )?;

        // In relabel mode a row counts as done once its label moved away
        // from the one being reviewed, or once the operator confirmed it.
        let done: HashSet<RecordId> = writer
            .ids()
            .filter(|id| match settings.select_label.as_deref() {
                Some(selected) => writer.label_of(id) != Some(selected) || cache.is_reviewed(id),
                None => true,
            })
            .collect();

        let skipped: BTreeSet<RecordId> = cache
            .skipped()
            .iter()
            .filter(|id| store.get(id).is_ok() && !done.contains(*id))
            .cloned()
            .collect();

        let mut excluded = done;
        if !settings.cache.revisit_skipped {
            excluded.extend(skipped.iter().cloned());
        }
        let pending: Vec<Record> = store.pending(&excluded).cloned().collect();

        let pending_ids: HashSet<&RecordId> = pending.iter().map(|r| &r.id).collect();
        let marked_base = writer.ids().filter(|id| !pending_ids.contains(id)).count();

        let breaks = BreakSchedule::from_options(
            settings.breaks.label_minutes,
            settings.breaks.break_minutes,
            now,
        )?;

        info!(
            session = %settings.cache.session,
            records = store.len(),
            pending = pending.len(),
            marked = marked_base,
            skipped = skipped.len(),
            "session opened"
        );

        let session = LabelSession::new(
            pending,
            skipped,
            marked_base,
            settings.labels.clone(),
            settings.tokens.clone(),
            settings.page_chars,
        );

        Ok(Self {
            settings,
            writer,
            cache,
            session,
            breaks,
            started_at: now,
        })
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    pub fn counts(&self) -> SessionCounts {
        self.session.counts()
    }

    pub fn run<C: Console>(&mut self, console: &mut C) -> Result<Outcome> {
        self.run_with_clock(console, Utc::now)
    }

    /// Same as `run`, reading the time from `clock` for break scheduling
    /// and metadata.
    pub fn run_with_clock<C, F>(&mut self, console: &mut C, mut clock: F) -> Result<Outcome>
    where
        C: Console,
        F: FnMut() -> DateTime<Utc>,
    {
        let mut needs_present = true;

        while !self.session.is_terminated() {
            if let Some(schedule) = self.breaks.as_mut()
                && let Mode::OnBreak { remaining } = schedule.poll(clock())
            {
                console.notice(Notice::Break { remaining })?;
                match console.read_input() {
                    InputEvent::Line(_) => {}
                    InputEvent::Interrupt => self.session.interrupt(),
                    InputEvent::Closed => self.session.close_input(),
                }
                needs_present = true;
                continue;
            }

            if needs_present {
                let counts = self.session.counts();
                let Some(presented) = self.session.open_page() else {
                    break;
                };
                console.present(&RecordView {
                    record: presented.record,
                    text: &presented.text,
                    counts,
                    labels: &self.settings.labels,
                    tokens: &self.settings.tokens,
                })?;
                needs_present = false;
            }

            let input = match console.read_input() {
                InputEvent::Line(line) => line,
                InputEvent::Interrupt => {
                    self.session.interrupt();
                    break;
                }
                InputEvent::Closed => {
                    self.session.close_input();
                    break;
                }
            };

            match self.session.step(&input)? {
                Action::Page(chunk) => console.page(&chunk)?,
                Action::EndOfText => console.notice(Notice::EndOfText)?,
                Action::NoText => console.notice(Notice::NoText)?,
                Action::HistoryEmpty => console.notice(Notice::HistoryEmpty)?,
                Action::Rejected { input } => {
                    let legend = self
                        .settings
                        .labels
                        .iter()
                        .map(|(token, label)| (token.to_string(), label.to_string()))
                        .collect();
                    console.notice(Notice::Rejected { input, legend })?;
                }
                Action::Label {
                    record,
                    label,
                    was_skipped,
                } => {
                    self.persist(|runner| {
                        runner.writer.append(&record, &label);
                        runner.writer.flush()?;
                        if was_skipped {
                            runner.cache.clear_skip(&record.id)?;
                        }
                        if runner.settings.select_label.is_some() {
                            runner.cache.record_review(&record.id)?;
                        }
                        Ok(())
                    })?;
                    needs_present = true;
                }
                Action::Skip { id, .. } => {
                    self.persist(|runner| Ok(runner.cache.record_skip(&id)?))?;
                    console.notice(Notice::Skipped { id })?;
                    needs_present = true;
                }
                Action::Revert(decision) => {
                    let id = decision.id().clone();
                    self.persist(|runner| runner.revert(&decision))?;
                    console.notice(Notice::Back { id })?;
                    needs_present = true;
                }
            }
        }

        let termination = match self.session.phase() {
            Phase::Terminated(termination) => termination,
            _ => Termination::Interrupted,
        };
        let outcome = self.close(termination, clock())?;

        match termination {
            Termination::Completed => console.notice(Notice::Completed)?,
            other => console.notice(Notice::Stopped(other))?,
        }
        console.notice(Notice::Summary(outcome.counts))?;

        Ok(outcome)
    }

    /// Run a write for the in-flight decision and commit it, or drop the
    /// decision if the write failed.
    fn persist<F>(&mut self, write: F) -> Result<()>
    where
        F: FnOnce(&mut Self) -> Result<()>,
    {
        if let Err(err) = write(self) {
            self.session.abandon();
            if let Err(cache_err) = self.cache.persist() {
                warn!(error = %cache_err, "could not persist cache after failed write");
            }
            return Err(err);
        }
        self.session.commit()?;
        Ok(())
    }

    fn revert(&mut self, decision: &Decision) -> Result<()> {
        match decision {
            Decision::Marked {
                record,
                was_skipped,
                ..
            } => {
                self.writer.undo(&record.id)?;
                self.writer.flush()?;
                if *was_skipped {
                    self.cache.record_skip(&record.id)?;
                }
                if self.settings.select_label.is_some() {
                    self.cache.clear_review(&record.id)?;
                }
            }
            Decision::Skipped {
                record,
                was_skipped,
            } => {
                if !*was_skipped {
                    self.cache.clear_skip(&record.id)?;
                }
            }
        }
        Ok(())
    }

    fn close(&mut self, termination: Termination, now: DateTime<Utc>) -> Result<Outcome> {
        self.writer.flush()?;

        let counts = self.session.counts();
        let mut metadata = SessionMetadata::new(self.settings.cache.session.clone(), self.started_at);
        metadata.saved_at = now;
        metadata.size = self.writer.len();
        metadata.labels = self.writer.label_counts();
        metadata.counts = counts;
        metadata.interrupted = termination != Termination::Completed;
        metadata.extra = self.settings.meta.extra.clone();

        self.cache.store_metadata(metadata.clone())?;
        if self.settings.meta.enabled {
            write_metadata(&metadata_path(&self.settings.marked), &metadata)?;
        }

        info!(
            session = %metadata.session,
            marked = counts.marked,
            unmarked = counts.unmarked,
            skipped = counts.skipped,
            interrupted = metadata.interrupted,
            "session closed"
        );

        Ok(Outcome {
            termination,
            counts,
            metadata,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;
    use chrono::{Duration, TimeZone};
    use std::collections::VecDeque;
    use std::fs;
    use std::io;
    use std::path::Path;
    use tempfile::TempDir;
    use theme_store::{read_metadata, RelabelPolicy};

    const SOURCE: &str = "id,title,text,label\n\
                          1,first,one two three four,\n\
                          2,second,some longer text,\n\
                          3,third,short,\n";

    #[derive(Default)]
    struct ScriptedConsole {
        inputs: VecDeque<InputEvent>,
        reads: usize,
        /// Run before the n-th read (0-based).
        before_read: Vec<(usize, Box<dyn FnOnce()>)>,
        presented: Vec<String>,
        pages: Vec<String>,
        notices: Vec<Notice>,
    }

    impl ScriptedConsole {
        fn lines(lines: &[&str]) -> Self {
            Self {
                inputs: lines
                    .iter()
                    .map(|line| InputEvent::Line(line.to_string()))
                    .collect(),
                ..Self::default()
            }
        }

        fn push(mut self, event: InputEvent) -> Self {
            self.inputs.push_back(event);
            self
        }

        fn before_read(mut self, read: usize, hook: impl FnOnce() + 'static) -> Self {
            self.before_read.push((read, Box::new(hook)));
            self
        }
    }

    impl Console for ScriptedConsole {
        fn present(&mut self, view: &RecordView<'_>) -> io::Result<()> {
            self.presented.push(view.record.id.to_string());
            Ok(())
        }

        fn page(&mut self, chunk: &str) -> io::Result<()> {
            self.pages.push(chunk.to_string());
            Ok(())
        }

        fn notice(&mut self, notice: Notice) -> io::Result<()> {
            self.notices.push(notice);
            Ok(())
        }

        fn read_input(&mut self) -> InputEvent {
            if let Some(pos) = self.before_read.iter().position(|(n, _)| *n == self.reads) {
                let (_, hook) = self.before_read.remove(pos);
                hook();
            }
            self.reads += 1;
            self.inputs.pop_front().unwrap_or(InputEvent::Closed)
        }
    }

    fn settings(dir: &Path) -> Settings {
        let mut config = Config::template();
        config.unmarked = Some(dir.join("data.csv"));
        config.marked = Some(dir.join("out").join("markup.csv"));
        config.show_chars = Some(4);
        config.labels = [("0", "ham"), ("1", "spam")]
            .into_iter()
            .map(|(t, l)| (t.to_string(), l.to_string()))
            .collect();
        config.cache.folder = dir.join(".theme");
        config.validate().unwrap()
    }

    fn setup(source: &str) -> (TempDir, Settings) {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("data.csv"), source).unwrap();
        let settings = settings(dir.path());
        (dir, settings)
    }

    fn output(settings: &Settings) -> String {
        fs::read_to_string(&settings.marked).unwrap_or_default()
    }

    #[test]
    fn test_label_page_label_skip() {
        let (_dir, settings) = setup(SOURCE);
        let mut runner = Runner::open(settings.clone()).unwrap();
        let mut console = ScriptedConsole::lines(&["0", "", "1", " "]);

        let outcome = runner.run(&mut console).unwrap();

        assert_eq!(outcome.termination, Termination::Completed);
        assert_eq!(
            outcome.counts,
            SessionCounts {
                marked: 2,
                unmarked: 0,
                skipped: 1
            }
        );
        assert_eq!(console.presented, vec!["1", "2", "3"]);
        assert_eq!(console.pages, vec![" lon"]);
        assert_eq!(
            output(&settings),
            "id,title,text,label\n1,first,one two three four,ham\n2,second,some longer text,spam\n"
        );

        let cache =
            SessionCache::load_or_create(&settings.cache.folder, "default", true).unwrap();
        assert_eq!(cache.skipped(), [RecordId::from("3")]);
    }

    #[test]
    fn test_back_with_empty_history_is_noop() {
        let (_dir, settings) = setup(SOURCE);
        let mut runner = Runner::open(settings.clone()).unwrap();
        let before = runner.counts();
        let mut console = ScriptedConsole::lines(&["b"]);

        let outcome = runner.run(&mut console).unwrap();

        assert_eq!(console.notices[0], Notice::HistoryEmpty);
        assert_eq!(console.presented, vec!["1"]);
        assert_eq!(outcome.termination, Termination::InputClosed);
        assert_eq!(outcome.counts, before);
        assert!(!settings.marked.exists());
    }

    #[test]
    fn test_rerun_presents_nothing() {
        let (_dir, settings) = setup(SOURCE);
        let first = Runner::open(settings.clone())
            .unwrap()
            .run(&mut ScriptedConsole::lines(&["0", "1", " "]))
            .unwrap();
        let written = output(&settings);

        let mut console = ScriptedConsole::default();
        let second = Runner::open(settings.clone())
            .unwrap()
            .run(&mut console)
            .unwrap();

        assert!(console.presented.is_empty());
        assert_eq!(second.termination, Termination::Completed);
        assert_eq!(second.counts, first.counts);
        assert_eq!(output(&settings), written);
    }

    #[test]
    fn test_empty_source_completes_immediately() {
        let (_dir, settings) = setup("id,title,text,label\n");
        let mut console = ScriptedConsole::default();

        let outcome = Runner::open(settings).unwrap().run(&mut console).unwrap();

        assert!(console.presented.is_empty());
        assert_eq!(outcome.termination, Termination::Completed);
        assert_eq!(outcome.counts, SessionCounts::default());
    }

    #[test]
    fn test_labeled_rows_keep_source_fields() {
        let (_dir, settings) = setup(
            "id,title,text,label\n\
             7,\"Quoted, title\",\"multi\nline\",\n",
        );
        Runner::open(settings.clone())
            .unwrap()
            .run(&mut ScriptedConsole::lines(&["1"]))
            .unwrap();

        let mut reader = csv::Reader::from_path(&settings.marked).unwrap();
        let row = reader.records().next().unwrap().unwrap();
        assert_eq!(
            row.iter().collect::<Vec<_>>(),
            vec!["7", "Quoted, title", "multi\nline", "spam"]
        );
    }

    #[test]
    fn test_skip_back_label_clears_skip() {
        let (_dir, settings) = setup(SOURCE);
        let mut console = ScriptedConsole::lines(&[" ", "b", "0"]);

        let outcome = Runner::open(settings.clone())
            .unwrap()
            .run(&mut console)
            .unwrap();

        assert_eq!(console.presented, vec!["1", "2", "1", "2"]);
        assert!(console.notices.contains(&Notice::Back {
            id: RecordId::from("1")
        }));
        assert_eq!(outcome.counts.skipped, 0);
        assert_eq!(outcome.counts.marked, 1);

        let cache =
            SessionCache::load_or_create(&settings.cache.folder, "default", true).unwrap();
        assert!(cache.skipped().is_empty());
        assert!(output(&settings).contains("1,first,one two three four,ham"));
    }

    #[test]
    fn test_back_removes_label_from_output() {
        let (_dir, settings) = setup(SOURCE);
        Runner::open(settings.clone())
            .unwrap()
            .run(&mut ScriptedConsole::lines(&["0", "b"]))
            .unwrap();

        assert_eq!(output(&settings), "id,title,text,label\n");
    }

    #[test]
    fn test_skipped_records_stay_skipped_across_runs() {
        let (_dir, mut settings) = setup(SOURCE);
        Runner::open(settings.clone())
            .unwrap()
            .run(&mut ScriptedConsole::lines(&[" "]))
            .unwrap();

        let mut console = ScriptedConsole::default();
        Runner::open(settings.clone())
            .unwrap()
            .run(&mut console)
            .unwrap();
        assert_eq!(console.presented, vec!["2"]);

        settings.cache.revisit_skipped = true;
        let mut console = ScriptedConsole::default();
        let outcome = Runner::open(settings).unwrap().run(&mut console).unwrap();
        assert_eq!(console.presented, vec!["1"]);
        assert_eq!(outcome.counts.skipped, 1);
    }

    #[test]
    fn test_interrupt_writes_metadata() {
        let (dir, mut settings) = setup(SOURCE);
        settings
            .meta
            .extra
            .insert("annotator".to_string(), serde_json::json!("alice"));
        let mut console = ScriptedConsole::lines(&["1"]).push(InputEvent::Interrupt);

        let outcome = Runner::open(settings.clone())
            .unwrap()
            .run(&mut console)
            .unwrap();

        assert_eq!(outcome.termination, Termination::Interrupted);
        assert_eq!(
            console.notices[..],
            [
                Notice::Stopped(Termination::Interrupted),
                Notice::Summary(outcome.counts)
            ]
        );

        let meta = read_metadata(&dir.path().join("out").join("meta.json"))
            .unwrap()
            .unwrap();
        assert!(meta.interrupted);
        assert_eq!(meta.size, 1);
        assert_eq!(meta.labels.get("spam"), Some(&1));
        assert_eq!(meta.extra.get("annotator"), Some(&serde_json::json!("alice")));
    }

    #[test]
    fn test_meta_disabled_writes_no_file() {
        let (dir, mut settings) = setup(SOURCE);
        settings.meta.enabled = false;
        Runner::open(settings)
            .unwrap()
            .run(&mut ScriptedConsole::lines(&["1"]))
            .unwrap();

        assert!(!dir.path().join("out").join("meta.json").exists());
    }

    #[test]
    fn test_rejected_input_shows_legend() {
        let (_dir, settings) = setup(SOURCE);
        let mut console = ScriptedConsole::lines(&["x"]);
        let outcome = Runner::open(settings).unwrap().run(&mut console).unwrap();

        assert_eq!(
            console.notices[0],
            Notice::Rejected {
                input: "x".to_string(),
                legend: vec![
                    ("0".to_string(), "ham".to_string()),
                    ("1".to_string(), "spam".to_string())
                ],
            }
        );
        assert_eq!(outcome.counts.unmarked, 3);
    }

    #[test]
    fn test_select_label_relabels_in_place() {
        let (_dir, mut settings) = setup(
            "id,title,text,label\n\
             1,a,x,spam\n\
             2,b,y,ham\n\
             3,c,z,spam\n",
        );
        settings.select_label = Some("spam".to_string());
        settings.relabel_policy = RelabelPolicy::Preserve;
        fs::create_dir_all(settings.marked.parent().unwrap()).unwrap();
        fs::write(
            &settings.marked,
            "id,title,text,label\n1,a,x,spam\n2,b,y,ham\n3,c,z,spam\n",
        )
        .unwrap();

        let mut console = ScriptedConsole::lines(&["0"]);
        let outcome = Runner::open(settings.clone())
            .unwrap()
            .run(&mut console)
            .unwrap();

        assert_eq!(console.presented, vec!["1", "3"]);
        assert_eq!(outcome.counts.unmarked, 1);
        assert_eq!(
            output(&settings),
            "id,title,text,label,label_history\n\
             1,a,x,ham,spam\n\
             2,b,y,ham,\n\
             3,c,z,spam,\n"
        );
    }

    #[test]
    fn test_select_label_rerun_presents_nothing() {
        let (_dir, mut settings) = setup(
            "id,title,text,label\n\
             1,a,x,spam\n\
             2,b,y,spam\n",
        );
        settings.select_label = Some("spam".to_string());

        // Record 1 is confirmed as spam, record 2 moves to ham.
        let mut console = ScriptedConsole::lines(&["1", "0"]);
        let first = Runner::open(settings.clone())
            .unwrap()
            .run(&mut console)
            .unwrap();
        assert_eq!(console.presented, vec!["1", "2"]);
        assert_eq!(first.termination, Termination::Completed);
        let written = output(&settings);

        let mut console = ScriptedConsole::default();
        let second = Runner::open(settings.clone())
            .unwrap()
            .run(&mut console)
            .unwrap();

        assert!(console.presented.is_empty());
        assert_eq!(second.termination, Termination::Completed);
        assert_eq!(second.counts.marked, 2);
        assert_eq!(second.counts.unmarked, 0);
        assert_eq!(output(&settings), written);
    }

    #[test]
    fn test_select_label_back_reopens_confirmed_record() {
        let (_dir, mut settings) = setup(
            "id,title,text,label\n\
             1,a,x,spam\n\
             2,b,y,spam\n",
        );
        settings.select_label = Some("spam".to_string());

        let mut console = ScriptedConsole::lines(&["1", "b"]);
        Runner::open(settings.clone())
            .unwrap()
            .run(&mut console)
            .unwrap();
        assert_eq!(console.presented, vec!["1", "2", "1"]);

        let cache =
            SessionCache::load_or_create(&settings.cache.folder, "default", true).unwrap();
        assert!(cache.reviewed().is_empty());

        let mut console = ScriptedConsole::default();
        Runner::open(settings).unwrap().run(&mut console).unwrap();
        assert_eq!(console.presented, vec!["1"]);
    }

    #[test]
    fn test_failed_write_keeps_earlier_rows() {
        let (_dir, settings) = setup(SOURCE);
        let blocker = settings.marked.with_file_name("markup.csv.tmp");

        // The second label cannot be written: its temporary file path is
        // taken by a directory.
        let mut console = ScriptedConsole::lines(&["0", "1"])
            .before_read(1, move || fs::create_dir(&blocker).unwrap());
        let mut runner = Runner::open(settings.clone()).unwrap();

        let err = runner.run(&mut console).unwrap_err();

        assert!(matches!(err, crate::Error::Store(_)), "{err:?}");
        assert_eq!(console.presented, vec!["1", "2"]);
        assert_eq!(
            output(&settings),
            "id,title,text,label\n1,first,one two three four,ham\n"
        );
        assert_eq!(
            runner.counts(),
            SessionCounts {
                marked: 1,
                unmarked: 2,
                skipped: 0
            }
        );
        assert!(!console.notices.iter().any(|n| matches!(n, Notice::Summary(_))));
    }

    #[test]
    fn test_break_ignores_input_then_resumes() {
        let (_dir, mut settings) = setup(SOURCE);
        settings.breaks.label_minutes = Some(1);
        settings.breaks.break_minutes = Some(1);
        let start = Utc.with_ymd_and_hms(2024, 1, 1, 9, 0, 0).unwrap();

        // Each clock read advances 20 seconds: the break starts at the third
        // read and ends at the sixth.
        let mut tick = 0;
        let clock = move || {
            tick += 1;
            start + Duration::seconds(20 * tick)
        };

        let mut console = ScriptedConsole::lines(&["0", "0", "1", "1", "1", "0"]);
        let mut runner = Runner::open_at(settings.clone(), start).unwrap();
        let outcome = runner.run_with_clock(&mut console, clock).unwrap();

        assert_eq!(console.presented, vec!["1", "2", "3"]);
        assert_eq!(
            console.notices,
            vec![
                Notice::Break {
                    remaining: Duration::seconds(60)
                },
                Notice::Break {
                    remaining: Duration::seconds(40)
                },
                Notice::Break {
                    remaining: Duration::seconds(20)
                },
                Notice::Completed,
                Notice::Summary(SessionCounts {
                    marked: 3,
                    unmarked: 0,
                    skipped: 0
                }),
            ]
        );
        assert_eq!(outcome.termination, Termination::Completed);
        assert_eq!(
            output(&settings),
            "id,title,text,label\n\
             1,first,one two three four,ham\n\
             2,second,some longer text,ham\n\
             3,third,short,ham\n"
        );
    }

    #[test]
    fn test_interrupt_during_break() {
        let (dir, mut settings) = setup(SOURCE);
        settings.breaks.label_minutes = Some(1);
        settings.breaks.break_minutes = Some(1);
        let start = Utc.with_ymd_and_hms(2024, 1, 1, 9, 0, 0).unwrap();

        let mut tick = 0;
        let clock = move || {
            tick += 1;
            start + Duration::seconds(20 * tick)
        };

        let mut console = ScriptedConsole::lines(&["0", "1"]).push(InputEvent::Interrupt);
        let mut runner = Runner::open_at(settings, start).unwrap();
        let outcome = runner.run_with_clock(&mut console, clock).unwrap();

        let counts = SessionCounts {
            marked: 2,
            unmarked: 1,
            skipped: 0,
        };
        assert_eq!(outcome.termination, Termination::Interrupted);
        assert_eq!(outcome.counts, counts);
        assert_eq!(console.presented, vec!["1", "2"]);
        assert_eq!(
            console.notices,
            vec![
                Notice::Break {
                    remaining: Duration::seconds(60)
                },
                Notice::Stopped(Termination::Interrupted),
                Notice::Summary(counts),
            ]
        );

        let meta = read_metadata(&dir.path().join("out").join("meta.json"))
            .unwrap()
            .unwrap();
        assert!(meta.interrupted);
        assert_eq!(meta.size, 2);
        assert_eq!(meta.counts, counts);
    }
}
