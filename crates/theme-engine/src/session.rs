use crate::pager::{PageStep, Pager};
use crate::{Error, Result};
use std::collections::{BTreeSet, VecDeque};
use theme_types::{Command, CommandTokens, LabelMap, Record, RecordId, SessionCounts};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Termination {
    /// Nothing left to present.
    Completed,
    /// The operator pressed Ctrl-C.
    Interrupted,
    /// Input stream ended (EOF).
    InputClosed,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    /// Showing a record, waiting for input.
    Presenting,
    /// Same record, a further chunk of its text was shown.
    Paging,
    /// A label or skip was issued and waits for `commit`.
    Advancing,
    /// A back-navigation was issued and waits for `commit`.
    Reverting,
    Terminated(Termination),
}

/// A decision the operator made during this run, kept for back-navigation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Decision {
    Marked {
        record: Record,
        label: String,
        /// The record sat in the skip set when it was labeled.
        was_skipped: bool,
    },
    Skipped {
        record: Record,
        /// The record was already in the skip set (skipped in an earlier run).
        was_skipped: bool,
    },
}

impl Decision {
    pub fn record(&self) -> &Record {
        match self {
            Decision::Marked { record, .. } | Decision::Skipped { record, .. } => record,
        }
    }

    pub fn id(&self) -> &RecordId {
        &self.record().id
    }
}

/// What the driver must do (persist or render) after a `step`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    /// Persist the label, then `commit`.
    Label {
        record: Record,
        label: String,
        was_skipped: bool,
    },
    /// Persist the skip, then `commit`.
    Skip { id: RecordId, was_skipped: bool },
    /// Undo the persisted effect of this decision, then `commit`.
    Revert(Decision),
    /// Show the next chunk of text.
    Page(String),
    /// The text was already shown in full.
    EndOfText,
    /// The record has no text to page through.
    NoText,
    /// Unknown token; nothing changed.
    Rejected { input: String },
    /// Back requested with no earlier decision; nothing changed.
    HistoryEmpty,
}

/// The record being shown and the first page of its text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Presented<'a> {
    pub record: &'a Record,
    pub text: PageStep,
}

#[derive(Debug, Clone)]
enum Transition {
    Advance(Decision),
    Revert(Decision),
}

/// State of one labeling run.
///
/// `step` interprets a line of input against the current record. Decisions
/// that must reach disk put the session into `Advancing` or `Reverting`;
/// it only moves on once the driver confirms persistence with `commit`, so
/// a failed write never leaves memory ahead of the files.
#[derive(Debug, Clone)]
pub struct LabelSession {
    labels: LabelMap,
    tokens: CommandTokens,
    pending: VecDeque<Record>,
    history: Vec<Decision>,
    skipped: BTreeSet<RecordId>,
    marked_base: usize,
    marked_run: usize,
    pager: Pager,
    phase: Phase,
    in_flight: Option<Transition>,
}

impl LabelSession {
    /// `pending` is the ordered work list; `skipped` the skip set carried
    /// over from earlier runs; `marked_base` the number of output rows that
    /// are not in `pending`.
    pub fn new(
        pending: Vec<Record>,
        skipped: BTreeSet<RecordId>,
        marked_base: usize,
        labels: LabelMap,
        tokens: CommandTokens,
        page_chars: usize,
    ) -> Self {
        let pending: VecDeque<Record> = pending.into();
        let phase = if pending.is_empty() {
            Phase::Terminated(Termination::Completed)
        } else {
            Phase::Presenting
        };

        Self {
            labels,
            tokens,
            pending,
            history: Vec::new(),
            skipped,
            marked_base,
            marked_run: 0,
            pager: Pager::new(page_chars),
            phase,
            in_flight: None,
        }
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn is_terminated(&self) -> bool {
        matches!(self.phase, Phase::Terminated(_))
    }

    pub fn labels(&self) -> &LabelMap {
        &self.labels
    }

    pub fn tokens(&self) -> &CommandTokens {
        &self.tokens
    }

    pub fn current(&self) -> Option<&Record> {
        self.pending.front()
    }

    pub fn history(&self) -> &[Decision] {
        &self.history
    }

    pub fn skipped(&self) -> &BTreeSet<RecordId> {
        &self.skipped
    }

    pub fn counts(&self) -> SessionCounts {
        SessionCounts {
            marked: self.marked_base + self.marked_run,
            unmarked: self.pending.len(),
            skipped: self.skipped.len(),
        }
    }

    /// Enter `Presenting` for the current record and return its first page.
    pub fn open_page(&mut self) -> Option<Presented<'_>> {
        if self.is_terminated() || self.in_flight.is_some() {
            return None;
        }
        let record = self.pending.front()?;
        let text = self.pager.first(record.text.as_deref());
        self.phase = Phase::Presenting;
        Some(Presented { record, text })
    }

    /// Interpret one line of operator input.
    pub fn step(&mut self, input: &str) -> Result<Action> {
        match self.phase {
            Phase::Terminated(_) => return Err(Error::Terminated),
            Phase::Advancing | Phase::Reverting => return Err(Error::UncommittedDecision),
            Phase::Presenting | Phase::Paging => {}
        }
        let Some(current) = self.pending.front() else {
            return Err(Error::Terminated);
        };

        let action = match self.tokens.command_for(input) {
            Some(Command::Page) => {
                self.phase = Phase::Paging;
                match self.pager.next(current.text.as_deref()) {
                    PageStep::Chunk(chunk) => Action::Page(chunk),
                    PageStep::End => Action::EndOfText,
                    PageStep::NoText => Action::NoText,
                }
            }
            Some(Command::Skip) => {
                let was_skipped = self.skipped.contains(&current.id);
                let id = current.id.clone();
                tracing::debug!(id = %id, "skip");
                self.in_flight = Some(Transition::Advance(Decision::Skipped {
                    record: current.clone(),
                    was_skipped,
                }));
                self.phase = Phase::Advancing;
                Action::Skip { id, was_skipped }
            }
            Some(Command::Back) => match self.history.pop() {
                Some(decision) => {
                    tracing::debug!(id = %decision.id(), "back");
                    self.in_flight = Some(Transition::Revert(decision.clone()));
                    self.phase = Phase::Reverting;
                    Action::Revert(decision)
                }
                None => {
                    tracing::warn!("back requested with empty history");
                    self.phase = Phase::Presenting;
                    Action::HistoryEmpty
                }
            },
            None => match self.labels.resolve(input) {
                Some(label) => {
                    let was_skipped = self.skipped.contains(&current.id);
                    let record = current.clone();
                    let label = label.to_string();
                    tracing::debug!(id = %record.id, label = %label, "label");
                    self.in_flight = Some(Transition::Advance(Decision::Marked {
                        record: record.clone(),
                        label: label.clone(),
                        was_skipped,
                    }));
                    self.phase = Phase::Advancing;
                    Action::Label {
                        record,
                        label,
                        was_skipped,
                    }
                }
                None => {
                    tracing::debug!(input, "rejected input");
                    Action::Rejected {
                        input: input.to_string(),
                    }
                }
            },
        };

        Ok(action)
    }

    /// Confirm that the in-flight decision was persisted and move on.
    pub fn commit(&mut self) -> Result<()> {
        let Some(transition) = self.in_flight.take() else {
            return Err(Error::NothingToCommit);
        };

        match transition {
            Transition::Advance(decision) => {
                self.pending.pop_front();
                match &decision {
                    Decision::Marked { record, .. } => {
                        self.skipped.remove(&record.id);
                        self.marked_run += 1;
                    }
                    Decision::Skipped { record, .. } => {
                        self.skipped.insert(record.id.clone());
                    }
                }
                self.history.push(decision);
            }
            Transition::Revert(decision) => {
                match &decision {
                    Decision::Marked {
                        record,
                        was_skipped,
                        ..
                    } => {
                        self.marked_run = self.marked_run.saturating_sub(1);
                        if *was_skipped {
                            self.skipped.insert(record.id.clone());
                        }
                    }
                    Decision::Skipped {
                        record,
                        was_skipped,
                    } => {
                        if !*was_skipped {
                            self.skipped.remove(&record.id);
                        }
                    }
                }
                let (Decision::Marked { record, .. } | Decision::Skipped { record, .. }) = decision;
                self.pending.push_front(record);
            }
        }

        self.pager.reset();
        self.phase = if self.pending.is_empty() {
            Phase::Terminated(Termination::Completed)
        } else {
            Phase::Presenting
        };
        Ok(())
    }

    /// Drop an in-flight decision whose persistence failed.
    pub fn abandon(&mut self) {
        if let Some(transition) = self.in_flight.take() {
            if let Transition::Revert(decision) = transition {
                self.history.push(decision);
            }
            self.phase = Phase::Presenting;
        }
    }

    pub fn interrupt(&mut self) {
        self.terminate(Termination::Interrupted);
    }

    pub fn close_input(&mut self) {
        self.terminate(Termination::InputClosed);
    }

    fn terminate(&mut self, termination: Termination) {
        self.abandon();
        if !self.is_terminated() {
            self.phase = Phase::Terminated(termination);
        }
    }
}
