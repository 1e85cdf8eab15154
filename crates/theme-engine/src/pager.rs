/// Result of asking for the next chunk of a record's text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PageStep {
    Chunk(String),
    /// Everything was shown already; the cursor holds at the end.
    End,
    /// The record has no text.
    NoText,
}

/// Character cursor over a record's text.
///
/// Chunks are cut on `char` boundaries, never inside a UTF-8 sequence.
#[derive(Debug, Clone)]
pub struct Pager {
    page_chars: usize,
    shown: usize,
}

impl Pager {
    pub fn new(page_chars: usize) -> Self {
        Self {
            page_chars: page_chars.max(1),
            shown: 0,
        }
    }

    pub fn page_chars(&self) -> usize {
        self.page_chars
    }

    /// Characters shown so far for the current record.
    pub fn shown(&self) -> usize {
        self.shown
    }

    pub fn reset(&mut self) {
        self.shown = 0;
    }

    /// Rewind and return the first chunk.
    pub fn first(&mut self, text: Option<&str>) -> PageStep {
        self.reset();
        self.next(text)
    }

    pub fn next(&mut self, text: Option<&str>) -> PageStep {
        let Some(text) = text else {
            return PageStep::NoText;
        };

        let chunk: String = text
            .chars()
            .skip(self.shown)
            .take(self.page_chars)
            .collect();

        if chunk.is_empty() {
            return PageStep::End;
        }

        self.shown += chunk.chars().count();
        PageStep::Chunk(chunk)
    }
}
