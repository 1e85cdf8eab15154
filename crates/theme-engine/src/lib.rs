// Engine module - the labeling session state machine.
// Pure logic: no terminal and no filesystem. The runtime feeds it operator
// input, persists whatever each Action asks for, then calls commit().

pub mod breaks;
pub mod error;
pub mod pager;
pub mod session;

pub use breaks::{BreakSchedule, Mode};
pub use error::{Error, Result};
pub use pager::{PageStep, Pager};
pub use session::{Action, Decision, LabelSession, Phase, Presented, Termination};

/// Characters shown per page when nothing else is configured.
pub const DEFAULT_PAGE_CHARS: usize = 500;
