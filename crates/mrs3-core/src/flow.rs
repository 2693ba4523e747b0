//! Page submission flow.
//!
//! Each page is a small state machine over
//! `NoFile -> Ready -> Processing -> Done | Failed`. The machine only
//! guards *when* things may happen (no double submission, no submission
//! without an input file); the actual file bytes, results, and error text
//! live in page signals. `finish_success`/`finish_failure` clear the
//! processing flag unconditionally, so a settled request always re-enables
//! the submit control.

/// Where a page currently is in its submit cycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PagePhase {
    /// No accepted input file.
    #[default]
    NoFile,
    /// A validated file is selected; submission is possible.
    Ready,
    /// A request is in flight; submission is blocked.
    Processing,
    /// The last request produced a result.
    Done,
    /// The last request failed; the page shows an error.
    Failed,
}

/// Why a flow transition was rejected.
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum FlowError {
    /// Submission attempted without an accepted file.
    #[error("no input file selected")]
    NoInput,

    /// A request is already in flight.
    #[error("a request is already in progress")]
    InFlight,
}

/// Submission state machine for one page controller.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct PageFlow {
    phase: PagePhase,
}

impl PageFlow {
    /// Fresh flow with no file selected.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            phase: PagePhase::NoFile,
        }
    }

    /// Current phase.
    #[must_use]
    pub const fn phase(self) -> PagePhase {
        self.phase
    }

    /// `true` while a request is outstanding.
    #[must_use]
    pub const fn is_processing(self) -> bool {
        matches!(self.phase, PagePhase::Processing)
    }

    /// A new file was accepted. Replaces any prior result or error.
    ///
    /// # Errors
    ///
    /// Returns [`FlowError::InFlight`] while a request is outstanding --
    /// the upload control is disabled then, so this only triggers if a
    /// caller bypasses the UI.
    pub fn file_selected(&mut self) -> Result<(), FlowError> {
        if self.is_processing() {
            return Err(FlowError::InFlight);
        }
        self.phase = PagePhase::Ready;
        Ok(())
    }

    /// The selected file was cleared (e.g. a failed re-validation).
    pub fn clear_file(&mut self) {
        if !self.is_processing() {
            self.phase = PagePhase::NoFile;
        }
    }

    /// Begin a submission.
    ///
    /// # Errors
    ///
    /// Returns [`FlowError::NoInput`] without an accepted file and
    /// [`FlowError::InFlight`] when a request is already outstanding; the
    /// phase is unchanged in both cases.
    pub fn begin_submit(&mut self) -> Result<(), FlowError> {
        match self.phase {
            PagePhase::NoFile => Err(FlowError::NoInput),
            PagePhase::Processing => Err(FlowError::InFlight),
            PagePhase::Ready | PagePhase::Done | PagePhase::Failed => {
                self.phase = PagePhase::Processing;
                Ok(())
            }
        }
    }

    /// The in-flight request settled with a result.
    pub fn finish_success(&mut self) {
        self.phase = PagePhase::Done;
    }

    /// The in-flight request settled with an error.
    pub fn finish_failure(&mut self) {
        self.phase = PagePhase::Failed;
    }
}
