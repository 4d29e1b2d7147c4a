//! SyncAction - What to do with a single source file

/// Decision for one source file
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SyncAction {
    /// Destination is missing
    CopyNew,

    /// Source is strictly newer than destination
    Overwrite,

    /// Destination is as new or newer
    Skip,
}

impl SyncAction {
    /// True when the file has to be transferred
    pub fn is_copy(&self) -> bool {
        !matches!(self, SyncAction::Skip)
    }

    /// Short name for log lines
    pub fn name(&self) -> &'static str {
        match self {
            SyncAction::CopyNew => "Copy",
            SyncAction::Overwrite => "Update",
            SyncAction::Skip => "Skip",
        }
    }
}
