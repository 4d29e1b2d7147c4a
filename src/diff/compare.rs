//! File comparison logic

use crate::types::SyncAction;
use std::time::SystemTime;

/// Decide whether a source file has to be copied
///
/// Only modification times are compared:
///
/// 1. **Destination missing** → `CopyNew`
/// 2. **Source newer** (src > dest) → `Overwrite`
/// 3. **Same or older** → `Skip`; equal mtimes mean unchanged, and a newer
///    destination is never overwritten
pub fn compare_mtimes(src: SystemTime, dest: Option<SystemTime>) -> SyncAction {
    match dest {
        None => SyncAction::CopyNew,
        Some(dest) if src > dest => SyncAction::Overwrite,
        Some(_) => SyncAction::Skip,
    }
}
