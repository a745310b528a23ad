use crate::commands::{CmdMessage, CmdResult};
use crate::error::Result;
use crate::store::fragment_store::FragmentStore;
use crate::store::StorageBackend;

pub fn run<B: StorageBackend>(store: &mut FragmentStore<B>) -> Result<CmdResult> {
    let report = store.doctor();
    let mut result = CmdResult::default();

    if report.is_clean() {
        result.add_message(CmdMessage::success("No inconsistencies found."));
    } else {
        result.add_message(CmdMessage::warning("Inconsistencies found and fixed:"));
        let lines = [
            (report.dropped_duplicate_tags, "duplicate tag name(s) dropped from the registry"),
            (report.cleaned_fragment_tags, "fragment tag list(s) cleaned up"),
            (report.registered_missing_tags, "tag(s) used by fragments registered"),
            (report.dropped_stale_colors, "color(s) of unknown tags dropped"),
            (report.fixed_timestamps, "fragment timestamp(s) repaired"),
        ];
        for (count, what) in lines {
            if count > 0 {
                result.add_message(CmdMessage::info(format!("  - {} {}.", count, what)));
            }
        }
    }

    Ok(result.with_durability_warning(store.is_degraded()))
}
