//! Delta propagation into the structural index.

use crate::models::PechaIndex;

/// Shift the `end` offsets of index spans affected by an edit.
///
/// For each text unit, spans of the edited volume whose `end` lies at
/// or after the edited page's original start grow (or shrink) by
/// `delta`. `start` is never touched. Span sequences are stored in
/// ascending volume order, so the scan stops at the first entry of a
/// later volume.
pub fn shift_spans(index: &mut PechaIndex, delta: i64, vol_num: u32, page_start: usize) {
    if delta == 0 {
        return;
    }
    for unit in index.annotations.values_mut() {
        for vol_span in unit.span.iter_mut() {
            if vol_span.vol == vol_num && vol_span.end >= page_start {
                vol_span.end = shifted_end(vol_span.end, delta);
            } else if vol_span.vol > vol_num {
                break;
            }
        }
    }
}

fn shifted_end(end: usize, delta: i64) -> usize {
    (end as i64 + delta).max(0) as usize
}
