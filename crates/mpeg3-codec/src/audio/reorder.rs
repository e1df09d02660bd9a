//! 短块重排序.
//!
//! Huffman 输出按频带分窗口存放: `band[W0 .. , W1 .., W2 ..]`. 重排后每条频率线的三个
//! 窗口相邻 (`3·k + w`), 每个子带的 18 个系数即为该子带三个窗口各 6 条频率线.

use super::huffman::GRANULE_LINES;
use super::scalefactors::{BandKind, BandLayout};
use super::side_info::GranuleInfo;

/// 对短块区域重排序, 长块部分保持不变
pub fn reorder(gi: &GranuleInfo, layout: &BandLayout, xr: &mut [f32; GRANULE_LINES]) {
    if !gi.has_short_blocks() {
        return;
    }
    let mut scratch = [0f32; GRANULE_LINES];
    let start = layout.short_region_start();
    scratch[..start].copy_from_slice(&xr[..start]);

    for entry in layout.long_entries()..layout.len() {
        let BandKind::Short { window, .. } = layout.kind(entry) else {
            continue;
        };
        let range = layout.range(entry);
        let width = range.len();
        // 窗口 0 的起点即该频带重排后的起点
        let band_start = range.start - window * width;
        for (j, &v) in xr[range].iter().enumerate() {
            scratch[band_start + 3 * j + window] = v;
        }
    }
    *xr = scratch;
}
