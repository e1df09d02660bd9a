//! 解码帧缓存.
//!
//! 以输出帧序号为键保存 YUV 平面, 向后定位时命中即可跳过重新解码.
//! 容量按字节计, 超出时淘汰最久未使用的帧.

use std::collections::HashMap;
use std::sync::Arc;

use log::trace;

/// 平面尺寸: (亮度宽, 亮度高, 色度宽, 色度高)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct PlaneSizes {
    pub width: u32,
    pub height: u32,
    pub chroma_width: u32,
    pub chroma_height: u32,
}

impl PlaneSizes {
    fn total_bytes(&self) -> usize {
        let luma = self.width as usize * self.height as usize;
        let chroma = self.chroma_width as usize * self.chroma_height as usize;
        luma + 2 * chroma
    }
}

/// 缓存中的一帧, 平面以 `Arc` 共享
#[derive(Debug, Clone)]
pub struct CachedFrame {
    pub frame_number: u64,
    pub sizes: PlaneSizes,
    pub y: Arc<[u8]>,
    pub u: Arc<[u8]>,
    pub v: Arc<[u8]>,
}

#[derive(Debug)]
struct Entry {
    frame: CachedFrame,
    bytes: usize,
    last_used: u64,
}

/// LRU 帧缓存
#[derive(Debug)]
pub struct FrameCache {
    capacity_bytes: usize,
    used_bytes: usize,
    clock: u64,
    entries: HashMap<u64, Entry>,
}

impl FrameCache {
    /// 创建容量为 `capacity_bytes` 的缓存
    pub fn new(capacity_bytes: usize) -> Self {
        Self {
            capacity_bytes,
            used_bytes: 0,
            clock: 0,
            entries: HashMap::new(),
        }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// 已占用字节数
    pub fn used_bytes(&self) -> usize {
        self.used_bytes
    }

    pub fn capacity_bytes(&self) -> usize {
        self.capacity_bytes
    }

    fn tick(&mut self) -> u64 {
        self.clock += 1;
        self.clock
    }

    /// 查找帧, 命中时刷新其使用时间
    pub fn get(&mut self, frame_number: u64) -> Option<CachedFrame> {
        let now = self.tick();
        let entry = self.entries.get_mut(&frame_number)?;
        entry.last_used = now;
        Some(entry.frame.clone())
    }

    /// 是否已缓存 (不刷新使用时间)
    pub fn contains(&self, frame_number: u64) -> bool {
        self.entries.contains_key(&frame_number)
    }

    /// 存入一帧, 必要时淘汰最久未使用的帧
    ///
    /// 单帧超过总容量时不缓存, 返回 `false`.
    pub fn put(
        &mut self,
        frame_number: u64,
        y: Arc<[u8]>,
        u: Arc<[u8]>,
        v: Arc<[u8]>,
        sizes: PlaneSizes,
    ) -> bool {
        let bytes = sizes.total_bytes();
        if bytes > self.capacity_bytes {
            return false;
        }
        if let Some(old) = self.entries.remove(&frame_number) {
            self.used_bytes -= old.bytes;
        }
        while self.used_bytes + bytes > self.capacity_bytes {
            if !self.evict_oldest() {
                break;
            }
        }
        let now = self.tick();
        self.entries.insert(
            frame_number,
            Entry {
                frame: CachedFrame {
                    frame_number,
                    sizes,
                    y,
                    u,
                    v,
                },
                bytes,
                last_used: now,
            },
        );
        self.used_bytes += bytes;
        true
    }

    fn evict_oldest(&mut self) -> bool {
        let oldest = self
            .entries
            .iter()
            .min_by_key(|(_, e)| e.last_used)
            .map(|(&k, _)| k);
        match oldest.and_then(|k| self.entries.remove(&k).map(|e| (k, e))) {
            Some((k, e)) => {
                self.used_bytes -= e.bytes;
                trace!("帧缓存淘汰第 {} 帧", k);
                true
            }
            None => false,
        }
    }

    /// 清空缓存
    pub fn clear(&mut self) {
        self.entries.clear();
        self.used_bytes = 0;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn planes(n: u8) -> (Arc<[u8]>, Arc<[u8]>, Arc<[u8]>) {
        (
            Arc::from(vec![n; 16]),
            Arc::from(vec![n; 4]),
            Arc::from(vec![n; 4]),
        )
    }

    const SIZES: PlaneSizes = PlaneSizes {
        width: 4,
        height: 4,
        chroma_width: 2,
        chroma_height: 2,
    };

    #[test]
    fn test_put_get() {
        let mut cache = FrameCache::new(1024);
        let (y, u, v) = planes(7);
        assert!(cache.put(3, y, u, v, SIZES));
        let hit = cache.get(3).expect("应命中");
        assert_eq!(hit.y[0], 7);
        assert_eq!(cache.used_bytes(), 24);
        assert!(cache.get(4).is_none());
    }

    #[test]
    fn test_lru_eviction() {
        // 容量恰好容纳两帧
        let mut cache = FrameCache::new(48);
        for n in 0..2 {
            let (y, u, v) = planes(n as u8);
            cache.put(n, y, u, v, SIZES);
        }
        // 访问第 0 帧, 第 1 帧成为最久未使用
        assert!(cache.get(0).is_some());
        let (y, u, v) = planes(2);
        cache.put(2, y, u, v, SIZES);
        assert!(cache.contains(0));
        assert!(!cache.contains(1), "最久未使用的帧应被淘汰");
        assert!(cache.contains(2));
        assert!(cache.used_bytes() <= cache.capacity_bytes());
    }

    #[test]
    fn test_oversized_frame_rejected() {
        let mut cache = FrameCache::new(10);
        let (y, u, v) = planes(1);
        assert!(!cache.put(0, y, u, v, SIZES));
        assert!(cache.is_empty());
    }
}
