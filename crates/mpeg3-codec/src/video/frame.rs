//! 帧缓冲与帧角色.
//!
//! 三个帧槽组成固定的帧池, 解码目标/前向参考/后向参考只是槽下标, 随参考图像轮换.
//! 像素以 `AtomicU8` 存储并使用 Relaxed 访问: 同一图像内各切片写入互不重叠的宏块,
//! 图像之间的屏障 (互斥锁 + 条件变量交接) 为后续读取提供 happens-before.

use std::sync::Arc;
use std::sync::atomic::{AtomicU8, Ordering};

use mpeg3_core::ChromaFormat;

/// 单个像素平面
#[derive(Debug)]
pub struct Plane {
    width: usize,
    height: usize,
    data: Box<[AtomicU8]>,
}

impl Plane {
    /// 创建以 `fill` 填充的平面
    pub fn new(width: usize, height: usize, fill: u8) -> Self {
        let data = (0..width * height).map(|_| AtomicU8::new(fill)).collect();
        Self {
            width,
            height,
            data,
        }
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    #[inline]
    pub fn get(&self, index: usize) -> u8 {
        self.data[index].load(Ordering::Relaxed)
    }

    #[inline]
    pub fn set(&self, index: usize, value: u8) {
        self.data[index].store(value, Ordering::Relaxed);
    }

    /// 以 `value` 填充整个平面
    pub fn fill(&self, value: u8) {
        for px in self.data.iter() {
            px.store(value, Ordering::Relaxed);
        }
    }

    /// 复制出平面内容
    pub fn snapshot(&self) -> Arc<[u8]> {
        self.data.iter().map(|px| px.load(Ordering::Relaxed)).collect()
    }

    /// 从字节切片整体写入 (长度必须一致)
    pub fn load_from(&self, src: &[u8]) {
        for (px, &v) in self.data.iter().zip(src) {
            px.store(v, Ordering::Relaxed);
        }
    }
}

/// 平面上的行视图: 整帧 (parity=0, step=1) 或单场 (parity, step=2)
#[derive(Clone, Copy)]
pub struct Window<'a> {
    pub plane: &'a Plane,
    pub parity: usize,
    pub step: usize,
}

impl<'a> Window<'a> {
    /// 整帧视图
    pub fn frame(plane: &'a Plane) -> Self {
        Self {
            plane,
            parity: 0,
            step: 1,
        }
    }

    /// 单场视图
    pub fn field(plane: &'a Plane, parity: usize) -> Self {
        Self {
            plane,
            parity,
            step: 2,
        }
    }

    /// 在本视图内再按场交错 (用于帧图像的场 DCT)
    pub fn interleave(self, parity: usize) -> Self {
        Self {
            plane: self.plane,
            parity: self.parity + parity * self.step,
            step: self.step * 2,
        }
    }

    pub fn width(&self) -> usize {
        self.plane.width
    }

    /// 视图内的行数
    pub fn height(&self) -> usize {
        (self.plane.height.saturating_sub(self.parity)).div_ceil(self.step)
    }

    /// 视图第 `row` 行在平面中的起始下标
    #[inline]
    pub fn row_offset(&self, row: usize) -> usize {
        (row * self.step + self.parity) * self.plane.width
    }
}

/// Y/Cb/Cr 三平面帧缓冲
#[derive(Debug)]
pub struct FrameBuffer {
    pub planes: [Plane; 3],
}

impl FrameBuffer {
    pub fn new(width: usize, height: usize, chroma: ChromaFormat) -> Self {
        let (cw, ch) = chroma.chroma_size(width, height);
        Self {
            planes: [
                Plane::new(width, height, 0),
                Plane::new(cw, ch, 128),
                Plane::new(cw, ch, 128),
            ],
        }
    }

    pub fn y(&self) -> &Plane {
        &self.planes[0]
    }

    pub fn cb(&self) -> &Plane {
        &self.planes[1]
    }

    pub fn cr(&self) -> &Plane {
        &self.planes[2]
    }
}

/// 参与一幅图像解码的帧槽下标
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FrameRoles {
    pub target: usize,
    pub forward: Option<usize>,
    pub backward: Option<usize>,
}

/// 三槽帧池
#[derive(Debug)]
pub struct FrameArena {
    frames: Arc<[FrameBuffer; 3]>,
    width: usize,
    height: usize,
    chroma: ChromaFormat,
    /// 最近两幅参考图像: `older` 为前向参考, `newer` 为后向参考
    older: Option<usize>,
    newer: Option<usize>,
}

impl FrameArena {
    pub fn new(width: usize, height: usize, chroma: ChromaFormat) -> Self {
        Self {
            frames: Arc::new(std::array::from_fn(|_| {
                FrameBuffer::new(width, height, chroma)
            })),
            width,
            height,
            chroma,
            older: None,
            newer: None,
        }
    }

    /// 尺寸与色度格式是否一致
    pub fn matches(&self, width: usize, height: usize, chroma: ChromaFormat) -> bool {
        self.width == width && self.height == height && self.chroma == chroma
    }

    pub fn chroma(&self) -> ChromaFormat {
        self.chroma
    }

    pub fn frames(&self) -> &Arc<[FrameBuffer; 3]> {
        &self.frames
    }

    pub fn slot(&self, index: usize) -> &FrameBuffer {
        &self.frames[index]
    }

    /// 最近的参考图像 (P 图像的前向参考)
    pub fn newest_reference(&self) -> Option<usize> {
        self.newer
    }

    /// 为参考图像 (I/P) 分配目标槽, 前向参考为最近的参考图像
    pub fn roles_for_reference(&self) -> FrameRoles {
        let target = (0..3)
            .find(|&s| Some(s) != self.newer && Some(s) != self.older)
            .unwrap_or(0);
        FrameRoles {
            target,
            forward: self.newer,
            backward: None,
        }
    }

    /// 为 B 图像分配目标槽 (两个参考之外的槽)
    pub fn roles_for_b(&self) -> FrameRoles {
        let target = (0..3)
            .find(|&s| Some(s) != self.newer && Some(s) != self.older)
            .unwrap_or(0);
        FrameRoles {
            target,
            forward: self.older,
            backward: self.newer,
        }
    }

    /// 参考图像解码完成: 轮换角色
    pub fn commit_reference(&mut self, slot: usize) {
        self.older = self.newer;
        self.newer = Some(slot);
    }

    /// 丢弃所有参考 (定位或流中断后)
    pub fn drop_references(&mut self) {
        self.older = None;
        self.newer = None;
    }
}
