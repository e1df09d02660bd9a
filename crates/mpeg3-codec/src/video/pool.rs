//! 切片工作线程池.
//!
//! 固定数量的 OS 线程. 每个线程阻塞在私有的输入锁上等待图像任务, 按静态条带
//! 解码切片: 第 `i` 个线程负责下标 `i, i + N, i + 2N, ...` 的切片 (N 为线程数),
//! 完成后通过完成锁通知调度方. 调度方等待所有完成信号之后才开始下一幅图像,
//! 这道屏障保证参考帧在被读取前已完整重建.

use std::panic::{AssertUnwindSafe, catch_unwind};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Condvar, Mutex, MutexGuard, PoisonError};
use std::thread::{self, JoinHandle};

use log::{debug, error, trace};
use mpeg3_core::{Mpeg3Error, Mpeg3Result};

use super::slice::PictureJob;

/// 工作线程数上限
pub const MAX_WORKERS: usize = 64;

/// 忽略锁中毒: 共享状态只是简单标志, 中毒后依然一致
fn lock<T>(m: &Mutex<T>) -> MutexGuard<'_, T> {
    m.lock().unwrap_or_else(PoisonError::into_inner)
}

/// 单个工作线程的输入/完成信号
#[derive(Default)]
struct WorkerSlot {
    input: Mutex<Option<Arc<PictureJob>>>,
    input_cv: Condvar,
    done: Mutex<bool>,
    done_cv: Condvar,
}

struct Shared {
    slots: Vec<WorkerSlot>,
    shutdown: AtomicBool,
}

/// 切片解码线程池
pub struct SliceWorkerPool {
    shared: Arc<Shared>,
    handles: Vec<JoinHandle<()>>,
}

/// 第 `index` 个工作线程负责的切片下标
pub fn stripe(index: usize, workers: usize, count: usize) -> impl Iterator<Item = usize> {
    (index..count).step_by(workers.max(1))
}

/// 由配置的 CPU 数求线程数: 不超过可用并行度与 [`MAX_WORKERS`], 至少为 1
pub fn effective_workers(cpus: usize) -> usize {
    let available = thread::available_parallelism().map_or(1, |n| n.get());
    cpus.min(available).clamp(1, MAX_WORKERS)
}

impl SliceWorkerPool {
    /// 创建 `workers` 个工作线程 (调用方负责限幅)
    pub fn new(workers: usize) -> Mpeg3Result<Self> {
        let workers = workers.clamp(1, MAX_WORKERS);
        let shared = Arc::new(Shared {
            slots: (0..workers).map(|_| WorkerSlot::default()).collect(),
            shutdown: AtomicBool::new(false),
        });
        let mut pool = Self {
            shared,
            handles: Vec::with_capacity(workers),
        };
        for index in 0..workers {
            let shared = Arc::clone(&pool.shared);
            let handle = thread::Builder::new()
                .name(format!("mpeg3-slice-{}", index))
                .spawn(move || worker_loop(&shared, index))
                .map_err(|e| Mpeg3Error::ThreadSpawn(e.to_string()))?;
            pool.handles.push(handle);
        }
        debug!("切片线程池启动: {} 个工作线程", workers);
        Ok(pool)
    }

    /// 工作线程数
    pub fn workers(&self) -> usize {
        self.shared.slots.len()
    }

    /// 将一幅图像的全部切片交给工作线程, 阻塞直到所有线程完成
    pub fn decode_picture(&self, job: &Arc<PictureJob>) {
        for slot in &self.shared.slots {
            *lock(&slot.done) = false;
            *lock(&slot.input) = Some(Arc::clone(job));
            slot.input_cv.notify_one();
        }
        for slot in &self.shared.slots {
            let mut done = lock(&slot.done);
            while !*done {
                done = slot
                    .done_cv
                    .wait(done)
                    .unwrap_or_else(PoisonError::into_inner);
            }
        }
    }
}

impl Drop for SliceWorkerPool {
    fn drop(&mut self) {
        self.shared.shutdown.store(true, Ordering::Release);
        for slot in &self.shared.slots {
            let _guard = lock(&slot.input);
            slot.input_cv.notify_all();
        }
        for handle in self.handles.drain(..) {
            if handle.join().is_err() {
                error!("切片工作线程异常退出");
            }
        }
    }
}

fn worker_loop(shared: &Shared, index: usize) {
    let slot = &shared.slots[index];
    let workers = shared.slots.len();
    loop {
        let job = {
            let mut input = lock(&slot.input);
            loop {
                if shared.shutdown.load(Ordering::Acquire) {
                    return;
                }
                if let Some(job) = input.take() {
                    break job;
                }
                input = slot
                    .input_cv
                    .wait(input)
                    .unwrap_or_else(PoisonError::into_inner);
            }
        };

        let mut decoded = 0;
        for idx in stripe(index, workers, job.slices.len()) {
            if catch_unwind(AssertUnwindSafe(|| job.run_slice(idx))).is_err() {
                job.faults.fetch_add(1, Ordering::Relaxed);
                error!("切片 {} 解码时发生 panic", idx);
            }
            decoded += 1;
        }
        trace!("工作线程 {} 完成 {} 个切片", index, decoded);
        drop(job);

        *lock(&slot.done) = true;
        slot.done_cv.notify_all();
    }
}
