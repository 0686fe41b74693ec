//! 广义状态
//!
//! 带时间戳的位置 / 速度 / 力三元组，是推给 [`Model`](crate::Model) 的唯一输入。

use bitflags::bitflags;

bitflags! {
    /// [`State::equal`] 比较字段选择
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct CompareFlags: u32 {
        /// 采集时间（秒 + 微秒，精确比较）
        const ACQUISITION_TIME = 0x1;
        const POSITION = 0x2;
        const VELOCITY = 0x4;
        const FORCE = 0x8;
        const ALL = 0xf;
    }
}

impl Default for CompareFlags {
    /// 默认只比较位置和速度
    fn default() -> Self {
        CompareFlags::POSITION | CompareFlags::VELOCITY
    }
}

/// 默认比较精度
pub const DEFAULT_PRECISION: f64 = 1e-3;

/// 广义状态
///
/// `position` / `velocity` 长度必须等于模型自由度数，`force` 长度不限。
#[derive(Debug, Clone, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct State {
    pub time_sec: i64,
    pub time_usec: i64,
    pub position: Vec<f64>,
    pub velocity: Vec<f64>,
    pub force: Vec<f64>,
}

impl State {
    /// 创建全零状态
    pub fn new(npos: usize, nvel: usize, nforce: usize) -> Self {
        let mut state = Self::default();
        state.init(npos, nvel, nforce);
        state
    }

    /// 重新分配并清零所有数组和时间戳
    pub fn init(&mut self, npos: usize, nvel: usize, nforce: usize) {
        self.time_sec = 0;
        self.time_usec = 0;
        self.position.clear();
        self.position.resize(npos, 0.0);
        self.velocity.clear();
        self.velocity.resize(nvel, 0.0);
        self.force.clear();
        self.force.resize(nforce, 0.0);
    }

    /// 设置采集时间
    pub fn with_time(mut self, sec: i64, usec: i64) -> Self {
        self.time_sec = sec;
        self.time_usec = usec;
        self
    }

    /// 按 `flags` 选择的字段比较两个状态
    ///
    /// 数组逐元素比较 `|a − b| ≤ precision`，长度不同视为不等；
    /// 时间戳精确比较。
    ///
    /// ```
    /// use jspace_model::{CompareFlags, State};
    ///
    /// let a = State::new(2, 2, 0).with_time(1, 0);
    /// let b = State::new(2, 2, 0).with_time(2, 0);
    /// assert!(a.equal(&b, CompareFlags::default(), 1e-3));
    /// assert!(!a.equal(&b, CompareFlags::default() | CompareFlags::ACQUISITION_TIME, 1e-3));
    /// ```
    pub fn equal(&self, rhs: &State, flags: CompareFlags, precision: f64) -> bool {
        if std::ptr::eq(self, rhs) {
            return true;
        }
        if flags.contains(CompareFlags::ACQUISITION_TIME)
            && (self.time_sec != rhs.time_sec || self.time_usec != rhs.time_usec)
        {
            return false;
        }
        if flags.contains(CompareFlags::POSITION)
            && !compare_slices(&self.position, &rhs.position, precision)
        {
            return false;
        }
        if flags.contains(CompareFlags::VELOCITY)
            && !compare_slices(&self.velocity, &rhs.velocity, precision)
        {
            return false;
        }
        if flags.contains(CompareFlags::FORCE)
            && !compare_slices(&self.force, &rhs.force, precision)
        {
            return false;
        }
        true
    }

    /// 以默认标志和精度比较（位置 + 速度，1e-3）
    pub fn equal_default(&self, rhs: &State) -> bool {
        self.equal(rhs, CompareFlags::default(), DEFAULT_PRECISION)
    }
}

fn compare_slices(lhs: &[f64], rhs: &[f64], precision: f64) -> bool {
    lhs.len() == rhs.len()
        && lhs
            .iter()
            .zip(rhs)
            .all(|(a, b)| (a - b).abs() <= precision)
}
