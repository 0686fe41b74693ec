//! # jspace-model
//!
//! 关节空间运动学 / 动力学模型。
//!
//! 给定广义位置 / 速度状态，计算：
//!
//! - 连杆全局位姿和任意点的 6×N 雅可比
//! - 重力补偿力矩 `g(q)`（支持按自由度屏蔽）
//! - 科氏力 / 离心力矩 `c(q, q̇)`
//! - 质量矩阵 `A(q)` 及其逆（压缩三角存储）
//!
//! ## 快速开始
//!
//! ```
//! use jspace_model::{Model, State};
//! use jspace_tree::library;
//!
//! let mut model = Model::new(library::puma(), Some(library::puma()))?;
//!
//! let mut state = State::new(model.ndof(), model.ndof(), 0);
//! state.position[1] = 0.3;
//! state.velocity[0] = 0.5;
//! model.update(&state)?;
//!
//! let g = model.gravity()?;
//! let c = model.coriolis_centrifugal()?;
//! let a = model.mass_inertia()?;
//! assert_eq!((g.len(), c.len(), a.nrows()), (6, 6, 6));
//! # Ok::<(), jspace_model::ModelError>(())
//! ```
//!
//! ## 线程模型
//!
//! 所有计算都会改写求解器内部的关节状态，因此只能通过 `&mut self` 调用。
//! 并行计算时每个线程持有自己的 `Model`（可 `clone()` 得到）。

pub mod config;
pub mod error;
pub mod model;
pub mod state;
pub mod triangular;

pub use config::ModelConfig;
pub use error::{ConfigError, ModelError, Quantity};
pub use model::{Model, Phase, isometry_from_raw};
pub use state::{CompareFlags, DEFAULT_PRECISION, State};
pub use triangular::PackedSymmetric;

// 便于下游只依赖本 crate
pub use jspace_solver::{EARTH_GRAVITY, RecursiveSolver, RigidBodySolver};
pub use jspace_tree::{NodeIndex, RigidBodyTree};
