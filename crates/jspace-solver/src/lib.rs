//! # jspace-solver
//!
//! 刚体求解器层：
//!
//! - [`RigidBodySolver`]：模型层消费的求解器能力接口
//! - [`RecursiveSolver`]：基于 RNEA / ABA 的内置实现
//! - [`spatial`]：Featherstone 空间代数辅助函数
//!
//! ## 示例
//!
//! ```
//! use jspace_solver::{EARTH_GRAVITY, RecursiveSolver, RigidBodySolver};
//! use jspace_tree::{NodeIndex, library};
//! use nalgebra::Vector3;
//!
//! let mut solver = RecursiveSolver::new(library::unit_mass_rr())?;
//! solver.run_inverse_dynamics(&Vector3::from(EARTH_GRAVITY))?;
//! assert!(solver.torque(NodeIndex(1)) > 0.0);
//! # Ok::<(), jspace_solver::SolverError>(())
//! ```

pub mod error;
pub mod frame;
pub mod recursive;
pub mod solver;
pub mod spatial;

pub use error::SolverError;
pub use frame::{JacobianColumn, RawFrame};
pub use recursive::RecursiveSolver;
pub use solver::{EARTH_GRAVITY, RigidBodySolver};
