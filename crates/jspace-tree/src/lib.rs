//! # jspace-tree
//!
//! 关节空间动力学模型的树结构层：
//!
//! - [`RigidBodyTree`]：Arena 存储的刚体树（根节点索引 0）
//! - [`JointKind`]：关节类型（转动 / 移动 / 球 / 固定）
//! - [`Enumeration`]：前序深度优先的自由度枚举与名称索引
//! - [`library`]：内置机器人模型
//!
//! ## 示例
//!
//! ```
//! use jspace_tree::{Enumeration, library};
//!
//! let tree = library::puma();
//! let dofs = Enumeration::new(&tree)?;
//! assert_eq!(dofs.ndof(), 6);
//! # Ok::<(), jspace_tree::TreeError>(())
//! ```

pub mod enumerate;
pub mod error;
pub mod joint;
pub mod library;
pub mod tree;

pub use enumerate::Enumeration;
pub use error::TreeError;
pub use joint::{Axis, JointKind, JointLimits};
pub use tree::{LinkInertia, Node, NodeIndex, NodeSpec, RigidBodyTree};
