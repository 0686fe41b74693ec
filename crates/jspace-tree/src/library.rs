//! 内置机器人模型库
//!
//! 提供测试、基准测试和 CLI 使用的几棵标准树：
//!
//! | 名称 | 自由度 | 说明 |
//! |------|--------|------|
//! | [`puma`] | 6 | PUMA 560 类六轴臂 |
//! | [`unit_mass_rr`] | 2 | 单位质量点平面 RR 臂（杆长 1） |
//! | [`unit_inertia_rr`] | 2 | 单位质量 + 单位惯量 RR 臂 |
//! | [`unit_mass_5r`] | 5 | 单位质量平面 5R 链 |
//! | [`unit_mass_rp`] | 2 | 转动 + 移动 RP 臂 |
//!
//! 所有模型根节点 ID 为 -1，子节点 ID 按链顺序从 0 开始。

use std::f64::consts::FRAC_PI_2;

use nalgebra::Vector3;

use crate::joint::{Axis, JointKind};
use crate::tree::{LinkInertia, NodeIndex, NodeSpec, RigidBodyTree};

/// 按顺序把节点串成一条链
fn chain(root_name: &str, specs: impl IntoIterator<Item = NodeSpec>) -> RigidBodyTree {
    let mut tree = RigidBodyTree::new(root_name);
    let mut parent = NodeIndex::ROOT;
    for spec in specs {
        // 父节点总是刚插入的节点，不会越界
        parent = match tree.add_node(parent, spec) {
            Ok(index) => index,
            Err(_) => unreachable!("chain parent is always the last inserted node"),
        };
    }
    tree
}

/// PUMA 560 类六轴臂
///
/// 六个绕 Z 轴的转动关节，关节限位 ±0.1 rad。
pub fn puma() -> RigidBodyTree {
    let x = Vector3::x();
    chain(
        "base",
        [
            NodeSpec::new(0, JointKind::revolute(Axis::Z))
                .link_name("base")
                .joint_name("shoulder-yaw")
                .inertia(LinkInertia::diagonal(34.40, Vector3::zeros(), 0.0, 0.0, 1.49)),
            NodeSpec::new(1, JointKind::revolute(Axis::Z))
                .link_name("upper_arm")
                .joint_name("shoulder-pitch")
                .translation(Vector3::new(0.0, 0.2435, 0.0))
                .rotation(x, -FRAC_PI_2)
                .inertia(LinkInertia::diagonal(
                    17.40,
                    Vector3::new(0.068, 0.006, -0.016),
                    0.13,
                    0.524,
                    5.249,
                )),
            NodeSpec::new(2, JointKind::revolute(Axis::Z))
                .link_name("lower_arm")
                .joint_name("elbow")
                .translation(Vector3::new(0.4318, 0.0, -0.0934))
                .inertia(LinkInertia::diagonal(
                    6.04,
                    Vector3::new(0.0, -0.143, 0.014),
                    0.192,
                    0.0154,
                    1.042,
                )),
            NodeSpec::new(3, JointKind::revolute(Axis::Z))
                .link_name("wrist-hand")
                .joint_name("wrist-roll1")
                .translation(Vector3::new(-0.0203, -0.4331, 0.0))
                .rotation(x, FRAC_PI_2)
                .inertia(LinkInertia::diagonal(
                    0.82,
                    Vector3::new(0.0, 0.0, -0.019),
                    0.0018,
                    0.0018,
                    0.2013,
                )),
            NodeSpec::new(4, JointKind::revolute(Axis::Z))
                .link_name("wrist-finger")
                .joint_name("wrist-pitch")
                .rotation(x, -FRAC_PI_2)
                .inertia(LinkInertia::diagonal(0.34, Vector3::zeros(), 0.0003, 0.0003, 0.1794)),
            NodeSpec::new(5, JointKind::revolute(Axis::Z))
                .link_name("end-effector")
                .joint_name("wrist-roll2")
                .rotation(x, FRAC_PI_2)
                .inertia(LinkInertia::diagonal(
                    0.09,
                    Vector3::new(0.0, 0.0, 0.032),
                    0.00015,
                    0.00015,
                    0.19304,
                )),
        ]
        .into_iter()
        .map(|spec| spec.limits(-0.1, 0.1)),
    )
}

/// 平面 RR 臂：两个绕 X 轴的转动关节，质量集中在杆端
///
/// 末端位置（节点 1 坐标系中的 `(0, 1, 0)`）为
/// `(0, cos q1 + cos(q1+q2), sin q1 + sin(q1+q2))`。
pub fn unit_mass_rr() -> RigidBodyTree {
    let com = Vector3::new(0.0, 1.0, 0.0);
    chain(
        "base",
        [
            NodeSpec::new(0, JointKind::revolute(Axis::X))
                .link_name("link1")
                .joint_name("joint1")
                .inertia(LinkInertia::diagonal(1.0, com, 0.0, 0.0, 0.0)),
            NodeSpec::new(1, JointKind::revolute(Axis::X))
                .link_name("link2")
                .joint_name("joint2")
                .translation(com)
                .inertia(LinkInertia::diagonal(1.0, com, 0.0, 0.0, 0.0)),
        ],
    )
}

/// 与 [`unit_mass_rr`] 相同，但连杆带单位转动惯量，第二个关节位于 `(0, 2, 0)`
pub fn unit_inertia_rr() -> RigidBodyTree {
    let com = Vector3::new(0.0, 1.0, 0.0);
    chain(
        "base",
        [
            NodeSpec::new(0, JointKind::revolute(Axis::X))
                .link_name("link1")
                .joint_name("joint1")
                .inertia(LinkInertia::diagonal(1.0, com, 1.0, 1.0, 1.0)),
            NodeSpec::new(1, JointKind::revolute(Axis::X))
                .link_name("link2")
                .joint_name("joint2")
                .translation(Vector3::new(0.0, 2.0, 0.0))
                .inertia(LinkInertia::diagonal(1.0, com, 1.0, 1.0, 1.0)),
        ],
    )
}

/// 平面 5R 链：五个绕 Z 轴的转动关节，每节单位质量、杆长 1
pub fn unit_mass_5r() -> RigidBodyTree {
    let com = Vector3::new(1.0, 0.0, 0.0);
    chain(
        "base",
        (0..5).map(|i| {
            let offset = if i == 0 {
                Vector3::new(0.0, 0.0, 2.0)
            } else {
                com
            };
            NodeSpec::new(i, JointKind::revolute(Axis::Z))
                .link_name(format!("link{}", i + 1))
                .joint_name(format!("joint{}", i + 1))
                .translation(offset)
                .inertia(LinkInertia::diagonal(1.0, com, 0.0, 0.0, 0.0))
        }),
    )
}

/// RP 臂：绕 X 轴转动 + 沿 Z 轴移动
///
/// 节点 1 原点位于 `(0, cos q1 − q2 sin q1, sin q1 + q2 cos q1)`。
pub fn unit_mass_rp() -> RigidBodyTree {
    chain(
        "base",
        [
            NodeSpec::new(0, JointKind::revolute(Axis::X))
                .link_name("link1")
                .joint_name("joint1")
                .inertia(LinkInertia::diagonal(
                    1.0,
                    Vector3::new(0.0, 1.0, 0.0),
                    0.0,
                    0.0,
                    0.0,
                )),
            NodeSpec::new(1, JointKind::prismatic(Axis::Z))
                .link_name("link2")
                .joint_name("joint2")
                .translation(Vector3::new(0.0, 1.0, 0.0))
                .inertia(LinkInertia::diagonal(1.0, Vector3::zeros(), 0.0, 0.0, 0.0)),
        ],
    )
}
