//! 集成测试共享工具

#![allow(dead_code)]

use std::f64::consts::PI;

use jspace_model::{Model, State};
use jspace_tree::RigidBodyTree;

/// 从 −π 到 π（含）以 2π/7 为步长扫描
pub fn angle_sweep() -> Vec<f64> {
    (0..=7).map(|k| -PI + k as f64 * 2.0 * PI / 7.0).collect()
}

/// 构造位置 / 速度状态
pub fn state(position: &[f64], velocity: &[f64]) -> State {
    let mut state = State::new(position.len(), velocity.len(), 0);
    state.position.copy_from_slice(position);
    state.velocity.copy_from_slice(velocity);
    state
}

/// 零速度状态
pub fn at(position: &[f64]) -> State {
    state(position, &vec![0.0; position.len()])
}

/// KGM + CC 双树模型
pub fn model_with_cc(build: fn() -> RigidBodyTree) -> Model {
    Model::new(build(), Some(build())).expect("library trees are valid")
}

/// 只有 KGM 树的模型
pub fn model(build: fn() -> RigidBodyTree) -> Model {
    Model::new(build(), None).expect("library trees are valid")
}

/// 断言两个标量在容差内相等
#[track_caller]
pub fn assert_close(actual: f64, expected: f64, tol: f64, what: &str) {
    assert!(
        (actual - expected).abs() <= tol,
        "{}: expected {}, got {} (tol {})",
        what,
        expected,
        actual,
        tol
    );
}
