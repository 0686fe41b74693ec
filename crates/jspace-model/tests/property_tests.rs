//! 属性测试（proptest）
//!
//! 覆盖质量矩阵的对称正定性、逆矩阵一致性、动力学方程分解、压缩存储往返和自由度枚举。

mod common;

use common::{model, model_with_cc, state};
use jspace_model::triangular::packed_len;
use jspace_model::{Model, PackedSymmetric, RigidBodySolver, EARTH_GRAVITY, RecursiveSolver};
use jspace_tree::{Axis, JointKind, LinkInertia, NodeIndex, NodeSpec, RigidBodyTree, library};
use nalgebra::{DMatrix, DVector, Vector3};
use proptest::prelude::*;

fn joint_angles(n: usize) -> impl Strategy<Value = Vec<f64>> {
    prop::collection::vec(-std::f64::consts::PI..std::f64::consts::PI, n)
}

/// 随机单链：每节随机选择转动 / 移动关节和轴向，质量为正
fn random_chain() -> impl Strategy<Value = RigidBodyTree> {
    prop::collection::vec((any::<bool>(), 0usize..3, 0.1f64..5.0), 1..8).prop_map(|links| {
        let mut tree = RigidBodyTree::new("base");
        let mut parent = NodeIndex::ROOT;
        for (i, (revolute, axis, mass)) in links.into_iter().enumerate() {
            let axis = [Axis::X, Axis::Y, Axis::Z][axis];
            let joint = if revolute {
                JointKind::revolute(axis)
            } else {
                JointKind::prismatic(axis)
            };
            let spec = NodeSpec::new(i as i32, joint)
                .translation(Vector3::new(0.3, 0.1, 0.2))
                .inertia(LinkInertia::diagonal(
                    mass,
                    Vector3::new(0.1, 0.05, 0.0),
                    0.01,
                    0.02,
                    0.03,
                ));
            parent = tree.add_node(parent, spec).unwrap();
        }
        tree
    })
}

proptest! {
    /// 质量矩阵对称且对角元为正（Cholesky 分解成功即正定）
    #[test]
    fn prop_puma_mass_matrix_positive_definite(q in joint_angles(6)) {
        let mut model = model(library::puma);
        model.update(&state(&q, &[0.0; 6])).unwrap();
        let a = model.mass_inertia().unwrap();

        prop_assert!((&a - a.transpose()).abs().max() == 0.0);
        for i in 0..6 {
            prop_assert!(a[(i, i)] > 0.0, "A[{}, {}] = {}", i, i, a[(i, i)]);
        }
        prop_assert!(a.clone().cholesky().is_some());
    }

    /// A · A⁻¹ = I
    #[test]
    fn prop_puma_inverse_mass_matrix(q in joint_angles(6)) {
        let mut model = model(library::puma);
        model.update(&state(&q, &[0.0; 6])).unwrap();
        let a = model.mass_inertia().unwrap();
        let a_inv = model.inverse_mass_inertia().unwrap();
        let error = (&a * &a_inv - DMatrix::<f64>::identity(6, 6)).abs().max();
        prop_assert!(error < 1e-3, "|A·A⁻¹ − I| = {}", error);
    }

    /// τ = A(q)q̈ + c(q, q̇) + g(q) 与完整逆动力学一致
    #[test]
    fn prop_puma_decomposition_matches_inverse_dynamics(
        q in joint_angles(6),
        qd in prop::collection::vec(-2.0f64..2.0, 6),
        qdd in prop::collection::vec(-3.0f64..3.0, 6),
    ) {
        let mut model = model_with_cc(library::puma);
        model.update(&state(&q, &qd)).unwrap();
        let predicted = model.mass_inertia().unwrap() * DVector::from_column_slice(&qdd)
            + model.coriolis_centrifugal().unwrap()
            + model.gravity().unwrap();

        let mut solver = RecursiveSolver::new(library::puma()).unwrap();
        for k in 0..6 {
            let node = model.node(k).unwrap();
            solver.set_position(node, q[k]);
            solver.set_velocity(node, qd[k]);
            solver.set_acceleration(node, qdd[k]);
        }
        solver.run_inverse_dynamics(&Vector3::from(EARTH_GRAVITY)).unwrap();

        for k in 0..6 {
            let tau = solver.torque(model.node(k).unwrap());
            prop_assert!((predicted[k] - tau).abs() < 1e-6, "joint {}: {} vs {}", k, predicted[k], tau);
        }
    }

    /// 任意单链：N 与枚举一致，质量矩阵对角元为正
    #[test]
    fn prop_random_chain(tree in random_chain(), seed in joint_angles(8)) {
        let n = tree.count_dof(tree.root());
        let mut model = Model::new(tree, None).unwrap();
        prop_assert_eq!(model.ndof(), n);

        model.update(&state(&seed[..n], &vec![0.0; n])).unwrap();
        prop_assert_eq!(model.mass_inertia_packed().unwrap().as_slice().len(), packed_len(n));
        let a = model.mass_inertia().unwrap();
        for i in 0..n {
            prop_assert!(a[(i, i)] > 0.0);
        }
    }

    /// 压缩存储逐位往返
    #[test]
    fn prop_packed_roundtrip(n in 0usize..10, values in prop::collection::vec(-1e6f64..1e6, 100)) {
        let mut dense = DMatrix::<f64>::zeros(n, n);
        for c in 0..n {
            for r in c..n {
                let v = values[r * 10 + c];
                dense[(r, c)] = v;
                dense[(c, r)] = v;
            }
        }
        let packed = PackedSymmetric::from_dense(&dense).unwrap();
        prop_assert_eq!(packed.as_slice().len(), packed_len(n));
        let unpacked = packed.to_dense();
        for (a, b) in dense.iter().zip(unpacked.iter()) {
            prop_assert_eq!(a.to_bits(), b.to_bits());
        }
    }
}
