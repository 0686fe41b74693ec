//! Model 性能基准测试
//!
//! 一个控制周期的完整代价：状态推入 + 正运动学 + 四项动力学（其中质量矩阵和逆质量矩阵各 N 次遍历）。

use criterion::{Criterion, black_box, criterion_group, criterion_main};
use jspace_model::{Model, State};
use jspace_tree::library;

fn puma_state() -> State {
    let mut state = State::new(6, 6, 0);
    state.position = vec![0.3, -0.7, 1.2, 0.05, -0.4, 2.0];
    state.velocity = vec![0.5, -0.1, 0.8, -1.5, 0.2, 0.0];
    state
}

fn bench_full_update(c: &mut Criterion) {
    let mut model = Model::new(library::puma(), Some(library::puma())).unwrap();
    let state = puma_state();

    c.bench_function("model_update_puma", |b| {
        b.iter(|| {
            model.update(black_box(&state)).unwrap();
        })
    });
}

fn bench_mass_inertia(c: &mut Criterion) {
    let mut model = Model::new(library::puma(), None).unwrap();
    model.set_state(&puma_state()).unwrap();

    c.bench_function("model_mass_inertia_puma", |b| {
        b.iter(|| {
            model.compute_mass_inertia().unwrap();
        })
    });
}

fn bench_inverse_mass_inertia(c: &mut Criterion) {
    let mut model = Model::new(library::puma(), None).unwrap();
    model.set_state(&puma_state()).unwrap();

    c.bench_function("model_inverse_mass_inertia_puma", |b| {
        b.iter(|| {
            model.compute_inverse_mass_inertia().unwrap();
        })
    });
}

fn bench_jacobian(c: &mut Criterion) {
    let mut model = Model::new(library::puma(), None).unwrap();
    model.set_state(&puma_state()).unwrap();
    model.update_kinematics().unwrap();
    let ee = model.node_by_name("end-effector").unwrap();

    c.bench_function("model_jacobian_puma", |b| {
        b.iter(|| black_box(model.compute_jacobian(black_box(ee)).unwrap()))
    });
}

criterion_group!(
    benches,
    bench_full_update,
    bench_mass_inertia,
    bench_inverse_mass_inertia,
    bench_jacobian
);
criterion_main!(benches);
