//! 动力学量：重力、科氏力 / 离心力、质量矩阵及其逆
//!
//! 利用关节空间动力学方程 `τ = A(q)q̈ + c(q, q̇) + g(q)` 的分解：
//!
//! | 计算 | 树 | q̇ | q̈ / τ | 重力 | 结果 |
//! |------|----|----|--------|------|------|
//! | 重力 | KGM | 0 | q̈ = 0 | g | `g(q)` |
//! | 科氏力 | CC | q̇ | q̈ = 0 | 0 | `c(q, q̇)` |
//! | 质量矩阵第 r 列 | KGM | 0 | q̈ = e_r | 0 | `A·e_r` |
//! | 逆质量矩阵第 r 列 | KGM | 0 | τ = e_r | 0 | `A⁻¹·e_r` |
//!
//! 每列一次递归遍历，质量矩阵与逆质量矩阵总代价均为 O(N²)。

use jspace_solver::RigidBodySolver;
use nalgebra::{DMatrix, DVector, Vector3};
use tracing::{debug, trace};

use super::{Model, Phase};
use crate::error::{ModelError, Quantity};
use crate::triangular::PackedSymmetric;

impl<S: RigidBodySolver> Model<S> {
    /// 依次计算重力、科氏力、质量矩阵、逆质量矩阵
    pub fn update_dynamics(&mut self) -> Result<(), ModelError> {
        self.compute_gravity()?;
        self.compute_coriolis_centrifugal()?;
        self.compute_mass_inertia()?;
        self.compute_inverse_mass_inertia()?;
        if self.phase >= Phase::KinematicsValid {
            self.phase = Phase::DynamicsValid;
        }
        Ok(())
    }

    // ==================== 重力 ====================

    /// 在 KGM 树上做一次带重力的逆动力学
    pub fn compute_gravity(&mut self) -> Result<(), ModelError> {
        self.require_state()?;
        self.kgm.run_inverse_dynamics(&self.gravity)?;
        let torque = DVector::from_iterator(
            self.ndof(),
            self.dofs.nodes().iter().map(|&node| self.kgm.torque(node)),
        );
        trace!("gravity torque: {:?}", torque.as_slice());
        self.g_torque = Some(torque);
        Ok(())
    }

    /// 重力补偿力矩（已屏蔽关闭的自由度）
    pub fn gravity(&self) -> Result<DVector<f64>, ModelError> {
        let mut torque = self
            .g_torque
            .clone()
            .ok_or(ModelError::NotComputed(Quantity::Gravity))?;
        for &index in &self.gravity_disabled {
            torque[index] = 0.0;
        }
        Ok(torque)
    }

    /// 打开 / 关闭某个自由度的重力补偿
    ///
    /// 只影响 [`gravity`](Self::gravity) 的读取结果，缓存的力矩不变。
    /// 返回该自由度之前是否处于关闭状态；越界索引不做任何事并返回 `true`。
    pub fn disable_gravity_compensation(&mut self, index: usize, disable: bool) -> bool {
        if index >= self.ndof() {
            debug!(
                "ignoring gravity compensation toggle for DOF {} (ndof = {})",
                index,
                self.ndof()
            );
            return true;
        }
        if disable {
            !self.gravity_disabled.insert(index)
        } else {
            self.gravity_disabled.remove(&index)
        }
    }

    /// 某个自由度的重力补偿是否被关闭
    pub fn is_gravity_compensation_disabled(&self, index: usize) -> bool {
        self.gravity_disabled.contains(&index)
    }

    // ==================== 科氏力 / 离心力 ====================

    /// 在 CC 树上做一次零重力逆动力学；没有 CC 树时什么也不做
    pub fn compute_coriolis_centrifugal(&mut self) -> Result<(), ModelError> {
        self.require_state()?;
        let Some(cc) = self.cc.as_mut() else {
            trace!("no CC tree, skipping Coriolis/centrifugal");
            return Ok(());
        };

        cc.run_inverse_dynamics(&Vector3::zeros())?;
        let torque = DVector::from_iterator(
            self.dofs.ndof(),
            self.dofs.nodes().iter().map(|&node| cc.torque(node)),
        );
        self.cc_torque = Some(torque);
        Ok(())
    }

    /// 科氏力 / 离心力矩
    pub fn coriolis_centrifugal(&self) -> Result<DVector<f64>, ModelError> {
        if self.cc.is_none() {
            return Err(ModelError::NoCoriolisTree);
        }
        self.cc_torque
            .clone()
            .ok_or(ModelError::NotComputed(Quantity::CoriolisCentrifugal))
    }

    // ==================== 质量矩阵 ====================

    /// 单位加速度扰动逐列装配质量矩阵
    pub fn compute_mass_inertia(&mut self) -> Result<(), ModelError> {
        self.require_state()?;
        let result = self.assemble_mass_inertia();
        for &node in self.dofs.nodes() {
            self.kgm.set_torque(node, 0.0);
        }
        self.mass = Some(result?);
        Ok(())
    }

    fn assemble_mass_inertia(&mut self) -> Result<PackedSymmetric, ModelError> {
        let ndof = self.ndof();
        let zero_gravity = Vector3::zeros();
        let mut packed = PackedSymmetric::zeros(ndof);

        for r in 0..ndof {
            let driven = self.dofs.nodes()[r];
            self.kgm.set_acceleration(driven, 1.0);
            let pass = self.kgm.run_inverse_dynamics(&zero_gravity);
            self.kgm.set_acceleration(driven, 0.0);
            pass?;

            for (c, &node) in self.dofs.nodes()[..=r].iter().enumerate() {
                packed.set(r, c, self.kgm.torque(node));
            }
        }
        Ok(packed)
    }

    /// 质量矩阵（稠密对称）
    pub fn mass_inertia(&self) -> Result<DMatrix<f64>, ModelError> {
        self.mass_inertia_packed().map(PackedSymmetric::to_dense)
    }

    /// 质量矩阵（压缩三角存储）
    pub fn mass_inertia_packed(&self) -> Result<&PackedSymmetric, ModelError> {
        self.mass
            .as_ref()
            .ok_or(ModelError::NotComputed(Quantity::MassInertia))
    }

    // ==================== 逆质量矩阵 ====================

    /// 单位力矩扰动逐列装配逆质量矩阵
    pub fn compute_inverse_mass_inertia(&mut self) -> Result<(), ModelError> {
        self.require_state()?;
        for &node in self.dofs.nodes() {
            self.kgm.set_torque(node, 0.0);
        }
        let result = self.assemble_inverse_mass_inertia();
        for &node in self.dofs.nodes() {
            self.kgm.set_acceleration(node, 0.0);
        }
        self.inv_mass = Some(result?);
        Ok(())
    }

    fn assemble_inverse_mass_inertia(&mut self) -> Result<PackedSymmetric, ModelError> {
        let ndof = self.ndof();
        let zero_gravity = Vector3::zeros();
        let mut packed = PackedSymmetric::zeros(ndof);

        for r in 0..ndof {
            let driven = self.dofs.nodes()[r];
            self.kgm.set_torque(driven, 1.0);
            let pass = self.kgm.run_forward_dynamics(&zero_gravity);
            self.kgm.set_torque(driven, 0.0);
            pass?;

            for (c, &node) in self.dofs.nodes()[..=r].iter().enumerate() {
                packed.set(r, c, self.kgm.acceleration(node));
            }
        }
        Ok(packed)
    }

    /// 逆质量矩阵（稠密对称）
    pub fn inverse_mass_inertia(&self) -> Result<DMatrix<f64>, ModelError> {
        self.inverse_mass_inertia_packed()
            .map(PackedSymmetric::to_dense)
    }

    pub fn inverse_mass_inertia_packed(&self) -> Result<&PackedSymmetric, ModelError> {
        self.inv_mass
            .as_ref()
            .ok_or(ModelError::NotComputed(Quantity::InverseMassInertia))
    }
}
