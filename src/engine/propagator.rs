// ==========================================
// 钢结构BIM施工分析系统 - 排程传播器
// ==========================================
// 职责: 装配体级排程结果下发到每个成员构件
// 输出: DerivedStore 中每个成员的计划日期与阶段标签
// ==========================================
// 用途: 下游按构件消费(成本/碳足迹/元数据回写)
// 无需再做装配体级关联
// ==========================================

use crate::domain::{Assembly, DerivedStore, ElementRecord};
use tracing::debug;

// ==========================================
// SchedulePropagator - 排程传播器
// ==========================================
pub struct SchedulePropagator;

impl SchedulePropagator {
    pub fn new() -> Self {
        Self
    }

    /// 下发单个装配体的排程信息到成员构件
    pub fn propagate(
        &self,
        assembly: &Assembly,
        elements: &[ElementRecord],
        store: &mut DerivedStore,
    ) {
        for &member_index in &assembly.members {
            let element_id = match elements.get(member_index) {
                Some(e) => e.element_id,
                None => continue,
            };
            let entry = store.entry(element_id);
            entry.scheduled_date = assembly.scheduled_date;
            entry.phase_label = assembly.phase_label.clone();
        }
    }

    /// 批量下发
    pub fn propagate_all(
        &self,
        assemblies: &[Assembly],
        elements: &[ElementRecord],
        store: &mut DerivedStore,
    ) {
        for assembly in assemblies {
            self.propagate(assembly, elements, store);
        }
        debug!(assemblies = assemblies.len(), "传播: 排程信息已下发到构件");
    }
}

impl Default for SchedulePropagator {
    fn default() -> Self {
        Self::new()
    }
}
