// ==========================================
// 钢结构BIM施工分析系统 - 装配体合并引擎
// ==========================================
// 职责: 按装配体编号归并构件为吊装单元
// 输入: 构件记录批次
// 输出: 装配体列表(按编号首见顺序, 此处不做全局排序)
// ==========================================
// 规则:
// 1) 紧固件与 TORNILLERIA 类别构件不参与归并
// 2) 重量求和, 最低高程跟踪
// 3) 成员按重量降序重排一次, 最重者为主构件
//    (同重按先见顺序, 稳定排序保证)
// 4) 装配体截面/类别继承自主构件
// ==========================================

use crate::domain::{Assembly, Category, ElementRecord};
use std::collections::HashMap;
use tracing::info;

// ==========================================
// AssemblyConsolidator - 装配体合并引擎
// ==========================================
pub struct AssemblyConsolidator;

impl AssemblyConsolidator {
    pub fn new() -> Self {
        Self
    }

    /// 归并构件为装配体
    ///
    /// # 参数
    /// - `elements`: 构件记录批次(成员以下标引用该批次)
    ///
    /// # 返回
    /// 装配体列表, 顺序为装配体编号的首见顺序
    pub fn consolidate(&self, elements: &[ElementRecord]) -> Vec<Assembly> {
        let mut order: Vec<String> = Vec::new();
        let mut groups: HashMap<String, Vec<usize>> = HashMap::new();

        for (index, element) in elements.iter().enumerate() {
            if element.is_fastener || element.category == Category::Fastener {
                continue;
            }

            let mark = element.assembly_mark.clone();
            let members = groups.entry(mark.clone()).or_insert_with(|| {
                order.push(mark);
                Vec::new()
            });
            members.push(index);
        }

        let mut assemblies = Vec::with_capacity(order.len());
        for mark in order {
            let mut members = groups.remove(&mark).expect("分组与顺序表一致");

            // 按重量降序重排一次(稳定, 同重保持先见顺序)
            members.sort_by(|a, b| {
                elements[*b]
                    .weight_kg
                    .total_cmp(&elements[*a].weight_kg)
            });

            let total_weight_kg: f64 = members.iter().map(|&i| elements[i].weight_kg).sum();
            let min_elevation_mm = members
                .iter()
                .map(|&i| elements[i].elevation_mm)
                .fold(f64::INFINITY, f64::min);

            let master_index = members[0];
            let master = &elements[master_index];

            assemblies.push(Assembly {
                assembly_mark: mark,
                total_weight_kg,
                min_elevation_mm,
                master_index,
                master_profile: master.profile_name.clone(),
                master_category: master.category,
                members,
                orientation: None,
                snapped_elevation_mm: None,
                phase_label: None,
                scheduled_date: None,
            });
        }

        info!(
            parts = elements.len(),
            assemblies = assemblies.len(),
            "合并: 构件已归并为装配体"
        );
        assemblies
    }
}

impl Default for AssemblyConsolidator {
    fn default() -> Self {
        Self::new()
    }
}
