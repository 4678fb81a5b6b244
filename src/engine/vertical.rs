// ==========================================
// 钢结构BIM施工分析系统 - 竖向构件判定引擎
// ==========================================
// 职责: 判定装配体为竖向(柱类)或横向(梁类)
// ==========================================
// 规则(全部满足才判竖向):
// (a) 装配体总重 ≥ 重量阈值
// (b) 主构件截面含重型型钢族标记
// (c) 主构件几何高程差 > 高程差阈值
// (a)/(b) 不满足时短路返回, 不计算 (c)
// ==========================================

use crate::domain::{Assembly, ElementRecord};
use crate::extractor::PropertyResolver;
use crate::model::{ModelElement, PropertyGroup};

/// 重型型钢族标记(柱类候选截面)
const HEAVY_PROFILE_TOKENS: [&str; 10] = [
    "HEA", "HEB", "HEM", "HD", "SHS", "RHS", "TUB", "IPE", "UPN", "W",
];

// ==========================================
// VerticalClassifier - 竖向构件判定引擎
// ==========================================
pub struct VerticalClassifier {
    weight_threshold_kg: f64,
    rise_threshold_mm: f64,
    resolver: PropertyResolver,
}

impl VerticalClassifier {
    /// 构造函数
    ///
    /// # 参数
    /// - `weight_threshold_kg`: 竖向最小装配体重量
    /// - `rise_threshold_mm`: 竖向最小高程差
    /// - `steel_density_kg_m3`: 解析器密度(与提取层一致)
    pub fn new(weight_threshold_kg: f64, rise_threshold_mm: f64, steel_density_kg_m3: f64) -> Self {
        Self {
            weight_threshold_kg,
            rise_threshold_mm,
            resolver: PropertyResolver::new(steel_density_kg_m3),
        }
    }

    /// 判定装配体是否为竖向构件
    ///
    /// # 参数
    /// - `assembly`: 待判定装配体
    /// - `elements`: 构件记录批次(主构件属性组快照来源)
    pub fn is_vertical(&self, assembly: &Assembly, elements: &[ElementRecord]) -> bool {
        // (a) 重量门槛
        if assembly.total_weight_kg < self.weight_threshold_kg {
            return false;
        }

        // (b) 重型截面门槛
        let profile = assembly.master_profile.to_uppercase();
        if !HEAVY_PROFILE_TOKENS.iter().any(|t| profile.contains(t)) {
            return false;
        }

        // (c) 几何高程差(懒计算, 仅在 a/b 通过后)
        let rise = self.master_rise_mm(assembly, elements);
        rise > self.rise_threshold_mm
    }

    /// 主构件几何高程差(基于保留的属性组快照)
    fn master_rise_mm(&self, assembly: &Assembly, elements: &[ElementRecord]) -> f64 {
        let master = match elements.get(assembly.master_index) {
            Some(m) => m,
            None => return 0.0,
        };
        self.resolver
            .geometric_rise_mm(&snapshot_view(master.element_id, &master.property_groups))
    }
}

/// 属性解析器工作在 ModelElement 视图上; 记录快照借此复用同一套解析规则
fn snapshot_view(element_id: i64, groups: &[PropertyGroup]) -> ModelElement {
    ModelElement {
        element_id,
        ifc_class: String::new(),
        name: None,
        description: None,
        object_type: None,
        property_groups: groups.to_vec(),
        placement_z_mm: None,
    }
}
