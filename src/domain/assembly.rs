// ==========================================
// 钢结构BIM施工分析系统 - 装配体模型
// ==========================================
// 职责: 合并后的装配体(吊装单元)及其排程派生字段
// 生命周期: 合并引擎创建, 单次运行内有效, 不持久化
// ==========================================

use crate::domain::types::{Category, Orientation};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

// ==========================================
// Assembly - 装配体
// ==========================================
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Assembly {
    pub assembly_mark: String,   // 装配体编号(批次内唯一键)
    pub total_weight_kg: f64,    // 成员净重之和
    pub min_elevation_mm: f64,   // 成员最低高程

    // 主构件(最重成员, 权重相同时取先见者)
    pub master_index: usize,         // 主构件在批次中的下标
    pub master_profile: String,      // 装配体截面文本(继承自主构件)
    pub master_category: Category,   // 装配体类别(继承自主构件)

    // 成员下标(按重量降序重排一次, 首位即主构件)
    pub members: Vec<usize>,

    // ===== 排程派生字段(排程引擎写入) =====
    pub orientation: Option<Orientation>,   // 竖向/横向
    pub snapped_elevation_mm: Option<f64>,  // 吸附后高程
    pub phase_label: Option<String>,        // 阶段标签
    pub scheduled_date: Option<NaiveDate>,  // 计划安装日期
}

impl Assembly {
    /// 排程是否已完成(阶段标签与日期齐备)
    pub fn is_scheduled(&self) -> bool {
        self.phase_label.is_some() && self.scheduled_date.is_some()
    }
}
