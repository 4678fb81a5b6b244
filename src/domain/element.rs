// ==========================================
// 钢结构BIM施工分析系统 - 构件记录模型
// ==========================================
// 职责: 提取批次中的构件记录与派生字段存储
// 红线: ElementRecord 提取后不可变; 派生数据
//       (排程/成本/碳足迹)统一写入 DerivedStore,
//       由各阶段逐步填充, 不回写记录本身
// ==========================================

use crate::domain::types::Category;
use crate::model::PropertyGroup;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

// ==========================================
// ElementRecord - 构件记录
// ==========================================
// 生命周期: 提取阶段创建, 单次运行内有效, 运行结束即销毁
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ElementRecord {
    pub element_id: i64,        // 模型元素标识
    pub tag: String,            // 零件编号 (如 p102)
    pub assembly_mark: String,  // 装配体编号 (如 C1, V20)
    pub category: Category,     // 结构类别
    pub weight_kg: f64,         // 净重 (kg)
    pub elevation_mm: f64,      // 底部高程 (mm)
    pub profile_name: String,   // 截面/型号文本
    pub is_fastener: bool,      // 紧固件标记(排除于结构管线)

    // 属性组快照: 竖向判定需要懒取顶/底高程差,
    // 保留快照以避免核心反向依赖模型句柄
    pub property_groups: Vec<PropertyGroup>,
}

// ==========================================
// DerivedFields - 派生字段
// ==========================================
// 各管线阶段逐步写入; 字段名即对外记录契约
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DerivedFields {
    // 4D 排程 (传播器写入)
    pub scheduled_date: Option<NaiveDate>,
    pub phase_label: Option<String>,

    // 5D 成本 (成本派生写入)
    pub cost_eur: Option<f64>,
    pub unit_rate_eur_kg: Option<f64>,

    // 6D 碳足迹 (排放派生写入)
    pub footprint_kgco2: Option<f64>,
    pub impact_factor: Option<f64>,
}

// ==========================================
// DerivedStore - 派生字段存储
// ==========================================
// element_id → DerivedFields, 单次运行独占所有权
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DerivedStore {
    fields: HashMap<i64, DerivedFields>,
}

impl DerivedStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// 读取构件的派生字段(未写入时返回 None)
    pub fn get(&self, element_id: i64) -> Option<&DerivedFields> {
        self.fields.get(&element_id)
    }

    /// 可写入口(不存在时创建默认条目)
    pub fn entry(&mut self, element_id: i64) -> &mut DerivedFields {
        self.fields.entry(element_id).or_default()
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}
