// ==========================================
// 钢结构BIM施工分析系统 - 配置层
// ==========================================
// 职责: 管线入口的显式配置结构
// 红线: 配置生命周期限于单次运行, 无进程级可变单例
// ==========================================

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::domain::Category;

// ==========================================
// PipelineConfig - 管线配置
// ==========================================
// 起始日期 + 日吊装产能 + 各项可调阈值
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PipelineConfig {
    pub start_date: NaiveDate,            // 开工日期
    pub daily_capacity_kg: f64,           // 日吊装产能 (kg/天)

    // ===== 楼层聚类阈值 =====
    pub cluster_tolerance_mm: f64,        // 聚类间距容差 (mm)
    pub min_cluster_size: usize,          // 楼层最小成员数

    // ===== 竖向构件判定阈值 =====
    pub vertical_weight_threshold_kg: f64, // 竖向最小装配体重量 (kg)
    pub vertical_rise_threshold_mm: f64,   // 竖向最小高程差 (mm)

    // ===== 提取阈值 =====
    pub steel_density_kg_m3: f64,         // 体积兜底换算密度 (kg/m³)
    pub min_weight_epsilon_kg: f64,       // 结构管线最小重量 (kg)
    pub plate_weight_floor_kg: f64,       // 钢板缺重兜底 (kg)
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            start_date: NaiveDate::from_ymd_opt(2024, 1, 1).expect("固定日期有效"),
            daily_capacity_kg: 1500.0,
            cluster_tolerance_mm: 400.0,
            min_cluster_size: 8,
            vertical_weight_threshold_kg: 160.0,
            vertical_rise_threshold_mm: 1800.0,
            steel_density_kg_m3: 7850.0,
            min_weight_epsilon_kg: 0.001,
            plate_weight_floor_kg: 1.0,
        }
    }
}

// ==========================================
// CostRates - 5D 单价表 (EUR/kg)
// ==========================================
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CostRates {
    pub rolled: f64,
    pub plate: f64,
    pub fastener: f64,
    pub grating: f64,
    pub generic: f64,
}

impl Default for CostRates {
    fn default() -> Self {
        Self {
            rolled: 2.65,
            plate: 2.10,
            fastener: 3.50,
            grating: 2.50,
            generic: 2.00,
        }
    }
}

impl CostRates {
    pub fn rate_for(&self, category: Category) -> f64 {
        match category {
            Category::Rolled => self.rolled,
            Category::Plate => self.plate,
            Category::Fastener => self.fastener,
            Category::Grating => self.grating,
            Category::Generic => self.generic,
        }
    }
}

// ==========================================
// ImpactFactors - 6D 排放因子表 (kgCO2e/kg, A1-A3)
// ==========================================
// 紧固件因子为 0: 不计入碳足迹报表
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ImpactFactors {
    pub rolled: f64,
    pub plate: f64,
    pub fastener: f64,
    pub grating: f64,
    pub generic: f64,
}

impl Default for ImpactFactors {
    fn default() -> Self {
        Self {
            rolled: 1.85,
            plate: 2.45,
            fastener: 0.0,
            grating: 2.10,
            generic: 1.50,
        }
    }
}

impl ImpactFactors {
    pub fn factor_for(&self, category: Category) -> f64 {
        match category {
            Category::Rolled => self.rolled,
            Category::Plate => self.plate,
            Category::Fastener => self.fastener,
            Category::Grating => self.grating,
            Category::Generic => self.generic,
        }
    }
}

// ==========================================
// IsoConfig - ISO 19650 管理状态配置
// ==========================================
// 依据: ISO 19650 信息交付状态/适用性
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IsoConfig {
    pub status: String,      // 状态码, 如 S2
    pub suitability: String, // 适用性, 如 Para Información
    pub revision: String,    // 修订号
}

impl Default for IsoConfig {
    fn default() -> Self {
        Self {
            status: "S2".to_string(),
            suitability: "Para Información".to_string(),
            revision: "P01".to_string(),
        }
    }
}
