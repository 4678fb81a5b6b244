// ==========================================
// 钢结构BIM施工分析系统 - 成本/碳足迹派生引擎
// ==========================================
// 职责: 逐构件计算 5D 成本与 6D 碳足迹并写入 DerivedStore,
//       再经共用聚合引擎产出报表行
// ==========================================
// 6D 口径说明: 碳足迹按报表类别重判 —
// 截面含板类字样强制 PLACA, 紧固件强制 TORNILLERIA;
// 因子 ≤ 0 的构件不进入碳足迹聚合(紧固件因子为 0)
// ==========================================

use crate::config::{CostRates, ImpactFactors};
use crate::domain::{Category, DerivedStore, ElementRecord};
use crate::engine::aggregator::{AggregateRow, AggregationKey, Measure, QuantityAggregator};
use tracing::info;

/// 6D 板类重判字样(与 5D 分类口径刻意不同, 保留既有报表行为)
const FOOTPRINT_PLATE_TOKENS: [&str; 4] = ["PL", "PLATE", "CHAPA", "FLAT"];

// ==========================================
// CostEngine - 5D 成本派生
// ==========================================
pub struct CostEngine {
    rates: CostRates,
}

impl CostEngine {
    pub fn new(rates: CostRates) -> Self {
        Self { rates }
    }

    /// 逐构件计算成本并写入存储
    pub fn derive(&self, elements: &[ElementRecord], store: &mut DerivedStore) {
        for element in elements {
            let rate = self.rates.rate_for(element.category);
            let entry = store.entry(element.element_id);
            entry.unit_rate_eur_kg = Some(rate);
            entry.cost_eur = Some(element.weight_kg * rate);
        }
        info!(elements = elements.len(), "5D: 成本派生完成");
    }

    /// 产出成本聚合行 (类别, 零件编号, 截面)
    pub fn aggregate(&self, elements: &[ElementRecord], store: &DerivedStore) -> Vec<AggregateRow> {
        QuantityAggregator::new().aggregate(
            elements,
            crate::engine::aggregator::default_key,
            |e| {
                if e.weight_kg <= 0.0 {
                    return None;
                }
                let fields = store.get(e.element_id)?;
                Some(Measure {
                    quantity: fields.cost_eur?,
                    unit_value: fields.unit_rate_eur_kg?,
                })
            },
        )
    }
}

// ==========================================
// FootprintEngine - 6D 碳足迹派生
// ==========================================
pub struct FootprintEngine {
    factors: ImpactFactors,
}

/// 碳足迹汇总指标
#[derive(Debug, Clone, Copy)]
pub struct FootprintSummary {
    pub total_tco2: f64,        // 总碳足迹 (tCO2e)
    pub intensity_kgco2_kg: f64, // 强度 (kgCO2e / kg 钢材)
}

impl FootprintEngine {
    pub fn new(factors: ImpactFactors) -> Self {
        Self { factors }
    }

    /// 6D 报表类别重判
    pub fn footprint_category(&self, element: &ElementRecord) -> Category {
        let profile = element.profile_name.to_uppercase();
        if FOOTPRINT_PLATE_TOKENS.iter().any(|t| profile.contains(t)) {
            return Category::Plate;
        }
        if element.is_fastener || element.category == Category::Fastener {
            return Category::Fastener;
        }
        element.category
    }

    /// 逐构件计算碳足迹并写入存储
    pub fn derive(&self, elements: &[ElementRecord], store: &mut DerivedStore) {
        for element in elements {
            let category = self.footprint_category(element);
            let factor = self.factors.factor_for(category);
            let entry = store.entry(element.element_id);
            entry.impact_factor = Some(factor);
            entry.footprint_kgco2 = Some(element.weight_kg * factor);
        }
        info!(elements = elements.len(), "6D: 碳足迹派生完成");
    }

    /// 产出碳足迹聚合行(因子 ≤ 0 的构件跳过)
    pub fn aggregate(&self, elements: &[ElementRecord], store: &DerivedStore) -> Vec<AggregateRow> {
        QuantityAggregator::new().aggregate(
            elements,
            |e| AggregationKey {
                category: self.footprint_category(e),
                tag: e.tag.clone(),
                profile: e.profile_name.clone(),
            },
            |e| {
                let fields = store.get(e.element_id)?;
                let factor = fields.impact_factor?;
                if factor <= 0.0 {
                    return None;
                }
                Some(Measure {
                    quantity: fields.footprint_kgco2?,
                    unit_value: factor,
                })
            },
        )
    }

    /// 汇总指标: 总量与强度
    pub fn summarize(&self, rows: &[AggregateRow]) -> FootprintSummary {
        let total_kgco2: f64 = rows.iter().map(|r| r.quantity).sum();
        let total_weight_kg: f64 = rows.iter().map(|r| r.weight_kg).sum();
        let intensity = if total_weight_kg > 0.0 {
            total_kgco2 / total_weight_kg
        } else {
            0.0
        };
        FootprintSummary {
            total_tco2: total_kgco2 / 1000.0,
            intensity_kgco2_kg: intensity,
        }
    }
}
