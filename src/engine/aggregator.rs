// ==========================================
// 钢结构BIM施工分析系统 - 量值聚合引擎
// ==========================================
// 职责: 按组合键归并构件并求和重量/派生量值
// 用途: 5D 成本与 6D 碳足迹共用同一聚合模式,
//       仅单价表/量值字段不同
// ==========================================
// 输出排序: (类别章节顺序, 派生量值降序)
// ==========================================

use crate::domain::{Category, ElementRecord};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

// ==========================================
// AggregationKey - 聚合组合键
// ==========================================
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct AggregationKey {
    pub category: Category,
    pub tag: String,
    pub profile: String,
}

/// 默认组合键: (类别, 零件编号, 截面)
pub fn default_key(element: &ElementRecord) -> AggregationKey {
    AggregationKey {
        category: element.category,
        tag: element.tag.clone(),
        profile: element.profile_name.clone(),
    }
}

// ==========================================
// Measure - 单构件量值
// ==========================================
#[derive(Debug, Clone, Copy)]
pub struct Measure {
    pub quantity: f64,   // 派生量值(成本 EUR / 碳足迹 kgCO2e)
    pub unit_value: f64, // 单位值(单价 / 排放因子)
}

// ==========================================
// AggregateRow - 聚合行
// ==========================================
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AggregateRow {
    pub category: Category,
    pub tag: String,
    pub profile: String,
    pub units: usize,    // 构件数
    pub weight_kg: f64,  // 重量合计
    pub quantity: f64,   // 派生量值合计
    pub unit_value: f64, // 组内单位值(同键一致)
}

// ==========================================
// QuantityAggregator - 量值聚合引擎
// ==========================================
pub struct QuantityAggregator;

impl QuantityAggregator {
    pub fn new() -> Self {
        Self
    }

    /// 聚合构件为分组行
    ///
    /// # 参数
    /// - `elements`: 构件记录批次
    /// - `key_fn`: 组合键函数
    /// - `measure_fn`: 量值函数; 返回 None 的构件被跳过
    ///   (如 6D 中排放因子 ≤ 0 的紧固件)
    ///
    /// # 返回
    /// 按 (类别, 量值降序) 排序的聚合行
    pub fn aggregate<K, M>(
        &self,
        elements: &[ElementRecord],
        key_fn: K,
        measure_fn: M,
    ) -> Vec<AggregateRow>
    where
        K: Fn(&ElementRecord) -> AggregationKey,
        M: Fn(&ElementRecord) -> Option<Measure>,
    {
        let mut groups: HashMap<AggregationKey, AggregateRow> = HashMap::new();

        for element in elements {
            let measure = match measure_fn(element) {
                Some(m) => m,
                None => continue,
            };

            let key = key_fn(element);
            let row = groups.entry(key.clone()).or_insert_with(|| AggregateRow {
                category: key.category,
                tag: key.tag,
                profile: key.profile,
                units: 0,
                weight_kg: 0.0,
                quantity: 0.0,
                unit_value: measure.unit_value,
            });

            row.units += 1;
            row.weight_kg += element.weight_kg;
            row.quantity += measure.quantity;
        }

        let mut rows: Vec<AggregateRow> = groups.into_values().collect();
        rows.sort_by(|a, b| {
            a.category
                .cmp(&b.category)
                .then(b.quantity.total_cmp(&a.quantity))
                .then(a.tag.cmp(&b.tag))
        });
        rows
    }

    /// 按类别汇总章节合计(报表摘要用)
    pub fn chapter_totals(&self, rows: &[AggregateRow]) -> Vec<(Category, f64)> {
        let mut order: Vec<Category> = Vec::new();
        let mut totals: HashMap<Category, f64> = HashMap::new();
        for row in rows {
            if !totals.contains_key(&row.category) {
                order.push(row.category);
            }
            *totals.entry(row.category).or_default() += row.quantity;
        }
        order
            .into_iter()
            .map(|c| (c, totals[&c]))
            .collect()
    }
}

impl Default for QuantityAggregator {
    fn default() -> Self {
        Self::new()
    }
}
