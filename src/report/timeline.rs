// ==========================================
// 钢结构BIM施工分析系统 - 4D 时间线报表
// ==========================================
// 职责: 排程后的装配体序列 → 阶段区间行 + 逐日汇总行
// 输入: 已写入日期/阶段标签的装配体(排程输出顺序)
// 输出: 结构化行, 渲染由外部协作方负责
// ==========================================

use crate::domain::Assembly;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

// ==========================================
// PhaseSpan - 阶段区间行
// ==========================================
// 同一阶段标签的装配体汇总为一条甘特条目
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PhaseSpan {
    pub phase: String,             // 阶段标签, 如 NIVEL +4.00m | PILARES
    pub first_date: NaiveDate,     // 阶段内最早计划日期
    pub last_date: NaiveDate,      // 阶段内最晚计划日期
    pub assemblies: usize,         // 装配体数
    pub total_weight_kg: f64,      // 重量合计
}

// ==========================================
// DaySummary - 逐日汇总行
// ==========================================
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DaySummary {
    pub date: NaiveDate,
    pub assemblies: usize,
    pub total_weight_kg: f64,
}

// ==========================================
// ScheduleRow - 逐装配体明细行
// ==========================================
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScheduleRow {
    pub date: NaiveDate,
    pub phase: String,
    pub assembly_mark: String,
    pub master_profile: String,
    pub weight_kg: f64,
}

// ==========================================
// TimelineReport - 时间线报表构建器
// ==========================================
pub struct TimelineReport;

impl TimelineReport {
    pub fn new() -> Self {
        Self
    }

    /// 阶段区间行(保持排程输出的阶段首见顺序)
    pub fn phase_spans(&self, assemblies: &[Assembly]) -> Vec<PhaseSpan> {
        let mut order: Vec<String> = Vec::new();
        let mut spans: HashMap<String, PhaseSpan> = HashMap::new();

        for assembly in assemblies {
            let (phase, date) = match (&assembly.phase_label, assembly.scheduled_date) {
                (Some(p), Some(d)) => (p.clone(), d),
                _ => continue,
            };

            match spans.get_mut(&phase) {
                Some(span) => {
                    span.first_date = span.first_date.min(date);
                    span.last_date = span.last_date.max(date);
                    span.assemblies += 1;
                    span.total_weight_kg += assembly.total_weight_kg;
                }
                None => {
                    order.push(phase.clone());
                    spans.insert(
                        phase.clone(),
                        PhaseSpan {
                            phase,
                            first_date: date,
                            last_date: date,
                            assemblies: 1,
                            total_weight_kg: assembly.total_weight_kg,
                        },
                    );
                }
            }
        }

        order
            .into_iter()
            .filter_map(|p| spans.remove(&p))
            .collect()
    }

    /// 逐日汇总行(日期升序)
    pub fn day_summaries(&self, assemblies: &[Assembly]) -> Vec<DaySummary> {
        let mut days: HashMap<NaiveDate, DaySummary> = HashMap::new();

        for assembly in assemblies {
            let date = match assembly.scheduled_date {
                Some(d) => d,
                None => continue,
            };
            let entry = days.entry(date).or_insert(DaySummary {
                date,
                assemblies: 0,
                total_weight_kg: 0.0,
            });
            entry.assemblies += 1;
            entry.total_weight_kg += assembly.total_weight_kg;
        }

        let mut rows: Vec<DaySummary> = days.into_values().collect();
        rows.sort_by_key(|r| r.date);
        rows
    }

    /// 逐装配体明细行(排程顺序)
    pub fn schedule_rows(&self, assemblies: &[Assembly]) -> Vec<ScheduleRow> {
        assemblies
            .iter()
            .filter_map(|a| {
                Some(ScheduleRow {
                    date: a.scheduled_date?,
                    phase: a.phase_label.clone()?,
                    assembly_mark: a.assembly_mark.clone(),
                    master_profile: a.master_profile.clone(),
                    weight_kg: a.total_weight_kg,
                })
            })
            .collect()
    }
}

impl Default for TimelineReport {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{Category, Orientation};

    fn assembly(mark: &str, phase: &str, day: u32, weight: f64) -> Assembly {
        Assembly {
            assembly_mark: mark.to_string(),
            total_weight_kg: weight,
            min_elevation_mm: 0.0,
            master_index: 0,
            master_profile: "IPE300".to_string(),
            master_category: Category::Rolled,
            members: vec![0],
            orientation: Some(Orientation::Horizontal),
            snapped_elevation_mm: Some(0.0),
            phase_label: Some(phase.to_string()),
            scheduled_date: chrono::NaiveDate::from_ymd_opt(2024, 1, day),
        }
    }

    #[test]
    fn test_phase_spans_keep_schedule_order() {
        let assemblies = vec![
            assembly("C1", "NIVEL +0.00m | PILARES", 1, 500.0),
            assembly("C2", "NIVEL +0.00m | PILARES", 2, 400.0),
            assembly("V1", "NIVEL +0.00m | VIGAS", 3, 300.0),
        ];

        let spans = TimelineReport::new().phase_spans(&assemblies);
        assert_eq!(spans.len(), 2);
        assert_eq!(spans[0].phase, "NIVEL +0.00m | PILARES");
        assert_eq!(spans[0].assemblies, 2);
        assert_eq!(
            spans[0].first_date,
            chrono::NaiveDate::from_ymd_opt(2024, 1, 1).unwrap()
        );
        assert_eq!(
            spans[0].last_date,
            chrono::NaiveDate::from_ymd_opt(2024, 1, 2).unwrap()
        );
        assert!((spans[0].total_weight_kg - 900.0).abs() < 1e-9);
    }

    #[test]
    fn test_day_summaries_sorted_and_summed() {
        let assemblies = vec![
            assembly("V2", "NIVEL +0.00m | VIGAS", 2, 300.0),
            assembly("C1", "NIVEL +0.00m | PILARES", 1, 500.0),
            assembly("C2", "NIVEL +0.00m | PILARES", 1, 400.0),
        ];

        let days = TimelineReport::new().day_summaries(&assemblies);
        assert_eq!(days.len(), 2);
        assert_eq!(days[0].assemblies, 2);
        assert!((days[0].total_weight_kg - 900.0).abs() < 1e-9);
        assert!(days[0].date < days[1].date);
    }

    #[test]
    fn test_unscheduled_assembly_skipped() {
        let mut orphan = assembly("X1", "NIVEL +0.00m | VIGAS", 1, 100.0);
        orphan.scheduled_date = None;

        let report = TimelineReport::new();
        assert!(report.phase_spans(&[orphan.clone()]).is_empty());
        assert!(report.schedule_rows(&[orphan]).is_empty());
    }
}
