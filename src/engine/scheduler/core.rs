// ==========================================
// 钢结构BIM施工分析系统 - 吊装排程引擎实现
// ==========================================
// 流程:
// 1) 逐装配体判定朝向, 计算吸附高程与阶段标签
//    - 竖向: 自身高程取整到米(独立于检测楼层)
//    - 横向: 吸附到最近检测楼层
// 2) 按 (吸附高程升序, 竖向优先, 重量降序) 排序
//    (稳定排序: 全键相同时保持输入顺序)
// 3) 日期游标贪心填充: 超产能换日, 周末跳至下周一;
//    单件超产能仍独占一天, 下一件正常换日
// ==========================================

use crate::config::PipelineConfig;
use crate::domain::{Assembly, ElementRecord, Level, Orientation};
use crate::engine::level_detector::LevelDetector;
use crate::engine::vertical::VerticalClassifier;
use chrono::{Datelike, Duration, NaiveDate, Weekday};
use tracing::info;

// ==========================================
// ErectionScheduler - 吊装排程引擎
// ==========================================
pub struct ErectionScheduler {
    vertical: VerticalClassifier,
    detector: LevelDetector,
}

impl ErectionScheduler {
    /// 构造函数
    pub fn new(config: &PipelineConfig) -> Self {
        Self {
            vertical: VerticalClassifier::new(
                config.vertical_weight_threshold_kg,
                config.vertical_rise_threshold_mm,
                config.steel_density_kg_m3,
            ),
            detector: LevelDetector::new(config.cluster_tolerance_mm, config.min_cluster_size),
        }
    }

    /// 执行排程(装配体列表被就地写入派生字段后按排序键返回)
    ///
    /// # 参数
    /// - `assemblies`: 合并引擎输出的装配体
    /// - `elements`: 构件记录批次(竖向判定需要)
    /// - `levels`: 检测到的代表性楼层
    /// - `config`: 管线配置(开工日期/日产能)
    ///
    /// # 返回
    /// 排序并写入日期/阶段标签的装配体序列
    pub fn schedule(
        &self,
        mut assemblies: Vec<Assembly>,
        elements: &[ElementRecord],
        levels: &[Level],
        config: &PipelineConfig,
    ) -> Vec<Assembly> {
        // 1. 朝向 + 吸附高程 + 阶段标签
        for assembly in assemblies.iter_mut() {
            let orientation = if self.vertical.is_vertical(assembly, elements) {
                Orientation::Vertical
            } else {
                Orientation::Horizontal
            };

            let z = assembly.min_elevation_mm;
            let snapped = match orientation {
                // 竖向: 自身高程取整到米
                Orientation::Vertical => (z / 1000.0).round() * 1000.0,
                // 横向: 吸附到最近楼层
                Orientation::Horizontal => self.detector.nearest_level(levels, z),
            };

            assembly.orientation = Some(orientation);
            assembly.snapped_elevation_mm = Some(snapped);
            assembly.phase_label = Some(format!(
                "NIVEL +{:.2}m | {}",
                snapped / 1000.0,
                orientation.as_phase_code()
            ));
        }

        // 2. 排序键: (吸附高程升序, 竖向优先, 重量降序)
        assemblies.sort_by(|a, b| {
            let za = a.snapped_elevation_mm.unwrap_or(0.0);
            let zb = b.snapped_elevation_mm.unwrap_or(0.0);
            za.total_cmp(&zb)
                .then(a.orientation.cmp(&b.orientation))
                .then(b.total_weight_kg.total_cmp(&a.total_weight_kg))
        });

        // 3. 日期游标贪心填充
        let mut cursor = skip_weekend(config.start_date);
        let mut accumulated_kg = 0.0;

        for assembly in assemblies.iter_mut() {
            let weight = assembly.total_weight_kg;
            if accumulated_kg + weight <= config.daily_capacity_kg {
                accumulated_kg += weight;
            } else {
                cursor = skip_weekend(cursor + Duration::days(1));
                accumulated_kg = weight;
            }
            assembly.scheduled_date = Some(cursor);
        }

        info!(
            assemblies = assemblies.len(),
            start_date = %config.start_date,
            daily_capacity_kg = config.daily_capacity_kg,
            "排程: 日期分配完成"
        );
        assemblies
    }
}

/// 周末跳转: 周六/周日前移到下周一
fn skip_weekend(date: NaiveDate) -> NaiveDate {
    match date.weekday() {
        Weekday::Sat => date + Duration::days(2),
        Weekday::Sun => date + Duration::days(1),
        _ => date,
    }
}
