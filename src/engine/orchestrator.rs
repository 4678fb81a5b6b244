// ==========================================
// 钢结构BIM施工分析系统 - 管线编排器
// ==========================================
// 职责: 单次运行入口, 串联提取→合并→楼层→排程→
//       传播→成本/碳足迹派生→聚合→报表行
// 红线: 全部配置经显式 PipelineConfig 传入, 无全局状态;
//       批次故障(空批次)整体中止, 不产出部分结果
// ==========================================

use crate::config::{CostRates, ImpactFactors, PipelineConfig};
use crate::domain::{Assembly, DerivedStore, ElementRecord, Level};
use crate::engine::aggregator::AggregateRow;
use crate::engine::consolidator::AssemblyConsolidator;
use crate::engine::derivation::{CostEngine, FootprintEngine, FootprintSummary};
use crate::engine::level_detector::LevelDetector;
use crate::engine::propagator::SchedulePropagator;
use crate::engine::scheduler::ErectionScheduler;
use crate::engine::vertical::VerticalClassifier;
use crate::extractor::{ElementExtractor, ExtractError};
use crate::model::ModelReader;
use crate::report::{
    DaySummary, InventoryReport, InventoryRow, PhaseSpan, ScheduleRow, TimelineReport,
};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::info;
use uuid::Uuid;

#[derive(Error, Debug)]
pub enum PipelineError {
    #[error("提取阶段失败: {0}")]
    Extract(#[from] ExtractError),
}

pub type PipelineResult<T> = Result<T, PipelineError>;

// ==========================================
// RunResult - 单次运行结果
// ==========================================
// 生命周期限于单次运行, 调用方消费后即丢弃
#[derive(Debug, Serialize, Deserialize)]
pub struct RunResult {
    pub run_id: Uuid,
    pub elements: Vec<ElementRecord>,
    pub derived: DerivedStore,
    pub assemblies: Vec<Assembly>,
    pub levels: Vec<Level>,

    // 5D / 6D 聚合
    pub cost_rows: Vec<AggregateRow>,
    pub footprint_rows: Vec<AggregateRow>,
    pub footprint_total_tco2: f64,
    pub footprint_intensity_kgco2_kg: f64,

    // 4D / 7D 报表行
    pub phase_spans: Vec<PhaseSpan>,
    pub day_summaries: Vec<DaySummary>,
    pub schedule_rows: Vec<ScheduleRow>,
    pub inventory_rows: Vec<InventoryRow>,
}

impl RunResult {
    pub fn total_weight_kg(&self) -> f64 {
        self.elements.iter().map(|e| e.weight_kg).sum()
    }

    pub fn total_cost_eur(&self) -> f64 {
        self.cost_rows.iter().map(|r| r.quantity).sum()
    }
}

// ==========================================
// AnalyticsPipeline - 管线编排器
// ==========================================
pub struct AnalyticsPipeline {
    config: PipelineConfig,
    rates: CostRates,
    factors: ImpactFactors,
}

impl AnalyticsPipeline {
    /// 构造函数
    pub fn new(config: PipelineConfig, rates: CostRates, factors: ImpactFactors) -> Self {
        Self {
            config,
            rates,
            factors,
        }
    }

    /// 默认单价/因子表的便捷构造
    pub fn with_defaults(config: PipelineConfig) -> Self {
        Self::new(config, CostRates::default(), ImpactFactors::default())
    }

    /// 执行完整管线
    pub fn run<M: ModelReader>(&self, model: &M) -> PipelineResult<RunResult> {
        let run_id = Uuid::new_v4();
        info!(%run_id, start_date = %self.config.start_date, "管线: 运行开始");

        // 1. 提取(空批次在此中止)
        let extractor = ElementExtractor::new(&self.config);
        let elements = extractor.extract(model)?;

        // 2. 合并为装配体(紧固件已被合并引擎跳过)
        let assemblies = AssemblyConsolidator::new().consolidate(&elements);

        // 3. 楼层检测: 仅非竖向装配体的高程参与聚类
        let vertical = VerticalClassifier::new(
            self.config.vertical_weight_threshold_kg,
            self.config.vertical_rise_threshold_mm,
            self.config.steel_density_kg_m3,
        );
        let detector = LevelDetector::new(
            self.config.cluster_tolerance_mm,
            self.config.min_cluster_size,
        );
        let horizontal_elevations: Vec<f64> = assemblies
            .iter()
            .filter(|a| !vertical.is_vertical(a, &elements))
            .map(|a| a.min_elevation_mm)
            .collect();
        let levels = detector.detect_levels(&horizontal_elevations);

        // 4. 排程 + 传播
        let scheduler = ErectionScheduler::new(&self.config);
        let assemblies = scheduler.schedule(assemblies, &elements, &levels, &self.config);

        let mut derived = DerivedStore::new();
        SchedulePropagator::new().propagate_all(&assemblies, &elements, &mut derived);

        // 5. 成本/碳足迹派生与聚合
        let cost_engine = CostEngine::new(self.rates.clone());
        cost_engine.derive(&elements, &mut derived);
        let cost_rows = cost_engine.aggregate(&elements, &derived);

        let footprint_engine = FootprintEngine::new(self.factors.clone());
        footprint_engine.derive(&elements, &mut derived);
        let footprint_rows = footprint_engine.aggregate(&elements, &derived);
        let FootprintSummary {
            total_tco2,
            intensity_kgco2_kg,
        } = footprint_engine.summarize(&footprint_rows);

        // 6. 报表行
        let timeline = TimelineReport::new();
        let phase_spans = timeline.phase_spans(&assemblies);
        let day_summaries = timeline.day_summaries(&assemblies);
        let schedule_rows = timeline.schedule_rows(&assemblies);
        let inventory_rows = InventoryReport::new().rows(&assemblies);

        info!(
            %run_id,
            elements = elements.len(),
            assemblies = assemblies.len(),
            levels = levels.len(),
            "管线: 运行完成"
        );

        Ok(RunResult {
            run_id,
            elements,
            derived,
            assemblies,
            levels,
            cost_rows,
            footprint_rows,
            footprint_total_tco2: total_tco2,
            footprint_intensity_kgco2_kg: intensity_kgco2_kg,
            phase_spans,
            day_summaries,
            schedule_rows,
            inventory_rows,
        })
    }
}
