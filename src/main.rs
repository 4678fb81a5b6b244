// ==========================================
// 钢结构BIM施工分析系统 - CLI 主入口
// ==========================================
// 用法:
//   steel-bim-analytics <模型快照.json> [开工日期 YYYY-MM-DD]
//                       [日产能kg] [输出目录]
// 输出: 成本/碳足迹/排程/维护清单 CSV
// ==========================================

use anyhow::{bail, Context, Result};
use chrono::NaiveDate;
use std::path::PathBuf;

use steel_bim_analytics::engine::AnalyticsPipeline;
use steel_bim_analytics::model::ModelSnapshot;
use steel_bim_analytics::report::CsvExporter;
use steel_bim_analytics::{logging, PipelineConfig, APP_NAME, VERSION};

fn main() -> Result<()> {
    // 初始化日志系统
    logging::init();

    tracing::info!("==================================================");
    tracing::info!("{} - 决策支持系统", APP_NAME);
    tracing::info!("系统版本: {}", VERSION);
    tracing::info!("==================================================");

    let args: Vec<String> = std::env::args().skip(1).collect();
    if args.is_empty() {
        bail!(
            "用法: steel-bim-analytics <模型快照.json> [开工日期 YYYY-MM-DD] [日产能kg] [输出目录]"
        );
    }

    let snapshot_path = PathBuf::from(&args[0]);
    let mut config = PipelineConfig::default();

    if let Some(raw) = args.get(1) {
        config.start_date = NaiveDate::parse_from_str(raw, "%Y-%m-%d")
            .with_context(|| format!("开工日期格式无效: {}", raw))?;
    }
    if let Some(raw) = args.get(2) {
        config.daily_capacity_kg = raw
            .parse::<f64>()
            .with_context(|| format!("日产能格式无效: {}", raw))?;
    }
    let out_dir = args
        .get(3)
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from("."));

    tracing::info!("使用模型快照: {}", snapshot_path.display());
    let snapshot = ModelSnapshot::load(&snapshot_path)
        .with_context(|| format!("无法加载模型快照: {}", snapshot_path.display()))?;

    let pipeline = AnalyticsPipeline::with_defaults(config);
    let result = pipeline.run(&snapshot).context("管线运行失败")?;

    tracing::info!("运行标识: {}", result.run_id);
    tracing::info!("构件总数: {}", result.elements.len());
    tracing::info!("装配体数: {}", result.assemblies.len());
    tracing::info!("总重量: {:.1} kg", result.total_weight_kg());
    tracing::info!("材料成本: {:.2} EUR", result.total_cost_eur());
    tracing::info!(
        "碳足迹: {:.2} tCO2e (强度 {:.2} kgCO2e/kg)",
        result.footprint_total_tco2,
        result.footprint_intensity_kgco2_kg
    );

    std::fs::create_dir_all(&out_dir)
        .with_context(|| format!("无法创建输出目录: {}", out_dir.display()))?;

    let exporter = CsvExporter::new();
    exporter.write_aggregate_rows(&out_dir.join("costes.csv"), &result.cost_rows)?;
    exporter.write_aggregate_rows(&out_dir.join("huella.csv"), &result.footprint_rows)?;
    exporter.write_schedule_rows(&out_dir.join("planificacion.csv"), &result.schedule_rows)?;
    exporter.write_inventory_rows(&out_dir.join("inventario.csv"), &result.inventory_rows)?;

    tracing::info!("导出完成, 输出目录: {}", out_dir.display());
    Ok(())
}
