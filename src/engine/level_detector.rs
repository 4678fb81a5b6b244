// ==========================================
// 钢结构BIM施工分析系统 - 楼层检测引擎
// ==========================================
// 职责: 横向装配体高程聚类 → 代表性楼层
// 输入: 非竖向装配体的高程序列
// 输出: 楼层高程列表(簇均值, 升序)
// ==========================================
// 规则:
// 1) 高程升序扫描, 与前一已接受高程间距超过容差即开新簇
// 2) 簇成员数达到下限才晋升为楼层(取均值)
// 3) 无合格簇时回退为全体均值的单一楼层
// ==========================================

use crate::domain::Level;
use tracing::{debug, info};

// ==========================================
// LevelDetector - 楼层检测引擎
// ==========================================
pub struct LevelDetector {
    tolerance_mm: f64,
    min_cluster_size: usize,
}

impl LevelDetector {
    /// 构造函数
    ///
    /// # 参数
    /// - `tolerance_mm`: 聚类间距容差
    /// - `min_cluster_size`: 楼层最小成员数
    pub fn new(tolerance_mm: f64, min_cluster_size: usize) -> Self {
        Self {
            tolerance_mm,
            min_cluster_size,
        }
    }

    /// 检测代表性楼层
    ///
    /// # 参数
    /// - `elevations`: 非竖向装配体的高程 (mm)
    ///
    /// # 返回
    /// 楼层高程列表; 输入为空时返回 [0.0]
    pub fn detect_levels(&self, elevations: &[f64]) -> Vec<Level> {
        if elevations.is_empty() {
            return vec![0.0];
        }

        let mut sorted: Vec<f64> = elevations.to_vec();
        sorted.sort_by(f64::total_cmp);

        let mut levels: Vec<Level> = Vec::new();
        let mut cluster: Vec<f64> = vec![sorted[0]];

        for &z in &sorted[1..] {
            if z - cluster[cluster.len() - 1] < self.tolerance_mm {
                cluster.push(z);
            } else {
                if cluster.len() >= self.min_cluster_size {
                    levels.push(mean(&cluster));
                }
                cluster = vec![z];
            }
        }
        if cluster.len() >= self.min_cluster_size {
            levels.push(mean(&cluster));
        }

        if levels.is_empty() {
            debug!("楼层: 无合格簇, 回退为全体均值单一楼层");
            return vec![mean(&sorted)];
        }

        info!(levels = levels.len(), "楼层: 检测完成");
        levels
    }

    /// 最近楼层吸附(按绝对差)
    pub fn nearest_level(&self, levels: &[Level], elevation_mm: f64) -> Level {
        levels
            .iter()
            .copied()
            .min_by(|a, b| {
                (a - elevation_mm)
                    .abs()
                    .total_cmp(&(b - elevation_mm).abs())
            })
            .unwrap_or(elevation_mm)
    }
}

fn mean(values: &[f64]) -> f64 {
    values.iter().sum::<f64>() / values.len() as f64
}

#[cfg(test)]
mod tests {
    use super::*;

    fn detector() -> LevelDetector {
        LevelDetector::new(400.0, 8)
    }

    #[test]
    fn test_two_clear_levels() {
        // 8 个高程 0mm + 8 个高程 4000mm → 恰好两个楼层
        let mut elevations = vec![0.0; 8];
        elevations.extend(vec![4000.0; 8]);

        let levels = detector().detect_levels(&elevations);
        assert_eq!(levels, vec![0.0, 4000.0]);
    }

    #[test]
    fn test_isolated_elevation_not_promoted() {
        let mut elevations = vec![0.0; 8];
        elevations.extend(vec![4000.0; 8]);
        elevations.push(8000.0); // 孤立点, 簇大小 1

        let levels = detector().detect_levels(&elevations);
        assert_eq!(levels, vec![0.0, 4000.0]);
    }

    #[test]
    fn test_small_cluster_below_threshold_never_level() {
        // 7 个成员不足下限 → 回退为全体均值
        let elevations = vec![100.0; 7];
        let levels = detector().detect_levels(&elevations);
        assert_eq!(levels, vec![100.0]);
    }

    #[test]
    fn test_cluster_within_tolerance_single_level_at_mean() {
        // 8 个成员彼此相距 < 400mm → 单一楼层取均值
        let elevations: Vec<f64> = (0..8).map(|i| i as f64 * 100.0).collect();
        let levels = detector().detect_levels(&elevations);
        assert_eq!(levels.len(), 1);
        assert!((levels[0] - 350.0).abs() < 1e-9);
    }

    #[test]
    fn test_gap_measured_to_previous_accepted() {
        // 链式扩展: 每步 300mm < 400mm, 总跨度可超过容差
        let elevations: Vec<f64> = (0..10).map(|i| i as f64 * 300.0).collect();
        let levels = detector().detect_levels(&elevations);
        assert_eq!(levels.len(), 1);
    }

    #[test]
    fn test_empty_input_defaults_to_zero() {
        assert_eq!(detector().detect_levels(&[]), vec![0.0]);
    }

    #[test]
    fn test_nearest_level_snap() {
        let levels = vec![0.0, 4000.0, 8000.0];
        assert_eq!(detector().nearest_level(&levels, 3800.0), 4000.0);
        assert_eq!(detector().nearest_level(&levels, 1200.0), 0.0);
        // 楼层为空时回退为自身高程
        assert_eq!(detector().nearest_level(&[], 1200.0), 1200.0);
    }
}
