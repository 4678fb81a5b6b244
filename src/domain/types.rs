// ==========================================
// 钢结构BIM施工分析系统 - 领域类型定义
// ==========================================
// 职责: 结构类别与构件朝向的枚举定义
// 序列化格式: 与模型回写/报表约定一致的西语大写标识
// ==========================================

use serde::{Deserialize, Serialize};
use std::fmt;

// ==========================================
// 结构类别 (Category)
// ==========================================
// 分类器输出, 同时作为单价表/排放因子表的索引键。
// 排序遵循枚举声明顺序(报表章节顺序), 不按本地化字符串排序。
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Category {
    Rolled,   // 热轧型钢 (LAMINADO)
    Plate,    // 钢板 (PLACA)
    Fastener, // 紧固件 (TORNILLERIA)
    Grating,  // 格栅板 (REJILLA)
    Generic,  // 其他 (GENERICO)
}

impl Category {
    /// 报表/回写使用的标准标识(与既有交付物字段保持一致)
    pub fn as_report_code(&self) -> &'static str {
        match self {
            Category::Rolled => "LAMINADO",
            Category::Plate => "PLACA",
            Category::Fastener => "TORNILLERIA",
            Category::Grating => "REJILLA",
            Category::Generic => "GENERICO",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_report_code())
    }
}

// ==========================================
// 构件朝向 (Orientation)
// ==========================================
// 排程阶段输出: 竖向构件(柱类)先于横向构件(梁类)安装
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Orientation {
    Vertical,   // 竖向 (PILARES)
    Horizontal, // 横向 (VIGAS)
}

impl Orientation {
    /// 阶段标签中使用的西语工序名
    pub fn as_phase_code(&self) -> &'static str {
        match self {
            Orientation::Vertical => "PILARES",
            Orientation::Horizontal => "VIGAS",
        }
    }
}

impl fmt::Display for Orientation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_phase_code())
    }
}
