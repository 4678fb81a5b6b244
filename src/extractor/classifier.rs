// ==========================================
// 钢结构BIM施工分析系统 - 构件分类器
// ==========================================
// 职责: 由截面文本与类型提示判定结构类别
// 红线: 先判紧固件谓词, 再做类别分类;
//       确认为钢板的构件不会被判为紧固件
// ==========================================

use crate::domain::Category;

/// 热轧型钢族标记(空白压缩后的大写截面文本包含匹配)
const ROLLED_TOKENS: [&str; 12] = [
    "IPE", "HEA", "HEB", "UPN", "SHS", "RHS", "TUBO", "HSS", "W", "UB", "UC", "ANGULO",
];

/// 钢板标记(包含匹配)
const PLATE_TOKENS: [&str; 3] = ["PLATE", "CHAPA", "PLANCHA"];

/// 格栅标记
const GRATING_TOKENS: [&str; 2] = ["REJILLA", "TRAMEX"];

/// 紧固件关键词(名称 + 截面文本的组合串包含匹配)
const FASTENER_TOKENS: [&str; 8] = [
    "BOLT", "NUT", "WASHER", "TORNILLO", "TUERCA", "ARANDELA", "ANCHOR", "ROD",
];

/// 机械紧固件类型
const MECHANICAL_FASTENER_CLASS: &str = "IfcMechanicalFastener";

// ==========================================
// ElementClassifier - 构件分类器
// ==========================================
// 无状态引擎, 规则全部内置
pub struct ElementClassifier;

impl ElementClassifier {
    pub fn new() -> Self {
        Self
    }

    /// 钢板确认谓词: 前缀 PL/FL 或含板类标记
    pub fn is_confirmed_plate(&self, profile_name: &str) -> bool {
        let p = profile_name.to_uppercase().trim().to_string();
        p.starts_with("PL")
            || p.starts_with("FL")
            || PLATE_TOKENS.iter().any(|t| p.contains(t))
    }

    /// 紧固件谓词(优先于类别分类)
    ///
    /// # 参数
    /// - `profile_name`: 截面文本
    /// - `name`: 元素名称
    /// - `ifc_class`: 元素类型
    ///
    /// # 规则
    /// 非确认钢板 且 (机械紧固件类型 或 名称/截面含紧固件关键词)
    pub fn is_fastener(&self, profile_name: &str, name: &str, ifc_class: &str) -> bool {
        if self.is_confirmed_plate(profile_name) {
            return false;
        }
        if ifc_class == MECHANICAL_FASTENER_CLASS {
            return true;
        }
        let text = format!("{} {}", name.to_uppercase(), profile_name.to_uppercase());
        FASTENER_TOKENS.iter().any(|t| text.contains(t))
    }

    /// 类别分类(首个命中规则生效)
    ///
    /// 1) 钢板标记 → PLACA
    /// 2) 型钢族标记 或 角钢命名 (L+数字) → LAMINADO
    /// 3) 格栅标记 → REJILLA
    /// 4) 其他 → GENERICO
    pub fn classify(&self, profile_name: &str) -> Category {
        if self.is_confirmed_plate(profile_name) {
            return Category::Plate;
        }

        let p: String = profile_name
            .to_uppercase()
            .chars()
            .filter(|c| !c.is_whitespace())
            .collect();

        if ROLLED_TOKENS.iter().any(|t| p.contains(t)) {
            return Category::Rolled;
        }

        // 角钢命名: 首字母 L 后跟数字 (如 L50x5)
        let mut chars = p.chars();
        if let (Some(first), Some(second)) = (chars.next(), chars.next()) {
            if first == 'L' && second.is_ascii_digit() {
                return Category::Rolled;
            }
        }

        if GRATING_TOKENS.iter().any(|t| p.contains(t)) {
            return Category::Grating;
        }

        Category::Generic
    }
}

impl Default for ElementClassifier {
    fn default() -> Self {
        Self::new()
    }
}
