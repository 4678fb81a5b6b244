// ==========================================
// 钢结构BIM施工分析系统 - 吊装排程引擎
// ==========================================
// 职责: 楼层吸附 + 阶段标签 + 产能贪心排日
// 输入: 装配体列表 + 楼层 + 管线配置
// 输出: 排程后的装配体序列(排序键顺序)
// ==========================================
// 红线: 日产能约束为贪心单遍装箱, 无回溯/前瞻;
//       周六/周日不安排吊装
// ==========================================

mod core;


pub use self::core::ErectionScheduler;
