//! Stylize Commands

/// 风格迁移命令
#[derive(Debug, Clone)]
pub struct Stylize {
    /// 内容图原始字节
    pub content: Vec<u8>,
    /// 风格图原始字节
    pub style: Vec<u8>,
    /// 表单中的 max_dim 原始文本，缺省时使用配置默认值
    pub max_dim: Option<String>,
}

/// 风格迁移结果
#[derive(Debug, Clone)]
pub struct StylizeResult {
    /// PNG 编码后的结果图
    pub png: Vec<u8>,
    pub width: u32,
    pub height: u32,
    /// 模型推理耗时（毫秒）
    pub elapsed_ms: u64,
}
