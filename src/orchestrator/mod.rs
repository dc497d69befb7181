//! 编排层（Orchestration Layer）
//!
//! ## 层次关系
//!
//! ```text
//! batch_processor (处理整份名单 Vec<RosterLine>)
//!     ↓
//! workflow::RowFlow (处理单行 RosterRow)
//!     ↓
//! services (能力层：identity / avatar cache)
//!     ↓
//! clients + infrastructure (Roblox API / 外部生成器)
//! ```
//!
//! 编排层只做调度和统计，不做具体业务判断

pub mod batch_processor;

pub use batch_processor::{App, BatchStats};
