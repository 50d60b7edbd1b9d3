//! 购票工作流
//!
//! 两段式售票：
//! 1. 创建支付意向：校验场次/库存/数量，向支付处理商登记金额与订单
//!    上下文，**不写数据库**
//! 2. 确认：从处理商回读意向，要求 succeeded，按意向元数据落库并
//!    原子累加场次人数
//!
//! 库存只在第一步校验；确认阶段不再复核（与线上行为一致的已知缺口，
//! 原子自增保证计数本身不丢）。

pub mod service;

pub use service::TicketService;

#[cfg(test)]
mod tests;
