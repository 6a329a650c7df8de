//! 有序集合引擎
//!
//! 站点内容的多个实体族 (Hero、Event、Sponsor、Season、Timeline 等) 都维护
//! 一个密集、无空洞的 `sort_order` 序列。本模块把这套重排协议收敛为一个
//! 通用引擎，各实体仓库只提供表名和分区谓词：
//!
//! - [`sequence`] - 纯内存排序引擎 (嵌入式数组 + 不变量测试)
//! - [`collection`] - SurrealDB 顶层表的通用有序集合管理器
//! - [`tx`] - 事务脚本构建器 (单条 BEGIN…COMMIT 原子脚本)
//!
//! # 不变量
//!
//! | 不变量 | 说明 |
//! |--------|------|
//! | 密集性 | 分区内 `sort_order` 恰好为 `0..n-1`，无重复无空洞 |
//! | 追加插入 | 新记录落在分区末尾 (`sort_order = n`) |
//! | 删除压缩 | 删除后所有更高位记录下移一位 |
//! | 分区迁移 | 停用记录压缩原分区并停在哨兵位；启用追加到末尾 |
//! | 移动一致性 | 仅新旧位置之间的记录位移 ±1 |
//! | 旗标唯一 | 兄弟集合中至多一条记录持有排他旗标 |

pub mod collection;
pub mod sequence;
pub mod tx;

pub use collection::{OrderedCollection, OrderedEntity, OrderingError, Partition};
pub use sequence::Sequenced;
pub use tx::{Tx, TxError};

/// Sentinel `sort_order` for records parked outside their ordered partition.
///
/// Parked records are excluded from the density invariant and are listed by
/// `updated_at` descending instead.
pub const UNORDERED: i64 = -1;
