// Store Module - 存储客户端模块
//
// 对托管键值服务的薄封装：
// - domain: 字段映射、查询结果、批量命令与应答
// - ports: KeyValueStore / StoreConnector 端口与错误类型
// - infrastructure: Upstash REST 适配器与内存实现
// - application: 共享句柄、批量管道、连接生命周期

pub mod application;
pub mod domain;
pub mod infrastructure;
pub mod ports;

pub use application::connection::{acquire, default_manager, release};
pub use application::{with_timeout, ConnectionManager, Pipeline, StoreHandle};
pub use domain::{FieldMap, HashLookup, PipelineCommand, PipelineReply, RankRange, ScoreUpdate};
pub use infrastructure::{
    InMemoryConnector, InMemoryKeyValueStore, UpstashConnector, UpstashRestStore,
};
pub use ports::{KeyValueStore, StoreConnector, StoreError};
