// Store Infrastructure Layer
//
// 存储端口的具体适配器：
// - UpstashRestStore: 基于 REST 的托管键值服务
// - InMemoryKeyValueStore: 进程内实现，用于开发和测试

mod in_memory;
mod upstash;

pub use in_memory::*;
pub use upstash::*;
