// Store Application Layer - 应用层
// 句柄、批量管道与连接生命周期

pub mod connection;
mod handle;
mod pipeline;
mod timeout;

pub use connection::ConnectionManager;
pub use handle::*;
pub use pipeline::*;
pub use timeout::*;
