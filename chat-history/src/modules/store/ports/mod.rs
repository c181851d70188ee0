// Store Ports Layer
// 端口定义了存储客户端与远端服务之间的接口

mod store_port;

pub use store_port::*;
