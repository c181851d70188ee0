// Chat Domain - Services
// 领域服务处理不属于单个实体的业务逻辑

mod tool_call;

pub use tool_call::*;
