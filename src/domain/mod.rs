// Domain layer: the stock record model and the ports (interfaces) the adapters implement.

pub mod model;
pub mod ports;
