// Domain layer: records, raw input shapes and ports. No I/O happens here.

pub mod input;
pub mod model;
pub mod ports;
