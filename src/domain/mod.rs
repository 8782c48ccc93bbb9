// Domain layer: the record schema, the generic field view and the ports the pipeline runs against.

pub mod model;
pub mod ports;
pub mod proto;
