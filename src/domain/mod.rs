// Domain layer: wire value types, server results and the capability traits
// every parameter object and transport implements.

pub mod model;
pub mod ports;
pub mod results;
