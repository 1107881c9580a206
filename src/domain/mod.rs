// Domain layer: the contact submission model and the ports (traits) the core depends on.

pub mod model;
pub mod ports;
