// Domain layer: board entities and the read models returned by the query services.

pub mod dto;
pub mod model;
