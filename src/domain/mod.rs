// Domain layer - Plot models
pub mod plot;
