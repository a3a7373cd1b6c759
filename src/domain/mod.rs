// Domain-specific error types
pub mod errors;

// ML domain (features, scaler, prediction types)
pub mod ml;
