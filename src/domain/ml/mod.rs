// Feature ordering shared by trainer and pipeline
pub mod feature_registry;

// Fitted feature standardization
pub mod scaler;

// Prediction and metadata types
pub mod types;
