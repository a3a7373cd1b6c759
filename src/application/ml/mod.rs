// Scale -> score -> label inference
pub mod pipeline;

// Startup-built immutable service shared with request handlers
pub mod service;

// Artifact regeneration (synthetic data + fit + evaluation)
pub mod trainer;
