mod artifact_store;
mod registry;

pub use artifact_store::IArtifactStore;
pub use registry::IModelRegistry;
