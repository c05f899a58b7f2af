// Resource descriptors shared by the repository, service and controller layers

pub mod traits;

pub use traits::{CrudResource, Identifiable, MergeIntoActiveModel, RequestBody};
