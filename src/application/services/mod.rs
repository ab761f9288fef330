mod backend_registry;
mod dispatcher;
mod frame_sampler;
mod process_service;
pub mod result_normalizer;
mod scratch_space;

pub use backend_registry::BackendRegistry;
pub use dispatcher::{DispatchError, Dispatcher};
pub use frame_sampler::{FrameSampler, SamplingError};
pub use process_service::{ProcessError, ProcessRequest, ProcessService};
pub use scratch_space::ScratchSpace;
