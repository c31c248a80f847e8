mod registry;

pub use registry::{
    DispatchTarget, ListenerId, PageContext, PageModule, PageRegistry, SharedModule,
};
