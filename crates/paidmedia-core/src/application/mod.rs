pub mod services;

pub use services::{
    PaidMediaService,
    ProviderAccessor,
};
