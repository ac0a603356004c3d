pub mod models;

pub use models::{
    CreateServiceRequest, RequestImage, RequestStatus, ServiceRequest, UpdateServiceRequest,
};
