pub mod request_image;
pub mod service_request;

pub use request_image::RequestImage;
pub use service_request::{
    CreateServiceRequest, RequestStatus, ServiceRequest, UpdateServiceRequest,
};
