pub mod request;
pub mod service_base;
pub mod transport;

pub use request::ServiceRequest;
pub use service_base::{ServiceBase, ServiceOptions};
pub use transport::HttpTransport;
