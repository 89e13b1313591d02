mod material_request;

pub use material_request::MaterialRequest;
