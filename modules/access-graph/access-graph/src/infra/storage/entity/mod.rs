pub mod cloud_resource;
pub mod developer;
pub mod permission;
