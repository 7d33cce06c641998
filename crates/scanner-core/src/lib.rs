pub mod camera;
pub mod capability;
pub mod config;
pub mod consts;
pub mod decode;
pub mod effects;
pub mod error;
pub mod feedback;
pub mod model;
pub mod permission;
pub mod platform;
pub mod presenter;
pub mod routing;
pub mod session;
