pub mod platform;
pub mod release;

pub use platform::{Platform, normalize_arch, normalize_os};
pub use release::{Build, Release};
