mod build;
mod deploy;
mod export;
mod help;
mod image;
mod invoke;
mod new;
mod package;

pub use build::build;
pub use deploy::deploy;
pub use export::export;
pub use help::help;
pub use image::{resolve_image, setup_image};
pub use invoke::invoke;
pub use new::new_project;
pub use package::package;
